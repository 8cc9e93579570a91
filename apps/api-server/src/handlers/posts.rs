//! Blog post endpoints.

use actix_web::{HttpRequest, HttpResponse, web};
use uuid::Uuid;

use staplab_core::domain::PostFields;
use staplab_shared::dto::MessageResponse;

use super::form::EntityForm;
use super::views;
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/posts/create-post
pub async fn create(
    _identity: Identity,
    req: HttpRequest,
    payload: web::Payload,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    let form: EntityForm<PostFields> = EntityForm::read(&req, payload, &state).await?;
    let post = state.posts.create(form.fields).await?;
    Ok(HttpResponse::Created().json(views::post(post)))
}

/// GET /api/posts/all-posts
pub async fn all(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list().await?;
    Ok(HttpResponse::Ok().json(views::list(posts, views::post)))
}

/// GET /api/posts/get-post/{id}
pub async fn get(path: web::Path<Uuid>, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let post = state.posts.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(views::post(post)))
}

/// PUT /api/posts/update-post/{id}
pub async fn update(
    _identity: Identity,
    path: web::Path<Uuid>,
    req: HttpRequest,
    payload: web::Payload,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    let form: EntityForm<PostFields> = EntityForm::read(&req, payload, &state).await?;
    match state.posts.update(path.into_inner(), form.fields).await {
        Ok(post) => Ok(HttpResponse::Ok().json(views::post(post))),
        Err(e) => {
            if let Some(uploaded) = &form.upload {
                state.images.discard_upload(uploaded).await;
            }
            Err(e.into())
        }
    }
}

/// DELETE /api/posts/delete-post/{id}
pub async fn delete(
    _identity: Identity,
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    state.posts.delete(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Post deleted successfully!")))
}
