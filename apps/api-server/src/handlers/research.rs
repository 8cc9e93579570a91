//! Research endpoints.

use actix_web::{HttpRequest, HttpResponse, web};
use uuid::Uuid;

use staplab_core::domain::ResearchFields;
use staplab_shared::dto::MessageResponse;

use super::form::EntityForm;
use super::views;
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/researchs/create-research
pub async fn create(
    _identity: Identity,
    req: HttpRequest,
    payload: web::Payload,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    let form: EntityForm<ResearchFields> = EntityForm::read(&req, payload, &state).await?;
    let research = state.research.create(form.fields).await?;
    Ok(HttpResponse::Created().json(views::research(research)))
}

/// GET /api/researchs/all-researchs
pub async fn all(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let entries = state.research.list().await?;
    Ok(HttpResponse::Ok().json(views::list(entries, views::research)))
}

/// GET /api/researchs/get-research/{id}
pub async fn get(path: web::Path<Uuid>, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let research = state.research.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(views::research(research)))
}

/// PUT /api/researchs/update-research/{id}
pub async fn update(
    _identity: Identity,
    path: web::Path<Uuid>,
    req: HttpRequest,
    payload: web::Payload,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    let form: EntityForm<ResearchFields> = EntityForm::read(&req, payload, &state).await?;
    match state.research.update(path.into_inner(), form.fields).await {
        Ok(research) => Ok(HttpResponse::Ok().json(views::research(research))),
        Err(e) => {
            if let Some(uploaded) = &form.upload {
                state.images.discard_upload(uploaded).await;
            }
            Err(e.into())
        }
    }
}

/// DELETE /api/researchs/delete-research/{id}
pub async fn delete(
    _identity: Identity,
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    state.research.delete(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Research deleted successfully!")))
}
