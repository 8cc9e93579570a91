//! Account endpoints: administration, login and password reset.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use staplab_core::domain::UserFields;
use staplab_shared::dto::{
    LoginRequest, LoginResponse, MeResponse, MessageResponse, ResetPasswordRequest,
};

use super::form::read_json;
use super::views;
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/users/create-user
pub async fn create(
    _identity: Identity,
    payload: web::Payload,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    let fields: UserFields = read_json(payload).await?;
    let user = state.users.create(fields).await?;
    Ok(HttpResponse::Created().json(views::user(user)))
}

/// GET /api/users/all-users
pub async fn all(_identity: Identity, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let users = state.users.list().await?;
    Ok(HttpResponse::Ok().json(views::list(users, views::user)))
}

/// GET /api/users/get-user/{id}
pub async fn get(
    _identity: Identity,
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    let user = state.users.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(views::user(user)))
}

/// GET /api/users/me
pub async fn me(identity: Identity, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let user = state.users.get(identity.user_id).await?;
    Ok(HttpResponse::Ok().json(MeResponse {
        user: views::user(user),
        message: "User retrieved successfully".to_string(),
    }))
}

/// PUT /api/users/update-user/{id}
pub async fn update(
    _identity: Identity,
    path: web::Path<Uuid>,
    payload: web::Payload,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    let fields: UserFields = read_json(payload).await?;
    let user = state.users.update(path.into_inner(), fields).await?;
    Ok(HttpResponse::Ok().json(views::user(user)))
}

/// DELETE /api/users/delete-user/{id}
pub async fn delete(
    identity: Identity,
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    state.users.delete(id).await?;
    tracing::info!(user_id = %id, by = %identity.user_id, "Account removed");
    Ok(HttpResponse::Ok().json(MessageResponse::new("User deleted successfully!")))
}

/// POST /api/users/login
pub async fn login(payload: web::Payload, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let body: LoginRequest = read_json(payload).await?;
    let token = state
        .users
        .login(Some(&body.email), Some(&body.password))
        .await?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        message: "Login successful".to_string(),
        access_token: token.access_token,
        token_type: "Bearer".to_string(),
        expires_in: token.expires_in,
    }))
}

/// POST /api/users/reset-password
pub async fn reset_password(
    _identity: Identity,
    payload: web::Payload,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    let body: ResetPasswordRequest = read_json(payload).await?;
    state
        .users
        .reset_password(Some(&body.email), Some(&body.new_password))
        .await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Password reset successful")))
}
