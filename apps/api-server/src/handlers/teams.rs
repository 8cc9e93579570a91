//! Team member endpoints. Bodies are JSON; the image is a URL the client
//! already hosts.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use staplab_core::domain::TeamFields;
use staplab_shared::dto::MessageResponse;

use super::form::read_json;
use super::views;
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

pub async fn create(
    _identity: Identity,
    payload: web::Payload,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    let fields: TeamFields = read_json(payload).await?;
    let team = state.teams.create(fields).await?;
    Ok(HttpResponse::Created().json(views::team(team)))
}

pub async fn all(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let teams = state.teams.list().await?;
    Ok(HttpResponse::Ok().json(views::list(teams, views::team)))
}

pub async fn get(path: web::Path<Uuid>, state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let team = state.teams.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(views::team(team)))
}

pub async fn update(
    _identity: Identity,
    path: web::Path<Uuid>,
    payload: web::Payload,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    let fields: TeamFields = read_json(payload).await?;
    let team = state.teams.update(path.into_inner(), fields).await?;
    Ok(HttpResponse::Ok().json(views::team(team)))
}

pub async fn delete(
    _identity: Identity,
    path: web::Path<Uuid>,
    state: web::Data<AppState>,
) -> AppResult<HttpResponse> {
    state.teams.delete(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(MessageResponse::new("Team deleted successfully!")))
}
