//! HTTP handlers and route configuration.

mod form;
mod health;
mod posts;
mod research;
mod teams;
mod users;
mod views;


use actix_web::web;

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::PathConfig::default()
            .error_handler(|_, _| AppError::bad_request("Invalid id").into()),
    )
    .service(
        web::scope("/api")
            .route("/health", web::get().to(health::health_check))
            .service(
                web::scope("/posts")
                    .route("/create-post", web::post().to(posts::create))
                    .route("/all-posts", web::get().to(posts::all))
                    .route("/get-post/{id}", web::get().to(posts::get))
                    .route("/update-post/{id}", web::put().to(posts::update))
                    .route("/delete-post/{id}", web::delete().to(posts::delete)),
            )
            .service(
                web::scope("/researchs")
                    .route("/create-research", web::post().to(research::create))
                    .route("/all-researchs", web::get().to(research::all))
                    .route("/get-research/{id}", web::get().to(research::get))
                    .route("/update-research/{id}", web::put().to(research::update))
                    .route("/delete-research/{id}", web::delete().to(research::delete)),
            )
            .service(
                web::scope("/teams")
                    .route("/create-team", web::post().to(teams::create))
                    .route("/all-teams", web::get().to(teams::all))
                    .route("/get-team/{id}", web::get().to(teams::get))
                    .route("/update-team/{id}", web::put().to(teams::update))
                    .route("/delete-team/{id}", web::delete().to(teams::delete)),
            )
            .service(
                web::scope("/users")
                    .route("/create-user", web::post().to(users::create))
                    .route("/all-users", web::get().to(users::all))
                    .route("/get-user/{id}", web::get().to(users::get))
                    .route("/me", web::get().to(users::me))
                    .route("/update-user/{id}", web::put().to(users::update))
                    .route("/delete-user/{id}", web::delete().to(users::delete))
                    .route("/login", web::post().to(users::login))
                    .route("/reset-password", web::post().to(users::reset_password)),
            ),
    );
}
