//! # STAP Lab API Server
//!
//! Actix-web entry point for the lab's content backend.

use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

use staplab_core::domain::UserFields;

mod config;
mod handlers;
mod middleware;
mod state;
mod telemetry;

use config::AppConfig;
use state::AppState;
use telemetry::{TelemetryConfig, init_telemetry};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!(
        "Starting STAP Lab API Server on {}:{}",
        config.host,
        config.port
    );

    let (state, resources) = AppState::new(&config).await;

    if let Some(admin) = &config.admin {
        let fields = UserFields {
            fullname: Some(admin.fullname.clone()),
            email: Some(admin.email.clone()),
            password: Some(admin.password.clone()),
        };
        match state.users.ensure(fields).await {
            Ok(Some(user)) => tracing::info!(user_id = %user.id, "Administrator account created"),
            Ok(None) => tracing::debug!("Administrator account already present"),
            Err(e) => tracing::error!(error = %e, "Failed to create administrator account"),
        }
    }

    let cors_origins = config.cors_origins.clone();
    let server = HttpServer::new(move || {
        App::new()
            .wrap(cors(&cors_origins))
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
    })
    .shutdown_timeout(30)
    .bind((config.host.as_str(), config.port))?
    .run();

    let result = server.await;
    resources.close().await;
    tracing::info!("Server stopped");
    result
}

fn cors(origins: &[String]) -> Cors {
    let cors = Cors::default()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600);
    if origins.is_empty() {
        return cors.allow_any_origin();
    }
    origins
        .iter()
        .fold(cors, |cors, origin| cors.allowed_origin(origin))
}
