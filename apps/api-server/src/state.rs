//! Application state - shared across all handlers.

use std::sync::Arc;

use staplab_core::domain::{Post, Research, Team, User};
use staplab_core::ports::{
    MediaHost, PasswordService, PostRepository, ResearchRepository, TeamRepository, TokenService,
    UserRepository,
};
use staplab_core::reconcile::ImageReconciler;
use staplab_core::services::{PostService, ResearchService, TeamService, UserService};
use staplab_infra::{
    Argon2PasswordService, InMemoryMediaHost, InMemoryRepository, JwtTokenService,
};

#[cfg(feature = "postgres")]
use staplab_infra::database::{
    DatabaseConnections, PostgresPostRepository, PostgresResearchRepository,
    PostgresTeamRepository, PostgresUserRepository,
};

use crate::config::{AppConfig, UploadConfig};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostService>,
    pub research: Arc<ResearchService>,
    pub teams: Arc<TeamService>,
    pub users: Arc<UserService>,
    pub images: ImageReconciler,
    pub media: Arc<dyn MediaHost>,
    pub tokens: Arc<dyn TokenService>,
    pub uploads: UploadConfig,
    /// Backend behind the repositories, reported by the health check.
    pub storage: &'static str,
}

/// The four entity stores.
pub struct Repositories {
    pub backend: &'static str,
    pub posts: Arc<dyn PostRepository>,
    pub research: Arc<dyn ResearchRepository>,
    pub teams: Arc<dyn TeamRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl Repositories {
    pub fn in_memory() -> Self {
        Self {
            backend: "memory",
            posts: Arc::new(InMemoryRepository::<Post>::new()),
            research: Arc::new(InMemoryRepository::<Research>::new()),
            teams: Arc::new(InMemoryRepository::<Team>::new()),
            users: Arc::new(InMemoryRepository::<User>::new()),
        }
    }

    #[cfg(feature = "postgres")]
    pub fn postgres(db: &DatabaseConnections) -> Self {
        Self {
            backend: "postgres",
            posts: Arc::new(PostgresPostRepository::new(db.main.clone())),
            research: Arc::new(PostgresResearchRepository::new(db.main.clone())),
            teams: Arc::new(PostgresTeamRepository::new(db.main.clone())),
            users: Arc::new(PostgresUserRepository::new(db.main.clone())),
        }
    }
}

/// Resources to release after the server has stopped.
#[derive(Default)]
pub struct Resources {
    #[cfg(feature = "postgres")]
    db: Option<DatabaseConnections>,
}

impl Resources {
    pub async fn close(self) {
        #[cfg(feature = "postgres")]
        if let Some(db) = self.db {
            if let Err(e) = db.close().await {
                tracing::error!(error = %e, "Failed to close database pool");
            }
        }
    }
}

impl AppState {
    /// Build the application state with appropriate implementations,
    /// falling back to in-memory ones for anything not configured.
    pub async fn new(config: &AppConfig) -> (Self, Resources) {
        let (repositories, resources) = open_storage(config).await;
        let media = build_media_host(config);
        let state = Self::assemble(
            repositories,
            media,
            Arc::new(JwtTokenService::from_env()),
            Arc::new(Argon2PasswordService::new()),
            config.uploads,
        );

        tracing::info!("Application state initialized");
        (state, resources)
    }

    /// Wire services from explicit parts.
    pub fn assemble(
        repositories: Repositories,
        media: Arc<dyn MediaHost>,
        tokens: Arc<dyn TokenService>,
        passwords: Arc<dyn PasswordService>,
        uploads: UploadConfig,
    ) -> Self {
        let images = ImageReconciler::new(media.clone());
        Self {
            posts: Arc::new(PostService::new(repositories.posts, images.clone())),
            research: Arc::new(ResearchService::new(repositories.research, images.clone())),
            teams: Arc::new(TeamService::new(repositories.teams)),
            users: Arc::new(UserService::new(repositories.users, passwords, tokens.clone())),
            images,
            media,
            tokens,
            uploads,
            storage: repositories.backend,
        }
    }
}

#[cfg(feature = "postgres")]
async fn open_storage(config: &AppConfig) -> (Repositories, Resources) {
    let Some(db_config) = &config.database else {
        tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
        return (Repositories::in_memory(), Resources::default());
    };

    match DatabaseConnections::init(db_config).await {
        Ok(db) => {
            let repositories = Repositories::postgres(&db);
            (repositories, Resources { db: Some(db) })
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to connect to database. Using in-memory fallback.");
            (Repositories::in_memory(), Resources::default())
        }
    }
}

#[cfg(not(feature = "postgres"))]
async fn open_storage(_config: &AppConfig) -> (Repositories, Resources) {
    tracing::info!("Running without postgres feature - using in-memory repositories");
    (Repositories::in_memory(), Resources::default())
}

#[cfg(feature = "cloudinary")]
fn build_media_host(config: &AppConfig) -> Arc<dyn MediaHost> {
    let Some(cloudinary) = config.cloudinary.clone() else {
        tracing::warn!("Cloudinary credentials not set. Images are kept in memory only.");
        return Arc::new(InMemoryMediaHost::new());
    };

    match staplab_infra::CloudinaryMediaHost::new(cloudinary) {
        Ok(host) => Arc::new(host),
        Err(e) => {
            tracing::error!(error = %e, "Failed to build Cloudinary client. Using in-memory media host.");
            Arc::new(InMemoryMediaHost::new())
        }
    }
}

#[cfg(not(feature = "cloudinary"))]
fn build_media_host(_config: &AppConfig) -> Arc<dyn MediaHost> {
    tracing::info!("Running without cloudinary feature - using in-memory media host");
    Arc::new(InMemoryMediaHost::new())
}
