//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

use staplab_core::domain::{User, mask_email};
use staplab_core::error::RepoError;
use staplab_core::ports::{PostRepository, ResearchRepository, TeamRepository, UserRepository};

use super::entity::post::Entity as PostEntity;
use super::entity::research::Entity as ResearchEntity;
use super::entity::team::Entity as TeamEntity;
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

/// PostgreSQL research repository.
pub type PostgresResearchRepository = PostgresBaseRepository<ResearchEntity>;

/// PostgreSQL team repository.
pub type PostgresTeamRepository = PostgresBaseRepository<TeamEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(map_db_err)?
            .map(TryInto::try_into)
            .transpose()
    }
}

impl PostRepository for PostgresPostRepository {}

impl ResearchRepository for PostgresResearchRepository {}

impl TeamRepository for PostgresTeamRepository {}
