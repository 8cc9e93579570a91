use std::marker::PhantomData;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, DbConn, DbErr, EntityTrait, IntoActiveModel,
    PrimaryKeyTrait, QueryOrder, SqlErr,
};

use staplab_core::error::RepoError;
use staplab_core::ports::BaseRepository;

/// Entities whose rows are listed in creation order.
pub trait Chronological: EntityTrait {
    fn created_at_column() -> Self::Column;
}

/// Generic PostgreSQL repository implementation.
///
/// Domain records convert to and from the entity model through `TryFrom`,
/// since JSON columns can fail to decode.
pub struct PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub(crate) db: DbConn,
    _entity: PhantomData<E>,
}

impl<E> PostgresBaseRepository<E>
where
    E: EntityTrait,
{
    pub fn new(db: DbConn) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }
}

#[async_trait]
impl<E, T, ID> BaseRepository<T, ID> for PostgresBaseRepository<E>
where
    E: Chronological,
    E::Model: IntoActiveModel<E::ActiveModel> + TryInto<T, Error = RepoError> + Sync + Send,
    E::ActiveModel: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send + Sync,
    E::PrimaryKey: PrimaryKeyTrait<ValueType = ID>,
    ID: Send + Sync + Into<sea_orm::Value> + Clone + Copy + 'static,
    T: TryInto<E::Model, Error = RepoError> + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError> {
        E::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(map_db_err)?
            .map(TryInto::try_into)
            .transpose()
    }

    async fn find_all(&self) -> Result<Vec<T>, RepoError> {
        E::find()
            .order_by_asc(E::created_at_column())
            .all(&self.db)
            .await
            .map_err(map_db_err)?
            .into_iter()
            .map(TryInto::try_into)
            .collect()
    }

    async fn insert(&self, entity: T) -> Result<T, RepoError> {
        let model: E::Model = entity.try_into()?;
        let inserted = model
            .into_active_model()
            .reset_all()
            .insert(&self.db)
            .await
            .map_err(map_db_err)?;
        inserted.try_into()
    }

    async fn update(&self, entity: T) -> Result<T, RepoError> {
        let model: E::Model = entity.try_into()?;
        let updated = model
            .into_active_model()
            .reset_all()
            .update(&self.db)
            .await
            .map_err(map_db_err)?;
        updated.try_into()
    }

    async fn delete(&self, id: ID) -> Result<(), RepoError> {
        let result = E::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}

/// Map a SeaORM error onto the repository error space.
pub(crate) fn map_db_err(err: DbErr) -> RepoError {
    if let Some(SqlErr::UniqueConstraintViolation(detail)) = err.sql_err() {
        return RepoError::Constraint(detail);
    }
    match err {
        DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => RepoError::NotFound,
        DbErr::Conn(e) => RepoError::Connection(e.to_string()),
        DbErr::ConnectionAcquire(e) => RepoError::Connection(e.to_string()),
        other => {
            let message = other.to_string();
            if message.contains("duplicate") || message.contains("unique") {
                RepoError::Constraint(message)
            } else {
                RepoError::Query(message)
            }
        }
    }
}
