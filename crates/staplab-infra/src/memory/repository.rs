use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use staplab_core::domain::{Post, Record, Research, Team, User};
use staplab_core::error::RepoError;
use staplab_core::ports::{
    BaseRepository, PostRepository, ResearchRepository, TeamRepository, UserRepository,
};

/// In-memory repository using a HashMap with async RwLock.
///
/// Enforces the same unique keys a database index would.
pub struct InMemoryRepository<T> {
    store: RwLock<HashMap<Uuid, T>>,
}

impl<T: Record> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }

    fn check_unique(store: &HashMap<Uuid, T>, entity: &T) -> Result<(), RepoError> {
        let Some(key) = entity.unique_key() else {
            return Ok(());
        };
        let taken = store
            .values()
            .any(|other| other.id() != entity.id() && other.unique_key() == Some(key));
        if taken {
            return Err(RepoError::Constraint(format!(
                "{} with key {key} already exists",
                T::KIND
            )));
        }
        Ok(())
    }
}

impl<T: Record> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> BaseRepository<T, Uuid> for InMemoryRepository<T> {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, RepoError> {
        let store = self.store.read().await;
        Ok(store.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<T>, RepoError> {
        let store = self.store.read().await;
        let mut all: Vec<T> = store.values().cloned().collect();
        all.sort_by_key(|entity| entity.created_at());
        Ok(all)
    }

    async fn insert(&self, entity: T) -> Result<T, RepoError> {
        let mut store = self.store.write().await;
        if store.contains_key(&entity.id()) {
            return Err(RepoError::Constraint(format!("{} id already exists", T::KIND)));
        }
        Self::check_unique(&store, &entity)?;
        store.insert(entity.id(), entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: T) -> Result<T, RepoError> {
        let mut store = self.store.write().await;
        if !store.contains_key(&entity.id()) {
            return Err(RepoError::NotFound);
        }
        Self::check_unique(&store, &entity)?;
        store.insert(entity.id(), entity.clone());
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        let mut store = self.store.write().await;
        store.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}

impl PostRepository for InMemoryRepository<Post> {}

impl ResearchRepository for InMemoryRepository<Research> {}

impl TeamRepository for InMemoryRepository<Team> {}

#[async_trait]
impl UserRepository for InMemoryRepository<User> {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let store = self.store.read().await;
        Ok(store.values().find(|user| user.email == email).cloned())
    }
}
