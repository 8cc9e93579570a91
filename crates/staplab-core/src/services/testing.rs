//! Fakes shared by the service and reconciler tests.

use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Post, Record, Research, Team, User};
use crate::error::RepoError;
use crate::ports::{
    BaseRepository, ImageUpload, MediaError, MediaHost, PostRepository, ResearchRepository,
    TeamRepository, UploadedImage, UserRepository,
};

/// Delivery URL of an image stored as `lab/<name>`.
pub(crate) fn hosted(name: &str) -> String {
    format!("https://res.cloudinary.com/lab/image/upload/v1700/lab/{name}.jpg")
}

/// Vec-backed store with unique-key enforcement.
pub(crate) struct MemoryRepo<T> {
    rows: Mutex<Vec<T>>,
}

impl<T> Default for MemoryRepo<T> {
    fn default() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
        }
    }
}

impl<T: Record> MemoryRepo<T> {
    pub(crate) fn get(&self, id: Uuid) -> Option<T> {
        self.rows.lock().unwrap().iter().find(|r| r.id() == id).cloned()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.rows.lock().unwrap().is_empty()
    }

    fn clashes(rows: &[T], entity: &T) -> bool {
        entity.unique_key().is_some_and(|key| {
            rows.iter()
                .any(|r| r.id() != entity.id() && r.unique_key() == Some(key))
        })
    }
}

#[async_trait]
impl<T: Record> BaseRepository<T, Uuid> for MemoryRepo<T> {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<T>, RepoError> {
        Ok(self.get(id))
    }

    async fn find_all(&self) -> Result<Vec<T>, RepoError> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn insert(&self, entity: T) -> Result<T, RepoError> {
        let mut rows = self.rows.lock().unwrap();
        if Self::clashes(&rows, &entity) {
            return Err(RepoError::Constraint("unique key".into()));
        }
        rows.push(entity.clone());
        Ok(entity)
    }

    async fn update(&self, entity: T) -> Result<T, RepoError> {
        let mut rows = self.rows.lock().unwrap();
        if Self::clashes(&rows, &entity) {
            return Err(RepoError::Constraint("unique key".into()));
        }
        let row = rows
            .iter_mut()
            .find(|r| r.id() == entity.id())
            .ok_or(RepoError::NotFound)?;
        *row = entity.clone();
        Ok(entity)
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.rows.lock().unwrap().retain(|r| r.id() != id);
        Ok(())
    }
}

impl PostRepository for MemoryRepo<Post> {}
impl ResearchRepository for MemoryRepo<Research> {}
impl TeamRepository for MemoryRepo<Team> {}

#[async_trait]
impl UserRepository for MemoryRepo<User> {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }
}

/// Media host that records every deletion; `failing()` rejects them all.
#[derive(Default)]
pub(crate) struct RecordingHost {
    destroyed: Mutex<Vec<String>>,
    fail: bool,
}

impl RecordingHost {
    pub(crate) fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub(crate) fn destroyed(&self) -> Vec<String> {
        self.destroyed.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaHost for RecordingHost {
    async fn upload(&self, image: ImageUpload) -> Result<UploadedImage, MediaError> {
        let public_id = format!("lab/{}", image.file_name);
        Ok(UploadedImage {
            url: hosted(&image.file_name),
            public_id,
        })
    }

    async fn destroy(&self, public_id: &str) -> Result<(), MediaError> {
        self.destroyed.lock().unwrap().push(public_id.to_owned());
        if self.fail {
            Err(MediaError::Transport("offline".into()))
        } else {
            Ok(())
        }
    }
}
