//! Domain entities - the core business objects.

mod fields;
mod paragraph;
mod post;
mod research;
mod team;
mod user;

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub use fields::{PostFields, ResearchFields, TeamFields, UserFields};
pub(crate) use fields::{coalesce, coalesce_opt, present};
pub use paragraph::Paragraph;
pub use post::{NewPost, Post};
pub use research::{NewResearch, Research};
pub use team::{NewTeam, Socials, Team, TeamStatus};
pub use user::{User, mask_email};

/// Behaviour every persisted entity shares.
pub trait Record: Clone + Send + Sync + 'static {
    /// Human-readable entity name, used in not-found messages.
    const KIND: &'static str;

    fn id(&self) -> Uuid;

    fn created_at(&self) -> DateTime<Utc>;

    /// Value the store keeps unique for this entity type, if any.
    fn unique_key(&self) -> Option<&str> {
        None
    }
}
