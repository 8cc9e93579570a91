//! In-memory implementations - used as fallback when no database or media
//! host is configured. Data is lost on process restart.

mod repository;

pub use repository::InMemoryRepository;
