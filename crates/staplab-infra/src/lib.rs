//! # STAP Lab Infrastructure
//!
//! Concrete implementations of the ports defined in `staplab-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external services, in-memory only
//! - `postgres` - PostgreSQL repositories via SeaORM
//! - `auth` - JWT + Argon2 authentication
//! - `cloudinary` - Cloudinary media host over reqwest

pub mod database;
pub mod media;
pub mod memory;

#[cfg(feature = "auth")]
pub mod auth;

pub use database::DatabaseConfig;
pub use media::{CloudinaryConfig, InMemoryMediaHost};
pub use memory::InMemoryRepository;

#[cfg(feature = "auth")]
pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};

#[cfg(feature = "cloudinary")]
pub use media::CloudinaryMediaHost;

#[cfg(feature = "postgres")]
pub use database::DatabaseConnections;
