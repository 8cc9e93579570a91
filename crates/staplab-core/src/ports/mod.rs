//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod auth;
mod media;
mod repository;

pub use auth::{AuthError, IssuedToken, PasswordService, TokenClaims, TokenService};
pub use media::{ImageUpload, MediaError, MediaHost, UploadedImage};
pub use repository::{
    BaseRepository, PostRepository, ResearchRepository, TeamRepository, UserRepository,
};
