//! # STAP Lab Core
//!
//! Domain layer of the STAP Lab website backend: entities, ports, the media
//! reference codec, paragraph normalization, image reconciliation and the
//! entity services. No infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod media;
pub mod paragraphs;
pub mod ports;
pub mod reconcile;
pub mod services;

pub use error::{DomainError, RepoError};
