//! # STAP Lab Shared
//!
//! Wire types of the REST API, shared by the server and any Rust client.

pub mod dto;
pub mod response;

pub use response::ErrorResponse;
