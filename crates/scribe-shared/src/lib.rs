//! # Scribe Shared
//!
//! Wire types shared between the API server and its clients. JSON field
//! names are camelCase for compatibility with existing consumers.

pub mod dto;
pub mod response;

pub use response::{ApiResponse, ErrorResponse};
