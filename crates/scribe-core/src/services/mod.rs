//! Application services - orchestration over the ports.
//!
//! Services are plain constructed objects holding their store dependencies;
//! the API layer builds them once and shares them.

mod auth;
mod post;

pub use auth::{AuthService, AuthSession};
pub use post::PostService;
