//! # Scribe Infrastructure
//!
//! Concrete implementations of the ports defined in `scribe-core`:
//! PostgreSQL repositories via SeaORM, JWT tokens, and Argon2 hashing.

pub mod auth;
pub mod database;

pub use auth::{Argon2PasswordService, JwtTokenService};
pub use database::DatabaseConnections;
