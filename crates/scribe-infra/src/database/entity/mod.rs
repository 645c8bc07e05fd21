//! SeaORM entities mapping the domain onto the `users` and `posts` tables.

pub mod post;
pub mod user;
