//! Domain entities - the core business objects.

mod derive;
mod post;
mod user;

pub use derive::{DerivedFields, derive_post_fields};
pub use post::{AuthorSummary, NewPost, Post, PostPatch, PostStatus, PostWithAuthor};
pub use user::{NewUser, ProfilePatch, User, UserRole};
