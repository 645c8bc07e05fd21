use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{Post, PostStatus, PostWithAuthor, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Update an existing entity.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Find an active user by email. Login only considers active accounts.
    async fn find_active_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}

/// Sort keys accepted by the post listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PostSortKey {
    #[default]
    CreatedAt,
    UpdatedAt,
    Title,
    Views,
    Likes,
    PublishedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

/// Filter, sort, and page parameters for post listings.
#[derive(Debug, Clone)]
pub struct PostQuery {
    pub page: u64,
    pub limit: u64,
    pub status: Option<PostStatus>,
    pub category: Option<String>,
    /// Matches posts whose tag set intersects this one. Empty = no filter.
    pub tags: Vec<String>,
    /// Case-insensitive substring across title, content, excerpt, and the
    /// author's first/last name.
    pub search: Option<String>,
    pub author_id: Option<Uuid>,
    pub sort_by: PostSortKey,
    pub sort_order: SortOrder,
}

impl Default for PostQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            status: None,
            category: None,
            tags: Vec::new(),
            search: None,
            author_id: None,
            sort_by: PostSortKey::default(),
            sort_order: SortOrder::default(),
        }
    }
}

impl PostQuery {
    /// Clamp page and limit into their valid ranges (page >= 1, limit 1-100).
    pub fn clamped(mut self) -> Self {
        self.page = self.page.max(1);
        self.limit = self.limit.clamp(1, 100);
        self
    }

    pub fn offset(&self) -> u64 {
        (self.page - 1) * self.limit
    }
}

/// Page descriptor returned alongside listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u64,
    pub total_pages: u64,
    pub total_items: u64,
    pub items_per_page: u64,
}

impl Pagination {
    pub fn new(page: u64, limit: u64, total_items: u64) -> Self {
        Self {
            current_page: page,
            total_pages: total_items.div_ceil(limit),
            total_items,
            items_per_page: limit,
        }
    }
}

/// One page of posts joined with author summaries.
#[derive(Debug, Clone)]
pub struct PostPage {
    pub posts: Vec<PostWithAuthor>,
    pub pagination: Pagination,
}

/// Aggregate counters, platform-wide or per author. The serialized names
/// keep the original API's "blog" wording for client compatibility.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostStats {
    #[serde(rename = "totalBlogs")]
    pub total_posts: u64,
    #[serde(rename = "publishedBlogs")]
    pub published_posts: u64,
    #[serde(rename = "draftBlogs")]
    pub draft_posts: u64,
    pub total_views: i64,
    pub total_likes: i64,
}

/// Post repository with query and counter methods.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Find a post joined with its author (bio included).
    async fn find_with_author(&self, id: Uuid) -> Result<Option<PostWithAuthor>, RepoError>;

    /// Find a post by slug, joined with its author (bio included).
    async fn find_with_author_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<PostWithAuthor>, RepoError>;

    /// Filtered, sorted, paginated listing joined with author summaries.
    async fn list(&self, query: &PostQuery) -> Result<PostPage, RepoError>;

    /// Atomically add one view. Ok(false) if the post does not exist.
    async fn increment_views(&self, id: Uuid) -> Result<bool, RepoError>;

    /// Atomically add one like and return the new count.
    /// Err(RepoError::NotFound) if the post does not exist.
    async fn increment_likes(&self, id: Uuid) -> Result<i32, RepoError>;

    /// Aggregate counters, scoped to one author when given.
    async fn stats(&self, author_id: Option<Uuid>) -> Result<PostStats, RepoError>;
}
