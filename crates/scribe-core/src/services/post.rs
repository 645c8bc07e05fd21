//! Post lifecycle, authorization, and querying.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::{NewPost, Post, PostPatch, PostStatus, PostWithAuthor, derive_post_fields};
use crate::error::DomainError;
use crate::ports::{PostPage, PostQuery, PostRepository, PostStats};

/// Orchestrates the post lifecycle: create/read/update/delete, listing,
/// engagement counters, and aggregate stats. Mutation is restricted to the
/// post's author; counters are open to any caller.
pub struct PostService {
    posts: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    /// Create a post for `author_id`, deriving slug, excerpt, read time, and
    /// the publication timestamp. Returns the post joined with its author.
    pub async fn create_post(
        &self,
        input: NewPost,
        author_id: Uuid,
    ) -> Result<PostWithAuthor, DomainError> {
        let now = Utc::now();
        let status = input.status.unwrap_or(PostStatus::Draft);

        let patch = PostPatch {
            title: Some(input.title.clone()),
            content: Some(input.content.clone()),
            excerpt: input.excerpt.clone(),
            status: Some(status),
            ..Default::default()
        };
        let derived = derive_post_fields(None, &patch, now, &slug_token());

        let post = Post {
            id: Uuid::new_v4(),
            author_id,
            title: input.title,
            content: input.content,
            excerpt: input.excerpt.or(derived.excerpt).unwrap_or_default(),
            slug: derived.slug.unwrap_or_default(),
            featured_image: input.featured_image,
            status,
            tags: input.tags,
            category: input.category,
            read_time: derived.read_time.unwrap_or(1),
            views: 0,
            likes: 0,
            published_at: derived.published_at,
            meta_title: input.meta_title,
            meta_description: input.meta_description,
            created_at: now,
            updated_at: now,
        };

        let post = self.posts.insert(post).await?;
        tracing::info!(post_id = %post.id, slug = %post.slug, "post created");

        self.reload_with_author(post.id).await
    }

    /// Filtered, sorted, paginated listing.
    pub async fn list_posts(&self, query: PostQuery) -> Result<PostPage, DomainError> {
        Ok(self.posts.list(&query.clamped()).await?)
    }

    /// Fetch one post by id, counting the view atomically.
    pub async fn get_post_by_id(&self, id: Uuid) -> Result<PostWithAuthor, DomainError> {
        let mut found = self
            .posts
            .find_with_author(id)
            .await?
            .ok_or(DomainError::NotFound { entity: "post" })?;
        self.posts.increment_views(id).await?;
        found.post.views += 1;
        Ok(found)
    }

    /// Fetch one post by slug, counting the view atomically.
    pub async fn get_post_by_slug(&self, slug: &str) -> Result<PostWithAuthor, DomainError> {
        let mut found = self
            .posts
            .find_with_author_by_slug(slug)
            .await?
            .ok_or(DomainError::NotFound { entity: "post" })?;
        self.posts.increment_views(found.post.id).await?;
        found.post.views += 1;
        Ok(found)
    }

    /// Apply a patch to a post owned by `user_id`, recomputing derived
    /// fields where their trigger changed.
    pub async fn update_post(
        &self,
        id: Uuid,
        patch: PostPatch,
        user_id: Uuid,
    ) -> Result<PostWithAuthor, DomainError> {
        let prev = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound { entity: "post" })?;
        if prev.author_id != user_id {
            return Err(DomainError::Forbidden);
        }

        let now = Utc::now();
        let derived = derive_post_fields(Some(&prev), &patch, now, &slug_token());

        let mut post = prev;
        if let Some(title) = patch.title {
            post.title = title;
        }
        if let Some(content) = patch.content {
            post.content = content;
        }
        if let Some(excerpt) = patch.excerpt {
            post.excerpt = excerpt;
        }
        if let Some(featured_image) = patch.featured_image {
            post.featured_image = Some(featured_image);
        }
        if let Some(status) = patch.status {
            post.status = status;
        }
        if let Some(tags) = patch.tags {
            post.tags = tags;
        }
        if let Some(category) = patch.category {
            post.category = Some(category);
        }
        if let Some(meta_title) = patch.meta_title {
            post.meta_title = Some(meta_title);
        }
        if let Some(meta_description) = patch.meta_description {
            post.meta_description = Some(meta_description);
        }

        if let Some(slug) = derived.slug {
            post.slug = slug;
        }
        if let Some(excerpt) = derived.excerpt {
            post.excerpt = excerpt;
        }
        if let Some(read_time) = derived.read_time {
            post.read_time = read_time;
        }
        if let Some(published_at) = derived.published_at {
            post.published_at = Some(published_at);
        }
        post.updated_at = now;

        let post = self.posts.update(post).await?;
        self.reload_with_author(post.id).await
    }

    /// Permanently delete a post owned by `user_id`.
    pub async fn delete_post(&self, id: Uuid, user_id: Uuid) -> Result<(), DomainError> {
        let post = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or(DomainError::NotFound { entity: "post" })?;
        if post.author_id != user_id {
            return Err(DomainError::Forbidden);
        }
        self.posts.delete(id).await?;
        tracing::info!(post_id = %id, "post deleted");
        Ok(())
    }

    /// Listing scoped to one author. Public routes force
    /// `status = Published` before calling this.
    pub async fn get_posts_by_author(
        &self,
        author_id: Uuid,
        mut query: PostQuery,
    ) -> Result<PostPage, DomainError> {
        query.author_id = Some(author_id);
        self.list_posts(query).await
    }

    /// Add one like and return the new count. No per-caller dedup.
    pub async fn like_post(&self, id: Uuid) -> Result<i32, DomainError> {
        use crate::error::RepoError;
        self.posts.increment_likes(id).await.map_err(|e| match e {
            RepoError::NotFound => DomainError::NotFound { entity: "post" },
            other => other.into(),
        })
    }

    /// Aggregate counters, per author when given, else platform-wide.
    pub async fn get_stats(&self, author_id: Option<Uuid>) -> Result<PostStats, DomainError> {
        Ok(self.posts.stats(author_id).await?)
    }

    async fn reload_with_author(&self, id: Uuid) -> Result<PostWithAuthor, DomainError> {
        self.posts
            .find_with_author(id)
            .await?
            .ok_or_else(|| DomainError::Internal("post vanished after write".to_string()))
    }
}

/// Uniqueness suffix for generated slugs. Opaque and URL-safe; collisions
/// are ultimately caught by the unique index on `slug`.
fn slug_token() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}
