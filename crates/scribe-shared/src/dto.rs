//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use scribe_core::domain::{
    AuthorSummary, NewPost, NewUser, PostPatch, PostStatus, PostWithAuthor, ProfilePatch, User,
    UserRole,
};
use scribe_core::ports::{Pagination, PostQuery, PostSortKey, SortOrder};

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

impl From<RegisterRequest> for NewUser {
    fn from(req: RegisterRequest) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            password: req.password,
        }
    }
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Whitelisted profile fields for updates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
    pub profile_image: Option<String>,
    pub password: Option<String>,
}

impl From<UpdateProfileRequest> for ProfilePatch {
    fn from(req: UpdateProfileRequest) -> Self {
        Self {
            first_name: req.first_name,
            last_name: req.last_name,
            bio: req.bio,
            profile_image: req.profile_image,
            password: req.password,
        }
    }
}

/// A user's public representation. The password hash never appears here.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: UserRole,
    pub is_active: bool,
    pub profile_image: Option<String>,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            role: user.role,
            is_active: user.is_active,
            profile_image: user.profile_image,
            bio: user.bio,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Authenticated user plus access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthData {
    pub user: UserResponse,
    pub token: String,
}

/// Request to create a post.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub status: Option<PostStatus>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub category: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
}

impl From<CreatePostRequest> for NewPost {
    fn from(req: CreatePostRequest) -> Self {
        Self {
            title: req.title,
            content: req.content,
            excerpt: req.excerpt,
            featured_image: req.featured_image,
            status: req.status,
            tags: req.tags,
            category: req.category,
            meta_title: req.meta_title,
            meta_description: req.meta_description,
        }
    }
}

/// Partial post update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePostRequest {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub featured_image: Option<String>,
    pub status: Option<PostStatus>,
    pub tags: Option<Vec<String>>,
    pub category: Option<String>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
}

impl From<UpdatePostRequest> for PostPatch {
    fn from(req: UpdatePostRequest) -> Self {
        Self {
            title: req.title,
            content: req.content,
            excerpt: req.excerpt,
            featured_image: req.featured_image,
            status: req.status,
            tags: req.tags,
            category: req.category,
            meta_title: req.meta_title,
            meta_description: req.meta_description,
        }
    }
}

/// Author fields joined onto post responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorResponse {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub profile_image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
}

impl From<AuthorSummary> for AuthorResponse {
    fn from(author: AuthorSummary) -> Self {
        Self {
            id: author.id,
            first_name: author.first_name,
            last_name: author.last_name,
            email: author.email,
            profile_image: author.profile_image,
            bio: author.bio,
        }
    }
}

/// A post joined with its author. `isPublished` is computed from `status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub slug: String,
    pub featured_image: Option<String>,
    pub status: PostStatus,
    pub is_published: bool,
    pub tags: Vec<String>,
    pub category: Option<String>,
    pub read_time: i32,
    pub views: i32,
    pub likes: i32,
    pub published_at: Option<DateTime<Utc>>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub author_id: Uuid,
    pub author: AuthorResponse,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<PostWithAuthor> for PostResponse {
    fn from(joined: PostWithAuthor) -> Self {
        let PostWithAuthor { post, author } = joined;
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            excerpt: post.excerpt,
            slug: post.slug,
            featured_image: post.featured_image,
            status: post.status,
            is_published: post.status == PostStatus::Published,
            tags: post.tags,
            category: post.category,
            read_time: post.read_time,
            views: post.views,
            likes: post.likes,
            published_at: post.published_at,
            meta_title: post.meta_title,
            meta_description: post.meta_description,
            author_id: post.author_id,
            author: author.into(),
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// Query string parameters for post listings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPostsParams {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    pub status: Option<PostStatus>,
    pub category: Option<String>,
    /// Comma-separated tag list.
    pub tags: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<PostSortKey>,
    pub sort_order: Option<SortOrder>,
}

impl ListPostsParams {
    /// Convert to a domain query; out-of-range page/limit are clamped.
    pub fn into_query(self) -> PostQuery {
        let defaults = PostQuery::default();
        PostQuery {
            page: self.page.unwrap_or(defaults.page),
            limit: self.limit.unwrap_or(defaults.limit),
            status: self.status,
            category: self.category,
            tags: self
                .tags
                .map(|t| {
                    t.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
            search: self.search,
            author_id: None,
            sort_by: self.sort_by.unwrap_or_default(),
            sort_order: self.sort_order.unwrap_or_default(),
        }
        .clamped()
    }
}

/// Listing envelope: data plus page descriptor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostListResponse {
    pub success: bool,
    pub message: String,
    pub data: Vec<PostResponse>,
    pub pagination: Pagination,
}

/// Response to a like request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LikeResponse {
    pub success: bool,
    pub message: String,
    pub likes: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_params_parse_tags_and_clamp() {
        let params = ListPostsParams {
            page: Some(0),
            limit: Some(500),
            tags: Some("rust, backend,,web ".to_string()),
            ..Default::default()
        };
        let query = params.into_query();

        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 100);
        assert_eq!(query.tags, vec!["rust", "backend", "web"]);
        assert_eq!(query.sort_by, PostSortKey::CreatedAt);
        assert_eq!(query.sort_order, SortOrder::Desc);
    }

    #[test]
    fn stats_serialize_with_blog_keys() {
        let stats = scribe_core::ports::PostStats {
            total_posts: 10,
            published_posts: 7,
            draft_posts: 3,
            total_views: 420,
            total_likes: 42,
        };
        let json = serde_json::to_value(&stats).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "totalBlogs": 10,
                "publishedBlogs": 7,
                "draftBlogs": 3,
                "totalViews": 420,
                "totalLikes": 42,
            })
        );
    }

    #[test]
    fn wire_enums_use_original_spellings() {
        let json = serde_json::to_value(PostStatus::Published).unwrap();
        assert_eq!(json, serde_json::json!("published"));

        let sort = serde_json::from_value::<PostSortKey>(serde_json::json!("publishedAt")).unwrap();
        assert_eq!(sort, PostSortKey::PublishedAt);

        let order = serde_json::from_value::<SortOrder>(serde_json::json!("DESC")).unwrap();
        assert_eq!(order, SortOrder::Desc);
    }
}
