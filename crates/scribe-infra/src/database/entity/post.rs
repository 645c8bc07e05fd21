//! Post entity for SeaORM.

use sea_orm::Set;
use sea_orm::entity::prelude::*;

use scribe_core::domain::{AuthorSummary, PostStatus, PostWithAuthor};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub excerpt: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub featured_image: Option<String>,
    pub status: String,
    pub tags: Vec<String>,
    pub category: Option<String>,
    pub read_time: i32,
    pub views: i32,
    pub likes: i32,
    pub published_at: Option<DateTimeWithTimeZone>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::AuthorId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Author,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Post.
impl From<Model> for scribe_core::domain::Post {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            author_id: model.author_id,
            title: model.title,
            content: model.content,
            excerpt: model.excerpt,
            slug: model.slug,
            featured_image: model.featured_image,
            status: PostStatus::parse(&model.status).unwrap_or(PostStatus::Draft),
            tags: model.tags,
            category: model.category,
            read_time: model.read_time,
            views: model.views,
            likes: model.likes,
            published_at: model.published_at.map(Into::into),
            meta_title: model.meta_title,
            meta_description: model.meta_description,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// Conversion from Domain Post to SeaORM ActiveModel.
impl From<scribe_core::domain::Post> for ActiveModel {
    fn from(post: scribe_core::domain::Post) -> Self {
        Self {
            id: Set(post.id),
            author_id: Set(post.author_id),
            title: Set(post.title),
            content: Set(post.content),
            excerpt: Set(post.excerpt),
            slug: Set(post.slug),
            featured_image: Set(post.featured_image),
            status: Set(post.status.as_str().to_string()),
            tags: Set(post.tags),
            category: Set(post.category),
            read_time: Set(post.read_time),
            views: Set(post.views),
            likes: Set(post.likes),
            published_at: Set(post.published_at.map(Into::into)),
            meta_title: Set(post.meta_title),
            meta_description: Set(post.meta_description),
            created_at: Set(post.created_at.into()),
            updated_at: Set(post.updated_at.into()),
        }
    }
}

/// Join a post row with its author row into the domain read model.
/// `bio` only rides along on single-post reads.
pub fn join_author(post: Model, author: super::user::Model, include_bio: bool) -> PostWithAuthor {
    let author = AuthorSummary {
        id: author.id,
        first_name: author.first_name,
        last_name: author.last_name,
        email: author.email,
        profile_image: author.profile_image,
        bio: if include_bio { author.bio } else { None },
    };
    PostWithAuthor {
        post: post.into(),
        author,
    }
}
