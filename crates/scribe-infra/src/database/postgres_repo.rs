//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ColumnTrait, Condition, EntityTrait, Order, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use uuid::Uuid;

use scribe_core::domain::{Post, PostWithAuthor, User};
use scribe_core::error::RepoError;
use scribe_core::ports::{
    Pagination, PostPage, PostQuery, PostRepository, PostSortKey, PostStats, SortOrder,
    UserRepository,
};

use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::PostgresBaseRepository;

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL post repository.
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }

    async fn find_active_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .filter(user::Column::IsActive.eq(true))
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.map(Into::into))
    }
}

/// Mask email for logging to avoid PII in logs.
fn mask_email(email: &str) -> String {
    if let Some((local, domain)) = email.split_once('@') {
        // Keep only the first character of the local part; prefix by chars,
        // not bytes, so multi-byte locals don't split mid-character.
        let masked_local = match local.chars().next() {
            Some(first) if local.chars().count() > 1 => format!("{first}***"),
            _ => "***".to_string(),
        };
        format!("{masked_local}@{domain}")
    } else {
        "***".to_string()
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_with_author(&self, id: Uuid) -> Result<Option<PostWithAuthor>, RepoError> {
        let result = PostEntity::find_by_id(id)
            .find_also_related(UserEntity)
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.and_then(|(p, a)| a.map(|a| post::join_author(p, a, true))))
    }

    async fn find_with_author_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<PostWithAuthor>, RepoError> {
        let result = PostEntity::find()
            .filter(post::Column::Slug.eq(slug))
            .find_also_related(UserEntity)
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.and_then(|(p, a)| a.map(|a| post::join_author(p, a, true))))
    }

    async fn list(&self, query: &PostQuery) -> Result<PostPage, RepoError> {
        let paginator = PostEntity::find()
            .find_also_related(UserEntity)
            .filter(filter_condition(query))
            .order_by(sort_column(query.sort_by), sort_order(query.sort_order))
            .paginate(&self.db, query.limit);

        let total_items = paginator
            .num_items()
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;
        let rows = paginator
            .fetch_page(query.page - 1)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        let posts = rows
            .into_iter()
            .filter_map(|(p, a)| a.map(|a| post::join_author(p, a, false)))
            .collect();

        Ok(PostPage {
            posts,
            pagination: Pagination::new(query.page, query.limit, total_items),
        })
    }

    async fn increment_views(&self, id: Uuid) -> Result<bool, RepoError> {
        let result = PostEntity::update_many()
            .col_expr(post::Column::Views, Expr::col(post::Column::Views).add(1))
            .filter(post::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        Ok(result.rows_affected > 0)
    }

    async fn increment_likes(&self, id: Uuid) -> Result<i32, RepoError> {
        let result = PostEntity::update_many()
            .col_expr(post::Column::Likes, Expr::col(post::Column::Likes).add(1))
            .filter(post::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        let model = PostEntity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?
            .ok_or(RepoError::NotFound)?;

        Ok(model.likes)
    }

    async fn stats(&self, author_id: Option<Uuid>) -> Result<PostStats, RepoError> {
        let scope = match author_id {
            Some(author_id) => Condition::all().add(post::Column::AuthorId.eq(author_id)),
            None => Condition::all(),
        };

        let total_posts = PostEntity::find()
            .filter(scope.clone())
            .count(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;
        let published_posts = PostEntity::find()
            .filter(scope.clone().add(post::Column::Status.eq("published")))
            .count(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;
        let draft_posts = PostEntity::find()
            .filter(scope.clone().add(post::Column::Status.eq("draft")))
            .count(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;

        let sums: Option<(Option<i64>, Option<i64>)> = PostEntity::find()
            .select_only()
            .column_as(post::Column::Views.sum(), "total_views")
            .column_as(post::Column::Likes.sum(), "total_likes")
            .filter(scope)
            .into_tuple()
            .one(&self.db)
            .await
            .map_err(|e| RepoError::Query(e.to_string()))?;
        let (total_views, total_likes) = sums.unwrap_or((None, None));

        Ok(PostStats {
            total_posts,
            published_posts,
            draft_posts,
            total_views: total_views.unwrap_or(0),
            total_likes: total_likes.unwrap_or(0),
        })
    }
}

/// Build the WHERE clause for a listing query.
fn filter_condition(query: &PostQuery) -> Condition {
    let mut cond = Condition::all();

    if let Some(status) = query.status {
        cond = cond.add(post::Column::Status.eq(status.as_str()));
    }
    if let Some(category) = &query.category {
        cond = cond.add(post::Column::Category.eq(category.clone()));
    }
    if let Some(author_id) = query.author_id {
        cond = cond.add(post::Column::AuthorId.eq(author_id));
    }
    if !query.tags.is_empty() {
        // Postgres array overlap against the requested tag set.
        let placeholders = vec!["?"; query.tags.len()].join(", ");
        cond = cond.add(Expr::cust_with_values(
            format!("\"posts\".\"tags\" && ARRAY[{placeholders}]::text[]"),
            query.tags.iter().cloned(),
        ));
    }
    if let Some(search) = &query.search {
        let pattern = format!("%{search}%");
        cond = cond.add(
            Condition::any()
                .add(Expr::col((PostEntity, post::Column::Title)).ilike(pattern.as_str()))
                .add(Expr::col((PostEntity, post::Column::Content)).ilike(pattern.as_str()))
                .add(Expr::col((PostEntity, post::Column::Excerpt)).ilike(pattern.as_str()))
                .add(Expr::col((UserEntity, user::Column::FirstName)).ilike(pattern.as_str()))
                .add(Expr::col((UserEntity, user::Column::LastName)).ilike(pattern.as_str())),
        );
    }

    cond
}

fn sort_column(key: PostSortKey) -> post::Column {
    match key {
        PostSortKey::CreatedAt => post::Column::CreatedAt,
        PostSortKey::UpdatedAt => post::Column::UpdatedAt,
        PostSortKey::Title => post::Column::Title,
        PostSortKey::Views => post::Column::Views,
        PostSortKey::Likes => post::Column::Likes,
        PostSortKey::PublishedAt => post::Column::PublishedAt,
    }
}

fn sort_order(order: SortOrder) -> Order {
    match order {
        SortOrder::Asc => Order::Asc,
        SortOrder::Desc => Order::Desc,
    }
}
