use chrono::Utc;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
use uuid::Uuid;

use scribe_core::domain::{Post, PostStatus, User, UserRole};
use scribe_core::error::RepoError;
use scribe_core::ports::{BaseRepository, PostRepository, UserRepository};

use crate::database::entity::{post, user};
use crate::database::postgres_repo::{PostgresPostRepository, PostgresUserRepository};

fn user_model(email: &str) -> user::Model {
    let now = Utc::now();
    user::Model {
        id: Uuid::new_v4(),
        first_name: "Grace".to_owned(),
        last_name: "Hopper".to_owned(),
        email: email.to_owned(),
        password_hash: "$argon2id$stub".to_owned(),
        role: "user".to_owned(),
        is_active: true,
        profile_image: None,
        bio: Some("Rear admiral".to_owned()),
        created_at: now.into(),
        updated_at: now.into(),
    }
}

fn post_model(author_id: Uuid, title: &str) -> post::Model {
    let now = Utc::now();
    post::Model {
        id: Uuid::new_v4(),
        author_id,
        title: title.to_owned(),
        content: "Content long enough to matter".to_owned(),
        excerpt: "Content long enough to matter...".to_owned(),
        slug: "test-post-abc123".to_owned(),
        featured_image: None,
        status: "published".to_owned(),
        tags: vec!["rust".to_owned()],
        category: None,
        read_time: 1,
        views: 7,
        likes: 3,
        published_at: Some(now.into()),
        meta_title: None,
        meta_description: None,
        created_at: now.into(),
        updated_at: now.into(),
    }
}

#[tokio::test]
async fn test_find_post_by_id() {
    let author_id = Uuid::new_v4();
    let model = post_model(author_id, "Test Post");
    let post_id = model.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![model]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Option<Post> = repo.find_by_id(post_id).await.unwrap();

    assert!(result.is_some());
    let found = result.unwrap();
    assert_eq!(found.title, "Test Post");
    assert_eq!(found.status, PostStatus::Published);
    assert!(found.is_published());
    assert_eq!(found.id, post_id);
}

#[tokio::test]
async fn test_find_post_with_author_includes_bio() {
    let author = user_model("grace@example.com");
    let model = post_model(author.id, "Joined Post");
    let post_id = model.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![(model, author)]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let found = repo.find_with_author(post_id).await.unwrap().unwrap();
    assert_eq!(found.post.title, "Joined Post");
    assert_eq!(found.author.first_name, "Grace");
    assert_eq!(found.author.bio.as_deref(), Some("Rear admiral"));
}

#[tokio::test]
async fn test_find_user_by_email_converts_role() {
    let model = user_model("grace@example.com");

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![model]])
        .into_connection();

    let repo = PostgresUserRepository::new(db);

    let result: Option<User> = repo.find_by_email("grace@example.com").await.unwrap();
    let found = result.unwrap();
    assert_eq!(found.role, UserRole::User);
    assert!(found.is_active);
}

#[tokio::test]
async fn test_increment_views_reports_missing_post() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 0,
            },
        ])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    assert!(repo.increment_views(Uuid::new_v4()).await.unwrap());
    assert!(!repo.increment_views(Uuid::new_v4()).await.unwrap());
}

#[tokio::test]
async fn test_increment_likes_returns_new_count() {
    let model = post_model(Uuid::new_v4(), "Liked Post");
    let post_id = model.id;

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 1,
        }])
        .append_query_results(vec![vec![model]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let likes = repo.increment_likes(post_id).await.unwrap();
    assert_eq!(likes, 3);
}

#[tokio::test]
async fn test_increment_likes_missing_post() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let err = repo.increment_likes(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound));
}

#[tokio::test]
async fn test_delete_missing_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let result: Result<(), RepoError> = BaseRepository::<Post, Uuid>::delete(&repo, Uuid::new_v4()).await;
    assert!(matches!(result.unwrap_err(), RepoError::NotFound));
}
