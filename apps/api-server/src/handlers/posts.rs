//! Post handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use scribe_core::domain::PostStatus;
use scribe_core::ports::PostPage;
use scribe_shared::dto::{
    CreatePostRequest, LikeResponse, ListPostsParams, PostListResponse, PostResponse,
    UpdatePostRequest,
};
use scribe_shared::response::ApiResponse;

use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::AppResult;
use crate::state::AppState;
use crate::validation;

fn list_response(page: PostPage, message: &str) -> PostListResponse {
    PostListResponse {
        success: true,
        message: message.to_string(),
        data: page.posts.into_iter().map(PostResponse::from).collect(),
        pagination: page.pagination,
    }
}

/// GET /api/posts
pub async fn list_posts(
    state: web::Data<AppState>,
    params: web::Query<ListPostsParams>,
) -> AppResult<HttpResponse> {
    let query = params.into_inner().into_query();
    let page = state.posts.list_posts(query).await?;

    Ok(HttpResponse::Ok().json(list_response(page, "Posts retrieved successfully")))
}

/// POST /api/posts - Protected route
pub async fn create_post(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    validation::validate_post_create(&req)?;

    let post = state.posts.create_post(req.into(), identity.user_id).await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        PostResponse::from(post),
        "Post created successfully",
    )))
}

/// GET /api/posts/{id} - public; a token is accepted but not required
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    _identity: OptionalIdentity,
) -> AppResult<HttpResponse> {
    let post = state.posts.get_post_by_id(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(PostResponse::from(post))))
}

/// GET /api/posts/slug/{slug} - public; a token is accepted but not required
pub async fn get_post_by_slug(
    state: web::Data<AppState>,
    path: web::Path<String>,
    _identity: OptionalIdentity,
) -> AppResult<HttpResponse> {
    let post = state.posts.get_post_by_slug(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(PostResponse::from(post))))
}

/// PUT /api/posts/{id} - Protected route, owner only
pub async fn update_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    validation::validate_post_update(&req)?;

    let post = state
        .posts
        .update_post(path.into_inner(), req.into(), identity.user_id)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        PostResponse::from(post),
        "Post updated successfully",
    )))
}

/// DELETE /api/posts/{id} - Protected route, owner only
pub async fn delete_post(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state
        .posts
        .delete_post(path.into_inner(), identity.user_id)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message((), "Post deleted successfully")))
}

/// GET /api/posts/author/{author_id} - public, published posts only
pub async fn get_posts_by_author(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    params: web::Query<ListPostsParams>,
) -> AppResult<HttpResponse> {
    let mut query = params.into_inner().into_query();
    query.status = Some(PostStatus::Published);

    let page = state
        .posts
        .get_posts_by_author(path.into_inner(), query)
        .await?;

    Ok(HttpResponse::Ok().json(list_response(page, "Author posts retrieved successfully")))
}

/// GET /api/posts/my - Protected route, the caller's own posts in any status
pub async fn get_my_posts(
    state: web::Data<AppState>,
    identity: Identity,
    params: web::Query<ListPostsParams>,
) -> AppResult<HttpResponse> {
    let query = params.into_inner().into_query();
    let page = state
        .posts
        .get_posts_by_author(identity.user_id, query)
        .await?;

    Ok(HttpResponse::Ok().json(list_response(page, "Your posts retrieved successfully")))
}

/// POST /api/posts/{id}/like
pub async fn like_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let likes = state.posts.like_post(path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(LikeResponse {
        success: true,
        message: "Post liked successfully".to_string(),
        likes,
    }))
}

/// GET /api/posts/stats - platform-wide counters
pub async fn get_stats(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let stats = state.posts.get_stats(None).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(stats)))
}

/// GET /api/posts/my/stats - Protected route, the caller's own counters
pub async fn get_my_stats(
    state: web::Data<AppState>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    let stats = state.posts.get_stats(Some(identity.user_id)).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(stats)))
}
