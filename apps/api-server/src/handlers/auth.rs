//! Authentication and profile handlers.

use actix_web::{HttpResponse, web};

use scribe_shared::dto::{
    AuthData, LoginRequest, RegisterRequest, UpdateProfileRequest, UserResponse,
};
use scribe_shared::response::ApiResponse;

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;
use crate::validation;

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    validation::validate_register(&req)?;

    let session = state.auth.register(req.into()).await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        AuthData {
            user: session.user.into(),
            token: session.token,
        },
        "User registered successfully",
    )))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let session = state.auth.login(&req.email, &req.password).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        AuthData {
            user: session.user.into(),
            token: session.token,
        },
        "Login successful",
    )))
}

/// POST /api/auth/logout - Protected route
///
/// Tokens are stateless, so logout is an acknowledgment; clients discard
/// the token.
pub async fn logout(_identity: Identity) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message((), "Logout successful")))
}

/// GET /api/auth/profile - Protected route
pub async fn get_profile(
    state: web::Data<AppState>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    let user = state.auth.get_profile(identity.user_id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(UserResponse::from(user))))
}

/// PUT /api/auth/profile - Protected route
pub async fn update_profile(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<UpdateProfileRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    validation::validate_profile_update(&req)?;

    let user = state
        .auth
        .update_profile(identity.user_id, req.into())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        UserResponse::from(user),
        "Profile updated successfully",
    )))
}
