//! HTTP handlers and route configuration.

mod auth;
mod health;
mod posts;

use actix_web::web;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/logout", web::post().to(auth::logout))
                    .route("/profile", web::get().to(auth::get_profile))
                    .route("/profile", web::put().to(auth::update_profile)),
            )
            // Post routes. Literal segments are registered before `/{id}`
            // so that e.g. `/posts/stats` never matches as an id.
            .service(
                web::scope("/posts")
                    .route("", web::get().to(posts::list_posts))
                    .route("", web::post().to(posts::create_post))
                    .route("/slug/{slug}", web::get().to(posts::get_post_by_slug))
                    .route("/author/{author_id}", web::get().to(posts::get_posts_by_author))
                    .route("/stats", web::get().to(posts::get_stats))
                    .route("/my", web::get().to(posts::get_my_posts))
                    .route("/my/stats", web::get().to(posts::get_my_stats))
                    .route("/{id}", web::get().to(posts::get_post))
                    .route("/{id}", web::put().to(posts::update_post))
                    .route("/{id}", web::delete().to(posts::delete_post))
                    .route("/{id}/like", web::post().to(posts::like_post)),
            ),
    );
}
