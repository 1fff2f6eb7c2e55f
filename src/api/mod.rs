//! API layer - HTTP handlers and routing
//!
//! This module contains all HTTP API endpoints for the fitcoach backend:
//! - Auth endpoints (register, login, logout, current user)
//! - Consultation endpoints
//! - Progress endpoints
//! - Admin user-management endpoints
//!
//! Route protection is layered: admin routes run behind both the auth and
//! admin middleware, user routes behind auth only, and the auth entry
//! points are public.

pub mod admin;
pub mod auth;
pub mod consultations;
pub mod middleware;
pub mod progress;
pub mod validate;

use axum::{
    http::{header, HeaderValue, Method},
    middleware as axum_middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use middleware::{ApiError, AppState, AuthenticatedUser};

/// Build the main API router
pub fn build_api_router(state: AppState) -> Router<AppState> {
    // Admin routes (need admin role)
    let admin_routes = Router::new()
        .route("/admin/users", get(admin::list_users))
        .route("/admin/users/{id}", delete(admin::delete_user))
        .route_layer(axum_middleware::from_fn(middleware::require_admin))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::require_auth,
        ));

    // Protected routes (need auth but not admin)
    let protected_routes = Router::new()
        .route("/logout", post(auth::logout))
        .route("/user", get(auth::current_user))
        .route(
            "/consultations",
            post(consultations::create_consultation).get(consultations::list_consultations),
        )
        .route(
            "/progress",
            post(progress::create_progress).get(progress::list_progress),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::require_auth,
        ));

    // Public routes
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .merge(admin_routes)
        .merge(protected_routes)
}

/// Build the complete router with middleware
pub fn build_router(state: AppState, cors_origin: &str) -> Router {
    // CORS configuration - cookie auth needs credentials
    let cors = CorsLayer::new()
        .allow_origin(cors_origin.parse::<HeaderValue>().unwrap())
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::COOKIE])
        .allow_credentials(true);

    Router::new()
        .nest("/api", build_api_router(state.clone()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
