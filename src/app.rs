use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::TokenVerifier;
use crate::config::AppConfig;
use crate::database::ProcedureInvoker;
use crate::error::ApiError;
use crate::handlers::{activity_links, comments, communities, health, posts, reactions};
use crate::middleware::{trace_id, TRACE_ID_HEADER};
use crate::services::Services;

/// Shared, read-only per-process state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub invoker: ProcedureInvoker,
    pub verifier: Arc<TokenVerifier>,
    pub services: Services,
}

impl AppState {
    pub fn new(config: AppConfig, invoker: ProcedureInvoker, verifier: TokenVerifier) -> Self {
        Self {
            config: Arc::new(config),
            services: Services::new(invoker.clone()),
            invoker,
            verifier: Arc::new(verifier),
        }
    }
}

pub fn app(state: AppState) -> Router {
    let config = Arc::clone(&state.config);
    let api = &config.api;
    let communities_path = format!("{}/communities", api.prefix);

    Router::new()
        // Public
        .route("/", get(health::root))
        .route("/health", get(health::health))
        .nest(&communities_path, community_routes())
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(not_found)
        // Global middleware, outermost first
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(trace_id))
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(api.debug, &api.cors_origins))
                .layer(DefaultBodyLimit::max(api.max_request_size_bytes)),
        )
        .with_state(state)
}

fn community_routes() -> Router<AppState> {
    use axum::routing::patch;

    Router::new()
        .route("/", post(communities::create_community))
        .route("/search", get(communities::search_communities))
        .route(
            "/:community_id",
            get(communities::get_community).patch(communities::update_community),
        )
        .route("/:community_id/join", post(communities::join_community))
        .route("/:community_id/leave", post(communities::leave_community))
        .route("/:community_id/members", get(communities::get_members))
        .route("/:community_id/activities", post(activity_links::link_activity))
        // Posts
        .route(
            "/:community_id/posts",
            get(posts::get_feed).post(posts::create_post),
        )
        .route(
            "/:community_id/posts/:post_id",
            patch(posts::update_post).delete(posts::delete_post),
        )
        .route(
            "/:community_id/posts/:post_id/reactions",
            post(reactions::react_to_post).delete(reactions::unreact_to_post),
        )
        // Comments
        .route(
            "/:community_id/posts/:post_id/comments",
            get(comments::get_comments).post(comments::create_comment),
        )
        .route(
            "/:community_id/posts/:post_id/comments/:comment_id",
            patch(comments::update_comment).delete(comments::delete_comment),
        )
        .route(
            "/:community_id/posts/:post_id/comments/:comment_id/reactions",
            post(reactions::react_to_comment).delete(reactions::unreact_to_comment),
        )
}

fn cors_layer(debug: bool, origins: &[String]) -> CorsLayer {
    if debug {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .expose_headers([TRACE_ID_HEADER])
}

async fn not_found() -> ApiError {
    ApiError::not_found()
}

async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed()
}
