use crate::{handlers, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// One registered endpoint, as reported by `GET /routes`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RouteEntry {
    pub route: &'static str,
    pub methods: &'static [&'static str],
    pub function: &'static str,
}

const fn entry(
    route: &'static str,
    methods: &'static [&'static str],
    function: &'static str,
) -> RouteEntry {
    RouteEntry {
        route,
        methods,
        function,
    }
}

pub const ROUTE_TABLE: &[RouteEntry] = &[
    entry("/health", &["GET"], "health"),
    entry("/repo_tree", &["GET"], "repo_tree"),
    entry("/file", &["GET"], "get_file"),
    entry("/search", &["GET"], "search"),
    entry("/routes", &["GET"], "list_routes"),
    entry("/functions_index", &["GET"], "functions_index"),
    entry("/file_tree_index", &["GET"], "file_tree_index"),
    entry("/update_file", &["POST"], "update_file"),
    entry("/createFile", &["POST"], "create_file"),
];

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        // Read side
        .route("/repo_tree", get(handlers::repo_tree))
        .route("/file", get(handlers::get_file))
        .route("/search", get(handlers::search))
        .route("/routes", get(handlers::list_routes))
        .route("/functions_index", get(handlers::functions_index))
        .route("/file_tree_index", get(handlers::file_tree_index))
        // Write side
        .route("/update_file", post(handlers::update_file))
        .route("/createFile", post(handlers::create_file))
        .with_state(state)
        .layer(
            ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(
                CorsLayer::new()
                    .allow_origin(tower_http::cors::Any)
                    .allow_methods(tower_http::cors::Any)
                    .allow_headers(tower_http::cors::Any),
            ),
        )
}
