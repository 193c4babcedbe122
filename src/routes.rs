use crate::{SharedData, api, logging};
use axum::Router;
use axum::routing::get;
use std::sync::Arc;

/// Assembles every route the service exposes and wraps them in request tracing
pub fn build_router(shared_data: Arc<SharedData>) -> Router {
    let router = Router::new()
        .route("/", get(api::root::welcome))
        .merge(api::todo::todo_routes())
        .merge(api::swagger_main::build_documentation())
        .with_state(shared_data);

    logging::attach_tracing_http(router)
}
