use axum::{
    routing::{get, post},
    Router,
};

pub mod console;
pub mod env_utils;
pub mod logging;
pub mod route_handlers;
pub mod utils;
pub mod validation;

use console::ConsoleSink;

#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub console: ConsoleSink,
}

/**
 * main router for the app, the webhook receiver plus a healthcheck route
 **/
pub fn get_main_router(state: AppState) -> Router {
    tracing::debug!("initializing router ...");

    Router::new()
        .route("/webhook", post(route_handlers::webhooks::handler))
        .route("/healthcheck", get(|| async { "Ok" }))
        .with_state(state)
}
