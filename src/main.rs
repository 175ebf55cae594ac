use anyhow::Context;
use dotenv::dotenv;

use axum::{
    http::{Request, Uri},
    middleware::Next,
    response::Response,
};
use tower_http::trace::TraceLayer;

use webhook_receiver::{env_utils, get_main_router, logging, utils, AppState};

struct RequestUri(Uri);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    logging::init_logging()?;

    let addr = env_utils::get_socket_addr();
    let host_uri = env_utils::get_host_uri();

    let app = get_main_router(AppState::default())
        .layer(axum::middleware::from_fn(
            |request: Request<_>, next: Next<_>| async move {
                let uri = request.uri().clone();

                let mut response = next.run(request).await;

                response.extensions_mut().insert(RequestUri(uri));

                response
            },
        ))
        .layer(TraceLayer::new_for_http().on_response(
            |response: &Response, latency: std::time::Duration, _span: &tracing::Span| {
                let url = match response.extensions().get::<RequestUri>().map(|r| &r.0) {
                    Some(uri) => uri.to_string(),
                    None => "unknown".to_string(),
                };
                let status = response.status();
                let latency = utils::duration_to_ms_string(latency);

                if url == "/healthcheck" {
                    tracing::trace!("{} {} {}", url, status, latency);
                    return;
                }

                tracing::debug!("{} {} {}", url, status, latency);
            },
        ));

    let server = axum::Server::try_bind(&addr)
        .with_context(|| format!("unable to bind {addr}"))?;

    tracing::info!("Starting server at host: {} (listening on {})", host_uri, addr);

    server
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("error while starting API server")?;

    tracing::info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Received shutdown signal, draining connections"),
        Err(err) => {
            tracing::error!("Failed to listen for shutdown signal: {}", err);
            std::future::pending::<()>().await;
        }
    }
}
