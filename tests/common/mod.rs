#![allow(dead_code)]

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use axum::{
    body::{Body, Bytes},
    http::{header, Method, Request, StatusCode},
    Router,
};
use tower::ServiceExt;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::{fmt::MakeWriter, EnvFilter};

use webhook_receiver::{console::ConsoleSink, get_main_router, logging, AppState};

/// In-memory writer shared between the code under test and the assertions.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }

    pub fn lines_containing(&self, needle: &str) -> Vec<String> {
        self.contents()
            .lines()
            .filter(|line| line.contains(needle))
            .map(str::to_string)
            .collect()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for SharedBuffer {
    type Writer = SharedBuffer;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Router wired to capturing sinks, one buffer per stream. The structured
/// logger is installed as the thread default, so keep the harness alive for
/// the whole test.
pub struct Harness {
    pub router: Router,
    pub console: SharedBuffer,
    pub logs: SharedBuffer,
    _guard: DefaultGuard,
}

pub fn harness() -> Harness {
    let logs = SharedBuffer::default();
    let subscriber = logging::log_subscriber(EnvFilter::new("info"), logs.clone());
    let guard = tracing::subscriber::set_default(subscriber);

    let console = SharedBuffer::default();
    let router = get_main_router(AppState {
        console: ConsoleSink::new(console.clone()),
    });

    Harness {
        router,
        console,
        logs,
        _guard: guard,
    }
}

pub fn webhook_request(body: &str) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/webhook")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Bytes) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
    (status, body)
}

pub async fn post_webhook(router: &Router, body: &str) -> (StatusCode, serde_json::Value) {
    let (status, body) = send(router, webhook_request(body)).await;
    let json = serde_json::from_slice(&body).unwrap();
    (status, json)
}
