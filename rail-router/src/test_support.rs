//! In-process HTTP fixtures for client tests.

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::http::StatusCode;
use axum::routing::any;
use axum::{Json, body::Bytes};
use tokio::net::TcpListener;

/// Request bodies seen by a recording fixture.
#[derive(Clone, Default)]
pub(crate) struct RecordedRequests(Arc<Mutex<Vec<serde_json::Value>>>);

impl RecordedRequests {
    pub(crate) fn push(&self, body: serde_json::Value) {
        self.0.lock().unwrap().push(body);
    }

    pub(crate) fn bodies(&self) -> Vec<serde_json::Value> {
        self.0.lock().unwrap().clone()
    }
}

/// Serve `router` on an ephemeral local port; returns its base URL.
pub(crate) async fn serve_router(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// Serve a fixed JSON response at `path`.
pub(crate) async fn serve_json(path: &str, status: u16, body: serde_json::Value) -> String {
    serve_recording(path, status, body, RecordedRequests::default()).await
}

/// Serve a fixed JSON response at `path`, recording every request body.
pub(crate) async fn serve_recording(
    path: &str,
    status: u16,
    body: serde_json::Value,
    recorded: RecordedRequests,
) -> String {
    let status = StatusCode::from_u16(status).unwrap();
    let router = Router::new().route(
        path,
        any(move |request: Bytes| {
            let body = body.clone();
            let recorded = recorded.clone();
            async move {
                if let Ok(value) = serde_json::from_slice(&request) {
                    recorded.push(value);
                }
                (status, Json(body))
            }
        }),
    );
    serve_router(router).await
}

/// A local URL nothing is listening on.
pub(crate) fn unused_local_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
