//! Liveness endpoint
//!
//! Answers every request with `200 OK` so uptime monitors can tell the
//! process is alive. It reports nothing about the ledger.

use std::future::Future;

use axum::http::header;
use axum::response::IntoResponse;
use axum::Router;
use tokio::net::TcpListener;

use crate::error::FafoResult;

/// Router that answers any path and method with `OK`
pub fn router() -> Router {
    Router::new().fallback(ok)
}

async fn ok() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/plain")], "OK")
}

/// Serve the health router until `shutdown` completes
pub async fn serve<F>(listener: TcpListener, shutdown: F) -> FafoResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, router())
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}
