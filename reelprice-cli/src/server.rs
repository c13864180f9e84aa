//! HTTP presenter: the merged index and cheapest-price lookups as JSON.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use reelprice::{Reel, ReelError};
use serde::Deserialize;
use serde_json::json;
use tokio::net::TcpListener;

use crate::describe_error;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub reel: Arc<Reel>,
}

#[derive(Debug, Deserialize)]
pub struct PriceQuery {
    pub title: Option<String>,
}

pub fn create_router(reel: Arc<Reel>) -> Router {
    Router::new()
        .route("/", get(all_movies))
        .route("/cheapestprice", get(cheapest_price))
        .with_state(AppState { reel })
}

/// Serve on an already bound listener until the process is stopped.
///
/// # Errors
/// Propagates I/O errors from the accept loop.
pub async fn serve(listener: TcpListener, reel: Arc<Reel>) -> std::io::Result<()> {
    axum::serve(listener, create_router(reel)).await
}

/// Bind `addr` and serve, stopping on Ctrl-C.
///
/// # Errors
/// Fails when the address cannot be bound.
pub async fn run_server(addr: SocketAddr, reel: Reel) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, create_router(Arc::new(reel)))
        .with_graceful_shutdown(shutdown_on(tokio::signal::ctrl_c()))
        .await?;
    Ok(())
}

// Resolves when `signal` fires. A signal that cannot be installed never resolves.
async fn shutdown_on<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => tracing::info!("shutting down"),
        Err(e) => {
            tracing::error!(error = %e, "cannot listen for Ctrl-C; serving until killed");
            std::future::pending::<()>().await;
        }
    }
}

async fn all_movies(State(state): State<AppState>) -> Response {
    match state.reel.build_index().await {
        Ok(index) => Json(index).into_response(),
        Err(e) => error_response(&e),
    }
}

async fn cheapest_price(
    State(state): State<AppState>,
    Query(query): Query<PriceQuery>,
) -> Response {
    let Some(title) = query.title.filter(|t| !t.trim().is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "Error": "missing required query parameter 'title'" })),
        )
            .into_response();
    };

    match state.reel.cheapest_price(&title).await {
        Ok(best) => Json(json!({ "Cheapest Price": best.price.as_str() })).into_response(),
        Err(e) if e.is_not_found() => Json(json!({
            "Message": format!("Movie: {title} not found in Database")
        }))
        .into_response(),
        Err(e) => error_response(&e),
    }
}

fn error_response(e: &ReelError) -> Response {
    tracing::warn!(error = %e, "request failed");
    let status = match e {
        ReelError::RequestTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        ReelError::InvalidArg(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::BAD_GATEWAY,
    };
    (status, Json(json!({ "Error": describe_error(e) }))).into_response()
}
