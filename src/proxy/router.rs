//! HTTP surface of the proxy.

use crate::proxy::{ProxyState, TryOnOutcome};
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Builds the proxy router: `POST /virtual-tryon` and `GET /health`, open
/// CORS for any origin.
pub fn router(state: ProxyState) -> Router {
    Router::new()
        .route("/virtual-tryon", post(virtual_tryon).options(preflight))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            header::CONTENT_TYPE,
        ])
}

async fn virtual_tryon(State(state): State<ProxyState>, body: Bytes) -> TryOnOutcome {
    state.handle(&body).await
}

// Reached only by OPTIONS requests that are not CORS preflights.
async fn preflight() -> StatusCode {
    StatusCode::OK
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Health {
    status: &'static str,
    gateway_configured: bool,
}

async fn health(State(state): State<ProxyState>) -> Json<Health> {
    Json(Health {
        status: "ok",
        gateway_configured: state.is_configured(),
    })
}

impl IntoResponse for TryOnOutcome {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.into_body())).into_response()
    }
}
