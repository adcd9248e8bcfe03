use axum::{
    Router,
    extract::State,
    http::HeaderMap,
    response::Json,
    routing::{get, post},
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::ConfigSource;
use crate::context::InvocationContext;
use crate::handler::WebhookHandler;

pub struct AppState {
    pub handler: WebhookHandler,
    pub config: ConfigSource,
}

#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    pub result: String,
    pub delivered: bool,
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned)
}

async fn handle_webhook(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: axum::body::Bytes,
) -> Json<WebhookResponse> {
    let ctx = InvocationContext::new(
        header(&headers, "x-github-delivery"),
        header(&headers, "x-github-event"),
    );
    let config = state.config.resolve();

    let outcome = state.handler.handle_raw(&body, &config, &ctx).await;
    let delivered = outcome.is_success();
    info!(
        event = ctx.event_name.as_deref().unwrap_or("unknown"),
        "Invocation finished: {}", outcome
    );

    Json(WebhookResponse {
        result: outcome.into(),
        delivered,
    })
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "issue-relay",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn relay_info() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "service": "GitHub issue to Slack relay",
        "endpoints": {
            "webhook": "/webhook",
            "health": "/health",
            "info": "/"
        },
        "relays": "issue.html_url"
    }))
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(relay_info))
        .route("/health", get(health_check))
        .route("/webhook", post(handle_webhook))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
