// subscription-backend/src/api/mod.rs
use crate::api::handlers::subscription_handler::subscription_router;
use crate::config::AppConfig;
use crate::logging::{inject_request_context, logging_middleware};
use crate::service::subscription_service::SubscriptionService;
use axum::http::{HeaderValue, Method};
use axum::{middleware, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub mod dto;
pub mod handlers;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    pub subscription_service: Arc<SubscriptionService>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(subscription_service: Arc<SubscriptionService>, config: Arc<AppConfig>) -> Self {
        Self {
            subscription_service,
            config,
        }
    }
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    if config.cors_allowed_origins.iter().any(|origin| origin == "*") {
        return cors.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .cors_allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    cors.allow_origin(origins)
}

/// ルーターにミドルウェアを重ねたアプリケーション全体を組み立てる
pub fn build_router(app_state: AppState) -> Router {
    let config = app_state.config.clone();

    subscription_router(app_state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn(inject_request_context))
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(cors_layer(&config))
        .layer(TraceLayer::new_for_http())
}
