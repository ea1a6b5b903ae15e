use std::{net::SocketAddr, sync::Arc};

use axum::{
    routing::{get, post},
    Router,
};
use shared::protocol::{HEALTH_ROUTE, INFO_ROUTE, PREDICT_ROUTE};
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod api;
mod app_state;
mod classifier;
mod cleaning;
mod config;
mod model;

use app_state::AppState;
use classifier::TweetClassifier;
use config::{load_settings, Settings};

const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let settings = load_settings();
    let state = AppState {
        classifier: load_classifier(&settings),
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings.server_bind.parse()?;
    info!(%addr, "classification backend listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn load_classifier(settings: &Settings) -> Option<Arc<TweetClassifier>> {
    let model_path = settings.model_path();
    match TweetClassifier::load(model_path.as_deref()) {
        Ok(classifier) => {
            info!(model = classifier.model_name(), "model components loaded");
            Some(Arc::new(classifier))
        }
        Err(error) => {
            error!(
                %error,
                "model components not loaded; /predict will answer 500 until the model file is fixed"
            );
            None
        }
    }
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(INFO_ROUTE, get(api::service_info))
        .route(PREDICT_ROUTE, post(api::predict))
        .route(HEALTH_ROUTE, get(api::health))
        .layer(RequestBodyLimitLayer::new(MAX_REQUEST_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
