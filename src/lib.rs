pub mod cli;
pub mod config;
pub mod crm;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod ui;

use std::sync::Arc;

use axum::{
    http::HeaderValue,
    routing::{delete, get},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::crm::CrmClient;
use crate::database::IntegrationStore;

/// Process-wide resources shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn IntegrationStore>,
    pub crm: Arc<dyn CrmClient>,
}

impl AppState {
    pub fn new(store: Arc<dyn IntegrationStore>, crm: Arc<dyn CrmClient>) -> Self {
        Self { store, crm }
    }
}

/// Routes without the CORS policy, which depends on deployment config
pub fn router(state: AppState) -> Router {
    use handlers::{integration, system};

    Router::new()
        // Public
        .route("/", get(system::root))
        .route("/health", get(system::health))
        // Integration lifecycle
        .route(
            "/autosync-settings",
            get(integration::settings_get).put(integration::settings_put),
        )
        .route("/contacts-count", get(integration::contacts_count_get))
        .route("/disconnect", delete(integration::disconnect_delete))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub fn app(state: AppState, config: &AppConfig) -> Router {
    router(state).layer(cors_layer(config))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    if config.is_development() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
