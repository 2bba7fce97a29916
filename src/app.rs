use axum::Router;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::answering::{
    AnsweringCapability, EchoAnswerer, OpenRouterAnswerer, SerializedAnswerer,
};
use crate::config::{Backend, Config};
use crate::models::GatewayOptions;
use crate::routes::create_routes;

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "chatgpt_gateway=info,tower_http=debug,axum::rejection=info";

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub answerer: Arc<SerializedAnswerer>,
    pub options: GatewayOptions,
}

impl AppState {
    pub fn new(answerer: SerializedAnswerer, options: GatewayOptions) -> Self {
        Self {
            answerer: Arc::new(answerer),
            options,
        }
    }

    /// Wires the configured backend into a serialized answerer.
    pub fn from_config(config: &Config) -> Self {
        let capability: Arc<dyn AnsweringCapability> = match &config.backend {
            Backend::OpenRouter { api_key, model } => {
                Arc::new(OpenRouterAnswerer::new(api_key, model))
            }
            Backend::Echo => {
                info!("Using echo answering backend");
                Arc::new(EchoAnswerer)
            }
        };

        Self::new(
            SerializedAnswerer::new(capability, config.answer_timeout),
            GatewayOptions {
                append_suffix: config.append_suffix,
            },
        )
    }
}

/// Initialize tracing and logging for the application
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Create and configure the Axum application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    info!(
        "Initializing application router (append_suffix={})",
        state.options.append_suffix
    );

    create_routes()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
