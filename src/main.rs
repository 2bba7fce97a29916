use chatgpt_gateway::app::{AppState, create_app, init_tracing};
use chatgpt_gateway::config::Config;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Initialize tracing/logging
    init_tracing();

    info!("Starting ChatGPT gateway...");

    // Load configuration
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {:#}", e);
            std::process::exit(1);
        }
    };
    info!("Configuration loaded: {:?}", config);

    // One answering capability for the whole process
    let app = create_app(AppState::from_config(&config));

    // Create TCP listener
    let listener = match tokio::net::TcpListener::bind(&config.bind_address()).await {
        Ok(listener) => {
            info!("Server running on {}", config.server_url());
            info!("Status check: GET /chatgpt/status");
            info!("Question endpoint: POST /chatgpt/question");
            listener
        }
        Err(e) => {
            error!("Failed to bind to {}: {}", config.bind_address(), e);
            std::process::exit(1);
        }
    };

    // Start the server
    info!("Server starting...");
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
        std::process::exit(1);
    }
    info!("Server shutdown gracefully");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
