pub mod answering;
pub mod app;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod question;
pub mod routes;

// Re-export key functions for convenience
pub use app::{AppState, create_app, init_tracing};
