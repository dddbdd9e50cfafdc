//! Automation Hub HTTP Server
//!
//! Axum-based server for the marketing site's commerce API: product
//! listing, hosted checkout initiation, billing portal, subscription
//! status, payment history, and the payment platform's webhook endpoint.
//!
//! The webhook handler receives the raw request body (no JSON extractor)
//! because signature verification runs over the untouched byte stream.

pub mod auth;
pub mod error;
pub mod handlers;
pub mod state;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::handlers::{
    create_checkout, current_user, health_check, list_products, manage_subscription,
    payment_history, stripe_webhook, subscription_status,
};
use crate::state::AppState;

/// Build the application router
pub fn router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health & catalog
        .route("/health", get(health_check))
        .route("/api/products", get(list_products))
        // Checkout & billing
        .route("/api/checkout", post(create_checkout))
        .route("/api/manage-subscription", post(manage_subscription))
        .route("/api/subscription-status", get(subscription_status))
        .route("/api/payment-history", get(payment_history))
        // Auth
        .route("/api/auth/me", get(current_user))
        // Platform callbacks
        .route("/api/webhook", post(stripe_webhook))
        // Static files (WASM frontend)
        .fallback_service(ServeDir::new("static"))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
