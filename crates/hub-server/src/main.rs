//! Automation Hub Server Binary

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use hub_core::{Catalog, MemoryUserStore, UserStore};
use hub_notify::{EmailSender, LogEmailSender};
use hub_payments::{PaymentProvider, StripeProvider};
use hub_server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    // Catalog and users
    let catalog = Arc::new(Catalog::builtin());
    let users: Arc<dyn UserStore> = Arc::new(MemoryUserStore::seeded());
    tracing::info!("Loaded {} catalog products", catalog.all().count());

    // Initialize payments
    let stripe = StripeProvider::from_env().ok();

    if stripe.is_some() {
        tracing::info!("✓ Stripe configured");
    } else {
        tracing::warn!("⚠ Stripe not configured - payment endpoints disabled");
        tracing::warn!("  Set STRIPE_SECRET_KEY and STRIPE_WEBHOOK_SECRET in .env");
    }

    let payments: Option<Arc<dyn PaymentProvider>> =
        stripe.map(|provider| Arc::new(provider) as Arc<dyn PaymentProvider>);

    // Email delivery is a logging stub until a provider is wired up
    let mailer: Arc<dyn EmailSender> = Arc::new(LogEmailSender);

    let public_origin =
        std::env::var("PUBLIC_ORIGIN").unwrap_or_else(|_| "http://localhost:3000".into());

    // Build application state
    let state = AppState::new(catalog, users, payments, mailer, public_origin);
    let app = hub_server::router(state);

    // Start server
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("🚀 Automation Hub server running on http://{}", addr);
    tracing::info!("══════════════════════════════════════════════════");
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health                  - Health check");
    tracing::info!("  GET  /api/products            - List catalog products");
    tracing::info!("  POST /api/checkout            - Create hosted checkout session");
    tracing::info!("  POST /api/manage-subscription - Billing portal session");
    tracing::info!("  GET  /api/subscription-status - Active subscription lookup");
    tracing::info!("  GET  /api/payment-history     - Charge history");
    tracing::info!("  GET  /api/auth/me             - Current user");
    tracing::info!("  POST /api/webhook             - Payment platform webhooks");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}
