//! Application State

use std::sync::Arc;

use hub_core::{Catalog, UserStore};
use hub_notify::EmailSender;
use hub_payments::{PaymentProvider, WebhookDispatcher};

use crate::error::ApiError;

/// Shared application state, constructed once at startup
#[derive(Clone)]
pub struct AppState {
    /// Deploy-time product catalog
    pub catalog: Arc<Catalog>,

    /// Session-token-to-user resolution
    pub users: Arc<dyn UserStore>,

    /// Payment platform (None if not configured)
    pub payments: Option<Arc<dyn PaymentProvider>>,

    /// Webhook dispatcher (None when payments are disabled)
    pub dispatcher: Option<Arc<WebhookDispatcher>>,

    /// Site origin used when the request carries no Origin header
    pub public_origin: String,
}

impl AppState {
    pub fn new(
        catalog: Arc<Catalog>,
        users: Arc<dyn UserStore>,
        payments: Option<Arc<dyn PaymentProvider>>,
        mailer: Arc<dyn EmailSender>,
        public_origin: String,
    ) -> Self {
        let dispatcher = payments
            .as_ref()
            .map(|provider| Arc::new(WebhookDispatcher::new(provider.clone(), mailer, catalog.clone())));

        Self {
            catalog,
            users,
            payments,
            dispatcher,
            public_origin,
        }
    }

    /// The payment provider, or the degraded-payments error
    pub fn payments(&self) -> Result<&Arc<dyn PaymentProvider>, ApiError> {
        self.payments.as_ref().ok_or(ApiError::PaymentsDisabled)
    }
}
