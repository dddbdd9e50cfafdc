//! Payment Provider Abstraction
//!
//! The narrow interface the rest of the system sees: mint a checkout
//! session, mint a portal session, resolve customers, list what the
//! platform knows about them, and verify webhook signatures. Keeping this
//! surface small keeps the platform swappable and lets tests substitute a
//! fake implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use stripe::Event;

use hub_core::AuthUser;

use crate::checkout::{CheckoutIntent, CheckoutSession};
use crate::error::Result;

/// A platform customer reference for a local user
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CustomerRef {
    /// Platform-issued customer id
    pub id: String,

    /// Whether this call created the customer (the caller persists the
    /// reference on first creation)
    pub created: bool,
}

/// What the platform knows about a customer, for outbound email
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct CustomerIdentity {
    pub email: Option<String>,
    pub name: Option<String>,
}

/// Result of creating a billing portal session
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PortalSession {
    /// Self-service portal URL to redirect the user to
    pub url: String,
}

/// One line of a customer's active subscription
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionItemSummary {
    pub id: String,
    pub price_id: Option<String>,
    pub product_id: Option<String>,
}

/// A customer's subscription as reported by the platform
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionSummary {
    pub id: String,
    pub status: String,
    pub current_period_start: DateTime<Utc>,
    pub current_period_end: DateTime<Utc>,
    pub cancel_at_period_end: bool,
    pub items: Vec<SubscriptionItemSummary>,
}

/// A past charge as reported by the platform
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRecord {
    pub id: String,
    /// Minor currency units
    pub amount: i64,
    pub currency: String,
    pub status: String,
    pub created: DateTime<Utc>,
    pub description: Option<String>,
    pub receipt_url: Option<String>,
}

/// The payment platform seam
///
/// Every method propagates the platform's error as [`PaymentError::Platform`]
/// without retrying; retry policy belongs to callers or to the platform's
/// own delivery mechanism.
///
/// [`PaymentError::Platform`]: crate::PaymentError::Platform
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Mint a hosted checkout session and return its redirect URL
    async fn create_checkout_session(&self, intent: CheckoutIntent) -> Result<CheckoutSession>;

    /// Mint a self-service billing portal session for an existing customer
    async fn create_portal_session(&self, customer_id: &str, return_url: &str)
    -> Result<PortalSession>;

    /// Reuse the user's customer reference, or create the platform customer
    async fn get_or_create_customer(&self, user: &AuthUser) -> Result<CustomerRef>;

    /// Look up a customer's email and name by platform id
    async fn retrieve_customer(&self, customer_id: &str) -> Result<CustomerIdentity>;

    /// Active subscriptions for a customer
    async fn list_active_subscriptions(&self, customer_id: &str)
    -> Result<Vec<SubscriptionSummary>>;

    /// Most recent charges for a customer (up to 50)
    async fn list_charges(&self, customer_id: &str) -> Result<Vec<PaymentRecord>>;

    /// Verify a webhook signature over the raw body and parse the event.
    ///
    /// The caller must pass the exact unparsed request body; parsing before
    /// verifying invalidates the signature.
    fn verify_event(&self, payload: &str, signature: &str) -> Result<Event>;
}
