//! # hub-payments
//!
//! Payment platform integration for Automation Hub, built on the hosted
//! checkout approach: the site never touches card data, it only mints a
//! session and redirects the browser to the platform's checkout page.
//!
//! ```text
//! ┌─────────────┐     ┌─────────────────┐     ┌─────────────┐
//! │  Your Site  │────▶│  Stripe Hosted  │────▶│  Your Site  │
//! │ (products)  │     │  Checkout Page  │     │  (success)  │
//! └─────────────┘     └─────────────────┘     └─────────────┘
//! ```
//!
//! Completion is reported asynchronously through signed webhooks, handled by
//! [`WebhookDispatcher`]. The platform itself sits behind the narrow
//! [`PaymentProvider`] trait so it stays swappable and testable with a fake;
//! [`StripeProvider`] is the production implementation.
//!
//! Delivery is at-least-once and unordered: the dispatcher never assumes it
//! sees an event exactly once, nor that related events arrive in order.

mod checkout;
mod error;
mod provider;
mod stripe_provider;
mod webhook;

pub use checkout::{CheckoutIntent, CheckoutMode, CheckoutSession, LineItemSpec};
pub use error::{PaymentError, Result};
pub use provider::{
    CustomerIdentity, CustomerRef, PaymentProvider, PaymentRecord, PortalSession,
    SubscriptionItemSummary, SubscriptionSummary,
};
pub use stripe_provider::StripeProvider;
pub use webhook::{WebhookAck, WebhookDispatcher};
