//! Notification Kinds and Rendered Messages

use serde::{Deserialize, Serialize};

use crate::templates;

/// A notification to be rendered and delivered
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Notification {
    /// One-time purchase confirmed
    OrderConfirmation {
        order_id: String,
        customer_name: String,
        product_name: String,
        /// Minor currency units
        amount: i64,
        date: String,
        download_link: Option<String>,
    },

    /// Subscription activated
    SubscriptionConfirmation {
        customer_name: String,
        product_name: String,
        /// Minor currency units per billing period
        amount: i64,
        interval: String,
        next_billing_date: String,
    },

    /// Subscription cancelled
    SubscriptionCancelled {
        customer_name: String,
        product_name: String,
        cancelled_date: String,
    },

    /// Recurring payment failed, platform will retry
    PaymentFailed {
        customer_name: String,
        /// Minor currency units due
        amount: i64,
        retry_date: String,
    },
}

impl Notification {
    /// Template identifier, used in delivery logs
    pub fn template_name(&self) -> &'static str {
        match self {
            Notification::OrderConfirmation { .. } => "order-confirmation",
            Notification::SubscriptionConfirmation { .. } => "subscription-confirmation",
            Notification::SubscriptionCancelled { .. } => "subscription-cancelled",
            Notification::PaymentFailed { .. } => "payment-failed",
        }
    }

    /// Subject line
    pub fn subject(&self) -> String {
        match self {
            Notification::OrderConfirmation { order_id, .. } => {
                format!("Order Confirmation - {}", order_id)
            }
            Notification::SubscriptionConfirmation { product_name, .. } => {
                format!("Subscription Confirmed - {}", product_name)
            }
            Notification::SubscriptionCancelled { product_name, .. } => {
                format!("Subscription Cancelled - {}", product_name)
            }
            Notification::PaymentFailed { .. } => "Payment Failed - Action Required".into(),
        }
    }

    /// Render the HTML body
    pub fn render(&self) -> String {
        templates::render(self)
    }

    /// Render into a deliverable message addressed to `to`
    pub fn into_message(self, to: impl Into<String>) -> EmailMessage {
        EmailMessage {
            to: to.into(),
            subject: self.subject(),
            template: self.template_name(),
            html: self.render(),
        }
    }
}

/// A rendered email ready for hand-off to a provider
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub template: &'static str,
    pub html: String,
}
