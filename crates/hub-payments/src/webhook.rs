//! Webhook Event Dispatch
//!
//! Receives signed event payloads from the payment platform, verifies them
//! over the raw body, and routes recognized kinds to their side effects.
//! Delivery is at-least-once and unordered, so handlers tolerate duplicates
//! and never depend on relative ordering between event kinds.

use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use chrono::{Duration, Months, Utc};
use stripe::{CheckoutSession, Event, EventObject, EventType, Invoice, Subscription};

use hub_core::{BillingInterval, Catalog};
use hub_notify::{EmailSender, Notification};

use crate::error::{PaymentError, Result};
use crate::provider::PaymentProvider;

/// Event ids with this prefix are platform configuration checks: they are
/// acknowledged right after signature verification without invoking any
/// handler.
const TEST_EVENT_PREFIX: &str = "evt_test_";

/// Bound on the process-local seen-event set. When full the set resets,
/// which degrades duplicate detection back to idempotent-by-omission.
const SEEN_EVENTS_CAP: usize = 4096;

/// Outcome of a successfully acknowledged webhook delivery
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WebhookAck {
    /// A recognized kind was routed to its handler
    Processed,

    /// Test event: signature verified, no handler invoked
    VerificationOnly,

    /// This event id was already processed by this process
    Duplicate,

    /// Unknown kind, acknowledged so the platform does not retry it
    Ignored,
}

/// Routes verified platform events to their side effects
pub struct WebhookDispatcher {
    provider: Arc<dyn PaymentProvider>,
    mailer: Arc<dyn EmailSender>,
    catalog: Arc<Catalog>,
    seen: RwLock<HashSet<String>>,
}

impl WebhookDispatcher {
    pub fn new(
        provider: Arc<dyn PaymentProvider>,
        mailer: Arc<dyn EmailSender>,
        catalog: Arc<Catalog>,
    ) -> Self {
        Self {
            provider,
            mailer,
            catalog,
            seen: RwLock::new(HashSet::new()),
        }
    }

    /// Verify and process one delivery.
    ///
    /// `payload` must be the exact raw request body. A signature mismatch
    /// returns [`PaymentError::Signature`]; any handler failure propagates
    /// so the HTTP layer can answer 5xx and the platform retries.
    pub async fn handle(&self, payload: &str, signature: &str) -> Result<WebhookAck> {
        let event = self.provider.verify_event(payload, signature).map_err(|e| {
            tracing::warn!(error = %e, "Webhook signature verification failed");
            e
        })?;

        if event.id.as_str().starts_with(TEST_EVENT_PREFIX) {
            tracing::info!(event_id = %event.id, "Test event detected, returning verification response");
            return Ok(WebhookAck::VerificationOnly);
        }

        if self.already_seen(event.id.as_str()) {
            tracing::info!(event_id = %event.id, "Duplicate delivery acknowledged");
            return Ok(WebhookAck::Duplicate);
        }

        tracing::info!(event_type = ?event.type_, event_id = %event.id, "Processing webhook event");

        let ack = self.route(&event).await?;

        // Only successfully processed events are remembered; a failed
        // handler must stay eligible for the platform's retry.
        self.mark_seen(event.id.to_string());

        Ok(ack)
    }

    fn already_seen(&self, event_id: &str) -> bool {
        self.seen.read().unwrap().contains(event_id)
    }

    fn mark_seen(&self, event_id: String) {
        let mut seen = self.seen.write().unwrap();
        if seen.len() >= SEEN_EVENTS_CAP {
            seen.clear();
        }
        seen.insert(event_id);
    }

    async fn route(&self, event: &Event) -> Result<WebhookAck> {
        match event.type_ {
            EventType::CheckoutSessionCompleted => {
                if let EventObject::CheckoutSession(session) = &event.data.object {
                    self.handle_checkout_completed(session).await?;
                    Ok(WebhookAck::Processed)
                } else {
                    Err(PaymentError::Parse("Invalid checkout session data".into()))
                }
            }

            EventType::PaymentIntentSucceeded => {
                // TODO: update order state once a durable orders table exists
                tracing::info!(event_id = %event.id, "Payment intent succeeded");
                Ok(WebhookAck::Processed)
            }

            EventType::InvoicePaid => {
                // TODO: extend the subscription access window once recorded locally
                tracing::info!(event_id = %event.id, "Invoice paid");
                Ok(WebhookAck::Processed)
            }

            EventType::InvoicePaymentFailed => {
                if let EventObject::Invoice(invoice) = &event.data.object {
                    self.handle_invoice_payment_failed(invoice).await;
                    Ok(WebhookAck::Processed)
                } else {
                    Err(PaymentError::Parse("Invalid invoice data".into()))
                }
            }

            EventType::CustomerSubscriptionCreated => {
                // TODO: record the subscription and grant access
                tracing::info!(event_id = %event.id, "Subscription created");
                Ok(WebhookAck::Processed)
            }

            EventType::CustomerSubscriptionUpdated => {
                // TODO: reconcile plan changes
                tracing::info!(event_id = %event.id, "Subscription updated");
                Ok(WebhookAck::Processed)
            }

            EventType::CustomerSubscriptionDeleted => {
                if let EventObject::Subscription(subscription) = &event.data.object {
                    self.handle_subscription_deleted(subscription).await;
                    Ok(WebhookAck::Processed)
                } else {
                    Err(PaymentError::Parse("Invalid subscription data".into()))
                }
            }

            EventType::ChargeRefunded => {
                // TODO: revoke access and send a refund confirmation
                tracing::info!(event_id = %event.id, "Charge refunded");
                Ok(WebhookAck::Processed)
            }

            _ => {
                tracing::debug!(event_type = ?event.type_, "Unhandled webhook event kind");
                Ok(WebhookAck::Ignored)
            }
        }
    }

    async fn handle_checkout_completed(&self, session: &CheckoutSession) -> Result<()> {
        let metadata = session.metadata.clone().unwrap_or_default();

        let Some(user_id) = metadata.get("user_id") else {
            tracing::warn!(session_id = %session.id, "No user_id in session metadata");
            return Ok(());
        };

        tracing::info!(
            user_id = %user_id,
            product_id = metadata.get("product_id").map(String::as_str),
            session_id = %session.id,
            payment_status = ?session.payment_status,
            mode = ?session.mode,
            amount = session.amount_total,
            "Purchase recorded"
        );

        let Some(email) = metadata.get("customer_email") else {
            return Ok(());
        };

        let customer_name = metadata
            .get("customer_name")
            .cloned()
            .unwrap_or_else(|| "Customer".into());
        let product = metadata
            .get("product_id")
            .and_then(|id| self.catalog.get(id));
        let amount = session.amount_total.unwrap_or(0);

        let notification = match session.mode {
            stripe::CheckoutSessionMode::Payment => Notification::OrderConfirmation {
                order_id: session.id.to_string(),
                customer_name,
                product_name: product
                    .map_or_else(|| "Digital Product".into(), |p| p.name.clone()),
                amount,
                date: Utc::now().format("%-m/%-d/%Y").to_string(),
                download_link: None,
            },
            stripe::CheckoutSessionMode::Subscription => {
                let interval = product.and_then(|p| p.interval);
                let next_billing = Utc::now()
                    .checked_add_months(Months::new(match interval {
                        Some(BillingInterval::Year) => 12,
                        _ => 1,
                    }))
                    .unwrap_or_else(Utc::now);

                Notification::SubscriptionConfirmation {
                    customer_name,
                    product_name: product
                        .map_or_else(|| "Premium Membership".into(), |p| p.name.clone()),
                    amount,
                    interval: interval.map_or("month", |i| i.as_str()).into(),
                    next_billing_date: next_billing.format("%-m/%-d/%Y").to_string(),
                }
            }
            _ => return Ok(()),
        };

        // TODO: record the purchase durably and grant entitlement; until
        // then the webhook log is the only local trace of the order
        self.deliver(notification, email).await;

        Ok(())
    }

    async fn handle_invoice_payment_failed(&self, invoice: &Invoice) {
        tracing::info!(invoice_id = %invoice.id, "Invoice payment failed");

        let Some(customer) = invoice.customer.as_ref() else {
            return;
        };

        let identity = match self.provider.retrieve_customer(customer.id().as_str()).await {
            Ok(identity) => identity,
            Err(e) => {
                tracing::error!(error = %e, "Failed to resolve customer for payment-failed email");
                return;
            }
        };

        let Some(email) = identity.email else {
            return;
        };

        // The platform's actual retry schedule is not exposed here; +3 days
        // is a local approximation
        let retry_date = Utc::now() + Duration::days(3);

        self.deliver(
            Notification::PaymentFailed {
                customer_name: identity.name.unwrap_or_else(|| "Customer".into()),
                amount: invoice.amount_due.unwrap_or(0),
                retry_date: retry_date.format("%-m/%-d/%Y").to_string(),
            },
            &email,
        )
        .await;
    }

    async fn handle_subscription_deleted(&self, subscription: &Subscription) {
        tracing::info!(subscription_id = %subscription.id, "Subscription cancelled");

        let identity = match self
            .provider
            .retrieve_customer(subscription.customer.id().as_str())
            .await
        {
            Ok(identity) => identity,
            Err(e) => {
                tracing::error!(error = %e, "Failed to resolve customer for cancellation email");
                return;
            }
        };

        let Some(email) = identity.email else {
            return;
        };

        self.deliver(
            Notification::SubscriptionCancelled {
                customer_name: identity.name.unwrap_or_else(|| "Customer".into()),
                product_name: "Premium Membership".into(),
                cancelled_date: Utc::now().format("%-m/%-d/%Y").to_string(),
            },
            &email,
        )
        .await;
    }

    /// Email failure is logged and swallowed: a lost notification must not
    /// fail the whole delivery and trigger a platform retry.
    async fn deliver(&self, notification: Notification, to: &str) {
        let message = notification.into_message(to);

        if let Err(e) = self.mailer.send(&message).await {
            tracing::error!(
                error = %e,
                template = message.template,
                to = %message.to,
                "Failed to send notification email"
            );
        }
    }
}
