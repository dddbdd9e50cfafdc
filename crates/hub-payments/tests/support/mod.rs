//! Shared test support: a fake payment provider and event fixture helpers

use std::sync::RwLock;

use async_trait::async_trait;
use stripe::Event;

use hub_core::AuthUser;
use hub_payments::{
    CheckoutIntent, CheckoutSession, CustomerIdentity, CustomerRef, PaymentError, PaymentProvider,
    PaymentRecord, PortalSession, SubscriptionSummary,
};

/// The signature the fake provider accepts
pub const VALID_SIGNATURE: &str = "t=1736899300,v1=fixture";

/// Fake payment platform: records the last checkout intent, answers with
/// canned data, and treats any signature other than [`VALID_SIGNATURE`] as
/// a mismatch.
pub struct FakeProvider {
    pub last_intent: RwLock<Option<CheckoutIntent>>,
}

impl Default for FakeProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeProvider {
    pub fn new() -> Self {
        Self {
            last_intent: RwLock::new(None),
        }
    }
}

#[async_trait]
impl PaymentProvider for FakeProvider {
    async fn create_checkout_session(
        &self,
        intent: CheckoutIntent,
    ) -> hub_payments::Result<CheckoutSession> {
        *self.last_intent.write().unwrap() = Some(intent);

        Ok(CheckoutSession {
            id: "cs_test_fake".into(),
            url: "https://checkout.example/c/pay/cs_test_fake".into(),
        })
    }

    async fn create_portal_session(
        &self,
        customer_id: &str,
        _return_url: &str,
    ) -> hub_payments::Result<PortalSession> {
        Ok(PortalSession {
            url: format!("https://billing.example/p/session/{}", customer_id),
        })
    }

    async fn get_or_create_customer(&self, user: &AuthUser) -> hub_payments::Result<CustomerRef> {
        Ok(user.customer_ref.as_ref().map_or(
            CustomerRef {
                id: "cus_fake123".into(),
                created: true,
            },
            |id| CustomerRef {
                id: id.clone(),
                created: false,
            },
        ))
    }

    async fn retrieve_customer(
        &self,
        _customer_id: &str,
    ) -> hub_payments::Result<CustomerIdentity> {
        Ok(CustomerIdentity {
            email: Some("demo@automationhub.dev".into()),
            name: Some("Demo User".into()),
        })
    }

    async fn list_active_subscriptions(
        &self,
        _customer_id: &str,
    ) -> hub_payments::Result<Vec<SubscriptionSummary>> {
        Ok(Vec::new())
    }

    async fn list_charges(&self, _customer_id: &str) -> hub_payments::Result<Vec<PaymentRecord>> {
        Ok(Vec::new())
    }

    fn verify_event(&self, payload: &str, signature: &str) -> hub_payments::Result<Event> {
        if signature != VALID_SIGNATURE {
            return Err(PaymentError::Signature("signature mismatch".into()));
        }

        serde_json::from_str(payload).map_err(|e| PaymentError::Parse(e.to_string()))
    }
}

/// Re-serialize a fixture after applying edits to the parsed JSON
pub fn patch_event(raw: &str, edit: impl FnOnce(&mut serde_json::Value)) -> String {
    let mut value: serde_json::Value = serde_json::from_str(raw).expect("fixture parses");
    edit(&mut value);
    value.to_string()
}
