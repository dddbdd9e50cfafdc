//! Shared test support: fake payment provider and request helpers

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, Response, header},
};
use http_body_util::BodyExt;
use stripe::Event;
use tower::ServiceExt;

use hub_core::{AuthUser, Catalog, MemoryUserStore, UserStore};
use hub_notify::{EmailSender, MemoryEmailSender};
use hub_payments::{
    CheckoutIntent, CheckoutSession, CustomerIdentity, CustomerRef, PaymentError, PaymentProvider,
    PaymentRecord, PortalSession, SubscriptionItemSummary, SubscriptionSummary,
};
use hub_server::state::AppState;

/// The signature the fake provider accepts
pub const VALID_SIGNATURE: &str = "t=1736899300,v1=fixture";

/// Fake payment platform answering with canned data
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
        Ok(vec![SubscriptionSummary {
            id: "sub_fake123".into(),
            status: "active".into(),
            current_period_start: chrono::DateTime::from_timestamp(1736899200, 0).unwrap(),
            current_period_end: chrono::DateTime::from_timestamp(1739577600, 0).unwrap(),
            cancel_at_period_end: false,
            items: vec![SubscriptionItemSummary {
                id: "si_fake123".into(),
                price_id: Some("price_fake123".into()),
                product_id: Some("prod_fake123".into()),
            }],
        }])
    }

    async fn list_charges(&self, _customer_id: &str) -> hub_payments::Result<Vec<PaymentRecord>> {
        Ok(vec![PaymentRecord {
            id: "ch_fake123".into(),
            amount: 3900,
            currency: "usd".into(),
            status: "succeeded".into(),
            created: chrono::DateTime::from_timestamp(1736899200, 0).unwrap(),
            description: Some("Solopreneur Automation Starter Pack".into()),
            receipt_url: Some("https://pay.example/receipts/ch_fake123".into()),
        }])
    }

    fn verify_event(&self, payload: &str, signature: &str) -> hub_payments::Result<Event> {
        if signature != VALID_SIGNATURE {
            return Err(PaymentError::Signature("signature mismatch".into()));
        }

        serde_json::from_str(payload).map_err(|e| PaymentError::Parse(e.to_string()))
    }
}

/// Everything an endpoint test needs to drive the app and observe effects
pub struct TestApp {
    pub router: Router,
    pub provider: Arc<FakeProvider>,
    pub mailer: Arc<MemoryEmailSender>,
    pub users: Arc<MemoryUserStore>,
}

impl TestApp {
    pub fn new() -> Self {
        let users = Arc::new(MemoryUserStore::seeded());
        let provider = Arc::new(FakeProvider::new());
        let mailer = Arc::new(MemoryEmailSender::new());

        let state = AppState::new(
            Arc::new(Catalog::builtin()),
            users.clone() as Arc<dyn UserStore>,
            Some(provider.clone() as Arc<dyn PaymentProvider>),
            mailer.clone() as Arc<dyn EmailSender>,
            "https://hub.example".into(),
        );

        Self {
            router: hub_server::router(state),
            provider,
            mailer,
            users,
        }
    }

    /// An app with no payment provider configured
    pub fn without_payments() -> Self {
        let users = Arc::new(MemoryUserStore::seeded());
        let mailer = Arc::new(MemoryEmailSender::new());

        let state = AppState::new(
            Arc::new(Catalog::builtin()),
            users.clone() as Arc<dyn UserStore>,
            None,
            mailer.clone() as Arc<dyn EmailSender>,
            "https://hub.example".into(),
        );

        Self {
            router: hub_server::router(state),
            provider: Arc::new(FakeProvider::new()),
            mailer,
            users,
        }
    }

    pub async fn request(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn get_authed(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::AUTHORIZATION, "Bearer dev-token-demo")
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(uri: &str, body: &str, authed: bool) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");

    if authed {
        builder = builder.header(header::AUTHORIZATION, "Bearer dev-token-demo");
    }

    builder.body(Body::from(body.to_string())).unwrap()
}

pub fn post_webhook(body: &str, signature: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/api/webhook")
        .header(header::CONTENT_TYPE, "application/json");

    if let Some(signature) = signature {
        builder = builder.header("stripe-signature", signature);
    }

    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
