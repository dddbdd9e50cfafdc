//! HTTP Handlers

use axum::{Json, extract::State, http::HeaderMap, http::header::ORIGIN};
use serde::{Deserialize, Serialize};

use hub_core::Product;
use hub_payments::{
    CheckoutIntent, PaymentError, PaymentRecord, SubscriptionSummary, WebhookAck,
};

use crate::auth::authenticate;
use crate::error::ApiError;
use crate::state::AppState;

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub stripe_configured: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsResponse {
    pub one_time: Vec<Product>,
    pub subscriptions: Vec<Product>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[serde(default)]
    pub product_id: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub checkout_url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortalResponse {
    pub portal_url: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionStatusResponse {
    pub has_subscription: bool,
    pub subscription: Option<SubscriptionSummary>,
}

#[derive(Serialize)]
pub struct PaymentHistoryResponse {
    pub payments: Vec<PaymentRecord>,
}

#[derive(Serialize)]
pub struct MeResponse {
    pub id: i64,
    pub email: String,
    pub name: Option<String>,
}

// ============================================================================
// Handlers
// ============================================================================

/// Health check endpoint
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        stripe_configured: state.payments.is_some(),
    })
}

/// List all available products (public, no auth)
pub async fn list_products(State(state): State<AppState>) -> Json<ProductsResponse> {
    Json(ProductsResponse {
        one_time: state.catalog.one_time().cloned().collect(),
        subscriptions: state.catalog.subscriptions().cloned().collect(),
    })
}

/// Create a hosted checkout session for a product
pub async fn create_checkout(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<CheckoutRequest>,
) -> Result<Json<CheckoutResponse>, ApiError> {
    // Auth is checked before the catalog lookup; precedence is pinned by tests
    let user = authenticate(&headers, state.users.as_ref())?;

    let product_id = payload
        .product_id
        .as_deref()
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::Validation("Product ID is required".into()))?;

    let product = state
        .catalog
        .get(product_id)
        .ok_or_else(|| ApiError::NotFound("Product not found".into()))?;

    let payments = state.payments()?;
    let origin = request_origin(&headers, &state.public_origin);
    let intent = CheckoutIntent::for_product(product, &user, &origin);

    let session = payments.create_checkout_session(intent).await.map_err(|e| {
        tracing::error!(error = %e, "Checkout error");
        ApiError::Upstream(e.user_message().into())
    })?;

    Ok(Json(CheckoutResponse {
        checkout_url: session.url,
    }))
}

/// Create a billing portal session for subscription self-service
pub async fn manage_subscription(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<PortalResponse>, ApiError> {
    let user = authenticate(&headers, state.users.as_ref())?;
    let payments = state.payments()?;
    let origin = request_origin(&headers, &state.public_origin);

    let customer = payments.get_or_create_customer(&user).await.map_err(|e| {
        tracing::error!(error = %e, "Billing portal error");
        ApiError::Upstream(e.user_message().into())
    })?;

    if customer.created {
        state.users.attach_customer_ref(user.id, &customer.id)?;
    }

    let session = payments
        .create_portal_session(&customer.id, &format!("{}/account/subscriptions", origin))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Billing portal error");
            ApiError::Upstream(e.user_message().into())
        })?;

    Ok(Json(PortalResponse {
        portal_url: session.url,
    }))
}

/// Current subscription status, live from the platform
pub async fn subscription_status(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<SubscriptionStatusResponse>, ApiError> {
    let user = authenticate(&headers, state.users.as_ref())?;

    let Some(customer_ref) = user.customer_ref else {
        return Ok(Json(SubscriptionStatusResponse {
            has_subscription: false,
            subscription: None,
        }));
    };

    let payments = state.payments()?;
    let subscription = payments
        .list_active_subscriptions(&customer_ref)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Subscription status error");
            ApiError::Upstream(e.user_message().into())
        })?
        .into_iter()
        .next();

    Ok(Json(SubscriptionStatusResponse {
        has_subscription: subscription.is_some(),
        subscription,
    }))
}

/// Payment history, live from the platform charge list
pub async fn payment_history(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<PaymentHistoryResponse>, ApiError> {
    let user = authenticate(&headers, state.users.as_ref())?;

    let Some(customer_ref) = user.customer_ref else {
        return Ok(Json(PaymentHistoryResponse { payments: Vec::new() }));
    };

    let payments = state
        .payments()?
        .list_charges(&customer_ref)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Payment history error");
            ApiError::Upstream(e.user_message().into())
        })?;

    Ok(Json(PaymentHistoryResponse { payments }))
}

/// Current user information
pub async fn current_user(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<MeResponse>, ApiError> {
    let user = authenticate(&headers, state.users.as_ref())?;

    Ok(Json(MeResponse {
        id: user.id,
        email: user.email,
        name: user.name,
    }))
}

/// Payment platform webhook endpoint
///
/// Takes the raw body so signature verification sees the exact bytes the
/// platform signed.
pub async fn stripe_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<serde_json::Value>, ApiError> {
    let dispatcher = state.dispatcher.as_ref().ok_or(ApiError::PaymentsDisabled)?;

    let signature = headers
        .get("stripe-signature")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Signature("Missing Stripe signature".into()))?;

    let ack = dispatcher.handle(&body, signature).await.map_err(|e| match e {
        PaymentError::Signature(msg) => ApiError::Signature(msg),
        other => {
            tracing::error!(error = %other, "Webhook processing error");
            ApiError::Webhook(other.to_string())
        }
    })?;

    let response = match ack {
        WebhookAck::VerificationOnly => serde_json::json!({ "verified": true }),
        _ => serde_json::json!({ "received": true }),
    };

    Ok(Json(response))
}

fn request_origin(headers: &HeaderMap, fallback: &str) -> String {
    headers
        .get(ORIGIN)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(fallback)
        .to_string()
}
