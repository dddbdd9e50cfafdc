//! Endpoint behavior tests driven through the full router

mod support;

use axum::http::StatusCode;

use hub_core::{BillingInterval, UserStore};
use hub_payments::CheckoutMode;

use support::{TestApp, VALID_SIGNATURE, body_json, get, get_authed, post_json, post_webhook};

const CHECKOUT_COMPLETED: &str = include_str!("fixtures/checkout_session_completed.json");
const CUSTOMER_CREATED: &str = include_str!("fixtures/customer_created.json");

#[tokio::test]
async fn products_lists_each_id_in_exactly_one_bucket() {
    let app = TestApp::new();

    let response = app.request(get("/api/products")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let one_time = body["oneTime"].as_array().unwrap();
    let subscriptions = body["subscriptions"].as_array().unwrap();

    assert!(!one_time.is_empty());
    assert!(!subscriptions.is_empty());

    for product in one_time {
        assert_eq!(product["type"], "one-time");
        let id = product["id"].as_str().unwrap();
        assert!(!subscriptions.iter().any(|p| p["id"] == id));
    }
    for product in subscriptions {
        assert_eq!(product["type"], "subscription");
    }
}

#[tokio::test]
async fn checkout_auth_is_checked_before_the_catalog() {
    let app = TestApp::new();

    // Unknown product, no auth: the auth check wins
    let response = app
        .request(post_json("/api/checkout", r#"{"productId":"product_unknown"}"#, false))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Unknown product, authed: now the catalog lookup fails
    let response = app
        .request(post_json("/api/checkout", r#"{"productId":"product_unknown"}"#, true))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Valid product, no auth: still unauthorized
    let response = app
        .request(post_json("/api/checkout", r#"{"productId":"product_starter_pack"}"#, false))
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn checkout_missing_product_id_is_rejected() {
    let app = TestApp::new();

    let response = app.request(post_json("/api/checkout", "{}", true)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Product ID is required");
}

#[tokio::test]
async fn checkout_one_time_product_yields_payment_mode() {
    let app = TestApp::new();

    let response = app
        .request(post_json("/api/checkout", r#"{"productId":"product_starter_pack"}"#, true))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["checkoutUrl"], "https://checkout.example/c/pay/cs_test_fake");

    let intent = app.provider.last_intent.read().unwrap().clone().unwrap();
    assert_eq!(intent.mode, CheckoutMode::Payment);
    assert_eq!(intent.line_item.unit_amount, 3900);
    assert_eq!(intent.line_item.currency, "usd");
    assert_eq!(intent.line_item.quantity, 1);
    assert!(intent.line_item.recurring.is_none());
}

#[tokio::test]
async fn checkout_subscription_product_yields_subscription_mode() {
    let app = TestApp::new();

    let response = app
        .request(post_json("/api/checkout", r#"{"productId":"product_premium_yearly"}"#, true))
        .await;

    assert_eq!(response.status(), StatusCode::OK);

    let intent = app.provider.last_intent.read().unwrap().clone().unwrap();
    assert_eq!(intent.mode, CheckoutMode::Subscription);
    assert_eq!(intent.line_item.unit_amount, 29900);
    assert_eq!(intent.line_item.recurring, Some(BillingInterval::Year));
}

#[tokio::test]
async fn missing_platform_key_degrades_payment_endpoints() {
    let app = TestApp::without_payments();

    let response = app
        .request(post_json("/api/checkout", r#"{"productId":"product_starter_pack"}"#, true))
        .await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Payments not configured");

    // Products stay available without a platform key
    let response = app.request(get("/api/products")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn manage_subscription_attaches_customer_ref_once() {
    let app = TestApp::new();

    let response = app.request(post_json("/api/manage-subscription", "{}", true)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["portalUrl"], "https://billing.example/p/session/cus_fake123");

    let user = app.users.get(1).unwrap().unwrap();
    assert_eq!(user.customer_ref.as_deref(), Some("cus_fake123"));

    // Second call reuses the stored reference
    let response = app.request(post_json("/api/manage-subscription", "{}", true)).await;
    assert_eq!(response.status(), StatusCode::OK);
    let user = app.users.get(1).unwrap().unwrap();
    assert_eq!(user.customer_ref.as_deref(), Some("cus_fake123"));
}

#[tokio::test]
async fn subscription_status_without_customer_ref() {
    let app = TestApp::new();

    let response = app.request(get_authed("/api/subscription-status")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["hasSubscription"], false);
    assert!(body["subscription"].is_null());
}

#[tokio::test]
async fn subscription_status_with_customer_ref() {
    let app = TestApp::new();
    app.users.attach_customer_ref(1, "cus_fake123").unwrap();

    let response = app.request(get_authed("/api/subscription-status")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["hasSubscription"], true);
    assert_eq!(body["subscription"]["id"], "sub_fake123");
    assert_eq!(body["subscription"]["cancelAtPeriodEnd"], false);
    assert_eq!(body["subscription"]["items"][0]["priceId"], "price_fake123");
}

#[tokio::test]
async fn payment_history_reflects_platform_charges() {
    let app = TestApp::new();

    // No customer reference yet: empty history
    let response = app.request(get_authed("/api/payment-history")).await;
    let body = body_json(response).await;
    assert_eq!(body["payments"].as_array().unwrap().len(), 0);

    app.users.attach_customer_ref(1, "cus_fake123").unwrap();

    let response = app.request(get_authed("/api/payment-history")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let payments = body["payments"].as_array().unwrap();
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0]["id"], "ch_fake123");
    assert_eq!(payments[0]["amount"], 3900);
    assert_eq!(payments[0]["receiptUrl"], "https://pay.example/receipts/ch_fake123");
}

#[tokio::test]
async fn me_returns_user_identity() {
    let app = TestApp::new();

    let response = app.request(get_authed("/api/auth/me")).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["id"], 1);
    assert_eq!(body["email"], "demo@automationhub.dev");
    assert_eq!(body["name"], "Demo User");
}

#[tokio::test]
async fn webhook_rejects_tampered_signature() {
    let app = TestApp::new();

    let response = app
        .request(post_webhook(CHECKOUT_COMPLETED, Some("t=1736899300,v1=tampered")))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.mailer.sent_count(), 0);
}

#[tokio::test]
async fn webhook_requires_signature_header() {
    let app = TestApp::new();

    let response = app.request(post_webhook(CHECKOUT_COMPLETED, None)).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.mailer.sent_count(), 0);
}

#[tokio::test]
async fn webhook_acknowledges_unknown_kinds_without_side_effects() {
    let app = TestApp::new();

    let response = app
        .request(post_webhook(CUSTOMER_CREATED, Some(VALID_SIGNATURE)))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["received"], true);
    assert_eq!(app.mailer.sent_count(), 0);
}

#[tokio::test]
async fn webhook_tolerates_duplicate_checkout_delivery() {
    let app = TestApp::new();

    let first = app
        .request(post_webhook(CHECKOUT_COMPLETED, Some(VALID_SIGNATURE)))
        .await;
    let second = app
        .request(post_webhook(CHECKOUT_COMPLETED, Some(VALID_SIGNATURE)))
        .await;

    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(second.status(), StatusCode::OK);
    assert_eq!(body_json(second).await["received"], true);
    assert_eq!(app.mailer.sent_count(), 1);
}

#[tokio::test]
async fn webhook_test_event_returns_verification_response() {
    let app = TestApp::new();
    let payload = CHECKOUT_COMPLETED.replace("evt_1OY1aBCdEfGhIjKl", "evt_test_webhook_check");

    let response = app.request(post_webhook(&payload, Some(VALID_SIGNATURE))).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["verified"], true);
    assert_eq!(app.mailer.sent_count(), 0);
}
