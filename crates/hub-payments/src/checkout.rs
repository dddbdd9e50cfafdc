//! Checkout Intent Construction
//!
//! Builds the platform-neutral description of a checkout session from a
//! catalog product and an authenticated user. The mode is derived
//! deterministically from the product kind, and the user's identity rides
//! along as opaque session metadata so the webhook dispatcher can correlate
//! a completed checkout back to a local user without any session table.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use hub_core::{AuthUser, BillingInterval, Product, ProductKind};

/// Session mode, derived from the product kind
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutMode {
    /// Single payment for a one-time product
    Payment,
    /// Recurring billing for a subscription product
    Subscription,
}

/// The single line item of a checkout session
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemSpec {
    pub name: String,
    pub description: String,
    /// Minor currency units
    pub unit_amount: i64,
    /// Lowercase ISO currency code
    pub currency: String,
    /// Present when the product bills on a schedule
    pub recurring: Option<BillingInterval>,
    pub quantity: u64,
}

/// Everything the platform needs to mint a hosted checkout session
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CheckoutIntent {
    pub mode: CheckoutMode,
    pub line_item: LineItemSpec,
    pub success_url: String,
    pub cancel_url: String,
    pub customer_email: String,
    pub client_reference_id: String,
    pub metadata: HashMap<String, String>,
    pub allow_promotion_codes: bool,
}

impl CheckoutIntent {
    /// Build the intent for one product and user. `origin` is the site
    /// origin the browser should be redirected back to.
    pub fn for_product(product: &Product, user: &AuthUser, origin: &str) -> Self {
        let mode = match product.kind {
            ProductKind::OneTime => CheckoutMode::Payment,
            ProductKind::Subscription => CheckoutMode::Subscription,
        };

        let mut metadata = HashMap::new();
        metadata.insert("user_id".to_string(), user.id.to_string());
        metadata.insert("customer_email".to_string(), user.email.clone());
        metadata.insert("customer_name".to_string(), user.display_name().to_string());
        metadata.insert("product_id".to_string(), product.id.clone());

        Self {
            mode,
            line_item: LineItemSpec {
                name: product.name.clone(),
                description: product.description.clone(),
                unit_amount: product.price,
                currency: product.currency.clone(),
                recurring: product.interval,
                quantity: 1,
            },
            success_url: format!("{}/success?session_id={{CHECKOUT_SESSION_ID}}", origin),
            cancel_url: format!("{}/products", origin),
            customer_email: user.email.clone(),
            client_reference_id: user.id.to_string(),
            metadata,
            allow_promotion_codes: true,
        }
    }
}

/// Result of creating a checkout session
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Opaque platform-issued session id
    pub id: String,

    /// Hosted checkout page URL to redirect the user to
    pub url: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use hub_core::Catalog;

    fn demo_user() -> AuthUser {
        AuthUser::new(7, "demo@automationhub.dev", Some("Demo User".into()))
    }

    #[test]
    fn test_one_time_product_yields_payment_mode() {
        let catalog = Catalog::builtin();
        let product = catalog.get("product_starter_pack").unwrap();

        let intent = CheckoutIntent::for_product(product, &demo_user(), "https://hub.example");

        assert_eq!(intent.mode, CheckoutMode::Payment);
        assert_eq!(intent.line_item.unit_amount, 3900);
        assert_eq!(intent.line_item.currency, "usd");
        assert_eq!(intent.line_item.quantity, 1);
        assert!(intent.line_item.recurring.is_none());
    }

    #[test]
    fn test_subscription_product_yields_subscription_mode() {
        let catalog = Catalog::builtin();
        let product = catalog.get("product_premium_yearly").unwrap();

        let intent = CheckoutIntent::for_product(product, &demo_user(), "https://hub.example");

        assert_eq!(intent.mode, CheckoutMode::Subscription);
        assert_eq!(intent.line_item.unit_amount, 29900);
        assert_eq!(intent.line_item.recurring, Some(BillingInterval::Year));
    }

    #[test]
    fn test_metadata_correlates_user_and_product() {
        let catalog = Catalog::builtin();
        let product = catalog.get("product_premium_monthly").unwrap();

        let intent = CheckoutIntent::for_product(product, &demo_user(), "https://hub.example");

        assert_eq!(intent.metadata["user_id"], "7");
        assert_eq!(intent.metadata["customer_email"], "demo@automationhub.dev");
        assert_eq!(intent.metadata["customer_name"], "Demo User");
        assert_eq!(intent.metadata["product_id"], "product_premium_monthly");
        assert_eq!(intent.client_reference_id, "7");
    }

    #[test]
    fn test_redirect_urls_derive_from_origin() {
        let catalog = Catalog::builtin();
        let product = catalog.get("product_starter_pack").unwrap();

        let intent = CheckoutIntent::for_product(product, &demo_user(), "https://hub.example");

        assert_eq!(
            intent.success_url,
            "https://hub.example/success?session_id={CHECKOUT_SESSION_ID}"
        );
        assert_eq!(intent.cancel_url, "https://hub.example/products");
    }

    #[test]
    fn test_name_fallback_in_metadata() {
        let catalog = Catalog::builtin();
        let product = catalog.get("product_starter_pack").unwrap();
        let user = AuthUser::new(8, "solo@automationhub.dev", None);

        let intent = CheckoutIntent::for_product(product, &user, "https://hub.example");

        assert_eq!(intent.metadata["customer_name"], "Customer");
    }
}
