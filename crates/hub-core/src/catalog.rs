//! Product Catalog
//!
//! All purchasable items are defined here for centralized management.
//! Prices are integer minor-currency units (3900 = $39.00) so monetary
//! amounts never touch floating point.

use serde::{Deserialize, Serialize};

/// Whether a product is purchased once or billed on a schedule
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductKind {
    #[serde(rename = "one-time")]
    OneTime,
    #[serde(rename = "subscription")]
    Subscription,
}

/// Billing interval for subscription products
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingInterval {
    Month,
    Year,
}

impl BillingInterval {
    pub fn as_str(&self) -> &'static str {
        match self {
            BillingInterval::Month => "month",
            BillingInterval::Year => "year",
        }
    }
}

/// A purchasable item
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Product {
    /// Stable string id, referenced by checkout requests and webhooks
    pub id: String,

    /// Display name
    pub name: String,

    /// Display description, also sent to the payment platform
    pub description: String,

    /// One-time purchase or subscription
    #[serde(rename = "type")]
    pub kind: ProductKind,

    /// Unit price in minor currency units
    pub price: i64,

    /// Lowercase ISO currency code ("usd")
    pub currency: String,

    /// Billing interval, present for subscriptions only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<BillingInterval>,

    /// Ordered feature list for display
    pub features: Vec<String>,
}

impl Product {
    /// Human-readable price ("$39.00" or "$29.00/month")
    pub fn display_price(&self) -> String {
        format!(
            "{}{}",
            format_price(self.price, &self.currency),
            interval_label(self.interval)
        )
    }
}

/// The deploy-time product catalog
#[derive(Clone, Debug)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// The built-in catalog: three one-time products, four subscriptions
    pub fn builtin() -> Self {
        Self {
            products: builtin_products(),
        }
    }

    /// Look up a product by id
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// One-time purchase products, in catalog order
    pub fn one_time(&self) -> impl Iterator<Item = &Product> {
        self.products
            .iter()
            .filter(|p| p.kind == ProductKind::OneTime)
    }

    /// Subscription products, in catalog order
    pub fn subscriptions(&self) -> impl Iterator<Item = &Product> {
        self.products
            .iter()
            .filter(|p| p.kind == ProductKind::Subscription)
    }

    /// Every product, in catalog order
    pub fn all(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }
}

/// Format minor currency units for display
pub fn format_price(minor_units: i64, currency: &str) -> String {
    let whole = minor_units / 100;
    let cents = (minor_units % 100).abs();
    match currency {
        "usd" => format!("${}.{:02}", whole, cents),
        other => format!("{}.{:02} {}", whole, cents, other.to_uppercase()),
    }
}

/// Suffix label for a billing interval ("/month", "/year", or empty)
pub fn interval_label(interval: Option<BillingInterval>) -> &'static str {
    match interval {
        Some(BillingInterval::Month) => "/month",
        Some(BillingInterval::Year) => "/year",
        None => "",
    }
}

fn one_time(id: &str, name: &str, description: &str, price: i64, features: &[&str]) -> Product {
    Product {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        kind: ProductKind::OneTime,
        price,
        currency: "usd".into(),
        interval: None,
        features: features.iter().map(|f| (*f).into()).collect(),
    }
}

fn subscription(
    id: &str,
    name: &str,
    description: &str,
    price: i64,
    interval: BillingInterval,
    features: &[&str],
) -> Product {
    Product {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        kind: ProductKind::Subscription,
        price,
        currency: "usd".into(),
        interval: Some(interval),
        features: features.iter().map(|f| (*f).into()).collect(),
    }
}

fn builtin_products() -> Vec<Product> {
    vec![
        one_time(
            "product_starter_pack",
            "Solopreneur Automation Starter Pack",
            "Get started with 5 ready-to-use automation templates, email workflow setup guide, and customer support automation blueprint.",
            3900,
            &[
                "5 ready-to-use automation templates",
                "Email workflow setup guide",
                "Customer support automation blueprint",
                "Quick-start video walkthrough",
                "Lifetime access to updates",
            ],
        ),
        one_time(
            "product_support_blueprint",
            "Customer Support Automation Blueprint",
            "Complete guide to automating customer support with pre-built templates for Zendesk, Intercom, and Help Scout.",
            5900,
            &[
                "Step-by-step implementation guide (2000+ words)",
                "Pre-built templates for 3 major platforms",
                "Integration guide with popular CRM systems",
                "Email response automation templates",
                "Lifetime access to updates",
            ],
        ),
        one_time(
            "product_data_management",
            "Data Management & Reporting Automation",
            "Master database setup and automated reporting with integration guides for Google Sheets, Airtable, and Notion.",
            5900,
            &[
                "Database setup and organization guide",
                "Automated reporting templates",
                "Integration with Google Sheets, Airtable, Notion",
                "Monthly reporting dashboard setup",
                "Lifetime access to updates",
            ],
        ),
        subscription(
            "product_premium_monthly",
            "Premium Membership - Monthly",
            "Get monthly access to all premium guides, templates, and exclusive automation resources.",
            2900,
            BillingInterval::Month,
            &[
                "Access to all premium guides and templates",
                "Weekly automation tips and strategies",
                "Monthly group Q&A sessions",
                "Priority email support",
                "Early access to new resources",
            ],
        ),
        subscription(
            "product_premium_yearly",
            "Premium Membership - Yearly",
            "Get yearly access to all premium guides, templates, and exclusive automation resources with 2 months free.",
            29900,
            BillingInterval::Year,
            &[
                "Access to all premium guides and templates",
                "Weekly automation tips and strategies",
                "Monthly group Q&A sessions",
                "Priority email support",
                "Early access to new resources",
                "2 months free (save $58)",
            ],
        ),
        subscription(
            "product_pro_monthly",
            "Pro Membership - Monthly",
            "Advanced automation strategies, 1-on-1 consulting calls, and custom workflow design.",
            9900,
            BillingInterval::Month,
            &[
                "Everything in Premium",
                "Two 30-minute 1-on-1 consulting calls per month",
                "Custom workflow design assistance",
                "Access to private community",
                "Dedicated Slack channel",
            ],
        ),
        subscription(
            "product_pro_yearly",
            "Pro Membership - Yearly",
            "Advanced automation strategies, 1-on-1 consulting calls, and custom workflow design with 2 months free.",
            99900,
            BillingInterval::Year,
            &[
                "Everything in Premium",
                "Two 30-minute 1-on-1 consulting calls per month",
                "Custom workflow design assistance",
                "Access to private community",
                "Dedicated Slack channel",
                "2 months free (save $198)",
            ],
        ),
    ]
}
