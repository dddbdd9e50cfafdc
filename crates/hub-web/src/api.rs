//! API Client

use serde::{Deserialize, Serialize};

/// A catalog product as served by the backend
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub price: i64,
    pub currency: String,
    #[serde(default)]
    pub interval: Option<String>,
    pub features: Vec<String>,
}

impl Product {
    /// Display price ("$39.00" or "$29.00/month")
    pub fn display_price(&self) -> String {
        let suffix = match self.interval.as_deref() {
            Some("month") => "/month",
            Some("year") => "/year",
            _ => "",
        };
        format!("${}.{:02}{}", self.price / 100, self.price % 100, suffix)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductsResponse {
    pub one_time: Vec<Product>,
    pub subscriptions: Vec<Product>,
}

/// A past payment for the account page
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    pub status: String,
    pub created: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub receipt_url: Option<String>,
}

fn session_token() -> Option<String> {
    web_sys::window()?
        .local_storage()
        .ok()??
        .get_item("session_token")
        .ok()?
}

fn authorized(builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
    match session_token() {
        Some(token) => builder.header("authorization", format!("Bearer {}", token)),
        None => builder,
    }
}

/// Fetch the product catalog
pub async fn fetch_products() -> Result<ProductsResponse, String> {
    let response = reqwest::Client::new()
        .get("/api/products")
        .send()
        .await
        .map_err(|e| e.to_string())?;

    response.json().await.map_err(|e| e.to_string())
}

/// Create a checkout session and return the redirect URL
pub async fn create_checkout(product_id: &str) -> Result<String, String> {
    let body = serde_json::json!({ "productId": product_id });

    let response = authorized(reqwest::Client::new().post("/api/checkout"))
        .json(&body)
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if response.status().is_success() {
        let data: serde_json::Value = response.json().await.map_err(|e| e.to_string())?;
        Ok(data["checkoutUrl"].as_str().unwrap_or("").to_string())
    } else {
        let data: serde_json::Value = response.json().await.unwrap_or_default();
        Err(data["error"].as_str().unwrap_or("Checkout failed").to_string())
    }
}

/// Create a billing portal session and return the redirect URL
pub async fn manage_subscription() -> Result<String, String> {
    let response = authorized(reqwest::Client::new().post("/api/manage-subscription"))
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if response.status().is_success() {
        let data: serde_json::Value = response.json().await.map_err(|e| e.to_string())?;
        Ok(data["portalUrl"].as_str().unwrap_or("").to_string())
    } else {
        Err("Failed to open billing portal".into())
    }
}

/// Fetch the current subscription status as raw JSON
pub async fn subscription_status() -> Result<serde_json::Value, String> {
    let response = authorized(reqwest::Client::new().get("/api/subscription-status"))
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if response.status().is_success() {
        response.json().await.map_err(|e| e.to_string())
    } else {
        Err("Failed to load subscription status".into())
    }
}

/// Fetch payment history
pub async fn payment_history() -> Result<Vec<Payment>, String> {
    let response = authorized(reqwest::Client::new().get("/api/payment-history"))
        .send()
        .await
        .map_err(|e| e.to_string())?;

    if response.status().is_success() {
        let data: serde_json::Value = response.json().await.map_err(|e| e.to_string())?;
        serde_json::from_value(data["payments"].clone()).map_err(|e| e.to_string())
    } else {
        Err("Failed to load payment history".into())
    }
}
