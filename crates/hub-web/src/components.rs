//! UI Components

use leptos::prelude::*;

use crate::api::{self, Product};

/// Product card with price, feature list, and a checkout button
#[component]
pub fn ProductCard(product: Product) -> impl IntoView {
    let label = if product.kind == "subscription" {
        "Subscribe"
    } else {
        "Buy Now"
    };

    let product_id = product.id.clone();
    let checkout = move |_| {
        let product_id = product_id.clone();
        leptos::task::spawn_local(async move {
            if let Ok(url) = api::create_checkout(&product_id).await {
                if let Some(window) = web_sys::window() {
                    let _ = window.location().set_href(&url);
                }
            }
        });
    };

    view! {
        <div class="product-card">
            <h3>{product.name.clone()}</h3>
            <div class="price">{product.display_price()}</div>
            <p class="description">{product.description.clone()}</p>
            <ul class="features">
                {product
                    .features
                    .iter()
                    .map(|feature| view! { <li>{feature.clone()}</li> })
                    .collect_view()}
            </ul>
            <button class="btn btn-primary" on:click=checkout>
                {label}
            </button>
        </div>
    }
}
