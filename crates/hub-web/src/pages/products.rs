//! Products Page

use leptos::prelude::*;

use crate::api::{self, ProductsResponse};
use crate::components::ProductCard;

#[component]
pub fn ProductsPage() -> impl IntoView {
    let products = RwSignal::new(None::<ProductsResponse>);
    let load_error = RwSignal::new(None::<String>);

    leptos::task::spawn_local(async move {
        match api::fetch_products().await {
            Ok(response) => products.set(Some(response)),
            Err(e) => load_error.set(Some(e)),
        }
    });

    view! {
        <div class="products">
            <a href="/" class="back-link">"← Back to Home"</a>
            <h1>"Products & Memberships"</h1>
            <p class="subtitle">"One-time digital products and recurring memberships"</p>

            {move || {
                load_error
                    .get()
                    .map(|e| view! { <p class="error">"Failed to load products: " {e}</p> })
            }}

            {move || {
                products
                    .get()
                    .map(|catalog| {
                        view! {
                            <section>
                                <h2>"Digital Products"</h2>
                                <div class="product-grid">
                                    {catalog
                                        .one_time
                                        .iter()
                                        .map(|product| {
                                            view! { <ProductCard product=product.clone() /> }
                                        })
                                        .collect_view()}
                                </div>
                            </section>
                            <section>
                                <h2>"Memberships"</h2>
                                <div class="product-grid">
                                    {catalog
                                        .subscriptions
                                        .iter()
                                        .map(|product| {
                                            view! { <ProductCard product=product.clone() /> }
                                        })
                                        .collect_view()}
                                </div>
                            </section>
                        }
                    })
            }}
        </div>
    }
}
