//! Checkout Success Page

use leptos::prelude::*;

/// The checkout session id from the `session_id` query parameter
fn session_id_from_url() -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    search
        .trim_start_matches('?')
        .split('&')
        .find_map(|pair| pair.strip_prefix("session_id="))
        .map(str::to_string)
}

#[component]
pub fn SuccessPage() -> impl IntoView {
    let session_id = session_id_from_url();

    view! {
        <div class="success">
            <div class="success-icon">"✓"</div>
            <h1>"Payment Successful!"</h1>
            <p>"Thank you for your purchase. Your order has been confirmed."</p>

            {session_id
                .map(|id| {
                    view! {
                        <div class="order-ref">
                            <span class="label">"Order ID"</span>
                            <code>{id}</code>
                        </div>
                    }
                })}

            <p class="hint">"Check your email for your receipt and next steps."</p>

            <div class="cta">
                <a href="/account" class="btn btn-primary">"Go to My Account"</a>
                <a href="/products" class="btn">"Continue Shopping"</a>
            </div>
        </div>
    }
}
