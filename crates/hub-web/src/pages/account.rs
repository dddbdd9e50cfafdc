//! Account Page

use leptos::prelude::*;

use crate::api::{self, Payment};

#[component]
pub fn AccountPage() -> impl IntoView {
    let subscription = RwSignal::new(None::<serde_json::Value>);
    let payments = RwSignal::new(Vec::<Payment>::new());
    let load_error = RwSignal::new(None::<String>);

    leptos::task::spawn_local(async move {
        match api::subscription_status().await {
            Ok(status) => subscription.set(Some(status)),
            Err(e) => load_error.set(Some(e)),
        }

        if let Ok(history) = api::payment_history().await {
            payments.set(history);
        }
    });

    let open_portal = move |_| {
        leptos::task::spawn_local(async move {
            if let Ok(url) = api::manage_subscription().await {
                if let Some(window) = web_sys::window() {
                    let _ = window.location().set_href(&url);
                }
            }
        });
    };

    view! {
        <div class="account">
            <a href="/" class="back-link">"← Back to Home"</a>
            <h1>"My Account"</h1>

            {move || {
                load_error
                    .get()
                    .map(|e| view! { <p class="error">"Sign in to view your account: " {e}</p> })
            }}

            <section class="subscription">
                <h2>"Subscription"</h2>
                {move || {
                    let has_subscription = subscription
                        .get()
                        .is_some_and(|s| s["hasSubscription"] == true);
                    if has_subscription {
                        view! {
                            <div>
                                <p>"Your membership is active."</p>
                                <button class="btn btn-primary" on:click=open_portal>
                                    "Manage Subscription"
                                </button>
                            </div>
                        }
                            .into_any()
                    } else {
                        view! {
                            <div>
                                <p>"No active membership."</p>
                                <a href="/products" class="btn">"Browse Memberships"</a>
                            </div>
                        }
                            .into_any()
                    }
                }}
            </section>

            <section class="history">
                <h2>"Payment History"</h2>
                {move || {
                    let history = payments.get();
                    if history.is_empty() {
                        view! { <p class="empty">"No payments yet."</p> }.into_any()
                    } else {
                        view! {
                            <ul class="payments">
                                {history
                                    .iter()
                                    .map(|payment| {
                                        let amount = format!(
                                            "${}.{:02}",
                                            payment.amount / 100,
                                            payment.amount % 100,
                                        );
                                        let description = payment
                                            .description
                                            .clone()
                                            .unwrap_or_else(|| "Purchase".into());
                                        view! {
                                            <li class="payment">
                                                <span class="description">{description}</span>
                                                <span class="amount">{amount}</span>
                                                <span class="status">{payment.status.clone()}</span>
                                            </li>
                                        }
                                    })
                                    .collect_view()}
                            </ul>
                        }
                            .into_any()
                    }
                }}
            </section>
        </div>
    }
}
