//! Home Page

use leptos::prelude::*;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="home">
            <header class="hero">
                <h1>"AI Automation Hub"</h1>
                <p class="tagline">"Automate your business in hours, not months"</p>
                <p class="subtitle">
                    "Ready-to-use automation blueprints, calculators, and proven workflows designed for solopreneurs and small teams."
                </p>
                <div class="cta">
                    <a href="/products" class="btn btn-primary">"Shop Products"</a>
                    <a href="/account" class="btn">"My Account"</a>
                </div>
            </header>

            <section class="features">
                <div class="feature">
                    <h3>"📦 Ready-made Templates"</h3>
                    <p>"Automation blueprints you can deploy today, no consultants required."</p>
                </div>
                <div class="feature">
                    <h3>"📈 Proven Workflows"</h3>
                    <p>"Email, support, and reporting flows refined with hundreds of solopreneurs."</p>
                </div>
                <div class="feature">
                    <h3>"🤝 Expert Guidance"</h3>
                    <p>"Premium members get weekly strategies and monthly group Q&A sessions."</p>
                </div>
            </section>
        </div>
    }
}
