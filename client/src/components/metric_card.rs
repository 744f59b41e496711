//! Single headline metric.

use leptos::prelude::*;

#[component]
pub fn MetricCard(
    #[prop(into)] title: String,
    #[prop(into)] value: Signal<String>,
    #[prop(optional, into)] caption: Option<String>,
) -> impl IntoView {
    view! {
        <div class="metric-card">
            <span class="metric-card__title">{title}</span>
            <span class="metric-card__value">{move || value.get()}</span>
            {caption.map(|text| view! { <span class="metric-card__caption">{text}</span> })}
        </div>
    }
}
