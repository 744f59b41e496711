//! Horizontal bars for the heaviest features.

use contract::MetricsSnapshot;
use leptos::prelude::*;

use crate::util::charts::{IMPORTANCE_BAR_LIMIT, importance_bars};
use crate::util::format::percent;

#[component]
pub fn ImportanceChart(#[prop(into)] snapshot: Signal<Option<MetricsSnapshot>>) -> impl IntoView {
    let bars = move || {
        snapshot.with(|s| {
            s.as_ref()
                .map(|s| importance_bars(s, IMPORTANCE_BAR_LIMIT))
                .unwrap_or_default()
        })
    };

    view! {
        <section class="panel importance-chart">
            <h3 class="panel__title">"Top Feature Importance"</h3>
            <Show
                when=move || !bars().is_empty()
                fallback=|| view! { <p class="panel__empty">"No feature importance reported."</p> }
            >
                <ul class="importance-chart__bars">
                    {move || {
                        bars()
                            .into_iter()
                            .map(|bar| {
                                let style = format!("width: {:.1}%", bar.width);
                                view! {
                                    <li class="importance-chart__row">
                                        <span class="importance-chart__label">{bar.label}</span>
                                        <span class="importance-chart__track">
                                            <span class="importance-chart__bar" style=style></span>
                                        </span>
                                        <span class="importance-chart__value">{percent(bar.weight, 1)}</span>
                                    </li>
                                }
                            })
                            .collect_view()
                    }}
                </ul>
            </Show>
        </section>
    }
}
