//! Dashboard tab: headline metrics, feature importance and confusion matrix.
//!
//! SYSTEM CONTEXT
//! ==============
//! Reads through the shared `ModelCache`, so returning to this tab after a
//! visit shows the cached snapshot without a request. A stale snapshot (after
//! a settings save or retrain) stays visible while it is refetched.

use contract::ModelMetrics;
use leptos::prelude::*;

use crate::components::confusion_chart::ConfusionChart;
use crate::components::importance_chart::ImportanceChart;
use crate::components::metric_card::MetricCard;
use crate::net::api::HttpApi;
use crate::state::cache::{ModelCache, load_snapshot, refresh_snapshot};
use crate::util::format::{cv_summary, percent};
use crate::util::task::spawn_request;

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

/// What the dashboard body should show for a cache state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum DashboardView {
    Loading,
    Failed { retryable: bool },
    Ready { refreshing: bool },
}

fn dashboard_view(cache: &ModelCache) -> DashboardView {
    match cache.snapshot() {
        Some(_) => DashboardView::Ready {
            refreshing: cache.is_loading() || cache.is_stale(),
        },
        None if cache.is_loading() => DashboardView::Loading,
        None => match cache.last_error() {
            Some(err) => DashboardView::Failed {
                retryable: err.is_retryable(),
            },
            None => DashboardView::Loading,
        },
    }
}

/// Network drops and 5xx/429 answers may clear up on their own; anything
/// else usually means no trained model.
fn failure_message(retryable: bool) -> &'static str {
    if retryable {
        "Failed to load metrics. The service may be temporarily unavailable; press Refresh to try again."
    } else {
        "Failed to load metrics. Make sure the model is trained."
    }
}

fn metric_text(cache: &ModelCache, pick: impl Fn(&ModelMetrics) -> f64) -> String {
    cache.metrics().map_or_else(|| "-".to_owned(), |m| percent(pick(m), 2))
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let api = expect_context::<HttpApi>();
    let cache = expect_context::<RwSignal<ModelCache>>();

    spawn_request(&api, move |api| async move {
        load_snapshot(&api, &cache).await;
    });

    let on_refresh = move |_| {
        spawn_request(&api, move |api| async move {
            refresh_snapshot(&api, &cache).await;
        });
    };

    let view_state = Memo::new(move |_| cache.with(dashboard_view));
    let snapshot = Signal::derive(move || cache.with(|c| c.snapshot().cloned()));
    let matrix = Signal::derive(move || cache.with(|c| c.metrics().map(|m| m.confusion_matrix)));
    let accuracy = Signal::derive(move || cache.with(|c| metric_text(c, |m| m.accuracy)));
    let precision = Signal::derive(move || cache.with(|c| metric_text(c, |m| m.precision)));
    let recall = Signal::derive(move || cache.with(|c| metric_text(c, |m| m.recall)));
    let f1 = Signal::derive(move || cache.with(|c| metric_text(c, |m| m.f1_score)));
    let cv = Signal::derive(move || {
        cache.with(|c| c.metrics().map_or_else(|| "-".to_owned(), |m| cv_summary(m.cv_mean, m.cv_std)))
    });

    view! {
        <div class="page dashboard">
            <header class="page__header">
                <h2>"Model Performance"</h2>
                <button
                    class="btn"
                    on:click=on_refresh
                    prop:disabled=move || cache.with(ModelCache::is_loading)
                >
                    "Refresh"
                </button>
            </header>
            {move || match view_state.get() {
                DashboardView::Loading => view! { <p class="page__status">"Loading metrics..."</p> }.into_any(),
                DashboardView::Failed { retryable } => {
                    view! { <p class="page__status page__status--error">{failure_message(retryable)}</p> }.into_any()
                }
                DashboardView::Ready { refreshing } => {
                    view! {
                        <div class="dashboard__body">
                            {refreshing.then(|| view! { <p class="dashboard__refreshing">"Updating metrics..."</p> })}
                            <div class="dashboard__cards">
                                <MetricCard title="Accuracy" value=accuracy/>
                                <MetricCard title="Precision" value=precision/>
                                <MetricCard title="Recall" value=recall/>
                                <MetricCard title="F1 Score" value=f1/>
                                <MetricCard title="Cross-Validation" value=cv caption="mean ± std"/>
                            </div>
                            <div class="dashboard__charts">
                                <ImportanceChart snapshot=snapshot/>
                                <ConfusionChart matrix=matrix/>
                            </div>
                        </div>
                    }
                        .into_any()
                }
            }}
        </div>
    }
}
