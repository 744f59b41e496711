//! About tab: project summary, method, and live service status.

use contract::{FeatureName, PredictionApi};
use leptos::prelude::*;

use crate::net::api::HttpApi;
use crate::util::task::spawn_request;

#[cfg(test)]
#[path = "about_test.rs"]
mod about_test;

const HIGHLIGHTS: [(&str, &str); 4] = [
    (
        "Ensemble model",
        "Random Forest and XGBoost vote together and report a confidence with every prediction.",
    ),
    (
        "Mission data",
        "Trained on Kepler Objects of Interest with the same measurements astronomers use.",
    ),
    (
        "Batch scoring",
        "Upload a CSV of candidates and score every row in one request.",
    ),
    (
        "Retrainable",
        "Tune hyperparameters or upload new labelled data, then retrain from the Settings tab.",
    ),
];

const STEPS: [(&str, &str); 4] = [
    (
        "Transit detection",
        "A planet crossing its star dims the light slightly; the dip's shape is measured.",
    ),
    (
        "Feature extraction",
        "Twelve transit and stellar parameters describe each candidate.",
    ),
    (
        "Classification",
        "The ensemble separates confirmed planets from false positives learned from labelled examples.",
    ),
    (
        "Confidence scoring",
        "Class probabilities help decide which candidates merit follow-up observation.",
    ),
];

/// Service status line for a health probe outcome.
fn status_line(outcome: Option<Result<String, String>>) -> (&'static str, String) {
    match outcome {
        None => ("status status--pending", "Checking service...".to_owned()),
        Some(Ok(status)) => ("status status--ok", format!("Service {status}")),
        Some(Err(reason)) => ("status status--down", format!("Service unreachable: {reason}")),
    }
}

#[component]
pub fn AboutPage() -> impl IntoView {
    let api = expect_context::<HttpApi>();
    let health = RwSignal::new(None::<Result<String, String>>);

    spawn_request(&api, move |api| async move {
        let outcome = match api.health().await {
            Ok(status) => Ok(status.status),
            Err(err) => {
                log::warn!("health check failed: {err}");
                Err(err.to_string())
            }
        };
        let _ = health.try_set(Some(outcome));
    });

    let base = api.base().to_owned();

    view! {
        <div class="page about">
            <section class="panel">
                <h2 class="panel__title">"Exoplanet Candidate Classifier"</h2>
                <p>
                    "Thousands of transit signals in space telescope data still await vetting. "
                    "This dashboard puts a trained classifier behind a simple interface so candidates "
                    "can be scored in seconds instead of weeks of manual review."
                </p>
                <p class="about__service">
                    {move || {
                        let (class, text) = status_line(health.get());
                        view! { <span class=class>{text}</span> }
                    }}
                    " at " <code>{base}</code>
                </p>
            </section>
            <div class="about__highlights">
                {HIGHLIGHTS
                    .iter()
                    .map(|(title, body)| {
                        view! {
                            <article class="panel">
                                <h3 class="panel__title">{*title}</h3>
                                <p>{*body}</p>
                            </article>
                        }
                    })
                    .collect_view()}
            </div>
            <section class="panel">
                <h3 class="panel__title">"How it works"</h3>
                <ol class="about__steps">
                    {STEPS
                        .iter()
                        .map(|(title, body)| view! { <li><strong>{*title}</strong> ": " {*body}</li> })
                        .collect_view()}
                </ol>
            </section>
            <section class="panel">
                <h3 class="panel__title">"Input features"</h3>
                <dl class="about__features">
                    {FeatureName::ALL
                        .iter()
                        .map(|name| {
                            view! {
                                <dt><code>{name.key()}</code></dt>
                                <dd>{name.description()}</dd>
                            }
                        })
                        .collect_view()}
                </dl>
            </section>
        </div>
    }
}
