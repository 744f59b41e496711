//! Predict tab: manual feature entry, CSV upload and sample batches.
//!
//! SYSTEM CONTEXT
//! ==============
//! The page owns its `PredictorState` signal. When the page unmounts the
//! signal is disposed, and controllers still awaiting a response find their
//! handle gone and drop the result.

use contract::{CsvUpload, FeatureName};
use leptos::prelude::*;

use crate::components::batch_results::BatchResults;
use crate::components::csv_dropzone::CsvDropzone;
use crate::components::prediction_card::PredictionCard;
use crate::net::api::HttpApi;
use crate::state::predictor::{
    PredictionView, PredictorState, PredictorStatus, RequestKind, load_descriptions, load_sample, submit_file,
    submit_manual, submit_samples,
};
use crate::util::task::spawn_request;

#[cfg(test)]
#[path = "predictor_test.rs"]
mod predictor_test;

fn predict_label(state: &PredictorState) -> &'static str {
    match state.pending() {
        Some(RequestKind::Manual) => "Predicting...",
        _ => "Predict",
    }
}

fn field_label(name: FeatureName) -> String {
    let unit = name.unit();
    if unit.is_empty() {
        name.label().to_owned()
    } else {
        format!("{} ({unit})", name.label())
    }
}

#[component]
pub fn PredictorPage() -> impl IntoView {
    let api = expect_context::<HttpApi>();
    let predictor = RwSignal::new(PredictorState::default());

    spawn_request(&api, move |api| async move {
        load_descriptions(&api, &predictor).await;
    });

    let busy = Signal::derive(move || predictor.with(PredictorState::is_busy));

    let on_predict = {
        let api = api.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            spawn_request(&api, move |api| async move {
                submit_manual(&api, &predictor).await;
            });
        }
    };
    let on_load_sample = {
        let api = api.clone();
        move |_| {
            spawn_request(&api, move |api| async move {
                load_sample(&api, &predictor).await;
            });
        }
    };
    let on_samples = {
        let api = api.clone();
        move |_| {
            spawn_request(&api, move |api| async move {
                submit_samples(&api, &predictor).await;
            });
        }
    };
    let on_upload = Callback::new(move |upload: CsvUpload| {
        spawn_request(&api, move |api| async move {
            submit_file(&api, &predictor, upload).await;
        });
    });
    let on_reject = Callback::new(move |reason: String| predictor.update(|s| s.reject_file(&reason)));
    let on_reset = move |_| predictor.update(PredictorState::reset);

    let fields = FeatureName::ALL
        .into_iter()
        .map(|name| {
            let value = move || predictor.with(|s| s.form.get(name).to_owned());
            let title = move || predictor.with(|s| s.description_for(name).to_owned());
            let on_input = move |ev: leptos::ev::Event| {
                let text = event_target_value(&ev);
                predictor.update(|s| s.form.set(name, text));
            };
            view! {
                <label class="field" title=title>
                    <span class="field__label">{field_label(name)}</span>
                    <input
                        class="field__input"
                        type="text"
                        inputmode="decimal"
                        name=name.key()
                        prop:value=value
                        on:input=on_input
                    />
                </label>
            }
        })
        .collect_view();

    let result = move || {
        predictor.with(|s| match s.view() {
            Some(PredictionView::Single(result)) => view! { <PredictionCard result=result.clone()/> }.into_any(),
            Some(PredictionView::Batch(all)) => {
                let rows = s.batch_rows().into_iter().map(|(i, r)| (i, r.clone())).collect::<Vec<_>>();
                view! { <BatchResults total=all.len() rows=rows overflow=s.batch_overflow()/> }.into_any()
            }
            None => ().into_any(),
        })
    };

    view! {
        <div class="page predictor">
            <header class="page__header">
                <h2>"Exoplanet Prediction"</h2>
            </header>
            <div class="predictor__layout">
                <form class="panel predictor__form" on:submit=on_predict>
                    <h3 class="panel__title">"Manual Input"</h3>
                    <div class="predictor__fields">{fields}</div>
                    <div class="predictor__actions">
                        <button type="submit" class="btn btn--primary" prop:disabled=move || busy.get()>
                            {move || predictor.with(predict_label)}
                        </button>
                        <button
                            type="button"
                            class="btn"
                            on:click=on_load_sample
                            prop:disabled=move || predictor.with(|s| s.sample_loading)
                        >
                            "Load Sample"
                        </button>
                        <button type="button" class="btn" on:click=on_samples prop:disabled=move || busy.get()>
                            "Predict Samples"
                        </button>
                        <button type="button" class="btn btn--ghost" on:click=on_reset>
                            "Reset"
                        </button>
                    </div>
                </form>
                <div class="predictor__side">
                    <CsvDropzone
                        title="Batch Prediction"
                        hint="Drop a CSV file here or click to choose one"
                        disabled=busy
                        on_upload=on_upload
                        on_reject=on_reject
                    />
                    <Show when=move || predictor.with(|s| s.status() == PredictorStatus::Predicting)>
                        <p class="page__status">"Running prediction..."</p>
                    </Show>
                    {move || {
                        predictor
                            .with(|s| s.error().map(str::to_owned))
                            .map(|message| view! { <p class="page__status page__status--error">{message}</p> })
                    }}
                    {result}
                </div>
            </div>
        </div>
    }
}
