//! Settings tab: hyperparameter editing and model retraining.
//!
//! SYSTEM CONTEXT
//! ==============
//! Saved hyperparameters only reach the live model on the next retrain, so
//! the page keeps a "pending apply" notice up between a successful save and a
//! successful retrain. Both mutations invalidate the shared metrics cache.

use contract::CsvUpload;
use leptos::prelude::*;

use crate::components::csv_dropzone::CsvDropzone;
use crate::net::api::HttpApi;
use crate::state::cache::ModelCache;
use crate::state::settings::{
    Knob, ModelFamily, RetrainStatus, SettingsState, load_settings, retrain_model, save_hyperparameters,
};
use crate::util::format::percent;
use crate::util::task::spawn_request;

#[cfg(test)]
#[path = "settings_test.rs"]
mod settings_test;

fn retrain_label(status: &RetrainStatus) -> &'static str {
    match status {
        RetrainStatus::Retraining => "Retraining...",
        _ => "Retrain Model",
    }
}

fn current_accuracy(cache: &ModelCache) -> String {
    cache.metrics().map_or_else(
        || "Current accuracy unavailable".to_owned(),
        |m| format!("Current accuracy: {}", percent(m.accuracy, 2)),
    )
}

#[component]
fn KnobField(knob: Knob, settings: RwSignal<SettingsState>) -> impl IntoView {
    let value = move || settings.with(|s| s.form.get(knob).to_owned());
    let on_input = move |ev: leptos::ev::Event| {
        let text = event_target_value(&ev);
        settings.update(|s| s.edit(knob, text));
    };

    view! {
        <label class="field">
            <span class="field__label">{knob.label()}</span>
            <input
                class="field__input"
                type="number"
                min="0"
                step=knob.step()
                name=knob.key()
                prop:value=value
                on:input=on_input
            />
            <span class="field__help">{knob.help()}</span>
        </label>
    }
}

#[component]
pub fn SettingsPage() -> impl IntoView {
    let api = expect_context::<HttpApi>();
    let cache = expect_context::<RwSignal<ModelCache>>();
    let settings = RwSignal::new(SettingsState::new());
    let training_file = RwSignal::new(None::<CsvUpload>);

    spawn_request(&api, move |api| async move {
        load_settings(&api, &settings, &cache).await;
    });

    let busy = Signal::derive(move || settings.with(SettingsState::is_busy));

    let on_save = {
        let api = api.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            spawn_request(&api, move |api| async move {
                save_hyperparameters(&api, &settings, &cache).await;
            });
        }
    };
    let on_retrain = move |_| {
        let upload = training_file.get_untracked();
        spawn_request(&api, move |api| async move {
            retrain_model(&api, &settings, &cache, upload).await;
        });
    };
    let on_revert = move |_| settings.update(SettingsState::revert);
    let on_dismiss = move |_| settings.update(SettingsState::acknowledge);
    let on_training_file = Callback::new(move |upload: CsvUpload| training_file.set(Some(upload)));
    let on_training_reject = Callback::new(move |reason: String| {
        log::warn!("training file rejected: {reason}");
        training_file.set(None);
    });
    let on_clear_file = move |_| training_file.set(None);

    let family_section = move |family: ModelFamily| {
        view! {
            <fieldset class="panel settings__family">
                <legend class="panel__title">{family.title()}</legend>
                {family
                    .knobs()
                    .iter()
                    .map(|knob| view! { <KnobField knob=*knob settings=settings/> })
                    .collect_view()}
            </fieldset>
        }
    };

    view! {
        <div class="page settings">
            <header class="page__header">
                <h2>"Model Settings"</h2>
                <span class="settings__accuracy">{move || cache.with(current_accuracy)}</span>
            </header>
            <Show when=move || settings.with(SettingsState::pending_apply)>
                <p class="page__status page__status--pending">
                    "Saved hyperparameters take effect after the next retrain."
                </p>
            </Show>
            <form class="settings__form" on:submit=on_save>
                {family_section(ModelFamily::RandomForest)}
                {family_section(ModelFamily::XgBoost)}
                <div class="settings__actions">
                    <button type="submit" class="btn btn--primary" prop:disabled=move || busy.get()>
                        {move || if settings.with(SettingsState::is_saving) { "Saving..." } else { "Save Hyperparameters" }}
                    </button>
                    <button
                        type="button"
                        class="btn btn--ghost"
                        on:click=on_revert
                        prop:disabled=move || !settings.with(SettingsState::is_edited)
                    >
                        "Revert"
                    </button>
                </div>
            </form>
            <section class="panel settings__retrain">
                <h3 class="panel__title">"Retrain"</h3>
                <p>"Retraining applies the saved hyperparameters. Optionally upload new training data."</p>
                <CsvDropzone
                    title="Training Data (optional)"
                    hint="Drop a labelled CSV file here or click to choose one"
                    disabled=busy
                    on_upload=on_training_file
                    on_reject=on_training_reject
                />
                {move || {
                    training_file
                        .with(|f| f.as_ref().map(|f| f.file_name.clone()))
                        .map(|name| {
                            view! {
                                <p class="settings__file">
                                    {name}
                                    <button type="button" class="btn btn--ghost" on:click=on_clear_file>
                                        "Remove"
                                    </button>
                                </p>
                            }
                        })
                }}
                <button class="btn btn--primary" on:click=on_retrain prop:disabled=move || busy.get()>
                    {move || settings.with(|s| retrain_label(s.retrain_status()))}
                </button>
                <Show when=move || settings.with(|s| *s.retrain_status() == RetrainStatus::Retraining)>
                    <p class="page__status">"Training in progress. This can take a minute."</p>
                </Show>
            </section>
            {move || {
                settings
                    .with(|s| s.notice().cloned())
                    .map(|notice| {
                        let class = if notice.success {
                            "notice notice--success"
                        } else {
                            "notice notice--error"
                        };
                        view! {
                            <div class=class>
                                <span>{notice.text}</span>
                                <button type="button" class="btn btn--ghost" on:click=on_dismiss>
                                    "Dismiss"
                                </button>
                            </div>
                        }
                    })
            }}
        </div>
    }
}
