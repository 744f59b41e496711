//! Drag-and-drop target plus file picker for CSV files.
//!
//! The component reads the chosen file itself and hands the parent either a
//! ready [`CsvUpload`] or the reason the file was refused.

use contract::CsvUpload;
use leptos::prelude::*;

#[component]
pub fn CsvDropzone(
    #[prop(into)] title: String,
    #[prop(into)] hint: String,
    #[prop(into)] disabled: Signal<bool>,
    on_upload: Callback<CsvUpload>,
    on_reject: Callback<String>,
) -> impl IntoView {
    let dragging = RwSignal::new(false);
    #[cfg(not(feature = "hydrate"))]
    let _ = (on_upload, on_reject);

    let on_dragover = move |ev: leptos::ev::DragEvent| {
        ev.prevent_default();
        if !disabled.get_untracked() {
            dragging.set(true);
        }
    };
    let on_dragleave = move |_| dragging.set(false);
    let on_drop = move |ev: leptos::ev::DragEvent| {
        ev.prevent_default();
        dragging.set(false);
        if disabled.get_untracked() {
            return;
        }
        #[cfg(feature = "hydrate")]
        {
            if let Some(file) = crate::util::upload::dropped_file(&ev) {
                forward(file, on_upload, on_reject);
            }
        }
    };
    let on_change = move |ev: leptos::ev::Event| {
        #[cfg(feature = "hydrate")]
        {
            let input: web_sys::HtmlInputElement = event_target(&ev);
            if let Some(file) = crate::util::upload::selected_file(&input) {
                forward(file, on_upload, on_reject);
            }
            input.set_value("");
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = ev;
        }
    };

    let class = move || {
        let mut class = String::from("dropzone");
        if dragging.get() {
            class.push_str(" dropzone--active");
        }
        if disabled.get() {
            class.push_str(" dropzone--disabled");
        }
        class
    };

    view! {
        <label class=class on:dragover=on_dragover on:dragleave=on_dragleave on:drop=on_drop>
            <input
                type="file"
                accept=".csv,text/csv"
                class="dropzone__input"
                prop:disabled=move || disabled.get()
                on:change=on_change
            />
            <span class="dropzone__title">{title}</span>
            <span class="dropzone__hint">{hint}</span>
        </label>
    }
}

#[cfg(feature = "hydrate")]
fn forward(file: web_sys::File, on_upload: Callback<CsvUpload>, on_reject: Callback<String>) {
    leptos::task::spawn_local(async move {
        match crate::util::upload::read_csv(file).await {
            Ok(upload) => on_upload.run(upload),
            Err(err) => on_reject.run(err.to_string()),
        }
    });
}
