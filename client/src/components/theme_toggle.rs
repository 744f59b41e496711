//! Light/dark switch in the header.

use leptos::prelude::*;

use crate::state::ui::UiState;
use crate::util::theme;

#[component]
pub fn ThemeToggle() -> impl IntoView {
    let ui = expect_context::<RwSignal<UiState>>();

    let on_toggle = move |_| {
        let next = theme::toggle(ui.get_untracked().theme);
        ui.update(|u| u.theme = next);
    };
    let icon = move || if ui.get().theme.is_dark() { "☀" } else { "☾" };
    let title = move || {
        if ui.get().theme.is_dark() {
            "Switch to light mode"
        } else {
            "Switch to dark mode"
        }
    };

    view! {
        <button class="btn btn--icon theme-toggle" title=title on:click=on_toggle>
            {icon}
        </button>
    }
}
