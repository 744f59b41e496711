//! Header navigation between the four top-level tabs.

use leptos::prelude::*;
use leptos_router::hooks::use_location;

use crate::state::ui::Tab;

#[cfg(test)]
#[path = "tab_bar_test.rs"]
mod tab_bar_test;

fn tab_class(active: bool) -> &'static str {
    if active { "tab-bar__tab tab-bar__tab--active" } else { "tab-bar__tab" }
}

/// Tab links; the active tab follows the router location.
#[component]
pub fn TabBar() -> impl IntoView {
    let location = use_location();
    let active = Memo::new(move |_| Tab::from_path(&location.pathname.get()));

    view! {
        <nav class="tab-bar" aria-label="Sections">
            {Tab::ALL
                .into_iter()
                .map(|tab| {
                    view! {
                        <a
                            href=tab.path()
                            class=move || tab_class(active.get() == tab)
                            aria-current=move || (active.get() == tab).then_some("page")
                        >
                            {tab.label()}
                        </a>
                    }
                })
                .collect_view()}
        </nav>
    }
}
