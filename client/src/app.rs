//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{Meta, MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{Route, Router, Routes},
};

use crate::components::tab_bar::TabBar;
use crate::components::theme_toggle::ThemeToggle;
use crate::net::api::HttpApi;
use crate::pages::{about::AboutPage, dashboard::DashboardPage, predictor::PredictorPage, settings::SettingsPage};
use crate::state::cache::ModelCache;
use crate::state::ui::UiState;
use crate::util::{api_base, theme};

/// HTML shell rendered on the server for SSR + hydration.
///
/// `service_base` is published as a meta tag for the browser transport.
pub fn shell(options: LeptosOptions, service_base: String) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <meta name=api_base::META_NAME content=service_base/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Provides the transport, the shared metrics cache and UI chrome state, and
/// routes the four tabs.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let ui = RwSignal::new(UiState { theme: theme::load() });
    let cache = RwSignal::new(ModelCache::default());

    // The host supplies the base during SSR; the browser reads the meta tag.
    let base = use_context::<api_base::ApiBase>().map_or_else(api_base::resolve, |b| b.0);
    provide_context(HttpApi::new(base));
    provide_context(ui);
    provide_context(cache);

    view! {
        <Stylesheet id="leptos" href="/pkg/exodash.css"/>
        <Title text="Exoplanet Dashboard"/>
        <Meta name="description" content="Classify Kepler exoplanet candidates with an ensemble model"/>

        <Router>
            <header class="app-header">
                <h1 class="app-header__title">"Exoplanet Dashboard"</h1>
                <TabBar/>
                <ThemeToggle/>
            </header>
            <main class="app-main">
                <Routes fallback=|| "Page not found.".into_view()>
                    <Route path=StaticSegment("") view=DashboardPage/>
                    <Route path=StaticSegment("predict") view=PredictorPage/>
                    <Route path=StaticSegment("settings") view=SettingsPage/>
                    <Route path=StaticSegment("about") view=AboutPage/>
                </Routes>
            </main>
        </Router>
    }
}
