//! # client
//!
//! Leptos + WASM frontend for the exoplanet prediction dashboard.
//!
//! This crate contains the root shell, the four tab pages, their view-state
//! machines with async controllers, the shared metrics cache, and the
//! `gloo-net` transport implementing `contract::PredictionApi`.

pub mod app;
pub mod components;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: installs logging and hydrates the server-rendered shell.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    util::theme::apply(util::theme::load());
    leptos::mount::hydrate_body(app::App);
}
