//! View state for the dashboard client.
//!
//! DESIGN
//! ======
//! Each view owns one plain-data state struct held in an `RwSignal`; async
//! controllers beside each struct drive it through a [`handle::StateHandle`].
//! The metrics cache is the only state shared across views.

pub mod cache;
pub mod handle;
pub mod predictor;
pub mod settings;
pub mod ui;

#[cfg(test)]
pub(crate) mod mock_api;
