//! Networking for the prediction service.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` implements `contract::PredictionApi` over browser fetch. Wire shapes
//! and decoding live in the `contract` crate so the CLI shares them.

pub mod api;
