//! Utility helpers shared across client UI modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Browser concerns (storage, meta tags, file reading) and pure display math
//! live here so pages and components stay declarative.

pub mod api_base;
pub mod charts;
pub mod format;
pub mod task;
pub mod theme;
pub mod upload;
