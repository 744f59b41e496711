//! Reusable UI component modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components render the shell chrome, charts and result panels. They take
//! plain props and leave service calls to the pages.

pub mod batch_results;
pub mod confusion_chart;
pub mod csv_dropzone;
pub mod importance_chart;
pub mod metric_card;
pub mod prediction_card;
pub mod tab_bar;
pub mod theme_toggle;
