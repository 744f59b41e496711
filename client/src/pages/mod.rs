//! Page-level route components.
//!
//! SYSTEM CONTEXT
//! ==============
//! One page per tab. Pages obtain the transport and shared cache from
//! context, own their view state, and hand service calls to the state
//! controllers.

pub mod about;
pub mod dashboard;
pub mod predictor;
pub mod settings;
