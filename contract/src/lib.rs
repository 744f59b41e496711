//! Shared wire contract for the exoplanet prediction service.
//!
//! This crate owns the request/response shapes used by both `client` and
//! `cli`, the endpoint table, and the [`PredictionApi`] trait every transport
//! implements. It performs no I/O itself.

pub mod envelope;
pub mod features;
pub mod service;
pub mod types;
pub mod upload;

pub use envelope::{DEFAULT_API_BASE, Endpoint, UPLOAD_FIELD};
pub use features::{FeatureName, FeatureVector, RecordError};
pub use service::{ApiError, PredictionApi};
pub use types::{
    Classification, ConfusionMatrix, FeatureImportance, FeatureInfo, HealthStatus, HyperparameterSet,
    MetricsSnapshot, ModelMetrics, PredictionResult, SampleRecord,
};
pub use upload::{CSV_MEDIA_TYPE, CsvUpload};
