//! Transport seam for the prediction service.
//!
//! SYSTEM CONTEXT
//! ==============
//! `PredictionApi` is the single point of contact with the remote service.
//! The browser client implements it over `gloo-net`, the CLI over `reqwest`,
//! and tests over in-memory mocks. Every call is one outbound request: no
//! caching, deduplication, retry or backoff happens at this layer.
//!
//! The trait is `?Send` because browser futures are bound to the UI thread.

use crate::features::FeatureVector;
use crate::types::{
    FeatureImportance, FeatureInfo, HealthStatus, HyperparameterSet, MetricsSnapshot, ModelMetrics, PredictionResult,
    SampleRecord,
};
use crate::upload::CsvUpload;

/// Errors produced by transport calls.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The service could not be reached or the connection failed mid-request.
    #[error("network error: {0}")]
    Network(String),

    /// The service answered with a non-2xx status.
    #[error("service returned {status}: {message}")]
    Status { status: u16, message: String },

    /// A 2xx response body did not match the contract.
    #[error("response decode failed: {0}")]
    Decode(String),

    /// The upload was refused before any request was made.
    #[error("invalid upload: {0}")]
    InvalidUpload(String),

    /// The transport cannot issue requests in this environment.
    #[error("service calls are not available here")]
    Unavailable,
}

impl ApiError {
    /// Whether repeating the same call could plausibly succeed.
    ///
    /// Drives the wording of failure messages; nothing retries automatically.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Status { status: 429 | 500..=599, .. })
    }
}

/// REST contract of the exoplanet prediction service.
#[async_trait::async_trait(?Send)]
pub trait PredictionApi {
    /// `GET /health`.
    async fn health(&self) -> Result<HealthStatus, ApiError>;

    /// `POST /predict` with one feature vector as JSON.
    ///
    /// The first result corresponds to the submitted vector.
    async fn predict(&self, vector: &FeatureVector) -> Result<Vec<PredictionResult>, ApiError>;

    /// `POST /predict` with a CSV file as multipart form data.
    ///
    /// One result per data row, in file order.
    async fn predict_file(&self, upload: &CsvUpload) -> Result<Vec<PredictionResult>, ApiError>;

    /// `POST /batch-predict` with a JSON array of feature vectors.
    async fn batch_predict(&self, rows: &[FeatureVector]) -> Result<Vec<PredictionResult>, ApiError>;

    /// `GET /metrics`: metrics, feature importance and stored hyperparameters.
    async fn get_metrics(&self) -> Result<MetricsSnapshot, ApiError>;

    /// `GET /features`.
    async fn get_features(&self) -> Result<Vec<FeatureInfo>, ApiError>;

    /// `GET /hyperparameters`.
    async fn get_hyperparameters(&self) -> Result<HyperparameterSet, ApiError>;

    /// `POST /hyperparameters`.
    ///
    /// Success means the service stored the values; they take effect only
    /// after a subsequent [`PredictionApi::retrain`].
    async fn update_hyperparameters(&self, set: &HyperparameterSet) -> Result<(), ApiError>;

    /// `POST /retrain`, optionally replacing the training data.
    ///
    /// Blocks until training finishes and returns the fresh metrics.
    async fn retrain(&self, upload: Option<&CsvUpload>) -> Result<ModelMetrics, ApiError>;

    /// `GET /sample-data`.
    async fn get_sample_data(&self) -> Result<Vec<SampleRecord>, ApiError>;

    /// `GET /feature-importance`, the same map `get_metrics` carries.
    async fn get_feature_importance(&self) -> Result<FeatureImportance, ApiError>;
}

#[cfg(test)]
#[path = "service_test.rs"]
mod tests;
