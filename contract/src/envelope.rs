//! Endpoint table and response envelopes for the prediction service.
//!
//! DESIGN
//! ======
//! Every response body wraps its payload in a named field (`predictions`,
//! `metrics`, ...). Unwrapping lives here so both transports decode the same
//! way and tests can exercise decoding without a network.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::service::ApiError;
use crate::types::{
    FeatureImportance, FeatureInfo, HealthStatus, HyperparameterSet, MetricsSnapshot, ModelMetrics, PredictionResult,
    SampleRecord,
};

/// Default API base, origin plus the `/api` prefix.
pub const DEFAULT_API_BASE: &str = "http://localhost:5000/api";

/// Multipart field name the service reads uploads from.
pub const UPLOAD_FIELD: &str = "file";

/// One REST operation of the prediction service.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Health,
    Predict,
    BatchPredict,
    Metrics,
    Features,
    Hyperparameters,
    Retrain,
    SampleData,
    FeatureImportance,
}

impl Endpoint {
    /// Path relative to the API base.
    #[must_use]
    pub fn path(self) -> &'static str {
        match self {
            Self::Health => "/health",
            Self::Predict => "/predict",
            Self::BatchPredict => "/batch-predict",
            Self::Metrics => "/metrics",
            Self::Features => "/features",
            Self::Hyperparameters => "/hyperparameters",
            Self::Retrain => "/retrain",
            Self::SampleData => "/sample-data",
            Self::FeatureImportance => "/feature-importance",
        }
    }

    /// Absolute URL under `base`. Trailing slashes on `base` are ignored.
    #[must_use]
    pub fn url(self, base: &str) -> String {
        format!("{}{}", base.trim_end_matches('/'), self.path())
    }
}

#[derive(Debug, Deserialize)]
pub struct PredictionsEnvelope {
    pub predictions: Vec<PredictionResult>,
}

#[derive(Debug, Deserialize)]
pub struct FeaturesEnvelope {
    pub features: Vec<FeatureInfo>,
}

#[derive(Debug, Deserialize)]
pub struct HyperparametersEnvelope {
    pub hyperparameters: HyperparameterSet,
}

#[derive(Debug, Deserialize)]
pub struct RetrainEnvelope {
    pub metrics: ModelMetrics,
}

#[derive(Debug, Deserialize)]
pub struct SampleDataEnvelope {
    pub sample_data: Vec<SampleRecord>,
}

#[derive(Debug, Deserialize)]
pub struct FeatureImportanceEnvelope {
    pub feature_importance: FeatureImportance,
}

#[derive(Debug, Default, Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    error: Option<String>,
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Decode a `{ predictions: [...] }` body.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] when the body is not the expected shape.
pub fn decode_predictions(body: &str) -> Result<Vec<PredictionResult>, ApiError> {
    decode::<PredictionsEnvelope>(body).map(|env| env.predictions)
}

/// Decode the combined metrics read.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] when the body is not the expected shape.
pub fn decode_snapshot(body: &str) -> Result<MetricsSnapshot, ApiError> {
    decode(body)
}

/// Decode a `{ features: [...] }` body.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] when the body is not the expected shape.
pub fn decode_features(body: &str) -> Result<Vec<FeatureInfo>, ApiError> {
    decode::<FeaturesEnvelope>(body).map(|env| env.features)
}

/// Decode a `{ hyperparameters: {...} }` body.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] when the body is not the expected shape.
pub fn decode_hyperparameters(body: &str) -> Result<HyperparameterSet, ApiError> {
    decode::<HyperparametersEnvelope>(body).map(|env| env.hyperparameters)
}

/// Decode the `{ metrics: {...} }` body returned by retrain.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] when the body is not the expected shape.
pub fn decode_retrain(body: &str) -> Result<ModelMetrics, ApiError> {
    decode::<RetrainEnvelope>(body).map(|env| env.metrics)
}

/// Decode a `{ sample_data: [...] }` body.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] when the body is not the expected shape.
pub fn decode_sample_data(body: &str) -> Result<Vec<SampleRecord>, ApiError> {
    decode::<SampleDataEnvelope>(body).map(|env| env.sample_data)
}

/// Decode a `{ feature_importance: {...} }` body.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] when the body is not the expected shape.
pub fn decode_feature_importance(body: &str) -> Result<FeatureImportance, ApiError> {
    decode::<FeatureImportanceEnvelope>(body).map(|env| env.feature_importance)
}

/// Decode the health check body.
///
/// # Errors
///
/// Returns [`ApiError::Decode`] when the body is not the expected shape.
pub fn decode_health(body: &str) -> Result<HealthStatus, ApiError> {
    decode(body)
}

/// Build the error for a non-2xx response.
///
/// Uses the service's `error` message when the body carries one, otherwise
/// falls back to the raw body (trimmed) or the bare status.
#[must_use]
pub fn status_error(status: u16, body: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|env| env.error)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| {
            let trimmed = body.trim();
            if trimmed.is_empty() || trimmed.starts_with('<') {
                format!("HTTP {status}")
            } else {
                trimmed.chars().take(200).collect()
            }
        });
    ApiError::Status { status, message }
}

#[cfg(test)]
#[path = "envelope_test.rs"]
mod tests;
