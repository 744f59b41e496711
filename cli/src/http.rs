//! Native transport for the prediction service.
//!
//! SYSTEM CONTEXT
//! ==============
//! Implements `contract::PredictionApi` over `reqwest` so the CLI shares the
//! browser client's endpoint table, envelopes and error mapping.
//!
//! ERROR HANDLING
//! ==============
//! Connection failures and timeouts become `ApiError::Network`; non-2xx
//! answers become `ApiError::Status` with the service's `error` message.

use std::time::Duration;

use contract::envelope::{
    decode_feature_importance, decode_features, decode_health, decode_hyperparameters, decode_predictions,
    decode_retrain, decode_sample_data, decode_snapshot, status_error,
};
use contract::{
    ApiError, CSV_MEDIA_TYPE, CsvUpload, Endpoint, FeatureImportance, FeatureInfo, FeatureVector, HealthStatus,
    HyperparameterSet, MetricsSnapshot, ModelMetrics, PredictionApi, PredictionResult, SampleRecord, UPLOAD_FIELD,
};
use reqwest::RequestBuilder;
use reqwest::multipart::{Form, Part};

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

pub struct ReqwestApi {
    client: reqwest::Client,
    base: String,
}

impl ReqwestApi {
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(base: &str, timeout: Option<Duration>) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base: base.trim_end_matches('/').to_owned(),
        })
    }

    fn url(&self, endpoint: Endpoint) -> String {
        endpoint.url(&self.base)
    }

    async fn read(&self, request: RequestBuilder) -> Result<String, ApiError> {
        let response = request.send().await.map_err(network)?;
        let status = response.status();
        let body = response.text().await.map_err(network)?;
        tracing::debug!(status = status.as_u16(), bytes = body.len(), "service response");
        if !status.is_success() {
            return Err(status_error(status.as_u16(), &body));
        }
        Ok(body)
    }

    async fn get(&self, endpoint: Endpoint) -> Result<String, ApiError> {
        self.read(self.client.get(self.url(endpoint))).await
    }

    async fn post_form(&self, endpoint: Endpoint, upload: Option<&CsvUpload>) -> Result<String, ApiError> {
        let form = upload_form(upload)?;
        self.read(self.client.post(self.url(endpoint)).multipart(form)).await
    }
}

fn network(err: reqwest::Error) -> ApiError {
    ApiError::Network(err.to_string())
}

/// Multipart body with the upload under `file`, or an empty form.
fn upload_form(upload: Option<&CsvUpload>) -> Result<Form, ApiError> {
    let form = Form::new();
    let Some(upload) = upload else {
        return Ok(form);
    };
    let part = Part::bytes(upload.bytes.clone())
        .file_name(upload.file_name.clone())
        .mime_str(CSV_MEDIA_TYPE)
        .map_err(|e| ApiError::InvalidUpload(e.to_string()))?;
    Ok(form.part(UPLOAD_FIELD, part))
}

#[async_trait::async_trait(?Send)]
impl PredictionApi for ReqwestApi {
    async fn health(&self) -> Result<HealthStatus, ApiError> {
        decode_health(&self.get(Endpoint::Health).await?)
    }

    async fn predict(&self, vector: &FeatureVector) -> Result<Vec<PredictionResult>, ApiError> {
        let request = self.client.post(self.url(Endpoint::Predict)).json(vector);
        decode_predictions(&self.read(request).await?)
    }

    async fn predict_file(&self, upload: &CsvUpload) -> Result<Vec<PredictionResult>, ApiError> {
        decode_predictions(&self.post_form(Endpoint::Predict, Some(upload)).await?)
    }

    async fn batch_predict(&self, rows: &[FeatureVector]) -> Result<Vec<PredictionResult>, ApiError> {
        let request = self.client.post(self.url(Endpoint::BatchPredict)).json(rows);
        decode_predictions(&self.read(request).await?)
    }

    async fn get_metrics(&self) -> Result<MetricsSnapshot, ApiError> {
        decode_snapshot(&self.get(Endpoint::Metrics).await?)
    }

    async fn get_features(&self) -> Result<Vec<FeatureInfo>, ApiError> {
        decode_features(&self.get(Endpoint::Features).await?)
    }

    async fn get_hyperparameters(&self) -> Result<HyperparameterSet, ApiError> {
        decode_hyperparameters(&self.get(Endpoint::Hyperparameters).await?)
    }

    async fn update_hyperparameters(&self, set: &HyperparameterSet) -> Result<(), ApiError> {
        let request = self.client.post(self.url(Endpoint::Hyperparameters)).json(set);
        self.read(request).await.map(drop)
    }

    async fn retrain(&self, upload: Option<&CsvUpload>) -> Result<ModelMetrics, ApiError> {
        decode_retrain(&self.post_form(Endpoint::Retrain, upload).await?)
    }

    async fn get_sample_data(&self) -> Result<Vec<SampleRecord>, ApiError> {
        decode_sample_data(&self.get(Endpoint::SampleData).await?)
    }

    async fn get_feature_importance(&self) -> Result<FeatureImportance, ApiError> {
        decode_feature_importance(&self.get(Endpoint::FeatureImportance).await?)
    }
}
