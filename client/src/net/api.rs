//! Browser transport for the prediction service.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`, uploads as
//! `FormData` built from the file bytes.
//! Server-side (SSR): every call returns [`ApiError::Unavailable`] since the
//! service is only reached from the browser.
//!
//! ERROR HANDLING
//! ==============
//! Fetch failures map to `ApiError::Network`, non-2xx answers to
//! `ApiError::Status` carrying the service's `error` field when present.
//! Callers log the detail and show their own generic message.

#![allow(clippy::unused_async)]

use contract::envelope::{
    decode_feature_importance, decode_features, decode_health, decode_hyperparameters, decode_predictions,
    decode_retrain, decode_sample_data, decode_snapshot,
};
use contract::{
    ApiError, CsvUpload, DEFAULT_API_BASE, Endpoint, FeatureImportance, FeatureInfo, FeatureVector, HealthStatus,
    HyperparameterSet, MetricsSnapshot, ModelMetrics, PredictionApi, PredictionResult, SampleRecord,
};
use serde::Serialize;

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

/// `PredictionApi` over the browser fetch API.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpApi {
    base: String,
}

impl Default for HttpApi {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}

impl HttpApi {
    pub fn new(base: impl Into<String>) -> Self {
        let base: String = base.into();
        Self {
            base: base.trim_end_matches('/').to_owned(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    fn url(&self, endpoint: Endpoint) -> String {
        endpoint.url(&self.base)
    }

    async fn get(&self, endpoint: Endpoint) -> Result<String, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            browser::send(gloo_net::http::Request::get(&self.url(endpoint)).build()).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = self.url(endpoint);
            Err(ApiError::Unavailable)
        }
    }

    async fn post_json<T: Serialize + ?Sized>(&self, endpoint: Endpoint, body: &T) -> Result<String, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            browser::send(gloo_net::http::Request::post(&self.url(endpoint)).json(body)).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (self.url(endpoint), body);
            Err(ApiError::Unavailable)
        }
    }

    async fn post_form(&self, endpoint: Endpoint, upload: Option<&CsvUpload>) -> Result<String, ApiError> {
        #[cfg(feature = "hydrate")]
        {
            let form = browser::form_data(upload)?;
            browser::send(gloo_net::http::Request::post(&self.url(endpoint)).body(form)).await
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (self.url(endpoint), upload);
            Err(ApiError::Unavailable)
        }
    }
}

#[async_trait::async_trait(?Send)]
impl PredictionApi for HttpApi {
    async fn health(&self) -> Result<HealthStatus, ApiError> {
        decode_health(&self.get(Endpoint::Health).await?)
    }

    async fn predict(&self, vector: &FeatureVector) -> Result<Vec<PredictionResult>, ApiError> {
        decode_predictions(&self.post_json(Endpoint::Predict, vector).await?)
    }

    async fn predict_file(&self, upload: &CsvUpload) -> Result<Vec<PredictionResult>, ApiError> {
        decode_predictions(&self.post_form(Endpoint::Predict, Some(upload)).await?)
    }

    async fn batch_predict(&self, rows: &[FeatureVector]) -> Result<Vec<PredictionResult>, ApiError> {
        decode_predictions(&self.post_json(Endpoint::BatchPredict, rows).await?)
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
        self.post_json(Endpoint::Hyperparameters, set).await.map(drop)
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

#[cfg(feature = "hydrate")]
mod browser {
    use contract::envelope::status_error;
    use contract::{ApiError, CSV_MEDIA_TYPE, CsvUpload, UPLOAD_FIELD};
    use gloo_net::http::Request;

    /// Send a built request and return the body of a 2xx answer.
    pub(super) async fn send(request: Result<Request, gloo_net::Error>) -> Result<String, ApiError> {
        let request = request.map_err(|e| ApiError::Network(e.to_string()))?;
        let response = request.send().await.map_err(|e| ApiError::Network(e.to_string()))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| ApiError::Network(e.to_string()))?;
        if !response.ok() {
            return Err(status_error(status, &body));
        }
        Ok(body)
    }

    /// Multipart body with the upload under `file`, or an empty form.
    pub(super) fn form_data(upload: Option<&CsvUpload>) -> Result<web_sys::FormData, ApiError> {
        let invalid = |e: wasm_bindgen::JsValue| ApiError::InvalidUpload(format!("{e:?}"));
        let form = web_sys::FormData::new().map_err(invalid)?;
        if let Some(upload) = upload {
            let bytes = js_sys::Uint8Array::from(upload.bytes.as_slice());
            let parts = js_sys::Array::of1(&bytes);
            let options = web_sys::BlobPropertyBag::new();
            options.set_type(CSV_MEDIA_TYPE);
            let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options).map_err(invalid)?;
            form.append_with_blob_and_filename(UPLOAD_FIELD, &blob, &upload.file_name)
                .map_err(invalid)?;
        }
        Ok(form)
    }
}
