//! Scripted `PredictionApi` for controller tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use contract::{
    ApiError, CsvUpload, FeatureImportance, FeatureInfo, FeatureVector, HealthStatus, HyperparameterSet,
    MetricsSnapshot, ModelMetrics, PredictionApi, PredictionResult, SampleRecord,
};

type Queue<T> = RefCell<VecDeque<Result<T, ApiError>>>;

/// Each method pops its next scripted response and records the call.
/// An empty queue answers `ApiError::Unavailable`.
#[derive(Default)]
pub struct MockApi {
    pub predictions: Queue<Vec<PredictionResult>>,
    pub snapshots: Queue<MetricsSnapshot>,
    pub features: Queue<Vec<FeatureInfo>>,
    pub hyperparameters: Queue<HyperparameterSet>,
    pub updates: Queue<()>,
    pub retrains: Queue<ModelMetrics>,
    pub samples: Queue<Vec<SampleRecord>>,
    pub importances: Queue<FeatureImportance>,
    pub calls: RefCell<Vec<&'static str>>,
    pub sent_vectors: RefCell<Vec<FeatureVector>>,
    pub sent_uploads: RefCell<Vec<Option<CsvUpload>>>,
    pub sent_sets: RefCell<Vec<HyperparameterSet>>,
    /// Runs once, inside the next call, before it answers.
    pub during_call: RefCell<Option<Box<dyn FnOnce()>>>,
}

impl MockApi {
    pub fn count(&self, name: &str) -> usize {
        self.calls.borrow().iter().filter(|c| **c == name).count()
    }

    fn answer<T>(&self, name: &'static str, queue: &Queue<T>) -> Result<T, ApiError> {
        self.calls.borrow_mut().push(name);
        let hook = self.during_call.borrow_mut().take();
        if let Some(hook) = hook {
            hook();
        }
        queue.borrow_mut().pop_front().unwrap_or(Err(ApiError::Unavailable))
    }
}

pub fn push<T>(queue: &Queue<T>, response: Result<T, ApiError>) {
    queue.borrow_mut().push_back(response);
}

pub fn server_error(message: &str) -> ApiError {
    ApiError::Status {
        status: 500,
        message: message.to_owned(),
    }
}

#[async_trait::async_trait(?Send)]
impl PredictionApi for MockApi {
    async fn health(&self) -> Result<HealthStatus, ApiError> {
        self.calls.borrow_mut().push("health");
        Ok(HealthStatus {
            status: "healthy".into(),
            message: String::new(),
        })
    }

    async fn predict(&self, vector: &FeatureVector) -> Result<Vec<PredictionResult>, ApiError> {
        self.sent_vectors.borrow_mut().push(*vector);
        self.answer("predict", &self.predictions)
    }

    async fn predict_file(&self, upload: &CsvUpload) -> Result<Vec<PredictionResult>, ApiError> {
        self.sent_uploads.borrow_mut().push(Some(upload.clone()));
        self.answer("predict_file", &self.predictions)
    }

    async fn batch_predict(&self, rows: &[FeatureVector]) -> Result<Vec<PredictionResult>, ApiError> {
        self.sent_vectors.borrow_mut().extend_from_slice(rows);
        self.answer("batch_predict", &self.predictions)
    }

    async fn get_metrics(&self) -> Result<MetricsSnapshot, ApiError> {
        self.answer("get_metrics", &self.snapshots)
    }

    async fn get_features(&self) -> Result<Vec<FeatureInfo>, ApiError> {
        self.answer("get_features", &self.features)
    }

    async fn get_hyperparameters(&self) -> Result<HyperparameterSet, ApiError> {
        self.answer("get_hyperparameters", &self.hyperparameters)
    }

    async fn update_hyperparameters(&self, set: &HyperparameterSet) -> Result<(), ApiError> {
        self.sent_sets.borrow_mut().push(set.clone());
        self.answer("update_hyperparameters", &self.updates)
    }

    async fn retrain(&self, upload: Option<&CsvUpload>) -> Result<ModelMetrics, ApiError> {
        self.sent_uploads.borrow_mut().push(upload.cloned());
        self.answer("retrain", &self.retrains)
    }

    async fn get_sample_data(&self) -> Result<Vec<SampleRecord>, ApiError> {
        self.answer("get_sample_data", &self.samples)
    }

    async fn get_feature_importance(&self) -> Result<FeatureImportance, ApiError> {
        self.answer("get_feature_importance", &self.importances)
    }
}

/// A normalized result for `prediction`.
pub fn result(confirmed: bool, probability_confirmed: f64) -> PredictionResult {
    PredictionResult {
        prediction: if confirmed {
            contract::Classification::Confirmed
        } else {
            contract::Classification::NotConfirmed
        },
        confidence: probability_confirmed.max(1.0 - probability_confirmed),
        probability_confirmed,
        probability_not_confirmed: 1.0 - probability_confirmed,
        input: None,
    }
}

/// Metrics with the given accuracy and otherwise fixed values.
pub fn metrics(accuracy: f64) -> ModelMetrics {
    ModelMetrics {
        accuracy,
        precision: 0.9,
        recall: 0.85,
        f1_score: 0.87,
        confusion_matrix: contract::ConfusionMatrix([[40, 5], [7, 48]]),
        cv_mean: 0.88,
        cv_std: 0.02,
    }
}

pub fn snapshot(accuracy: f64) -> MetricsSnapshot {
    let mut feature_importance = contract::FeatureImportance::new();
    feature_importance.insert("koi_model_snr".into(), 0.3);
    feature_importance.insert("koi_prad".into(), 0.1);
    MetricsSnapshot {
        metrics: metrics(accuracy),
        feature_importance,
        hyperparameters: HyperparameterSet::default(),
    }
}
