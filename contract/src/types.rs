//! Data-transfer shapes exchanged with the prediction service.
//!
//! None of these are owned or persisted client-side beyond the current view
//! session; a fetch replaces a local copy wholesale.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Tolerance used when checking that class probabilities sum to one.
pub const PROBABILITY_TOLERANCE: f64 = 1e-6;

/// Two-class outcome of one prediction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    #[serde(rename = "CONFIRMED")]
    Confirmed,
    #[serde(rename = "NOT CONFIRMED")]
    NotConfirmed,
}

impl Classification {
    /// Label as the service spells it.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Confirmed => "CONFIRMED",
            Self::NotConfirmed => "NOT CONFIRMED",
        }
    }
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification result for one input row.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub prediction: Classification,
    pub confidence: f64,
    pub probability_confirmed: f64,
    pub probability_not_confirmed: f64,
    /// Echo of the submitted row; only batch-predict responses carry it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input: Option<Map<String, Value>>,
}

impl PredictionResult {
    /// True when both class probabilities are in `[0, 1]` and sum to one.
    #[must_use]
    pub fn is_normalized(&self) -> bool {
        let in_range = |p: f64| (0.0..=1.0).contains(&p);
        in_range(self.probability_confirmed)
            && in_range(self.probability_not_confirmed)
            && (self.probability_confirmed + self.probability_not_confirmed - 1.0).abs() <= PROBABILITY_TOLERANCE
    }
}

/// 2x2 confusion matrix, rows are actual class, columns predicted class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfusionMatrix(pub [[u64; 2]; 2]);

impl ConfusionMatrix {
    #[must_use]
    pub fn true_negative(&self) -> u64 {
        self.0[0][0]
    }

    #[must_use]
    pub fn false_positive(&self) -> u64 {
        self.0[0][1]
    }

    #[must_use]
    pub fn false_negative(&self) -> u64 {
        self.0[1][0]
    }

    #[must_use]
    pub fn true_positive(&self) -> u64 {
        self.0[1][1]
    }

    /// Total number of evaluated samples.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.0.iter().flatten().sum()
    }
}

/// Model-quality summary as of the last training run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelMetrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1_score: f64,
    pub confusion_matrix: ConfusionMatrix,
    pub cv_mean: f64,
    pub cv_std: f64,
}

/// Tunable knobs for the random-forest and boosted-tree ensembles.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HyperparameterSet {
    pub rf_n_estimators: u32,
    pub rf_max_depth: u32,
    pub rf_min_samples_split: u32,
    pub xgb_n_estimators: u32,
    pub xgb_max_depth: u32,
    pub xgb_learning_rate: f64,
}

impl Default for HyperparameterSet {
    fn default() -> Self {
        Self {
            rf_n_estimators: 200,
            rf_max_depth: 20,
            rf_min_samples_split: 5,
            xgb_n_estimators: 200,
            xgb_max_depth: 10,
            xgb_learning_rate: 0.1,
        }
    }
}

/// Normalized importance weight per feature key.
pub type FeatureImportance = BTreeMap<String, f64>;

/// Descriptive metadata for one input feature.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureInfo {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Combined metrics read: quality metrics, feature importance and the
/// service's stored hyperparameters.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub metrics: ModelMetrics,
    #[serde(default, deserialize_with = "null_as_default")]
    pub feature_importance: FeatureImportance,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hyperparameters: HyperparameterSet,
}

// The service reports `null` for values it has not computed yet.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl MetricsSnapshot {
    /// Feature importance sorted by descending weight, ties by name.
    #[must_use]
    pub fn ranked_importance(&self) -> Vec<(&str, f64)> {
        let mut ranked: Vec<(&str, f64)> = self
            .feature_importance
            .iter()
            .map(|(name, weight)| (name.as_str(), *weight))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }
}

/// Example row returned by the sample-data endpoint.
pub type SampleRecord = Map<String, Value>;

/// Service liveness response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
