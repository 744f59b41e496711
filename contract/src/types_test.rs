use super::*;
use serde_json::json;

fn result(confirmed: f64) -> PredictionResult {
    PredictionResult {
        prediction: if confirmed >= 0.5 {
            Classification::Confirmed
        } else {
            Classification::NotConfirmed
        },
        confidence: confirmed.max(1.0 - confirmed),
        probability_confirmed: confirmed,
        probability_not_confirmed: 1.0 - confirmed,
        input: None,
    }
}

// =============================================================
// PredictionResult
// =============================================================

#[test]
fn prediction_result_decodes_service_labels() {
    let raw = json!({
        "prediction": "NOT CONFIRMED",
        "confidence": 0.82,
        "probability_confirmed": 0.18,
        "probability_not_confirmed": 0.82
    });
    let parsed: PredictionResult = serde_json::from_value(raw).unwrap();
    assert_eq!(parsed.prediction, Classification::NotConfirmed);
    assert!(parsed.input.is_none());
    assert!(parsed.is_normalized());
}

#[test]
fn prediction_result_rejects_unknown_label() {
    let raw = json!({
        "prediction": "CANDIDATE",
        "confidence": 0.5,
        "probability_confirmed": 0.5,
        "probability_not_confirmed": 0.5
    });
    assert!(serde_json::from_value::<PredictionResult>(raw).is_err());
}

#[test]
fn batch_result_keeps_echoed_input() {
    let raw = json!({
        "prediction": "CONFIRMED",
        "confidence": 0.9,
        "probability_confirmed": 0.9,
        "probability_not_confirmed": 0.1,
        "input": { "koi_period": 3.5 }
    });
    let parsed: PredictionResult = serde_json::from_value(raw).unwrap();
    assert_eq!(parsed.input.unwrap().get("koi_period"), Some(&json!(3.5)));
}

#[test]
fn is_normalized_flags_bad_probabilities() {
    assert!(result(0.7).is_normalized());
    let mut skewed = result(0.7);
    skewed.probability_not_confirmed = 0.5;
    assert!(!skewed.is_normalized());
    let mut negative = result(0.7);
    negative.probability_confirmed = -0.1;
    negative.probability_not_confirmed = 1.1;
    assert!(!negative.is_normalized());
}

#[test]
fn classification_display_matches_wire() {
    assert_eq!(Classification::Confirmed.to_string(), "CONFIRMED");
    assert_eq!(Classification::NotConfirmed.to_string(), "NOT CONFIRMED");
}

// =============================================================
// ModelMetrics / ConfusionMatrix
// =============================================================

#[test]
fn metrics_ignore_classification_report() {
    let raw = json!({
        "accuracy": 0.95,
        "precision": 0.91,
        "recall": 0.88,
        "f1_score": 0.89,
        "confusion_matrix": [[120, 4], [6, 70]],
        "classification_report": { "0": { "precision": 0.95 } },
        "cv_mean": 0.94,
        "cv_std": 0.01
    });
    let metrics: ModelMetrics = serde_json::from_value(raw).unwrap();
    assert_eq!(metrics.confusion_matrix.true_negative(), 120);
    assert_eq!(metrics.confusion_matrix.false_positive(), 4);
    assert_eq!(metrics.confusion_matrix.false_negative(), 6);
    assert_eq!(metrics.confusion_matrix.true_positive(), 70);
    assert_eq!(metrics.confusion_matrix.total(), 200);
}

#[test]
fn confusion_matrix_rejects_wrong_shape() {
    let raw = json!([[1, 2, 3], [4, 5, 6]]);
    assert!(serde_json::from_value::<ConfusionMatrix>(raw).is_err());
}

// =============================================================
// HyperparameterSet
// =============================================================

#[test]
fn hyperparameter_defaults_match_service_defaults() {
    let defaults = HyperparameterSet::default();
    assert_eq!(defaults.rf_n_estimators, 200);
    assert_eq!(defaults.rf_max_depth, 20);
    assert_eq!(defaults.rf_min_samples_split, 5);
    assert_eq!(defaults.xgb_n_estimators, 200);
    assert_eq!(defaults.xgb_max_depth, 10);
    assert!((defaults.xgb_learning_rate - 0.1).abs() < f64::EPSILON);
}

#[test]
fn hyperparameters_serialize_as_flat_map() {
    let value = serde_json::to_value(HyperparameterSet::default()).unwrap();
    assert_eq!(value.as_object().unwrap().len(), 6);
    assert_eq!(value["xgb_learning_rate"], json!(0.1));
}

// =============================================================
// MetricsSnapshot
// =============================================================

#[test]
fn snapshot_ranks_importance_descending() {
    let mut snapshot = MetricsSnapshot::default();
    snapshot.feature_importance.insert("koi_depth".to_owned(), 0.1);
    snapshot.feature_importance.insert("koi_model_snr".to_owned(), 0.4);
    snapshot.feature_importance.insert("koi_prad".to_owned(), 0.1);
    snapshot.feature_importance.insert("koi_period".to_owned(), 0.2);
    let ranked = snapshot.ranked_importance();
    let names: Vec<&str> = ranked.iter().map(|(name, _)| *name).collect();
    assert_eq!(names, vec!["koi_model_snr", "koi_period", "koi_depth", "koi_prad"]);
}

#[test]
fn snapshot_tolerates_missing_hyperparameters() {
    let raw = json!({
        "metrics": {
            "accuracy": 0.5, "precision": 0.5, "recall": 0.5, "f1_score": 0.5,
            "confusion_matrix": [[1, 1], [1, 1]], "cv_mean": 0.5, "cv_std": 0.0
        },
        "feature_importance": { "koi_period": 1.0 }
    });
    let snapshot: MetricsSnapshot = serde_json::from_value(raw).unwrap();
    assert_eq!(snapshot.hyperparameters, HyperparameterSet::default());
    assert_eq!(snapshot.feature_importance.len(), 1);
}

#[test]
fn snapshot_treats_null_importance_as_empty() {
    let raw = json!({
        "metrics": {
            "accuracy": 0.5, "precision": 0.5, "recall": 0.5, "f1_score": 0.5,
            "confusion_matrix": [[1, 1], [1, 1]], "cv_mean": 0.5, "cv_std": 0.0
        },
        "feature_importance": null,
        "hyperparameters": null
    });
    let snapshot: MetricsSnapshot = serde_json::from_value(raw).unwrap();
    assert!(snapshot.feature_importance.is_empty());
    assert!(snapshot.ranked_importance().is_empty());
}
