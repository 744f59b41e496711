use super::*;
use crate::types::Classification;
use serde_json::json;

// =============================================================
// Endpoint
// =============================================================

#[test]
fn endpoint_url_joins_base_and_path() {
    assert_eq!(Endpoint::Predict.url(DEFAULT_API_BASE), "http://localhost:5000/api/predict");
    assert_eq!(Endpoint::BatchPredict.url("http://svc/api/"), "http://svc/api/batch-predict");
    assert_eq!(Endpoint::SampleData.url("/api"), "/api/sample-data");
}

#[test]
fn hyperparameters_read_and_write_share_a_path() {
    assert_eq!(Endpoint::Hyperparameters.path(), "/hyperparameters");
    assert_eq!(Endpoint::Metrics.path(), "/metrics");
    assert_eq!(Endpoint::Retrain.path(), "/retrain");
    assert_eq!(Endpoint::FeatureImportance.path(), "/feature-importance");
}

// =============================================================
// decoding
// =============================================================

#[test]
fn decode_predictions_unwraps_envelope() {
    let body = json!({
        "success": true,
        "predictions": [
            { "prediction": "CONFIRMED", "confidence": 0.9,
              "probability_confirmed": 0.9, "probability_not_confirmed": 0.1 },
            { "prediction": "NOT CONFIRMED", "confidence": 0.6,
              "probability_confirmed": 0.4, "probability_not_confirmed": 0.6 }
        ]
    })
    .to_string();
    let results = decode_predictions(&body).unwrap();
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].prediction, Classification::Confirmed);
    assert_eq!(results[1].prediction, Classification::NotConfirmed);
}

#[test]
fn decode_predictions_reports_missing_field() {
    let err = decode_predictions(r#"{"success": true}"#).unwrap_err();
    assert!(matches!(err, ApiError::Decode(msg) if msg.contains("predictions")));
}

#[test]
fn decode_features_preserves_order() {
    let body = json!({
        "features": [
            { "name": "koi_srad", "description": "Stellar radius (Solar radii)" },
            { "name": "koi_period", "description": "Orbital period (days)" }
        ]
    })
    .to_string();
    let features = decode_features(&body).unwrap();
    let names: Vec<&str> = features.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["koi_srad", "koi_period"]);
}

#[test]
fn decode_retrain_returns_metrics_only() {
    let body = json!({
        "success": true,
        "message": "Model retrained successfully",
        "metrics": {
            "accuracy": 0.97, "precision": 0.9, "recall": 0.8, "f1_score": 0.85,
            "confusion_matrix": [[10, 1], [2, 7]], "cv_mean": 0.96, "cv_std": 0.02
        }
    })
    .to_string();
    let metrics = decode_retrain(&body).unwrap();
    assert!((metrics.accuracy - 0.97).abs() < f64::EPSILON);
    assert_eq!(metrics.confusion_matrix.total(), 20);
}

#[test]
fn decode_sample_data_keeps_extra_columns() {
    let body = json!({ "sample_data": [ { "koi_period": 9.48, "kepid": 10797460 } ] }).to_string();
    let rows = decode_sample_data(&body).unwrap();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].contains_key("kepid"));
}

#[test]
fn decode_feature_importance_unwraps_envelope() {
    let body = json!({ "success": true, "feature_importance": { "koi_prad": 0.1, "koi_model_snr": 0.3 } }).to_string();
    let importance = decode_feature_importance(&body).unwrap();
    assert_eq!(importance.keys().collect::<Vec<_>>(), ["koi_model_snr", "koi_prad"]);
    assert!(decode_feature_importance(r#"{"success": true}"#).is_err());
}

#[test]
fn decode_hyperparameters_unwraps_envelope() {
    let body = json!({
        "success": true,
        "hyperparameters": {
            "rf_n_estimators": 300, "rf_max_depth": 12, "rf_min_samples_split": 4,
            "xgb_n_estimators": 150, "xgb_max_depth": 6, "xgb_learning_rate": 0.05
        }
    })
    .to_string();
    let set = decode_hyperparameters(&body).unwrap();
    assert_eq!(set.rf_n_estimators, 300);
    assert_eq!(set.xgb_max_depth, 6);
}

#[test]
fn decode_health_reads_status() {
    let body = r#"{"status": "healthy", "message": "Exoplanet API is running"}"#;
    let health = decode_health(body).unwrap();
    assert_eq!(health.status, "healthy");
}

// =============================================================
// status_error
// =============================================================

#[test]
fn status_error_prefers_service_message() {
    let err = status_error(500, r#"{"success": false, "error": "Missing required columns"}"#);
    assert!(matches!(
        err,
        ApiError::Status { status: 500, ref message } if message == "Missing required columns"
    ));
}

#[test]
fn status_error_falls_back_to_status_for_html() {
    let err = status_error(502, "<html><body>Bad Gateway</body></html>");
    assert!(matches!(err, ApiError::Status { status: 502, ref message } if message == "HTTP 502"));
}

#[test]
fn status_error_uses_plain_text_body() {
    let err = status_error(400, "  No data provided \n");
    assert!(matches!(err, ApiError::Status { status: 400, ref message } if message == "No data provided"));
}

#[test]
fn status_error_handles_empty_body() {
    let err = status_error(404, "");
    assert!(matches!(err, ApiError::Status { status: 404, ref message } if message == "HTTP 404"));
}
