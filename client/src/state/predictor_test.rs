use std::cell::RefCell;
use std::rc::Rc;

use contract::Classification;
use contract::types::PROBABILITY_TOLERANCE;
use serde_json::json;

use super::*;
use crate::state::mock_api::{MockApi, push, result, server_error};

fn zero_form() -> FeatureForm {
    let mut form = FeatureForm::default();
    for name in FeatureName::ALL {
        form.set(name, "0");
    }
    form
}

fn csv_upload(rows: usize) -> CsvUpload {
    let mut body = String::from("koi_period,koi_depth\n");
    for i in 0..rows {
        body.push_str(&format!("{i}.5,100\n"));
    }
    CsvUpload::new("koi.csv", "text/csv", body.into_bytes()).unwrap()
}

fn sample_record() -> SampleRecord {
    let value = json!({
        "koi_period": 9.488, "koi_time0bk": 170.5, "koi_impact": 0.146,
        "koi_duration": 2.957, "koi_depth": 615.8, "koi_prad": 2.26,
        "koi_teq": 793, "koi_insol": 93.59, "koi_model_snr": 35.8,
        "koi_steff": 5455, "koi_slogg": 4.467, "koi_srad": 0.927,
        "kepoi_name": "K00752.01"
    });
    value.as_object().cloned().unwrap()
}

// =============================================================
// FeatureForm
// =============================================================

#[test]
fn parse_reads_every_field() {
    let mut form = zero_form();
    form.set(FeatureName::TransitDepth, " 615.8 ");
    let vector = form.parse().unwrap();
    assert!((vector.koi_depth - 615.8).abs() < f64::EPSILON);
    assert!(vector.koi_period.abs() < f64::EPSILON);
}

#[test]
fn parse_names_first_empty_field() {
    let mut form = zero_form();
    form.set(FeatureName::ImpactParameter, "");
    assert_eq!(form.parse(), Err(FormError::Empty(FeatureName::ImpactParameter)));
}

#[test]
fn parse_rejects_non_numeric_and_non_finite() {
    let mut form = zero_form();
    form.set(FeatureName::EquilibriumTemperature, "hot");
    assert!(matches!(form.parse(), Err(FormError::NotNumeric { feature: FeatureName::EquilibriumTemperature, .. })));

    form.set(FeatureName::EquilibriumTemperature, "inf");
    assert_eq!(form.parse(), Err(FormError::NotFinite(FeatureName::EquilibriumTemperature)));
}

#[test]
fn form_error_message_uses_label() {
    let err = FormError::Empty(FeatureName::OrbitalPeriod);
    assert!(err.to_string().starts_with(FeatureName::OrbitalPeriod.label()));
}

#[test]
fn fill_from_record_blanks_missing_values() {
    let mut record = sample_record();
    record.remove("koi_srad");
    record.insert("koi_slogg".into(), serde_json::Value::Null);
    record.insert("koi_steff".into(), serde_json::Value::String("5455".into()));

    let mut form = FeatureForm::default();
    form.fill_from_record(&record);
    assert_eq!(form.get(FeatureName::OrbitalPeriod), "9.488");
    assert_eq!(form.get(FeatureName::EquilibriumTemperature), "793");
    assert_eq!(form.get(FeatureName::StellarRadius), "");
    assert_eq!(form.get(FeatureName::StellarGravity), "");
    assert_eq!(form.get(FeatureName::StellarTemperature), "");
}

// =============================================================
// PredictorState transitions
// =============================================================

#[test]
fn default_state_is_idle() {
    assert_eq!(PredictorState::default().status(), PredictorStatus::Idle);
}

#[test]
fn second_begin_while_busy_is_rejected() {
    let mut state = PredictorState::default();
    state.begin(RequestKind::File).unwrap();
    assert_eq!(state.begin(RequestKind::Samples), Err(SubmitError::Busy));
    assert_eq!(state.pending(), Some(RequestKind::File));
}

#[test]
fn invalid_form_sets_error_without_ticket() {
    let mut state = PredictorState::default();
    assert!(matches!(state.begin_manual(), Err(SubmitError::Form(_))));
    assert_eq!(state.status(), PredictorStatus::Error);
    assert!(!state.is_busy());
}

#[test]
fn finish_with_stale_ticket_is_ignored() {
    let mut state = PredictorState::default();
    let ticket = state.begin(RequestKind::Samples).unwrap();
    state.reset();
    assert!(!state.finish(ticket, Ok(vec![result(true, 0.9)])));
    assert_eq!(state.status(), PredictorStatus::Idle);
}

#[test]
fn batch_rows_are_one_based_and_capped() {
    let mut state = PredictorState::default();
    let ticket = state.begin(RequestKind::File).unwrap();
    state.finish(ticket, Ok((0..13).map(|_| result(false, 0.2)).collect()));

    let rows = state.batch_rows();
    assert_eq!(rows.len(), BATCH_PREVIEW_LIMIT);
    assert_eq!(rows.first().map(|r| r.0), Some(1));
    assert_eq!(rows.last().map(|r| r.0), Some(10));
    assert_eq!(state.batch_overflow(), 3);
}

#[test]
fn reject_file_surfaces_csv_message() {
    let mut state = PredictorState::default();
    state.reject_file("notes.txt is not a CSV file");
    assert_eq!(state.status(), PredictorStatus::Error);
    assert!(state.error().unwrap().contains("CSV"));
}

#[test]
fn description_prefers_service_text() {
    let mut state = PredictorState::default();
    assert_eq!(state.description_for(FeatureName::TransitDepth), FeatureName::TransitDepth.description());
    state.descriptions = vec![FeatureInfo {
        name: "koi_depth".into(),
        description: "Transit depth".into(),
    }];
    assert_eq!(state.description_for(FeatureName::TransitDepth), "Transit depth");
}

// =============================================================
// Controllers
// =============================================================

#[tokio::test]
async fn manual_submit_sends_twelve_keys_and_clears_batch() {
    let api = MockApi::default();
    push(&api.predictions, Ok(vec![result(false, 0.4), result(true, 0.7)]));
    push(&api.predictions, Ok(vec![result(true, 0.82)]));
    let state = RefCell::new(PredictorState::default());

    submit_file(&api, &state, csv_upload(2)).await;
    assert!(state.borrow().batch().is_some());

    state.borrow_mut().form = zero_form();
    submit_manual(&api, &state).await;

    let sent = api.sent_vectors.borrow();
    let body = serde_json::to_value(sent[0]).unwrap();
    assert_eq!(body.as_object().unwrap().len(), FeatureName::COUNT);
    assert!(body.as_object().unwrap().values().all(|v| v.as_f64() == Some(0.0)));

    let state = state.borrow();
    assert_eq!(state.status(), PredictorStatus::Result);
    assert!(state.batch().is_none());
    let single = state.single().unwrap();
    assert_eq!(single.prediction, Classification::Confirmed);
    assert!((single.probability_confirmed + single.probability_not_confirmed - 1.0).abs() < PROBABILITY_TOLERANCE);
}

#[tokio::test]
async fn manual_submit_with_invalid_form_makes_no_request() {
    let api = MockApi::default();
    let state = RefCell::new(PredictorState::default());
    submit_manual(&api, &state).await;
    assert!(api.calls.borrow().is_empty());
    assert_eq!(state.borrow().status(), PredictorStatus::Error);
}

#[tokio::test]
async fn manual_submit_failure_shows_generic_message() {
    let api = MockApi::default();
    push(&api.predictions, Err(server_error("Model not trained")));
    let state = RefCell::new(PredictorState::default());
    state.borrow_mut().form = zero_form();

    submit_manual(&api, &state).await;
    let state = state.borrow();
    assert_eq!(state.status(), PredictorStatus::Error);
    assert_eq!(state.error(), Some("Prediction failed. Please check your input values."));
}

#[tokio::test]
async fn three_row_csv_makes_one_call_with_indexed_rows() {
    let api = MockApi::default();
    push(
        &api.predictions,
        Ok(vec![result(true, 0.9), result(false, 0.1), result(true, 0.6)]),
    );
    let state = RefCell::new(PredictorState::default());
    let ticket = state.borrow_mut().begin(RequestKind::Manual).unwrap();
    state.borrow_mut().finish(ticket, Ok(vec![result(true, 0.8)]));

    submit_file(&api, &state, csv_upload(3)).await;

    assert_eq!(api.count("predict_file"), 1);
    let state = state.borrow();
    assert!(state.single().is_none());
    let indices: Vec<usize> = state.batch_rows().iter().map(|(i, _)| *i).collect();
    assert_eq!(indices, vec![1, 2, 3]);
}

#[tokio::test]
async fn file_failure_shows_file_message() {
    let api = MockApi::default();
    push(&api.predictions, Err(ApiError::Network("refused".into())));
    let state = RefCell::new(PredictorState::default());

    submit_file(&api, &state, csv_upload(1)).await;
    assert_eq!(
        state.borrow().error(),
        Some("File prediction failed. Please check the file format.")
    );
}

#[tokio::test]
async fn samples_are_batch_predicted() {
    let api = MockApi::default();
    let mut incomplete = sample_record();
    incomplete.remove("koi_depth");
    push(&api.samples, Ok(vec![sample_record(), incomplete, sample_record()]));
    push(&api.predictions, Ok(vec![result(true, 0.9), result(true, 0.8)]));
    let state = RefCell::new(PredictorState::default());

    submit_samples(&api, &state).await;

    assert_eq!(api.count("batch_predict"), 1);
    assert_eq!(api.sent_vectors.borrow().len(), 2);
    assert_eq!(state.borrow().batch().map(<[_]>::len), Some(2));
}

#[tokio::test]
async fn samples_fetch_failure_ends_in_error() {
    let api = MockApi::default();
    push(&api.samples, Err(server_error("missing")));
    let state = RefCell::new(PredictorState::default());

    submit_samples(&api, &state).await;
    assert_eq!(api.count("batch_predict"), 0);
    assert_eq!(state.borrow().status(), PredictorStatus::Error);
}

#[tokio::test]
async fn load_sample_prefills_from_first_row() {
    let api = MockApi::default();
    push(&api.samples, Ok(vec![sample_record()]));
    let state = RefCell::new(PredictorState::default());

    load_sample(&api, &state).await;
    let state = state.borrow();
    assert!(!state.sample_loading);
    assert_eq!(state.form.get(FeatureName::TransitDepth), "615.8");
    assert!(state.form.parse().is_ok());
}

#[tokio::test]
async fn load_descriptions_keeps_catalog_on_failure() {
    let api = MockApi::default();
    push(&api.features, Err(ApiError::Network("offline".into())));
    let state = RefCell::new(PredictorState::default());

    load_descriptions(&api, &state).await;
    assert!(state.borrow().descriptions.is_empty());
    assert_eq!(
        state.borrow().description_for(FeatureName::InsolationFlux),
        FeatureName::InsolationFlux.description()
    );
}

#[tokio::test]
async fn reset_during_request_discards_response() {
    let api = MockApi::default();
    push(&api.predictions, Ok(vec![result(true, 0.9)]));
    let state = Rc::new(RefCell::new(PredictorState::default()));
    state.borrow_mut().form = zero_form();
    let during = Rc::clone(&state);
    *api.during_call.borrow_mut() = Some(Box::new(move || during.borrow_mut().reset()));

    submit_manual(&api, &*state).await;
    assert_eq!(state.borrow().status(), PredictorStatus::Idle);
    assert!(state.borrow().single().is_none());
}
