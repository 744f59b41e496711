//! Predictor view state: manual form, CSV upload and sample batches.
//!
//! DESIGN
//! ======
//! `PredictorState` is plain data held in an `RwSignal`. A request claims a
//! ticket through `begin_*`; `finish` applies a response only while that
//! ticket is current. `reset` and a new submission both move the ticket on,
//! so at most one request's outcome is ever visible.
//!
//! ERROR HANDLING
//! ==============
//! Transport failures are logged with their detail and surfaced to the user
//! as a generic message for the request kind. Form validation failures are
//! shown verbatim since they name the offending field.

use contract::{
    ApiError, CsvUpload, FeatureInfo, FeatureName, FeatureVector, PredictionApi, PredictionResult, SampleRecord,
};
use serde_json::Value;

use super::handle::StateHandle;

#[cfg(test)]
#[path = "predictor_test.rs"]
mod predictor_test;

/// Rows shown in the batch results preview.
pub const BATCH_PREVIEW_LIMIT: usize = 10;

// =============================================================================
// FORM
// =============================================================================

/// Validation failure for one form field.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("{} is required", .0.label())]
    Empty(FeatureName),
    #[error("{} must be a number, got `{raw}`", .feature.label())]
    NotNumeric { feature: FeatureName, raw: String },
    #[error("{} must be a finite number", .0.label())]
    NotFinite(FeatureName),
}

/// Raw text of the twelve feature inputs, indexed by `FeatureName::index`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeatureForm {
    values: [String; FeatureName::COUNT],
}

impl FeatureForm {
    #[must_use]
    pub fn get(&self, name: FeatureName) -> &str {
        &self.values[name.index()]
    }

    pub fn set(&mut self, name: FeatureName, value: impl Into<String>) {
        self.values[name.index()] = value.into();
    }

    pub fn clear(&mut self) {
        self.values = Default::default();
    }

    /// Parse every field, failing on the first one in display order.
    pub fn parse(&self) -> Result<FeatureVector, FormError> {
        let mut vector = FeatureVector::default();
        for name in FeatureName::ALL {
            let raw = self.get(name).trim();
            if raw.is_empty() {
                return Err(FormError::Empty(name));
            }
            let value: f64 = raw.parse().map_err(|_| FormError::NotNumeric {
                feature: name,
                raw: raw.to_owned(),
            })?;
            if !value.is_finite() {
                return Err(FormError::NotFinite(name));
            }
            vector.set(name, value);
        }
        Ok(vector)
    }

    /// Overwrite every field from an example row. Absent or non-numeric
    /// values become blank.
    pub fn fill_from_record(&mut self, record: &SampleRecord) {
        for name in FeatureName::ALL {
            let text = match record.get(name.key()) {
                Some(Value::Number(n)) => n.to_string(),
                _ => String::new(),
            };
            self.set(name, text);
        }
    }
}

// =============================================================================
// STATE
// =============================================================================

/// Which submission path produced a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RequestKind {
    Manual,
    File,
    Samples,
}

impl RequestKind {
    fn failure_message(self) -> &'static str {
        match self {
            Self::Manual => "Prediction failed. Please check your input values.",
            Self::File => "File prediction failed. Please check the file format.",
            Self::Samples => "Sample prediction failed. Please try again.",
        }
    }
}

/// Externally visible predictor status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PredictorStatus {
    Idle,
    Predicting,
    Result,
    Error,
}

/// The latest accepted outcome. Single and batch results never coexist.
#[derive(Clone, Debug, PartialEq)]
pub enum PredictionView {
    Single(PredictionResult),
    Batch(Vec<PredictionResult>),
}

/// Why a submission was refused before any request was made.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum SubmitError {
    #[error("a prediction is already in progress")]
    Busy,
    #[error(transparent)]
    Form(#[from] FormError),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct PredictorState {
    pub form: FeatureForm,
    /// Descriptions from the service; empty until loaded.
    pub descriptions: Vec<FeatureInfo>,
    pub sample_loading: bool,
    in_flight: Option<(u64, RequestKind)>,
    next_ticket: u64,
    view: Option<PredictionView>,
    error: Option<String>,
}

impl PredictorState {
    #[must_use]
    pub fn status(&self) -> PredictorStatus {
        if self.in_flight.is_some() {
            PredictorStatus::Predicting
        } else if self.error.is_some() {
            PredictorStatus::Error
        } else if self.view.is_some() {
            PredictorStatus::Result
        } else {
            PredictorStatus::Idle
        }
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Kind of the request in flight, if any.
    #[must_use]
    pub fn pending(&self) -> Option<RequestKind> {
        self.in_flight.map(|(_, kind)| kind)
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn view(&self) -> Option<&PredictionView> {
        self.view.as_ref()
    }

    #[must_use]
    pub fn single(&self) -> Option<&PredictionResult> {
        match &self.view {
            Some(PredictionView::Single(result)) => Some(result),
            _ => None,
        }
    }

    #[must_use]
    pub fn batch(&self) -> Option<&[PredictionResult]> {
        match &self.view {
            Some(PredictionView::Batch(rows)) => Some(rows),
            _ => None,
        }
    }

    /// Batch rows with 1-based indices, capped at the preview limit.
    #[must_use]
    pub fn batch_rows(&self) -> Vec<(usize, &PredictionResult)> {
        self.batch()
            .unwrap_or_default()
            .iter()
            .take(BATCH_PREVIEW_LIMIT)
            .enumerate()
            .map(|(i, row)| (i + 1, row))
            .collect()
    }

    /// Rows not shown in the preview.
    #[must_use]
    pub fn batch_overflow(&self) -> usize {
        self.batch().map_or(0, |rows| rows.len().saturating_sub(BATCH_PREVIEW_LIMIT))
    }

    /// Description for a feature, preferring the service's text.
    #[must_use]
    pub fn description_for(&self, name: FeatureName) -> &str {
        self.descriptions
            .iter()
            .find(|info| info.name == name.key() && !info.description.is_empty())
            .map_or_else(|| name.description(), |info| info.description.as_str())
    }

    /// Claim a ticket for a new request.
    pub fn begin(&mut self, kind: RequestKind) -> Result<u64, SubmitError> {
        if self.in_flight.is_some() {
            return Err(SubmitError::Busy);
        }
        self.next_ticket += 1;
        self.in_flight = Some((self.next_ticket, kind));
        self.error = None;
        Ok(self.next_ticket)
    }

    /// Validate the form and claim a ticket for a manual prediction.
    pub fn begin_manual(&mut self) -> Result<(u64, FeatureVector), SubmitError> {
        if self.in_flight.is_some() {
            return Err(SubmitError::Busy);
        }
        let vector = match self.form.parse() {
            Ok(vector) => vector,
            Err(err) => {
                self.error = Some(err.to_string());
                return Err(err.into());
            }
        };
        let ticket = self.begin(RequestKind::Manual)?;
        Ok((ticket, vector))
    }

    /// Apply a response. Returns `false` when the ticket is no longer current.
    pub fn finish(&mut self, ticket: u64, outcome: Result<Vec<PredictionResult>, ApiError>) -> bool {
        let Some((current, kind)) = self.in_flight else {
            return false;
        };
        if current != ticket {
            return false;
        }
        self.in_flight = None;

        match outcome {
            Ok(results) => match kind {
                RequestKind::Manual => match results.into_iter().next() {
                    Some(first) => {
                        self.view = Some(PredictionView::Single(first));
                        self.error = None;
                    }
                    None => {
                        log::warn!("predict returned no results");
                        self.error = Some(kind.failure_message().to_owned());
                    }
                },
                RequestKind::File | RequestKind::Samples => {
                    self.view = Some(PredictionView::Batch(results));
                    self.error = None;
                }
            },
            Err(err) => {
                log::warn!("{kind:?} prediction failed: {err}");
                self.error = Some(kind.failure_message().to_owned());
            }
        }
        true
    }

    /// Record a file refused before upload.
    pub fn reject_file(&mut self, reason: &str) {
        if self.in_flight.is_some() {
            return;
        }
        log::warn!("file rejected: {reason}");
        self.error = Some("Only CSV files are accepted.".to_owned());
    }

    /// Return to idle and orphan any request in flight.
    pub fn reset(&mut self) {
        self.next_ticket += 1;
        self.in_flight = None;
        self.view = None;
        self.error = None;
        self.form.clear();
    }
}

// =============================================================================
// CONTROLLERS
// =============================================================================

/// Submit the manual form as one prediction.
pub async fn submit_manual<A, H>(api: &A, state: &H)
where
    A: PredictionApi + ?Sized,
    H: StateHandle<PredictorState>,
{
    let Some(Ok((ticket, vector))) = state.update_with(PredictorState::begin_manual) else {
        return;
    };
    let outcome = api.predict(&vector).await;
    state.update_with(|s| s.finish(ticket, outcome));
}

/// Upload a CSV for per-row predictions.
pub async fn submit_file<A, H>(api: &A, state: &H, upload: CsvUpload)
where
    A: PredictionApi + ?Sized,
    H: StateHandle<PredictorState>,
{
    let Some(Ok(ticket)) = state.update_with(|s| s.begin(RequestKind::File)) else {
        return;
    };
    log::info!("uploading {} ({} rows)", upload.file_name, upload.data_row_count());
    let outcome = api.predict_file(&upload).await;
    state.update_with(|s| s.finish(ticket, outcome));
}

/// Predict every row of the service's example data.
pub async fn submit_samples<A, H>(api: &A, state: &H)
where
    A: PredictionApi + ?Sized,
    H: StateHandle<PredictorState>,
{
    let Some(Ok(ticket)) = state.update_with(|s| s.begin(RequestKind::Samples)) else {
        return;
    };
    let outcome = match api.get_sample_data().await {
        Ok(records) => {
            let rows = usable_rows(&records);
            if rows.is_empty() {
                Err(ApiError::Decode("sample data had no complete rows".into()))
            } else {
                api.batch_predict(&rows).await
            }
        }
        Err(err) => Err(err),
    };
    state.update_with(|s| s.finish(ticket, outcome));
}

/// Prefill the form from the first example row.
pub async fn load_sample<A, H>(api: &A, state: &H)
where
    A: PredictionApi + ?Sized,
    H: StateHandle<PredictorState>,
{
    let started = state.update_with(|s| {
        if s.sample_loading {
            return false;
        }
        s.sample_loading = true;
        true
    });
    if started != Some(true) {
        return;
    }

    let outcome = api.get_sample_data().await;
    state.update_with(|s| {
        s.sample_loading = false;
        match outcome {
            Ok(records) => match records.first() {
                Some(first) => s.form.fill_from_record(first),
                None => log::warn!("sample data was empty"),
            },
            Err(err) => log::warn!("sample data fetch failed: {err}"),
        }
    });
}

/// Replace built-in feature descriptions with the service's.
pub async fn load_descriptions<A, H>(api: &A, state: &H)
where
    A: PredictionApi + ?Sized,
    H: StateHandle<PredictorState>,
{
    match api.get_features().await {
        Ok(features) => {
            state.update_with(|s| s.descriptions = features);
        }
        Err(err) => log::warn!("feature descriptions unavailable: {err}"),
    }
}

fn usable_rows(records: &[SampleRecord]) -> Vec<FeatureVector> {
    records
        .iter()
        .filter_map(|record| match FeatureVector::from_record(record) {
            Ok(vector) => Some(vector),
            Err(err) => {
                log::warn!("skipping sample row: {err}");
                None
            }
        })
        .collect()
}
