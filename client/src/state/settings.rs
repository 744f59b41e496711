//! Settings view state: hyperparameter edits, save, and retrain.
//!
//! DESIGN
//! ======
//! Edits live in `HyperparameterForm` until a save succeeds. The saved set
//! becomes `baseline` and `pending_apply` stays raised until a retrain
//! succeeds, because the service only applies stored values when training.
//!
//! Save and retrain share one busy slot so a retrain never races a
//! half-written parameter update.
//!
//! ERROR HANDLING
//! ==============
//! Failures are logged and shown as a fixed notice; the cached metrics
//! snapshot is only touched after the service reports success.

use contract::{ApiError, CsvUpload, HyperparameterSet, ModelMetrics, PredictionApi};

use super::cache::{ModelCache, ReadOutcome, load_snapshot};
use super::handle::StateHandle;

#[cfg(test)]
#[path = "settings_test.rs"]
mod settings_test;

// =============================================================================
// KNOBS
// =============================================================================

/// Ensemble family a knob belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelFamily {
    RandomForest,
    XgBoost,
}

impl ModelFamily {
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Self::RandomForest => "Random Forest",
            Self::XgBoost => "XGBoost",
        }
    }

    #[must_use]
    pub fn knobs(self) -> &'static [Knob] {
        match self {
            Self::RandomForest => &[Knob::RfEstimators, Knob::RfMaxDepth, Knob::RfMinSamplesSplit],
            Self::XgBoost => &[Knob::XgbEstimators, Knob::XgbMaxDepth, Knob::XgbLearningRate],
        }
    }
}

/// One editable hyperparameter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Knob {
    RfEstimators,
    RfMaxDepth,
    RfMinSamplesSplit,
    XgbEstimators,
    XgbMaxDepth,
    XgbLearningRate,
}

impl Knob {
    pub const ALL: [Self; 6] = [
        Self::RfEstimators,
        Self::RfMaxDepth,
        Self::RfMinSamplesSplit,
        Self::XgbEstimators,
        Self::XgbMaxDepth,
        Self::XgbLearningRate,
    ];

    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::RfEstimators => "rf_n_estimators",
            Self::RfMaxDepth => "rf_max_depth",
            Self::RfMinSamplesSplit => "rf_min_samples_split",
            Self::XgbEstimators => "xgb_n_estimators",
            Self::XgbMaxDepth => "xgb_max_depth",
            Self::XgbLearningRate => "xgb_learning_rate",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::RfEstimators | Self::XgbEstimators => "Number of Estimators",
            Self::RfMaxDepth | Self::XgbMaxDepth => "Max Depth",
            Self::RfMinSamplesSplit => "Min Samples Split",
            Self::XgbLearningRate => "Learning Rate",
        }
    }

    #[must_use]
    pub fn help(self) -> &'static str {
        match self {
            Self::RfEstimators => "Number of trees in the forest",
            Self::RfMaxDepth => "Maximum depth of each tree",
            Self::RfMinSamplesSplit => "Minimum samples required to split a node",
            Self::XgbEstimators => "Number of boosting rounds",
            Self::XgbMaxDepth => "Maximum tree depth for base learners",
            Self::XgbLearningRate => "Step size shrinkage",
        }
    }

    #[must_use]
    pub fn family(self) -> ModelFamily {
        match self {
            Self::RfEstimators | Self::RfMaxDepth | Self::RfMinSamplesSplit => ModelFamily::RandomForest,
            Self::XgbEstimators | Self::XgbMaxDepth | Self::XgbLearningRate => ModelFamily::XgBoost,
        }
    }

    /// HTML `step` attribute for the input.
    #[must_use]
    pub fn step(self) -> &'static str {
        match self {
            Self::XgbLearningRate => "0.01",
            _ => "1",
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    fn min_integer(self) -> u32 {
        match self {
            Self::RfMinSamplesSplit => 2,
            _ => 1,
        }
    }
}

/// Validation failure for one knob.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum HyperparameterError {
    #[error("{} ({}) is required", .0.label(), .0.family().title())]
    Empty(Knob),
    #[error("{} ({}) must be a whole number, got `{raw}`", .knob.label(), .knob.family().title())]
    NotInteger { knob: Knob, raw: String },
    #[error("{} ({}) must be at least {min}", .knob.label(), .knob.family().title())]
    BelowMinimum { knob: Knob, min: u32 },
    #[error("{} ({}) must be a number greater than 0", .0.label(), .0.family().title())]
    NotPositive(Knob),
}

/// Raw text of the six knob inputs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HyperparameterForm {
    values: [String; 6],
}

impl HyperparameterForm {
    #[must_use]
    pub fn from_set(set: &HyperparameterSet) -> Self {
        let mut form = Self::default();
        form.fill(set);
        form
    }

    #[must_use]
    pub fn get(&self, knob: Knob) -> &str {
        &self.values[knob.index()]
    }

    pub fn set(&mut self, knob: Knob, value: impl Into<String>) {
        self.values[knob.index()] = value.into();
    }

    pub fn fill(&mut self, set: &HyperparameterSet) {
        self.set(Knob::RfEstimators, set.rf_n_estimators.to_string());
        self.set(Knob::RfMaxDepth, set.rf_max_depth.to_string());
        self.set(Knob::RfMinSamplesSplit, set.rf_min_samples_split.to_string());
        self.set(Knob::XgbEstimators, set.xgb_n_estimators.to_string());
        self.set(Knob::XgbMaxDepth, set.xgb_max_depth.to_string());
        self.set(Knob::XgbLearningRate, set.xgb_learning_rate.to_string());
    }

    pub fn parse(&self) -> Result<HyperparameterSet, HyperparameterError> {
        Ok(HyperparameterSet {
            rf_n_estimators: self.integer(Knob::RfEstimators)?,
            rf_max_depth: self.integer(Knob::RfMaxDepth)?,
            rf_min_samples_split: self.integer(Knob::RfMinSamplesSplit)?,
            xgb_n_estimators: self.integer(Knob::XgbEstimators)?,
            xgb_max_depth: self.integer(Knob::XgbMaxDepth)?,
            xgb_learning_rate: self.rate(Knob::XgbLearningRate)?,
        })
    }

    fn integer(&self, knob: Knob) -> Result<u32, HyperparameterError> {
        let raw = self.get(knob).trim();
        if raw.is_empty() {
            return Err(HyperparameterError::Empty(knob));
        }
        let value: u32 = raw.parse().map_err(|_| HyperparameterError::NotInteger {
            knob,
            raw: raw.to_owned(),
        })?;
        let min = knob.min_integer();
        if value < min {
            return Err(HyperparameterError::BelowMinimum { knob, min });
        }
        Ok(value)
    }

    fn rate(&self, knob: Knob) -> Result<f64, HyperparameterError> {
        let raw = self.get(knob).trim();
        if raw.is_empty() {
            return Err(HyperparameterError::Empty(knob));
        }
        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() && value > 0.0 => Ok(value),
            _ => Err(HyperparameterError::NotPositive(knob)),
        }
    }
}

// =============================================================================
// STATE
// =============================================================================

/// Retrain lifecycle.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum RetrainStatus {
    #[default]
    Idle,
    Retraining,
    Updated(ModelMetrics),
    Error,
}

/// Banner shown under the settings form.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub success: bool,
}

impl Notice {
    fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            success: true,
        }
    }

    fn failure(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            success: false,
        }
    }
}

/// Why a save or retrain was refused before any request.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("another settings request is in progress")]
    Busy,
    #[error(transparent)]
    Invalid(#[from] HyperparameterError),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SettingsState {
    pub form: HyperparameterForm,
    edited: bool,
    baseline: Option<HyperparameterSet>,
    pending_apply: bool,
    saving: Option<(u64, HyperparameterSet)>,
    retraining: Option<u64>,
    next_ticket: u64,
    retrain: RetrainStatus,
    notice: Option<Notice>,
}

impl SettingsState {
    /// Fresh state with the service defaults in the form.
    #[must_use]
    pub fn new() -> Self {
        Self {
            form: HyperparameterForm::from_set(&HyperparameterSet::default()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.saving.is_some() || self.retraining.is_some()
    }

    #[must_use]
    pub fn is_saving(&self) -> bool {
        self.saving.is_some()
    }

    #[must_use]
    pub fn retrain_status(&self) -> &RetrainStatus {
        &self.retrain
    }

    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Last set the service is known to have stored.
    #[must_use]
    pub fn baseline(&self) -> Option<&HyperparameterSet> {
        self.baseline.as_ref()
    }

    /// Saved values not yet applied by a retrain.
    #[must_use]
    pub fn pending_apply(&self) -> bool {
        self.pending_apply
    }

    #[must_use]
    pub fn is_edited(&self) -> bool {
        self.edited
    }

    pub fn edit(&mut self, knob: Knob, value: impl Into<String>) {
        self.form.set(knob, value);
        self.edited = true;
    }

    /// Adopt the service's stored set. The form follows unless the user has edited it.
    pub fn adopt(&mut self, set: &HyperparameterSet) {
        if self.saving.is_some() {
            return;
        }
        if !self.edited {
            self.form.fill(set);
        }
        self.baseline = Some(set.clone());
    }

    /// Discard edits and show the baseline (or defaults) again.
    pub fn revert(&mut self) {
        let set = self.baseline.clone().unwrap_or_default();
        self.form.fill(&set);
        self.edited = false;
    }

    pub fn begin_save(&mut self) -> Result<(u64, HyperparameterSet), SettingsError> {
        if self.is_busy() {
            return Err(SettingsError::Busy);
        }
        let set = match self.form.parse() {
            Ok(set) => set,
            Err(err) => {
                self.notice = Some(Notice::failure(err.to_string()));
                return Err(err.into());
            }
        };
        self.next_ticket += 1;
        self.saving = Some((self.next_ticket, set.clone()));
        self.notice = None;
        Ok((self.next_ticket, set))
    }

    /// Returns `true` when the save was current and succeeded.
    pub fn finish_save(&mut self, ticket: u64, outcome: Result<(), ApiError>) -> bool {
        let Some((_, set)) = self.saving.take_if(|(t, _)| *t == ticket) else {
            return false;
        };
        match outcome {
            Ok(()) => {
                self.baseline = Some(set);
                self.pending_apply = true;
                self.edited = false;
                self.notice = Some(Notice::success(
                    "Hyperparameters updated successfully! Retrain the model to apply changes.",
                ));
                true
            }
            Err(err) => {
                log::warn!("hyperparameter update failed: {err}");
                self.notice = Some(Notice::failure("Failed to update hyperparameters."));
                false
            }
        }
    }

    pub fn begin_retrain(&mut self) -> Result<u64, SettingsError> {
        if self.is_busy() {
            return Err(SettingsError::Busy);
        }
        self.next_ticket += 1;
        self.retraining = Some(self.next_ticket);
        self.retrain = RetrainStatus::Retraining;
        self.notice = None;
        Ok(self.next_ticket)
    }

    /// Returns the fresh metrics when the retrain was current and succeeded.
    pub fn finish_retrain(&mut self, ticket: u64, outcome: Result<ModelMetrics, ApiError>) -> Option<ModelMetrics> {
        if self.retraining != Some(ticket) {
            return None;
        }
        self.retraining = None;
        match outcome {
            Ok(metrics) => {
                self.pending_apply = false;
                self.notice = Some(Notice::success(format!(
                    "Model retrained successfully! New accuracy: {}",
                    crate::util::format::percent(metrics.accuracy, 2)
                )));
                self.retrain = RetrainStatus::Updated(metrics.clone());
                Some(metrics)
            }
            Err(err) => {
                log::warn!("retrain failed: {err}");
                self.retrain = RetrainStatus::Error;
                self.notice = Some(Notice::failure("Failed to retrain model."));
                None
            }
        }
    }

    /// Clear a terminal retrain status back to idle.
    pub fn acknowledge(&mut self) {
        if self.retraining.is_none() {
            self.retrain = RetrainStatus::Idle;
            self.notice = None;
        }
    }
}

// =============================================================================
// CONTROLLERS
// =============================================================================

/// Store the form's values on the service and invalidate the shared cache.
pub async fn save_hyperparameters<A, S, C>(api: &A, settings: &S, cache: &C)
where
    A: PredictionApi + ?Sized,
    S: StateHandle<SettingsState>,
    C: StateHandle<ModelCache>,
{
    let Some(Ok((ticket, set))) = settings.update_with(SettingsState::begin_save) else {
        return;
    };
    let outcome = api.update_hyperparameters(&set).await;
    if settings.update_with(|s| s.finish_save(ticket, outcome)) == Some(true) {
        cache.update_with(ModelCache::invalidate);
    }
}

/// Retrain, optionally on a replacement training file, then refetch metrics.
pub async fn retrain_model<A, S, C>(api: &A, settings: &S, cache: &C, upload: Option<CsvUpload>)
where
    A: PredictionApi + ?Sized,
    S: StateHandle<SettingsState>,
    C: StateHandle<ModelCache>,
{
    let Some(Ok(ticket)) = settings.update_with(SettingsState::begin_retrain) else {
        return;
    };
    let outcome = api.retrain(upload.as_ref()).await;
    let Some(Some(metrics)) = settings.update_with(|s| s.finish_retrain(ticket, outcome)) else {
        return;
    };
    cache.update_with(|c| c.apply_retrain(metrics));
    load_snapshot(api, cache).await;
}

/// Prefill from the cached snapshot, fetching it if needed.
///
/// Only a fresh snapshot is trusted. A stale one may predate a save, so
/// anything else falls back to the hyperparameters endpoint (also the path
/// before the first training run).
pub async fn load_settings<A, S, C>(api: &A, settings: &S, cache: &C)
where
    A: PredictionApi + ?Sized,
    S: StateHandle<SettingsState>,
    C: StateHandle<ModelCache>,
{
    let cached = match load_snapshot(api, cache).await {
        ReadOutcome::Hit | ReadOutcome::Fetched => cache
            .peek(|c| c.snapshot().filter(|_| c.is_fresh()).map(|s| s.hyperparameters.clone()))
            .flatten(),
        ReadOutcome::Joined | ReadOutcome::Failed | ReadOutcome::Discarded => None,
    };
    let stored = match cached {
        Some(set) => set,
        None => match api.get_hyperparameters().await {
            Ok(set) => set,
            Err(err) => {
                log::warn!("stored hyperparameters unavailable: {err}");
                return;
            }
        },
    };
    settings.update_with(|s| s.adopt(&stored));
}
