//! Feature catalog and the fixed 12-field feature vector.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every manual prediction submits exactly one [`FeatureVector`]. The service
//! keys its input columns by the Kepler `koi_*` names, so the wire names here
//! are fixed; display labels and units are client-side metadata only.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One of the 12 transit/stellar measurements the classifier consumes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FeatureName {
    OrbitalPeriod,
    TransitEpoch,
    ImpactParameter,
    TransitDuration,
    TransitDepth,
    PlanetaryRadius,
    EquilibriumTemperature,
    InsolationFlux,
    SignalToNoise,
    StellarTemperature,
    StellarGravity,
    StellarRadius,
}

impl FeatureName {
    /// Number of features in a vector.
    pub const COUNT: usize = 12;

    /// All features in the order the service lists its input columns.
    pub const ALL: [Self; Self::COUNT] = [
        Self::OrbitalPeriod,
        Self::TransitEpoch,
        Self::ImpactParameter,
        Self::TransitDuration,
        Self::TransitDepth,
        Self::PlanetaryRadius,
        Self::EquilibriumTemperature,
        Self::InsolationFlux,
        Self::SignalToNoise,
        Self::StellarTemperature,
        Self::StellarGravity,
        Self::StellarRadius,
    ];

    /// Column name used on the wire.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::OrbitalPeriod => "koi_period",
            Self::TransitEpoch => "koi_time0bk",
            Self::ImpactParameter => "koi_impact",
            Self::TransitDuration => "koi_duration",
            Self::TransitDepth => "koi_depth",
            Self::PlanetaryRadius => "koi_prad",
            Self::EquilibriumTemperature => "koi_teq",
            Self::InsolationFlux => "koi_insol",
            Self::SignalToNoise => "koi_model_snr",
            Self::StellarTemperature => "koi_steff",
            Self::StellarGravity => "koi_slogg",
            Self::StellarRadius => "koi_srad",
        }
    }

    /// Short form label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::OrbitalPeriod => "Orbital Period",
            Self::TransitEpoch => "Transit Epoch",
            Self::ImpactParameter => "Impact Parameter",
            Self::TransitDuration => "Transit Duration",
            Self::TransitDepth => "Transit Depth",
            Self::PlanetaryRadius => "Planetary Radius",
            Self::EquilibriumTemperature => "Equilibrium Temp",
            Self::InsolationFlux => "Insolation Flux",
            Self::SignalToNoise => "Signal-to-Noise",
            Self::StellarTemperature => "Stellar Temp",
            Self::StellarGravity => "Stellar Gravity",
            Self::StellarRadius => "Stellar Radius",
        }
    }

    /// Measurement unit, empty for dimensionless quantities.
    #[must_use]
    pub fn unit(self) -> &'static str {
        match self {
            Self::OrbitalPeriod => "days",
            Self::TransitEpoch => "BJD - 2454833",
            Self::ImpactParameter | Self::SignalToNoise => "",
            Self::TransitDuration => "hours",
            Self::TransitDepth => "ppm",
            Self::PlanetaryRadius => "Earth radii",
            Self::EquilibriumTemperature | Self::StellarTemperature => "K",
            Self::InsolationFlux => "Earth flux",
            Self::StellarGravity => "log10(cm/s²)",
            Self::StellarRadius => "Solar radii",
        }
    }

    /// Built-in description, used when the service feature list is unavailable.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::OrbitalPeriod => "Orbital period (days)",
            Self::TransitEpoch => "Transit epoch (BJD - 2454833)",
            Self::ImpactParameter => "Impact parameter",
            Self::TransitDuration => "Transit duration (hours)",
            Self::TransitDepth => "Transit depth (ppm)",
            Self::PlanetaryRadius => "Planetary radius (Earth radii)",
            Self::EquilibriumTemperature => "Equilibrium temperature (K)",
            Self::InsolationFlux => "Insolation flux (Earth flux)",
            Self::SignalToNoise => "Transit signal-to-noise ratio",
            Self::StellarTemperature => "Stellar effective temperature (K)",
            Self::StellarGravity => "Stellar surface gravity (log10(cm/s²))",
            Self::StellarRadius => "Stellar radius (Solar radii)",
        }
    }

    /// Position of this feature in [`FeatureName::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Look up a feature by its wire key.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }
}

impl std::fmt::Display for FeatureName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

/// Error returned when a JSON record cannot be read as a [`FeatureVector`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    /// The record has no usable numeric value for this feature.
    #[error("missing or non-numeric feature `{0}`")]
    Missing(FeatureName),
}

/// The 12 numeric inputs for a single classification.
///
/// Serializes to a JSON object with exactly one key per feature.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub koi_period: f64,
    pub koi_time0bk: f64,
    pub koi_impact: f64,
    pub koi_duration: f64,
    pub koi_depth: f64,
    pub koi_prad: f64,
    pub koi_teq: f64,
    pub koi_insol: f64,
    pub koi_model_snr: f64,
    pub koi_steff: f64,
    pub koi_slogg: f64,
    pub koi_srad: f64,
}

impl FeatureVector {
    /// Read one feature value.
    #[must_use]
    pub fn get(&self, name: FeatureName) -> f64 {
        match name {
            FeatureName::OrbitalPeriod => self.koi_period,
            FeatureName::TransitEpoch => self.koi_time0bk,
            FeatureName::ImpactParameter => self.koi_impact,
            FeatureName::TransitDuration => self.koi_duration,
            FeatureName::TransitDepth => self.koi_depth,
            FeatureName::PlanetaryRadius => self.koi_prad,
            FeatureName::EquilibriumTemperature => self.koi_teq,
            FeatureName::InsolationFlux => self.koi_insol,
            FeatureName::SignalToNoise => self.koi_model_snr,
            FeatureName::StellarTemperature => self.koi_steff,
            FeatureName::StellarGravity => self.koi_slogg,
            FeatureName::StellarRadius => self.koi_srad,
        }
    }

    /// Overwrite one feature value.
    pub fn set(&mut self, name: FeatureName, value: f64) {
        let slot = match name {
            FeatureName::OrbitalPeriod => &mut self.koi_period,
            FeatureName::TransitEpoch => &mut self.koi_time0bk,
            FeatureName::ImpactParameter => &mut self.koi_impact,
            FeatureName::TransitDuration => &mut self.koi_duration,
            FeatureName::TransitDepth => &mut self.koi_depth,
            FeatureName::PlanetaryRadius => &mut self.koi_prad,
            FeatureName::EquilibriumTemperature => &mut self.koi_teq,
            FeatureName::InsolationFlux => &mut self.koi_insol,
            FeatureName::SignalToNoise => &mut self.koi_model_snr,
            FeatureName::StellarTemperature => &mut self.koi_steff,
            FeatureName::StellarGravity => &mut self.koi_slogg,
            FeatureName::StellarRadius => &mut self.koi_srad,
        };
        *slot = value;
    }

    /// Build a vector from a loosely-typed record such as a sample-data row.
    ///
    /// Keys outside the catalog are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Missing`] for the first feature whose value is
    /// absent or not a JSON number.
    pub fn from_record(record: &Map<String, Value>) -> Result<Self, RecordError> {
        let mut vector = Self::default();
        for name in FeatureName::ALL {
            let value = record
                .get(name.key())
                .and_then(Value::as_f64)
                .ok_or(RecordError::Missing(name))?;
            vector.set(name, value);
        }
        Ok(vector)
    }
}

#[cfg(test)]
#[path = "features_test.rs"]
mod tests;
