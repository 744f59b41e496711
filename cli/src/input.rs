//! Command input parsing: feature overrides, JSON payloads and CSV files.

use std::io::Read;
use std::path::Path;

use contract::{CsvUpload, FeatureName, FeatureVector, SampleRecord};
use serde_json::{Number, Value};

use crate::CliError;

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

/// Parse `NAME=VALUE`. `NAME` may omit the `koi_` prefix.
pub fn parse_field(raw: &str) -> Result<(FeatureName, f64), CliError> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| CliError::BadField(raw.to_owned()))?;
    let name = name.trim();
    let feature = FeatureName::from_key(name)
        .or_else(|| FeatureName::from_key(&format!("koi_{name}")))
        .ok_or_else(|| CliError::UnknownFeature(name.to_owned()))?;
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|_| CliError::BadField(raw.to_owned()))?;
    if !value.is_finite() {
        return Err(CliError::BadField(raw.to_owned()));
    }
    Ok((feature, value))
}

/// Read a file, or stdin for `-`.
pub fn read_source(path: &str) -> Result<String, CliError> {
    let io_error = |source| CliError::Io {
        path: path.to_owned(),
        source,
    };
    if path == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text).map_err(io_error)?;
        Ok(text)
    } else {
        std::fs::read_to_string(path).map_err(io_error)
    }
}

/// Parse a single JSON object.
pub fn record_from_json(text: &str) -> Result<SampleRecord, CliError> {
    match serde_json::from_str::<Value>(text)? {
        Value::Object(record) => Ok(record),
        _ => Err(CliError::Shape("object")),
    }
}

/// Parse a JSON array of feature objects.
pub fn vectors_from_json(text: &str) -> Result<Vec<FeatureVector>, CliError> {
    let Value::Array(rows) = serde_json::from_str::<Value>(text)? else {
        return Err(CliError::Shape("array of objects"));
    };
    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            let record = row.as_object().ok_or(CliError::Shape("array of objects"))?;
            FeatureVector::from_record(record).map_err(|source| CliError::Record { row: index + 1, source })
        })
        .collect()
}

/// Apply overrides on top of an optional base record and build a vector.
pub fn build_vector(base: Option<SampleRecord>, overrides: &[(FeatureName, f64)]) -> Result<FeatureVector, CliError> {
    let mut record = base.unwrap_or_default();
    for (feature, value) in overrides {
        let number = Number::from_f64(*value).ok_or_else(|| CliError::BadField(value.to_string()))?;
        record.insert(feature.key().to_owned(), Value::Number(number));
    }
    Ok(FeatureVector::from_record(&record)?)
}

/// Load a CSV file for upload.
pub fn load_csv(path: &Path) -> Result<CsvUpload, CliError> {
    let bytes = std::fs::read(path).map_err(|source| CliError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let name = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
    Ok(CsvUpload::new(name, "", bytes)?)
}
