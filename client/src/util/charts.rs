//! Chart geometry for the dashboard.
//!
//! Pure functions turning a metrics snapshot into bar widths and matrix
//! cells; components only map them to markup.

use contract::{ConfusionMatrix, FeatureName, MetricsSnapshot};

#[cfg(test)]
#[path = "charts_test.rs"]
mod charts_test;

/// Bars shown in the importance chart.
pub const IMPORTANCE_BAR_LIMIT: usize = 8;

#[derive(Clone, Debug, PartialEq)]
pub struct ImportanceBar {
    pub label: String,
    pub weight: f64,
    /// Width relative to the heaviest bar, `0..=100`.
    pub width: f64,
}

/// Top features by weight, scaled against the largest.
pub fn importance_bars(snapshot: &MetricsSnapshot, limit: usize) -> Vec<ImportanceBar> {
    let ranked = snapshot.ranked_importance();
    let max = ranked.first().map_or(0.0, |(_, w)| *w);
    ranked
        .into_iter()
        .take(limit)
        .map(|(key, weight)| ImportanceBar {
            label: feature_label(key),
            weight,
            width: if max > 0.0 { weight / max * 100.0 } else { 0.0 },
        })
        .collect()
}

/// Display label for a service feature key.
pub fn feature_label(key: &str) -> String {
    FeatureName::from_key(key).map_or_else(|| key.trim_start_matches("koi_").to_owned(), |f| f.label().to_owned())
}

#[derive(Clone, Debug, PartialEq)]
pub struct ConfusionCell {
    pub label: &'static str,
    pub count: u64,
    /// Fraction of all evaluated samples.
    pub share: f64,
    pub correct: bool,
}

/// Cells in reading order: TN, FP, FN, TP.
pub fn confusion_cells(matrix: &ConfusionMatrix) -> [ConfusionCell; 4] {
    let total = matrix.total();
    #[allow(clippy::cast_precision_loss)]
    let share = |n: u64| if total == 0 { 0.0 } else { n as f64 / total as f64 };
    [
        ConfusionCell {
            label: "True Negative",
            count: matrix.true_negative(),
            share: share(matrix.true_negative()),
            correct: true,
        },
        ConfusionCell {
            label: "False Positive",
            count: matrix.false_positive(),
            share: share(matrix.false_positive()),
            correct: false,
        },
        ConfusionCell {
            label: "False Negative",
            count: matrix.false_negative(),
            share: share(matrix.false_negative()),
            correct: false,
        },
        ConfusionCell {
            label: "True Positive",
            count: matrix.true_positive(),
            share: share(matrix.true_positive()),
            correct: true,
        },
    ]
}
