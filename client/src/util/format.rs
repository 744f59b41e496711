//! Number formatting for metric displays.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

/// Render a `0..=1` fraction as a percentage, e.g. `0.9512` -> `"95.12%"`.
pub fn percent(fraction: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, fraction * 100.0)
}

/// Cross-validation summary, e.g. `"88.00% ± 2.00%"`.
pub fn cv_summary(mean: f64, std: f64) -> String {
    format!("{} ± {}", percent(mean, 2), percent(std, 2))
}

/// Thousands-separated integer for confusion counts.
pub fn count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
