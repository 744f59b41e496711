use super::*;

#[test]
fn percent_scales_and_rounds() {
    assert_eq!(percent(0.95, 2), "95.00%");
    assert_eq!(percent(0.123_456, 1), "12.3%");
    assert_eq!(percent(1.0, 0), "100%");
}

#[test]
fn cv_summary_joins_mean_and_std() {
    assert_eq!(cv_summary(0.88, 0.02), "88.00% ± 2.00%");
}

#[test]
fn count_groups_thousands() {
    assert_eq!(count(0), "0");
    assert_eq!(count(999), "999");
    assert_eq!(count(1000), "1,000");
    assert_eq!(count(1_234_567), "1,234,567");
}
