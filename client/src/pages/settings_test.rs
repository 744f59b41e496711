use super::*;
use crate::state::mock_api::snapshot;

#[test]
fn retrain_label_reflects_status() {
    assert_eq!(retrain_label(&RetrainStatus::Idle), "Retrain Model");
    assert_eq!(retrain_label(&RetrainStatus::Retraining), "Retraining...");
    assert_eq!(retrain_label(&RetrainStatus::Error), "Retrain Model");
}

#[test]
fn current_accuracy_reads_cache() {
    assert_eq!(current_accuracy(&ModelCache::default()), "Current accuracy unavailable");

    let mut cache = ModelCache::default();
    let ticket = cache.begin_fetch().unwrap();
    cache.finish_fetch(ticket, Ok(snapshot(0.9)));
    assert_eq!(current_accuracy(&cache), "Current accuracy: 90.00%");
}
