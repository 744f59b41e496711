use std::collections::HashMap;

use super::*;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults_when_unset() {
    let cfg = HostConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.api_base, "http://localhost:5000/api");
}

#[test]
fn reads_port_and_trims_base_url() {
    let cfg = HostConfig::from_lookup(lookup(&[("PORT", "8080"), ("EXODASH_API_BASE_URL", " https://svc.example/api/ ")]))
        .unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.api_base, "https://svc.example/api");
}

#[test]
fn blank_values_fall_back_to_defaults() {
    let cfg = HostConfig::from_lookup(lookup(&[("PORT", "  "), ("EXODASH_API_BASE_URL", "")])).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.api_base, "http://localhost:5000/api");
}

#[test]
fn rejects_invalid_port() {
    for raw in ["abc", "0", "70000", "-1"] {
        let err = HostConfig::from_lookup(lookup(&[("PORT", raw)])).unwrap_err();
        assert_eq!(err, ConfigError::InvalidPort(raw.to_owned()));
    }
}
