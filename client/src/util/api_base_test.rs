use super::*;

#[test]
fn blank_values_use_default() {
    assert_eq!(normalize(None), DEFAULT_API_BASE);
    assert_eq!(normalize(Some("   ")), DEFAULT_API_BASE);
}

#[test]
fn trailing_slashes_are_trimmed() {
    assert_eq!(normalize(Some(" https://exo.example/api/ ")), "https://exo.example/api");
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn resolve_outside_browser_is_default() {
    assert_eq!(resolve(), DEFAULT_API_BASE);
}
