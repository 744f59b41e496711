//! Service base URL discovery.
//!
//! The host renders `<meta name="exodash-api-base" content="...">` into the
//! SSR shell; the browser transport reads it once at startup.

use contract::DEFAULT_API_BASE;

#[cfg(test)]
#[path = "api_base_test.rs"]
mod api_base_test;

/// Base URL provided as context by the SSR host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiBase(pub String);

/// `name` of the meta tag carrying the base URL.
pub const META_NAME: &str = "exodash-api-base";

/// Trim a configured base URL, falling back to the default when blank.
pub fn normalize(raw: Option<&str>) -> String {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(base) => base.trim_end_matches('/').to_owned(),
        None => DEFAULT_API_BASE.to_owned(),
    }
}

/// Base URL from the page's meta tag.
pub fn resolve() -> String {
    #[cfg(feature = "hydrate")]
    {
        let content = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.query_selector(&format!("meta[name=\"{META_NAME}\"]")).ok().flatten())
            .and_then(|el| el.get_attribute("content"));
        normalize(content.as_deref())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        normalize(None)
    }
}
