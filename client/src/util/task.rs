//! Browser-only task spawning for controllers.

use std::future::Future;

use crate::net::api::HttpApi;

#[cfg(test)]
#[path = "task_test.rs"]
mod task_test;

/// Run a controller against the service on the browser event loop.
///
/// Server rendering never issues service requests, so outside `hydrate` the
/// task is dropped without being polled.
pub fn spawn_request<F, Fut>(api: &HttpApi, task: F)
where
    F: FnOnce(HttpApi) -> Fut,
    Fut: Future<Output = ()> + 'static,
{
    #[cfg(feature = "hydrate")]
    {
        leptos::task::spawn_local(task(api.clone()));
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (api, task);
    }
}
