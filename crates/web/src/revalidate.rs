//! The cache-invalidation collaborator.
//!
//! The action pipeline marks a listing path stale exactly once after a
//! successful mutation. The production wiring and the tests share one
//! recording implementation, so the single-revalidation property stays
//! observable everywhere.

use std::sync::Mutex;

/// Marks cached renderings of a logical path stale.
pub trait Revalidator: Send + Sync {
    fn revalidate(&self, path: &str);
}

/// Records revalidated paths and emits a debug event per call.
#[derive(Debug, Default)]
pub struct RevalidationLog {
    paths: Mutex<Vec<String>>,
}

impl RevalidationLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths revalidated so far, in call order.
    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

impl Revalidator for RevalidationLog {
    fn revalidate(&self, path: &str) {
        tracing::debug!(path, "revalidated listing path");
        self.paths.lock().unwrap().push(path.to_string());
    }
}
