use std::time::Duration;

use crate::StoreErrorCode;

/// Hooks a backend calls around each read. All methods default to no-ops.
pub trait StoreInstrumentation: Send + Sync + 'static {
    fn observe_fetch(&self, _backend: &str, _collection: &str, _documents: usize, _latency: Duration) {}
    fn observe_error(&self, _backend: &str, _collection: &str, _code: StoreErrorCode) {}
}

#[derive(Debug, Default)]
pub struct NoopInstrumentation;

impl StoreInstrumentation for NoopInstrumentation {}
