//! Progress reporting for batch processing.
//!
//! [`ProgressCallback`] keeps the aggregator independent of how progress
//! is shown. The CLI plugs in an `indicatif` bar; tests and library
//! callers use [`NullProgress`].

/// Receives progress updates while a batch is processed.
pub trait ProgressCallback: Send + Sync {
    /// Set the total number of documents in the batch.
    fn set_total(&self, total: u64);

    /// Advance progress by `delta` documents.
    fn inc(&self, delta: u64);

    /// Update the message shown next to the indicator.
    fn set_message(&self, msg: String);

    /// Mark the batch as complete.
    fn finish(&self, msg: String);
}

/// Discards every update.
pub struct NullProgress;

impl ProgressCallback for NullProgress {
    fn set_total(&self, _total: u64) {}
    fn inc(&self, _delta: u64) {}
    fn set_message(&self, _msg: String) {}
    fn finish(&self, _msg: String) {}
}
