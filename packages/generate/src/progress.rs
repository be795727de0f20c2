//! Progress reporting for dataset generation.
//!
//! [`ProgressCallback`] keeps the generator independent of how progress is
//! rendered. The CLI supplies an `indicatif` bar; tests and the server use
//! [`NullProgress`].

/// Receives progress updates from a long-running generation.
///
/// Implementations must be `Send + Sync` so they can be shared behind an
/// [`Arc`](std::sync::Arc).
pub trait ProgressCallback: Send + Sync {
    /// Set the total expected units of work.
    fn set_total(&self, total: u64);

    /// Advance progress by `delta` units.
    fn inc(&self, delta: u64);

    /// Update the message displayed alongside the indicator.
    fn set_message(&self, msg: String);

    /// Mark progress as complete with a final message.
    fn finish(&self, msg: String);
}

/// Ignores all progress updates.
pub struct NullProgress;

impl ProgressCallback for NullProgress {
    fn set_total(&self, _total: u64) {}
    fn inc(&self, _delta: u64) {}
    fn set_message(&self, _msg: String) {}
    fn finish(&self, _msg: String) {}
}
