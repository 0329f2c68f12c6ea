//! Field Lifecycle Integration Tests
//!
//! Tests for the jsonfield facade: storage round trips, decimal fields,
//! codec substitution, defaults and sharing across threads.

mod codec_override;
mod concurrency;
mod defaults;
mod storage_round_trip;

/// Install a subscriber once so trace/warn events are rendered during tests
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();
}
