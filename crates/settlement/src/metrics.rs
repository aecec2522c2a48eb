//! Settlement metrics
//!
//! Recorded through the `metrics` facade; without an installed recorder
//! every call is a no-op.
//!
//! # Metrics
//!
//! * `settlement_records_total{kind}` - Settled computations by outcome
//! * `settlement_batches_total{state}` - Finished batches by terminal state
//! * `settlement_batch_duration_seconds` - Time from first poll to settlement

use std::time::Duration;

use ::metrics::{counter, histogram};

use crate::failure::SettlementState;
use crate::outcome::OutcomeKind;

/// Count one settled computation
pub fn record_settled(kind: OutcomeKind) {
    counter!("settlement_records_total", "kind" => kind.as_str()).increment(1);
}

/// Record a finished batch
pub fn record_batch(state: SettlementState, duration: Duration) {
    counter!("settlement_batches_total", "state" => state.as_str()).increment(1);
    histogram!("settlement_batch_duration_seconds").record(duration.as_secs_f64());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_without_recorder() {
        // No recorder installed: must not panic
        record_settled(OutcomeKind::Resolved);
        record_batch(SettlementState::SomeRejected, Duration::from_millis(5));
    }
}
