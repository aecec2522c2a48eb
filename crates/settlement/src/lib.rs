//! Settle-all combinator
//!
//! Runs a batch of futures concurrently, waits for every one of them to
//! settle, and reports each outcome as a [`SettlementRecord`] annotated with
//! caller metadata.
//!
//! # Modules
//!
//! - [`aggregator`] - `settle_all` and `settle_all_plain`
//! - [`annotate`] - Optional success/failure annotators
//! - [`outcome`] - Outcome tags and settlement records
//! - [`failure`] - Aggregate failure and batch classification
//! - [`metrics`] - Settlement counters and timings

pub mod aggregator;
pub mod annotate;
pub mod failure;
pub mod metrics;
pub mod outcome;

pub use aggregator::{settle_all, settle_all_plain};
pub use annotate::{annotation_from_value, Annotation, Annotators};
pub use failure::{classify, state_of, AggregateFailure, SettleResult, SettlementState};
pub use outcome::{OutcomeKind, SettlementRecord};
