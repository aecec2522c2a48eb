//! Aggregate failure raised when any computation in a batch rejected

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use thiserror::Error;

use crate::outcome::SettlementRecord;

/// Output of a settled batch
pub type SettleResult<T, E> = std::result::Result<Vec<SettlementRecord<T, E>>, AggregateFailure<T, E>>;

/// Terminal state of one batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettlementState {
    /// Every computation resolved
    AllResolved,
    /// At least one computation rejected
    SomeRejected,
}

impl SettlementState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SettlementState::AllResolved => "all_resolved",
            SettlementState::SomeRejected => "some_rejected",
        }
    }
}

/// Every record of a batch that had at least one rejection,
/// partitioned by outcome with input order preserved.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{} of {} settlements rejected", .rejected.len(), .all.len())]
pub struct AggregateFailure<T, E> {
    all: Vec<SettlementRecord<T, E>>,
    resolved: Vec<usize>,
    rejected: Vec<usize>,
}

impl<T, E> AggregateFailure<T, E> {
    /// All records in input order
    pub fn all(&self) -> &[SettlementRecord<T, E>] {
        &self.all
    }

    /// Resolved records in input order
    pub fn resolved(&self) -> Vec<&SettlementRecord<T, E>> {
        self.resolved.iter().map(|&i| &self.all[i]).collect()
    }

    /// Rejected records in input order; never empty
    pub fn rejected(&self) -> Vec<&SettlementRecord<T, E>> {
        self.rejected.iter().map(|&i| &self.all[i]).collect()
    }

    /// Input positions of the rejected records
    pub fn rejected_indices(&self) -> &[usize] {
        &self.rejected
    }

    pub fn into_all(self) -> Vec<SettlementRecord<T, E>> {
        self.all
    }

    /// Split into owned `(resolved, rejected)` lists
    pub fn into_partitions(self) -> (Vec<SettlementRecord<T, E>>, Vec<SettlementRecord<T, E>>) {
        self.all.into_iter().partition(SettlementRecord::is_resolved)
    }
}

impl<T: Serialize, E: Serialize> Serialize for AggregateFailure<T, E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("AggregateFailure", 3)?;
        state.serialize_field("all", &self.all)?;
        state.serialize_field("resolved", &self.resolved())?;
        state.serialize_field("rejected", &self.rejected())?;
        state.end()
    }
}

/// Decide the batch outcome from its records
///
/// Any rejected record turns the batch into an [`AggregateFailure`];
/// otherwise the records are returned unchanged.
pub fn classify<T, E>(records: Vec<SettlementRecord<T, E>>) -> SettleResult<T, E> {
    let (resolved, rejected): (Vec<usize>, Vec<usize>) =
        (0..records.len()).partition(|&i| records[i].is_resolved());

    if rejected.is_empty() {
        return Ok(records);
    }

    Err(AggregateFailure {
        all: records,
        resolved,
        rejected,
    })
}

/// State reached by a classified batch
pub fn state_of<T, E>(result: &SettleResult<T, E>) -> SettlementState {
    match result {
        Ok(_) => SettlementState::AllResolved,
        Err(_) => SettlementState::SomeRejected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotate::Annotation;
    use assert_matches::assert_matches;

    fn ok(v: u32) -> SettlementRecord<u32, u32> {
        SettlementRecord::resolved(v, Annotation::new())
    }

    fn err(e: u32) -> SettlementRecord<u32, u32> {
        SettlementRecord::rejected(e, Annotation::new())
    }

    #[test]
    fn test_all_resolved_passes_through() {
        let result = classify(vec![ok(0), ok(1)]);
        assert_eq!(state_of(&result), SettlementState::AllResolved);
        assert_matches!(result, Ok(records) if records.len() == 2);
    }

    #[test]
    fn test_empty_batch_is_resolved() {
        assert_matches!(classify::<u32, u32>(Vec::new()), Ok(records) if records.is_empty());
    }

    #[test]
    fn test_partitions_preserve_order() {
        let failure = classify(vec![err(0), ok(1), err(2), ok(3)]).unwrap_err();

        assert_eq!(failure.all().len(), 4);
        let resolved: Vec<_> = failure.resolved().iter().map(|r| *r.value().unwrap()).collect();
        let rejected: Vec<_> = failure.rejected().iter().map(|r| *r.error().unwrap()).collect();
        assert_eq!(resolved, vec![1, 3]);
        assert_eq!(rejected, vec![0, 2]);
        assert_eq!(failure.rejected_indices(), &[0, 2]);
        assert_eq!(failure.to_string(), "2 of 4 settlements rejected");
    }

    #[test]
    fn test_into_partitions() {
        let failure = classify(vec![ok(1), err(2)]).unwrap_err();
        let (resolved, rejected) = failure.into_partitions();
        assert_eq!(resolved, vec![ok(1)]);
        assert_eq!(rejected, vec![err(2)]);
    }

    #[test]
    fn test_failure_serializes_partitions() {
        let failure = classify(vec![ok(1), err(2)]).unwrap_err();
        let encoded = serde_json::to_value(&failure).unwrap();
        assert_eq!(encoded["all"].as_array().map(Vec::len), Some(2));
        assert_eq!(encoded["resolved"][0]["value"], 1);
        assert_eq!(encoded["rejected"][0]["error"], 2);
    }
}
