//! Settlement records and outcome tags
//!
//! A [`SettlementRecord`] is produced once per input item after its
//! computation settles. Which of `value` / `error` is present is decided by
//! the private [`Settled`] variant, so a record can never carry both.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::annotate::Annotation;

/// How a computation settled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeKind {
    /// The computation produced a value
    Resolved,
    /// The computation failed with an error
    Rejected,
}

impl OutcomeKind {
    /// Returns true for [`OutcomeKind::Resolved`]
    pub fn is_resolved(&self) -> bool {
        matches!(self, OutcomeKind::Resolved)
    }

    /// Returns true for [`OutcomeKind::Rejected`]
    pub fn is_rejected(&self) -> bool {
        matches!(self, OutcomeKind::Rejected)
    }

    /// Label used for logs and metrics
    pub fn as_str(&self) -> &'static str {
        match self {
            OutcomeKind::Resolved => "resolved",
            OutcomeKind::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Settled<T, E> {
    Resolved(T),
    Rejected(E),
}

/// Classification of one settled computation
#[derive(Debug, Clone, PartialEq)]
pub struct SettlementRecord<T, E> {
    settled: Settled<T, E>,
    annotation: Annotation,
}

impl<T, E> SettlementRecord<T, E> {
    pub(crate) fn resolved(value: T, annotation: Annotation) -> Self {
        Self {
            settled: Settled::Resolved(value),
            annotation,
        }
    }

    pub(crate) fn rejected(error: E, annotation: Annotation) -> Self {
        Self {
            settled: Settled::Rejected(error),
            annotation,
        }
    }

    /// Outcome tag of this record
    pub fn kind(&self) -> OutcomeKind {
        match self.settled {
            Settled::Resolved(_) => OutcomeKind::Resolved,
            Settled::Rejected(_) => OutcomeKind::Rejected,
        }
    }

    /// Success value, present only for resolved records
    pub fn value(&self) -> Option<&T> {
        match &self.settled {
            Settled::Resolved(value) => Some(value),
            Settled::Rejected(_) => None,
        }
    }

    /// Failure value, present only for rejected records
    pub fn error(&self) -> Option<&E> {
        match &self.settled {
            Settled::Resolved(_) => None,
            Settled::Rejected(error) => Some(error),
        }
    }

    /// Caller metadata attached when the computation settled
    pub fn annotation(&self) -> &Annotation {
        &self.annotation
    }

    pub fn is_resolved(&self) -> bool {
        self.kind().is_resolved()
    }

    pub fn is_rejected(&self) -> bool {
        self.kind().is_rejected()
    }

    /// Consume the record, yielding the outcome as a `Result` and the annotation
    pub fn into_parts(self) -> (Result<T, E>, Annotation) {
        let outcome = match self.settled {
            Settled::Resolved(value) => Ok(value),
            Settled::Rejected(error) => Err(error),
        };
        (outcome, self.annotation)
    }
}

impl<T: Serialize, E: Serialize> Serialize for SettlementRecord<T, E> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("SettlementRecord", 4)?;
        state.serialize_field("kind", &self.kind())?;
        state.serialize_field("value", &self.value())?;
        state.serialize_field("error", &self.error())?;
        state.serialize_field("annotation", &self.annotation)?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_matches_populated_field() {
        let ok: SettlementRecord<u32, String> = SettlementRecord::resolved(7, Annotation::new());
        assert_eq!(ok.kind(), OutcomeKind::Resolved);
        assert_eq!(ok.value(), Some(&7));
        assert!(ok.error().is_none());

        let err: SettlementRecord<u32, String> =
            SettlementRecord::rejected("boom".to_string(), Annotation::new());
        assert_eq!(err.kind(), OutcomeKind::Rejected);
        assert!(err.value().is_none());
        assert_eq!(err.error().map(String::as_str), Some("boom"));
    }

    #[test]
    fn test_serializes_with_null_for_absent_side() {
        let mut annotation = Annotation::new();
        annotation.insert("attempt".to_string(), json!(1));
        let record: SettlementRecord<u32, String> =
            SettlementRecord::rejected("timeout".to_string(), annotation);

        let encoded = serde_json::to_value(&record).unwrap();
        assert_eq!(
            encoded,
            json!({
                "kind": "rejected",
                "value": null,
                "error": "timeout",
                "annotation": { "attempt": 1 }
            })
        );
    }

    #[test]
    fn test_into_parts() {
        let record: SettlementRecord<&str, ()> = SettlementRecord::resolved("done", Annotation::new());
        let (outcome, annotation) = record.into_parts();
        assert_eq!(outcome, Ok("done"));
        assert!(annotation.is_empty());
    }

    #[test]
    fn test_outcome_kind_display() {
        assert_eq!(OutcomeKind::Resolved.to_string(), "resolved");
        assert_eq!(OutcomeKind::Rejected.to_string(), "rejected");
        assert!(OutcomeKind::Rejected.is_rejected());
    }
}
