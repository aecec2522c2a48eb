//! Caller-supplied annotation of settled outcomes

use serde_json::{Map, Value};

/// Metadata attached to a [`crate::SettlementRecord`]
pub type Annotation = Map<String, Value>;

type AnnotateFn<'a, X> = Box<dyn Fn(&X) -> Value + Send + Sync + 'a>;

/// Shallow-merge an annotator's return value into an empty annotation.
///
/// Objects contribute their top-level entries; any other JSON value
/// (null, scalars, arrays) yields an empty annotation.
pub fn annotation_from_value(value: Value) -> Annotation {
    let mut annotation = Annotation::new();
    if let Value::Object(entries) = value {
        annotation.extend(entries);
    }
    annotation
}

/// Optional success and failure annotators
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use settlement::Annotators;
///
/// let annotators: Annotators<u32, String> = Annotators::none()
///     .on_resolved(|value| json!({ "doubled": value * 2 }))
///     .on_rejected(|error| json!({ "reason": error }));
/// assert!(annotators.has_on_resolved());
/// ```
pub struct Annotators<'a, T, E> {
    on_resolved: Option<AnnotateFn<'a, T>>,
    on_rejected: Option<AnnotateFn<'a, E>>,
}

impl<'a, T, E> Annotators<'a, T, E> {
    /// No annotators; every record gets an empty annotation
    pub fn none() -> Self {
        Self {
            on_resolved: None,
            on_rejected: None,
        }
    }

    /// Annotate resolved records from their value
    pub fn on_resolved<F>(mut self, f: F) -> Self
    where
        F: Fn(&T) -> Value + Send + Sync + 'a,
    {
        self.on_resolved = Some(Box::new(f));
        self
    }

    /// Annotate rejected records from their error
    pub fn on_rejected<F>(mut self, f: F) -> Self
    where
        F: Fn(&E) -> Value + Send + Sync + 'a,
    {
        self.on_rejected = Some(Box::new(f));
        self
    }

    pub fn has_on_resolved(&self) -> bool {
        self.on_resolved.is_some()
    }

    pub fn has_on_rejected(&self) -> bool {
        self.on_rejected.is_some()
    }

    pub(crate) fn annotate_resolved(&self, value: &T) -> Annotation {
        self.on_resolved
            .as_ref()
            .map(|f| annotation_from_value(f(value)))
            .unwrap_or_default()
    }

    pub(crate) fn annotate_rejected(&self, error: &E) -> Annotation {
        self.on_rejected
            .as_ref()
            .map(|f| annotation_from_value(f(error)))
            .unwrap_or_default()
    }
}

impl<T, E> Default for Annotators<'_, T, E> {
    fn default() -> Self {
        Self::none()
    }
}

impl<T, E> std::fmt::Debug for Annotators<'_, T, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Annotators")
            .field("on_resolved", &self.has_on_resolved())
            .field("on_rejected", &self.has_on_rejected())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_object_is_merged() {
        let annotation = annotation_from_value(json!({ "value": 3, "tag": "a" }));
        assert_eq!(annotation.len(), 2);
        assert_eq!(annotation["value"], json!(3));
    }

    #[test]
    fn test_non_object_degrades_to_empty() {
        for value in [json!(null), json!(42), json!("text"), json!([1, 2]), json!(true)] {
            assert!(annotation_from_value(value).is_empty());
        }
    }

    #[test]
    fn test_absent_annotators_yield_empty() {
        let annotators: Annotators<u32, u32> = Annotators::default();
        assert!(annotators.annotate_resolved(&1).is_empty());
        assert!(annotators.annotate_rejected(&1).is_empty());
    }

    #[test]
    fn test_annotators_receive_settled_value() {
        let annotators: Annotators<u32, &str> = Annotators::none()
            .on_resolved(|v| json!({ "value": v }))
            .on_rejected(|e| json!({ "reason": e }));

        assert_eq!(annotators.annotate_resolved(&5)["value"], json!(5));
        assert_eq!(annotators.annotate_rejected(&"late")["reason"], json!("late"));
    }
}
