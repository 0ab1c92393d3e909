//! Failure types for validation and decode diagnostics
//!
//! This module provides the structured error model shared by the rule
//! aggregator and the decoder: a single field-scoped [`Failure`] and an
//! ordered, never-empty collection of them, [`Failures`].
//!
//! Both carry two renderings with a fixed wire shape:
//!
//! - plain text, one failure per line (`Display`);
//! - JSON, `{"errors":[{"fields":[...],"error":"..."},...]}` where the
//!   `fields` key is omitted entirely when no field labels are attached.

use std::error::Error as StdError;
use std::fmt;
use std::ops::Index;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Boxed error type used as the cause of a [`Failure`].
///
/// Rule closures can return any error type convertible into this, including
/// plain `&str` / `String` messages.
pub type BoxError = Box<dyn StdError + Send + Sync + 'static>;

// ============================================================================
// FAILURE
// ============================================================================

/// A single validation or decode failure, attributed to zero or more
/// field paths.
///
/// An empty field list means the failure concerns the whole object.
/// Immutable once constructed.
///
/// # Examples
///
/// ```rust,ignore
/// use jsonvet::Failure;
///
/// let failure = Failure::new(["payment.mode"], "\"neft\" is unsupported");
/// assert_eq!(failure.fields(), ["payment.mode"]);
/// ```
#[derive(Debug)]
pub struct Failure {
    fields: Vec<String>,
    error: BoxError,
}

impl Failure {
    /// Creates a failure attributed to the given field paths.
    ///
    /// Empty field labels are dropped; a failure never carries an empty
    /// string as a field path.
    pub fn new<I, S>(fields: I, error: impl Into<BoxError>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields = fields
            .into_iter()
            .map(Into::into)
            .filter(|field| !field.is_empty())
            .collect();
        Self {
            fields,
            error: error.into(),
        }
    }

    /// Creates a failure with no field attribution (whole-object failure).
    pub fn unlabelled(error: impl Into<BoxError>) -> Self {
        Self {
            fields: Vec::new(),
            error: error.into(),
        }
    }

    /// The field paths this failure is attributed to, in binding order.
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// The underlying cause.
    #[must_use]
    pub fn error(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.error.as_ref()
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fields.is_empty() {
            write!(f, "{}", self.error)
        } else {
            write!(f, "{} {}", self.fields.join(","), self.error)
        }
    }
}

impl Serialize for Failure {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let entries = if self.fields.is_empty() { 1 } else { 2 };
        let mut map = serializer.serialize_map(Some(entries))?;
        if !self.fields.is_empty() {
            map.serialize_entry("fields", &self.fields)?;
        }
        map.serialize_entry("error", &self.error.to_string())?;
        map.end()
    }
}

// ============================================================================
// FAILURES
// ============================================================================

/// An ordered, non-empty collection of [`Failure`]s.
///
/// A `Failures` value is only ever produced when at least one failure
/// exists; an evaluation that found nothing wrong reports success instead.
/// Order is the order the failing rules were registered, so output is
/// deterministic across runs.
///
/// Once returned the collection is immutable and freely shareable across
/// threads.
#[derive(Debug)]
pub struct Failures {
    errors: Vec<Failure>,
}

impl Failures {
    /// Creates a collection holding exactly one failure.
    #[must_use]
    pub fn single(failure: Failure) -> Self {
        Self {
            errors: vec![failure],
        }
    }

    /// Wraps a list of failures, or `None` when the list is empty.
    ///
    /// This is the only way to build a multi-entry collection, which keeps
    /// the non-empty invariant at the type boundary.
    #[must_use]
    pub fn from_vec(errors: Vec<Failure>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self { errors })
        }
    }

    /// Number of failures. At least 1 for any returned collection.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Always `false` for a returned collection; present for completeness.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Iterates the failures in registration order.
    pub fn iter(&self) -> std::slice::Iter<'_, Failure> {
        self.errors.iter()
    }

    /// Renders the collection as a single JSON object:
    /// `{"errors":[{"fields":[...],"error":"..."},...]}`.
    ///
    /// A failure to serialize degrades to a one-entry rendering describing
    /// the serialization failure; this method never panics.
    #[must_use]
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| serialization_fallback(&e))
    }

    /// Renders the same JSON object pretty-printed.
    ///
    /// `indent` is the per-level indent string; `prefix` begins every output
    /// line after the first, mirroring standard pretty-printers that take a
    /// line prefix alongside the indent.
    #[must_use]
    pub fn to_json_pretty(&self, prefix: &str, indent: &str) -> String {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        let rendered = match self.serialize(&mut ser) {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(e) => serialization_fallback(&e),
        };
        if prefix.is_empty() {
            rendered
        } else {
            rendered.replace('\n', &format!("\n{prefix}"))
        }
    }
}

fn serialization_fallback(cause: &serde_json::Error) -> String {
    let fallback = Failures::single(Failure::unlabelled(format!(
        "could not serialize validation errors: {cause}"
    )));
    serde_json::to_string(&fallback).unwrap_or_else(|_| {
        r#"{"errors":[{"error":"could not serialize validation errors"}]}"#.to_owned()
    })
}

impl fmt::Display for Failures {
    /// One failure per line: `"<f1>,<f2> <cause>"`, or `"<cause>"` when the
    /// failure carries no field labels.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, failure) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{failure}")?;
        }
        Ok(())
    }
}

impl StdError for Failures {}

impl Serialize for Failures {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry("errors", &self.errors)?;
        map.end()
    }
}

impl Index<usize> for Failures {
    type Output = Failure;

    fn index(&self, index: usize) -> &Failure {
        &self.errors[index]
    }
}

impl<'a> IntoIterator for &'a Failures {
    type Item = &'a Failure;
    type IntoIter = std::slice::Iter<'a, Failure>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

impl IntoIterator for Failures {
    type Item = Failure;
    type IntoIter = std::vec::IntoIter<Failure>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn display_with_fields() {
        let failure = Failure::new(["a", "b"], "broken");
        assert_eq!(failure.to_string(), "a,b broken");
    }

    #[test]
    fn display_without_fields() {
        let failure = Failure::unlabelled("broken");
        assert_eq!(failure.to_string(), "broken");
    }

    #[test]
    fn empty_field_labels_are_dropped() {
        let failure = Failure::new(["", "x", ""], "broken");
        assert_eq!(failure.fields(), ["x"]);
    }

    #[test]
    fn text_rendering_joins_lines() {
        let failures = Failures::from_vec(vec![
            Failure::new(["payment.mode"], "\"neft\" is unsupported"),
            Failure::unlabelled("insufficient balance"),
        ])
        .expect("non-empty");
        assert_eq!(
            failures.to_string(),
            "payment.mode \"neft\" is unsupported\ninsufficient balance"
        );
    }

    #[test]
    fn json_rendering_omits_empty_fields_key() {
        let failures = Failures::from_vec(vec![
            Failure::unlabelled("insufficient balance"),
            Failure::new(["payment.mode"], "\"neft\" is unsupported"),
        ])
        .expect("non-empty");
        assert_eq!(
            failures.to_json(),
            r#"{"errors":[{"error":"insufficient balance"},{"fields":["payment.mode"],"error":"\"neft\" is unsupported"}]}"#
        );
    }

    #[test]
    fn json_entry_order_is_insertion_order() {
        let failures = Failures::from_vec(vec![
            Failure::new(["first"], "one"),
            Failure::new(["second"], "two"),
        ])
        .expect("non-empty");
        assert_eq!(
            failures.to_json(),
            r#"{"errors":[{"fields":["first"],"error":"one"},{"fields":["second"],"error":"two"}]}"#
        );
    }

    #[test]
    fn pretty_json_applies_indent() {
        let failures = Failures::single(Failure::unlabelled("boom"));
        let rendered = failures.to_json_pretty("", "  ");
        assert_eq!(
            rendered,
            "{\n  \"errors\": [\n    {\n      \"error\": \"boom\"\n    }\n  ]\n}"
        );
    }

    #[test]
    fn pretty_json_prefixes_every_line_after_the_first() {
        let failures = Failures::single(Failure::unlabelled("boom"));
        let rendered = failures.to_json_pretty(">", " ");
        for line in rendered.lines().skip(1) {
            assert!(line.starts_with('>'), "line {line:?} misses the prefix");
        }
        assert!(rendered.starts_with('{'));
    }

    #[test]
    fn from_vec_rejects_empty() {
        assert!(Failures::from_vec(Vec::new()).is_none());
    }

    #[test]
    fn indexing_and_iteration() {
        let failures =
            Failures::from_vec(vec![Failure::new(["x"], "one"), Failure::unlabelled("two")])
                .expect("non-empty");
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].fields(), ["x"]);
        let causes: Vec<String> = failures.iter().map(|f| f.error().to_string()).collect();
        assert_eq!(causes, ["one", "two"]);
    }

    #[test]
    fn failures_are_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Failures>();
    }
}
