//! Nearest-field suggestion for unknown-field decode failures
//!
//! Given the name of a JSON key the schema does not declare and the schema's
//! known field names, pick the closest candidate by Levenshtein distance and
//! phrase it as an actionable failure.

use crate::error::{Failure, Failures};

/// Fixed message prefix `serde_json` produces for unknown-field failures.
///
/// Schemas carrying `#[serde(deny_unknown_fields)]` surface the rejection
/// through the error message; this prefix is how that failure class is
/// recognised among all other decode failures.
pub(crate) const UNKNOWN_FIELD_PREFIX: &str = "unknown field ";

/// Levenshtein distance between two strings, computed over characters.
///
/// Minimum number of single-character insertions, deletions and
/// substitutions to transform `a` into `b`.
#[must_use]
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Two-row dynamic program over the edit matrix.
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0usize; b.len() + 1];

    for (i, &ca) in a.iter().enumerate() {
        current[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let substitution = prev[j] + usize::from(ca != cb);
            let insertion = current[j] + 1;
            let deletion = prev[j + 1] + 1;
            current[j + 1] = substitution.min(insertion).min(deletion);
        }
        std::mem::swap(&mut prev, &mut current);
    }

    prev[b.len()]
}

/// Picks the candidate closest to `unknown` by edit distance.
///
/// Ties go to the *later* candidate: a new candidate replaces the current
/// best when its distance is less than or equal to the running minimum.
/// Returns `None` when there are no candidates at all.
#[must_use]
pub fn closest_field<'a>(unknown: &str, candidates: &[&'a str]) -> Option<&'a str> {
    let mut best: Option<(&'a str, usize)> = None;
    for &candidate in candidates {
        let distance = edit_distance(unknown, candidate);
        match best {
            Some((_, minimum)) if distance > minimum => {}
            _ => best = Some((candidate, distance)),
        }
    }
    best.map(|(candidate, _)| candidate)
}

/// Builds the one-entry suggestion failure for an unknown field, or `None`
/// when the schema exposes no candidates to suggest.
pub(crate) fn suggestion(unknown: &str, candidates: &[&str]) -> Option<Failures> {
    let candidate = closest_field(unknown, candidates)?;
    Some(Failures::single(Failure::new(
        [unknown],
        format!("unknown field. Did you mean \"{candidate}\""),
    )))
}

/// Extracts the offending field name from an unknown-field decode failure.
///
/// Returns `None` for every other failure class, which then propagates
/// verbatim. The name is quoted in the message (backticks from `serde_json`;
/// double quotes are also accepted); surrounding quote characters are
/// trimmed.
pub(crate) fn unknown_field_name(error: &serde_json::Error) -> Option<String> {
    if !error.is_data() {
        return None;
    }
    let message = error.to_string();
    let rest = message.strip_prefix(UNKNOWN_FIELD_PREFIX)?;
    let name = match rest.split('`').nth(1) {
        Some(quoted) => quoted,
        // No backticks: take everything up to the clause separator.
        None => rest.split(',').next().unwrap_or(rest),
    };
    let name = name.trim_matches('"');
    if name.is_empty() {
        None
    } else {
        Some(name.to_owned())
    }
}

/// Final segment of a dotted ignored-key path, e.g. `payment.extra` → `extra`.
pub(crate) fn last_path_segment(path: &str) -> &str {
    path.rsplit('.').next().unwrap_or(path)
}

// ============================================================================
// TESTS
// ============================================================================
