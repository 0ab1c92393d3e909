//! Decode orchestration: structural decode, then validation
//!
//! Entry points decode one JSON document with `serde_json` and, where the
//! destination type exposes the [`Validate`] capability, run its rules after
//! a fully successful structural decode. Structural failure short-circuits:
//! validation never runs on a structurally invalid document, and the
//! destination is left however `serde_json` left it.
//!
//! [`Decoder`] wraps a reader for stream use (repeated [`Decoder::decode`]
//! calls, then [`Decoder::end`]). Turning on unknown-field suggestions via
//! [`Decoder::with_unknown_field_suggestion`] yields a [`SuggestingDecoder`]
//! whose decode methods require [`JsonFields`] — suggestion mode and strict
//! unknown-field rejection are coupled by construction.
//!
//! # Examples
//!
//! ```rust,ignore
//! use jsonvet::{CheckGroup, Failures, JsonFields, Validate};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, JsonFields)]
//! struct Grant {
//!     expires_in: i64,
//!     balance: i64,
//! }
//!
//! impl Validate for Grant {
//!     fn validate(&self) -> Result<(), Failures> {
//!         let mut checks = CheckGroup::new();
//!         checks.field("expires_in").check(|| {
//!             if self.expires_in < 0 {
//!                 return Err("should have a non-negative expiry");
//!             }
//!             Ok(())
//!         });
//!         checks.validate()
//!     }
//! }
//!
//! let grant: Grant = jsonvet::from_str(r#"{"balance": 50}"#)?;
//! ```

use std::io::Read;

use serde::de::DeserializeOwned;

use crate::error::{Failure, Failures};
use crate::fields::JsonFields;
use crate::group::Validate;
use crate::suggest;

// ============================================================================
// ERROR
// ============================================================================

/// Decode-time error: either a structural failure from `serde_json`,
/// propagated verbatim, or a structured [`Failures`] collection from
/// validation or unknown-field suggestion.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Structural decode failure (syntax, type mismatch, ...). Not
    /// intercepted or transformed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Validation failures or an unknown-field suggestion.
    #[error(transparent)]
    Invalid(#[from] Failures),
}

impl Error {
    /// The structured failures, when this error carries them.
    #[must_use]
    pub fn failures(&self) -> Option<&Failures> {
        match self {
            Error::Invalid(failures) => Some(failures),
            Error::Json(_) => None,
        }
    }

    /// Renders the error in the fixed `{"errors":[...]}` JSON shape.
    ///
    /// Structural failures become a single unlabelled entry.
    #[must_use]
    pub fn to_json(&self) -> String {
        match self {
            Error::Invalid(failures) => failures.to_json(),
            Error::Json(error) => {
                Failures::single(Failure::unlabelled(error.to_string())).to_json()
            }
        }
    }
}

// ============================================================================
// MODULE-LEVEL ENTRY POINTS
// ============================================================================

/// Decodes one JSON document from a string, then validates it.
///
/// Trailing non-whitespace input is a structural error.
pub fn from_str<T>(input: &str) -> Result<T, Error>
where
    T: DeserializeOwned + Validate,
{
    let value: T = serde_json::from_str(input)?;
    value.validate()?;
    Ok(value)
}

/// Decodes one JSON document from a byte slice, then validates it.
pub fn from_slice<T>(input: &[u8]) -> Result<T, Error>
where
    T: DeserializeOwned + Validate,
{
    let value: T = serde_json::from_slice(input)?;
    value.validate()?;
    Ok(value)
}

/// Decodes one JSON document from a reader, then validates it.
pub fn from_reader<R, T>(reader: R) -> Result<T, Error>
where
    R: Read,
    T: DeserializeOwned + Validate,
{
    let value: T = serde_json::from_reader(reader)?;
    value.validate()?;
    Ok(value)
}

// ============================================================================
// DECODER
// ============================================================================

/// A streaming decoder over a reader.
///
/// Each [`decode`](Decoder::decode) call consumes one whitespace-separated
/// JSON value from the stream; [`end`](Decoder::end) rejects trailing
/// garbage.
pub struct Decoder<R: Read> {
    de: serde_json::Deserializer<serde_json::de::IoRead<R>>,
}

impl<R: Read> Decoder<R> {
    /// Wraps a reader.
    pub fn new(reader: R) -> Self {
        Self {
            de: serde_json::Deserializer::from_reader(reader),
        }
    }

    /// Turns on unknown-field suggestions.
    ///
    /// The returned decoder rejects fields the schema does not declare and
    /// answers them with a nearest-name suggestion; its decode methods
    /// therefore require the schema to expose its field names via
    /// [`JsonFields`].
    #[must_use]
    pub fn with_unknown_field_suggestion(self) -> SuggestingDecoder<R> {
        SuggestingDecoder { de: self.de }
    }

    /// Structural decode of the next value in the stream.
    pub fn decode<T: DeserializeOwned>(&mut self) -> Result<T, Error> {
        Ok(T::deserialize(&mut self.de)?)
    }

    /// Structural decode of the next value, then validation.
    ///
    /// Validation only runs after a fully successful structural decode and
    /// its [`Failures`] become the overall result.
    pub fn decode_validated<T>(&mut self) -> Result<T, Error>
    where
        T: DeserializeOwned + Validate,
    {
        let value: T = self.decode()?;
        value.validate()?;
        Ok(value)
    }

    /// Checks that no non-whitespace input remains.
    pub fn end(mut self) -> Result<(), Error> {
        self.de.end()?;
        Ok(())
    }
}

impl<R: Read> std::fmt::Debug for Decoder<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Decoder").finish_non_exhaustive()
    }
}

// ============================================================================
// SUGGESTING DECODER
// ============================================================================

/// A [`Decoder`] with unknown-field suggestions enabled.
///
/// Any input key the schema does not declare fails the decode. When the
/// schema has candidate names, the failure is a one-entry [`Failures`]
/// naming the offending key and the nearest known field; with no candidates
/// the plain rejection propagates unchanged.
pub struct SuggestingDecoder<R: Read> {
    de: serde_json::Deserializer<serde_json::de::IoRead<R>>,
}

impl<R: Read> SuggestingDecoder<R> {
    /// Structural decode of the next value, rejecting unknown fields.
    pub fn decode<T>(&mut self) -> Result<T, Error>
    where
        T: DeserializeOwned + JsonFields,
    {
        let mut ignored: Vec<String> = Vec::new();
        let outcome = serde_ignored::deserialize(&mut self.de, |path: serde_ignored::Path<'_>| {
            ignored.push(path.to_string());
        });

        match outcome {
            Ok(value) => {
                if let Some(path) = ignored.first() {
                    let name = suggest::last_path_segment(path);
                    return Err(match suggest::suggestion(name, T::field_names()) {
                        Some(failures) => Error::Invalid(failures),
                        None => Error::Json(<serde_json::Error as serde::de::Error>::custom(
                            format!("{}`{name}`", suggest::UNKNOWN_FIELD_PREFIX),
                        )),
                    });
                }
                Ok(value)
            }
            Err(error) => {
                // Schemas with `deny_unknown_fields` reject before the
                // ignored-key callback fires; recognise that message too.
                if let Some(name) = suggest::unknown_field_name(&error) {
                    if let Some(failures) = suggest::suggestion(&name, T::field_names()) {
                        return Err(Error::Invalid(failures));
                    }
                }
                Err(Error::Json(error))
            }
        }
    }

    /// Structural decode with unknown-field rejection, then validation.
    pub fn decode_validated<T>(&mut self) -> Result<T, Error>
    where
        T: DeserializeOwned + JsonFields + Validate,
    {
        let value: T = self.decode()?;
        value.validate()?;
        Ok(value)
    }

    /// Checks that no non-whitespace input remains.
    pub fn end(mut self) -> Result<(), Error> {
        self.de.end()?;
        Ok(())
    }
}

impl<R: Read> std::fmt::Debug for SuggestingDecoder<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuggestingDecoder").finish_non_exhaustive()
    }
}

// ============================================================================
// TESTS
// ============================================================================
