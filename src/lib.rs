//! # jsonvet
//!
//! All-errors JSON validation and typo-suggesting decode diagnostics on top
//! of `serde_json`.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use jsonvet::prelude::*;
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
//! // Decode + validate; every failing rule is reported, not just the first.
//! let grant: Grant = jsonvet::from_str(r#"{"balance": 50}"#)?;
//! ```
//!
//! ## Collecting every failure
//!
//! A [`CheckGroup`] runs all of its rules regardless of earlier failures and
//! returns them as one [`Failures`] value that renders as plain text (one
//! failure per line) or as the fixed JSON shape
//! `{"errors":[{"fields":[...],"error":"..."},...]}`.
//!
//! ## Unknown-field suggestions
//!
//! ```rust,ignore
//! use jsonvet::Decoder;
//!
//! let mut decoder = Decoder::new(input).with_unknown_field_suggestion();
//! let grant: Grant = decoder.decode()?;
//! // {"expires": 50} fails with:
//! //   {"errors":[{"fields":["expires"],"error":"unknown field. Did you mean \"expires_in\""}]}
//! ```
//!
//! Suggestions compare the offending key against the schema's wire-visible
//! field names — derived at compile time by `#[derive(JsonFields)]` from the
//! same serde attributes the deserializer honours — and pick the nearest by
//! edit distance.

pub mod decode;
pub mod error;
pub mod fields;
pub mod group;
pub mod prelude;
pub mod suggest;

pub use decode::{Decoder, Error, SuggestingDecoder, from_reader, from_slice, from_str};
pub use error::{BoxError, Failure, Failures};
pub use fields::JsonFields;
pub use group::{CheckGroup, FieldChain, Validate, validate};
