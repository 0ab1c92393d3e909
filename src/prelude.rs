//! Prelude module for convenient imports.
//!
//! Provides a single `use jsonvet::prelude::*;` import that brings in the
//! traits and types needed by typical schema code.
//!
//! # Examples
//!
//! ```rust,ignore
//! use jsonvet::prelude::*;
//!
//! let mut checks = CheckGroup::new();
//! checks.field("amount").check(|| Ok::<(), BoxError>(()));
//! checks.validate()?;
//! ```

// ============================================================================
// ERROR MODEL
// ============================================================================

pub use crate::error::{BoxError, Failure, Failures};

// ============================================================================
// AGGREGATOR AND CAPABILITIES
// ============================================================================

pub use crate::group::{CheckGroup, FieldChain, Validate, validate};

// ============================================================================
// DECODE SURFACE
// ============================================================================

pub use crate::decode::{Decoder, Error, SuggestingDecoder, from_reader, from_slice, from_str};
pub use crate::fields::JsonFields;
