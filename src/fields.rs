//! Schema field introspection: the wire-visible field names of a type
//!
//! The unknown-field resolver needs to know which JSON keys a schema
//! actually accepts. [`JsonFields`] exposes that as a compile-time table of
//! names, derived per type by `#[derive(JsonFields)]` (the `derive`
//! feature), rather than discovered by runtime reflection.
//!
//! The derive honours the same serde attributes the deserializer does, so a
//! suggested name is always one `serde_json` would accept:
//!
//! - `#[serde(skip)]` / `#[serde(skip_deserializing)]` — field omitted
//!   entirely;
//! - `#[serde(rename = "...")]` — the rename is used, modifier attributes
//!   beside it (`default`, `skip_serializing_if`, ...) are ignored;
//! - `#[serde(rename(deserialize = "..."))]` — the deserialize name;
//! - untagged fields use the bare identifier, transformed by a container
//!   `#[serde(rename_all = "...")]` when present.
//!
//! # Examples
//!
//! ```rust,ignore
//! use jsonvet::JsonFields;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, JsonFields)]
//! struct Grant {
//!     #[serde(rename = "expires_in")]
//!     expires: u64,
//!     balance: i64,
//!     #[serde(skip)]
//!     cached_total: i64,
//! }
//!
//! assert_eq!(Grant::field_names(), &["expires_in", "balance"]);
//! ```

/// Wire-visible field names of a schema type, in declaration order.
///
/// Implementations are tables computed at compile time; the list is cheap
/// to read on every decode attempt.
pub trait JsonFields {
    /// Field names as they appear in JSON, in declaration order.
    fn field_names() -> &'static [&'static str];
}

#[cfg(feature = "derive")]
pub use jsonvet_macros::JsonFields;
