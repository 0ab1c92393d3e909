//! # jsonvet-macros
//!
//! Proc-macros for `jsonvet` schema field introspection.
//!
//! ## Derive Macros
//!
//! | Macro | Description |
//! |-------|-------------|
//! | [`JsonFields`](derive@JsonFields) | Implements the `JsonFields` trait |

#![forbid(unsafe_code)]
#![warn(missing_docs)]

extern crate proc_macro;

use proc_macro::TokenStream;

mod fields;

/// Derive macro for the `JsonFields` trait.
///
/// Generates a compile-time table of the struct's wire-visible field names,
/// in declaration order, honouring the serde attributes the deserializer
/// itself uses:
///
/// - `#[serde(skip)]` / `#[serde(skip_deserializing)]` — field omitted;
/// - `#[serde(rename = "name")]` — that name (other attributes alongside it
///   are ignored);
/// - `#[serde(rename(deserialize = "name"))]` — the deserialize name;
/// - container `#[serde(rename_all = "...")]` — applied to untagged fields.
///
/// Only structs with named fields are supported.
///
/// # Example
///
/// ```ignore
/// use jsonvet::JsonFields;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, JsonFields)]
/// #[serde(rename_all = "camelCase")]
/// struct Account {
///     account_id: String,
///     #[serde(rename = "expires_in")]
///     expires: u64,
///     #[serde(skip)]
///     cached: bool,
/// }
///
/// assert_eq!(Account::field_names(), &["accountId", "expires_in"]);
/// ```
#[proc_macro_derive(JsonFields, attributes(serde))]
pub fn derive_json_fields(input: TokenStream) -> TokenStream {
    fields::derive(input)
}
