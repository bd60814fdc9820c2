#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Attribute macros shared by every crate of the workspace:
//!
//! * [`macro@ccentral_error`] turns an enum into a `thiserror` error with call-site context.
//! * [`macro@ccentral_slice`] turns a struct into a cheaply clonable feature slice handle.
//!
//! Examples are `ignore`d here because a proc-macro crate cannot use its own macros;
//! the `tests/ui` cases compile them for real.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemStruct, parse_macro_input};

/// Defines a crate error enum.
///
/// # Generated Items
///
/// * `#[derive(Debug, thiserror::Error)]` unless already derived.
/// * `<ErrorName>Ext` trait with `.context(...)` for `Result<T, ErrorName>`, and for
///   `Result<T, Source>` of every variant that wraps a `source` error.
/// * `From<Source>` for every variant with a source field.
/// * `From<&'static str>` / `From<String>` when an `Internal { message, context }` variant exists.
/// * A private `format_context` helper to render the optional context in messages.
///
/// # Requirements
///
/// * Only enums with named-field variants are accepted.
/// * A `context` field must be typed `Option<Cow<'static, str>>`.
/// * Variants with a source must also carry `context`.
///
/// # Example
///
/// ```rust,ignore
/// use ccentral_derive::ccentral_error;
/// use std::borrow::Cow;
///
/// #[ccentral_error]
/// pub enum StoreError {
///     #[error("IO error{}: {source}", format_context(.context))]
///     Io { source: std::io::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Record '{name}' not found{}", format_context(.context))]
///     NotFound { name: String, context: Option<Cow<'static, str>> },
/// }
///
/// fn read(path: &str) -> Result<String, StoreError> {
///     std::fs::read_to_string(path).context("Reading store file")
/// }
/// ```
#[proc_macro_attribute]
pub fn ccentral_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand(input).into()
}

/// Defines a feature slice handle.
///
/// The annotated struct becomes `<Name>Inner`; `<Name>` wraps it in an `Arc`, derefs to it
/// and implements `ccentral_kernel::domain::registry::FeatureSlice`.
///
/// # Example
/// ```rust,ignore
/// #[ccentral_derive::ccentral_slice]
/// pub struct Catalog {
///     pub entries: Vec<String>,
/// }
///
/// let slice = Catalog::new(CatalogInner { entries: Vec::new() });
/// assert!(slice.entries.is_empty());
/// ```
#[proc_macro_attribute]
pub fn ccentral_slice(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::slice::expand(input).into()
}
