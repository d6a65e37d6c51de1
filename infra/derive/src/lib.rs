#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros for the flagrack workspace.
//! This crate provides the attribute macro used to declare library error enums
//! without repeating the conversion and context boilerplate by hand.
//!
//! ## Usage
//! Add the crate under `dependencies` for proc-macro consumers inside the workspace:
//! ```toml
//! [dependencies]
//! flagrack-derive = { path = "../infra/derive" }
//! ```
//!
//! See the macro's docstring for examples; they are `ignore`d to avoid compiling in this crate,
//! but should be copied into consuming crates' tests/examples as needed.

mod error;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// A high-level attribute macro for defining domain-specific error enums.
///
/// This macro reduces boilerplate by transforming a standard enum into a fully-featured
/// error type wired for `thiserror`.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]` when missing.
/// * **Context Support**: Generates a companion `...Ext` trait that adds `.context()`
///   to any `Result` that can be converted into this error type.
/// * **Standard Conversions**: Implements `From<T>` for variants containing a `source` field,
///   enabling the use of the `?` operator for upstream errors.
/// * **Internal Fallback**: Provides specialized `From<&str>` and `From<String>` implementations
///   if an `Internal` variant is present.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum**.
/// 2. Variants that support context must include a `context: Option<Cow<'static, str>>` field.
/// 3. Variants wrapping external errors must include a `source: T` field or a field marked
///    with `#[source]`/`#[from]` (compatible with `thiserror`).
/// 4. Tuple or unit variants are rejected to keep error wiring explicit and reliable.
///
/// # Generated Items
///
/// * `<ErrorName>Ext` trait with `.context(...)` for both `Result<T, ErrorName>` and
///   `Result<T, SourceError>` when a source field exists.
/// * `From<SourceError>` impls for variants with a source field and a context field.
/// * `From<&'static str>` and `From<String>` when an `Internal` variant is present.
/// * A module-level `format_context` helper referenced by the `#[error(...)]` format strings.
///
/// # Example
///
/// ```rust,ignore
/// use flagrack_derive::flag_error;
/// use std::borrow::Cow;
///
/// #[flag_error]
/// pub enum FlagSetError {
///     #[error("Unknown flag{}: {message}", format_context(.context))]
///     UnknownFlag { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
///
///     #[error("Flag capacity exceeded{}: {message}", format_context(.context))]
///     CapacityExceeded { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// // Usage:
/// fn lookup(flags: &FlagSet, name: &str) -> Result<u32, FlagSetError> {
///     flags.mask_of(name).context("resolving a selector")
/// }
/// ```
#[proc_macro_attribute]
pub fn flag_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    error::expand(&input).into()
}
