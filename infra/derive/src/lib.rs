#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the workspace crates.
//!
//! * [`macro@gate_error`] turns an enum into a `thiserror` error with context support.
//! * [`macro@gate_provider`] turns a struct into an `Arc`-shared authentication provider slice.
//!
//! The doc examples are `ignore`d because they reference crates that depend on this one.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemStruct, parse_macro_input};

/// Attribute macro for defining crate-level error enums.
///
/// # Injected Behaviors
///
/// * **Derives**: `Debug` and `thiserror::Error`, unless already present.
/// * **Context**: a companion `<Name>Ext` trait adding `.context(..)` to `Result<T, Name>` and,
///   for source-wrapping variants, to `Result<T, Source>`.
/// * **Conversions**: `From<Source>` for variants made of exactly a `source` and a `context`
///   field, so `?` works on upstream errors.
/// * **Internal fallback**: `From<&'static str>` and `From<String>` when an `Internal`
///   variant exists.
/// * **Formatting**: a module-local `format_context` helper for `#[error(..)]` strings.
///
/// # Requirements
///
/// 1. Only enums with named-field variants are accepted.
/// 2. A `context` field must be typed `Option<Cow<'static, str>>`.
/// 3. A variant with a source (`source` field, `#[source]` or `#[from]`) must also carry a
///    `context` field.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[gate_derive::gate_error]
/// pub enum ConfigError {
///     #[error("Config error{}: {source}", format_context(.context))]
///     Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
///
///     #[error("Internal config error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn build() -> Result<config::Config, ConfigError> {
///     config::Config::builder().build().context("Failed to build config")
/// }
/// ```
#[proc_macro_attribute]
pub fn gate_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand(input).into()
}

/// Attribute macro defining an authentication provider slice.
///
/// The annotated struct becomes `<Name>Inner`, and `<Name>` becomes a cheap-to-clone `Arc`
/// handle that derefs to it and implements `ProviderSlice` with the given identifier.
///
/// # Arguments
///
/// * `id = "..."` - The unique provider identifier (required).
///
/// # Example
///
/// ```rust,ignore
/// #[gate_derive::gate_provider(id = "totp")]
/// pub struct TotpProvider {
///     pub config: TotpConfig,
/// }
///
/// let provider = TotpProvider::new(TotpProviderInner { config });
/// assert_eq!(TotpProvider::IDENTIFIER, "totp");
/// ```
#[proc_macro_attribute]
pub fn gate_provider(args: TokenStream, item: TokenStream) -> TokenStream {
    let mut args_state = macros::provider::ProviderArgs::default();
    let parser = syn::meta::parser(|meta| args_state.parse(&meta));
    parse_macro_input!(args with parser);

    let input = parse_macro_input!(item as ItemStruct);
    macros::provider::expand(args_state, input).into()
}
