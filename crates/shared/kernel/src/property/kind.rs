//! Scalar property kinds.
//!
//! Each kind is a zero-sized tag carrying its own parse rule. The set is closed: a property is
//! always one of the kinds below, and collections are handled once by [`super::Property`].

use crate::security::network::NetworkRange;
use std::borrow::Cow;
use std::fmt::{self, Debug};
use std::marker::PhantomData;
use std::str::FromStr;
use strum::VariantNames;

/// Identifies the kind of a property, for diagnostics and error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KindTag {
    String,
    Integer,
    Long,
    Symbol,
    NetworkRange,
}

/// A scalar value kind: how one raw string becomes one typed value.
pub trait PropertyKind: Debug + Send + Sync {
    /// The typed value produced by this kind.
    type Value;

    /// The tag of this kind.
    const TAG: KindTag;

    /// Parses a single raw value.
    ///
    /// # Errors
    /// Returns a human-readable cause (e.g. `must be an integer`) when `raw` is not a legal
    /// value of this kind. The caller attaches the property name and raw text.
    fn parse(&self, raw: &str) -> Result<Self::Value, Cow<'static, str>>;
}

/// Free-form text, taken verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringKind;

impl PropertyKind for StringKind {
    type Value = String;
    const TAG: KindTag = KindTag::String;

    fn parse(&self, raw: &str) -> Result<String, Cow<'static, str>> {
        Ok(raw.to_owned())
    }
}

/// Base-10 signed 32-bit integer.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerKind;

impl PropertyKind for IntegerKind {
    type Value = i32;
    const TAG: KindTag = KindTag::Integer;

    fn parse(&self, raw: &str) -> Result<i32, Cow<'static, str>> {
        raw.parse().map_err(|_| Cow::Borrowed("must be an integer"))
    }
}

/// Base-10 signed 64-bit integer.
#[derive(Debug, Clone, Copy, Default)]
pub struct LongKind;

impl PropertyKind for LongKind {
    type Value = i64;
    const TAG: KindTag = KindTag::Long;

    fn parse(&self, raw: &str) -> Result<i64, Cow<'static, str>> {
        raw.parse().map_err(|_| Cow::Borrowed("must be a long"))
    }
}

/// One of the symbols declared by `E`, matched case-sensitively.
///
/// `E` is expected to derive `strum::EnumString` and `strum::VariantNames`, so the legal
/// symbols and the parser come from the same declaration.
pub struct EnumKind<E>(PhantomData<fn() -> E>);

impl<E> EnumKind<E> {
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<E> Default for EnumKind<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for EnumKind<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for EnumKind<E> {}

impl<E> Debug for EnumKind<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EnumKind<{}>", std::any::type_name::<E>())
    }
}

impl<E> PropertyKind for EnumKind<E>
where
    E: FromStr + VariantNames,
{
    type Value = E;
    const TAG: KindTag = KindTag::Symbol;

    fn parse(&self, raw: &str) -> Result<E, Cow<'static, str>> {
        raw.parse().map_err(|_| format!("must be one of: {}", E::VARIANTS.join(", ")).into())
    }
}

/// A single IP address or a CIDR subnet.
#[derive(Debug, Clone, Copy, Default)]
pub struct NetworkKind;

impl PropertyKind for NetworkKind {
    type Value = NetworkRange;
    const TAG: KindTag = KindTag::NetworkRange;

    fn parse(&self, raw: &str) -> Result<NetworkRange, Cow<'static, str>> {
        NetworkRange::from_str(raw).map_err(|e| format!("invalid network address: {e}").into())
    }
}
