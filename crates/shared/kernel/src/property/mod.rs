//! # Typed Properties
//!
//! A [`Property`] is an immutable declaration: a name plus a scalar [`PropertyKind`]. It turns
//! raw configuration text into typed values, either one value or a comma-delimited list.
//!
//! Parsing never substitutes defaults. An absent raw value parses to `None`, and the caller
//! decides what absence means (see [`crate::config::ConfigSourceExt`]). An invalid value is
//! always an error, so "not configured" and "misconfigured" stay distinguishable.
//!
//! ```rust
//! use gate_kernel::property::{IntegerProperty, Property};
//!
//! const DIGITS: IntegerProperty = Property::integer("totp-digits");
//!
//! assert_eq!(DIGITS.parse_scalar(Some("8")).unwrap(), Some(8));
//! assert_eq!(DIGITS.parse_scalar(None).unwrap(), None);
//! assert!(DIGITS.parse_scalar(Some("eight")).is_err());
//! assert_eq!(DIGITS.parse_collection(Some("6, 7 ,8")).unwrap(), Some(vec![6, 7, 8]));
//! ```

mod error;
pub mod kind;

pub use crate::property::error::{PropertyError, PropertyErrorExt};
pub use crate::property::kind::{
    EnumKind, IntegerKind, KindTag, LongKind, NetworkKind, PropertyKind, StringKind,
};

use std::borrow::Cow;
use std::fmt::Display;
use std::ops::RangeInclusive;
use tracing::trace;

/// Separates the entries of a collection value. Whitespace around it is not part of an entry.
pub const DELIMITER: char = ',';

pub type StringProperty = Property<StringKind>;
pub type IntegerProperty = Property<IntegerKind>;
pub type LongProperty = Property<LongKind>;
pub type EnumProperty<E> = Property<EnumKind<E>>;
pub type NetworkRangeProperty = Property<NetworkKind>;

/// A named, typed configuration entry.
#[derive(Debug, Clone, Copy)]
pub struct Property<K> {
    name: &'static str,
    kind: K,
}

impl<K> Property<K> {
    /// Declares a property of an arbitrary kind.
    pub const fn with_kind(name: &'static str, kind: K) -> Self {
        Self { name, kind }
    }

    /// The unique name of this property.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[must_use]
    pub const fn kind(&self) -> &K {
        &self.kind
    }
}

impl Property<StringKind> {
    #[must_use]
    pub const fn string(name: &'static str) -> Self {
        Self::with_kind(name, StringKind)
    }
}

impl Property<IntegerKind> {
    #[must_use]
    pub const fn integer(name: &'static str) -> Self {
        Self::with_kind(name, IntegerKind)
    }
}

impl Property<LongKind> {
    #[must_use]
    pub const fn long(name: &'static str) -> Self {
        Self::with_kind(name, LongKind)
    }
}

impl<E> Property<EnumKind<E>> {
    #[must_use]
    pub const fn symbol(name: &'static str) -> Self {
        Self::with_kind(name, EnumKind::new())
    }
}

impl Property<NetworkKind> {
    #[must_use]
    pub const fn network(name: &'static str) -> Self {
        Self::with_kind(name, NetworkKind)
    }
}

impl<K: PropertyKind> Property<K> {
    /// Parses a single value.
    ///
    /// # Returns
    /// * `Ok(None)` if `raw` is absent.
    /// * `Ok(Some(value))` if `raw` is a legal value of this property's kind.
    ///
    /// # Errors
    /// [`PropertyError::Invalid`] or, for network ranges, [`PropertyError::MalformedNetworkRange`]
    /// when `raw` fails the kind's parse rule.
    pub fn parse_scalar(&self, raw: Option<&str>) -> Result<Option<K::Value>, PropertyError> {
        let Some(raw) = raw else {
            return Ok(None);
        };

        self.kind.parse(raw).map(Some).map_err(|message| self.reject(raw, message))
    }

    /// Parses a comma-delimited list of values, preserving order and duplicates.
    ///
    /// Splitting keeps leading empty entries and drops trailing ones, so an empty or
    /// delimiter-only value holds no entries at all.
    ///
    /// # Returns
    /// * `Ok(None)` if `raw` is absent or holds no entries.
    /// * `Ok(Some(values))` if every entry parses.
    ///
    /// # Errors
    /// The error of the first entry that fails to parse. No partial result is returned.
    pub fn parse_collection(
        &self,
        raw: Option<&str>,
    ) -> Result<Option<Vec<K::Value>>, PropertyError> {
        let Some(raw) = raw else {
            return Ok(None);
        };

        let entries = split_delimited(raw);
        if entries.is_empty() {
            trace!(property = self.name, "Collection property has no entries");
            return Ok(None);
        }

        entries
            .into_iter()
            .map(|entry| self.kind.parse(entry).map_err(|message| self.reject(entry, message)))
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    fn reject(&self, raw: &str, message: Cow<'static, str>) -> PropertyError {
        match K::TAG {
            KindTag::NetworkRange => PropertyError::MalformedNetworkRange {
                name: self.name,
                raw: raw.to_owned(),
                message,
                context: None,
            },
            _ => PropertyError::Invalid {
                name: self.name,
                raw: raw.to_owned(),
                message,
                context: None,
            },
        }
    }
}

impl<K> Property<K>
where
    K: PropertyKind,
    K::Value: PartialOrd + Display,
{
    /// Checks a parsed value against an inclusive semantic range.
    ///
    /// # Errors
    /// [`PropertyError::Invalid`] carrying `message` when `value` lies outside `range`.
    pub fn check_range(
        &self,
        value: K::Value,
        range: RangeInclusive<K::Value>,
        message: impl Into<Cow<'static, str>>,
    ) -> Result<K::Value, PropertyError> {
        if range.contains(&value) {
            Ok(value)
        } else {
            Err(PropertyError::Invalid {
                name: self.name,
                raw: value.to_string(),
                message: message.into(),
                context: None,
            })
        }
    }
}

/// Splits on [`DELIMITER`], trimming whitespace next to it and dropping trailing empty entries.
fn split_delimited(raw: &str) -> Vec<&str> {
    let last = raw.matches(DELIMITER).count();
    let mut entries: Vec<&str> = raw
        .split(DELIMITER)
        .enumerate()
        .map(|(index, entry)| {
            let entry = if index == 0 { entry } else { entry.trim_start() };
            if index == last { entry } else { entry.trim_end() }
        })
        .collect();
    while entries.last().is_some_and(|entry| entry.is_empty()) {
        entries.pop();
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use gate_domain::totp::TotpMode;

    const COUNT: IntegerProperty = Property::integer("test-count");
    const SIZE: LongProperty = Property::long("test-size");
    const NAMES: StringProperty = Property::string("test-names");
    const MODE: EnumProperty<TotpMode> = Property::symbol("test-mode");
    const HOSTS: NetworkRangeProperty = Property::network("test-hosts");

    #[test]
    fn absent_values_parse_to_none_for_every_kind() {
        assert_eq!(COUNT.parse_scalar(None).unwrap(), None);
        assert_eq!(SIZE.parse_scalar(None).unwrap(), None);
        assert_eq!(NAMES.parse_scalar(None).unwrap(), None);
        assert_eq!(MODE.parse_scalar(None).unwrap(), None);
        assert!(HOSTS.parse_scalar(None).unwrap().is_none());
        assert_eq!(COUNT.parse_collection(None).unwrap(), None);
    }

    #[test]
    fn split_keeps_leading_and_drops_trailing_empties() {
        assert_eq!(split_delimited("a , b,c"), vec!["a", "b", "c"]);
        assert_eq!(split_delimited(",a"), vec!["", "a"]);
        assert_eq!(split_delimited("a,,"), vec!["a"]);
        assert!(split_delimited("").is_empty());
        assert!(split_delimited(" , ").is_empty());
    }

    #[test]
    fn empty_collections_normalize_to_none() {
        assert_eq!(NAMES.parse_collection(Some("")).unwrap(), None);
        assert_eq!(COUNT.parse_collection(Some(" ,  ")).unwrap(), None);
    }

    #[test]
    fn collections_preserve_order_and_duplicates() {
        let values = NAMES.parse_collection(Some("b, a ,b")).unwrap();
        assert_eq!(values, Some(vec!["b".to_owned(), "a".to_owned(), "b".to_owned()]));
    }

    #[test]
    fn collections_fail_fast_on_first_bad_entry() {
        let err = COUNT.parse_collection(Some("1, two, three")).unwrap_err();
        match err {
            PropertyError::Invalid { name, raw, .. } => {
                assert_eq!(name, "test-count");
                assert_eq!(raw, "two");
            },
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn invalid_scalars_name_the_property() {
        let err = SIZE.parse_scalar(Some("big")).unwrap_err();
        assert_eq!(err.property_name(), Some("test-size"));
        assert_eq!(err.to_string(), "Property \"test-size\" must be a long, got \"big\"");
    }

    #[test]
    fn enum_symbols_are_case_sensitive() {
        assert_eq!(MODE.parse_scalar(Some("sha256")).unwrap(), Some(TotpMode::Sha256));
        assert!(matches!(
            MODE.parse_scalar(Some("SHA256")),
            Err(PropertyError::Invalid { .. })
        ));
    }

    #[test]
    fn bad_network_ranges_are_reported_as_such() {
        let err = HOSTS.parse_collection(Some("10.0.0.0/8, 300.1.1.1")).unwrap_err();
        assert!(matches!(
            err,
            PropertyError::MalformedNetworkRange { ref raw, .. } if raw == "300.1.1.1"
        ));
    }

    #[test]
    fn range_checks_report_the_value() {
        assert_eq!(COUNT.check_range(7, 6..=8, "out of range").unwrap(), 7);
        let err = COUNT.check_range(9, 6..=8, "must be between 6 and 8").unwrap_err();
        assert_eq!(err.to_string(), "Property \"test-count\" must be between 6 and 8, got \"9\"");
    }
}
