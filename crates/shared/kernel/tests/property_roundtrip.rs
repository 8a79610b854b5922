use gate_kernel::prelude::*;
use proptest::prelude::*;

const COUNT: IntegerProperty = Property::integer("test-count");
const SIZE: LongProperty = Property::long("test-size");
const NAMES: StringProperty = Property::string("test-names");

proptest! {
    #[test]
    fn integers_round_trip(n in any::<i32>()) {
        prop_assert_eq!(COUNT.parse_scalar(Some(&n.to_string())).unwrap(), Some(n));
    }

    #[test]
    fn longs_round_trip(n in any::<i64>()) {
        prop_assert_eq!(SIZE.parse_scalar(Some(&n.to_string())).unwrap(), Some(n));
    }

    #[test]
    fn integers_beyond_32_bits_are_rejected(n in (i64::from(i32::MAX) + 1)..i64::MAX) {
        let err = COUNT.parse_scalar(Some(&n.to_string())).unwrap_err();
        prop_assert_eq!(err.property_name(), Some("test-count"));
    }

    #[test]
    fn non_numeric_text_is_never_an_integer(raw in "[a-zA-Z ]{1,12}") {
        let is_invalid = matches!(
            COUNT.parse_scalar(Some(&raw)),
            Err(PropertyError::Invalid { .. })
        );
        prop_assert!(is_invalid);
    }

    #[test]
    fn joined_integer_lists_split_back_in_order(values in prop::collection::vec(any::<i32>(), 1..16)) {
        let raw = values.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
        prop_assert_eq!(COUNT.parse_collection(Some(&raw)).unwrap(), Some(values));
    }

    #[test]
    fn joined_words_split_back_in_order(values in prop::collection::vec("[a-z0-9.-]{1,10}", 1..8)) {
        let raw = values.join(",");
        prop_assert_eq!(NAMES.parse_collection(Some(&raw)).unwrap(), Some(values));
    }
}

#[test]
fn empty_and_absent_collections_are_none() {
    assert_eq!(NAMES.parse_collection(Some("")).unwrap(), None);
    assert_eq!(NAMES.parse_collection(None).unwrap(), None);
}
