//! Property based round trip tests over the parser, the renderer, the escape codec and the
//! conversion layer.
use std::collections::BTreeMap;

use chisel_json_value::{
    escape, native_to_value, parse_document, parse_value, unescape, FromValue, Object, Value,
};
use proptest::prelude::*;

fn arb_string() -> impl Strategy<Value = String> {
    prop_oneof![
        "[ -~]{0,24}",
        prop::string::string_regex("[a-z\"\\\\/\u{8}\u{c}\n\r\t]{0,12}").unwrap(),
        Just("".to_string()),
        Just("caf\u{e9} \u{b0} \u{4f60}\u{597d}".to_string()),
    ]
}

fn arb_primitive() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Boolean),
        any::<i64>().prop_map(Value::Integer),
        any::<f64>()
            .prop_filter("reals must be finite", |r| r.is_finite())
            .prop_map(Value::Real),
        arb_string().prop_map(Value::String),
    ]
}

/// Values nested up to `depth` containers deep
fn arb_value(depth: u32) -> BoxedStrategy<Value> {
    if depth == 0 {
        arb_primitive().boxed()
    } else {
        prop_oneof![
            4 => arb_primitive(),
            2 => prop::collection::vec((arb_string(), arb_value(depth - 1)), 0..5)
                .prop_map(|members| Value::Object(members.into_iter().collect::<Object>())),
            2 => prop::collection::vec(arb_value(depth - 1), 0..5).prop_map(Value::Array),
        ]
        .boxed()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn rendered_values_parse_back_to_equal_values(value in arb_value(3)) {
        let text = value.to_text();
        let parsed = parse_value(&text).unwrap();
        prop_assert_eq!(&parsed, &value, "{}", text);
    }

    #[test]
    fn rendering_is_idempotent(value in arb_value(3)) {
        let text = value.to_text();
        prop_assert_eq!(parse_value(&text).unwrap().to_text(), text);
    }

    #[test]
    fn documents_round_trip(values in prop::collection::vec(arb_value(2), 0..6)) {
        let document = Value::Array(values);
        let text = document.to_text();
        prop_assert_eq!(parse_document(&text).unwrap(), document);
    }

    #[test]
    fn escaping_round_trips(s in any::<String>()) {
        prop_assert_eq!(unescape(&escape(&s)).unwrap(), s);
    }

    #[test]
    fn unicode_escapes_decode_to_utf8(c in (0u32..=0xFFFF).prop_filter_map("surrogate", char::from_u32)) {
        let escaped = format!("\\u{:04x}", c as u32);
        prop_assert_eq!(unescape(&escaped).unwrap(), c.to_string());
    }

    #[test]
    fn narrowing_succeeds_only_within_range(i in any::<i64>()) {
        let value = Value::Integer(i);
        prop_assert_eq!(i8::from_value(&value).is_ok(), i8::try_from(i).is_ok());
        prop_assert_eq!(u16::from_value(&value).is_ok(), u16::try_from(i).is_ok());
        prop_assert_eq!(i32::from_value(&value).ok(), i32::try_from(i).ok());
    }

    #[test]
    fn native_collections_round_trip(
        list in prop::collection::vec(any::<i32>(), 0..8),
        map in prop::collection::btree_map(any::<i16>(), "[a-z]{0,6}", 0..6),
    ) {
        prop_assert_eq!(Vec::<i32>::from_value(&native_to_value(&list)).unwrap(), list);
        prop_assert_eq!(
            BTreeMap::<i16, String>::from_value(&native_to_value(&map)).unwrap(),
            map
        );
    }
}
