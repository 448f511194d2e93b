//! Property-based tests - pragmatic approach testing core roundtrip guarantees
//!
//! These tests complement the integration tests by verifying the codec's
//! round-trip properties across a wide range of generated inputs: serde
//! round-trips, escape/unescape inversion, and Value-tree stability under
//! strict-JSON settings.

use loose_json::escape::escape_str;
use loose_json::unescape::unescape;
use loose_json::{
    from_str, parse_str, to_string, value_to_string, CodePointPolicy, JsonOptions, Number, Value,
};
use proptest::prelude::*;
use serde::{Deserialize, Serialize};

fn roundtrip<T: Serialize + for<'de> Deserialize<'de> + PartialEq + std::fmt::Debug>(
    value: &T,
) -> bool {
    match to_string(value) {
        Ok(serialized) => match from_str::<T>(&serialized) {
            Ok(deserialized) => *value == deserialized,
            Err(e) => {
                eprintln!("Deserialize failed: {}", e);
                eprintln!("Serialized was: {}", serialized);
                false
            }
        },
        Err(e) => {
            eprintln!("Serialize failed: {}", e);
            false
        }
    }
}

fn value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|i| Value::Number(Number::Integer(i))),
        any::<f64>()
            .prop_filter("finite floats only", |f| f.is_finite())
            .prop_map(|f| Value::Number(Number::Float(f))),
        ".*".prop_map(Value::String),
    ];
    leaf.prop_recursive(4, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::btree_map(".*", inner, 0..6)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

proptest! {
    // Serde round-trips for primitive types
    #[test]
    fn prop_i32(n in any::<i32>()) {
        prop_assert!(roundtrip(&n));
    }

    #[test]
    fn prop_i64(n in any::<i64>()) {
        prop_assert!(roundtrip(&n));
    }

    #[test]
    fn prop_u64(n in any::<u64>()) {
        prop_assert!(roundtrip(&n));
    }

    #[test]
    fn prop_bool(b in any::<bool>()) {
        prop_assert!(roundtrip(&b));
    }

    #[test]
    fn prop_string(s in ".*") {
        prop_assert!(roundtrip(&s));
    }

    // Serde round-trips for collections
    #[test]
    fn prop_vec_i32(v in prop::collection::vec(any::<i32>(), 0..20)) {
        prop_assert!(roundtrip(&v));
    }

    #[test]
    fn prop_option_i32(opt in proptest::option::of(any::<i32>())) {
        prop_assert!(roundtrip(&opt));
    }

    #[test]
    fn prop_tuple_i32_bool(t in (any::<i32>(), any::<bool>())) {
        prop_assert!(roundtrip(&t));
    }

    // Escaping is inverted exactly by unescaping for well-defined content
    #[test]
    fn prop_escape_unescape_inverts(s in ".*") {
        let options = JsonOptions::new()
            .with_undefined_code_point_policy(CodePointPolicy::Pass)
            .with_unmatched_surrogate_policy(CodePointPolicy::Pass);
        let escaped = escape_str(&s, &options).unwrap();
        prop_assert_eq!(unescape(&escaped, &options).unwrap(), s);
    }

    #[test]
    fn prop_escape_unescape_inverts_ascii_only(s in ".*") {
        let options = JsonOptions::new()
            .with_escape_non_ascii(true)
            .with_undefined_code_point_policy(CodePointPolicy::Pass)
            .with_unmatched_surrogate_policy(CodePointPolicy::Pass);
        let escaped = escape_str(&s, &options).unwrap();
        prop_assert!(escaped.bytes().all(|b| b.is_ascii()));
        prop_assert_eq!(unescape(&escaped, &options).unwrap(), s);
    }

    // Value trees survive a strict serialize/parse cycle unchanged
    #[test]
    fn prop_value_tree_roundtrip(value in value_strategy()) {
        let text = value_to_string(&value).unwrap();
        let back = parse_str(&text).unwrap().expect("non-empty document");
        prop_assert_eq!(back, value);
    }
}
