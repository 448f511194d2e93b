use loose_json::{
    from_reader, from_slice, from_str, from_str_with_options, json, parse_str,
    parse_str_with_options, to_string, to_string_with_options, to_value, value_to_string,
    value_to_string_with_options, CodePointPolicy, EcmaEdition, Error, JsonOptions, Number,
    Property, PropertySource, Value, Visibility, Writer,
};
use serde::{Deserialize, Serialize};
use std::cell::Cell;

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct User {
    id: u32,
    name: String,
    active: bool,
    tags: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Product {
    sku: String,
    price: f64,
    quantity: u32,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Order {
    order_id: u32,
    customer: User,
    items: Vec<Product>,
    total: f64,
}

#[test]
fn test_simple_struct_roundtrip() {
    let user = User {
        id: 123,
        name: "Alice".to_string(),
        active: true,
        tags: vec!["admin".to_string(), "developer".to_string()],
    };

    let json = to_string(&user).unwrap();
    assert_eq!(
        json,
        r#"{"id":123,"name":"Alice","active":true,"tags":["admin","developer"]}"#
    );

    let user_back: User = from_str(&json).unwrap();
    assert_eq!(user, user_back);
}

#[test]
fn test_nested_struct_roundtrip() {
    let order = Order {
        order_id: 12345,
        customer: User {
            id: 123,
            name: "Alice".to_string(),
            active: true,
            tags: vec!["vip".to_string()],
        },
        items: vec![
            Product {
                sku: "WIDGET-001".to_string(),
                price: 29.99,
                quantity: 2,
            },
            Product {
                sku: "GADGET-002".to_string(),
                price: 49.99,
                quantity: 1,
            },
        ],
        total: 109.97,
    };

    let json = to_string(&order).unwrap();
    let order_back: Order = from_str(&json).unwrap();
    assert_eq!(order, order_back);
}

#[test]
fn test_loose_decoding_forms() {
    // Single quotes, unquoted identifiers, hex, octal, specials, trailing comma
    let value = parse_str("{price: 0x1F, 'label': 'a\\tb', octal: 017, inf: Infinity,}")
        .unwrap()
        .unwrap();
    let obj = value.as_object().unwrap();
    assert_eq!(obj.get("price").and_then(Value::as_i64), Some(31));
    assert_eq!(obj.get("label").and_then(Value::as_str), Some("a\tb"));
    assert_eq!(obj.get("octal").and_then(Value::as_i64), Some(15));
    assert_eq!(obj.get("inf"), Some(&Value::Number(Number::Infinity)));
}

#[test]
fn test_spec_scenario_nested_document() {
    let value = parse_str(r#"{"a":1,"b":[true,null,"x\ty"]}"#).unwrap().unwrap();
    assert_eq!(
        value,
        json!({
            "a": 1,
            "b": [true, null, "x\ty"]
        })
    );
}

#[test]
fn test_strict_roundtrip_of_value_trees() {
    let value = json!({
        "name": "Alice",
        "scores": [1, 2.5, 3],
        "nested": {"ok": true, "nothing": null}
    });
    let text = value_to_string(&value).unwrap();
    let back = parse_str(&text).unwrap().unwrap();
    assert_eq!(value, back);
}

#[test]
fn test_output_is_strict_json_for_serde_json() {
    let value = json!({
        "text": "x\ty / \"quoted\"",
        "list": [1, 2.5, true, null],
        "sep": "a\u{2028}b"
    });
    let text = value_to_string(&value).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&text).expect("strict JSON");
    assert_eq!(parsed["list"][0], serde_json::json!(1));
    assert_eq!(parsed["text"], serde_json::json!("x\ty / \"quoted\""));
    assert_eq!(parsed["sep"], serde_json::json!("a\u{2028}b"));
}

#[test]
fn test_surrogate_scenarios_by_edition() {
    let value = json!("\u{1F600}");

    let five = JsonOptions::new();
    assert_eq!(
        value_to_string_with_options(&value, five).unwrap(),
        "\"\\uD83D\\uDE00\""
    );

    let six = JsonOptions::new().with_ecma_edition(EcmaEdition::Six);
    assert_eq!(
        value_to_string_with_options(&value, six).unwrap(),
        "\"\\u{1F600}\""
    );

    // Both forms decode back to the single original code point
    for text in ["\"\\uD83D\\uDE00\"", "\"\\u{1F600}\""] {
        let back = parse_str(text).unwrap().unwrap();
        assert_eq!(back, json!("\u{1F600}"));
    }
}

#[test]
fn test_hex_and_octal_unescape_scenario() {
    let value = parse_str(r#""\x41\102""#).unwrap().unwrap();
    assert_eq!(value, json!("AB"));
}

#[test]
fn test_date_constructor_decoding() {
    let value = parse_str("new Date(\"2016-01-02T03:04:05Z\")").unwrap().unwrap();
    let dt = value.as_date().expect("date value");
    assert_eq!(dt.to_rfc3339(), "2016-01-02T03:04:05+00:00");
}

#[test]
fn test_date_string_decoding_when_enabled() {
    let options = JsonOptions::new().with_decode_date_strings(true);
    let value = parse_str_with_options("\"2016-01-02T03:04:05Z\"", &options)
        .unwrap()
        .unwrap();
    assert!(value.is_date());
}

#[test]
fn test_custom_date_formats_tried_in_order() {
    let options = JsonOptions::new().with_custom_date_format("%d/%m/%Y");
    let value = parse_str_with_options("new Date('02/01/2016')", &options)
        .unwrap()
        .unwrap();
    let dt = value.as_date().expect("date value");
    assert_eq!(dt.to_rfc3339(), "2016-01-02T00:00:00+00:00");
}

#[test]
fn test_date_encoding_modes_roundtrip() {
    let dt = loose_json::dates::parse_date("2016-01-02T03:04:05Z", &[]).unwrap();
    let value = Value::Date(dt);

    assert_eq!(value_to_string(&value).unwrap(), "\"2016-01-02T03:04:05Z\"");

    let options = JsonOptions::new().with_encode_dates_as_objects(true);
    let eval_form = value_to_string_with_options(&value, options).unwrap();
    assert_eq!(eval_form, "new Date(\"2016-01-02T03:04:05Z\")");

    // The eval-compatible form decodes back to the same instant
    let back = parse_str(&eval_form).unwrap().unwrap();
    assert_eq!(back, value);
}

#[test]
fn test_escape_non_ascii_option() {
    let options = JsonOptions::new().with_escape_non_ascii(true);
    assert_eq!(
        value_to_string_with_options(&json!("caf\u{e9}"), options).unwrap(),
        "\"caf\\u00E9\""
    );
    // Default leaves it raw
    assert_eq!(value_to_string(&json!("caf\u{e9}")).unwrap(), "\"caf\u{e9}\"");
}

#[test]
fn test_numeric_strings_as_numbers_option() {
    let options = JsonOptions::new().with_encode_numeric_strings_as_numbers(true);
    assert_eq!(
        value_to_string_with_options(&json!({"n": "12.5"}), options).unwrap(),
        "{\"n\":12.5}"
    );
}

#[test]
fn test_bare_identifier_output_decodes_back() {
    let options = JsonOptions::new().with_quote_identifiers(false);
    let value = json!({"alpha": 1, "beta": [2, 3]});
    let text = value_to_string_with_options(&value, options).unwrap();
    assert_eq!(text, "{alpha:1,beta:[2,3]}");
    let back = parse_str(&text).unwrap().unwrap();
    assert_eq!(back, value);
}

#[test]
fn test_infinity_requotes_as_string_by_default() {
    let inf = f64::INFINITY;
    assert_eq!(
        value_to_string(&json!({"limit": inf})).unwrap(),
        "{\"limit\":\"Infinity\"}"
    );
}

#[test]
fn test_bigint_roundtrip() {
    let text = "123456789012345678901234567890";
    let value = parse_str(text).unwrap().unwrap();
    assert!(value.is_bigint());
    assert_eq!(value_to_string(&value).unwrap(), text);
}

#[test]
fn test_undefined_code_point_policies_on_decode() {
    let error = JsonOptions::new().with_undefined_code_point_policy(CodePointPolicy::Error);
    assert!(matches!(
        parse_str_with_options(r#""\u{FDD0}""#, &error),
        Err(Error::UndefinedCodePoint { .. })
    ));

    let replace = JsonOptions::new().with_undefined_code_point_policy(CodePointPolicy::Replace);
    let value = parse_str_with_options(r#""a\u{FDD0}b""#, &replace).unwrap().unwrap();
    assert_eq!(value, json!("a\u{FFFD}b"));
}

#[test]
fn test_unmatched_surrogate_policies_on_decode() {
    let error = JsonOptions::new().with_unmatched_surrogate_policy(CodePointPolicy::Error);
    assert!(matches!(
        parse_str_with_options(r#""\uD800""#, &error),
        Err(Error::MalformedSurrogate { .. })
    ));

    // Default policy replaces
    let value = parse_str(r#""a\uD800b""#).unwrap().unwrap();
    assert_eq!(value, json!("a\u{FFFD}b"));
}

#[test]
fn test_tokenize_errors_carry_positions() {
    match parse_str("{\n  \"a\": @}") {
        Err(Error::UnrecognizedToken { line, col, .. }) => {
            assert_eq!(line, 2);
            assert_eq!(col, 8);
        }
        other => panic!("expected UnrecognizedToken, got {:?}", other),
    }

    assert!(matches!(
        parse_str("\"never closed"),
        Err(Error::UnterminatedString { .. })
    ));

    assert!(matches!(
        parse_str("{\"a\" 1}"),
        Err(Error::UnexpectedToken { .. })
    ));
}

#[test]
fn test_empty_input() {
    assert!(parse_str("").unwrap().is_none());
    assert!(parse_str(" \t\n ").unwrap().is_none());
    let value: Value = from_str("").unwrap();
    assert_eq!(value, Value::Null);
}

#[test]
fn test_from_reader_and_from_slice() {
    let cursor = std::io::Cursor::new(b"{x: 1, y: 2}".to_vec());
    let point: std::collections::HashMap<String, i32> = from_reader(cursor).unwrap();
    assert_eq!(point.get("x"), Some(&1));

    let point: std::collections::HashMap<String, i32> = from_slice(b"{x: 1, y: 2}").unwrap();
    assert_eq!(point.get("y"), Some(&2));
}

#[test]
fn test_enum_roundtrip() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    enum Status {
        Active,
        Suspended { reason: String },
        Retry(u32),
    }

    for status in [
        Status::Active,
        Status::Suspended {
            reason: "abuse".to_string(),
        },
        Status::Retry(3),
    ] {
        let json = to_string(&status).unwrap();
        let back: Status = from_str(&json).unwrap();
        assert_eq!(status, back);
    }
}

#[test]
fn test_option_fields() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Config {
        name: String,
        limit: Option<u32>,
    }

    let with = Config {
        name: "a".to_string(),
        limit: Some(5),
    };
    let without = Config {
        name: "b".to_string(),
        limit: None,
    };
    for config in [with, without] {
        let json = to_string(&config).unwrap();
        let back: Config = from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}

#[test]
fn test_value_display_is_compact_strict_json() {
    let value = json!({"a": [1, true, null]});
    assert_eq!(value.to_string(), "{\"a\":[1,true,null]}");
}

#[test]
fn test_decode_options_through_serde_path() {
    #[derive(Deserialize, Debug, PartialEq)]
    struct Event {
        at: String,
    }
    // Without date decoding the string stays a string through serde
    let event: Event = from_str("{at: '2016-01-02T03:04:05Z'}").unwrap();
    assert_eq!(event.at, "2016-01-02T03:04:05Z");

    // Loose numerics through serde
    let options = JsonOptions::new();
    let n: i64 = from_str_with_options("0xFF", &options).unwrap();
    assert_eq!(n, 255);
}

struct Node<'a> {
    label: &'static str,
    next: Cell<Option<&'a Node<'a>>>,
}

impl<'a> Node<'a> {
    fn new(label: &'static str) -> Self {
        Node {
            label,
            next: Cell::new(None),
        }
    }
}

impl PropertySource for Node<'_> {
    fn enumerate_properties(&self, _visibility: Visibility) -> Vec<(String, Property<'_>)> {
        let mut properties = vec![(
            "label".to_string(),
            Property::Value(Value::from(self.label)),
        )];
        if let Some(next) = self.next.get() {
            properties.push(("next".to_string(), Property::Source(next)));
        }
        properties
    }
}

#[test]
fn test_acyclic_graph_writes() {
    let tail = Node::new("tail");
    let head = Node::new("head");
    head.next.set(Some(&tail));

    let mut out = Vec::new();
    let mut writer = Writer::new(&mut out, JsonOptions::default());
    writer.write_source(&head).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "{\"label\":\"head\",\"next\":{\"label\":\"tail\"}}"
    );
}

#[test]
fn test_cyclic_graph_fails_with_loop_error() {
    let a = Node::new("a");
    let b = Node::new("b");
    a.next.set(Some(&b));
    b.next.set(Some(&a));

    let mut out = Vec::new();
    let mut writer = Writer::new(&mut out, JsonOptions::default());
    assert!(matches!(
        writer.write_source(&a),
        Err(Error::DataStructureLoop { .. })
    ));

    // The writer is reusable after the failed call
    let mut out = Vec::new();
    let mut writer = Writer::new(&mut out, JsonOptions::default());
    b.next.set(None);
    writer.write_source(&a).unwrap();
}

#[test]
fn test_shared_node_twice_is_not_a_loop() {
    // The same node reached twice sequentially (not simultaneously) is fine.
    let shared = Node::new("shared");
    struct Holder<'a> {
        left: &'a Node<'a>,
        right: &'a Node<'a>,
    }
    impl PropertySource for Holder<'_> {
        fn enumerate_properties(&self, _visibility: Visibility) -> Vec<(String, Property<'_>)> {
            vec![
                ("left".to_string(), Property::Source(self.left)),
                ("right".to_string(), Property::Source(self.right)),
            ]
        }
    }
    let holder = Holder {
        left: &shared,
        right: &shared,
    };

    let mut out = Vec::new();
    let mut writer = Writer::new(&mut out, JsonOptions::default());
    writer.write_source(&holder).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "{\"left\":{\"label\":\"shared\"},\"right\":{\"label\":\"shared\"}}"
    );
}

#[test]
fn test_visibility_reaches_the_source() {
    struct Probe;
    impl PropertySource for Probe {
        fn enumerate_properties(&self, visibility: Visibility) -> Vec<(String, Property<'_>)> {
            vec![(
                "visibility".to_string(),
                Property::Value(Value::from(format!("{:?}", visibility))),
            )]
        }
    }

    let mut out = Vec::new();
    let mut writer =
        Writer::new(&mut out, JsonOptions::default()).with_visibility(Visibility::All);
    writer.write_source(&Probe).unwrap();
    assert_eq!(String::from_utf8(out).unwrap(), "{\"visibility\":\"All\"}");
}

#[test]
fn test_property_list_of_sources() {
    struct Group<'a> {
        members: Vec<&'a Node<'a>>,
    }
    impl PropertySource for Group<'_> {
        fn enumerate_properties(&self, _visibility: Visibility) -> Vec<(String, Property<'_>)> {
            vec![(
                "members".to_string(),
                Property::List(
                    self.members
                        .iter()
                        .map(|m| Property::Source(*m))
                        .collect(),
                ),
            )]
        }
    }

    let a = Node::new("a");
    let b = Node::new("b");
    let group = Group {
        members: vec![&a, &b],
    };
    let mut out = Vec::new();
    let mut writer = Writer::new(&mut out, JsonOptions::default());
    writer.write_source(&group).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "{\"members\":[{\"label\":\"a\"},{\"label\":\"b\"}]}"
    );
}

#[test]
fn test_to_value_and_back() {
    let user = User {
        id: 1,
        name: "Bob".to_string(),
        active: false,
        tags: vec![],
    };
    let value = to_value(&user).unwrap();
    let obj = value.as_object().unwrap();
    assert_eq!(obj.get("id").and_then(Value::as_i64), Some(1));

    let text = to_string_with_options(&user, JsonOptions::new()).unwrap();
    let back: User = from_str(&text).unwrap();
    assert_eq!(back, user);
}
