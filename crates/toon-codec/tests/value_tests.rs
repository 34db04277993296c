use toon_codec::{toon, Map, ToonValue};

// ============================================================================
// toon! Macro
// ============================================================================

#[test]
fn macro_builds_primitives() {
    assert_eq!(toon!(null), ToonValue::Null);
    assert_eq!(toon!(true), ToonValue::Bool(true));
    assert_eq!(toon!(false), ToonValue::Bool(false));
    assert_eq!(toon!(42), ToonValue::Number(42.0));
    assert_eq!(toon!(3.5), ToonValue::Number(3.5));
    assert_eq!(toon!("hi"), ToonValue::String("hi".to_string()));
}

#[test]
fn macro_builds_collections() {
    assert_eq!(toon!([]), ToonValue::Array(vec![]));
    assert_eq!(toon!({}), ToonValue::Object(Map::new()));

    let arr = toon!([1, "two", null]);
    assert_eq!(
        arr,
        ToonValue::Array(vec![
            ToonValue::Number(1.0),
            ToonValue::String("two".to_string()),
            ToonValue::Null,
        ])
    );
}

#[test]
fn macro_builds_nested_structures() {
    let value = toon!({
        "user": {
            "name": "Ada",
            "scores": [1, 2, 3]
        }
    });
    let user = value.as_object().unwrap().get("user").unwrap();
    assert_eq!(user.as_object().unwrap()["name"], toon!("Ada"));
    let scores = user.as_object().unwrap().get("scores").unwrap();
    assert_eq!(scores.as_array().unwrap().len(), 3);
}

#[test]
fn macro_preserves_key_order() {
    let value = toon!({"z": 1, "a": 2, "m": 3});
    let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
    assert_eq!(keys, ["z", "a", "m"]);
}

// ============================================================================
// Accessors and Conversions
// ============================================================================

#[test]
fn accessors_match_variants() {
    assert!(ToonValue::Null.is_null());
    assert_eq!(toon!(true).as_bool(), Some(true));
    assert_eq!(toon!(1.5).as_f64(), Some(1.5));
    assert_eq!(toon!("s").as_str(), Some("s"));
    assert!(toon!([1]).as_array().is_some());
    assert!(toon!({}).as_object().is_some());

    assert_eq!(toon!("s").as_bool(), None);
    assert_eq!(toon!(true).as_str(), None);
}

#[test]
fn from_impls_cover_common_types() {
    assert_eq!(ToonValue::from(7i32), ToonValue::Number(7.0));
    assert_eq!(ToonValue::from(7i64), ToonValue::Number(7.0));
    assert_eq!(ToonValue::from(7u64), ToonValue::Number(7.0));
    assert_eq!(ToonValue::from(0.25), ToonValue::Number(0.25));
    assert_eq!(ToonValue::from("x"), ToonValue::String("x".to_string()));
    assert_eq!(
        ToonValue::from(vec![1, 2]),
        ToonValue::Array(vec![ToonValue::Number(1.0), ToonValue::Number(2.0)])
    );
}

// ============================================================================
// JSON Interop
// ============================================================================

#[test]
fn json_conversion_preserves_key_order() {
    let json: serde_json::Value =
        serde_json::from_str(r#"{"z":1,"a":2,"m":[true,null]}"#).unwrap();
    let value = ToonValue::from(json);
    let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
    assert_eq!(keys, ["z", "a", "m"]);

    let back = serde_json::Value::from(&value);
    assert_eq!(
        serde_json::to_string(&back).unwrap(),
        r#"{"z":1,"a":2,"m":[true,null]}"#
    );
}

#[test]
fn json_integral_doubles_become_integers() {
    let back = serde_json::Value::from(&toon!({"n": 5.0}));
    assert_eq!(serde_json::to_string(&back).unwrap(), r#"{"n":5}"#);
}

#[test]
fn json_strings_and_fractions_survive() {
    let value = toon!({"s": "42", "f": 2.5});
    let back = serde_json::Value::from(&value);
    assert_eq!(serde_json::to_string(&back).unwrap(), r#"{"s":"42","f":2.5}"#);
    assert_eq!(ToonValue::from(back), value);
}
