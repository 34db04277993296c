use toon_codec::{filter_and_encode, filter_fields, toon, EncodeOptions};

// ============================================================================
// Literal Patterns
// ============================================================================

#[test]
fn filter_top_level_field() {
    let value = toon!({"name": "Alice", "etag": "abc", "kind": "user"});
    let filtered = filter_fields(&value, &["etag", "kind"]);
    assert_eq!(filtered, toon!({"name": "Alice"}));
}

#[test]
fn filter_no_patterns_is_identity() {
    let value = toon!({"a": 1, "b": {"c": 2}});
    assert_eq!(filter_fields(&value, &[]), value);
}

#[test]
fn filter_missing_field_is_noop() {
    let value = toon!({"a": 1});
    assert_eq!(filter_fields(&value, &["nope"]), value);
}

#[test]
fn filter_nested_path() {
    let value = toon!({
        "user": {"name": "Ada", "etag": "x"},
        "etag": "kept-because-pattern-is-nested"
    });
    let filtered = filter_fields(&value, &["user.etag"]);
    assert_eq!(
        filtered,
        toon!({
            "user": {"name": "Ada"},
            "etag": "kept-because-pattern-is-nested"
        })
    );
}

#[test]
fn filter_primitives_pass_through() {
    assert_eq!(filter_fields(&toon!(42), &["a"]), toon!(42));
    assert_eq!(filter_fields(&toon!("x"), &["a"]), toon!("x"));
}

// ============================================================================
// Wildcards
// ============================================================================

#[test]
fn filter_wildcard_any_depth() {
    let value = toon!({
        "etag": "1",
        "user": {"etag": "2", "name": "Ada"},
        "deep": {"inner": {"etag": "3", "keep": true}}
    });
    let filtered = filter_fields(&value, &["etag", "*.etag"]);
    assert_eq!(
        filtered,
        toon!({
            "user": {"name": "Ada"},
            "deep": {"inner": {"keep": true}}
        })
    );
}

#[test]
fn filter_wildcard_segment() {
    let value = toon!({
        "attendees": [
            {"email": "a@x", "status": "yes"},
            {"email": "b@x", "status": "no"}
        ]
    });
    let filtered = filter_fields(&value, &["attendees.*.status"]);
    assert_eq!(
        filtered,
        toon!({
            "attendees": [
                {"email": "a@x"},
                {"email": "b@x"}
            ]
        })
    );
}

// ============================================================================
// Arrays
// ============================================================================

#[test]
fn filter_descends_through_arrays() {
    // Arrays are transparent: `items.etag` matches inside each element.
    let value = toon!({
        "items": [
            {"id": 1, "etag": "a"},
            {"id": 2, "etag": "b"}
        ]
    });
    let filtered = filter_fields(&value, &["items.etag"]);
    assert_eq!(filtered, toon!({"items": [{"id": 1}, {"id": 2}]}));
}

#[test]
fn filter_array_of_primitives_untouched() {
    let value = toon!({"tags": ["a", "b"]});
    assert_eq!(filter_fields(&value, &["etag"]), value);
}

// ============================================================================
// Filter + Encode
// ============================================================================

#[test]
fn filter_and_encode_drops_noise() {
    let value = toon!({"name": "Alice", "etag": "abc"});
    let text = filter_and_encode(&value, &["etag"], &EncodeOptions::default()).unwrap();
    assert_eq!(text, "name: Alice");
}

#[test]
fn filter_and_encode_restores_tabular_form() {
    // Stripping the non-uniform field lets the array encode tabular again.
    let value = toon!({
        "rows": [
            {"id": 1, "extra": {"a": 1}},
            {"id": 2, "extra": {"b": 2}}
        ]
    });
    let text = filter_and_encode(&value, &["rows.extra"], &EncodeOptions::default()).unwrap();
    assert_eq!(text, "rows[2]{id}:\n  1\n  2");
}
