//! Roundtrip fidelity: `decode(encode(v)) == v` for representable trees,
//! and `encode(decode(d))` semantically equivalent to `d` for well-formed
//! documents (form choice and whitespace may differ).

use toon_codec::{
    decode, decode_with_options, encode, encode_with_options, toon, DecodeOptions, Delimiter,
    EncodeOptions, KeyFolding, PathExpansion, ToonValue,
};

fn assert_roundtrip(value: ToonValue) {
    let text = encode(&value).unwrap();
    let back = decode(&text).unwrap();
    assert_eq!(
        back, value,
        "roundtrip failed:\n  value: {value:?}\n  TOON:  {text:?}\n  back:  {back:?}"
    );
}

fn assert_roundtrip_with(value: ToonValue, enc: &EncodeOptions, dec: &DecodeOptions) {
    let text = encode_with_options(&value, enc).unwrap();
    let back = decode_with_options(&text, dec).unwrap();
    assert_eq!(
        back, value,
        "roundtrip failed:\n  value: {value:?}\n  TOON:  {text:?}\n  back:  {back:?}"
    );
}

// ============================================================================
// Primitives
// ============================================================================

#[test]
fn roundtrip_primitives() {
    assert_roundtrip(ToonValue::Null);
    assert_roundtrip(toon!(true));
    assert_roundtrip(toon!(false));
    assert_roundtrip(toon!(0));
    assert_roundtrip(toon!(-7));
    assert_roundtrip(toon!(3.14));
    assert_roundtrip(toon!((-2.5e-3)));
    assert_roundtrip(toon!(1e10));
    assert_roundtrip(toon!("hello"));
    assert_roundtrip(toon!(""));
}

#[test]
fn roundtrip_keyword_like_strings() {
    for s in ["true", "false", "null", "42", "3.14", "0", "-1", "05", "007"] {
        assert_roundtrip(toon!({"key": (s)}));
        assert_roundtrip(toon!([(s)]));
    }
}

#[test]
fn roundtrip_awkward_strings() {
    for s in [
        "",
        " leading",
        "trailing ",
        "  ",
        "line1\nline2",
        "col1\tcol2",
        "path\\to\\file",
        "say \"hi\"",
        "a,b",
        "a|b",
        "a:b",
        "- item",
        "-",
        "[3]: x",
        "{key}",
        "caf\u{e9}",
        "\u{4f60}\u{597d}",
    ] {
        assert_roundtrip(toon!({"key": (s)}));
        assert_roundtrip(toon!([(s), "pad"]));
    }
}

#[test]
fn roundtrip_zero_forms() {
    // -0, 0, -0.0 all encode to `0` and decode as the number 0.
    for value in [toon!(0), toon!((-0.0)), toon!(0.0)] {
        let text = encode(&value).unwrap();
        assert_eq!(text, "0");
        assert_eq!(decode(&text).unwrap(), ToonValue::Number(0.0));
    }
}

// ============================================================================
// Structures
// ============================================================================

#[test]
fn roundtrip_flat_object() {
    assert_roundtrip(toon!({
        "name": "Alice",
        "age": 30,
        "score": 91.5,
        "active": true,
        "email": null
    }));
}

#[test]
fn roundtrip_nested_objects() {
    assert_roundtrip(toon!({
        "a": {"b": {"c": {"d": 1}}},
        "empty": {},
        "sibling": 2
    }));
}

#[test]
fn roundtrip_arrays() {
    assert_roundtrip(toon!({"xs": []}));
    assert_roundtrip(toon!({"xs": [1, 2, 3]}));
    assert_roundtrip(toon!({"xs": ["a", "b,c", "true", ""]}));
    assert_roundtrip(toon!([1, "two", null]));
    assert_roundtrip(toon!([]));
}

#[test]
fn roundtrip_tabular() {
    assert_roundtrip(toon!({
        "users": [
            {"id": 1, "name": "Alice", "role": "admin"},
            {"id": 2, "name": "Bob", "role": "user"}
        ]
    }));
}

#[test]
fn roundtrip_mixed_lists() {
    assert_roundtrip(toon!({"items": [1, {"k": "v"}, [2, 3]]}));
    assert_roundtrip(toon!({"items": [{}, {"a": 1, "b": {"c": 2}}, []]}));
    assert_roundtrip(toon!({"grid": [[1, 2], [3, 4]]}));
}

#[test]
fn roundtrip_deep_structure() {
    assert_roundtrip(toon!({
        "config": {
            "servers": [
                {"host": "a.example", "port": 8080},
                {"host": "b.example", "port": 9090}
            ],
            "flags": ["fast", "safe"],
            "limits": {"cpu": 0.5, "mem": null}
        },
        "items": [
            {"name": "first", "tags": [1, 2]},
            "bare",
            [true, false]
        ]
    }));
}

// ============================================================================
// Options
// ============================================================================

#[test]
fn roundtrip_with_pipe_delimiter() {
    let enc = EncodeOptions::new().with_delimiter(Delimiter::Pipe);
    let dec = DecodeOptions::default();
    assert_roundtrip_with(toon!({"tags": ["a", "b", "c,d"]}), &enc, &dec);
    assert_roundtrip_with(
        toon!({"rows": [{"a": "x|y", "b": 1}, {"a": "z", "b": 2}]}),
        &enc,
        &dec,
    );
}

#[test]
fn roundtrip_with_tab_delimiter() {
    let enc = EncodeOptions::new().with_delimiter(Delimiter::Tab);
    let dec = DecodeOptions::default();
    assert_roundtrip_with(toon!({"xs": ["a", "b c", "d,e"]}), &enc, &dec);
}

#[test]
fn roundtrip_with_custom_indent() {
    let enc = EncodeOptions::new().with_indent(4);
    let dec = DecodeOptions::new().with_indent(4).with_strict(true);
    assert_roundtrip_with(
        toon!({"a": {"b": [1, 2]}, "items": [{"x": 1, "y": {"z": 2}}, 5]}),
        &enc,
        &dec,
    );
}

#[test]
fn roundtrip_folding_and_expansion_invert() {
    let enc = EncodeOptions::new().with_key_folding(KeyFolding::Safe);
    let dec = DecodeOptions::new().with_expand_paths(PathExpansion::Safe);
    let value = toon!({"a": {"b": {"c": 1}}, "d": {"e": 2}});
    let text = encode_with_options(&value, &enc).unwrap();
    assert_eq!(text, "a.b.c: 1\nd.e: 2");
    assert_eq!(decode_with_options(&text, &dec).unwrap(), value);
}

#[test]
fn roundtrip_quoted_dotted_key_survives_expansion() {
    let dec = DecodeOptions::new().with_expand_paths(PathExpansion::Safe);
    let value = toon!({"a b.c": 1});
    let text = encode(&value).unwrap();
    assert_eq!(text, "\"a b.c\": 1");
    assert_eq!(decode_with_options(&text, &dec).unwrap(), value);
}

#[test]
fn roundtrip_strict_decode_accepts_encoder_output() {
    let value = toon!({
        "users": [
            {"id": 1, "name": "Alice"},
            {"id": 2, "name": "Bob"}
        ],
        "items": [1, {"k": {"deep": true}}, [2, 3]],
        "meta": {}
    });
    let text = encode(&value).unwrap();
    let back = decode_with_options(&text, &DecodeOptions::new().with_strict(true)).unwrap();
    assert_eq!(back, value);
}

// ============================================================================
// Document-Level Equivalence
// ============================================================================

/// encode(decode(d)) may change form and whitespace but not meaning.
fn assert_document_stable(doc: &str) {
    let value = decode(doc).unwrap();
    let re_encoded = encode(&value).unwrap();
    let value_again = decode(&re_encoded).unwrap();
    assert_eq!(
        value, value_again,
        "document not stable:\n  doc: {doc:?}\n  re-encoded: {re_encoded:?}"
    );
}

#[test]
fn documents_stabilize_after_one_cycle() {
    for doc in [
        "a: 1",
        "xs[3]:\n  a\n  b\n  c",
        "xs[2]:\n  - 1\n  - k: v",
        "users[2]{id,name}:\n  1,Alice\n  2,Bob",
        "[4]: 1,2,3,4",
        "k:\n  nested:\n    deep: true",
        "time: 10:30",
        "\"odd key\": value",
    ] {
        assert_document_stable(doc);
    }
}

#[test]
fn hand_written_spacing_is_normalized() {
    // Sloppy spacing decodes, then re-encodes canonically.
    let value = decode("a:1\nb:   2").unwrap();
    assert_eq!(value, toon!({"a": 1, "b": 2}));
    assert_eq!(encode(&value).unwrap(), "a: 1\nb: 2");
}
