//! Field filtering — strip unwanted fields before encoding.
//!
//! Pattern-based key stripping over a value tree, useful for cutting API
//! noise fields (etags, internal ids, redundant links) out of a payload
//! before it is encoded for an LLM context.
//!
//! # Pattern syntax
//!
//! - `"etag"` -- strip the top-level field named "etag"
//! - `"items.etag"` -- strip "etag" inside objects under "items"
//! - `"*.etag"` -- wildcard: strip "etag" at any depth
//! - `"attendees.*.status"` -- strip "status" inside each element of
//!   "attendees"

use std::collections::{HashMap, HashSet};

use crate::encoder;
use crate::error::EncodeError;
use crate::options::EncodeOptions;
use crate::value::{Map, ToonValue};

/// Strip fields matching the given patterns, returning a new tree.
///
/// # Examples
///
/// ```
/// use toon_codec::{filter_fields, toon};
///
/// let value = toon!({"name": "Alice", "etag": "abc", "kind": "user"});
/// let filtered = filter_fields(&value, &["etag", "kind"]);
/// assert_eq!(filtered, toon!({"name": "Alice"}));
/// ```
pub fn filter_fields(value: &ToonValue, patterns: &[&str]) -> ToonValue {
    if patterns.is_empty() {
        return value.clone();
    }
    let parsed: Vec<Vec<&str>> = patterns.iter().map(|p| p.split('.').collect()).collect();
    let active: Vec<&[&str]> = parsed.iter().map(Vec::as_slice).collect();
    apply_filter(value, &active)
}

/// Strip fields matching the patterns, then encode the result.
///
/// # Errors
///
/// Returns an error if the filtered tree cannot be encoded.
pub fn filter_and_encode(
    value: &ToonValue,
    patterns: &[&str],
    options: &EncodeOptions,
) -> Result<String, EncodeError> {
    let filtered = filter_fields(value, patterns);
    encoder::encode_with_options(&filtered, options)
}

/// What the active pattern set means at one object level, indexed up
/// front so each key is resolved by lookup rather than by rescanning
/// every pattern.
///
/// A pattern contributes here according to its head segment:
///
/// - `name` alone drops that key at this level.
/// - `name.rest` narrows to `rest` inside that key.
/// - `*` alone drops every key.
/// - `*.name` drops that key here AND is carried into every child, which
///   is what gives it any-depth reach.
/// - `*.name.rest` narrows to `rest` inside that key, and is carried.
/// - `*.*.rest` narrows to `rest` inside every key, and is carried.
///
/// Arrays are transparent: they re-apply the same pattern set to each
/// element, so `items.etag` works whether `items` holds one object or an
/// array of them.
#[derive(Default)]
struct LevelIndex<'a> {
    drop_all: bool,
    drop: HashSet<&'a str>,
    narrowed: HashMap<&'a str, Vec<&'a [&'a str]>>,
    narrowed_any: Vec<&'a [&'a str]>,
    carried: Vec<&'a [&'a str]>,
}

impl<'a> LevelIndex<'a> {
    fn build(active: &[&'a [&'a str]]) -> Self {
        let mut index = LevelIndex::default();
        for &pattern in active {
            match pattern {
                [] => {}
                ["*"] => index.drop_all = true,
                [name] => {
                    index.drop.insert(*name);
                }
                ["*", "*", tail @ ..] => {
                    index.narrowed_any.push(tail);
                    index.carried.push(pattern);
                }
                ["*", name] => {
                    index.drop.insert(*name);
                    index.carried.push(pattern);
                }
                ["*", name, tail @ ..] => {
                    index.narrowed.entry(*name).or_default().push(tail);
                    index.carried.push(pattern);
                }
                [name, tail @ ..] => {
                    index.narrowed.entry(*name).or_default().push(tail);
                }
            }
        }
        index
    }

    fn removes(&self, key: &str) -> bool {
        self.drop_all || self.drop.contains(key)
    }

    /// Pattern set a kept key's value is filtered with.
    fn for_child(&self, key: &str) -> Vec<&'a [&'a str]> {
        let mut next = self.carried.clone();
        next.extend(self.narrowed_any.iter().copied());
        if let Some(tails) = self.narrowed.get(key) {
            next.extend(tails.iter().copied());
        }
        next
    }
}

fn apply_filter(value: &ToonValue, active: &[&[&str]]) -> ToonValue {
    match value {
        ToonValue::Object(map) => filter_object(map, active),
        ToonValue::Array(arr) => ToonValue::Array(
            arr.iter().map(|elem| apply_filter(elem, active)).collect(),
        ),
        other => other.clone(),
    }
}

fn filter_object(map: &Map<String, ToonValue>, active: &[&[&str]]) -> ToonValue {
    let index = LevelIndex::build(active);
    let mut kept = Map::new();

    for (key, child) in map {
        if index.removes(key) {
            continue;
        }
        let next = index.for_child(key);
        let value = if next.is_empty() {
            child.clone()
        } else {
            apply_filter(child, &next)
        };
        kept.insert(key.clone(), value);
    }

    ToonValue::Object(kept)
}
