//! TOON encoder — converts a value tree into Token-Oriented Object Notation.
//!
//! The encoder is a tree walk that selects the most compact textual form
//! for each node:
//!
//! - **Nested objects**: indentation instead of braces, `key:` headers
//! - **Inline arrays**: all-primitive arrays as `key[N]: v1,v2,v3`
//! - **Tabular arrays**: uniform object arrays as `key[N]{f1,f2}:` + rows
//! - **List arrays**: mixed/complex arrays as `key[N]:` + `- item` lines
//! - **Context-dependent quoting**: strings quoted only when the decoder
//!   would otherwise misread them, per the active delimiter
//! - **Key folding**: optional collapse of single-key object chains into
//!   dotted keys (`a.b.c: v`)
//!
//! Output is byte-exact deterministic for a fixed input and options:
//! object iteration is insertion order and nothing hashing-dependent
//! influences the result.

use crate::error::EncodeError;
use crate::lex;
use crate::options::{EncodeOptions, KeyFolding};
use crate::value::{Map, ToonValue};

/// Encode a value tree with default options.
///
/// # Examples
///
/// ```
/// use toon_codec::{encode, toon};
///
/// let value = toon!({"name": "Alice", "scores": [95, 87, 92]});
/// assert_eq!(encode(&value).unwrap(), "name: Alice\nscores[3]: 95,87,92");
/// ```
///
/// # Errors
///
/// Fails if the tree contains a non-finite number.
pub fn encode(value: &ToonValue) -> Result<String, EncodeError> {
    encode_with_options(value, &EncodeOptions::default())
}

/// Encode a value tree with explicit options.
///
/// # Errors
///
/// Fails if the tree contains a non-finite number or, in strict mode, an
/// object key holding raw control characters outside the escapable set.
pub fn encode_with_options(
    value: &ToonValue,
    options: &EncodeOptions,
) -> Result<String, EncodeError> {
    let mut encoder = Encoder {
        out: String::new(),
        options,
    };
    encoder.encode_root(value)?;
    Ok(encoder.out)
}

/// Context for quoting decisions. Array elements additionally treat the
/// active delimiter and `:` as structural.
#[derive(Clone, Copy, PartialEq)]
enum QuoteContext {
    Value,
    ArrayElement,
}

struct Encoder<'a> {
    out: String,
    options: &'a EncodeOptions,
}

impl Encoder<'_> {
    fn push_indent(&mut self, depth: usize) {
        for _ in 0..depth {
            self.out.push_str(&self.options.indent);
        }
    }

    fn encode_root(&mut self, value: &ToonValue) -> Result<(), EncodeError> {
        match value {
            ToonValue::Object(map) => self.encode_object_fields(map, 0),
            ToonValue::Array(arr) => self.encode_array_suffix(arr, 0),
            other => self.encode_primitive(other, QuoteContext::Value),
        }
    }

    /// Emit all fields of an object, one line each, at the given depth.
    fn encode_object_fields(
        &mut self,
        map: &Map<String, ToonValue>,
        depth: usize,
    ) -> Result<(), EncodeError> {
        for (i, (key, value)) in map.iter().enumerate() {
            if i > 0 {
                self.out.push('\n');
            }
            self.push_indent(depth);
            self.encode_field(key, value, depth)?;
        }
        Ok(())
    }

    /// Emit one `key: value` field (indentation already written). Applies
    /// key folding, then dispatches on the value shape.
    fn encode_field(
        &mut self,
        key: &str,
        value: &ToonValue,
        depth: usize,
    ) -> Result<(), EncodeError> {
        if let Some((folded, inner)) = self.fold_chain(key, value) {
            // Folded segments are identifier-safe by construction.
            self.out.push_str(&folded);
            return self.encode_field_value(inner, depth);
        }
        let rendered = self.render_key(key)?;
        self.out.push_str(&rendered);
        self.encode_field_value(value, depth)
    }

    /// Emit the `: value` / `[N]...` / nested-object tail of a field whose
    /// key is already written. `depth` is the nesting level of the field's
    /// own line; children go one level deeper.
    fn encode_field_value(&mut self, value: &ToonValue, depth: usize) -> Result<(), EncodeError> {
        match value {
            ToonValue::Object(map) if map.is_empty() => {
                self.out.push(':');
                Ok(())
            }
            ToonValue::Object(map) => {
                self.out.push_str(":\n");
                self.encode_object_fields(map, depth + 1)
            }
            ToonValue::Array(arr) => self.encode_array_suffix(arr, depth),
            primitive => {
                self.out.push_str(": ");
                self.encode_primitive(primitive, QuoteContext::Value)
            }
        }
    }

    /// Emit an array header and body after whatever label precedes it.
    ///
    /// Form selection, in order: empty, tabular, inline, list.
    fn encode_array_suffix(&mut self, arr: &[ToonValue], depth: usize) -> Result<(), EncodeError> {
        let marker = self.options.delimiter.header_marker();
        let len = arr.len();

        if arr.is_empty() {
            self.out.push_str(&format!("[0{marker}]:"));
            return Ok(());
        }

        if let Some(fields) = tabular_fields(arr) {
            self.out.push_str(&format!("[{len}{marker}]{{"));
            for (i, field) in fields.iter().enumerate() {
                if i > 0 {
                    self.out.push_str(self.options.delimiter.as_str());
                }
                let rendered = self.render_key(field)?;
                self.out.push_str(&rendered);
            }
            self.out.push_str("}:");
            return self.encode_tabular_rows(arr, &fields, depth);
        }

        if arr.iter().all(is_primitive) {
            self.out.push_str(&format!("[{len}{marker}]: "));
            return self.encode_delimited_values(arr);
        }

        self.out.push_str(&format!("[{len}{marker}]:"));
        self.encode_list_items(arr, depth)
    }

    /// Emit delimiter-separated primitives on the current line.
    fn encode_delimited_values(&mut self, values: &[ToonValue]) -> Result<(), EncodeError> {
        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                self.out.push_str(self.options.delimiter.as_str());
            }
            self.encode_primitive(value, QuoteContext::ArrayElement)?;
        }
        Ok(())
    }

    /// Emit one row per object, values in header-field order, keys not
    /// repeated.
    fn encode_tabular_rows(
        &mut self,
        arr: &[ToonValue],
        fields: &[&String],
        depth: usize,
    ) -> Result<(), EncodeError> {
        for item in arr {
            self.out.push('\n');
            self.push_indent(depth + 1);
            if let ToonValue::Object(map) = item {
                for (i, field) in fields.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(self.options.delimiter.as_str());
                    }
                    if let Some(value) = map.get(*field) {
                        self.encode_primitive(value, QuoteContext::ArrayElement)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Emit `- ` list items one indent level below the header line.
    /// Object items carry their first field on the hyphen line; the rest
    /// follow one level deeper.
    fn encode_list_items(&mut self, arr: &[ToonValue], depth: usize) -> Result<(), EncodeError> {
        for item in arr {
            self.out.push('\n');
            self.push_indent(depth + 1);
            match item {
                ToonValue::Object(map) if map.is_empty() => {
                    self.out.push('-');
                }
                ToonValue::Object(map) => {
                    self.out.push_str("- ");
                    for (i, (key, value)) in map.iter().enumerate() {
                        if i > 0 {
                            self.out.push('\n');
                            self.push_indent(depth + 2);
                        }
                        self.encode_field(key, value, depth + 2)?;
                    }
                }
                ToonValue::Array(inner) => {
                    self.out.push_str("- ");
                    self.encode_array_suffix(inner, depth + 1)?;
                }
                primitive => {
                    self.out.push_str("- ");
                    self.encode_primitive(primitive, QuoteContext::ArrayElement)?;
                }
            }
        }
        Ok(())
    }

    fn encode_primitive(
        &mut self,
        value: &ToonValue,
        ctx: QuoteContext,
    ) -> Result<(), EncodeError> {
        match value {
            ToonValue::Null => self.out.push_str("null"),
            ToonValue::Bool(b) => self.out.push_str(if *b { "true" } else { "false" }),
            ToonValue::Number(f) => {
                if !f.is_finite() {
                    return Err(EncodeError::new(format!("unrepresentable number {f}")));
                }
                self.out.push_str(&lex::format_number(*f));
            }
            ToonValue::String(s) => {
                let quote = match ctx {
                    QuoteContext::Value => lex::needs_quoting(s, self.options.delimiter),
                    QuoteContext::ArrayElement => {
                        lex::needs_quoting_in_array(s, self.options.delimiter)
                    }
                };
                if quote {
                    self.out.push('"');
                    lex::escape_into(s, &mut self.out);
                    self.out.push('"');
                } else {
                    self.out.push_str(s);
                }
            }
            ToonValue::Array(_) | ToonValue::Object(_) => {
                // Callers only reach here with primitives.
                return Err(EncodeError::new("expected a primitive value"));
            }
        }
        Ok(())
    }

    fn render_key(&self, key: &str) -> Result<String, EncodeError> {
        if self.options.strict {
            let unrepresentable = key
                .chars()
                .any(|c| c.is_control() && !matches!(c, '\n' | '\r' | '\t'));
            if unrepresentable {
                return Err(EncodeError::new(format!(
                    "key {key:?} contains characters that cannot be escaped"
                )));
            }
        }
        if lex::key_needs_quoting(key) {
            let mut out = String::with_capacity(key.len() + 2);
            out.push('"');
            lex::escape_into(key, &mut out);
            out.push('"');
            Ok(out)
        } else {
            Ok(key.to_string())
        }
    }

    /// Collapse a chain of single-key objects into a dotted key.
    ///
    /// Folding stops at the first non-object value, a branching object, a
    /// segment that is not identifier-safe, or the `flatten_depth` bound.
    fn fold_chain<'v>(
        &self,
        key: &str,
        value: &'v ToonValue,
    ) -> Option<(String, &'v ToonValue)> {
        if self.options.key_folding != KeyFolding::Safe || !lex::is_identifier(key) {
            return None;
        }
        let mut segments = vec![key];
        let mut current = value;
        loop {
            let ToonValue::Object(map) = current else { break };
            if map.len() != 1 || segments.len() >= self.options.flatten_depth {
                break;
            }
            let Some((next_key, next_value)) = map.iter().next() else {
                break;
            };
            if !lex::is_identifier(next_key) {
                break;
            }
            segments.push(next_key);
            current = next_value;
        }
        if segments.len() < 2 {
            None
        } else {
            Some((segments.join("."), current))
        }
    }
}

fn is_primitive(value: &ToonValue) -> bool {
    !matches!(value, ToonValue::Array(_) | ToonValue::Object(_))
}

/// Tabular form applies when every element is a non-empty object, all
/// share an identical ordered key set, and every leaf is a primitive.
fn tabular_fields(arr: &[ToonValue]) -> Option<Vec<&String>> {
    let first = arr.first()?.as_object()?;
    if first.is_empty() {
        return None;
    }
    let fields: Vec<&String> = first.keys().collect();
    for item in arr {
        let map = item.as_object()?;
        if map.len() != fields.len() {
            return None;
        }
        if map.keys().zip(fields.iter()).any(|(k, f)| k != *f) {
            return None;
        }
        if !map.values().all(is_primitive) {
            return None;
        }
    }
    Some(fields)
}
