//! TOON decoder — recursive descent over a lines-and-columns grid.
//!
//! The document is split into trimmed lines with measured indentation,
//! then parsed top-down:
//!
//! - **Root dispatch**: primitive, root array, or object, decided from
//!   the first non-blank line.
//! - **Four header shapes** per content line, classified in order:
//!   `key[N]: values`, `key[N]{fields}:`, `key[N]:`, `key: value`.
//! - **Auto-detected child indentation**: array bodies and nested blocks
//!   adopt the indent of their first line rather than assuming a fixed
//!   offset.
//! - **Declared counts are enforced**: every array form must observe
//!   exactly the count announced in its bracket header.
//! - **Strict mode** adds indentation validation, blank-line rejection
//!   inside arrays, duplicate-key rejection, and path-expansion conflict
//!   errors.
//!
//! Every object is assembled through [`Decoder::finish_object`], which
//! carries each entry's was-quoted flag and originating line — the side
//! data path expansion needs to honor author intent and to report
//! conflicts with real line numbers.

use crate::error::{DecodeError, DecodeErrorKind};
use crate::lex;
use crate::options::{DecodeOptions, Delimiter, PathExpansion};
use crate::value::{Map, ToonValue};

/// Decode a TOON document with default options.
///
/// # Examples
///
/// ```
/// use toon_codec::{decode, toon};
///
/// let value = decode("name: Alice\nscores[3]: 95,87,92").unwrap();
/// assert_eq!(value, toon!({"name": "Alice", "scores": [95, 87, 92]}));
/// ```
///
/// # Errors
///
/// Fails with a [`DecodeError`] carrying a 1-based line number on
/// malformed input.
pub fn decode(text: &str) -> Result<ToonValue, DecodeError> {
    decode_with_options(text, &DecodeOptions::default())
}

/// Decode a TOON document with explicit options.
///
/// # Errors
///
/// Fails with a [`DecodeError`] on malformed input; strict mode enables
/// additional validation.
pub fn decode_with_options(text: &str, options: &DecodeOptions) -> Result<ToonValue, DecodeError> {
    let lines = scan_lines(text, options)?;
    let decoder = Decoder { lines, options };
    decoder.parse_document()
}

/// One physical line: trimmed content, measured indentation, 1-based number.
struct Line<'a> {
    text: &'a str,
    indent: usize,
    number: usize,
}

/// Parsed bracket header: declared count, active delimiter, and tabular
/// field names with their was-quoted flags.
struct ArrayHeader {
    count: usize,
    delimiter: Delimiter,
    fields: Option<Vec<(String, bool)>>,
}

/// One decoded object entry, carrying the side data used by duplicate
/// detection and path expansion.
struct Entry {
    key: String,
    quoted: bool,
    line: usize,
    value: ToonValue,
}

struct Decoder<'a> {
    lines: Vec<Line<'a>>,
    options: &'a DecodeOptions,
}

/// Split the input into lines, validating indentation up front in strict
/// mode: no tabs, and widths must be multiples of the configured indent.
fn scan_lines<'a>(text: &'a str, options: &DecodeOptions) -> Result<Vec<Line<'a>>, DecodeError> {
    let mut lines = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let number = idx + 1;
        let indent = raw
            .chars()
            .take_while(|&c| c == ' ' || c == '\t')
            .count();
        let trimmed = raw.trim();
        if options.strict && !trimmed.is_empty() {
            if raw[..indent].contains('\t') {
                return Err(DecodeError::new(
                    DecodeErrorKind::BadIndentation,
                    number,
                    "tab character in indentation",
                ));
            }
            if options.indent > 0 && indent % options.indent != 0 {
                return Err(DecodeError::new(
                    DecodeErrorKind::BadIndentation,
                    number,
                    format!(
                        "indent of {indent} is not a multiple of {}",
                        options.indent
                    ),
                ));
            }
        }
        lines.push(Line {
            text: trimmed,
            indent,
            number,
        });
    }
    Ok(lines)
}

impl<'a> Decoder<'a> {
    /// Index of the first non-blank line at or after `from`.
    fn next_nonblank(&self, from: usize) -> Option<usize> {
        (from..self.lines.len()).find(|&i| !self.lines[i].text.is_empty())
    }

    fn parse_document(&self) -> Result<ToonValue, DecodeError> {
        let Some(first) = self.next_nonblank(0) else {
            return Ok(ToonValue::Object(Map::new()));
        };
        let line = &self.lines[first];

        if line.text.starts_with('[') {
            let mut i = first;
            let value = self.parse_root_array(&mut i)?;
            if let Some(extra) = self.next_nonblank(i) {
                return Err(DecodeError::new(
                    DecodeErrorKind::ExtraRows,
                    self.lines[extra].number,
                    "unexpected content after root array",
                ));
            }
            return Ok(value);
        }

        let rest_start = self.next_nonblank(first + 1);
        if rest_start.is_none() && is_primitive_line(line.text) {
            return lex::parse_primitive(line.text, line.number);
        }

        if self.options.strict {
            if let Some(second) = rest_start {
                let all_bare = (first..self.lines.len())
                    .filter(|&i| !self.lines[i].text.is_empty())
                    .all(|i| {
                        let text = self.lines[i].text;
                        !text.starts_with('[') && !has_colon_outside_quotes(text)
                    });
                if all_bare {
                    return Err(DecodeError::new(
                        DecodeErrorKind::InvalidSyntax,
                        self.lines[second].number,
                        "multiple primitives at root",
                    ));
                }
            }
        }

        let mut i = first;
        let value = self.parse_object_block(&mut i, line.indent)?;
        if let Some(extra) = self.next_nonblank(i) {
            return Err(DecodeError::new(
                DecodeErrorKind::InvalidSyntax,
                self.lines[extra].number,
                "unexpected content after root object",
            ));
        }
        Ok(value)
    }

    fn parse_root_array(&self, i: &mut usize) -> Result<ToonValue, DecodeError> {
        let line = &self.lines[*i];
        let (header, tail) = self.parse_array_suffix(line.text, line.number)?;
        self.parse_array_body(&header, i, line.indent, tail, line.number)
    }

    /// Parse `[N<delim>]`, an optional `{fields}` list, and the `:` that
    /// closes every header. Returns the header plus the text after `:`.
    fn parse_array_suffix<'s>(
        &self,
        content: &'s str,
        line: usize,
    ) -> Result<(ArrayHeader, &'s str), DecodeError> {
        let header_err = |message: String| {
            DecodeError::new(DecodeErrorKind::InvalidArrayHeader, line, message)
        };

        let close = content
            .find(']')
            .ok_or_else(|| header_err("missing `]` in array header".to_string()))?;
        let inner = &content[1..close];
        let digits_end = inner
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(inner.len());
        let (digits, marker) = inner.split_at(digits_end);
        if digits.is_empty() {
            return Err(header_err("array header is missing a count".to_string()));
        }
        let count: usize = digits
            .parse()
            .map_err(|_| header_err(format!("invalid array count `{digits}`")))?;
        let delimiter = match marker {
            "" | "," => Delimiter::Comma,
            "\t" => Delimiter::Tab,
            "|" => Delimiter::Pipe,
            other => {
                return Err(header_err(format!("invalid delimiter indicator {other:?}")));
            }
        };

        let after = &content[close + 1..];
        if let Some(fields_part) = after.strip_prefix('{') {
            let brace_end = find_brace_end(fields_part)
                .ok_or_else(|| header_err("missing `}` after field list".to_string()))?;
            let fields_str = &fields_part[..brace_end];
            if fields_str.trim().is_empty() {
                return Err(header_err("empty field list".to_string()));
            }
            let mut fields = Vec::new();
            for lexeme in lex::split_by_delimiter(fields_str, delimiter) {
                if let Some(interior) = lexeme.strip_prefix('"') {
                    if interior.is_empty() || !interior.ends_with('"') {
                        return Err(DecodeError::new(
                            DecodeErrorKind::UnterminatedString,
                            line,
                            "unterminated quoted field name",
                        ));
                    }
                    fields.push((lex::unescape(&interior[..interior.len() - 1], line)?, true));
                } else {
                    fields.push((lexeme, false));
                }
            }
            let rest = &fields_part[brace_end + 1..];
            let tail = rest
                .strip_prefix(':')
                .ok_or_else(|| header_err("missing `:` after field list".to_string()))?;
            return Ok((
                ArrayHeader {
                    count,
                    delimiter,
                    fields: Some(fields),
                },
                tail,
            ));
        }

        let tail = after
            .strip_prefix(':')
            .ok_or_else(|| header_err("missing `:` after array header".to_string()))?;
        Ok((
            ArrayHeader {
                count,
                delimiter,
                fields: None,
            },
            tail,
        ))
    }

    /// Parse an array body given its header. `lines[*i]` is the header
    /// line on entry; `*i` points past the whole array on exit.
    /// `header_indent` is the nesting column the header (logically) sits
    /// at — body lines must be deeper.
    fn parse_array_body(
        &self,
        header: &ArrayHeader,
        i: &mut usize,
        header_indent: usize,
        tail: &str,
        header_line: usize,
    ) -> Result<ToonValue, DecodeError> {
        let tail = tail.trim();
        *i += 1;

        if let Some(fields) = &header.fields {
            if !tail.is_empty() {
                return Err(DecodeError::new(
                    DecodeErrorKind::InvalidArrayHeader,
                    header_line,
                    "tabular header cannot carry inline values",
                ));
            }
            return self.parse_tabular_rows(header, fields, i, header_indent, header_line);
        }

        if !tail.is_empty() {
            let lexemes = lex::split_by_delimiter(tail, header.delimiter);
            let mut values = Vec::with_capacity(lexemes.len());
            for lexeme in &lexemes {
                values.push(lex::parse_primitive(lexeme, header_line)?);
            }
            if values.len() != header.count {
                return Err(DecodeError::new(
                    DecodeErrorKind::CountMismatch,
                    header_line,
                    format!("expected {} values, got {}", header.count, values.len()),
                ));
            }
            return Ok(ToonValue::Array(values));
        }

        if header.count == 0 {
            if let Some(next) = self.next_nonblank(*i) {
                if self.lines[next].indent > header_indent {
                    return Err(DecodeError::new(
                        DecodeErrorKind::ExtraRows,
                        self.lines[next].number,
                        "content after empty array header",
                    ));
                }
            }
            return Ok(ToonValue::Array(Vec::new()));
        }

        // Multi-line body: the first deeper line establishes the item
        // indent and decides between list format and one-primitive-per-line.
        let first_idx = self
            .next_nonblank(*i)
            .filter(|&n| self.lines[n].indent > header_indent)
            .ok_or_else(|| {
                DecodeError::new(
                    DecodeErrorKind::CountMismatch,
                    header_line,
                    format!("expected {} items, got 0", header.count),
                )
            })?;
        let item_indent = self.lines[first_idx].indent;
        if is_list_item(self.lines[first_idx].text) {
            self.parse_list_items(header, i, item_indent, header_line)
        } else {
            self.parse_primitive_lines(header, i, item_indent, header_line)
        }
    }

    /// Read exactly `count` delimiter-separated rows, each becoming a
    /// record keyed by the header field list in order.
    fn parse_tabular_rows(
        &self,
        header: &ArrayHeader,
        fields: &[(String, bool)],
        i: &mut usize,
        header_indent: usize,
        header_line: usize,
    ) -> Result<ToonValue, DecodeError> {
        let mut rows = Vec::new();
        let mut row_indent: Option<usize> = None;

        while rows.len() < header.count {
            let Some(line) = self.lines.get(*i) else { break };
            if line.text.is_empty() {
                if self.options.strict && !rows.is_empty() {
                    return Err(DecodeError::new(
                        DecodeErrorKind::BlankLineInArray,
                        line.number,
                        "blank line between rows",
                    ));
                }
                *i += 1;
                continue;
            }
            if line.indent <= header_indent {
                break;
            }
            let expected = *row_indent.get_or_insert(line.indent);
            if line.indent != expected {
                break;
            }
            let cells = lex::split_by_delimiter(line.text, header.delimiter);
            if cells.len() != fields.len() {
                return Err(DecodeError::new(
                    DecodeErrorKind::CountMismatch,
                    line.number,
                    format!("expected {} fields, got {}", fields.len(), cells.len()),
                ));
            }
            let mut entries = Vec::with_capacity(fields.len());
            for ((name, quoted), cell) in fields.iter().zip(cells.iter()) {
                entries.push(Entry {
                    key: name.clone(),
                    quoted: *quoted,
                    line: line.number,
                    value: lex::parse_primitive(cell, line.number)?,
                });
            }
            rows.push(ToonValue::Object(self.finish_object(entries)?));
            *i += 1;
        }

        if rows.len() != header.count {
            return Err(DecodeError::new(
                DecodeErrorKind::CountMismatch,
                header_line,
                format!("expected {} rows, got {}", header.count, rows.len()),
            ));
        }
        if let Some(row_indent) = row_indent {
            if let Some(next) = self.next_nonblank(*i) {
                if self.lines[next].indent >= row_indent {
                    return Err(DecodeError::new(
                        DecodeErrorKind::ExtraRows,
                        self.lines[next].number,
                        "row past declared count",
                    ));
                }
            }
        }
        Ok(ToonValue::Array(rows))
    }

    /// Read exactly `count` bare lines, each one primitive. This form is
    /// only ever produced by hand-written documents; the encoder prefers
    /// the inline form for primitive arrays.
    fn parse_primitive_lines(
        &self,
        header: &ArrayHeader,
        i: &mut usize,
        item_indent: usize,
        header_line: usize,
    ) -> Result<ToonValue, DecodeError> {
        let mut items = Vec::new();
        while items.len() < header.count {
            let Some(line) = self.lines.get(*i) else { break };
            if line.text.is_empty() {
                if self.options.strict && !items.is_empty() {
                    return Err(DecodeError::new(
                        DecodeErrorKind::BlankLineInArray,
                        line.number,
                        "blank line between array elements",
                    ));
                }
                *i += 1;
                continue;
            }
            if line.indent != item_indent {
                break;
            }
            items.push(lex::parse_primitive(line.text, line.number)?);
            *i += 1;
        }

        if items.len() != header.count {
            return Err(DecodeError::new(
                DecodeErrorKind::CountMismatch,
                header_line,
                format!("expected {} items, got {}", header.count, items.len()),
            ));
        }
        if let Some(next) = self.next_nonblank(*i) {
            if self.lines[next].indent >= item_indent {
                return Err(DecodeError::new(
                    DecodeErrorKind::ExtraRows,
                    self.lines[next].number,
                    "element past declared count",
                ));
            }
        }
        Ok(ToonValue::Array(items))
    }

    /// Read exactly `count` hyphen-prefixed items.
    fn parse_list_items(
        &self,
        header: &ArrayHeader,
        i: &mut usize,
        item_indent: usize,
        header_line: usize,
    ) -> Result<ToonValue, DecodeError> {
        let mut items = Vec::new();
        while items.len() < header.count {
            let Some(line) = self.lines.get(*i) else { break };
            if line.text.is_empty() {
                if self.options.strict && !items.is_empty() {
                    return Err(DecodeError::new(
                        DecodeErrorKind::BlankLineInArray,
                        line.number,
                        "blank line between list items",
                    ));
                }
                *i += 1;
                continue;
            }
            if line.indent < item_indent {
                break;
            }
            if line.indent > item_indent {
                if self.options.strict {
                    return Err(DecodeError::new(
                        DecodeErrorKind::BadIndentation,
                        line.number,
                        "unexpected indentation",
                    ));
                }
                *i += 1;
                continue;
            }
            if !is_list_item(line.text) {
                break;
            }
            items.push(self.parse_list_item(i, item_indent)?);
        }

        if items.len() != header.count {
            return Err(DecodeError::new(
                DecodeErrorKind::CountMismatch,
                header_line,
                format!("expected {} items, got {}", header.count, items.len()),
            ));
        }
        if let Some(next) = self.next_nonblank(*i) {
            let line = &self.lines[next];
            if line.indent == item_indent && is_list_item(line.text) {
                return Err(DecodeError::new(
                    DecodeErrorKind::ExtraRows,
                    line.number,
                    "list item past declared count",
                ));
            }
        }
        Ok(ToonValue::Array(items))
    }

    /// Parse one `- ` item. The text after the marker is classified as an
    /// empty object, a nested keyless array, an object whose first field
    /// sits on the marker line, or a primitive.
    fn parse_list_item(&self, i: &mut usize, item_indent: usize) -> Result<ToonValue, DecodeError> {
        let line = &self.lines[*i];
        let content = if line.text == "-" { "" } else { &line.text[2..] };
        let content = content.trim_start();

        if content.is_empty() {
            *i += 1;
            return Ok(ToonValue::Object(Map::new()));
        }

        if content.starts_with('[') {
            let (header, tail) = self.parse_array_suffix(content, line.number)?;
            return self.parse_array_body(&header, i, item_indent, tail, line.number);
        }

        if has_colon_outside_quotes(content) {
            return self.parse_list_item_object(content, i, item_indent);
        }

        let value = lex::parse_primitive(content, line.number)?;
        *i += 1;
        Ok(value)
    }

    /// Parse an object item whose first field is on the `- ` line itself.
    /// Subsequent fields sit one indent level below the marker and go
    /// through the same field classifier.
    fn parse_list_item_object(
        &self,
        content: &str,
        i: &mut usize,
        item_indent: usize,
    ) -> Result<ToonValue, DecodeError> {
        let field_indent = item_indent + self.options.indent;
        let mut entries = vec![self.parse_field_content(content, i, field_indent)?];
        entries.extend(self.parse_object_entries(i, field_indent)?);
        Ok(ToonValue::Object(self.finish_object(entries)?))
    }

    /// Parse an object from lines at exactly `base_indent`, starting at
    /// `lines[*i]`.
    fn parse_object_block(
        &self,
        i: &mut usize,
        base_indent: usize,
    ) -> Result<ToonValue, DecodeError> {
        let entries = self.parse_object_entries(i, base_indent)?;
        Ok(ToonValue::Object(self.finish_object(entries)?))
    }

    fn parse_object_entries(
        &self,
        i: &mut usize,
        base_indent: usize,
    ) -> Result<Vec<Entry>, DecodeError> {
        let mut entries = Vec::new();
        while let Some(line) = self.lines.get(*i) {
            if line.text.is_empty() {
                // Consume the blank only if this block continues below it,
                // so blank lines that precede a sibling or a following list
                // item stay visible to the enclosing parser.
                match self.next_nonblank(*i) {
                    Some(n) if self.lines[n].indent >= base_indent => {
                        *i += 1;
                        continue;
                    }
                    _ => break,
                }
            }
            if line.indent < base_indent {
                break;
            }
            if line.indent > base_indent {
                if self.options.strict {
                    return Err(DecodeError::new(
                        DecodeErrorKind::BadIndentation,
                        line.number,
                        "unexpected indentation",
                    ));
                }
                *i += 1;
                continue;
            }
            let text = line.text;
            entries.push(self.parse_field_content(text, i, base_indent)?);
        }
        Ok(entries)
    }

    /// Parse one field from `content` (the text of `lines[*i]`, or the
    /// remainder of a `- ` line). Handles the four header shapes:
    /// inline array, tabular header, multi-line array header, and plain
    /// `key: value` / nested object.
    fn parse_field_content(
        &self,
        content: &str,
        i: &mut usize,
        base_indent: usize,
    ) -> Result<Entry, DecodeError> {
        let line_number = self.lines[*i].number;
        let (key, rest, quoted) = lex::parse_key(content, line_number)?;
        if key.is_empty() && !quoted {
            return Err(DecodeError::new(
                DecodeErrorKind::MissingColon,
                line_number,
                "expected a key",
            ));
        }
        let rest = rest.trim_start();

        if rest.starts_with('[') {
            let (header, tail) = self.parse_array_suffix(rest, line_number)?;
            let value = self.parse_array_body(&header, i, base_indent, tail, line_number)?;
            return Ok(Entry {
                key,
                quoted,
                line: line_number,
                value,
            });
        }

        let Some(tail) = rest.strip_prefix(':') else {
            return Err(DecodeError::new(
                DecodeErrorKind::MissingColon,
                line_number,
                format!("missing `:` after key `{key}`"),
            ));
        };
        let tail = tail.trim();

        if !tail.is_empty() {
            *i += 1;
            let value = lex::parse_primitive(tail, line_number)?;
            return Ok(Entry {
                key,
                quoted,
                line: line_number,
                value,
            });
        }

        // Bare `key:` introduces a nested object; with no deeper lines it
        // is an empty object.
        *i += 1;
        let value = match self.next_nonblank(*i) {
            Some(n) if self.lines[n].indent > base_indent => {
                let child_indent = self.lines[n].indent;
                *i = n;
                self.parse_object_block(i, child_indent)?
            }
            _ => ToonValue::Object(Map::new()),
        };
        Ok(Entry {
            key,
            quoted,
            line: line_number,
            value,
        })
    }

    /// Assemble an object from parsed entries: duplicate handling (strict
    /// rejects, non-strict keeps the last value at the first position)
    /// and, when enabled, dotted-key path expansion.
    fn finish_object(&self, entries: Vec<Entry>) -> Result<Map<String, ToonValue>, DecodeError> {
        let expand = self.options.expand_paths == PathExpansion::Safe;
        let mut map = Map::new();
        for entry in entries {
            if expand && !entry.quoted && entry.key.contains('.') {
                let parts: Vec<&str> = entry.key.split('.').collect();
                if parts.iter().all(|p| lex::is_identifier(p)) {
                    self.merge_path(&mut map, &parts, entry.value, entry.line)?;
                    continue;
                }
            }
            if self.options.strict && map.contains_key(&entry.key) {
                return Err(DecodeError::new(
                    DecodeErrorKind::DuplicateKey,
                    entry.line,
                    format!("duplicate key `{}`", entry.key),
                ));
            }
            map.insert(entry.key, entry.value);
        }
        Ok(map)
    }

    /// Insert `value` at the dotted path `parts`, creating intermediate
    /// objects. Two object leaves shallow-merge (new keys win); any other
    /// collision errors in strict mode and is last-writer-wins otherwise.
    fn merge_path(
        &self,
        map: &mut Map<String, ToonValue>,
        parts: &[&str],
        value: ToonValue,
        line: usize,
    ) -> Result<(), DecodeError> {
        let Some((&first, rest)) = parts.split_first() else {
            return Ok(());
        };
        let conflict = || {
            DecodeError::new(
                DecodeErrorKind::PathExpansionConflict,
                line,
                format!("path expansion conflict at `{first}`"),
            )
        };

        if rest.is_empty() {
            if let Some(existing) = map.get_mut(first) {
                match (existing, value) {
                    (ToonValue::Object(existing_map), ToonValue::Object(new_map)) => {
                        for (k, v) in new_map {
                            existing_map.insert(k, v);
                        }
                    }
                    (slot, value) => {
                        if self.options.strict {
                            return Err(conflict());
                        }
                        *slot = value;
                    }
                }
            } else {
                map.insert(first.to_string(), value);
            }
            return Ok(());
        }

        if let Some(existing) = map.get_mut(first) {
            if let ToonValue::Object(nested) = existing {
                return self.merge_path(nested, rest, value, line);
            }
            if self.options.strict {
                return Err(conflict());
            }
            let mut nested = Map::new();
            self.merge_path(&mut nested, rest, value, line)?;
            *existing = ToonValue::Object(nested);
        } else {
            let mut nested = Map::new();
            self.merge_path(&mut nested, rest, value, line)?;
            map.insert(first.to_string(), ToonValue::Object(nested));
        }
        Ok(())
    }
}

fn is_list_item(text: &str) -> bool {
    text == "-" || text.starts_with("- ")
}

/// A lone line is a root primitive when it carries no structural colon,
/// or when it is one complete quoted string.
fn is_primitive_line(text: &str) -> bool {
    if let Some(interior) = text.strip_prefix('"') {
        if let Some(end) = lex::find_closing_quote(interior, 0) {
            return end == interior.len() - 1;
        }
    }
    !has_colon_outside_quotes(text)
}

fn has_colon_outside_quotes(text: &str) -> bool {
    let mut in_quotes = false;
    let mut escaped = false;
    for ch in text.chars() {
        if escaped {
            escaped = false;
        } else if ch == '\\' && in_quotes {
            escaped = true;
        } else if ch == '"' {
            in_quotes = !in_quotes;
        } else if ch == ':' && !in_quotes {
            return true;
        }
    }
    false
}

/// Byte position of the `}` closing a field list, skipping quoted
/// sections and escapes.
fn find_brace_end(s: &str) -> Option<usize> {
    let mut in_quotes = false;
    let mut escaped = false;
    for (pos, ch) in s.char_indices() {
        if escaped {
            escaped = false;
        } else if ch == '\\' && in_quotes {
            escaped = true;
        } else if ch == '"' {
            in_quotes = !in_quotes;
        } else if ch == '}' && !in_quotes {
            return Some(pos);
        }
    }
    None
}
