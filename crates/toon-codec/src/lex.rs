//! Shared lexical rules.
//!
//! One theory of which characters are safe where, applied symmetrically:
//! the encoder quotes exactly the strings the decoder would otherwise
//! misread, and the decoder accepts bare exactly what the encoder would
//! leave bare. Three contexts exist: free values (`key: value` and bare
//! root primitives), array elements (inline values, tabular cells, list
//! items — where the active delimiter and `:` are also structural), and
//! object keys.

use crate::error::{DecodeError, DecodeErrorKind};
use crate::options::Delimiter;
use crate::value::ToonValue;

/// Whether `s`, appearing as a free value, must be surrounded by quotes.
pub(crate) fn needs_quoting(s: &str, delimiter: Delimiter) -> bool {
    if s.is_empty() {
        return true;
    }
    if s == "true" || s == "false" || s == "null" {
        return true;
    }
    // Lexemes the primitive parser would read back as numbers, plus
    // leading-zero forms it deliberately keeps as strings.
    if is_number_lexeme(s) || has_leading_zero(s) {
        return true;
    }
    // Array/tabular header sentinels.
    if s.contains('[') || s.contains('{') {
        return true;
    }
    // List-item marker.
    if s == "-" {
        return true;
    }
    if let Some(rest) = s.strip_prefix('-') {
        if rest.starts_with(char::is_whitespace) {
            return true;
        }
    }
    if s.contains('\n') || s.contains('\r') || s.contains('\t') || s.contains('\\') || s.contains('"')
    {
        return true;
    }
    if s.trim() != s {
        return true;
    }
    // Everything left must sit inside the safe class. Comma joins the
    // class only when it is not the active delimiter.
    let comma_safe = delimiter != Delimiter::Comma;
    !s.chars().all(|c| {
        c.is_ascii_alphanumeric()
            || c == '_'
            || c.is_whitespace()
            || c as u32 >= 0x80
            || (comma_safe && c == ',')
    })
}

/// Whether `s`, appearing as an array element, must be quoted. Stricter
/// than [`needs_quoting`]: the active delimiter splits fields and a bare
/// `:` would turn a list item into an object field.
pub(crate) fn needs_quoting_in_array(s: &str, delimiter: Delimiter) -> bool {
    needs_quoting(s, delimiter) || s.contains(delimiter.as_char()) || s.contains(':')
}

/// Whether an object key must be quoted.
///
/// The decoder's bare-key scanner consumes word characters, `.`, and `-`;
/// anything else must be quoted to survive a roundtrip. `-` is quoted
/// anyway (list-marker and negative-number ambiguity), as are all-digit
/// keys.
pub(crate) fn key_needs_quoting(key: &str) -> bool {
    if key.is_empty() {
        return true;
    }
    if key.chars().all(|c| c.is_ascii_digit()) {
        return true;
    }
    if key.contains('-') {
        return true;
    }
    !key.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
}

/// A dot-path segment that folding may emit and expansion may consume:
/// `[A-Za-z_][A-Za-z0-9_]*`.
pub(crate) fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Appends `s` to `out` with the five escape sequences applied.
pub(crate) fn escape_into(s: &str, out: &mut String) {
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(ch),
        }
    }
}

/// Reverses [`escape_into`]. Any backslash not followed by one of the five
/// escape characters is rejected.
pub(crate) fn unescape(s: &str, line: usize) -> Result<String, DecodeError> {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            match chars.next() {
                Some('\\') => out.push('\\'),
                Some('"') => out.push('"'),
                Some('n') => out.push('\n'),
                Some('r') => out.push('\r'),
                Some('t') => out.push('\t'),
                Some(other) => {
                    return Err(DecodeError::new(
                        DecodeErrorKind::InvalidEscape,
                        line,
                        format!("invalid escape sequence `\\{other}`"),
                    ));
                }
                None => {
                    return Err(DecodeError::new(
                        DecodeErrorKind::InvalidEscape,
                        line,
                        "invalid escape sequence: lone `\\` at end of token",
                    ));
                }
            }
        } else {
            out.push(ch);
        }
    }
    Ok(out)
}

/// Splits `s` on `delimiter`, honoring quoted sections and escapes.
///
/// Fields come back trimmed; quote characters are retained so the
/// primitive parser can tell quoted lexemes from bare ones.
pub(crate) fn split_by_delimiter(s: &str, delimiter: Delimiter) -> Vec<String> {
    let delim = delimiter.as_char();
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut escaped = false;

    for ch in s.chars() {
        if escaped {
            current.push(ch);
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
            current.push(ch);
        } else if ch == '"' {
            in_quotes = !in_quotes;
            current.push(ch);
        } else if ch == delim && !in_quotes {
            fields.push(current.trim().to_string());
            current.clear();
        } else {
            current.push(ch);
        }
    }
    fields.push(current.trim().to_string());
    fields
}

/// Byte position of the closing quote matching an opening quote just
/// before `start`, skipping escaped characters.
pub(crate) fn find_closing_quote(s: &str, start: usize) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut i = start;
    while i < bytes.len() {
        if bytes[i] == b'\\' {
            i += 2;
        } else if bytes[i] == b'"' {
            return Some(i);
        } else {
            i += 1;
        }
    }
    None
}

/// Reads a key from the start of trimmed line content.
///
/// Returns the key, the unconsumed remainder, and whether the key was
/// quoted — quoted dotted keys are exempt from path expansion, so the
/// flag travels with every decoded object entry.
pub(crate) fn parse_key<'a>(
    content: &'a str,
    line: usize,
) -> Result<(String, &'a str, bool), DecodeError> {
    if let Some(interior) = content.strip_prefix('"') {
        let end = find_closing_quote(interior, 0).ok_or_else(|| {
            DecodeError::new(DecodeErrorKind::UnterminatedString, line, "unterminated quoted key")
        })?;
        let key = unescape(&interior[..end], line)?;
        Ok((key, &interior[end + 1..], true))
    } else {
        let end = content
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '.' || c == '-'))
            .unwrap_or(content.len());
        Ok((content[..end].to_string(), &content[end..], false))
    }
}

/// Whether `s` matches the anchored number shape
/// `-?digits(.digits)?([eE][+-]?digits)?`.
pub(crate) fn is_number_lexeme(s: &str) -> bool {
    let bytes = s.as_bytes();
    let mut i = 0;
    if i < bytes.len() && bytes[i] == b'-' {
        i += 1;
    }
    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i == int_start {
        return false;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == frac_start {
            return false;
        }
    }
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        i += 1;
        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
            i += 1;
        }
        let exp_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        if i == exp_start {
            return false;
        }
    }
    i == bytes.len()
}

/// `0` followed by another digit: a lexeme like `007` that is not a
/// legitimate number and stays a string.
pub(crate) fn has_leading_zero(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() >= 2 && bytes[0] == b'0' && bytes[1].is_ascii_digit()
}

/// Converts a lexeme to a primitive value.
///
/// Order matters: quoted string, then keyword, then number, then bare
/// string. Leading-zero lexemes fall through to the string case so that
/// `007` survives a roundtrip.
pub(crate) fn parse_primitive(lexeme: &str, line: usize) -> Result<ToonValue, DecodeError> {
    let s = lexeme.trim();

    if s.starts_with('"') {
        if s.len() < 2 || !s.ends_with('"') {
            return Err(DecodeError::new(
                DecodeErrorKind::UnterminatedString,
                line,
                "unterminated quoted string",
            ));
        }
        return Ok(ToonValue::String(unescape(&s[1..s.len() - 1], line)?));
    }

    match s {
        "true" => return Ok(ToonValue::Bool(true)),
        "false" => return Ok(ToonValue::Bool(false)),
        "null" => return Ok(ToonValue::Null),
        _ => {}
    }

    if is_number_lexeme(s) && !has_leading_zero(s) {
        if let Ok(f) = s.parse::<f64>() {
            // Overflowing literals fall back to the raw lexeme.
            if f.is_finite() {
                let f = if f == 0.0 { 0.0 } else { f };
                return Ok(ToonValue::Number(f));
            }
        }
    }

    Ok(ToonValue::String(s.to_string()))
}

/// Canonical text for a finite double: `Display` formatting (shortest
/// roundtrip digits, never scientific notation) with `-0` folded to `0`.
pub(crate) fn format_number(f: f64) -> String {
    if f == 0.0 {
        "0".to_string()
    } else {
        f.to_string()
    }
}
