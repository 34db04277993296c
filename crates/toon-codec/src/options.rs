//! Configuration for encoding and decoding.

/// Separator used inside bracket headers, inline arrays, and tabular rows.
///
/// Comma is the default and produces the most compact output. Non-comma
/// delimiters are announced inside the bracket header (`[3\t]`, `[3|]`)
/// so the decoder can split rows without guessing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Pipe,
}

impl Delimiter {
    pub const fn as_char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
            Delimiter::Pipe => '|',
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Delimiter::Comma => ",",
            Delimiter::Tab => "\t",
            Delimiter::Pipe => "|",
        }
    }

    /// The indicator written after the count in a bracket header.
    /// Comma is the default delimiter and is left implicit.
    pub const fn header_marker(self) -> &'static str {
        match self {
            Delimiter::Comma => "",
            Delimiter::Tab => "\t",
            Delimiter::Pipe => "|",
        }
    }
}

/// Encode-time collapsing of single-key object chains into dotted keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyFolding {
    #[default]
    Off,
    /// Fold only chains whose every segment is identifier-safe, so the
    /// folded key never needs quoting.
    Safe,
}

/// Decode-time expansion of dotted unquoted keys into nested objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathExpansion {
    #[default]
    Off,
    /// Expand only keys whose every dot-separated segment is an identifier.
    Safe,
}

/// Options accepted by [`crate::encode_with_options`].
#[derive(Debug, Clone)]
pub struct EncodeOptions {
    /// Whitespace emitted per nesting level.
    pub indent: String,
    /// Active delimiter for array headers, inline values, and rows.
    pub delimiter: Delimiter,
    /// Dotted-key folding mode.
    pub key_folding: KeyFolding,
    /// Maximum number of segments in a folded key.
    pub flatten_depth: usize,
    /// Reject keys that cannot be written losslessly.
    pub strict: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions {
            indent: "  ".to_string(),
            delimiter: Delimiter::default(),
            key_folding: KeyFolding::default(),
            flatten_depth: usize::MAX,
            strict: false,
        }
    }
}

impl EncodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the indent to `width` spaces per nesting level.
    #[must_use]
    pub fn with_indent(mut self, width: usize) -> Self {
        self.indent = " ".repeat(width);
        self
    }

    /// Sets the literal whitespace string emitted per nesting level.
    #[must_use]
    pub fn with_indent_unit(mut self, unit: impl Into<String>) -> Self {
        self.indent = unit.into();
        self
    }

    #[must_use]
    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    #[must_use]
    pub fn with_key_folding(mut self, key_folding: KeyFolding) -> Self {
        self.key_folding = key_folding;
        self
    }

    #[must_use]
    pub fn with_flatten_depth(mut self, depth: usize) -> Self {
        self.flatten_depth = depth;
        self
    }

    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }
}

/// Options accepted by [`crate::decode_with_options`].
#[derive(Debug, Clone)]
pub struct DecodeOptions {
    /// Enables indentation validation, blank-line rejection inside arrays,
    /// duplicate-key rejection, and path-expansion conflict errors.
    pub strict: bool,
    /// Expected indent width, validated in strict mode and used to locate
    /// the fields of list-item objects.
    pub indent: usize,
    /// Dotted-key expansion mode.
    pub expand_paths: PathExpansion,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            strict: false,
            indent: 2,
            expand_paths: PathExpansion::default(),
        }
    }
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    #[must_use]
    pub fn with_expand_paths(mut self, expand_paths: PathExpansion) -> Self {
        self.expand_paths = expand_paths;
        self
    }
}
