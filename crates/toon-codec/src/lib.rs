//! # toon-codec
//!
//! Pure-Rust encoder and decoder for **TOON (Token-Oriented Object Notation)**.
//!
//! TOON is a compact, indentation-sensitive, human-readable serialization
//! format that represents the JSON data model with substantially fewer
//! tokens when consumed by language models. Its signature feature is the
//! **tabular array**: a uniform array of records factors its shared field
//! schema out onto one header line, followed by delimiter-separated rows.
//!
//! ## Quick start
//!
//! ```rust
//! use toon_codec::{decode, encode, toon};
//!
//! let value = toon!({
//!     "name": "Alice",
//!     "scores": [95, 87, 92]
//! });
//!
//! let text = encode(&value).unwrap();
//! assert_eq!(text, "name: Alice\nscores[3]: 95,87,92");
//!
//! let back = decode(&text).unwrap();
//! assert_eq!(back, value);
//! ```
//!
//! Uniform object arrays come out tabular:
//!
//! ```rust
//! use toon_codec::{encode, toon};
//!
//! let value = toon!({
//!     "users": [
//!         {"id": 1, "name": "Alice", "role": "admin"},
//!         {"id": 2, "name": "Bob", "role": "user"}
//!     ]
//! });
//! assert_eq!(
//!     encode(&value).unwrap(),
//!     "users[2]{id,name,role}:\n  1,Alice,admin\n  2,Bob,user"
//! );
//! ```
//!
//! ## Modules
//!
//! - [`encoder`] — value tree → TOON text (form selection, key folding)
//! - [`decoder`] — TOON text → value tree (strict validation, path expansion)
//! - [`value`] — the [`ToonValue`] tree and JSON conversions
//! - [`options`] — encode/decode options and the delimiter choices
//! - [`filter`] — pattern-based field stripping before encoding
//! - [`error`] — typed encode/decode failures
//!
//! The codec is a pure computation: no I/O, no global state, no caches.
//! Both directions are reentrant and may run concurrently on distinct
//! inputs without synchronization.

pub mod decoder;
pub mod encoder;
pub mod error;
pub mod filter;
mod lex;
pub mod options;
pub mod value;

pub use decoder::{decode, decode_with_options};
pub use encoder::{encode, encode_with_options};
pub use error::{DecodeError, DecodeErrorKind, EncodeError};
pub use filter::{filter_and_encode, filter_fields};
pub use options::{DecodeOptions, Delimiter, EncodeOptions, KeyFolding, PathExpansion};
pub use value::{Map, ToonValue};
