//! Record Module
//!
//! Defines the on-disk format: one record per line, CSV-style.
//!
//! ## Record Format
//! ```text
//! id,issuer,scope,action,timestamp,data_0,data_1,...
//! ```
//!
//! - Fields are separated by `,` and records are terminated by `\n`.
//! - A field containing the separator, a quote, CR/LF, leading whitespace,
//!   or starting with the comment marker is wrapped in `"`; embedded quotes
//!   are doubled. A quoted field may span physical lines.
//! - The timestamp is RFC3339 at second precision (`2024-05-01T12:30:00Z`).
//! - Lines whose first character is `#` are comments; they and blank lines
//!   are skipped on read. The engine never writes either.
//! - Records carry at least the five positional fields; anything beyond the
//!   timestamp is free-form data.

mod codec;
mod reader;

pub use codec::{encode_record, write_record, COMMENT_MARKER, FIELD_SEPARATOR, QUOTE};
pub use reader::{decode_event, RawRecord, RecordReader};
