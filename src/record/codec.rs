//! Record codec
//!
//! Encoding for the write side of the on-disk format.
//!
//! Escaping follows the CSV convention: a field is quoted when leaving it
//! bare would change how it reads back, and embedded quotes are doubled.

use std::io::{self, Write};

/// Separator between fields within a record
pub const FIELD_SEPARATOR: char = ',';

/// Quote character for escaped fields
pub const QUOTE: char = '"';

/// First character of a non-record comment line
pub const COMMENT_MARKER: char = '#';

/// Record terminator
const TERMINATOR: u8 = b'\n';

/// Whether a field must be quoted to survive a round-trip
///
/// - separator, quote, CR or LF anywhere in the field
/// - leading space or tab (the reader trims leading whitespace)
/// - a leading comment marker (the line would otherwise read as a comment
///   when the field is first in its record)
fn needs_quoting(field: &str) -> bool {
    if field.contains(&[FIELD_SEPARATOR, QUOTE, '\r', '\n'][..]) {
        return true;
    }
    matches!(field.chars().next(), Some(' ') | Some('\t') | Some(COMMENT_MARKER))
}

/// Encode one record as a terminated line
pub fn encode_record<S: AsRef<str>>(fields: &[S]) -> String {
    let mut line = String::new();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            line.push(FIELD_SEPARATOR);
        }
        let field = field.as_ref();
        if needs_quoting(field) {
            line.push(QUOTE);
            for c in field.chars() {
                if c == QUOTE {
                    line.push(QUOTE);
                }
                line.push(c);
            }
            line.push(QUOTE);
        } else {
            line.push_str(field);
        }
    }
    line.push(TERMINATOR as char);
    line
}

/// Encode one record and write it to a stream
///
/// The caller decides when to flush; the append path flushes after every
/// record.
pub fn write_record<W: Write, S: AsRef<str>>(writer: &mut W, fields: &[S]) -> io::Result<()> {
    writer.write_all(encode_record(fields).as_bytes())
}
