//! Record reader
//!
//! Streaming decoder for the read side of the on-disk format.
//!
//! The reader is deliberately permissive: comment and blank lines are
//! skipped, leading whitespace in a field is trimmed, stray quotes are taken
//! literally, and records may carry any number of data fields beyond the
//! positional five. The only inputs rejected as corrupt are records with
//! fewer than five fields and records whose timestamp fails to parse.

use std::io::BufRead;
use std::mem;

use chrono::{DateTime, Utc};

use crate::error::{LogError, Result};
use crate::event::Event;

use super::codec::{COMMENT_MARKER, FIELD_SEPARATOR, QUOTE};

/// Positional fields every record must carry: id, issuer, scope, action, time
const MIN_FIELDS: usize = 5;

/// A decoded but not yet validated record
#[derive(Debug)]
pub struct RawRecord {
    /// 1-based physical line on which the record starts
    pub line: u64,

    /// Raw field values, unquoted and unescaped
    pub fields: Vec<String>,
}

/// Streaming reader over the records of a log
pub struct RecordReader<R> {
    input: R,
    line: u64,
    buf: String,
}

impl<R: BufRead> RecordReader<R> {
    pub fn new(input: R) -> Self {
        Self {
            input,
            line: 0,
            buf: String::new(),
        }
    }

    /// Read the next record, skipping comment and blank lines
    ///
    /// Returns `Ok(None)` at end of input.
    pub fn read_record(&mut self) -> Result<Option<RawRecord>> {
        loop {
            if !self.next_line()? {
                return Ok(None);
            }
            let text = strip_terminator(&self.buf);
            if text.is_empty() || text.starts_with(COMMENT_MARKER) {
                continue;
            }
            let start = self.line;
            let fields = self.parse_fields()?;
            return Ok(Some(RawRecord {
                line: start,
                fields,
            }));
        }
    }

    /// Pull one physical line into the buffer; false at end of input
    fn next_line(&mut self) -> Result<bool> {
        self.buf.clear();
        let n = self
            .input
            .read_line(&mut self.buf)
            .map_err(|e| LogError::io("replay", e))?;
        if n == 0 {
            return Ok(false);
        }
        self.line += 1;
        Ok(true)
    }

    /// Split the buffered line, plus any quoted continuation lines, into fields
    fn parse_fields(&mut self) -> Result<Vec<String>> {
        let mut fields = Vec::new();
        let mut field = String::new();
        let mut in_quotes = false;
        let mut at_field_start = true;

        loop {
            let text = strip_terminator(&self.buf).to_owned();
            let mut chars = text.chars().peekable();

            while let Some(c) = chars.next() {
                if in_quotes {
                    if c == QUOTE {
                        if chars.peek() == Some(&QUOTE) {
                            chars.next();
                            field.push(QUOTE);
                        } else {
                            in_quotes = false;
                        }
                    } else {
                        field.push(c);
                    }
                } else if c == FIELD_SEPARATOR {
                    fields.push(mem::take(&mut field));
                    at_field_start = true;
                } else if at_field_start && (c == ' ' || c == '\t') {
                    // leading whitespace is trimmed in every field
                } else if at_field_start && c == QUOTE {
                    in_quotes = true;
                    at_field_start = false;
                } else {
                    field.push(c);
                    at_field_start = false;
                }
            }

            if !in_quotes {
                break;
            }

            // A quoted field continues on the next physical line.
            field.push('\n');
            if !self.next_line()? {
                // Unterminated quote at end of input closes the field.
                break;
            }
        }

        fields.push(field);
        Ok(fields)
    }
}

/// Assemble an [`Event`] from a raw record
///
/// Validates the positional layout: at least five fields, with an RFC3339
/// timestamp in the fifth. Everything after the timestamp becomes data.
pub fn decode_event(record: RawRecord) -> Result<Event> {
    let RawRecord { line, mut fields } = record;

    if fields.len() < MIN_FIELDS {
        return Err(LogError::Corrupt { line, fields });
    }
    let data = fields.split_off(MIN_FIELDS);

    let [id, issuer, scope, action, stamp] = <[String; MIN_FIELDS]>::try_from(fields)
        .map_err(|fields| LogError::Corrupt { line, fields })?;

    let time = DateTime::parse_from_rfc3339(&stamp)
        .map_err(|source| LogError::Timestamp { line, source })?
        .with_timezone(&Utc);

    Ok(Event {
        id,
        issuer,
        scope,
        action,
        time,
        data,
    })
}

/// Strip the record terminator, tolerating CRLF endings
fn strip_terminator(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}
