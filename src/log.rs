//! EventLog Module
//!
//! The storage engine: one append-only log file behind one exclusion lock.
//!
//! ## Responsibilities
//! - Append events as flushed, CSV-style records
//! - Point lookup by id (first match, full forward scan)
//! - Full replay through a visitor
//! - Raw byte dump for cheap snapshots
//! - Lifecycle: open / close

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Seek, SeekFrom, Write};
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use crate::config::LogConfig;
use crate::error::{LogError, Result};
use crate::event::Event;
use crate::record::{decode_event, write_record, RecordReader};

/// The append-only event log
///
/// ## Concurrency Model: Single Exclusion Lock
///
/// All operations (append/find/dump/revive/close) serialize on one mutex.
/// The file handle and the buffered writer share a single cursor, so
/// seek-then-read and seek-then-write cannot be allowed to interleave; the
/// coarse lock trades read concurrency for correctness around that cursor.
///
/// Invariant: the cursor sits at end-of-file at every lock release, so an
/// admitted append is always a true append. Operations that seek to the
/// start for their own use (dump, replay) restore the cursor before
/// returning, on every exit path.
pub struct EventLog {
    /// Path the log was opened from
    path: PathBuf,

    /// Tuning knobs captured at open time
    config: LogConfig,

    /// Serializes every operation; `None` inside means the log is closed
    inner: Mutex<Inner>,
}

struct Inner {
    state: Option<OpenState>,
}

struct OpenState {
    /// The underlying handle; reads and cursor restoration go through this
    file: File,

    /// Buffered writer over a clone of the same handle (shared cursor)
    writer: BufWriter<File>,
}

impl EventLog {
    /// Open or create the log file at `path` with default configuration
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(path, LogConfig::default())
    }

    /// Open or create the log file at `path`
    ///
    /// Existing content is not parsed or validated here; corruption is only
    /// discovered on replay.
    pub fn open_with(path: impl AsRef<Path>, config: LogConfig) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(&path)
            .map_err(|e| LogError::io("open", e))?;

        // Position at end-of-file so the cursor invariant holds before the
        // first append.
        file.seek(SeekFrom::End(0))
            .map_err(|e| LogError::io("open", e))?;

        let writer = BufWriter::with_capacity(
            config.write_buffer_capacity,
            file.try_clone().map_err(|e| LogError::io("open", e))?,
        );

        debug!(path = %path.display(), "opened event log");

        Ok(Self {
            path,
            config,
            inner: Mutex::new(Inner {
                state: Some(OpenState { file, writer }),
            }),
        })
    }

    /// Append an event to the log
    ///
    /// The record is stamped with the current time; `event.time` is ignored.
    /// The write is flushed before the call returns. On failure the file is
    /// left as the file system left it; there is no rollback.
    pub fn append(&self, event: &Event) -> Result<()> {
        let stamp = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);

        let mut fields: Vec<&str> = Vec::with_capacity(5 + event.data.len());
        fields.push(&event.id);
        fields.push(&event.issuer);
        fields.push(&event.scope);
        fields.push(&event.action);
        fields.push(&stamp);
        fields.extend(event.data.iter().map(String::as_str));

        let mut inner = self.inner.lock();
        let state = inner.state.as_mut().ok_or(LogError::Closed)?;

        write_record(&mut state.writer, &fields).map_err(|e| LogError::io("append", e))?;
        state.writer.flush().map_err(|e| LogError::io("append", e))?;

        trace!(id = %event.id, action = %event.action, "appended event");
        Ok(())
    }

    /// Find the first event (in append order) with the given id
    ///
    /// Returns `Ok(None)` when no record matches or the log is empty; an
    /// unreadable log is an error. The returned event owns its data
    /// independently of the log.
    pub fn find(&self, id: &str) -> Result<Option<Event>> {
        let mut inner = self.inner.lock();
        let state = inner.state.as_mut().ok_or(LogError::Closed)?;

        let mut found = None;
        Self::scan(state, |event| {
            if event.id == id {
                found = Some(event);
                Ok(ControlFlow::Break(()))
            } else {
                Ok(ControlFlow::Continue(()))
            }
        })?;
        Ok(found)
    }

    /// Copy the raw log bytes, verbatim, to `dest`
    ///
    /// A byte-level export, not a structured one; comment lines and all are
    /// reproduced exactly. The log remains append-ready afterwards.
    pub fn dump<W: Write>(&self, dest: &mut W) -> Result<()> {
        let mut inner = self.inner.lock();
        let state = inner.state.as_mut().ok_or(LogError::Closed)?;

        (&state.file)
            .seek(SeekFrom::Start(0))
            .map_err(|e| LogError::io("dump", e))?;

        let copied = io::copy(&mut &state.file, dest)
            .map(|_| ())
            .map_err(|e| LogError::io("dump", e));

        let restored = (&state.file)
            .seek(SeekFrom::End(0))
            .map(|_| ())
            .map_err(|e| LogError::io("dump", e));

        copied.and(restored)
    }

    /// Replay the whole log, invoking `visit` for every decoded event
    ///
    /// Comment and blank lines are skipped. A corrupt record stops the scan
    /// with an error naming its 1-based line; events already delivered to
    /// the visitor stand. A visitor error aborts the scan and is surfaced
    /// wrapped. An empty or fully-scanned log is success.
    pub fn revive<F>(&self, mut visit: F) -> Result<()>
    where
        F: FnMut(Event) -> Result<()>,
    {
        let mut inner = self.inner.lock();
        let state = inner.state.as_mut().ok_or(LogError::Closed)?;

        Self::scan(state, |event| match visit(event) {
            Ok(()) => Ok(ControlFlow::Continue(())),
            Err(err) => Err(LogError::Visitor(Box::new(err))),
        })
    }

    /// Close the log
    ///
    /// Flushes buffered output and releases the file handle. Every
    /// subsequent operation, including a second close, fails with
    /// [`LogError::Closed`].
    pub fn close(&self) -> Result<()> {
        let mut inner = self.inner.lock();
        let mut state = inner.state.take().ok_or(LogError::Closed)?;

        state.writer.flush().map_err(|e| LogError::io("close", e))?;

        debug!(path = %self.path.display(), "closed event log");
        Ok(())
    }

    // =========================================================================
    // Internal scan primitive
    // =========================================================================

    /// Replay from the start of the file, restoring the cursor to
    /// end-of-file on every exit path
    ///
    /// Runs with the exclusion lock already held by the caller; never locks
    /// itself.
    fn scan<F>(state: &mut OpenState, mut visit: F) -> Result<()>
    where
        F: FnMut(Event) -> Result<ControlFlow<()>>,
    {
        (&state.file)
            .seek(SeekFrom::Start(0))
            .map_err(|e| LogError::io("replay", e))?;

        let scanned = Self::scan_records(&state.file, &mut visit);

        let restored = (&state.file)
            .seek(SeekFrom::End(0))
            .map(|_| ())
            .map_err(|e| LogError::io("replay", e));

        scanned.and(restored)
    }

    fn scan_records<F>(file: &File, visit: &mut F) -> Result<()>
    where
        F: FnMut(Event) -> Result<ControlFlow<()>>,
    {
        let mut reader = RecordReader::new(BufReader::new(file));
        loop {
            let record = match reader.read_record()? {
                Some(record) => record,
                None => return Ok(()),
            };
            let event = match decode_event(record) {
                Ok(event) => event,
                Err(err) => {
                    warn!(error = %err, "corrupt record during replay");
                    return Err(err);
                }
            };
            if let ControlFlow::Break(()) = visit(event)? {
                return Ok(());
            }
        }
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Get the path the log was opened from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the configuration
    pub fn config(&self) -> &LogConfig {
        &self.config
    }
}

impl std::fmt::Debug for EventLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventLog")
            .field("path", &self.path)
            .field("closed", &self.inner.lock().state.is_none())
            .finish()
    }
}
