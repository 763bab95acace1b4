//! Configuration for eventdb
//!
//! Centralized configuration with sensible defaults.

/// Tuning knobs for an [`EventLog`](crate::EventLog) instance
///
/// The on-disk format and durability behavior are fixed; configuration only
/// covers buffering. Every append is flushed to the file before the call
/// returns regardless of the buffer capacity.
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Capacity of the buffered writer on the append path (in bytes)
    pub write_buffer_capacity: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            write_buffer_capacity: 8 * 1024, // 8 KiB
        }
    }
}
