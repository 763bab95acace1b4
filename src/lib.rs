//! # eventdb
//!
//! An embedded, append-only audit event log with:
//! - Durable, flushed appends in a line-oriented text format
//! - Point lookup by event id
//! - Full replay through a caller-supplied visitor
//! - Verbatim byte dump for cheap snapshots
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       Caller                                 │
//! │        (append / find / revive / dump / close)               │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                     EventLog                                 │
//! │              (Single Exclusion Lock)                         │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │   Record    │          │   Record    │
//!   │   Codec     │          │   Reader    │
//!   │  (Encode)   │          │  (Decode)   │
//!   └──────┬──────┘          └──────┬──────┘
//!          │                         │
//!          └────────────┬────────────┘
//!                       ▼
//!               ┌─────────────┐
//!               │  Log File   │
//!               │ (Appended)  │
//!               └─────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod event;
pub mod record;
pub mod log;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{LogError, Result};
pub use config::LogConfig;
pub use event::Event;
pub use log::EventLog;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of eventdb
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
