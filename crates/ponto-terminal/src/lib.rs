//! Ponto Terminal SDK.
//!
//! This crate provides the terminal-side pieces of the ponto loyalty
//! platform: a client for the service API, an offline transaction queue
//! that replays captured sales in order when connectivity returns, and a
//! capped diagnostic log for support sessions.
//!
//! # Example
//!
//! ```no_run
//! use ponto_terminal::{CustomerRef, TerminalClient};
//!
//! # async fn example() -> Result<(), ponto_terminal::TerminalError> {
//! let client = TerminalClient::new("http://ponto:8080", "operator-jwt");
//!
//! let summary = client
//!     .sale(&CustomerRef::Phone("61999887766".into()), Some("15,50"), &[])
//!     .await?;
//!
//! println!("result: {} rrn: {}", summary.result_code, summary.rrn);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

mod client;
mod diagnostics;
mod error;
mod queue;
mod storage;

pub use client::{CustomerRef, HistoryRow, TerminalClient, TransactionSummary};
pub use diagnostics::{DiagnosticEntry, DiagnosticLog, EntryKind};
pub use error::TerminalError;
pub use queue::{Deliver, OfflineQueue, QueuedTransaction};
pub use storage::{FileStateStore, MemoryStateStore, StateStore};
