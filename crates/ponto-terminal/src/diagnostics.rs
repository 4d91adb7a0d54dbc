//! Diagnostic log.
//!
//! A capped, persistent log of requests, responses, and errors for support
//! sessions. Entries are stored newest-first; exports reverse to
//! chronological order so a support reader follows the flow top to bottom.

use std::fmt::Write as _;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::TerminalError;
use crate::storage::StateStore;

const LOG_KEY: &str = "transaction_logs";
const MAX_ENTRIES: usize = 100;

/// The kind of event a diagnostic entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    /// An outgoing request.
    Request,
    /// A received response.
    Response,
    /// A failure.
    Error,
    /// Anything else worth keeping.
    Info,
}

/// One diagnostic log entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticEntry {
    /// Entry id.
    pub id: Uuid,
    /// When the entry was recorded.
    pub timestamp: DateTime<Utc>,
    /// The flow step, e.g. `"token"` or `"submit"`.
    pub step: String,
    /// The kind of event.
    pub kind: EntryKind,
    /// Request URL, when relevant.
    pub url: Option<String>,
    /// HTTP status code, when relevant.
    pub status_code: Option<u16>,
    /// Request or response body. Callers redact secrets before recording.
    pub payload: Option<serde_json::Value>,
    /// Failure detail, for error entries.
    pub error_message: Option<String>,
}

impl DiagnosticEntry {
    /// Create an entry for a flow step.
    #[must_use]
    pub fn new(step: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            step: step.into(),
            kind,
            url: None,
            status_code: None,
            payload: None,
            error_message: None,
        }
    }

    /// Attach the request URL.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Attach an HTTP status code.
    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.status_code = Some(status);
        self
    }

    /// Attach a request or response body.
    #[must_use]
    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = Some(payload);
        self
    }

    /// Attach a failure detail.
    #[must_use]
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }
}

/// Capped persistent diagnostic log.
pub struct DiagnosticLog {
    store: Arc<dyn StateStore>,
}

impl DiagnosticLog {
    /// Create a log over the given storage.
    #[must_use]
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    /// Record an entry, evicting the oldest past the 100-entry cap.
    ///
    /// # Errors
    ///
    /// Returns an error if the log cannot be persisted.
    pub fn record(&self, entry: DiagnosticEntry) -> Result<(), TerminalError> {
        let mut entries = self.entries()?;
        entries.insert(0, entry);
        entries.truncate(MAX_ENTRIES);
        self.store.save(LOG_KEY, &serde_json::to_string(&entries)?)
    }

    /// All entries, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the log cannot be loaded.
    pub fn entries(&self) -> Result<Vec<DiagnosticEntry>, TerminalError> {
        match self.store.load(LOG_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    /// Drop all entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the log cannot be persisted.
    pub fn clear(&self) -> Result<(), TerminalError> {
        self.store.remove(LOG_KEY)
    }

    /// Export as pretty-printed JSON, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the log cannot be loaded.
    pub fn export_json(&self) -> Result<String, TerminalError> {
        Ok(serde_json::to_string_pretty(&self.entries()?)?)
    }

    /// Export as flat text in chronological order.
    ///
    /// # Errors
    ///
    /// Returns an error if the log cannot be loaded.
    pub fn export_text(&self) -> Result<String, TerminalError> {
        let mut entries = self.entries()?;
        entries.reverse();

        let mut text = String::from("=== PONTO TERMINAL - DIAGNOSTIC LOG ===\n");
        for (index, entry) in entries.iter().enumerate() {
            let _ = write!(
                text,
                "\n--- Entry #{} ---\nTimestamp: {}\nStep: {}\nKind: {:?}\n",
                index + 1,
                entry.timestamp.to_rfc3339(),
                entry.step,
                entry.kind
            );
            if let Some(url) = &entry.url {
                let _ = writeln!(text, "URL: {url}");
            }
            if let Some(status) = entry.status_code {
                let _ = writeln!(text, "Status Code: {status}");
            }
            if let Some(payload) = &entry.payload {
                let _ = writeln!(text, "Payload:\n{payload:#}");
            }
            if let Some(error) = &entry.error_message {
                let _ = writeln!(text, "Error: {error}");
            }
        }
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStateStore;
    use serde_json::json;

    fn test_log() -> DiagnosticLog {
        DiagnosticLog::new(Arc::new(MemoryStateStore::new()))
    }

    #[test]
    fn records_newest_first() {
        let log = test_log();
        log.record(DiagnosticEntry::new("token", EntryKind::Request))
            .unwrap();
        log.record(DiagnosticEntry::new("submit", EntryKind::Request))
            .unwrap();

        let entries = log.entries().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].step, "submit");
        assert_eq!(entries[1].step, "token");
    }

    #[test]
    fn cap_evicts_oldest() {
        let log = test_log();
        for i in 0..105 {
            log.record(DiagnosticEntry::new(format!("step-{i}"), EntryKind::Info))
                .unwrap();
        }

        let entries = log.entries().unwrap();
        assert_eq!(entries.len(), 100);
        assert_eq!(entries[0].step, "step-104");
        // The five oldest entries are gone.
        assert_eq!(entries[99].step, "step-5");
    }

    #[test]
    fn text_export_is_chronological() {
        let log = test_log();
        log.record(
            DiagnosticEntry::new("token", EntryKind::Request).with_url("/api/token"),
        )
        .unwrap();
        log.record(
            DiagnosticEntry::new("submit", EntryKind::Error).with_error("timed out"),
        )
        .unwrap();

        let text = log.export_text().unwrap();
        let token_pos = text.find("Step: token").unwrap();
        let submit_pos = text.find("Step: submit").unwrap();
        assert!(token_pos < submit_pos);
        assert!(text.contains("Error: timed out"));
    }

    #[test]
    fn json_export_roundtrips() {
        let log = test_log();
        log.record(
            DiagnosticEntry::new("submit", EntryKind::Response)
                .with_status(200)
                .with_payload(json!({"resultCode": "00"})),
        )
        .unwrap();

        let exported = log.export_json().unwrap();
        let parsed: Vec<DiagnosticEntry> = serde_json::from_str(&exported).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].status_code, Some(200));
    }

    #[test]
    fn clear_empties_the_log() {
        let log = test_log();
        log.record(DiagnosticEntry::new("token", EntryKind::Request))
            .unwrap();
        log.clear().unwrap();
        assert!(log.entries().unwrap().is_empty());
    }
}
