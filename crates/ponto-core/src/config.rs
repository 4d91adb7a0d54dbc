//! Per-tenant upstream connection profile.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// The upstream connection profile a tenant's terminals use.
///
/// Owned by a company, mutated only by tenant administrators, and read on
/// every transaction attempt. `aid_pass` is the terminal password for the
/// provider's token endpoint, not an operator credential; it must never
/// appear in logs or API responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// Provider base URL, e.g. `"https://api.provider.example"`.
    pub host: String,

    /// Provider-facing terminal identifier, e.g. `"bemL001"`.
    pub terminal_id: String,

    /// Acquirer identifier, e.g. `"L2Flow"`.
    pub acquirer_id: String,

    /// Terminal password for the token endpoint. Secret.
    pub aid_pass: String,

    /// Path of the action endpoint, appended to `host`.
    pub transaction_endpoint: String,

    /// Path of the token endpoint, appended to `host`.
    pub token_endpoint: String,

    /// When set, sales ignore operator-entered amounts and charge the fixed
    /// default amount instead.
    pub use_fixed_amount: bool,
}

impl Configuration {
    /// Validate the profile: every string field non-empty, `host` a valid URL.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidConfiguration` naming the offending field.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("host", &self.host),
            ("terminal_id", &self.terminal_id),
            ("acquirer_id", &self.acquirer_id),
            ("aid_pass", &self.aid_pass),
            ("transaction_endpoint", &self.transaction_endpoint),
            ("token_endpoint", &self.token_endpoint),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(CoreError::InvalidConfiguration(format!(
                    "{name} must not be empty"
                )));
            }
        }

        url::Url::parse(&self.host)
            .map_err(|e| CoreError::InvalidConfiguration(format!("host is not a valid URL: {e}")))?;

        Ok(())
    }

    /// A copy safe for logging: the terminal password is masked.
    #[must_use]
    pub fn redacted(&self) -> Self {
        Self {
            aid_pass: "***REDACTED***".to_string(),
            ..self.clone()
        }
    }
}

/// A stored tenant profile with bookkeeping timestamps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredConfiguration {
    /// The connection profile.
    pub config: Configuration,

    /// When the profile was first saved.
    pub created_at: DateTime<Utc>,

    /// When the profile was last changed.
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> Configuration {
        Configuration {
            host: "https://api.provider.example".into(),
            terminal_id: "bemL001".into(),
            acquirer_id: "L2Flow".into(),
            aid_pass: "secret".into(),
            transaction_endpoint: "/api/transaction".into(),
            token_endpoint: "/api/token".into(),
            use_fixed_amount: false,
        }
    }

    #[test]
    fn valid_profile_passes() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn empty_field_rejected() {
        let mut cfg = valid_config();
        cfg.acquirer_id = String::new();
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("acquirer_id"));
    }

    #[test]
    fn bad_host_rejected() {
        let mut cfg = valid_config();
        cfg.host = "not a url".into();
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn redacted_masks_password_only() {
        let cfg = valid_config();
        let redacted = cfg.redacted();
        assert_eq!(redacted.aid_pass, "***REDACTED***");
        assert_eq!(redacted.host, cfg.host);
        assert_eq!(redacted.terminal_id, cfg.terminal_id);
    }
}
