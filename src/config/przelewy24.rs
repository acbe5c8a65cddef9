//! Przelewy24 merchant configuration

use std::time::Duration;

use serde::Deserialize;

use crate::domain::payment::MerchantSettings;

use super::error::ValidationError;

/// Merchant credentials and switches for the gateway.
///
/// Empty credentials are allowed at startup; the checkout markup reports
/// them instead.
#[derive(Clone, Default, Deserialize)]
pub struct Przelewy24Config {
    #[serde(default)]
    pub merchant_id: String,

    #[serde(default)]
    pub pos_id: String,

    /// REST API key
    #[serde(default)]
    pub secret_id: String,

    /// Signing secret
    #[serde(default)]
    pub crc_id: String,

    /// Use the sandbox environment
    #[serde(default)]
    pub sandbox: bool,

    /// Write request traces and callback bodies to the event log
    #[serde(default)]
    pub debug: bool,

    /// Timeout for a single gateway call in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Gateway root override (for testing against a local server)
    pub base_url: Option<String>,
}

impl Przelewy24Config {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Converts to domain settings. Secrets move into `SecretString`.
    pub fn merchant_settings(&self) -> MerchantSettings {
        MerchantSettings::new(
            self.merchant_id.clone(),
            self.pos_id.clone(),
            self.secret_id.clone(),
            self.crc_id.clone(),
        )
        .with_sandbox(self.sandbox)
        .with_debug(self.debug)
    }

    /// Validate gateway configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.request_timeout_secs == 0 || self.request_timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        if !is_numeric_or_empty(&self.merchant_id) {
            return Err(ValidationError::NotNumeric("PRZELEWY24__MERCHANT_ID"));
        }
        if !is_numeric_or_empty(&self.pos_id) {
            return Err(ValidationError::NotNumeric("PRZELEWY24__POS_ID"));
        }
        if let Some(url) = &self.base_url {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(ValidationError::InvalidUrl {
                    field: "PRZELEWY24__BASE_URL",
                    value: url.clone(),
                });
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for Przelewy24Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Przelewy24Config")
            .field("merchant_id", &self.merchant_id)
            .field("pos_id", &self.pos_id)
            .field("secret_id", &"[REDACTED]")
            .field("crc_id", &"[REDACTED]")
            .field("sandbox", &self.sandbox)
            .field("debug", &self.debug)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("base_url", &self.base_url)
            .finish()
    }
}

fn is_numeric_or_empty(value: &str) -> bool {
    let value = value.trim();
    value.is_empty() || value.parse::<i64>().is_ok()
}

fn default_request_timeout() -> u64 {
    30
}
