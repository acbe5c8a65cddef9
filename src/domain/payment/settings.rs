//! Merchant credentials and switches for the gateway.

use secrecy::{ExposeSecret, SecretString};

use super::errors::PaymentError;

/// Setting keys as they are stored in the settings collaborator.
pub mod keys {
    pub const MERCHANT_ID: &str = "merchantId";
    pub const POS_ID: &str = "posId";
    pub const SECRET_ID: &str = "secretId";
    pub const CRC_ID: &str = "crcId";
    pub const SANDBOX: &str = "sandbox";
    pub const DEBUG: &str = "debug";
}

/// Immutable merchant configuration, supplied at construction.
#[derive(Clone)]
pub struct MerchantSettings {
    merchant_id: String,
    pos_id: String,

    /// REST API key, used as the Basic auth password.
    secret_id: SecretString,

    /// Signing secret.
    crc_id: SecretString,

    sandbox: bool,
    debug: bool,
}

impl MerchantSettings {
    pub fn new(
        merchant_id: impl Into<String>,
        pos_id: impl Into<String>,
        secret_id: impl Into<String>,
        crc_id: impl Into<String>,
    ) -> Self {
        Self {
            merchant_id: merchant_id.into().trim().to_string(),
            pos_id: pos_id.into().trim().to_string(),
            secret_id: SecretString::new(secret_id.into()),
            crc_id: SecretString::new(crc_id.into()),
            sandbox: false,
            debug: false,
        }
    }

    pub fn with_sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Names of the client credentials that are empty.
    ///
    /// The signing secret is not part of this check.
    pub fn missing_credentials(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.pos_id.is_empty() {
            missing.push(keys::POS_ID);
        }
        if self.secret_id.expose_secret().is_empty() {
            missing.push(keys::SECRET_ID);
        }
        if self.merchant_id.is_empty() {
            missing.push(keys::MERCHANT_ID);
        }
        missing
    }

    /// Fails with a configuration error when any client credential is empty.
    pub fn ensure_credentials(&self) -> Result<(), PaymentError> {
        let missing = self.missing_credentials();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(PaymentError::MissingCredentials(missing))
        }
    }

    /// Merchant id as the integer the gateway expects.
    pub fn merchant_id(&self) -> Result<i64, PaymentError> {
        numeric(keys::MERCHANT_ID, &self.merchant_id)
    }

    /// POS id as the integer the gateway expects.
    pub fn pos_id(&self) -> Result<i64, PaymentError> {
        numeric(keys::POS_ID, &self.pos_id)
    }

    /// POS id as configured, used as the Basic auth username.
    pub fn pos_id_raw(&self) -> &str {
        &self.pos_id
    }

    pub fn secret_id(&self) -> &SecretString {
        &self.secret_id
    }

    pub fn crc(&self) -> &SecretString {
        &self.crc_id
    }

    pub fn is_sandbox(&self) -> bool {
        self.sandbox
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }
}

impl std::fmt::Debug for MerchantSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MerchantSettings")
            .field("merchant_id", &self.merchant_id)
            .field("pos_id", &self.pos_id)
            .field("secret_id", &"[REDACTED]")
            .field("crc_id", &"[REDACTED]")
            .field("sandbox", &self.sandbox)
            .field("debug", &self.debug)
            .finish()
    }
}

fn numeric(key: &'static str, value: &str) -> Result<i64, PaymentError> {
    value
        .parse()
        .map_err(|_| PaymentError::InvalidSetting {
            key,
            reason: "must be an integer".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> MerchantSettings {
        MerchantSettings::new("1000", "2000", "api-key", "crc-secret")
    }

    #[test]
    fn complete_settings_have_no_missing_credentials() {
        let settings = complete();
        assert!(settings.missing_credentials().is_empty());
        assert!(settings.ensure_credentials().is_ok());
    }

    #[test]
    fn reports_each_missing_credential() {
        let settings = MerchantSettings::new("", " ", "", "crc");
        assert_eq!(
            settings.missing_credentials(),
            vec![keys::POS_ID, keys::SECRET_ID, keys::MERCHANT_ID]
        );
        assert!(matches!(
            settings.ensure_credentials(),
            Err(PaymentError::MissingCredentials(_))
        ));
    }

    #[test]
    fn empty_crc_is_not_a_client_credential() {
        let settings = MerchantSettings::new("1000", "2000", "api-key", "");
        assert!(settings.missing_credentials().is_empty());
    }

    #[test]
    fn numeric_ids_parse() {
        let settings = complete();
        assert_eq!(settings.merchant_id().unwrap(), 1000);
        assert_eq!(settings.pos_id().unwrap(), 2000);
    }

    #[test]
    fn non_numeric_id_is_invalid_setting() {
        let settings = MerchantSettings::new("abc", "2000", "api-key", "crc");
        assert!(matches!(
            settings.merchant_id(),
            Err(PaymentError::InvalidSetting { key: keys::MERCHANT_ID, .. })
        ));
    }

    #[test]
    fn debug_output_redacts_secrets() {
        let rendered = format!("{:?}", complete());
        assert!(!rendered.contains("api-key"));
        assert!(!rendered.contains("crc-secret"));
        assert!(rendered.contains("REDACTED"));
    }
}
