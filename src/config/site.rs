//! Shop site and localized strings configuration

use serde::Deserialize;

use crate::adapters::przelewy24::{PaymentLexicon, SiteLinks};

use super::error::ValidationError;

/// Shop URLs
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Absolute site URL the gateway calls back to
    #[serde(default = "default_site_url")]
    pub site_url: String,

    /// Base path or URL for buyer redirects
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Shop name used in transaction descriptions
    #[serde(default = "default_site_name")]
    pub site_name: String,
}

impl SiteConfig {
    pub fn links(&self) -> SiteLinks {
        SiteLinks::new(&self.site_url, &self.base_url, &self.site_name)
    }

    /// Validate site configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.site_url.starts_with("https://") || self.site_url.starts_with("http://")) {
            return Err(ValidationError::InvalidUrl {
                field: "SITE__SITE_URL",
                value: self.site_url.clone(),
            });
        }
        if self.base_url.is_empty() {
            return Err(ValidationError::MissingRequired("SITE__BASE_URL"));
        }
        Ok(())
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_url: default_site_url(),
            base_url: default_base_url(),
            site_name: default_site_name(),
        }
    }
}

fn default_site_url() -> String {
    "http://localhost:8080/".to_string()
}

fn default_base_url() -> String {
    "/".to_string()
}

fn default_site_name() -> String {
    "Shop".to_string()
}

/// Localized strings; unset entries fall back to English
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LexiconConfig {
    /// Description template with `[+order_id+]` and `[+site_name+]`
    pub payment_description: Option<String>,

    /// Checkout message shown when credentials are missing
    pub empty_client_credentials: Option<String>,
}

impl LexiconConfig {
    pub fn lexicon(&self) -> PaymentLexicon {
        let defaults = PaymentLexicon::default();
        PaymentLexicon {
            payment_description: self
                .payment_description
                .clone()
                .unwrap_or(defaults.payment_description),
            empty_client_credentials: self
                .empty_client_credentials
                .clone()
                .unwrap_or(defaults.empty_client_credentials),
        }
    }
}
