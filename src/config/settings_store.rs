//! Exposes gateway configuration through the `SettingsStore` port.

use crate::domain::payment::setting_keys as keys;
use crate::ports::SettingsStore;

use super::przelewy24::Przelewy24Config;

/// `SettingsStore` over [`Przelewy24Config`], keyed by the protocol names.
#[derive(Debug, Clone)]
pub struct ConfigSettingsStore {
    config: Przelewy24Config,
}

impl ConfigSettingsStore {
    pub fn new(config: Przelewy24Config) -> Self {
        Self { config }
    }
}

impl SettingsStore for ConfigSettingsStore {
    fn get_setting(&self, key: &str) -> Option<String> {
        let flag = |on: bool| if on { "1" } else { "0" }.to_string();
        match key {
            keys::MERCHANT_ID => Some(self.config.merchant_id.clone()),
            keys::POS_ID => Some(self.config.pos_id.clone()),
            keys::SECRET_ID => Some(self.config.secret_id.clone()),
            keys::CRC_ID => Some(self.config.crc_id.clone()),
            keys::SANDBOX => Some(flag(self.config.sandbox)),
            keys::DEBUG => Some(flag(self.config.debug)),
            _ => None,
        }
    }
}
