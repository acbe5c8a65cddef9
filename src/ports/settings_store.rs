//! Settings store port - key/value access to merchant configuration.

use crate::domain::payment::{setting_keys, MerchantSettings};

/// Port for reading merchant settings by protocol key name.
pub trait SettingsStore: Send + Sync {
    /// Returns the raw value of a setting, or `None` if it is not set.
    fn get_setting(&self, key: &str) -> Option<String>;

    /// Reads a boolean switch. `1`, `true`, `yes` and `on` count as enabled.
    fn get_flag(&self, key: &str) -> bool {
        self.get_setting(key)
            .map(|v| {
                matches!(
                    v.trim().to_ascii_lowercase().as_str(),
                    "1" | "true" | "yes" | "on"
                )
            })
            .unwrap_or(false)
    }
}

/// Assembles merchant settings from a store. Missing keys become empty values.
pub fn load_merchant_settings(store: &dyn SettingsStore) -> MerchantSettings {
    let value = |key: &str| store.get_setting(key).unwrap_or_default();

    MerchantSettings::new(
        value(setting_keys::MERCHANT_ID),
        value(setting_keys::POS_ID),
        value(setting_keys::SECRET_ID),
        value(setting_keys::CRC_ID),
    )
    .with_sandbox(store.get_flag(setting_keys::SANDBOX))
    .with_debug(store.get_flag(setting_keys::DEBUG))
}
