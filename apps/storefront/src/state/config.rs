//! # Configuration State
//!
//! Stores storefront configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Command line overrides (`--out-dir`)
//! 2. Environment variables (`VITRINE_*`)
//! 3. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use vitrine_core::{CurrencyFormat, RenderOptions};

/// Storefront configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Store name (order header and share title)
    pub store_name: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Thousands separator, e.g. '.' in pt-BR
    pub thousands_separator: char,

    /// Decimal separator, e.g. ',' in pt-BR
    pub decimal_separator: char,

    /// Folder the download sink writes `pedido-*.txt` files into
    pub output_dir: PathBuf,
}

impl Default for ConfigState {
    /// Returns default configuration.
    ///
    /// ## Default Values
    /// - Store: "Vitrine"
    /// - Currency: BRL (R$ 1.234,56)
    /// - Output: `<platform data dir>/pedidos`, or `./pedidos` when the
    ///   platform has no home directory
    fn default() -> Self {
        let currency = CurrencyFormat::brl();
        ConfigState {
            store_name: "Vitrine".to_string(),
            currency_symbol: currency.symbol,
            thousands_separator: currency.thousands_separator,
            decimal_separator: currency.decimal_separator,
            output_dir: default_output_dir(),
        }
    }
}

impl ConfigState {
    /// Creates a new ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `VITRINE_STORE_NAME`: Override store name
    /// - `VITRINE_CURRENCY_SYMBOL`: Override currency symbol
    /// - `VITRINE_THOUSANDS_SEPARATOR`: Single character
    /// - `VITRINE_DECIMAL_SEPARATOR`: Single character
    /// - `VITRINE_OUTPUT_DIR`: Override the order output folder
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ConfigState::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConfigState::default();

        if let Some(store_name) = lookup("VITRINE_STORE_NAME") {
            let store_name = store_name.trim();
            if store_name.is_empty() {
                return Err(ConfigError::InvalidValue("VITRINE_STORE_NAME".to_string()));
            }
            config.store_name = store_name.to_string();
        }

        if let Some(symbol) = lookup("VITRINE_CURRENCY_SYMBOL") {
            config.currency_symbol = symbol;
        }

        if let Some(value) = lookup("VITRINE_THOUSANDS_SEPARATOR") {
            config.thousands_separator = single_char("VITRINE_THOUSANDS_SEPARATOR", &value)?;
        }

        if let Some(value) = lookup("VITRINE_DECIMAL_SEPARATOR") {
            config.decimal_separator = single_char("VITRINE_DECIMAL_SEPARATOR", &value)?;
        }

        if config.thousands_separator == config.decimal_separator {
            return Err(ConfigError::AmbiguousSeparators(config.decimal_separator));
        }

        if let Some(dir) = lookup("VITRINE_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(dir);
        }

        Ok(config)
    }

    /// Currency format used for every amount in the order text.
    pub fn currency(&self) -> CurrencyFormat {
        CurrencyFormat::new(
            self.currency_symbol.clone(),
            self.thousands_separator,
            self.decimal_separator,
        )
    }

    /// Options handed to the order renderer.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            store_name: self.store_name.clone(),
            currency: self.currency(),
        }
    }
}

fn single_char(key: &str, value: &str) -> Result<char, ConfigError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(ConfigError::InvalidValue(key.to_string())),
    }
}

fn default_output_dir() -> PathBuf {
    ProjectDirs::from("br", "vitrine", "storefront")
        .map(|dirs| dirs.data_dir().join("pedidos"))
        .unwrap_or_else(|| PathBuf::from("pedidos"))
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}")]
    InvalidValue(String),

    #[error("Thousands and decimal separators are both '{0}'")]
    AmbiguousSeparators(char),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use vitrine_core::Money;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_brl() {
        let config = ConfigState::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.store_name, "Vitrine");
        assert_eq!(
            Money::from_cents(123_456).format(&config.currency()),
            "R$ 1.234,56"
        );
        assert!(config.output_dir.ends_with("pedidos"));
    }

    #[test]
    fn test_env_overrides() {
        let config = ConfigState::from_lookup(lookup(&[
            ("VITRINE_STORE_NAME", "  Casa Aurora "),
            ("VITRINE_CURRENCY_SYMBOL", "US$"),
            ("VITRINE_THOUSANDS_SEPARATOR", ","),
            ("VITRINE_DECIMAL_SEPARATOR", "."),
            ("VITRINE_OUTPUT_DIR", "/tmp/orders"),
        ]))
        .unwrap();

        assert_eq!(config.store_name, "Casa Aurora");
        assert_eq!(config.output_dir, PathBuf::from("/tmp/orders"));
        assert_eq!(
            Money::from_cents(123_456).format(&config.currency()),
            "US$ 1,234.56"
        );
        assert_eq!(config.render_options().store_name, "Casa Aurora");
    }

    #[test]
    fn test_rejects_bad_separators() {
        let err = ConfigState::from_lookup(lookup(&[("VITRINE_DECIMAL_SEPARATOR", ",,")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(key) if key == "VITRINE_DECIMAL_SEPARATOR"));

        let err = ConfigState::from_lookup(lookup(&[("VITRINE_THOUSANDS_SEPARATOR", ",")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::AmbiguousSeparators(',')));
    }

    #[test]
    fn test_rejects_blank_store_name() {
        assert!(ConfigState::from_lookup(lookup(&[("VITRINE_STORE_NAME", "   ")])).is_err());
    }
}
