//! Configuration data model.
//!
//! All structs derive `Serialize`/`Deserialize` for TOML persistence.
//! Every field has a sensible default so the application works out of the box.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub profile: ProfileConfig,
    /// Exchange rates from the source currency, layered over the built-in
    /// mock table. Keys are currency codes.
    #[serde(default)]
    pub rates: HashMap<String, Decimal>,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default = "default_display_name")]
    pub display_name: String,
    #[serde(default = "default_email")]
    pub email: String,
    #[serde(default = "default_wallet_balance")]
    pub wallet_balance: Decimal,
    #[serde(default = "default_source_currency")]
    pub source_currency: String,
    #[serde(default = "default_true")]
    pub biometric_login: bool,
    #[serde(default = "default_true")]
    pub push_notifications: bool,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            display_name: default_display_name(),
            email: default_email(),
            wallet_balance: default_wallet_balance(),
            source_currency: default_source_currency(),
            biometric_login: true,
            push_notifications: true,
        }
    }
}

impl ProfileConfig {
    pub fn first_name(&self) -> &str {
        self.display_name.split_whitespace().next().unwrap_or("there")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_tick_rate_ms")]
    pub tick_rate_ms: u64,
    #[serde(default = "default_recent_transfers")]
    pub recent_transfers: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate_ms(),
            recent_transfers: default_recent_transfers(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            log_dir: default_log_dir(),
        }
    }
}

fn default_display_name() -> String {
    "Leslye Johnson".to_string()
}
fn default_email() -> String {
    "leslye.johnson@email.com".to_string()
}
fn default_wallet_balance() -> Decimal {
    Decimal::from(6_543_210)
}
fn default_source_currency() -> String {
    "NGN".to_string()
}
fn default_true() -> bool {
    true
}
fn default_tick_rate_ms() -> u64 {
    50
}
fn default_recent_transfers() -> usize {
    3
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("bridgepay")
        .join("logs")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{load_config_from, parse_config};
    use std::str::FromStr;

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir()
            .join("bridgepay-test-missing")
            .join("config.toml");
        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.profile.source_currency, "NGN");
        assert_eq!(cfg.ui.tick_rate_ms, 50);
        assert!(cfg.rates.is_empty());
    }

    #[test]
    fn test_empty_file_gives_defaults() {
        let cfg = parse_config("").unwrap();
        assert_eq!(cfg.profile.display_name, "Leslye Johnson");
        assert_eq!(cfg.profile.wallet_balance, Decimal::from(6_543_210));
        assert!(cfg.logging.enabled);
        assert_eq!(cfg.logging.level, "info");
    }

    #[test]
    fn test_rates_section() {
        let cfg = parse_config(
            r#"
            [rates]
            USD = "0.0007"
            KES = "0.084"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.rates.get("USD"), Some(&Decimal::from_str("0.0007").unwrap()));
        assert_eq!(cfg.rates.get("KES"), Some(&Decimal::from_str("0.084").unwrap()));
    }

    #[test]
    fn test_partial_profile() {
        let cfg = parse_config(
            r#"
            [profile]
            display_name = "Ada Obi"
            push_notifications = false
            "#,
        )
        .unwrap();
        assert_eq!(cfg.profile.first_name(), "Ada");
        assert!(!cfg.profile.push_notifications);
        assert!(cfg.profile.biometric_login);
        assert_eq!(cfg.profile.email, "leslye.johnson@email.com");
    }

    #[test]
    fn test_malformed_config_is_an_error() {
        assert!(parse_config("[rates]\nUSD = [1, 2]").is_err());
    }

    #[test]
    fn test_round_trip_through_toml() {
        let mut cfg = AppConfig::default();
        cfg.rates.insert("GBP".into(), Decimal::from_str("0.0005").unwrap());
        let text = toml::to_string_pretty(&cfg).unwrap();
        let back = parse_config(&text).unwrap();
        assert_eq!(back.rates, cfg.rates);
        assert_eq!(back.profile.wallet_balance, cfg.profile.wallet_balance);
    }
}
