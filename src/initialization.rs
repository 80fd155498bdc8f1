use std::env;
use std::fs;
use chrono_tz::Tz;
use serde::Deserialize;
use crate::errors::ConfigError;
use crate::manager_feasibility::models::RuleSet;

const CONFIG_PATH_VAR: &str = "CONFIG_PATH";
const API_KEY_VAR: &str = "OWM_API_KEY";
const DEFAULT_CONFIG_PATH: &str = "config.toml";
// the 5 day / 3 hour forecast never reaches further out
const MAX_FORECAST_DAYS: i64 = 5;

#[derive(Deserialize, Debug)]
pub struct WebServer {
    pub bind_address: String,
    pub bind_port: u16,
}

#[derive(Deserialize, Debug)]
pub struct Weather {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    pub city: String,
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default = "default_forecast_days")]
    pub forecast_days: i64,
    #[serde(default)]
    pub rule_set: RuleSet,
}

impl Weather {
    /// Civil timezone used for date ranges and display
    pub fn tz(&self) -> Result<Tz, ConfigError> {
        self.timezone.parse::<Tz>()
            .map_err(|e| ConfigError(format!("unknown timezone {}: {}", self.timezone, e)))
    }
}

#[derive(Deserialize, Debug)]
pub struct General {
    pub log_path: Option<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_log_to_stdout")]
    pub log_to_stdout: bool,
}

#[derive(Deserialize, Debug)]
pub struct Config {
    pub web_server: WebServer,
    pub weather: Weather,
    pub general: General,
}

fn default_base_url() -> String { "https://api.openweathermap.org/data/2.5".to_string() }
fn default_timezone() -> String { "Asia/Seoul".to_string() }
fn default_forecast_days() -> i64 { 4 }
fn default_log_level() -> String { "info".to_string() }
fn default_log_to_stdout() -> bool { true }

/// Loads the configuration file.
///
/// The path is taken from the first program argument, then the CONFIG_PATH environment
/// variable, then defaults to config.toml. A .env file is read first if present and
/// OWM_API_KEY, when set, replaces the api key from the file.
pub fn config() -> Result<Config, ConfigError> {
    dotenvy::dotenv().ok();

    let path = env::args().nth(1)
        .or_else(|| env::var(CONFIG_PATH_VAR).ok())
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let toml = fs::read_to_string(&path)
        .map_err(|e| ConfigError(format!("failed to read {}: {}", path, e)))?;

    parse_config(&toml, env::var(API_KEY_VAR).ok())
}

/// Parses and validates configuration text
///
/// # Arguments
///
/// * 'toml' - configuration in toml format
/// * 'api_key' - api key overriding the one in the configuration, if any
pub fn parse_config(toml: &str, api_key: Option<String>) -> Result<Config, ConfigError> {
    let mut config: Config = toml::from_str(toml)?;

    if let Some(key) = api_key.filter(|k| !k.trim().is_empty()) {
        config.weather.api_key = key;
    }

    if config.weather.api_key.trim().is_empty() {
        return Err(ConfigError::from("no api key, set weather.api_key or OWM_API_KEY"));
    }
    if !(0..=MAX_FORECAST_DAYS).contains(&config.weather.forecast_days) {
        return Err(ConfigError(format!("weather.forecast_days must be between 0 and {}", MAX_FORECAST_DAYS)));
    }
    config.weather.tz()?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
        [web_server]
        bind_address = "127.0.0.1"
        bind_port = 8080

        [weather]
        api_key = "from_file"
        city = "Seoul"

        [general]
        log_level = "debug"
    "#;

    #[test]
    fn applies_defaults() {
        let config = parse_config(CONFIG, None).unwrap();
        assert_eq!(config.web_server.bind_port, 8080);
        assert_eq!(config.weather.base_url, "https://api.openweathermap.org/data/2.5");
        assert_eq!(config.weather.timezone, "Asia/Seoul");
        assert_eq!(config.weather.forecast_days, 4);
        assert_eq!(config.weather.rule_set, RuleSet::Current);
        assert_eq!(config.weather.tz().unwrap(), chrono_tz::Asia::Seoul);
        assert!(config.general.log_to_stdout);
        assert!(config.general.log_path.is_none());
    }

    #[test]
    fn env_key_overrides_file() {
        let config = parse_config(CONFIG, Some("from_env".to_string())).unwrap();
        assert_eq!(config.weather.api_key, "from_env");

        let config = parse_config(CONFIG, Some("  ".to_string())).unwrap();
        assert_eq!(config.weather.api_key, "from_file");
    }

    #[test]
    fn missing_key_is_rejected() {
        let toml = CONFIG.replace("api_key = \"from_file\"", "");
        assert!(parse_config(&toml, None).is_err());
    }

    #[test]
    fn legacy_rules_and_timezone() {
        let toml = CONFIG.replace(
            "city = \"Seoul\"",
            "city = \"Busan\"\ntimezone = \"Europe/Stockholm\"\nrule_set = \"legacy\"",
        );
        let config = parse_config(&toml, None).unwrap();
        assert_eq!(config.weather.rule_set, RuleSet::Legacy);
        assert_eq!(config.weather.tz().unwrap(), chrono_tz::Europe::Stockholm);
    }

    #[test]
    fn forecast_days_is_bounded() {
        let toml = CONFIG.replace("city = \"Seoul\"", "city = \"Seoul\"\nforecast_days = 5");
        assert_eq!(parse_config(&toml, None).unwrap().weather.forecast_days, 5);

        for days in ["6", "200000000", "-1"] {
            let toml = CONFIG.replace("city = \"Seoul\"", &format!("city = \"Seoul\"\nforecast_days = {}", days));
            assert!(parse_config(&toml, None).is_err(), "forecast_days = {} should be rejected", days);
        }
    }

    #[test]
    fn unknown_timezone_is_rejected() {
        let toml = CONFIG.replace("city = \"Seoul\"", "city = \"Seoul\"\ntimezone = \"Mars/Olympus\"");
        assert!(parse_config(&toml, None).is_err());
    }
}
