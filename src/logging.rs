use std::str::FromStr;
use log::LevelFilter;
use log4rs::append::console::ConsoleAppender;
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Root};
use log4rs::encode::pattern::PatternEncoder;
use crate::errors::ConfigError;
use crate::initialization::General;

const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {h({l})} {M} - {m}{n}";

/// Sets up log4rs as the global logger
///
/// # Arguments
///
/// * 'general' - general section of the configuration
pub fn setup_logger(general: &General) -> Result<(), ConfigError> {
    let config = log_config(general)?;
    log4rs::init_config(config)?;

    Ok(())
}

/// Builds the log4rs configuration, console and/or file depending on settings
///
/// # Arguments
///
/// * 'general' - general section of the configuration
fn log_config(general: &General) -> Result<log4rs::Config, ConfigError> {
    let level = LevelFilter::from_str(&general.log_level)
        .map_err(|e| ConfigError(format!("invalid log level {}: {}", general.log_level, e)))?;

    let mut builder = log4rs::Config::builder();
    let mut root = Root::builder();

    if general.log_to_stdout {
        let stdout = ConsoleAppender::builder()
            .encoder(Box::new(PatternEncoder::new(PATTERN)))
            .build();
        builder = builder.appender(Appender::builder().build("stdout", Box::new(stdout)));
        root = root.appender("stdout");
    }

    if let Some(path) = &general.log_path {
        let file = FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(PATTERN)))
            .build(path)?;
        builder = builder.appender(Appender::builder().build("file", Box::new(file)));
        root = root.appender("file");
    }

    Ok(builder.build(root.build(level))?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn general(level: &str, path: Option<String>) -> General {
        General { log_path: path, log_level: level.to_string(), log_to_stdout: true }
    }

    #[test]
    fn console_only() {
        let config = log_config(&general("debug", None)).unwrap();
        assert_eq!(config.appenders().len(), 1);
        assert_eq!(config.root().level(), LevelFilter::Debug);
    }

    #[test]
    fn console_and_file() {
        let path = std::env::temp_dir().join("siteweather-logging-test.log");
        let config = log_config(&general("warn", Some(path.to_string_lossy().to_string()))).unwrap();
        assert_eq!(config.appenders().len(), 2);
        assert_eq!(config.root().appenders().len(), 2);
    }

    #[test]
    fn invalid_level() {
        assert!(log_config(&general("loud", None)).is_err());
    }
}
