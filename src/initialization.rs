use log::info;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config as LogConfig, Root};
use log4rs::encode::pattern::PatternEncoder;
use crate::config::{load_config, Config, General};
use crate::errors::ConfigError;

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {l:<5} {m}{n}";

/// Loads configuration and sets up logging
///
/// # Arguments
///
/// * 'args' - command line arguments, excluding the program name
pub fn init(args: &[String]) -> Result<Config, ConfigError> {
    let config = match config_path(args) {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };

    setup_logger(&config.general)?;

    info!("hourly-temp version: {}", env!("CARGO_PKG_VERSION"));

    Ok(config)
}

/// Returns the config path given as --config=<path>, if any
///
/// # Arguments
///
/// * 'args' - command line arguments, excluding the program name
fn config_path(args: &[String]) -> Option<&str> {
    args.iter().find_map(|a| a.strip_prefix("--config="))
}

/// Sets up log4rs with a console appender on stderr and/or a file appender
///
/// # Arguments
///
/// * 'general' - general configuration holding log level and destinations
fn setup_logger(general: &General) -> Result<(), ConfigError> {
    let mut builder = LogConfig::builder();
    let mut root = Root::builder();

    if general.log_to_stdout {
        let console = ConsoleAppender::builder()
            .target(Target::Stderr)
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build();
        builder = builder.appender(Appender::builder().build("console", Box::new(console)));
        root = root.appender("console");
    }

    if !general.log_path.is_empty() {
        let file = FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build(&general.log_path)
            .map_err(|e| ConfigError::Logger(format!("{}: {}", general.log_path, e)))?;
        builder = builder.appender(Appender::builder().build("file", Box::new(file)));
        root = root.appender("file");
    }

    let log_config = builder
        .build(root.build(general.log_level))
        .map_err(|e| ConfigError::Logger(e.to_string()))?;

    log4rs::init_config(log_config)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_path_is_taken_from_argument() {
        let args = vec!["-v".to_string(), "--config=/etc/hourly-temp.toml".to_string()];

        assert_eq!(config_path(&args), Some("/etc/hourly-temp.toml"));
        assert_eq!(config_path(&[]), None);
    }
}
