use std::fs;
use log::LevelFilter;
use serde::Deserialize;
use crate::errors::ConfigError;

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct GeoRef {
    pub lat: f64,
    pub long: f64,
}

impl Default for GeoRef {
    fn default() -> Self {
        Self { lat: 4.0, long: -10.0 }
    }
}

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct OpenMeteoParameters {
    pub base_url: String,
    pub hourly: Vec<String>,
    pub timezone: String,
    pub timeout_secs: u64,
}

impl Default for OpenMeteoParameters {
    fn default() -> Self {
        Self {
            base_url: "https://api.open-meteo.com/v1/forecast".to_string(),
            hourly: vec!["temperature_2m".to_string()],
            timezone: "auto".to_string(),
            timeout_secs: 30,
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct ChartParameters {
    pub hours: usize,
    pub output: String,
    pub width: u32,
    pub height: u32,
    pub show: bool,
}

impl Default for ChartParameters {
    fn default() -> Self {
        Self {
            hours: 24,
            output: "temperature.png".to_string(),
            width: 1200,
            height: 500,
            show: true,
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct General {
    pub log_path: String,
    pub log_level: LevelFilter,
    pub log_to_stdout: bool,
    pub head_rows: usize,
}

impl Default for General {
    fn default() -> Self {
        Self {
            log_path: String::new(),
            log_level: LevelFilter::Info,
            log_to_stdout: true,
            head_rows: 5,
        }
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct Config {
    pub geo_ref: GeoRef,
    pub open_meteo: OpenMeteoParameters,
    pub chart: ChartParameters,
    pub general: General,
}

/// Loads the configuration file and returns a struct with all configuration items
///
/// # Arguments
///
/// * 'config_path' - path to the configuration file
pub fn load_config(config_path: &str) -> Result<Config, ConfigError> {
    let toml = fs::read_to_string(config_path)?;

    parse_config(&toml)
}

/// Parses a configuration document, sections and fields left out get their defaults
///
/// # Arguments
///
/// * 'toml' - the configuration document
pub fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(toml)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config = parse_config("").unwrap();

        assert_eq!(config.geo_ref.lat, 4.0);
        assert_eq!(config.geo_ref.long, -10.0);
        assert_eq!(config.open_meteo.hourly, vec!["temperature_2m".to_string()]);
        assert_eq!(config.open_meteo.timezone, "auto");
        assert_eq!(config.chart.hours, 24);
        assert_eq!((config.chart.width, config.chart.height), (1200, 500));
        assert!(config.chart.show);
        assert_eq!(config.general.log_level, LevelFilter::Info);
        assert_eq!(config.general.head_rows, 5);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let toml = r#"
            [geo_ref]
            lat = 59.33

            [chart]
            hours = 48
            output = "stockholm.svg"

            [general]
            log_level = "debug"
            log_to_stdout = false
        "#;
        let config = parse_config(toml).unwrap();

        assert_eq!(config.geo_ref.lat, 59.33);
        assert_eq!(config.geo_ref.long, -10.0);
        assert_eq!(config.chart.hours, 48);
        assert_eq!(config.chart.output, "stockholm.svg");
        assert_eq!(config.chart.width, 1200);
        assert_eq!(config.general.log_level, LevelFilter::Debug);
        assert!(!config.general.log_to_stdout);
        assert_eq!(config.open_meteo.timeout_secs, 30);
    }

    #[test]
    fn sample_config_opens_chart_viewer() {
        let config = parse_config(include_str!("../hourly-temp.toml")).unwrap();

        assert!(config.chart.show);
        assert_eq!(config.chart.output, "temperature.png");
        assert_eq!(config.general.log_path, "");
    }

    #[test]
    fn malformed_document_is_an_error() {
        let result = parse_config("[geo_ref]\nlat = \"north\"");

        assert!(matches!(result, Err(ConfigError::Document(_))));
    }

    #[test]
    fn missing_file_is_an_error() {
        let result = load_config("/nonexistent/hourly-temp.toml");

        assert!(matches!(result, Err(ConfigError::File(_))));
    }
}
