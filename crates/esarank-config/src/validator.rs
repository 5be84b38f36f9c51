//! Configuration validation, run once at the boundary.

use crate::loader::ConfigError;
use crate::schema::{Config, RunMode};
use regex::Regex;
use std::sync::LazyLock;

/// Regex pattern for validating hex color codes (e.g., #FFFFFF, #4c72b0)
pub static HEX_COLOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("Invalid hex color regex pattern")
});

/// Largest lookback accepted; deeper histories make unreadable stacks.
pub const MAX_LOOKBACK: u32 = 20;

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration for the given run mode.
    ///
    /// Missing required settings are reported with the environment variable that sets them.
    pub fn validate(config: &Config, mode: RunMode) -> Result<(), ConfigError> {
        if config.paths.ranking_output.is_none() {
            return Err(ConfigError::MissingConfig("ESA_RANKING".to_string()));
        }
        if config.paths.ranking_all_output.is_none() {
            return Err(ConfigError::MissingConfig("ESA_RANKING_ALL".to_string()));
        }

        match mode {
            RunMode::Render => {
                if config.paths.input_json.is_none() {
                    return Err(ConfigError::MissingConfig("JSON_PATH".to_string()));
                }
            }
            RunMode::Fetch => {
                if is_blank(config.esa.access_token.as_deref()) {
                    return Err(ConfigError::MissingConfig("ESA_ACCESS_TOKEN".to_string()));
                }
                if is_blank(config.esa.team_name.as_deref()) {
                    return Err(ConfigError::MissingConfig("ESA_TEAM_NAME".to_string()));
                }
            }
        }

        Self::validate_ranking(config)?;
        Self::validate_chart(config)?;
        Self::validate_logging(config)?;
        Ok(())
    }

    fn validate_logging(config: &Config) -> Result<(), ConfigError> {
        match config.logging.format.as_str() {
            "pretty" | "compact" | "json" => Ok(()),
            other => Err(ConfigError::Invalid(format!(
                "log format must be pretty, compact or json, got '{other}'"
            ))),
        }
    }

    fn validate_ranking(config: &Config) -> Result<(), ConfigError> {
        if config.ranking.lookback > MAX_LOOKBACK {
            return Err(ConfigError::Invalid(format!(
                "lookback must be at most {MAX_LOOKBACK}, got {}",
                config.ranking.lookback
            )));
        }
        if !(-23..=23).contains(&config.ranking.utc_offset_hours) {
            return Err(ConfigError::Invalid(format!(
                "UTC offset must be within -23..=23 hours, got {}",
                config.ranking.utc_offset_hours
            )));
        }
        Ok(())
    }

    fn validate_chart(config: &Config) -> Result<(), ConfigError> {
        let chart = &config.chart;
        if chart.width == 0 || chart.height == 0 {
            return Err(ConfigError::Invalid(
                "chart width and height must be positive".to_string(),
            ));
        }
        if chart.palette.is_empty() {
            return Err(ConfigError::Invalid(
                "chart palette needs at least one color".to_string(),
            ));
        }

        let colors = chart
            .palette
            .iter()
            .chain([&chart.background_color, &chart.plot_background_color]);
        for color in colors {
            if !HEX_COLOR_REGEX.is_match(color) {
                return Err(ConfigError::Invalid(format!(
                    "'{color}' is not a #RRGGBB color"
                )));
            }
        }
        Ok(())
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}
