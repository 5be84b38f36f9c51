//! Default values.

use crate::schema::{
    ChartStyleConfig, Config, EsaSettings, LogSettings, PathsConfig, RankingConfig,
};

/// Previous years shown next to the current one.
pub const DEFAULT_LOOKBACK: u32 = 2;

/// UTC+9.
pub const DEFAULT_UTC_OFFSET_HOURS: i32 = 9;

/// Year colors, oldest year first.
pub const DEFAULT_PALETTE: [&str; 3] = ["#4c72b0", "#dd8453", "#55a868"];

impl Default for Config {
    fn default() -> Self {
        Self {
            paths: PathsConfig::default(),
            ranking: RankingConfig::default(),
            esa: EsaSettings::default(),
            chart: ChartStyleConfig::default(),
            logging: LogSettings::default(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input_json: None,
            ranking_output: None,
            ranking_all_output: None,
            author_list: None,
            snapshot_output: None,
        }
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            lookback: DEFAULT_LOOKBACK,
            utc_offset_hours: DEFAULT_UTC_OFFSET_HOURS,
        }
    }
}

impl Default for EsaSettings {
    fn default() -> Self {
        Self {
            access_token: None,
            team_name: None,
            category: "Survey".to_string(),
            base_url: "https://api.esa.io".to_string(),
            max_retries: 3,
        }
    }
}

impl Default for ChartStyleConfig {
    fn default() -> Self {
        Self {
            width: 1258,
            height: 977,
            title_prefix: "Survey ranking".to_string(),
            x_label: "Username".to_string(),
            y_label: "# of surveyed papers".to_string(),
            palette: DEFAULT_PALETTE.iter().map(ToString::to_string).collect(),
            background_color: "#ffffff".to_string(),
            plot_background_color: "#eaeaf2".to_string(),
            font_family: "sans-serif".to_string(),
            title_font_size: 18,
            axis_font_size: 18,
            bar_label_font_size: 16,
            legend_font_size: 18,
        }
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}
