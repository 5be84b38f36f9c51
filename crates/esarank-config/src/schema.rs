//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure for esarank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Input and output locations.
    pub paths: PathsConfig,
    /// Academic-year settings.
    pub ranking: RankingConfig,
    /// esa.io API settings.
    pub esa: EsaSettings,
    /// Chart styling.
    pub chart: ChartStyleConfig,
    /// Logging settings.
    pub logging: LogSettings,
}

/// File locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// JSON snapshot to read (`JSON_PATH`).
    pub input_json: Option<PathBuf>,
    /// Single-year chart output (`ESA_RANKING`).
    pub ranking_output: Option<PathBuf>,
    /// Multi-year stacked chart output (`ESA_RANKING_ALL`).
    pub ranking_all_output: Option<PathBuf>,
    /// Author allow-list / grouping YAML (`YAML_PATH`).
    pub author_list: Option<PathBuf>,
    /// Where `fetch` saves the downloaded snapshot, if anywhere.
    pub snapshot_output: Option<PathBuf>,
}

/// Academic-year settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Number of previous years to include besides the current one.
    pub lookback: u32,
    /// Reference timezone, in whole hours east of UTC.
    pub utc_offset_hours: i32,
}

/// esa.io API settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EsaSettings {
    /// Personal access token (`ESA_ACCESS_TOKEN`).
    pub access_token: Option<String>,
    /// Team name (`ESA_TEAM_NAME`).
    pub team_name: Option<String>,
    /// Category to fetch (`ESA_CATEGORY`).
    pub category: String,
    /// API root.
    pub base_url: String,
    /// Retry attempts per page.
    pub max_retries: usize,
}

/// Chart styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyleConfig {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Title prefix, followed by the year or year range.
    pub title_prefix: String,
    /// X axis description.
    pub x_label: String,
    /// Y axis description.
    pub y_label: String,
    /// Colors assigned to years, oldest first.
    pub palette: Vec<String>,
    /// Figure background.
    pub background_color: String,
    /// Plot area background.
    pub plot_background_color: String,
    /// Font family for all text.
    pub font_family: String,
    /// Title font size.
    pub title_font_size: u32,
    /// Axis description and tick label font size.
    pub axis_font_size: u32,
    /// Bar value label font size.
    pub bar_label_font_size: u32,
    /// Legend font size.
    pub legend_font_size: u32,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Filter directive (`ESARANK_LOG`).
    pub level: String,
    /// `pretty`, `compact` or `json`.
    pub format: String,
    /// Optional log file.
    pub file: Option<PathBuf>,
}

/// What the run is going to do, which decides the required settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Render charts from a JSON snapshot.
    Render,
    /// Fetch from the esa.io API, then render.
    Fetch,
}
