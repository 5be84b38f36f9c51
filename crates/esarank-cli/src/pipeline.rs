//! One ranking run: load posts, aggregate by academic year, render both charts.

use crate::args::Cli;
use crate::error::CliResult;
use esarank_common::logging::LogFormat;
use esarank_common::{
    utils::offset_from_hours, Clock, EsaClient, EsaConfig, LoggingConfig, RankingError,
    SystemClock,
};
use esarank_config::{
    AuthorListConfig, ChartStyleConfig, Config, ConfigError, ConfigLoader, ConfigValidator,
    LogSettings, RunMode,
};
use esarank_graphs::{
    AcademicYear, AcademicYearCalculator, AuthorFilter, ChartLayoutBuilder, ChartRenderer,
    ChartStyle, EsaSource, PartialDataWarning, PostAggregator, PostSource, SnapshotSource,
};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, instrument, warn};

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    /// Academic year the run was anchored on.
    pub current_year: AcademicYear,
    /// Years covered by the stacked chart, newest first.
    pub target_years: Vec<AcademicYear>,
    /// Where the single-year chart was written.
    pub ranking_path: PathBuf,
    /// Where the stacked chart was written.
    pub ranking_all_path: PathBuf,
    /// Allow-listed authors that had no data, if any.
    pub warning: Option<PartialDataWarning>,
}

/// Empty file beside `target`, with the same extension so the backend picks the same format.
fn staging_file(target: &Path) -> CliResult<NamedTempFile> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let suffix = target
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();
    tempfile::Builder::new()
        .prefix(".esarank-")
        .suffix(&suffix)
        .tempfile_in(dir)
        .map_err(|e| {
            RankingError::Io(std::io::Error::new(
                e.kind(),
                format!("{}: {e}", target.display()),
            ))
            .into()
        })
}

/// Moves both staged charts into place, or neither.
fn publish(
    single: NamedTempFile,
    single_path: &Path,
    stacked: NamedTempFile,
    stacked_path: &Path,
) -> CliResult<()> {
    single
        .persist(single_path)
        .map_err(|e| RankingError::Io(e.error))?;
    if let Err(e) = stacked.persist(stacked_path) {
        if let Err(cleanup) = fs::remove_file(single_path) {
            warn!(
                path = %single_path.display(),
                error = %cleanup,
                "Could not remove chart after failed publish"
            );
        }
        return Err(RankingError::Io(e.error).into());
    }
    Ok(())
}

fn required_path<'a>(path: Option<&'a PathBuf>, var: &str) -> CliResult<&'a Path> {
    path.map(PathBuf::as_path)
        .ok_or_else(|| ConfigError::MissingConfig(var.to_string()).into())
}

/// Picks the post source the run mode calls for.
pub fn build_source(config: &Config, mode: RunMode) -> CliResult<Box<dyn PostSource>> {
    match mode {
        RunMode::Render => {
            let path = required_path(config.paths.input_json.as_ref(), "JSON_PATH")?;
            Ok(Box::new(SnapshotSource::new(path)))
        }
        RunMode::Fetch => {
            let team = config
                .esa
                .team_name
                .as_deref()
                .ok_or_else(|| ConfigError::MissingConfig("ESA_TEAM_NAME".to_string()))?;
            let token = config
                .esa
                .access_token
                .clone()
                .ok_or_else(|| ConfigError::MissingConfig("ESA_ACCESS_TOKEN".to_string()))?;

            let esa_config = EsaConfig::new(team, token)
                .with_category(config.esa.category.clone())
                .with_base_url(config.esa.base_url.clone())
                .with_max_retries(config.esa.max_retries);
            let source = EsaSource::new(EsaClient::new(esa_config)?);

            Ok(match &config.paths.snapshot_output {
                Some(path) => Box::new(source.saving_to(path)),
                None => Box::new(source),
            })
        }
    }
}

/// Renderer settings from the chart section of the configuration.
#[must_use]
pub fn chart_style(chart: &ChartStyleConfig) -> ChartStyle {
    ChartStyle {
        width: chart.width,
        height: chart.height,
        x_label: chart.x_label.clone(),
        y_label: chart.y_label.clone(),
        background_color: chart.background_color.clone(),
        plot_background_color: chart.plot_background_color.clone(),
        font_family: chart.font_family.clone(),
        title_font_size: chart.title_font_size,
        axis_font_size: chart.axis_font_size,
        bar_label_font_size: chart.bar_label_font_size,
        legend_font_size: chart.legend_font_size,
    }
}

/// Subscriber settings from the logging section of the configuration.
#[must_use]
pub fn logging_config(settings: &LogSettings) -> LoggingConfig {
    let format = match settings.format.to_ascii_lowercase().as_str() {
        "json" => LogFormat::Json,
        "compact" => LogFormat::Compact,
        _ => LogFormat::Pretty,
    };
    LoggingConfig {
        level: settings.level.clone(),
        format,
        file_path: settings
            .file
            .as_ref()
            .map(|path| path.display().to_string()),
        ..LoggingConfig::default()
    }
}

/// Runs the pipeline against an already validated configuration.
///
/// The clock is read once, so both charts share the same current year and
/// update date. Both charts are rendered to staging files first and only moved
/// to their output paths once both succeed, so a failed run leaves neither.
#[instrument(skip_all, fields(source = %source.describe()))]
pub async fn run(
    config: &Config,
    source: &dyn PostSource,
    clock: &dyn Clock,
) -> CliResult<RunOutcome> {
    let ranking_path = required_path(config.paths.ranking_output.as_ref(), "ESA_RANKING")?;
    let ranking_all_path =
        required_path(config.paths.ranking_all_output.as_ref(), "ESA_RANKING_ALL")?;
    let offset = offset_from_hours(config.ranking.utc_offset_hours).ok_or_else(|| {
        ConfigError::Invalid(format!(
            "UTC offset of {} hours is out of range",
            config.ranking.utc_offset_hours
        ))
    })?;

    let calculator = AcademicYearCalculator::from_clock(offset, clock);
    let current_year = calculator.current_year();
    let target_years = calculator.target_years(config.ranking.lookback);
    info!(current_year, years = ?target_years, "Resolved academic years");

    let mut collection = source.load().await?;
    info!(authors = collection.total_authors, "Loaded posts");

    let mut warning = None;
    if let Some(path) = &config.paths.author_list {
        let list = AuthorListConfig::load(path)?;
        if let Some(groups) = &list.groups {
            for (group, members) in AuthorFilter::group(&collection, groups) {
                info!(%group, members = members.len(), "Resolved author group");
            }
        }
        if let Some(valid_users) = &list.valid_users {
            let outcome = AuthorFilter::filter(&collection, valid_users.as_slice());
            collection = outcome.collection;
            warning = outcome.warning;
        }
    }

    let counts = PostAggregator::new(&calculator).count_by_year(&collection, &target_years);

    let builder = ChartLayoutBuilder::new(
        config.chart.title_prefix.clone(),
        config.chart.palette.clone(),
        &calculator.now(),
    )?;
    let single = builder.single_year(&counts, current_year)?;
    let stacked = builder.stacked(&counts, &target_years)?;

    let single_file = staging_file(ranking_path)?;
    let stacked_file = staging_file(ranking_all_path)?;
    debug!(
        single = %single_file.path().display(),
        stacked = %stacked_file.path().display(),
        "Staging charts"
    );

    let renderer = ChartRenderer::new(chart_style(&config.chart));
    renderer.render_single_year(&single, single_file.path())?;
    renderer.render_stacked(&stacked, stacked_file.path())?;
    publish(single_file, ranking_path, stacked_file, ranking_all_path)?;
    info!(
        ranking = %ranking_path.display(),
        ranking_all = %ranking_all_path.display(),
        "Wrote charts"
    );

    if let Some(warning) = &warning {
        warn!(missing = ?warning.missing, "Charts rendered without some listed authors");
    }

    Ok(RunOutcome {
        current_year,
        target_years,
        ranking_path: ranking_path.to_path_buf(),
        ranking_all_path: ranking_all_path.to_path_buf(),
        warning,
    })
}

/// Loads and validates configuration for `cli`, sets up logging and runs.
pub async fn run_cli(cli: Cli) -> CliResult<RunOutcome> {
    let mut config = ConfigLoader::load_from(cli.config.as_deref())?;
    let mode = cli.apply(&mut config);

    if cli.debug {
        esarank_common::init_dev_logging()?;
    } else {
        esarank_common::init_logging(&logging_config(&config.logging))?;
    }
    info!(?mode, "Starting esarank");

    ConfigValidator::validate(&config, mode)?;

    let source = build_source(&config, mode)?;
    run(&config, source.as_ref(), &SystemClock).await
}
