//! PNG rendering of chart layouts with the plotters bitmap backend.

use crate::layout::{BarLabel, SingleYearLayout, StackedLayout};
use esarank_common::{RankingError, Result};
use plotters::coord::ranged1d::SegmentValue;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontTransform;
use std::path::Path;
use tracing::{info, instrument};

/// Headroom above the tallest bar, as a fraction of its height.
const Y_HEADROOM: f64 = 0.08;

/// Visual settings shared by both charts.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// X axis description.
    pub x_label: String,
    /// Y axis description.
    pub y_label: String,
    /// Figure background, `#RRGGBB`.
    pub background_color: String,
    /// Plot area background, `#RRGGBB`.
    pub plot_background_color: String,
    /// Font family for all text.
    pub font_family: String,
    /// Title font size.
    pub title_font_size: u32,
    /// Axis description and tick label font size.
    pub axis_font_size: u32,
    /// Value label font size.
    pub bar_label_font_size: u32,
    /// Legend font size.
    pub legend_font_size: u32,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 1258,
            height: 977,
            x_label: "Username".to_string(),
            y_label: "# of surveyed papers".to_string(),
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

/// Parse a `#RRGGBB` color string.
pub fn parse_color(color: &str) -> Result<RGBColor> {
    color
        .strip_prefix('#')
        .filter(|hex| hex.len() == 6 && hex.is_ascii())
        .and_then(|hex| {
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some(RGBColor(channel(0)?, channel(2)?, channel(4)?))
        })
        .ok_or_else(|| RankingError::graph(format!("invalid color '{color}'")))
}

/// One legend entry and the bar segments drawn in its color.
struct BarSeries {
    name: String,
    color: RGBColor,
    /// `(category index, bottom, top)`
    segments: Vec<(usize, f64, f64)>,
}

/// Everything needed to draw one chart.
struct BarChart<'a> {
    title: &'a str,
    categories: &'a [String],
    series: Vec<BarSeries>,
    labels: &'a [BarLabel],
    y_max: f64,
}

/// Draws ranking layouts to PNG files.
#[derive(Debug, Clone, Default)]
pub struct ChartRenderer {
    style: ChartStyle,
}

impl ChartRenderer {
    /// Creates a renderer with the given style.
    pub const fn new(style: ChartStyle) -> Self {
        Self { style }
    }

    /// The style in use.
    #[must_use]
    pub const fn style(&self) -> &ChartStyle {
        &self.style
    }

    /// Renders the single-year bar chart to `path`.
    #[instrument(skip(self, layout), fields(year = layout.year))]
    pub fn render_single_year(&self, layout: &SingleYearLayout, path: &Path) -> Result<()> {
        let series = BarSeries {
            name: layout.year.to_string(),
            color: parse_color(&layout.color)?,
            segments: layout
                .values
                .iter()
                .enumerate()
                .map(|(i, &v)| (i, 0.0, v as f64))
                .collect(),
        };
        let y_max = layout.values.iter().copied().max().unwrap_or(0) as f64;

        self.draw(
            &BarChart {
                title: &layout.title,
                categories: &layout.categories,
                series: vec![series],
                labels: &layout.labels,
                y_max,
            },
            path,
        )
    }

    /// Renders the stacked multi-year chart to `path`.
    #[instrument(skip(self, layout), fields(series = layout.series.len()))]
    pub fn render_stacked(&self, layout: &StackedLayout, path: &Path) -> Result<()> {
        let series = layout
            .series
            .iter()
            .map(|s| {
                Ok(BarSeries {
                    name: s.year.to_string(),
                    color: parse_color(&s.color)?,
                    segments: s
                        .values
                        .iter()
                        .zip(&s.bottoms)
                        .enumerate()
                        .map(|(i, (&v, &b))| (i, b as f64, (b + v) as f64))
                        .collect(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let y_max = layout
            .labels
            .iter()
            .map(|l| l.y)
            .fold(layout.max_total() as f64, f64::max);

        self.draw(
            &BarChart {
                title: &layout.title,
                categories: &layout.categories,
                series,
                labels: &layout.labels,
                y_max,
            },
            path,
        )
    }

    fn draw(&self, chart_data: &BarChart<'_>, path: &Path) -> Result<()> {
        let style = &self.style;
        let family = style.font_family.as_str();
        let background = parse_color(&style.background_color)?;
        let plot_background = parse_color(&style.plot_background_color)?;

        let root = BitMapBackend::new(path, (style.width, style.height)).into_drawing_area();
        root.fill(&background)?;

        let categories = chart_data.categories;
        let slots = categories.len().max(1);
        let y_top = (chart_data.y_max * (1.0 + Y_HEADROOM)).max(1.0);

        let mut chart = ChartBuilder::on(&root)
            .caption(chart_data.title, (family, style.title_font_size))
            .margin(20)
            .x_label_area_size(140)
            .y_label_area_size(70)
            // Integer ranges include their end, giving exactly `slots` segments
            .build_cartesian_2d((0..slots - 1).into_segmented(), 0.0..y_top)?;

        chart.plotting_area().fill(&plot_background)?;

        let x_formatter = |v: &SegmentValue<usize>| match v {
            SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => {
                categories.get(*i).cloned().unwrap_or_default()
            }
            SegmentValue::Last => String::new(),
        };
        chart
            .configure_mesh()
            .disable_x_mesh()
            .bold_line_style(WHITE.stroke_width(2))
            .light_line_style(WHITE.mix(0.6))
            .x_labels(slots)
            .x_label_formatter(&x_formatter)
            .x_label_style(
                (family, style.axis_font_size)
                    .into_font()
                    .transform(FontTransform::Rotate90),
            )
            .y_label_style((family, style.axis_font_size).into_font())
            .x_desc(style.x_label.as_str())
            .y_desc(style.y_label.as_str())
            .axis_desc_style((family, style.axis_font_size).into_font())
            .draw()?;

        // Bars take the middle half of each category slot
        let slot_px = chart.plotting_area().dim_in_pixel().0 / u32::try_from(slots).unwrap_or(1);
        let inset = slot_px / 4;

        for series in &chart_data.series {
            let color = series.color;
            let bars = series
                .segments
                .iter()
                .filter(|(_, bottom, top)| top > bottom)
                .flat_map(|&(i, bottom, top)| {
                    let right = if i + 1 < slots {
                        SegmentValue::Exact(i + 1)
                    } else {
                        SegmentValue::Last
                    };
                    let corners = [(SegmentValue::Exact(i), bottom), (right, top)];
                    let mut fill = Rectangle::new(corners.clone(), color.filled());
                    fill.set_margin(0, 0, inset, inset);
                    let mut edge = Rectangle::new(corners, WHITE.stroke_width(2));
                    edge.set_margin(0, 0, inset, inset);
                    [fill, edge]
                });

            chart
                .draw_series(bars)?
                .label(series.name.as_str())
                .legend(move |(x, y)| Rectangle::new([(x, y - 6), (x + 14, y + 6)], color.filled()));
        }

        let label_style = TextStyle::from((family, style.bar_label_font_size).into_font())
            .pos(Pos::new(HPos::Center, VPos::Bottom));
        chart.draw_series(chart_data.labels.iter().map(|label| {
            Text::new(
                label.text.clone(),
                (SegmentValue::CenterOf(label.index), label.y),
                label_style.clone(),
            )
        }))?;

        if !chart_data.series.is_empty() {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK.mix(0.2))
                .label_font((family, style.legend_font_size).into_font())
                .draw()?;
        }

        root.present()?;
        info!(path = %path.display(), "Rendered chart");
        Ok(())
    }
}
