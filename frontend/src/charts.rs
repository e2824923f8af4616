use log::{debug, warn};
use serde::Serialize;

use crate::config::ChartMounts;

const FONT_FAMILY: &str = "'Inter', sans-serif";
const FAINT_GRID: &str = "rgba(0, 0, 0, 0.05)";
const RUPEE: &str = "₹";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Doughnut,
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: ChartKind,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<&'static str>,
    pub datasets: Vec<Dataset>,
}

/// One colour for the whole series, or one per data point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Paint {
    Solid(&'static str),
    PerPoint(Vec<&'static str>),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<&'static str>,
    /// `None` is a gap in the series.
    pub data: Vec<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<Paint>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<Paint>,
    pub border_width: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_radius: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_hover_radius: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_dash: Option<[u32; 2]>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub plugins: Plugins,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scales: Option<Scales>,
    /// Formatter for the y axis ticks, attached as a JS callback.
    #[serde(skip)]
    pub y_ticks: Option<TickFormat>,
    /// Formatter for tooltip labels, attached as a JS callback.
    #[serde(skip)]
    pub tooltip_label: Option<TooltipLabel>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plugins {
    pub legend: Legend,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Toggle>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LegendPosition {
    Bottom,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Legend {
    pub display: bool,
    pub position: LegendPosition,
    pub labels: LegendLabels,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendLabels {
    pub padding: u32,
    pub font: Font,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Font {
    pub size: u32,
    pub family: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Toggle {
    pub display: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scales {
    pub y: Axis,
    pub x: Axis,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub begin_at_zero: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    pub grid: Grid,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Grid {
    Color { color: &'static str },
    Hidden { display: bool },
}

impl Default for Grid {
    fn default() -> Self {
        Grid::Color { color: FAINT_GRID }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickFormat {
    Suffix(&'static str),
    Prefix(&'static str),
}

impl TickFormat {
    pub fn format(&self, value: &str) -> String {
        match self {
            TickFormat::Suffix(unit) => format!("{}{}", value, unit),
            TickFormat::Prefix(unit) => format!("{}{}", unit, value),
        }
    }
}

/// Tooltip text of the form `"<series>: <symbol><y><unit>"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TooltipLabel {
    pub symbol: &'static str,
    pub unit: &'static str,
}

impl TooltipLabel {
    pub fn format(&self, series: &str, y: Option<f64>) -> String {
        let mut label = series.to_string();
        if !label.is_empty() {
            label.push_str(": ");
        }
        if let Some(y) = y {
            label.push_str(&format!("{}{}{}", self.symbol, y, self.unit));
        }
        label
    }
}

fn common_options() -> ChartOptions {
    ChartOptions {
        responsive: true,
        maintain_aspect_ratio: true,
        plugins: Plugins {
            legend: Legend {
                display: true,
                position: LegendPosition::Bottom,
                labels: LegendLabels {
                    padding: 15,
                    font: Font {
                        size: 12,
                        family: FONT_FAMILY,
                    },
                },
            },
            title: None,
        },
        scales: None,
        y_ticks: None,
        tooltip_label: None,
    }
}

fn values(series: &[f64]) -> Vec<Option<f64>> {
    series.iter().copied().map(Some).collect()
}

/// Crop loss share per region, as a bar chart.
pub fn region_loss() -> ChartConfig {
    let mut options = common_options();
    options.plugins.title = Some(Toggle { display: false });
    options.scales = Some(Scales {
        y: Axis {
            begin_at_zero: Some(true),
            max: Some(50.0),
            ..Axis::default()
        },
        x: Axis {
            grid: Grid::Hidden { display: false },
            ..Axis::default()
        },
    });
    options.y_ticks = Some(TickFormat::Suffix("%"));

    ChartConfig {
        kind: ChartKind::Bar,
        data: ChartData {
            labels: vec![
                "India (National)",
                "Maharashtra",
                "Marathwada",
                "Vidarbha",
                "Western Maharashtra",
            ],
            datasets: vec![Dataset {
                label: Some("Crop Loss (%)"),
                data: values(&[25.0, 30.0, 45.0, 35.0, 28.0]),
                background_color: Some(Paint::PerPoint(vec![
                    "rgba(229, 57, 53, 0.7)",
                    "rgba(255, 111, 0, 0.7)",
                    "rgba(255, 160, 0, 0.7)",
                    "rgba(216, 67, 21, 0.7)",
                    "rgba(251, 140, 0, 0.7)",
                ])),
                border_color: Some(Paint::PerPoint(vec![
                    "rgba(229, 57, 53, 1)",
                    "rgba(255, 111, 0, 1)",
                    "rgba(255, 160, 0, 1)",
                    "rgba(216, 67, 21, 1)",
                    "rgba(251, 140, 0, 1)",
                ])),
                border_width: 2,
                ..Dataset::default()
            }],
        },
        options,
    }
}

/// Share of losses by cause, as a doughnut.
pub fn loss_causes() -> ChartConfig {
    let mut options = common_options();
    options.plugins.legend.position = LegendPosition::Right;

    ChartConfig {
        kind: ChartKind::Doughnut,
        data: ChartData {
            labels: vec![
                "Drought & Water Scarcity",
                "Pest & Disease",
                "Temperature Extremes",
                "Poor Soil Health",
                "Others",
            ],
            datasets: vec![Dataset {
                data: values(&[35.0, 25.0, 20.0, 15.0, 5.0]),
                background_color: Some(Paint::PerPoint(vec![
                    "rgba(229, 57, 53, 0.8)",
                    "rgba(255, 152, 0, 0.8)",
                    "rgba(255, 193, 7, 0.8)",
                    "rgba(139, 69, 19, 0.8)",
                    "rgba(158, 158, 158, 0.8)",
                ])),
                border_color: Some(Paint::Solid("#ffffff")),
                border_width: 3,
                ..Dataset::default()
            }],
        },
        options,
    }
}

fn trend_series(
    label: &'static str,
    data: Vec<Option<f64>>,
    line: &'static str,
    area: &'static str,
) -> Dataset {
    Dataset {
        label: Some(label),
        data,
        background_color: Some(Paint::Solid(area)),
        border_color: Some(Paint::Solid(line)),
        border_width: 3,
        tension: Some(0.4),
        fill: Some(true),
        point_radius: Some(5),
        point_hover_radius: Some(7),
        border_dash: None,
    }
}

/// Marathwada losses by year, with the projected effect of mitigation drawn
/// only over the years it applies to.
pub fn marathwada_trend() -> ChartConfig {
    let observed = values(&[2800.0, 3200.0, 4500.0, 3800.0, 4200.0, 4800.0, 5200.0]);

    let mut projected = vec![None; 5];
    projected.extend(values(&[4800.0, 3360.0, 2352.0]));

    let mut mitigated = trend_series(
        "With AI Solution (Projected)",
        projected,
        "rgba(67, 160, 71, 1)",
        "rgba(67, 160, 71, 0.1)",
    );
    mitigated.border_dash = Some([5, 5]);

    let mut options = common_options();
    options.scales = Some(Scales {
        y: Axis {
            begin_at_zero: Some(true),
            ..Axis::default()
        },
        x: Axis::default(),
    });
    options.y_ticks = Some(TickFormat::Prefix(RUPEE));
    options.tooltip_label = Some(TooltipLabel {
        symbol: RUPEE,
        unit: " Crores",
    });

    ChartConfig {
        kind: ChartKind::Line,
        data: ChartData {
            labels: vec!["2019", "2020", "2021", "2022", "2023", "2024", "2025"],
            datasets: vec![
                trend_series(
                    "Crop Loss (₹ Crores)",
                    observed,
                    "rgba(229, 57, 53, 1)",
                    "rgba(229, 57, 53, 0.1)",
                ),
                mitigated,
            ],
        },
        options,
    }
}

/// The three page charts paired with the ids of their mount points.
pub fn catalog(mounts: &ChartMounts) -> Vec<(String, ChartConfig)> {
    vec![
        (mounts.region_loss.clone(), region_loss()),
        (mounts.causes.clone(), loss_causes()),
        (mounts.trend.clone(), marathwada_trend()),
    ]
}

/// A charting library able to draw a config onto a mount point.
pub trait ChartService {
    type Mount;
    type Error: std::fmt::Debug;

    fn render(&self, mount: &Self::Mount, config: &ChartConfig) -> Result<(), Self::Error>;
}

/// Draws every chart whose mount point exists. Without a chart service
/// nothing is looked up or touched. Returns how many charts were drawn.
pub fn build_all<S, F>(service: Option<&S>, mounts: &ChartMounts, find_mount: F) -> usize
where
    S: ChartService,
    F: Fn(&str) -> Option<S::Mount>,
{
    let Some(service) = service else {
        debug!("No charting library loaded, skipping charts");
        return 0;
    };

    let mut drawn = 0;
    for (id, config) in catalog(mounts) {
        let Some(mount) = find_mount(&id) else {
            debug!("No mount point #{}, skipping chart", id);
            continue;
        };
        match service.render(&mount, &config) {
            Ok(()) => drawn += 1,
            Err(err) => warn!("Failed to draw chart #{}: {:?}", id, err),
        }
    }
    drawn
}
