//! Demo 3: Matplotlib chart.
//!
//! Two trigonometric series drawn as lines or bars, with grid and legend
//! toggles, next to the plotting script that would produce the figure.

use super::{DemoKind, DemoState, SceneContext, SliderBounds, IS_PLAYING};
use crate::controls::ControlDescriptor;
use crate::engine::DemoRng;
use serde::{Deserialize, Serialize};

/// Bounds of the data point slider.
pub const DATA_POINTS: SliderBounds = SliderBounds::new(5, 20, 1);

/// Series amplitude.
pub const AMPLITUDE: f64 = 5.0;

/// Angular step between consecutive points.
pub const PHASE_STEP: f64 = 0.5;

/// Chart style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartType {
    /// Line chart.
    #[default]
    Line,
    /// Grouped bar chart.
    Bar,
}

impl ChartType {
    /// Chart type selected by the toggle state.
    #[must_use]
    pub const fn from_flag(alternate: bool) -> Self {
        if alternate {
            Self::Bar
        } else {
            Self::Line
        }
    }

    /// Whether the alternate value is selected.
    #[must_use]
    pub const fn is_alternate(self) -> bool {
        matches!(self, Self::Bar)
    }
}

/// Matplotlib demo state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartState {
    /// Line or bar chart.
    pub chart_type: ChartType,
    /// Number of points per series.
    pub data_points: u32,
    /// Whether grid lines are drawn.
    pub show_grid: bool,
    /// Whether the legend is drawn.
    pub show_legend: bool,
    /// Whether the chart is shown.
    pub is_playing: bool,
}

impl Default for ChartState {
    fn default() -> Self {
        Self {
            chart_type: ChartType::Line,
            data_points: 10,
            show_grid: true,
            show_legend: true,
            is_playing: false,
        }
    }
}

/// One sample of both series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// Sample index.
    pub x: f64,
    /// `5·sin(0.5·x)`
    pub sin: f64,
    /// `5·cos(0.5·x)`
    pub cos: f64,
}

/// Generated series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartScene {
    /// Samples in x order.
    pub points: Vec<ChartPoint>,
    /// Chart style the series were generated for.
    pub chart_type: ChartType,
}

impl ChartScene {
    /// `(x, y)` pairs of the sine series.
    #[must_use]
    pub fn sin_series(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|p| (p.x, p.sin)).collect()
    }

    /// `(x, y)` pairs of the cosine series.
    #[must_use]
    pub fn cos_series(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|p| (p.x, p.cos)).collect()
    }
}

impl DemoState for ChartState {
    const KIND: DemoKind = DemoKind::Chart;

    type Trigger = (ChartType, u32);
    type Scene = ChartScene;

    fn project(&self) -> Vec<ControlDescriptor> {
        vec![
            ControlDescriptor::toggle("chartType", "Bar chart", self.chart_type.is_alternate()),
            DATA_POINTS.descriptor("dataPoints", "Number of data points", self.data_points),
            ControlDescriptor::toggle("showGrid", "Show grid", self.show_grid),
            ControlDescriptor::toggle("showLegend", "Show legend", self.show_legend),
            ControlDescriptor::toggle(IS_PLAYING, "Draw chart", self.is_playing),
        ]
    }

    fn apply_control(&mut self, control: &ControlDescriptor) {
        match control.id.as_str() {
            "chartType" => {
                if let Some(flag) = control.flag() {
                    self.chart_type = ChartType::from_flag(flag);
                }
            }
            "dataPoints" => {
                if let Some(points) = DATA_POINTS.read(control) {
                    self.data_points = points;
                }
            }
            "showGrid" => {
                if let Some(flag) = control.flag() {
                    self.show_grid = flag;
                }
            }
            "showLegend" => {
                if let Some(flag) = control.flag() {
                    self.show_legend = flag;
                }
            }
            IS_PLAYING => {
                if let Some(flag) = control.flag() {
                    self.is_playing = flag;
                }
            }
            _ => {}
        }
    }

    fn is_playing(&self) -> bool {
        self.is_playing
    }

    fn set_playing(&mut self, playing: bool) {
        self.is_playing = playing;
    }

    fn trigger(&self) -> Self::Trigger {
        (self.chart_type, self.data_points)
    }

    fn generate(&self, _ctx: &SceneContext, _rng: &mut DemoRng) -> ChartScene {
        let points = (0..self.data_points)
            .map(|i| {
                let x = f64::from(i);
                ChartPoint {
                    x,
                    sin: (x * PHASE_STEP).sin() * AMPLITUDE,
                    cos: (x * PHASE_STEP).cos() * AMPLITUDE,
                }
            })
            .collect();

        ChartScene {
            points,
            chart_type: self.chart_type,
        }
    }
}

/// The plotting script equivalent to the current chart.
///
/// Derived from the state at render time, so the grid and legend lines
/// follow their toggles without regenerating the series.
#[must_use]
pub fn python_listing(state: &ChartState) -> String {
    let n = state.data_points;
    let last = n.saturating_sub(1);
    let plot = match state.chart_type {
        ChartType::Line => "ax.plot(x, sin_y, 'b-', label='sin(x)')\n\
                            ax.plot(x, cos_y, 'r-', label='cos(x)')"
            .to_string(),
        ChartType::Bar => "ax.bar(x - 0.2, sin_y, width=0.4, color='blue', label='sin(x)')\n\
                           ax.bar(x + 0.2, cos_y, width=0.4, color='red', label='cos(x)')"
            .to_string(),
    };
    let grid = if state.show_grid {
        "ax.grid(True)"
    } else {
        "# Grid disabled"
    };
    let legend = if state.show_legend {
        "ax.legend()"
    } else {
        "# Legend disabled"
    };

    format!(
        "import matplotlib.pyplot as plt\n\
         import numpy as np\n\
         \n\
         x = np.linspace(0, {last}, {n})\n\
         sin_y = np.sin(x * 0.5) * 5\n\
         cos_y = np.cos(x * 0.5) * 5\n\
         \n\
         fig, ax = plt.subplots(figsize=(10, 6))\n\
         {plot}\n\
         \n\
         ax.set_xlabel('X')\n\
         ax.set_ylabel('Y')\n\
         ax.set_title('Trigonometric Functions')\n\
         {grid}\n\
         {legend}\n\
         \n\
         plt.tight_layout()\n\
         plt.show()"
    )
}
