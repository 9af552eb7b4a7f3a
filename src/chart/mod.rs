//! Gantt chart plumbing.
//!
//! Reconciled steps become [`GanttRow`]s, one bar per step, and are handed to
//! a [`ChartRenderer`] together with [`ChartOptions`]. [`GanttToggle`] owns
//! the shown/hidden state of the chart.

pub mod html;
pub mod toggle;

use serde::{Deserialize, Serialize};

use crate::TimelineResult;
use crate::core::step::Step;

pub use html::{HtmlChartRenderer, render_gantt_html, write_gantt_html};
pub use toggle::{GanttToggle, ToggleState};

/// Layout options passed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartOptions {
    /// Height of one row, in pixels.
    pub track_height: u32,
    /// Bar height as a fraction of `track_height`.
    pub bar_height_ratio: f64,
    /// Maximum width of the label column, in pixels.
    pub label_max_width: u32,
}

impl Default for ChartOptions {
    fn default() -> Self {
        ChartOptions {
            track_height: 30,
            bar_height_ratio: 0.6,
            label_max_width: 300,
        }
    }
}

impl ChartOptions {
    /// Bar height in pixels. The ratio is clamped to `[0, 1]`; a non-finite
    /// ratio falls back to the default.
    pub fn bar_height(&self) -> f64 {
        let ratio = if self.bar_height_ratio.is_finite() {
            self.bar_height_ratio.clamp(0.0, 1.0)
        } else {
            ChartOptions::default().bar_height_ratio
        };
        self.track_height as f64 * ratio
    }
}

/// One bar of the Gantt chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GanttRow {
    pub task_id: String,
    pub task_name: String,
    pub start: f64,
    pub end: f64,
    /// Always `None`; the extent comes from `start`/`end`.
    pub duration: Option<f64>,
    pub percent_complete: f64,
    /// Always `None`; bars carry no dependency edges.
    pub dependencies: Option<String>,
}

impl From<&Step> for GanttRow {
    fn from(step: &Step) -> Self {
        GanttRow {
            task_id: step.name.clone(),
            task_name: step.name.clone(),
            start: step.start,
            end: step.end,
            duration: None,
            percent_complete: 100.0,
            dependencies: None,
        }
    }
}

/// Build chart rows from (already reconciled) steps, preserving order.
pub fn rows_from_steps(steps: &[Step]) -> Vec<GanttRow> {
    steps.iter().map(GanttRow::from).collect()
}

/// The charting collaborator.
pub trait ChartRenderer {
    /// Draw `rows`, replacing anything previously drawn.
    fn render(&mut self, rows: &[GanttRow], options: &ChartOptions) -> TimelineResult<()>;

    /// Hide the drawn chart.
    fn hide(&mut self) -> TimelineResult<()>;
}
