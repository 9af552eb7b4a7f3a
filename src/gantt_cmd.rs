//! CLI command handler for `gantt`.

use std::path::PathBuf;

use tracing::info;

use crate::chart::{GanttToggle, HtmlChartRenderer, ToggleState};
use crate::config::load_config_or_default;
use crate::storage::load_steps;
use crate::{TimelineError, TimelineResult};

/// Run the `gantt` command: reconcile the steps in `steps_path` and write the
/// chart page to `out`. Chart options come from `config` when given.
pub fn run(steps_path: PathBuf, out: PathBuf, config: Option<PathBuf>) -> TimelineResult<()> {
    let cfg = load_config_or_default(config.as_deref())?;
    let steps = load_steps(&steps_path)?;

    let mut toggle = GanttToggle::new(HtmlChartRenderer::new(&out), cfg.chart);
    match toggle.toggle(&steps)? {
        ToggleState::Shown => {
            let options = toggle.options();
            info!(
                path = %toggle.renderer().path().display(),
                track_height = options.track_height,
                bar_height_ratio = options.bar_height_ratio,
                label_max_width = options.label_max_width,
                "gantt chart written"
            );
            Ok(())
        }
        ToggleState::Hidden => Err(TimelineError::Message(
            "chart unexpectedly hidden on first toggle".to_string(),
        )),
    }
}
