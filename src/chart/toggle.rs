//! Show/hide state for the Gantt chart.

use tracing::{debug, info};

use crate::TimelineResult;
use crate::chart::{ChartOptions, ChartRenderer, rows_from_steps};
use crate::core::step::Step;
use crate::reconcile::reconcile_with_report;

/// What a call to [`GanttToggle::toggle`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleState {
    Shown,
    Hidden,
}

/// Owns the renderer and whether the chart is currently shown.
///
/// Every activation reconciles the steps it is given from scratch; nothing is
/// cached between activations.
#[derive(Debug)]
pub struct GanttToggle<R> {
    renderer: R,
    options: ChartOptions,
    visible: bool,
}

impl<R: ChartRenderer> GanttToggle<R> {
    pub fn new(renderer: R, options: ChartOptions) -> Self {
        GanttToggle {
            renderer,
            options,
            visible: false,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Flip visibility. Showing reconciles `raw_steps` and renders them;
    /// hiding asks the renderer to hide and ignores `raw_steps`.
    ///
    /// The state only flips if the renderer call succeeds.
    pub fn toggle(&mut self, raw_steps: &[Step]) -> TimelineResult<ToggleState> {
        if self.visible {
            self.renderer.hide()?;
            self.visible = false;
            debug!("gantt chart hidden");
            return Ok(ToggleState::Hidden);
        }

        let reconciled = reconcile_with_report(raw_steps);
        let rows = rows_from_steps(&reconciled.steps);
        self.renderer.render(&rows, &self.options)?;
        self.visible = true;
        info!(
            rows = rows.len(),
            anomalies = reconciled.anomalies.len(),
            "gantt chart shown"
        );
        Ok(ToggleState::Shown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TimelineError;
    use crate::chart::GanttRow;

    #[derive(Debug, Default)]
    struct RecordingRenderer {
        renders: Vec<Vec<GanttRow>>,
        hides: usize,
        fail: bool,
    }

    impl ChartRenderer for RecordingRenderer {
        fn render(&mut self, rows: &[GanttRow], _options: &ChartOptions) -> TimelineResult<()> {
            if self.fail {
                return Err(TimelineError::Message("renderer unavailable".to_string()));
            }
            self.renders.push(rows.to_vec());
            Ok(())
        }

        fn hide(&mut self) -> TimelineResult<()> {
            self.hides += 1;
            Ok(())
        }
    }

    fn build_steps() -> Vec<Step> {
        vec![
            Step::new("[trigger] build", 10.0, 12.0),
            Step::new("compile", 5.0, 8.0),
            Step::new("build", 20.0, 30.0),
        ]
    }

    #[test]
    fn test_toggle_cycle() {
        let mut toggle = GanttToggle::new(RecordingRenderer::default(), ChartOptions::default());
        assert!(!toggle.is_visible());

        // First call renders
        assert_eq!(toggle.toggle(&build_steps()).unwrap(), ToggleState::Shown);
        assert!(toggle.is_visible());
        assert_eq!(toggle.renderer().renders.len(), 1);
        assert_eq!(toggle.renderer().renders[0].len(), 2);
        assert_eq!(toggle.renderer().renders[0][1].start, 10.0);

        // Second call hides without rendering
        assert_eq!(toggle.toggle(&build_steps()).unwrap(), ToggleState::Hidden);
        assert!(!toggle.is_visible());
        assert_eq!(toggle.renderer().renders.len(), 1);
        assert_eq!(toggle.renderer().hides, 1);

        // Third call reconciles again from the steps it is given
        let changed = vec![Step::new("[trigger] build", 1.0, 2.0), Step::new("build", 3.0, 4.0)];
        assert_eq!(toggle.toggle(&changed).unwrap(), ToggleState::Shown);
        let renderer = toggle.into_renderer();
        assert_eq!(renderer.renders.len(), 2);
        assert_eq!(renderer.renders[1].len(), 1);
        assert_eq!(renderer.renders[1][0].start, 1.0);
        assert_eq!(renderer.renders[1][0].end, 4.0);
    }

    #[test]
    fn test_failed_render_stays_hidden() {
        let renderer = RecordingRenderer {
            fail: true,
            ..RecordingRenderer::default()
        };
        let mut toggle = GanttToggle::new(renderer, ChartOptions::default());
        assert!(toggle.toggle(&build_steps()).is_err());
        assert!(!toggle.is_visible());
    }

    #[test]
    fn test_instances_are_independent() {
        let mut a = GanttToggle::new(RecordingRenderer::default(), ChartOptions::default());
        let b = GanttToggle::new(RecordingRenderer::default(), ChartOptions::default());
        a.toggle(&build_steps()).unwrap();
        assert!(a.is_visible());
        assert!(!b.is_visible());
    }
}
