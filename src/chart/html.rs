//! Static HTML/SVG Gantt renderer.
//!
//! Produces a standalone page with the chart drawn as inline SVG.
//! NO JavaScript. Output is deterministic for a given input, and every step
//! name is HTML-escaped before insertion.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{debug, info};

use crate::TimelineError;
use crate::chart::{ChartOptions, ChartRenderer, GanttRow};

/// Width of the bar area, in pixels. The label column is added to the left.
const CHART_WIDTH: f64 = 800.0;

/// Rough average glyph width used to fit labels into `label_max_width`.
const LABEL_CHAR_WIDTH: u32 = 7;

const PAGE_HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Build Timeline</title>
<style>
* { box-sizing: border-box; margin: 0; padding: 0; }
body {
  font-family: system-ui, -apple-system, sans-serif;
  background: #1a1a2e;
  color: #e8e8e8;
  padding: 24px;
}
h1 { font-size: 1.5rem; margin-bottom: 16px; }
#summary { color: #9a9a9a; font-size: 0.875rem; margin-bottom: 16px; }
#chart-message { color: #9a9a9a; font-size: 0.875rem; text-align: center; padding: 80px 0; }
.track { fill: #16213e; }
.track.alt { fill: #1f2b47; }
.bar { fill: #2d3a5c; }
.progress { fill: #4ecdc4; }
.label { fill: #e8e8e8; font-size: 12px; dominant-baseline: middle; }
</style>
</head>
<body>
<h1>Build Timeline</h1>
"#;

const PAGE_TAIL: &str = "</body>\n</html>\n";

/// HTML-escape a string for safe insertion into HTML content or attributes.
///
/// Escapes: & < > " '
pub fn html_escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Format epoch seconds as RFC 3339, falling back to the raw number.
fn format_timestamp(secs: f64) -> String {
    OffsetDateTime::from_unix_timestamp_nanos((secs * 1e9) as i128)
        .ok()
        .and_then(|t| t.format(&Rfc3339).ok())
        .unwrap_or_else(|| format!("{secs:.3}"))
}

/// Shorten `label` so it fits in `max_width` pixels.
fn truncate_label(label: &str, max_width: u32) -> String {
    let max_chars = (max_width / LABEL_CHAR_WIDTH).max(1) as usize;
    if label.chars().count() <= max_chars {
        return label.to_string();
    }
    let mut short: String = label.chars().take(max_chars - 1).collect();
    short.push('…');
    short
}

/// Render the Gantt chart page for `rows`.
pub fn render_gantt_html(rows: &[GanttRow], options: &ChartOptions) -> String {
    let mut html = String::with_capacity(4 * 1024 + rows.len() * 512);
    html.push_str(PAGE_HEAD);

    if rows.is_empty() {
        html.push_str("<div id=\"chart-message\">No steps to display</div>\n");
        html.push_str(PAGE_TAIL);
        return html;
    }

    let min_start = rows.iter().map(|r| r.start).fold(f64::INFINITY, f64::min);
    let max_end = rows.iter().map(|r| r.end).fold(f64::NEG_INFINITY, f64::max);
    let span = if max_end > min_start { max_end - min_start } else { 1.0 };

    let label_width = options.label_max_width as f64;
    let track = options.track_height as f64;
    let bar_height = options.bar_height();
    let bar_offset = (track - bar_height) / 2.0;
    let width = label_width + CHART_WIDTH;
    let height = track * rows.len() as f64;
    let scale = |t: f64| label_width + (t - min_start) / span * CHART_WIDTH;

    let _ = writeln!(
        html,
        "<div id=\"summary\">{} step(s), {:.1}s from {} to {}</div>",
        rows.len(),
        max_end - min_start,
        html_escape(&format_timestamp(min_start)),
        html_escape(&format_timestamp(max_end)),
    );
    let _ = writeln!(
        html,
        "<svg id=\"chart-svg\" width=\"{width:.0}\" height=\"{height:.0}\" viewBox=\"0 0 {width:.0} {height:.0}\">"
    );

    for (i, row) in rows.iter().enumerate() {
        let y = track * i as f64;
        let x0 = scale(row.start);
        let bar_width = (scale(row.end) - x0).max(1.0);
        let progress_width = bar_width * (row.percent_complete.clamp(0.0, 100.0) / 100.0);
        let alt = if i % 2 == 1 { " alt" } else { "" };

        let _ = writeln!(
            html,
            "<g class=\"row\" id=\"row-{i}\" data-task-id=\"{}\">",
            html_escape(&row.task_id)
        );
        let _ = writeln!(
            html,
            "<rect class=\"track{alt}\" x=\"0\" y=\"{y:.1}\" width=\"{width:.0}\" height=\"{track:.1}\"/>"
        );
        let _ = writeln!(
            html,
            "<text class=\"label\" x=\"4\" y=\"{:.1}\">{}</text>",
            y + track / 2.0,
            html_escape(&truncate_label(&row.task_name, options.label_max_width)),
        );
        let _ = writeln!(
            html,
            "<rect class=\"bar\" x=\"{x0:.1}\" y=\"{:.1}\" width=\"{bar_width:.1}\" height=\"{bar_height:.1}\"><title>{}: {} to {} ({:.1}s)</title></rect>",
            y + bar_offset,
            html_escape(&row.task_name),
            html_escape(&format_timestamp(row.start)),
            html_escape(&format_timestamp(row.end)),
            row.end - row.start,
        );
        let _ = writeln!(
            html,
            "<rect class=\"progress\" x=\"{x0:.1}\" y=\"{:.1}\" width=\"{progress_width:.1}\" height=\"{bar_height:.1}\"/>",
            y + bar_offset,
        );
        html.push_str("</g>\n");
    }

    html.push_str("</svg>\n");
    html.push_str(PAGE_TAIL);
    html
}

/// Render the chart and write it to `output_path`.
pub fn write_gantt_html(
    rows: &[GanttRow],
    options: &ChartOptions,
    output_path: &Path,
) -> Result<(), TimelineError> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .map_err(|e| TimelineError::Message(format!("failed to create directory: {e}")))?;
        }
    }

    let html = render_gantt_html(rows, options);
    fs::write(output_path, html).map_err(|e| {
        TimelineError::Message(format!("failed to write {}: {e}", output_path.display()))
    })?;

    Ok(())
}

/// [`ChartRenderer`] that writes the chart page to a file.
///
/// Hiding removes the page.
#[derive(Debug, Clone)]
pub struct HtmlChartRenderer {
    path: PathBuf,
}

impl HtmlChartRenderer {
    pub fn new(path: impl AsRef<Path>) -> Self {
        HtmlChartRenderer {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ChartRenderer for HtmlChartRenderer {
    fn render(&mut self, rows: &[GanttRow], options: &ChartOptions) -> Result<(), TimelineError> {
        write_gantt_html(rows, options, &self.path)?;
        info!(path = %self.path.display(), rows = rows.len(), "wrote gantt chart");
        Ok(())
    }

    fn hide(&mut self) -> Result<(), TimelineError> {
        if self.path.exists() {
            fs::remove_file(&self.path).map_err(|e| {
                TimelineError::Message(format!("failed to remove {}: {e}", self.path.display()))
            })?;
            debug!(path = %self.path.display(), "removed gantt chart");
        }
        Ok(())
    }
}
