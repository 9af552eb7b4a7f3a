//! TOML configuration.
//!
//! ```toml
//! [chart]
//! track_height = 30
//! bar_height_ratio = 0.6
//! label_max_width = 300
//!
//! [log_viewer]
//! host = "luci-milo.appspot.com"
//! root = "/"
//! master = "chromium.linux"
//! ```
//!
//! Every key is optional.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::chart::ChartOptions;
use crate::links::LogViewerConfig;
use crate::{TimelineError, TimelineResult};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    pub chart: ChartOptions,
    pub log_viewer: LogViewerConfig,
}

pub fn parse_config(s: &str) -> TimelineResult<TimelineConfig> {
    toml::from_str(s).map_err(|e| TimelineError::Message(e.to_string()))
}

pub fn load_config(path: &Path) -> TimelineResult<TimelineConfig> {
    let s = std::fs::read_to_string(path).map_err(|e| {
        TimelineError::Message(format!("failed to read config {}: {e}", path.display()))
    })?;
    parse_config(&s)
}

/// Load `path` if given, else the defaults.
pub fn load_config_or_default(path: Option<&Path>) -> TimelineResult<TimelineConfig> {
    match path {
        Some(p) => load_config(p),
        None => Ok(TimelineConfig::default()),
    }
}
