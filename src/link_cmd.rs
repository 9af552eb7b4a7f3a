//! CLI command handler for `link`.

use std::path::PathBuf;

use tracing::info;

use crate::TimelineResult;
use crate::config::load_config_or_default;
use crate::links::{LogViewerConfig, inject_log_viewer_link};

/// Flags that override the `[log_viewer]` config section.
#[derive(Debug, Clone, Default)]
pub struct LinkOverrides {
    pub root: Option<String>,
    pub master: Option<String>,
    pub host: Option<String>,
}

impl LinkOverrides {
    pub fn apply(self, mut cfg: LogViewerConfig) -> LogViewerConfig {
        if let Some(root) = self.root {
            cfg.root = root;
        }
        if let Some(master) = self.master {
            cfg.master = Some(master);
        }
        if let Some(host) = self.host {
            cfg.host = host;
        }
        cfg
    }
}

/// Resolve the log-viewer link for `page_path`.
///
/// Returns the URL and the panel markup, or `None` if the page is not a
/// builder or build page.
pub fn resolve(
    page_path: &str,
    overrides: LinkOverrides,
    config: Option<PathBuf>,
) -> TimelineResult<Option<(String, String)>> {
    let cfg = overrides.apply(load_config_or_default(config.as_deref())?.log_viewer);
    let mut header = String::new();
    Ok(inject_log_viewer_link(Some(&mut header), &cfg, page_path).map(|url| (url, header)))
}

/// Run the `link` command: print the URL and panel markup for `page_path`.
pub fn run(page_path: String, overrides: LinkOverrides, config: Option<PathBuf>) -> TimelineResult<()> {
    match resolve(&page_path, overrides, config)? {
        Some((url, markup)) => {
            println!("{}", url);
            println!("{}", markup);
        }
        None => info!(path = %page_path, "no log-viewer link for this page"),
    }
    Ok(())
}
