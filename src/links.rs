//! Log-viewer links for buildbot builder and build pages.
//!
//! Recognised page paths, relative to the dashboard root:
//!
//! ```text
//! [/i/{master} | /p/{master}]/builders/{builder}
//! [/i/{master} | /p/{master}]/builders/{builder}/builds/{buildnum}
//! ```
//!
//! A match is rewritten to `buildbot/{master}/{builder}[/{buildnum}]` on the
//! log-viewer host. Anything else is left alone.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::chart::html::html_escape;

pub const DEFAULT_LOG_VIEWER_HOST: &str = "luci-milo.appspot.com";

/// Where links point and how page paths are interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogViewerConfig {
    /// Log-viewer host, without scheme.
    pub host: String,
    /// Path prefix the dashboard is served under.
    pub root: String,
    /// Master used when the page path does not name one.
    pub master: Option<String>,
}

impl Default for LogViewerConfig {
    fn default() -> Self {
        LogViewerConfig {
            host: DEFAULT_LOG_VIEWER_HOST.to_string(),
            root: "/".to_string(),
            master: None,
        }
    }
}

/// A recognised dashboard page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuilderPage {
    Builder {
        master: Option<String>,
        builder: String,
    },
    Build {
        master: Option<String>,
        builder: String,
        build_number: u64,
    },
}

impl BuilderPage {
    /// Master named in the page path, if any.
    pub fn master(&self) -> Option<&str> {
        match self {
            BuilderPage::Builder { master, .. } | BuilderPage::Build { master, .. } => {
                master.as_deref()
            }
        }
    }

    pub fn builder(&self) -> &str {
        match self {
            BuilderPage::Builder { builder, .. } | BuilderPage::Build { builder, .. } => builder,
        }
    }
}

/// Match `path` against the builder/build page patterns.
///
/// `root` is stripped first; a path outside `root` never matches. A trailing
/// slash is tolerated, and empty segments are not.
pub fn parse_page_path(root: &str, path: &str) -> Option<BuilderPage> {
    let root = root.trim_end_matches('/');
    let rest = path.strip_prefix(root)?;
    let rest = rest.strip_prefix('/')?;
    let rest = rest.strip_suffix('/').unwrap_or(rest);

    let segments: Vec<&str> = rest.split('/').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return None;
    }

    let (master, segments) = match segments.as_slice() {
        ["i" | "p", master, tail @ ..] => (Some(master.to_string()), tail),
        all => (None, all),
    };

    match segments {
        ["builders", builder] => Some(BuilderPage::Builder {
            master,
            builder: builder.to_string(),
        }),
        ["builders", builder, "builds", number] => {
            let build_number = number.parse().ok()?;
            Some(BuilderPage::Build {
                master,
                builder: builder.to_string(),
                build_number,
            })
        }
        _ => None,
    }
}

/// Path on the log-viewer host for `page`, or `None` without a known master.
///
/// A master named in the page path takes precedence over `default_master`.
pub fn rewrite_path(page: &BuilderPage, default_master: Option<&str>) -> Option<String> {
    let master = page.master().or(default_master)?;
    Some(match page {
        BuilderPage::Builder { builder, .. } => format!("buildbot/{master}/{builder}"),
        BuilderPage::Build {
            builder,
            build_number,
            ..
        } => format!("buildbot/{master}/{builder}/{build_number}"),
    })
}

fn viewer_url(host: &str, rewritten: &str) -> String {
    format!("https://{}/{}", host, rewritten)
}

/// Full log-viewer URL for the page at `path`, if it is a builder or build page.
pub fn log_viewer_url(config: &LogViewerConfig, path: &str) -> Option<String> {
    let page = parse_page_path(&config.root, path)?;
    let rewritten = rewrite_path(&page, config.master.as_deref())?;
    Some(viewer_url(&config.host, &rewritten))
}

/// Fixed panel markup linking to `url`.
pub fn render_link_panel(url: &str) -> String {
    let url = html_escape(url);
    format!(
        "<div class=\"log-viewer-panel\">\
<a href=\"{url}\" target=\"_blank\" rel=\"noopener\">View this page in the log viewer</a>\
</div>"
    )
}

/// The page element the panel is injected into.
pub trait HeaderSlot {
    fn inject(&mut self, markup: &str);
}

impl HeaderSlot for String {
    fn inject(&mut self, markup: &str) {
        self.push_str(markup);
    }
}

/// Inject a log-viewer panel into `header` if `path` is a builder or build page.
///
/// Returns the URL linked to. No header, no match, or no known master: no-op.
pub fn inject_log_viewer_link<H: HeaderSlot + ?Sized>(
    header: Option<&mut H>,
    config: &LogViewerConfig,
    path: &str,
) -> Option<String> {
    let Some(header) = header else {
        debug!("no header element; skipping log-viewer link");
        return None;
    };
    let Some(page) = parse_page_path(&config.root, path) else {
        debug!(path, "page is not a builder or build page");
        return None;
    };
    let Some(rewritten) = rewrite_path(&page, config.master.as_deref()) else {
        debug!(builder = page.builder(), "no master known; skipping log-viewer link");
        return None;
    };
    let url = viewer_url(&config.host, &rewritten);
    header.inject(&render_link_panel(&url));
    Some(url)
}
