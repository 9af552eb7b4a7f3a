#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, fmt::format::FmtSpan};

use build_timeline::link_cmd::LinkOverrides;
use build_timeline::{gantt_cmd, link_cmd, reconcile_cmd};

#[derive(Parser, Debug)]
#[command(name = "build-timeline")]
#[command(about = "Step timelines and log-viewer links for buildbot builds", long_about = None)]
struct Cli {
    /// Enable verbose logging (or set BUILD_TIMELINE_LOG)
    #[arg(long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Merge trigger/collect step pairs and print the resulting timeline
    Reconcile {
        /// Step document (.json array or build object, or .jsonl)
        #[arg(long)]
        steps: std::path::PathBuf,
        /// Write machine-readable JSON report to this file
        #[arg(long)]
        json: Option<std::path::PathBuf>,
        /// Write the reconciled steps as CSV to this file
        #[arg(long)]
        csv: Option<std::path::PathBuf>,
    },

    /// Render a Gantt chart of the reconciled steps as static HTML
    Gantt {
        /// Step document (.json array or build object, or .jsonl)
        #[arg(long)]
        steps: std::path::PathBuf,
        /// Output HTML file
        #[arg(long)]
        out: std::path::PathBuf,
        /// TOML config with a [chart] section
        #[arg(long)]
        config: Option<std::path::PathBuf>,
    },

    /// Print the log-viewer link for a builder or build page path
    Link {
        /// Page path, e.g. /p/chromium.linux/builders/Linux%20Tests/builds/42
        #[arg(long)]
        path: String,
        /// Path prefix the dashboard is served under
        #[arg(long)]
        root: Option<String>,
        /// Master used when the path does not name one
        #[arg(long)]
        master: Option<String>,
        /// Log-viewer host
        #[arg(long)]
        host: Option<String>,
        /// TOML config with a [log_viewer] section
        #[arg(long)]
        config: Option<std::path::PathBuf>,
    },
}

fn init_tracing(verbose: bool) {
    let env = std::env::var("BUILD_TIMELINE_LOG").unwrap_or_else(|_| {
        if verbose { "build_timeline=debug".to_string() } else { "build_timeline=info".to_string() }
    });
    let _ = tracing_subscriber::fmt()
        .with_span_events(FmtSpan::ACTIVE)
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_env_filter(EnvFilter::new(env))
        .try_init();
}

fn main() {
    color_eyre::install().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Reconcile { steps, json, csv } => reconcile_cmd::run(steps, json, csv),
        Commands::Gantt { steps, out, config } => gantt_cmd::run(steps, out, config),
        Commands::Link { path, root, master, host, config } => {
            link_cmd::run(path, LinkOverrides { root, master, host }, config)
        }
    };

    if let Err(e) = result {
        eprintln!("{:#}", e);
        std::process::exit(1);
    }
}
