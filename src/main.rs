//! CLI entry point for the GSS dashboard pipeline.
//!
//! Loads the survey extract, cleans it, computes the aggregate views and
//! either writes them out for the page renderer or logs the summary.

use anyhow::Result;
use clap::{Parser, Subcommand};
use gss_dashboard::{
    dashboard::{Dashboard, Views},
    load::{DEFAULT_SOURCE, load},
    output::{print_json, write_all},
    survey::clean,
};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "gss_dashboard")]
#[command(about = "Builds the General Social Survey wage-gap dashboard data", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full pipeline and write every table plus dashboard.json
    Build {
        /// Path to file or URL of the GSS CSV extract
        #[arg(value_name = "FILE_OR_URL", default_value = DEFAULT_SOURCE)]
        source: String,

        /// Directory to write the CSV tables and dashboard.json to
        #[arg(short, long, default_value = "dashboard")]
        output_dir: PathBuf,
    },
    /// Log the per-sex summary table
    Summary {
        /// Path to file or URL of the GSS CSV extract
        #[arg(value_name = "FILE_OR_URL", default_value = DEFAULT_SOURCE)]
        source: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path =
        std::env::var("LOG_FILE_PATH").unwrap_or_else(|_| "logs/gss_dashboard.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("gss_dashboard.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Build { source, output_dir } => {
            let raw = load(&source).await?;
            let cleaned = clean(&raw)?;
            let views = Views::compute(&cleaned)?;
            let dashboard = Dashboard::from_views(&views);

            write_all(&output_dir, &cleaned, &views, &dashboard)?;
            info!(output_dir = %output_dir.display(), "Dashboard data ready");
        }
        Commands::Summary { source } => {
            let raw = load(&source).await?;
            let cleaned = clean(&raw)?;
            let summary = gss_dashboard::analyzers::summarize_by_sex(&cleaned)?;

            print_json(&summary)?;
        }
    }

    Ok(())
}
