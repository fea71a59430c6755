//! CLI for cvbench.
//!
//! This crate provides the `cvbench` command: `serve` runs the benchmark API
//! and `status` reports what the API would serve from a data directory.

#![warn(missing_docs, rust_2018_idioms)]
#![deny(unsafe_code)]

use benchmark_api::{telemetry, AppConfig, LogFormat};
use clap::{Parser, Subcommand};
use cvbench_records::{LoadReport, RecordLoader};
use std::fmt::Write;
use std::path::{Path, PathBuf};

/// cvbench CLI.
#[derive(Parser, Debug)]
#[command(name = "cvbench")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the benchmark API server.
    ///
    /// Settings come from `CVBENCH_*` environment variables (and `.env`);
    /// flags given here take precedence.
    Serve {
        /// Listen address.
        #[arg(long)]
        host: Option<String>,

        /// Listen port.
        #[arg(short, long)]
        port: Option<u16>,

        /// Directory holding the benchmark JSON files.
        #[arg(short, long)]
        data_dir: Option<PathBuf>,

        /// Built frontend bundle directory.
        #[arg(long)]
        static_dir: Option<PathBuf>,

        /// Reserved fallback filename.
        #[arg(long, conflicts_with = "no_fallback")]
        fallback_file: Option<String>,

        /// Never serve a fallback file.
        #[arg(long)]
        no_fallback: bool,

        /// Serve generated placeholder records when no data is found.
        #[arg(long)]
        mock_data: bool,

        /// Number of placeholder records.
        #[arg(long)]
        mock_count: Option<usize>,

        /// Seed for placeholder records.
        #[arg(long)]
        mock_seed: Option<u64>,

        /// Emit logs as JSON.
        #[arg(long)]
        log_json: bool,
    },

    /// Show which records the API would serve from a data directory.
    Status {
        /// Directory to inspect.
        #[arg(short, long, default_value = "data")]
        data_dir: PathBuf,

        /// Reserved fallback filename.
        #[arg(long, default_value = cvbench_records::DEFAULT_FALLBACK_FILE, conflicts_with = "no_fallback")]
        fallback_file: String,

        /// Ignore the fallback file.
        #[arg(long)]
        no_fallback: bool,

        /// Print the selected records as JSON instead of a summary.
        #[arg(long)]
        json: bool,
    },
}

/// Run the CLI with the process arguments.
pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            port,
            data_dir,
            static_dir,
            fallback_file,
            no_fallback,
            mock_data,
            mock_count,
            mock_seed,
            log_json,
        } => {
            dotenvy::dotenv().ok();
            let mut config = AppConfig::load()?;

            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(data_dir) = data_dir {
                config.data_dir = data_dir;
            }
            if let Some(static_dir) = static_dir {
                config.static_dir = static_dir;
            }
            if let Some(fallback_file) = fallback_file {
                config.fallback_file = fallback_file;
            }
            if no_fallback {
                config.fallback_file.clear();
            }
            if mock_data {
                config.mock_data.enabled = true;
            }
            if let Some(count) = mock_count {
                config.mock_data.count = count;
            }
            if mock_seed.is_some() {
                config.mock_data.seed = mock_seed;
            }
            if log_json {
                config.log_format = LogFormat::Json;
            }

            telemetry::init_tracing(config.log_format);

            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(benchmark_api::serve(config))
        }
        Commands::Status {
            data_dir,
            fallback_file,
            no_fallback,
            json,
        } => {
            let loader = if no_fallback {
                RecordLoader::without_fallback()
            } else {
                RecordLoader::new(Some(fallback_file))
            };
            let report = loader.load(&data_dir);

            if json {
                println!("{}", serde_json::to_string_pretty(report.outcome.records())?);
            } else {
                print!("{}", render_status(&data_dir, &loader, &report));
            }

            Ok(())
        }
    }
}

/// Human-readable summary of a load.
pub fn render_status(data_dir: &Path, loader: &RecordLoader, report: &LoadReport) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "cvbench {}", env!("CARGO_PKG_VERSION"));
    let _ = writeln!(output, "Data directory: {}", data_dir.display());
    let _ = writeln!(
        output,
        "Fallback file:  {}",
        loader.fallback_file().unwrap_or("(disabled)")
    );
    let _ = writeln!(
        output,
        "User files:     {}",
        if report.user_files_found { "found" } else { "none" }
    );
    let _ = writeln!(output, "Source:         {}", report.outcome.source_name());
    let _ = writeln!(output, "Records:        {}", report.outcome.records().len());

    if !report.skipped.is_empty() {
        let _ = writeln!(output, "\nSkipped files:");
        for skipped in &report.skipped {
            let _ = writeln!(output, "  - {}: {}", skipped.file, skipped.reason);
        }
    }

    output
}
