use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use wifiloc::config::Config;
use wifiloc::output::terminal;
use wifiloc::pipeline::analyze::{self, AnalyzeOptions};
use wifiloc::plot;
use wifiloc::scan;
use wifiloc::similarity::{Cosine, SimilarityMatrix};

/// wifiloc: wifi fingerprint analysis for labeled locations.
///
/// Parses wifi scan logs into a location × access point signal matrix,
/// charts the raw signal strengths, and measures how distinguishable the
/// locations are by cosine similarity.
#[derive(Parser)]
#[command(name = "wifiloc", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a scan file and summarize the feature matrix
    Inspect {
        /// Scan file (defaults to WIFILOC_SCAN_FILE)
        file: Option<PathBuf>,
    },

    /// Render the per-location signal strength histogram
    Histogram {
        /// Scan file (defaults to WIFILOC_SCAN_FILE)
        file: Option<PathBuf>,

        /// Output image path (.png or .svg)
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Compute cosine similarity between locations and render the heatmap
    Similarity {
        /// Scan file (defaults to WIFILOC_SCAN_FILE)
        file: Option<PathBuf>,

        /// Output image path (.png or .svg)
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Number of most similar pairs to list (default: 10)
        #[arg(long, default_value = "10")]
        top: usize,
    },

    /// Run the full pipeline: histogram, imputation, similarity, heatmap
    Analyze {
        /// Scan file (defaults to WIFILOC_SCAN_FILE)
        file: Option<PathBuf>,

        /// Also write a markdown report to this path
        #[arg(long)]
        report: Option<PathBuf>,

        /// Also write a JSON export to this path
        #[arg(long)]
        json: Option<PathBuf>,

        /// Number of most similar pairs to list (default: 10)
        #[arg(long, default_value = "10")]
        top: usize,
    },

    /// Show configuration and rendered outputs
    Status,
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("wifiloc=info")),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Inspect { file } => {
            let path = config.scan_file_or(file.as_deref());
            Config::require_scan_file(&path)?;
            let matrix = scan::parse_scan_file(&path)?;
            terminal::display_matrix_summary(&matrix);
        }

        Commands::Histogram { file, output } => {
            let path = config.scan_file_or(file.as_deref());
            Config::require_scan_file(&path)?;
            let matrix = scan::parse_scan_file(&path)?;

            let out = output.unwrap_or_else(|| config.chart_path("signal_histogram"));
            plot::plot_signal_histogram(&matrix, config.subplots_per_row, &out)?;
            println!("Histogram saved to: {}", out.display());
        }

        Commands::Similarity { file, output, top } => {
            let path = config.scan_file_or(file.as_deref());
            Config::require_scan_file(&path)?;
            let raw = scan::parse_scan_file(&path)?;

            let (dense, filled) = analyze::impute(&raw, config.no_signal_dbm);
            info!(filled, fill_dbm = config.no_signal_dbm, "Imputed missing readings");

            let similarity = SimilarityMatrix::compute(&dense, &Cosine)?;
            terminal::display_similarity_pairs(&similarity, &similarity.ranked_pairs(top));

            let out = output.unwrap_or_else(|| config.chart_path("cosine_similarity"));
            plot::plot_similarity_heatmap(&similarity, &out)?;
            println!("Heatmap saved to: {}", out.display());
        }

        Commands::Analyze {
            file,
            report,
            json,
            top,
        } => {
            let options = AnalyzeOptions {
                scan_file: file,
                report_path: report,
                json_path: json,
                top_pairs: top,
                ..AnalyzeOptions::default()
            };

            println!("Analyzing wifi scans...");
            let summary = analyze::run(&config, &options)?;

            terminal::display_matrix_summary(&summary.raw);
            println!(
                "Filled {} missing readings with {} dBm",
                summary.imputed_cells, config.no_signal_dbm
            );
            terminal::display_similarity_pairs(
                &summary.similarity,
                &summary.similarity.ranked_pairs(top),
            );
            terminal::display_nearest_neighbors(&summary.similarity);

            println!("{}", "Outputs:".bold());
            println!("  Histogram: {}", summary.histogram_path.display());
            println!("  Heatmap:   {}", summary.heatmap_path.display());
            if let Some(path) = &summary.report_path {
                println!("  Report:    {}", path.display());
            }
            if let Some(path) = &summary.json_path {
                println!("  JSON:      {}", path.display());
            }
        }

        Commands::Status => {
            wifiloc::status::show(&config)?;
        }
    }

    Ok(())
}
