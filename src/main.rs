#![forbid(unsafe_code)]
//! # Manifesto Analysis CLI
//!
//! Command-line interface for the `manifesto_analysis` crate. Feeds a set
//! of manifesto files (`.pdf`, `.txt`, `.docx`) through the sentiment and
//! text-metrics analyzers and writes one combined report.
//!
//! ## Example
//! ```bash
//! cargo run --release -- wahlprogramme25 \
//!     --lexicon SentiWS_v2.0_Positive.txt \
//!     --lexicon SentiWS_v2.0_Negative.txt \
//!     --export-format json --output out
//! ```
//!
//! See `--help` for all available options.

use clap::Parser;
use log::{error, info};
use std::path::PathBuf;
use std::process;

use manifesto_analysis::{
    AnalysisContext, ExportFormat, Lexicon, TextMetricsAnalyzer, analyze_path, export_report,
    print_failed_files,
};

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Manifesto file or directory to analyze (.pdf, .txt, .docx)
    path: PathBuf,

    /// Sentiment lexicon in SentiWS format (repeat for positive and negative lists)
    #[arg(long = "lexicon", required = true)]
    lexicon: Vec<PathBuf>,

    /// Directory the report is written to
    #[arg(long, default_value = ".")]
    output: PathBuf,

    /// Output format for the report (json, csv)
    #[arg(long, default_value = "json")]
    export_format: ExportFormat,

    /// Number of keywords reported per document
    #[arg(long, default_value_t = 20)]
    top_keywords: usize,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    // A broken lexicon aborts the whole run; there is no partial loading.
    let lexicon = match Lexicon::load(&cli.lexicon) {
        Ok(lexicon) => lexicon,
        Err(e) => {
            error!("Error: {}", e);
            process::exit(1);
        }
    };
    info!("loaded {} lexicon entries", lexicon.len());

    let ctx = AnalysisContext::with_metrics(
        lexicon,
        TextMetricsAnalyzer::with_top_keywords(cli.top_keywords),
    );
    let run = analyze_path(&cli.path, &ctx);

    if run.report.documents.is_empty() && run.failed_files.is_empty() {
        error!("Error: no analyzable documents under {}", cli.path.display());
        process::exit(1);
    }
    info!("analyzed {} documents", run.report.documents.len());

    match export_report(&run.report, &cli.output, cli.export_format) {
        Ok(path) => println!("Report written to {}", path.display()),
        Err(e) => {
            error!("Error: {}", e);
            process::exit(1);
        }
    }

    if !run.failed_files.is_empty() {
        print_failed_files(&run.failed_files);
        process::exit(1);
    }
}
