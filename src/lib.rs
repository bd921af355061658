#![forbid(unsafe_code)]
//! # Manifesto Analysis
//!
//! Computes comparative linguistic and sentiment metrics across a set of
//! political manifestos and exports a per-document report for a downstream
//! dashboard.
//!
//! Two analyzers carry the actual logic:
//! - [`analyze_sentiment`] scores a text against a SentiWS-format polarity
//!   [`Lexicon`],
//! - [`TextMetricsAnalyzer`] computes readability, vocabulary richness,
//!   keywords, policy focus, sentence statistics and rhetorical markers.
//!
//! Everything else is plumbing: extraction of PDF/TXT/DOCX files into
//! lower-cased text, per-corpus orchestration through an
//! [`AnalysisContext`], and JSON/CSV export.
//!
//! ## Example
//! ```
//! use manifesto_analysis::{analyze_corpus, AnalysisContext, Document, Lexicon};
//!
//! let lexicon = Lexicon::from_weights([("gut".to_string(), 0.8)]);
//! let ctx = AnalysisContext::new(lexicon);
//! let docs = vec![Document::new("spd", "alles wird wieder gut")];
//! let report = analyze_corpus(&ctx, &docs);
//! assert_eq!(report.documents["spd"].sentiment_analysis.sentiment_words_count, 1);
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::prelude::*;
use clap::ValueEnum;
use log::warn;
use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;
use walkdir::WalkDir;

mod extract;
mod metrics;
mod sentiment;

pub use extract::{ExtractError, document_id, extract_document};
pub use metrics::{
    ComparativeMetrics, POLICY_TOPICS, ReadabilityMetrics, STOP_WORDS, SentenceStats,
    TextMetricsAnalyzer, TextReport, VocabularyRichness, count_syllables,
};
pub use sentiment::{Lexicon, LexiconError, SentimentReport, analyze_sentiment};

use metrics::count_occurrences;

/// A manifesto: a short identifier (usually the file stem) and its
/// extracted, lower-cased text. Immutable for the duration of a run.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: String,
    pub text: String,
}

impl Document {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

/// Everything a corpus run needs, built once up front and passed by
/// reference. The lexicon and the metrics configuration are read-only, so
/// the context can be shared across documents.
#[derive(Debug, Default)]
pub struct AnalysisContext {
    pub lexicon: Lexicon,
    pub metrics: TextMetricsAnalyzer,
}

impl AnalysisContext {
    pub fn new(lexicon: Lexicon) -> Self {
        Self {
            lexicon,
            metrics: TextMetricsAnalyzer::new(),
        }
    }

    pub fn with_metrics(lexicon: Lexicon, metrics: TextMetricsAnalyzer) -> Self {
        Self { lexicon, metrics }
    }
}

/// Full per-document report: the two analyzer mappings plus the
/// corpus-level extras (word count and cross-mention counts).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentReport {
    /// Unfiltered word count of the document.
    pub text_length: usize,
    pub sentiment_analysis: SentimentReport,
    pub text_analysis: TextReport,
    /// How often each corpus document's identifier occurs in this text
    /// (non-overlapping substring counts, self-mentions included).
    pub mentioned_parties: BTreeMap<String, usize>,
}

/// Per-document reports keyed by identifier; the sorted map keeps export
/// order stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CorpusReport {
    pub documents: BTreeMap<String, DocumentReport>,
}

/// Analyze one document. `corpus_ids` are the identifiers of all documents
/// in the run, used for the cross-mention counts; pass the document's own
/// id alone when analyzing it in isolation.
pub fn analyze_document(
    ctx: &AnalysisContext,
    doc: &Document,
    corpus_ids: &[String],
) -> DocumentReport {
    DocumentReport {
        text_length: doc.text.split_whitespace().count(),
        sentiment_analysis: analyze_sentiment(&ctx.lexicon, &doc.text),
        text_analysis: ctx.metrics.analyze(&doc.text),
        mentioned_parties: corpus_ids
            .iter()
            .map(|id| (id.clone(), count_occurrences(&doc.text, id)))
            .collect(),
    }
}

/// Analyze a corpus. Documents are independent, so the pass runs
/// data-parallel; output is identical to a sequential pass.
pub fn analyze_corpus(ctx: &AnalysisContext, documents: &[Document]) -> CorpusReport {
    let ids: Vec<String> = documents.iter().map(|doc| doc.id.clone()).collect();
    let documents = documents
        .par_iter()
        .map(|doc| (doc.id.clone(), analyze_document(ctx, doc, &ids)))
        .collect();
    CorpusReport { documents }
}

/// Outcome of one filesystem run: the aggregated report plus the files
/// that could not be extracted.
#[derive(Debug)]
pub struct RunReport {
    pub report: CorpusReport,
    pub failed_files: Vec<(PathBuf, String)>,
}

/// Collect analyzable files (`.pdf`, `.txt`, `.docx`) under `path`, sorted
/// for a stable processing order. A single file path is returned as-is.
pub fn collect_files(path: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = if path.is_file() {
        vec![path.to_path_buf()]
    } else {
        WalkDir::new(path)
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|file| {
                matches!(
                    file.extension()
                        .and_then(|extension| extension.to_str())
                        .map(str::to_lowercase)
                        .as_deref(),
                    Some("pdf" | "txt" | "docx")
                )
            })
            .collect()
    };
    files.sort();
    files
}

/// Extract and analyze every file under `path`. Extraction failures skip
/// the file and are reported; they never abort the run.
pub fn analyze_path(path: &Path, ctx: &AnalysisContext) -> RunReport {
    let mut documents = Vec::new();
    let mut failed_files = Vec::new();
    for file in collect_files(path) {
        match extract_document(&file) {
            Ok(text) => documents.push(Document::new(document_id(&file), text)),
            Err(error) => {
                warn!("skipping {}: {error}", file.display());
                failed_files.push((file, error.to_string()));
            }
        }
    }
    RunReport {
        report: analyze_corpus(ctx, &documents),
        failed_files,
    }
}

/// List files that could not be processed on stderr.
pub fn print_failed_files(failed: &[(PathBuf, String)]) {
    eprintln!("The following files could not be processed:");
    for (path, reason) in failed {
        eprintln!("  {}: {reason}", path.display());
    }
}

/// Output format for [`export_report`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// Full nested report, the shape the dashboard consumes.
    Json,
    /// One summary row per document.
    Csv,
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write summary: {0}")]
    Csv(#[from] csv::Error),
}

/// Write the corpus report into `dir` under a timestamped file name and
/// return the path.
pub fn export_report(
    report: &CorpusReport,
    dir: &Path,
    format: ExportFormat,
) -> Result<PathBuf, ExportError> {
    let local: DateTime<Local> = Local::now();
    let stamp = local.format("%Y%m%d_%H%M%S");
    let path = match format {
        ExportFormat::Json => {
            let path = dir.join(format!("{stamp}_manifesto_report.json"));
            fs::write(&path, serde_json::to_string_pretty(report)?)?;
            path
        }
        ExportFormat::Csv => {
            let path = dir.join(format!("{stamp}_manifesto_summary.csv"));
            write_summary_csv(report, &path)?;
            path
        }
    };
    Ok(path)
}

fn write_summary_csv(report: &CorpusReport, path: &Path) -> Result<(), ExportError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "document",
        "text_length",
        "average_sentiment",
        "sentiment_coverage",
        "avg_sentence_length",
        "type_token_ratio",
        "total_sentences",
    ])?;
    for (id, doc) in &report.documents {
        writer.write_record([
            id.clone(),
            doc.text_length.to_string(),
            doc.sentiment_analysis.average_sentiment.to_string(),
            doc.sentiment_analysis.sentiment_coverage.to_string(),
            doc.text_analysis
                .readability_metrics
                .avg_sentence_length
                .to_string(),
            doc.text_analysis
                .vocabulary_richness
                .type_token_ratio
                .to_string(),
            doc.text_analysis.sentence_stats.total_sentences.to_string(),
        ])?;
    }
    writer.flush().map_err(ExportError::Io)?;
    Ok(())
}
