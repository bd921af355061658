//! Polarity lexicon and sentiment scoring.
//!
//! The lexicon is loaded once at startup from one or more SentiWS-format
//! files (positive and negative lists) and is read-only afterwards, so it
//! can be shared freely across documents.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;

/// Errors raised while building the polarity lexicon. Any malformed entry
/// aborts the load; a partially loaded lexicon is never returned.
#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("failed to read lexicon {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed lexicon entry in {path} at line {line}: {reason}")]
    Parse {
        path: PathBuf,
        line: usize,
        reason: String,
    },
}

/// Word-form to signed polarity weight mapping.
///
/// Lines in a lexicon source are tab-separated: a word form (optionally
/// suffixed with `|POS`, the tag is discarded), a numeric weight, and an
/// optional comma-separated list of inflected forms that inherit the base
/// form's weight. Blank lines and lines starting with `#` are skipped.
/// When the same form occurs in more than one source, the last loaded
/// weight wins.
///
/// # Example
/// ```no_run
/// use manifesto_analysis::Lexicon;
///
/// let lexicon = Lexicon::load(&["SentiWS_Positive.txt", "SentiWS_Negative.txt"]).unwrap();
/// assert!(lexicon.score("nonexistentword").is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    weights: HashMap<String, f64>,
}

impl Lexicon {
    /// Load a lexicon from an ordered sequence of SentiWS-format files.
    pub fn load<P: AsRef<Path>>(sources: &[P]) -> Result<Self, LexiconError> {
        let mut lexicon = Lexicon::default();
        for source in sources {
            lexicon.load_source(source.as_ref())?;
        }
        Ok(lexicon)
    }

    /// Build a lexicon directly from word/weight pairs.
    pub fn from_weights<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, f64)>,
    {
        Self {
            weights: entries
                .into_iter()
                .map(|(word, weight)| (word.to_lowercase(), weight))
                .collect(),
        }
    }

    fn load_source(&mut self, path: &Path) -> Result<(), LexiconError> {
        let file = File::open(path).map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        for (index, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|source| LexiconError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            self.insert_entry(line, path, index + 1)?;
        }
        Ok(())
    }

    fn insert_entry(&mut self, line: &str, path: &Path, line_no: usize) -> Result<(), LexiconError> {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < 2 {
            return Err(LexiconError::Parse {
                path: path.to_path_buf(),
                line: line_no,
                reason: "expected at least a word and a weight field".into(),
            });
        }

        // "gut|ADJX" -> "gut"; the part-of-speech tag is not used.
        let form = fields[0].split('|').next().unwrap_or(fields[0]).to_lowercase();
        let weight: f64 = fields[1].trim().parse().map_err(|_| LexiconError::Parse {
            path: path.to_path_buf(),
            line: line_no,
            reason: format!("weight `{}` is not a number", fields[1]),
        })?;
        self.weights.insert(form, weight);

        if let Some(inflections) = fields.get(2) {
            for inflection in inflections.split(',') {
                let inflection = inflection.trim();
                if !inflection.is_empty() {
                    self.weights.insert(inflection.to_lowercase(), weight);
                }
            }
        }
        Ok(())
    }

    /// Exact, case-insensitive lookup. No stemming, no fuzzy matching: a
    /// token with trailing punctuation will not match.
    pub fn score(&self, word: &str) -> Option<f64> {
        self.weights.get(&word.to_lowercase()).copied()
    }

    /// Number of word forms in the lexicon.
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

/// Aggregate sentiment statistics for one document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentimentReport {
    pub average_sentiment: f64,
    pub sentiment_words_count: usize,
    pub total_words: usize,
    pub sentiment_coverage: f64,
    pub max_positive_sentiment: f64,
    pub max_negative_sentiment: f64,
}

/// Score a text against the lexicon.
///
/// Tokens are whitespace-delimited with no punctuation stripping; every
/// ratio falls back to 0 when its denominator is 0, so any input string,
/// including the empty one, yields a well-defined report.
pub fn analyze_sentiment(lexicon: &Lexicon, text: &str) -> SentimentReport {
    let lowered = text.to_lowercase();
    let words: Vec<&str> = lowered.split_whitespace().collect();
    let matched: Vec<f64> = words.iter().filter_map(|word| lexicon.score(word)).collect();

    let average_sentiment = if matched.is_empty() {
        0.0
    } else {
        matched.iter().sum::<f64>() / matched.len() as f64
    };
    let max_positive_sentiment = matched
        .iter()
        .copied()
        .filter(|score| *score > 0.0)
        .fold(0.0, f64::max);
    let max_negative_sentiment = matched
        .iter()
        .copied()
        .filter(|score| *score < 0.0)
        .fold(0.0, f64::min);
    let sentiment_coverage = if words.is_empty() {
        0.0
    } else {
        matched.len() as f64 / words.len() as f64
    };

    SentimentReport {
        average_sentiment,
        sentiment_words_count: matched.len(),
        total_words: words.len(),
        sentiment_coverage,
        max_positive_sentiment,
        max_negative_sentiment,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexicon() -> Lexicon {
        Lexicon::from_weights([
            ("gut".to_string(), 0.8),
            ("schlecht".to_string(), -0.6),
            ("super".to_string(), 0.5),
        ])
    }

    #[test]
    fn score_is_case_insensitive_and_exact() {
        let lex = lexicon();
        assert_eq!(lex.score("gut"), Some(0.8));
        assert_eq!(lex.score("GUT"), Some(0.8));
        // trailing punctuation fails the exact match
        assert_eq!(lex.score("gut."), None);
        assert_eq!(lex.score("gute"), None);
    }

    #[test]
    fn mixed_text_aggregates() {
        let report = analyze_sentiment(&lexicon(), "das ist gut und schlecht");
        assert_eq!(report.total_words, 5);
        assert_eq!(report.sentiment_words_count, 2);
        assert!((report.average_sentiment - 0.1).abs() < 1e-9);
        assert_eq!(report.max_positive_sentiment, 0.8);
        assert_eq!(report.max_negative_sentiment, -0.6);
        assert!((report.sentiment_coverage - 0.4).abs() < 1e-9);
    }

    #[test]
    fn no_matches_yield_zero_defaults() {
        let report = analyze_sentiment(&lexicon(), "kein treffer hier");
        assert_eq!(report.sentiment_words_count, 0);
        assert_eq!(report.average_sentiment, 0.0);
        assert_eq!(report.max_positive_sentiment, 0.0);
        assert_eq!(report.max_negative_sentiment, 0.0);
        assert_eq!(report.sentiment_coverage, 0.0);
        assert_eq!(report.total_words, 3);
    }

    #[test]
    fn single_sided_maxima() {
        let negative_only = analyze_sentiment(&lexicon(), "schlecht schlecht");
        assert_eq!(negative_only.max_positive_sentiment, 0.0);
        assert_eq!(negative_only.max_negative_sentiment, -0.6);

        let positive_only = analyze_sentiment(&lexicon(), "gut super");
        assert_eq!(positive_only.max_positive_sentiment, 0.8);
        assert_eq!(positive_only.max_negative_sentiment, 0.0);
    }

    #[test]
    fn empty_text_is_total() {
        let report = analyze_sentiment(&lexicon(), "");
        assert_eq!(report.total_words, 0);
        assert_eq!(report.sentiment_coverage, 0.0);
        assert_eq!(report.average_sentiment, 0.0);
    }

    #[test]
    fn coverage_stays_in_unit_interval() {
        for text in ["gut", "gut gut gut", "gut und schlecht", "nur fremde worte"] {
            let report = analyze_sentiment(&lexicon(), text);
            assert!(report.sentiment_coverage >= 0.0);
            assert!(report.sentiment_coverage <= 1.0);
        }
    }
}
