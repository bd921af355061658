//! Linguistic metrics: readability, vocabulary richness, keywords, policy
//! focus, sentence structure and rhetorical markers.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;

/// Function words excluded from vocabulary and keyword statistics.
pub const STOP_WORDS: [&str; 20] = [
    "der", "die", "das", "den", "dem", "und", "in", "von", "mit", "zu", "für", "auf", "ist",
    "sind", "werden", "wurde", "bei", "seit", "hat", "haben",
];

/// Policy topics with their keyword sets, in declared order. The percentage
/// normalization iterates this slice, so output is reproducible.
pub const POLICY_TOPICS: [(&str, &[&str]); 5] = [
    (
        "wirtschaft",
        &["wirtschaft", "unternehmen", "arbeitsplätze", "industrie", "handel", "firmen"],
    ),
    (
        "umwelt",
        &[
            "klima",
            "umwelt",
            "nachhaltigkeit",
            "erneuerbare",
            "energiewende",
            "klimawandel",
            "naturschutz",
            "umweltschutz",
            "co2",
        ],
    ),
    (
        "soziales",
        &["sozial", "rente", "pflege", "gesundheit", "familie", "armut", "integration", "kinder"],
    ),
    (
        "bildung",
        &[
            "bildung",
            "schule",
            "universität",
            "ausbildung",
            "forschung",
            "wissenschaft",
            "studenten",
        ],
    ),
    (
        "sicherheit",
        &[
            "sicherheit",
            "polizei",
            "verteidigung",
            "kriminalität",
            "bundeswehr",
            "armee",
            "terrorismus",
            "gewalt",
        ],
    ),
];

const FUTURE_MARKERS: [&str; 5] = ["werden", "zukunft", "entwicklung", "plan", "vorhaben"];
const CONCRETE_MARKERS: [&str; 8] = [
    "konkret", "maßnahme", "initiative", "projekt", "konkrete", "genau", "genaue", "initiieren",
];
const INTENSITY_MARKERS: [&str; 6] = ["sehr", "besonders", "stark", "deutlich", "extrem", "unfassbar"];

const VOWELS: [char; 9] = ['a', 'e', 'i', 'o', 'u', 'y', 'ä', 'ö', 'ü'];

/// Linguistic metrics for one document, grouped by sub-analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextReport {
    pub readability_metrics: ReadabilityMetrics,
    pub vocabulary_richness: VocabularyRichness,
    /// Most frequent filtered tokens with counts, highest first. Ties keep
    /// first-encountered order.
    pub top_keywords: Vec<(String, u32)>,
    /// Integer share per policy topic; all zero when no keyword occurs.
    pub policy_focus: BTreeMap<String, i64>,
    pub sentence_stats: SentenceStats,
    pub comparative_metrics: ComparativeMetrics,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadabilityMetrics {
    pub avg_sentence_length: f64,
    pub avg_word_length: f64,
    pub syllables_per_word: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VocabularyRichness {
    pub unique_words: usize,
    pub type_token_ratio: f64,
    pub hapaxlegomena: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SentenceStats {
    /// Count of split segments, including a trailing empty one when the
    /// text ends in sentence punctuation.
    pub total_sentences: usize,
    pub max_sentence_length: usize,
    pub min_sentence_length: usize,
    /// Sentences with more than 20 words.
    pub complex_sentences: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparativeMetrics {
    pub future_orientation: usize,
    pub concrete_measures: usize,
    pub intensity_markers: usize,
}

/// Computes all [`TextReport`] sub-metrics for a text. Holds only static
/// configuration (stop words, topic table, keyword limit) and no document
/// state, so one analyzer serves an entire corpus.
#[derive(Debug, Clone)]
pub struct TextMetricsAnalyzer {
    stop_words: HashSet<&'static str>,
    topics: &'static [(&'static str, &'static [&'static str])],
    top_keywords: usize,
}

impl Default for TextMetricsAnalyzer {
    fn default() -> Self {
        Self {
            stop_words: STOP_WORDS.iter().copied().collect(),
            topics: &POLICY_TOPICS,
            top_keywords: 20,
        }
    }
}

impl TextMetricsAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report the `n` most frequent keywords instead of the default 20.
    pub fn with_top_keywords(n: usize) -> Self {
        Self {
            top_keywords: n,
            ..Self::default()
        }
    }

    /// Run all six sub-analyses. Total for any input string: empty or
    /// whitespace-only text yields the zero defaults, never a panic.
    pub fn analyze(&self, text: &str) -> TextReport {
        let filtered = self.filtered_tokens(text);
        TextReport {
            readability_metrics: self.readability(text),
            vocabulary_richness: self.vocabulary(&filtered),
            top_keywords: self.keywords(&filtered),
            policy_focus: self.policy_focus(text),
            sentence_stats: self.sentence_stats(text),
            comparative_metrics: self.comparative(text),
        }
    }

    /// Lower-cased whitespace tokens minus stop words minus any token
    /// containing a non-alphabetic character.
    fn filtered_tokens(&self, text: &str) -> Vec<String> {
        text.to_lowercase()
            .split_whitespace()
            .filter(|word| !self.stop_words.contains(word))
            .filter(|word| word.chars().all(char::is_alphabetic))
            .map(str::to_owned)
            .collect()
    }

    fn readability(&self, text: &str) -> ReadabilityMetrics {
        let sentences = split_sentences(text);
        let words: Vec<&str> = text.split_whitespace().collect();
        let syllables: usize = words.iter().map(|word| count_syllables(word)).sum();

        let avg_sentence_length = if sentences.is_empty() {
            0.0
        } else {
            words.len() as f64 / sentences.len() as f64
        };
        let avg_word_length = if words.is_empty() {
            0.0
        } else {
            words.iter().map(|word| word.chars().count()).sum::<usize>() as f64
                / words.len() as f64
        };
        let syllables_per_word = if words.is_empty() {
            0.0
        } else {
            syllables as f64 / words.len() as f64
        };

        ReadabilityMetrics {
            avg_sentence_length: round_to(avg_sentence_length, 2),
            avg_word_length: round_to(avg_word_length, 2),
            syllables_per_word: round_to(syllables_per_word, 2),
        }
    }

    fn vocabulary(&self, words: &[String]) -> VocabularyRichness {
        let mut counts: HashMap<&str, u32> = HashMap::new();
        for word in words {
            *counts.entry(word).or_insert(0) += 1;
        }
        let type_token_ratio = if words.is_empty() {
            0.0
        } else {
            round_to(counts.len() as f64 / words.len() as f64, 4)
        };
        VocabularyRichness {
            unique_words: counts.len(),
            type_token_ratio,
            hapaxlegomena: counts.values().filter(|&&count| count == 1).count(),
        }
    }

    fn keywords(&self, words: &[String]) -> Vec<(String, u32)> {
        // frequency plus first-seen index, so equal counts rank stably
        let mut counts: HashMap<&str, (u32, usize)> = HashMap::new();
        for (index, word) in words.iter().enumerate() {
            counts.entry(word).or_insert((0, index)).0 += 1;
        }
        let mut ranked: Vec<(&str, u32, usize)> = counts
            .into_iter()
            .map(|(word, (count, first_seen))| (word, count, first_seen))
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
        ranked.truncate(self.top_keywords);
        ranked
            .into_iter()
            .map(|(word, count, _)| (word.to_owned(), count))
            .collect()
    }

    /// Keyword occurrences are counted as substrings of the full text, so a
    /// keyword inside a longer compound counts too. The comparative markers
    /// below match whole tokens only; the two strategies stay separate.
    fn policy_focus(&self, text: &str) -> BTreeMap<String, i64> {
        let lowered = text.to_lowercase();
        let word_count = text.split_whitespace().count();

        let mut per_thousand: Vec<(&str, f64)> = Vec::with_capacity(self.topics.len());
        for &(label, keywords) in self.topics {
            let hits: usize = keywords
                .iter()
                .map(|keyword| count_occurrences(&lowered, keyword))
                .sum();
            let rate = if word_count == 0 {
                0.0
            } else {
                round_to(hits as f64 / word_count as f64 * 1000.0, 2)
            };
            per_thousand.push((label, rate));
        }

        let sum: f64 = per_thousand.iter().map(|(_, rate)| rate).sum();
        per_thousand
            .into_iter()
            .map(|(label, rate)| {
                let percent = if sum == 0.0 { 0 } else { (rate / sum * 100.0) as i64 };
                (label.to_string(), percent)
            })
            .collect()
    }

    fn sentence_stats(&self, text: &str) -> SentenceStats {
        let sentences = split_sentences(text);
        let lengths: Vec<usize> = sentences
            .iter()
            .filter(|sentence| !sentence.trim().is_empty())
            .map(|sentence| sentence.split_whitespace().count())
            .collect();

        SentenceStats {
            total_sentences: sentences.len(),
            max_sentence_length: lengths.iter().copied().max().unwrap_or(0),
            min_sentence_length: lengths.iter().copied().min().unwrap_or(0),
            complex_sentences: lengths.iter().filter(|&&length| length > 20).count(),
        }
    }

    fn comparative(&self, text: &str) -> ComparativeMetrics {
        let lowered = text.to_lowercase();
        let mut report = ComparativeMetrics {
            future_orientation: 0,
            concrete_measures: 0,
            intensity_markers: 0,
        };
        for word in lowered.split_whitespace() {
            if FUTURE_MARKERS.contains(&word) {
                report.future_orientation += 1;
            }
            if CONCRETE_MARKERS.contains(&word) {
                report.concrete_measures += 1;
            }
            if INTENSITY_MARKERS.contains(&word) {
                report.intensity_markers += 1;
            }
        }
        report
    }
}

/// Split on runs of sentence-terminating punctuation. Segments between
/// consecutive terminators collapse, but a leading or trailing terminator
/// still produces an empty segment; the empty text yields one empty
/// segment.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut in_run = false;
    for (index, character) in text.char_indices() {
        if matches!(character, '.' | '!' | '?') {
            if !in_run {
                segments.push(&text[start..index]);
                in_run = true;
            }
        } else if in_run {
            start = index;
            in_run = false;
        }
    }
    if in_run {
        segments.push("");
    } else {
        segments.push(&text[start..]);
    }
    segments
}

/// Vowel-group syllable count: the first character counts if it is a
/// vowel, every later vowel counts if it follows a non-vowel. Any
/// non-empty word has at least one syllable.
pub fn count_syllables(word: &str) -> usize {
    let lowered = word.to_lowercase();
    let chars: Vec<char> = lowered.chars().collect();
    let Some(&first) = chars.first() else {
        return 0;
    };
    let mut count = usize::from(is_vowel(first));
    for pair in chars.windows(2) {
        if is_vowel(pair[1]) && !is_vowel(pair[0]) {
            count += 1;
        }
    }
    count.max(1)
}

fn is_vowel(character: char) -> bool {
    VOWELS.contains(&character)
}

/// Non-overlapping substring occurrences, `str.count` style.
pub(crate) fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count()
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentence_split_keeps_edge_segments() {
        assert_eq!(split_sentences(""), vec![""]);
        assert_eq!(split_sentences("a. b!"), vec!["a", " b", ""]);
        assert_eq!(split_sentences("a.b..c"), vec!["a", "b", "c"]);
        assert_eq!(split_sentences(".a"), vec!["", "a"]);
        assert_eq!(split_sentences("ohne ende"), vec!["ohne ende"]);
    }

    #[test]
    fn syllables_follow_vowel_groups() {
        assert_eq!(count_syllables("gut"), 1);
        assert_eq!(count_syllables("umwelt"), 2);
        assert_eq!(count_syllables("bürger"), 2);
        assert_eq!(count_syllables("aeiou"), 1);
        // no vowel at all still counts one
        assert_eq!(count_syllables("bcdfg"), 1);
        assert_eq!(count_syllables(""), 0);
    }

    #[test]
    fn occurrences_are_non_overlapping_substrings() {
        assert_eq!(count_occurrences("klimawandel und klima", "klima"), 2);
        assert_eq!(count_occurrences("aaaa", "aa"), 2);
        assert_eq!(count_occurrences("abc", "x"), 0);
        assert_eq!(count_occurrences("abc", ""), 0);
    }

    #[test]
    fn filtered_tokens_drop_stop_words_and_non_alphabetic() {
        let analyzer = TextMetricsAnalyzer::new();
        let tokens = analyzer.filtered_tokens("Die Straße und co2 bleiben 42 Worte");
        assert_eq!(tokens, vec!["straße", "bleiben", "worte"]);
    }

    #[test]
    fn rounding_uses_given_places() {
        assert_eq!(round_to(2.0 / 3.0, 2), 0.67);
        assert_eq!(round_to(0.123456, 4), 0.1235);
    }
}
