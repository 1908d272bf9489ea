// src/core/text.rs
use crate::models::{TextStats, WordFrequencyEntry};
use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;
use tracing::debug;

/// How many entries [`word_frequency`] keeps by default.
pub const TOP_WORDS: usize = 10;

/// Tokens this short or shorter are left out of frequency tables.
const MIN_TOKEN_CHARS: usize = 2;

static SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("valid regex"));
static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("valid regex"));
static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("valid regex"));

/// Computes character, word, sentence and paragraph counts for `text`.
///
/// Total over all inputs: blank text (empty or whitespace only) gives all zeros.
#[must_use]
pub fn analyze(text: &str) -> TextStats {
    if text.trim().is_empty() {
        return TextStats::new();
    }

    let stats = TextStats::from_counts(
        text.chars().count(),
        text.chars().filter(|c| !c.is_whitespace()).count(),
        count_words(text),
        count_sentences(text),
        count_paragraphs(text),
    );
    debug!(words = stats.words, sentences = stats.sentences, "analyzed text");
    stats
}

#[must_use]
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

#[must_use]
pub fn count_sentences(text: &str) -> usize {
    count_non_blank(SENTENCE_BREAK.split(text))
}

#[must_use]
pub fn count_paragraphs(text: &str) -> usize {
    count_non_blank(PARAGRAPH_BREAK.split(text))
}

fn count_non_blank<'a>(segments: impl Iterator<Item = &'a str>) -> usize {
    segments.filter(|segment| !segment.trim().is_empty()).count()
}

/// Ranks the most frequent words of `text`.
///
/// Words are lower-cased with punctuation removed; tokens of two characters or
/// fewer are skipped. Ties keep the order in which the words first appeared.
#[must_use]
pub fn word_frequency(text: &str, limit: usize) -> Vec<WordFrequencyEntry> {
    let lowered = text.to_lowercase();
    let cleaned = NON_WORD.replace_all(&lowered, "");

    // word -> (count, first position)
    let mut tally: HashMap<&str, (usize, usize)> = HashMap::new();
    for (position, token) in cleaned
        .split_whitespace()
        .filter(|token| token.chars().count() > MIN_TOKEN_CHARS)
        .enumerate()
    {
        let entry = tally.entry(token).or_insert((0, position));
        entry.0 = entry.0.saturating_add(1);
    }

    let mut ranked: Vec<_> = tally.into_iter().collect();
    ranked.sort_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
        count_b.cmp(count_a).then_with(|| first_a.cmp(first_b))
    });

    ranked
        .into_iter()
        .take(limit)
        .map(|(word, (count, _))| WordFrequencyEntry::new(word, count))
        .collect()
}

/// Human-readable duration for reading/speaking estimates. An hour or more
/// is shown as `{h}h {m}m`.
#[must_use]
pub fn format_minutes(minutes: usize) -> String {
    match minutes {
        0 => String::from("less than 1 minute"),
        1 => String::from("1 minute"),
        n if n < 60 => format!("{n} minutes"),
        n => format!("{}h {}m", n / 60, n % 60),
    }
}
