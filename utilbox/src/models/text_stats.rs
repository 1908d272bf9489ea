// src/models/text_stats.rs
use serde::Serialize;

pub const READING_WORDS_PER_MINUTE: usize = 200;
pub const SPEAKING_WORDS_PER_MINUTE: usize = 150;

/// Derived statistics for a block of text. Times are whole minutes, rounded up.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TextStats {
    pub characters: usize,
    pub characters_no_spaces: usize,
    pub words: usize,
    pub sentences: usize,
    pub paragraphs: usize,
    pub reading_time: usize,
    pub speaking_time: usize,
}

impl TextStats {
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            characters: 0,
            characters_no_spaces: 0,
            words: 0,
            sentences: 0,
            paragraphs: 0,
            reading_time: 0,
            speaking_time: 0,
        }
    }

    /// Builds stats from raw counts, deriving reading and speaking time.
    #[inline]
    #[must_use]
    pub const fn from_counts(
        characters: usize,
        characters_no_spaces: usize,
        words: usize,
        sentences: usize,
        paragraphs: usize,
    ) -> Self {
        Self {
            characters,
            characters_no_spaces,
            words,
            sentences,
            paragraphs,
            reading_time: words.div_ceil(READING_WORDS_PER_MINUTE),
            speaking_time: words.div_ceil(SPEAKING_WORDS_PER_MINUTE),
        }
    }

    /// Sums two sets of counts. Times are recomputed from the combined word
    /// count rather than added, so ceiling rounding happens once.
    #[inline]
    #[must_use]
    pub const fn merge(&self, other: &Self) -> Self {
        Self::from_counts(
            self.characters.saturating_add(other.characters),
            self.characters_no_spaces
                .saturating_add(other.characters_no_spaces),
            self.words.saturating_add(other.words),
            self.sentences.saturating_add(other.sentences),
            self.paragraphs.saturating_add(other.paragraphs),
        )
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.characters == 0
    }
}

/// Progress towards a word or character goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetProgress {
    pub current: usize,
    pub target: usize,
}

impl TargetProgress {
    #[inline]
    #[must_use]
    pub const fn new(current: usize, target: usize) -> Self {
        Self { current, target }
    }

    /// Percentage of the target reached, capped at 100. A zero target counts
    /// as already met.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_precision_loss, reason = "Precision not critical")]
    pub fn percentage(&self) -> f64 {
        if self.target == 0 {
            return 100.0;
        }
        ((self.current as f64 / self.target as f64) * 100.0).min(100.0)
    }

    #[inline]
    #[must_use]
    pub const fn is_met(&self) -> bool {
        self.current >= self.target
    }
}
