// src/core/password.rs
use crate::error::PasswordError;
use rand::Rng;
use rand::seq::{IndexedRandom as _, SliceRandom as _};
use std::collections::VecDeque;
use tracing::debug;

pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const NUMBERS: &str = "0123456789";
pub const SYMBOLS: &str = "!@#$%^&*()_+-=[]{}|;:,.<>?";
pub const SIMILAR: &str = "il1Lo0O";
pub const AMBIGUOUS: &str = "{}[]()/\\'\"`~,;.<>";

pub const MIN_LENGTH: usize = 4;
pub const MAX_LENGTH: usize = 128;
pub const HISTORY_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordOptions {
    pub length: usize,
    pub uppercase: bool,
    pub lowercase: bool,
    pub numbers: bool,
    pub symbols: bool,
    pub exclude_similar: bool,
    pub exclude_ambiguous: bool,
}

impl Default for PasswordOptions {
    fn default() -> Self {
        Self {
            length: 12,
            uppercase: true,
            lowercase: true,
            numbers: true,
            symbols: true,
            exclude_similar: false,
            exclude_ambiguous: false,
        }
    }
}

impl PasswordOptions {
    fn keeps(&self, c: char) -> bool {
        !(self.exclude_similar && SIMILAR.contains(c))
            && !(self.exclude_ambiguous && AMBIGUOUS.contains(c))
    }

    /// Each selected class after similar/ambiguous filtering. Classes filtered
    /// down to nothing are dropped.
    fn classes(&self) -> Vec<Vec<char>> {
        [
            (self.uppercase, UPPERCASE),
            (self.lowercase, LOWERCASE),
            (self.numbers, NUMBERS),
            (self.symbols, SYMBOLS),
        ]
        .into_iter()
        .filter(|(selected, _)| *selected)
        .map(|(_, set)| set.chars().filter(|c| self.keeps(*c)).collect::<Vec<_>>())
        .filter(|class| !class.is_empty())
        .collect()
    }

    /// The full pool characters are drawn from.
    #[must_use]
    pub fn charset(&self) -> Vec<char> {
        self.classes().concat()
    }
}

/// Generates a password containing at least one character of every selected
/// class, then shuffles it.
///
/// # Errors
///
/// * [`PasswordError::LengthOutOfRange`] outside `MIN_LENGTH..=MAX_LENGTH`
/// * [`PasswordError::EmptyCharset`] when no characters remain to draw from
pub fn generate<R: Rng + ?Sized>(
    options: &PasswordOptions,
    rng: &mut R,
) -> Result<String, PasswordError> {
    if !(MIN_LENGTH..=MAX_LENGTH).contains(&options.length) {
        return Err(PasswordError::LengthOutOfRange {
            length: options.length,
            min: MIN_LENGTH,
            max: MAX_LENGTH,
        });
    }

    let classes = options.classes();
    let charset = classes.concat();
    if charset.is_empty() {
        return Err(PasswordError::EmptyCharset);
    }

    let mut password: Vec<char> = classes
        .iter()
        .filter_map(|class| class.choose(rng).copied())
        .collect();
    while password.len() < options.length {
        if let Some(c) = charset.choose(rng) {
            password.push(*c);
        }
    }
    password.shuffle(rng);

    debug!(length = password.len(), pool = charset.len(), "generated password");
    Ok(password.into_iter().collect())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrengthLabel {
    VeryWeak,
    Weak,
    Fair,
    Strong,
    VeryStrong,
}

impl StrengthLabel {
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        match score {
            0..30 => Self::VeryWeak,
            30..50 => Self::Weak,
            50..70 => Self::Fair,
            70..90 => Self::Strong,
            _ => Self::VeryStrong,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::VeryWeak => "Very Weak",
            Self::Weak => "Weak",
            Self::Fair => "Fair",
            Self::Strong => "Strong",
            Self::VeryStrong => "Very Strong",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Strength {
    pub score: u8,
    pub label: StrengthLabel,
}

/// Heuristic 0..=100 score: length tiers, character variety, a bonus for long
/// mixed passwords, penalties for runs and common sequences.
#[must_use]
pub fn strength(password: &str) -> Strength {
    let length = password.chars().count();
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_other = password.chars().any(|c| !c.is_ascii_alphanumeric());

    let mut score: i32 = 0;
    for tier in [8, 12, 16] {
        if length >= tier {
            score += 25;
        }
    }
    if has_lower {
        score += 5;
    }
    if has_upper {
        score += 5;
    }
    if has_digit {
        score += 5;
    }
    if has_other {
        score += 10;
    }
    if length >= 14 && has_lower && has_upper && has_digit && has_other {
        score += 20;
    }
    if has_triple_run(password) {
        score -= 10;
    }
    let lowered = password.to_lowercase();
    if ["123", "abc", "qwe"].iter().any(|seq| lowered.contains(seq)) {
        score -= 15;
    }

    let score = u8::try_from(score.clamp(0, 100)).unwrap_or(0);
    Strength {
        score,
        label: StrengthLabel::from_score(score),
    }
}

fn has_triple_run(password: &str) -> bool {
    let chars: Vec<char> = password.chars().collect();
    chars
        .windows(3)
        .any(|w| matches!(w, [a, b, c] if a == b && b == c))
}

/// Most recently generated passwords, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasswordHistory {
    entries: VecDeque<String>,
}

impl PasswordHistory {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: VecDeque::new(),
        }
    }

    pub fn push(&mut self, password: String) {
        self.entries.push_front(password);
        self.entries.truncate(HISTORY_SIZE);
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
