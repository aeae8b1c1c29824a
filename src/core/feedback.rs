//! Per-position guess feedback
//!
//! Each position of a guess is classified against the target as:
//! - Exact (character in the correct position)
//! - Present (character occurs elsewhere in the target)
//! - Absent (character not available in the target)
//!
//! Repeated characters are handled like Wordle: a character never earns more
//! Exact + Present marks than it has occurrences in the target.

use rustc_hash::FxHashMap;
use std::fmt;
use std::str::FromStr;

/// Classification of a single guessed character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeedbackClass {
    Exact,
    Present,
    Absent,
}

impl FeedbackClass {
    #[must_use]
    pub const fn to_emoji(self) -> char {
        match self {
            Self::Exact => '🟩',
            Self::Present => '🟨',
            Self::Absent => '⬜',
        }
    }

    /// Parse a single feedback character (`G`/`Y`/`-` or the matching emoji)
    #[must_use]
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            'G' | 'g' | '🟩' => Some(Self::Exact),
            'Y' | 'y' | '🟨' => Some(Self::Present),
            '-' | '_' | '⬜' => Some(Self::Absent),
            _ => None,
        }
    }
}

/// Feedback for one guessed row
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Feedback(Vec<FeedbackClass>);

impl Feedback {
    /// Classify `guess` against `target`
    ///
    /// Both strings are expected to have the same length; the shorter one bounds
    /// the comparison otherwise.
    ///
    /// # Algorithm
    /// 1. Count the occurrences of every target character
    /// 2. First pass: mark exact matches and consume them from the counts
    /// 3. Second pass: mark present characters while counts remain
    ///
    /// # Examples
    /// ```
    /// use mathler::core::{Feedback, FeedbackClass};
    ///
    /// let feedback = Feedback::calculate("1+9", "9+1");
    /// assert_eq!(feedback.classes()[0], FeedbackClass::Present);
    /// assert_eq!(feedback.classes()[1], FeedbackClass::Exact);
    /// ```
    #[must_use]
    pub fn calculate(target: &str, guess: &str) -> Self {
        let target: Vec<char> = target.chars().collect();
        let guess: Vec<char> = guess.chars().collect();
        let mut result = vec![FeedbackClass::Absent; guess.len().min(target.len())];

        let mut available: FxHashMap<char, usize> = FxHashMap::default();
        for &ch in &target {
            *available.entry(ch).or_insert(0) += 1;
        }

        // First pass: exact matches
        for (i, (g, t)) in guess.iter().zip(&target).enumerate() {
            if g == t {
                result[i] = FeedbackClass::Exact;
                if let Some(count) = available.get_mut(g) {
                    *count = count.saturating_sub(1);
                }
            }
        }

        // Second pass: present elsewhere, limited by remaining occurrences
        for (class, ch) in result.iter_mut().zip(&guess) {
            if *class == FeedbackClass::Exact {
                continue;
            }
            if let Some(count) = available.get_mut(ch)
                && *count > 0
            {
                *class = FeedbackClass::Present;
                *count -= 1;
            }
        }

        Self(result)
    }

    #[inline]
    #[must_use]
    pub fn classes(&self) -> &[FeedbackClass] {
        &self.0
    }

    /// True if every position is exact
    #[must_use]
    pub fn is_perfect(&self) -> bool {
        !self.0.is_empty() && self.0.iter().all(|&c| c == FeedbackClass::Exact)
    }

    #[must_use]
    pub fn count_exact(&self) -> usize {
        self.count(FeedbackClass::Exact)
    }

    #[must_use]
    pub fn count_present(&self) -> usize {
        self.count(FeedbackClass::Present)
    }

    fn count(&self, class: FeedbackClass) -> usize {
        self.0.iter().filter(|&&c| c == class).count()
    }

    /// Render as a string like "🟩🟨⬜🟩"
    #[must_use]
    pub fn to_emoji(&self) -> String {
        self.0.iter().map(|c| c.to_emoji()).collect()
    }
}

impl FromStr for Feedback {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .map(|ch| {
                FeedbackClass::from_char(ch).ok_or_else(|| format!("Invalid feedback string: {s}"))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_emoji())
    }
}
