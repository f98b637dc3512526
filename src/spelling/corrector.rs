//! Nearest-neighbour spelling corrector.
//!
//! A word that is already in the vocabulary is returned unchanged. Otherwise
//! every vocabulary word whose length is within `max_distance` of the input is
//! scored by Levenshtein distance; the closest candidate wins, ties go to the
//! more frequent word, and remaining ties to the lexicographically smaller one.
//! With no candidate within `max_distance` the word is returned unchanged.
//!
//! Each lookup scans the whole vocabulary, so the cost is
//! `O(|vocabulary| * L^2)` per word. This is fine for corpora of a few
//! thousand distinct words and is the scaling limit of the corrector.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::spelling::dictionary::SpellingDictionary;
use crate::spelling::levenshtein::levenshtein_distance_threshold;

/// Configuration for the spelling corrector.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrectorConfig {
    /// Maximum edit distance for a replacement.
    pub max_distance: usize,
}

impl Default for CorrectorConfig {
    fn default() -> Self {
        CorrectorConfig { max_distance: 2 }
    }
}

/// Correct a single word against a vocabulary.
///
/// # Examples
///
/// ```
/// use std::collections::{BTreeMap, BTreeSet};
/// use ujaran::spelling::correct_word;
///
/// let vocab = BTreeSet::from(["makan".to_string()]);
/// let freq = BTreeMap::from([("makan".to_string(), 5)]);
/// assert_eq!(correct_word("makn", &vocab, &freq, 2), "makan");
/// ```
pub fn correct_word(
    word: &str,
    vocabulary: &BTreeSet<String>,
    word_freq: &BTreeMap<String, usize>,
    max_distance: usize,
) -> String {
    if vocabulary.contains(word) {
        return word.to_string();
    }

    let word_len = word.chars().count();
    let mut best: Option<(&str, usize, usize)> = None;

    for candidate in vocabulary {
        if candidate.chars().count().abs_diff(word_len) > max_distance {
            continue;
        }
        let Some(distance) = levenshtein_distance_threshold(word, candidate, max_distance) else {
            continue;
        };
        let freq = word_freq.get(candidate).copied().unwrap_or(0);

        let better = match best {
            None => true,
            Some((_, best_distance, best_freq)) => {
                distance < best_distance || (distance == best_distance && freq > best_freq)
            }
        };
        if better {
            best = Some((candidate.as_str(), distance, freq));
        }
    }

    best.map_or_else(|| word.to_string(), |(candidate, _, _)| candidate.to_string())
}

/// Spelling corrector backed by a shared [`SpellingDictionary`].
#[derive(Debug, Clone)]
pub struct SpellingCorrector {
    dictionary: Arc<SpellingDictionary>,
    config: CorrectorConfig,
}

impl SpellingCorrector {
    /// Create a corrector with the default configuration.
    pub fn new(dictionary: Arc<SpellingDictionary>) -> Self {
        Self::with_config(dictionary, CorrectorConfig::default())
    }

    /// Create a corrector with a custom configuration.
    pub fn with_config(dictionary: Arc<SpellingDictionary>, config: CorrectorConfig) -> Self {
        SpellingCorrector { dictionary, config }
    }

    /// Correct one word.
    pub fn correct(&self, word: &str) -> String {
        correct_word(
            word,
            self.dictionary.vocabulary(),
            self.dictionary.word_freq(),
            self.config.max_distance,
        )
    }
}
