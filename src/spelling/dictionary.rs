//! Corpus-derived dictionary for spelling correction.
//!
//! The dictionary is unrelated to the TF-IDF feature vocabulary: it only
//! supplies candidate words (and their frequencies for tie-breaking) to the
//! [`SpellingCorrector`](super::corrector::SpellingCorrector).

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Default minimum corpus frequency for a word to count as correctly spelled.
pub const DEFAULT_MIN_COUNT: usize = 2;

/// Count every occurrence of every word across a tokenized corpus.
///
/// Counts are occurrence-based, not document-based: a word repeated three
/// times in one document contributes three.
pub fn word_frequency<S: AsRef<str>>(corpus: &[Vec<S>]) -> BTreeMap<String, usize> {
    let mut freq = BTreeMap::new();
    for doc in corpus {
        for word in doc {
            *freq.entry(word.as_ref().to_string()).or_insert(0) += 1;
        }
    }
    freq
}

/// Select the words whose frequency is at least `min_count`.
pub fn vocabulary(freq: &BTreeMap<String, usize>, min_count: usize) -> BTreeSet<String> {
    freq.iter()
        .filter(|(_, count)| **count >= min_count)
        .map(|(word, _)| word.clone())
        .collect()
}

/// A set of known words together with their corpus frequencies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellingDictionary {
    /// Words considered correctly spelled
    vocabulary: BTreeSet<String>,
    /// Corpus frequency of every observed word
    word_freq: BTreeMap<String, usize>,
}

impl SpellingDictionary {
    /// Create a new empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dictionary from a tokenized corpus.
    pub fn from_corpus<S: AsRef<str>>(corpus: &[Vec<S>], min_count: usize) -> Self {
        let word_freq = word_frequency(corpus);
        let vocabulary = vocabulary(&word_freq, min_count);
        SpellingDictionary {
            vocabulary,
            word_freq,
        }
    }

    /// Rebuild a dictionary from exported tables.
    pub fn from_parts(
        vocabulary: impl IntoIterator<Item = String>,
        word_freq: BTreeMap<String, usize>,
    ) -> Self {
        SpellingDictionary {
            vocabulary: vocabulary.into_iter().collect(),
            word_freq,
        }
    }

    /// Check if a word is in the vocabulary.
    pub fn contains(&self, word: &str) -> bool {
        self.vocabulary.contains(word)
    }

    /// Get the corpus frequency of a word (0 if unseen).
    pub fn frequency(&self, word: &str) -> usize {
        self.word_freq.get(word).copied().unwrap_or(0)
    }

    /// The thresholded vocabulary, in lexicographic order.
    pub fn vocabulary(&self) -> &BTreeSet<String> {
        &self.vocabulary
    }

    /// The full word frequency table.
    pub fn word_freq(&self) -> &BTreeMap<String, usize> {
        &self.word_freq
    }

    /// Number of words in the vocabulary.
    pub fn len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Whether the dictionary can correct anything at all.
    pub fn is_empty(&self) -> bool {
        self.vocabulary.is_empty() || self.word_freq.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<Vec<String>> {
        vec![
            vec!["saya", "suka", "saya"],
            vec!["dia", "suka"],
            vec!["kamu"],
        ]
        .into_iter()
        .map(|doc| doc.into_iter().map(String::from).collect())
        .collect()
    }

    #[test]
    fn test_word_frequency_counts_occurrences() {
        let freq = word_frequency(&corpus());
        assert_eq!(freq["saya"], 2);
        assert_eq!(freq["suka"], 2);
        assert_eq!(freq["dia"], 1);
        assert_eq!(freq["kamu"], 1);
        assert_eq!(freq.len(), 4);
    }

    #[test]
    fn test_vocabulary_threshold() {
        let freq = word_frequency(&corpus());
        let vocab = vocabulary(&freq, DEFAULT_MIN_COUNT);
        assert_eq!(
            vocab.into_iter().collect::<Vec<_>>(),
            vec!["saya".to_string(), "suka".to_string()]
        );

        let everything = vocabulary(&freq, 1);
        assert_eq!(everything.len(), 4);
    }

    #[test]
    fn test_dictionary_lookup() {
        let dictionary = SpellingDictionary::from_corpus(&corpus(), 2);
        assert!(dictionary.contains("saya"));
        assert!(!dictionary.contains("dia"));
        assert_eq!(dictionary.frequency("dia"), 1);
        assert_eq!(dictionary.frequency("unknown"), 0);
        assert_eq!(dictionary.len(), 2);
        assert!(!dictionary.is_empty());
        assert!(SpellingDictionary::new().is_empty());
    }
}
