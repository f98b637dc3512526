//! Stop filter implementation.
//!
//! Removes common Indonesian function words (and a few dataset-specific
//! fillers) that carry no signal for classification.
//!
//! # Examples
//!
//! ```
//! use ujaran::analysis::token_filter::Filter;
//! use ujaran::analysis::token_filter::stop::StopFilter;
//! use ujaran::analysis::token::Token;
//!
//! let filter = StopFilter::new();
//! let tokens = vec![
//!     Token::new("semua", 0),
//!     Token::new("agama", 1),
//!     Token::new("itu", 2),
//!     Token::new("baik", 3),
//! ];
//!
//! let result: Vec<_> = filter.filter(Box::new(tokens.into_iter()))
//!     .unwrap()
//!     .collect();
//!
//! assert_eq!(result.len(), 2);
//! assert_eq!(result[0].text, "agama");
//! assert_eq!(result[1].text, "baik");
//! ```

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Default Indonesian stop words list.
const DEFAULT_INDONESIAN_STOP_WORDS: &[&str] = &[
    "yang", "dan", "di", "ke", "dari", "untuk", "adalah", "dengan", "para", "itu", "ini", "nya",
    "pun", "sih", "kamu", "kok", "kau", "makin", "kalau", "kan", "kst", "dob", "lah", "buat",
    "pas", "jadi", "apa", "sama", "beda", "bukan", "mau", "banyak", "kstp", "aku", "iya", "tau",
    "pak", "dulu", "gua", "semua", "mana", "memang", "tuh",
];

/// Default Indonesian stop words as a shared HashSet.
pub static DEFAULT_INDONESIAN_STOP_WORDS_SET: LazyLock<Arc<HashSet<String>>> =
    LazyLock::new(|| {
        Arc::new(
            DEFAULT_INDONESIAN_STOP_WORDS
                .iter()
                .map(|&s| s.to_string())
                .collect(),
        )
    });

/// A filter that removes stop words from the token stream.
#[derive(Clone, Debug)]
pub struct StopFilter {
    /// The set of stop words to remove
    stop_words: Arc<HashSet<String>>,
}

impl StopFilter {
    /// Create a new stop filter with the default Indonesian stop words.
    ///
    /// The default table is shared, not copied.
    pub fn new() -> Self {
        StopFilter {
            stop_words: Arc::clone(&DEFAULT_INDONESIAN_STOP_WORDS_SET),
        }
    }

    /// Check if a word is a stop word.
    pub fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }

    /// Drop stop words from a token sequence. An absent sequence stays absent.
    pub fn remove(&self, tokens: Option<Vec<String>>) -> Option<Vec<String>> {
        tokens.map(|tokens| {
            tokens
                .into_iter()
                .filter(|word| !self.is_stop_word(word))
                .collect()
        })
    }

    /// Get the number of stop words.
    pub fn len(&self) -> usize {
        self.stop_words.len()
    }

    /// Check if the stop word set is empty.
    pub fn is_empty(&self) -> bool {
        self.stop_words.is_empty()
    }
}

impl Default for StopFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for StopFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let filtered_tokens: Vec<Token> = tokens
            .filter(|token| !self.is_stop_word(&token.text))
            .collect();

        Ok(Box::new(filtered_tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "stop"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_filter() {
        let filter = StopFilter::new();
        let tokens = vec![
            Token::new("kamu", 0),
            Token::new("memang", 1),
            Token::new("jahat", 2),
            Token::new("sekali", 3),
        ];

        let result: Vec<Token> = filter
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .collect();

        assert_eq!(result.len(), 2);
        assert_eq!(result[0].text, "jahat");
        assert_eq!(result[1].text, "sekali");
    }

    #[test]
    fn test_stop_filter_keeps_positions() {
        let filter = StopFilter::new();
        let tokens = vec![Token::new("itu", 0), Token::new("baik", 1)];

        let result: Vec<Token> = filter
            .filter(Box::new(tokens.into_iter()))
            .unwrap()
            .collect();

        assert_eq!(result, vec![Token::new("baik", 1)]);
    }

    #[test]
    fn test_default_table_is_shared() {
        let first = StopFilter::new();
        let second = StopFilter::default();
        assert!(Arc::ptr_eq(&first.stop_words, &second.stop_words));
        assert!(Arc::ptr_eq(&first.stop_words, &*DEFAULT_INDONESIAN_STOP_WORDS_SET));
    }

    #[test]
    fn test_remove_sequence() {
        let filter = StopFilter::new();
        let tokens = vec!["saya".to_string(), "dan".to_string(), "dia".to_string()];
        assert_eq!(
            filter.remove(Some(tokens)),
            Some(vec!["saya".to_string(), "dia".to_string()])
        );
        assert_eq!(filter.remove(None), None);
    }

    #[test]
    fn test_default_list() {
        let filter = StopFilter::new();
        assert_eq!(filter.len(), 43);
        assert!(filter.is_stop_word("yang"));
        assert!(!filter.is_stop_word("agama"));
        assert_eq!(filter.name(), "stop");
    }
}
