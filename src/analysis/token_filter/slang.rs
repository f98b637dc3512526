//! Slang normalization filter.
//!
//! Replaces informal Indonesian spellings and abbreviations common on social
//! media (`yg`, `gk`, `org`, ...) with their standard form. Words not in the
//! table pass through unchanged.
//!
//! # Examples
//!
//! ```
//! use ujaran::analysis::token_filter::slang::SlangNormalizationFilter;
//!
//! let filter = SlangNormalizationFilter::new();
//! let tokens = vec!["yg".to_string(), "gk".to_string(), "org".to_string()];
//! assert_eq!(
//!     filter.normalize(Some(tokens)),
//!     Some(vec!["yang".to_string(), "tidak".to_string(), "orang".to_string()])
//! );
//! ```

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;

/// Default Indonesian slang dictionary: `(slang, standard)` pairs.
const DEFAULT_INDONESIAN_SLANG: &[(&str, &str)] = &[
    ("yg", "yang"),
    ("gk", "tidak"),
    ("ga", "tidak"),
    ("tdk", "tidak"),
    ("bgt", "banget"),
    ("dr", "dari"),
    ("dlm", "dalam"),
    ("utk", "untuk"),
    ("gw", "saya"),
    ("gue", "saya"),
    ("lu", "kamu"),
    ("lo", "kamu"),
    ("org", "orang"),
    ("dg", "dengan"),
    ("dgn", "dengan"),
    ("klo", "kalau"),
    ("krn", "karena"),
    ("jg", "juga"),
    ("sdh", "sudah"),
    ("udh", "sudah"),
    ("blm", "belum"),
    ("tp", "tapi"),
    ("sm", "sama"),
    ("bs", "bisa"),
    ("aj", "saja"),
    ("aja", "saja"),
    ("bkn", "bukan"),
    ("hrs", "harus"),
    ("si", "sih"),
    ("kek", "seperti"),
    ("tu", "itu"),
    ("ni", "ini"),
    ("tak", "tidak"),
    ("dah", "sudah"),
    ("makin", "semakin"),
    ("gak", "tidak"),
    ("kalo", "kalau"),
    ("kaya", "seperti"),
    ("udah", "sudah"),
    ("keknya", "sepertinya"),
    ("emang", "memang"),
    ("kau", "kamu"),
];

/// Default Indonesian slang dictionary as a shared map.
pub static DEFAULT_INDONESIAN_SLANG_MAP: LazyLock<Arc<HashMap<String, String>>> =
    LazyLock::new(|| {
        Arc::new(
            DEFAULT_INDONESIAN_SLANG
                .iter()
                .map(|&(slang, standard)| (slang.to_string(), standard.to_string()))
                .collect(),
        )
    });

/// A filter that maps slang words to their standard spelling.
#[derive(Clone, Debug)]
pub struct SlangNormalizationFilter {
    mapping: Arc<HashMap<String, String>>,
}

impl SlangNormalizationFilter {
    /// Create a filter with the default Indonesian slang dictionary.
    pub fn new() -> Self {
        SlangNormalizationFilter {
            mapping: Arc::clone(&DEFAULT_INDONESIAN_SLANG_MAP),
        }
    }

    /// Normalize a token sequence. An absent sequence stays absent.
    pub fn normalize(&self, tokens: Option<Vec<String>>) -> Option<Vec<String>> {
        tokens.map(|tokens| {
            tokens
                .into_iter()
                .map(|word| match self.mapping.get(&word) {
                    Some(standard) => standard.clone(),
                    None => word,
                })
                .collect()
        })
    }

    /// Number of entries in the mapping.
    pub fn len(&self) -> usize {
        self.mapping.len()
    }

    /// Check if the mapping is empty.
    pub fn is_empty(&self) -> bool {
        self.mapping.is_empty()
    }
}

impl Default for SlangNormalizationFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Filter for SlangNormalizationFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let mapping = Arc::clone(&self.mapping);
        let normalized: Vec<Token> = tokens
            .map(|token| match mapping.get(&token.text) {
                Some(standard) => token.with_text(standard.as_str()),
                None => token,
            })
            .collect();

        Ok(Box::new(normalized.into_iter()))
    }

    fn name(&self) -> &'static str {
        "slang"
    }
}
