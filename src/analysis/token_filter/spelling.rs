//! Spelling correction filter.
//!
//! Runs every token through a [`SpellingCorrector`], replacing unknown words
//! with their nearest vocabulary neighbour.

use crate::analysis::token::{Token, TokenStream};
use crate::analysis::token_filter::Filter;
use crate::error::Result;
use crate::spelling::SpellingCorrector;

/// A filter that corrects misspelled tokens against a corpus vocabulary.
#[derive(Clone, Debug)]
pub struct SpellingCorrectionFilter {
    corrector: SpellingCorrector,
}

impl SpellingCorrectionFilter {
    /// Create a new spelling correction filter.
    pub fn new(corrector: SpellingCorrector) -> Self {
        SpellingCorrectionFilter { corrector }
    }
}

impl Filter for SpellingCorrectionFilter {
    fn filter(&self, tokens: TokenStream) -> Result<TokenStream> {
        let corrected: Vec<Token> = tokens
            .map(|token| {
                let word = self.corrector.correct(&token.text);
                token.with_text(word)
            })
            .collect();

        Ok(Box::new(corrected.into_iter()))
    }

    fn name(&self) -> &'static str {
        "spelling"
    }
}
