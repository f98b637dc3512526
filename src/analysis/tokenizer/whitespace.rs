//! Whitespace tokenizer implementation.

use super::Tokenizer;

use crate::analysis::char_filter::is_separator;
use crate::analysis::token::{Token, TokenStream};
use crate::error::Result;

/// A tokenizer that splits text on whitespace and drops empty pieces.
#[derive(Clone, Debug, Default)]
pub struct WhitespaceTokenizer;

impl WhitespaceTokenizer {
    /// Create a new whitespace tokenizer.
    pub fn new() -> Self {
        WhitespaceTokenizer
    }
}

impl Tokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let tokens: Vec<Token> = text
            .split(is_separator)
            .filter(|word| !word.is_empty())
            .enumerate()
            .map(|(position, word)| Token::new(word, position))
            .collect();

        Ok(Box::new(tokens.into_iter()))
    }

    fn name(&self) -> &'static str {
        "whitespace"
    }
}

/// Split cleaned text into words.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(is_separator)
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::char_filter::clean;

    #[test]
    fn test_splits_on_information_separators() {
        assert_eq!(tokenize("saya\x1csuka\x1f dia"), vec!["saya", "suka", "dia"]);
    }

    #[test]
    fn test_whitespace_tokenizer() {
        let tokenizer = WhitespaceTokenizer::new();
        let tokens: Vec<Token> = tokenizer.tokenize("hello  world\ttest").unwrap().collect();

        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].text, "hello");
        assert_eq!(tokens[1].text, "world");
        assert_eq!(tokens[2].text, "test");
        assert_eq!(tokens[2].position, 2);
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
        assert!(tokenize(&clean("")).is_empty());
    }

    #[test]
    fn test_tokenize_after_clean_has_no_noise() {
        let tokens = tokenize(&clean(
            "RT @akun: #Pilkada 2024 panas!! lihat https://t.co/abc www.x.id ¿qué?",
        ));
        assert_eq!(tokens, vec!["rt", "panas", "lihat", "qu"]);
        for token in &tokens {
            assert!(!token.starts_with('@'));
            assert!(!token.starts_with('#'));
            assert!(!token.contains("http"));
            assert!(!token.chars().any(|c| c.is_ascii_digit() || !c.is_ascii()));
        }
    }

    #[test]
    fn test_tokenizer_name() {
        assert_eq!(WhitespaceTokenizer::new().name(), "whitespace");
    }
}
