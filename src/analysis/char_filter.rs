//! Char filter implementations for text normalization.
//!
//! Char filters pre-process the raw string before it reaches the tokenizer.
//!
//! # Available Filters
//!
//! - [`social_media::SocialMediaCharFilter`] - strips mentions, hashtags, URLs,
//!   digits, punctuation and non-ASCII characters from social media posts

/// Trait for character filters that transform text before tokenization.
pub trait CharFilter: Send + Sync {
    /// Apply this filter to the input text and return the filtered text.
    fn filter(&self, input: &str) -> String;

    /// Get the name of this char filter.
    fn name(&self) -> &'static str;
}

pub mod social_media;

pub use social_media::{SocialMediaCharFilter, clean, is_separator};
