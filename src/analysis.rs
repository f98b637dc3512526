//! Text analysis for social media posts.
//!
//! Raw text flows through the same pipeline at training and prediction time:
//!
//! ```text
//! Raw Text → CharFilter (clean) → Tokenizer (whitespace)
//!          → SpellingCorrectionFilter (optional)
//!          → SlangNormalizationFilter → StopFilter → StemFilter
//!          → RemoveEmptyFilter → Vec<String>
//! ```
//!
//! [`Preprocessor`](preprocessor::Preprocessor) wires these stages in their
//! fixed order.

pub mod analyzer;
pub mod char_filter;
pub mod preprocessor;
pub mod token;
pub mod token_filter;
pub mod tokenizer;

pub use analyzer::{Analyzer, PipelineAnalyzer};
pub use char_filter::{CharFilter, SocialMediaCharFilter, clean};
pub use preprocessor::Preprocessor;
pub use token::{Token, TokenStream};
pub use token_filter::Filter;
pub use tokenizer::{Tokenizer, WhitespaceTokenizer, tokenize};
