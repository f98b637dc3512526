//! The fixed text preprocessing pipeline shared by training and inference.
//!
//! ```text
//! clean → tokenize → [spelling] → slang → stop words → stem → drop empty
//! ```
//!
//! Spelling correction runs only when the preprocessor was built with a
//! spelling dictionary. Training runs the pipeline in two halves because the
//! dictionary is built from the tokenized corpus: [`Preprocessor::tokenize`]
//! first, then [`Preprocessor::finish`] once the dictionary exists. Both
//! halves are the same stages [`Preprocessor::preprocess`] runs, so the two
//! call sites cannot diverge.

use std::sync::Arc;

use crate::analysis::analyzer::{Analyzer, PipelineAnalyzer};
use crate::analysis::char_filter::SocialMediaCharFilter;
use crate::analysis::token::{IntoTokenStream, TokenStream};
use crate::analysis::token_filter::{
    RemoveEmptyFilter, SlangNormalizationFilter, SpellingCorrectionFilter, StemFilter, StopFilter,
};
use crate::analysis::tokenizer::WhitespaceTokenizer;
use crate::error::Result;
use crate::spelling::{CorrectorConfig, SpellingCorrector, SpellingDictionary};

/// Text preprocessor for Indonesian social media posts.
#[derive(Clone, Debug)]
pub struct Preprocessor {
    analyzer: PipelineAnalyzer,
    spelling: bool,
}

impl Preprocessor {
    /// Create a preprocessor without spelling correction.
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Create a preprocessor that corrects spelling against `dictionary`.
    ///
    /// An empty dictionary disables correction, matching [`Preprocessor::new`].
    pub fn with_dictionary(dictionary: Arc<SpellingDictionary>, config: CorrectorConfig) -> Self {
        if dictionary.is_empty() {
            return Self::new();
        }
        Self::build(Some(SpellingCorrector::with_config(dictionary, config)))
    }

    fn build(corrector: Option<SpellingCorrector>) -> Self {
        let spelling = corrector.is_some();
        let mut analyzer = PipelineAnalyzer::new(Arc::new(WhitespaceTokenizer::new()))
            .add_char_filter(Arc::new(SocialMediaCharFilter::new()));

        if let Some(corrector) = corrector {
            analyzer = analyzer.add_filter(Arc::new(SpellingCorrectionFilter::new(corrector)));
        }

        let analyzer = analyzer
            .add_filter(Arc::new(SlangNormalizationFilter::new()))
            .add_filter(Arc::new(StopFilter::new()))
            .add_filter(Arc::new(StemFilter::new()))
            .add_filter(Arc::new(RemoveEmptyFilter::new()))
            .with_name("indonesian_social_media");

        Preprocessor { analyzer, spelling }
    }

    /// Whether spelling correction is part of the pipeline.
    pub fn has_spelling_correction(&self) -> bool {
        self.spelling
    }

    /// Run the whole pipeline on one raw text.
    ///
    /// # Examples
    ///
    /// ```
    /// use ujaran::analysis::Preprocessor;
    ///
    /// let preprocessor = Preprocessor::new();
    /// let tokens = preprocessor.preprocess("@budi Yg penting makanan ENAK!!").unwrap();
    /// assert_eq!(tokens, vec!["penting", "makan", "enak"]);
    /// ```
    pub fn preprocess(&self, text: &str) -> Result<Vec<String>> {
        self.analyzer.analyze_to_strings(text)
    }

    /// First half of the pipeline: clean and tokenize.
    pub fn tokenize(&self, text: &str) -> Result<Vec<String>> {
        let mut filtered = text.to_string();
        for char_filter in self.analyzer.char_filters() {
            filtered = char_filter.filter(&filtered);
        }
        Ok(self
            .analyzer
            .tokenizer()
            .tokenize(&filtered)?
            .map(|token| token.text)
            .collect())
    }

    /// Second half of the pipeline: every token filter, in order.
    pub fn finish(&self, tokens: Vec<String>) -> Result<Vec<String>> {
        let stream = self.apply_filters(tokens.into_token_stream())?;
        Ok(stream.map(|token| token.text).collect())
    }

    fn apply_filters(&self, mut tokens: TokenStream) -> Result<TokenStream> {
        for filter in self.analyzer.filters() {
            tokens = filter.filter(tokens)?;
        }
        Ok(tokens)
    }

    /// Names of the pipeline stages in execution order.
    pub fn stages(&self) -> Vec<&'static str> {
        self.analyzer.stage_names()
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for Preprocessor {
    fn analyze(&self, text: &str) -> Result<TokenStream> {
        self.analyzer.analyze(text)
    }

    fn name(&self) -> &str {
        self.analyzer.name()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;

    fn dictionary(words: &[(&str, usize)]) -> Arc<SpellingDictionary> {
        let freq: BTreeMap<String, usize> =
            words.iter().map(|(w, c)| (w.to_string(), *c)).collect();
        Arc::new(SpellingDictionary::from_parts(freq.clone().into_keys(), freq))
    }

    #[test]
    fn test_stage_order() {
        let plain = Preprocessor::new();
        assert_eq!(
            plain.stages(),
            vec!["social_media", "whitespace", "slang", "stop", "stem", "remove_empty"]
        );
        assert!(!plain.has_spelling_correction());

        let spelled = Preprocessor::with_dictionary(
            dictionary(&[("makan", 3)]),
            CorrectorConfig::default(),
        );
        assert_eq!(spelled.stages()[2], "spelling");
        assert!(spelled.has_spelling_correction());
    }

    #[test]
    fn test_preprocess() {
        let preprocessor = Preprocessor::new();
        let tokens = preprocessor
            .preprocess("RT @user: Gw gk suka org itu!!! https://t.co/abc #politik 2024")
            .unwrap();
        // gw→saya, gk→tidak, org→orang, "itu" is a stop word, orang→orang (no rule)
        assert_eq!(tokens, vec!["rt", "saya", "tidak", "suka", "orang"]);
    }

    #[test]
    fn test_empty_input() {
        let preprocessor = Preprocessor::new();
        assert!(preprocessor.preprocess("").unwrap().is_empty());
        assert!(preprocessor.preprocess("@user #tag 123 !!!").unwrap().is_empty());
    }

    #[test]
    fn test_stem_can_empty_a_token() {
        // "kan" is also a stop word, so use a word that stems to nothing
        let preprocessor = Preprocessor::new();
        assert_eq!(preprocessor.preprocess("an i").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn test_split_pipeline_matches_full_pipeline() {
        let preprocessor = Preprocessor::with_dictionary(
            dictionary(&[("makan", 5), ("nasi", 3), ("goreng", 2)]),
            CorrectorConfig::default(),
        );
        let texts = [
            "Makn nasii goreng yg enak bgt",
            "@budi lu udh makan?? http://x.y",
            "",
            "Semua AGAMA itu baik",
        ];
        for text in texts {
            let full = preprocessor.preprocess(text).unwrap();
            let split = preprocessor
                .finish(preprocessor.tokenize(text).unwrap())
                .unwrap();
            assert_eq!(full, split, "pipelines diverged on {text:?}");
        }
    }

    #[test]
    fn test_spelling_correction_runs_before_slang() {
        let preprocessor = Preprocessor::with_dictionary(
            dictionary(&[("makan", 5)]),
            CorrectorConfig::default(),
        );
        // makn→makan (spelling), then makan→ma (stem: "kan" suffix)
        assert_eq!(preprocessor.preprocess("makn").unwrap(), vec!["ma"]);
    }

    #[test]
    fn test_empty_dictionary_disables_spelling() {
        let empty = Arc::new(SpellingDictionary::default());
        let preprocessor = Preprocessor::with_dictionary(empty, CorrectorConfig::default());
        assert!(!preprocessor.has_spelling_correction());
    }
}
