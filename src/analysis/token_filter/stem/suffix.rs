//! Heuristic Indonesian suffix stemmer.

use super::Stemmer;

/// Stemmer that strips one common Indonesian suffix.
///
/// Rules are tried in order and only the first match applies:
///
/// 1. verb-forming `-kan`
/// 2. noun-forming `-an`
/// 3. trailing `-i`
///
/// The output is not a linguistic root (`makan` becomes `ma`); it only has
/// to be a stable feature symbol.
#[derive(Debug, Clone)]
pub struct IndonesianSuffixStemmer {
    /// Suffixes in priority order.
    suffixes: &'static [&'static str],
}

impl IndonesianSuffixStemmer {
    /// Create a new stemmer with the default suffix rules.
    pub fn new() -> Self {
        IndonesianSuffixStemmer {
            suffixes: &["kan", "an", "i"],
        }
    }
}

impl Default for IndonesianSuffixStemmer {
    fn default() -> Self {
        Self::new()
    }
}

impl Stemmer for IndonesianSuffixStemmer {
    fn stem(&self, word: &str) -> String {
        for suffix in self.suffixes {
            if let Some(stripped) = word.strip_suffix(suffix) {
                return stripped.to_string();
            }
        }

        word.to_string()
    }

    fn name(&self) -> &'static str {
        "indonesian_suffix"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indonesian_suffix_stemmer() {
        let stemmer = IndonesianSuffixStemmer::new();

        assert_eq!(stemmer.stem("bersihkan"), "bersih");
        assert_eq!(stemmer.stem("makanan"), "makan");
        assert_eq!(stemmer.stem("makan"), "ma");
        assert_eq!(stemmer.stem("sekali"), "sekal");
        assert_eq!(stemmer.stem("agama"), "agama");
        assert_eq!(stemmer.stem("ras"), "ras");
    }

    #[test]
    fn test_first_rule_wins_once() {
        let stemmer = IndonesianSuffixStemmer::new();
        // "-kan" wins over "-an"; the result is not stemmed again
        assert_eq!(stemmer.stem("pikirankan"), "pikiran");
        // Whole word can be consumed
        assert_eq!(stemmer.stem("kan"), "");
        assert_eq!(stemmer.stem("i"), "");
        assert_eq!(stemmer.stem(""), "");
    }
}
