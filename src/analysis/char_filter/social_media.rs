//! Cleaning of raw social media text.
//!
//! The filter lowercases the input, drops whole words that are mentions,
//! hashtags or links, and then reduces the remaining text to lowercase ASCII
//! letters, underscores and single spaces.
//!
//! # Examples
//!
//! ```
//! use ujaran::analysis::char_filter::clean;
//!
//! let cleaned = clean("Halo @budi_99, cek https://t.co/x #viral!! Ada 3 orang");
//! assert_eq!(cleaned, "halo cek ada orang");
//! ```

use super::CharFilter;

/// Characters trimmed from both ends of a word before it is classified.
pub const PUNCTUATION_EDGES: &[char] = &[
    '.', ',', '!', '?', ';', ':', '"', '\'', '(', ')', '[', ']', '{', '}', '<', '>', '`', '~',
    '|', '\\', '/',
];

const URL_PREFIXES: &[&str] = &["http://", "https://", "www."];

/// Char filter that removes social media noise from a post.
#[derive(Clone, Debug, Default)]
pub struct SocialMediaCharFilter;

/// Word separators: Unicode whitespace plus the ASCII information
/// separators `\x1c`..=`\x1f`.
pub fn is_separator(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

fn split_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(is_separator).filter(|word| !word.is_empty())
}

impl SocialMediaCharFilter {
    /// Create a new social media char filter.
    pub fn new() -> Self {
        SocialMediaCharFilter
    }

    /// Check whether a trimmed word is a handle such as `@user` or `#topic`.
    fn is_handle(core: &str, sigil: char) -> bool {
        match core.strip_prefix(sigil) {
            Some(rest) => {
                !rest.is_empty() && rest.chars().all(|c| c.is_alphanumeric() || c == '_')
            }
            None => false,
        }
    }

    /// Check whether a word should be dropped entirely.
    fn is_noise(word: &str) -> bool {
        let core = word.trim_matches(PUNCTUATION_EDGES);
        core.is_empty()
            || Self::is_handle(core, '@')
            || Self::is_handle(core, '#')
            || URL_PREFIXES.iter().any(|prefix| core.starts_with(prefix))
    }
}

impl CharFilter for SocialMediaCharFilter {
    fn filter(&self, input: &str) -> String {
        let lowered = input.to_lowercase();

        // Surviving words keep their original punctuation; it is stripped
        // character-wise below.
        let kept = split_words(&lowered)
            .filter(|word| !Self::is_noise(word))
            .collect::<Vec<_>>()
            .join(" ");

        let filtered: String = kept
            .chars()
            .filter(|c| c.is_ascii())
            .filter(|c| !c.is_ascii_digit())
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || is_separator(*c))
            .collect();

        split_words(&filtered).collect::<Vec<_>>().join(" ")
    }

    fn name(&self) -> &'static str {
        "social_media"
    }
}

/// Clean a raw post with [`SocialMediaCharFilter`].
pub fn clean(text: &str) -> String {
    SocialMediaCharFilter::new().filter(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercase_and_punctuation() {
        assert_eq!(clean("Saya TIDAK suka, dia!!!"), "saya tidak suka dia");
        assert_eq!(clean("(halo)"), "halo");
    }

    #[test]
    fn test_drops_mentions_hashtags_and_urls() {
        assert_eq!(clean("@budi kamu jahat"), "kamu jahat");
        assert_eq!(clean("kamu jahat #marah"), "kamu jahat");
        assert_eq!(clean("lihat https://example.com/a sekarang"), "lihat sekarang");
        assert_eq!(clean("lihat http://example.com"), "lihat");
        assert_eq!(clean("buka www.example.com ya"), "buka ya");
        // Trailing punctuation does not protect a mention
        assert_eq!(clean("(@budi_01), halo"), "halo");
    }

    #[test]
    fn test_keeps_non_handle_sigils() {
        // "@" alone or followed by punctuation is not a mention; the sigil is
        // removed character-wise instead.
        assert_eq!(clean("a @ b"), "a b");
        assert_eq!(clean("email@domain"), "emaildomain");
        assert_eq!(clean("@budi-x"), "budix");
    }

    #[test]
    fn test_strips_digits_and_non_ascii() {
        assert_eq!(clean("ada 123 orang 😡 di2 sana"), "ada orang di sana");
        assert_eq!(clean("café"), "caf");
        assert_eq!(clean("snake_case ok"), "snake_case ok");
    }

    #[test]
    fn test_information_separators_split_words() {
        assert_eq!(clean("a\x1cb"), "a b");
        assert_eq!(clean("saya\x1dsuka\x1edia\x1fya"), "saya suka dia ya");
        assert_eq!(clean("a\x0bb\x0cc"), "a b c");
        assert!(('\x1c'..='\x1f').all(is_separator));
        assert!(!is_separator('_'));
    }

    #[test]
    fn test_empty_and_whitespace() {
        assert_eq!(clean(""), "");
        assert_eq!(clean("   \t\n "), "");
        assert_eq!(clean("!!! ... ???"), "");
    }

    #[test]
    fn test_clean_is_idempotent() {
        let inputs = [
            "",
            "Halo @budi, cek https://t.co/x #viral!!",
            "RT @user: Agama ITU baik... 100% 🙏",
            "www.a.com www. http:// @ # _ __",
            "İstanbul ÇAY şeker",
            "a\u{00a0}b\tc\nd",
        ];
        for input in inputs {
            let once = clean(input);
            assert_eq!(clean(&once), once, "not idempotent for {input:?}");
        }
    }

    #[test]
    fn test_output_charset() {
        let cleaned = clean("Ünïcödé 42 @x #y http://z tok3n_ok ~~~");
        assert!(
            cleaned
                .chars()
                .all(|c| c.is_ascii_lowercase() || c == '_' || c == ' ')
        );
    }

    #[test]
    fn test_filter_name() {
        assert_eq!(SocialMediaCharFilter::new().name(), "social_media");
    }
}
