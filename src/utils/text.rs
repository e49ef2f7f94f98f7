use crate::config::{SearchConfig, WordChars};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

pub type TokenSet = HashSet<String>;

// letters (with their combining marks), numbers and `_`; no other punctuation
static UNICODE_WORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\p{Alphabetic}\p{M}\p{N}_]+").expect("unicode word pattern compiles")
});

static ASCII_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9_]+").expect("ascii word pattern compiles"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tokenizer {
    mode: WordChars,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(WordChars::default())
    }
}

impl Tokenizer {
    pub fn new(mode: WordChars) -> Self {
        Self { mode }
    }

    pub fn from_config(config: &SearchConfig) -> Self {
        Self::new(config.word_chars)
    }

    pub fn mode(&self) -> WordChars {
        self.mode
    }

    fn pattern(&self) -> &'static Regex {
        match self.mode {
            WordChars::Unicode => &UNICODE_WORD,
            WordChars::Ascii => &ASCII_WORD,
        }
    }

    /// Every token occurrence in `text`, left to right, duplicates included.
    pub fn tokens<'t>(&self, text: &'t str) -> impl Iterator<Item = &'t str> + 't {
        self.pattern().find_iter(text).map(|m| m.as_str())
    }

    pub fn tokenize(&self, text: Option<&str>) -> TokenSet {
        match text {
            Some(text) => self.tokenize_text(text),
            None => TokenSet::new(),
        }
    }

    pub fn tokenize_text(&self, text: &str) -> TokenSet {
        if text.is_empty() {
            return TokenSet::new();
        }
        self.tokens(text).map(str::to_string).collect()
    }
}

pub fn tokenize(text: Option<&str>) -> TokenSet {
    Tokenizer::default().tokenize(text)
}

pub fn tokenize_text(text: &str) -> TokenSet {
    Tokenizer::default().tokenize_text(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> TokenSet {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn empty_and_absent_input_give_no_tokens() {
        assert!(tokenize(None).is_empty());
        assert!(tokenize(Some("")).is_empty());
        assert!(tokenize_text("").is_empty());
        assert!(tokenize_text("  ,;!? \n\t").is_empty());
    }

    #[test]
    fn order_does_not_matter() {
        assert_eq!(tokenize_text("cat dog"), tokenize_text("dog cat"));
        assert_eq!(tokenize_text("cat dog"), set(&["cat", "dog"]));
    }

    #[test]
    fn separators_are_discarded() {
        assert_eq!(tokenize_text("foo, bar!! baz"), set(&["foo", "bar", "baz"]));
        assert_eq!(tokenize_text("a-b/c.d"), set(&["a", "b", "c", "d"]));
    }

    #[test]
    fn underscore_and_digits_are_word_characters() {
        assert_eq!(
            tokenize_text("v2_release 123"),
            set(&["v2_release", "123"])
        );
    }

    #[test]
    fn repeated_tokens_collapse() {
        assert_eq!(tokenize_text("the the the"), set(&["the"]));
    }

    #[test]
    fn case_is_preserved() {
        assert_eq!(tokenize_text("The the THE"), set(&["The", "the", "THE"]));
    }

    #[test]
    fn unicode_letters_stay_inside_tokens() {
        assert_eq!(
            tokenize_text("café münchen"),
            set(&["café", "münchen"])
        );
        assert_eq!(
            tokenize_text("Willkommen in Straße, مرحبا бюро"),
            set(&["Willkommen", "in", "Straße", "مرحبا", "бюро"])
        );
    }

    #[test]
    fn combining_marks_do_not_split_words() {
        // "cafe" followed by U+0301 COMBINING ACUTE ACCENT
        let decomposed = "cafe\u{301} au lait";
        assert_eq!(
            tokenize_text(decomposed),
            set(&["cafe\u{301}", "au", "lait"])
        );
    }

    #[test]
    fn ascii_mode_splits_on_non_ascii_letters() {
        let tokenizer = Tokenizer::new(WordChars::Ascii);
        assert_eq!(tokenizer.tokenize_text("café münchen"), set(&["caf", "m", "nchen"]));
        assert_eq!(tokenizer.tokenize_text("v2_release"), set(&["v2_release"]));
    }

    #[test]
    fn connector_punctuation_and_joiners_separate_tokens() {
        assert_eq!(tokenize_text("foo\u{203F}bar"), set(&["foo", "bar"]));
        assert_eq!(tokenize_text("x\u{2040}y"), set(&["x", "y"]));
        assert_eq!(tokenize_text("a\u{200D}b"), set(&["a", "b"]));
        assert_eq!(tokenize_text("snake\u{FE4F}case"), set(&["snake", "case"]));
    }

    #[test]
    fn tokens_contain_only_word_characters() {
        let mark = Regex::new(r"^\p{M}$").unwrap();
        let text = "Öffnungszeiten: Mo–Fr 9:00-17:00 (außer an Feiertagen) #info @stadt \
                    foo\u{203F}bar a\u{200D}b x\u{2040}y cafe\u{301} ½ v2_release";
        for token in tokenize_text(text) {
            assert!(!token.is_empty());
            assert!(
                token
                    .chars()
                    .all(|c| c.is_alphanumeric() || c == '_' || mark.is_match(c.encode_utf8(&mut [0; 4]))),
                "unexpected separator in {token:?}"
            );
        }
    }

    #[test]
    fn retokenizing_joined_tokens_is_stable() {
        let original = tokenize_text("Bürgeramt, Bürgeramt: Termine & Öffnungszeiten_2024!");
        let mut members: Vec<&str> = original.iter().map(String::as_str).collect();
        members.sort_unstable();
        let joined = members.join(" ");
        assert_eq!(tokenize_text(&joined), original);
    }

    #[test]
    fn tokens_iterator_keeps_order_and_duplicates() {
        let tokenizer = Tokenizer::default();
        let tokens: Vec<&str> = tokenizer.tokens("b a, b").collect();
        assert_eq!(tokens, vec!["b", "a", "b"]);
    }

    #[test]
    fn tokenizer_is_shareable_across_threads() {
        let handles: Vec<_> = (0..4)
            .map(|i| std::thread::spawn(move || tokenize_text(&format!("doc{i} shared"))))
            .collect();
        for (i, handle) in handles.into_iter().enumerate() {
            let tokens = handle.join().expect("tokenizer thread panicked");
            let doc = format!("doc{i}");
            assert_eq!(tokens, set(&[doc.as_str(), "shared"]));
        }
    }
}
