use lazy_static::lazy_static;
use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};
use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use std::collections::HashSet;

lazy_static! {
    static ref RE: Regex = Regex::new(r"[\p{L}\p{N}]+").expect("valid regex");
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a","about","above","after","again","against","all","am","an","and","any","are","as","at",
            "be","because","been","before","being","below","between","both","but","by",
            "can","cannot","could",
            "did","do","does","doing","down","during",
            "each","few","for","from","further",
            "had","has","have","having","he","her","here","hers","herself","him","himself","his","how",
            "i","if","in","into","is","it","its","itself",
            "me","more","most","my","myself",
            "no","nor","not","of","off","on","once","only","or","other","ought","our","ours","ourselves","out","over","own",
            "same","she","should","so","some","such",
            "than","that","the","their","theirs","them","themselves","then","there","these","they","this","those","through","to","too",
            "under","until","up","very",
            "was","we","were","what","when","where","which","while","who","whom","why","with","would",
            "you","your","yours","yourself","yourselves"
        ];
        words.iter().copied().collect()
    };
}

fn is_stopword(token: &str) -> bool { STOPWORDS.contains(token) }

/// Text normalization policy applied to every document of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenizerConfig {
    /// Apply NFKC before case folding.
    pub unicode_normalize: bool,
    /// Terms shorter than this many characters are dropped.
    pub min_token_len: usize,
    pub remove_stopwords: bool,
    /// English Snowball stemming.
    pub stem: bool,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self { unicode_normalize: true, min_token_len: 1, remove_stopwords: false, stem: false }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Tokenizer {
    config: TokenizerConfig,
}

impl Tokenizer {
    pub fn new(config: TokenizerConfig) -> Self { Self { config } }

    pub fn config(&self) -> &TokenizerConfig { &self.config }

    /// Case-folds `text` and splits it into maximal runs of letters and digits.
    /// Empty or whitespace-only input yields an empty sequence.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let normalized = if self.config.unicode_normalize {
            text.nfkc().collect::<String>().to_lowercase()
        } else {
            text.to_lowercase()
        };
        let mut tokens = Vec::new();
        for mat in RE.find_iter(&normalized) {
            let token = mat.as_str();
            if token.chars().count() < self.config.min_token_len { continue; }
            if self.config.remove_stopwords && is_stopword(token) { continue; }
            let term = if self.config.stem { STEMMER.stem(token).into_owned() } else { token.to_string() };
            tokens.push(term);
        }
        tokens
    }
}

/// Tokenize with the default policy.
pub fn tokenize(text: &str) -> Vec<String> {
    Tokenizer::default().tokenize(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_punctuation_and_folds_case() {
        assert_eq!(tokenize("Rust, C++ & Go!"), vec!["rust", "c", "go"]);
    }

    #[test]
    fn whitespace_only_is_empty() {
        assert!(tokenize("  \t\n ").is_empty());
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn stems_when_enabled() {
        let t = Tokenizer::new(TokenizerConfig { stem: true, ..Default::default() });
        let toks = t.tokenize("Running, runner's run!");
        assert!(toks.iter().any(|w| w == "run"));
    }

    #[test]
    fn min_len_drops_short_terms() {
        let t = Tokenizer::new(TokenizerConfig { min_token_len: 2, ..Default::default() });
        assert_eq!(t.tokenize("a b cd 7 42"), vec!["cd", "42"]);
    }
}
