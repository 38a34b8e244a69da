use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref PUNCTUATION: Regex = Regex::new(r#"[,().'"\[\]:]"#).expect("valid regex");
}

/// NFKC-normalize, blank out punctuation and lowercase.
pub fn normalize(text: &str) -> String {
    let composed = text.nfkc().collect::<String>();
    PUNCTUATION.replace_all(&composed, " ").to_lowercase()
}

/// Tokenize text into (term, position) pairs; positions count every token from zero.
pub fn tokenize(text: &str) -> Vec<(String, usize)> {
    normalize(text)
        .split_whitespace()
        .enumerate()
        .map(|(pos, word)| (word.to_string(), pos))
        .collect()
}
