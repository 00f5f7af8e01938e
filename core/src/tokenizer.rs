use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref WORD: Regex = Regex::new(r"(?u)\w+").expect("valid regex");
}

/// Tokenize text into lowercase terms: every maximal run of word characters
/// (letters, digits, underscore), in document order. No stemming, no
/// stop-word removal.
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD.find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}
