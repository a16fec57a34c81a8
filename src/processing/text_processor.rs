//! Text cleaning and tokenization

use regex::Regex;
use std::collections::HashSet;

/// A token is a run of two or more word characters between word boundaries,
/// so `Node.js` yields `node` and `js`.
const TOKEN_PATTERN: &str = r"\b\w\w+\b";

pub struct TextProcessor {
    stop_words: HashSet<String>,
    whitespace_regex: Regex,
    token_regex: Regex,
}

impl Default for TextProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl TextProcessor {
    /// A processor that keeps every word of two or more characters.
    pub fn new() -> Self {
        Self {
            stop_words: HashSet::new(),
            whitespace_regex: Regex::new(r"\s+").expect("Invalid whitespace regex"),
            token_regex: Regex::new(TOKEN_PATTERN).expect("Invalid token regex"),
        }
    }

    /// A processor that also drops common English stop words.
    pub fn with_stop_words() -> Self {
        Self {
            stop_words: Self::create_stop_words(),
            ..Self::new()
        }
    }

    /// Tokenize text into lowercase words. `\w` and `\b` are Unicode aware.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let cleaned = self.clean_text(text).to_lowercase();

        self.token_regex
            .find_iter(&cleaned)
            .map(|word| word.as_str().to_string())
            .filter(|word| !self.stop_words.contains(word))
            .collect()
    }

    /// Normalize typographic punctuation and collapse whitespace
    pub fn clean_text(&self, text: &str) -> String {
        let normalized = Self::normalize_unicode(text);
        self.whitespace_regex.replace_all(&normalized, " ").trim().to_string()
    }

    fn normalize_unicode(text: &str) -> String {
        text.chars()
            .map(|c| match c {
                '\u{2018}' | '\u{2019}' => '\'',
                '\u{201C}' | '\u{201D}' => '"',
                '\u{2013}' | '\u{2014}' => '-',
                '\u{2026}' => '.',
                '\u{00A0}' => ' ',
                _ => c,
            })
            .collect()
    }

    fn create_stop_words() -> HashSet<String> {
        let stop_words = [
            "a", "about", "an", "and", "are", "as", "at", "be", "been", "but", "by",
            "can", "for", "from", "has", "have", "he", "her", "his", "if", "in",
            "into", "is", "it", "its", "of", "on", "or", "our", "she", "so", "than",
            "that", "the", "their", "them", "then", "there", "these", "they", "this",
            "to", "us", "was", "we", "were", "which", "while", "who", "will", "with",
            "you", "your",
        ];

        stop_words.iter().map(|&s| s.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenization() {
        let processor = TextProcessor::new();
        let tokens = processor.tokenize("Rust programming, is AWESOME! a");

        assert_eq!(tokens, vec!["rust", "programming", "is", "awesome"]);
    }

    #[test]
    fn test_stop_words_are_optional() {
        let processor = TextProcessor::with_stop_words();
        let tokens = processor.tokenize("Rust is the language of the year");

        assert!(tokens.contains(&"rust".to_string()));
        assert!(!tokens.contains(&"is".to_string()));
        assert!(!tokens.contains(&"the".to_string()));
    }

    #[test]
    fn test_clean_text_normalizes_quotes_and_spacing() {
        let processor = TextProcessor::new();
        let cleaned = processor.clean_text("  \u{201C}Lead\u{201D}\n\n engineer \u{2013} Rust ");

        assert_eq!(cleaned, "\"Lead\" engineer - Rust");
    }

    #[test]
    fn test_punctuation_splits_terms() {
        let processor = TextProcessor::new();

        assert_eq!(processor.tokenize("Node.js developer"), vec!["node", "js", "developer"]);
        assert_eq!(processor.tokenize("ASP.NET, C# and 3.5"), vec!["asp", "net", "and"]);
        assert_eq!(processor.tokenize("I don't know"), vec!["don", "know"]);
        assert_eq!(processor.tokenize("full-stack_dev"), vec!["full", "stack_dev"]);
    }

    #[test]
    fn test_ideographs_form_one_token() {
        let processor = TextProcessor::new();
        assert_eq!(processor.tokenize("日本語 エンジニア"), vec!["日本語", "エンジニア"]);
    }

    #[test]
    fn test_tokenize_empty_text() {
        let processor = TextProcessor::new();
        assert!(processor.tokenize("   ").is_empty());
        assert!(processor.tokenize("a , . !").is_empty());
    }
}
