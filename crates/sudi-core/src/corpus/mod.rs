//! # Corpus Input
//!
//! Line-oriented readers for the aligned tag/word training sources and for
//! untagged decode input. Every line is one sentence of whitespace-separated
//! tokens.

pub mod reader;
pub mod tagged;

pub use reader::{read_sentences, read_sentences_from_path};
pub use tagged::{TaggedCorpus, TaggedSentence};

/// Split a line into whitespace-separated tokens.
///
/// # Examples
/// ```
/// use sudi_core::corpus::tokenize;
///
/// assert_eq!(tokenize("  the dog\tran . "), vec!["the", "dog", "ran", "."]);
/// assert!(tokenize("   ").is_empty());
/// ```
pub fn tokenize(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_owned).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_collapses_runs_of_whitespace() {
        assert_eq!(tokenize("a  b \t c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
    }
}
