use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while training or running the tagger.
#[derive(Debug, Error)]
pub enum SudiError {
    /// The sentence to tag is empty or contains only whitespace.
    #[error("input is empty or whitespace-only")]
    EmptyInput,

    /// Reading from an in-memory or already-open source failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A corpus file could not be opened or read.
    #[error("failed to read {}: {source}", path.display())]
    ReadFile {
        /// The file that could not be read.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The tag source and the word source have a different number of lines.
    #[error("misaligned training data: {tag_lines} tag lines but {word_lines} word lines")]
    LineCountMismatch {
        /// Lines in the tag source.
        tag_lines: usize,
        /// Lines in the word source.
        word_lines: usize,
    },

    /// A tag line and its word line have a different number of tokens.
    #[error("misaligned training data at line {line}: {tags} tags but {words} words")]
    MisalignedSentence {
        /// 1-based line number.
        line: usize,
        /// Tokens on the tag line.
        tags: usize,
        /// Tokens on the word line.
        words: usize,
    },

    /// The training corpus has no sentences, so no start distribution exists.
    #[error("training corpus contains no sentences")]
    EmptyCorpus,

    /// Every path through the model dead-ends before the sentence is consumed.
    #[error("no viable tag sequence: every path dead-ends at position {position}")]
    NoViablePath {
        /// 0-based word position at which the frontier became empty.
        position: usize,
    },

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The backtrace has no predecessor for a tag that was reached.
    #[error("backtrace has no entry for tag {tag:?} at position {position}")]
    BrokenBacktrace {
        /// The tag being traced.
        tag: String,
        /// 0-based word position.
        position: usize,
    },
}

/// Result type alias for sudi operations.
pub type Result<T> = std::result::Result<T, SudiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = SudiError::EmptyInput;
        assert_eq!(err.to_string(), "input is empty or whitespace-only");

        let err = SudiError::MisalignedSentence {
            line: 3,
            tags: 4,
            words: 5,
        };
        assert_eq!(
            err.to_string(),
            "misaligned training data at line 3: 4 tags but 5 words"
        );

        let err = SudiError::ReadFile {
            path: PathBuf::from("missing.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(err.to_string().contains("missing.txt"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SudiError>();
    }
}
