//! Aligned tag/word training data.

use std::io::BufRead;
use std::path::Path;

use crate::corpus::reader::read_lines_from_path;
use crate::corpus::tokenize;
use crate::error::{Result, SudiError};

/// A sentence with one tag per word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedSentence {
    words: Vec<String>,
    tags: Vec<String>,
}

impl TaggedSentence {
    /// Pair up a word sequence with its tag sequence.
    ///
    /// Both sequences must be non-empty and of equal length.
    pub fn new(words: Vec<String>, tags: Vec<String>) -> Result<Self> {
        if words.is_empty() && tags.is_empty() {
            return Err(SudiError::EmptyInput);
        }
        if words.len() != tags.len() {
            return Err(SudiError::MisalignedSentence {
                line: 1,
                tags: tags.len(),
                words: words.len(),
            });
        }
        Ok(Self { words, tags })
    }

    /// The observed words.
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// The tags, aligned with [`words`](Self::words).
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always `false`: a tagged sentence has at least one token.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterate over `(tag, word)` pairs.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.tags
            .iter()
            .map(String::as_str)
            .zip(self.words.iter().map(String::as_str))
    }
}

/// A training or reference corpus of tagged sentences.
///
/// Built from two line sources where line *k* of the tag source tags line *k*
/// of the word source token for token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaggedCorpus {
    sentences: Vec<TaggedSentence>,
}

impl TaggedCorpus {
    /// Build a corpus from already tagged sentences.
    pub fn new(sentences: Vec<TaggedSentence>) -> Self {
        Self { sentences }
    }

    /// Align tag lines with word lines.
    ///
    /// Line pairs that are blank on both sides are skipped. Any other
    /// disagreement in line or token counts is reported as misaligned data.
    pub fn from_lines<T, W>(tag_lines: &[T], word_lines: &[W]) -> Result<Self>
    where
        T: AsRef<str>,
        W: AsRef<str>,
    {
        if tag_lines.len() != word_lines.len() {
            return Err(SudiError::LineCountMismatch {
                tag_lines: tag_lines.len(),
                word_lines: word_lines.len(),
            });
        }

        let mut sentences = Vec::with_capacity(tag_lines.len());
        for (idx, (tag_line, word_line)) in tag_lines.iter().zip(word_lines).enumerate() {
            let tags = tokenize(tag_line.as_ref());
            let words = tokenize(word_line.as_ref());

            if tags.is_empty() && words.is_empty() {
                continue;
            }
            if tags.len() != words.len() {
                return Err(SudiError::MisalignedSentence {
                    line: idx + 1,
                    tags: tags.len(),
                    words: words.len(),
                });
            }

            sentences.push(TaggedSentence { words, tags });
        }

        Ok(Self { sentences })
    }

    /// Align two line-oriented readers.
    pub fn from_readers<T: BufRead, W: BufRead>(tags: T, words: W) -> Result<Self> {
        let tag_lines = tags.lines().collect::<std::io::Result<Vec<_>>>()?;
        let word_lines = words.lines().collect::<std::io::Result<Vec<_>>>()?;
        Self::from_lines(&tag_lines, &word_lines)
    }

    /// Align a tag file with a word file.
    pub fn from_paths<T: AsRef<Path>, W: AsRef<Path>>(tags: T, words: W) -> Result<Self> {
        let tag_lines = read_lines_from_path(tags.as_ref())?;
        let word_lines = read_lines_from_path(words.as_ref())?;
        Self::from_lines(&tag_lines, &word_lines)
    }

    /// The sentences in corpus order.
    pub fn sentences(&self) -> &[TaggedSentence] {
        &self.sentences
    }

    /// Number of sentences.
    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    /// Returns `true` if the corpus has no sentences.
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }

    /// Total number of tokens across all sentences.
    pub fn num_tokens(&self) -> usize {
        self.sentences.iter().map(TaggedSentence::len).sum()
    }
}
