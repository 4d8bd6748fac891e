//! # Viterbi Decoding for HMMs
//!
//! Finds the most likely tag sequence for a sentence under a trained
//! [`HmmModel`], working in base-10 log space.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::decoder::backtrace::Backtrace;
use crate::error::{Result, SudiError};
use crate::model::{HmmModel, TagState};

/// Log-score charged when a tag never emitted the current word in training.
pub const DEFAULT_UNSEEN_PENALTY: f64 = -100.0;

/// A word/tag pair that pins the final tag of a sentence.
///
/// When a sentence ends with `word`, decoding ends in `tag` rather than in
/// the best-scoring final tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceTerminator {
    /// Final word that triggers the rule.
    pub word: String,
    /// Tag forced at the final position.
    pub tag: String,
}

impl SentenceTerminator {
    /// Create a terminator rule.
    pub fn new(word: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            tag: tag.into(),
        }
    }

    /// The period rule: a final `.` word is tagged `.`.
    pub fn period() -> Self {
        Self::new(".", ".")
    }
}

/// Configuration for the decoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// Log-score used in place of an emission the tag never produced.
    pub unseen_penalty: f64,
    /// Optional rule pinning the final tag.
    pub terminator: Option<SentenceTerminator>,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            unseen_penalty: DEFAULT_UNSEEN_PENALTY,
            terminator: Some(SentenceTerminator::period()),
        }
    }
}

impl DecoderConfig {
    /// Create a new decoder configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the unseen-word penalty.
    pub fn with_unseen_penalty(mut self, penalty: f64) -> Self {
        self.unseen_penalty = penalty;
        self
    }

    /// Set or clear the sentence terminator rule.
    pub fn with_terminator(mut self, terminator: Option<SentenceTerminator>) -> Self {
        self.terminator = terminator;
        self
    }

    /// Check that the configuration is usable.
    pub fn validate(&self) -> Result<()> {
        if !self.unseen_penalty.is_finite() || self.unseen_penalty >= 0.0 {
            return Err(SudiError::InvalidConfig(format!(
                "unseen-word penalty must be a finite negative log-score, got {}",
                self.unseen_penalty
            )));
        }
        Ok(())
    }
}

/// The decoded tag sequence with its log-score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedPath {
    /// One tag per input word.
    pub tags: Vec<String>,
    /// Cumulative base-10 log-score of the path.
    pub log_score: f64,
}

/// Viterbi decoder over a trained HMM.
#[derive(Debug, Clone, Default)]
pub struct ViterbiDecoder {
    config: DecoderConfig,
}

impl ViterbiDecoder {
    /// Create a decoder, rejecting invalid configurations.
    pub fn new(config: DecoderConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Decode the most likely tag sequence for `words`.
    pub fn decode<S: AsRef<str>>(&self, model: &HmmModel, words: &[S]) -> Result<Vec<String>> {
        self.decode_scored(model, words).map(|path| path.tags)
    }

    /// Decode the most likely tag sequence together with its log-score.
    ///
    /// Ties are resolved in favour of the first candidate in lexicographic
    /// order of predecessor, then destination tag.
    pub fn decode_scored<S: AsRef<str>>(
        &self,
        model: &HmmModel,
        words: &[S],
    ) -> Result<TaggedPath> {
        if words.is_empty() {
            return Err(SudiError::EmptyInput);
        }

        let mut frontier: BTreeMap<TagState<'_>, f64> = BTreeMap::new();
        frontier.insert(TagState::Start, 0.0);
        let mut backtrace = Backtrace::with_capacity(words.len());

        for (position, word) in words.iter().enumerate() {
            let word = word.as_ref();
            let mut next_scores: BTreeMap<TagState<'_>, f64> = BTreeMap::new();
            let column = backtrace.push_column();

            for (&curr, &score) in &frontier {
                // Dead ends have an empty row and drop out here.
                let Some(row) = model.transitions(curr) else {
                    continue;
                };

                for (next, transition) in row.iter() {
                    let emission = model
                        .emission(next, word)
                        .unwrap_or(self.config.unseen_penalty);
                    let candidate = score + transition + emission;

                    let slot = next_scores
                        .entry(TagState::Tag(next))
                        .or_insert(f64::NEG_INFINITY);
                    if candidate > *slot {
                        *slot = candidate;
                        column.insert(next, curr);
                    }
                }
            }

            if next_scores.is_empty() {
                return Err(SudiError::NoViablePath { position });
            }
            trace!(position, word, reached = next_scores.len(), "advanced frontier");
            frontier = next_scores;
        }

        let (terminal, log_score) = self.terminal(&frontier, words)?;
        let tags = backtrace.trace(terminal)?;

        debug!(words = words.len(), log_score, "decoded sentence");
        Ok(TaggedPath { tags, log_score })
    }

    /// Pick the tag the path ends in.
    fn terminal<'m, S: AsRef<str>>(
        &self,
        frontier: &BTreeMap<TagState<'m>, f64>,
        words: &[S],
    ) -> Result<(&'m str, f64)> {
        if let Some(rule) = &self.config.terminator {
            let ends_sentence = words
                .last()
                .is_some_and(|word| word.as_ref() == rule.word);
            if ends_sentence {
                let pinned = frontier.iter().find_map(|(state, score)| match state {
                    TagState::Tag(tag) if *tag == rule.tag => Some((*tag, *score)),
                    _ => None,
                });
                match pinned {
                    Some(pinned) => return Ok(pinned),
                    None => debug!(
                        tag = %rule.tag,
                        "terminator tag not reachable, using best final tag"
                    ),
                }
            }
        }

        let mut best: Option<(&'m str, f64)> = None;
        for (state, &score) in frontier {
            if let TagState::Tag(tag) = *state {
                if best.is_none_or(|(_, best_score)| score > best_score) {
                    best = Some((tag, score));
                }
            }
        }
        best.ok_or(SudiError::NoViablePath {
            position: words.len().saturating_sub(1),
        })
    }

    /// The decoder configuration.
    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::{tokenize, TaggedCorpus};
    use crate::model::Estimator;

    fn model() -> HmmModel {
        let corpus =
            TaggedCorpus::from_lines(&["D N V .", "D N ."], &["the dog ran .", "a cat ."]).unwrap();
        Estimator::default().estimate(&corpus).unwrap()
    }

    #[test]
    fn test_decode_known_sentence() {
        let decoder = ViterbiDecoder::default();
        let tags = decoder.decode(&model(), &tokenize("a dog .")).unwrap();
        assert_eq!(tags, vec!["D", "N", "."]);
    }

    #[test]
    fn test_decode_unseen_word() {
        let decoder = ViterbiDecoder::default();
        let path = decoder
            .decode_scored(&model(), &tokenize("a zebra ."))
            .unwrap();

        assert_eq!(path.tags, vec!["D", "N", "."]);
        assert!(path.log_score < 2.0 * DEFAULT_UNSEEN_PENALTY + 1.0);
    }

    #[test]
    fn test_one_word_sentence_uses_start_row() {
        let decoder = ViterbiDecoder::default();
        let model = model();

        let path = decoder.decode_scored(&model, &["the"]).unwrap();
        assert_eq!(path.tags, vec!["D"]);
        let expected = model.start().log_prob("D").unwrap() + model.emission("D", "the").unwrap();
        assert!((path.log_score - expected).abs() < 1e-12);

        let path = decoder.decode_scored(&model, &["dog"]).unwrap();
        assert_eq!(path.tags, vec!["D"]);
        assert!((path.log_score - DEFAULT_UNSEEN_PENALTY).abs() < 1e-12);
    }

    #[test]
    fn test_output_length_matches_input() {
        let decoder = ViterbiDecoder::default();
        let model = model();
        for sentence in ["the dog", "a cat ran", "the dog ran .", "cat"] {
            let words = tokenize(sentence);
            let tags = decoder.decode(&model, &words).unwrap();
            assert_eq!(tags.len(), words.len(), "{sentence}");
        }
    }

    #[test]
    fn test_decode_is_deterministic() {
        let decoder = ViterbiDecoder::default();
        let model = model();
        let words = tokenize("the cat ran .");
        let first = decoder.decode_scored(&model, &words).unwrap();
        for _ in 0..5 {
            assert_eq!(decoder.decode_scored(&model, &words).unwrap(), first);
        }
    }

    #[test]
    fn test_empty_sentence() {
        let decoder = ViterbiDecoder::default();
        let words: Vec<String> = Vec::new();
        assert!(matches!(
            decoder.decode(&model(), &words),
            Err(SudiError::EmptyInput)
        ));
    }

    #[test]
    fn test_dead_end_reports_position() {
        let corpus = TaggedCorpus::from_lines(&["A B"], &["x y"]).unwrap();
        let model = Estimator::default().estimate(&corpus).unwrap();
        let decoder = ViterbiDecoder::default();

        assert_eq!(decoder.decode(&model, &["x", "y"]).unwrap(), vec!["A", "B"]);
        assert!(matches!(
            decoder.decode(&model, &["x", "y", "z"]),
            Err(SudiError::NoViablePath { position: 2 })
        ));
    }

    #[test]
    fn test_terminator_overrides_best_tag() {
        let corpus = TaggedCorpus::from_lines(
            &["D N V", "D N V", "D N END"],
            &["the dog ran", "a cat sat", "the dog stop"],
        )
        .unwrap();
        let model = Estimator::default().estimate(&corpus).unwrap();
        let words = tokenize("the dog stop");

        let plain = ViterbiDecoder::new(DecoderConfig::new().with_terminator(None)).unwrap();
        assert_eq!(plain.decode(&model, &words).unwrap(), vec!["D", "N", "V"]);

        let pinned = ViterbiDecoder::new(
            DecoderConfig::new().with_terminator(Some(SentenceTerminator::new("stop", "END"))),
        )
        .unwrap();
        assert_eq!(pinned.decode(&model, &words).unwrap(), vec!["D", "N", "END"]);
    }

    #[test]
    fn test_unreachable_terminator_falls_back() {
        let corpus = TaggedCorpus::from_lines(&["D N"], &["the dog"]).unwrap();
        let model = Estimator::default().estimate(&corpus).unwrap();
        let decoder = ViterbiDecoder::default();

        assert_eq!(decoder.decode(&model, &["the", "."]).unwrap(), vec!["D", "N"]);
    }

    #[test]
    fn test_invalid_penalty() {
        for penalty in [0.0, 5.0, f64::NAN, f64::NEG_INFINITY] {
            let config = DecoderConfig::new().with_unseen_penalty(penalty);
            assert!(matches!(
                ViterbiDecoder::new(config),
                Err(SudiError::InvalidConfig(_))
            ));
        }
    }
}
