//! # Tagger
//!
//! Bundles a trained model with a decoder behind one configuration, so a
//! caller can train once and tag many sentences.

use std::path::Path;

use tracing::{debug, info};

use crate::corpus::{tokenize, TaggedCorpus};
use crate::decoder::{DecoderConfig, SentenceTerminator, TaggedPath, ViterbiDecoder};
use crate::error::{Result, SudiError};
use crate::eval::Accuracy;
use crate::model::{Estimator, EstimatorConfig, HmmModel};

/// Configuration for the tagger.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaggerConfig {
    /// Training options.
    pub estimator: EstimatorConfig,
    /// Decoding options.
    pub decoder: DecoderConfig,
}

impl TaggerConfig {
    /// Create a new tagger configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the log-score charged for words a tag never emitted.
    pub fn with_unseen_penalty(mut self, penalty: f64) -> Self {
        self.decoder.unseen_penalty = penalty;
        self
    }

    /// Set or clear the sentence terminator rule.
    pub fn with_terminator(mut self, terminator: Option<SentenceTerminator>) -> Self {
        self.decoder.terminator = terminator;
        self
    }

    /// Count the final token of each training sentence as an emission.
    pub fn with_final_token_emissions(mut self, enabled: bool) -> Self {
        self.estimator.final_token_emissions = enabled;
        self
    }
}

/// A trained HMM tagger.
#[derive(Debug, Clone)]
pub struct Tagger {
    config: TaggerConfig,
    model: HmmModel,
    decoder: ViterbiDecoder,
}

impl Tagger {
    /// Train a tagger on an aligned corpus.
    pub fn train(corpus: &TaggedCorpus, config: TaggerConfig) -> Result<Self> {
        let decoder = ViterbiDecoder::new(config.decoder.clone())?;
        let model = Estimator::new(config.estimator.clone()).estimate(corpus)?;

        Ok(Self {
            config,
            model,
            decoder,
        })
    }

    /// Train a tagger from a tag file and its aligned word file.
    pub fn from_paths<T: AsRef<Path>, W: AsRef<Path>>(
        tags: T,
        words: W,
        config: TaggerConfig,
    ) -> Result<Self> {
        info!(
            tags = %tags.as_ref().display(),
            words = %words.as_ref().display(),
            "loading training corpus"
        );
        let corpus = TaggedCorpus::from_paths(tags, words)?;
        Self::train(&corpus, config)
    }

    /// Tag a whitespace-separated sentence.
    ///
    /// # Examples
    /// ```
    /// use sudi_core::{TaggedCorpus, Tagger, TaggerConfig};
    ///
    /// let corpus = TaggedCorpus::from_lines(
    ///     &["D N V .", "D N ."],
    ///     &["the dog ran .", "a cat ."],
    /// ).unwrap();
    /// let tagger = Tagger::train(&corpus, TaggerConfig::default()).unwrap();
    ///
    /// assert_eq!(tagger.tag("a dog .").unwrap(), vec!["D", "N", "."]);
    /// ```
    pub fn tag(&self, sentence: &str) -> Result<Vec<String>> {
        self.tag_tokens(&tokenize(sentence))
    }

    /// Tag an already tokenized sentence.
    pub fn tag_tokens<S: AsRef<str>>(&self, words: &[S]) -> Result<Vec<String>> {
        self.decoder.decode(&self.model, words)
    }

    /// Tag an already tokenized sentence, keeping the path score.
    pub fn tag_scored<S: AsRef<str>>(&self, words: &[S]) -> Result<TaggedPath> {
        self.decoder.decode_scored(&self.model, words)
    }

    /// Tag every sentence of a reference corpus and score the result.
    pub fn evaluate(&self, reference: &TaggedCorpus) -> Result<Accuracy> {
        let mut accuracy = Accuracy::new();

        for (idx, sentence) in reference.sentences().iter().enumerate() {
            let predicted = match self.tag_tokens(sentence.words()) {
                Ok(tags) => tags,
                Err(SudiError::NoViablePath { position }) => {
                    debug!(sentence = idx + 1, position, "no viable path, scoring as untagged");
                    Vec::new()
                }
                Err(err) => return Err(err),
            };
            accuracy.record(sentence.tags(), &predicted);
        }

        info!(
            correct = accuracy.correct,
            incorrect = accuracy.incorrect,
            "evaluation complete"
        );
        Ok(accuracy)
    }

    /// The trained model.
    pub fn model(&self) -> &HmmModel {
        &self.model
    }

    /// The tagger configuration.
    pub fn config(&self) -> &TaggerConfig {
        &self.config
    }
}
