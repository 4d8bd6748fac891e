//! # Parameter Estimation
//!
//! Turns a tagged corpus into an [`HmmModel`] in two passes: integer counts
//! are accumulated first, then every row is normalized into base-10
//! log-probabilities in a single conversion step.

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::corpus::TaggedCorpus;
use crate::error::{Result, SudiError};
use crate::model::counts::Counts;
use crate::model::tables::{log_ratio, EmissionRow, HmmModel, LogDistribution};

/// Configuration for the estimator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EstimatorConfig {
    /// Count the final token of each sentence as an ordinary emission instead
    /// of recording it as the end-of-sentence observation.
    pub final_token_emissions: bool,
}

impl EstimatorConfig {
    /// Create a new estimator configuration with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable counting the final token as an emission.
    pub fn with_final_token_emissions(mut self, enabled: bool) -> Self {
        self.final_token_emissions = enabled;
        self
    }
}

/// Maximum-likelihood estimator for HMM parameters.
#[derive(Debug, Clone, Default)]
pub struct Estimator {
    config: EstimatorConfig,
}

impl Estimator {
    /// Create an estimator.
    pub fn new(config: EstimatorConfig) -> Self {
        Self { config }
    }

    /// Accumulate raw counts over the whole corpus.
    pub fn count(&self, corpus: &TaggedCorpus) -> Counts {
        let mut counts = Counts::new();

        for sentence in corpus.sentences() {
            counts.observe_tags(sentence.tags());
        }
        for sentence in corpus.sentences() {
            counts.observe_words(sentence, self.config.final_token_emissions);
        }

        debug!(
            sentences = counts.sentences(),
            tags = counts.num_tags(),
            "accumulated training counts"
        );
        counts
    }

    /// Estimate a model from a corpus.
    pub fn estimate(&self, corpus: &TaggedCorpus) -> Result<HmmModel> {
        let model = normalize(&self.count(corpus))?;

        info!(
            sentences = corpus.len(),
            tokens = corpus.num_tokens(),
            tags = model.num_tags(),
            vocabulary = model.vocabulary_size(),
            "trained HMM"
        );
        Ok(model)
    }

    /// The estimator configuration.
    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }
}

/// Convert counts into log-probability tables.
///
/// Every tag gets a transition row and an emission row, even when it has
/// nothing to put in them.
pub fn normalize(counts: &Counts) -> Result<HmmModel> {
    if counts.sentences == 0 {
        return Err(SudiError::EmptyCorpus);
    }

    let start = LogDistribution::from_counts(
        counts.starts.iter().map(|(tag, n)| (tag.as_str(), *n)),
        counts.sentences,
    );

    let mut transitions = BTreeMap::new();
    let mut emissions = BTreeMap::new();

    for tag in &counts.tags {
        let total: u64 = Counts::row(&counts.transitions, tag).map(|(_, n)| n).sum();
        let row = LogDistribution::from_counts(Counts::row(&counts.transitions, tag), total);
        transitions.insert(tag.clone(), row);

        let ends = counts.sentence_end_count(tag);
        let total = ends + Counts::row(&counts.emissions, tag).map(|(_, n)| n).sum::<u64>();
        let row = EmissionRow {
            words: LogDistribution::from_counts(Counts::row(&counts.emissions, tag), total),
            end_of_sentence: (ends > 0).then(|| log_ratio(ends, total)),
        };
        emissions.insert(tag.clone(), row);
    }

    Ok(HmmModel {
        start,
        transitions,
        emissions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::tables::TagState;

    const EPS: f64 = 1e-9;

    fn corpus() -> TaggedCorpus {
        TaggedCorpus::from_lines(&["D N V .", "D N ."], &["the dog ran .", "a cat ."]).unwrap()
    }

    #[test]
    fn test_scenario_tables() {
        let model = Estimator::default().estimate(&corpus()).unwrap();

        assert_eq!(model.start().log_prob("D"), Some(0.0));
        assert_eq!(model.start().len(), 1);

        let d = model.transitions(TagState::Tag("D")).unwrap();
        assert_eq!(d.log_prob("N"), Some(0.0));

        assert!((model.emission("N", "dog").unwrap() - 0.5f64.log10()).abs() < EPS);
        assert!((model.emission("N", "cat").unwrap() - 0.5f64.log10()).abs() < EPS);
        assert_eq!(model.emission(".", "."), None);
    }

    #[test]
    fn test_rows_sum_to_one() {
        let corpus = TaggedCorpus::from_lines(
            &["D N V D N .", "N V .", "D N V", "P D N V ."],
            &["the dog saw a cat .", "dogs bark .", "the cat slept", "with a dog sat ."],
        )
        .unwrap();
        let model = Estimator::default().estimate(&corpus).unwrap();

        assert!((model.start().linear_mass() - 1.0).abs() < EPS);
        for tag in model.tags() {
            let row = model.transitions(TagState::Tag(tag)).unwrap();
            if !row.is_empty() {
                assert!((row.linear_mass() - 1.0).abs() < EPS, "transitions of {tag}");
            }
            let row = model.emission_row(tag).unwrap();
            assert!((row.linear_mass() - 1.0).abs() < EPS, "emissions of {tag}");
        }
    }

    #[test]
    fn test_dead_end_tag_has_empty_rows() {
        let model = Estimator::default().estimate(&corpus()).unwrap();

        let period = model.transitions(TagState::Tag(".")).unwrap();
        assert!(period.is_empty());

        let row = model.emission_row(".").unwrap();
        assert!(row.words().is_empty());
        assert_eq!(row.end_of_sentence(), Some(0.0));
    }

    #[test]
    fn test_final_token_emissions() {
        let config = EstimatorConfig::new().with_final_token_emissions(true);
        let model = Estimator::new(config).estimate(&corpus()).unwrap();

        assert_eq!(model.emission(".", "."), Some(0.0));
        assert_eq!(model.emission_row(".").unwrap().end_of_sentence(), None);
    }

    #[test]
    fn test_training_is_idempotent() {
        let estimator = Estimator::default();
        let first = estimator.estimate(&corpus()).unwrap();
        let second = estimator.estimate(&corpus()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_corpus() {
        let err = Estimator::default()
            .estimate(&TaggedCorpus::default())
            .unwrap_err();
        assert!(matches!(err, SudiError::EmptyCorpus));
    }
}
