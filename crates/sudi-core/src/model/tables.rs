//! Immutable log-probability tables produced by training.

use std::collections::BTreeMap;

/// A state of the hidden chain: the synthetic sentence start, or a real tag.
///
/// The start marker is its own variant, so no tag string can collide with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TagState<'a> {
    /// Beginning of sentence. Has outgoing transitions only.
    Start,
    /// A tag discovered from training data.
    Tag(&'a str),
}

impl<'a> TagState<'a> {
    /// The tag name, or `None` for the start marker.
    pub fn tag(self) -> Option<&'a str> {
        match self {
            TagState::Start => None,
            TagState::Tag(tag) => Some(tag),
        }
    }
}

/// A base-10 log-probability distribution over string outcomes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LogDistribution {
    log_probs: BTreeMap<String, f64>,
}

impl LogDistribution {
    /// Normalize raw counts into log-probabilities.
    ///
    /// `total` is the denominator; it may exceed the sum of `counts` when part
    /// of the mass lives outside this distribution.
    pub(crate) fn from_counts<'c, I>(counts: I, total: u64) -> Self
    where
        I: IntoIterator<Item = (&'c str, u64)>,
    {
        let log_probs = counts
            .into_iter()
            .map(|(key, count)| (key.to_owned(), log_ratio(count, total)))
            .collect();
        Self { log_probs }
    }

    /// Log-probability of `key`, if it was observed.
    pub fn log_prob(&self, key: &str) -> Option<f64> {
        self.log_probs.get(key).copied()
    }

    /// Iterate over `(outcome, log-probability)` in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.log_probs.iter().map(|(key, lp)| (key.as_str(), *lp))
    }

    /// Number of observed outcomes.
    pub fn len(&self) -> usize {
        self.log_probs.len()
    }

    /// Returns `true` if nothing was observed.
    pub fn is_empty(&self) -> bool {
        self.log_probs.is_empty()
    }

    /// Sum of the probabilities in linear space.
    pub fn linear_mass(&self) -> f64 {
        self.log_probs.values().map(|lp| 10f64.powf(*lp)).sum()
    }
}

/// Emission distribution of one tag.
///
/// The end-of-sentence slot is kept apart from the words so that it can
/// never be matched against decode input.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EmissionRow {
    pub(crate) words: LogDistribution,
    pub(crate) end_of_sentence: Option<f64>,
}

impl EmissionRow {
    /// Log-probability of the tag emitting `word`.
    pub fn log_prob(&self, word: &str) -> Option<f64> {
        self.words.log_prob(word)
    }

    /// The word distribution, without the end-of-sentence slot.
    pub fn words(&self) -> &LogDistribution {
        &self.words
    }

    /// Log-probability mass recorded for "sentence ends here".
    pub fn end_of_sentence(&self) -> Option<f64> {
        self.end_of_sentence
    }

    /// Sum of the probabilities in linear space, end-of-sentence included.
    pub fn linear_mass(&self) -> f64 {
        self.words.linear_mass() + self.end_of_sentence.map_or(0.0, |lp| 10f64.powf(lp))
    }
}

/// A trained Hidden Markov Model.
///
/// Read-only once built; decoders borrow it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HmmModel {
    pub(crate) start: LogDistribution,
    pub(crate) transitions: BTreeMap<String, LogDistribution>,
    pub(crate) emissions: BTreeMap<String, EmissionRow>,
}

impl HmmModel {
    /// Distribution over sentence-initial tags.
    pub fn start(&self) -> &LogDistribution {
        &self.start
    }

    /// Outgoing transition row of a state.
    ///
    /// Every trained tag has a row, possibly empty for a dead end.
    pub fn transitions(&self, state: TagState<'_>) -> Option<&LogDistribution> {
        match state {
            TagState::Start => Some(&self.start),
            TagState::Tag(tag) => self.transitions.get(tag),
        }
    }

    /// Emission row of a tag.
    pub fn emission_row(&self, tag: &str) -> Option<&EmissionRow> {
        self.emissions.get(tag)
    }

    /// Log-probability of `tag` emitting `word`, if it was observed.
    pub fn emission(&self, tag: &str, word: &str) -> Option<f64> {
        self.emissions.get(tag).and_then(|row| row.log_prob(word))
    }

    /// All tags seen in training, sorted.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.transitions.keys().map(String::as_str)
    }

    /// Number of distinct tags.
    pub fn num_tags(&self) -> usize {
        self.transitions.len()
    }

    /// Number of distinct words emitted by any tag.
    pub fn vocabulary_size(&self) -> usize {
        let mut words: Vec<&str> = self
            .emissions
            .values()
            .flat_map(|row| row.words.iter().map(|(word, _)| word))
            .collect();
        words.sort_unstable();
        words.dedup();
        words.len()
    }
}

pub(crate) fn log_ratio(count: u64, total: u64) -> f64 {
    (count as f64 / total as f64).log10()
}
