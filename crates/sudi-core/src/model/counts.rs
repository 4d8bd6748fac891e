//! Raw co-occurrence counts gathered from a tagged corpus.

use std::collections::{BTreeMap, BTreeSet};

use crate::corpus::TaggedSentence;

/// Integer counts accumulated over a corpus before normalization.
///
/// Pairs are stored in flat ordered tables keyed by `(tag, next_tag)` and
/// `(tag, word)`, so all entries of one tag are contiguous.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Counts {
    pub(crate) tags: BTreeSet<String>,
    pub(crate) starts: BTreeMap<String, u64>,
    pub(crate) transitions: BTreeMap<(String, String), u64>,
    pub(crate) emissions: BTreeMap<(String, String), u64>,
    pub(crate) sentence_ends: BTreeMap<String, u64>,
    pub(crate) sentences: u64,
}

impl Counts {
    /// Create an empty set of counts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tag pass: start tags, tag bigrams, and the tag registry.
    pub fn observe_tags(&mut self, tags: &[String]) {
        let Some(first) = tags.first() else {
            return;
        };

        self.sentences += 1;
        *self.starts.entry(first.clone()).or_default() += 1;

        for tag in tags {
            if !self.tags.contains(tag) {
                self.tags.insert(tag.clone());
            }
        }

        for pair in tags.windows(2) {
            *self
                .transitions
                .entry((pair[0].clone(), pair[1].clone()))
                .or_default() += 1;
        }
    }

    /// Word pass: tag/word emissions.
    ///
    /// The final token of the sentence is recorded as an end-of-sentence
    /// observation of its tag unless `final_token_emissions` is set, in which
    /// case it counts as an ordinary emission.
    pub fn observe_words(&mut self, sentence: &TaggedSentence, final_token_emissions: bool) {
        let last = sentence.len().saturating_sub(1);

        for (idx, (tag, word)) in sentence.pairs().enumerate() {
            if idx == last && !final_token_emissions {
                *self.sentence_ends.entry(tag.to_owned()).or_default() += 1;
            } else {
                *self
                    .emissions
                    .entry((tag.to_owned(), word.to_owned()))
                    .or_default() += 1;
            }
        }
    }

    /// Number of sentences observed.
    pub fn sentences(&self) -> u64 {
        self.sentences
    }

    /// Number of distinct tags observed.
    pub fn num_tags(&self) -> usize {
        self.tags.len()
    }

    /// Count of `tag` opening a sentence.
    pub fn start_count(&self, tag: &str) -> u64 {
        self.starts.get(tag).copied().unwrap_or(0)
    }

    /// Count of `from` immediately followed by `to`.
    pub fn transition_count(&self, from: &str, to: &str) -> u64 {
        self.transitions
            .get(&(from.to_owned(), to.to_owned()))
            .copied()
            .unwrap_or(0)
    }

    /// Count of `tag` emitting `word`.
    pub fn emission_count(&self, tag: &str, word: &str) -> u64 {
        self.emissions
            .get(&(tag.to_owned(), word.to_owned()))
            .copied()
            .unwrap_or(0)
    }

    /// Count of sentences whose final token carries `tag`.
    pub fn sentence_end_count(&self, tag: &str) -> u64 {
        self.sentence_ends.get(tag).copied().unwrap_or(0)
    }

    /// Entries of a flat pair table whose first key is `tag`.
    pub(crate) fn row<'c>(
        table: &'c BTreeMap<(String, String), u64>,
        tag: &str,
    ) -> impl Iterator<Item = (&'c str, u64)> + 'c {
        let tag = tag.to_owned();
        table
            .range((tag.clone(), String::new())..)
            .take_while(move |((first, _), _)| *first == tag)
            .map(|((_, second), count)| (second.as_str(), *count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentence(tags: &str, words: &str) -> TaggedSentence {
        TaggedSentence::new(
            words.split(' ').map(String::from).collect(),
            tags.split(' ').map(String::from).collect(),
        )
        .unwrap()
    }

    fn observe(counts: &mut Counts, sentence: &TaggedSentence, final_token_emissions: bool) {
        counts.observe_tags(sentence.tags());
        counts.observe_words(sentence, final_token_emissions);
    }

    #[test]
    fn test_counts_tags_and_words() {
        let mut counts = Counts::new();
        observe(&mut counts, &sentence("D N V .", "the dog ran ."), false);
        observe(&mut counts, &sentence("D N .", "a cat ."), false);

        assert_eq!(counts.sentences(), 2);
        assert_eq!(counts.num_tags(), 4);
        assert_eq!(counts.start_count("D"), 2);
        assert_eq!(counts.transition_count("D", "N"), 2);
        assert_eq!(counts.transition_count("N", "V"), 1);
        assert_eq!(counts.transition_count(".", "D"), 0);
        assert_eq!(counts.emission_count("N", "dog"), 1);
        assert_eq!(counts.emission_count("N", "cat"), 1);
        assert_eq!(counts.emission_count(".", "."), 0);
        assert_eq!(counts.sentence_end_count("."), 2);
    }

    #[test]
    fn test_final_token_emissions() {
        let mut counts = Counts::new();
        observe(&mut counts, &sentence("D N .", "a cat ."), true);

        assert_eq!(counts.emission_count(".", "."), 1);
        assert_eq!(counts.sentence_end_count("."), 0);
    }

    #[test]
    fn test_row_selects_only_matching_tag() {
        let mut counts = Counts::new();
        observe(&mut counts, &sentence("N V N N", "dogs chase cats quickly"), false);
        observe(&mut counts, &sentence("NN N", "x y"), false);

        let row: Vec<_> = Counts::row(&counts.transitions, "N").collect();
        assert_eq!(row, vec![("N", 1), ("V", 1)]);
    }
}
