//! Token-level accuracy of predicted tags against a reference.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Running tally of correct and incorrect tags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accuracy {
    /// Positions where prediction and reference agree.
    pub correct: usize,
    /// Positions where they disagree, or where one sequence is missing a tag.
    pub incorrect: usize,
}

impl Accuracy {
    /// Create an empty tally.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare one predicted sentence against its reference.
    ///
    /// Positions past the end of the shorter sequence count as incorrect.
    pub fn record<R, P>(&mut self, reference: &[R], predicted: &[P])
    where
        R: AsRef<str>,
        P: AsRef<str>,
    {
        let matched = reference
            .iter()
            .zip(predicted)
            .filter(|(r, p)| r.as_ref() == p.as_ref())
            .count();
        let compared = reference.len().max(predicted.len());

        self.correct += matched;
        self.incorrect += compared - matched;
    }

    /// Add another tally into this one.
    pub fn merge(&mut self, other: Accuracy) {
        self.correct += other.correct;
        self.incorrect += other.incorrect;
    }

    /// Number of positions compared.
    pub fn total(&self) -> usize {
        self.correct + self.incorrect
    }

    /// Fraction of correct positions in `[0.0, 1.0]`; `0.0` when empty.
    pub fn ratio(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.correct as f64 / self.total() as f64
        }
    }

    /// Accuracy as a percentage.
    pub fn percent(&self) -> f64 {
        self.ratio() * 100.0
    }

    /// Percentage truncated by integer division, matching older reports.
    pub fn truncated_percent(&self) -> usize {
        (100 * self.correct).checked_div(self.total()).unwrap_or(0)
    }
}

impl fmt::Display for Accuracy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "incorrect: {} correct: {}", self.incorrect, self.correct)?;
        write!(f, "percent accuracy: {:.2}%", self.percent())
    }
}
