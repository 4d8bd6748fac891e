//! Predecessor links recorded during the forward pass.

use std::collections::BTreeMap;

use crate::error::{Result, SudiError};
use crate::model::TagState;

/// Per-position map from a tag reached at position *i* to the state at
/// *i - 1* that gave it its best score.
///
/// Lives for a single decode call.
#[derive(Debug, Clone, Default)]
pub struct Backtrace<'m> {
    columns: Vec<BTreeMap<&'m str, TagState<'m>>>,
}

impl<'m> Backtrace<'m> {
    /// Create a backtrace with room for `len` positions.
    pub fn with_capacity(len: usize) -> Self {
        Self {
            columns: Vec::with_capacity(len),
        }
    }

    /// Open the column for the next position.
    pub fn push_column(&mut self) -> &mut BTreeMap<&'m str, TagState<'m>> {
        self.columns.push(BTreeMap::new());
        let last = self.columns.len() - 1;
        &mut self.columns[last]
    }

    /// Number of positions recorded.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns `true` if no position was recorded.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Follow the links back from `terminal` and return the path in
    /// left-to-right order.
    pub fn trace(&self, terminal: &'m str) -> Result<Vec<String>> {
        let mut path = Vec::with_capacity(self.columns.len());
        let mut current = TagState::Tag(terminal);

        for (position, column) in self.columns.iter().enumerate().rev() {
            let tag = current.tag().ok_or_else(|| SudiError::BrokenBacktrace {
                tag: "<start>".to_owned(),
                position,
            })?;
            path.push(tag.to_owned());

            current = *column.get(tag).ok_or_else(|| SudiError::BrokenBacktrace {
                tag: tag.to_owned(),
                position,
            })?;
        }

        if current != TagState::Start {
            return Err(SudiError::BrokenBacktrace {
                tag: current.tag().unwrap_or_default().to_owned(),
                position: 0,
            });
        }

        path.reverse();
        Ok(path)
    }
}
