use log::debug;

use crate::chain::{ChainIter, SortedChain};
use crate::compare::Comparator;
use crate::types::Value;
use crate::Result;

/// Per-group accumulation: every non-null value seen so far, in order.
#[derive(Debug, Clone)]
pub struct MedianState {
    comparator: Comparator,
    chain: SortedChain,
    count: usize,
}

impl MedianState {
    pub fn new(comparator: Comparator) -> Self {
        Self {
            comparator,
            chain: SortedChain::new(),
            count: 0,
        }
    }

    /// Returns `existing` untouched, or a fresh empty state bound to
    /// `comparator`.
    pub fn ensure(existing: Option<MedianState>, comparator: Comparator) -> MedianState {
        match existing {
            Some(state) => {
                debug_assert_eq!(state.comparator, comparator);
                state
            }
            None => {
                debug!("median state created for {} values", comparator.kind());
                MedianState::new(comparator)
            }
        }
    }

    /// Transition step. A null row leaves the state as it is.
    pub fn step(&mut self, value: Option<Value>) -> Result<()> {
        let Some(value) = value else {
            return Ok(());
        };
        self.comparator.check(&value)?;
        self.chain.insert(value, &self.comparator);
        self.count += 1;
        debug_assert_eq!(self.count, self.chain.len());
        Ok(())
    }

    /// Upper-middle element: index `count / 2` of the sorted values.
    pub fn finalize(&self) -> Option<&Value> {
        if self.count == 0 {
            return None;
        }
        let median_index = self.count / 2;
        debug!("median_index: {}, count: {}", median_index, self.count);
        self.chain.nth(median_index)
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn comparator(&self) -> Comparator {
        self.comparator
    }

    pub fn iter(&self) -> ChainIter<'_> {
        self.chain.iter()
    }
}

/// Finalize step as seen by the host: no state means no rows were delivered.
pub fn finalize(state: Option<&MedianState>) -> Option<Value> {
    state.and_then(MedianState::finalize).cloned()
}
