use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;

use log::debug;

use crate::bail_invalid_context;
use crate::compare::Comparator;
use crate::error::MedianError;
use crate::function::{resolve_comparator, MedianFunc};
use crate::state::MedianState;
use crate::types::{DeclaredType, Value};
use crate::Result;

#[derive(Debug)]
enum AggSlot {
    Accumulating(MedianState),
    // A step failed; the group yields this error instead of a median.
    Failed(MedianError),
    Finalized,
}

/// Drives `median` over rows grouped by `K`.
///
/// Each group moves from accumulating to finalized exactly once; stepping or
/// finalizing a finalized group is rejected. A step error fails its group:
/// later steps return the same error and so does finalizing it, so no group
/// ever reports a median over part of its rows. Dropping the aggregate
/// releases every group's state.
#[derive(Debug)]
pub struct MedianAggregate<K> {
    declared: DeclaredType,
    comparator: Option<Comparator>,
    groups: HashMap<K, AggSlot>,
    order: Vec<K>,
}

impl<K> MedianAggregate<K>
where
    K: Hash + Eq + Clone,
{
    pub fn new(declared: DeclaredType) -> Self {
        Self {
            declared,
            comparator: None,
            groups: HashMap::new(),
            order: Vec::new(),
        }
    }

    pub fn declared_type(&self) -> DeclaredType {
        self.declared
    }

    // Resolved on first use and reused for every later row.
    fn comparator(&mut self) -> Result<Comparator> {
        if let Some(comparator) = self.comparator {
            return Ok(comparator);
        }
        let comparator = resolve_comparator(self.declared)?;
        self.comparator = Some(comparator);
        Ok(comparator)
    }

    pub fn step(&mut self, key: K, value: Option<Value>) -> Result<()> {
        let comparator = self.comparator();
        let slot = match self.groups.entry(key) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                self.order.push(entry.key().clone());
                entry.insert(match &comparator {
                    Ok(comparator) => {
                        AggSlot::Accumulating(MedianState::ensure(None, *comparator))
                    }
                    Err(err) => AggSlot::Failed(err.clone()),
                })
            }
        };
        let result = match &mut *slot {
            AggSlot::Accumulating(state) => state.step(value),
            AggSlot::Failed(err) => return Err(err.clone()),
            AggSlot::Finalized => {
                bail_invalid_context!("{}_step called on a finalized group", MedianFunc::NAME)
            }
        };
        if let Err(err) = &result {
            debug!("{}: group failed: {}", MedianFunc::NAME, err);
            *slot = AggSlot::Failed(err.clone());
        }
        result
    }

    /// Runs the finalizer for `key` and retires its state.
    ///
    /// A failed group returns the error that failed it.
    pub fn finalize(&mut self, key: &K) -> Result<Option<Value>> {
        let Some(slot) = self.groups.get_mut(key) else {
            return Ok(None);
        };
        match std::mem::replace(slot, AggSlot::Finalized) {
            AggSlot::Accumulating(state) => {
                let result = state.finalize().cloned();
                debug!(
                    "{}: group finalized over {} values",
                    MedianFunc::NAME,
                    state.count()
                );
                Ok(result)
            }
            AggSlot::Failed(err) => Err(err),
            AggSlot::Finalized => {
                bail_invalid_context!("{}_final called twice for a group", MedianFunc::NAME)
            }
        }
    }

    /// Finalizes every group not yet finalized, in first-seen order. Stops at
    /// the first failed group and returns its error.
    pub fn finish(mut self) -> Result<Vec<(K, Option<Value>)>> {
        let order = std::mem::take(&mut self.order);
        let mut results = Vec::with_capacity(order.len());
        for key in order {
            if matches!(self.groups.get(&key), Some(AggSlot::Finalized)) {
                continue;
            }
            let result = self.finalize(&key)?;
            results.push((key, result));
        }
        Ok(results)
    }

    pub fn state(&self, key: &K) -> Option<&MedianState> {
        match self.groups.get(key) {
            Some(AggSlot::Accumulating(state)) => Some(state),
            _ => None,
        }
    }

    pub fn groups(&self) -> &[K] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
