use std::cmp::Ordering;

use median_core::{Comparator, MedianState, Value};

/// Shadow model of one group: stable sort of the non-null rows.
pub(crate) fn reference_chain(comparator: Comparator, rows: &[Option<Value>]) -> Vec<Value> {
    let mut values: Vec<Value> = rows.iter().flatten().cloned().collect();
    values.sort_by(|a, b| comparator.compare(a, b));
    values
}

pub(crate) fn reference_median(values: &[Value]) -> Option<Value> {
    values.get(values.len() / 2).cloned()
}

// NaN != NaN under PartialEq, so values are matched with the comparator.
fn same(comparator: Comparator, lhs: &Value, rhs: &Value) -> bool {
    comparator.compare(lhs, rhs) == Ordering::Equal
}

pub(crate) fn property_sorted(state: &MedianState) -> Result<(), String> {
    let comparator = state.comparator();
    let mut prev: Option<&Value> = None;
    for (i, value) in state.iter().enumerate() {
        if let Some(prev) = prev {
            if comparator.compare(prev, value) == Ordering::Greater {
                return Err(format!(
                    "chain out of order at position {}: {} before {}",
                    i, prev, value
                ));
            }
        }
        prev = Some(value);
    }
    Ok(())
}

pub(crate) fn property_count(state: &MedianState, rows: &[Option<Value>]) -> Result<(), String> {
    let expected = rows.iter().filter(|row| row.is_some()).count();
    let walked = state.iter().count();
    if state.count() != expected || walked != expected {
        return Err(format!(
            "count is {} and chain holds {}, but {} non-null rows were delivered",
            state.count(),
            walked,
            expected
        ));
    }
    Ok(())
}

/// The chain must equal the stable sort of the input, element for element.
pub(crate) fn property_matches_reference(
    state: &MedianState,
    expected: &[Value],
) -> Result<(), String> {
    let comparator = state.comparator();
    for (i, (actual, expected)) in state.iter().zip(expected).enumerate() {
        if !same(comparator, actual, expected) {
            return Err(format!(
                "chain differs from reference at position {}: got {}, expected {}",
                i, actual, expected
            ));
        }
    }
    Ok(())
}

/// Accumulating a permutation of the rows must give the same value sequence.
pub(crate) fn property_order_independent(
    state: &MedianState,
    permuted: &[Option<Value>],
) -> Result<(), String> {
    let comparator = state.comparator();
    let mut other = MedianState::ensure(None, comparator);
    for row in permuted {
        other.step(row.clone()).map_err(|e| e.to_string())?;
    }
    if other.count() != state.count() {
        return Err(format!(
            "permuted input accumulated {} values instead of {}",
            other.count(),
            state.count()
        ));
    }
    for (i, (lhs, rhs)) in state.iter().zip(other.iter()).enumerate() {
        if !same(comparator, lhs, rhs) {
            return Err(format!(
                "permuted input differs at position {}: {} vs {}",
                i, lhs, rhs
            ));
        }
    }
    Ok(())
}

pub(crate) fn property_median(
    comparator: Comparator,
    actual: &Option<Value>,
    expected: &Option<Value>,
) -> Result<(), String> {
    match (actual, expected) {
        (None, None) => Ok(()),
        (Some(a), Some(e)) if same(comparator, a, e) => Ok(()),
        _ => Err(format!(
            "median is {}, expected {}",
            display(actual),
            display(expected)
        )),
    }
}

fn display(value: &Option<Value>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => "NULL".to_string(),
    }
}
