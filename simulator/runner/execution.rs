use median_core::{
    resolve_comparator, Comparator, MedianAggregate, MedianError, MedianState, Value,
};
use rand::seq::SliceRandom;

use crate::generation::group::GroupPlan;
use crate::generation::ArbitraryFrom;
use crate::properties;

use super::env::SimulatorEnv;

/// Generates one aggregation, runs it and checks every group against the
/// shadow model.
pub(crate) fn execute_iteration(env: &mut SimulatorEnv, iteration: usize) -> Result<(), String> {
    let plan = GroupPlan::arbitrary_from(&mut env.rng, &env.opts);
    log::debug!(
        "iteration {}: {} over {} groups, {} rows",
        iteration,
        plan.declared,
        plan.groups.len(),
        plan.rows()
    );

    let comparator = match resolve_comparator(plan.declared) {
        Ok(comparator) => comparator,
        Err(MedianError::UnsupportedType(_)) => return check_unsupported(&plan),
        Err(err) => return Err(err.to_string()),
    };

    let mut agg = MedianAggregate::new(plan.declared);
    let mut cursors = vec![0; plan.groups.len()];
    for &group in &plan.schedule {
        let row = plan.groups[group][cursors[group]].clone();
        cursors[group] += 1;
        agg.step(group, row)
            .map_err(|e| format!("group {}: step failed: {}", group, e))?;
    }

    for (group, rows) in plan.groups.iter().enumerate() {
        let state = agg
            .state(&group)
            .ok_or_else(|| format!("group {}: no accumulation state", group))?;
        check_state(env, state, comparator, rows)
            .map_err(|e| format!("group {}: {}", group, e))?;

        let expected =
            properties::reference_median(&properties::reference_chain(comparator, rows));
        let actual = agg
            .finalize(&group)
            .map_err(|e| format!("group {}: finalize failed: {}", group, e))?;
        properties::property_median(comparator, &actual, &expected)
            .map_err(|e| format!("group {}: {}", group, e))?;

        match agg.finalize(&group) {
            Err(MedianError::InvalidContext(_)) => {}
            other => {
                return Err(format!(
                    "group {}: second finalize returned {:?}",
                    group, other
                ))
            }
        }
        if let Some(row) = rows.first() {
            match agg.step(group, row.clone()) {
                Err(MedianError::InvalidContext(_)) => {}
                other => {
                    return Err(format!(
                        "group {}: step after finalize returned {:?}",
                        group, other
                    ))
                }
            }
        }
    }

    let absent = plan.groups.len();
    match agg.finalize(&absent) {
        Ok(None) => Ok(()),
        other => Err(format!("group never stepped finalized to {:?}", other)),
    }
}

fn check_state(
    env: &mut SimulatorEnv,
    state: &MedianState,
    comparator: Comparator,
    rows: &[Option<Value>],
) -> Result<(), String> {
    let expected = properties::reference_chain(comparator, rows);
    properties::property_sorted(state)?;
    properties::property_count(state, rows)?;
    properties::property_matches_reference(state, &expected)?;

    let mut permuted = rows.to_vec();
    permuted.shuffle(&mut env.rng);
    properties::property_order_independent(state, &permuted)
}

fn check_unsupported(plan: &GroupPlan) -> Result<(), String> {
    let mut agg = MedianAggregate::new(plan.declared);
    let Some(&group) = plan.schedule.first() else {
        return Ok(());
    };
    match agg.step(group, plan.groups[group][0].clone()) {
        Err(MedianError::UnsupportedType(t)) if t == plan.declared => {}
        other => {
            return Err(format!(
                "{} was accepted by the first step: {:?}",
                plan.declared, other
            ))
        }
    }
    match agg.finalize(&group) {
        Err(MedianError::UnsupportedType(t)) if t == plan.declared => Ok(()),
        other => Err(format!(
            "group {} of unsupported {} finalized to {:?}",
            group, plan.declared, other
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::cli::SimulatorCLI;

    #[test]
    fn test_seeded_iterations_hold() {
        let cli_opts = SimulatorCLI {
            seed: Some(7),
            maximum_size: 64,
            minimum_size: 1,
            groups: 4,
            iterations: 25,
        };
        let mut env = SimulatorEnv::new(7, &cli_opts);
        for iteration in 0..cli_opts.iterations {
            execute_iteration(&mut env, iteration).unwrap();
        }
    }

    #[test]
    fn test_unsupported_plan_is_rejected() {
        let plan = GroupPlan {
            declared: median_core::DeclaredType::Numeric,
            groups: vec![vec![None]],
            schedule: vec![0],
        };
        check_unsupported(&plan).unwrap();
    }
}
