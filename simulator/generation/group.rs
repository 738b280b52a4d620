use median_core::{resolve_comparator, DeclaredType, MedianFunc, Value, ValueKind};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::runner::env::SimulatorOpts;

use super::{frequency, gen_random_text, pick, ArbitraryFrom};

const UNSUPPORTED_TYPES: [DeclaredType; 5] = [
    DeclaredType::Bool,
    DeclaredType::Numeric,
    DeclaredType::Date,
    DeclaredType::Bytea,
    DeclaredType::Other(1186),
];

const SPECIAL_FLOATS: [f64; 6] = [
    f64::NAN,
    f64::INFINITY,
    f64::NEG_INFINITY,
    -0.0,
    0.0,
    f64::MIN_POSITIVE,
];

/// One aggregation: rows for each group plus the order they are delivered in.
#[derive(Debug, Clone)]
pub(crate) struct GroupPlan {
    pub(crate) declared: DeclaredType,
    pub(crate) groups: Vec<Vec<Option<Value>>>,
    /// Group index of each delivered row. Rows of one group keep their order.
    pub(crate) schedule: Vec<usize>,
}

impl GroupPlan {
    pub(crate) fn rows(&self) -> usize {
        self.schedule.len()
    }
}

impl ArbitraryFrom<&SimulatorOpts> for DeclaredType {
    fn arbitrary_from<R: Rng>(rng: &mut R, opts: &SimulatorOpts) -> Self {
        if rng.gen_bool(opts.unsupported_percent / 100.0) {
            *pick(&UNSUPPORTED_TYPES, rng)
        } else {
            *pick(&MedianFunc::SUPPORTED_TYPES, rng)
        }
    }
}

impl ArbitraryFrom<ValueKind> for Value {
    fn arbitrary_from<R: Rng>(rng: &mut R, kind: ValueKind) -> Self {
        match kind {
            ValueKind::SmallInt => frequency(
                vec![
                    (
                        9,
                        Box::new(|rng: &mut R| Value::SmallInt(rng.gen_range(-100..=100))),
                    ),
                    (1, Box::new(|rng: &mut R| Value::SmallInt(rng.gen()))),
                ],
                rng,
            ),
            ValueKind::Integer => frequency(
                vec![
                    (
                        9,
                        Box::new(|rng: &mut R| Value::Integer(rng.gen_range(-1000..=1000))),
                    ),
                    (1, Box::new(|rng: &mut R| Value::Integer(rng.gen()))),
                ],
                rng,
            ),
            ValueKind::BigInt => frequency(
                vec![
                    (
                        9,
                        Box::new(|rng: &mut R| Value::BigInt(rng.gen_range(-1000..=1000))),
                    ),
                    (1, Box::new(|rng: &mut R| Value::BigInt(rng.gen()))),
                ],
                rng,
            ),
            ValueKind::Real => frequency(
                vec![
                    (
                        18,
                        Box::new(|rng: &mut R| Value::Real(rng.gen_range(-1000.0..1000.0))),
                    ),
                    (
                        1,
                        Box::new(|rng: &mut R| Value::Real(*pick(&SPECIAL_FLOATS, rng) as f32)),
                    ),
                    (1, Box::new(|rng: &mut R| Value::Real(rng.gen()))),
                ],
                rng,
            ),
            ValueKind::Double => frequency(
                vec![
                    (
                        18,
                        Box::new(|rng: &mut R| Value::Double(rng.gen_range(-1000.0..1000.0))),
                    ),
                    (
                        1,
                        Box::new(|rng: &mut R| Value::Double(*pick(&SPECIAL_FLOATS, rng))),
                    ),
                    (1, Box::new(|rng: &mut R| Value::Double(rng.gen()))),
                ],
                rng,
            ),
            ValueKind::Text => Value::Text(gen_random_text(rng)),
        }
    }
}

impl ArbitraryFrom<&SimulatorOpts> for GroupPlan {
    fn arbitrary_from<R: Rng>(rng: &mut R, opts: &SimulatorOpts) -> Self {
        let declared = DeclaredType::arbitrary_from(rng, opts);
        // Rows for an unsupported type are never accepted; any kind will do.
        let kind = resolve_comparator(declared)
            .map(|comparator| comparator.kind())
            .unwrap_or(ValueKind::BigInt);

        let group_count = rng.gen_range(1..=opts.max_groups);
        let mut groups = Vec::with_capacity(group_count);
        let mut schedule = Vec::new();
        for group in 0..group_count {
            let size = rng.gen_range(opts.minimum_size..=opts.maximum_size);
            let all_null = rng.gen_bool(opts.all_null_percent / 100.0);
            let mut seen: Vec<Value> = Vec::new();
            let mut rows = Vec::with_capacity(size);
            for _ in 0..size {
                if all_null || rng.gen_bool(opts.null_percent / 100.0) {
                    rows.push(None);
                } else if !seen.is_empty() && rng.gen_bool(opts.duplicate_percent / 100.0) {
                    rows.push(Some(pick(&seen, rng).clone()));
                } else {
                    let value = Value::arbitrary_from(rng, kind);
                    seen.push(value.clone());
                    rows.push(Some(value));
                }
            }
            schedule.extend(std::iter::repeat(group).take(size));
            groups.push(rows);
        }
        schedule.shuffle(rng);

        GroupPlan {
            declared,
            groups,
            schedule,
        }
    }
}
