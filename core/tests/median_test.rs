use median_core::{
    finalize, resolve_comparator, DeclaredType, MedianAggregate, MedianError, MedianState, Value,
    ValueKind,
};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn run(declared: DeclaredType, rows: &[Option<Value>]) -> MedianState {
    let comparator = resolve_comparator(declared).unwrap();
    let mut state: Option<MedianState> = None;
    for row in rows {
        let mut current = MedianState::ensure(state.take(), comparator);
        current.step(row.clone()).unwrap();
        state = Some(current);
    }
    state.expect("at least one row")
}

fn ints(values: &[i32]) -> Vec<Option<Value>> {
    values.iter().map(|v| Some(Value::Integer(*v))).collect()
}

fn sorted(state: &MedianState) -> Vec<Value> {
    state.iter().cloned().collect()
}

#[test]
fn test_odd_count_returns_middle() {
    let state = run(DeclaredType::Int4, &ints(&[5, 1, 3]));
    assert_eq!(
        sorted(&state),
        vec![Value::Integer(1), Value::Integer(3), Value::Integer(5)]
    );
    assert_eq!(state.count(), 3);
    assert_eq!(finalize(Some(&state)), Some(Value::Integer(3)));
}

#[test]
fn test_even_count_returns_upper_middle() {
    let state = run(DeclaredType::Int4, &ints(&[5, 1, 3, 9]));
    assert_eq!(
        sorted(&state),
        vec![
            Value::Integer(1),
            Value::Integer(3),
            Value::Integer(5),
            Value::Integer(9)
        ]
    );
    assert_eq!(state.count(), 4);
    assert_eq!(finalize(Some(&state)), Some(Value::Integer(5)));
}

#[test]
fn test_text_median() {
    let rows: Vec<Option<Value>> = ["banana", "apple", "cherry"]
        .into_iter()
        .map(|s| Some(Value::from(s)))
        .collect();
    let state = run(DeclaredType::Text, &rows);
    assert_eq!(
        sorted(&state),
        vec![
            Value::from("apple"),
            Value::from("banana"),
            Value::from("cherry")
        ]
    );
    assert_eq!(finalize(Some(&state)), Some(Value::from("banana")));
}

#[test]
fn test_only_nulls() {
    let state = run(DeclaredType::Int4, &[None, None, None]);
    assert_eq!(state.count(), 0);
    assert_eq!(finalize(Some(&state)), None);
}

#[test]
fn test_single_value() {
    let state = run(DeclaredType::Int4, &ints(&[42]));
    assert_eq!(state.count(), 1);
    assert_eq!(finalize(Some(&state)), Some(Value::Integer(42)));
}

#[test]
fn test_duplicates_are_stable() {
    // Ordering on the numeric prefix only, so the tags show which 3 came first.
    let comparator = resolve_comparator(DeclaredType::Int4).unwrap();
    let mut chain = median_core::SortedChain::new();
    let tagged = [(3, "first"), (1, "only"), (3, "second")];
    for (v, tag) in tagged {
        chain.insert_by(Value::from(format!("{}:{}", v, tag)), |a, b| {
            let key = |v: &Value| -> Value {
                let s = v.to_string();
                let n: i32 = s.split(':').next().unwrap_or("0").parse().unwrap_or(0);
                Value::Integer(n)
            };
            comparator.compare(&key(a), &key(b))
        });
    }
    let order: Vec<String> = chain.iter().map(|v| v.to_string()).collect();
    assert_eq!(order, vec!["1:only", "3:first", "3:second"]);

    let state = run(DeclaredType::Int4, &ints(&[3, 1, 3]));
    assert_eq!(
        sorted(&state),
        vec![Value::Integer(1), Value::Integer(3), Value::Integer(3)]
    );
    assert_eq!(finalize(Some(&state)), Some(Value::Integer(3)));
}

#[test]
fn test_permutations_produce_same_chain() {
    let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);
    let mut rows: Vec<Option<Value>> = (0..200)
        .map(|_| {
            if rng.gen_ratio(1, 5) {
                None
            } else {
                Some(Value::BigInt(rng.gen_range(-50..50)))
            }
        })
        .collect();
    let non_null = rows.iter().filter(|r| r.is_some()).count();

    let reference = run(DeclaredType::Int8, &rows);
    let expected = sorted(&reference);
    assert_eq!(reference.count(), non_null);
    assert!(expected
        .windows(2)
        .all(|w| reference.comparator().compare(&w[0], &w[1]).is_le()));

    for _ in 0..20 {
        rows.shuffle(&mut rng);
        let state = run(DeclaredType::Int8, &rows);
        assert_eq!(state.count(), non_null);
        assert_eq!(sorted(&state), expected);
        assert_eq!(finalize(Some(&state)), Some(expected[non_null / 2].clone()));
    }
}

#[test]
fn test_floats_with_special_values() {
    let rows = vec![
        Some(Value::Double(f64::NAN)),
        Some(Value::Double(1.0)),
        Some(Value::Double(f64::NEG_INFINITY)),
        Some(Value::Double(0.5)),
        Some(Value::Double(f64::INFINITY)),
    ];
    let state = run(DeclaredType::Float8, &rows);
    assert_eq!(finalize(Some(&state)), Some(Value::Double(1.0)));
    assert!(matches!(state.iter().last(), Some(Value::Double(v)) if v.is_nan()));
}

#[test]
fn test_negative_nan_does_not_move_the_median() {
    let positive = run(
        DeclaredType::Float8,
        &[
            Some(Value::Double(f64::NAN)),
            Some(Value::Double(1.0)),
            Some(Value::Double(2.0)),
        ],
    );
    let negative = run(
        DeclaredType::Float8,
        &[
            Some(Value::Double(-f64::NAN)),
            Some(Value::Double(1.0)),
            Some(Value::Double(2.0)),
        ],
    );
    assert_eq!(finalize(Some(&positive)), Some(Value::Double(2.0)));
    assert_eq!(finalize(Some(&negative)), Some(Value::Double(2.0)));
    assert!(matches!(negative.iter().last(), Some(Value::Double(v)) if v.is_nan()));

    // "-nan" from text input parses to a NaN with the sign bit set
    let parsed = Value::parse(ValueKind::Double, "-nan").unwrap();
    let state = run(
        DeclaredType::Float8,
        &[Some(parsed), Some(Value::Double(1.0)), Some(Value::Double(2.0))],
    );
    assert_eq!(finalize(Some(&state)), Some(Value::Double(2.0)));
}

#[test]
fn test_signed_zeros_keep_arrival_order() {
    let state = run(
        DeclaredType::Float8,
        &[Some(Value::Double(0.0)), Some(Value::Double(-0.0))],
    );
    let signs: Vec<bool> = state
        .iter()
        .map(|v| match v {
            Value::Double(d) => d.is_sign_negative(),
            other => panic!("unexpected value {:?}", other),
        })
        .collect();
    assert_eq!(signs, vec![false, true]);
}

#[test]
fn test_real_and_smallint_kinds() {
    let reals = vec![
        Some(Value::Real(2.5)),
        Some(Value::Real(-1.5)),
        None,
        Some(Value::Real(0.0)),
    ];
    let state = run(DeclaredType::Float4, &reals);
    assert_eq!(finalize(Some(&state)), Some(Value::Real(0.0)));

    let smalls = vec![Some(Value::SmallInt(-7)), Some(Value::SmallInt(i16::MAX))];
    let state = run(DeclaredType::Int2, &smalls);
    assert_eq!(finalize(Some(&state)), Some(Value::SmallInt(i16::MAX)));
}

#[test]
fn test_timestamptz_uses_bigint_ordering() {
    let rows = vec![
        Some(Value::BigInt(1_700_000_000_000_000)),
        Some(Value::BigInt(1_600_000_000_000_000)),
        Some(Value::BigInt(1_650_000_000_000_000)),
    ];
    let state = run(DeclaredType::TimestampTz, &rows);
    assert_eq!(
        finalize(Some(&state)),
        Some(Value::BigInt(1_650_000_000_000_000))
    );
}

#[test]
fn test_grouped_aggregate_end_to_end() {
    let mut agg = MedianAggregate::new(DeclaredType::Int4);
    let rows = [
        ("odd", Some(5)),
        ("even", Some(5)),
        ("nulls", None),
        ("odd", Some(1)),
        ("even", Some(1)),
        ("odd", Some(3)),
        ("even", Some(3)),
        ("nulls", None),
        ("even", Some(9)),
        ("single", Some(42)),
    ];
    for (key, v) in rows {
        agg.step(key, v.map(Value::Integer)).unwrap();
    }
    let results = agg.finish().unwrap();
    assert_eq!(
        results,
        vec![
            ("odd", Some(Value::Integer(3))),
            ("even", Some(Value::Integer(5))),
            ("nulls", None),
            ("single", Some(Value::Integer(42))),
        ]
    );
}

#[test]
fn test_groups_in_parallel() {
    let comparator = resolve_comparator(DeclaredType::Float8).unwrap();
    let inputs: Vec<Vec<f64>> = vec![
        vec![3.0, 1.0, 2.0],
        vec![10.0, 40.0, 30.0, 20.0],
        vec![],
    ];
    let results: Vec<Option<Value>> = std::thread::scope(|scope| {
        let handles: Vec<_> = inputs
            .iter()
            .map(|values| {
                scope.spawn(move || {
                    let mut state = MedianState::ensure(None, comparator);
                    for v in values {
                        state.step(Some(Value::Double(*v))).unwrap();
                    }
                    finalize(Some(&state))
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(
        results,
        vec![Some(Value::Double(2.0)), Some(Value::Double(30.0)), None]
    );
}

#[test]
fn test_error_messages() {
    let mut agg = MedianAggregate::new(DeclaredType::Date);
    let err = agg.step((), Some(Value::Integer(1))).unwrap_err();
    assert_eq!(err.to_string(), "Unsupported type: date");

    let mut agg = MedianAggregate::new(DeclaredType::Int4);
    agg.step((), Some(Value::Integer(1))).unwrap();
    agg.finalize(&()).unwrap();
    let err = agg.finalize(&()).unwrap_err();
    assert!(matches!(err, MedianError::InvalidContext(_)));
    assert_eq!(
        err.to_string(),
        "Invalid context: median_final called twice for a group"
    );

    let mut agg = MedianAggregate::new(DeclaredType::Int4);
    let err = agg.step((), Some(Value::BigInt(1))).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Type mismatch: expected integer value, got bigint"
    );
}
