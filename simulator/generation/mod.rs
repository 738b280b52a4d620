use std::{iter::Sum, ops::SubAssign};

use rand::{distributions::uniform::SampleUniform, Rng};

pub mod group;

/// ArbitraryFrom trait for generating random values from a given value
/// ArbitraryFrom allows for constructing relations, where the generated
/// value is dependent on the given value, such as a value of a declared kind
/// or a group plan shaped by the simulator options.
pub trait ArbitraryFrom<T> {
    fn arbitrary_from<R: Rng>(rng: &mut R, t: T) -> Self;
}

/// Frequency is a helper function for composing different generators with different frequency
/// of occurences.
pub(crate) fn frequency<
    'a,
    T,
    R: Rng,
    N: Sum + PartialOrd + Copy + Default + SampleUniform + SubAssign,
>(
    choices: Vec<(N, Box<dyn Fn(&mut R) -> T + 'a>)>,
    rng: &mut R,
) -> T {
    let total = choices.iter().map(|(weight, _)| *weight).sum::<N>();
    let mut choice = rng.gen_range(N::default()..total);

    for (weight, f) in choices {
        if choice < weight {
            return f(rng);
        }
        choice -= weight;
    }

    unreachable!()
}

/// pick is a helper function for uniformly picking a random element from a slice
pub(crate) fn pick<'a, T, R: Rng>(choices: &'a [T], rng: &mut R) -> &'a T {
    let index = rng.gen_range(0..choices.len());
    &choices[index]
}

/// gen_random_text builds short lowercase words, so that groups of text
/// values collide often enough to exercise ties.
pub(crate) fn gen_random_text<R: Rng>(rng: &mut R) -> String {
    let len = rng.gen_range(0..6);
    (0..len)
        .map(|_| (rng.gen_range(0..6u8) + b'a') as char)
        .collect()
}
