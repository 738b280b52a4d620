use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::cli::SimulatorCLI;

pub(crate) struct SimulatorEnv {
    pub(crate) opts: SimulatorOpts,
    pub(crate) rng: ChaCha8Rng,
}

impl SimulatorEnv {
    pub(crate) fn new(seed: u64, cli_opts: &SimulatorCLI) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let opts = SimulatorOpts {
            minimum_size: cli_opts.minimum_size,
            maximum_size: cli_opts.maximum_size,
            max_groups: cli_opts.groups,
            null_percent: rng.gen_range(0.0..=40.0),
            duplicate_percent: rng.gen_range(0.0..=50.0),
            all_null_percent: rng.gen_range(0.0..=10.0),
            unsupported_percent: 5.0,
        };

        SimulatorEnv { opts, rng }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct SimulatorOpts {
    pub(crate) minimum_size: usize,
    pub(crate) maximum_size: usize,
    pub(crate) max_groups: usize,
    // chance of a single row being NULL
    pub(crate) null_percent: f64,
    // chance of a value repeating one already in its group
    pub(crate) duplicate_percent: f64,
    // chance of a whole group being NULL rows
    pub(crate) all_null_percent: f64,
    // chance of an aggregation being declared over a type without a comparator
    pub(crate) unsupported_percent: f64,
}
