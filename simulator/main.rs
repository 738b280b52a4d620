use clap::Parser;
use rand::prelude::*;
use runner::cli::SimulatorCLI;
use runner::env::SimulatorEnv;
use runner::execution::execute_iteration;
use std::time::Instant;

mod generation;
mod properties;
mod runner;

fn main() -> Result<(), String> {
    init_logger();

    let cli_opts = SimulatorCLI::parse();
    cli_opts.validate()?;

    let seed = cli_opts.seed.unwrap_or_else(|| thread_rng().next_u64());
    log::info!("seed: {}", seed);

    let mut env = SimulatorEnv::new(seed, &cli_opts);
    log::info!("simulator options: {:?}", env.opts);

    let now = Instant::now();
    for iteration in 0..cli_opts.iterations {
        if let Err(error) = execute_iteration(&mut env, iteration) {
            log::error!("simulation failed: '{}'", error);
            println!("seed: {}", seed);
            return Err(format!(
                "iteration {} (seed {}): {}",
                iteration, seed, error
            ));
        }
    }
    log::info!(
        "simulation succeeded: {} iterations in {:?}",
        cli_opts.iterations,
        now.elapsed()
    );

    // Print the seed at the end again for easily accessing it.
    println!("seed: {}", seed);

    Ok(())
}

fn init_logger() {
    env_logger::Builder::from_env(env_logger::Env::default().filter_or("RUST_LOG", "info"))
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();
}
