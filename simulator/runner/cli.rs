use clap::Parser;

#[derive(Parser)]
#[command(name = "median-simulator")]
#[command(author, version, about, long_about = None)]
pub struct SimulatorCLI {
    #[clap(short, long, help = "set seed for reproducible runs", default_value = None)]
    pub seed: Option<u64>,
    #[clap(
        short = 'n',
        long,
        help = "change the maximum number of rows generated for a group",
        default_value_t = 1024
    )]
    pub maximum_size: usize,
    #[clap(
        short = 'k',
        long,
        help = "change the minimum number of rows generated for a group",
        default_value_t = 1
    )]
    pub minimum_size: usize,
    #[clap(
        short = 'g',
        long,
        help = "change the maximum number of groups aggregated at once",
        default_value_t = 16
    )]
    pub groups: usize,
    #[clap(
        short = 'i',
        long,
        help = "number of aggregations to simulate",
        default_value_t = 100
    )]
    pub iterations: usize,
}

impl SimulatorCLI {
    pub fn validate(&self) -> Result<(), String> {
        if self.minimum_size < 1 {
            return Err("minimum size must be at least 1".to_string());
        }
        if self.maximum_size < 1 {
            return Err("maximum size must be at least 1".to_string());
        }
        if self.minimum_size > self.maximum_size {
            return Err("Minimum size cannot be greater than maximum size".to_string());
        }
        if self.groups < 1 {
            return Err("groups must be at least 1".to_string());
        }
        Ok(())
    }
}
