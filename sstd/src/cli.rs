use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(name = "sstd")]
#[command(about = "SuperStakeCoin node: selects a network and reports its chain parameters", long_about = None)]
pub struct Args {
    /// Path to configuration file (optional, uses defaults if not provided)
    #[arg(short, long)]
    pub config_path: Option<PathBuf>,

    /// Network (main, test, regtest, unittest)
    #[arg(short, long)]
    pub network: Option<String>,

    /// Use the test network
    #[arg(long)]
    pub testnet: bool,

    /// Use the regression test network
    #[arg(long)]
    pub regtest: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Enforce checkpoints (true or false)
    #[arg(long)]
    pub checkpoints: Option<bool>,

    /// Resolve DNS seeds of the selected network
    #[arg(long)]
    pub resolve_seeds: bool,

    /// Print the selected parameters as JSON instead of the console summary
    #[arg(long)]
    pub dump_json: bool,
}

pub fn parse_args() -> Args {
    Args::parse()
}
