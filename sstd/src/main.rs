use sstd::{cli, ui, Config, DaemonError, Node};
use std::process;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    let args = cli::parse_args();

    if let Err(e) = run(args).await {
        ui::print_status("✗", &e.to_string(), ui::StatusType::Error);
        error!("sstd failed: {}", e);
        process::exit(e.exit_code());
    }
}

async fn run(args: cli::Args) -> Result<(), DaemonError> {
    let mut config = match &args.config_path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    config.apply_cli_overrides(&args);

    init_logging(&config.logging.level);

    let network = config.network_selection().resolve()?;
    if !args.dump_json {
        ui::print_banner(env!("CARGO_PKG_VERSION"), network.name());
    }

    let node = Node::new(config)?;
    node.run(args.dump_json).await?;

    info!("sstd finished");
    Ok(())
}

fn init_logging(level: &str) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt().with_env_filter(filter).with_target(true).with_thread_ids(true).with_writer(std::io::stderr).init();
}
