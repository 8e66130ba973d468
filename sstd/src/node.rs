use consensus_core::config::checkpoints::{ChainTip, Checkpoints};
use consensus_core::config::params::Params;
use consensus_core::config::registry::Registry;
use consensus_core::config::seeds::{unix_now, DnsSeed};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::lookup_host;
use tokio::time::{timeout, Duration};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::DaemonError;
use crate::summary::ParamsSummary;
use crate::ui;

/// Addresses a DNS seed resolved to
#[derive(Debug, Clone)]
pub struct ResolvedSeed {
    pub seed: DnsSeed,
    pub addrs: Vec<SocketAddr>,
}

pub struct Node {
    config: Config,
    registry: Arc<Registry>,
}

impl Node {
    /// Builds every network's parameters and selects the configured one.
    pub fn new(config: Config) -> Result<Self, DaemonError> {
        let registry = Registry::new()?;
        registry.select_from_flags(&config.network_selection())?;
        Ok(Self { config, registry: Arc::new(registry) })
    }

    pub fn registry(&self) -> Arc<Registry> {
        self.registry.clone()
    }

    pub fn params(&self) -> Result<&Params, DaemonError> {
        Ok(self.registry.active_params()?)
    }

    pub fn checkpoints(&self) -> Result<Checkpoints<'_>, DaemonError> {
        Ok(Checkpoints::new(&self.params()?.checkpoints, self.config.checkpoints.enabled))
    }

    pub fn summary(&self) -> Result<ParamsSummary, DaemonError> {
        Ok(ParamsSummary::new(self.params()?, self.config.checkpoints.enabled))
    }

    /// Sync progress of a node holding only the genesis block
    pub fn genesis_progress(&self, now: i64) -> Result<f64, DaemonError> {
        let params = self.params()?;
        let tip = ChainTip { height: 0, chain_tx: 1, time: params.genesis_block.header.timestamp as i64 };
        Ok(params.checkpoints.estimate_progress(&tip, now))
    }

    /// Print the selected parameters, either as JSON or as the console summary.
    pub async fn run(&self, dump_json: bool) -> Result<(), DaemonError> {
        let summary = self.summary()?;
        if dump_json {
            println!("{}", serde_json::to_string_pretty(&summary)?);
            return Ok(());
        }

        ui::print_params_summary(&summary);

        let checkpoints = self.checkpoints()?;
        ui::print_section("Sync");
        ui::print_kv("Blocks Estimate", &checkpoints.total_blocks_estimate().to_string());
        ui::print_kv("Progress At Genesis", &ui::format_progress(self.genesis_progress(unix_now())?));

        if self.config.seeds.resolve {
            let resolved = self.resolve_seeds().await?;
            ui::print_section("Resolved Seeds");
            for entry in &resolved {
                ui::print_kv(entry.seed.host, &format!("{} addresses", entry.addrs.len()));
            }
        }

        ui::print_status("✓", &format!("{} parameters loaded", summary.network), ui::StatusType::Success);
        Ok(())
    }

    /// Looks up every DNS seed of the selected network. Failures are logged and skipped.
    pub async fn resolve_seeds(&self) -> Result<Vec<ResolvedSeed>, DaemonError> {
        let params = self.params()?;
        let limit = Duration::from_secs(self.config.seeds.timeout_secs);
        let mut resolved = Vec::with_capacity(params.dns_seeds.len());

        for seed in &params.dns_seeds {
            debug!("Resolving DNS seed {} ({})", seed.name, seed.host);
            match timeout(limit, lookup_host((seed.host, params.default_port))).await {
                Ok(Ok(addrs)) => {
                    let addrs: Vec<SocketAddr> = addrs.collect();
                    info!("DNS seed {} returned {} addresses", seed.host, addrs.len());
                    resolved.push(ResolvedSeed { seed: *seed, addrs });
                }
                Ok(Err(e)) => warn!("Failed to resolve DNS seed {}: {}", seed.host, e),
                Err(_) => warn!("Timed out resolving DNS seed {} after {}s", seed.host, limit.as_secs()),
            }
        }

        Ok(resolved)
    }
}
