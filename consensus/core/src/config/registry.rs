use once_cell::sync::OnceCell;
use tracing::{debug, info};

use super::params::Params;
use crate::errors::{ParamsError, ParamsResult};
use crate::network::{NetworkSelection, NetworkType};

/// Owns the parameter sets of every network and the one-time active selection.
///
/// Build it once at startup and share it (e.g. behind an `Arc`); reads need no
/// locking. Selection is write-once: repeating it with the same network is a
/// no-op, any other network is rejected.
#[derive(Debug)]
pub struct Registry {
    main: Params,
    testnet: Params,
    regtest: Params,
    unittest: Params,
    active: OnceCell<NetworkType>,
}

impl Registry {
    /// Constructs and verifies all four networks. Any error here is fatal.
    pub fn new() -> ParamsResult<Self> {
        let main = Params::mainnet()?;
        let testnet = Params::testnet(&main)?;
        let regtest = Params::regtest(&testnet)?;
        let unittest = Params::unittest(&main)?;
        debug!("Network parameters constructed for {} networks", NetworkType::iter().count());
        Ok(Self { main, testnet, regtest, unittest, active: OnceCell::new() })
    }

    /// Constructs the registry and selects `network` in one step.
    pub fn with_network(network: NetworkType) -> ParamsResult<Self> {
        let registry = Self::new()?;
        registry.select(network)?;
        Ok(registry)
    }

    /// Selection-independent lookup
    pub fn params_for(&self, network: NetworkType) -> &Params {
        match network {
            NetworkType::Mainnet => &self.main,
            NetworkType::Testnet => &self.testnet,
            NetworkType::Regtest => &self.regtest,
            NetworkType::Unittest => &self.unittest,
        }
    }

    pub fn select(&self, network: NetworkType) -> ParamsResult<&Params> {
        match self.active.try_insert(network) {
            Ok(_) => {
                let params = self.params_for(network);
                info!("Selected network {} (port {}, genesis {})", network, params.default_port, params.hash_genesis_block());
                Ok(params)
            }
            Err((&active, _)) if active == network => Ok(self.params_for(network)),
            Err((&active, requested)) => Err(ParamsError::NetworkAlreadySelected { active, requested }),
        }
    }

    /// Resolves command line or config flags and selects the result.
    pub fn select_from_flags(&self, selection: &NetworkSelection) -> ParamsResult<&Params> {
        let network = selection.resolve()?;
        self.select(network)
    }

    pub fn selected(&self) -> Option<NetworkType> {
        self.active.get().copied()
    }

    pub fn active_params(&self) -> ParamsResult<&Params> {
        let network = self.selected().ok_or(ParamsError::NetworkNotSelected)?;
        Ok(self.params_for(network))
    }

    /// Mutable access for test setup, only while unit test parameters are selected.
    pub fn modifiable_params(&mut self) -> ParamsResult<&mut Params> {
        match self.selected() {
            Some(NetworkType::Unittest) => Ok(&mut self.unittest),
            Some(network) => Err(ParamsError::NotModifiable { network, setting: "parameters" }),
            None => Err(ParamsError::NetworkNotSelected),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn lookup_without_selection() {
        let registry = Registry::new().unwrap();
        assert_eq!(registry.selected(), None);
        for network in NetworkType::iter() {
            assert_eq!(registry.params_for(network).net, network);
        }
    }

    #[test]
    fn active_params_before_selection_is_fatal() {
        let registry = Registry::new().unwrap();
        let err = registry.active_params().unwrap_err();
        assert_eq!(err, ParamsError::NetworkNotSelected);
        assert!(err.is_fatal());
    }

    #[test]
    fn select_main() {
        let registry = Registry::new().unwrap();
        registry.select(NetworkType::Mainnet).unwrap();
        let params = registry.active_params().unwrap();
        assert_eq!(params.net, NetworkType::Mainnet);
        assert_eq!(params.default_port, 12020);
    }

    #[test]
    fn select_is_idempotent_but_final() {
        let registry = Registry::with_network(NetworkType::Testnet).unwrap();
        assert_eq!(registry.select(NetworkType::Testnet).unwrap().default_port, 12120);

        let err = registry.select(NetworkType::Regtest).unwrap_err();
        assert_eq!(err, ParamsError::NetworkAlreadySelected { active: NetworkType::Testnet, requested: NetworkType::Regtest });
        assert_eq!(registry.selected(), Some(NetworkType::Testnet));
    }

    #[test]
    fn select_from_flags() {
        let registry = Registry::new().unwrap();
        let both = NetworkSelection { testnet: true, regtest: true, network: None };
        assert_eq!(registry.select_from_flags(&both).unwrap_err(), ParamsError::ConflictingNetworkFlags);
        assert_eq!(registry.selected(), None);

        let regtest = NetworkSelection { regtest: true, ..Default::default() };
        assert_eq!(registry.select_from_flags(&regtest).unwrap().default_port, 12220);
    }

    #[test]
    fn modifiable_only_under_unittest() {
        let mut registry = Registry::new().unwrap();
        assert_eq!(registry.modifiable_params().unwrap_err(), ParamsError::NetworkNotSelected);

        let mut main = Registry::with_network(NetworkType::Mainnet).unwrap();
        assert!(matches!(main.modifiable_params(), Err(ParamsError::NotModifiable { network: NetworkType::Mainnet, .. })));

        registry.select(NetworkType::Unittest).unwrap();
        registry.modifiable_params().unwrap().set_enforce_block_upgrade_majority(7).unwrap();
        assert_eq!(registry.active_params().unwrap().consensus.enforce_block_upgrade_majority, 7);
        assert_eq!(registry.params_for(NetworkType::Mainnet).consensus.enforce_block_upgrade_majority, 201);
    }

    #[test]
    fn concurrent_readers() {
        let registry = Arc::new(Registry::with_network(NetworkType::Mainnet).unwrap());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || registry.active_params().map(|p| p.default_port))
            })
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), Ok(12020));
        }
    }
}
