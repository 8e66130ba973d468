use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ParamsError;

/// Network type identifies the network a node is operating on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    /// Main network
    Mainnet,
    /// Public test network
    Testnet,
    /// Local regression test network, blocks mined on demand
    Regtest,
    /// In-process parameters for unit tests; the only modifiable variant
    Unittest,
}

impl NetworkType {
    /// Returns an iterator over all NetworkType variants
    pub fn iter() -> impl Iterator<Item = NetworkType> {
        [NetworkType::Mainnet, NetworkType::Testnet, NetworkType::Regtest, NetworkType::Unittest].into_iter()
    }

    /// Network id string used in data directory names and RPC output
    pub fn name(&self) -> &'static str {
        match self {
            NetworkType::Mainnet => "main",
            NetworkType::Testnet => "test",
            NetworkType::Regtest => "regtest",
            NetworkType::Unittest => "unittest",
        }
    }

    pub fn is_modifiable(&self) -> bool {
        matches!(self, NetworkType::Unittest)
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NetworkType {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "main" | "mainnet" => Ok(NetworkType::Mainnet),
            "test" | "testnet" => Ok(NetworkType::Testnet),
            "regtest" => Ok(NetworkType::Regtest),
            "unittest" => Ok(NetworkType::Unittest),
            _ => Err(ParamsError::UnknownNetwork(s.to_string())),
        }
    }
}

/// External selection flags, as given on the command line or in a config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkSelection {
    pub testnet: bool,
    pub regtest: bool,
    pub network: Option<String>,
}

impl NetworkSelection {
    /// Resolves the flags to a network. No flag means main; `testnet` together
    /// with `regtest` is rejected, as is a flag contradicting an explicit name.
    pub fn resolve(&self) -> Result<NetworkType, ParamsError> {
        let from_flags = match (self.testnet, self.regtest) {
            (true, true) => return Err(ParamsError::ConflictingNetworkFlags),
            (true, false) => Some(NetworkType::Testnet),
            (false, true) => Some(NetworkType::Regtest),
            (false, false) => None,
        };

        let named = self.network.as_deref().map(NetworkType::from_str).transpose()?;
        match (from_flags, named) {
            (Some(flag), Some(name)) if flag != name => Err(ParamsError::ConflictingNetworkFlags),
            (Some(net), _) | (None, Some(net)) => Ok(net),
            (None, None) => Ok(NetworkType::Mainnet),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for net in NetworkType::iter() {
            assert_eq!(net.name().parse::<NetworkType>().unwrap(), net);
        }
        assert_eq!("mainnet".parse::<NetworkType>().unwrap(), NetworkType::Mainnet);
        assert_eq!("TESTNET".parse::<NetworkType>().unwrap(), NetworkType::Testnet);
        assert!(matches!("devnet".parse::<NetworkType>(), Err(ParamsError::UnknownNetwork(_))));
    }

    #[test]
    fn only_unittest_is_modifiable() {
        let modifiable: Vec<_> = NetworkType::iter().filter(NetworkType::is_modifiable).collect();
        assert_eq!(modifiable, vec![NetworkType::Unittest]);
    }

    #[test]
    fn selection_defaults_to_main() {
        assert_eq!(NetworkSelection::default().resolve().unwrap(), NetworkType::Mainnet);
    }

    #[test]
    fn selection_flags() {
        let testnet = NetworkSelection { testnet: true, ..Default::default() };
        assert_eq!(testnet.resolve().unwrap(), NetworkType::Testnet);

        let regtest = NetworkSelection { regtest: true, network: Some("regtest".into()), ..Default::default() };
        assert_eq!(regtest.resolve().unwrap(), NetworkType::Regtest);

        let unittest = NetworkSelection { network: Some("unittest".into()), ..Default::default() };
        assert_eq!(unittest.resolve().unwrap(), NetworkType::Unittest);
    }

    #[test]
    fn selection_conflicts() {
        let both = NetworkSelection { testnet: true, regtest: true, network: None };
        assert_eq!(both.resolve(), Err(ParamsError::ConflictingNetworkFlags));

        let contradicting = NetworkSelection { testnet: true, network: Some("main".into()), ..Default::default() };
        assert_eq!(contradicting.resolve(), Err(ParamsError::ConflictingNetworkFlags));
    }

    #[test]
    fn serde_uses_lowercase_variant_names() {
        assert_eq!(serde_json::to_string(&NetworkType::Regtest).unwrap(), "\"regtest\"");
        assert_eq!(serde_json::from_str::<NetworkType>("\"testnet\"").unwrap(), NetworkType::Testnet);
    }
}
