//! sstd - SuperStakeCoin node front end
//!
//! Loads the node configuration, selects a network and reports the chain
//! parameters the rest of a node is built on.

pub mod cli;
pub mod config;
pub mod error;
pub mod node;
pub mod summary;
pub mod ui;

pub use cli::Args;
pub use config::Config;
pub use error::DaemonError;
pub use node::Node;
