//! Consensus primitives and the per-network parameter registry.
//!
//! Every other subsystem reads chain constants through a [`config::registry::Registry`]
//! built once at startup; see [`config::params::Params`] for the full field set.

pub mod block;
pub mod config;
pub mod constants;
pub mod errors;
pub mod network;
pub mod pow;
pub mod script;
pub mod tx;

pub use sst_hashes::Hash;

/// Amount in base units (1 coin = [`constants::COIN`]).
pub type Amount = i64;

pub const ZERO_HASH: Hash = Hash::zeroed();
