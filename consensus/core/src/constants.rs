use crate::Amount;

/// Base units per coin
pub const COIN: Amount = 100_000_000;

/// Header version used by every genesis block; headers below version 4 hash with Quark
pub const GENESIS_BLOCK_VERSION: i32 = 1;

/// Serialized header length in bytes
pub const HEADER_SIZE: usize = 80;

pub const ONE_DAY_SECS: i64 = 24 * 60 * 60;

pub const ONE_WEEK_SECS: i64 = 7 * ONE_DAY_SECS;

/// Per-transaction work multiplier after the last checkpoint when signatures are verified
pub const SIGCHECK_VERIFICATION_FACTOR: f64 = 5.0;
