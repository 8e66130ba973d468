//! Hardcoded (height, hash) pairs that pin historical chain state.
//!
//! A candidate chain whose block at a checkpointed height disagrees with the
//! table is rejected regardless of its work.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::constants::{ONE_DAY_SECS, SIGCHECK_VERIFICATION_FACTOR};
use crate::errors::{ParamsError, ParamsResult};
use crate::network::NetworkType;
use crate::Hash;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Checkpoint {
    pub height: u64,
    pub hash: Hash,
}

/// The last checkpoint with the timestamp of its block
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct LatestCheckpoint {
    pub height: u64,
    pub hash: Hash,
    pub timestamp: i64,
}

/// Chain state used to estimate sync progress
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChainTip {
    pub height: u64,
    /// Transactions in the chain up to and including this block
    pub chain_tx: u64,
    /// Block timestamp, unix seconds
    pub time: i64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CheckpointData {
    checkpoints: BTreeMap<u64, Hash>,
    latest: Checkpoint,
    /// Unix timestamp of the last checkpoint block
    pub time_last_checkpoint: i64,
    /// Transactions between genesis and the last checkpoint
    pub transactions_last_checkpoint: u64,
    /// Estimated transactions per day after the last checkpoint
    pub transactions_per_day: f64,
}

impl CheckpointData {
    /// Builds the table from `entries`, which must be non-empty with strictly increasing heights.
    pub fn new(
        network: NetworkType,
        entries: &[Checkpoint],
        time_last_checkpoint: i64,
        transactions_last_checkpoint: u64,
        transactions_per_day: f64,
    ) -> ParamsResult<Self> {
        let invalid = |reason: String| ParamsError::InvalidCheckpointTable { network, reason };

        let latest = *entries.last().ok_or_else(|| invalid("no checkpoints".to_string()))?;
        if let Some(pair) = entries.windows(2).find(|pair| pair[0].height >= pair[1].height) {
            return Err(invalid(format!("height {} follows height {}", pair[1].height, pair[0].height)));
        }
        if !transactions_per_day.is_finite() || transactions_per_day < 0.0 {
            return Err(invalid(format!("bad transaction rate {}", transactions_per_day)));
        }

        let checkpoints = entries.iter().map(|c| (c.height, c.hash)).collect();
        Ok(Self { checkpoints, latest, time_last_checkpoint, transactions_last_checkpoint, transactions_per_day })
    }

    /// The pinned hash at `height`, if that height is checkpointed.
    pub fn lookup(&self, height: u64) -> Option<Hash> {
        self.checkpoints.get(&height).copied()
    }

    pub fn latest(&self) -> LatestCheckpoint {
        LatestCheckpoint { height: self.latest.height, hash: self.latest.hash, timestamp: self.time_last_checkpoint }
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = Checkpoint> + '_ {
        self.checkpoints.iter().map(|(&height, &hash)| Checkpoint { height, hash })
    }

    pub fn len(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkpoints.is_empty()
    }

    /// Fraction of total verification work done at `tip`, as of `now`.
    ///
    /// Transactions before the last checkpoint weigh 1.0 each; later ones weigh
    /// [`SIGCHECK_VERIFICATION_FACTOR`] when signatures are checked. Work after
    /// the tip is extrapolated from the daily transaction rate.
    pub fn guess_verification_progress(&self, tip: Option<&ChainTip>, now: i64, sigchecks: bool) -> f64 {
        let Some(tip) = tip else {
            return 0.0;
        };

        let factor = if sigchecks { SIGCHECK_VERIFICATION_FACTOR } else { 1.0 };
        let days_since = |since: i64| (now - since).max(0) as f64 / ONE_DAY_SECS as f64;
        let checkpoint_tx = self.transactions_last_checkpoint;

        let (work_before, work_after) = if tip.chain_tx <= checkpoint_tx {
            let cheap_before = tip.chain_tx as f64;
            let cheap_after = (checkpoint_tx - tip.chain_tx) as f64;
            let expensive_after = days_since(self.time_last_checkpoint) * self.transactions_per_day;
            (cheap_before, cheap_after + expensive_after * factor)
        } else {
            let cheap_before = checkpoint_tx as f64;
            let expensive_before = (tip.chain_tx - checkpoint_tx) as f64;
            let expensive_after = days_since(tip.time) * self.transactions_per_day;
            (cheap_before + expensive_before * factor, expensive_after * factor)
        };

        let total = work_before + work_after;
        if total <= 0.0 {
            return 0.0;
        }
        (work_before / total).clamp(0.0, 1.0)
    }

    /// Sync progress with signature checks on.
    pub fn estimate_progress(&self, tip: &ChainTip, now: i64) -> f64 {
        self.guess_verification_progress(Some(tip), now, true)
    }
}

/// Checkpoint enforcement over a table, switchable with `-checkpoints`
#[derive(Clone, Copy, Debug)]
pub struct Checkpoints<'a> {
    data: &'a CheckpointData,
    enabled: bool,
}

impl<'a> Checkpoints<'a> {
    pub fn new(data: &'a CheckpointData, enabled: bool) -> Self {
        Self { data, enabled }
    }

    pub fn data(&self) -> &'a CheckpointData {
        self.data
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// False only when enabled and `hash` disagrees with the checkpoint at `height`.
    pub fn check_block(&self, height: u64, hash: &Hash) -> bool {
        if !self.enabled {
            return true;
        }
        match self.data.lookup(height) {
            Some(expected) => expected == *hash,
            None => true,
        }
    }

    /// Height of the last checkpoint, a lower bound for the chain height
    pub fn total_blocks_estimate(&self) -> u64 {
        if !self.enabled {
            return 0;
        }
        self.data.latest.height
    }

    /// Highest checkpoint whose block the caller already has.
    pub fn last_checkpoint<F>(&self, is_known: F) -> Option<Checkpoint>
    where
        F: Fn(&Hash) -> bool,
    {
        if !self.enabled {
            return None;
        }
        self.data.iter().rev().find(|checkpoint| is_known(&checkpoint.hash))
    }
}
