pub mod checkpoints;
pub mod genesis;
pub mod params;
pub mod registry;
pub mod seeds;
