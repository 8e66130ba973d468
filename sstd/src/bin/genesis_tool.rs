use clap::Parser;
use consensus_core::block::Block;
use consensus_core::config::registry::Registry;
use consensus_core::network::NetworkType;
use consensus_core::pow::{check_proof_of_work, hash_to_u256, U256};
use std::process;
use std::time::Instant;

/// Prints the genesis block of each network and can search for a new nonce.
#[derive(Parser, Debug)]
#[command(name = "genesis-tool")]
struct Opts {
    /// Only this network (main, test, regtest, unittest)
    #[arg(long)]
    network: Option<String>,

    /// Print the serialized header and coinbase as hex
    #[arg(long)]
    hex: bool,

    /// Search for a nonce satisfying the proof of work, starting from 0
    #[arg(long)]
    mine: bool,

    /// Override bits (compact representation). Accepts decimal or 0x-prefixed hex.
    #[arg(long)]
    bits: Option<String>,

    /// Override timestamp (seconds)
    #[arg(long)]
    timestamp: Option<u32>,

    /// Maximum nonces to try when mining
    #[arg(long, default_value_t = 10_000_000u64)]
    max_iterations: u64,
}

fn parse_bits(s: &str) -> Option<u32> {
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => s.parse::<u32>().ok(),
    }
}

fn main() {
    let opts = Opts::parse();

    let registry = match Registry::new() {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("Failed to build network parameters: {}", e);
            process::exit(2);
        }
    };

    let networks: Vec<NetworkType> = match opts.network.as_deref() {
        Some(name) => match name.parse() {
            Ok(network) => vec![network],
            Err(e) => {
                eprintln!("{}", e);
                process::exit(1);
            }
        },
        None => NetworkType::iter().collect(),
    };

    let bits = match opts.bits.as_deref().map(|s| (s, parse_bits(s))) {
        Some((_, Some(bits))) => Some(bits),
        Some((s, None)) => {
            eprintln!("Failed to parse bits '{}', ignoring", s);
            None
        }
        None => None,
    };

    for network in networks {
        let params = registry.params_for(network);
        let mut block = params.genesis.build();
        if let Some(bits) = bits {
            block.header.bits = bits;
        }
        if let Some(timestamp) = opts.timestamp {
            block.header.timestamp = timestamp;
        }

        if opts.mine {
            mine(&mut block, params.consensus.pow_limit, opts.max_iterations);
        }

        println!("[{}]", network);
        println!("Genesis hash: {}", block.hash());
        println!("Merkle root: {}", block.header.hash_merkle_root);
        println!("Timestamp: {}", block.header.timestamp);
        println!("Bits: 0x{:08x}", block.header.bits);
        println!("Nonce: {}", block.header.nonce);
        println!("Coinbase message: {}", String::from_utf8_lossy(params.genesis.coinbase_message));
        if opts.hex {
            println!("Header (hex): {}", hex::encode(block.header.to_bytes()));
            for tx in &block.transactions {
                println!("Coinbase (hex): {}", hex::encode(tx.to_bytes()));
            }
        }
        println!();
    }
}

fn mine(block: &mut Block, pow_limit: U256, max_iterations: u64) {
    println!("Starting one-shot mine (max_iterations={})...", max_iterations);
    let start = Instant::now();
    let mut header = block.header;

    for nonce in 0..max_iterations.min(u32::MAX as u64 + 1) {
        header.nonce = nonce as u32;
        let hash = header.hash();
        if check_proof_of_work(&hash, header.bits, pow_limit) {
            println!("Found valid nonce {} in {:.2}s", header.nonce, start.elapsed().as_secs_f64());
            let mut be = [0u8; 32];
            hash_to_u256(&hash).to_big_endian(&mut be);
            println!("PoW value: 0x{}", hex::encode(be));
            block.header = header;
            return;
        }
        if nonce > 0 && nonce % 1_000_000 == 0 {
            let rate = nonce as f64 / start.elapsed().as_secs_f64().max(1e-6);
            println!("Tried {} nonces (rate {:.2} kH/s)", nonce, rate / 1000.0);
        }
    }

    eprintln!(
        "Failed to find a valid nonce within {} iterations (elapsed {:.2}s)",
        max_iterations,
        start.elapsed().as_secs_f64()
    );
}
