//! Console output for the node front end

use std::time::Duration;

use crate::summary::ParamsSummary;

/// ANSI color codes for terminal output
pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";

    pub const BRIGHT_RED: &str = "\x1b[91m";
    pub const BRIGHT_GREEN: &str = "\x1b[92m";
    pub const BRIGHT_YELLOW: &str = "\x1b[93m";
    pub const BRIGHT_CYAN: &str = "\x1b[96m";
    pub const BRIGHT_WHITE: &str = "\x1b[97m";
}

/// Print startup banner
pub fn print_banner(version: &str, network: &str) {
    println!();
    println!("{}╔══════════════════════════════════════════════════════════════╗{}", colors::BRIGHT_CYAN, colors::RESET);
    println!("{}║{}        {}SUPERSTAKECOIN NODE - SSTD v{:<10}{}                {}║{}",
        colors::BRIGHT_CYAN, colors::RESET, colors::BOLD, version, colors::RESET, colors::BRIGHT_CYAN, colors::RESET);
    println!("{}║{}  Network: {}{:<50}{}  {}║{}",
        colors::BRIGHT_CYAN, colors::RESET, colors::BRIGHT_GREEN, network, colors::RESET, colors::BRIGHT_CYAN, colors::RESET);
    println!("{}╚══════════════════════════════════════════════════════════════╝{}", colors::BRIGHT_CYAN, colors::RESET);
    println!();
}

/// Status types for colored output
#[derive(Debug, Clone, Copy)]
pub enum StatusType {
    Success,
    Info,
    Warning,
    Error,
}

/// Print status line with icon and color
pub fn print_status(icon: &str, message: &str, status: StatusType) {
    let color = match status {
        StatusType::Success => colors::BRIGHT_GREEN,
        StatusType::Info => colors::BRIGHT_CYAN,
        StatusType::Warning => colors::BRIGHT_YELLOW,
        StatusType::Error => colors::BRIGHT_RED,
    };

    println!("{}[{}]{} {} {}{}", color, icon, colors::RESET, color, message, colors::RESET);
}

pub fn print_section(title: &str) {
    println!();
    println!("{}━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━{}", colors::DIM, colors::RESET);
    println!("{}  {}{}{}", colors::BRIGHT_CYAN, colors::BOLD, title, colors::RESET);
    println!("{}━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━{}", colors::DIM, colors::RESET);
    println!();
}

/// Print key-value pair in a formatted way
pub fn print_kv(key: &str, value: &str) {
    println!("  {}{:<22}{} {}{}{}", colors::BRIGHT_WHITE, format!("{}:", key), colors::RESET, colors::BRIGHT_CYAN, value, colors::RESET);
}

/// Format duration as human-readable string
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        let hours = secs / 3600;
        let minutes = (secs % 3600) / 60;
        let seconds = secs % 60;
        format!("{}h {}m {}s", hours, minutes, seconds)
    }
}

/// Format a progress fraction in [0, 1] as a percentage
pub fn format_progress(progress: f64) -> String {
    format!("{:.2}%", progress.clamp(0.0, 1.0) * 100.0)
}

pub fn print_params_summary(summary: &ParamsSummary) {
    print_section("Chain Parameters");

    print_kv("Network", summary.network.name());
    print_kv("Message Start", &summary.message_start);
    print_kv("P2P Port", &summary.default_port.to_string());
    print_kv("Genesis Hash", &summary.genesis.hash.to_string());
    print_kv("Merkle Root", &summary.genesis.merkle_root.to_string());
    print_kv("Genesis Time", &summary.genesis.timestamp.to_string());
    print_kv("Genesis Bits", &summary.genesis.bits);
    print_kv("Genesis Nonce", &summary.genesis.nonce.to_string());
    print_kv("PoW Limit", &summary.pow_limit_bits);
    print_kv("Target Timespan", &format_duration(Duration::from_secs(summary.target_timespan.max(0) as u64)));
    print_kv("Target Spacing", &format_duration(Duration::from_secs(summary.target_spacing.max(0) as u64)));
    print_kv("Last PoW Block", &summary.last_pow_block.to_string());
    print_kv("Maturity", &summary.maturity.to_string());

    print_section("Address Prefixes");
    for prefix in &summary.base58_prefixes {
        print_kv(&prefix.kind, &prefix.prefix);
    }

    print_section("Checkpoints");
    print_kv("Enforced", if summary.checkpoints_enabled { "Yes" } else { "No" });
    for checkpoint in &summary.checkpoints {
        print_kv(&checkpoint.height.to_string(), &checkpoint.hash.to_string());
    }
    print_kv("Last Checkpoint Time", &summary.latest_checkpoint.timestamp.to_string());

    print_section("Seeds");
    if summary.dns_seeds.is_empty() {
        print_kv("DNS Seeds", "None");
    }
    for host in &summary.dns_seeds {
        print_kv("DNS Seed", host);
    }
    print_kv("Fixed Seeds", &summary.fixed_seed_count.to_string());
}
