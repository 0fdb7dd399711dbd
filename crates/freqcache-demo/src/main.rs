//! freqcache demo - drives the LRU and LFU caches through fixed scenarios
//! and an optional synthetic workload

mod scenario;
mod workload;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use freqcache::Policy;
use tracing::info;

use crate::workload::WorkloadConfig;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Cache policy to exercise
    #[arg(short, long, value_enum, default_value_t = PolicyArg::Both)]
    policy: PolicyArg,

    /// Cache capacity for the workload run
    #[arg(short, long, default_value_t = 3)]
    capacity: usize,

    /// Number of synthetic operations (0 skips the workload)
    #[arg(short, long, default_value_t = 0)]
    workload: u64,

    /// Distinct keys touched by the workload
    #[arg(short, long, default_value_t = 100, value_parser = clap::value_parser!(u64).range(1..))]
    keys: u64,

    /// Seed for the workload RNG
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum PolicyArg {
    Lru,
    Lfu,
    Both,
}

impl PolicyArg {
    fn policies(self) -> &'static [Policy] {
        match self {
            PolicyArg::Lru => &[Policy::Lru],
            PolicyArg::Lfu => &[Policy::Lfu],
            PolicyArg::Both => &[Policy::Lru, Policy::Lfu],
        }
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    info!("Starting freqcache demo v{}", env!("CARGO_PKG_VERSION"));

    for &policy in args.policy.policies() {
        info!("Running {} scenario", policy);
        let lookups = scenario::run(policy)?;
        for lookup in &lookups {
            println!("{}", scenario::format_lookup(lookup));
        }
        println!();
    }

    if args.workload > 0 {
        let config = WorkloadConfig {
            ops: args.workload,
            keys: args.keys,
            seed: args.seed,
        };
        for &policy in args.policy.policies() {
            info!(
                "Running {} workload: {} ops over {} keys, capacity {}",
                policy, config.ops, config.keys, args.capacity
            );
            let cache = workload::build_cache(policy, args.capacity)?;
            let stats = workload::run(&cache, &config);
            println!("{}: {}", policy, stats);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["freqcache-demo"]).unwrap();

        assert_eq!(args.policy, PolicyArg::Both);
        assert_eq!(args.capacity, 3);
        assert_eq!(args.workload, 0);
        assert_eq!(args.keys, 100);
        assert_eq!(args.seed, 42);
    }

    #[test]
    fn test_args_policy() {
        let args = Args::try_parse_from(["freqcache-demo", "--policy", "lfu", "-w", "500"]).unwrap();

        assert_eq!(args.policy.policies(), &[Policy::Lfu]);
        assert_eq!(args.workload, 500);
    }

    #[test]
    fn test_args_rejects_empty_key_space() {
        assert!(Args::try_parse_from(["freqcache-demo", "--keys", "0"]).is_err());
    }
}
