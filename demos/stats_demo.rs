use clap::Parser;
use clap::ValueEnum;
use rh_table::Config;
use rh_table::HashTable;
use rh_table::ProbePolicy;
use siphasher::sip::SipHasher;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Policy {
    Linear,
    Triangular,
    RobinHood,
}

impl From<Policy> for ProbePolicy {
    fn from(policy: Policy) -> Self {
        match policy {
            Policy::Linear => ProbePolicy::Linear,
            Policy::Triangular => ProbePolicy::Triangular,
            Policy::RobinHood => ProbePolicy::RobinHood,
        }
    }
}

#[derive(Parser, Debug)]
struct Args {
    /// Number of distinct keys to insert.
    #[arg(short = 'n', long = "entries", default_value_t = 1000)]
    entries: usize,

    /// Probe policy used by the table.
    #[arg(short = 'p', long = "policy", value_enum, default_value_t = Policy::RobinHood)]
    policy: Policy,

    /// Load factor at which the table grows.
    #[arg(short = 'l', long = "load-factor", default_value_t = 0.85)]
    load_factor: f32,
}

#[derive(Clone, Copy, Default)]
struct SipBuilder;

impl core::hash::BuildHasher for SipBuilder {
    type Hasher = SipHasher;

    fn build_hasher(&self) -> Self::Hasher {
        SipHasher::new()
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
        .init();

    let args = Args::parse();

    let config = Config::default()
        .load_factor(args.load_factor)
        .probe_policy(args.policy.into());
    let mut table: HashTable<u64, u64, SipBuilder> =
        HashTable::with_config_and_hasher(config, SipBuilder);

    println!(
        "Filling {:?} table (load factor {}) with {} u64 keys...",
        table.policy(),
        table.config().get_load_factor(),
        args.entries
    );

    for key in 0..args.entries as u64 {
        if table.set(key, key * 2).is_some() {
            panic!("Key already exists in table: {}", key);
        }
    }

    println!("Inserted {} entries into {} slots", table.len(), table.capacity());
    println!(
        "Final load factor: {:.2}%",
        (table.len() as f64 / table.capacity() as f64) * 100.0
    );

    table.probe_histogram().print();
    table.debug_stats().print();

    if let Err(err) = table.remove(&0) {
        println!("remove(0): {err}");
    }
}
