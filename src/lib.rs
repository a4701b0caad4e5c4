#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// Emits a `tracing` event when the `tracing` feature is enabled, and
/// compiles to nothing otherwise.
macro_rules! event {
    ($level:ident, $($arg:tt)+) => {
        #[cfg(feature = "tracing")]
        tracing::$level!($($arg)+);
    };
}
pub(crate) use event;

mod config;
mod error;
mod probe;

/// A key-value table using Robin-Hood open addressing.
///
/// This module provides a `HashTable` that wraps the `RawTable` and provides
/// a key-value interface with configurable hashers and probe policies.
pub mod hash_table;

/// The slot array underneath `HashTable`, driven by caller-supplied digests.
pub mod raw_table;

/// Probe-length and memory statistics.
#[cfg(any(test, feature = "stats"))]
pub mod stats;

pub use config::Config;
pub use config::DEFAULT_CAPACITY;
pub use config::DEFAULT_GROWTH_FACTOR;
pub use error::Error;
pub use hash_table::DefaultHashBuilder;
pub use hash_table::Entry;
pub use hash_table::HashTable;
pub use probe::ProbePolicy;
