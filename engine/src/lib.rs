//! MT19937 Partial - Mersenne Twister Engine
//!
//! Deterministic 32-bit pseudo-random number generator implementing MT19937,
//! extended so that each table refill may recompute only part of the table.
//!
//! # Architecture
//!
//! - **rng**: The generator (seeding, recurrence, tempering, slicing)
//! - **config**: Serde configuration for building generators
//!
//! # Critical Invariants
//!
//! 1. The state table is always exactly 624 `u32` words
//! 2. Same seed and recurrence depth → same sequence
//! 3. `slice` never mutates state and never reads past the recurrence depth
//!
//! Not suitable for cryptographic use. A generator is single-owner; clone it
//! to give independent streams to independent threads.
//!
//! # Example
//! ```
//! use mt19937_partial::MersenneTwister;
//!
//! let mut full = MersenneTwister::with_seed(0xadfa2178);
//! let mut reduced = MersenneTwister::new(0xadfa2178, 402).unwrap();
//! assert_eq!(full.random(), reduced.random());
//! ```

// Module declarations
pub mod config;
pub mod rng;

// Re-exports for convenience
pub use config::{ConfigError, GeneratorConfig};
pub use rng::{temper, InvalidArgument, MersenneTwister, MAX_RECURRENCE_DEPTH, TABLE_SIZE};
