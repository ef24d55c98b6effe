//! Deterministic random number generation
//!
//! MT19937 Mersenne Twister whose refill pass can be limited to the first
//! `recurrence_depth + 1` table slots.

pub(crate) mod twister;

pub use twister::{temper, InvalidArgument, MersenneTwister, MAX_RECURRENCE_DEPTH, TABLE_SIZE};
