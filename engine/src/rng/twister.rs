//! MT19937 Mersenne Twister with partial table recurrence
//!
//! The generator keeps the classic 624-word MT19937 state table, but the
//! recurrence pass that refills it only walks slots `0..=recurrence_depth`.
//! A depth of 623 is the standard twister; anything lower trades period and
//! statistical quality for a cheaper refill.
//!
//! # Algorithm
//!
//! - **Seeding**: `table[0] = seed`, then
//!   `table[n] = 1812433253 * (table[n-1] ^ (table[n-1] >> 30)) + n`
//!   for `n` in `1..=recurrence_depth`. Remaining slots stay zero.
//! - **Refill**: the MT19937 recurrence (`N = 624`, `M = 397`) applied to
//!   slots `0..=recurrence_depth`, with neighbours taken from the full ring.
//! - **Output**: the raw word at the cursor, passed through [`temper`].
//!
//! # Stale slots
//!
//! With `recurrence_depth < 623`, slots past the depth are never refreshed.
//! [`MersenneTwister::slice`] refuses to read them. [`MersenneTwister::random`]
//! walks the whole ring (that is what keeps refills on the 624 boundary), so
//! callers running a reduced depth should stay inside
//! [`MersenneTwister::fresh_remaining`] before calling
//! [`MersenneTwister::table_update`] themselves.
//!
//! # Determinism
//!
//! Same seed and depth → same sequence. The generator is NOT
//! cryptographically secure.

use std::fmt;

use rand_core::{impls, RngCore, SeedableRng};
use thiserror::Error;

/// Number of words in the state table
pub const TABLE_SIZE: usize = 624;

/// Largest recurrence depth accepted by [`MersenneTwister::new`]
pub const MAX_RECURRENCE_DEPTH: u32 = (TABLE_SIZE - 1) as u32;

const M: usize = 397;
const MATRIX_A: u32 = 0x9908_B0DF;
const UPPER_MASK: u32 = 0x8000_0000;
const LOWER_MASK: u32 = 0x7FFF_FFFF;

const INIT_MULTIPLIER: u32 = 1_812_433_253;

const TEMPERING_MASK_B: u32 = 0x9D2C_5680;
const TEMPERING_MASK_C: u32 = 0xEFC6_0000;

/// Errors raised when an operation is called with an out-of-contract argument
///
/// These are caller bugs, not transient failures: nothing is retried and the
/// generator state is untouched when one is returned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidArgument {
    #[error("Recurrence depth {requested} out of range: must be between 0 and {max}")]
    RecurrenceDepthOutOfRange { requested: i64, max: u32 },

    #[error("Slice length must be greater than 0")]
    EmptySlice,

    #[error("Slice length {length} exceeds the {available} fresh value(s) left in the table")]
    SliceOutOfRange { length: usize, available: usize },
}

/// Checks a requested recurrence depth and converts it to a table index.
pub(crate) fn check_recurrence_depth(requested: i64) -> Result<usize, InvalidArgument> {
    if (0..=i64::from(MAX_RECURRENCE_DEPTH)).contains(&requested) {
        Ok(requested as usize)
    } else {
        Err(InvalidArgument::RecurrenceDepthOutOfRange {
            requested,
            max: MAX_RECURRENCE_DEPTH,
        })
    }
}

/// MT19937 tempering transform
///
/// Turns a raw table word into an output value. Pure; never touches
/// generator state.
///
/// # Example
/// ```
/// use mt19937_partial::temper;
///
/// assert_eq!(temper(0), 0);
/// assert_eq!(temper(1), 4194449);
/// ```
pub fn temper(mut y: u32) -> u32 {
    y ^= y >> 11;
    y ^= (y << 7) & TEMPERING_MASK_B;
    y ^= (y << 15) & TEMPERING_MASK_C;
    y ^= y >> 18;
    y
}

/// Mersenne Twister (MT19937) with a configurable recurrence depth
///
/// Owns its table exclusively. Use [`Clone`] to branch an independent stream,
/// e.g. to hand one to another thread.
///
/// # Example
/// ```
/// use mt19937_partial::MersenneTwister;
///
/// let mut rng = MersenneTwister::with_seed(0xadfa2178);
/// assert_eq!(rng.random(), 4204083817);
///
/// // Peek without consuming
/// let next = rng.slice(1).unwrap()[0];
/// assert_eq!(next, 2076987897);
/// assert_eq!(rng.random(), next);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct MersenneTwister {
    /// State table; slots past `recurrence_depth` are stale after a refill
    table: [u32; TABLE_SIZE],

    /// Cursor: next slot to temper and emit
    index: usize,

    /// Highest slot recomputed by seeding and by each refill
    recurrence_depth: usize,
}

impl fmt::Debug for MersenneTwister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MersenneTwister")
            .field("index", &self.index)
            .field("recurrence_depth", &self.recurrence_depth)
            .field("table_head", &self.table[0])
            .finish_non_exhaustive()
    }
}

impl MersenneTwister {
    /// Create a generator seeded over slots `0..=recurrence_depth`
    ///
    /// # Arguments
    /// * `seed` - Stored in slot 0
    /// * `recurrence_depth` - Highest slot recomputed on seeding and refill (0..=623)
    ///
    /// # Errors
    /// [`InvalidArgument::RecurrenceDepthOutOfRange`] if `recurrence_depth > 623`.
    ///
    /// # Example
    /// ```
    /// use mt19937_partial::MersenneTwister;
    ///
    /// let rng = MersenneTwister::new(0x0, 402).unwrap();
    /// assert_eq!(rng.recurrence_depth(), 402);
    /// assert_eq!(rng.index(), 1);
    ///
    /// assert!(MersenneTwister::new(0x0, 624).is_err());
    /// ```
    pub fn new(seed: u32, recurrence_depth: u32) -> Result<Self, InvalidArgument> {
        let depth = check_recurrence_depth(i64::from(recurrence_depth))?;
        Ok(Self::seeded(seed, depth))
    }

    /// Create a standard full-depth (623) generator
    ///
    /// # Example
    /// ```
    /// use mt19937_partial::MersenneTwister;
    ///
    /// let mut rng = MersenneTwister::with_seed(0x0);
    /// assert_eq!(rng.recurrence_depth(), 623);
    /// assert_eq!(rng.random(), 4194449);
    /// ```
    pub fn with_seed(seed: u32) -> Self {
        Self::seeded(seed, TABLE_SIZE - 1)
    }

    /// `recurrence_depth` must already be validated.
    pub(crate) fn seeded(seed: u32, recurrence_depth: usize) -> Self {
        let mut table = [0u32; TABLE_SIZE];
        table[0] = seed;

        let mut prev = seed;
        for (n, slot) in table.iter_mut().enumerate().take(recurrence_depth + 1).skip(1) {
            prev = INIT_MULTIPLIER
                .wrapping_mul(prev ^ (prev >> 30))
                .wrapping_add(n as u32);
            *slot = prev;
        }

        tracing::debug!(seed, recurrence_depth, "seeded mersenne twister");

        Self {
            table,
            index: 1,
            recurrence_depth,
        }
    }

    /// Current cursor (next slot to be emitted)
    pub fn index(&self) -> u32 {
        self.index as u32
    }

    /// Highest slot recomputed on seeding and refill
    pub fn recurrence_depth(&self) -> u32 {
        self.recurrence_depth as u32
    }

    /// Number of values between the cursor and the recurrence depth
    ///
    /// This is the largest length [`slice`](Self::slice) accepts. Zero once
    /// the cursor has moved past the depth.
    pub fn fresh_remaining(&self) -> usize {
        (self.recurrence_depth + 1).saturating_sub(self.index)
    }

    /// Generate the next 32-bit value
    ///
    /// Reads the slot at the cursor, advances by one (refilling on the 624
    /// boundary), and returns the tempered word.
    ///
    /// # Example
    /// ```
    /// use mt19937_partial::MersenneTwister;
    ///
    /// let mut rng = MersenneTwister::with_seed(0x0);
    /// rng.random();
    /// assert_eq!(rng.index(), 2);
    /// ```
    pub fn random(&mut self) -> u32 {
        let y = self.table[self.index];
        self.discard(1);
        temper(y)
    }

    /// Skip `count` values without tempering them
    ///
    /// Crossing the end of the table runs one refill per full table passed.
    /// Every refill rewinds the cursor to 0, so an overshooting discard lands
    /// on the first slot of the fresh table.
    ///
    /// # Example
    /// ```
    /// use mt19937_partial::MersenneTwister;
    ///
    /// let mut rng = MersenneTwister::with_seed(0x0);
    /// rng.discard(624);
    /// assert_eq!(rng.index(), 0);
    /// assert_eq!(rng.random(), 2357136044);
    /// ```
    pub fn discard(&mut self, count: u32) {
        let table_size = TABLE_SIZE as u64;
        let advanced = self.index as u64 + u64::from(count);

        if advanced < table_size {
            self.index = advanced as usize;
            return;
        }

        let passes = advanced / table_size;
        tracing::trace!(count, passes, "discard crossed table boundary");
        for _ in 0..passes {
            self.table_update();
        }
    }

    /// Tempered values for the next `length` slots, without consuming them
    ///
    /// Equals what `length` calls to [`random`](Self::random) would return.
    ///
    /// # Errors
    /// - [`InvalidArgument::EmptySlice`] if `length == 0`
    /// - [`InvalidArgument::SliceOutOfRange`] if the window would run past
    ///   the recurrence depth (see [`fresh_remaining`](Self::fresh_remaining))
    ///
    /// # Example
    /// ```
    /// use mt19937_partial::MersenneTwister;
    ///
    /// let mut rng = MersenneTwister::new(0x0, 402).unwrap();
    /// rng.table_update();
    ///
    /// let window = rng.slice(6).unwrap();
    /// let drawn: Vec<u32> = (0..6).map(|_| rng.random()).collect();
    /// assert_eq!(window, drawn);
    /// ```
    pub fn slice(&self, length: usize) -> Result<Vec<u32>, InvalidArgument> {
        if length == 0 {
            return Err(InvalidArgument::EmptySlice);
        }

        let available = self.fresh_remaining();
        if length > available {
            return Err(InvalidArgument::SliceOutOfRange { length, available });
        }

        Ok(self.table[self.index..self.index + length]
            .iter()
            .map(|&y| temper(y))
            .collect())
    }

    /// Refill slots `0..=recurrence_depth` and rewind the cursor to 0
    pub fn table_update(&mut self) {
        self.table_update_to(0);
    }

    /// Refill slots `0..=recurrence_depth` and move the cursor to `reset_index`
    ///
    /// `reset_index` is taken modulo 624.
    pub fn table_update_to(&mut self, reset_index: u32) {
        self.index = reset_index as usize % TABLE_SIZE;

        for n in 0..=self.recurrence_depth {
            if n < TABLE_SIZE - M {
                self.update_slot(n, n + 1, n + M);
            } else if n < TABLE_SIZE - 1 {
                self.update_slot(n, n + 1, n + M - TABLE_SIZE);
            } else {
                self.update_slot(n, 0, M - 1);
            }
        }

        tracing::trace!(
            recurrence_depth = self.recurrence_depth,
            index = self.index,
            "table refilled"
        );
    }

    /// One step of the MT19937 recurrence, written back into `table[a]`
    fn update_slot(&mut self, a: usize, b: usize, c: usize) -> u32 {
        let k0 = (self.table[a] & UPPER_MASK) | (self.table[b] & LOWER_MASK);
        let k1 = (k0 >> 1) ^ self.table[c];

        self.table[a] = if k0 & 1 == 1 { k1 ^ MATRIX_A } else { k1 };
        self.table[a]
    }
}

impl RngCore for MersenneTwister {
    fn next_u32(&mut self) -> u32 {
        self.random()
    }

    fn next_u64(&mut self) -> u64 {
        impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for MersenneTwister {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::with_seed(u32::from_le_bytes(seed))
    }

    /// Keeps the low 32 bits, matching [`crate::GeneratorConfig`].
    fn seed_from_u64(state: u64) -> Self {
        Self::with_seed(state as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temper_of_one() {
        assert_eq!(temper(1), 0x0040_0091);
    }

    #[test]
    fn test_seed_zero_table_prefix() {
        let rng = MersenneTwister::with_seed(0);
        assert_eq!(rng.table[0], 0);
        assert_eq!(rng.table[1], 1);
        assert_eq!(rng.table[2], 1_812_433_255);
    }

    #[test]
    fn test_seeding_stops_at_recurrence_depth() {
        let rng = MersenneTwister::new(0xdead_beef, 10).unwrap();
        assert!(rng.table[1..=10].iter().any(|&w| w != 0));
        assert!(rng.table[11..].iter().all(|&w| w == 0));
    }

    #[test]
    fn test_depth_zero_seeds_only_slot_zero() {
        let rng = MersenneTwister::new(42, 0).unwrap();
        assert_eq!(rng.table[0], 42);
        assert!(rng.table[1..].iter().all(|&w| w == 0));
    }

    #[test]
    fn test_partial_refill_leaves_stale_slots() {
        let mut rng = MersenneTwister::new(0xadfa_2178, 402).unwrap();
        let before = rng.table;
        rng.table_update();

        assert_ne!(rng.table[..=402], before[..=402]);
        assert_eq!(rng.table[403..], before[403..]);
    }

    #[test]
    fn test_update_slot_applies_matrix_on_odd_k0() {
        let mut rng = MersenneTwister::new(0, 0).unwrap();
        rng.table[0] = 0;
        rng.table[1] = 1;
        rng.table[M] = 0;

        // k0 = 1 (odd): (1 >> 1) ^ 0 ^ MATRIX_A
        assert_eq!(rng.update_slot(0, 1, M), MATRIX_A);
        assert_eq!(rng.table[0], MATRIX_A);
    }

    #[test]
    fn test_update_slot_last_slot_wraps_to_front() {
        let mut full = MersenneTwister::with_seed(7);
        let expected = {
            let t = &full.table;
            let k0 = (t[623] & UPPER_MASK) | (t[0] & LOWER_MASK);
            let k1 = (k0 >> 1) ^ t[396];
            if k0 & 1 == 1 {
                k1 ^ MATRIX_A
            } else {
                k1
            }
        };
        assert_eq!(full.update_slot(623, 0, 396), expected);
    }

    #[test]
    fn test_table_update_to_wraps_reset_index() {
        let mut rng = MersenneTwister::with_seed(1);
        rng.table_update_to(625);
        assert_eq!(rng.index(), 1);
    }

    #[test]
    fn test_check_recurrence_depth_bounds() {
        assert_eq!(check_recurrence_depth(0), Ok(0));
        assert_eq!(check_recurrence_depth(623), Ok(623));
        assert_eq!(
            check_recurrence_depth(-1),
            Err(InvalidArgument::RecurrenceDepthOutOfRange {
                requested: -1,
                max: 623
            })
        );
        assert!(check_recurrence_depth(624).is_err());
    }

    #[test]
    fn test_debug_does_not_dump_table() {
        let rng = MersenneTwister::with_seed(5);
        let rendered = format!("{:?}", rng);
        assert!(rendered.contains("recurrence_depth: 623"));
        assert!(rendered.len() < 200);
    }
}
