//! xorshift64* random number generator
//!
//! Fast, fully specified PRNG. One instance is seeded per event with the
//! event's master seed and then drawn once per registered processor.
//!
//! # Algorithm
//!
//! xorshift64* is a variant of xorshift that passes TestU01's BigCrush
//! statistical tests. It uses 64-bit state and produces 64-bit output.
//!
//! # Determinism
//!
//! Same seed → same sequence of random numbers, so re-reading an event
//! yields the same processor seeds no matter when it is revisited.

use serde::{Deserialize, Serialize};

/// SplitMix64 increment (golden ratio)
const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// SplitMix64 finalizer
fn mix64(mut x: u64) -> u64 {
    x ^= x >> 30;
    x = x.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^ (x >> 31)
}

/// Deterministic random number generator using xorshift64*
///
/// # Example
/// ```
/// use event_seeder_core::RngManager;
///
/// let mut rng = RngManager::new(12345);
/// let value = rng.next();
/// let seed = rng.next_u32();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngManager {
    /// Internal state (64-bit)
    state: u64,
}

impl RngManager {
    /// Create a new RNG with given seed
    ///
    /// # Arguments
    /// * `seed` - Initial seed value (u64)
    ///
    /// # Example
    /// ```
    /// use event_seeder_core::RngManager;
    ///
    /// let rng = RngManager::new(12345);
    /// ```
    pub fn new(seed: u64) -> Self {
        // Ensure seed is never zero (xorshift requirement)
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Create an RNG from a 32-bit per-event master seed
    ///
    /// The master seed is spread over the full 64-bit state first; a raw
    /// small seed would leave most state bits zero and the first draws
    /// would be poorly mixed.
    ///
    /// # Example
    /// ```
    /// use event_seeder_core::RngManager;
    ///
    /// let mut a = RngManager::from_master_seed(7);
    /// let mut b = RngManager::from_master_seed(7);
    /// assert_eq!(a.next_u32(), b.next_u32());
    /// ```
    pub fn from_master_seed(master_seed: u32) -> Self {
        Self::new(mix64((master_seed as u64).wrapping_add(GOLDEN_GAMMA)))
    }

    /// Generate next random u64 value
    ///
    /// This advances the internal state and returns a random value.
    ///
    /// # Example
    /// ```
    /// use event_seeder_core::RngManager;
    ///
    /// let mut rng = RngManager::new(12345);
    /// let value = rng.next();
    /// ```
    pub fn next(&mut self) -> u64 {
        // xorshift64* algorithm
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Generate next random u32 value
    ///
    /// Takes the upper half of the xorshift64* output; the low bits of
    /// xorshift64* are the weaker ones.
    pub fn next_u32(&mut self) -> u32 {
        (self.next() >> 32) as u32
    }

    /// Get current RNG state (for checkpointing/replay)
    ///
    /// # Example
    /// ```
    /// use event_seeder_core::RngManager;
    ///
    /// let rng = RngManager::new(12345);
    /// let state = rng.get_state();
    ///
    /// // Later, can recreate RNG from this state
    /// let rng2 = RngManager::new(state);
    /// ```
    pub fn get_state(&self) -> u64 {
        self.state
    }
}
