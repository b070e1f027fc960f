//! Integer hash chain for per-event master seeds
//!
//! Each event gets a master seed from three chained hash stages, in a fixed
//! order: event number, run number, global seed. Every stage starts from the
//! previous stage's output, so each 32-bit input is compressed before the
//! next one is mixed in and the full range of event and run numbers is
//! preserved.
//!
//! The stage function is Bob Jenkins' one-at-a-time hash over the
//! little-endian bytes of the input.

/// One-at-a-time hash of `bytes`, starting from state `init`.
pub fn one_at_a_time(init: u32, bytes: &[u8]) -> u32 {
    let mut hash = init;
    for &byte in bytes {
        hash = hash.wrapping_add(byte as u32);
        hash = hash.wrapping_add(hash << 10);
        hash ^= hash >> 6;
    }
    hash = hash.wrapping_add(hash << 3);
    hash ^= hash >> 11;
    hash.wrapping_add(hash << 15)
}

/// Mix `value` into `previous`.
pub fn combine(previous: u32, value: u32) -> u32 {
    one_at_a_time(previous, &value.to_le_bytes())
}

/// Master seed for one event.
///
/// # Example
/// ```
/// use event_seeder_core::hash::master_seed;
///
/// let a = master_seed(42, 7, 1234567890);
/// assert_eq!(a, master_seed(42, 7, 1234567890));
/// assert_ne!(a, master_seed(7, 42, 1234567890));
/// ```
pub fn master_seed(event_number: u32, run_number: u32, global_seed: i32) -> u32 {
    let h1 = combine(0, event_number);
    let h2 = combine(h1, run_number);
    // global seed is validated positive, so the cast is lossless
    combine(h2, global_seed as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_finalizes_init() {
        assert_eq!(one_at_a_time(0, &[]), 0);
        assert_ne!(one_at_a_time(1, &[]), 1);
    }

    #[test]
    fn test_stage_order_matters() {
        // swapping event and run must not collide
        assert_ne!(master_seed(1, 2, 100), master_seed(2, 1, 100));
        assert_ne!(master_seed(0, 0, 1), master_seed(0, 1, 0x7FFF_FFFF));
    }

    #[test]
    fn test_full_range_inputs() {
        let seeds: Vec<u32> = [0u32, 1, 2_147_483_647, u32::MAX]
            .iter()
            .map(|&n| master_seed(n, n, 1))
            .collect();
        for (i, a) in seeds.iter().enumerate() {
            for b in &seeds[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
