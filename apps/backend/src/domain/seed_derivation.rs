//! Seed derivation for deterministic tables.
//!
//! A match draws one base seed; every round and every seeded bot derives its
//! own seed from it so replays with the same base seed are identical.

/// Seed for shuffling and dealing one round.
pub fn derive_dealing_seed(match_seed: u64, round_no: u32) -> u64 {
    match_seed
        .wrapping_add(u64::from(round_no).wrapping_mul(1_000_003))
        .wrapping_add(2)
}

/// Seed for a bot installed at `seat`.
pub fn derive_bot_seed(match_seed: u64, seat: u8) -> u64 {
    match_seed
        .rotate_left(17)
        .wrapping_add(u64::from(seat).wrapping_mul(7_919))
        .wrapping_add(1)
}
