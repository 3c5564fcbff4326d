//! Seeded random numbers for reproducible mazes.
//!
//! A seed string is hashed with xmur3 and the first hash output seeds a
//! mulberry32 generator. Both are bit-exact with the common JavaScript
//! implementations, so a seed shared between the terminal game and the
//! browser build yields the same maze.

use rand::{Error, RngCore};

pub const DEFAULT_SEED: &str = "maze-seed";

/// xmur3 string hash. Each call to [`Xmur3::next_u32`] yields a further mixed
/// output of the same hash state.
#[derive(Debug, Clone)]
pub struct Xmur3 {
    h: u32,
}

impl Xmur3 {
    pub fn new(seed: &str) -> Self {
        // Length and characters are UTF-16 code units, as JavaScript sees them.
        let len = seed.encode_utf16().count() as u32;
        let mut h = 1_779_033_703 ^ len;
        for unit in seed.encode_utf16() {
            h = (h ^ unit as u32).wrapping_mul(3_432_918_353);
            h = h.rotate_left(13);
        }
        Self { h }
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut h = self.h;
        h = (h ^ (h >> 16)).wrapping_mul(2_246_822_507);
        h = (h ^ (h >> 13)).wrapping_mul(3_266_489_909);
        h ^= h >> 16;
        self.h = h;
        h
    }
}

#[derive(Debug, Clone)]
pub struct Mulberry32 {
    state: u32,
}

impl Mulberry32 {
    pub fn new(state: u32) -> Self {
        Self { state }
    }

    pub fn state(&self) -> u32 {
        self.state
    }

    /// Next draw as a float in `[0, 1)`.
    pub fn next_f64(&mut self) -> f64 {
        unit_f64(self.next_u32())
    }
}

impl RngCore for Mulberry32 {
    fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6d2b_79f5);
        let mut t = self.state;
        t = (t ^ (t >> 15)).wrapping_mul(t | 1);
        t ^= t.wrapping_add((t ^ (t >> 7)).wrapping_mul(t | 61));
        t ^ (t >> 14)
    }

    fn next_u64(&mut self) -> u64 {
        let lo = self.next_u32() as u64;
        let hi = self.next_u32() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Maps a raw 32-bit draw onto `[0, 1)`.
pub fn unit_f64(raw: u32) -> f64 {
    raw as f64 / 4_294_967_296.0
}

/// Builds the maze generator for `seed`. A missing or empty seed falls back
/// to [`DEFAULT_SEED`].
pub fn derive_generator(seed: Option<&str>) -> Mulberry32 {
    let seed = match seed {
        Some(s) if !s.is_empty() => s,
        _ => DEFAULT_SEED,
    };
    let state = Xmur3::new(seed).next_u32();
    log::debug!("seed {:?} hashed to state {}", seed, state);
    Mulberry32::new(state)
}
