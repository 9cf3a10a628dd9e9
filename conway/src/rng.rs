// rng.rs - Random bit source used to reseed the grid

use rand::rngs::SmallRng;
use rand::{RngCore, SeedableRng};

/// Source of independent, uniformly distributed bits.
///
/// Only consulted while reseeding. Any `rand` generator qualifies through
/// the blanket impl below.
pub trait RandomSource {
    /// One fair coin flip.
    fn next_bit(&mut self) -> bool;

    /// Fill `cells` with 0/1 values, one independent bit per cell.
    fn fill_bits(&mut self, cells: &mut [u8]) {
        for cell in cells {
            *cell = u8::from(self.next_bit());
        }
    }
}

impl<R: RngCore + ?Sized> RandomSource for R {
    fn next_bit(&mut self) -> bool {
        self.next_u32() & 1 == 1
    }

    // 64 cells per draw instead of one
    fn fill_bits(&mut self, cells: &mut [u8]) {
        for chunk in cells.chunks_mut(64) {
            let mut bits = self.next_u64();
            for cell in chunk {
                *cell = (bits & 1) as u8;
                bits >>= 1;
            }
        }
    }
}

/// Generator for a display loop: fixed when `seed` is set, OS-seeded otherwise.
pub fn seeded_rng(seed: Option<u64>) -> SmallRng {
    match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_bits_only_writes_zero_or_one() {
        let mut rng = SmallRng::seed_from_u64(7);
        let mut cells = [9u8; 200];
        rng.fill_bits(&mut cells);
        assert!(cells.iter().all(|&c| c <= 1));
        assert!(cells.contains(&0) && cells.contains(&1));
    }

    #[test]
    fn fixed_seed_repeats() {
        let mut a = [0u8; 64];
        let mut b = [0u8; 64];
        seeded_rng(Some(99)).fill_bits(&mut a);
        seeded_rng(Some(99)).fill_bits(&mut b);
        assert_eq!(a, b);
    }

    #[test]
    fn default_fill_uses_next_bit() {
        struct Alternating(bool);
        impl RandomSource for Alternating {
            fn next_bit(&mut self) -> bool {
                self.0 = !self.0;
                self.0
            }
        }

        let mut cells = [0u8; 5];
        Alternating(false).fill_bits(&mut cells);
        assert_eq!(cells, [1, 0, 1, 0, 1]);
    }
}
