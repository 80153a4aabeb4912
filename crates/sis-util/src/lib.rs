#![warn(missing_docs, unused_imports)]

//! Utilities for the sis library.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Finds the pair `(width, height)` with `width * height == x` and `width` the
/// largest divisor of `x` in `3..=floor(sqrt(x))`, so that shadow images stay
/// as square as possible.
///
/// The search starts at `floor(sqrt(x))` and walks down; divisors 1 and 2 are
/// never accepted. When no divisor above 2 exists the result degenerates to a
/// single row `(x, 1)`.
pub fn find_closest_pair(x: usize) -> (usize, usize) {
    let mut y = isqrt(x);
    while y > 2 {
        if x % y == 0 {
            return (y, x / y);
        }
        y -= 1;
    }
    (x, 1)
}

/// Integer square root, rounded down.
fn isqrt(x: usize) -> usize {
    if x < 2 {
        return x;
    }
    let mut r = (x as f64).sqrt() as usize;
    while r * r > x {
        r -= 1;
    }
    while (r + 1) * (r + 1) <= x {
        r += 1;
    }
    r
}

/// The swap targets of a Durstenfeld shuffle of `len` elements keyed by
/// `seed`: entry `i` (for `i >= 1`) is the index swapped with `i`.
fn swap_sequence(len: usize, seed: u16) -> Vec<usize> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed as u64);
    let mut swaps = vec![0usize; len];
    for i in (1..len).rev() {
        // Sample over u64 so the sequence does not depend on the pointer width.
        swaps[i] = rng.gen_range(0..=i as u64) as usize;
    }
    swaps
}

/// Shuffles `data` in place with a Durstenfeld shuffle keyed by `seed`.
pub fn permute<T>(data: &mut [T], seed: u16) {
    let swaps = swap_sequence(data.len(), seed);
    for i in (1..data.len()).rev() {
        data.swap(i, swaps[i]);
    }
}

/// Undoes [`permute`] called with the same `seed` on a slice of the same length.
pub fn unpermute<T>(data: &mut [T], seed: u16) {
    let swaps = swap_sequence(data.len(), seed);
    for i in 1..data.len() {
        data.swap(i, swaps[i]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn closest_pair() {
        assert_eq!(find_closest_pair(16), (4, 4));
        assert_eq!(find_closest_pair(12), (3, 4));
        assert_eq!(find_closest_pair(100), (10, 10));
        assert_eq!(find_closest_pair(1000), (25, 40));
        // Primes and tiny values have no divisor above 2.
        assert_eq!(find_closest_pair(13), (13, 1));
        assert_eq!(find_closest_pair(6), (6, 1));
        assert_eq!(find_closest_pair(3), (3, 1));
        assert_eq!(find_closest_pair(0), (0, 1));
    }

    #[test]
    fn isqrt_bounds() {
        for x in 0..10_000usize {
            let r = isqrt(x);
            assert!(r * r <= x);
            assert!((r + 1) * (r + 1) > x);
        }
    }

    #[test]
    fn permutation_is_deterministic() {
        let mut a: Vec<u8> = (0..=255).collect();
        let mut b = a.clone();
        permute(&mut a, 691);
        permute(&mut b, 691);
        assert_eq!(a, b);
        assert_ne!(a, (0..=255).collect::<Vec<u8>>());

        let mut c: Vec<u8> = (0..=255).collect();
        permute(&mut c, 692);
        assert_ne!(a, c);
    }

    proptest! {
        #[test]
        fn closest_pair_multiplies_back(x in 1usize..100_000) {
            let (w, h) = find_closest_pair(x);
            prop_assert_eq!(w * h, x);
            prop_assert!(h == 1 || w <= h);
        }

        #[test]
        fn unpermute_inverts_permute(data in proptest::collection::vec(any::<u8>(), 0..512), seed: u16) {
            let mut shuffled = data.clone();
            permute(&mut shuffled, seed);
            let mut sorted_a = shuffled.clone();
            let mut sorted_b = data.clone();
            sorted_a.sort_unstable();
            sorted_b.sort_unstable();
            prop_assert_eq!(sorted_a, sorted_b);

            unpermute(&mut shuffled, seed);
            prop_assert_eq!(shuffled, data);
        }
    }
}
