//! Arithmetic in the prime field GF(251).
//!
//! 251 is the largest prime below 256, so every grayscale value in `0..=250`
//! is a field element. Values 251 to 255 are not and must be truncated before
//! they reach this module.

use crate::{Error, Result};

/// The field modulus.
pub const PRIME: u16 = 251;

/// Multiplicative inverses modulo [`PRIME`]: `MUL_INVERSE[x] * x = 1 (mod 251)`
/// for every `x` in `1..251`. Entry 0 is a sentinel and is never a valid
/// inverse.
pub const MUL_INVERSE: [u16; PRIME as usize] = [
    0, 1, 126, 84, 63, 201, 42, 36, 157, 28, 226, 137,
    21, 58, 18, 67, 204, 192, 14, 185, 113, 12, 194, 131,
    136, 241, 29, 93, 9, 26, 159, 81, 102, 213, 96, 208,
    7, 95, 218, 103, 182, 49, 6, 216, 97, 106, 191, 235,
    68, 41, 246, 64, 140, 90, 172, 178, 130, 229, 13, 234,
    205, 107, 166, 4, 51, 112, 232, 15, 48, 211, 104, 99,
    129, 196, 173, 164, 109, 163, 177, 197, 91, 31, 150, 124,
    3, 189, 108, 176, 174, 110, 53, 80, 221, 27, 243, 37,
    34, 44, 146, 71, 123, 169, 32, 39, 70, 153, 45, 61,
    86, 76, 89, 199, 65, 20, 240, 227, 132, 118, 117, 135,
    228, 195, 179, 100, 83, 249, 2, 168, 151, 72, 56, 23,
    116, 134, 133, 119, 24, 11, 231, 186, 52, 162, 175, 165,
    190, 206, 98, 181, 212, 219, 82, 128, 180, 105, 207, 217,
    214, 8, 224, 30, 171, 198, 141, 77, 75, 143, 62, 248,
    127, 101, 220, 160, 54, 74, 88, 142, 87, 78, 55, 122,
    152, 147, 40, 203, 236, 19, 139, 200, 247, 85, 144, 46,
    17, 238, 22, 121, 73, 79, 161, 111, 187, 5, 210, 183,
    16, 60, 145, 154, 35, 245, 202, 69, 148, 33, 156, 244,
    43, 155, 38, 149, 170, 92, 225, 242, 158, 222, 10, 115,
    120, 57, 239, 138, 66, 237, 59, 47, 184, 233, 193, 230,
    114, 25, 223, 94, 215, 209, 50, 188, 167, 125, 250,
];

/// Reduces `a` into `[0, m)`, also for negative dividends.
///
/// `%` keeps the sign of the dividend (`-1 % 10 == -1`), this returns `9`.
pub fn mod_normalize(a: i64, m: i64) -> i64 {
    let r = a % m;
    if r < 0 {
        r + m
    } else {
        r
    }
}

/// Reduces `a` into `[0, 251)`.
#[inline]
pub fn reduce(a: i64) -> i64 {
    mod_normalize(a, PRIME as i64)
}

/// Returns the multiplicative inverse of `x` modulo 251 from [`MUL_INVERSE`].
///
/// Returns an error if `x` is congruent to 0.
pub fn inverse(x: i64) -> Result<i64> {
    match reduce(x) {
        0 => Err(Error::NotInvertible(x)),
        r => Ok(MUL_INVERSE[r as usize] as i64),
    }
}

/// Computes `x^e mod 251`.
pub fn pow(x: u16, e: usize) -> i64 {
    let base = reduce(x as i64);
    (0..e).fold(1i64, |acc, _| (acc * base) % PRIME as i64)
}

/// Evaluates `sum(coeffs[i] * x^i) mod 251`.
///
/// Coefficients are field elements (bytes at most 250), the accumulator is
/// reduced at every Horner step so it never overflows.
pub fn evaluate_polynomial(coeffs: &[u8], x: u16) -> u8 {
    let x = x as u32 % PRIME as u32;
    let acc = coeffs
        .iter()
        .rev()
        .fold(0u32, |acc, &c| (acc * x + c as u32) % PRIME as u32);
    acc as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn inverse_table() {
        assert_eq!(MUL_INVERSE[0], 0);
        assert_eq!(MUL_INVERSE[1], 1);
        assert_eq!(MUL_INVERSE[2], 126);
        assert_eq!(MUL_INVERSE[250], 250);
        for x in 1..PRIME as usize {
            assert_eq!((x * MUL_INVERSE[x] as usize) % PRIME as usize, 1);
            assert!(MUL_INVERSE[x] >= 1 && MUL_INVERSE[x] < PRIME);
        }
    }

    #[test]
    fn inverse_rejects_zero() {
        assert_eq!(inverse(0), Err(Error::NotInvertible(0)));
        assert_eq!(inverse(251), Err(Error::NotInvertible(251)));
        assert_eq!(inverse(-1), Ok(250));
        assert_eq!(inverse(253), Ok(126));
    }

    #[test]
    fn normalize_negative() {
        assert_eq!(mod_normalize(-1, 10), 9);
        assert_eq!(mod_normalize(-10, 10), 0);
        assert_eq!(mod_normalize(7, 10), 7);
        assert_eq!(mod_normalize(-252, 251), 250);
    }

    #[test]
    fn powers() {
        assert_eq!(pow(3, 0), 1);
        assert_eq!(pow(3, 5), 243);
        assert_eq!(pow(3, 6), (243 * 3) % 251);
        assert_eq!(pow(250, 2), 1);
    }

    #[test]
    fn polynomial_evaluation() {
        assert_eq!(evaluate_polynomial(&[], 7), 0);
        assert_eq!(evaluate_polynomial(&[10, 20], 1), 30);
        assert_eq!(evaluate_polynomial(&[10, 20], 3), 70);
        // 250 is -1: (-1) + (-1)(-1) + (-1)(-1)^2 = -1
        assert_eq!(evaluate_polynomial(&[250, 250, 250], 250), 250);
        assert_eq!(evaluate_polynomial(&[5], 200), 5);
    }

    proptest! {
        #[test]
        fn subtraction_closure(a in 0i64..251, b in 0i64..251) {
            let r = mod_normalize(a - b, PRIME as i64);
            prop_assert!((0..251).contains(&r));
            prop_assert_eq!(reduce(r + b), a);
        }

        #[test]
        fn evaluation_matches_naive(coeffs in proptest::collection::vec(0u8..=250, 1..12), x in 1u16..251) {
            let naive = coeffs
                .iter()
                .enumerate()
                .fold(0i64, |acc, (i, &c)| reduce(acc + c as i64 * pow(x, i)));
            prop_assert_eq!(evaluate_polynomial(&coeffs, x) as i64, naive);
        }
    }
}
