// src/sign.rs
//! Canonical reordering sign for products of bitmap-encoded blades.
//!
//! For blades `A` and `B` given as bitmaps, `A * B = sign · (A ^ B)` where the
//! sign collects one factor of −1 per transposition needed to bring the
//! concatenated basis vectors into ascending order, and one metric factor
//! per basis vector the two blades share. Exact for diagonal metrics only.

/// Transposition parity of `bitmap_a * bitmap_b` under a Euclidean metric.
///
/// Each shift of `a` lines its vectors up against the lower vectors of `b`;
/// the shared bits at every shift are the swaps needed to move past them.
#[inline(always)]
pub fn reordering_sign_euclidean(bitmap_a: usize, bitmap_b: usize) -> i8 {
    let mut a = bitmap_a >> 1;
    let mut swaps = 0u32;
    while a != 0 {
        swaps += (a & bitmap_b).count_ones();
        a >>= 1;
    }
    if swaps & 1 == 0 {
        1
    } else {
        -1
    }
}

/// Full reordering sign of `bitmap_a * bitmap_b` under `signature`.
///
/// `signature[i]` is the square (±1) of basis vector `i`, so it must cover
/// every bit set in either bitmap.
#[inline(always)]
pub fn reordering_sign(bitmap_a: usize, bitmap_b: usize, signature: &[i8]) -> i8 {
    let mut sign = reordering_sign_euclidean(bitmap_a, bitmap_b);
    let mut shared = bitmap_a & bitmap_b;
    let mut i = 0;
    while shared != 0 {
        if shared & 1 != 0 {
            sign *= signature[i];
        }
        i += 1;
        shared >>= 1;
    }
    sign
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Swap count the slow way: for each vector of `a`, count the lower vectors of `b`.
    fn swap_parity(a: usize, b: usize, n: usize) -> i8 {
        let mut sgn = 1i8;
        for bit in 0..n {
            if (a >> bit) & 1 != 0 {
                let lower = b & ((1 << bit) - 1);
                if lower.count_ones() & 1 != 0 {
                    sgn = -sgn;
                }
            }
        }
        sgn
    }

    #[test]
    fn vector_pairs() {
        // e1*e2 = +e12, e2*e1 = -e12
        assert_eq!(reordering_sign_euclidean(0b01, 0b10), 1);
        assert_eq!(reordering_sign_euclidean(0b10, 0b01), -1);
        // e1*e1 = +1
        assert_eq!(reordering_sign_euclidean(0b01, 0b01), 1);
    }

    #[test]
    fn bivector_and_pseudoscalar_squares() {
        let euclid = [1, 1, 1];
        assert_eq!(reordering_sign(0b011, 0b011, &euclid), -1);
        assert_eq!(reordering_sign(0b111, 0b111, &euclid), -1);
    }

    #[test]
    fn metric_factors_only_hit_shared_vectors() {
        let sta = [1, -1, -1, -1];
        assert_eq!(reordering_sign(0b0001, 0b0001, &sta), 1);
        assert_eq!(reordering_sign(0b0010, 0b0010, &sta), -1);
        // e1 * e0 = -e01 regardless of the metric
        assert_eq!(reordering_sign(0b0010, 0b0001, &sta), -1);
        // e01 * e01 = -e0 e0 e1 e1 = -(1)(-1) = +1
        assert_eq!(reordering_sign(0b0011, 0b0011, &sta), 1);
    }

    #[test]
    fn matches_swap_counting_for_all_4d_pairs() {
        for a in 0..16 {
            for b in 0..16 {
                assert_eq!(
                    reordering_sign_euclidean(a, b),
                    swap_parity(a, b, 4),
                    "a = {a:04b}, b = {b:04b}"
                );
            }
        }
    }
}
