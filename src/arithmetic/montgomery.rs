// Copyright 2017-2025 Brian Smith.
//
// Permission to use, copy, modify, and/or distribute this software for any
// purpose with or without fee is hereby granted, provided that the above
// copyright notice and this permission notice appear in all copies.
//
// THE SOFTWARE IS PROVIDED "AS IS" AND THE AUTHORS DISCLAIM ALL WARRANTIES
// WITH REGARD TO THIS SOFTWARE INCLUDING ALL IMPLIED WARRANTIES OF
// MERCHANTABILITY AND FITNESS. IN NO EVENT SHALL THE AUTHORS BE LIABLE FOR ANY
// SPECIAL, DIRECT, INDIRECT, OR CONSEQUENTIAL DAMAGES OR ANY DAMAGES
// WHATSOEVER RESULTING FROM LOSS OF USE, DATA OR PROFITS, WHETHER IN AN ACTION
// OF CONTRACT, NEGLIGENCE OR OTHER TORTIOUS ACTION, ARISING OUT OF OR IN
// CONNECTION WITH THE USE OR PERFORMANCE OF THIS SOFTWARE.

//! Montgomery modular exponentiation.
//!
//! *R* and *r* in Montgomery math refer to different things, so we always
//! use `R` to refer to *R* = 2**(64·t) for a t-limb modulus, to avoid
//! confusion.
//!
//! A [`Modulus`] caches everything exponentiation needs about an odd
//! modulus m: its limbs, its bit length, and n0 = −m⁻¹ mod 2^64. In the
//! loop of a multi-limb Montgomery reduction of a product t, we repeatedly
//! calculate:
//!
//! ```text
//!    t1 := t mod 2^64     (t's lowest limb)
//!    t2 := t1·n0·m
//!    t  := (t + t2) / 2^64
//! ```
//!
//! The division is exact because t + t2 == 0 (mod 2^64) by the choice of
//! n0. After one pass per limb, t has been divided by R and reduced to
//! below 2m; a single conditional subtraction brings it into [0, m).

use super::bigint::Nonnegative;
use super::{Limb, LIMB_BITS};
use crate::{bits::BitLength, error};

/// An odd modulus and its cached Montgomery parameters, immutable after
/// construction.
pub(crate) struct Modulus {
    value: Nonnegative,
    /// n0 = -value⁻¹ mod 2^64.
    n0: Limb,
    len_bits: BitLength,
}

impl Modulus {
    /// Requires `value` to be odd and at least 3.
    pub fn new(value: Nonnegative) -> Result<Self, error::Unspecified> {
        if !value.is_odd() || value <= Nonnegative::from_u64(1) {
            return Err(error::Unspecified);
        }
        let n0 = neg_inverse(value.limbs()[0]);
        let len_bits = value.bit_length();
        Ok(Self { value, n0, len_bits })
    }

    #[inline]
    pub fn len_bits(&self) -> BitLength {
        self.len_bits
    }

    #[inline]
    pub fn value(&self) -> &Nonnegative {
        &self.value
    }

    /// base**exponent (mod self), by left-to-right binary (square-and-
    /// multiply, window width 1) exponentiation in the Montgomery domain.
    ///
    /// The run time depends on the bit length and Hamming weight of
    /// `exponent`; this is a public-key operation and the exponent is
    /// public.
    pub fn mod_pow(&self, base: &Nonnegative, exponent: &Nonnegative) -> Nonnegative {
        if exponent.is_zero() {
            // m > 1, so 1 mod m == 1.
            return Nonnegative::from_u64(1);
        }

        let num_limbs = self.value.limbs().len();

        // base·R mod m, computed as (base mod m) << 64·t, reduced by
        // division. Knuth D is not the fastest way to get into the
        // Montgomery domain but it happens once per exponentiation.
        let (_, reduced) = base.div_rem(&self.value);
        let (_, base_mont) = reduced.shl_limbs(num_limbs).div_rem(&self.value);
        let base_mont = to_fixed_width(&base_mont, num_limbs);

        let mut acc = base_mont.clone();
        let top_bit = exponent.bit_length().as_usize_bits() - 1;
        for i in (0..top_bit).rev() {
            acc = self.mont_mul(&acc, &acc);
            if exponent.bit(i) {
                acc = self.mont_mul(&acc, &base_mont);
            }
        }

        // Revert from the Montgomery domain: one reduction divides by R.
        let mut wide = vec![0; 2 * num_limbs];
        wide[..num_limbs].copy_from_slice(&acc);
        let reverted = self.mont_reduce(&mut wide);
        Nonnegative::from_limbs(reverted)
    }

    /// a·b/R mod m for fixed-width Montgomery operands a, b < m.
    fn mont_mul(&self, a: &[Limb], b: &[Limb]) -> Vec<Limb> {
        let num_limbs = self.value.limbs().len();
        debug_assert_eq!(a.len(), num_limbs);
        debug_assert_eq!(b.len(), num_limbs);

        let mut t = vec![0; 2 * num_limbs];
        for (i, &a_limb) in a.iter().enumerate() {
            let mut carry: u128 = 0;
            for (j, &b_limb) in b.iter().enumerate() {
                let limb =
                    u128::from(t[i + j]) + u128::from(a_limb) * u128::from(b_limb) + carry;
                t[i + j] = limb as Limb;
                carry = limb >> LIMB_BITS;
            }
            t[i + num_limbs] = carry as Limb;
        }
        self.mont_reduce(&mut t)
    }

    /// Reduces a double-width value t < m·R to t/R mod m, in [0, m).
    fn mont_reduce(&self, t: &mut [Limb]) -> Vec<Limb> {
        let m = self.value.limbs();
        let num_limbs = m.len();
        debug_assert_eq!(t.len(), 2 * num_limbs);

        let mut overflow: Limb = 0;
        for i in 0..num_limbs {
            let u = t[i].wrapping_mul(self.n0);
            let mut carry: u128 = 0;
            for (j, &m_limb) in m.iter().enumerate() {
                let limb = u128::from(t[i + j]) + u128::from(u) * u128::from(m_limb) + carry;
                t[i + j] = limb as Limb;
                carry = limb >> LIMB_BITS;
            }
            // Propagate into the upper half; at most one bit ever spills
            // past the end because the running value stays below 2m·R.
            let mut carry = carry as Limb;
            let mut k = i + num_limbs;
            while carry != 0 {
                if k == t.len() {
                    overflow += carry;
                    break;
                }
                let (sum, c) = t[k].overflowing_add(carry);
                t[k] = sum;
                carry = Limb::from(c);
                k += 1;
            }
        }

        let mut r = t[num_limbs..].to_vec();
        if overflow != 0 || !less_than(&r, m) {
            sub_in_place(&mut r, m);
        }
        r
    }
}

/// −m0⁻¹ mod 2^64 for odd m0, by Newton's iteration: x := x·(2 − m0·x)
/// doubles the number of correct low bits each step, and any odd m0 is its
/// own inverse mod 8, so five steps reach 64 bits.
fn neg_inverse(m0: Limb) -> Limb {
    debug_assert_eq!(m0 & 1, 1);
    let mut x = m0;
    for _ in 0..5 {
        x = x.wrapping_mul(2u64.wrapping_sub(m0.wrapping_mul(x)));
    }
    debug_assert_eq!(m0.wrapping_mul(x), 1);
    x.wrapping_neg()
}

fn to_fixed_width(value: &Nonnegative, num_limbs: usize) -> Vec<Limb> {
    let mut limbs = vec![0; num_limbs];
    limbs[..value.limbs().len()].copy_from_slice(value.limbs());
    limbs
}

// a < b over equal-width limb slices.
fn less_than(a: &[Limb], b: &[Limb]) -> bool {
    debug_assert_eq!(a.len(), b.len());
    for (&a_limb, &b_limb) in a.iter().zip(b.iter()).rev() {
        if a_limb != b_limb {
            return a_limb < b_limb;
        }
    }
    false
}

// a -= b, ignoring the final borrow (the caller arranges that it cancels an
// overflow bit).
fn sub_in_place(a: &mut [Limb], b: &[Limb]) {
    debug_assert_eq!(a.len(), b.len());
    let mut borrow = false;
    for (a_limb, &b_limb) in a.iter_mut().zip(b.iter()) {
        let (d, b1) = a_limb.overflowing_sub(b_limb);
        let (d, b2) = d.overflowing_sub(Limb::from(borrow));
        *a_limb = d;
        borrow = b1 | b2;
    }
}

#[cfg(test)]
mod tests {
    use super::{neg_inverse, Modulus};
    use crate::arithmetic::bigint::Nonnegative;
    use crate::test;

    fn modulus(value: u64) -> Modulus {
        Modulus::new(Nonnegative::from_u64(value)).unwrap()
    }

    #[test]
    fn test_neg_inverse() {
        for m0 in [1u64, 3, 5, 0xffff_ffff_ffff_ffff, 0x1234_5678_9abc_def1] {
            let n0 = neg_inverse(m0);
            assert_eq!(m0.wrapping_mul(n0), 0u64.wrapping_sub(1));
        }
    }

    #[test]
    fn test_rejects_bad_moduli() {
        assert!(Modulus::new(Nonnegative::zero()).is_err());
        assert!(Modulus::new(Nonnegative::from_u64(1)).is_err());
        assert!(Modulus::new(Nonnegative::from_u64(4)).is_err());
        assert!(Modulus::new(Nonnegative::from_u64(3)).is_ok());
    }

    #[test]
    fn test_mod_pow_small() {
        // 7^5 mod 23 == 17
        let m = modulus(23);
        let r = m.mod_pow(&Nonnegative::from_u64(7), &Nonnegative::from_u64(5));
        assert_eq!(r, Nonnegative::from_u64(17));

        // Anything to the zeroth power is 1.
        let r = m.mod_pow(&Nonnegative::from_u64(7), &Nonnegative::zero());
        assert_eq!(r, Nonnegative::from_u64(1));

        // Base larger than the modulus is reduced first.
        let r = m.mod_pow(&Nonnegative::from_u64(23 * 4 + 7), &Nonnegative::from_u64(5));
        assert_eq!(r, Nonnegative::from_u64(17));

        // 2^10 mod 1023 == 1
        let m = modulus(1023);
        let r = m.mod_pow(&Nonnegative::from_u64(2), &Nonnegative::from_u64(10));
        assert_eq!(r, Nonnegative::from_u64(1));
    }

    #[test]
    fn test_mod_pow_known_answers() {
        test::from_file(
            "src/arithmetic/mod_pow_tests.txt",
            |section, test_case| {
                assert_eq!(section, "");
                let base = consume_value(test_case, "Base");
                let exponent = consume_value(test_case, "Exponent");
                let m = consume_value(test_case, "Modulus");
                let expected = consume_value(test_case, "Result");

                let m = Modulus::new(m).unwrap();
                assert_eq!(m.mod_pow(&base, &exponent), expected);
                Ok(())
            },
        );
    }

    fn consume_value(test_case: &mut test::TestCase, key: &str) -> Nonnegative {
        Nonnegative::from_be_bytes(&test_case.consume_bytes(key))
    }
}
