// Copyright 2015-2023 Brian Smith.
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

//! Nonnegative multi-precision integers.
//!
//! Values are unsigned magnitudes stored as little-endian `u64` limb
//! vectors, kept *clamped*: no redundant zero limbs at the most-significant
//! end, and zero is the empty vector. Every constructor and operation
//! returns clamped values.

use super::{Limb, LIMB_BITS, LIMB_BYTES};
use crate::bits::BitLength;

/// A nonnegative integer of unbounded precision.
#[derive(Clone, Eq, PartialEq)]
pub(crate) struct Nonnegative {
    limbs: Vec<Limb>,
}

impl Nonnegative {
    pub fn zero() -> Self {
        Self { limbs: Vec::new() }
    }

    pub fn from_u64(value: u64) -> Self {
        let mut r = Self { limbs: vec![value] };
        Self::clamp(&mut r);
        r
    }

    /// Parses a big-endian byte string. The empty string is zero; leading
    /// zero bytes are accepted and ignored.
    pub fn from_be_bytes(bytes: &[u8]) -> Self {
        let mut limbs = Vec::with_capacity((bytes.len() + LIMB_BYTES - 1) / LIMB_BYTES);
        for chunk in bytes.rchunks(LIMB_BYTES) {
            let mut limb: Limb = 0;
            for &b in chunk {
                limb = (limb << 8) | Limb::from(b);
            }
            limbs.push(limb);
        }
        let mut r = Self { limbs };
        Self::clamp(&mut r);
        r
    }

    /// Takes ownership of a little-endian limb vector.
    pub fn from_limbs(limbs: Vec<Limb>) -> Self {
        let mut r = Self { limbs };
        Self::clamp(&mut r);
        r
    }

    fn clamp(&mut self) {
        while self.limbs.last() == Some(&0) {
            let _ = self.limbs.pop();
        }
    }

    #[inline]
    pub fn limbs(&self) -> &[Limb] {
        &self.limbs
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.limbs.is_empty()
    }

    #[inline]
    pub fn is_odd(&self) -> bool {
        self.limbs.first().map_or(false, |limb| limb & 1 == 1)
    }

    pub fn bit_length(&self) -> BitLength {
        let bits = match self.limbs.last() {
            None => 0,
            Some(&top) => {
                (self.limbs.len() - 1) * LIMB_BITS + (LIMB_BITS - top.leading_zeros() as usize)
            }
        };
        BitLength::from_usize_bits(bits)
    }

    /// Bit `i`, counting from the least significant bit.
    pub fn bit(&self, i: usize) -> bool {
        match self.limbs.get(i / LIMB_BITS) {
            Some(&limb) => (limb >> (i % LIMB_BITS)) & 1 == 1,
            None => false,
        }
    }

    /// Writes the value into `out` as a big-endian byte string, left-padded
    /// with zeros. The value must fit.
    pub fn fill_be_bytes(&self, out: &mut [u8]) {
        assert!(self.bit_length().as_usize_bytes_rounded_up() <= out.len());
        out.fill(0);
        let mut end = out.len();
        for &limb in &self.limbs {
            let bytes = limb.to_be_bytes();
            let start = end.saturating_sub(LIMB_BYTES);
            out[start..end].copy_from_slice(&bytes[LIMB_BYTES - (end - start)..]);
            end = start;
        }
    }

    /// The value shifted left by `n` whole limbs.
    pub fn shl_limbs(&self, n: usize) -> Self {
        if self.is_zero() {
            return Self::zero();
        }
        let mut limbs = vec![0; n];
        limbs.extend_from_slice(&self.limbs);
        Self { limbs }
    }

    /// Schoolbook multiplication.
    pub fn mul(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            return Self::zero();
        }
        let a = &self.limbs;
        let b = &other.limbs;
        let mut r = vec![0; a.len() + b.len()];
        for (i, &a_limb) in a.iter().enumerate() {
            let mut carry: u128 = 0;
            for (j, &b_limb) in b.iter().enumerate() {
                let t = u128::from(r[i + j]) + u128::from(a_limb) * u128::from(b_limb) + carry;
                r[i + j] = t as Limb;
                carry = t >> LIMB_BITS;
            }
            r[i + b.len()] = carry as Limb;
        }
        Self::from_limbs(r)
    }

    /// Knuth Algorithm D long division: returns (quotient, remainder).
    ///
    /// Normalizes the divisor so its top bit is set, estimates each quotient
    /// digit from the two leading limbs of the running remainder and the
    /// leading limb of the divisor, corrects the estimate at most twice,
    /// multiply-subtracts, and adds back on the rare over-estimate. The
    /// remainder is denormalized on the way out.
    pub fn div_rem(&self, divisor: &Self) -> (Self, Self) {
        assert!(!divisor.is_zero());
        if self < divisor {
            return (Self::zero(), self.clone());
        }
        let n = divisor.limbs.len();
        if n == 1 {
            return self.div_rem_single(divisor.limbs[0]);
        }

        let shift = divisor.limbs[n - 1].leading_zeros() as usize;
        let vn = shl_bits_exact(&divisor.limbs, shift);
        let mut un = shl_bits_extended(&self.limbs, shift);

        let m = self.limbs.len() - n;
        let mut q = vec![0; m + 1];

        let b: u128 = 1 << LIMB_BITS;
        for j in (0..=m).rev() {
            let top2 = (u128::from(un[j + n]) << LIMB_BITS) | u128::from(un[j + n - 1]);
            let mut qhat = top2 / u128::from(vn[n - 1]);
            let mut rhat = top2 % u128::from(vn[n - 1]);
            loop {
                if qhat >= b
                    || qhat * u128::from(vn[n - 2])
                        > (rhat << LIMB_BITS) | u128::from(un[j + n - 2])
                {
                    qhat -= 1;
                    rhat += u128::from(vn[n - 1]);
                    if rhat < b {
                        continue;
                    }
                }
                break;
            }
            let mut qhat = qhat as Limb;

            let borrow = sub_mul_limb(&mut un[j..=j + n], &vn, qhat);
            if borrow {
                // qhat was one too large; add the divisor back.
                qhat -= 1;
                add_back(&mut un[j..=j + n], &vn);
            }
            q[j] = qhat;
        }

        let rem = shr_bits_truncated(&un[..n], shift);
        (Self::from_limbs(q), Self::from_limbs(rem))
    }

    fn div_rem_single(&self, divisor: Limb) -> (Self, Self) {
        let mut q = vec![0; self.limbs.len()];
        let mut rem: Limb = 0;
        for (i, &limb) in self.limbs.iter().enumerate().rev() {
            let t = (u128::from(rem) << LIMB_BITS) | u128::from(limb);
            q[i] = (t / u128::from(divisor)) as Limb;
            rem = (t % u128::from(divisor)) as Limb;
        }
        (Self::from_limbs(q), Self::from_u64(rem))
    }
}

impl Ord for Nonnegative {
    fn cmp(&self, other: &Self) -> core::cmp::Ordering {
        // Clamping makes the limb count the primary key.
        self.limbs
            .len()
            .cmp(&other.limbs.len())
            .then_with(|| self.limbs.iter().rev().cmp(other.limbs.iter().rev()))
    }
}

impl PartialOrd for Nonnegative {
    fn partial_cmp(&self, other: &Self) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl core::fmt::Debug for Nonnegative {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if self.is_zero() {
            return f.write_str("0x0");
        }
        f.write_str("0x")?;
        for (i, limb) in self.limbs.iter().enumerate().rev() {
            if i == self.limbs.len() - 1 {
                write!(f, "{:x}", limb)?;
            } else {
                write!(f, "{:016x}", limb)?;
            }
        }
        Ok(())
    }
}

/// `v << shift` where the result is known to fit in `v.len()` limbs
/// (`shift` < the number of leading zero bits of the top limb, or 0).
fn shl_bits_exact(v: &[Limb], shift: usize) -> Vec<Limb> {
    if shift == 0 {
        return v.to_vec();
    }
    let mut out = vec![0; v.len()];
    for i in (1..v.len()).rev() {
        out[i] = (v[i] << shift) | (v[i - 1] >> (LIMB_BITS - shift));
    }
    out[0] = v[0] << shift;
    out
}

/// `u << shift` with one extra limb appended for the shifted-out high bits.
fn shl_bits_extended(u: &[Limb], shift: usize) -> Vec<Limb> {
    let mut out = Vec::with_capacity(u.len() + 1);
    if shift == 0 {
        out.extend_from_slice(u);
        out.push(0);
        return out;
    }
    out.extend_from_slice(&shl_bits_exact(u, shift));
    out.push(u[u.len() - 1] >> (LIMB_BITS - shift));
    out
}

/// `un >> shift`, dropping the shifted-out low bits.
fn shr_bits_truncated(un: &[Limb], shift: usize) -> Vec<Limb> {
    let mut out = un.to_vec();
    if shift > 0 {
        for i in 0..out.len() {
            out[i] >>= shift;
            if i + 1 < un.len() {
                out[i] |= un[i + 1] << (LIMB_BITS - shift);
            }
        }
    }
    out
}

/// `un -= q * vn`, where `un` has one more limb than `vn`. Returns whether
/// the subtraction borrowed out of the top limb.
fn sub_mul_limb(un: &mut [Limb], vn: &[Limb], q: Limb) -> bool {
    debug_assert_eq!(un.len(), vn.len() + 1);
    let mut mul_carry: u128 = 0;
    let mut borrow = false;
    for (u_limb, &v_limb) in un.iter_mut().zip(vn.iter()) {
        let product = u128::from(q) * u128::from(v_limb) + mul_carry;
        mul_carry = product >> LIMB_BITS;
        let (d, b1) = u_limb.overflowing_sub(product as Limb);
        let (d, b2) = d.overflowing_sub(Limb::from(borrow));
        *u_limb = d;
        borrow = b1 | b2;
    }
    let top = &mut un[vn.len()];
    let (d, b1) = top.overflowing_sub(mul_carry as Limb);
    let (d, b2) = d.overflowing_sub(Limb::from(borrow));
    *top = d;
    b1 | b2
}

/// `un += vn`, where `un` has one more limb than `vn`. The final carry
/// wraps into the top limb, canceling a previous borrow.
fn add_back(un: &mut [Limb], vn: &[Limb]) {
    debug_assert_eq!(un.len(), vn.len() + 1);
    let mut carry = false;
    for (u_limb, &v_limb) in un.iter_mut().zip(vn.iter()) {
        let (s, c1) = u_limb.overflowing_add(v_limb);
        let (s, c2) = s.overflowing_add(Limb::from(carry));
        *u_limb = s;
        carry = c1 | c2;
    }
    un[vn.len()] = un[vn.len()].wrapping_add(Limb::from(carry));
}

#[cfg(test)]
mod tests {
    use super::Nonnegative;

    // A fixed-seed xorshift; tests must be reproducible.
    struct Rng(u64);

    impl Rng {
        fn next(&mut self) -> u64 {
            self.0 ^= self.0 << 13;
            self.0 ^= self.0 >> 7;
            self.0 ^= self.0 << 17;
            self.0
        }

        fn value(&mut self, max_limbs: usize) -> Nonnegative {
            let n = (self.next() as usize) % (max_limbs + 1);
            Nonnegative::from_limbs((0..n).map(|_| self.next()).collect())
        }
    }

    fn add(a: &Nonnegative, b: &Nonnegative) -> Nonnegative {
        let (longer, shorter) = if a.limbs().len() >= b.limbs().len() {
            (a, b)
        } else {
            (b, a)
        };
        let mut limbs = longer.limbs().to_vec();
        let mut carry = false;
        for (i, limb) in limbs.iter_mut().enumerate() {
            let add = shorter.limbs().get(i).copied().unwrap_or(0);
            let (s, c1) = limb.overflowing_add(add);
            let (s, c2) = s.overflowing_add(u64::from(carry));
            *limb = s;
            carry = c1 | c2;
        }
        if carry {
            limbs.push(1);
        }
        Nonnegative::from_limbs(limbs)
    }

    #[test]
    fn test_be_bytes_round_trip() {
        let mut rng = Rng(0x243f6a8885a308d3);
        for _ in 0..200 {
            let a = rng.value(9);
            let len = a.bit_length().as_usize_bytes_rounded_up();
            let mut out = vec![0u8; len + 3];
            a.fill_be_bytes(&mut out);
            assert_eq!(Nonnegative::from_be_bytes(&out), a);
        }
        assert!(Nonnegative::from_be_bytes(&[]).is_zero());
        assert!(Nonnegative::from_be_bytes(&[0, 0, 0]).is_zero());
    }

    #[test]
    fn test_bit_length() {
        assert_eq!(Nonnegative::zero().bit_length().as_usize_bits(), 0);
        assert_eq!(Nonnegative::from_u64(1).bit_length().as_usize_bits(), 1);
        assert_eq!(Nonnegative::from_u64(0xff).bit_length().as_usize_bits(), 8);
        let big = Nonnegative::from_limbs(vec![0, 1]);
        assert_eq!(big.bit_length().as_usize_bits(), 65);
    }

    #[test]
    fn test_small_multiplication() {
        let a = Nonnegative::from_u64(0xffff_ffff_ffff_ffff);
        let square = a.mul(&a);
        // (2^64 - 1)^2 = 2^128 - 2^65 + 1
        assert_eq!(square.limbs(), &[1, 0xffff_ffff_ffff_fffe]);
        assert!(a.mul(&Nonnegative::zero()).is_zero());
    }

    #[test]
    fn test_division_identity() {
        // u == q*v + r and r < v, over many random shapes.
        let mut rng = Rng(0x13198a2e03707344);
        for _ in 0..500 {
            let u = rng.value(8);
            let mut v = rng.value(5);
            if v.is_zero() {
                v = Nonnegative::from_u64(rng.next() | 1);
            }
            let (q, r) = u.div_rem(&v);
            assert!(r < v);
            assert_eq!(add(&q.mul(&v), &r), u);
        }
    }

    #[test]
    fn test_division_fixed_cases() {
        let u = Nonnegative::from_u64(100);
        let v = Nonnegative::from_u64(7);
        let (q, r) = u.div_rem(&v);
        assert_eq!(q, Nonnegative::from_u64(14));
        assert_eq!(r, Nonnegative::from_u64(2));

        // Dividend smaller than divisor.
        let (q, r) = v.div_rem(&u);
        assert!(q.is_zero());
        assert_eq!(r, v);

        // Exact division by a two-limb divisor.
        let v = Nonnegative::from_limbs(vec![0x0123456789abcdef, 0xfedcba9876543210]);
        let q_expected = Nonnegative::from_limbs(vec![0xaaaa_bbbb_cccc_dddd, 0x1111]);
        let u = v.mul(&q_expected);
        let (q, r) = u.div_rem(&v);
        assert_eq!(q, q_expected);
        assert!(r.is_zero());
    }

    #[test]
    fn test_add_back_path() {
        // Knuth's D6 "add back" step fires with probability ~2/2^64 on
        // random inputs; force it with the classic worst case
        // u = b^4 / 2, v = b^2 / 2 + 1 (b = 2^64).
        let u = Nonnegative::from_limbs(vec![0, 0, 0, 1 << 63]);
        let v = Nonnegative::from_limbs(vec![1, 1 << 63]);
        let (q, r) = u.div_rem(&v);
        assert_eq!(add(&q.mul(&v), &r), u);
        assert!(r < v);
    }

    #[test]
    fn test_ordering() {
        let small = Nonnegative::from_u64(5);
        let big = Nonnegative::from_limbs(vec![0, 1]);
        assert!(small < big);
        assert!(Nonnegative::zero() < small);
        assert_eq!(small.cmp(&small.clone()), core::cmp::Ordering::Equal);
    }
}
