// Copyright 2015-2025 Brian Smith.
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

//! SHA-2 and the legacy SHA-1 digest algorithm.
//!
//! If all the data is available in a single contiguous slice then the
//! [`digest`] function should be used. Otherwise, the digest can be
//! calculated in multiple steps using [`Context`].
//!
//! Finalization happens on the value passed to [`Context::finish`]; a
//! retained [`Clone`] of the context is unaffected and continues to accept
//! `update` calls as if `finish` had never happened. A fresh start is a
//! fresh `Context::new`.

use core::num::Wrapping;

mod sha1;
mod sha2_32;
mod sha2_64;

/// The chaining state of an in-progress digest calculation.
///
/// SHA-1 and SHA-256 chain 32-bit words; SHA-384 and SHA-512 chain 64-bit
/// words. SHA-1 only uses the first five 32-bit slots.
#[derive(Clone, Copy)]
pub(crate) enum State {
    As32([Wrapping<u32>; CHAINING_WORDS]),
    As64([Wrapping<u64>; CHAINING_WORDS]),
}

impl State {
    fn as32_mut(&mut self) -> &mut [Wrapping<u32>; CHAINING_WORDS] {
        match self {
            Self::As32(state) => state,
            Self::As64(_) => unreachable!(),
        }
    }

    fn as64_mut(&mut self) -> &mut [Wrapping<u64>; CHAINING_WORDS] {
        match self {
            Self::As64(state) => state,
            Self::As32(_) => unreachable!(),
        }
    }
}

/// A context for multi-step (Init-Update-Finish) digest calculations.
///
/// # Examples
///
/// ```
/// use oaep::digest;
///
/// let one_shot = digest::digest(&digest::SHA384, b"hello, world");
///
/// let mut ctx = digest::Context::new(&digest::SHA384);
/// ctx.update(b"hello");
/// ctx.update(b", ");
/// ctx.update(b"world");
/// let multi_part = ctx.finish();
///
/// assert_eq!(one_shot.as_ref(), multi_part.as_ref());
/// ```
#[derive(Clone)]
pub struct Context {
    state: State,

    // Note that SHA-512 has a 128-bit input bit counter, but this
    // implementation only supports up to 2^64-1 completed blocks, which is
    // more input than can exist.
    completed_blocks: u64,

    pending: [u8; MAX_BLOCK_LEN],
    num_pending: usize,

    /// The context's algorithm.
    pub algorithm: &'static Algorithm,
}

impl Context {
    /// Constructs a new context.
    pub fn new(algorithm: &'static Algorithm) -> Self {
        Self {
            algorithm,
            state: algorithm.initial_state,
            completed_blocks: 0,
            pending: [0u8; MAX_BLOCK_LEN],
            num_pending: 0,
        }
    }

    /// Updates the digest with all the data in `data`.
    ///
    /// `update` may be called zero or more times before `finish` is called.
    pub fn update(&mut self, data: &[u8]) {
        let block_len = self.algorithm.block_len;

        if data.len() < block_len - self.num_pending {
            self.pending[self.num_pending..][..data.len()].copy_from_slice(data);
            self.num_pending += data.len();
            return;
        }

        let mut remaining = data;
        if self.num_pending > 0 {
            let to_copy = block_len - self.num_pending;
            self.pending[self.num_pending..block_len].copy_from_slice(&data[..to_copy]);
            (self.algorithm.block_data_order)(&mut self.state, &self.pending[..block_len]);
            self.completed_blocks += 1;
            remaining = &remaining[to_copy..];
            self.num_pending = 0;
        }

        let num_blocks = remaining.len() / block_len;
        let num_to_save_for_later = remaining.len() % block_len;
        if num_blocks > 0 {
            (self.algorithm.block_data_order)(&mut self.state, &remaining[..num_blocks * block_len]);
            self.completed_blocks += num_blocks as u64;
        }
        if num_to_save_for_later > 0 {
            self.pending[..num_to_save_for_later]
                .copy_from_slice(&remaining[remaining.len() - num_to_save_for_later..]);
            self.num_pending = num_to_save_for_later;
        }
    }

    /// Finalizes the digest calculation and returns the digest value.
    ///
    /// `finish` consumes the context. A context that was cloned before
    /// `finish` retains its pre-finalization state.
    pub fn finish(mut self) -> Digest {
        // We know |num_pending < block_len|, because we would have processed
        // the block otherwise.
        let block_len = self.algorithm.block_len;
        let len_len = self.algorithm.len_len;

        let mut padding_pos = self.num_pending;
        self.pending[padding_pos] = 0x80;
        padding_pos += 1;

        if padding_pos > block_len - len_len {
            self.pending[padding_pos..block_len].fill(0);
            (self.algorithm.block_data_order)(&mut self.state, &self.pending[..block_len]);
            // The padding isn't data, so it isn't counted.
            padding_pos = 0;
        }

        self.pending[padding_pos..block_len - 8].fill(0);

        // Output the length, in bits, in big endian order.
        let completed_data_bits = ((self.completed_blocks as u128) * (block_len as u128)
            + (self.num_pending as u128))
            * 8;
        if len_len == 128 / 8 {
            self.pending[block_len - 16..block_len]
                .copy_from_slice(&completed_data_bits.to_be_bytes());
        } else {
            self.pending[block_len - 8..block_len]
                .copy_from_slice(&(completed_data_bits as u64).to_be_bytes());
        }
        (self.algorithm.block_data_order)(&mut self.state, &self.pending[..block_len]);

        Digest {
            algorithm: self.algorithm,
            value: (self.algorithm.format_output)(&self.state),
        }
    }

    /// The algorithm that this context is using.
    #[inline(always)]
    pub fn algorithm(&self) -> &'static Algorithm {
        self.algorithm
    }
}

/// Returns the digest of `data` using the given digest algorithm.
///
/// # Examples:
///
/// ```
/// use oaep::{digest, test};
///
/// let expected_hex = "09ca7e4eaa6e8ae9c7d261167129184883644d07dfba7cbfbc4c8a2e08360d5b";
/// let expected: Vec<u8> = test::from_hex(expected_hex).unwrap();
/// let actual = digest::digest(&digest::SHA256, b"hello, world");
///
/// assert_eq!(&expected, &actual.as_ref());
/// ```
pub fn digest(algorithm: &'static Algorithm, data: &[u8]) -> Digest {
    let mut ctx = Context::new(algorithm);
    ctx.update(data);
    ctx.finish()
}

/// A calculated digest value.
///
/// Use [`AsRef::as_ref`] to get the value as a `&[u8]`.
#[derive(Clone, Copy)]
pub struct Digest {
    value: Output,
    algorithm: &'static Algorithm,
}

impl Digest {
    /// The algorithm that was used to calculate the digest value.
    #[inline(always)]
    pub fn algorithm(&self) -> &'static Algorithm {
        self.algorithm
    }
}

impl AsRef<[u8]> for Digest {
    #[inline(always)]
    fn as_ref(&self) -> &[u8] {
        &self.value[..self.algorithm.output_len]
    }
}

impl core::fmt::Debug for Digest {
    fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(fmt, "{:?}:", self.algorithm)?;
        for byte in self.as_ref() {
            write!(fmt, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// A digest algorithm.
pub struct Algorithm {
    /// The length of a finalized digest.
    pub output_len: usize,

    /// The size of the chaining value of the digest function, in bytes. For
    /// non-truncated algorithms (SHA-1, SHA-256, SHA-512), this is equal to
    /// `output_len`. For truncated algorithms (SHA-384), this is the length
    /// before truncation.
    pub chaining_len: usize,

    /// The internal block length.
    pub block_len: usize,

    /// The length of the length field in the padding, in bytes.
    len_len: usize,

    block_data_order: fn(state: &mut State, data: &[u8]),
    format_output: fn(state: &State) -> Output,

    initial_state: State,
}

impl PartialEq for Algorithm {
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self, other)
    }
}

impl Eq for Algorithm {}

impl core::fmt::Debug for Algorithm {
    fn fmt(&self, fmt: &mut core::fmt::Formatter) -> core::fmt::Result {
        // This would have to change if/when we add other algorithms with the
        // same output lengths.
        let n = if self.output_len == 20 { 1 } else { self.output_len * 8 };
        write!(fmt, "SHA-{:?}", n)
    }
}

/// SHA-1 as specified in [FIPS 180-4]. Deprecated, but required by RSAES-OAEP
/// interoperability.
///
/// [FIPS 180-4]: http://nvlpubs.nist.gov/nistpubs/FIPS/NIST.FIPS.180-4.pdf
pub static SHA1: Algorithm = Algorithm {
    output_len: sha1::OUTPUT_LEN,
    chaining_len: sha1::CHAINING_LEN,
    block_len: sha1::BLOCK_LEN,
    len_len: 64 / 8,
    block_data_order: sha1::block_data_order,
    format_output: sha2_32::format_output,
    initial_state: State::As32([
        Wrapping(0x67452301),
        Wrapping(0xefcdab89),
        Wrapping(0x98badcfe),
        Wrapping(0x10325476),
        Wrapping(0xc3d2e1f0),
        Wrapping(0),
        Wrapping(0),
        Wrapping(0),
    ]),
};

/// SHA-256 as specified in [FIPS 180-4].
///
/// [FIPS 180-4]: http://nvlpubs.nist.gov/nistpubs/FIPS/NIST.FIPS.180-4.pdf
pub static SHA256: Algorithm = Algorithm {
    output_len: 256 / 8,
    chaining_len: 256 / 8,
    block_len: sha2_32::BLOCK_LEN,
    len_len: 64 / 8,
    block_data_order: sha2_32::block_data_order,
    format_output: sha2_32::format_output,
    initial_state: State::As32([
        Wrapping(0x6a09e667),
        Wrapping(0xbb67ae85),
        Wrapping(0x3c6ef372),
        Wrapping(0xa54ff53a),
        Wrapping(0x510e527f),
        Wrapping(0x9b05688c),
        Wrapping(0x1f83d9ab),
        Wrapping(0x5be0cd19),
    ]),
};

/// SHA-384 as specified in [FIPS 180-4].
///
/// [FIPS 180-4]: http://nvlpubs.nist.gov/nistpubs/FIPS/NIST.FIPS.180-4.pdf
pub static SHA384: Algorithm = Algorithm {
    output_len: 384 / 8,
    chaining_len: 512 / 8,
    block_len: sha2_64::BLOCK_LEN,
    len_len: 128 / 8,
    block_data_order: sha2_64::block_data_order,
    format_output: sha2_64::format_output,
    initial_state: State::As64([
        Wrapping(0xcbbb9d5dc1059ed8),
        Wrapping(0x629a292a367cd507),
        Wrapping(0x9159015a3070dd17),
        Wrapping(0x152fecd8f70e5939),
        Wrapping(0x67332667ffc00b31),
        Wrapping(0x8eb44a8768581511),
        Wrapping(0xdb0c2e0d64f98fa7),
        Wrapping(0x47b5481dbefa4fa4),
    ]),
};

/// SHA-512 as specified in [FIPS 180-4].
///
/// [FIPS 180-4]: http://nvlpubs.nist.gov/nistpubs/FIPS/NIST.FIPS.180-4.pdf
pub static SHA512: Algorithm = Algorithm {
    output_len: 512 / 8,
    chaining_len: 512 / 8,
    block_len: sha2_64::BLOCK_LEN,
    len_len: 128 / 8,
    block_data_order: sha2_64::block_data_order,
    format_output: sha2_64::format_output,
    initial_state: State::As64([
        Wrapping(0x6a09e667f3bcc908),
        Wrapping(0xbb67ae8584caa73b),
        Wrapping(0x3c6ef372fe94f82b),
        Wrapping(0xa54ff53a5f1d36f1),
        Wrapping(0x510e527fade682d1),
        Wrapping(0x9b05688c2b3e6c1f),
        Wrapping(0x1f83d9abfb41bd6b),
        Wrapping(0x5be0cd19137e2179),
    ]),
};

/// The maximum block length (`Algorithm::block_len`) of all the algorithms
/// in this module.
pub const MAX_BLOCK_LEN: usize = 1024 / 8;

/// The maximum output length (`Algorithm::output_len`) of all the algorithms
/// in this module.
pub const MAX_OUTPUT_LEN: usize = 512 / 8;

/// The maximum chaining length (`Algorithm::chaining_len`) of all the
/// algorithms in this module.
pub const MAX_CHAINING_LEN: usize = MAX_OUTPUT_LEN;

const CHAINING_WORDS: usize = 8;

type Output = [u8; MAX_OUTPUT_LEN];

#[cfg(test)]
mod tests {
    use crate::{digest, test};

    static ALL_ALGORITHMS: [&digest::Algorithm; 4] = [
        &digest::SHA1,
        &digest::SHA256,
        &digest::SHA384,
        &digest::SHA512,
    ];

    #[test]
    fn digest_known_answers() {
        test::from_file("src/digest/digest_tests.txt", |section, test_case| {
            assert_eq!(section, "");
            let digest_alg = test_case.consume_digest_alg("Hash").unwrap();
            let input = test_case.consume_bytes("Input");
            let repeat = test_case.consume_usize("Repeat");
            let expected = test_case.consume_bytes("Output");

            let mut ctx = digest::Context::new(digest_alg);
            let mut data = Vec::new();
            for _ in 0..repeat {
                ctx.update(&input);
                data.extend(&input);
            }
            let actual_from_chunks = ctx.finish();
            assert_eq!(&expected, &actual_from_chunks.as_ref());

            let actual_from_one_shot = digest::digest(digest_alg, &data);
            assert_eq!(&expected, &actual_from_one_shot.as_ref());

            Ok(())
        });
    }

    /// Test some ways in which `Context::update` and/or `Context::finish`
    /// could go wrong by testing every combination of updating three inputs
    /// that vary from zero bytes to one byte larger than the block length.
    ///
    /// This is not run in dev (debug) builds because it is too slow.
    #[cfg(not(debug_assertions))]
    #[test]
    fn test_i_u_f() {
        for alg in ALL_ALGORITHMS {
            let mut input = [0; (super::MAX_BLOCK_LEN + 1) * 3];
            let max = alg.block_len + 1;
            for (i, byte) in input.iter_mut().enumerate().take(max * 3) {
                *byte = (i & 0xff) as u8;
            }

            for i in 0..max {
                for j in 0..max {
                    for k in 0..max {
                        let part1 = &input[..i];
                        let part2 = &input[i..(i + j)];
                        let part3 = &input[(i + j)..(i + j + k)];

                        let mut ctx = digest::Context::new(alg);
                        ctx.update(part1);
                        ctx.update(part2);
                        ctx.update(part3);
                        let i_u_f = ctx.finish();

                        let one_shot = digest::digest(alg, &input[..(i + j + k)]);

                        assert_eq!(i_u_f.as_ref(), one_shot.as_ref());
                    }
                }
            }
        }
    }

    /// A clone taken before `finish` continues as if `finish` had not been
    /// called.
    #[test]
    fn test_finish_on_working_copy() {
        for alg in ALL_ALGORITHMS {
            let mut ctx = digest::Context::new(alg);
            ctx.update(b"hello, ");
            let snapshot = ctx.clone();
            let _ = ctx.finish();

            let mut resumed = snapshot;
            resumed.update(b"world");
            assert_eq!(
                resumed.finish().as_ref(),
                digest::digest(alg, b"hello, world").as_ref()
            );
        }
    }

    #[test]
    fn test_fmt_algorithm() {
        assert_eq!("SHA-1", &format!("{:?}", digest::SHA1));
        assert_eq!("SHA-256", &format!("{:?}", digest::SHA256));
        assert_eq!("SHA-384", &format!("{:?}", digest::SHA384));
        assert_eq!("SHA-512", &format!("{:?}", digest::SHA512));
    }

    #[test]
    fn test_fmt_digest() {
        assert_eq!(
            "SHA-256:09ca7e4eaa6e8ae9c7d261167129184883644d\
             07dfba7cbfbc4c8a2e08360d5b",
            &format!("{:?}", digest::digest(&digest::SHA256, b"hello, world"))
        );
    }
}
