// Copyright 2015-2016 Brian Smith.
// Copyright 2016 Simon Sapin.
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

use super::{
    sha2_32::{ch, maj},
    State,
};
use core::num::Wrapping;

pub const BLOCK_LEN: usize = 512 / 8;
pub const CHAINING_LEN: usize = 160 / 8;
pub const OUTPUT_LEN: usize = 160 / 8;

type W32 = Wrapping<u32>;

// FIPS 180-4 4.1.1
#[inline]
fn parity(x: W32, y: W32, z: W32) -> W32 {
    x ^ y ^ z
}

const ROUNDS: usize = 80;

pub(super) fn block_data_order(state: &mut State, data: &[u8]) {
    debug_assert_eq!(data.len() % BLOCK_LEN, 0);
    let state = state.as32_mut();

    for block in data.chunks_exact(BLOCK_LEN) {
        // FIPS 180-4 6.1.2 Step 1
        let mut w: [W32; ROUNDS] = [Wrapping(0); ROUNDS];
        for (t, word) in block.chunks_exact(4).enumerate() {
            w[t] = Wrapping(u32::from_be_bytes(word.try_into().unwrap()));
        }
        for t in 16..ROUNDS {
            let wt = w[t - 3] ^ w[t - 8] ^ w[t - 14] ^ w[t - 16];
            w[t] = rotl(wt, 1);
        }

        // FIPS 180-4 6.1.2 Step 2
        let mut a = state[0];
        let mut b = state[1];
        let mut c = state[2];
        let mut d = state[3];
        let mut e = state[4];

        // FIPS 180-4 6.1.2 Step 3
        for (t, &wt) in w.iter().enumerate() {
            // FIPS 180-4 {4.1.1, 4.2.1}
            let (k, f) = match t {
                0..=19 => (Wrapping(0x5a827999), ch(b, c, d)),
                20..=39 => (Wrapping(0x6ed9eba1), parity(b, c, d)),
                40..=59 => (Wrapping(0x8f1bbcdc), maj(b, c, d)),
                60..=79 => (Wrapping(0xca62c1d6), parity(b, c, d)),
                _ => unreachable!(),
            };

            let tt = rotl(a, 5) + f + e + k + wt;
            e = d;
            d = c;
            c = rotl(b, 30);
            b = a;
            a = tt;
        }

        // FIPS 180-4 6.1.2 Step 4
        state[0] += a;
        state[1] += b;
        state[2] += c;
        state[3] += d;
        state[4] += e;
    }
}

#[inline(always)]
fn rotl(x: W32, n: u32) -> W32 {
    Wrapping(x.0.rotate_left(n))
}
