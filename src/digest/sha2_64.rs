// Copyright 2019-2025 Brian Smith.
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

//! SHA-384 and SHA-512: the 64-bit-word half of FIPS 180-4 Section 6.4.

use super::{Output, State, MAX_OUTPUT_LEN};
use core::num::Wrapping;

type W64 = Wrapping<u64>;

pub const BLOCK_LEN: usize = 1024 / 8;

// FIPS 180-4 {6.4.2} Step 1
const ROUNDS: usize = 80;

// FIPS 180-4 4.2.3
static K: [u64; ROUNDS] = [
    0x428a2f98d728ae22,
    0x7137449123ef65cd,
    0xb5c0fbcfec4d3b2f,
    0xe9b5dba58189dbbc,
    0x3956c25bf348b538,
    0x59f111f1b605d019,
    0x923f82a4af194f9b,
    0xab1c5ed5da6d8118,
    0xd807aa98a3030242,
    0x12835b0145706fbe,
    0x243185be4ee4b28c,
    0x550c7dc3d5ffb4e2,
    0x72be5d74f27b896f,
    0x80deb1fe3b1696b1,
    0x9bdc06a725c71235,
    0xc19bf174cf692694,
    0xe49b69c19ef14ad2,
    0xefbe4786384f25e3,
    0x0fc19dc68b8cd5b5,
    0x240ca1cc77ac9c65,
    0x2de92c6f592b0275,
    0x4a7484aa6ea6e483,
    0x5cb0a9dcbd41fbd4,
    0x76f988da831153b5,
    0x983e5152ee66dfab,
    0xa831c66d2db43210,
    0xb00327c898fb213f,
    0xbf597fc7beef0ee4,
    0xc6e00bf33da88fc2,
    0xd5a79147930aa725,
    0x06ca6351e003826f,
    0x142929670a0e6e70,
    0x27b70a8546d22ffc,
    0x2e1b21385c26c926,
    0x4d2c6dfc5ac42aed,
    0x53380d139d95b3df,
    0x650a73548baf63de,
    0x766a0abb3c77b2a8,
    0x81c2c92e47edaee6,
    0x92722c851482353b,
    0xa2bfe8a14cf10364,
    0xa81a664bbc423001,
    0xc24b8b70d0f89791,
    0xc76c51a30654be30,
    0xd192e819d6ef5218,
    0xd69906245565a910,
    0xf40e35855771202a,
    0x106aa07032bbd1b8,
    0x19a4c116b8d2d0c8,
    0x1e376c085141ab53,
    0x2748774cdf8eeb99,
    0x34b0bcb5e19b48a8,
    0x391c0cb3c5c95a63,
    0x4ed8aa4ae3418acb,
    0x5b9cca4f7763e373,
    0x682e6ff3d6b2b8a3,
    0x748f82ee5defb2fc,
    0x78a5636f43172f60,
    0x84c87814a1f0ab72,
    0x8cc702081a6439ec,
    0x90befffa23631e28,
    0xa4506cebde82bde9,
    0xbef9a3f7b2c67915,
    0xc67178f2e372532b,
    0xca273eceea26619c,
    0xd186b8c721c0c207,
    0xeada7dd6cde0eb1e,
    0xf57d4f7fee6ed178,
    0x06f067aa72176fba,
    0x0a637dc5a2c898a6,
    0x113f9804bef90dae,
    0x1b710b35131c471b,
    0x28db77f523047d84,
    0x32caab7b40c72493,
    0x3c9ebe0a15c9bebc,
    0x431d67c49c100d4c,
    0x4cc5d4becb3e42b6,
    0x597f299cfc657e2a,
    0x5fcb6fab3ad6faec,
    0x6c44198c4a475817,
];

// FIPS 180-4 {4.1.3}
#[inline(always)]
fn ch(x: W64, y: W64, z: W64) -> W64 {
    (x & y) | (!x & z)
}

#[inline(always)]
fn maj(x: W64, y: W64, z: W64) -> W64 {
    (x & y) | (x & z) | (y & z)
}

#[inline(always)]
fn big_sigma_0(x: W64) -> W64 {
    Wrapping(x.0.rotate_right(28) ^ x.0.rotate_right(34) ^ x.0.rotate_right(39))
}

#[inline(always)]
fn big_sigma_1(x: W64) -> W64 {
    Wrapping(x.0.rotate_right(14) ^ x.0.rotate_right(18) ^ x.0.rotate_right(41))
}

#[inline(always)]
fn small_sigma_0(x: W64) -> W64 {
    Wrapping(x.0.rotate_right(1) ^ x.0.rotate_right(8) ^ (x.0 >> 7))
}

#[inline(always)]
fn small_sigma_1(x: W64) -> W64 {
    Wrapping(x.0.rotate_right(19) ^ x.0.rotate_right(61) ^ (x.0 >> 6))
}

pub(super) fn block_data_order(state: &mut State, data: &[u8]) {
    debug_assert_eq!(data.len() % BLOCK_LEN, 0);
    let state = state.as64_mut();

    for block in data.chunks_exact(BLOCK_LEN) {
        // FIPS 180-4 {6.4.2} Step 1
        let mut w: [W64; ROUNDS] = [Wrapping(0); ROUNDS];
        for (t, word) in block.chunks_exact(8).enumerate() {
            w[t] = Wrapping(u64::from_be_bytes(word.try_into().unwrap()));
        }
        for t in 16..ROUNDS {
            w[t] = small_sigma_1(w[t - 2]) + w[t - 7] + small_sigma_0(w[t - 15]) + w[t - 16];
        }

        // FIPS 180-4 {6.4.2} Step 2
        let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;

        // FIPS 180-4 {6.4.2} Step 3
        for (&kt, &wt) in K.iter().zip(w.iter()) {
            let t1 = h + big_sigma_1(e) + ch(e, f, g) + Wrapping(kt) + wt;
            let t2 = big_sigma_0(a) + maj(a, b, c);
            h = g;
            g = f;
            f = e;
            e = d + t1;
            d = c;
            c = b;
            b = a;
            a = t1 + t2;
        }

        // FIPS 180-4 {6.4.2} Step 4
        state[0] += a;
        state[1] += b;
        state[2] += c;
        state[3] += d;
        state[4] += e;
        state[5] += f;
        state[6] += g;
        state[7] += h;
    }
}

pub(super) fn format_output(state: &State) -> Output {
    let state = match state {
        State::As64(state) => state,
        State::As32(_) => unreachable!(),
    };
    let mut output = [0u8; MAX_OUTPUT_LEN];
    for (chunk, word) in output.chunks_exact_mut(8).zip(state.iter()) {
        chunk.copy_from_slice(&word.0.to_be_bytes());
    }
    output
}
