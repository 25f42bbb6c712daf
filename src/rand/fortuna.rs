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

//! A simplified Fortuna generator.
//!
//! Entropy accumulates byte-by-byte, round-robin, into 32 SHA-256 pools.
//! Every generate call reseeds: the reseed counter picks which pools
//! contribute (pool k when 2^k divides the counter, so pool 0 always and
//! the higher pools geometrically less often), the new 128-bit cipher key
//! is the SHA-256 of the old key and the contributing pool digests, and the
//! new 128-bit counter block is the SHA-256 of the new key. Output is
//! AES-128 over the incrementing counter; after a request is satisfied,
//! the next two cipher blocks replace the key and the counter so no
//! residue of the request's key survives.
//!
//! The reference design's Park-Miller generator is replaced with the
//! operating system CSPRNG as the entropy source feeding the pools, as the
//! only consumer of this generator is the OAEP seed, which needs
//! cryptographic quality.

use super::{aes, SecureRandom, SystemRandom};
use crate::{digest, error, io::Buffer};

const NUM_POOLS: usize = 32;

/// How much OS entropy to fold into the pools at each reseed.
const RESEED_ENTROPY_LEN: usize = 32;

pub(super) struct Generator {
    pools: [digest::Context; NUM_POOLS],
    pool_index: usize,
    key: [u8; 16],
    seed: [u8; aes::BLOCK_LEN],
    reseeds: u32,
    // Diagnostic only; nothing keys off it.
    #[allow(dead_code)]
    generated: u64,
}

impl Generator {
    pub fn new() -> Self {
        Self {
            pools: core::array::from_fn(|_| digest::Context::new(&digest::SHA256)),
            pool_index: 0,
            key: [0u8; 16],
            seed: [0u8; aes::BLOCK_LEN],
            reseeds: 0,
            generated: 0,
        }
    }

    /// Cycles entropy through the pools, one byte per pool.
    pub fn collect(&mut self, entropy: &[u8]) {
        for &byte in entropy {
            self.pools[self.pool_index].update(&[byte]);
            self.pool_index = (self.pool_index + 1) % NUM_POOLS;
        }
    }

    /// Fills `dest` with generator output.
    pub fn generate(&mut self, dest: &mut [u8]) -> Result<(), error::Unspecified> {
        // The key is discarded at the end of every call, so every call
        // starts with a reseed.
        self.reseed()?;

        let key = aes::Key::new(&self.key);
        let mut out = Buffer::with_capacity(dest.len() + aes::BLOCK_LEN);
        while out.len() < dest.len() {
            out.put_bytes(&self.next_block(&key));
        }
        dest.copy_from_slice(out.bytes(dest.len()));

        // Fresh key and counter from the next two cipher outputs.
        self.key = self.next_block(&key);
        self.seed = self.next_block(&key);
        self.generated = self.generated.wrapping_add(dest.len() as u64);

        Ok(())
    }

    fn next_block(&mut self, key: &aes::Key) -> [u8; aes::BLOCK_LEN] {
        let block = key.encrypt_block(self.seed);
        // Counter mode: step the low 32 bits of the block.
        let counter: [u8; 4] = self.seed[12..].try_into().unwrap();
        let counter = u32::from_be_bytes(counter).wrapping_add(1);
        self.seed[12..].copy_from_slice(&counter.to_be_bytes());
        block
    }

    fn reseed(&mut self) -> Result<(), error::Unspecified> {
        let mut os_entropy = [0u8; RESEED_ENTROPY_LEN];
        SystemRandom::new().fill(&mut os_entropy)?;
        self.collect(&os_entropy);

        self.reseeds = self.reseeds.wrapping_add(1);

        // Pool k contributes when 2^k divides the reseed count; the
        // contributing set is a contiguous prefix of the pools.
        let mut md = digest::Context::new(&digest::SHA256);
        md.update(&self.key);
        for k in 0..NUM_POOLS {
            if self.reseeds % (1u32 << k) != 0 {
                break;
            }
            let pool = core::mem::replace(&mut self.pools[k], digest::Context::new(&digest::SHA256));
            md.update(pool.finish().as_ref());
        }

        let key_digest = md.finish();
        self.key.copy_from_slice(&key_digest.as_ref()[..16]);
        let seed_digest = digest::digest(&digest::SHA256, &self.key);
        self.seed.copy_from_slice(&seed_digest.as_ref()[..aes::BLOCK_LEN]);
        Ok(())
    }
}
