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

//! EME-OAEP message encoding (RFC 8017 Section 7.1.1 Step 2).

use crate::error::EncryptError;
use crate::rand::SecureRandom;
use crate::{bits::BitLength, digest};

/// OAEP encoding with a specific digest algorithm, used as both the label
/// hash and the MGF1 hash. The label is always empty.
#[derive(Debug)]
pub struct OaepEncoding {
    digest_alg: &'static digest::Algorithm,
}

/// OAEP with SHA-1.
pub static OAEP_SHA1: OaepEncoding = OaepEncoding {
    digest_alg: &digest::SHA1,
};

/// OAEP with SHA-256.
pub static OAEP_SHA256: OaepEncoding = OaepEncoding {
    digest_alg: &digest::SHA256,
};

/// OAEP with SHA-384.
pub static OAEP_SHA384: OaepEncoding = OaepEncoding {
    digest_alg: &digest::SHA384,
};

/// OAEP with SHA-512.
pub static OAEP_SHA512: OaepEncoding = OaepEncoding {
    digest_alg: &digest::SHA512,
};

impl OaepEncoding {
    /// Resolves the encoding for a digest algorithm selected at run time.
    pub fn for_digest_alg(
        digest_alg: &'static digest::Algorithm,
    ) -> Result<&'static Self, EncryptError> {
        for encoding in [&OAEP_SHA1, &OAEP_SHA256, &OAEP_SHA384, &OAEP_SHA512] {
            if encoding.digest_alg == digest_alg {
                return Ok(encoding);
            }
        }
        Err(EncryptError::UnsupportedHash)
    }
}

/// EME-OAEP-encodes `msg` into a `k`-octet encoded message EM:
///
/// ```text
/// DB   = lHash ‖ PS ‖ 0x01 ‖ msg            (k − hLen − 1 octets)
/// EM   = 0x00 ‖ (seed ⊕ MGF1(maskedDB)) ‖ (DB ⊕ MGF1(seed))
/// ```
///
/// where lHash is the digest of the empty label, PS is a run of zero
/// octets, and the seed is `hLen` fresh octets from `rng`.
pub(super) fn oaep_encode(
    encoding: &OaepEncoding,
    msg: &[u8],
    mod_bits: BitLength,
    rng: &dyn SecureRandom,
) -> Result<Vec<u8>, EncryptError> {
    let digest_alg = encoding.digest_alg;
    let k = mod_bits.as_usize_bytes_rounded_up();
    let h_len = digest_alg.output_len;

    // Step 1a.
    let max_msg_len = k
        .checked_sub(2 * h_len + 2)
        .ok_or(EncryptError::MessageTooLong)?;
    if msg.len() > max_msg_len {
        return Err(EncryptError::MessageTooLong);
    }

    let mut em = vec![0u8; k];
    let (leading_zero, rest) = em.split_at_mut(1);
    leading_zero[0] = 0x00;
    let (seed, db) = rest.split_at_mut(h_len);

    // Step 2a. The label hash is computed on a freshly started context, so
    // a caller-supplied context in any state cannot leak into it.
    let l_hash = digest::digest(digest_alg, b"");
    db[..h_len].copy_from_slice(l_hash.as_ref());

    // Steps 2b and 2c: PS, already zero, then the 0x01 separator and the
    // message.
    let separator_pos = db.len() - msg.len() - 1;
    db[separator_pos] = 0x01;
    db[separator_pos + 1..].copy_from_slice(msg);

    // Step 2d.
    rng.fill(seed).map_err(|_| EncryptError::EntropyFailure)?;

    // Steps 2e and 2f.
    mgf1_xor(digest_alg, seed, db);

    // Steps 2g and 2h.
    mgf1_xor(digest_alg, db, seed);

    // Step 2i: EM = 0x00 ‖ maskedSeed ‖ maskedDB, already in place.
    Ok(em)
}

/// MGF1 (RFC 8017 Appendix B.2.1): XORs into `out` the counter-mode digest
/// stream H(seed ‖ I2OSP(0, 4)) ‖ H(seed ‖ I2OSP(1, 4)) ‖ …, truncated to
/// `out`'s length.
fn mgf1_xor(digest_alg: &'static digest::Algorithm, seed: &[u8], out: &mut [u8]) {
    for (counter, out_chunk) in out.chunks_mut(digest_alg.output_len).enumerate() {
        let mut ctx = digest::Context::new(digest_alg);
        ctx.update(seed);
        ctx.update(&(counter as u32).to_be_bytes());
        let mask = ctx.finish();
        for (out_byte, mask_byte) in out_chunk.iter_mut().zip(mask.as_ref().iter()) {
            *out_byte ^= mask_byte;
        }
    }
}
