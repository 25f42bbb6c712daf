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

use super::{padding, public_exponent::PublicExponent, public_modulus::PublicModulus, spki};
use crate::arithmetic::bigint::Nonnegative;
use crate::error::{EncryptError, KeyRejected};
use crate::rand::{self, SecureRandom};
use crate::{digest, io::pem};

/// An RSA public key, usable only for RSAES-OAEP encryption.
///
/// Immutable after construction; a key may be shared freely between
/// threads.
#[derive(Debug)]
pub struct PublicKey {
    n: PublicModulus,
    e: PublicExponent,
}

/// The armor label RFC 7468 assigns to `SubjectPublicKeyInfo`.
const PUBLIC_KEY_LABEL: &str = "PUBLIC KEY";

impl PublicKey {
    /// Imports a PEM-armored `SubjectPublicKeyInfo` ("-----BEGIN PUBLIC
    /// KEY-----").
    ///
    /// Fails with [`KeyRejected::InvalidPem`] when the armor or its Base64
    /// body is unusable, and with [`KeyRejected::InvalidKey`] when the DER
    /// inside is not an RSA public key.
    pub fn from_pem(pem_text: &str) -> Result<Self, KeyRejected> {
        let (label, der) = pem::decode(pem_text)?;
        if label != PUBLIC_KEY_LABEL {
            return Err(KeyRejected::unexpected_armor_label());
        }
        Self::from_der(&der)
    }

    /// Imports a DER-encoded `SubjectPublicKeyInfo`.
    pub fn from_der(spki_der: &[u8]) -> Result<Self, KeyRejected> {
        let (n, e) = spki::parse_subject_public_key_info(spki_der)?;
        Self::from_modulus_and_exponent(&n, &e)
    }

    /// Constructs a key from the big-endian encodings of its components.
    pub fn from_modulus_and_exponent(n: &[u8], e: &[u8]) -> Result<Self, KeyRejected> {
        let n = PublicModulus::from_be_bytes(n)?;
        let e = PublicExponent::from_be_bytes(e)?;

        // If `n` is less than `e` then somebody has probably accidentally
        // swapped them. The largest acceptable `e` is smaller than the
        // smallest acceptable `n`, so no other checks need to be done.
        if *e.value() >= *n.value().value() {
            return Err(KeyRejected::invalid_component());
        }

        Ok(Self { n, e })
    }

    /// The modulus length k in octets; every ciphertext is exactly this
    /// long.
    #[inline]
    pub fn modulus_len(&self) -> usize {
        self.n.len_bits().as_usize_bytes_rounded_up()
    }

    /// The modulus length in bits.
    #[inline]
    pub fn n_bit_length(&self) -> usize {
        self.n.len_bits().as_usize_bits()
    }

    /// RSAES-OAEP encryption of `plaintext` with `digest_alg` as both the
    /// label hash and the MGF1 hash, seeded from the process-wide CSPRNG.
    ///
    /// The plaintext must be at most k − 2·hLen − 2 octets. The empty
    /// plaintext is fine. The ciphertext is exactly k octets and is
    /// different on every call.
    pub fn encrypt(
        &self,
        plaintext: &[u8],
        digest_alg: &'static digest::Algorithm,
    ) -> Result<Vec<u8>, EncryptError> {
        self.encrypt_with_rng(plaintext, digest_alg, &rand::FortunaRandom::new())
    }

    /// Like [`PublicKey::encrypt`], with an explicit seed source.
    pub fn encrypt_with_rng(
        &self,
        plaintext: &[u8],
        digest_alg: &'static digest::Algorithm,
        rng: &dyn SecureRandom,
    ) -> Result<Vec<u8>, EncryptError> {
        let encoding = padding::OaepEncoding::for_digest_alg(digest_alg)?;

        // EME-OAEP encoding (RFC 8017 Section 7.1.1 Step 2) ...
        let em = padding::oaep_encode(encoding, plaintext, self.n.len_bits(), rng)?;

        // ... then RSAEP (Step 3): c = m^e mod n, as a k-octet string. The
        // leading 0x00 of EM makes m < n by construction.
        let m = Nonnegative::from_be_bytes(&em);
        let c = self.n.value().mod_pow(&m, self.e.value());

        let mut ciphertext = vec![0u8; self.modulus_len()];
        c.fill_be_bytes(&mut ciphertext);
        Ok(ciphertext)
    }
}
