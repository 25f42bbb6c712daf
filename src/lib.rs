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

//! RSAES-OAEP public-key encryption with no external cryptographic backend.
//!
//! Given an RSA public key in PEM-encoded `SubjectPublicKeyInfo` form and a
//! plaintext byte sequence, this crate produces an RSAES-OAEP (RFC 8017)
//! ciphertext of exactly ⌈bitlen(n)/8⌉ octets, using one of SHA-1, SHA-256,
//! SHA-384, or SHA-512 as both the label hash and the MGF1 hash. Everything
//! the pipeline needs (the digest engines, the DER/PEM reader, the
//! arbitrary-precision Montgomery arithmetic, and the CSPRNG producing the
//! OAEP seed) is implemented here; the only platform service used is the
//! operating system's entropy source.
//!
//! # Example
//!
//! ```no_run
//! use oaep::{digest, rsa};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pem = std::fs::read_to_string("public_key.pem")?;
//! let key = rsa::PublicKey::from_pem(&pem)?;
//! let ciphertext = key.encrypt(b"attack at dawn", &digest::SHA256)?;
//! assert_eq!(ciphertext.len(), key.modulus_len());
//! # Ok(())
//! # }
//! ```
//!
//! The exponentiation here is *not* constant-time; it handles no secrets
//! other than the freshly generated OAEP seed, but callers with side-channel
//! concerns should take their own measures.

#![deny(missing_docs, trivial_numeric_casts, unused_qualifications)]
#![forbid(unsafe_code)]

pub mod test;

mod arithmetic;

pub mod bits;
pub mod digest;
pub mod error;
pub mod io;
pub mod rand;
pub mod rsa;
