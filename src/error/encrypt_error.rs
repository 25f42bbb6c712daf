// Copyright 2016-2024 Brian Smith.
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

/// An error encrypting a message.
///
/// Every variant is terminal for the current `encrypt` call; no partial
/// ciphertext is ever produced and nothing needs to be undone.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EncryptError {
    /// The plaintext exceeds k − 2·hLen − 2 octets for the selected hash,
    /// where k is the modulus length in octets and hLen the hash output
    /// length (RFC 8017 Section 7.1.1 Step 1a).
    MessageTooLong,

    /// The supplied digest algorithm is not one of the four the OAEP
    /// encoder supports (SHA-1, SHA-256, SHA-384, SHA-512).
    UnsupportedHash,

    /// The random source could not produce the hLen seed octets.
    EntropyFailure,
}

impl std::error::Error for EncryptError {}

impl core::fmt::Display for EncryptError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(match self {
            Self::MessageTooLong => "MessageTooLong",
            Self::UnsupportedHash => "UnsupportedHash",
            Self::EntropyFailure => "EntropyFailure",
        })
    }
}
