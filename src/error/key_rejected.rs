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

/// An error importing an RSA public key.
///
/// The two variants distinguish the layer that rejected the input:
///
/// * [`KeyRejected::InvalidPem`]: the PEM envelope is unusable: the armor
///   is missing or malformed, the BEGIN/END labels don't match, or the
///   Base64 body cannot be decoded at all.
/// * [`KeyRejected::InvalidKey`]: the armor decoded fine but the DER inside
///   is not an RSA `SubjectPublicKeyInfo`: the ASN.1 structure is wrong,
///   the algorithm OID is not rsaEncryption, or the modulus/exponent are
///   absent or out of range.
///
/// The `&'static str` payload names the specific check that failed. The set
/// of reason strings is not part of the stable API; match on the variant,
/// not the string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyRejected {
    /// The PEM armor or its Base64 body is malformed.
    InvalidPem(&'static str),
    /// The DER contents are not a usable RSA public key.
    InvalidKey(&'static str),
}

impl KeyRejected {
    #[inline]
    pub(crate) fn armor_not_found() -> Self {
        Self::InvalidPem("ArmorNotFound")
    }

    #[inline]
    pub(crate) fn armor_mismatch() -> Self {
        Self::InvalidPem("ArmorMismatch")
    }

    pub(crate) fn bad_base64() -> Self {
        Self::InvalidPem("BadBase64")
    }

    pub(crate) fn unexpected_armor_label() -> Self {
        Self::InvalidPem("UnexpectedArmorLabel")
    }

    #[inline]
    pub(crate) fn invalid_encoding() -> Self {
        Self::InvalidKey("InvalidEncoding")
    }

    pub(crate) fn not_subject_public_key_info() -> Self {
        Self::InvalidKey("NotSubjectPublicKeyInfo")
    }

    pub(crate) fn wrong_algorithm() -> Self {
        Self::InvalidKey("WrongAlgorithm")
    }

    pub(crate) fn invalid_component() -> Self {
        Self::InvalidKey("InvalidComponent")
    }

    pub(crate) fn too_small() -> Self {
        Self::InvalidKey("TooSmall")
    }

    pub(crate) fn too_large() -> Self {
        Self::InvalidKey("TooLarge")
    }
}

impl std::error::Error for KeyRejected {}

impl core::fmt::Display for KeyRejected {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            Self::InvalidPem(reason) => write!(f, "InvalidPem({})", reason),
            Self::InvalidKey(reason) => write!(f, "InvalidKey({})", reason),
        }
    }
}
