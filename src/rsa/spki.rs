// Copyright 2015-2024 Brian Smith.
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

//! `SubjectPublicKeyInfo` (RFC 5280) validation and RSA component
//! extraction.
//!
//! ```text
//! SubjectPublicKeyInfo ::= SEQUENCE {
//!     algorithm         SEQUENCE { OBJECT IDENTIFIER, NULL },
//!     subjectPublicKey  BIT STRING {
//!         RSAPublicKey ::= SEQUENCE { INTEGER n, INTEGER e }
//!     }
//! }
//! ```
//!
//! Validation is done in two steps, shape first: the outer structure must
//! match the `SubjectPublicKeyInfo` template and carry the rsaEncryption
//! OID, then the BIT STRING payload must match the `RSAPublicKey` template.

use crate::error::KeyRejected;
use crate::io::der::{self, Class, Shape, Tag, Value};

/// rsaEncryption, RFC 8017 Appendix A.1.
const RSA_ENCRYPTION_OID: &str = "1.2.840.113549.1.1.1";

const OID: Shape = Shape {
    class: Class::Universal,
    tag: Tag::Oid as u8,
    constructed: false,
    children: None,
};

const NULL: Shape = Shape {
    class: Class::Universal,
    tag: Tag::Null as u8,
    constructed: false,
    children: None,
};

const INTEGER: Shape = Shape {
    class: Class::Universal,
    tag: Tag::Integer as u8,
    constructed: false,
    children: None,
};

const ALGORITHM_IDENTIFIER: Shape = Shape {
    class: Class::Universal,
    tag: Tag::Sequence as u8,
    constructed: true,
    children: Some(&[OID, NULL]),
};

// The BIT STRING's contents are validated separately, after the OID check.
static SUBJECT_PUBLIC_KEY_INFO: Shape = Shape {
    class: Class::Universal,
    tag: Tag::Sequence as u8,
    constructed: true,
    children: Some(&[
        ALGORITHM_IDENTIFIER,
        Shape {
            class: Class::Universal,
            tag: Tag::BitString as u8,
            constructed: true,
            children: None,
        },
    ]),
};

static RSA_PUBLIC_KEY: Shape = Shape {
    class: Class::Universal,
    tag: Tag::Sequence as u8,
    constructed: true,
    children: Some(&[INTEGER, INTEGER]),
};

/// Parses a DER `SubjectPublicKeyInfo`, returning the big-endian value
/// octets of the modulus and the public exponent.
pub(super) fn parse_subject_public_key_info(
    spki: &[u8],
) -> Result<(Vec<u8>, Vec<u8>), KeyRejected> {
    let root = der::parse(spki).map_err(|_| KeyRejected::invalid_encoding())?;

    if !root.matches(&SUBJECT_PUBLIC_KEY_INFO) {
        return Err(KeyRejected::not_subject_public_key_info());
    }
    let children = root.children().unwrap();

    let algorithm_oid = &children[0].children().unwrap()[0];
    match algorithm_oid.oid_string() {
        Ok(oid) if oid == RSA_ENCRYPTION_OID => {}
        _ => return Err(KeyRejected::wrong_algorithm()),
    }

    // The shape above requires the speculative BIT STRING decode to have
    // produced a nested value, which is only possible with zero unused
    // bits.
    let rsa_public_key = &children[1].children().unwrap()[0];
    if !rsa_public_key.matches(&RSA_PUBLIC_KEY) {
        return Err(KeyRejected::not_subject_public_key_info());
    }
    let integers = rsa_public_key.children().unwrap();

    let n = nonnegative(&integers[0])?;
    let e = nonnegative(&integers[1])?;
    Ok((n.to_vec(), e.to_vec()))
}

fn nonnegative(value: &Value) -> Result<&[u8], KeyRejected> {
    der::nonnegative_integer(value).map_err(|_| KeyRejected::invalid_component())
}

#[cfg(test)]
mod tests {
    use super::parse_subject_public_key_info;
    use crate::error::KeyRejected;

    // SubjectPublicKeyInfo { rsaEncryption, RSAPublicKey { n = 0xeb2f, e = 3 } }
    static TINY_SPKI: &[u8] = &[
        0x30, 0x1c, // SEQUENCE
        0x30, 0x0d, // SEQUENCE (AlgorithmIdentifier)
        0x06, 0x09, 0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x01, // OID
        0x05, 0x00, // NULL
        0x03, 0x0b, 0x00, // BIT STRING, 0 unused bits
        0x30, 0x08, // SEQUENCE (RSAPublicKey)
        0x02, 0x03, 0x00, 0xeb, 0x2f, // INTEGER n (leading zero is necessary)
        0x02, 0x01, 0x03, // INTEGER e
    ];

    #[test]
    fn test_component_extraction() {
        let (n, e) = parse_subject_public_key_info(TINY_SPKI).unwrap();
        assert_eq!(n, [0xeb, 0x2f]);
        assert_eq!(e, [0x03]);
    }

    #[test]
    fn test_wrong_oid_rejected() {
        let mut bad = TINY_SPKI.to_vec();
        // 1.2.840.113549.1.1.7 is id-RSAES-OAEP; the key parser only
        // accepts plain rsaEncryption.
        bad[14] = 0x07;
        assert_eq!(
            parse_subject_public_key_info(&bad),
            Err(KeyRejected::InvalidKey("WrongAlgorithm"))
        );
    }

    #[test]
    fn test_truncation_rejected() {
        for len in 0..TINY_SPKI.len() {
            assert!(parse_subject_public_key_info(&TINY_SPKI[..len]).is_err());
        }
    }

    #[test]
    fn test_nonzero_unused_bits_rejected() {
        let mut bad = TINY_SPKI.to_vec();
        bad[19] = 0x01; // unused-bits octet of the BIT STRING
        assert!(parse_subject_public_key_info(&bad).is_err());
    }

    #[test]
    fn test_missing_null_rejected() {
        // AlgorithmIdentifier without parameters.
        static NO_NULL: &[u8] = &[
            0x30, 0x1a, // SEQUENCE
            0x30, 0x0b, // SEQUENCE (AlgorithmIdentifier)
            0x06, 0x09, 0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x01, // OID
            0x03, 0x0b, 0x00, // BIT STRING, 0 unused bits
            0x30, 0x08, // SEQUENCE (RSAPublicKey)
            0x02, 0x03, 0x00, 0xeb, 0x2f, // INTEGER n
            0x02, 0x01, 0x03, // INTEGER e
        ];
        assert_eq!(
            parse_subject_public_key_info(NO_NULL),
            Err(KeyRejected::InvalidKey("NotSubjectPublicKeyInfo"))
        );
    }

    #[test]
    fn test_negative_modulus_rejected() {
        let mut bad = TINY_SPKI.to_vec();
        // First value octet of n, originally a necessary leading zero;
        // with the high bit set the INTEGER reads as negative.
        bad[24] = 0xff;
        assert_eq!(
            parse_subject_public_key_info(&bad),
            Err(KeyRejected::InvalidKey("InvalidComponent"))
        );
    }
}
