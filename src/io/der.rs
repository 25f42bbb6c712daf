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

//! Parsing of DER-encoded ASN.1 structures into a navigable tree.
//!
//! [`parse`] consumes a byte sequence holding exactly one DER value and
//! produces a [`Value`] tree. Constructed values parse their children
//! recursively. A primitive BIT STRING whose leading unused-bits octet is
//! zero is speculatively re-parsed as a nested value, since
//! `SubjectPublicKeyInfo` carries the `RSAPublicKey` sequence inside a BIT
//! STRING this way; the raw payload is always preserved in
//! [`Value::bit_string_contents`].
//!
//! High-tag-number (multi-octet tag) forms and non-canonical length
//! encodings are rejected.

use crate::error;

/// The constructed bit of the identifier octet.
pub const CONSTRUCTED: u8 = 1 << 5;

/// Universal tag numbers used by the key parser.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Tag {
    /// BOOLEAN
    Boolean = 0x01,
    /// INTEGER
    Integer = 0x02,
    /// BIT STRING
    BitString = 0x03,
    /// OCTET STRING
    OctetString = 0x04,
    /// NULL
    Null = 0x05,
    /// OBJECT IDENTIFIER
    Oid = 0x06,
    /// SEQUENCE (tag number, without the constructed bit)
    Sequence = 0x10,
}

impl From<Tag> for u8 {
    fn from(tag: Tag) -> Self {
        tag as Self
    }
}

/// The class of an ASN.1 tag (identifier octet bits 7–8).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Class {
    /// Universal (0).
    Universal,
    /// Application (1).
    Application,
    /// Context-specific (2).
    ContextSpecific,
    /// Private (3).
    Private,
}

/// A parsed ASN.1 value.
pub struct Value {
    class: Class,
    tag: u8,
    constructed: bool,
    content: Content,
    /// For BIT STRINGs, the raw payload including the leading unused-bits
    /// octet, regardless of whether the speculative nested parse succeeded.
    pub bit_string_contents: Option<Vec<u8>>,
}

enum Content {
    Primitive(Vec<u8>),
    Constructed(Vec<Value>),
}

/// The expected shape of a [`Value`], for structural validation.
///
/// A value matches when class, tag number, and constructedness agree and,
/// if `children` is present, the child counts match and every child matches
/// the corresponding child shape. Primitive contents are never inspected.
pub struct Shape {
    /// Expected class.
    pub class: Class,
    /// Expected tag number (low five bits, without the constructed flag).
    pub tag: u8,
    /// Expected constructedness.
    pub constructed: bool,
    /// Expected children, if the shape constrains them.
    pub children: Option<&'static [Shape]>,
}

impl Value {
    /// The tag class.
    #[inline]
    pub fn class(&self) -> Class {
        self.class
    }

    /// The tag number (low five bits of the identifier octet).
    #[inline]
    pub fn tag(&self) -> u8 {
        self.tag
    }

    /// Whether the value is constructed.
    #[inline]
    pub fn constructed(&self) -> bool {
        self.constructed
    }

    /// The children of a constructed value, or `None` for primitives.
    pub fn children(&self) -> Option<&[Value]> {
        match &self.content {
            Content::Constructed(children) => Some(children),
            Content::Primitive(_) => None,
        }
    }

    /// The contents octets of a primitive value, or `None` for constructed
    /// values.
    pub fn primitive_contents(&self) -> Option<&[u8]> {
        match &self.content {
            Content::Primitive(bytes) => Some(bytes),
            Content::Constructed(_) => None,
        }
    }

    /// Decodes an OBJECT IDENTIFIER value into dotted-decimal form.
    ///
    /// The first contents octet y encodes the first two arcs as
    /// ⌊y/40⌋ and y mod 40; the remaining arcs are base-128 with the high
    /// bit of each octet as a continuation flag, most significant first.
    pub fn oid_string(&self) -> Result<String, error::Unspecified> {
        if self.class != Class::Universal || self.tag != Tag::Oid.into() || self.constructed {
            return Err(error::Unspecified);
        }
        let bytes = self.primitive_contents().ok_or(error::Unspecified)?;
        let (&first, rest) = bytes.split_first().ok_or(error::Unspecified)?;

        let mut oid = format!("{}.{}", first / 40, first % 40);
        let mut arc: u64 = 0;
        let mut mid_arc = false;
        for &b in rest {
            if arc > (u64::MAX >> 7) {
                return Err(error::Unspecified);
            }
            arc = (arc << 7) | u64::from(b & 0x7f);
            mid_arc = (b & 0x80) != 0;
            if !mid_arc {
                oid.push('.');
                oid.push_str(&arc.to_string());
                arc = 0;
            }
        }
        if mid_arc {
            // Trailing continuation octet.
            return Err(error::Unspecified);
        }
        Ok(oid)
    }

    /// Structural (shape-only) validation; see [`Shape`].
    pub fn matches(&self, shape: &Shape) -> bool {
        if self.class != shape.class
            || self.tag != shape.tag
            || self.constructed != shape.constructed
        {
            return false;
        }
        match shape.children {
            None => true,
            Some(shapes) => match self.children() {
                Some(children) => {
                    children.len() == shapes.len()
                        && children
                            .iter()
                            .zip(shapes.iter())
                            .all(|(child, shape)| child.matches(shape))
                }
                None => false,
            },
        }
    }
}

// SubjectPublicKeyInfo nests SEQUENCE → BIT STRING → SEQUENCE; anything much
// deeper than that in key material is hostile input.
const MAX_DEPTH: usize = 16;

/// Parses `input` as exactly one DER value.
pub fn parse(input: &[u8]) -> Result<Value, error::Unspecified> {
    untrusted::Input::from(input).read_all(error::Unspecified, |input| parse_value(input, 0))
}

fn parse_value(
    input: &mut untrusted::Reader,
    depth: usize,
) -> Result<Value, error::Unspecified> {
    if depth > MAX_DEPTH {
        return Err(error::Unspecified);
    }

    let identifier = input.read_byte()?;
    if (identifier & 0x1f) == 0x1f {
        return Err(error::Unspecified); // High tag number form is not allowed.
    }
    let class = match identifier >> 6 {
        0 => Class::Universal,
        1 => Class::Application,
        2 => Class::ContextSpecific,
        _ => Class::Private,
    };
    let constructed = (identifier & CONSTRUCTED) != 0;
    let tag = identifier & 0x1f;

    let length = read_length(input)?;
    let contents = input.read_bytes(length)?;

    if constructed {
        let children = contents.read_all(error::Unspecified, |contents| {
            let mut children = Vec::new();
            while !contents.at_end() {
                children.push(parse_value(contents, depth + 1)?);
            }
            Ok(children)
        })?;
        return Ok(Value {
            class,
            tag,
            constructed: true,
            content: Content::Constructed(children),
            bit_string_contents: None,
        });
    }

    let contents = contents.as_slice_less_safe().to_vec();

    if class == Class::Universal && tag == Tag::BitString.into() && contents.len() > 1 {
        // The unused-bits octet must be zero for the payload to be a whole
        // number of octets; only then can it hold a nested DER value.
        if contents[0] == 0 {
            let inner = untrusted::Input::from(&contents[1..])
                .read_all(error::Unspecified, |inner| parse_value(inner, depth + 1));
            if let Ok(child) = inner {
                return Ok(Value {
                    class,
                    tag,
                    constructed: true,
                    content: Content::Constructed(vec![child]),
                    bit_string_contents: Some(contents),
                });
            }
        }
        return Ok(Value {
            class,
            tag,
            constructed: false,
            bit_string_contents: Some(contents.clone()),
            content: Content::Primitive(contents),
        });
    }

    Ok(Value {
        class,
        tag,
        constructed: false,
        content: Content::Primitive(contents),
        bit_string_contents: None,
    })
}

// If the high order bit of the first length byte is set to zero then the
// length is encoded in the seven remaining bits of that byte. Otherwise,
// those seven bits represent the number of bytes used to encode the length,
// and the shortest possible encoding is required.
fn read_length(input: &mut untrusted::Reader) -> Result<usize, error::Unspecified> {
    let first = input.read_byte()?;
    if (first & 0x80) == 0 {
        return Ok(usize::from(first));
    }
    let num_bytes = usize::from(first & 0x7f);
    if num_bytes == 0 || num_bytes > 4 {
        // Indefinite lengths are not DER; lengths above 2^32-1 are absurd.
        return Err(error::Unspecified);
    }
    let mut length: usize = 0;
    for _ in 0..num_bytes {
        length = (length << 8) | usize::from(input.read_byte()?);
    }
    let min = if num_bytes == 1 { 0x80 } else { 1 << (8 * (num_bytes - 1)) };
    if length < min {
        return Err(error::Unspecified); // Not the canonical encoding.
    }
    Ok(length)
}

/// Returns the big-endian value octets of a non-negative INTEGER, with any
/// necessary leading zero removed.
///
/// Rejects negative values, unnecessary leading zeros, and empty contents.
pub fn nonnegative_integer(value: &Value) -> Result<&[u8], error::Unspecified> {
    if value.class() != Class::Universal || value.tag() != Tag::Integer.into() || value.constructed()
    {
        return Err(error::Unspecified);
    }
    let bytes = value.primitive_contents().ok_or(error::Unspecified)?;
    match bytes.split_first().ok_or(error::Unspecified)? {
        // Zero or leading zero.
        (0, rest) => {
            match rest.first() {
                // Zero.
                None => Ok(bytes),
                // Necessary leading zero.
                Some(&second) if second & 0x80 == 0x80 => Ok(rest),
                // Unnecessary leading zero.
                _ => Err(error::Unspecified),
            }
        }
        // Positive value with no leading zero.
        (first, _) if first & 0x80 == 0 => Ok(bytes),
        // Negative value.
        (_, _) => Err(error::Unspecified),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequence(children: &[&[u8]]) -> Vec<u8> {
        let body: Vec<u8> = children.concat();
        assert!(body.len() < 128);
        let mut out = vec![0x30, body.len() as u8];
        out.extend_from_slice(&body);
        out
    }

    #[test]
    fn test_primitive_roundtrip() {
        let parsed = parse(&[0x04, 0x03, 0x0a, 0x0b, 0x0c]).unwrap();
        assert_eq!(parsed.class(), Class::Universal);
        assert_eq!(parsed.tag(), u8::from(Tag::OctetString));
        assert!(!parsed.constructed());
        assert_eq!(parsed.primitive_contents(), Some(&[0x0a, 0x0b, 0x0c][..]));
    }

    #[test]
    fn test_nested_sequence() {
        let der = sequence(&[&[0x02, 0x01, 0x05], &[0x05, 0x00]]);
        let parsed = parse(&der).unwrap();
        let children = parsed.children().unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].tag(), u8::from(Tag::Integer));
        assert_eq!(children[1].tag(), u8::from(Tag::Null));
    }

    #[test]
    fn test_trailing_garbage_rejected() {
        assert!(parse(&[0x05, 0x00, 0x00]).is_err());
        assert!(parse(&[0x05, 0x01]).is_err());
        assert!(parse(&[]).is_err());
    }

    #[test]
    fn test_high_tag_number_rejected() {
        assert!(parse(&[0x1f, 0x81, 0x01, 0x00]).is_err());
    }

    #[test]
    fn test_long_form_lengths() {
        let mut long = vec![0x04, 0x81, 0x80];
        long.extend_from_slice(&[0u8; 0x80]);
        assert!(parse(&long).is_ok());

        // 0x81 with a length below 0x80 is not canonical.
        let mut non_canonical = vec![0x04, 0x81, 0x7f];
        non_canonical.extend_from_slice(&[0u8; 0x7f]);
        assert!(parse(&non_canonical).is_err());

        // Indefinite length is not DER.
        assert!(parse(&[0x30, 0x80, 0x05, 0x00, 0x00, 0x00]).is_err());
    }

    #[test]
    fn test_bit_string_speculative_decode() {
        // BIT STRING { SEQUENCE { INTEGER 3 } }, unused bits 0.
        let der = [0x03, 0x06, 0x00, 0x30, 0x03, 0x02, 0x01, 0x03];
        let parsed = parse(&der).unwrap();
        assert!(parsed.constructed());
        assert_eq!(parsed.bit_string_contents.as_deref(), Some(&der[2..]));
        let inner = &parsed.children().unwrap()[0];
        assert_eq!(inner.tag(), u8::from(Tag::Sequence));

        // Nonzero unused-bits count: stays primitive.
        let raw = [0x03, 0x02, 0x04, 0xf0];
        let parsed = parse(&raw).unwrap();
        assert!(!parsed.constructed());
        assert_eq!(parsed.bit_string_contents.as_deref(), Some(&raw[2..]));

        // Zero unused bits but payload is not DER: stays primitive.
        let raw = [0x03, 0x03, 0x00, 0xff, 0xee];
        let parsed = parse(&raw).unwrap();
        assert!(!parsed.constructed());
        assert_eq!(parsed.primitive_contents(), Some(&raw[2..]));
    }

    #[test]
    fn test_oid_decoding() {
        // rsaEncryption: 1.2.840.113549.1.1.1
        let der = [
            0x06, 0x09, 0x2a, 0x86, 0x48, 0x86, 0xf7, 0x0d, 0x01, 0x01, 0x01,
        ];
        let parsed = parse(&der).unwrap();
        assert_eq!(parsed.oid_string().unwrap(), "1.2.840.113549.1.1.1");

        // id-sha256: 2.16.840.1.101.3.4.2.1
        let der = [
            0x06, 0x09, 0x60, 0x86, 0x48, 0x01, 0x65, 0x03, 0x04, 0x02, 0x01,
        ];
        let parsed = parse(&der).unwrap();
        assert_eq!(parsed.oid_string().unwrap(), "2.16.840.1.101.3.4.2.1");

        // Empty contents and trailing continuation are rejected.
        assert!(parse(&[0x06, 0x00]).unwrap().oid_string().is_err());
        assert!(parse(&[0x06, 0x02, 0x2a, 0x86])
            .unwrap()
            .oid_string()
            .is_err());
    }

    #[test]
    fn test_shape_matching() {
        static INTEGER: Shape = Shape {
            class: Class::Universal,
            tag: 0x02,
            constructed: false,
            children: None,
        };
        static PAIR: Shape = Shape {
            class: Class::Universal,
            tag: 0x10,
            constructed: true,
            children: Some(&[
                Shape {
                    class: Class::Universal,
                    tag: 0x02,
                    constructed: false,
                    children: None,
                },
                Shape {
                    class: Class::Universal,
                    tag: 0x02,
                    constructed: false,
                    children: None,
                },
            ]),
        };

        let one_int = sequence(&[&[0x02, 0x01, 0x00]]);
        let two_ints = sequence(&[&[0x02, 0x01, 0x00], &[0x02, 0x01, 0x01]]);

        assert!(parse(&two_ints).unwrap().matches(&PAIR));
        assert!(!parse(&one_int).unwrap().matches(&PAIR));
        assert!(!parse(&two_ints).unwrap().matches(&INTEGER));
        assert!(parse(&[0x02, 0x01, 0x2a]).unwrap().matches(&INTEGER));
    }

    #[test]
    fn test_nonnegative_integer() {
        for (der, expected) in [
            (&[0x02, 0x01, 0x00][..], &[0x00][..]),
            (&[0x02, 0x01, 0x7f][..], &[0x7f][..]),
            (&[0x02, 0x02, 0x00, 0x80][..], &[0x80][..]),
            (&[0x02, 0x02, 0x01, 0x00][..], &[0x01, 0x00][..]),
        ] {
            let parsed = parse(der).unwrap();
            assert_eq!(nonnegative_integer(&parsed).unwrap(), expected);
        }
        for der in [
            &[0x02, 0x00][..],             // Empty value.
            &[0x02, 0x01, 0x80][..],       // Negative.
            &[0x02, 0x02, 0x00, 0x01][..], // Unnecessary leading zero.
        ] {
            let parsed = parse(der).unwrap();
            assert!(nonnegative_integer(&parsed).is_err());
        }
    }
}
