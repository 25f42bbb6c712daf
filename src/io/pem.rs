// Copyright 2017-2024 Brian Smith.
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

//! PEM envelope reading (RFC 7468).
//!
//! Exactly one armored block is accepted. Leading and trailing whitespace
//! around the armor is tolerated; encapsulated header lines (terminated by a
//! blank line, as in RFC 1421) are recognized and ignored; all characters
//! outside the Base64 alphabet are stripped from the body before decoding.

use crate::error::KeyRejected;
use base64::{engine::general_purpose::STANDARD, Engine as _};

const BEGIN: &str = "-----BEGIN ";
const DASHES: &str = "-----";

/// Strips the armor from `pem` and decodes the Base64 body.
///
/// Returns the captured armor label and the decoded DER octets. The BEGIN
/// and END labels must match literally.
pub fn decode(pem: &str) -> Result<(&str, Vec<u8>), KeyRejected> {
    let text = pem.trim();

    let rest = text
        .strip_prefix(BEGIN)
        .ok_or_else(KeyRejected::armor_not_found)?;
    let label_end = rest.find(DASHES).ok_or_else(KeyRejected::armor_not_found)?;
    let label = &rest[..label_end];
    if label.is_empty()
        || !label
            .bytes()
            .all(|b| matches!(b, b'A'..=b'Z' | b'0'..=b'9' | b'-' | b' '))
    {
        return Err(KeyRejected::armor_not_found());
    }

    let body = &rest[label_end + DASHES.len()..];
    let end_marker = format!("-----END {}{}", label, DASHES);
    let end = body
        .find(&end_marker)
        .ok_or_else(KeyRejected::armor_mismatch)?;
    if !body[end + end_marker.len()..].trim().is_empty() {
        return Err(KeyRejected::armor_mismatch());
    }
    let body = skip_headers(&body[..end]);

    let b64: String = body
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '='))
        .collect();
    let der = STANDARD
        .decode(b64)
        .map_err(|_| KeyRejected::bad_base64())?;
    Ok((label, der))
}

/// RFC 1421-style encapsulated headers: lines before the first blank line,
/// when any of them contains a colon.
fn skip_headers(body: &str) -> &str {
    for blank in ["\n\n", "\r\n\r\n"] {
        if let Some(i) = body.find(blank) {
            if body[..i].contains(':') {
                return &body[i + blank.len()..];
            }
        }
    }
    body
}
