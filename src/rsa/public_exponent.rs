// Copyright 2015-2023 Brian Smith.
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

use crate::arithmetic::bigint::Nonnegative;
use crate::error::KeyRejected;

/// The exponent *e* of an RSA public key: odd and at least 3.
///
/// The exponentiation is variable-time in the exponent, so `e` is also
/// bounded above (by the modulus, at key assembly time) to keep a hostile
/// key from turning encryption into a denial of service.
pub(super) struct PublicExponent {
    value: Nonnegative,
}

impl PublicExponent {
    pub fn from_be_bytes(e: &[u8]) -> Result<Self, KeyRejected> {
        let value = Nonnegative::from_be_bytes(e);
        if value < Nonnegative::from_u64(3) {
            return Err(KeyRejected::too_small());
        }
        if !value.is_odd() {
            return Err(KeyRejected::invalid_component());
        }
        Ok(Self { value })
    }

    #[inline]
    pub fn value(&self) -> &Nonnegative {
        &self.value
    }
}

impl core::fmt::Debug for PublicExponent {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "PublicExponent({:?})", self.value)
    }
}
