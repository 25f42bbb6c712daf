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

use crate::arithmetic::{bigint::Nonnegative, montgomery};
use crate::{bits::BitLength, error::KeyRejected};

// Too-small keys make OAEP degenerate (a 2048-bit modulus is the smallest
// in common use); unnecessarily large keys make exponentiation a
// denial-of-service vector.
const MIN_BITS: BitLength = BitLength::from_usize_bits(1024);
const MAX_BITS: BitLength = BitLength::from_usize_bits(8192);

/// The modulus *n* of an RSA public key, with its Montgomery context.
pub(super) struct PublicModulus {
    value: montgomery::Modulus,
}

impl PublicModulus {
    pub fn from_be_bytes(n: &[u8]) -> Result<Self, KeyRejected> {
        let value = Nonnegative::from_be_bytes(n);
        let bits = value.bit_length();
        if bits < MIN_BITS {
            return Err(KeyRejected::too_small());
        }
        if bits > MAX_BITS {
            return Err(KeyRejected::too_large());
        }
        // An RSA modulus is a product of odd primes; `Modulus` also
        // requires oddness for Montgomery reduction to exist at all.
        let value = montgomery::Modulus::new(value).map_err(|_| KeyRejected::invalid_component())?;
        Ok(Self { value })
    }

    #[inline]
    pub fn len_bits(&self) -> BitLength {
        self.value.len_bits()
    }

    #[inline]
    pub fn value(&self) -> &montgomery::Modulus {
        &self.value
    }
}

impl core::fmt::Debug for PublicModulus {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "PublicModulus({} bits)", self.len_bits().as_usize_bits())
    }
}
