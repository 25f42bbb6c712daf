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

//! Multi-precision arithmetic.
//!
//! The RSA encryption primitive needs exactly one numeric operation,
//! base**exponent (mod m) for an odd public modulus m, provided by
//! [`montgomery::Modulus::mod_pow`] over the [`bigint::Nonnegative`]
//! magnitude type.

pub(crate) mod bigint;
pub(crate) mod montgomery;

/// One digit of a multi-precision integer, least significant digit first in
/// a `Nonnegative`'s limb vector.
pub(crate) type Limb = u64;

pub(crate) const LIMB_BITS: usize = Limb::BITS as usize;
pub(crate) const LIMB_BYTES: usize = LIMB_BITS / 8;
