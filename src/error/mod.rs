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

//! Error reporting.
//!
//! Key import failures are reported as [`KeyRejected`], which distinguishes
//! PEM-envelope problems from DER/key-structure problems. Encryption
//! failures are reported as [`EncryptError`]. [`Unspecified`] is the opaque
//! error used by internal plumbing; it never escapes the public API.

pub use self::{
    encrypt_error::EncryptError, key_rejected::KeyRejected, unspecified::Unspecified,
};

mod encrypt_error;
mod key_rejected;
mod unspecified;
