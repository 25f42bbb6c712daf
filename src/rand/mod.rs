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

//! Cryptographic pseudo-random number generation.
//!
//! An application should create a single [`FortunaRandom`] (or
//! [`SystemRandom`]) and then use it for all randomness generation.
//! Functions that generate random bytes take a `&dyn SecureRandom`
//! parameter instead of instantiating their own; besides documenting where
//! non-deterministic outputs occur, this lets tests substitute a
//! deterministic implementation so results can be replayed.
//!
//! [`FortunaRandom`] draws from a process-wide Fortuna generator that is
//! reseeded from the operating system on every call; [`SystemRandom`] reads
//! the operating system's CSPRNG directly. Both are cheap handles.

use crate::error;
use std::sync::{Mutex, OnceLock};

mod aes;
mod fortuna;

/// A secure random number generator.
pub trait SecureRandom {
    /// Fills `dest` with random bytes.
    fn fill(&self, dest: &mut [u8]) -> Result<(), error::Unspecified>;
}

/// A secure random number generator where the random values come directly
/// from the operating system.
///
/// A single handle may be shared; `fill` does not require exclusive access.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemRandom;

impl SystemRandom {
    /// Constructs a new `SystemRandom`.
    #[inline(always)]
    pub fn new() -> Self {
        Self
    }
}

impl SecureRandom for SystemRandom {
    #[inline(always)]
    fn fill(&self, dest: &mut [u8]) -> Result<(), error::Unspecified> {
        getrandom::getrandom(dest).map_err(|_| error::Unspecified)
    }
}

/// A handle to the process-wide Fortuna generator.
///
/// The generator's mutable state (entropy pools, cipher key, counter) lives
/// behind a `Mutex`; concurrent users serialize on it, so two concurrent
/// `fill` calls can never race on the pools or the counter. The generator
/// folds fresh operating-system entropy into its pools on every `fill`.
#[derive(Clone, Copy, Debug, Default)]
pub struct FortunaRandom;

impl FortunaRandom {
    /// Constructs a new handle to the process-wide generator.
    #[inline(always)]
    pub fn new() -> Self {
        Self
    }

    /// Contributes caller-provided entropy to the generator's pools.
    ///
    /// This is never required, since the generator reseeds itself from
    /// the operating system, but additional sources can only help.
    pub fn collect(&self, entropy: &[u8]) {
        let mut generator = process_generator().lock().unwrap();
        generator.collect(entropy);
    }
}

impl SecureRandom for FortunaRandom {
    fn fill(&self, dest: &mut [u8]) -> Result<(), error::Unspecified> {
        let mut generator = process_generator().lock().unwrap();
        generator.generate(dest)
    }
}

fn process_generator() -> &'static Mutex<fortuna::Generator> {
    static GENERATOR: OnceLock<Mutex<fortuna::Generator>> = OnceLock::new();
    GENERATOR.get_or_init(|| Mutex::new(fortuna::Generator::new()))
}

#[cfg(test)]
mod tests {
    use super::{FortunaRandom, SecureRandom, SystemRandom};

    #[test]
    fn test_system_random_lengths() {
        let rng = SystemRandom::new();
        for len in [0, 1, 16, 255, 256, 1024] {
            let mut buf = vec![0u8; len];
            rng.fill(&mut buf).unwrap();
        }
    }

    #[test]
    fn test_fortuna_outputs_differ() {
        let rng = FortunaRandom::new();
        let mut a = [0u8; 32];
        let mut b = [0u8; 32];
        rng.fill(&mut a).unwrap();
        rng.fill(&mut b).unwrap();
        assert_ne!(a, b);
        assert_ne!(a, [0u8; 32]);
    }

    #[test]
    fn test_fortuna_arbitrary_lengths() {
        let rng = FortunaRandom::new();
        for len in [0, 1, 15, 16, 17, 31, 33, 1000] {
            let mut buf = vec![0xa5u8; len];
            rng.fill(&mut buf).unwrap();
            if len >= 16 {
                assert_ne!(buf, vec![0xa5u8; len]);
            }
        }
    }

    #[test]
    fn test_fortuna_accepts_entropy() {
        let rng = FortunaRandom::new();
        rng.collect(b"extra entropy from the application");
        let mut buf = [0u8; 16];
        rng.fill(&mut buf).unwrap();
    }
}
