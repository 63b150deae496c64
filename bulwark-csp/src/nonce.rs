//! Secure random source for nonce generation
//!
//! [`SecureRandom`] wraps a ChaCha20 generator seeded from the operating
//! system and reseeds it from a fresh OS seed every [`RESEED_INTERVAL`]
//! draws. Construct one at startup and share it by reference; it is
//! `Send + Sync`.
//!
//! The reseed countdown is a best-effort guard rather than a lock: two
//! threads may both observe an exhausted countdown and both reseed. That only
//! costs an extra reseed.

use crate::error::{CspError, Result};
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use rand::distributions::Alphanumeric;
use rand::rngs::OsRng;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use std::sync::atomic::{AtomicI64, Ordering};

/// Number of draws served between two reseeds.
pub const RESEED_INTERVAL: i64 = 1_000_000;

static SHARED: OnceCell<SecureRandom> = OnceCell::new();

/// A cryptographically secure random source with periodic reseeding.
pub struct SecureRandom {
    rng: Mutex<ChaCha20Rng>,
    countdown: AtomicI64,
}

impl SecureRandom {
    /// Create a generator seeded from the operating system.
    pub fn new() -> Result<Self> {
        Ok(Self {
            rng: Mutex::new(fresh_generator()?),
            countdown: AtomicI64::new(RESEED_INTERVAL),
        })
    }

    /// Process-wide instance, created on first use.
    pub fn shared() -> Result<&'static SecureRandom> {
        SHARED.get_or_try_init(Self::new)
    }

    /// Fill `dest` with random bytes.
    pub fn fill_bytes(&self, dest: &mut [u8]) {
        self.check_reseed();
        self.rng.lock().fill_bytes(dest);
    }

    /// Draw `len` characters from `[A-Za-z0-9]`.
    pub fn alphanumeric(&self, len: usize) -> String {
        self.check_reseed();
        let mut rng = self.rng.lock();
        (0..len)
            .map(|_| char::from(rng.sample(Alphanumeric)))
            .collect()
    }

    fn check_reseed(&self) {
        if self.countdown.fetch_sub(1, Ordering::Relaxed) > 1 {
            return;
        }
        self.countdown.store(RESEED_INTERVAL, Ordering::Relaxed);
        match fresh_generator() {
            Ok(rng) => {
                *self.rng.lock() = rng;
                tracing::debug!("Reseeded nonce generator");
            }
            Err(e) => tracing::warn!("Nonce generator reseed failed, keeping current state: {}", e),
        }
    }
}

impl std::fmt::Debug for SecureRandom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecureRandom")
            .field("countdown", &self.countdown.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

/// Generate an alphanumeric nonce of `size` characters, rounded down to a
/// multiple of 4.
///
/// The result is the bare value; [`Directive::add_nonce`] wraps it as
/// `'nonce-<value>'`.
///
/// [`Directive::add_nonce`]: crate::Directive::add_nonce
pub fn generate_nonce(random: &SecureRandom, size: usize) -> String {
    random.alphanumeric(size / 4 * 4)
}

fn fresh_generator() -> Result<ChaCha20Rng> {
    ChaCha20Rng::from_rng(OsRng).map_err(|e| CspError::Entropy(e.to_string()))
}
