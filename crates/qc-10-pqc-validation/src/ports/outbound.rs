//! # Outbound Ports (Driven Ports / SPI)
//!
//! Capabilities this subsystem consumes: signature verification and a clock.

use crate::domain::algorithm::SignatureAlgorithm;
use crate::domain::policy::Timestamp;

/// Cryptographic verification capability.
///
/// Both methods are pure predicates: deterministic for a given input, no
/// I/O, no shared mutable state. Malformed keys or signatures verify `false`
/// rather than erroring.
pub trait SignatureVerifier: Send + Sync {
    /// Verify a classical (pre-quantum) signature over `data`.
    fn verify_classical(&self, data: &[u8], signature: &[u8], public_key: &[u8]) -> bool;

    /// Verify a post-quantum signature over `data` under `algorithm`.
    ///
    /// For hybrid algorithms `signature` is the post-quantum component only.
    fn verify_post_quantum(
        &self,
        data: &[u8],
        signature: &[u8],
        public_key: &[u8],
        algorithm: SignatureAlgorithm,
    ) -> bool;
}

impl<V: SignatureVerifier + ?Sized> SignatureVerifier for std::sync::Arc<V> {
    fn verify_classical(&self, data: &[u8], signature: &[u8], public_key: &[u8]) -> bool {
        (**self).verify_classical(data, signature, public_key)
    }

    fn verify_post_quantum(
        &self,
        data: &[u8],
        signature: &[u8],
        public_key: &[u8],
        algorithm: SignatureAlgorithm,
    ) -> bool {
        (**self).verify_post_quantum(data, signature, public_key, algorithm)
    }
}

/// Time source for evaluating the migration deadline.
pub trait TimeSource: Send + Sync {
    /// Current time in milliseconds since the Unix epoch.
    fn now(&self) -> Timestamp;
}

impl<T: TimeSource + ?Sized> TimeSource for std::sync::Arc<T> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

/// Wall-clock time source.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemTimeSource;

impl TimeSource for SystemTimeSource {
    fn now(&self) -> Timestamp {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as Timestamp)
            .unwrap_or(0)
    }
}

// =============================================================================
// Test Doubles
// =============================================================================

/// Verifier returning fixed answers and counting calls.
#[cfg(test)]
pub struct MockVerifier {
    classical: std::sync::atomic::AtomicBool,
    post_quantum: std::sync::atomic::AtomicBool,
    calls: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl MockVerifier {
    pub fn new(classical: bool, post_quantum: bool) -> Self {
        Self {
            classical: std::sync::atomic::AtomicBool::new(classical),
            post_quantum: std::sync::atomic::AtomicBool::new(post_quantum),
            calls: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// Both schemes verify.
    pub fn accepting() -> Self {
        Self::new(true, true)
    }

    pub fn set_classical(&self, result: bool) {
        self.classical
            .store(result, std::sync::atomic::Ordering::SeqCst);
    }

    pub fn set_post_quantum(&self, result: bool) {
        self.post_quantum
            .store(result, std::sync::atomic::Ordering::SeqCst);
    }

    /// Total verifier invocations so far.
    pub fn calls(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
impl SignatureVerifier for MockVerifier {
    fn verify_classical(&self, _data: &[u8], _signature: &[u8], _public_key: &[u8]) -> bool {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.classical.load(std::sync::atomic::Ordering::SeqCst)
    }

    fn verify_post_quantum(
        &self,
        _data: &[u8],
        _signature: &[u8],
        _public_key: &[u8],
        _algorithm: SignatureAlgorithm,
    ) -> bool {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.post_quantum.load(std::sync::atomic::Ordering::SeqCst)
    }
}

/// Settable clock.
#[cfg(test)]
pub struct MockTimeSource {
    time: std::sync::atomic::AtomicU64,
}

#[cfg(test)]
impl MockTimeSource {
    pub fn new(initial: Timestamp) -> Self {
        Self {
            time: std::sync::atomic::AtomicU64::new(initial),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.time.fetch_add(ms, std::sync::atomic::Ordering::SeqCst);
    }

    pub fn set(&self, time: Timestamp) {
        self.time.store(time, std::sync::atomic::Ordering::SeqCst);
    }
}

#[cfg(test)]
impl TimeSource for MockTimeSource {
    fn now(&self) -> Timestamp {
        self.time.load(std::sync::atomic::Ordering::SeqCst)
    }
}
