//! Container identifier sources.
//!
//! Every embed renders into its own DOM element, so each builder takes a
//! fresh id at construction time. Ids have the form
//! `feder-container-<suffix>`; the suffix depends on the source.

use std::sync::atomic::{AtomicU64, Ordering};

/// Prefix shared by all generated container ids.
pub const CONTAINER_PREFIX: &str = "feder-container-";

/// Produces container ids for new builders.
pub trait IdSource: Send + Sync {
    /// Returns the next container id.
    fn next_id(&self) -> String;
}

/// Random 64-bit suffix drawn from the OS random source.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIdSource;

impl IdSource for RandomIdSource {
    fn next_id(&self) -> String {
        let mut buf = [0u8; 8];
        getrandom::fill(&mut buf).expect("getrandom failed");
        let id = format!("{}{}", CONTAINER_PREFIX, u64::from_le_bytes(buf));
        tracing::trace!(container_id = %id, "generated random container id");
        id
    }
}

/// Monotonic counter suffix.
///
/// Deterministic, so rendered documents are reproducible.
/// A single static instance yields ids unique within the process.
#[derive(Debug, Default)]
pub struct SequentialIdSource {
    next: AtomicU64,
}

impl SequentialIdSource {
    /// Creates a counter whose first id ends in `start`.
    pub const fn starting_at(start: u64) -> Self {
        Self {
            next: AtomicU64::new(start),
        }
    }
}

impl IdSource for SequentialIdSource {
    fn next_id(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}{}", CONTAINER_PREFIX, n)
    }
}

/// UUID v4 suffix in simple (hyphen-free) form.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidIdSource;

impl IdSource for UuidIdSource {
    fn next_id(&self) -> String {
        format!("{}{}", CONTAINER_PREFIX, uuid::Uuid::new_v4().simple())
    }
}
