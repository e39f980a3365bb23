//! Resolver counters
//!
//! Lock-free counters for observability. They are never consulted when
//! deciding a check.

use std::sync::atomic::{AtomicU64, Ordering};

/// Live counters owned by a resolver
#[derive(Debug, Default)]
pub struct ResolverStats {
    records_set: AtomicU64,
    records_cleared: AtomicU64,
    flushes: AtomicU64,
    checks: AtomicU64,
    checks_denied: AtomicU64,
    mutations_applied: AtomicU64,
    mutations_skipped: AtomicU64,
}

impl ResolverStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_set(&self) {
        self.records_set.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_cleared(&self) {
        self.records_cleared.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn flush(&self) {
        self.flushes.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn check(&self, allowed: bool) {
        self.checks.fetch_add(1, Ordering::Relaxed);
        if !allowed {
            self.checks_denied.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub(crate) fn mutation(&self, applied: bool) {
        if applied {
            self.mutations_applied.fetch_add(1, Ordering::Relaxed);
        } else {
            self.mutations_skipped.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Current counter values
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            records_set: self.records_set.load(Ordering::Relaxed),
            records_cleared: self.records_cleared.load(Ordering::Relaxed),
            flushes: self.flushes.load(Ordering::Relaxed),
            checks: self.checks.load(Ordering::Relaxed),
            checks_denied: self.checks_denied.load(Ordering::Relaxed),
            mutations_applied: self.mutations_applied.load(Ordering::Relaxed),
            mutations_skipped: self.mutations_skipped.load(Ordering::Relaxed),
        }
    }

    /// Zero every counter
    pub fn reset(&self) {
        for counter in [
            &self.records_set,
            &self.records_cleared,
            &self.flushes,
            &self.checks,
            &self.checks_denied,
            &self.mutations_applied,
            &self.mutations_skipped,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
    }
}

/// Point-in-time copy of [`ResolverStats`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Upserts via `set_user_permissions` or snapshot loads
    pub records_set: u64,
    /// Single-user invalidations that removed a record
    pub records_cleared: u64,
    /// Full cache flushes
    pub flushes: u64,
    /// User-id addressed checks
    pub checks: u64,
    /// Checks that returned `false`
    pub checks_denied: u64,
    /// Mutations that found their record
    pub mutations_applied: u64,
    /// Mutations on unknown users (no-ops)
    pub mutations_skipped: u64,
}

impl StatsSnapshot {
    /// Fraction of checks that were denied
    pub fn denial_rate(&self) -> f64 {
        if self.checks == 0 {
            0.0
        } else {
            self.checks_denied as f64 / self.checks as f64
        }
    }
}
