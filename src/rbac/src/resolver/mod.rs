//! Permission resolver
//!
//! Owns the per-user record cache and answers permission and role checks.
//!
//! # Architecture
//!
//! ```text
//! set_user_permissions ──▶ DashMap<UserId, UserPermissionRecord>
//!                               │  (one RwLock per shard)
//! check_* / authorize ──────────┤ read lock ──▶ effective::get_all_permissions ──▶ bool
//! grant / deny / revoke / role ─┘ write lock, whole record updated in place
//! ```
//!
//! A mutation holds the shard's write lock for the full read-modify-write,
//! so a concurrent reader of the same record sees it either entirely before
//! or entirely after. Records in different shards never contend.
//!
//! # Example
//!
//! ```rust
//! use cretoai_rbac::{Permission, PermissionResolver, Role, UserPermissionRecord};
//!
//! let resolver = PermissionResolver::new();
//! resolver.set_user_permissions(UserPermissionRecord::new("u1").with_role(Role::User));
//!
//! assert!(resolver.check_permission("u1", Permission::TaskView));
//! resolver.deny_permission("u1", Permission::TaskView);
//! assert!(!resolver.check_permission("u1", Permission::TaskView));
//! ```

pub mod effective;
pub mod stats;

pub use effective::{
    effective_level, get_all_permissions, has_all_permissions, has_all_roles,
    has_any_permission, has_any_role, has_higher_or_equal_role, has_higher_role,
    has_permission, has_role, role_permissions,
};
pub use stats::{ResolverStats, StatsSnapshot};

use crate::catalog::{Permission, PermissionSet, Role};
use crate::config::ResolverConfig;
use crate::error::Result;
use crate::types::{UserId, UserPermissionRecord};
use dashmap::DashMap;
use std::sync::Arc;
use tracing::{debug, info, trace, warn};

/// Shared cache of user permission records.
///
/// Cloning is cheap and yields a handle to the same cache, so one resolver
/// built at startup can be handed to every request handler.
#[derive(Clone)]
pub struct PermissionResolver {
    /// Records keyed by user id
    records: Arc<DashMap<UserId, UserPermissionRecord>>,

    /// Operation counters
    stats: Arc<ResolverStats>,

    /// Resolver configuration
    config: ResolverConfig,
}

impl PermissionResolver {
    /// Create a resolver with the default configuration
    pub fn new() -> Self {
        Self::build(ResolverConfig::default())
    }

    /// Create a resolver with a custom configuration
    ///
    /// # Errors
    ///
    /// Returns `RbacError::InvalidConfig` if the configuration fails validation.
    pub fn with_config(config: ResolverConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: ResolverConfig) -> Self {
        let records =
            DashMap::with_capacity_and_shard_amount(config.initial_capacity, config.shard_amount);

        info!(
            "PermissionResolver initialized with capacity={}, shards={}",
            config.initial_capacity, config.shard_amount
        );

        Self {
            records: Arc::new(records),
            stats: Arc::new(ResolverStats::new()),
            config,
        }
    }

    // =========================================================================
    // Cache management
    // =========================================================================

    /// Insert or wholesale replace the record for `record.user_id`.
    ///
    /// Custom grants that are also denied are dropped before storing, so the
    /// cached record always keeps its two override sets disjoint.
    pub fn set_user_permissions(&self, mut record: UserPermissionRecord) {
        let dropped = record.normalize();
        if !dropped.is_empty() {
            warn!(
                user_id = %record.user_id,
                dropped = ?dropped,
                "Record had permissions both granted and denied; keeping the denial"
            );
        }

        debug!(
            user_id = %record.user_id,
            roles = record.roles.len(),
            custom = record.custom_permissions.len(),
            denied = record.denied_permissions.len(),
            "Storing user permissions"
        );

        self.records.insert(record.user_id.clone(), record);
        self.stats.record_set();
    }

    /// Returns a copy of the stored record, or `None` if the user has none.
    pub fn get_user_permissions(&self, user_id: &str) -> Option<UserPermissionRecord> {
        self.records.get(user_id).map(|entry| entry.value().clone())
    }

    /// Drop one user's record. Returns `true` if a record was removed.
    pub fn clear_user_permissions(&self, user_id: &str) -> bool {
        let removed = self.records.remove(user_id).is_some();
        if removed {
            self.stats.record_cleared();
            debug!(user_id, "Cleared user permissions");
        }
        removed
    }

    /// Drop every record
    pub fn clear_all(&self) {
        let count = self.records.len();
        self.records.clear();
        self.stats.flush();
        info!("Permission cache flushed ({} records)", count);
    }

    /// Bulk upsert, e.g. when warming the cache from a durable store.
    /// Returns the number of records stored.
    pub fn load_snapshot(&self, records: impl IntoIterator<Item = UserPermissionRecord>) -> usize {
        let mut loaded = 0;
        for record in records {
            self.set_user_permissions(record);
            loaded += 1;
        }
        info!("Loaded {} user permission records", loaded);
        loaded
    }

    /// Copies of all cached records, for writing back to a durable store.
    ///
    /// Each record is copied atomically; the snapshot as a whole is not a
    /// single point in time if mutations run concurrently.
    pub fn snapshot(&self) -> Vec<UserPermissionRecord> {
        self.records.iter().map(|entry| entry.value().clone()).collect()
    }

    /// Number of cached records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if no records are cached
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns `true` if a record exists for `user_id`
    pub fn contains_user(&self, user_id: &str) -> bool {
        self.records.contains_key(user_id)
    }

    /// Ids of all cached users
    pub fn user_ids(&self) -> Vec<UserId> {
        self.records.iter().map(|entry| entry.key().clone()).collect()
    }

    // =========================================================================
    // Checks by user id (fail closed on unknown users)
    // =========================================================================

    /// Effective permissions for a user; empty if the user has no record.
    pub fn effective_permissions(&self, user_id: &str) -> PermissionSet {
        self.records
            .get(user_id)
            .map(|entry| get_all_permissions(entry.value()))
            .unwrap_or(PermissionSet::empty())
    }

    /// Returns `true` if the user effectively holds `permission`.
    pub fn check_permission(&self, user_id: &str, permission: Permission) -> bool {
        self.evaluate(user_id, |record| {
            record.is_some_and(|r| has_permission(r, permission))
        })
    }

    /// Returns `true` if the user effectively holds every listed permission.
    pub fn check_all_permissions(&self, user_id: &str, permissions: &[Permission]) -> bool {
        self.evaluate(user_id, |record| {
            record.is_some_and(|r| has_all_permissions(r, permissions))
        })
    }

    /// Returns `true` if the user effectively holds at least one listed permission.
    pub fn check_any_permission(&self, user_id: &str, permissions: &[Permission]) -> bool {
        self.evaluate(user_id, |record| {
            record.is_some_and(|r| has_any_permission(r, permissions))
        })
    }

    /// Returns `true` if the user holds `role` directly.
    pub fn check_role(&self, user_id: &str, role: Role) -> bool {
        self.evaluate(user_id, |record| record.is_some_and(|r| has_role(r, role)))
    }

    /// Run a guard (see [`crate::guard`]) against the user's current record.
    ///
    /// The guard sees a copy of the record and runs with no shard lock held,
    /// so it may call back into this resolver.
    pub fn authorize<G>(&self, user_id: &str, guard: &G) -> bool
    where
        G: Fn(Option<&UserPermissionRecord>) -> bool,
    {
        let record = self.get_user_permissions(user_id);
        let allowed = guard(record.as_ref());
        self.finish_check(user_id, allowed)
    }

    fn evaluate<F>(&self, user_id: &str, predicate: F) -> bool
    where
        F: FnOnce(Option<&UserPermissionRecord>) -> bool,
    {
        let allowed = match self.records.get(user_id) {
            Some(entry) => predicate(Some(entry.value())),
            None => predicate(None),
        };

        self.finish_check(user_id, allowed)
    }

    fn finish_check(&self, user_id: &str, allowed: bool) -> bool {
        self.stats.check(allowed);
        if self.config.trace_checks {
            trace!(user_id, allowed, "Permission check");
        }

        allowed
    }

    // =========================================================================
    // Mutations (silent no-op on unknown users)
    // =========================================================================

    /// Add a custom grant and clear any denial of the same permission.
    pub fn grant_permission(&self, user_id: &str, permission: Permission) -> bool {
        self.mutate(user_id, "grant", permission.as_str(), |record| {
            record.custom_permissions.insert(permission.flag());
            record.denied_permissions.remove(permission.flag());
        })
    }

    /// Remove a custom grant. Denials and role grants are untouched.
    pub fn revoke_permission(&self, user_id: &str, permission: Permission) -> bool {
        self.mutate(user_id, "revoke", permission.as_str(), |record| {
            record.custom_permissions.remove(permission.flag());
        })
    }

    /// Add a denial and clear any custom grant of the same permission.
    pub fn deny_permission(&self, user_id: &str, permission: Permission) -> bool {
        self.mutate(user_id, "deny", permission.as_str(), |record| {
            record.denied_permissions.insert(permission.flag());
            record.custom_permissions.remove(permission.flag());
        })
    }

    /// Add a role. No-op returning `false` on unknown users.
    pub fn add_role(&self, user_id: &str, role: Role) -> bool {
        self.mutate(user_id, "add_role", role.as_str(), |record| {
            record.roles.insert(role);
        })
    }

    /// Remove a role. No-op returning `false` on unknown users.
    pub fn remove_role(&self, user_id: &str, role: Role) -> bool {
        self.mutate(user_id, "remove_role", role.as_str(), |record| {
            record.roles.remove(&role);
        })
    }

    fn mutate<F>(&self, user_id: &str, op: &'static str, target: &'static str, apply: F) -> bool
    where
        F: FnOnce(&mut UserPermissionRecord),
    {
        // The shard write lock is held until `entry` drops
        let applied = match self.records.get_mut(user_id) {
            Some(mut entry) => {
                apply(entry.value_mut());
                true
            }
            None => false,
        };

        self.stats.mutation(applied);
        if applied {
            debug!(user_id, op, target, "Updated user permissions");
        } else {
            debug!(user_id, op, target, "No record for user, mutation skipped");
        }

        applied
    }

    // =========================================================================
    // Introspection
    // =========================================================================

    /// Current operation counters
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Zero the operation counters
    pub fn reset_stats(&self) {
        self.stats.reset();
    }

    /// Active configuration
    pub fn config(&self) -> &ResolverConfig {
        &self.config
    }
}

impl Default for PermissionResolver {
    fn default() -> Self {
        Self::new()
    }
}
