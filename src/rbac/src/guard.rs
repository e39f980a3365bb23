//! Guard builders
//!
//! Each builder closes over one static requirement and returns a predicate
//! over an optional [`UserPermissionRecord`]. An absent record (caller not
//! authenticated, or not in the cache) never passes.
//!
//! Guards hold only `Copy` data, so they can be built once and shared
//! across threads freely.
//!
//! # Example
//!
//! ```rust
//! use cretoai_rbac::guard::{require_any_permission, require_permission};
//! use cretoai_rbac::{Permission, Role, UserPermissionRecord};
//!
//! let can_delete = require_permission(Permission::TaskDelete);
//! let can_review = require_any_permission([Permission::TaskApprove, Permission::TaskReject]);
//!
//! let record = UserPermissionRecord::new("u1").with_role(Role::Approver);
//! assert!(can_review(Some(&record)));
//! assert!(!can_delete(Some(&record)));
//! assert!(!can_review(None));
//! ```

use crate::catalog::{Permission, PermissionSet, Role, RoleSet};
use crate::resolver::effective::{get_all_permissions, has_higher_or_equal_role, has_role};
use crate::types::UserPermissionRecord;

/// Predicate gating an operation on the caller's permission record.
pub trait Guard: Fn(Option<&UserPermissionRecord>) -> bool + Send + Sync {}

impl<F> Guard for F where F: Fn(Option<&UserPermissionRecord>) -> bool + Send + Sync {}

/// Passes if the record effectively holds `permission`.
pub fn require_permission(permission: Permission) -> impl Guard + Copy + 'static {
    move |record: Option<&UserPermissionRecord>| {
        record.is_some_and(|r| get_all_permissions(r).has(permission))
    }
}

/// Passes if the record holds `role` directly.
pub fn require_role(role: Role) -> impl Guard + Copy + 'static {
    move |record: Option<&UserPermissionRecord>| record.is_some_and(|r| has_role(r, role))
}

/// Passes if the record effectively holds every listed permission.
pub fn require_all_permissions(
    permissions: impl IntoIterator<Item = Permission>,
) -> impl Guard + Copy + 'static {
    let required: PermissionSet = permissions.into_iter().collect();
    move |record: Option<&UserPermissionRecord>| {
        record.is_some_and(|r| get_all_permissions(r).contains(required))
    }
}

/// Passes if the record effectively holds at least one listed permission.
pub fn require_any_permission(
    permissions: impl IntoIterator<Item = Permission>,
) -> impl Guard + Copy + 'static {
    let accepted: PermissionSet = permissions.into_iter().collect();
    move |record: Option<&UserPermissionRecord>| {
        record.is_some_and(|r| get_all_permissions(r).intersects(accepted))
    }
}

/// Passes if the record holds at least one listed role.
pub fn require_any_role(roles: impl IntoIterator<Item = Role>) -> impl Guard + Copy + 'static {
    let accepted: RoleSet = roles.into_iter().collect();
    move |record: Option<&UserPermissionRecord>| {
        record.is_some_and(|r| r.roles.iter().any(|role| accepted.contains(role.flag())))
    }
}

/// Passes if the record's highest role is at or above `role` in the hierarchy.
pub fn require_min_role(role: Role) -> impl Guard + Copy + 'static {
    move |record: Option<&UserPermissionRecord>| {
        record.is_some_and(|r| has_higher_or_equal_role(r, role))
    }
}
