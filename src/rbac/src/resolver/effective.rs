//! Effective permission computation
//!
//! Pure functions over a [`UserPermissionRecord`]. [`get_all_permissions`]
//! is the only place the precedence rule lives; every permission check is a
//! predicate over its result.

use crate::catalog::{Permission, PermissionSet, Role};
use crate::types::UserPermissionRecord;
use std::collections::HashSet;

/// Union of the permission sets of `roles`.
pub fn role_permissions(roles: &HashSet<Role>) -> PermissionSet {
    roles
        .iter()
        .fold(PermissionSet::empty(), |acc, role| acc.union(role.permissions()))
}

/// Effective permissions: (role grants ∪ custom grants) − denials.
pub fn get_all_permissions(record: &UserPermissionRecord) -> PermissionSet {
    role_permissions(&record.roles)
        .union(record.custom_permissions)
        .difference(record.denied_permissions)
}

/// Returns `true` if `permission` is effectively held.
pub fn has_permission(record: &UserPermissionRecord, permission: Permission) -> bool {
    get_all_permissions(record).has(permission)
}

/// AND semantics. An empty requirement list is satisfied.
pub fn has_all_permissions(record: &UserPermissionRecord, permissions: &[Permission]) -> bool {
    get_all_permissions(record).contains_all(permissions)
}

/// OR semantics. An empty requirement list is never satisfied.
pub fn has_any_permission(record: &UserPermissionRecord, permissions: &[Permission]) -> bool {
    get_all_permissions(record).contains_any(permissions)
}

/// Direct role membership; not related to permission resolution.
pub fn has_role(record: &UserPermissionRecord, role: Role) -> bool {
    record.roles.contains(&role)
}

/// Returns `true` if the record holds every listed role.
pub fn has_all_roles(record: &UserPermissionRecord, roles: &[Role]) -> bool {
    roles.iter().all(|role| record.roles.contains(role))
}

/// Returns `true` if the record holds at least one listed role.
pub fn has_any_role(record: &UserPermissionRecord, roles: &[Role]) -> bool {
    roles.iter().any(|role| record.roles.contains(role))
}

/// Highest hierarchy level among the record's roles.
///
/// `None` for an empty role set. `None` orders below `Some(0)`, so a user
/// without roles ranks beneath every real role, including the lowest.
pub fn effective_level(record: &UserPermissionRecord) -> Option<u32> {
    record.roles.iter().map(Role::level).max()
}

/// Returns `true` if the record's highest role outranks `target`.
pub fn has_higher_role(record: &UserPermissionRecord, target: Role) -> bool {
    effective_level(record) > Some(target.level())
}

/// Returns `true` if the record's highest role is at least `target`.
pub fn has_higher_or_equal_role(record: &UserPermissionRecord, target: Role) -> bool {
    effective_level(record) >= Some(target.level())
}
