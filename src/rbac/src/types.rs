//! Core RBAC types

use crate::catalog::{Permission, PermissionSet, Role};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Unique user identifier
pub type UserId = String;

/// Per-user permission record, the unit of caching in the resolver.
///
/// A permission is effectively held iff it comes from a role or from
/// `custom_permissions`, and is not in `denied_permissions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPermissionRecord {
    /// Record key
    pub user_id: UserId,

    /// Assigned roles
    pub roles: HashSet<Role>,

    /// Permissions granted outside of any role
    #[serde(default)]
    pub custom_permissions: PermissionSet,

    /// Permissions withheld regardless of source
    #[serde(default)]
    pub denied_permissions: PermissionSet,
}

impl UserPermissionRecord {
    /// Create a record with no roles and no overrides
    pub fn new(user_id: impl Into<UserId>) -> Self {
        Self {
            user_id: user_id.into(),
            roles: HashSet::new(),
            custom_permissions: PermissionSet::empty(),
            denied_permissions: PermissionSet::empty(),
        }
    }

    /// Add a role
    pub fn with_role(mut self, role: Role) -> Self {
        self.roles.insert(role);
        self
    }

    /// Add several roles
    pub fn with_roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.roles.extend(roles);
        self
    }

    /// Grant a permission outside of any role.
    ///
    /// Clears a matching denial so the two override sets stay disjoint.
    pub fn with_custom_permission(mut self, permission: Permission) -> Self {
        self.custom_permissions.insert(permission.flag());
        self.denied_permissions.remove(permission.flag());
        self
    }

    /// Deny a permission.
    ///
    /// Clears a matching custom grant so the two override sets stay disjoint.
    pub fn with_denied_permission(mut self, permission: Permission) -> Self {
        self.denied_permissions.insert(permission.flag());
        self.custom_permissions.remove(permission.flag());
        self
    }

    /// Permissions present in both override sets.
    pub fn conflicting_permissions(&self) -> PermissionSet {
        self.custom_permissions.intersection(self.denied_permissions)
    }

    /// Drop custom grants that are also denied. Returns what was dropped.
    ///
    /// Denial already wins, so the effective permission set is unchanged.
    pub fn normalize(&mut self) -> PermissionSet {
        let conflicts = self.conflicting_permissions();
        self.custom_permissions = self.custom_permissions.difference(conflicts);
        conflicts
    }
}
