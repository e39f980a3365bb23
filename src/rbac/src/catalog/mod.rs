//! Static permission and role catalogs
//!
//! Provides the closed permission enumeration, the named groups used to
//! author role mappings, and the role table with hierarchy levels.
//!
//! # Example
//!
//! ```rust
//! use cretoai_rbac::catalog::{get_assignable_roles, is_valid_permission, Permission, Role};
//!
//! assert!(is_valid_permission("task:create"));
//! assert!(Role::Creator.permissions().has(Permission::WorkflowCreate));
//! assert!(!get_assignable_roles(Role::Manager).contains(&Role::Admin));
//! ```

pub mod groups;
pub mod permission;
pub mod role;

pub use permission::{is_valid_permission, Permission, PermissionSet};
pub use role::{
    can_assign_role, get_assignable_roles, get_role_permissions, is_role_higher,
    is_role_higher_or_equal, role_permissions_by_name, Role, RoleDescription, RoleSet,
    DEFAULT_ROLE, PUBLIC_ROLES,
};

use serde::Serialize;

/// Version of the compiled-in catalog tables. Bump on any change to
/// permissions, groups, role mappings or levels.
pub const CATALOG_VERSION: &str = "2024.1";

/// One role row of the manifest.
#[derive(Debug, Clone, Serialize)]
pub struct RoleEntry {
    pub role: Role,
    pub level: u32,
    pub name: &'static str,
    pub description: &'static str,
    pub permissions: PermissionSet,
}

/// One permission row of the manifest.
#[derive(Debug, Clone, Serialize)]
pub struct PermissionEntry {
    pub permission: Permission,
    pub domain: &'static str,
    pub description: &'static str,
}

/// Read-only export of both catalogs, suitable for display and for diffing
/// catalog versions between deployments.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogManifest {
    pub version: &'static str,
    pub default_role: Role,
    pub public_roles: Vec<Role>,
    pub roles: Vec<RoleEntry>,
    pub permissions: Vec<PermissionEntry>,
}

impl CatalogManifest {
    /// Renders the manifest as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Builds the manifest from the static tables.
pub fn manifest() -> CatalogManifest {
    let roles = Role::all()
        .iter()
        .map(|role| {
            let description = role.description();
            RoleEntry {
                role: *role,
                level: role.level(),
                name: description.name,
                description: description.summary,
                permissions: role.permissions(),
            }
        })
        .collect();

    let permissions = Permission::all()
        .iter()
        .map(|permission| PermissionEntry {
            permission: *permission,
            domain: permission.domain(),
            description: permission.description(),
        })
        .collect();

    CatalogManifest {
        version: CATALOG_VERSION,
        default_role: DEFAULT_ROLE,
        public_roles: PUBLIC_ROLES.to_vec(),
        roles,
        permissions,
    }
}
