//! Role catalog
//!
//! Static mapping from each [`Role`] to its permission set, hierarchy level
//! and display description. The table is fixed at compile time.

use super::groups;
use super::permission::PermissionSet;
use crate::error::RbacError;
use bitflags::bitflags;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

/// Predefined roles.
///
/// Serialized as the lowercase name. Every boundary (serde, `FromStr`)
/// accepts names in any ASCII case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    /// Anonymous visitor, read-only public data.
    Guest,
    /// Regular signed-in user.
    User,
    /// Service account that runs workflows.
    Automation,
    /// Authors tasks and workflows.
    Creator,
    /// Reviews and decides on submitted tasks.
    Approver,
    /// Runs a team: authoring, review and role assignment.
    Manager,
    /// Complete system access.
    Admin,
}

/// Role assigned to newly registered users.
pub const DEFAULT_ROLE: Role = Role::User;

/// Roles available to callers that have not logged in.
pub const PUBLIC_ROLES: &[Role] = &[Role::Guest];

const ALL_ROLES: [Role; 7] = [
    Role::Guest,
    Role::User,
    Role::Automation,
    Role::Creator,
    Role::Approver,
    Role::Manager,
    Role::Admin,
];

bitflags! {
    /// A compact set of roles, one bit per [`Role`].
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct RoleSet: u8 {
        const GUEST      = 1 << 0;
        const USER       = 1 << 1;
        const AUTOMATION = 1 << 2;
        const CREATOR    = 1 << 3;
        const APPROVER   = 1 << 4;
        const MANAGER    = 1 << 5;
        const ADMIN      = 1 << 6;
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        iter.into_iter()
            .fold(RoleSet::empty(), |set, role| set.union(role.flag()))
    }
}

/// Display metadata for a role. Not semantically significant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoleDescription {
    /// Display name
    pub name: &'static str,
    /// One-line summary
    pub summary: &'static str,
}

impl Role {
    /// Returns the role name as a string.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Guest => "guest",
            Role::User => "user",
            Role::Automation => "automation",
            Role::Creator => "creator",
            Role::Approver => "approver",
            Role::Manager => "manager",
            Role::Admin => "admin",
        }
    }

    /// Parses a role name, ignoring ASCII case.
    pub fn parse(s: &str) -> Option<Self> {
        ALL_ROLES
            .iter()
            .copied()
            .find(|role| role.as_str().eq_ignore_ascii_case(s))
    }

    /// Returns all roles, lowest level first.
    pub fn all() -> &'static [Role] {
        &ALL_ROLES
    }

    /// Hierarchy level; higher is more privileged. Only relative order matters.
    pub const fn level(&self) -> u32 {
        match self {
            Role::Guest => 0,
            Role::User => 10,
            Role::Automation => 20,
            Role::Creator => 30,
            Role::Approver => 40,
            Role::Manager => 50,
            Role::Admin => 100,
        }
    }

    /// Permissions every holder of this role receives.
    pub const fn permissions(&self) -> PermissionSet {
        match self {
            Role::Guest => groups::PUBLIC_READ,
            Role::User => groups::USER_BASIC,
            Role::Automation => groups::AUTOMATION,
            Role::Creator => groups::CREATOR,
            Role::Approver => groups::APPROVER,
            Role::Manager => groups::MANAGER,
            Role::Admin => groups::ADMIN,
        }
    }

    /// Display name and summary.
    pub const fn description(&self) -> RoleDescription {
        let (name, summary) = match self {
            Role::Guest => ("Guest", "Read-only access to public tasks and reports"),
            Role::User => ("User", "Creates and follows up on their own tasks"),
            Role::Automation => ("Automation", "Service account that executes workflows"),
            Role::Creator => ("Creator", "Authors tasks and workflows"),
            Role::Approver => ("Approver", "Approves or rejects submitted tasks"),
            Role::Manager => ("Manager", "Leads a team and assigns roles below their own"),
            Role::Admin => ("Administrator", "Complete system administration access"),
        };
        RoleDescription { name, summary }
    }

    /// Returns the single-flag [`RoleSet`] for this role.
    pub const fn flag(self) -> RoleSet {
        match self {
            Role::Guest => RoleSet::GUEST,
            Role::User => RoleSet::USER,
            Role::Automation => RoleSet::AUTOMATION,
            Role::Creator => RoleSet::CREATOR,
            Role::Approver => RoleSet::APPROVER,
            Role::Manager => RoleSet::MANAGER,
            Role::Admin => RoleSet::ADMIN,
        }
    }

    /// Returns `true` for roles usable without logging in.
    pub fn is_public(&self) -> bool {
        PUBLIC_ROLES.contains(self)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = RbacError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| RbacError::UnknownRole(s.to_string()))
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Role::parse(&raw).ok_or_else(|| de::Error::custom(format!("unknown role '{}'", raw)))
    }
}

// =============================================================================
// Catalog Lookups
// =============================================================================

/// Returns the static permission set for `role`.
pub fn get_role_permissions(role: Role) -> PermissionSet {
    role.permissions()
}

/// Looks a role up by name. Unknown names carry no permissions.
pub fn role_permissions_by_name(name: &str) -> PermissionSet {
    Role::parse(name)
        .map(|role| role.permissions())
        .unwrap_or(PermissionSet::empty())
}

/// Returns `true` if `a` is strictly more privileged than `b`.
pub fn is_role_higher(a: Role, b: Role) -> bool {
    a.level() > b.level()
}

/// Returns `true` if `a` is at least as privileged as `b`.
pub fn is_role_higher_or_equal(a: Role, b: Role) -> bool {
    a.level() >= b.level()
}

/// Roles a holder of `current` may hand out: every role strictly below it.
pub fn get_assignable_roles(current: Role) -> HashSet<Role> {
    ALL_ROLES
        .iter()
        .copied()
        .filter(|role| is_role_higher(current, *role))
        .collect()
}

/// Returns `true` if a holder of `assigner` may grant `target` to someone else.
pub fn can_assign_role(assigner: Role, target: Role) -> bool {
    is_role_higher(assigner, target)
}
