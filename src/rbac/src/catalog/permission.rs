//! Permission catalog
//!
//! The closed set of atomic permissions known to the engine, and
//! [`PermissionSet`], the bitflags set each permission maps onto.

use crate::error::RbacError;
use bitflags::bitflags;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Atomic permission in `domain:action` form.
///
/// Variants are declared in catalog order. Each maps onto one flag of
/// [`PermissionSet`] through [`Permission::flag`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Permission {
    // =========================================================================
    // Task Permissions
    // =========================================================================
    TaskView,
    TaskCreate,
    TaskEdit,
    TaskDelete,
    TaskAssign,
    TaskApprove,
    TaskReject,
    TaskExport,

    // =========================================================================
    // Comment Permissions
    // =========================================================================
    CommentView,
    CommentCreate,
    CommentDelete,

    // =========================================================================
    // Workflow Permissions
    // =========================================================================
    WorkflowView,
    WorkflowCreate,
    WorkflowEdit,
    WorkflowExecute,
    WorkflowDelete,

    // =========================================================================
    // Report Permissions
    // =========================================================================
    ReportView,
    ReportExport,

    // =========================================================================
    // User and Role Administration
    // =========================================================================
    UserView,
    UserInvite,
    UserManage,
    RoleView,
    RoleAssign,

    // =========================================================================
    // System Permissions
    // =========================================================================
    SystemSettings,
    SystemAudit,
    SystemIntegrations,
}

const ALL_PERMISSIONS: &[Permission] = &[
    Permission::TaskView,
    Permission::TaskCreate,
    Permission::TaskEdit,
    Permission::TaskDelete,
    Permission::TaskAssign,
    Permission::TaskApprove,
    Permission::TaskReject,
    Permission::TaskExport,
    Permission::CommentView,
    Permission::CommentCreate,
    Permission::CommentDelete,
    Permission::WorkflowView,
    Permission::WorkflowCreate,
    Permission::WorkflowEdit,
    Permission::WorkflowExecute,
    Permission::WorkflowDelete,
    Permission::ReportView,
    Permission::ReportExport,
    Permission::UserView,
    Permission::UserInvite,
    Permission::UserManage,
    Permission::RoleView,
    Permission::RoleAssign,
    Permission::SystemSettings,
    Permission::SystemAudit,
    Permission::SystemIntegrations,
];

// One declared flag per catalog entry.
const _: () = assert!(PermissionSet::all().len() == Permission::COUNT);

impl Permission {
    /// Number of permissions in the catalog.
    pub const COUNT: usize = ALL_PERMISSIONS.len();

    /// Returns the wire form (`domain:action`).
    pub const fn as_str(&self) -> &'static str {
        match self {
            Permission::TaskView => "task:view",
            Permission::TaskCreate => "task:create",
            Permission::TaskEdit => "task:edit",
            Permission::TaskDelete => "task:delete",
            Permission::TaskAssign => "task:assign",
            Permission::TaskApprove => "task:approve",
            Permission::TaskReject => "task:reject",
            Permission::TaskExport => "task:export",
            Permission::CommentView => "comment:view",
            Permission::CommentCreate => "comment:create",
            Permission::CommentDelete => "comment:delete",
            Permission::WorkflowView => "workflow:view",
            Permission::WorkflowCreate => "workflow:create",
            Permission::WorkflowEdit => "workflow:edit",
            Permission::WorkflowExecute => "workflow:execute",
            Permission::WorkflowDelete => "workflow:delete",
            Permission::ReportView => "report:view",
            Permission::ReportExport => "report:export",
            Permission::UserView => "user:view",
            Permission::UserInvite => "user:invite",
            Permission::UserManage => "user:manage",
            Permission::RoleView => "role:view",
            Permission::RoleAssign => "role:assign",
            Permission::SystemSettings => "system:settings",
            Permission::SystemAudit => "system:audit",
            Permission::SystemIntegrations => "system:integrations",
        }
    }

    /// Parses the wire form. Unknown or malformed strings yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        ALL_PERMISSIONS.iter().copied().find(|p| p.as_str() == s)
    }

    /// Returns every permission in catalog order.
    pub fn all() -> &'static [Permission] {
        ALL_PERMISSIONS
    }

    /// Returns the domain half of the identifier (`task` for `task:view`).
    pub fn domain(&self) -> &'static str {
        match self.as_str().split_once(':') {
            Some((domain, _)) => domain,
            None => self.as_str(),
        }
    }

    /// Returns the action half of the identifier (`view` for `task:view`).
    pub fn action(&self) -> &'static str {
        match self.as_str().split_once(':') {
            Some((_, action)) => action,
            None => self.as_str(),
        }
    }

    /// Human-readable description for display.
    pub fn description(&self) -> &'static str {
        match self {
            Permission::TaskView => "View tasks and their details",
            Permission::TaskCreate => "Create new tasks",
            Permission::TaskEdit => "Edit existing tasks",
            Permission::TaskDelete => "Delete tasks",
            Permission::TaskAssign => "Assign tasks to users",
            Permission::TaskApprove => "Approve submitted tasks",
            Permission::TaskReject => "Reject submitted tasks",
            Permission::TaskExport => "Export task data",
            Permission::CommentView => "Read comments",
            Permission::CommentCreate => "Post comments",
            Permission::CommentDelete => "Delete any comment",
            Permission::WorkflowView => "View workflow definitions",
            Permission::WorkflowCreate => "Create workflows",
            Permission::WorkflowEdit => "Edit workflows",
            Permission::WorkflowExecute => "Run workflows",
            Permission::WorkflowDelete => "Delete workflows",
            Permission::ReportView => "View reports",
            Permission::ReportExport => "Export reports",
            Permission::UserView => "View user profiles",
            Permission::UserInvite => "Invite new users",
            Permission::UserManage => "Create, update and deactivate users",
            Permission::RoleView => "View role assignments",
            Permission::RoleAssign => "Assign roles to users",
            Permission::SystemSettings => "Change system settings",
            Permission::SystemAudit => "Read the audit trail",
            Permission::SystemIntegrations => "Manage external integrations",
        }
    }

    /// Returns the single-flag [`PermissionSet`] for this permission.
    pub const fn flag(self) -> PermissionSet {
        match self {
            Permission::TaskView => PermissionSet::TASK_VIEW,
            Permission::TaskCreate => PermissionSet::TASK_CREATE,
            Permission::TaskEdit => PermissionSet::TASK_EDIT,
            Permission::TaskDelete => PermissionSet::TASK_DELETE,
            Permission::TaskAssign => PermissionSet::TASK_ASSIGN,
            Permission::TaskApprove => PermissionSet::TASK_APPROVE,
            Permission::TaskReject => PermissionSet::TASK_REJECT,
            Permission::TaskExport => PermissionSet::TASK_EXPORT,
            Permission::CommentView => PermissionSet::COMMENT_VIEW,
            Permission::CommentCreate => PermissionSet::COMMENT_CREATE,
            Permission::CommentDelete => PermissionSet::COMMENT_DELETE,
            Permission::WorkflowView => PermissionSet::WORKFLOW_VIEW,
            Permission::WorkflowCreate => PermissionSet::WORKFLOW_CREATE,
            Permission::WorkflowEdit => PermissionSet::WORKFLOW_EDIT,
            Permission::WorkflowExecute => PermissionSet::WORKFLOW_EXECUTE,
            Permission::WorkflowDelete => PermissionSet::WORKFLOW_DELETE,
            Permission::ReportView => PermissionSet::REPORT_VIEW,
            Permission::ReportExport => PermissionSet::REPORT_EXPORT,
            Permission::UserView => PermissionSet::USER_VIEW,
            Permission::UserInvite => PermissionSet::USER_INVITE,
            Permission::UserManage => PermissionSet::USER_MANAGE,
            Permission::RoleView => PermissionSet::ROLE_VIEW,
            Permission::RoleAssign => PermissionSet::ROLE_ASSIGN,
            Permission::SystemSettings => PermissionSet::SYSTEM_SETTINGS,
            Permission::SystemAudit => PermissionSet::SYSTEM_AUDIT,
            Permission::SystemIntegrations => PermissionSet::SYSTEM_INTEGRATIONS,
        }
    }
}

/// Returns `true` iff `value` names a permission in the catalog.
pub fn is_valid_permission(value: &str) -> bool {
    Permission::parse(value).is_some()
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Permission {
    type Err = RbacError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| RbacError::UnknownPermission(s.to_string()))
    }
}

impl Serialize for Permission {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Permission {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Permission::parse(&raw)
            .ok_or_else(|| de::Error::custom(format!("unknown permission '{}'", raw)))
    }
}

// =============================================================================
// Permission Set
// =============================================================================

bitflags! {
    /// A set of permissions represented as a 64-bit bitfield.
    ///
    /// The `const` set operations let permission groups be defined as
    /// constants. Serialized as a list of wire strings in catalog order.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(from = "Vec<Permission>", into = "Vec<Permission>")]
    pub struct PermissionSet: u64 {
        // === Task (bits 0-7) ===
        const TASK_VIEW           = 1 << 0;
        const TASK_CREATE         = 1 << 1;
        const TASK_EDIT           = 1 << 2;
        const TASK_DELETE         = 1 << 3;
        const TASK_ASSIGN         = 1 << 4;
        const TASK_APPROVE        = 1 << 5;
        const TASK_REJECT         = 1 << 6;
        const TASK_EXPORT         = 1 << 7;

        // === Comment (bits 8-10) ===
        const COMMENT_VIEW        = 1 << 8;
        const COMMENT_CREATE      = 1 << 9;
        const COMMENT_DELETE      = 1 << 10;

        // === Workflow (bits 11-15) ===
        const WORKFLOW_VIEW       = 1 << 11;
        const WORKFLOW_CREATE     = 1 << 12;
        const WORKFLOW_EDIT       = 1 << 13;
        const WORKFLOW_EXECUTE    = 1 << 14;
        const WORKFLOW_DELETE     = 1 << 15;

        // === Report (bits 16-17) ===
        const REPORT_VIEW         = 1 << 16;
        const REPORT_EXPORT       = 1 << 17;

        // === User and Role Administration (bits 18-22) ===
        const USER_VIEW           = 1 << 18;
        const USER_INVITE         = 1 << 19;
        const USER_MANAGE         = 1 << 20;
        const ROLE_VIEW           = 1 << 21;
        const ROLE_ASSIGN         = 1 << 22;

        // === System (bits 23-25) ===
        const SYSTEM_SETTINGS     = 1 << 23;
        const SYSTEM_AUDIT        = 1 << 24;
        const SYSTEM_INTEGRATIONS = 1 << 25;
    }
}

impl PermissionSet {
    /// Returns `true` if the set contains the given permission.
    pub const fn has(&self, permission: Permission) -> bool {
        self.contains(permission.flag())
    }

    /// Returns `true` if the set contains all of the given permissions.
    pub fn contains_all(&self, permissions: &[Permission]) -> bool {
        self.contains(permissions.iter().copied().collect())
    }

    /// Returns `true` if the set contains any of the given permissions.
    pub fn contains_any(&self, permissions: &[Permission]) -> bool {
        self.intersects(permissions.iter().copied().collect())
    }

    /// Returns the number of permissions in the set.
    pub const fn len(&self) -> usize {
        self.bits().count_ones() as usize
    }

    /// Iterates the set as [`Permission`] values in catalog order.
    pub fn permissions(&self) -> impl Iterator<Item = Permission> {
        let set = *self;
        ALL_PERMISSIONS.iter().copied().filter(move |p| set.has(*p))
    }

    /// Collects the wire strings in catalog order.
    pub fn to_strings(&self) -> Vec<&'static str> {
        self.permissions().map(|p| p.as_str()).collect()
    }
}

impl From<Permission> for PermissionSet {
    fn from(permission: Permission) -> Self {
        permission.flag()
    }
}

impl FromIterator<Permission> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = Permission>>(iter: I) -> Self {
        iter.into_iter()
            .fold(PermissionSet::empty(), |set, p| set.union(p.flag()))
    }
}

impl Extend<Permission> for PermissionSet {
    fn extend<I: IntoIterator<Item = Permission>>(&mut self, iter: I) {
        for permission in iter {
            self.insert(permission.flag());
        }
    }
}

impl From<Vec<Permission>> for PermissionSet {
    fn from(permissions: Vec<Permission>) -> Self {
        permissions.into_iter().collect()
    }
}

impl From<PermissionSet> for Vec<Permission> {
    fn from(set: PermissionSet) -> Self {
        set.permissions().collect()
    }
}

impl<const N: usize> From<[Permission; N]> for PermissionSet {
    fn from(permissions: [Permission; N]) -> Self {
        permissions.into_iter().collect()
    }
}
