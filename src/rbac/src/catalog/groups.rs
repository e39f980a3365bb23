//! Named permission groups
//!
//! Groups are authoring shorthand for the role table. They are plain
//! constants, expanded when the role catalog is built, and have no identity
//! at runtime. A group may only extend groups declared above it, so the
//! inclusion graph is acyclic by construction.

use super::permission::PermissionSet;

/// Read-only access granted without logging in.
pub const PUBLIC_READ: PermissionSet = PermissionSet::TASK_VIEW
    .union(PermissionSet::COMMENT_VIEW)
    .union(PermissionSet::REPORT_VIEW);

/// Day-to-day work on one's own tasks.
pub const USER_BASIC: PermissionSet = PermissionSet::TASK_VIEW
    .union(PermissionSet::TASK_CREATE)
    .union(PermissionSet::COMMENT_VIEW)
    .union(PermissionSet::COMMENT_CREATE)
    .union(PermissionSet::WORKFLOW_VIEW)
    .union(PermissionSet::REPORT_VIEW);

/// [`USER_BASIC`] plus editing, assignment and export.
pub const USER_FULL: PermissionSet = USER_BASIC
    .union(PermissionSet::TASK_EDIT)
    .union(PermissionSet::TASK_ASSIGN)
    .union(PermissionSet::TASK_EXPORT)
    .union(PermissionSet::REPORT_EXPORT)
    .union(PermissionSet::USER_VIEW);

/// [`USER_FULL`] plus workflow authoring and task deletion.
pub const CREATOR: PermissionSet = USER_FULL
    .union(PermissionSet::TASK_DELETE)
    .union(PermissionSet::WORKFLOW_CREATE)
    .union(PermissionSet::WORKFLOW_EDIT)
    .union(PermissionSet::WORKFLOW_EXECUTE);

/// [`USER_FULL`] plus the review decisions.
pub const APPROVER: PermissionSet = USER_FULL
    .union(PermissionSet::TASK_APPROVE)
    .union(PermissionSet::TASK_REJECT)
    .union(PermissionSet::COMMENT_DELETE);

/// Service accounts driving workflows and integrations.
pub const AUTOMATION: PermissionSet = PermissionSet::TASK_VIEW
    .union(PermissionSet::TASK_CREATE)
    .union(PermissionSet::TASK_EDIT)
    .union(PermissionSet::WORKFLOW_VIEW)
    .union(PermissionSet::WORKFLOW_EXECUTE)
    .union(PermissionSet::SYSTEM_INTEGRATIONS);

/// Team administration on top of authoring and review.
pub const MANAGER: PermissionSet = CREATOR
    .union(APPROVER)
    .union(PermissionSet::WORKFLOW_DELETE)
    .union(PermissionSet::USER_INVITE)
    .union(PermissionSet::ROLE_VIEW)
    .union(PermissionSet::ROLE_ASSIGN);

/// Every permission in the catalog.
pub const ADMIN: PermissionSet = PermissionSet::all();
