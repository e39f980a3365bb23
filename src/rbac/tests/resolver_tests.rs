//! Resolver behavior tests
//!
//! End-to-end scenarios through the public API: record lifecycle,
//! grant/deny/revoke precedence, role hierarchy and guards.

use cretoai_rbac::catalog::{get_assignable_roles, is_role_higher};
use cretoai_rbac::guard::{
    require_all_permissions, require_any_permission, require_min_role, require_permission,
    require_role,
};
use cretoai_rbac::resolver::{get_all_permissions, has_higher_role};
use cretoai_rbac::{Permission, PermissionResolver, Role, UserPermissionRecord};

fn resolver_with(record: UserPermissionRecord) -> PermissionResolver {
    let resolver = PermissionResolver::new();
    resolver.set_user_permissions(record);
    resolver
}

// ============================================================================
// DOCUMENTED SCENARIOS
// ============================================================================

#[test]
fn test_deny_then_grant_scenario() {
    let resolver = resolver_with(UserPermissionRecord::new("u1").with_role(Role::User));

    assert!(resolver.check_permission("u1", Permission::TaskView));
    assert!(!resolver.check_permission("u1", Permission::TaskDelete));

    resolver.deny_permission("u1", Permission::TaskView);
    assert!(!resolver.check_permission("u1", Permission::TaskView));

    resolver.grant_permission("u1", Permission::TaskView);
    assert!(resolver.check_permission("u1", Permission::TaskView));

    let record = resolver.get_user_permissions("u1").unwrap();
    assert!(!record.denied_permissions.has(Permission::TaskView));
}

#[test]
fn test_add_role_raises_level_scenario() {
    let resolver = resolver_with(UserPermissionRecord::new("u1").with_role(Role::User));

    let before = resolver.get_user_permissions("u1").unwrap();
    assert!(!has_higher_role(&before, Role::User));

    resolver.add_role("u1", Role::Creator);

    let after = resolver.get_user_permissions("u1").unwrap();
    assert!(has_higher_role(&after, Role::User));
}

// ============================================================================
// PRECEDENCE
// ============================================================================

#[test]
fn test_revoke_does_not_strip_role_grant() {
    let resolver = resolver_with(UserPermissionRecord::new("u1").with_role(Role::Creator));

    resolver.grant_permission("u1", Permission::TaskDelete);
    resolver.revoke_permission("u1", Permission::TaskDelete);

    assert!(resolver.check_permission("u1", Permission::TaskDelete));
}

#[test]
fn test_revoke_strips_custom_only_grant() {
    let resolver = resolver_with(UserPermissionRecord::new("u1").with_role(Role::User));

    resolver.grant_permission("u1", Permission::SystemAudit);
    assert!(resolver.check_permission("u1", Permission::SystemAudit));

    resolver.revoke_permission("u1", Permission::SystemAudit);
    assert!(!resolver.check_permission("u1", Permission::SystemAudit));
}

#[test]
fn test_denial_survives_role_changes() {
    let resolver = resolver_with(UserPermissionRecord::new("u1").with_role(Role::User));
    resolver.deny_permission("u1", Permission::WorkflowCreate);

    resolver.add_role("u1", Role::Manager);
    assert!(!resolver.check_permission("u1", Permission::WorkflowCreate));
    assert!(resolver.check_permission("u1", Permission::WorkflowDelete));
}

#[test]
fn test_last_of_grant_and_deny_wins() {
    let resolver = resolver_with(UserPermissionRecord::new("u1"));

    resolver.grant_permission("u1", Permission::ReportExport);
    resolver.deny_permission("u1", Permission::ReportExport);
    let record = resolver.get_user_permissions("u1").unwrap();
    assert!(record.denied_permissions.has(Permission::ReportExport));
    assert!(!record.custom_permissions.has(Permission::ReportExport));

    resolver.grant_permission("u1", Permission::ReportExport);
    let record = resolver.get_user_permissions("u1").unwrap();
    assert!(record.custom_permissions.has(Permission::ReportExport));
    assert!(!record.denied_permissions.has(Permission::ReportExport));
}

#[test]
fn test_admin_with_denial() {
    let resolver = resolver_with(
        UserPermissionRecord::new("root")
            .with_role(Role::Admin)
            .with_denied_permission(Permission::SystemSettings),
    );

    let effective = resolver.effective_permissions("root");
    assert_eq!(effective.len(), Permission::COUNT - 1);
    assert!(!effective.has(Permission::SystemSettings));
}

#[test]
fn test_resolver_matches_pure_functions() {
    let record = UserPermissionRecord::new("u1")
        .with_roles([Role::Automation, Role::User])
        .with_custom_permission(Permission::ReportExport)
        .with_denied_permission(Permission::TaskCreate);
    let resolver = resolver_with(record.clone());

    assert_eq!(resolver.effective_permissions("u1"), get_all_permissions(&record));
}

// ============================================================================
// UNKNOWN USERS
// ============================================================================

#[test]
fn test_unknown_user_distinct_from_empty_record() {
    let resolver = resolver_with(UserPermissionRecord::new("empty"));

    assert!(resolver.get_user_permissions("ghost").is_none());
    assert!(resolver.get_user_permissions("empty").is_some());

    assert!(!resolver.check_permission("ghost", Permission::TaskView));
    assert!(!resolver.check_permission("empty", Permission::TaskView));
}

#[test]
fn test_mutation_does_not_create_record() {
    let resolver = PermissionResolver::new();
    resolver.grant_permission("ghost", Permission::TaskView);
    resolver.add_role("ghost", Role::Admin);

    assert!(resolver.get_user_permissions("ghost").is_none());
    assert!(!resolver.check_permission("ghost", Permission::TaskView));
}

#[test]
fn test_cleared_user_loses_access() {
    let resolver = resolver_with(UserPermissionRecord::new("u1").with_role(Role::Admin));
    let guard = require_role(Role::Admin);

    assert!(resolver.authorize("u1", &guard));
    resolver.clear_user_permissions("u1");
    assert!(!resolver.authorize("u1", &guard));
}

// ============================================================================
// HIERARCHY AND GUARDS
// ============================================================================

#[test]
fn test_manager_assignment_bounds() {
    let assignable = get_assignable_roles(Role::Manager);
    assert!(assignable.contains(&Role::Approver));
    assert!(!assignable.contains(&Role::Manager));
    assert!(!assignable.contains(&Role::Admin));
    assert!(assignable.iter().all(|role| is_role_higher(Role::Manager, *role)));
}

#[test]
fn test_guards_through_resolver() {
    let resolver = resolver_with(UserPermissionRecord::new("ap").with_role(Role::Approver));

    let review = require_any_permission([Permission::TaskApprove, Permission::TaskReject]);
    let author = require_all_permissions([Permission::WorkflowCreate, Permission::WorkflowEdit]);
    let senior = require_min_role(Role::Creator);
    let delete = require_permission(Permission::TaskDelete);

    assert!(resolver.authorize("ap", &review));
    assert!(!resolver.authorize("ap", &author));
    assert!(resolver.authorize("ap", &senior));
    assert!(!resolver.authorize("ap", &delete));

    assert!(!resolver.authorize("nobody", &review));
    assert!(!resolver.authorize("nobody", &senior));
}

#[test]
fn test_stats_track_checks() {
    let resolver = resolver_with(UserPermissionRecord::new("u1").with_role(Role::User));

    resolver.check_permission("u1", Permission::TaskView);
    resolver.check_permission("u1", Permission::TaskDelete);
    resolver.check_permission("ghost", Permission::TaskView);

    let stats = resolver.stats();
    assert_eq!(stats.records_set, 1);
    assert_eq!(stats.checks, 3);
    assert_eq!(stats.checks_denied, 2);

    resolver.reset_stats();
    assert_eq!(resolver.stats().checks, 0);
}
