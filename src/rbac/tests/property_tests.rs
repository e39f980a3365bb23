//! Property tests for precedence, exclusivity and hierarchy invariants

use cretoai_rbac::catalog::{get_assignable_roles, is_role_higher, is_role_higher_or_equal};
use cretoai_rbac::guard::{
    require_all_permissions, require_any_permission, require_min_role, require_permission,
    require_role,
};
use cretoai_rbac::resolver::{get_all_permissions, has_all_permissions, has_any_permission, has_permission};
use cretoai_rbac::{Permission, PermissionResolver, PermissionSet, Role, UserPermissionRecord};
use proptest::prelude::*;
use std::collections::HashSet;

fn permission() -> impl Strategy<Value = Permission> {
    prop::sample::select(Permission::all())
}

fn role() -> impl Strategy<Value = Role> {
    prop::sample::select(Role::all())
}

fn permission_set() -> impl Strategy<Value = PermissionSet> {
    prop::collection::vec(permission(), 0..12).prop_map(PermissionSet::from)
}

/// Raw records: the override sets may overlap, as an untrusted profile could.
fn record() -> impl Strategy<Value = UserPermissionRecord> {
    (
        prop::collection::hash_set(role(), 0..4),
        permission_set(),
        permission_set(),
    )
        .prop_map(|(roles, custom, denied)| UserPermissionRecord {
            user_id: "prop-user".to_string(),
            roles,
            custom_permissions: custom,
            denied_permissions: denied,
        })
}

#[derive(Debug, Clone, Copy)]
enum Override {
    Grant(Permission),
    Deny(Permission),
    Revoke(Permission),
}

fn override_op() -> impl Strategy<Value = Override> {
    prop_oneof![
        permission().prop_map(Override::Grant),
        permission().prop_map(Override::Deny),
        permission().prop_map(Override::Revoke),
    ]
}

proptest! {
    #[test]
    fn test_precedence_invariant(record in record(), p in permission()) {
        let from_roles = record.roles.iter().any(|r| r.permissions().has(p));
        let expected = (from_roles || record.custom_permissions.has(p))
            && !record.denied_permissions.has(p);

        prop_assert_eq!(has_permission(&record, p), expected);
        prop_assert_eq!(get_all_permissions(&record).has(p), expected);
    }

    #[test]
    fn test_check_variants_agree(record in record(), ps in prop::collection::vec(permission(), 0..6)) {
        let all = ps.iter().all(|p| has_permission(&record, *p));
        let any = ps.iter().any(|p| has_permission(&record, *p));

        prop_assert_eq!(has_all_permissions(&record, &ps), all);
        prop_assert_eq!(has_any_permission(&record, &ps), any);
        prop_assert_eq!(require_all_permissions(ps.clone())(Some(&record)), all);
        prop_assert_eq!(require_any_permission(ps.clone())(Some(&record)), any);
    }

    #[test]
    fn test_override_sets_stay_disjoint(
        roles in prop::collection::hash_set(role(), 0..3),
        ops in prop::collection::vec(override_op(), 1..40),
    ) {
        let resolver = PermissionResolver::new();
        resolver.set_user_permissions(UserPermissionRecord::new("u").with_roles(roles));

        for op in ops {
            match op {
                Override::Grant(p) => { resolver.grant_permission("u", p); }
                Override::Deny(p) => { resolver.deny_permission("u", p); }
                Override::Revoke(p) => { resolver.revoke_permission("u", p); }
            }

            let record = resolver.get_user_permissions("u").unwrap();
            prop_assert!(record.conflicting_permissions().is_empty());

            match op {
                Override::Grant(p) => {
                    prop_assert!(record.custom_permissions.has(p));
                    prop_assert!(!record.denied_permissions.has(p));
                    prop_assert!(resolver.check_permission("u", p));
                }
                Override::Deny(p) => {
                    prop_assert!(record.denied_permissions.has(p));
                    prop_assert!(!record.custom_permissions.has(p));
                    prop_assert!(!resolver.check_permission("u", p));
                }
                Override::Revoke(p) => {
                    prop_assert!(!record.custom_permissions.has(p));
                }
            }
        }
    }

    #[test]
    fn test_revoke_keeps_role_grants(r in role(), p in permission()) {
        prop_assume!(r.permissions().has(p));

        let resolver = PermissionResolver::new();
        resolver.set_user_permissions(UserPermissionRecord::new("u").with_role(r));
        resolver.grant_permission("u", p);
        resolver.revoke_permission("u", p);

        prop_assert!(resolver.check_permission("u", p));
    }

    #[test]
    fn test_hierarchy_antisymmetry(a in role(), b in role()) {
        if a.level() != b.level() {
            prop_assert!(is_role_higher(a, b) ^ is_role_higher(b, a));
        } else {
            prop_assert!(!is_role_higher(a, b) && !is_role_higher(b, a));
        }
        prop_assert_eq!(is_role_higher_or_equal(a, b), !is_role_higher(b, a));
    }

    #[test]
    fn test_assignable_roles_strictly_below(current in role()) {
        let assignable = get_assignable_roles(current);
        prop_assert!(!assignable.contains(&current));
        for r in &assignable {
            prop_assert!(r.level() < current.level());
        }

        let expected: HashSet<Role> = Role::all()
            .iter()
            .copied()
            .filter(|r| r.level() < current.level())
            .collect();
        prop_assert_eq!(assignable, expected);
    }

    #[test]
    fn test_guards_fail_closed(p in permission(), r in role(), ps in prop::collection::vec(permission(), 0..6)) {
        prop_assert!(!require_permission(p)(None));
        prop_assert!(!require_role(r)(None));
        prop_assert!(!require_min_role(r)(None));
        prop_assert!(!require_all_permissions(ps.clone())(None));
        prop_assert!(!require_any_permission(ps)(None));

        let resolver = PermissionResolver::new();
        prop_assert!(!resolver.check_permission("never-registered", p));
    }
}
