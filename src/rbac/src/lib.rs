//! # CretoAI RBAC Engine
//!
//! Role-based permission resolution with per-user overrides.
//!
//! ## Features
//!
//! - **Closed catalogs**: permissions and roles are enums, checked exhaustively
//! - **Bitset permission sets**: union, difference and membership in one instruction
//! - **Deny wins**: `(role grants ∪ custom grants) − denials`, computed in one place
//! - **Sharded cache**: DashMap keyed by user id, one lock per shard
//! - **Fail closed**: unknown users, roles and permissions never grant anything
//! - **Guards**: `Copy` predicates for gating operations
//!
//! ## Example
//!
//! ```rust
//! use cretoai_rbac::{guard, Permission, PermissionResolver, Role, UserPermissionRecord};
//!
//! let resolver = PermissionResolver::new();
//! resolver.set_user_permissions(
//!     UserPermissionRecord::new("alice").with_role(Role::User),
//! );
//!
//! let can_delete = guard::require_permission(Permission::TaskDelete);
//! assert!(!resolver.authorize("alice", &can_delete));
//!
//! resolver.grant_permission("alice", Permission::TaskDelete);
//! assert!(resolver.authorize("alice", &can_delete));
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod guard;
pub mod resolver;
pub mod types;

// Re-export commonly used types
pub use catalog::{is_valid_permission, Permission, PermissionSet, Role};
pub use config::ResolverConfig;
pub use error::{RbacError, Result};
pub use guard::Guard;
pub use resolver::{PermissionResolver, StatsSnapshot};
pub use types::{UserId, UserPermissionRecord};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
