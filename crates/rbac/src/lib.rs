//! # Okta Role Manager RBAC
//!
//! Role manager for authorization engines that resolves role inheritance
//! against the Okta directory instead of an in-memory hierarchy.
//!
//! ## Components
//!
//! - `RoleManager` - Role hierarchy contract
//! - `DirectoryRoleManager` - Directory-backed implementation

pub mod directory_role_manager;
pub mod role_manager;

pub use directory_role_manager::DirectoryRoleManager;
pub use role_manager::RoleManager;
