//! # Okta Role Manager Directory
//!
//! Read-only access to the user and group directory.
//!
//! ## Components
//!
//! - `DirectoryClient` - Directory client contract
//! - `OktaClient` - Okta Management API client
//! - `InMemoryDirectory` - In-memory directory for tests and development
//! - `DirectoryUser` / `DirectoryGroup` - Validated projections of raw records

pub mod client;
pub mod in_memory;
pub mod model;
pub mod okta;

pub use client::DirectoryClient;
pub use in_memory::InMemoryDirectory;
pub use model::{DirectoryGroup, DirectoryUser, GroupRecord, UserRecord, UserStatus};
pub use okta::OktaClient;
