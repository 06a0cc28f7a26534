//! In-Memory Directory
//!
//! A [`DirectoryClient`] backed by records held in memory.
//! Useful for testing and development.

use async_trait::async_trait;
use serde_json::Value;
use shared::{EntityKind, Result, RoleError};
use std::sync::{Arc, RwLock, RwLockReadGuard};

use crate::client::DirectoryClient;
use crate::model::{GroupRecord, UserRecord, UserStatus};

#[derive(Debug, Default)]
struct DirectoryState {
    users: Vec<UserRecord>,
    groups: Vec<GroupRecord>,
    /// (group_id, user_id) in insertion order
    memberships: Vec<(String, String)>,
}

/// In-memory directory
///
/// Thread-safe implementation using RwLock. Lookups use the same exact-match
/// semantics as the Okta search filters.
#[derive(Debug, Clone, Default)]
pub struct InMemoryDirectory {
    state: Arc<RwLock<DirectoryState>>,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a user
    pub fn add_user(&self, id: &str, login: &str, status: UserStatus) -> &Self {
        self.insert_user_record(UserRecord::new(id, login, status))
    }

    /// Add a group
    pub fn add_group(&self, id: &str, name: &str) -> &Self {
        self.insert_group_record(GroupRecord::new(id, name))
    }

    /// Add a user to a group
    pub fn add_member(&self, group_id: &str, user_id: &str) -> &Self {
        if let Ok(mut state) = self.state.write() {
            state
                .memberships
                .push((group_id.to_string(), user_id.to_string()));
        }
        self
    }

    /// Insert a raw user record as-is, without validation
    pub fn insert_user_record(&self, record: UserRecord) -> &Self {
        if let Ok(mut state) = self.state.write() {
            state.users.push(record);
        }
        self
    }

    /// Insert a raw group record as-is, without validation
    pub fn insert_group_record(&self, record: GroupRecord) -> &Self {
        if let Ok(mut state) = self.state.write() {
            state.groups.push(record);
        }
        self
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, DirectoryState>> {
        self.state
            .read()
            .map_err(|_| RoleError::Upstream("Failed to acquire read lock".to_string()))
    }
}

fn profile_matches(profile: &Value, key: &str, expected: &str) -> bool {
    profile.get(key).and_then(Value::as_str) == Some(expected)
}

#[async_trait]
impl DirectoryClient for InMemoryDirectory {
    async fn find_users_by_login(&self, login: &str) -> Result<Vec<UserRecord>> {
        let state = self.read()?;
        Ok(state
            .users
            .iter()
            .filter(|u| profile_matches(&u.profile, "login", login))
            .cloned()
            .collect())
    }

    async fn find_groups_by_name(&self, name: &str) -> Result<Vec<GroupRecord>> {
        let state = self.read()?;
        Ok(state
            .groups
            .iter()
            .filter(|g| profile_matches(&g.profile, "name", name))
            .cloned()
            .collect())
    }

    async fn list_user_groups(&self, user_id: &str) -> Result<Vec<GroupRecord>> {
        let state = self.read()?;
        if !state.users.iter().any(|u| u.id == user_id) {
            return Err(RoleError::NotFound {
                kind: EntityKind::User,
                name: user_id.to_string(),
            });
        }

        Ok(state
            .memberships
            .iter()
            .filter(|(_, member)| member == user_id)
            .filter_map(|(group_id, _)| state.groups.iter().find(|g| &g.id == group_id))
            .cloned()
            .collect())
    }

    async fn list_group_users(&self, group_id: &str) -> Result<Vec<UserRecord>> {
        let state = self.read()?;
        if !state.groups.iter().any(|g| g.id == group_id) {
            return Err(RoleError::NotFound {
                kind: EntityKind::Group,
                name: group_id.to_string(),
            });
        }

        Ok(state
            .memberships
            .iter()
            .filter(|(group, _)| group == group_id)
            .filter_map(|(_, user_id)| state.users.iter().find(|u| &u.id == user_id))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_directory() -> InMemoryDirectory {
        let directory = InMemoryDirectory::new();
        directory
            .add_user("00u1", "alice@test.com", UserStatus::Active)
            .add_user("00u2", "bob@test.com", UserStatus::Active)
            .add_group("00g1", "Everyone")
            .add_group("00g2", "Admin")
            .add_member("00g1", "00u1")
            .add_member("00g1", "00u2")
            .add_member("00g2", "00u2");
        directory
    }

    #[tokio::test]
    async fn test_lookups_are_exact() {
        let directory = create_directory();

        let users = directory.find_users_by_login("alice@test.com").await.unwrap();
        assert_eq!(users.len(), 1);

        assert!(directory.find_users_by_login("alice").await.unwrap().is_empty());
        assert!(directory.find_groups_by_name("Admins").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_memberships_keep_insertion_order() {
        let directory = create_directory();

        let groups = directory.list_user_groups("00u2").await.unwrap();
        let ids: Vec<&str> = groups.iter().map(|g| g.id.as_str()).collect();
        assert_eq!(ids, vec!["00g1", "00g2"]);

        let users = directory.list_group_users("00g1").await.unwrap();
        let ids: Vec<&str> = users.iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["00u1", "00u2"]);
    }

    #[tokio::test]
    async fn test_unknown_ids_are_not_found() {
        let directory = create_directory();

        assert!(matches!(
            directory.list_user_groups("00u9").await,
            Err(RoleError::NotFound { kind: EntityKind::User, .. })
        ));
        assert!(matches!(
            directory.list_group_users("00g9").await,
            Err(RoleError::NotFound { kind: EntityKind::Group, .. })
        ));
    }

    #[tokio::test]
    async fn test_clones_share_state() {
        let directory = create_directory();
        let handle = directory.clone();
        handle.add_group("00g3", "Auditors");

        let groups = directory.find_groups_by_name("Auditors").await.unwrap();
        assert_eq!(groups.len(), 1);
    }
}
