//! DirectoryRoleManager - Role manager backed by the Okta directory
//!
//! Principals are Okta users (by login) and roles are Okta groups (by name).
//! Nothing is stored locally: every query goes back to the directory, and a
//! lookup that matches zero or several entities is an error.
//!
//! Results come back in directory order. That order is not part of the
//! contract; sort if you need determinism.

use async_trait::async_trait;
use directory::{DirectoryClient, DirectoryGroup, DirectoryUser, OktaClient};
use shared::{DirectoryConfig, EntityKind, Logger, Result, RoleError};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::role_manager::RoleManager;

/// Directory-backed role manager
#[derive(Clone)]
pub struct DirectoryRoleManager {
    client: Arc<dyn DirectoryClient>,
}

impl DirectoryRoleManager {
    /// Create a role manager over an existing directory client
    pub fn new(client: Arc<dyn DirectoryClient>) -> Self {
        Self { client }
    }

    /// Create a role manager talking to the Okta org described by `config`
    pub fn from_config(config: &DirectoryConfig) -> Result<Self> {
        let client = OktaClient::new(config)?;
        Ok(Self::new(Arc::new(client)))
    }

    /// Resolve a login to exactly one directory user
    async fn resolve_user(&self, login: &str) -> Result<DirectoryUser> {
        let records = self.client.find_users_by_login(login).await?;

        let mut matches = Vec::with_capacity(records.len());
        for record in &records {
            let user = DirectoryUser::try_from(record)?;
            if user.login == login {
                matches.push(user);
            }
        }

        exactly_one(matches, EntityKind::User, login)
    }

    /// Resolve a group name to exactly one directory group
    async fn resolve_group(&self, name: &str) -> Result<DirectoryGroup> {
        let records = self.client.find_groups_by_name(name).await?;

        let mut matches = Vec::with_capacity(records.len());
        for record in &records {
            let group = DirectoryGroup::try_from(record)?;
            if group.name == name {
                matches.push(group);
            }
        }

        exactly_one(matches, EntityKind::Group, name)
    }

    /// Names of every group the user belongs to
    async fn user_group_names(&self, user: &DirectoryUser) -> Result<Vec<String>> {
        let records = self.client.list_user_groups(&user.id).await?;

        records
            .iter()
            .map(|record| {
                DirectoryGroup::try_from(record)
                    .map(|group| group.name)
                    .map_err(RoleError::from)
            })
            .collect()
    }

    /// Logins of the group's ACTIVE members
    async fn active_member_logins(&self, group: &DirectoryGroup) -> Result<Vec<String>> {
        let records = self.client.list_group_users(&group.id).await?;

        let mut logins = Vec::with_capacity(records.len());
        for record in &records {
            let user = DirectoryUser::try_from(record)?;
            if user.status.is_active() {
                logins.push(user.login);
            } else {
                debug!(login = %user.login, status = %user.status, group = %group.name, "Skipping inactive member");
            }
        }
        Ok(logins)
    }
}

fn exactly_one<T>(mut matches: Vec<T>, kind: EntityKind, name: &str) -> Result<T> {
    match matches.len() {
        0 => Err(RoleError::NotFound {
            kind,
            name: name.to_string(),
        }),
        1 => Ok(matches.remove(0)),
        count => {
            warn!(%kind, name, count, "Directory name is not unique");
            Err(RoleError::AmbiguousResult {
                kind,
                name: name.to_string(),
                count,
            })
        }
    }
}

fn reject_domain(domain: Option<&str>) -> Result<()> {
    match domain {
        Some(_) => Err(RoleError::domain_unsupported()),
        None => Ok(()),
    }
}

#[async_trait]
impl RoleManager for DirectoryRoleManager {
    /// Nothing is stored locally, so there is nothing to clear.
    fn clear(&self) -> Result<()> {
        Ok(())
    }

    async fn add_link(&self, _name1: &str, _name2: &str, _domain: Option<&str>) -> Result<()> {
        Err(RoleError::NotImplemented("add_link"))
    }

    async fn delete_link(&self, _name1: &str, _name2: &str, _domain: Option<&str>) -> Result<()> {
        Err(RoleError::NotImplemented("delete_link"))
    }

    async fn build_relationship(&self, _name1: &str, _name2: &str, _domain: Option<&str>) -> Result<()> {
        Err(RoleError::NotImplemented("build_relationship"))
    }

    async fn has_link(&self, name1: &str, name2: &str, domain: Option<&str>) -> Result<bool> {
        reject_domain(domain)?;

        let roles = self.get_roles(name1, None).await?;
        Ok(roles.iter().any(|role| role == name2))
    }

    async fn get_roles(&self, name: &str, domain: Option<&str>) -> Result<Vec<String>> {
        reject_domain(domain)?;

        let user = self.resolve_user(name).await?;
        let roles = self.user_group_names(&user).await?;
        debug!(login = name, count = roles.len(), "Resolved roles");
        Ok(roles)
    }

    async fn get_users(&self, name: &str, domain: Option<&str>) -> Result<Vec<String>> {
        reject_domain(domain)?;

        let group = self.resolve_group(name).await?;
        let users = self.active_member_logins(&group).await?;
        debug!(group = name, count = users.len(), "Resolved users");
        Ok(users)
    }

    async fn print_roles(&self) -> Result<()> {
        Err(RoleError::NotImplemented("print_roles"))
    }

    async fn get_all_domains(&self) -> Result<Vec<String>> {
        Err(RoleError::NotImplemented("get_all_domains"))
    }

    async fn get_domains(&self, _name: &str) -> Result<Vec<String>> {
        Err(RoleError::NotImplemented("get_domains"))
    }

    fn set_logger(&self, _logger: Arc<dyn Logger>) {}
}
