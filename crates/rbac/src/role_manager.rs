//! RoleManager - Role hierarchy contract used by the authorization engine

use async_trait::async_trait;
use shared::{Logger, Result};
use std::sync::Arc;

/// Role manager capability set
///
/// The authorization engine calls these during policy evaluation and treats
/// any error as a failed evaluation. `domain` is the optional tenant qualifier;
/// implementations without domain support reject `Some(_)`.
#[async_trait]
pub trait RoleManager: Send + Sync {
    /// Reset the role manager to its initial state
    fn clear(&self) -> Result<()>;

    /// Add the inheritance link `name1 -> name2`
    async fn add_link(&self, name1: &str, name2: &str, domain: Option<&str>) -> Result<()>;

    /// Delete the inheritance link `name1 -> name2`
    async fn delete_link(&self, name1: &str, name2: &str, domain: Option<&str>) -> Result<()>;

    /// Older name for [`RoleManager::add_link`]
    async fn build_relationship(&self, name1: &str, name2: &str, domain: Option<&str>) -> Result<()> {
        self.add_link(name1, name2, domain).await
    }

    /// Whether `name1` inherits `name2`
    async fn has_link(&self, name1: &str, name2: &str, domain: Option<&str>) -> Result<bool>;

    /// Roles that `name` inherits
    async fn get_roles(&self, name: &str, domain: Option<&str>) -> Result<Vec<String>>;

    /// Subjects that inherit `name`
    async fn get_users(&self, name: &str, domain: Option<&str>) -> Result<Vec<String>>;

    /// Dump the role hierarchy to the log
    async fn print_roles(&self) -> Result<()>;

    /// All domains known to the role manager
    async fn get_all_domains(&self) -> Result<Vec<String>>;

    /// Domains in which `name` has a role
    async fn get_domains(&self, name: &str) -> Result<Vec<String>>;

    /// Install a logger
    fn set_logger(&self, logger: Arc<dyn Logger>);
}
