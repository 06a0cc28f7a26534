//! DirectoryClient - Read-only access to a user and group directory

use async_trait::async_trait;
use shared::Result;

use crate::model::{GroupRecord, UserRecord};

/// Directory client contract
///
/// Every method returns the full result set; pagination is handled by the
/// implementation. Transport and authentication failures are reported as
/// [`shared::RoleError::Upstream`].
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    /// Users whose login exactly equals `login`
    async fn find_users_by_login(&self, login: &str) -> Result<Vec<UserRecord>>;

    /// Groups whose name exactly equals `name`
    async fn find_groups_by_name(&self, name: &str) -> Result<Vec<GroupRecord>>;

    /// Groups the user belongs to, in directory order
    async fn list_user_groups(&self, user_id: &str) -> Result<Vec<GroupRecord>>;

    /// Members of the group, in directory order, regardless of status
    async fn list_group_users(&self, group_id: &str) -> Result<Vec<UserRecord>>;
}
