//! okta-rm roles command

use clap::Args;
use rbac::RoleManager;

use super::render_names;

#[derive(Debug, Args)]
pub struct RolesCommand {
    /// User login
    pub name: String,
}

impl RolesCommand {
    pub async fn run(&self, rm: &dyn RoleManager, json: bool) -> anyhow::Result<String> {
        let roles = rm.get_roles(&self.name, None).await?;
        render_names(&roles, json)
    }
}
