//! okta-rm has-link command

use clap::Args;
use rbac::RoleManager;

#[derive(Debug, Args)]
pub struct HasLinkCommand {
    /// User login
    pub name1: String,
    /// Group name
    pub name2: String,
}

impl HasLinkCommand {
    pub async fn run(&self, rm: &dyn RoleManager, json: bool) -> anyhow::Result<String> {
        let linked = rm.has_link(&self.name1, &self.name2, None).await?;

        if json {
            Ok(serde_json::json!({
                "name1": self.name1,
                "name2": self.name2,
                "hasLink": linked,
            })
            .to_string())
        } else {
            Ok(linked.to_string())
        }
    }
}
