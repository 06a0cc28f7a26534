//! okta-rm users command

use clap::Args;
use rbac::RoleManager;

use super::render_names;

#[derive(Debug, Args)]
pub struct UsersCommand {
    /// Group name
    pub name: String,
}

impl UsersCommand {
    pub async fn run(&self, rm: &dyn RoleManager, json: bool) -> anyhow::Result<String> {
        let users = rm.get_users(&self.name, None).await?;
        render_names(&users, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::create_manager;

    #[tokio::test]
    async fn test_users_output() {
        let rm = create_manager();
        let cmd = UsersCommand {
            name: "Everyone".to_string(),
        };

        assert_eq!(cmd.run(&rm, false).await.unwrap(), "alice@test.com\nbob@test.com");
    }
}
