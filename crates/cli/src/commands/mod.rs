//! CLI Commands

pub mod has_link;
pub mod roles;
pub mod users;

pub use has_link::HasLinkCommand;
pub use roles::RolesCommand;
pub use users::UsersCommand;

/// Render a list of names, one per line or as a JSON array
pub(crate) fn render_names(names: &[String], json: bool) -> anyhow::Result<String> {
    if json {
        Ok(serde_json::to_string(names)?)
    } else {
        Ok(names.join("\n"))
    }
}
