// Post list management

use postdeck_domain::{PostId, PostListId};

use super::{post_line, Command};
use crate::error::CliResult;
use crate::output::OutputStyle;
use crate::workspace::Workspace;

#[derive(Debug, Clone)]
pub enum ListAction {
    Add { title: String },
    Remove { id: u32 },
    Show { id: u32 },
    Attach { id: u32, post: u32 },
}

/// Create, remove and inspect post lists
pub struct ListCommand {
    pub action: ListAction,
}

impl ListCommand {
    pub fn new(action: ListAction) -> Self {
        Self { action }
    }
}

impl Command for ListCommand {
    fn execute(&self, workspace: &mut Workspace, style: &OutputStyle) -> CliResult<String> {
        match &self.action {
            ListAction::Add { title } => {
                let id = workspace.accounts_mut().add_post_list(title.as_str())?;
                workspace.commit()?;
                Ok(style.success(&format!("Added post list {} {}", style.id(id), title)))
            }
            ListAction::Remove { id } => {
                let removed = workspace.accounts_mut().remove_post_list(PostListId::new(*id))?;
                workspace.commit()?;
                Ok(style.success(&format!(
                    "Removed post list {} {}",
                    style.id(removed.id()),
                    removed.title()
                )))
            }
            ListAction::Show { id } => {
                let accounts = workspace.accounts();
                let list = accounts.post_list(PostListId::new(*id))?;
                let users: Vec<String> = accounts
                    .accounts_using(list.id())
                    .map(|a| a.title().to_string())
                    .collect();

                let mut lines = vec![style.header(&format!("{} {}", style.id(list.id()), list.title()))];
                if !users.is_empty() {
                    lines.push(style.info(&format!("Used by {}", users.join(", "))));
                }
                if list.is_empty() {
                    lines.push(style.info("No posts"));
                }
                for post in list.posts() {
                    lines.push(style.list_item(&post_line(accounts, *post, style), false));
                }
                Ok(lines.join("\n"))
            }
            ListAction::Attach { id, post } => {
                let (list, post) = (PostListId::new(*id), PostId::new(*post));
                workspace.accounts_mut().attach_post(list, post)?;
                workspace.commit()?;
                Ok(style.success(&format!(
                    "Added post {} to the front of list {}",
                    style.id(post),
                    style.id(list)
                )))
            }
        }
    }
}
