// Post management

use postdeck_domain::{PostId, PostListId};

use super::{post_line, Command};
use crate::error::{CliError, CliResult};
use crate::output::OutputStyle;
use crate::workspace::Workspace;

#[derive(Debug, Clone)]
pub enum PostAction {
    Add {
        list: u32,
        title: String,
        url: String,
        text: String,
    },
    Edit {
        id: u32,
        title: Option<String>,
        url: Option<String>,
        text: Option<String>,
    },
    Remove {
        id: u32,
    },
    Show {
        id: u32,
    },
}

/// Create, edit, remove and show posts
pub struct PostCommand {
    pub action: PostAction,
}

impl PostCommand {
    pub fn new(action: PostAction) -> Self {
        Self { action }
    }
}

impl Command for PostCommand {
    fn execute(&self, workspace: &mut Workspace, style: &OutputStyle) -> CliResult<String> {
        match &self.action {
            PostAction::Add {
                list,
                title,
                url,
                text,
            } => {
                let id = workspace.accounts_mut().add_post(
                    PostListId::new(*list),
                    title.as_str(),
                    url.as_str(),
                    text.as_str(),
                )?;
                workspace.commit()?;
                Ok(style.success(&format!("Added post {}", post_line(workspace.accounts(), id, style))))
            }
            PostAction::Edit {
                id,
                title,
                url,
                text,
            } => {
                if title.is_none() && url.is_none() && text.is_none() {
                    return Err(CliError::invalid_argument(
                        "Nothing to change; pass --title, --url or --text",
                    ));
                }
                let id = PostId::new(*id);
                let post = workspace.accounts().post(id)?;
                let title = title.clone().unwrap_or_else(|| post.title().to_string());
                let url = url.clone().unwrap_or_else(|| post.url().to_string());
                let text = text.clone().unwrap_or_else(|| post.text().to_string());

                workspace.accounts_mut().edit_post(id, title, url, text)?;
                workspace.commit()?;
                Ok(style.success(&format!("Updated post {}", post_line(workspace.accounts(), id, style))))
            }
            PostAction::Remove { id } => {
                let removed = workspace.accounts_mut().remove_post(PostId::new(*id))?;
                workspace.commit()?;
                Ok(style.success(&format!("Removed post {} {}", style.id(removed.id()), removed.title())))
            }
            PostAction::Show { id } => {
                let post = workspace.accounts().post(PostId::new(*id))?;
                Ok(format!(
                    "{}\n{}",
                    style.header(&format!("{} {}", style.id(post.id()), post.title())),
                    style.code(&post.text_for_posting())
                ))
            }
        }
    }
}
