// Posting account management

use postdeck_domain::{AccountId, PostId, PostListId};

use super::Command;
use crate::error::CliResult;
use crate::output::OutputStyle;
use crate::workspace::Workspace;

#[derive(Debug, Clone)]
pub enum AccountAction {
    Add { title: String, list: Option<u32> },
    Rename { id: u32, title: String },
    Remove { id: u32 },
    Use { id: u32 },
    Assign { id: u32, list: u32 },
    Filter { id: u32, post: u32 },
    Unfilter { id: u32, post: u32 },
}

/// Create and configure posting accounts
pub struct AccountCommand {
    pub action: AccountAction,
}

impl AccountCommand {
    pub fn new(action: AccountAction) -> Self {
        Self { action }
    }
}

impl Command for AccountCommand {
    fn execute(&self, workspace: &mut Workspace, style: &OutputStyle) -> CliResult<String> {
        let message = match &self.action {
            AccountAction::Add { title, list } => {
                let accounts = workspace.accounts();
                // Explicit list, else the current account's, else the first one
                let list = match list {
                    Some(list) => Some(PostListId::new(*list)),
                    None => accounts
                        .current_account()
                        .and_then(|a| a.post_list())
                        .or_else(|| accounts.post_lists().first().map(|l| l.id())),
                };
                let accounts = workspace.accounts_mut();
                let id = accounts.add_account(title.as_str(), list)?;
                accounts.set_current_account(Some(id))?;
                match list {
                    Some(list) => format!(
                        "Added account {} {} posting from list {}",
                        style.id(id),
                        title,
                        style.id(list)
                    ),
                    None => format!("Added account {} {} without a post list", style.id(id), title),
                }
            }
            AccountAction::Rename { id, title } => {
                let id = AccountId::new(*id);
                workspace.accounts_mut().rename_account(id, title.as_str())?;
                format!("Renamed account {} to {}", style.id(id), title)
            }
            AccountAction::Remove { id } => {
                let removed = workspace.accounts_mut().remove_account(AccountId::new(*id))?;
                format!("Removed account {} {}", style.id(removed.id()), removed.title())
            }
            AccountAction::Use { id } => {
                let id = AccountId::new(*id);
                workspace.accounts_mut().set_current_account(Some(id))?;
                // Selection is not history; leave snapshots and redo alone
                workspace.remember_current_account()?;
                let message = format!(
                    "Switched to account {} {}",
                    style.id(id),
                    workspace.accounts().account(id)?.title()
                );
                return Ok(style.success(&message));
            }
            AccountAction::Assign { id, list } => {
                let (id, list) = (AccountId::new(*id), PostListId::new(*list));
                workspace.accounts_mut().assign_post_list(id, Some(list))?;
                format!("Account {} now posts from list {}", style.id(id), style.id(list))
            }
            AccountAction::Filter { id, post } => {
                let (id, post) = (AccountId::new(*id), PostId::new(*post));
                workspace.accounts_mut().filter_post(id, post)?;
                format!("Post {} hidden from account {}", style.id(post), style.id(id))
            }
            AccountAction::Unfilter { id, post } => {
                let (id, post) = (AccountId::new(*id), PostId::new(*post));
                workspace.accounts_mut().unfilter_post(id, post)?;
                format!("Post {} shown to account {} again", style.id(post), style.id(id))
            }
        };
        workspace.commit()?;
        Ok(style.success(&message))
    }
}
