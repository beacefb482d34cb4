// Show an account's queue

use super::{post_line, Command};
use crate::error::CliResult;
use crate::output::OutputStyle;
use crate::workflow::current_post;
use crate::workspace::Workspace;

/// List the postable posts of an account in order
pub struct QueueCommand {
    pub account: Option<u32>,
}

impl QueueCommand {
    pub fn new(account: Option<u32>) -> Self {
        Self { account }
    }
}

impl Command for QueueCommand {
    fn execute(&self, workspace: &mut Workspace, style: &OutputStyle) -> CliResult<String> {
        let account = workspace.resolve_account(self.account)?;
        let accounts = workspace.accounts();
        let queue = accounts.posts_filtered(account)?;
        let current = current_post(accounts, account)?;
        let title = accounts.account(account)?.title().to_string();
        let mut lines = vec![style.header(&format!("Queue for {}", title))];
        if queue.is_empty() {
            lines.push(style.info("Nothing to post"));
        }
        for post in queue {
            lines.push(style.list_item(&post_line(accounts, post, style), current == Some(post)));
        }
        Ok(lines.join("\n"))
    }
}
