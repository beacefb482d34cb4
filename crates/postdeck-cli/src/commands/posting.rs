// Accept, decline, defer and select posts for an account

use postdeck_domain::PostId;

use super::{post_line, Command};
use crate::error::CliResult;
use crate::output::OutputStyle;
use crate::workflow::Workflow;
use crate::workspace::Workspace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostingAction {
    /// Post the current post and rotate it to the end
    Accept,
    /// Skip the current post and rotate it to the end
    Decline,
    /// Move the current post back; the configured default when `None`
    Defer { positions: Option<usize> },
    Select { post: u32 },
}

/// Drive an account's queue
pub struct PostingCommand {
    pub account: Option<u32>,
    pub action: PostingAction,
}

impl PostingCommand {
    pub fn new(account: Option<u32>, action: PostingAction) -> Self {
        Self { account, action }
    }
}

impl Command for PostingCommand {
    fn execute(&self, workspace: &mut Workspace, style: &OutputStyle) -> CliResult<String> {
        let account = workspace.resolve_account(self.account)?;
        let default_positions = workspace.config().defer_positions;
        let mut workflow = Workflow::new(workspace.accounts_mut());

        let message = match self.action {
            PostingAction::Accept => match workflow.accept(account)? {
                Some(text) => style.code(&text),
                None => return Ok(style.warning("Nothing to post")),
            },
            PostingAction::Decline => match workflow.decline(account)? {
                Some(post) => style.success(&format!("Declined post {}", style.id(post))),
                None => return Ok(style.warning("Nothing to post")),
            },
            PostingAction::Defer { positions } => {
                let positions = positions.unwrap_or(default_positions);
                match workflow.defer(account, positions)? {
                    Some(post) => style.success(&format!(
                        "Deferred post {} by {} positions",
                        style.id(post),
                        positions
                    )),
                    None => return Ok(style.warning("Nothing to post")),
                }
            }
            PostingAction::Select { post } => {
                workflow.select(account, PostId::new(post))?;
                style.success(&format!("Selected post {}", style.id(post)))
            }
        };
        let next = workflow.current_post(account)?;
        workspace.commit()?;

        let mut lines = vec![message];
        if let Some(next) = next {
            lines.push(style.info(&format!("Next: {}", post_line(workspace.accounts(), next, style))));
        }
        Ok(lines.join("\n"))
    }
}
