// Command handlers for the postdeck CLI

pub mod account;
pub mod history;
pub mod list;
pub mod post;
pub mod posting;
pub mod queue;
pub mod status;

pub use account::{AccountAction, AccountCommand};
pub use history::{HistoryAction, HistoryCommand};
pub use list::{ListAction, ListCommand};
pub use post::{PostAction, PostCommand};
pub use posting::{PostingAction, PostingCommand};
pub use queue::QueueCommand;
pub use status::StatusCommand;

use postdeck_domain::{AccountList, PostId};

use crate::error::CliResult;
use crate::output::OutputStyle;
use crate::workspace::Workspace;

/// Trait for command handlers
///
/// A handler runs against an opened workspace and returns the text to print.
/// Handlers that change state commit a snapshot before returning.
pub trait Command {
    /// Execute the command
    fn execute(&self, workspace: &mut Workspace, style: &OutputStyle) -> CliResult<String>;
}

/// One line describing a post: `#id Title <url>`
pub(crate) fn post_line(accounts: &AccountList, post: PostId, style: &OutputStyle) -> String {
    match accounts.post(post) {
        Ok(post) => format!("{} {} <{}>", style.id(post.id()), post.title(), post.url()),
        Err(_) => format!("{} (missing)", style.id(post)),
    }
}
