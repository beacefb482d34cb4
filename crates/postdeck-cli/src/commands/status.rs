// Workspace overview

use postdeck_persistence::Origin;

use super::Command;
use crate::error::CliResult;
use crate::output::OutputStyle;
use crate::workspace::Workspace;

/// Show accounts, post lists and history state
pub struct StatusCommand;

impl Command for StatusCommand {
    fn execute(&self, workspace: &mut Workspace, style: &OutputStyle) -> CliResult<String> {
        let accounts = workspace.accounts();
        let current = accounts.current_account().map(|a| a.id());
        let mut lines = Vec::new();

        lines.push(style.header("Accounts"));
        if accounts.accounts().is_empty() {
            lines.push(style.info("No accounts yet"));
        }
        for account in accounts.accounts() {
            let list = match account.post_list() {
                Some(list) => format!("list {}", style.id(list)),
                None => "no list".to_string(),
            };
            let queued = accounts.posts_filtered(account.id())?.len();
            let item = format!(
                "{} {} ({}, {} queued)",
                style.id(account.id()),
                account.title(),
                list,
                queued
            );
            lines.push(style.list_item(&item, current == Some(account.id())));
        }

        lines.push(String::new());
        lines.push(style.header("Post lists"));
        if accounts.post_lists().is_empty() {
            lines.push(style.info("No post lists yet"));
        }
        for list in accounts.post_lists() {
            let item = format!("{} {} ({} posts)", style.id(list.id()), list.title(), list.len());
            lines.push(style.list_item(&item, false));
        }

        let store = workspace.store();
        let stats = store.stats()?;
        lines.push(String::new());
        lines.push(style.header("History"));
        let origin = match workspace.origin() {
            Origin::Snapshot => "latest snapshot",
            Origin::Seed => "seed file",
            Origin::Empty => "empty workspace",
        };
        lines.push(format!("  Loaded from {} in {}", origin, store.dir().display()));
        lines.push(format!(
            "  {} snapshots, {} redo entries, {} bytes",
            stats.snapshots, stats.redos, stats.bytes
        ));
        lines.push(format!(
            "  undo: {}, redo: {}",
            if store.can_undo()? { "available" } else { "none" },
            if store.can_redo()? { "available" } else { "none" }
        ));

        Ok(lines.join("\n"))
    }
}
