// Undo and redo over the snapshot history

use postdeck_persistence::{open_or_seed, Origin};

use super::Command;
use crate::error::CliResult;
use crate::output::OutputStyle;
use crate::workspace::Workspace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryAction {
    Undo,
    Redo,
}

/// Step backwards or forwards through the snapshot history
pub struct HistoryCommand {
    pub action: HistoryAction,
}

impl HistoryCommand {
    pub fn new(action: HistoryAction) -> Self {
        Self { action }
    }
}

impl Command for HistoryCommand {
    fn execute(&self, workspace: &mut Workspace, style: &OutputStyle) -> CliResult<String> {
        let store = workspace.store();
        let (accounts, origin, verb) = match self.action {
            HistoryAction::Undo => {
                store.undo()?;
                // Undoing the first snapshot falls back to the seed, as on open
                let (accounts, origin) = open_or_seed(store, workspace.config().seed_path())?;
                (accounts, origin, "Undone")
            }
            HistoryAction::Redo => (store.redo()?, Origin::Snapshot, "Redone"),
        };

        let summary = format!(
            "{}. Now {} accounts, {} post lists, {} posts",
            verb,
            accounts.accounts().len(),
            accounts.post_lists().len(),
            accounts.post_count()
        );
        workspace.replace(accounts, origin)?;
        Ok(style.success(&summary))
    }
}
