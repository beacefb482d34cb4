//! An opened data directory: configuration, snapshot store and live state

use std::fs;
use std::path::PathBuf;

use tracing::{debug, info};

use postdeck_config::PostdeckConfig;
use postdeck_domain::{AccountId, AccountList};
use postdeck_persistence::{open_or_seed, Origin, SnapshotStore};

use crate::error::{CliError, CliResult};

/// File in the data directory remembering the current account between runs
pub const CURRENT_ACCOUNT_FILE: &str = "current-account";

/// State loaded from the newest snapshot (or seed) plus the store it came from
#[derive(Debug)]
pub struct Workspace {
    config: PostdeckConfig,
    store: SnapshotStore,
    accounts: AccountList,
    origin: Origin,
}

impl Workspace {
    /// Open the store described by `config`, seeding when no snapshot exists
    pub fn open(config: PostdeckConfig) -> CliResult<Self> {
        let store = config.snapshot_store();
        let (accounts, origin) = open_or_seed(&store, config.seed_path())?;
        let mut workspace = Self {
            config,
            store,
            accounts,
            origin,
        };
        if let Some(id) = workspace.remembered_account()? {
            if workspace.accounts.set_current_account(Some(id)).is_err() {
                debug!(account = %id, "Remembered account no longer exists");
            }
        }
        Ok(workspace)
    }

    pub fn config(&self) -> &PostdeckConfig {
        &self.config
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    pub fn accounts(&self) -> &AccountList {
        &self.accounts
    }

    pub fn accounts_mut(&mut self) -> &mut AccountList {
        &mut self.accounts
    }

    /// Where the live state came from
    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// Replace the live state, e.g. with the result of undo or redo.
    ///
    /// The current account is kept when it still exists.
    pub fn replace(&mut self, accounts: AccountList, origin: Origin) -> CliResult<()> {
        let current = self.accounts.current_account().map(|a| a.id());
        self.accounts = accounts;
        self.origin = origin;
        let current = current.filter(|id| self.accounts.account(*id).is_ok());
        self.accounts.set_current_account(current)?;
        Ok(())
    }

    /// Persist the live state as a new snapshot and remember the current account
    pub fn commit(&mut self) -> CliResult<PathBuf> {
        let path = self.store.save(&self.accounts)?;
        self.origin = Origin::Snapshot;
        info!(path = %path.display(), "Committed snapshot");
        self.remember_current_account()?;
        Ok(path)
    }

    /// Record the current account without touching the snapshot history
    pub fn remember_current_account(&self) -> CliResult<()> {
        let marker = self.store.dir().join(CURRENT_ACCOUNT_FILE);
        match self.accounts.current_account() {
            Some(account) => {
                fs::create_dir_all(self.store.dir())?;
                fs::write(&marker, account.id().to_string())?;
            }
            None if marker.exists() => fs::remove_file(&marker)?,
            None => {}
        }
        Ok(())
    }

    fn remembered_account(&self) -> CliResult<Option<AccountId>> {
        let marker = self.store.dir().join(CURRENT_ACCOUNT_FILE);
        if !marker.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&marker)?;
        match content.trim().parse::<u32>() {
            Ok(id) => Ok(Some(AccountId::new(id))),
            Err(_) => {
                debug!(path = %marker.display(), "Ignoring unreadable current account marker");
                Ok(None)
            }
        }
    }

    /// The explicitly given account, else the current account, else the first account
    pub fn resolve_account(&self, account: Option<u32>) -> CliResult<AccountId> {
        match account {
            Some(id) => {
                let id = AccountId::new(id);
                self.accounts.account(id)?;
                Ok(id)
            }
            None => self
                .accounts
                .current_account()
                .or_else(|| self.accounts.accounts().first())
                .map(|account| account.id())
                .ok_or_else(|| {
                    CliError::invalid_argument("No accounts yet; run 'postdeck account add TITLE' first")
                }),
        }
    }
}
