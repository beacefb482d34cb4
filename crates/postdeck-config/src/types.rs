//! Configuration types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use postdeck_domain::DEFAULT_DEFER_POSITIONS;
use postdeck_persistence::{
    RevivePolicy, SnapshotStore, DEFAULT_MAX_SNAPSHOTS, DEFAULT_SEED_FILE, DEFAULT_SNAPSHOT_DIR,
};

use crate::error::Result;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostdeckConfig {
    /// Directory holding snapshot and redo files
    pub data_dir: PathBuf,
    /// Snapshots kept before the oldest is pruned
    pub max_snapshots: usize,
    /// Seed file used when no snapshot exists, `<data_dir>/posts.json` if unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed_file: Option<PathBuf>,
    /// How strictly snapshots are revived
    pub revive_policy: RevivePolicy,
    /// Positions a post moves back on `defer`
    pub defer_positions: usize,
}

impl Default for PostdeckConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_SNAPSHOT_DIR),
            max_snapshots: DEFAULT_MAX_SNAPSHOTS,
            seed_file: None,
            revive_policy: RevivePolicy::default(),
            defer_positions: DEFAULT_DEFER_POSITIONS,
        }
    }
}

impl PostdeckConfig {
    /// Resolved seed file path
    pub fn seed_path(&self) -> PathBuf {
        self.seed_file
            .clone()
            .unwrap_or_else(|| self.data_dir.join(DEFAULT_SEED_FILE))
    }

    /// Snapshot store configured from these settings
    pub fn snapshot_store(&self) -> SnapshotStore {
        SnapshotStore::new(&self.data_dir)
            .with_max_snapshots(self.max_snapshots)
            .with_policy(self.revive_policy)
    }
}

/// Configuration loading, saving and validation
pub trait ConfigSource {
    /// Load configuration from all sources
    fn load_config(&self) -> Result<PostdeckConfig>;

    /// Persist configuration
    fn save_config(&self, config: &PostdeckConfig) -> Result<()>;

    /// Validate configuration
    fn validate_config(&self, config: &PostdeckConfig) -> Result<()>;
}
