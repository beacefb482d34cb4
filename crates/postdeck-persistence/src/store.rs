//! Snapshot store: timestamped state files with undo and redo
//!
//! Every save writes `snapshot-<stamp>.json` into the store directory. Undo
//! renames the newest snapshot to `redo-<stamp>.json`; redo renames the oldest
//! redo file back. A save drops all redo files, so history stays linear.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Duration;
use tracing::{debug, info, warn};

use postdeck_domain::AccountList;

use crate::clock::{format_stamp, parse_stamp, Clock, SystemClock};
use crate::error::{PersistenceError, PersistenceResult};
use crate::serializer::{from_json, to_json, RevivePolicy};

/// Default directory holding snapshot files
pub const DEFAULT_SNAPSHOT_DIR: &str = "./data";

/// Default number of snapshots kept before the oldest is pruned
pub const DEFAULT_MAX_SNAPSHOTS: usize = 100;

const EXTENSION: &str = ".json";

/// The two file namespaces of the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// Committed, undoable states
    Snapshot,
    /// Undone states available for redo
    Redo,
}

impl Namespace {
    /// File name prefix of this namespace
    pub fn prefix(self) -> &'static str {
        match self {
            Namespace::Snapshot => "snapshot",
            Namespace::Redo => "redo",
        }
    }

    fn file_name(self, stamp: &str) -> String {
        format!("{}-{}{}", self.prefix(), stamp, EXTENSION)
    }

    fn stamp_of(self, file_name: &str) -> Option<&str> {
        file_name
            .strip_prefix(self.prefix())?
            .strip_prefix('-')?
            .strip_suffix(EXTENSION)
            .filter(|stamp| !stamp.is_empty())
    }
}

/// One state file on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotEntry {
    /// Namespace the file lives in
    pub namespace: Namespace,
    /// Capture stamp taken from the file name
    pub stamp: String,
    /// Full path of the file
    pub path: PathBuf,
}

/// Counts and total size of the store's files
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreStats {
    /// Number of undoable snapshots
    pub snapshots: usize,
    /// Number of redo entries
    pub redos: usize,
    /// Bytes used by both namespaces
    pub bytes: u64,
}

/// File-backed undo/redo history of [`AccountList`] states
pub struct SnapshotStore {
    dir: PathBuf,
    max_snapshots: usize,
    policy: RevivePolicy,
    clock: Box<dyn Clock>,
}

impl SnapshotStore {
    /// Create a store over `dir` with default retention and lenient revive
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            max_snapshots: DEFAULT_MAX_SNAPSHOTS,
            policy: RevivePolicy::default(),
            clock: Box::new(SystemClock),
        }
    }

    /// Keep at most `max_snapshots` undoable snapshots
    pub fn with_max_snapshots(mut self, max_snapshots: usize) -> Self {
        self.max_snapshots = max_snapshots.max(1);
        self
    }

    /// Use `policy` when parsing snapshot files
    pub fn with_policy(mut self, policy: RevivePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Replace the time source used for stamps
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Directory holding the snapshot files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Retention limit
    pub fn max_snapshots(&self) -> usize {
        self.max_snapshots
    }

    /// Revive policy used when parsing
    pub fn policy(&self) -> RevivePolicy {
        self.policy
    }

    /// Persist `accounts` as the newest snapshot.
    ///
    /// Prunes the oldest snapshot when over the retention limit and deletes
    /// all redo files afterwards.
    pub fn save(&self, accounts: &AccountList) -> PersistenceResult<PathBuf> {
        fs::create_dir_all(&self.dir)?;
        let json = to_json(accounts)?;

        let stamp = self.next_stamp()?;
        let path = self.dir.join(Namespace::Snapshot.file_name(&stamp));
        // Readers only ever see complete snapshot files
        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, json)?;
        fs::rename(&temp_path, &path)?;
        info!(path = %path.display(), "Saved snapshot");

        let snapshots = self.entries(Namespace::Snapshot)?;
        if snapshots.len() > self.max_snapshots {
            let oldest = &snapshots[0];
            fs::remove_file(&oldest.path)?;
            debug!(path = %oldest.path.display(), limit = self.max_snapshots, "Pruned oldest snapshot");
        }

        let redos = self.entries(Namespace::Redo)?;
        for redo in &redos {
            fs::remove_file(&redo.path)?;
        }
        if !redos.is_empty() {
            debug!(count = redos.len(), "Discarded redo history");
        }

        Ok(path)
    }

    /// Parse the newest snapshot
    pub fn load(&self) -> PersistenceResult<AccountList> {
        let latest = self.require_latest()?;
        let accounts = self.read(&latest.path)?;
        debug!(path = %latest.path.display(), "Loaded snapshot");
        Ok(accounts)
    }

    /// Move the newest snapshot to the redo namespace.
    ///
    /// Returns the content of the moved snapshot, i.e. the state as it was
    /// right before this undo. A following [`load`](Self::load) sees the
    /// next older snapshot. The file is parsed before it is moved, so a
    /// corrupt snapshot stays where it is.
    pub fn undo(&self) -> PersistenceResult<AccountList> {
        let latest = self.require_latest()?;
        let accounts = self.read(&latest.path)?;
        let target = self.dir.join(Namespace::Redo.file_name(&latest.stamp));
        fs::rename(&latest.path, &target)?;
        info!(stamp = %latest.stamp, "Undid snapshot");
        Ok(accounts)
    }

    /// Move the oldest redo entry back to the snapshot namespace and return it
    pub fn redo(&self) -> PersistenceResult<AccountList> {
        let oldest = self
            .entries(Namespace::Redo)?
            .into_iter()
            .next()
            .ok_or(PersistenceError::NoRedo)?;
        let accounts = self.read(&oldest.path)?;
        let target = self.dir.join(Namespace::Snapshot.file_name(&oldest.stamp));
        fs::rename(&oldest.path, &target)?;
        info!(stamp = %oldest.stamp, "Redid snapshot");
        Ok(accounts)
    }

    /// Undoable snapshots, oldest first
    pub fn snapshots(&self) -> PersistenceResult<Vec<SnapshotEntry>> {
        self.entries(Namespace::Snapshot)
    }

    /// Redo entries, oldest first
    pub fn redos(&self) -> PersistenceResult<Vec<SnapshotEntry>> {
        self.entries(Namespace::Redo)
    }

    /// Newest snapshot, if any
    pub fn latest_snapshot(&self) -> PersistenceResult<Option<SnapshotEntry>> {
        Ok(self.entries(Namespace::Snapshot)?.pop())
    }

    /// Whether an undo would succeed
    pub fn can_undo(&self) -> PersistenceResult<bool> {
        Ok(!self.entries(Namespace::Snapshot)?.is_empty())
    }

    /// Whether a redo would succeed
    pub fn can_redo(&self) -> PersistenceResult<bool> {
        Ok(!self.entries(Namespace::Redo)?.is_empty())
    }

    /// File counts and sizes
    pub fn stats(&self) -> PersistenceResult<StoreStats> {
        let snapshots = self.entries(Namespace::Snapshot)?;
        let redos = self.entries(Namespace::Redo)?;
        let mut bytes = 0;
        for entry in snapshots.iter().chain(redos.iter()) {
            bytes += fs::metadata(&entry.path)?.len();
        }
        Ok(StoreStats {
            snapshots: snapshots.len(),
            redos: redos.len(),
            bytes,
        })
    }

    fn require_latest(&self) -> PersistenceResult<SnapshotEntry> {
        self.latest_snapshot()?
            .ok_or_else(|| PersistenceError::NotFound {
                dir: self.dir.clone(),
            })
    }

    fn read(&self, path: &Path) -> PersistenceResult<AccountList> {
        let json = fs::read_to_string(path)?;
        from_json(&json, self.policy)
    }

    /// Files of one namespace sorted by name, which is capture order
    fn entries(&self, namespace: Namespace) -> PersistenceResult<Vec<SnapshotEntry>> {
        let dir = match fs::read_dir(&self.dir) {
            Ok(dir) => dir,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };

        let mut entries = Vec::new();
        for item in dir {
            let item = item?;
            if !item.file_type()?.is_file() {
                continue;
            }
            let name = item.file_name();
            let Some(name) = name.to_str() else { continue };
            if let Some(stamp) = namespace.stamp_of(name) {
                entries.push(SnapshotEntry {
                    namespace,
                    stamp: stamp.to_string(),
                    path: item.path(),
                });
            }
        }
        entries.sort_by(|a, b| a.stamp.cmp(&b.stamp));
        Ok(entries)
    }

    /// Stamp for a new snapshot, strictly after the newest existing one
    fn next_stamp(&self) -> PersistenceResult<String> {
        let now = self.clock.now();
        let stamp = format_stamp(now);
        let Some(latest) = self.latest_snapshot()? else {
            return Ok(stamp);
        };
        if stamp > latest.stamp {
            return Ok(stamp);
        }

        match parse_stamp(&latest.stamp) {
            Some(previous) => {
                if previous > now + Duration::seconds(1) {
                    warn!(latest = %latest.stamp, now = %stamp, "Clock is behind the newest snapshot");
                }
                Ok(format_stamp(previous + Duration::milliseconds(1)))
            }
            None => Err(PersistenceError::parse(format!(
                "unreadable snapshot stamp '{}'",
                latest.stamp
            ))),
        }
    }
}

impl fmt::Debug for SnapshotStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapshotStore")
            .field("dir", &self.dir)
            .field("max_snapshots", &self.max_snapshots)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    const URL: &str = "https://example.com";

    fn store(dir: &TempDir) -> SnapshotStore {
        let start = Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap();
        SnapshotStore::new(dir.path()).with_clock(FixedClock(start))
    }

    fn state(titles: &[&str]) -> AccountList {
        let mut accounts = AccountList::new();
        let list = accounts.add_post_list("L").unwrap();
        for title in titles.iter().rev() {
            accounts.add_post(list, *title, URL, "").unwrap();
        }
        accounts
    }

    fn titles(accounts: &AccountList) -> Vec<String> {
        let list = &accounts.post_lists()[0];
        list.posts()
            .iter()
            .map(|id| accounts.post(*id).unwrap().title().to_string())
            .collect()
    }

    #[test]
    fn test_load_without_snapshots() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        assert!(matches!(store.load(), Err(PersistenceError::NotFound { .. })));
        assert!(matches!(store.undo(), Err(PersistenceError::NotFound { .. })));
        assert!(matches!(store.redo(), Err(PersistenceError::NoRedo)));
    }

    #[test]
    fn test_missing_directory_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path().join("missing"));
        assert!(matches!(store.load(), Err(PersistenceError::NotFound { .. })));
        assert!(!store.can_undo().unwrap());
        assert_eq!(store.stats().unwrap(), StoreStats::default());
    }

    #[test]
    fn test_save_creates_directory_and_file_name() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path().join("data"))
            .with_clock(FixedClock(Utc.with_ymd_and_hms(2026, 10, 16, 9, 30, 0).unwrap()));
        let path = store.save(&state(&["A"])).unwrap();
        assert_eq!(
            path.file_name().and_then(|n| n.to_str()),
            Some("snapshot-2026-10-16T09-30-00-000Z.json")
        );
        assert_eq!(titles(&store.load().unwrap()), vec!["A"]);
    }

    #[test]
    fn test_successive_saves_get_distinct_ordered_stamps() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        for n in 0..5 {
            store.save(&state(&[format!("S{}", n).as_str()])).unwrap();
        }
        let snapshots = store.snapshots().unwrap();
        assert_eq!(snapshots.len(), 5);
        assert!(snapshots.windows(2).all(|w| w[0].stamp < w[1].stamp));
        assert_eq!(titles(&store.load().unwrap()), vec!["S4"]);
    }

    #[test]
    fn test_undo_redo_scenario() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.save(&state(&["S1"])).unwrap();
        store.save(&state(&["S2"])).unwrap();
        store.save(&state(&["S3"])).unwrap();

        assert_eq!(titles(&store.undo().unwrap()), vec!["S3"]);
        assert_eq!(titles(&store.load().unwrap()), vec!["S2"]);
        assert_eq!(titles(&store.undo().unwrap()), vec!["S2"]);
        assert_eq!(titles(&store.load().unwrap()), vec!["S1"]);

        assert_eq!(titles(&store.redo().unwrap()), vec!["S2"]);
        assert_eq!(titles(&store.load().unwrap()), vec!["S2"]);
        assert_eq!(store.redos().unwrap().len(), 1);

        assert_eq!(titles(&store.redo().unwrap()), vec!["S3"]);
        assert!(matches!(store.redo(), Err(PersistenceError::NoRedo)));
    }

    #[test]
    fn test_save_invalidates_redo() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.save(&state(&["S0"])).unwrap();
        store.save(&state(&["S1"])).unwrap();
        store.undo().unwrap();
        assert!(store.can_redo().unwrap());

        store.save(&state(&["S2"])).unwrap();
        assert!(!store.can_redo().unwrap());
        assert!(matches!(store.redo(), Err(PersistenceError::NoRedo)));
        assert_eq!(store.snapshots().unwrap().len(), 2);
    }

    #[test]
    fn test_retention_prunes_oldest() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir).with_max_snapshots(3);
        for n in 0..5 {
            store.save(&state(&[format!("S{}", n).as_str()])).unwrap();
            assert!(store.snapshots().unwrap().len() <= 3);
        }
        for _ in 0..3 {
            store.undo().unwrap();
        }
        assert!(matches!(store.undo(), Err(PersistenceError::NotFound { .. })));
        // The oldest remaining redo is S2, so S0 and S1 were pruned
        assert_eq!(titles(&store.redo().unwrap()), vec!["S2"]);
    }

    #[test]
    fn test_corrupt_snapshot_stays_in_place() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.save(&state(&["S1"])).unwrap();
        let latest = store.latest_snapshot().unwrap().unwrap();
        fs::write(&latest.path, "{ broken").unwrap();

        assert!(matches!(store.load(), Err(PersistenceError::Parse(_))));
        assert!(matches!(store.undo(), Err(PersistenceError::Parse(_))));
        assert!(latest.path.exists());
        assert!(!store.can_redo().unwrap());
    }

    #[test]
    fn test_unrelated_files_are_ignored() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("posts.json"), "{}").unwrap();
        fs::write(dir.path().join("snapshot-notes.txt"), "").unwrap();
        fs::write(dir.path().join("snapshots.json"), "{}").unwrap();
        let store = store(&dir);
        assert!(store.snapshots().unwrap().is_empty());
        store.save(&state(&["A"])).unwrap();
        assert_eq!(store.snapshots().unwrap().len(), 1);
        assert!(dir.path().join("posts.json").exists());
    }

    #[test]
    fn test_stats() {
        let dir = TempDir::new().unwrap();
        let store = store(&dir);
        store.save(&state(&["S1"])).unwrap();
        store.save(&state(&["S2"])).unwrap();
        store.undo().unwrap();
        let stats = store.stats().unwrap();
        assert_eq!(stats.snapshots, 1);
        assert_eq!(stats.redos, 1);
        assert!(stats.bytes > 0);
    }
}
