#![warn(missing_docs)]

//! Snapshot persistence for postdeck
//!
//! Flattens the entity graph into id-indexed JSON, keeps a timestamped
//! snapshot history on disk and offers linear undo/redo over it.

pub mod clock;
pub mod document;
pub mod error;
pub mod seed;
pub mod serializer;
pub mod store;

// Re-export public API
pub use clock::{format_stamp, parse_stamp, Clock, FixedClock, SystemClock};
pub use document::{PersistedAccount, PersistedDocument, PersistedPostList};
pub use error::{PersistenceError, PersistenceResult};
pub use seed::{load_seed, open_or_seed, Origin, DEFAULT_SEED_FILE, SEED_LIST_TITLE};
pub use serializer::{from_json, reconstruct, to_json, RevivePolicy};
pub use store::{
    Namespace, SnapshotEntry, SnapshotStore, StoreStats, DEFAULT_MAX_SNAPSHOTS,
    DEFAULT_SNAPSHOT_DIR,
};
