//! Seed posts used when no snapshot exists yet

use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use postdeck_domain::{AccountList, Post, PostId, PostList, PostListId};

use crate::error::{PersistenceError, PersistenceResult};
use crate::store::SnapshotStore;

/// Title of the post list created from the seed file
pub const SEED_LIST_TITLE: &str = "Posts";

/// Default seed file name inside the data directory
pub const DEFAULT_SEED_FILE: &str = "posts.json";

#[derive(Debug, Deserialize)]
struct SeedFile {
    posts: Vec<SeedPost>,
}

#[derive(Debug, Deserialize)]
struct SeedPost {
    title: String,
    url: String,
}

/// Where the state returned by [`open_or_seed`] came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Newest snapshot of the store
    Snapshot,
    /// The seed file, no snapshot existed
    Seed,
    /// Neither a snapshot nor a seed file existed
    Empty,
}

/// Build an aggregate from a seed file `{ "posts": [ { "title", "url" }, ... ] }`.
///
/// All posts go into one list; each post's id is its position in the file.
pub fn load_seed(path: impl AsRef<Path>) -> PersistenceResult<AccountList> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(PersistenceError::SeedNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = fs::read_to_string(path)?;
    let seed: SeedFile = serde_json::from_str(&content)?;

    let posts: Vec<Post> = seed
        .posts
        .into_iter()
        .enumerate()
        .map(|(index, post)| {
            positional_id(index).map(|id| Post::new(id, post.title, post.url, ""))
        })
        .collect::<PersistenceResult<_>>()?;
    let list = PostList::with_posts(
        PostListId::new(0),
        SEED_LIST_TITLE,
        posts.iter().map(Post::id),
    );
    Ok(AccountList::from_parts(posts, vec![list], Vec::new()))
}

fn positional_id(index: usize) -> PersistenceResult<PostId> {
    u32::try_from(index)
        .map(PostId::new)
        .map_err(|_| PersistenceError::parse(format!("seed post {} has no representable id", index)))
}

/// Load the newest snapshot, falling back to the seed file, then to nothing
pub fn open_or_seed(
    store: &SnapshotStore,
    seed_path: impl AsRef<Path>,
) -> PersistenceResult<(AccountList, Origin)> {
    match store.load() {
        Ok(accounts) => Ok((accounts, Origin::Snapshot)),
        Err(PersistenceError::NotFound { .. }) => match load_seed(seed_path.as_ref()) {
            Ok(accounts) => {
                info!(path = %seed_path.as_ref().display(), posts = accounts.post_count(), "No snapshot found, seeded posts");
                Ok((accounts, Origin::Seed))
            }
            Err(PersistenceError::SeedNotFound { path }) => {
                info!(path = %path.display(), "No snapshot or seed file found, starting empty");
                Ok((AccountList::new(), Origin::Empty))
            }
            Err(err) => Err(err),
        },
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SEED: &str = r#"{
      "posts": [
        { "title": "First", "url": "https://example.com/1" },
        { "title": "Second", "url": "https://example.com/2" }
      ]
    }"#;

    #[test]
    fn test_load_seed_assigns_positional_ids() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_SEED_FILE);
        fs::write(&path, SEED).unwrap();

        let mut accounts = load_seed(&path).unwrap();
        let list = &accounts.post_lists()[0];
        assert_eq!(list.title(), SEED_LIST_TITLE);
        assert_eq!(list.posts(), &[PostId::new(0), PostId::new(1)]);
        assert_eq!(accounts.post(PostId::new(1)).unwrap().title(), "Second");
        assert_eq!(accounts.post(PostId::new(0)).unwrap().text(), "");
        assert!(accounts.accounts().is_empty());

        let list = list.id();
        let next = accounts.add_post(list, "Third", "https://example.com/3", "").unwrap();
        assert_eq!(next, PostId::new(2));
    }

    #[test]
    fn test_positional_id_bounds() {
        assert_eq!(positional_id(0).unwrap(), PostId::new(0));
        assert_eq!(positional_id(u32::MAX as usize).unwrap(), PostId::new(u32::MAX));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_positional_id_past_u32_is_parse_error() {
        let index = u32::MAX as usize + 1;
        assert!(matches!(positional_id(index), Err(PersistenceError::Parse(_))));
    }

    #[test]
    fn test_load_seed_missing_and_malformed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(DEFAULT_SEED_FILE);
        assert!(matches!(load_seed(&path), Err(PersistenceError::SeedNotFound { .. })));
        fs::write(&path, r#"{ "entries": [] }"#).unwrap();
        assert!(matches!(load_seed(&path), Err(PersistenceError::Parse(_))));
    }

    #[test]
    fn test_open_or_seed_fallbacks() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path());
        let seed = dir.path().join(DEFAULT_SEED_FILE);

        let (accounts, origin) = open_or_seed(&store, &seed).unwrap();
        assert_eq!(origin, Origin::Empty);
        assert_eq!(accounts, AccountList::new());

        fs::write(&seed, SEED).unwrap();
        let (accounts, origin) = open_or_seed(&store, &seed).unwrap();
        assert_eq!(origin, Origin::Seed);
        assert_eq!(accounts.post_count(), 2);

        store.save(&AccountList::new()).unwrap();
        let (accounts, origin) = open_or_seed(&store, &seed).unwrap();
        assert_eq!(origin, Origin::Snapshot);
        assert_eq!(accounts.post_count(), 0);
    }

    #[test]
    fn test_open_or_seed_propagates_corruption() {
        let dir = TempDir::new().unwrap();
        let store = SnapshotStore::new(dir.path());
        store.save(&AccountList::new()).unwrap();
        let latest = store.latest_snapshot().unwrap().unwrap();
        fs::write(&latest.path, "[]").unwrap();
        assert!(matches!(
            open_or_seed(&store, dir.path().join(DEFAULT_SEED_FILE)),
            Err(PersistenceError::Parse(_))
        ));
    }
}
