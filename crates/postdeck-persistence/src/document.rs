//! Flat, id-indexed form of the entity graph
//!
//! Each table is a JSON array whose index equals the entity id. Ids that do
//! not exist are `null` holes. Cross references are plain integer ids.

use serde::{Deserialize, Serialize};

use postdeck_domain::{AccountId, AccountList, Post, PostId, PostListId};

/// Top-level persisted document: `{ "posts": [...], "postLists": [...], "accounts": [...] }`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedDocument {
    /// Posts indexed by id
    pub posts: Vec<Option<Post>>,
    /// Post lists indexed by id
    pub post_lists: Vec<Option<PersistedPostList>>,
    /// Accounts indexed by id
    pub accounts: Vec<Option<PersistedAccount>>,
}

/// Post list with its posts replaced by ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedPostList {
    /// Post list id
    pub id: PostListId,
    /// Title
    pub title: String,
    /// Post ids in priority order
    #[serde(default)]
    pub posts: Vec<PostId>,
}

/// Account with its post list and post sets replaced by ids
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedAccount {
    /// Account id
    pub id: AccountId,
    /// Title
    pub title: String,
    /// Id of the post list the account posts from
    #[serde(default)]
    pub post_list: Option<PostListId>,
    /// Ids of posts hidden from the account
    #[serde(default)]
    pub filtered_posts: Vec<PostId>,
    /// Ids of selected posts
    #[serde(default)]
    pub current_posts: Vec<PostId>,
    /// Single selection written by older snapshots
    #[serde(default, skip_serializing)]
    pub current_post: Option<PostId>,
}

impl PersistedDocument {
    /// Flatten the aggregate into id-indexed tables.
    ///
    /// Every post list of the aggregate is written, whether or not an
    /// account posts from it. Posts are written when some list contains them.
    pub fn flatten(accounts: &AccountList) -> Self {
        let lists = accounts.post_lists();

        let posts = sparse(
            accounts
                .posts()
                .filter(|post| lists.iter().any(|l| l.contains(post.id())))
                .map(|post| (post.id().index(), post.clone())),
        );

        let post_lists = sparse(lists.iter().map(|list| {
            (
                list.id().index(),
                PersistedPostList {
                    id: list.id(),
                    title: list.title().to_string(),
                    posts: list.posts().to_vec(),
                },
            )
        }));

        let accounts = sparse(accounts.accounts().iter().map(|account| {
            (
                account.id().index(),
                PersistedAccount {
                    id: account.id(),
                    title: account.title().to_string(),
                    post_list: account.post_list(),
                    filtered_posts: account.filtered_posts().iter().copied().collect(),
                    current_posts: account.current_posts().iter().copied().collect(),
                    current_post: None,
                },
            )
        }));

        Self {
            posts,
            post_lists,
            accounts,
        }
    }
}

fn sparse<T>(entries: impl Iterator<Item = (usize, T)>) -> Vec<Option<T>> {
    let mut table: Vec<Option<T>> = Vec::new();
    for (index, value) in entries {
        if index >= table.len() {
            table.resize_with(index + 1, || None);
        }
        table[index] = Some(value);
    }
    table
}
