//! Value objects: typed identifiers and the id allocator

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{DomainError, DomainResult};

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Wrap a raw id
            pub const fn new(raw: u32) -> Self {
                Self(raw)
            }

            /// Raw numeric value
            pub const fn get(self) -> u32 {
                self.0
            }

            /// Position of this entity in an id-indexed table
            pub const fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl From<u32> for $name {
            fn from(raw: u32) -> Self {
                Self(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Post identifier
    PostId
);

entity_id!(
    /// Post list identifier
    PostListId
);

entity_id!(
    /// Posting account identifier
    AccountId
);

/// Running id counters, one per entity type.
///
/// Owned by the aggregate rather than kept as process-wide state. After a
/// reload each counter sits at `1 + max(existing id)` so new entities never
/// collide with reloaded ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdAllocator {
    next_post: u64,
    next_post_list: u64,
    next_account: u64,
}

impl IdAllocator {
    /// Create an allocator starting every counter at zero
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the counters from the ids already present
    pub fn seeded<P, L, A>(posts: P, post_lists: L, accounts: A) -> Self
    where
        P: IntoIterator<Item = PostId>,
        L: IntoIterator<Item = PostListId>,
        A: IntoIterator<Item = AccountId>,
    {
        Self {
            next_post: next_after(posts.into_iter().map(PostId::get)),
            next_post_list: next_after(post_lists.into_iter().map(PostListId::get)),
            next_account: next_after(accounts.into_iter().map(AccountId::get)),
        }
    }

    /// Hand out the next post id
    pub fn next_post(&mut self) -> DomainResult<PostId> {
        take(&mut self.next_post, "post").map(PostId)
    }

    /// Hand out the next post list id
    pub fn next_post_list(&mut self) -> DomainResult<PostListId> {
        take(&mut self.next_post_list, "post list").map(PostListId)
    }

    /// Hand out the next account id
    pub fn next_account(&mut self) -> DomainResult<AccountId> {
        take(&mut self.next_account, "account").map(AccountId)
    }

    /// Id the next post will receive, if any is left
    pub fn peek_post(&self) -> Option<PostId> {
        u32::try_from(self.next_post).ok().map(PostId)
    }

    /// Id the next post list will receive, if any is left
    pub fn peek_post_list(&self) -> Option<PostListId> {
        u32::try_from(self.next_post_list).ok().map(PostListId)
    }

    /// Id the next account will receive, if any is left
    pub fn peek_account(&self) -> Option<AccountId> {
        u32::try_from(self.next_account).ok().map(AccountId)
    }
}

// Counters run one past u32::MAX so the last id can still be handed out.
fn next_after(ids: impl Iterator<Item = u32>) -> u64 {
    ids.max().map_or(0, |max| u64::from(max) + 1)
}

fn take(counter: &mut u64, entity: &'static str) -> DomainResult<u32> {
    let id = u32::try_from(*counter).map_err(|_| DomainError::IdsExhausted { entity })?;
    *counter += 1;
    Ok(id)
}
