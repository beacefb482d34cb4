//! Posting account entity

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::entities::PostList;
use crate::value_objects::{AccountId, PostId, PostListId};

/// A named account that posts from one post list.
///
/// The account only refers to its post list and posts by id. Filtered posts
/// are hidden from the account's queue; selected posts are the ones currently
/// picked by the user, the smallest id being the current post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostingAccount {
    id: AccountId,
    title: String,
    post_list: Option<PostListId>,
    filtered_posts: BTreeSet<PostId>,
    current_posts: BTreeSet<PostId>,
}

impl PostingAccount {
    /// Create an account without filters or selection
    pub fn new(id: AccountId, title: impl Into<String>, post_list: Option<PostListId>) -> Self {
        Self {
            id,
            title: title.into(),
            post_list,
            filtered_posts: BTreeSet::new(),
            current_posts: BTreeSet::new(),
        }
    }

    /// Rebuild an account with its filter and selection state
    pub fn with_state(
        id: AccountId,
        title: impl Into<String>,
        post_list: Option<PostListId>,
        filtered_posts: impl IntoIterator<Item = PostId>,
        current_posts: impl IntoIterator<Item = PostId>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            post_list,
            filtered_posts: filtered_posts.into_iter().collect(),
            current_posts: current_posts.into_iter().collect(),
        }
    }

    /// Get account ID
    pub fn id(&self) -> AccountId {
        self.id
    }

    /// Get title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Set title
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// The post list this account posts from
    pub fn post_list(&self) -> Option<PostListId> {
        self.post_list
    }

    /// Point the account at a different post list
    pub fn set_post_list(&mut self, post_list: Option<PostListId>) {
        self.post_list = post_list;
    }

    /// Posts hidden from this account's queue
    pub fn filtered_posts(&self) -> &BTreeSet<PostId> {
        &self.filtered_posts
    }

    /// Hide a post from this account
    pub fn filter_post(&mut self, post: PostId) -> bool {
        self.filtered_posts.insert(post)
    }

    /// Show a previously hidden post again
    pub fn unfilter_post(&mut self, post: PostId) -> bool {
        self.filtered_posts.remove(&post)
    }

    /// Whether the post is hidden from this account
    pub fn is_filtered(&self, post: PostId) -> bool {
        self.filtered_posts.contains(&post)
    }

    /// Posts currently selected
    pub fn current_posts(&self) -> &BTreeSet<PostId> {
        &self.current_posts
    }

    /// The current post, if any is selected.
    ///
    /// Selections revived from older documents may hold several posts; the
    /// smallest id wins.
    pub fn current_post(&self) -> Option<PostId> {
        self.current_posts.iter().next().copied()
    }

    /// Replace the selection with a single post, or clear it.
    ///
    /// Membership in the account's list is checked by
    /// [`AccountList::set_current_post`](crate::AccountList::set_current_post).
    pub(crate) fn set_current_post(&mut self, post: Option<PostId>) {
        self.current_posts.clear();
        if let Some(post) = post {
            self.current_posts.insert(post);
        }
    }

    /// Clear the selection
    pub fn clear_selection(&mut self) {
        self.current_posts.clear();
    }

    /// Posts of `list` that are not filtered, in list order
    pub fn posts_filtered(&self, list: &PostList) -> Vec<PostId> {
        list.posts()
            .iter()
            .copied()
            .filter(|post| !self.filtered_posts.contains(post))
            .collect()
    }

    /// Drop every trace of a post from filter and selection state
    pub(crate) fn forget_post(&mut self, post: PostId) {
        self.filtered_posts.remove(&post);
        self.current_posts.remove(&post);
    }
}
