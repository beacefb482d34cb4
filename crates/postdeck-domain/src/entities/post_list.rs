//! Post list entity: an ordered posting queue

use serde::{Deserialize, Serialize};

use crate::value_objects::{PostId, PostListId};

/// Positions a post moves back when deferred without an explicit count
pub const DEFAULT_DEFER_POSITIONS: usize = 10;

/// Ordered list of posts. Order is the posting priority, front first.
///
/// A post appears at most once per list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostList {
    id: PostListId,
    title: String,
    posts: Vec<PostId>,
}

impl PostList {
    /// Create an empty post list
    pub fn new(id: PostListId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            posts: Vec::new(),
        }
    }

    /// Create a post list from existing posts, dropping repeated ids
    pub fn with_posts(
        id: PostListId,
        title: impl Into<String>,
        posts: impl IntoIterator<Item = PostId>,
    ) -> Self {
        let mut list = Self::new(id, title);
        for post in posts {
            list.push_back(post);
        }
        list
    }

    /// Get post list ID
    pub fn id(&self) -> PostListId {
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

    /// Posts in priority order
    pub fn posts(&self) -> &[PostId] {
        &self.posts
    }

    /// Number of posts
    pub fn len(&self) -> usize {
        self.posts.len()
    }

    /// Whether the list holds no posts
    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    /// Whether the post is part of this list
    pub fn contains(&self, post: PostId) -> bool {
        self.posts.contains(&post)
    }

    /// Index of the post within the list
    pub fn position(&self, post: PostId) -> Option<usize> {
        self.posts.iter().position(|p| *p == post)
    }

    /// Insert at the front. Returns false if the post is already listed.
    pub fn insert_front(&mut self, post: PostId) -> bool {
        if self.contains(post) {
            return false;
        }
        self.posts.insert(0, post);
        true
    }

    /// Append at the end. Returns false if the post is already listed.
    pub fn push_back(&mut self, post: PostId) -> bool {
        if self.contains(post) {
            return false;
        }
        self.posts.push(post);
        true
    }

    /// Remove the post, returning whether it was present
    pub fn remove(&mut self, post: PostId) -> bool {
        match self.position(post) {
            Some(index) => {
                self.posts.remove(index);
                true
            }
            None => false,
        }
    }

    /// Move the post to the end of the list
    pub fn put_last(&mut self, post: PostId) -> bool {
        if self.remove(post) {
            self.posts.push(post);
            true
        } else {
            false
        }
    }

    /// Move the post back by `positions`, clamped to the end of the list
    pub fn defer(&mut self, post: PostId, positions: usize) -> bool {
        let Some(index) = self.position(post) else {
            return false;
        };
        let moved = self.posts.remove(index);
        let target = index.saturating_add(positions).min(self.posts.len());
        self.posts.insert(target, moved);
        true
    }
}
