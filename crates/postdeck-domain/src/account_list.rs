//! The root aggregate owning every post, post list and account

use std::collections::BTreeMap;

use tracing::debug;

use crate::entities::{Post, PostList, PostingAccount};
use crate::errors::{DomainError, DomainResult};
use crate::validation::validate_post_input;
use crate::value_objects::{AccountId, IdAllocator, PostId, PostListId};

/// Arena of all entities.
///
/// Post lists are owned here and, through them, the posts. Accounts are owned
/// here as well but only hold ids of their post list and posts. Every id that
/// an entity stores resolves through this aggregate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountList {
    posts: BTreeMap<PostId, Post>,
    post_lists: Vec<PostList>,
    accounts: Vec<PostingAccount>,
    current_account: Option<AccountId>,
    ids: IdAllocator,
}

impl AccountList {
    /// Create an empty aggregate
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble an aggregate from already resolved parts.
    ///
    /// The caller is responsible for the references between the parts being
    /// valid. Id counters are seeded past the highest id of each type.
    pub fn from_parts(
        posts: impl IntoIterator<Item = Post>,
        post_lists: Vec<PostList>,
        accounts: Vec<PostingAccount>,
    ) -> Self {
        let posts: BTreeMap<PostId, Post> = posts.into_iter().map(|p| (p.id(), p)).collect();
        let ids = IdAllocator::seeded(
            posts.keys().copied(),
            post_lists.iter().map(PostList::id),
            accounts.iter().map(PostingAccount::id),
        );
        Self {
            posts,
            post_lists,
            accounts,
            current_account: None,
            ids,
        }
    }

    /// The id counters of this aggregate
    pub fn ids(&self) -> &IdAllocator {
        &self.ids
    }

    // ------------------------------------------------------------------
    // Accounts
    // ------------------------------------------------------------------

    /// All accounts in display order
    pub fn accounts(&self) -> &[PostingAccount] {
        &self.accounts
    }

    /// Create an account posting from `post_list`
    pub fn add_account(
        &mut self,
        title: impl Into<String>,
        post_list: Option<PostListId>,
    ) -> DomainResult<AccountId> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(DomainError::validation("title", "Account name cannot be empty"));
        }
        if let Some(list) = post_list {
            self.post_list(list)?;
        }
        let id = self.ids.next_account()?;
        self.accounts.push(PostingAccount::new(id, title, post_list));
        Ok(id)
    }

    /// Remove an account, clearing the current account if it was selected
    pub fn remove_account(&mut self, id: AccountId) -> DomainResult<PostingAccount> {
        let index = self
            .accounts
            .iter()
            .position(|a| a.id() == id)
            .ok_or(DomainError::AccountNotFound { id })?;
        if self.current_account == Some(id) {
            self.current_account = None;
        }
        Ok(self.accounts.remove(index))
    }

    /// Look up an account
    pub fn account(&self, id: AccountId) -> DomainResult<&PostingAccount> {
        self.accounts
            .iter()
            .find(|a| a.id() == id)
            .ok_or(DomainError::AccountNotFound { id })
    }

    /// Look up an account for modification
    pub fn account_mut(&mut self, id: AccountId) -> DomainResult<&mut PostingAccount> {
        self.accounts
            .iter_mut()
            .find(|a| a.id() == id)
            .ok_or(DomainError::AccountNotFound { id })
    }

    /// Rename an account
    pub fn rename_account(&mut self, id: AccountId, title: impl Into<String>) -> DomainResult<()> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(DomainError::validation("title", "Account name cannot be empty"));
        }
        self.account_mut(id)?.set_title(title);
        Ok(())
    }

    /// Point an account at another post list
    pub fn assign_post_list(
        &mut self,
        account: AccountId,
        post_list: Option<PostListId>,
    ) -> DomainResult<()> {
        if let Some(list) = post_list {
            self.post_list(list)?;
        }
        let account = self.account_mut(account)?;
        account.set_post_list(post_list);
        account.clear_selection();
        Ok(())
    }

    /// Hide a post from an account's queue
    pub fn filter_post(&mut self, account: AccountId, post: PostId) -> DomainResult<()> {
        self.post(post)?;
        self.account_mut(account)?.filter_post(post);
        Ok(())
    }

    /// Show a hidden post in an account's queue again
    pub fn unfilter_post(&mut self, account: AccountId, post: PostId) -> DomainResult<()> {
        self.account_mut(account)?.unfilter_post(post);
        Ok(())
    }

    /// Make `post` the account's current post, or clear the selection.
    ///
    /// Only posts in the account's own list can be selected.
    pub fn set_current_post(&mut self, account: AccountId, post: Option<PostId>) -> DomainResult<()> {
        if let Some(post) = post {
            self.post(post)?;
            let list = self
                .account(account)?
                .post_list()
                .ok_or_else(|| DomainError::validation("post_list", "Account has no post list"))?;
            if !self.post_list(list)?.contains(post) {
                return Err(DomainError::NotInList { post, post_list: list });
            }
        }
        self.account_mut(account)?.set_current_post(post);
        Ok(())
    }

    /// The currently selected account
    pub fn current_account(&self) -> Option<&PostingAccount> {
        self.current_account.and_then(|id| self.account(id).ok())
    }

    /// Select an account, or clear the selection
    pub fn set_current_account(&mut self, id: Option<AccountId>) -> DomainResult<()> {
        if let Some(id) = id {
            self.account(id)?;
        }
        self.current_account = id;
        Ok(())
    }

    /// Postable posts of an account: its list minus its filtered posts
    pub fn posts_filtered(&self, account: AccountId) -> DomainResult<Vec<PostId>> {
        let account = self.account(account)?;
        match account.post_list() {
            Some(list) => Ok(account.posts_filtered(self.post_list(list)?)),
            None => Ok(Vec::new()),
        }
    }

    // ------------------------------------------------------------------
    // Post lists
    // ------------------------------------------------------------------

    /// All post lists in creation order
    pub fn post_lists(&self) -> &[PostList] {
        &self.post_lists
    }

    /// Create an empty post list
    pub fn add_post_list(&mut self, title: impl Into<String>) -> DomainResult<PostListId> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(DomainError::validation("title", "Post list title cannot be empty"));
        }
        let id = self.ids.next_post_list()?;
        self.post_lists.push(PostList::new(id, title));
        Ok(id)
    }

    /// Remove a post list that no account uses.
    ///
    /// Posts left without any list are removed from the aggregate.
    pub fn remove_post_list(&mut self, id: PostListId) -> DomainResult<PostList> {
        if let Some(account) = self.accounts.iter().find(|a| a.post_list() == Some(id)) {
            return Err(DomainError::InUse {
                post_list: id,
                account: account.id(),
            });
        }
        let index = self
            .post_lists
            .iter()
            .position(|l| l.id() == id)
            .ok_or(DomainError::PostListNotFound { id })?;
        let removed = self.post_lists.remove(index);

        let orphaned: Vec<PostId> = removed
            .posts()
            .iter()
            .copied()
            .filter(|post| !self.post_lists.iter().any(|l| l.contains(*post)))
            .collect();
        for post in orphaned {
            debug!(post = %post, post_list = %id, "Dropping post left without a list");
            self.forget_post(post);
        }
        Ok(removed)
    }

    /// Look up a post list
    pub fn post_list(&self, id: PostListId) -> DomainResult<&PostList> {
        self.post_lists
            .iter()
            .find(|l| l.id() == id)
            .ok_or(DomainError::PostListNotFound { id })
    }

    /// Look up a post list for modification
    pub fn post_list_mut(&mut self, id: PostListId) -> DomainResult<&mut PostList> {
        self.post_lists
            .iter_mut()
            .find(|l| l.id() == id)
            .ok_or(DomainError::PostListNotFound { id })
    }

    /// Accounts posting from the given list
    pub fn accounts_using(&self, id: PostListId) -> impl Iterator<Item = &PostingAccount> {
        self.accounts
            .iter()
            .filter(move |a| a.post_list() == Some(id))
    }

    // ------------------------------------------------------------------
    // Posts
    // ------------------------------------------------------------------

    /// All posts ordered by id
    pub fn posts(&self) -> impl Iterator<Item = &Post> {
        self.posts.values()
    }

    /// Number of posts in the aggregate
    pub fn post_count(&self) -> usize {
        self.posts.len()
    }

    /// Look up a post
    pub fn post(&self, id: PostId) -> DomainResult<&Post> {
        self.posts.get(&id).ok_or(DomainError::PostNotFound { id })
    }

    /// Create a post at the front of `list`
    pub fn add_post(
        &mut self,
        list: PostListId,
        title: impl Into<String>,
        url: impl Into<String>,
        text: impl Into<String>,
    ) -> DomainResult<PostId> {
        let (title, url) = (title.into(), url.into());
        validate_post_input(&title, &url)?;
        self.post_list(list)?;

        let id = self.ids.next_post()?;
        self.posts.insert(id, Post::new(id, title, url, text));
        self.post_list_mut(list)?.insert_front(id);
        Ok(id)
    }

    /// Add an existing post to the front of another list
    pub fn attach_post(&mut self, list: PostListId, post: PostId) -> DomainResult<()> {
        self.post(post)?;
        if !self.post_list_mut(list)?.insert_front(post) {
            return Err(DomainError::DuplicatePost {
                post,
                post_list: list,
            });
        }
        Ok(())
    }

    /// Replace the fields of a post
    pub fn edit_post(
        &mut self,
        id: PostId,
        title: impl Into<String>,
        url: impl Into<String>,
        text: impl Into<String>,
    ) -> DomainResult<()> {
        let (title, url) = (title.into(), url.into());
        validate_post_input(&title, &url)?;
        let post = self
            .posts
            .get_mut(&id)
            .ok_or(DomainError::PostNotFound { id })?;
        post.set_title(title);
        post.set_url(url);
        post.set_text(text.into());
        Ok(())
    }

    /// Remove a post from every list and every account
    pub fn remove_post(&mut self, id: PostId) -> DomainResult<Post> {
        self.post(id)?;
        self.forget_post(id)
            .ok_or(DomainError::PostNotFound { id })
    }

    fn forget_post(&mut self, id: PostId) -> Option<Post> {
        for list in &mut self.post_lists {
            list.remove(id);
        }
        for account in &mut self.accounts {
            account.forget_post(id);
        }
        self.posts.remove(&id)
    }
}
