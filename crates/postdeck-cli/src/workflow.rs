//! Posting workflow over an account's queue
//!
//! The current post of an account is its first selected post, or the head of
//! its queue when nothing is selected. Accepting, declining and deferring
//! reorder the account's post list and then select the new head.

use tracing::debug;

use postdeck_domain::{AccountId, AccountList, DomainError, DomainResult, PostId, PostListId};

/// First selected post of the account, else the head of its queue
pub fn current_post(accounts: &AccountList, account: AccountId) -> DomainResult<Option<PostId>> {
    match accounts.account(account)?.current_post() {
        Some(post) => Ok(Some(post)),
        None => Ok(accounts.posts_filtered(account)?.first().copied()),
    }
}

/// Workflow operations on one aggregate
pub struct Workflow<'a> {
    accounts: &'a mut AccountList,
}

impl<'a> Workflow<'a> {
    pub fn new(accounts: &'a mut AccountList) -> Self {
        Self { accounts }
    }

    /// Postable posts of the account, in list order
    pub fn queue(&self, account: AccountId) -> DomainResult<Vec<PostId>> {
        self.accounts.posts_filtered(account)
    }

    /// The post the account would post next
    pub fn current_post(&self, account: AccountId) -> DomainResult<Option<PostId>> {
        current_post(&*self.accounts, account)
    }

    /// Send the current post to the end of the list and return its posting text
    pub fn accept(&mut self, account: AccountId) -> DomainResult<Option<String>> {
        let Some((list, post)) = self.target(account)? else {
            return Ok(None);
        };
        let text = self.accounts.post(post)?.text_for_posting();
        let moved = self.accounts.post_list_mut(list)?.put_last(post);
        ensure_moved(moved, list, post)?;
        debug!(account = %account, post = %post, "Accepted post");
        self.select_head(account)?;
        Ok(Some(text))
    }

    /// Send the current post to the end of the list without posting it
    pub fn decline(&mut self, account: AccountId) -> DomainResult<Option<PostId>> {
        let Some((list, post)) = self.target(account)? else {
            return Ok(None);
        };
        let moved = self.accounts.post_list_mut(list)?.put_last(post);
        ensure_moved(moved, list, post)?;
        debug!(account = %account, post = %post, "Declined post");
        self.select_head(account)?;
        Ok(Some(post))
    }

    /// Move the current post `positions` places further back
    pub fn defer(&mut self, account: AccountId, positions: usize) -> DomainResult<Option<PostId>> {
        let Some((list, post)) = self.target(account)? else {
            return Ok(None);
        };
        let moved = self.accounts.post_list_mut(list)?.defer(post, positions);
        ensure_moved(moved, list, post)?;
        debug!(account = %account, post = %post, positions, "Deferred post");
        self.select_head(account)?;
        Ok(Some(post))
    }

    /// Make `post` the account's current post
    pub fn select(&mut self, account: AccountId, post: PostId) -> DomainResult<()> {
        self.accounts.set_current_post(account, Some(post))
    }

    fn target(&self, account: AccountId) -> DomainResult<Option<(PostListId, PostId)>> {
        let Some(list) = self.accounts.account(account)?.post_list() else {
            return Ok(None);
        };
        Ok(self.current_post(account)?.map(|post| (list, post)))
    }

    fn select_head(&mut self, account: AccountId) -> DomainResult<()> {
        let head = self.queue(account)?.first().copied();
        self.accounts.set_current_post(account, head)
    }
}

/// A stale selection must not pass for a reordered queue
fn ensure_moved(moved: bool, post_list: PostListId, post: PostId) -> DomainResult<()> {
    if moved {
        Ok(())
    } else {
        Err(DomainError::NotInList { post, post_list })
    }
}
