//! Domain errors for postdeck

use thiserror::Error;

use crate::value_objects::{AccountId, PostId, PostListId};

/// Core domain errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// No post with this id exists in the aggregate
    #[error("Post not found: {id}")]
    PostNotFound { id: PostId },

    /// No post list with this id exists in the aggregate
    #[error("Post list not found: {id}")]
    PostListNotFound { id: PostListId },

    /// No account with this id exists in the aggregate
    #[error("Account not found: {id}")]
    AccountNotFound { id: AccountId },

    /// The post list is still referenced by an account
    #[error("Post list {post_list} is still used by account {account}")]
    InUse {
        post_list: PostListId,
        account: AccountId,
    },

    /// The post is already part of the list
    #[error("Post {post} is already in post list {post_list}")]
    DuplicatePost { post: PostId, post_list: PostListId },

    /// The post is not part of the account's post list
    #[error("Post {post} is not in post list {post_list}")]
    NotInList { post: PostId, post_list: PostListId },

    /// Every id of this kind has been handed out
    #[error("No {entity} ids left to allocate")]
    IdsExhausted { entity: &'static str },

    /// User input was rejected
    #[error("Validation error: {field} - {reason}")]
    Validation { field: String, reason: String },
}

impl DomainError {
    /// Create a new Validation error with context
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
