//! Entity model for postdeck
//!
//! Posts, post lists and posting accounts live in an arena owned by
//! [`AccountList`]. Entities refer to each other by typed ids only, which
//! keeps the graph free of ownership cycles and matches the persisted format.

pub mod account_list;
pub mod entities;
pub mod errors;
pub mod validation;
pub mod value_objects;

// Re-export public API
pub use account_list::AccountList;
pub use entities::{Post, PostList, PostingAccount, DEFAULT_DEFER_POSITIONS, POSTING_SEPARATOR};
pub use errors::{DomainError, DomainResult};
pub use validation::{is_valid_url, validate_post_input};
pub use value_objects::{AccountId, IdAllocator, PostId, PostListId};
