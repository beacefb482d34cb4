//! Domain entities

pub mod account;
pub mod post;
pub mod post_list;

pub use account::PostingAccount;
pub use post::{Post, POSTING_SEPARATOR};
pub use post_list::{PostList, DEFAULT_DEFER_POSITIONS};
