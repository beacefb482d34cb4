//! Conversion between the entity graph and its JSON form

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use postdeck_domain::{AccountList, Post, PostId, PostList, PostListId, PostingAccount};

use crate::document::{PersistedAccount, PersistedDocument, PersistedPostList};
use crate::error::{PersistenceError, PersistenceResult};

/// How reconstruction treats references that do not resolve
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevivePolicy {
    /// Drop dangling ids and duplicate list entries silently
    #[default]
    Lenient,
    /// Fail on the first dangling id, duplicate list entry or misplaced entry
    Strict,
}

impl RevivePolicy {
    fn is_strict(self) -> bool {
        self == RevivePolicy::Strict
    }
}

impl fmt::Display for RevivePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RevivePolicy::Lenient => write!(f, "lenient"),
            RevivePolicy::Strict => write!(f, "strict"),
        }
    }
}

impl FromStr for RevivePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lenient" => Ok(RevivePolicy::Lenient),
            "strict" => Ok(RevivePolicy::Strict),
            other => Err(format!("unknown revive policy '{}'", other)),
        }
    }
}

/// Serialize the aggregate as pretty-printed JSON with 2-space indentation
pub fn to_json(accounts: &AccountList) -> PersistenceResult<String> {
    let document = PersistedDocument::flatten(accounts);
    Ok(serde_json::to_string_pretty(&document)?)
}

/// Rebuild an aggregate from its JSON form
pub fn from_json(json: &str, policy: RevivePolicy) -> PersistenceResult<AccountList> {
    let document: PersistedDocument = serde_json::from_str(json)?;
    reconstruct(document, policy)
}

/// Rebuild an aggregate from a parsed document.
///
/// Posts are revived first, then post lists, then accounts. Id counters of
/// the result start past the highest id of each entity type.
pub fn reconstruct(
    document: PersistedDocument,
    policy: RevivePolicy,
) -> PersistenceResult<AccountList> {
    let posts = revive_table("post", document.posts, |p: &Post| p.id().get(), policy)?;

    let lists = revive_table(
        "post list",
        document.post_lists,
        |l: &PersistedPostList| l.id.get(),
        policy,
    )?
    .into_values()
    .map(|list| revive_post_list(list, &posts, policy))
    .collect::<PersistenceResult<Vec<_>>>()?;

    let list_ids: Vec<PostListId> = lists.iter().map(PostList::id).collect();
    let accounts = revive_table(
        "account",
        document.accounts,
        |a: &PersistedAccount| a.id.get(),
        policy,
    )?
    .into_values()
    .map(|account| revive_account(account, &posts, &list_ids, policy))
    .collect::<PersistenceResult<Vec<_>>>()?;

    Ok(AccountList::from_parts(posts.into_values(), lists, accounts))
}

/// Collect the non-null entries of a table keyed by their own id.
///
/// An id past the end of its table is malformed under either policy, which
/// keeps every revived id below the number of entries actually stored.
fn revive_table<T>(
    entity: &'static str,
    table: Vec<Option<T>>,
    id_of: impl Fn(&T) -> u32,
    policy: RevivePolicy,
) -> PersistenceResult<BTreeMap<u32, T>> {
    let len = table.len();
    let mut revived = BTreeMap::new();
    for (index, entry) in table.into_iter().enumerate() {
        let Some(entry) = entry else { continue };
        let id = id_of(&entry);
        if id as usize >= len {
            return Err(PersistenceError::parse(format!(
                "{} id {} lies outside its table of {} entries",
                entity, id, len
            )));
        }
        if policy.is_strict() && id as usize != index {
            return Err(PersistenceError::reference(
                entity,
                id,
                format!("stored at index {}", index),
            ));
        }
        if revived.insert(id, entry).is_some() {
            return Err(PersistenceError::parse(format!(
                "duplicate {} id {}",
                entity, id
            )));
        }
    }
    Ok(revived)
}

fn revive_post_list(
    list: PersistedPostList,
    posts: &BTreeMap<u32, Post>,
    policy: RevivePolicy,
) -> PersistenceResult<PostList> {
    let mut revived = PostList::new(list.id, list.title);
    for post in list.posts {
        if !posts.contains_key(&post.get()) {
            if policy.is_strict() {
                return Err(PersistenceError::reference(
                    "post list",
                    list.id.get(),
                    format!("unknown post {}", post),
                ));
            }
            debug!(post_list = %list.id, post = %post, "Dropping dangling post reference");
            continue;
        }
        if !revived.push_back(post) {
            if policy.is_strict() {
                return Err(PersistenceError::reference(
                    "post list",
                    list.id.get(),
                    format!("post {} listed twice", post),
                ));
            }
            debug!(post_list = %list.id, post = %post, "Dropping duplicate post entry");
        }
    }
    Ok(revived)
}

fn revive_account(
    account: PersistedAccount,
    posts: &BTreeMap<u32, Post>,
    list_ids: &[PostListId],
    policy: RevivePolicy,
) -> PersistenceResult<PostingAccount> {
    let id = account.id;

    let post_list = match account.post_list {
        Some(list) if list_ids.contains(&list) => Some(list),
        Some(list) => {
            if policy.is_strict() {
                return Err(PersistenceError::reference(
                    "account",
                    id.get(),
                    format!("unknown post list {}", list),
                ));
            }
            debug!(account = %id, post_list = %list, "Dropping dangling post list reference");
            None
        }
        None => None,
    };

    let resolve = |ids: Vec<PostId>, what: &str| -> PersistenceResult<Vec<PostId>> {
        let mut resolved = Vec::with_capacity(ids.len());
        for post in ids {
            if posts.contains_key(&post.get()) {
                resolved.push(post);
            } else if policy.is_strict() {
                return Err(PersistenceError::reference(
                    "account",
                    id.get(),
                    format!("unknown {} post {}", what, post),
                ));
            } else {
                debug!(account = %id, post = %post, "Dropping dangling {} post", what);
            }
        }
        Ok(resolved)
    };

    let filtered = resolve(account.filtered_posts, "filtered")?;
    let mut current = account.current_posts;
    current.extend(account.current_post);
    let current = resolve(current, "current")?;

    Ok(PostingAccount::with_state(
        id,
        account.title,
        post_list,
        filtered,
        current,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use postdeck_domain::{AccountId, DomainError};

    const URL: &str = "https://example.com";

    fn sample() -> AccountList {
        let mut accounts = AccountList::new();
        let list = accounts.add_post_list("L").unwrap();
        let c = accounts.add_post(list, "C", URL, "third").unwrap();
        let b = accounts.add_post(list, "B", URL, "second").unwrap();
        accounts.add_post(list, "A", URL, "first").unwrap();
        let x = accounts.add_account("X", Some(list)).unwrap();
        accounts.filter_post(x, b).unwrap();
        accounts.set_current_post(x, Some(c)).unwrap();
        accounts.add_account("Y", None).unwrap();
        accounts
    }

    #[test]
    fn test_round_trip() {
        let original = sample();
        let json = to_json(&original).unwrap();
        let revived = from_json(&json, RevivePolicy::Strict).unwrap();
        assert_eq!(revived, original);
    }

    #[test]
    fn test_pretty_printed_with_two_spaces() {
        let json = to_json(&sample()).unwrap();
        assert!(json.starts_with("{\n  \"posts\": ["));
        assert!(json.contains("\n  \"postLists\": ["));
        assert!(json.contains("\n  \"accounts\": ["));
    }

    #[test]
    fn test_ids_continue_after_reload() {
        let json = to_json(&sample()).unwrap();
        let mut revived = from_json(&json, RevivePolicy::Lenient).unwrap();
        let list = revived.post_lists()[0].id();
        let post = revived.add_post(list, "D", URL, "").unwrap();
        assert_eq!(post, PostId::new(3));
        assert_eq!(revived.add_account("Z", None).unwrap(), AccountId::new(2));
        assert_eq!(revived.add_post_list("M").unwrap(), PostListId::new(1));
    }

    #[test]
    fn test_empty_tables_reset_counters() {
        let json = r#"{ "posts": [], "postLists": [], "accounts": [] }"#;
        let revived = from_json(json, RevivePolicy::Strict).unwrap();
        assert_eq!(revived.ids().peek_post(), Some(PostId::new(0)));
        assert_eq!(revived.ids().peek_post_list(), Some(PostListId::new(0)));
        assert_eq!(revived.ids().peek_account(), Some(AccountId::new(0)));
    }

    const DANGLING: &str = r#"{
      "posts": [ { "id": 0, "title": "A", "url": "https://example.com", "text": "" } ],
      "postLists": [ { "id": 0, "title": "L", "posts": [0, 7] } ],
      "accounts": [
        null,
        { "id": 1, "title": "X", "postList": 4, "filteredPosts": [0, 9], "currentPosts": [] }
      ]
    }"#;

    #[test]
    fn test_lenient_drops_dangling_references() {
        let revived = from_json(DANGLING, RevivePolicy::Lenient).unwrap();
        let list = &revived.post_lists()[0];
        assert_eq!(list.posts(), &[PostId::new(0)]);
        let account = revived.account(AccountId::new(1)).unwrap();
        assert_eq!(account.post_list(), None);
        assert_eq!(account.filtered_posts().len(), 1);
        assert_eq!(
            revived.account(AccountId::new(0)),
            Err(DomainError::AccountNotFound {
                id: AccountId::new(0)
            })
        );
        assert_eq!(revived.ids().peek_account(), Some(AccountId::new(2)));
    }

    #[test]
    fn test_strict_rejects_dangling_references() {
        let err = from_json(DANGLING, RevivePolicy::Strict).unwrap_err();
        assert!(matches!(
            err,
            PersistenceError::ReferenceIntegrity {
                entity: "post list",
                id: 0,
                ..
            }
        ));
    }

    #[test]
    fn test_strict_rejects_misplaced_entry() {
        let json = r#"{
          "posts": [ { "id": 1, "title": "A", "url": "https://example.com", "text": "" }, null ],
          "postLists": [],
          "accounts": []
        }"#;
        let revived = from_json(json, RevivePolicy::Lenient).unwrap();
        assert!(revived.post(PostId::new(1)).is_ok());
        assert!(matches!(
            from_json(json, RevivePolicy::Strict),
            Err(PersistenceError::ReferenceIntegrity { entity: "post", id: 1, .. })
        ));
    }

    #[test]
    fn test_ids_past_table_end_are_parse_errors() {
        for id in [u32::MAX, 500_000_000, 1] {
            let json = format!(
                r#"{{
                  "posts": [ {{ "id": {}, "title": "A", "url": "https://example.com", "text": "" }} ],
                  "postLists": [],
                  "accounts": []
                }}"#,
                id
            );
            for policy in [RevivePolicy::Lenient, RevivePolicy::Strict] {
                assert!(
                    matches!(from_json(&json, policy), Err(PersistenceError::Parse(_))),
                    "post id {} accepted under {}",
                    id,
                    policy
                );
            }
        }
    }

    #[test]
    fn test_account_id_past_table_end_is_parse_error() {
        let json = r#"{
          "posts": [],
          "postLists": [],
          "accounts": [ { "id": 4294967295, "title": "X", "postList": null, "filteredPosts": [], "currentPosts": [] } ]
        }"#;
        assert!(matches!(
            from_json(json, RevivePolicy::Lenient),
            Err(PersistenceError::Parse(_))
        ));
    }

    #[test]
    fn test_duplicate_list_entries() {
        let json = r#"{
          "posts": [ { "id": 0, "title": "A", "url": "https://example.com", "text": "" } ],
          "postLists": [ { "id": 0, "title": "L", "posts": [0, 0] } ],
          "accounts": []
        }"#;
        let revived = from_json(json, RevivePolicy::Lenient).unwrap();
        assert_eq!(revived.post_lists()[0].len(), 1);
        assert!(from_json(json, RevivePolicy::Strict).is_err());
    }

    #[test]
    fn test_duplicate_ids_are_parse_errors() {
        let json = r#"{
          "posts": [
            { "id": 0, "title": "A", "url": "https://example.com", "text": "" },
            { "id": 0, "title": "B", "url": "https://example.com", "text": "" }
          ],
          "postLists": [],
          "accounts": []
        }"#;
        assert!(matches!(
            from_json(json, RevivePolicy::Lenient),
            Err(PersistenceError::Parse(_))
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            from_json("{ not json", RevivePolicy::Lenient),
            Err(PersistenceError::Parse(_))
        ));
        assert!(matches!(
            from_json(r#"{ "posts": [] }"#, RevivePolicy::Lenient),
            Err(PersistenceError::Parse(_))
        ));
    }

    #[test]
    fn test_legacy_current_post_field() {
        let json = r#"{
          "posts": [ { "id": 0, "title": "A", "url": "https://example.com", "text": "" } ],
          "postLists": [ { "id": 0, "title": "L", "posts": [0] } ],
          "accounts": [ { "id": 0, "title": "X", "postList": 0, "filteredPosts": [], "currentPost": 0 } ]
        }"#;
        let revived = from_json(json, RevivePolicy::Strict).unwrap();
        assert_eq!(
            revived.account(AccountId::new(0)).unwrap().current_post(),
            Some(PostId::new(0))
        );
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("Strict".parse::<RevivePolicy>(), Ok(RevivePolicy::Strict));
        assert_eq!("lenient".parse::<RevivePolicy>(), Ok(RevivePolicy::Lenient));
        assert!("loose".parse::<RevivePolicy>().is_err());
    }
}
