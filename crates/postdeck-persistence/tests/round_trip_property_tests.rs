//! Property-based tests for flatten/reconstruct
//!
//! **Property: Round Trip**
//! For any account list built through the public API, serializing and
//! reviving it yields the same posts, post lists and accounts.
//!
//! **Property: Id Monotonicity**
//! Entities created after a reload always get ids above every reloaded id.

use postdeck_domain::{AccountList, PostId};
use postdeck_persistence::{from_json, to_json, RevivePolicy};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    AddList(String),
    AddPost(usize, String, String),
    AddAccount(Option<usize>, String),
    Filter(usize, usize),
    Select(usize, usize),
    Defer(usize, usize, usize),
    PutLast(usize, usize),
    RemovePost(usize),
    RemoveAccount(usize),
    RemoveList(usize),
}

fn arb_title() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9 ]{0,15}"
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        arb_title().prop_map(Op::AddList),
        (any::<usize>(), arb_title(), "[a-z ]{0,20}").prop_map(|(l, t, x)| Op::AddPost(l, t, x)),
        (prop::option::of(any::<usize>()), arb_title()).prop_map(|(l, t)| Op::AddAccount(l, t)),
        (any::<usize>(), any::<usize>()).prop_map(|(a, p)| Op::Filter(a, p)),
        (any::<usize>(), any::<usize>()).prop_map(|(a, p)| Op::Select(a, p)),
        (any::<usize>(), any::<usize>(), 0usize..12).prop_map(|(l, p, n)| Op::Defer(l, p, n)),
        (any::<usize>(), any::<usize>()).prop_map(|(l, p)| Op::PutLast(l, p)),
        any::<usize>().prop_map(Op::RemovePost),
        any::<usize>().prop_map(Op::RemoveAccount),
        any::<usize>().prop_map(Op::RemoveList),
    ]
}

fn pick<T: Copy>(items: &[T], index: usize) -> Option<T> {
    if items.is_empty() {
        None
    } else {
        Some(items[index % items.len()])
    }
}

/// Apply operations, ignoring the ones the model rejects
fn build(ops: &[Op]) -> AccountList {
    let mut accounts = AccountList::new();
    for op in ops {
        let lists: Vec<_> = accounts.post_lists().iter().map(|l| l.id()).collect();
        let posts: Vec<PostId> = accounts.posts().map(|p| p.id()).collect();
        let ids: Vec<_> = accounts.accounts().iter().map(|a| a.id()).collect();
        match op {
            Op::AddList(title) => {
                let _ = accounts.add_post_list(title.clone());
            }
            Op::AddPost(list, title, text) => {
                if let Some(list) = pick(&lists, *list) {
                    let _ = accounts.add_post(list, title.clone(), "https://example.com/p", text.clone());
                }
            }
            Op::AddAccount(list, title) => {
                let list = list.and_then(|l| pick(&lists, l));
                let _ = accounts.add_account(title.clone(), list);
            }
            Op::Filter(account, post) => {
                if let (Some(a), Some(p)) = (pick(&ids, *account), pick(&posts, *post)) {
                    let _ = accounts.filter_post(a, p);
                }
            }
            Op::Select(account, post) => {
                if let (Some(a), Some(p)) = (pick(&ids, *account), pick(&posts, *post)) {
                    let _ = accounts.set_current_post(a, Some(p));
                }
            }
            Op::Defer(list, post, n) => {
                if let (Some(l), Some(p)) = (pick(&lists, *list), pick(&posts, *post)) {
                    if let Ok(list) = accounts.post_list_mut(l) {
                        list.defer(p, *n);
                    }
                }
            }
            Op::PutLast(list, post) => {
                if let (Some(l), Some(p)) = (pick(&lists, *list), pick(&posts, *post)) {
                    if let Ok(list) = accounts.post_list_mut(l) {
                        list.put_last(p);
                    }
                }
            }
            Op::RemovePost(post) => {
                if let Some(p) = pick(&posts, *post) {
                    let _ = accounts.remove_post(p);
                }
            }
            Op::RemoveAccount(account) => {
                if let Some(a) = pick(&ids, *account) {
                    let _ = accounts.remove_account(a);
                }
            }
            Op::RemoveList(list) => {
                if let Some(l) = pick(&lists, *list) {
                    let _ = accounts.remove_post_list(l);
                }
            }
        }
    }
    accounts
}

proptest! {
    #[test]
    fn prop_round_trip_is_isomorphic(ops in prop::collection::vec(arb_op(), 0..60)) {
        let original = build(&ops);
        let json = to_json(&original).unwrap();
        let revived = from_json(&json, RevivePolicy::Strict).unwrap();

        prop_assert_eq!(
            revived.posts().collect::<Vec<_>>(),
            original.posts().collect::<Vec<_>>()
        );
        prop_assert_eq!(revived.post_lists(), original.post_lists());
        prop_assert_eq!(revived.accounts(), original.accounts());

        // Serializing the revived graph again yields the same text
        prop_assert_eq!(to_json(&revived).unwrap(), json);
    }

    #[test]
    fn prop_new_ids_exceed_reloaded_ids(ops in prop::collection::vec(arb_op(), 0..60)) {
        let original = build(&ops);
        let json = to_json(&original).unwrap();
        let mut revived = from_json(&json, RevivePolicy::Lenient).unwrap();

        let max_post = revived.posts().map(|p| p.id()).max();
        let max_list = revived.post_lists().iter().map(|l| l.id()).max();
        let max_account = revived.accounts().iter().map(|a| a.id()).max();

        let list = revived.add_post_list("Fresh").unwrap();
        let post = revived.add_post(list, "Fresh", "https://example.com/new", "").unwrap();
        let account = revived.add_account("Fresh", Some(list)).unwrap();

        prop_assert!(max_post.map_or(true, |max| post > max));
        prop_assert!(max_list.map_or(true, |max| list > max));
        prop_assert!(max_account.map_or(true, |max| account > max));
    }
}
