use pretty_assertions::assert_eq;
use timeline_core::{merge, remove, Collection, Tweet, TweetId};

fn tweet(id: &str, text: &str) -> Tweet {
    Tweet::new(id).with_text(text)
}

fn collection(ids: &[&str]) -> Collection {
    ids.iter().map(|id| tweet(id, "original")).collect()
}

fn ids(collection: &Collection) -> Vec<String> {
    collection.iter().map(|t| t.id.to_string()).collect()
}

#[test]
fn incremental_batch_inserts_and_replaces() {
    let current = collection(&["5", "3", "1"]);
    let incoming = vec![tweet("7", "new"), tweet("3", "updated")];

    let merged = merge(&current, incoming);

    assert_eq!(ids(&merged), vec!["7", "5", "3", "1"]);
    let three = merged.get(&TweetId::new("3")).expect("tweet 3");
    assert_eq!(three.payload.text, "updated");
    // The input collection is untouched.
    assert_eq!(ids(&current), vec!["5", "3", "1"]);
    assert_eq!(current.get(&TweetId::new("3")).unwrap().payload.text, "original");
}

#[test]
fn replacement_is_whole_item_not_field_union() {
    let mut stored = tweet("3", "stored text").with_favorited(true);
    stored.payload.user.screen_name = "alice".to_string();
    let current = merge(&Collection::new(), vec![stored]);

    let incoming = tweet("3", "").with_favorited(false);
    let merged = merge(&current, vec![incoming.clone()]);

    assert_eq!(merged.as_slice(), &[incoming]);
    assert_eq!(merged.as_slice()[0].payload.user.screen_name, "");
}

#[test]
fn empty_batch_returns_equal_collection() {
    let current = collection(&["9", "4"]);
    let merged = merge(&current, Vec::new());
    assert_eq!(merged, current);
}

#[test]
fn unordered_batch_is_sorted_descending_without_duplicates() {
    let incoming = vec![
        tweet("2", "a"),
        tweet("10", "b"),
        tweet("1", "c"),
        tweet("10", "d"),
        tweet("100000000000000000000", "e"),
    ];

    let merged = merge(&Collection::new(), incoming);

    assert_eq!(ids(&merged), vec!["100000000000000000000", "10", "2", "1"]);
    // Repeated id inside one batch: the later copy wins.
    assert_eq!(merged.get(&TweetId::new("10")).unwrap().payload.text, "d");
    let ordered = merged
        .as_slice()
        .windows(2)
        .all(|pair| pair[0].id > pair[1].id);
    assert!(ordered);
}

#[test]
fn ids_compare_numerically_not_lexically() {
    let merged = merge(
        &Collection::new(),
        vec![tweet("9", "a"), tweet("1000", "b"), tweet("99", "c")],
    );
    assert_eq!(ids(&merged), vec!["1000", "99", "9"]);
    assert_eq!(merged.newest_id(), Some(&TweetId::new("1000")));
}

#[test]
fn remove_drops_item_and_second_remove_is_noop() {
    let current = collection(&["5", "3", "1"]);
    let id = TweetId::new("3");

    let once = remove(&current, &id);
    assert_eq!(ids(&once), vec!["5", "1"]);
    assert!(!once.contains(&id));

    let twice = remove(&once, &id);
    assert_eq!(twice, once);
    assert_eq!(ids(&current), vec!["5", "3", "1"]);
}

#[test]
fn remove_of_unknown_id_is_noop() {
    let current = collection(&["2", "1"]);
    assert_eq!(remove(&current, &TweetId::new("42")), current);
}

#[test]
fn lookups_on_empty_collection() {
    let empty = Collection::new();
    assert!(empty.is_empty());
    assert_eq!(empty.newest_id(), None);
    assert_eq!(empty.get(&TweetId::new("1")), None);
}

#[test]
fn non_numeric_ids_with_leading_zero_stay_distinct() {
    let merged = merge(&Collection::new(), vec![tweet("0a", "first"), tweet("a", "second")]);

    assert_eq!(merged.len(), 2);
    assert_eq!(merged.get(&TweetId::new("0a")).unwrap().payload.text, "first");
    assert_eq!(merged.get(&TweetId::new("a")).unwrap().payload.text, "second");

    let without_a = remove(&merged, &TweetId::new("a"));
    assert_eq!(ids(&without_a), vec!["0a"]);
}

#[test]
fn zero_padded_numeric_ids_are_one_item() {
    let merged = merge(&Collection::new(), vec![tweet("007", "padded"), tweet("7", "plain")]);
    assert_eq!(ids(&merged), vec!["7"]);
    assert_eq!(merged.get(&TweetId::new("7")).unwrap().payload.text, "plain");
}
