//! Collection reconciler: merges fetched batches into the ordered local view.
//!
//! Both operations are pure. They borrow the current collection and hand back a
//! new one, so a caller holding the previous value can still compare against it.

use std::collections::BTreeMap;

use crate::{Tweet, TweetId};

/// Locally cached tweets, strictly descending by id, no duplicate ids.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Collection {
    tweets: Vec<Tweet>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tweets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tweets.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tweet> {
        self.tweets.iter()
    }

    pub fn as_slice(&self) -> &[Tweet] {
        &self.tweets
    }

    /// Newest known id; the anchor for incremental polls.
    pub fn newest_id(&self) -> Option<&TweetId> {
        self.tweets.first().map(|tweet| &tweet.id)
    }

    pub fn get(&self, id: &TweetId) -> Option<&Tweet> {
        // Descending order, so search with the comparison reversed.
        self.tweets
            .binary_search_by(|stored| id.cmp(&stored.id))
            .ok()
            .map(|idx| &self.tweets[idx])
    }

    pub fn contains(&self, id: &TweetId) -> bool {
        self.get(id).is_some()
    }
}

impl<'a> IntoIterator for &'a Collection {
    type Item = &'a Tweet;
    type IntoIter = std::slice::Iter<'a, Tweet>;

    fn into_iter(self) -> Self::IntoIter {
        self.tweets.iter()
    }
}

/// Upserts `incoming` into `current`.
///
/// A tweet whose id is already known replaces the stored one entirely. New ids
/// are added. The result is re-sorted newest first. An empty batch returns an
/// unchanged copy of `current`. Within one batch a repeated id resolves to its
/// last occurrence.
pub fn merge(current: &Collection, incoming: Vec<Tweet>) -> Collection {
    if incoming.is_empty() {
        return current.clone();
    }

    let mut by_id: BTreeMap<TweetId, Tweet> = current
        .tweets
        .iter()
        .map(|tweet| (tweet.id.clone(), tweet.clone()))
        .collect();
    for tweet in incoming {
        by_id.insert(tweet.id.clone(), tweet);
    }

    Collection {
        tweets: by_id.into_values().rev().collect(),
    }
}

/// Returns `current` without the tweet carrying `id`. Absent ids are a no-op.
pub fn remove(current: &Collection, id: &TweetId) -> Collection {
    Collection {
        tweets: current
            .tweets
            .iter()
            .filter(|tweet| &tweet.id != id)
            .cloned()
            .collect(),
    }
}

impl FromIterator<Tweet> for Collection {
    fn from_iter<I: IntoIterator<Item = Tweet>>(iter: I) -> Self {
        merge(&Collection::new(), iter.into_iter().collect())
    }
}
