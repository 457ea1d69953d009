use std::time::Duration;

use timeline_logging::timeline_debug;

use crate::view_model::{TimelineViewModel, TweetRowView};
use crate::{merge, remove, Collection, Effect, PagePurpose, Tweet, TweetId};

/// Timer settings for the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerSettings {
    pub poll_interval: Duration,
    pub force_reload_delay: Duration,
}

impl Default for SchedulerSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(30),
            force_reload_delay: Duration::from_secs(10),
        }
    }
}

/// Periodic polling cycle. Merging and removing happen inside a single event
/// turn, so only the wait for the network is observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncPhase {
    #[default]
    Idle,
    Fetching,
}

/// The scheduler's context object: owns the collection and the polling cycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TimelineState {
    collection: Collection,
    settings: SchedulerSettings,
    phase: SyncPhase,
    applied_responses: u64,
    dirty: bool,
}

impl TimelineState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: SchedulerSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn settings(&self) -> SchedulerSettings {
        self.settings
    }

    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    pub fn applied_responses(&self) -> u64 {
        self.applied_responses
    }

    pub fn view(&self) -> TimelineViewModel {
        TimelineViewModel {
            phase: self.phase,
            tweet_count: self.collection.len(),
            newest_id: self.collection.newest_id().cloned(),
            tweets: self.collection.iter().map(row_view).collect(),
            applied_responses: self.applied_responses,
        }
    }

    /// Returns whether the collection changed since the last call, then clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Starts a periodic fetch: since-query when something is cached, full page otherwise.
    pub(crate) fn begin_poll(&mut self) -> Effect {
        self.phase = SyncPhase::Fetching;
        match self.collection.newest_id() {
            Some(newest) => Effect::FetchSince {
                since: newest.clone(),
            },
            None => Effect::FetchPage {
                purpose: PagePurpose::Poll,
            },
        }
    }

    pub(crate) fn finish_poll(&mut self) {
        self.phase = SyncPhase::Idle;
    }

    pub(crate) fn merge_batch(&mut self, batch: Vec<Tweet>) {
        self.applied_responses += 1;
        if batch.is_empty() {
            return;
        }
        let next = merge(&self.collection, batch);
        timeline_debug!(
            "merged batch: {} -> {} tweets",
            self.collection.len(),
            next.len()
        );
        self.set_collection(next);
    }

    /// Applies a full page against an empty prior collection, discarding what was cached.
    pub(crate) fn replace_with(&mut self, batch: Vec<Tweet>) {
        self.applied_responses += 1;
        if batch.is_empty() {
            return;
        }
        let next = merge(&Collection::new(), batch);
        timeline_debug!(
            "replaced collection: {} -> {} tweets",
            self.collection.len(),
            next.len()
        );
        self.set_collection(next);
    }

    pub(crate) fn remove_tweet(&mut self, id: &TweetId) -> bool {
        if !self.collection.contains(id) {
            return false;
        }
        let next = remove(&self.collection, id);
        self.set_collection(next);
        true
    }

    fn set_collection(&mut self, next: Collection) {
        if next != self.collection {
            self.collection = next;
            self.dirty = true;
        }
    }
}

fn row_view(tweet: &Tweet) -> TweetRowView {
    TweetRowView {
        id: tweet.id.clone(),
        favorited: tweet.favorited,
        screen_name: tweet.payload.user.screen_name.clone(),
        image_count: tweet.payload.images.len(),
        text: tweet.payload.text.clone(),
    }
}
