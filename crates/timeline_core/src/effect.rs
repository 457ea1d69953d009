use std::time::Duration;

use crate::TweetId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch the first full page.
    FetchPage { purpose: PagePurpose },
    /// Fetch only tweets newer than `since`.
    FetchSince { since: TweetId },
    /// Ask the remote side to flip the favourite flag.
    ToggleFavorite { id: TweetId },
    /// Ask for the canonical current state of one tweet.
    Refetch { id: TweetId },
    /// Remote delete; the local removal already happened.
    Delete { id: TweetId },
    /// Ask the remote side to refresh its own copy of the feed.
    TriggerForceReload,
    /// Arm the one-shot timer that later delivers `Msg::ForceReloadDue`.
    ScheduleForceReload { delay: Duration },
    /// Transient operator message.
    Notify { text: String },
}

/// Why a full page is being fetched; decides merge versus replace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagePurpose {
    /// Initial load, or a periodic poll with nothing cached yet.
    Poll,
    /// Delayed force reload: the result replaces the collection.
    ForceReload,
}
