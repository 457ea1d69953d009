use crate::{PagePurpose, Tweet, TweetId};

/// Transport-level failure reported back by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub message: String,
}

impl FetchFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// What a single-tweet refetch came back with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefetchOutcome {
    /// Current copies; possibly empty, meaning nothing changed.
    Tweets(Vec<Tweet>),
    /// The tweet no longer exists remotely.
    Gone,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Application start: kick off the initial load.
    Started,
    /// Periodic poll timer fired.
    PollTick,
    /// A full-page fetch finished.
    PageLoaded {
        purpose: PagePurpose,
        result: Result<Vec<Tweet>, FetchFailure>,
    },
    /// An incremental fetch anchored on `since` finished.
    SinceLoaded {
        since: TweetId,
        result: Result<Vec<Tweet>, FetchFailure>,
    },
    /// User toggled the favourite flag of a tweet.
    FavoriteClicked(TweetId),
    /// Remote favourite toggle answered.
    FavoriteToggled {
        id: TweetId,
        result: Result<Vec<Tweet>, FetchFailure>,
    },
    /// User asked for a single tweet to be refreshed.
    RefetchClicked(TweetId),
    /// Single-tweet refetch answered.
    Refetched {
        id: TweetId,
        result: Result<RefetchOutcome, FetchFailure>,
    },
    /// User deleted a tweet.
    DeleteClicked(TweetId),
    /// Remote delete answered.
    DeleteCompleted {
        id: TweetId,
        result: Result<(), FetchFailure>,
    },
    /// User requested a force reload.
    ForceReloadClicked,
    /// Remote side acknowledged (or refused) the force reload.
    ForceReloadTriggered(Result<(), FetchFailure>),
    /// The delayed force-reload timer fired.
    ForceReloadDue,
    /// UI/render tick.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
