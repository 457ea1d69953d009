use crate::{SyncPhase, TweetId};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TimelineViewModel {
    pub phase: SyncPhase,
    pub tweet_count: usize,
    pub newest_id: Option<TweetId>,
    pub tweets: Vec<TweetRowView>,
    pub applied_responses: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TweetRowView {
    pub id: TweetId,
    pub favorited: bool,
    pub screen_name: String,
    pub image_count: usize,
    pub text: String,
}
