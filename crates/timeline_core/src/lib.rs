//! Timeline core: collection reconciliation and the pure sync state machine.
mod effect;
mod msg;
mod reconcile;
mod state;
mod tweet;
mod update;
mod view_model;

pub use effect::{Effect, PagePurpose};
pub use msg::{FetchFailure, Msg, RefetchOutcome};
pub use reconcile::{merge, remove, Collection};
pub use state::{SchedulerSettings, SyncPhase, TimelineState};
pub use tweet::{Tweet, TweetId, TweetMedia, TweetPayload, TweetUser};
pub use update::update;
pub use view_model::{TimelineViewModel, TweetRowView};
