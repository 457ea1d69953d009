//! Timeline engine: remote API client and effect execution.
mod client;
mod decode;
mod engine;
mod types;

pub use client::{ClientSettings, ReqwestTimelineClient, TimelineApi};
pub use decode::{decode_refresh, decode_tweets, DecodeError};
pub use engine::{EngineEvents, EngineHandle};
pub use types::{
    ApiError, ApiMedia, ApiTweet, ApiUser, EngineEvent, FailureKind, PageKind, RefreshOutcome,
};
