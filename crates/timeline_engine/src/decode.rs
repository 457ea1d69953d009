use serde::Deserialize;

use crate::{ApiTweet, RefreshOutcome};

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid tweet list: {0}")]
    TweetList(#[source] serde_json::Error),
    #[error("invalid refresh response: {0}")]
    Refresh(#[source] serde_json::Error),
}

/// The refresh endpoint answers with either a tweet list or `{"gone": true}`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RefreshBody {
    Tweets(Vec<ApiTweet>),
    Tombstone { gone: bool },
}

/// Decode a JSON array of tweets. An empty body or `null` counts as an empty list.
pub fn decode_tweets(bytes: &[u8]) -> Result<Vec<ApiTweet>, DecodeError> {
    if is_blank(bytes) {
        return Ok(Vec::new());
    }
    let tweets: Option<Vec<ApiTweet>> =
        serde_json::from_slice(bytes).map_err(DecodeError::TweetList)?;
    Ok(tweets.unwrap_or_default())
}

/// Decode a refresh response; `{"gone": false}` is treated as "nothing changed".
pub fn decode_refresh(bytes: &[u8]) -> Result<RefreshOutcome, DecodeError> {
    if is_blank(bytes) {
        return Ok(RefreshOutcome::Tweets(Vec::new()));
    }
    let body: Option<RefreshBody> =
        serde_json::from_slice(bytes).map_err(DecodeError::Refresh)?;
    Ok(match body {
        Some(RefreshBody::Tweets(tweets)) => RefreshOutcome::Tweets(tweets),
        Some(RefreshBody::Tombstone { gone: true }) => RefreshOutcome::Gone,
        Some(RefreshBody::Tombstone { gone: false }) | None => {
            RefreshOutcome::Tweets(Vec::new())
        }
    })
}

fn is_blank(bytes: &[u8]) -> bool {
    bytes.iter().all(u8::is_ascii_whitespace)
}
