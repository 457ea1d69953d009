use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Tweet as served by the timeline API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiTweet {
    #[serde(deserialize_with = "id_from_string_or_number")]
    pub id: String,
    #[serde(default)]
    pub favorited: bool,
    #[serde(default)]
    pub images: Vec<ApiMedia>,
    #[serde(default)]
    pub posted: Option<DateTime<Utc>>,
    #[serde(default)]
    pub user: ApiUser,
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ApiUser {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub screen_name: String,
    #[serde(default)]
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApiMedia {
    #[serde(default)]
    pub id: i64,
    pub image: String,
}

// Ids are sent as strings to survive JSON number precision; accept bare numbers too.
fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(text) => text,
        RawId::Number(number) => number.to_string(),
    })
}

/// Result of a single-tweet refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    Tweets(Vec<ApiTweet>),
    Gone,
}

/// Which full-page fetch a result belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    Poll,
    ForceReload,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    PageLoaded {
        kind: PageKind,
        result: Result<Vec<ApiTweet>, ApiError>,
    },
    SinceLoaded {
        since: String,
        result: Result<Vec<ApiTweet>, ApiError>,
    },
    FavoriteToggled {
        id: String,
        result: Result<Vec<ApiTweet>, ApiError>,
    },
    Refetched {
        id: String,
        result: Result<RefreshOutcome, ApiError>,
    },
    Deleted {
        id: String,
        result: Result<(), ApiError>,
    },
    ForceReloadTriggered {
        result: Result<(), ApiError>,
    },
    /// The one-shot force-reload delay elapsed.
    ForceReloadDue,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Decode,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Decode => write!(f, "undecodable response"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
