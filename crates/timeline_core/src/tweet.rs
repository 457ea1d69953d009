use std::cmp::Ordering;
use std::fmt;

use chrono::{DateTime, Utc};

/// Identifier of a feed item.
///
/// Remote identifiers are large decimal numbers transported as strings, so they
/// are kept as text and ordered without parsing: a shorter (normalised) string is
/// smaller, equal lengths compare byte-wise. For decimal strings this is numeric
/// order at any magnitude; for anything else it is still a total order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TweetId(String);

impl TweetId {
    /// Builds an identifier. Decimal ids drop surrounding whitespace and leading
    /// zeros so that `"007"` and `"7"` are the same item; any other id is kept
    /// verbatim.
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Self(raw);
        }
        let digits = trimmed.trim_start_matches('0');
        if digits.is_empty() {
            return Self("0".to_string());
        }
        if digits.len() == raw.len() {
            return Self(raw);
        }
        Self(digits.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Ord for TweetId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .len()
            .cmp(&other.0.len())
            .then_with(|| self.0.as_bytes().cmp(other.0.as_bytes()))
    }
}

impl PartialOrd for TweetId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for TweetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TweetId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<u64> for TweetId {
    fn from(raw: u64) -> Self {
        Self(raw.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TweetUser {
    pub id: i64,
    pub screen_name: String,
    pub image: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TweetMedia {
    pub id: i64,
    pub image: String,
}

/// Content fields the reconciler carries but never inspects.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TweetPayload {
    pub text: String,
    pub posted: Option<DateTime<Utc>>,
    pub user: TweetUser,
    pub images: Vec<TweetMedia>,
}

/// One feed entry. Identity is the `id`; everything else is replaced wholesale
/// when a newer copy arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tweet {
    pub id: TweetId,
    pub favorited: bool,
    pub payload: TweetPayload,
}

impl Tweet {
    pub fn new(id: impl Into<TweetId>) -> Self {
        Self {
            id: id.into(),
            favorited: false,
            payload: TweetPayload::default(),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.payload.text = text.into();
        self
    }

    pub fn with_favorited(mut self, favorited: bool) -> Self {
        self.favorited = favorited;
        self
    }
}
