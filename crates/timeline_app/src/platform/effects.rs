use std::sync::{mpsc, Arc};
use std::thread;

use timeline_core::{
    Effect, FetchFailure, Msg, PagePurpose, RefetchOutcome, Tweet, TweetId, TweetMedia,
    TweetPayload, TweetUser,
};
use timeline_engine::{
    ApiError, ApiTweet, EngineEvent, EngineHandle, PageKind, RefreshOutcome, TimelineApi,
};
use timeline_logging::{timeline_debug, timeline_info};

use super::app::AppEvent;
use super::ui::render::NotificationSink;

/// Turns core effects into engine requests and engine events back into messages.
pub(crate) struct EffectRunner {
    engine: EngineHandle,
    notifier: Box<dyn NotificationSink>,
}

impl EffectRunner {
    pub(crate) fn new(
        api: Arc<dyn TimelineApi>,
        notifier: Box<dyn NotificationSink>,
        event_tx: mpsc::Sender<AppEvent>,
    ) -> Self {
        let (engine, events) = EngineHandle::start(api);
        thread::spawn(move || {
            while let Some(event) = events.recv() {
                if event_tx.send(AppEvent::Msg(map_event(event))).is_err() {
                    break;
                }
            }
        });
        Self { engine, notifier }
    }

    pub(crate) fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchPage { purpose } => {
                    timeline_debug!("FetchPage purpose={:?}", purpose);
                    self.engine.fetch_page(map_purpose(purpose));
                }
                Effect::FetchSince { since } => {
                    timeline_debug!("FetchSince since={}", since);
                    self.engine.fetch_since(since.as_str());
                }
                Effect::ToggleFavorite { id } => {
                    timeline_info!("ToggleFavorite id={}", id);
                    self.engine.toggle_favorite(id.as_str());
                }
                Effect::Refetch { id } => {
                    timeline_info!("Refetch id={}", id);
                    self.engine.refetch(id.as_str());
                }
                Effect::Delete { id } => {
                    timeline_info!("Delete id={}", id);
                    self.engine.delete(id.as_str());
                }
                Effect::TriggerForceReload => {
                    timeline_info!("TriggerForceReload");
                    self.engine.trigger_force_reload();
                }
                Effect::ScheduleForceReload { delay } => {
                    self.engine.schedule_force_reload(delay);
                }
                Effect::Notify { text } => {
                    timeline_info!("notify: {}", text);
                    self.notifier.notify(&text);
                }
            }
        }
    }
}

fn map_purpose(purpose: PagePurpose) -> PageKind {
    match purpose {
        PagePurpose::Poll => PageKind::Poll,
        PagePurpose::ForceReload => PageKind::ForceReload,
    }
}

fn map_kind(kind: PageKind) -> PagePurpose {
    match kind {
        PageKind::Poll => PagePurpose::Poll,
        PageKind::ForceReload => PagePurpose::ForceReload,
    }
}

pub(crate) fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::PageLoaded { kind, result } => Msg::PageLoaded {
            purpose: map_kind(kind),
            result: map_batch(result),
        },
        EngineEvent::SinceLoaded { since, result } => Msg::SinceLoaded {
            since: TweetId::new(since),
            result: map_batch(result),
        },
        EngineEvent::FavoriteToggled { id, result } => Msg::FavoriteToggled {
            id: TweetId::new(id),
            result: map_batch(result),
        },
        EngineEvent::Refetched { id, result } => Msg::Refetched {
            id: TweetId::new(id),
            result: result
                .map(|outcome| match outcome {
                    RefreshOutcome::Tweets(tweets) => {
                        RefetchOutcome::Tweets(tweets.into_iter().map(map_tweet).collect())
                    }
                    RefreshOutcome::Gone => RefetchOutcome::Gone,
                })
                .map_err(map_error),
        },
        EngineEvent::Deleted { id, result } => Msg::DeleteCompleted {
            id: TweetId::new(id),
            result: result.map_err(map_error),
        },
        EngineEvent::ForceReloadTriggered { result } => {
            Msg::ForceReloadTriggered(result.map_err(map_error))
        }
        EngineEvent::ForceReloadDue => Msg::ForceReloadDue,
    }
}

fn map_batch(result: Result<Vec<ApiTweet>, ApiError>) -> Result<Vec<Tweet>, FetchFailure> {
    result
        .map(|tweets| tweets.into_iter().map(map_tweet).collect())
        .map_err(map_error)
}

fn map_error(err: ApiError) -> FetchFailure {
    FetchFailure::new(err.to_string())
}

fn map_tweet(tweet: ApiTweet) -> Tweet {
    Tweet {
        id: TweetId::new(tweet.id),
        favorited: tweet.favorited,
        payload: TweetPayload {
            text: tweet.text,
            posted: tweet.posted,
            user: TweetUser {
                id: tweet.user.id,
                screen_name: tweet.user.screen_name,
                image: tweet.user.image,
            },
            images: tweet
                .images
                .into_iter()
                .map(|media| TweetMedia {
                    id: media.id,
                    image: media.image,
                })
                .collect(),
        },
    }
}
