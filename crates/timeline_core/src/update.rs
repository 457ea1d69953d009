use timeline_logging::{timeline_debug, timeline_info, timeline_warn};

use crate::{Effect, FetchFailure, Msg, PagePurpose, RefetchOutcome, SyncPhase, TimelineState};

/// Pure update function: applies a message to state and returns any effects.
///
/// Results are applied to whatever the collection looks like when they arrive,
/// so a late stale response wins over an earlier fresh one.
pub fn update(mut state: TimelineState, msg: Msg) -> (TimelineState, Vec<Effect>) {
    let effects = match msg {
        Msg::Started => {
            timeline_info!("initial load requested");
            vec![state.begin_poll()]
        }
        Msg::PollTick => {
            if state.phase() == SyncPhase::Fetching {
                timeline_debug!("poll tick skipped: previous poll still in flight");
                Vec::new()
            } else {
                vec![state.begin_poll()]
            }
        }
        Msg::PageLoaded { purpose, result } => {
            if purpose == PagePurpose::Poll {
                state.finish_poll();
            }
            match result {
                // Both purposes discard the prior collection; an empty page changes nothing.
                Ok(batch) => state.replace_with(batch),
                Err(failure) => log_failure("page fetch", &failure),
            }
            Vec::new()
        }
        Msg::SinceLoaded { since, result } => {
            state.finish_poll();
            match result {
                Ok(batch) => {
                    timeline_debug!("{} new tweets since {}", batch.len(), since);
                    state.merge_batch(batch);
                }
                Err(failure) => log_failure("incremental fetch", &failure),
            }
            Vec::new()
        }
        Msg::FavoriteClicked(id) => vec![Effect::ToggleFavorite { id }],
        Msg::FavoriteToggled { id, result } => match result {
            Ok(batch) if batch.is_empty() => {
                timeline_debug!("favourite toggle for {} returned nothing; refetching", id);
                vec![Effect::Refetch { id }]
            }
            Ok(batch) => {
                state.merge_batch(batch);
                Vec::new()
            }
            Err(failure) => {
                log_failure("favourite toggle", &failure);
                Vec::new()
            }
        },
        Msg::RefetchClicked(id) => vec![Effect::Refetch { id }],
        Msg::Refetched { id, result } => {
            match result {
                Ok(RefetchOutcome::Tweets(batch)) => state.merge_batch(batch),
                Ok(RefetchOutcome::Gone) => {
                    timeline_info!("removing no longer existing tweet {}", id);
                    state.remove_tweet(&id);
                }
                Err(failure) => log_failure("refetch", &failure),
            }
            Vec::new()
        }
        Msg::DeleteClicked(id) => {
            // Optimistic and never rolled back.
            state.remove_tweet(&id);
            vec![Effect::Delete { id }]
        }
        Msg::DeleteCompleted { id, result } => match result {
            Ok(()) => Vec::new(),
            Err(failure) => {
                log_failure("delete", &failure);
                vec![Effect::Notify {
                    text: format!("Unable to delete tweet {id}: {}", failure.message),
                }]
            }
        },
        Msg::ForceReloadClicked => vec![Effect::TriggerForceReload],
        Msg::ForceReloadTriggered(result) => match result {
            Ok(()) => {
                let delay = state.settings().force_reload_delay;
                vec![
                    Effect::Notify {
                        text: format!(
                            "Force refresh triggered, reloading tweets in {}s",
                            delay.as_secs()
                        ),
                    },
                    Effect::ScheduleForceReload { delay },
                ]
            }
            Err(failure) => {
                log_failure("force reload trigger", &failure);
                vec![Effect::Notify {
                    text: format!("Unable to trigger force refresh: {}", failure.message),
                }]
            }
        },
        Msg::ForceReloadDue => vec![Effect::FetchPage {
            purpose: PagePurpose::ForceReload,
        }],
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn log_failure(operation: &str, failure: &FetchFailure) {
    timeline_warn!("{} failed: {}", operation, failure.message);
}
