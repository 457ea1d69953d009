use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use timeline_logging::{timeline_debug, timeline_warn};

use crate::{EngineEvent, PageKind, TimelineApi};

enum EngineCommand {
    FetchPage { kind: PageKind },
    FetchSince { since: String },
    ToggleFavorite { id: String },
    Refetch { id: String },
    Delete { id: String },
    TriggerForceReload,
    ScheduleForceReload { delay: Duration },
}

/// Submits requests to the background runtime. Cheap to clone.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

/// Receiving end for completed requests, in completion order.
pub struct EngineEvents {
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    /// Spawns the engine thread. It runs until every handle is dropped; requests
    /// and timers still pending at that point are abandoned.
    pub fn start(api: Arc<dyn TimelineApi>) -> (Self, EngineEvents) {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                let api = api.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(api.as_ref(), command, event_tx).await;
                });
            }
        });

        (Self { cmd_tx }, EngineEvents { event_rx })
    }

    pub fn fetch_page(&self, kind: PageKind) {
        self.send(EngineCommand::FetchPage { kind });
    }

    pub fn fetch_since(&self, since: impl Into<String>) {
        self.send(EngineCommand::FetchSince {
            since: since.into(),
        });
    }

    pub fn toggle_favorite(&self, id: impl Into<String>) {
        self.send(EngineCommand::ToggleFavorite { id: id.into() });
    }

    pub fn refetch(&self, id: impl Into<String>) {
        self.send(EngineCommand::Refetch { id: id.into() });
    }

    pub fn delete(&self, id: impl Into<String>) {
        self.send(EngineCommand::Delete { id: id.into() });
    }

    pub fn trigger_force_reload(&self) {
        self.send(EngineCommand::TriggerForceReload);
    }

    /// Emits `EngineEvent::ForceReloadDue` once `delay` has passed. Not cancellable.
    pub fn schedule_force_reload(&self, delay: Duration) {
        self.send(EngineCommand::ScheduleForceReload { delay });
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            timeline_warn!("engine thread is gone; dropping command");
        }
    }
}

impl EngineEvents {
    /// Blocks until the next event; `None` once the engine has shut down.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    api: &dyn TimelineApi,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::FetchPage { kind } => EngineEvent::PageLoaded {
            kind,
            result: api.fetch_page(1).await,
        },
        EngineCommand::FetchSince { since } => {
            let result = api.fetch_since(&since).await;
            EngineEvent::SinceLoaded { since, result }
        }
        EngineCommand::ToggleFavorite { id } => {
            let result = api.toggle_favorite(&id).await;
            EngineEvent::FavoriteToggled { id, result }
        }
        EngineCommand::Refetch { id } => {
            let result = api.refetch(&id).await;
            EngineEvent::Refetched { id, result }
        }
        EngineCommand::Delete { id } => {
            let result = api.delete(&id).await;
            EngineEvent::Deleted { id, result }
        }
        EngineCommand::TriggerForceReload => EngineEvent::ForceReloadTriggered {
            result: api.trigger_force_reload().await,
        },
        EngineCommand::ScheduleForceReload { delay } => {
            timeline_debug!("force reload armed for {:?}", delay);
            tokio::time::sleep(delay).await;
            EngineEvent::ForceReloadDue
        }
    };
    // The receiver may already be gone during shutdown.
    let _ = event_tx.send(event);
}
