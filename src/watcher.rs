use tokio::{
    sync::watch,
    task::{JoinError, JoinHandle},
};

use crate::{models::Session, navigation, navigator::Navigator};

/// SessionFeed
///
/// The upstream side of the observer: whoever owns authentication publishes the
/// current session here. Only the latest value is retained.
pub struct SessionFeed {
    sender: watch::Sender<Option<Session>>,
}

impl SessionFeed {
    pub fn new(initial: Option<Session>) -> Self {
        let (sender, _) = watch::channel(initial);
        Self { sender }
    }

    /// Replaces the current session and notifies every subscriber.
    pub fn publish(&self, session: Option<Session>) {
        self.sender.send_replace(session);
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.sender.subscribe()
    }

    pub fn current(&self) -> Option<Session> {
        self.sender.borrow().clone()
    }
}

/// SessionWatcher
///
/// Re-runs the dashboard router every time the observed session changes.
///
/// One evaluation happens for the value present when the task starts, then one per
/// change notification. A newer session supersedes any value that was published
/// but not yet evaluated. The task stops when the feed is dropped.
pub struct SessionWatcher {
    handle: JoinHandle<()>,
}

impl SessionWatcher {
    pub fn spawn<N>(mut receiver: watch::Receiver<Option<Session>>, navigator: N) -> Self
    where
        N: Navigator + 'static,
    {
        let handle = tokio::spawn(async move {
            loop {
                let session = receiver.borrow_and_update().clone();
                navigation::route(session.as_ref(), &navigator);

                if receiver.changed().await.is_err() {
                    tracing::debug!("session feed closed, watcher stopping");
                    break;
                }
            }
        });

        Self { handle }
    }

    pub fn abort(&self) {
        self.handle.abort();
    }

    /// Waits for the watcher to stop (feed dropped or aborted).
    pub async fn join(self) -> Result<(), JoinError> {
        self.handle.await
    }
}
