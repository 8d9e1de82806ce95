use dashboard_router::{
    models::{Role, Session},
    navigation::{NavigationMode, NavigationTarget},
    navigator::{Navigator, RecordingNavigator},
    watcher::{SessionFeed, SessionWatcher},
};
use std::sync::Arc;
use tokio::sync::mpsc;
use uuid::Uuid;

// --- Test Navigator ---

/// Forwards every navigation to a channel so the test can await it.
struct ChannelNavigator {
    tx: mpsc::UnboundedSender<(NavigationTarget, NavigationMode)>,
}

impl Navigator for ChannelNavigator {
    fn navigate(&self, target: NavigationTarget, mode: NavigationMode) {
        let _ = self.tx.send((target, mode));
    }
}

fn session(role: Role) -> Session {
    Session {
        user_id: Uuid::from_u128(42),
        email: "watcher@example.com".to_string(),
        role,
    }
}

// --- Tests ---

#[tokio::test]
async fn test_watcher_reevaluates_on_every_change() {
    let feed = SessionFeed::new(None);
    let (tx, mut rx) = mpsc::unbounded_channel();
    let watcher = SessionWatcher::spawn(feed.subscribe(), ChannelNavigator { tx });

    assert_eq!(
        rx.recv().await,
        Some((NavigationTarget::Login, NavigationMode::Replace))
    );

    feed.publish(Some(session(Role::Admin)));
    assert_eq!(
        rx.recv().await,
        Some((NavigationTarget::Admin, NavigationMode::Replace))
    );

    feed.publish(Some(session(Role::Member)));
    assert_eq!(
        rx.recv().await,
        Some((NavigationTarget::UserDashboard, NavigationMode::Replace))
    );

    feed.publish(None);
    assert_eq!(
        rx.recv().await,
        Some((NavigationTarget::Login, NavigationMode::Replace))
    );

    drop(feed);
    watcher.join().await.unwrap();
    // The navigator was moved into the task; its sender is gone once the task ends.
    assert_eq!(rx.recv().await, None);
}

#[tokio::test]
async fn test_latest_session_supersedes_unevaluated_ones() {
    let feed = SessionFeed::new(None);
    let navigator = Arc::new(RecordingNavigator::new());
    let watcher = SessionWatcher::spawn(feed.subscribe(), navigator.clone());

    // The current-thread test runtime has not polled the watcher yet, so it only
    // ever sees the last value.
    feed.publish(Some(session(Role::Admin)));
    feed.publish(Some(session(Role::Member)));

    drop(feed);
    watcher.join().await.unwrap();

    assert_eq!(
        navigator.history(),
        vec![(NavigationTarget::UserDashboard, NavigationMode::Replace)]
    );
}

#[tokio::test]
async fn test_feed_reports_current_session() {
    let feed = SessionFeed::new(Some(session(Role::Other("guest".to_string()))));
    assert_eq!(
        feed.current().map(|s| s.role),
        Some(Role::Other("guest".to_string()))
    );

    feed.publish(None);
    assert!(feed.current().is_none());
}

#[tokio::test]
async fn test_aborted_watcher_stops_navigating() {
    let feed = SessionFeed::new(None);
    let (tx, mut rx) = mpsc::unbounded_channel();
    let watcher = SessionWatcher::spawn(feed.subscribe(), ChannelNavigator { tx });

    assert_eq!(
        rx.recv().await.map(|(target, _)| target),
        Some(NavigationTarget::Login)
    );

    watcher.abort();
    let result = watcher.join().await;
    assert!(result.unwrap_err().is_cancelled());

    feed.publish(Some(session(Role::Admin)));
    // Task (and with it the only sender) is gone.
    assert_eq!(rx.recv().await, None);
}
