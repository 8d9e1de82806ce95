use axum::response::Redirect;
use std::sync::{Arc, Mutex, PoisonError};

use crate::navigation::{NavigationMode, NavigationTarget, RoutePaths};

/// Navigator
///
/// The navigation collaborator. The router hands it a target and a history mode
/// and never looks at the outcome.
pub trait Navigator: Send + Sync {
    fn navigate(&self, target: NavigationTarget, mode: NavigationMode);
}

impl<N: Navigator + ?Sized> Navigator for Arc<N> {
    fn navigate(&self, target: NavigationTarget, mode: NavigationMode) {
        (**self).navigate(target, mode);
    }
}

/// redirect_for
///
/// HTTP form of a replace-style navigation: a `303 See Other` to the target path.
/// The browser never stores the redirecting URL in its history.
pub fn redirect_for(target: NavigationTarget, paths: &RoutePaths) -> Redirect {
    Redirect::to(paths.path(target))
}

/// RecordingNavigator
///
/// Keeps every navigation it receives, oldest first. Used by embedders that poll
/// for the latest destination and by the watcher tests.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    history: Mutex<Vec<(NavigationTarget, NavigationMode)>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> Vec<(NavigationTarget, NavigationMode)> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last(&self) -> Option<(NavigationTarget, NavigationMode)> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .copied()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, target: NavigationTarget, mode: NavigationMode) {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((target, mode));
    }
}
