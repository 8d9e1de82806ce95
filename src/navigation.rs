//! The dashboard router: decides where a caller lands based on their session.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use utoipa::ToSchema;

use crate::{
    models::{NavigationDecision, Session},
    navigator::Navigator,
};

/// NavigationTarget
///
/// The closed set of destinations the router can resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS, ToSchema)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum NavigationTarget {
    /// Unauthenticated landing page.
    Login,
    /// Administrator area.
    Admin,
    /// Default destination for every other signed-in user.
    UserDashboard,
}

/// How a navigation treats the current history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationMode {
    /// Overwrite the current entry; "back" skips the page that navigated.
    Replace,
    Push,
}

impl NavigationMode {
    pub fn replaces_history(self) -> bool {
        matches!(self, NavigationMode::Replace)
    }
}

/// RoutePaths
///
/// Maps each [`NavigationTarget`] to a concrete path. Loaded from the environment by
/// [`crate::config::AppConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePaths {
    pub login: String,
    pub admin: String,
    pub user_dashboard: String,
}

impl Default for RoutePaths {
    fn default() -> Self {
        Self {
            login: "/login".to_string(),
            admin: "/admin".to_string(),
            user_dashboard: "/dashboard/user".to_string(),
        }
    }
}

impl RoutePaths {
    pub fn path(&self, target: NavigationTarget) -> &str {
        match target {
            NavigationTarget::Login => &self.login,
            NavigationTarget::Admin => &self.admin,
            NavigationTarget::UserDashboard => &self.user_dashboard,
        }
    }
}

/// decide
///
/// Pure and total: no session lands on the login page, an exact `admin` role lands
/// in the administrator area, and every other role (member, unknown, unset) lands
/// on the user dashboard.
pub fn decide(session: Option<&Session>) -> NavigationTarget {
    match session {
        None => NavigationTarget::Login,
        Some(session) if session.role.is_admin() => NavigationTarget::Admin,
        Some(_) => NavigationTarget::UserDashboard,
    }
}

/// route
///
/// Evaluates [`decide`] and dispatches the result to `navigator` as a replace-style
/// navigation. Returns the target that was dispatched.
pub fn route<N>(session: Option<&Session>, navigator: &N) -> NavigationTarget
where
    N: Navigator + ?Sized,
{
    let target = decide(session);
    tracing::debug!(
        destination = ?target,
        authenticated = session.is_some(),
        "dashboard router dispatching"
    );
    navigator.navigate(target, NavigationMode::Replace);
    target
}

/// Builds the JSON decision served to single-page clients.
pub fn decision(session: Option<&Session>, paths: &RoutePaths) -> NavigationDecision {
    let target = decide(session);
    NavigationDecision {
        target,
        path: paths.path(target).to_string(),
        replace: NavigationMode::Replace.replaces_history(),
        evaluated_at: Utc::now(),
    }
}
