use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::navigation::NavigationTarget;

/// The role string that grants access to the administrator area.
pub const ADMIN_ROLE: &str = "admin";
/// The role string of an ordinary signed-in member.
pub const MEMBER_ROLE: &str = "member";

// --- Directory Records ---

/// User
///
/// The canonical identity record stored in the `profiles` table. This is what the
/// session provider reads after a token has been verified.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, Default, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    // Nullable in the table: older profiles were created before roles existed.
    pub role: Option<String>,
}

// --- Session ---

/// Role
///
/// The RBAC attribute of a session. Matching is exact: only the literal string
/// `"admin"` is recognised as [`Role::Admin`]. Anything unrecognised keeps its raw
/// value in [`Role::Other`] so it can be echoed back, and a missing or empty role
/// is [`Role::Unspecified`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Role {
    Admin,
    Member,
    Other(String),
    #[default]
    Unspecified,
}

impl Role {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            None | Some("") => Role::Unspecified,
            Some(ADMIN_ROLE) => Role::Admin,
            Some(MEMBER_ROLE) => Role::Member,
            Some(other) => Role::Other(other.to_string()),
        }
    }

    /// The raw role string, or `None` when no role was set.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Role::Admin => Some(ADMIN_ROLE),
            Role::Member => Some(MEMBER_ROLE),
            Role::Other(raw) => Some(raw),
            Role::Unspecified => None,
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl From<Option<String>> for Role {
    fn from(raw: Option<String>) -> Self {
        Role::parse(raw.as_deref())
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.as_str() {
            Some(raw) => serializer.serialize_some(raw),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(Role::parse(raw.as_deref()))
    }
}

/// Session
///
/// The resolved, read-only view of the current authenticated actor. Presence is
/// expressed by the caller holding an `Option<Session>`; this struct only exists
/// when somebody is signed in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct Session {
    pub user_id: Uuid,
    pub email: String,
    #[serde(default)]
    #[ts(type = "string | null")]
    #[schema(value_type = Option<String>, example = "member")]
    pub role: Role,
}

impl From<User> for Session {
    fn from(user: User) -> Self {
        Self {
            user_id: user.id,
            email: user.email,
            role: user.role.into(),
        }
    }
}

// --- Response Payloads ---

/// NavigationDecision
///
/// JSON view of one router evaluation (GET /dashboard/target). Single-page clients
/// use it to perform the navigation themselves.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct NavigationDecision {
    pub target: NavigationTarget,
    /// The route path configured for `target`.
    #[schema(example = "/dashboard/user")]
    pub path: String,
    /// Always true: the router never leaves itself in the history stack.
    pub replace: bool,
    #[ts(type = "string")]
    pub evaluated_at: DateTime<Utc>,
}

/// PublicConfig
///
/// The ambient environment values the front-end is allowed to see (GET /config).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default, PartialEq)]
#[ts(export)]
pub struct PublicConfig {
    pub app_name: String,
    pub api_base_url: String,
    pub asset_host: String,
}
