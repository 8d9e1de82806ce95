/// Router Module Index
///
/// Routes are split by access level so that the authentication layer is applied
/// per module rather than per handler.

/// Routes reachable by anyone. The dashboard router lives here: being signed out
/// is one of its normal inputs.
pub mod public;

/// Routes behind the `AuthUser` middleware. Requires a resolved session.
pub mod authenticated;
