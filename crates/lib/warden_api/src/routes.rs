//! Route templates and the per-operation access table.
//!
//! The guard chain looks each request up here by method and matched route
//! template. Operations missing from the table require authentication.

use warden_core::models::account::Role;

pub const POST_AUTH_LOGIN: &str = "/auth/login";
pub const POST_AUTH_LOGOUT: &str = "/auth/logout";
pub const USERS: &str = "/users";
pub const USERS_ID: &str = "/users/{id}";
pub const GET_HEALTH_LIVE: &str = "/health/live";
pub const GET_HEALTH_READY: &str = "/health/ready";

/// Who may call an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// No token needed.
    Public,
    /// Any valid, unrevoked token.
    Authenticated,
    /// Valid token whose role is listed.
    Roles(&'static [Role]),
}

impl Access {
    /// Roles the role gate must check, if any.
    pub fn required_roles(&self) -> Option<&'static [Role]> {
        match *self {
            Access::Roles(roles) => Some(roles),
            Access::Public | Access::Authenticated => None,
        }
    }
}

/// One row of the access table.
#[derive(Debug, Clone, Copy)]
pub struct Operation {
    pub method: &'static str,
    pub path: &'static str,
    pub access: Access,
}

const ANY_ROLE: &[Role] = &[Role::User, Role::Admin];

pub const OPERATIONS: &[Operation] = &[
    Operation { method: "GET", path: GET_HEALTH_LIVE, access: Access::Public },
    Operation { method: "GET", path: GET_HEALTH_READY, access: Access::Public },
    Operation { method: "POST", path: POST_AUTH_LOGIN, access: Access::Public },
    Operation { method: "POST", path: POST_AUTH_LOGOUT, access: Access::Authenticated },
    Operation { method: "POST", path: USERS, access: Access::Public },
    Operation { method: "GET", path: USERS, access: Access::Authenticated },
    Operation { method: "GET", path: USERS_ID, access: Access::Authenticated },
    Operation { method: "PATCH", path: USERS_ID, access: Access::Roles(ANY_ROLE) },
    Operation { method: "DELETE", path: USERS_ID, access: Access::Roles(ANY_ROLE) },
];

/// Access rule for `method` on route template `path`.
pub fn access_for(method: &str, path: &str) -> Access {
    OPERATIONS
        .iter()
        .find(|op| op.method == method && op.path == path)
        .map_or(Access::Authenticated, |op| op.access)
}
