//! Per-request guard chain: authentication, then the role gate.

pub mod auth;
pub mod roles;

use axum::extract::{MatchedPath, Request};
use axum::http::Method;

use crate::routes::{self, Access};

/// Access rule for the route this request matched.
///
/// axum answers `HEAD` with the `GET` handler, so it shares the `GET` rule.
pub(crate) fn access_of(request: &Request) -> Access {
    let path = request
        .extensions()
        .get::<MatchedPath>()
        .map(MatchedPath::as_str)
        .unwrap_or_default();
    let method = if *request.method() == Method::HEAD {
        "GET"
    } else {
        request.method().as_str()
    };
    routes::access_for(method, path)
}
