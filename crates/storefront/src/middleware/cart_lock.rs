//! Per-session serialization of cart requests.
//!
//! Cart handlers load the session's lines, change them and write them back.
//! Two overlapping requests carrying the same session cookie would otherwise
//! both start from the same lines and the later write would drop the
//! earlier change. This middleware sits outside the session layer, so the
//! lock is held until the session store has been written.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use axum::{
    extract::{Request, State},
    http::header::COOKIE,
    middleware::Next,
    response::Response,
};
use tower_sessions::cookie::Cookie;

use crate::middleware::session::SESSION_COOKIE_NAME;
use crate::state::AppState;

/// Path prefix of the routes that read and write the cart.
pub const CART_PATH_PREFIX: &str = "/api/carrito";

type SessionLock = Arc<tokio::sync::Mutex<()>>;

/// One async lock per session cookie, dropped once nobody holds or awaits it.
#[derive(Debug, Default)]
pub struct CartLocks {
    locks: Mutex<HashMap<String, SessionLock>>,
}

impl CartLocks {
    fn acquire_handle(&self, key: &str) -> SessionLock {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(key.to_string()).or_default())
    }

    fn release_handle(&self, key: &str, handle: SessionLock) {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        drop(handle);
        if locks
            .get(key)
            .is_some_and(|lock| Arc::strong_count(lock) == 1)
        {
            locks.remove(key);
        }
    }

    /// Number of sessions with a cart request in flight.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

fn session_cookie(request: &Request) -> Option<String> {
    request
        .headers()
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(|cookie| cookie.value().to_string())
}

/// Run cart requests of one session one at a time.
///
/// Requests without a session cookie start a fresh session and pass straight
/// through, as do non-cart routes.
pub async fn cart_lock_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    if !request.uri().path().starts_with(CART_PATH_PREFIX) {
        return next.run(request).await;
    }
    let Some(key) = session_cookie(&request) else {
        return next.run(request).await;
    };

    let locks = state.cart_locks();
    let handle = locks.acquire_handle(&key);
    let guard = handle.lock().await;
    let response = next.run(request).await;
    drop(guard);
    locks.release_handle(&key, handle);

    response
}
