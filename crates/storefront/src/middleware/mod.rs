//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, added in `main`)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Security headers (nosniff, frame denial, no caching)
//! 5. Cart lock (one cart request per session at a time)
//! 6. Session layer (tower-sessions, in-memory store, holds the cart)
//! 7. Rate limiting on the contact endpoint (governor)

pub mod cart_lock;
pub mod rate_limit;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use cart_lock::{CartLocks, cart_lock_middleware};
pub use rate_limit::contact_rate_limiter;
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::create_session_layer;
