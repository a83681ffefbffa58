//! Integration tests for the Seko storefront.
//!
//! The tests in `tests/` talk to a running server over HTTP and are
//! `#[ignore]`d by default.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the storefront
//! cargo run -p seko-storefront
//!
//! # Run integration tests against it
//! SEKO_BASE_URL=http://localhost:3000 cargo test -p seko-integration-tests -- --ignored
//! ```
//!
//! The contact tests submit real messages; point them at a server whose
//! rate limiter is off (`SEKO_CONTACT_RATE_LIMIT=false`) when running the
//! suite repeatedly.

/// Base URL of the storefront under test (`SEKO_BASE_URL`, default localhost:3000).
#[must_use]
pub fn storefront_base_url() -> String {
    std::env::var("SEKO_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}
