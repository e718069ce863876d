//! HTTP request handlers (route handlers).
//!
//! Each handler is an async function that:
//! 1. Receives HTTP request data (JSON body, URL params, etc.)
//! 2. Delegates to a service for the actual work
//! 3. Returns HTTP response (JSON, status code)

/// Service health endpoint
pub mod health;
/// Payment account lifecycle endpoints
pub mod payments;
/// Pickup slot listing endpoint
pub mod pickup;
/// Inbound payments webhook endpoint
pub mod webhooks;
