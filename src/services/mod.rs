//! Business logic services.
//!
//! Services contain core business logic separated from HTTP handlers:
//! slot generation, the payment account lifecycle, and inbound webhook
//! verification.

pub mod payments_service;
pub mod pickup_service;
pub mod webhook_service;
