//! Data models representing database entities and API payloads.

/// Business entity and weekly pickup hours
pub mod business;
/// Payment account lifecycle model
pub mod payment_account;
/// Pickup slot value objects and generator configuration
pub mod slots;
