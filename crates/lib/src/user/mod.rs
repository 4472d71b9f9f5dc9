//! User records for Userdesk
//!
//! Defines the stored record, its role, and the two request payloads that create and
//! modify it. Payload fields are `Option`s so that "omitted" and "supplied but empty"
//! stay distinguishable all the way into the store.

pub mod types;

pub use types::*;
