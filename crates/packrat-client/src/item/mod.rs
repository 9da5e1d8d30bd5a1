//! Item persistence and client-side hierarchy queries.

pub mod inventory;
pub mod service;
