//! Item entity and reserved-tag handling.

pub mod model;
pub mod reserved;
