//! Report output for the merged model.
//!
//! - [`table`]: `Display` impls printing aligned year/value tables
//! - [`json`]: a nested JSON document keyed by authority code
//!
//! Both read the store as-is; nothing here mutates it.

pub mod json;
pub mod table;
