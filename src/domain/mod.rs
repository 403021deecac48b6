//! Domain modules organized as vertical slices.
//!
//! Each sub-module contains what it needs of:
//! - `mod.rs` — Rich domain types (validated, business-logic-ready)
//! - `wire.rs` — Raw serde structs matching upstream responses
//! - `convert.rs` — `TryFrom` conversions with validation
//! - `client.rs` — Sub-client with HTTP methods and caching

pub mod asset;
pub mod price_history;
pub mod ratio;
