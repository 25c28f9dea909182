//! Service layer for the relay.
//!
//! - Listing extraction (`fetch_listing`)
//! - Detail extraction with alternate-rendering fallback (`fetch_detail`)
//! - Message composition (`MessageFormatter`)

pub mod detail;
pub mod format;
pub mod listing;

pub use detail::{fetch_detail, parse_detail};
pub use format::MessageFormatter;
pub use listing::{fetch_listing, parse_listing};
