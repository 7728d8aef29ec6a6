//! Common type definitions for entity identifiers.
//!
//! All entities are identified by ULIDs rendered as 26-character Crockford
//! base32 strings. ULIDs are lexically sortable and time-ordered, which the
//! cursor pagination in [`crate::api::models::pagination`] relies on: sorting
//! ids descending sorts rows newest-first, and "id < cursor" means "older
//! than the cursor row".

use ulid::Ulid;

// Type aliases for IDs
pub type UserId = String;
pub type VideoId = String;
pub type ReelId = String;
pub type RecipientId = String;

/// Generate a fresh ULID string for a new entity or token.
pub fn new_id() -> String {
    Ulid::new().to_string()
}
