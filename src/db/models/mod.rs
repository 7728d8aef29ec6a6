//! Database record models matching table schemas.
//!
//! Each struct here corresponds to a table row (deriving `sqlx::FromRow`) or
//! to the data a repository needs to insert/update one. Database models are
//! distinct from the API models in [`crate::api::models`] so storage and API
//! representations can evolve independently.
//!
//! - [`users`]: User accounts with verification/reset token fields
//! - [`videos`]: Uploaded video metadata
//! - [`reels`]: Reels, their delivery state, and the JSONB-embedded
//!   recipient collection

pub mod reels;
pub mod users;
pub mod videos;
