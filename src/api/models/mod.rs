//! API request and response data models.
//!
//! These structures define the public API contract: serde for (de)serialization,
//! utoipa annotations for the generated OpenAPI document. They are distinct
//! from the database models so the storage representation can evolve without
//! breaking the API (and so sensitive columns - passwords, tokens - never
//! leak into responses).
//!
//! - [`pagination`]: Cursor pagination request/response types
//! - [`users`]: Registration and profile payloads
//! - [`videos`]: Video upload metadata payloads
//! - [`reels`]: Reel payloads, delivery status, recipient views

pub mod pagination;
pub mod reels;
pub mod users;
pub mod videos;
