//! Repository implementations for database access.
//!
//! One repository per aggregate, each implementing the [`Repository`] trait
//! plus whatever key-addressed lookups and bulk operations the aggregate
//! needs:
//!
//! - [`Users`]: accounts; extra lookups by email and by the
//!   verification/reset tokens
//! - [`Videos`]: uploaded video metadata
//! - [`Reels`]: reels with the embedded recipient collection, the
//!   cursor-paginated listing, and the bulk ownership claim
//!
//! Every read predicate excludes soft-deleted rows; updates and deletes
//! check affected-row counts, which doubles as the optimistic-concurrency
//! gate for "did my write actually take effect".

pub mod reels;
pub mod repository;
pub mod users;
pub mod videos;

pub use reels::Reels;
pub use repository::Repository;
pub use users::Users;
pub use videos::Videos;
