//! Database layer for data persistence and access.
//!
//! This module implements the data access layer using SQLx with PostgreSQL.
//! It follows the Repository pattern to provide clean abstractions over
//! database operations.
//!
//! # Modules
//!
//! - [`handlers`]: Repository implementations for CRUD operations
//! - [`models`]: Database record structures matching table schemas
//! - [`errors`]: Database-specific error types
//!
//! # Repository Pattern
//!
//! The [`handlers`] module provides one repository per aggregate (users,
//! videos, reels). Each repository wraps a `&mut PgConnection`, so callers
//! decide whether operations run on a pooled connection or inside a
//! transaction:
//!
//! ```ignore
//! use reeldrop::db::handlers::{Repository, Users};
//!
//! async fn example(pool: &sqlx::PgPool) -> Result<(), Box<dyn std::error::Error>> {
//!     let mut tx = pool.begin().await?;
//!     let mut users = Users::new(&mut tx);
//!     let user = users.get_by_email("user@example.com").await?;
//!     tx.commit().await?;
//!     Ok(())
//! }
//! ```
//!
//! # Soft deletion
//!
//! Rows are never physically removed: deletion sets `deleted_at`, and every
//! read predicate carries `deleted_at IS NULL`. The same scheme applies one
//! level down to the recipient elements inside a reel's JSONB column, where
//! filtering happens in the column codec instead of SQL
//! (see [`models::reels::Recipients`]).
//!
//! # Migrations
//!
//! Database migrations are managed by SQLx and located in the `migrations/`
//! directory. The [`crate::migrator`] function provides access to the
//! migrator.

pub mod errors;
pub mod handlers;
pub mod models;
