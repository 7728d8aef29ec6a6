//! HTTP request handlers for all API endpoints.
//!
//! Handlers validate and deserialize the request, resolve the caller via
//! [`crate::auth::CurrentUser`] where an identity is required, execute the
//! operation through the repositories in [`crate::db::handlers`], and
//! serialize the response. They return [`crate::errors::Error`], which maps
//! to the appropriate HTTP status code.
//!
//! - [`users`]: Registration (including the retroactive reel ownership
//!   claim) and current-user profile operations
//! - [`videos`]: Video metadata registration and lookup
//! - [`reels`]: Reel CRUD, email confirmation, recipient management, and
//!   the cursor-paginated listing

pub mod reels;
pub mod users;
pub mod videos;

#[cfg(test)]
mod tests;
