//! API layer for HTTP request handling and data models.
//!
//! - **[`handlers`]**: Axum route handlers for all API endpoints
//! - **[`models`]**: Request/response data structures for API communication
//!
//! The API surface lives under `/v1`:
//!
//! - **Users** (`/v1/users`, `/v1/me`): registration and profile management
//! - **Videos** (`/v1/videos`): upload metadata registration
//! - **Reels** (`/v1/reels`): reel lifecycle, email confirmation, recipient
//!   management, and the paginated listing
//!
//! All endpoints are documented with OpenAPI annotations using `utoipa`;
//! the rendered documentation is served at `/docs`.

pub mod handlers;
pub mod models;
