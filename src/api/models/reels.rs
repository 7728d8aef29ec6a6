//! API request/response models for reels.

use super::pagination::{Pageable, PaginationData};
use crate::db::models::reels::{Recipient, Reel, ReelFilter};
use crate::types::{RecipientId, ReelId, UserId, VideoId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Where a reel sits in the delivery workflow.
///
/// Reels start `unconfirmed`; confirming the contact email schedules
/// delivery, which then either completes (`delivered`) or fails (`failed`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "reel_delivery_status", rename_all = "lowercase")]
pub enum DeliveryStatus {
    Unconfirmed,
    Scheduled,
    Failed,
    Delivered,
}

impl DeliveryStatus {
    /// Parse a status string, yielding `None` for anything unknown.
    ///
    /// Listing filters use this so an unrecognized filter value means "no
    /// filtering" rather than an error.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "unconfirmed" => Some(Self::Unconfirmed),
            "scheduled" => Some(Self::Scheduled),
            "failed" => Some(Self::Failed),
            "delivered" => Some(Self::Delivered),
            _ => None,
        }
    }
}

/// Request body for creating a reel.
///
/// Reels are created by the (possibly anonymous) sender: `email` is the
/// contact address that must confirm delivery, `recipients` the addresses
/// entitled to view the reel. Ids, timestamps and the confirmation token are
/// assigned server-side.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReelCreate {
    pub video_id: VideoId,
    pub email: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub private: bool,
    /// Recipient email addresses
    #[serde(default)]
    pub recipients: Vec<String>,
    pub delivery_date: DateTime<Utc>,
}

/// Request body for replacing a reel's mutable fields.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReelUpdate {
    pub video_id: VideoId,
    pub email: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub private: bool,
    pub delivery_date: DateTime<Utc>,
}

/// Request body for confirming a reel via the emailed token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReelConfirm {
    pub token: String,
}

/// Request body for appending recipients to a reel.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecipientsAdd {
    /// Recipient email addresses
    pub emails: Vec<String>,
}

/// A recipient as exposed by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RecipientResponse {
    pub id: RecipientId,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Recipient> for RecipientResponse {
    fn from(recipient: &Recipient) -> Self {
        Self {
            id: recipient.id.clone(),
            email: recipient.email.clone(),
            created_at: recipient.created_at,
        }
    }
}

/// A reel as exposed by the API. The confirmation token is deliberately
/// absent: it only ever travels in the confirmation email.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReelResponse {
    pub id: ReelId,
    pub user_id: Option<UserId>,
    pub video_id: VideoId,
    pub email: String,
    pub title: String,
    pub description: String,
    pub private: bool,
    pub recipients: Vec<RecipientResponse>,
    pub delivery_status: DeliveryStatus,
    pub delivery_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Reel> for ReelResponse {
    fn from(reel: Reel) -> Self {
        Self {
            id: reel.id,
            user_id: reel.user_id,
            video_id: reel.video_id,
            email: reel.email,
            title: reel.title,
            description: reel.description,
            private: reel.private,
            recipients: reel.recipients.iter().map(RecipientResponse::from).collect(),
            delivery_status: reel.delivery_status,
            delivery_date: reel.delivery_date,
            created_at: reel.created_at,
            updated_at: reel.updated_at,
        }
    }
}

/// Query parameters for listing the current user's reels.
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
pub struct ListReelsQuery {
    /// Pagination parameters
    #[serde(flatten)]
    #[param(inline)]
    pub pageable: Pageable,

    /// Only return reels in this delivery status. Unknown values are ignored.
    pub delivery_status: Option<String>,
}

impl ListReelsQuery {
    /// The repository-level filter: unknown status strings dissolve into
    /// "no filtering" instead of erroring.
    pub fn filter(&self) -> ReelFilter {
        ReelFilter {
            delivery_status: self.delivery_status.as_deref().and_then(DeliveryStatus::parse),
        }
    }
}

/// One page of reels plus pagination metadata.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReelListResponse {
    pub data: Vec<ReelResponse>,
    pub pagination: PaginationData,
}
