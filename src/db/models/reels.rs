//! Database models for reels and their embedded recipient collection.
//!
//! Recipients have no table of their own: the ordered collection lives in the
//! `reels.recipients` JSONB column and is (de)serialized by the [`Recipients`]
//! codec. Soft-deleted recipients stay in the stored array forever but are
//! dropped on every decode, so deletion is monotonic hiding rather than
//! physical removal.

use crate::api::models::reels::DeliveryStatus;
use crate::types::{RecipientId, ReelId, UserId, VideoId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{
    Decode, Encode, FromRow, Postgres, Type,
    encode::IsNull,
    error::BoxDynError,
    postgres::{PgArgumentBuffer, PgTypeInfo, PgValueRef},
    types::Json,
};

/// One element of a reel's recipient collection.
///
/// `deleted_at` is kept nullable in the stored JSON so the in-place
/// soft-delete SQL can test `r->>'deleted_at' IS NULL` uniformly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipient {
    pub id: RecipientId,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Recipient {
    /// Build a fresh recipient for the given email address.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            id: crate::types::new_id(),
            email: email.into(),
            created_at: Utc::now(),
            deleted_at: None,
        }
    }
}

/// The ordered recipient collection of a reel, as stored in the JSONB
/// `recipients` column.
///
/// Encoding always produces a JSON array (`[]` for the empty collection,
/// never null - the column is non-null). Decoding parses the stored array
/// and drops every element whose `deleted_at` is set, so a soft-deleted
/// recipient is permanently invisible to readers even though its bytes
/// remain in storage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Recipients(pub Vec<Recipient>);

impl Recipients {
    /// Keep only recipients whose soft-delete marker is unset.
    pub fn live(all: Vec<Recipient>) -> Self {
        Self(all.into_iter().filter(|r| r.deleted_at.is_none()).collect())
    }

    /// Serialize the collection to its stored JSON form.
    pub fn to_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(&self.0)
    }

    /// Parse a stored JSON array, dropping soft-deleted entries.
    pub fn from_json(bytes: &[u8]) -> serde_json::Result<Self> {
        let all: Vec<Recipient> = serde_json::from_slice(bytes)?;
        Ok(Self::live(all))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Recipient> {
        self.0.iter()
    }
}

impl FromIterator<Recipient> for Recipients {
    fn from_iter<I: IntoIterator<Item = Recipient>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Type<Postgres> for Recipients {
    fn type_info() -> PgTypeInfo {
        <Json<Vec<Recipient>> as Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <Json<Vec<Recipient>> as Type<Postgres>>::compatible(ty)
    }
}

impl Encode<'_, Postgres> for Recipients {
    fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> Result<IsNull, BoxDynError> {
        Json(&self.0).encode_by_ref(buf)
    }
}

impl<'r> Decode<'r, Postgres> for Recipients {
    fn decode(value: PgValueRef<'r>) -> Result<Self, BoxDynError> {
        let Json(all) = <Json<Vec<Recipient>> as Decode<'r, Postgres>>::decode(value)?;
        Ok(Self::live(all))
    }
}

/// A row of the `reels` table.
///
/// `user_id` is absent until the recipient of the reel claims an account
/// with the contact email, at which point the bulk ownership assignment
/// fills it in.
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct Reel {
    pub id: ReelId,
    pub user_id: Option<UserId>,
    pub video_id: VideoId,
    pub email: String,
    pub title: String,
    pub description: String,
    pub private: bool,
    pub recipients: Recipients,
    pub email_confirmation_token: String,
    pub delivery_status: DeliveryStatus,
    pub delivery_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Reel {
    /// Find a live recipient by id in the in-memory collection.
    pub fn find_recipient(&self, recipient_id: &str) -> Option<&Recipient> {
        self.recipients.iter().find(|r| r.id == recipient_id)
    }
}

/// Database request for creating a new reel
#[derive(Debug, Clone)]
pub struct ReelCreateDBRequest {
    pub user_id: Option<UserId>,
    pub video_id: VideoId,
    pub email: String,
    pub title: String,
    pub description: String,
    pub private: bool,
    pub recipients: Recipients,
    pub email_confirmation_token: String,
    pub delivery_status: DeliveryStatus,
    pub delivery_date: DateTime<Utc>,
}

/// Database request for updating a reel (full mutable row; the recipient
/// collection is managed separately through the append/soft-delete
/// operations).
#[derive(Debug, Clone)]
pub struct ReelUpdateDBRequest {
    pub user_id: Option<UserId>,
    pub video_id: VideoId,
    pub email: String,
    pub title: String,
    pub description: String,
    pub private: bool,
    pub email_confirmation_token: String,
    pub delivery_status: DeliveryStatus,
    pub delivery_date: DateTime<Utc>,
}

impl ReelUpdateDBRequest {
    /// Start an update from the current state of a row.
    pub fn from_reel(reel: &Reel) -> Self {
        Self {
            user_id: reel.user_id.clone(),
            video_id: reel.video_id.clone(),
            email: reel.email.clone(),
            title: reel.title.clone(),
            description: reel.description.clone(),
            private: reel.private,
            email_confirmation_token: reel.email_confirmation_token.clone(),
            delivery_status: reel.delivery_status,
            delivery_date: reel.delivery_date,
        }
    }
}

/// Filter for the paginated reel listing.
///
/// `delivery_status` conjoins an extra predicate only when present; `None`
/// means no filtering. Unknown status strings arriving from the API parse to
/// `None` rather than an error (see [`DeliveryStatus::parse`]).
#[derive(Debug, Clone, Default)]
pub struct ReelFilter {
    pub delivery_status: Option<DeliveryStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipient(id: &str, deleted: bool) -> Recipient {
        Recipient {
            id: id.to_string(),
            email: format!("{id}@example.com"),
            created_at: Utc::now(),
            deleted_at: deleted.then(Utc::now),
        }
    }

    #[test]
    fn empty_collection_round_trips_as_empty_array() {
        let encoded = Recipients::default().to_json().unwrap();
        assert_eq!(encoded, b"[]");

        let decoded = Recipients::from_json(&encoded).unwrap();
        assert!(decoded.is_empty());
    }

    #[test]
    fn decode_drops_soft_deleted_recipients() {
        let stored = Recipients(vec![recipient("a", false), recipient("b", true), recipient("c", false)]);
        let bytes = stored.to_json().unwrap();

        // The deleted entry is still physically present in the bytes...
        assert!(String::from_utf8_lossy(&bytes).contains("b@example.com"));

        // ...but never comes back from a decode.
        let decoded = Recipients::from_json(&bytes).unwrap();
        assert_eq!(decoded.len(), 2);
        assert!(decoded.iter().all(|r| r.deleted_at.is_none()));
        assert!(decoded.iter().all(|r| r.id != "b"));
    }

    #[test]
    fn decode_rejects_malformed_json() {
        assert!(Recipients::from_json(b"{not json").is_err());
        assert!(Recipients::from_json(b"{\"id\": \"not an array\"}").is_err());
    }

    #[test]
    fn find_recipient_matches_by_id() {
        let reel = Reel {
            id: "reel".to_string(),
            user_id: None,
            video_id: "video".to_string(),
            email: "someone@example.com".to_string(),
            title: String::new(),
            description: String::new(),
            private: false,
            recipients: Recipients(vec![recipient("12345", false), recipient("123456", false)]),
            email_confirmation_token: String::new(),
            delivery_status: DeliveryStatus::Unconfirmed,
            delivery_date: Utc::now(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted_at: None,
        };

        assert_eq!(reel.find_recipient("12345").map(|r| r.id.as_str()), Some("12345"));
        assert!(reel.find_recipient("123489").is_none());
    }
}
