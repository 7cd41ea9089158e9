//! Social data models: like records, comments, menu item references.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::time::{SystemTime, UNIX_EPOCH};
use tavola_store::Document;

/// Collection holding like records.
pub const LIKES: &str = "likes";

/// Collection holding comments.
pub const COMMENTS: &str = "comments";

/// Unix timestamp in milliseconds.
pub(crate) fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis() as u64)
}

/// One identity's like on one item.
///
/// Stored at the deterministic key `{identity}_{item_id}`, which enforces
/// at-most-one record per (identity, item). Created on like, deleted on
/// un-like; never updated in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LikeRecord {
    /// The liking identity (opaque per-profile token).
    pub identity: String,
    /// The liked menu item.
    pub item_id: u32,
    /// Unix timestamp in milliseconds.
    pub timestamp: u64,
}

impl LikeRecord {
    /// Create a record stamped with the current time.
    pub fn new(identity: String, item_id: u32) -> Self {
        Self {
            identity,
            item_id,
            timestamp: now_millis(),
        }
    }

    /// The deterministic store key for an (identity, item) pair.
    pub fn compose_key(identity: &str, item_id: u32) -> String {
        format!("{}_{}", identity, item_id)
    }

    /// The store key for this record.
    pub fn key(&self) -> String {
        Self::compose_key(&self.identity, self.item_id)
    }

    /// Field set for storing this record.
    pub fn fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("identity".to_string(), Value::from(self.identity.clone()));
        fields.insert("item_id".to_string(), Value::from(self.item_id));
        fields.insert("timestamp".to_string(), Value::from(self.timestamp));
        fields
    }

    /// Parse a record from a stored document.
    pub fn from_document(doc: &Document) -> Result<Self> {
        let identity = doc
            .str_field("identity")
            .ok_or_else(|| Error::MalformedRecord(format!("like {} has no identity", doc.id)))?;
        let item_id = doc
            .u64_field("item_id")
            .ok_or_else(|| Error::MalformedRecord(format!("like {} has no item_id", doc.id)))?;
        let item_id = u32::try_from(item_id)
            .map_err(|_| Error::MalformedRecord(format!("like {} item_id out of range", doc.id)))?;
        Ok(Self {
            identity: identity.to_string(),
            item_id,
            timestamp: doc.u64_field("timestamp").unwrap_or(0),
        })
    }
}

/// A comment on a menu item. Immutable once created; the store assigns
/// the id on creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    /// Store-assigned document id.
    pub id: String,
    /// The commented menu item.
    pub item_id: u32,
    /// Display name of the commenter.
    pub author: String,
    /// Comment body.
    pub text: String,
    /// Unix timestamp in milliseconds.
    pub timestamp: u64,
}

impl Comment {
    /// Parse a comment from a stored document.
    pub fn from_document(doc: &Document) -> Result<Self> {
        let item_id = doc
            .u64_field("item_id")
            .ok_or_else(|| Error::MalformedRecord(format!("comment {} has no item_id", doc.id)))?;
        let item_id = u32::try_from(item_id).map_err(|_| {
            Error::MalformedRecord(format!("comment {} item_id out of range", doc.id))
        })?;
        let author = doc
            .str_field("author")
            .ok_or_else(|| Error::MalformedRecord(format!("comment {} has no author", doc.id)))?;
        let text = doc
            .str_field("text")
            .ok_or_else(|| Error::MalformedRecord(format!("comment {} has no text", doc.id)))?;
        Ok(Self {
            id: doc.id.clone(),
            item_id,
            author: author.to_string(),
            text: text.to_string(),
            timestamp: doc.u64_field("timestamp").unwrap_or(0),
        })
    }
}

/// A comment that has not been stored yet (no id).
#[derive(Debug, Clone)]
pub struct CommentDraft {
    /// The commented menu item.
    pub item_id: u32,
    /// Display name of the commenter.
    pub author: String,
    /// Comment body.
    pub text: String,
    /// Unix timestamp in milliseconds.
    pub timestamp: u64,
}

impl CommentDraft {
    /// Create a draft stamped with the current time.
    pub fn new(item_id: u32, author: &str, text: &str) -> Self {
        Self {
            item_id,
            author: author.to_string(),
            text: text.to_string(),
            timestamp: now_millis(),
        }
    }

    /// Field set for storing this draft.
    pub fn fields(&self) -> Map<String, Value> {
        let mut fields = Map::new();
        fields.insert("item_id".to_string(), Value::from(self.item_id));
        fields.insert("author".to_string(), Value::from(self.author.clone()));
        fields.insert("text".to_string(), Value::from(self.text.clone()));
        fields.insert("timestamp".to_string(), Value::from(self.timestamp));
        fields
    }

    /// Attach the store-assigned id, producing the final comment.
    pub fn into_comment(self, id: String) -> Comment {
        Comment {
            id,
            item_id: self.item_id,
            author: self.author,
            text: self.text,
            timestamp: self.timestamp,
        }
    }
}

/// A menu item as displayed by the presentation layer.
///
/// Owned by the static catalog; this crate only annotates `like_count`
/// with derived values and never persists items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Catalog id.
    pub id: u32,
    /// Dish name.
    pub name: String,
    /// Dish description.
    pub description: String,
    /// Display price (e.g. "$24").
    pub price: String,
    /// Highlighted on the menu.
    #[serde(default)]
    pub popular: bool,
    /// Derived like count (annotated, not stored).
    #[serde(default)]
    pub like_count: u64,
    /// Image URL.
    pub image: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn like_record_key_is_deterministic() {
        let record = LikeRecord::new("user_abc123".to_string(), 5);
        assert_eq!(record.key(), "user_abc123_5");
        assert_eq!(record.key(), LikeRecord::compose_key("user_abc123", 5));
    }

    #[test]
    fn like_record_store_roundtrip() {
        let record = LikeRecord::new("user_abc123".to_string(), 7);
        let doc = Document::new(record.key(), record.fields());
        let parsed = LikeRecord::from_document(&doc).unwrap();
        assert_eq!(record, parsed);
    }

    #[test]
    fn like_record_missing_field_rejected() {
        let doc = Document::new("bad".to_string(), Map::new());
        assert!(matches!(
            LikeRecord::from_document(&doc),
            Err(Error::MalformedRecord(_))
        ));
    }

    #[test]
    fn out_of_range_item_id_rejected() {
        let too_big = u64::from(u32::MAX) + 1;

        let mut fields = Map::new();
        fields.insert("identity".to_string(), Value::from("user_a"));
        fields.insert("item_id".to_string(), Value::from(too_big));
        let like = Document::new("bad_like".to_string(), fields);
        assert!(matches!(
            LikeRecord::from_document(&like),
            Err(Error::MalformedRecord(_))
        ));

        let mut fields = Map::new();
        fields.insert("item_id".to_string(), Value::from(too_big));
        fields.insert("author".to_string(), Value::from("Ana"));
        fields.insert("text".to_string(), Value::from("hello"));
        let comment = Document::new("bad_comment".to_string(), fields);
        assert!(matches!(
            Comment::from_document(&comment),
            Err(Error::MalformedRecord(_))
        ));
    }

    #[test]
    fn comment_draft_becomes_comment() {
        let draft = CommentDraft::new(5, "Ana", "Delicious");
        let doc = Document::new("doc00000001".to_string(), draft.fields());

        let comment = draft.into_comment("doc00000001".to_string());
        let parsed = Comment::from_document(&doc).unwrap();
        assert_eq!(comment, parsed);
    }

    #[test]
    fn menu_item_deserializes_without_social_fields() {
        let item: MenuItem = serde_json::from_str(
            r#"{"id": 5, "name": "Filet Mignon", "description": "8oz tenderloin",
                "price": "$38", "popular": true, "image": null}"#,
        )
        .unwrap();
        assert_eq!(item.like_count, 0);
        assert!(item.popular);
    }
}
