//! Downvote document schema
//!
//! Records one user's downvote against a target entity. The app backend
//! owns writes and lifecycle; lintel only declares the shape and indexes.

use bson::{doc, oid::ObjectId, Document};
use mongodb::options::IndexOptions;
use serde::{Deserialize, Serialize};

use crate::db::mongo::IntoIndexes;

/// Collection name for downvotes
pub const DOWNVOTE_COLLECTION: &str = "downvotes";

/// Downvote document stored in MongoDB
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct DownvoteDoc {
    /// MongoDB document ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub _id: Option<ObjectId>,

    /// Open-ended key-value bag, opaque to this layer
    #[serde(default)]
    pub metadata: Document,

    /// Identifier of the downvoted entity
    pub target_id: String,

    /// Discriminator naming the kind of entity downvoted
    pub target_type: String,

    /// User who cast the downvote (exactly one; no reverse relation)
    pub user_id: ObjectId,
}

impl DownvoteDoc {
    /// Create a new downvote document
    pub fn new(target_id: String, target_type: String, user_id: ObjectId) -> Self {
        Self {
            _id: None,
            metadata: Document::new(),
            target_id,
            target_type,
            user_id,
        }
    }
}

impl IntoIndexes for DownvoteDoc {
    fn into_indices() -> Vec<(Document, Option<IndexOptions>)> {
        vec![
            // Compound index for per-target tallies
            (
                doc! { "target_id": 1, "target_type": 1 },
                Some(
                    IndexOptions::builder()
                        .name("target_index".to_string())
                        .build(),
                ),
            ),
            // Index for listing a user's downvotes
            (
                doc! { "user_id": 1 },
                Some(
                    IndexOptions::builder()
                        .name("user_id_index".to_string())
                        .build(),
                ),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_downvote_defaults() {
        let user_id = ObjectId::new();
        let vote = DownvoteDoc::new("concept-42".to_string(), "concept".to_string(), user_id);

        assert!(vote._id.is_none());
        assert!(vote.metadata.is_empty());
        assert_eq!(vote.target_id, "concept-42");
        assert_eq!(vote.target_type, "concept");
        assert_eq!(vote.user_id, user_id);
    }

    #[test]
    fn test_unsaved_downvote_serializes_without_id() {
        let vote = DownvoteDoc::new("c1".to_string(), "concept".to_string(), ObjectId::new());
        let doc = bson::to_document(&vote).unwrap();

        assert!(!doc.contains_key("_id"));
        assert_eq!(doc.get_str("target_id").unwrap(), "c1");
        assert_eq!(doc.get_str("target_type").unwrap(), "concept");
    }

    #[test]
    fn test_index_definitions() {
        let indices = DownvoteDoc::into_indices();
        assert_eq!(indices.len(), 2);

        let (keys, _) = &indices[0];
        assert!(keys.contains_key("target_id"));
        assert!(keys.contains_key("target_type"));
    }
}
