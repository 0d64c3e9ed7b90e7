//! Database schemas
//!
//! Document structures owned by the app data layer.

mod downvote;

pub use downvote::{DownvoteDoc, DOWNVOTE_COLLECTION};
