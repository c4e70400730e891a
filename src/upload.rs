//! Single in-flight upload: confirmation, transfer progress, processing,
//! and the optional edit before commit.

mod prefill;
mod tracker;

pub use self::prefill::{EditDraft, available_tags, prefill, upload_warning};
pub use self::tracker::{UploadSlot, UploadStatus, UploadTracker, percent};

use crate::model::Collection;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UploadOutcome {
    /// The user declined at the confirmation step; nothing was sent.
    Declined,
    /// `collection` is what was inserted into the mirror: the edited version
    /// when `edited`, otherwise the one the upload returned.
    Committed { collection: Collection, edited: bool },
}

#[cfg(test)]
#[path = "tests/upload_tests.rs"]
mod tests;
