//! User-interaction seam: the points where a protocol suspends until the
//! user answers.

use std::future::Future;

use crate::model::Collection;
use crate::upload::EditDraft;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub title: String,
    pub message: String,
    pub warning: Option<String>,
}

impl ConfirmPrompt {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            warning: None,
        }
    }

    pub fn with_warning(mut self, warning: Option<String>) -> Self {
        self.warning = warning;
        self
    }
}

pub trait Dialogs {
    /// Yes/no question.
    fn confirm(&self, prompt: &ConfirmPrompt) -> impl Future<Output = bool>;

    /// Asks the user to type `token` back. `None` when dismissed.
    fn type_to_confirm(
        &self,
        prompt: &ConfirmPrompt,
        token: &str,
    ) -> impl Future<Output = Option<String>>;

    /// Offers the post-upload edit form. `None` keeps the collection as received.
    fn edit_collection(&self, draft: &EditDraft) -> impl Future<Output = Option<Collection>>;
}
