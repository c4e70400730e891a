use super::*;
use crate::confirm::{DeleteFlow, DeleteTarget};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    /// Dismissed or mistyped confirmation; nothing was sent.
    Cancelled,
}

impl<G: Gateway + 'static> Session<G> {
    pub fn case_target(&self, guid: &str) -> SyncResult<DeleteTarget> {
        self.find_case(guid)
            .map(|c| DeleteTarget::case(&c))
            .ok_or_else(|| SyncError::UnknownEntity {
                kind: "case",
                guid: guid.to_string(),
            })
    }

    pub fn collector_target(&self, guid: &str) -> SyncResult<DeleteTarget> {
        let (case, _) = self.current_case()?;
        Ok(DeleteTarget::collector(&case, &self.find_collector(guid)?))
    }

    pub fn collection_target(&self, guid: &str) -> SyncResult<DeleteTarget> {
        let (case, _) = self.current_case()?;
        Ok(DeleteTarget::collection(&case, &self.find_collection(guid)?))
    }

    /// Type-to-confirm delete. On success the entity disappears from every
    /// list and open tab; on failure it stays where it was.
    pub async fn delete<D: Dialogs>(
        &self,
        dialogs: &D,
        target: DeleteTarget,
    ) -> SyncResult<DeleteOutcome> {
        let mut flow = DeleteFlow::new(target);
        let token = flow.request().to_string();
        let kind = flow.target().kind();
        let prompt = ConfirmPrompt::new(
            format!("Delete {}", kind),
            format!("Type \"{}\" to confirm.", token),
        );
        let answer = dialogs.type_to_confirm(&prompt, &token).await;
        if !flow.submit(answer.as_deref()) {
            tracing::debug!(kind, "delete not confirmed");
            return Ok(DeleteOutcome::Cancelled);
        }

        let (op, title) = match flow.target() {
            DeleteTarget::Case { .. } => ("delete case", "Error while deleting case"),
            DeleteTarget::Collector { .. } => ("delete collector", "Error while deleting collector"),
            DeleteTarget::Collection { .. } => {
                ("delete collection", "Error while deleting collection")
            }
        };
        let result = match flow.target() {
            DeleteTarget::Case { guid, .. } => self.api.delete_case(guid).await,
            DeleteTarget::Collector { case, guid, .. } => {
                self.api.delete_collector(case, guid).await
            }
            DeleteTarget::Collection { case, guid, .. } => {
                self.api.delete_collection(case, guid).await
            }
        };
        flow.settle(result.is_ok());
        result.map_err(|e| self.write_failed(op, title, e))?;

        tracing::info!(kind, guid = flow.target().guid(), "deleted");
        let mut mirror = self.mirror.borrow_mut();
        match flow.target() {
            DeleteTarget::Case { guid, .. } => mirror.forget_case(guid),
            DeleteTarget::Collector { case, guid, .. } => {
                if let Some(view) = mirror.view_mut()
                    && view.case_guid() == case
                {
                    view.remove_collector(guid);
                }
            }
            DeleteTarget::Collection { case, guid, .. } => {
                if let Some(view) = mirror.view_mut()
                    && view.case_guid() == case
                {
                    view.remove_collection(guid);
                }
            }
        }
        Ok(DeleteOutcome::Deleted)
    }
}
