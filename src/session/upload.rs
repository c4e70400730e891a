use super::*;
use crate::remote::UploadFile;
use crate::upload::{UploadOutcome, prefill, upload_warning};

impl<G: Gateway + 'static> Session<G> {
    /// Confirm, transfer, optional edit, then insert into the open case.
    ///
    /// Progress is published on [`UploadTracker`]. A transport failure
    /// leaves nothing behind locally. When the edit PUT fails the collection
    /// as uploaded is still committed, since it exists on the server.
    pub async fn upload_collection<D: Dialogs>(
        &self,
        dialogs: &D,
        file: UploadFile,
    ) -> SyncResult<UploadOutcome> {
        let (case, ticket) = self.current_case()?;
        let mut slot = self.uploads.acquire(&file.name)?;

        let prompt = ConfirmPrompt::new("Upload collection", format!("Upload {}?", file.name))
            .with_warning(upload_warning(&file.name));
        if !dialogs.confirm(&prompt).await {
            slot.decline();
            return Ok(UploadOutcome::Declined);
        }

        slot.begin_transfer();
        tracing::info!(case = %case, file = %file.name, size = file.size, "upload started");
        let uploaded = self
            .api
            .upload_collection(&case, &file, &mut |p| slot.report(p))
            .await;
        let received = match uploaded {
            Ok(collection) => collection,
            Err(source) => {
                tracing::warn!(file = %file.name, error = %source, "upload failed");
                slot.fail(source.to_string());
                self.notices
                    .borrow_mut()
                    .error("Error while uploading collection", source.to_string());
                return Err(SyncError::UploadFailed {
                    file: file.name,
                    source,
                });
            }
        };

        slot.editing();
        let draft = {
            let mirror = self.mirror.borrow();
            let catalog = mirror.view().map(|v| v.analyzers()).unwrap_or_default();
            prefill(&received, &file.name, catalog)
        };
        let (collection, edited) = match dialogs.edit_collection(&draft).await {
            None => (received, false),
            Some(edit) => match self.api.update_collection(&case, &edit).await {
                Ok(updated) => (updated, true),
                Err(err) => {
                    tracing::warn!(guid = %received.guid, error = %err, "post-upload edit failed");
                    self.notices
                        .borrow_mut()
                        .error("Error while editing collection", err.to_string());
                    (received, false)
                }
            },
        };

        slot.commit(&collection.guid);
        self.settle_write(&ticket, |v| v.insert_collection(collection.clone()));
        Ok(UploadOutcome::Committed { collection, edited })
    }
}
