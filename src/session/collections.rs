use super::*;
use crate::upload::EditDraft;

impl<G: Gateway + 'static> Session<G> {
    pub async fn refresh_collections(&self) -> SyncResult<()> {
        let (case, ticket) = self.begin_section(Section::Collections)?;
        let list = self.api.collections(&case).await?;
        self.apply_view(&ticket, |v| v.set_collections(list))
    }

    /// Opens (or focuses) the detail tab of a collection and loads its analyses.
    pub async fn open_collection(&self, guid: &str) -> SyncResult<()> {
        let opened = self
            .mirror
            .borrow_mut()
            .view_mut()
            .ok_or(SyncError::NoCaseOpen)?
            .open_collection(guid);
        if !opened {
            return Err(SyncError::UnknownEntity {
                kind: "collection",
                guid: guid.to_string(),
            });
        }
        self.refresh_analyses(guid).await
    }

    pub fn close_collection(&self, guid: &str) {
        if let Some(view) = self.mirror.borrow_mut().view_mut() {
            view.close_collection(guid);
        }
    }

    /// Sends the edited collection; the server's answer replaces the local
    /// copy in the list and in any open tab.
    pub async fn edit_collection(&self, collection: &Collection) -> SyncResult<Collection> {
        let (case, ticket) = self.current_case()?;
        let updated = self
            .api
            .update_collection(&case, collection)
            .await
            .map_err(|e| self.write_failed("edit collection", "Error while editing collection", e))?;
        self.settle_write(&ticket, |v| {
            v.replace_collection(updated.clone());
        });
        Ok(updated)
    }

    /// Edit through the dialog. `None` when the user dismissed it.
    pub async fn edit_collection_with<D: Dialogs>(
        &self,
        dialogs: &D,
        guid: &str,
    ) -> SyncResult<Option<Collection>> {
        let collection = self.find_collection(guid)?;
        let draft = {
            let mirror = self.mirror.borrow();
            let catalog = mirror.view().map(|v| v.analyzers()).unwrap_or_default();
            EditDraft::for_collection(&collection, catalog)
        };
        match dialogs.edit_collection(&draft).await {
            Some(edited) => self.edit_collection(&edited).await.map(Some),
            None => Ok(None),
        }
    }

    /// Drops the server-side analysis cache of a collection after a yes/no
    /// confirmation. Returns false when the user said no.
    pub async fn evict_cache<D: Dialogs>(&self, dialogs: &D, guid: &str) -> SyncResult<bool> {
        let (case, _) = self.current_case()?;
        let collection = self.find_collection(guid)?;
        let name = collection.hostname.as_deref().unwrap_or(&collection.guid);
        let prompt = ConfirmPrompt::new(
            "Remove cache",
            format!("Remove the cached analysis data of {}?", name),
        );
        if !dialogs.confirm(&prompt).await {
            return Ok(false);
        }
        self.api
            .evict_collection_cache(&case, guid)
            .await
            .map_err(|e| self.write_failed("evict cache", "Error while removing cache", e))?;
        self.notices
            .borrow_mut()
            .success("Cache removed", format!("Cache of {} removed", name));
        Ok(true)
    }

    pub async fn collection_download(&self, guid: &str) -> SyncResult<String> {
        let (case, _) = self.current_case()?;
        Ok(self.api.collection_download(&case, guid).await?)
    }
}
