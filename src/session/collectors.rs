use super::*;
use crate::model::{CollectorImport, CollectorSecret, NewCollector, Profile};

impl<G: Gateway + 'static> Session<G> {
    pub async fn add_collector(&self, collector: &NewCollector) -> SyncResult<Collector> {
        let (case, ticket) = self.current_case()?;
        let created = self
            .api
            .create_collector(&case, collector)
            .await
            .map_err(|e| {
                self.write_failed("create collector", "Error while creating collector", e)
            })?;
        tracing::info!(case = %case, guid = %created.guid, "collector created");
        self.settle_write(&ticket, |v| v.insert_collector(created.clone()));
        Ok(created)
    }

    pub async fn import_collector(&self, import: &CollectorImport) -> SyncResult<Collector> {
        let (case, ticket) = self.current_case()?;
        let created = self
            .api
            .import_collector(&case, import)
            .await
            .map_err(|e| {
                self.write_failed("import collector", "Error while importing collector", e)
            })?;
        tracing::info!(case = %case, guid = %created.guid, "collector imported");
        self.settle_write(&ticket, |v| v.insert_collector(created.clone()));
        Ok(created)
    }

    pub async fn collector_secrets(&self, guid: &str) -> SyncResult<CollectorSecret> {
        let (case, _) = self.current_case()?;
        Ok(self.api.collector_secrets(&case, guid).await?)
    }

    /// One-time URL for the collector's executable.
    pub async fn collector_download(&self, guid: &str) -> SyncResult<String> {
        let (case, _) = self.current_case()?;
        Ok(self.api.collector_download(&case, guid).await?)
    }

    pub async fn profiles(&self, opsystem: &str) -> SyncResult<Vec<Profile>> {
        Ok(self.api.profiles(opsystem).await?)
    }
}
