use super::*;
use crate::mirror::{CaseSummary, DiskUsageReport};
use crate::model::{Constant, Info, NewCase};

impl<G: Gateway + 'static> Session<G> {
    pub async fn info(&self) -> SyncResult<Info> {
        Ok(self.cache.info(&self.api).await?)
    }

    pub async fn constants(&self) -> SyncResult<Constant> {
        Ok(self.cache.constants(&self.api).await?)
    }

    /// Fetches constants past the cache and writes them over the cached
    /// copy. Returns whether anything changed.
    pub async fn reload_constants(&self) -> SyncResult<bool> {
        let constant = self.api.constant().await?;
        let changed = self.cache.replace_constants(constant);
        tracing::debug!(changed, "constants reloaded");
        Ok(changed)
    }

    pub fn banner(&self) -> Option<String> {
        self.cache.banner()
    }

    /// Replaces the dashboard listing and updates the new-case flags.
    pub async fn load_cases(&self) -> SyncResult<usize> {
        let ticket = self.mirror.borrow_mut().begin(Section::Cases);
        let cases = self.api.cases().await?;
        let count = cases.len();
        self.apply(&ticket, |m| m.index_mut().set_cases(cases))?;
        tracing::info!(count, "cases loaded");
        Ok(count)
    }

    pub fn case_summaries(&self, query: Option<&str>) -> Vec<CaseSummary> {
        self.mirror.borrow().index().summaries(query)
    }

    /// Pulls aggregate usage (through the TTL cache) into the dashboard.
    pub async fn refresh_usage(&self) -> SyncResult<()> {
        let ticket = self.mirror.borrow_mut().begin(Section::Usage);
        let usage = self.cache.disk_usage(&self.api).await?;
        self.apply(&ticket, |m| m.index_mut().set_usage(&usage))
    }

    pub async fn disk_usage_report(&self) -> SyncResult<DiskUsageReport> {
        self.refresh_usage().await?;
        let quota = self.constants().await?.quota.unwrap_or(0);
        Ok(self.mirror.borrow().index().usage_report(quota))
    }

    pub async fn create_case(&self, new_case: &NewCase) -> SyncResult<CaseMetadata> {
        let case = self
            .api
            .create_case(new_case)
            .await
            .map_err(|e| self.write_failed("create case", "Error while creating case", e))?;
        tracing::info!(guid = %case.guid, "case created");
        self.mirror.borrow_mut().index_mut().insert(case.clone());
        Ok(case)
    }
}
