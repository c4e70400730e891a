use super::*;
use crate::mirror::{CaseMenuItem, case_menu};
use crate::model::{CaseUpdate, now_rfc3339};

/// Result of opening a case: the case itself and the sections that could
/// not be loaded (rendered empty).
#[derive(Debug)]
pub struct LoadReport {
    pub case: CaseMetadata,
    pub failed: Vec<(&'static str, GatewayError)>,
}

impl LoadReport {
    pub fn is_partial(&self) -> bool {
        !self.failed.is_empty()
    }
}

impl<G: Gateway + 'static> Session<G> {
    /// Opens the view of one case, abandoning any view already open.
    ///
    /// The case itself must load; collectors, collections, usage and the
    /// analyzer catalog are fetched concurrently afterwards and a failure
    /// among them only leaves that section empty.
    pub async fn open_case(&self, guid: &str) -> SyncResult<LoadReport> {
        let ticket = {
            let mut mirror = self.mirror.borrow_mut();
            mirror.close_view();
            mirror.view_ticket()
        };

        let case = match self.api.case(guid).await {
            Ok(case) => case,
            Err(source) => {
                tracing::warn!(case = guid, error = %source, "case load failed");
                self.notices
                    .borrow_mut()
                    .error("Error while retrieving case", source.to_string());
                return Err(SyncError::FatalLoad {
                    case: guid.to_string(),
                    source,
                });
            }
        };

        let (collectors_ticket, collections_ticket) = self.apply(&ticket, |m| {
            m.install_view(case.clone());
            m.index_mut().replace(case.clone());
            (m.begin(Section::Collectors), m.begin(Section::Collections))
        })?;

        let (collectors, collections, usage, analyzers) = tokio::join!(
            self.api.collectors(guid),
            self.api.collections(guid),
            self.cache.disk_usage(&self.api),
            self.api.analyzers(),
        );

        if !self.mirror.borrow().accepts(&ticket) {
            tracing::debug!(case = guid, "view closed while loading");
            return Err(SyncError::Detached);
        }

        // A section refreshed meanwhile keeps the newer listing.
        let mut failed = Vec::new();
        match collectors {
            Ok(list) => {
                let _ = self.apply_view(&collectors_ticket, |v| v.set_collectors(list));
            }
            Err(e) => failed.push(("collectors", e)),
        }
        match collections {
            Ok(list) => {
                let _ = self.apply_view(&collections_ticket, |v| v.set_collections(list));
            }
            Err(e) => failed.push(("collections", e)),
        }
        match usage {
            Ok(usage) => self.apply_view(&ticket, |v| {
                v.set_usage(usage.for_case(guid).cloned())
            })?,
            Err(e) => failed.push(("disk usage", e)),
        }
        match analyzers {
            Ok(list) => self.apply_view(&ticket, |v| v.set_analyzers(list))?,
            Err(e) => failed.push(("analyzers", e)),
        }
        for (section, err) in &failed {
            tracing::warn!(case = guid, section, error = %err, "partial load");
        }
        tracing::info!(case = guid, partial = !failed.is_empty(), "case opened");
        Ok(LoadReport { case, failed })
    }

    pub fn close_view(&self) {
        self.mirror.borrow_mut().close_view();
    }

    pub async fn refresh_collectors(&self) -> SyncResult<()> {
        let (case, ticket) = self.begin_section(Section::Collectors)?;
        let list = self.api.collectors(&case).await?;
        self.apply_view(&ticket, |v| v.set_collectors(list))
    }

    pub async fn update_case(&self, guid: &str, update: &CaseUpdate) -> SyncResult<CaseMetadata> {
        let case = self
            .api
            .update_case(guid, update)
            .await
            .map_err(|e| self.write_failed("update case", "Error while updating case", e))?;
        self.mirror.borrow_mut().replace_case(case.clone());
        Ok(case)
    }

    pub async fn close_case(&self, guid: &str) -> SyncResult<CaseMetadata> {
        let update = CaseUpdate {
            closed: Some(now_rfc3339()),
            ..CaseUpdate::default()
        };
        self.update_case(guid, &update).await
    }

    pub async fn reopen_case(&self, guid: &str) -> SyncResult<CaseMetadata> {
        let update = CaseUpdate {
            closed: Some(String::new()),
            ..CaseUpdate::default()
        };
        self.update_case(guid, &update).await
    }

    pub fn case_menu(&self, guid: &str) -> SyncResult<Vec<CaseMenuItem>> {
        let case = self.find_case(guid).ok_or_else(|| SyncError::UnknownEntity {
            kind: "case",
            guid: guid.to_string(),
        })?;
        Ok(case_menu(&case))
    }
}
