use super::*;
use crate::analysis::{
    AnalysisAction, AnalysisState, MenuItem, action_menu, applicable, ensure_allowed, is_offered,
};
use crate::model::{AnalyzerInfo, CollectionAnalysis};

/// One analyzer line of a collection's detail tab.
#[derive(Clone, Debug, PartialEq)]
pub struct AnalyzerRow {
    pub analyzer: AnalyzerInfo,
    pub state: AnalysisState,
    pub menu: Vec<MenuItem>,
}

impl<G: Gateway + 'static> Session<G> {
    /// Replaces every analysis record held for the collection.
    pub async fn refresh_analyses(&self, collection: &str) -> SyncResult<()> {
        let (case, ticket) = self.begin_section(Section::Analyses(collection.to_string()))?;
        let records = self.api.analyses(&case, collection).await?;
        tracing::debug!(collection, count = records.len(), "analyses loaded");
        self.apply_view(&ticket, |v| v.analyses_mut().replace_all(collection, records))
    }

    pub fn analysis_menu(&self, collection: &str, analyzer: &str) -> SyncResult<Vec<MenuItem>> {
        let mirror = self.mirror.borrow();
        let view = mirror.view().ok_or(SyncError::NoCaseOpen)?;
        view.analysis_menu(collection, analyzer)
            .ok_or_else(|| SyncError::UnknownEntity {
                kind: "collection",
                guid: collection.to_string(),
            })
    }

    /// Analyzers applicable to the collection with their state and menu.
    pub fn analyzer_rows(&self, collection: &str) -> SyncResult<Vec<AnalyzerRow>> {
        let mirror = self.mirror.borrow();
        let view = mirror.view().ok_or(SyncError::NoCaseOpen)?;
        let c = view
            .collection(collection)
            .ok_or_else(|| SyncError::UnknownEntity {
                kind: "collection",
                guid: collection.to_string(),
            })?;
        let orphaned = view.is_orphaned(c);
        Ok(applicable(view.analyzers(), c)
            .into_iter()
            .map(|a| {
                let state = view.analyses().state(collection, &a.name);
                AnalyzerRow {
                    analyzer: a.clone(),
                    state,
                    menu: action_menu(state, orphaned),
                }
            })
            .collect())
    }

    /// Validates `action` against the current state of the pair. Start also
    /// requires the analyzer to be offered for the collection's tags.
    fn check_action(
        &self,
        collection: &str,
        analyzer: &str,
        action: AnalysisAction,
    ) -> SyncResult<(String, Ticket)> {
        let (case, ticket) = self.current_case()?;
        let mirror = self.mirror.borrow();
        let view = mirror.view().ok_or(SyncError::NoCaseOpen)?;
        let c = view
            .collection(collection)
            .ok_or_else(|| SyncError::UnknownEntity {
                kind: "collection",
                guid: collection.to_string(),
            })?;
        if action == AnalysisAction::Start && !is_offered(view.analyzers(), analyzer, &c.tags) {
            return Err(SyncError::UnknownEntity {
                kind: "analyzer",
                guid: analyzer.to_string(),
            });
        }
        let state = view.analyses().state(collection, analyzer);
        ensure_allowed(state, action, view.is_orphaned(c))?;
        Ok((case, ticket))
    }

    pub async fn start_analysis(
        &self,
        collection: &str,
        analyzer: &str,
    ) -> SyncResult<CollectionAnalysis> {
        let (case, ticket) = self.check_action(collection, analyzer, AnalysisAction::Start)?;
        let record = self
            .api
            .start_analysis(&case, collection, analyzer)
            .await
            .map_err(|e| self.write_failed("start analysis", "Error while starting analysis", e))?;
        tracing::info!(collection, analyzer, status = record.status.as_str(), "analysis started");
        self.settle_write(&ticket, |v| v.analyses_mut().patch(collection, record.clone()));
        Ok(record)
    }

    pub async fn restart_analysis(
        &self,
        collection: &str,
        analyzer: &str,
    ) -> SyncResult<CollectionAnalysis> {
        let (case, ticket) = self.check_action(collection, analyzer, AnalysisAction::Restart)?;
        let record = self
            .api
            .restart_analysis(&case, collection, analyzer)
            .await
            .map_err(|e| {
                self.write_failed("restart analysis", "Error while restarting analysis", e)
            })?;
        tracing::info!(collection, analyzer, status = record.status.as_str(), "analysis restarted");
        self.settle_write(&ticket, |v| v.analyses_mut().patch(collection, record.clone()));
        Ok(record)
    }

    pub async fn analysis_log(&self, collection: &str, analyzer: &str) -> SyncResult<String> {
        let (case, _) = self.check_action(collection, analyzer, AnalysisAction::Logs)?;
        Ok(self.api.analysis_log(&case, collection, analyzer).await?)
    }

    pub async fn analysis_download(&self, collection: &str, analyzer: &str) -> SyncResult<String> {
        let (case, _) = self.check_action(collection, analyzer, AnalysisAction::Download)?;
        Ok(self.api.analysis_download(&case, collection, analyzer).await?)
    }
}
