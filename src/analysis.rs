//! Lifecycle of a (collection, analyzer) pair and the actions valid in each state.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::error::SyncError;
use crate::model::{AnalysisStatus, AnalyzerInfo, Collection, CollectionAnalysis};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnalysisState {
    /// No record exists for the pair (or none has been fetched).
    Absent,
    Pending,
    Processing,
    Success,
    Failure,
}

impl AnalysisState {
    pub fn of(record: Option<&CollectionAnalysis>) -> Self {
        match record.map(|r| r.status) {
            None | Some(AnalysisStatus::Unknown) => AnalysisState::Absent,
            Some(AnalysisStatus::Pending) => AnalysisState::Pending,
            Some(AnalysisStatus::Processing) => AnalysisState::Processing,
            Some(AnalysisStatus::Success) => AnalysisState::Success,
            Some(AnalysisStatus::Failure) => AnalysisState::Failure,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisState::Absent => "absent",
            AnalysisState::Pending => "pending",
            AnalysisState::Processing => "processing",
            AnalysisState::Success => "success",
            AnalysisState::Failure => "failure",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnalysisAction {
    Start,
    Restart,
    Logs,
    Download,
}

impl AnalysisAction {
    pub fn label(&self) -> &'static str {
        match self {
            AnalysisAction::Start => "Start",
            AnalysisAction::Restart => "Restart",
            AnalysisAction::Logs => "Logs",
            AnalysisAction::Download => "Download",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuItem {
    pub action: AnalysisAction,
    pub enabled: bool,
}

impl MenuItem {
    fn on(action: AnalysisAction) -> Self {
        Self {
            action,
            enabled: true,
        }
    }
}

/// Menu offered for one analyzer on one collection.
///
/// Starting needs a live collector, so it is disabled on orphaned
/// collections; everything else only depends on the recorded status.
pub fn action_menu(state: AnalysisState, orphaned: bool) -> Vec<MenuItem> {
    use AnalysisAction::*;
    match state {
        AnalysisState::Absent => vec![MenuItem {
            action: Start,
            enabled: !orphaned,
        }],
        AnalysisState::Pending | AnalysisState::Processing => vec![MenuItem::on(Logs)],
        AnalysisState::Failure => vec![MenuItem::on(Restart), MenuItem::on(Logs)],
        AnalysisState::Success => vec![
            MenuItem::on(Restart),
            MenuItem::on(Logs),
            MenuItem::on(Download),
        ],
    }
}

/// Rejects an action the menu would not offer (or would offer disabled).
pub fn ensure_allowed(
    state: AnalysisState,
    action: AnalysisAction,
    orphaned: bool,
) -> Result<(), SyncError> {
    let allowed = action_menu(state, orphaned)
        .iter()
        .any(|item| item.action == action && item.enabled);
    if allowed {
        return Ok(());
    }
    Err(SyncError::NotAllowed {
        action: action.label(),
        state: if action == AnalysisAction::Start && state == AnalysisState::Absent {
            "orphaned"
        } else {
            state.as_str()
        },
    })
}

/// An analyzer applies when it declares no tags or shares one with the collection.
pub fn applies_to(analyzer: &AnalyzerInfo, tags: &[String]) -> bool {
    if analyzer.tags.is_empty() {
        return true;
    }
    let tags: HashSet<&str> = tags.iter().map(String::as_str).collect();
    analyzer.tags.iter().any(|t| tags.contains(t.as_str()))
}

/// Same check by name; analyzers missing from the catalog are never offered.
pub fn is_offered(catalog: &[AnalyzerInfo], analyzer: &str, tags: &[String]) -> bool {
    catalog
        .iter()
        .find(|a| a.name == analyzer)
        .is_some_and(|a| applies_to(a, tags))
}

pub fn applicable<'a>(catalog: &'a [AnalyzerInfo], collection: &Collection) -> Vec<&'a AnalyzerInfo> {
    catalog
        .iter()
        .filter(|a| applies_to(a, &collection.tags))
        .collect()
}

/// Locally held analysis records, keyed by collection guid then analyzer name.
#[derive(Debug, Default)]
pub struct AnalysisBoard {
    by_collection: HashMap<String, BTreeMap<String, CollectionAnalysis>>,
}

impl AnalysisBoard {
    /// Replaces everything held for `collection` with a fresh listing.
    pub fn replace_all(&mut self, collection: &str, records: Vec<CollectionAnalysis>) {
        let keyed = records
            .into_iter()
            .map(|r| (r.analyzer.clone(), r))
            .collect();
        self.by_collection.insert(collection.to_string(), keyed);
    }

    /// Patches the single record a start/restart response refers to.
    pub fn patch(&mut self, collection: &str, record: CollectionAnalysis) {
        self.by_collection
            .entry(collection.to_string())
            .or_default()
            .insert(record.analyzer.clone(), record);
    }

    pub fn record(&self, collection: &str, analyzer: &str) -> Option<&CollectionAnalysis> {
        self.by_collection.get(collection)?.get(analyzer)
    }

    pub fn state(&self, collection: &str, analyzer: &str) -> AnalysisState {
        AnalysisState::of(self.record(collection, analyzer))
    }

    #[cfg(test)]
    pub(crate) fn records(&self, collection: &str) -> Vec<&CollectionAnalysis> {
        self.by_collection
            .get(collection)
            .map(|m| m.values().collect())
            .unwrap_or_default()
    }

    #[cfg(test)]
    pub(crate) fn is_loaded(&self, collection: &str) -> bool {
        self.by_collection.contains_key(collection)
    }

    pub fn forget(&mut self, collection: &str) {
        self.by_collection.remove(collection);
    }
}

#[cfg(test)]
#[path = "tests/analysis_tests.rs"]
mod tests;
