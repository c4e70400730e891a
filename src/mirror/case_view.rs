use super::lists::{insert_sorted, remove_by_guid, replace_by_guid, sort_newest_first};
use crate::analysis::{AnalysisBoard, MenuItem, action_menu};
use crate::model::{AnalyzerInfo, CaseMetadata, Collection, Collector, DiskUsage};

/// Everything the page of one open case holds.
#[derive(Debug)]
pub struct CaseView {
    case: CaseMetadata,
    collectors: Vec<Collector>,
    collections: Vec<Collection>,
    /// Collections open in detail tabs, in the order they were opened.
    opened: Vec<Collection>,
    selected: Option<String>,
    analyses: AnalysisBoard,
    analyzers: Vec<AnalyzerInfo>,
    usage: Option<DiskUsage>,
}

impl CaseView {
    pub fn new(case: CaseMetadata) -> Self {
        Self {
            case,
            collectors: Vec::new(),
            collections: Vec::new(),
            opened: Vec::new(),
            selected: None,
            analyses: AnalysisBoard::default(),
            analyzers: Vec::new(),
            usage: None,
        }
    }

    pub fn case(&self) -> &CaseMetadata {
        &self.case
    }

    pub fn case_guid(&self) -> &str {
        &self.case.guid
    }

    pub fn set_case(&mut self, case: CaseMetadata) {
        self.case = case;
    }

    pub fn collectors(&self) -> &[Collector] {
        &self.collectors
    }

    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    pub fn opened(&self) -> &[Collection] {
        &self.opened
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn analyses(&self) -> &AnalysisBoard {
        &self.analyses
    }

    pub fn analyses_mut(&mut self) -> &mut AnalysisBoard {
        &mut self.analyses
    }

    pub fn analyzers(&self) -> &[AnalyzerInfo] {
        &self.analyzers
    }

    pub fn set_analyzers(&mut self, analyzers: Vec<AnalyzerInfo>) {
        self.analyzers = analyzers;
    }

    pub fn usage(&self) -> Option<&DiskUsage> {
        self.usage.as_ref()
    }

    pub fn set_usage(&mut self, usage: Option<DiskUsage>) {
        self.usage = usage;
    }

    pub fn set_collectors(&mut self, mut collectors: Vec<Collector>) {
        sort_newest_first(&mut collectors);
        self.collectors = collectors;
    }

    pub fn set_collections(&mut self, mut collections: Vec<Collection>) {
        sort_newest_first(&mut collections);
        self.collections = collections;
    }

    pub fn insert_collector(&mut self, collector: Collector) {
        insert_sorted(&mut self.collectors, collector);
    }

    pub fn insert_collection(&mut self, collection: Collection) {
        insert_sorted(&mut self.collections, collection);
    }

    pub fn collector(&self, guid: &str) -> Option<&Collector> {
        self.collectors.iter().find(|c| c.guid == guid)
    }

    pub fn collection(&self, guid: &str) -> Option<&Collection> {
        self.collections
            .iter()
            .find(|c| c.guid == guid)
            .or_else(|| self.opened.iter().find(|c| c.guid == guid))
    }

    pub fn remove_collector(&mut self, guid: &str) -> Option<Collector> {
        remove_by_guid(&mut self.collectors, guid)
    }

    /// Drops the collection from the list, any open detail tab, and the
    /// analysis board.
    pub fn remove_collection(&mut self, guid: &str) -> bool {
        let listed = remove_by_guid(&mut self.collections, guid).is_some();
        let opened = remove_by_guid(&mut self.opened, guid).is_some();
        self.analyses.forget(guid);
        if self.selected.as_deref() == Some(guid) {
            self.selected = self.opened.first().map(|c| c.guid.clone());
        }
        listed || opened
    }

    /// Swaps an edited collection into the list and any open detail tab.
    pub fn replace_collection(&mut self, collection: Collection) -> bool {
        let opened = replace_by_guid(&mut self.opened, collection.clone());
        let listed = replace_by_guid(&mut self.collections, collection);
        listed || opened
    }

    pub fn open_collection(&mut self, guid: &str) -> bool {
        if !self.opened.iter().any(|c| c.guid == guid) {
            let Some(collection) = self.collections.iter().find(|c| c.guid == guid) else {
                return false;
            };
            self.opened.push(collection.clone());
        }
        self.selected = Some(guid.to_string());
        true
    }

    pub fn close_collection(&mut self, guid: &str) {
        remove_by_guid(&mut self.opened, guid);
        if self.selected.as_deref() == Some(guid) || self.selected.is_none() {
            self.selected = self.opened.first().map(|c| c.guid.clone());
        }
    }

    /// True when no collector of this case shares the collection's
    /// fingerprint. Always computed from the current collector list.
    pub fn is_orphaned(&self, collection: &Collection) -> bool {
        let Some(fingerprint) = collection.fingerprint.as_deref() else {
            return true;
        };
        !self
            .collectors
            .iter()
            .any(|c| c.fingerprint.as_deref() == Some(fingerprint))
    }

    pub fn analysis_menu(&self, collection: &str, analyzer: &str) -> Option<Vec<MenuItem>> {
        let c = self.collection(collection)?;
        let state = self.analyses.state(collection, analyzer);
        Some(action_menu(state, self.is_orphaned(c)))
    }
}
