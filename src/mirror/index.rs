use std::collections::{BTreeSet, HashMap, HashSet};

use super::lists::{case_display_order, insert_sorted, remove_by_guid, replace_by_guid, sort_newest_first};
use crate::model::{ApiDiskUsage, CaseMetadata, DiskUsage};

/// Share of each kind in a case's usage, in percent.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct UsageShare {
    pub collectors: f64,
    pub collections: f64,
    pub analyses: f64,
}

impl UsageShare {
    pub fn of(usage: &DiskUsage) -> Self {
        let total = usage.total();
        if total == 0 {
            return Self::default();
        }
        let pct = |n: u64| (n as f64) * 100.0 / (total as f64);
        Self {
            collectors: pct(usage.collectors),
            collections: pct(usage.collections),
            analyses: pct(usage.analyses),
        }
    }
}

/// A dashboard row. The derived fields are never sent back to the server.
#[derive(Clone, Debug, PartialEq)]
pub struct CaseSummary {
    pub case: CaseMetadata,
    pub total: u64,
    pub quota: UsageShare,
    pub unseen_new: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UsageRow {
    pub guid: String,
    pub name: String,
    pub usage: DiskUsage,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DiskUsageReport {
    pub rows: Vec<UsageRow>,
    pub total: u64,
    pub quota: u64,
    pub updated: Option<String>,
}

/// The dashboard's list of cases.
#[derive(Debug, Default)]
pub struct CaseIndex {
    cases: Vec<CaseMetadata>,
    seen: BTreeSet<String>,
    unseen: HashSet<String>,
    usage: HashMap<String, DiskUsage>,
    usage_updated: Option<String>,
}

impl CaseIndex {
    /// Restores the guids persisted from a previous listing.
    pub fn restore_seen(&mut self, seen: BTreeSet<String>) {
        self.seen = seen;
    }

    pub fn cases(&self) -> &[CaseMetadata] {
        &self.cases
    }

    pub fn case(&self, guid: &str) -> Option<&CaseMetadata> {
        self.cases.iter().find(|c| c.guid == guid)
    }

    pub fn seen(&self) -> &BTreeSet<String> {
        &self.seen
    }

    /// Installs a full listing. Cases missing from the previously seen set
    /// are flagged new; the seen set becomes the current listing.
    pub fn set_cases(&mut self, mut cases: Vec<CaseMetadata>) {
        sort_newest_first(&mut cases);
        self.unseen = cases
            .iter()
            .filter(|c| !self.seen.contains(&c.guid))
            .map(|c| c.guid.clone())
            .collect();
        self.seen = cases.iter().map(|c| c.guid.clone()).collect();
        self.cases = cases;
    }

    /// A case created here is not "new" to this user.
    pub fn insert(&mut self, case: CaseMetadata) {
        self.seen.insert(case.guid.clone());
        insert_sorted(&mut self.cases, case);
    }

    pub fn replace(&mut self, case: CaseMetadata) -> bool {
        replace_by_guid(&mut self.cases, case)
    }

    pub fn remove(&mut self, guid: &str) -> Option<CaseMetadata> {
        self.unseen.remove(guid);
        self.usage.remove(guid);
        remove_by_guid(&mut self.cases, guid)
    }

    pub fn set_usage(&mut self, usage: &ApiDiskUsage) {
        self.usage = usage
            .cases
            .iter()
            .map(|u| (u.guid.clone(), u.clone()))
            .collect();
        self.usage_updated = Some(usage.updated.clone());
    }

    pub fn usage(&self, guid: &str) -> Option<&DiskUsage> {
        self.usage.get(guid)
    }

    pub fn summaries(&self, query: Option<&str>) -> Vec<CaseSummary> {
        case_display_order(&self.cases, query)
            .into_iter()
            .map(|case| {
                let usage = self.usage.get(&case.guid);
                CaseSummary {
                    case: case.clone(),
                    total: usage.map(DiskUsage::total).unwrap_or(0),
                    quota: usage.map(UsageShare::of).unwrap_or_default(),
                    unseen_new: self.unseen.contains(&case.guid),
                }
            })
            .collect()
    }

    pub fn usage_report(&self, quota: u64) -> DiskUsageReport {
        let rows: Vec<UsageRow> = self
            .cases
            .iter()
            .map(|c| UsageRow {
                guid: c.guid.clone(),
                name: c.name.clone(),
                usage: self.usage.get(&c.guid).cloned().unwrap_or(DiskUsage {
                    guid: c.guid.clone(),
                    collectors: 0,
                    collections: 0,
                    analyses: 0,
                }),
            })
            .collect();
        let total = self.usage.values().map(DiskUsage::total).sum();
        DiskUsageReport {
            rows,
            total,
            quota,
            updated: self.usage_updated.clone(),
        }
    }
}
