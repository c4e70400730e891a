use std::cmp::Reverse;

use time::OffsetDateTime;

use crate::model::{CaseMetadata, Collection, Collector, parse_stamp};

/// Identity and creation time of a mirrored entity.
pub trait Entity {
    fn guid(&self) -> &str;
    fn created(&self) -> Option<&str>;

    fn created_at(&self) -> Option<OffsetDateTime> {
        parse_stamp(self.created())
    }
}

impl Entity for CaseMetadata {
    fn guid(&self) -> &str {
        &self.guid
    }
    fn created(&self) -> Option<&str> {
        self.created.as_deref()
    }
}

impl Entity for Collector {
    fn guid(&self) -> &str {
        &self.guid
    }
    fn created(&self) -> Option<&str> {
        self.created.as_deref()
    }
}

impl Entity for Collection {
    fn guid(&self) -> &str {
        &self.guid
    }
    fn created(&self) -> Option<&str> {
        self.created.as_deref()
    }
}

/// Most recent first; undated entries go last. Stable.
pub fn sort_newest_first<T: Entity>(items: &mut [T]) {
    items.sort_by_key(|item| Reverse(item.created_at()));
}

pub fn insert_sorted<T: Entity>(items: &mut Vec<T>, item: T) {
    items.push(item);
    sort_newest_first(items);
}

pub fn remove_by_guid<T: Entity>(items: &mut Vec<T>, guid: &str) -> Option<T> {
    let pos = items.iter().position(|i| i.guid() == guid)?;
    Some(items.remove(pos))
}

/// Swaps the entry in place, keeping its position.
pub fn replace_by_guid<T: Entity>(items: &mut [T], item: T) -> bool {
    match items.iter_mut().find(|i| i.guid() == item.guid()) {
        Some(slot) => {
            *slot = item;
            true
        }
        None => false,
    }
}

/// Dashboard ordering.
///
/// With a query: cases whose name, description, tsid or guid contain it
/// (case-insensitive), in list order. Without: open cases before closed
/// ones, each group most recent first.
pub fn case_display_order<'a>(cases: &'a [CaseMetadata], query: Option<&str>) -> Vec<&'a CaseMetadata> {
    let query = query.map(str::trim).filter(|q| !q.is_empty());
    match query {
        Some(q) => {
            let q = q.to_lowercase();
            let contains = |s: Option<&str>| s.is_some_and(|s| s.to_lowercase().contains(&q));
            cases
                .iter()
                .filter(|c| {
                    contains(Some(c.name.as_str()))
                        || contains(c.description.as_deref())
                        || contains(c.tsid.as_deref())
                        || contains(Some(c.guid.as_str()))
                })
                .collect()
        }
        None => {
            let mut out: Vec<&CaseMetadata> = cases.iter().collect();
            out.sort_by_key(|c| (c.is_closed(), Reverse(c.created_at())));
            out
        }
    }
}
