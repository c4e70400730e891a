//! The client session: typed API, shared cache, mirror, notices and the
//! upload tracker, wired together for a single-threaded runtime.

use std::cell::{Ref, RefCell};
use std::collections::BTreeSet;
use std::rc::Rc;
use std::time::Duration;

use crate::cache::CacheStore;
use crate::dialogs::{ConfirmPrompt, Dialogs};
use crate::error::{GatewayError, SyncError, SyncResult};
use crate::mirror::{CaseView, Mirror, Section, Ticket};
use crate::model::{CaseMetadata, Collection, Collector};
use crate::notice::{Notice, Notices};
use crate::remote::{Api, Gateway};
use crate::upload::UploadTracker;

mod analyses;
mod case;
mod collections;
mod collectors;
mod dashboard;
mod delete;
mod upload;

pub use self::analyses::AnalyzerRow;
pub use self::case::LoadReport;
pub use self::delete::DeleteOutcome;

pub struct Session<G> {
    api: Api<G>,
    cache: Rc<CacheStore>,
    mirror: Rc<RefCell<Mirror>>,
    notices: Rc<RefCell<Notices>>,
    uploads: Rc<UploadTracker>,
}

impl<G> Clone for Session<G> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            cache: Rc::clone(&self.cache),
            mirror: Rc::clone(&self.mirror),
            notices: Rc::clone(&self.notices),
            uploads: Rc::clone(&self.uploads),
        }
    }
}

impl<G: Gateway + 'static> Session<G> {
    pub fn new(gateway: G, disk_usage_ttl: Duration) -> Self {
        Self {
            api: Api::new(Rc::new(gateway)),
            cache: Rc::new(CacheStore::new(disk_usage_ttl)),
            mirror: Rc::new(RefCell::new(Mirror::default())),
            notices: Rc::new(RefCell::new(Notices::default())),
            uploads: Rc::new(UploadTracker::new()),
        }
    }

    pub fn api(&self) -> &Api<G> {
        &self.api
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    pub fn mirror(&self) -> Ref<'_, Mirror> {
        self.mirror.borrow()
    }

    pub fn uploads(&self) -> &UploadTracker {
        &self.uploads
    }

    pub fn drain_notices(&self) -> Vec<Notice> {
        self.notices.borrow_mut().drain()
    }

    pub fn restore_seen(&self, seen: BTreeSet<String>) {
        self.mirror.borrow_mut().index_mut().restore_seen(seen);
    }

    pub fn seen_cases(&self) -> BTreeSet<String> {
        self.mirror.borrow().index().seen().clone()
    }

    /// Runs `f` on the mirror if `ticket` is still current.
    fn apply<R>(&self, ticket: &Ticket, f: impl FnOnce(&mut Mirror) -> R) -> SyncResult<R> {
        let mut mirror = self.mirror.borrow_mut();
        if !mirror.accepts(ticket) {
            tracing::debug!(?ticket, "stale response dropped");
            return Err(SyncError::Detached);
        }
        Ok(f(&mut mirror))
    }

    fn apply_view<R>(&self, ticket: &Ticket, f: impl FnOnce(&mut CaseView) -> R) -> SyncResult<R> {
        self.apply(ticket, |m| m.view_mut().map(f))?
            .ok_or(SyncError::Detached)
    }

    /// Writes already happened server-side, so a closed view only means
    /// there is nothing local to update.
    fn settle_write(&self, ticket: &Ticket, f: impl FnOnce(&mut CaseView)) {
        if self.apply_view(ticket, f).is_err() {
            tracing::debug!("write result not mirrored, view was closed");
        }
    }

    fn write_failed(&self, op: &'static str, title: &str, source: GatewayError) -> SyncError {
        tracing::warn!(op, error = %source, "write failed");
        self.notices.borrow_mut().error(title, source.to_string());
        SyncError::WriteFailure { op, source }
    }

    /// Guid of the open case and a ticket bound to its view.
    fn current_case(&self) -> SyncResult<(String, Ticket)> {
        let mirror = self.mirror.borrow();
        let view = mirror.view().ok_or(SyncError::NoCaseOpen)?;
        Ok((view.case_guid().to_string(), mirror.view_ticket()))
    }

    fn begin_section(&self, section: Section) -> SyncResult<(String, Ticket)> {
        let mut mirror = self.mirror.borrow_mut();
        let guid = mirror
            .view()
            .ok_or(SyncError::NoCaseOpen)?
            .case_guid()
            .to_string();
        Ok((guid, mirror.begin(section)))
    }

    fn find_case(&self, guid: &str) -> Option<CaseMetadata> {
        let mirror = self.mirror.borrow();
        if let Some(view) = mirror.view()
            && view.case_guid() == guid
        {
            return Some(view.case().clone());
        }
        mirror.index().case(guid).cloned()
    }

    fn find_collector(&self, guid: &str) -> SyncResult<Collector> {
        let mirror = self.mirror.borrow();
        let view = mirror.view().ok_or(SyncError::NoCaseOpen)?;
        view.collector(guid)
            .cloned()
            .ok_or_else(|| SyncError::UnknownEntity {
                kind: "collector",
                guid: guid.to_string(),
            })
    }

    fn find_collection(&self, guid: &str) -> SyncResult<Collection> {
        let mirror = self.mirror.borrow();
        let view = mirror.view().ok_or(SyncError::NoCaseOpen)?;
        view.collection(guid)
            .cloned()
            .ok_or_else(|| SyncError::UnknownEntity {
                kind: "collection",
                guid: guid.to_string(),
            })
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
