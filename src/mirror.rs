//! In-memory copy of the entities the user is looking at.
//!
//! Lists change only as the outcome of explicit actions; nothing here
//! revalidates in the background.

mod case_menu;
mod case_view;
mod generation;
mod index;
mod lists;

pub use self::case_menu::{CaseAction, CaseMenuItem, case_menu};
pub use self::case_view::CaseView;
pub use self::generation::{Generations, Section, Ticket};
pub use self::index::{CaseIndex, CaseSummary, DiskUsageReport, UsageRow, UsageShare};
pub use self::lists::{Entity, case_display_order, sort_newest_first};

use crate::model::CaseMetadata;

#[derive(Debug, Default)]
pub struct Mirror {
    index: CaseIndex,
    view: Option<CaseView>,
    generations: Generations,
}

impl Mirror {
    pub fn index(&self) -> &CaseIndex {
        &self.index
    }

    pub fn index_mut(&mut self) -> &mut CaseIndex {
        &mut self.index
    }

    pub fn view(&self) -> Option<&CaseView> {
        self.view.as_ref()
    }

    pub fn view_mut(&mut self) -> Option<&mut CaseView> {
        self.view.as_mut()
    }

    /// Abandons the open case view; in-flight responses for it are dropped.
    pub fn close_view(&mut self) {
        self.generations.bump_epoch();
        self.view = None;
    }

    pub(crate) fn install_view(&mut self, case: CaseMetadata) {
        self.view = Some(CaseView::new(case));
    }

    pub fn view_ticket(&self) -> Ticket {
        self.generations.view_ticket()
    }

    pub fn index_ticket(&self) -> Ticket {
        self.generations.index_ticket()
    }

    /// Dashboard sections survive view changes; everything else is
    /// tied to the open case.
    pub fn begin(&mut self, section: Section) -> Ticket {
        let view_scoped = !matches!(section, Section::Cases | Section::Usage);
        self.generations.begin(section, view_scoped)
    }

    pub fn accepts(&self, ticket: &Ticket) -> bool {
        self.generations.accepts(ticket)
    }

    /// Propagates a case update to the index and the open view.
    pub fn replace_case(&mut self, case: CaseMetadata) {
        if let Some(view) = self.view.as_mut()
            && view.case_guid() == case.guid
        {
            view.set_case(case.clone());
        }
        self.index.replace(case);
    }

    /// Removes a deleted case everywhere, closing its view if open.
    pub fn forget_case(&mut self, guid: &str) {
        self.index.remove(guid);
        if self.view.as_ref().is_some_and(|v| v.case_guid() == guid) {
            self.close_view();
        }
    }
}

#[cfg(test)]
#[path = "tests/mirror_tests.rs"]
mod tests;
