use std::collections::HashMap;

/// Independently refreshed parts of the mirror.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Section {
    Cases,
    Collectors,
    Collections,
    Analyses(String),
    Usage,
}

/// Issued when a request starts; checked before its response may touch
/// the mirror.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ticket {
    /// `None` for the dashboard index, which outlives case views.
    epoch: Option<u64>,
    section: Option<(Section, u64)>,
}

#[derive(Debug, Default)]
pub struct Generations {
    epoch: u64,
    seq: u64,
    latest: HashMap<Section, u64>,
}

impl Generations {
    /// Invalidates every ticket issued for the current case view.
    pub fn bump_epoch(&mut self) {
        self.epoch += 1;
        self.latest.retain(|s, _| *s == Section::Cases || *s == Section::Usage);
    }

    pub fn view_ticket(&self) -> Ticket {
        Ticket {
            epoch: Some(self.epoch),
            section: None,
        }
    }

    pub fn index_ticket(&self) -> Ticket {
        Ticket {
            epoch: None,
            section: None,
        }
    }

    /// A ticket that is also superseded by any later `begin` of the same section.
    pub fn begin(&mut self, section: Section, view_scoped: bool) -> Ticket {
        self.seq += 1;
        self.latest.insert(section.clone(), self.seq);
        Ticket {
            epoch: view_scoped.then_some(self.epoch),
            section: Some((section, self.seq)),
        }
    }

    pub fn accepts(&self, ticket: &Ticket) -> bool {
        if let Some(epoch) = ticket.epoch
            && epoch != self.epoch
        {
            return false;
        }
        match &ticket.section {
            None => true,
            Some((section, seq)) => self.latest.get(section) == Some(seq),
        }
    }
}
