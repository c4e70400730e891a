//! Type-to-confirm protocol shared by every destructive operation.

use crate::model::{CaseMetadata, Collection, Collector};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeleteTarget {
    Case {
        guid: String,
        name: String,
    },
    Collector {
        case: String,
        guid: String,
        fingerprint: Option<String>,
    },
    Collection {
        case: String,
        guid: String,
        hostname: Option<String>,
    },
}

impl DeleteTarget {
    pub fn case(case: &CaseMetadata) -> Self {
        DeleteTarget::Case {
            guid: case.guid.clone(),
            name: case.name.clone(),
        }
    }

    pub fn collector(case: &str, collector: &Collector) -> Self {
        DeleteTarget::Collector {
            case: case.to_string(),
            guid: collector.guid.clone(),
            fingerprint: collector.fingerprint.clone(),
        }
    }

    pub fn collection(case: &str, collection: &Collection) -> Self {
        DeleteTarget::Collection {
            case: case.to_string(),
            guid: collection.guid.clone(),
            hostname: collection.hostname.clone(),
        }
    }

    pub fn guid(&self) -> &str {
        match self {
            DeleteTarget::Case { guid, .. }
            | DeleteTarget::Collector { guid, .. }
            | DeleteTarget::Collection { guid, .. } => guid,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            DeleteTarget::Case { .. } => "case",
            DeleteTarget::Collector { .. } => "collector",
            DeleteTarget::Collection { .. } => "collection",
        }
    }

    /// What the user has to type back: the human-readable identifier, or
    /// the guid when that is missing.
    pub fn confirmation_token(&self) -> String {
        let primary = match self {
            DeleteTarget::Case { name, .. } => Some(name.as_str()),
            DeleteTarget::Collector { fingerprint, .. } => fingerprint.as_deref(),
            DeleteTarget::Collection { hostname, .. } => hostname.as_deref(),
        };
        match primary {
            Some(p) if !p.is_empty() => p.to_string(),
            _ => self.guid().to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeletePhase {
    Idle,
    Confirming,
    Committing,
    Done,
}

#[derive(Debug)]
pub struct DeleteFlow {
    target: DeleteTarget,
    token: String,
    phase: DeletePhase,
}

impl DeleteFlow {
    pub fn new(target: DeleteTarget) -> Self {
        let token = target.confirmation_token();
        Self {
            target,
            token,
            phase: DeletePhase::Idle,
        }
    }

    pub fn target(&self) -> &DeleteTarget {
        &self.target
    }

    pub fn phase(&self) -> DeletePhase {
        self.phase
    }

    /// Enters Confirming and returns the token to display.
    pub fn request(&mut self) -> &str {
        self.phase = DeletePhase::Confirming;
        &self.token
    }

    /// Feeds the user's answer (`None` when the dialog was dismissed).
    /// Only an exact, non-empty match moves on to Committing.
    pub fn submit(&mut self, answer: Option<&str>) -> bool {
        if self.phase != DeletePhase::Confirming {
            return false;
        }
        match answer {
            Some(a) if !a.is_empty() && a == self.token => {
                self.phase = DeletePhase::Committing;
                true
            }
            _ => {
                self.phase = DeletePhase::Idle;
                false
            }
        }
    }

    /// Records the gateway outcome; a failed delete leaves the flow Idle.
    pub fn settle(&mut self, deleted: bool) {
        if self.phase != DeletePhase::Committing {
            return;
        }
        self.phase = if deleted {
            DeletePhase::Done
        } else {
            DeletePhase::Idle
        };
    }
}

#[cfg(test)]
#[path = "tests/confirm_tests.rs"]
mod tests;
