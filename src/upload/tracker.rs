use std::cell::Cell;
use std::rc::Rc;

use tokio::sync::watch;

use crate::error::{SyncError, SyncResult};
use crate::remote::TransferProgress;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UploadStatus {
    Idle,
    Confirming { file: String },
    Transferring { file: String, percent: u8 },
    /// Every byte was sent; the server has not answered yet.
    Processing { file: String },
    Editing { file: String },
    Committed { guid: String },
    Declined,
    Failed { message: String },
}

impl UploadStatus {
    /// Progress label; empty whenever no transfer is showing.
    pub fn label(&self) -> String {
        match self {
            UploadStatus::Transferring { file, percent } => format!("[{}%] {}", percent, file),
            UploadStatus::Processing { file } => format!("[100%] Processing {}", file),
            _ => String::new(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            UploadStatus::Committed { .. } | UploadStatus::Declined | UploadStatus::Failed { .. }
        )
    }
}

/// `floor(100 * sent / total)`, capped at 100. An empty file is complete.
pub fn percent(sent: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    let pct = (sent as u128 * 100) / total as u128;
    pct.min(100) as u8
}

/// Publishes the state of the one upload allowed at a time.
pub struct UploadTracker {
    status: watch::Sender<UploadStatus>,
    busy: Cell<bool>,
}

impl Default for UploadTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl UploadTracker {
    pub fn new() -> Self {
        let (status, _) = watch::channel(UploadStatus::Idle);
        Self {
            status,
            busy: Cell::new(false),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<UploadStatus> {
        self.status.subscribe()
    }

    pub fn status(&self) -> UploadStatus {
        self.status.borrow().clone()
    }

    pub fn is_busy(&self) -> bool {
        self.busy.get()
    }

    /// Claims the tracker for `file`. Fails while another upload holds it.
    pub fn acquire(self: &Rc<Self>, file: &str) -> SyncResult<UploadSlot> {
        if self.busy.replace(true) {
            return Err(SyncError::UploadBusy);
        }
        self.publish(UploadStatus::Confirming {
            file: file.to_string(),
        });
        Ok(UploadSlot {
            tracker: Rc::clone(self),
            file: file.to_string(),
            percent: 0,
            finished: false,
        })
    }

    fn publish(&self, status: UploadStatus) {
        tracing::debug!(status = ?status, "upload status");
        self.status.send_replace(status);
    }
}

/// Exclusive handle on the tracker for one upload. Dropping it before a
/// terminal state (e.g. the task was cancelled) resets the tracker to Idle.
pub struct UploadSlot {
    tracker: Rc<UploadTracker>,
    file: String,
    percent: u8,
    finished: bool,
}

impl UploadSlot {
    pub fn file(&self) -> &str {
        &self.file
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }

    pub fn begin_transfer(&mut self) {
        self.percent = 0;
        self.tracker.publish(UploadStatus::Transferring {
            file: self.file.clone(),
            percent: 0,
        });
    }

    /// Never moves backwards. Reaching 100 switches to Processing.
    pub fn report(&mut self, progress: TransferProgress) {
        if self.finished {
            return;
        }
        self.percent = percent(progress.sent, progress.total).max(self.percent);
        let status = if self.percent >= 100 {
            UploadStatus::Processing {
                file: self.file.clone(),
            }
        } else {
            UploadStatus::Transferring {
                file: self.file.clone(),
                percent: self.percent,
            }
        };
        self.tracker.status.send_if_modified(|current| {
            if *current == status {
                return false;
            }
            *current = status;
            true
        });
    }

    pub fn editing(&mut self) {
        self.percent = 100;
        self.tracker.publish(UploadStatus::Editing {
            file: self.file.clone(),
        });
    }

    pub fn commit(mut self, guid: &str) {
        self.finish(UploadStatus::Committed {
            guid: guid.to_string(),
        });
    }

    pub fn decline(mut self) {
        self.finish(UploadStatus::Declined);
    }

    pub fn fail(mut self, message: impl Into<String>) {
        self.finish(UploadStatus::Failed {
            message: message.into(),
        });
    }

    fn finish(&mut self, status: UploadStatus) {
        self.finished = true;
        self.tracker.publish(status);
        self.tracker.busy.set(false);
    }
}

impl Drop for UploadSlot {
    fn drop(&mut self) {
        if !self.finished {
            tracing::warn!(file = %self.file, "upload abandoned");
            self.finish(UploadStatus::Idle);
        }
    }
}
