//! Transient user notifications raised by the synchronization layer.

use std::collections::VecDeque;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct Notices {
    queue: VecDeque<Notice>,
}

impl Notices {
    pub fn success(&mut self, title: &str, message: impl Into<String>) {
        self.queue.push_back(Notice {
            level: NoticeLevel::Success,
            title: title.to_string(),
            message: message.into(),
        });
    }

    pub fn error(&mut self, title: &str, message: impl Into<String>) {
        self.queue.push_back(Notice {
            level: NoticeLevel::Error,
            title: title.to_string(),
            message: message.into(),
        });
    }

    pub fn drain(&mut self) -> Vec<Notice> {
        self.queue.drain(..).collect()
    }
}
