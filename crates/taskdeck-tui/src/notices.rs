//! Ephemeral notifications.
//!
//! Lightweight toasts shown in the status strip: operation results,
//! errors, hints. They expire on the tick cycle rather than requiring
//! dismissal.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// How long a notice stays visible.
const NOTICE_TTL: Duration = Duration::from_secs(4);

/// Most notices kept at once; older ones are dropped first.
const MAX_NOTICES: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub text: String,
    pub level: NoticeLevel,
    created: Instant,
}

#[derive(Debug, Default, Clone)]
pub struct Notices {
    items: VecDeque<Notice>,
}

impl Notices {
    pub fn info(&mut self, text: impl Into<String>) {
        self.push(NoticeLevel::Info, text.into());
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.push(NoticeLevel::Success, text.into());
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push(NoticeLevel::Error, text.into());
    }

    fn push(&mut self, level: NoticeLevel, text: String) {
        if self.items.len() == MAX_NOTICES {
            self.items.pop_front();
        }
        self.items.push_back(Notice {
            text,
            level,
            created: Instant::now(),
        });
    }

    /// Drops notices older than the TTL. Called on every tick.
    pub fn expire(&mut self, now: Instant) {
        self.items
            .retain(|notice| now.duration_since(notice.created) < NOTICE_TTL);
    }

    /// The newest notice, for the status strip.
    pub fn latest(&self) -> Option<&Notice> {
        self.items.back()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
