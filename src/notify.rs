//! Transient user-visible notices ("toasts").

use std::collections::VecDeque;
use std::time::{Duration, Instant};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
    pub created: Instant,
}

/// Bounded list of notices, newest last. Old ones expire after `ttl`.
#[derive(Debug)]
pub struct Notifications {
    notices: VecDeque<Notice>,
    ttl: Duration,
    max: usize,
}

impl Notifications {
    pub fn new(ttl: Duration, max: usize) -> Self {
        Self {
            notices: VecDeque::new(),
            ttl,
            max: max.max(1),
        }
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.push_at(NoticeLevel::Info, text.into(), Instant::now());
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.push_at(NoticeLevel::Error, text.into(), Instant::now());
    }

    pub fn push_at(&mut self, level: NoticeLevel, text: String, created: Instant) {
        if self.notices.len() == self.max {
            self.notices.pop_front();
        }
        self.notices.push_back(Notice {
            level,
            text,
            created,
        });
    }

    /// Drop notices older than the TTL. Returns whether anything was removed.
    pub fn prune(&mut self, now: Instant) -> bool {
        let before = self.notices.len();
        let ttl = self.ttl;
        self.notices
            .retain(|n| now.saturating_duration_since(n.created) < ttl);
        before != self.notices.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}
