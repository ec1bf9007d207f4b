//! Transient notifications

use std::collections::VecDeque;
use std::time::{Duration, Instant};

pub const DEFAULT_TTL: Duration = Duration::from_secs(5);

/// Oldest notifications are dropped beyond this many.
const MAX_VISIBLE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub level: NotificationLevel,
    pub message: String,
    pub raised_at: Instant,
}

#[derive(Debug, Clone)]
pub struct Notifier {
    items: VecDeque<Notification>,
    next_id: u64,
    ttl: Duration,
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

impl Notifier {
    pub fn new(ttl: Duration) -> Self {
        Self {
            items: VecDeque::new(),
            next_id: 1,
            ttl,
        }
    }

    /// Raise a notification stamped with the caller's clock.
    pub fn push(
        &mut self,
        level: NotificationLevel,
        message: impl Into<String>,
        now: Instant,
    ) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.items.push_back(Notification {
            id,
            level,
            message: message.into(),
            raised_at: now,
        });
        while self.items.len() > MAX_VISIBLE {
            self.items.pop_front();
        }
        id
    }

    pub fn info(&mut self, message: impl Into<String>, now: Instant) -> u64 {
        self.push(NotificationLevel::Info, message, now)
    }

    pub fn success(&mut self, message: impl Into<String>, now: Instant) -> u64 {
        self.push(NotificationLevel::Success, message, now)
    }

    pub fn error(&mut self, message: impl Into<String>, now: Instant) -> u64 {
        self.push(NotificationLevel::Error, message, now)
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != before
    }

    /// Drop notifications older than the TTL; returns how many were dropped.
    pub fn expire(&mut self, now: Instant) -> usize {
        let before = self.items.len();
        let ttl = self.ttl;
        self.items
            .retain(|n| now.saturating_duration_since(n.raised_at) < ttl);
        before - self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    pub fn latest(&self) -> Option<&Notification> {
        self.items.back()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expire_after_ttl() {
        let t0 = Instant::now();
        let mut n = Notifier::new(Duration::from_millis(100));
        n.success("Created Acme", t0);
        n.info("Saved Apex", t0 + Duration::from_millis(50));
        assert_eq!(n.expire(t0 + Duration::from_millis(99)), 0);
        assert_eq!(n.expire(t0 + Duration::from_millis(100)), 1);
        assert_eq!(n.latest().map(|x| x.message.as_str()), Some("Saved Apex"));
        assert_eq!(n.expire(t0 + Duration::from_millis(150)), 1);
        assert!(n.is_empty());
    }

    #[test]
    fn raised_at_is_the_given_instant() {
        let t0 = Instant::now() + Duration::from_secs(60);
        let mut n = Notifier::default();
        n.error("boom", t0);
        assert_eq!(n.latest().map(|x| x.raised_at), Some(t0));
        assert_eq!(n.expire(t0 + DEFAULT_TTL - Duration::from_millis(1)), 0);
    }

    #[test]
    fn dismiss_by_id() {
        let now = Instant::now();
        let mut n = Notifier::default();
        let a = n.info("a", now);
        let b = n.error("b", now);
        assert!(n.dismiss(a));
        assert!(!n.dismiss(a));
        assert_eq!(n.latest().map(|x| x.id), Some(b));
        assert_eq!(n.latest().map(|x| x.level), Some(NotificationLevel::Error));
    }

    #[test]
    fn oldest_dropped_beyond_limit() {
        let now = Instant::now();
        let mut n = Notifier::default();
        for i in 0..8 {
            n.info(format!("n{i}"), now);
        }
        assert_eq!(n.len(), MAX_VISIBLE);
        assert_eq!(n.iter().next().map(|x| x.message.as_str()), Some("n3"));
    }
}
