//! User-visible notifications
//!
//! Success alerts expire after [`ALERT_SUCCESS_DURATION`]; error alerts stay
//! until dismissed.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// Display time of success notifications
pub const ALERT_SUCCESS_DURATION: Duration = Duration::from_millis(2500);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub header: Option<String>,
    pub message: String,
    pub priority: Priority,
    /// `None` keeps the alert until it is dismissed
    pub duration: Option<Duration>,
}

impl Alert {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            header: None,
            message: message.into(),
            priority: Priority::Success,
            duration: Some(ALERT_SUCCESS_DURATION),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            header: Some("Chyba".to_string()),
            message: message.into(),
            priority: Priority::Error,
            duration: None,
        }
    }
}

/// Shared queue of alerts waiting to be shown
#[derive(Debug, Clone, Default)]
pub struct AlertQueue {
    inner: Arc<Mutex<Vec<(Instant, Alert)>>>,
}

impl AlertQueue {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<(Instant, Alert)>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn push(&self, alert: Alert) {
        self.push_at(alert, Instant::now());
    }

    pub fn push_at(&self, alert: Alert, posted: Instant) {
        self.lock().push((posted, alert));
    }

    /// Alerts still visible at `now`; expired ones are dropped
    pub fn visible_at(&self, now: Instant) -> Vec<Alert> {
        let mut alerts = self.lock();
        alerts.retain(|(posted, alert)| match alert.duration {
            Some(duration) => now.saturating_duration_since(*posted) < duration,
            None => true,
        });
        alerts.iter().map(|(_, alert)| alert.clone()).collect()
    }

    pub fn visible(&self) -> Vec<Alert> {
        self.visible_at(Instant::now())
    }

    /// Remove the alert at `index` of [`visible`](Self::visible)
    pub fn dismiss(&self, index: usize) -> Option<Alert> {
        let mut alerts = self.lock();
        (index < alerts.len()).then(|| alerts.remove(index).1)
    }

    /// Take every queued alert, expired or not
    pub fn drain(&self) -> Vec<Alert> {
        self.lock().drain(..).map(|(_, alert)| alert).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_alert_expires() {
        let queue = AlertQueue::new();
        let start = Instant::now();
        queue.push_at(Alert::success("Hotovo"), start);

        assert_eq!(queue.visible_at(start + Duration::from_millis(2499)).len(), 1);
        assert!(queue.visible_at(start + ALERT_SUCCESS_DURATION).is_empty());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_error_alert_stays_until_dismissed() {
        let queue = AlertQueue::new();
        let start = Instant::now();
        queue.push_at(Alert::error("Selhalo"), start);

        let visible = queue.visible_at(start + Duration::from_secs(3600));
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].header.as_deref(), Some("Chyba"));

        assert_eq!(queue.dismiss(0).map(|a| a.message), Some("Selhalo".to_string()));
        assert!(queue.dismiss(0).is_none());
    }

    #[test]
    fn test_clones_share_queue() {
        let queue = AlertQueue::new();
        let other = queue.clone();
        other.push(Alert::success("a"));

        assert_eq!(queue.drain().len(), 1);
        assert!(other.is_empty());
    }
}
