//! Coalesces the stream of spans a resize session emits into one database
//! write. Each new span restarts the timer; the write fires once the pointer
//! has been quiet for the configured delay, or immediately on flush.

use std::time::{Duration, Instant};

use crate::models::activity::ActivityId;
use crate::services::scheduling::resize::TimeSpan;

#[derive(Debug, Default)]
pub struct DebouncedSpanWriter {
    pending: Option<(ActivityId, TimeSpan)>,
    deadline: Option<Instant>,
}

impl DebouncedSpanWriter {
    pub fn queue(&mut self, activity_id: ActivityId, span: TimeSpan, delay: Duration) {
        self.pending = Some((activity_id, span));
        self.deadline = Some(Instant::now() + delay);
    }

    /// The pending write, if its quiet period has elapsed.
    pub fn take_due(&mut self, now: Instant) -> Option<(ActivityId, TimeSpan)> {
        match self.deadline {
            Some(deadline) if now >= deadline => self.take(),
            _ => None,
        }
    }

    /// The pending write regardless of the timer. Called when the session
    /// ends or the app shuts down.
    pub fn take(&mut self) -> Option<(ActivityId, TimeSpan)> {
        self.deadline = None;
        self.pending.take()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use pretty_assertions::assert_eq;

    fn span(start_h: u32, end_h: u32) -> TimeSpan {
        let d = NaiveDate::from_ymd_opt(2025, 10, 2).unwrap();
        TimeSpan {
            start_date: d,
            start_time: NaiveTime::from_hms_opt(start_h, 0, 0).unwrap(),
            end_date: d,
            end_time: NaiveTime::from_hms_opt(end_h, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_not_due_before_delay() {
        let mut writer = DebouncedSpanWriter::default();
        writer.queue(ActivityId::Persisted(1), span(9, 10), Duration::from_millis(300));
        assert_eq!(writer.take_due(Instant::now()), None);
        assert!(writer.is_pending());
    }

    #[test]
    fn test_due_after_delay() {
        let mut writer = DebouncedSpanWriter::default();
        writer.queue(ActivityId::Persisted(1), span(9, 10), Duration::ZERO);
        let taken = writer.take_due(Instant::now()).unwrap();
        assert_eq!(taken.0, ActivityId::Persisted(1));
        assert!(!writer.is_pending());
    }

    #[test]
    fn test_requeue_keeps_only_latest_span() {
        let mut writer = DebouncedSpanWriter::default();
        writer.queue(ActivityId::Persisted(1), span(9, 10), Duration::ZERO);
        writer.queue(ActivityId::Persisted(1), span(9, 11), Duration::ZERO);
        let (_, taken) = writer.take_due(Instant::now()).unwrap();
        assert_eq!(taken, span(9, 11));
    }

    #[test]
    fn test_flush_ignores_timer() {
        let mut writer = DebouncedSpanWriter::default();
        writer.queue(ActivityId::Persisted(1), span(9, 10), Duration::from_secs(60));
        assert!(writer.take().is_some());
        assert_eq!(writer.take(), None);
    }
}
