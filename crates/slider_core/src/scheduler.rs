//! Scheduled tasks with cancel handles
//!
//! The controller never owns a real timer. It asks a [`Scheduler`] for a
//! task and keeps the returned [`TimerHandle`]; teardown is a single
//! `cancel`. The host drives time forward and hands fired tasks back to the
//! controller one at a time, so a task cancelled while handling an earlier
//! one never fires.

use std::time::Duration;

/// Cancel handle returned when a task is scheduled
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// What a timer does when it fires
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimerTask {
    /// Repeating: advance to the next slide
    AutoAdvance,
    /// Repeating: rotate the card stack
    RotateStack,
    /// One-shot: clear the entry animation on a slide
    EndEntryAnimation { slide: usize },
    /// One-shot: clear the swap animation on a card
    EndCardSwap { slide: usize },
    /// One-shot: remove a faded-out fullscreen overlay
    RemoveOverlay,
}

impl TimerTask {
    pub fn is_repeating(&self) -> bool {
        matches!(self, TimerTask::AutoAdvance | TimerTask::RotateStack)
    }
}

/// A task that came due
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FiredTimer {
    pub handle: TimerHandle,
    pub task: TimerTask,
    pub at: Duration,
}

/// Source of scheduled tasks
pub trait Scheduler {
    /// Current scheduler time
    fn now(&self) -> Duration;

    /// Schedule `task` to fire after `delay`; repeating tasks fire every `delay`
    fn schedule(&mut self, task: TimerTask, delay: Duration) -> TimerHandle;

    /// Cancel a task. Returns `false` if it was not live.
    fn cancel(&mut self, handle: TimerHandle) -> bool;

    /// Is the task still scheduled?
    fn is_live(&self, handle: TimerHandle) -> bool;

    /// Time until the task next fires
    fn remaining(&self, handle: TimerHandle) -> Option<Duration>;

    /// Period of a repeating task, or the delay of a one-shot
    fn period(&self, handle: TimerHandle) -> Option<Duration>;

    /// Pop the earliest task due at or before `deadline` and move the clock to
    /// its due time. Repeating tasks are rescheduled one period later.
    fn fire_next(&mut self, deadline: Duration) -> Option<FiredTimer>;

    /// Move the clock to `deadline` once nothing more is due
    fn settle(&mut self, deadline: Duration);

    /// Number of live repeating tasks
    fn live_repeating(&self) -> usize;
}

#[derive(Debug, Clone)]
struct Entry {
    handle: TimerHandle,
    task: TimerTask,
    due: Duration,
    delay: Duration,
}

/// Deterministic scheduler on a virtual clock.
///
/// Hosts feed it real elapsed time; tests feed it exact durations.
#[derive(Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    next_id: u64,
    entries: Vec<Entry>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn live_count(&self) -> usize {
        self.entries.len()
    }

    /// Live tasks in due order
    pub fn pending(&self) -> Vec<(TimerHandle, TimerTask)> {
        let mut entries: Vec<&Entry> = self.entries.iter().collect();
        entries.sort_by_key(|e| (e.due, e.handle));
        entries.iter().map(|e| (e.handle, e.task)).collect()
    }

    fn entry(&self, handle: TimerHandle) -> Option<&Entry> {
        self.entries.iter().find(|e| e.handle == handle)
    }
}

impl Scheduler for TimerQueue {
    fn now(&self) -> Duration {
        self.now
    }

    fn schedule(&mut self, task: TimerTask, delay: Duration) -> TimerHandle {
        // A zero period would fire forever within one deadline
        let delay = if task.is_repeating() {
            delay.max(Duration::from_millis(1))
        } else {
            delay
        };

        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        self.entries.push(Entry {
            handle,
            task,
            due: self.now + delay,
            delay,
        });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.handle != handle);
        self.entries.len() != before
    }

    fn is_live(&self, handle: TimerHandle) -> bool {
        self.entry(handle).is_some()
    }

    fn remaining(&self, handle: TimerHandle) -> Option<Duration> {
        self.entry(handle).map(|e| e.due.saturating_sub(self.now))
    }

    fn period(&self, handle: TimerHandle) -> Option<Duration> {
        self.entry(handle).map(|e| e.delay)
    }

    fn fire_next(&mut self, deadline: Duration) -> Option<FiredTimer> {
        let pos = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= deadline)
            .min_by_key(|(_, e)| (e.due, e.handle))
            .map(|(i, _)| i)?;

        let entry = &mut self.entries[pos];
        let fired = FiredTimer {
            handle: entry.handle,
            task: entry.task,
            at: entry.due,
        };
        self.now = self.now.max(entry.due);

        if entry.task.is_repeating() {
            entry.due += entry.delay;
        } else {
            self.entries.remove(pos);
        }
        Some(fired)
    }

    fn settle(&mut self, deadline: Duration) {
        self.now = self.now.max(deadline);
    }

    fn live_repeating(&self) -> usize {
        self.entries.iter().filter(|e| e.task.is_repeating()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_repeating_fires_each_period() {
        let mut q = TimerQueue::new();
        let h = q.schedule(TimerTask::AutoAdvance, ms(1000));

        let mut fired = Vec::new();
        while let Some(f) = q.fire_next(ms(3000)) {
            fired.push(f.at);
        }
        q.settle(ms(3000));

        assert_eq!(fired, vec![ms(1000), ms(2000), ms(3000)]);
        assert!(q.is_live(h));
        assert_eq!(q.remaining(h), Some(ms(1000)));
    }

    #[test]
    fn test_one_shot_fires_once() {
        let mut q = TimerQueue::new();
        let h = q.schedule(TimerTask::RemoveOverlay, ms(300));
        assert!(q.fire_next(ms(299)).is_none());
        assert_eq!(q.fire_next(ms(300)).map(|f| f.handle), Some(h));
        assert!(!q.is_live(h));
        assert!(q.fire_next(ms(10_000)).is_none());
    }

    #[test]
    fn test_cancel() {
        let mut q = TimerQueue::new();
        let h = q.schedule(TimerTask::AutoAdvance, ms(100));
        assert!(q.cancel(h));
        assert!(!q.cancel(h));
        assert!(q.fire_next(ms(1000)).is_none());
        assert_eq!(q.live_repeating(), 0);
    }

    #[test]
    fn test_due_order_and_ties() {
        let mut q = TimerQueue::new();
        let a = q.schedule(TimerTask::EndCardSwap { slide: 0 }, ms(800));
        let b = q.schedule(TimerTask::AutoAdvance, ms(500));
        let c = q.schedule(TimerTask::RemoveOverlay, ms(800));

        assert_eq!(q.pending().iter().map(|p| p.0).collect::<Vec<_>>(), vec![b, a, c]);
        assert_eq!(q.fire_next(ms(800)).map(|f| f.handle), Some(b));
        assert_eq!(q.fire_next(ms(800)).map(|f| f.handle), Some(a));
        assert_eq!(q.fire_next(ms(800)).map(|f| f.handle), Some(c));
    }

    #[test]
    fn test_schedule_relative_to_last_fire() {
        let mut q = TimerQueue::new();
        q.schedule(TimerTask::EndEntryAnimation { slide: 1 }, ms(600));
        let fired = q.fire_next(ms(5000)).unwrap();
        assert_eq!(q.now(), fired.at);

        let h = q.schedule(TimerTask::AutoAdvance, ms(1000));
        assert_eq!(q.remaining(h), Some(ms(1000)));
        assert_eq!(q.period(h), Some(ms(1000)));
    }

    #[test]
    fn test_zero_period_is_bounded() {
        let mut q = TimerQueue::new();
        q.schedule(TimerTask::RotateStack, Duration::ZERO);
        let mut count = 0;
        while q.fire_next(ms(5)).is_some() {
            count += 1;
        }
        assert_eq!(count, 5);
    }
}
