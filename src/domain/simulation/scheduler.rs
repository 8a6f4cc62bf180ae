use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use super::round::HoleId;

/// What a timer hands back to the round when it fires. Timers only ever carry
/// a hole id, so a cancelled timer has nothing left to act on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TimerEvent {
    SpawnTick,
    Expire(HoleId),
    ClearHit(HoleId),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

pub trait Scheduler {
    fn schedule(&mut self, event: TimerEvent, delay: Duration) -> TimerHandle;
    fn schedule_repeating(&mut self, event: TimerEvent, interval: Duration) -> TimerHandle;
    /// Unknown or already-fired handles are ignored.
    fn cancel(&mut self, handle: TimerHandle);
}

struct Armed {
    event: TimerEvent,
    interval: Option<Duration>,
    key: (Duration, u64),
}

/// Virtual monotonic clock with a deadline-ordered timer list.
///
/// Nothing fires on its own: the owner moves time forward and pulls due
/// events out with [`TimerQueue::pop_due`], one at a time, so each delivery
/// runs to completion before the next one is looked at.
#[derive(Default)]
pub struct TimerQueue {
    now: Duration,
    next_id: u64,
    next_seq: u64,
    order: BTreeMap<(Duration, u64), TimerHandle>,
    armed: HashMap<TimerHandle, Armed>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.armed.len()
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.armed.contains_key(&handle)
    }

    /// Deadline of the next timer to fire, if any.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.order.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Clock never runs backwards.
    pub fn advance_to(&mut self, t: Duration) {
        self.now = self.now.max(t);
    }

    /// Removes and returns the earliest timer due at or before `limit`,
    /// moving the clock to its deadline. Repeating timers are re-armed.
    pub fn pop_due(&mut self, limit: Duration) -> Option<TimerEvent> {
        let (&key, &handle) = self.order.iter().next()?;
        if key.0 > limit {
            return None;
        }
        self.order.remove(&key);
        self.now = self.now.max(key.0);

        let armed = self.armed.get_mut(&handle)?;
        let event = armed.event;
        match armed.interval {
            Some(interval) => {
                let seq = self.next_seq;
                self.next_seq += 1;
                let next = (key.0 + interval, seq);
                armed.key = next;
                self.order.insert(next, handle);
            }
            None => {
                self.armed.remove(&handle);
            }
        }
        Some(event)
    }

    fn arm(
        &mut self,
        event: TimerEvent,
        delay: Duration,
        interval: Option<Duration>,
    ) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        let key = (self.now + delay, self.next_seq);
        self.next_seq += 1;
        self.order.insert(key, handle);
        self.armed.insert(
            handle,
            Armed {
                event,
                interval,
                key,
            },
        );
        handle
    }
}

impl Scheduler for TimerQueue {
    fn schedule(&mut self, event: TimerEvent, delay: Duration) -> TimerHandle {
        self.arm(event, delay, None)
    }

    fn schedule_repeating(&mut self, event: TimerEvent, interval: Duration) -> TimerHandle {
        // zero would re-arm at the same instant forever
        let interval = interval.max(Duration::from_millis(1));
        self.arm(event, interval, Some(interval))
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(armed) = self.armed.remove(&handle) {
            self.order.remove(&armed.key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn drain(q: &mut TimerQueue, limit: Duration) -> Vec<TimerEvent> {
        let mut out = Vec::new();
        while let Some(ev) = q.pop_due(limit) {
            out.push(ev);
        }
        q.advance_to(limit);
        out
    }

    #[test]
    fn fires_in_deadline_order() {
        let mut q = TimerQueue::new();
        q.schedule(TimerEvent::Expire(2), ms(300));
        q.schedule(TimerEvent::Expire(1), ms(100));
        q.schedule(TimerEvent::ClearHit(1), ms(100));

        assert!(drain(&mut q, ms(50)).is_empty());
        assert_eq!(
            drain(&mut q, ms(100)),
            vec![TimerEvent::Expire(1), TimerEvent::ClearHit(1)]
        );
        assert_eq!(q.now(), ms(100));
        assert_eq!(drain(&mut q, ms(1000)), vec![TimerEvent::Expire(2)]);
        assert_eq!(q.pending(), 0);
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut q = TimerQueue::new();
        let h = q.schedule(TimerEvent::Expire(4), ms(100));
        assert!(q.is_pending(h));
        q.cancel(h);
        assert!(!q.is_pending(h));
        assert!(drain(&mut q, ms(500)).is_empty());

        // second cancel is harmless
        q.cancel(h);
    }

    #[test]
    fn repeating_timer_rearms() {
        let mut q = TimerQueue::new();
        let h = q.schedule_repeating(TimerEvent::SpawnTick, ms(800));
        assert_eq!(q.next_deadline(), Some(ms(800)));
        assert_eq!(drain(&mut q, ms(2500)).len(), 3);
        assert_eq!(q.next_deadline(), Some(ms(3200)));
        q.cancel(h);
        assert_eq!(q.next_deadline(), None);
        assert!(drain(&mut q, ms(10_000)).is_empty());
    }

    #[test]
    fn delays_are_relative_to_now() {
        let mut q = TimerQueue::new();
        q.advance_to(ms(1000));
        q.schedule(TimerEvent::Expire(0), ms(200));
        assert!(q.pop_due(ms(1199)).is_none());
        assert_eq!(q.pop_due(ms(1200)), Some(TimerEvent::Expire(0)));
    }

    #[test]
    fn clock_is_monotonic() {
        let mut q = TimerQueue::new();
        q.advance_to(ms(500));
        q.advance_to(ms(100));
        assert_eq!(q.now(), ms(500));
    }
}
