//! Deferred tasks driven by host frame time
//!
//! Tasks fire once their delay has elapsed on the scheduler's clock, which only
//! moves when the host calls [`Scheduler::advance`]. Every scheduled task gets a
//! [`TaskToken`] that can cancel it before it fires.

/// Handle to a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskToken(u64);

#[derive(Debug, Clone)]
struct Pending<T> {
    token: TaskToken,
    due_ms: f64,
    task: T,
}

/// Single-threaded timer queue
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    now_ms: f64,
    next_id: u64,
    pending: Vec<Pending<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now_ms: 0.0,
            next_id: 1,
            pending: Vec::new(),
        }
    }

    /// Current clock in milliseconds
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    /// Schedule `task` to fire after `delay_ms`
    pub fn schedule(&mut self, delay_ms: f64, task: T) -> TaskToken {
        let token = TaskToken(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending {
            token,
            due_ms: self.now_ms + delay_ms.max(0.0),
            task,
        });
        token
    }

    /// Cancel a pending task. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, token: TaskToken) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.token != token);
        self.pending.len() != before
    }

    pub fn is_pending(&self, token: TaskToken) -> bool {
        self.pending.iter().any(|p| p.token == token)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Move the clock forward and return the tasks that came due, earliest first.
    /// Tasks due at the same time fire in scheduling order.
    pub fn advance(&mut self, dt_ms: f64) -> Vec<(TaskToken, T)> {
        self.now_ms += dt_ms.max(0.0);
        let now = self.now_ms;

        let (mut due, rest): (Vec<_>, Vec<_>) =
            self.pending.drain(..).partition(|p| p.due_ms <= now);
        self.pending = rest;

        due.sort_by(|a, b| a.due_ms.total_cmp(&b.due_ms).then(a.token.0.cmp(&b.token.0)));
        due.into_iter().map(|p| (p.token, p.task)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_after_delay() {
        let mut sched = Scheduler::new();
        let token = sched.schedule(1500.0, "advance");

        assert!(sched.advance(1000.0).is_empty());
        assert!(sched.is_pending(token));

        let fired = sched.advance(500.0);
        assert_eq!(fired, vec![(token, "advance")]);
        assert!(sched.is_empty());
    }

    #[test]
    fn test_cancel() {
        let mut sched = Scheduler::new();
        let token = sched.schedule(10.0, 1);
        assert!(sched.cancel(token));
        assert!(!sched.cancel(token));
        assert!(sched.advance(100.0).is_empty());
    }

    #[test]
    fn test_order() {
        let mut sched = Scheduler::new();
        let late = sched.schedule(20.0, 'b');
        let early = sched.schedule(10.0, 'a');
        let tied = sched.schedule(20.0, 'c');

        let fired = sched.advance(50.0);
        assert_eq!(fired, vec![(early, 'a'), (late, 'b'), (tied, 'c')]);
    }

    #[test]
    fn test_negative_time_ignored() {
        let mut sched = Scheduler::new();
        sched.schedule(5.0, ());
        assert!(sched.advance(-100.0).is_empty());
        assert_eq!(sched.now_ms(), 0.0);
        assert_eq!(sched.advance(5.0).len(), 1);
    }
}
