//! Keyed delayed tasks and a deterministic timer queue.
//!
//! Every delay in the page is a [`Task`]. At most one run of a given task is
//! pending at a time: scheduling it again replaces the earlier run. The
//! browser host backs each key with a `gloo_timers` timeout; [`TimerQueue`]
//! is the same contract on a virtual clock, for headless hosts and tests.

#[cfg(test)]
#[path = "scheduler_test.rs"]
mod scheduler_test;

use std::collections::BTreeMap;

/// Key of a delayed action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Task {
    /// Apply the open class after the panel became displayable.
    MenuOpenFrame,
    /// Hide the panel after the close transition.
    MenuHide,
    /// Grow skill bars back to their captured widths.
    SkillBarsRestore,
    /// Finish the simulated contact submission.
    SubmitComplete,
    /// Revert the label of the email link at this index.
    CopyRevert(usize),
}

#[derive(Debug, Clone, Copy)]
struct Pending {
    due_ms: u64,
    seq: u64,
}

/// Virtual-clock timer queue keyed by [`Task`].
#[derive(Debug, Default)]
pub struct TimerQueue {
    now_ms: u64,
    next_seq: u64,
    pending: BTreeMap<Task, Pending>,
}

impl TimerQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Schedule `task` to run `delay_ms` from now, replacing any pending run.
    pub fn schedule(&mut self, task: Task, delay_ms: u32) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.pending
            .insert(task, Pending { due_ms: self.now_ms + u64::from(delay_ms), seq });
    }

    /// Drop a pending run. Returns whether one existed.
    pub fn cancel(&mut self, task: Task) -> bool {
        self.pending.remove(&task).is_some()
    }

    /// Drop everything pending (page teardown).
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Earliest pending task that is due at or before `limit_ms`.
    ///
    /// Ties on due time go to whichever was scheduled first.
    fn next_due(&self, limit_ms: u64) -> Option<(Task, u64)> {
        self.pending
            .iter()
            .filter(|(_, p)| p.due_ms <= limit_ms)
            .min_by_key(|(_, p)| (p.due_ms, p.seq))
            .map(|(task, p)| (*task, p.due_ms))
    }

    /// Pop the next task due at or before `until_ms`, moving the clock to its
    /// due time. With nothing due, the clock moves to `until_ms`.
    ///
    /// Call repeatedly until `None`: the clock stops at each task's due time,
    /// so work scheduled by a fired task is ordered correctly against tasks
    /// that were already queued.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<Task> {
        match self.next_due(until_ms) {
            Some((task, due_ms)) => {
                self.pending.remove(&task);
                self.now_ms = self.now_ms.max(due_ms);
                Some(task)
            }
            None => {
                self.now_ms = self.now_ms.max(until_ms);
                None
            }
        }
    }
}
