//=========================================================================
// Scheduler
//=========================================================================
//
// Deadline/token timer abstraction for host-clock time.
//
// Architecture:
//   schedule(deadline, token) → Vec<Entry> → fire_due(now) → tokens
//                                   ↑
//                       cancel(handle) / clear()
//
// Entries are id-addressed; a cancelled or superseded entry is removed
// outright, so a stale callback can never fire. The composition root owns
// the scheduler and clears it on stop().
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cmp::Ordering;

//=== TimerHandle =========================================================

/// Handle identifying one scheduled entry, used to cancel it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

//=== Scheduler ===========================================================

struct Entry<T> {
    id: u64,
    deadline: f64,
    token: T,
}

/// Collects `(deadline, token)` pairs and releases the due ones each tick.
///
/// Tokens are plain data; the owner interprets them when they come back
/// from [`fire_due`](Scheduler::fire_due). Deadlines are host-clock
/// seconds, the same timeline the tick runs on.
pub struct Scheduler<T> {
    entries: Vec<Entry<T>>,
    next_id: u64,
}

impl<T> Scheduler<T> {
    /// Creates an empty scheduler.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 0,
        }
    }

    //--- Scheduling -------------------------------------------------------

    /// Registers `token` to fire once `now >= deadline`.
    pub fn schedule(&mut self, deadline: f64, token: T) -> TimerHandle {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Entry { id, deadline, token });
        TimerHandle(id)
    }

    /// Removes a pending entry. Returns false if it already fired or was
    /// cancelled.
    pub fn cancel(&mut self, handle: TimerHandle) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != handle.0);
        self.entries.len() != before
    }

    /// Removes every pending entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    //--- Dispatch ---------------------------------------------------------

    /// Removes and returns all due tokens, ordered by deadline (ties by
    /// scheduling order).
    pub fn fire_due(&mut self, now: f64) -> Vec<T> {
        let mut due: Vec<Entry<T>> = Vec::new();
        let mut i = 0;
        while i < self.entries.len() {
            if self.entries[i].deadline <= now {
                due.push(self.entries.swap_remove(i));
            } else {
                i += 1;
            }
        }

        due.sort_by(|a, b| {
            match a.deadline.total_cmp(&b.deadline) {
                Ordering::Equal => a.id.cmp(&b.id),
                other => other,
            }
        });

        due.into_iter().map(|e| e.token).collect()
    }

    //--- Queries ----------------------------------------------------------

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Earliest pending deadline, if any.
    pub fn next_deadline(&self) -> Option<f64> {
        self.entries
            .iter()
            .map(|e| e.deadline)
            .min_by(|a, b| a.total_cmp(b))
    }
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
