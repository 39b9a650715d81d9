//! Cooperative recurring-tick scheduler.
//!
//! The host loop owns time. It asks the scheduler which ticks are due at a
//! given `Instant` and delivers them one at a time, in deadline order, to
//! whichever widget owns the tick's id. Widgets hold a [`TickHandle`] for
//! their schedule; dropping or cancelling the handle removes the schedule, so
//! a cancelled schedule can never produce another tick.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};
use std::time::{Duration, Instant};

/// Identity of one recurring schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TickId(u64);

#[derive(Debug)]
struct Schedule {
    period: Duration,
    next_due: Instant,
}

#[derive(Debug, Default)]
struct ScheduleTable {
    last_id: u64,
    schedules: BTreeMap<TickId, Schedule>,
}

/// Shared timer table. Cloning yields another view of the same table.
#[derive(Debug, Clone, Default)]
pub struct TickScheduler {
    table: Rc<RefCell<ScheduleTable>>,
}

impl TickScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a recurring schedule whose first tick is due one period after `now`
    pub fn schedule(&self, period: Duration, now: Instant) -> TickHandle {
        let period = period.max(Duration::from_millis(1));
        let mut table = self.table.borrow_mut();
        table.last_id += 1;
        let id = TickId(table.last_id);
        table.schedules.insert(
            id,
            Schedule {
                period,
                next_due: now + period,
            },
        );
        tracing::debug!("Scheduled {:?} every {:?}", id, period);

        TickHandle {
            id,
            table: Rc::downgrade(&self.table),
        }
    }

    /// Stop a schedule. Unknown or already-cancelled ids are ignored.
    pub fn cancel(&self, id: TickId) {
        if self.table.borrow_mut().schedules.remove(&id).is_some() {
            tracing::debug!("Cancelled {:?}", id);
        }
    }

    /// Take the earliest tick due at or before `now`.
    ///
    /// Each call delivers a single period. A schedule that fell several
    /// periods behind yields one tick per missed period on successive calls.
    pub fn pop_due(&self, now: Instant) -> Option<TickId> {
        let mut table = self.table.borrow_mut();
        let (id, schedule) = table
            .schedules
            .iter_mut()
            .filter(|(_, schedule)| schedule.next_due <= now)
            .min_by_key(|(id, schedule)| (schedule.next_due, **id))?;
        schedule.next_due += schedule.period;
        Some(*id)
    }

    /// Earliest pending deadline across all schedules
    pub fn next_deadline(&self) -> Option<Instant> {
        self.table
            .borrow()
            .schedules
            .values()
            .map(|schedule| schedule.next_due)
            .min()
    }

    pub fn is_active(&self, id: TickId) -> bool {
        self.table.borrow().schedules.contains_key(&id)
    }

    /// Number of live schedules
    pub fn active_count(&self) -> usize {
        self.table.borrow().schedules.len()
    }
}

/// Owning guard for one schedule; the schedule ends when the handle drops.
#[derive(Debug)]
pub struct TickHandle {
    id: TickId,
    table: Weak<RefCell<ScheduleTable>>,
}

impl TickHandle {
    pub fn id(&self) -> TickId {
        self.id
    }

    /// End the schedule now. Same as letting the handle go out of scope.
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for TickHandle {
    fn drop(&mut self) {
        if let Some(table) = self.table.upgrade() {
            if table.borrow_mut().schedules.remove(&self.id).is_some() {
                tracing::debug!("Released {:?}", self.id);
            }
        }
    }
}
