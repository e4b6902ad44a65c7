//! Delayed tasks.
//!
//! Every timer in the storefront (the cart success revert, the skeleton
//! failsafe and removal) goes through a [`Scheduler`] so it can be cancelled
//! when its owner goes away.

use std::cell::{Cell, RefCell};
use std::time::Duration;

/// Identifies a scheduled task for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskHandle(u64);

impl TaskHandle {
    /// Wrap a platform timer id.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// The platform timer id.
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// A task run once by a [`Scheduler`].
pub type Task = Box<dyn FnOnce()>;

/// Runs tasks after a delay.
pub trait Scheduler {
    /// Run `task` once `delay` has elapsed.
    fn schedule(&self, delay: Duration, task: Task) -> TaskHandle;

    /// Cancel a task that has not run yet. Cancelling a task that already ran
    /// is a no-op.
    fn cancel(&self, handle: TaskHandle);
}

struct Pending {
    handle: TaskHandle,
    due: Duration,
    task: Task,
}

/// Deterministic scheduler driven by explicit time advances.
///
/// # Examples
///
/// ```rust
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use std::time::Duration;
/// use storefront_ui::schedule::{ManualScheduler, Scheduler};
///
/// let scheduler = ManualScheduler::new();
/// let fired = Rc::new(Cell::new(false));
/// let flag = Rc::clone(&fired);
/// scheduler.schedule(Duration::from_millis(100), Box::new(move || flag.set(true)));
///
/// scheduler.advance(Duration::from_millis(99));
/// assert!(!fired.get());
/// scheduler.advance(Duration::from_millis(1));
/// assert!(fired.get());
/// ```
#[derive(Default)]
pub struct ManualScheduler {
    now: Cell<Duration>,
    next_id: Cell<u64>,
    pending: RefCell<Vec<Pending>>,
}

impl ManualScheduler {
    /// Create a scheduler at time zero with nothing pending.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed so far.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now.get()
    }

    /// Number of tasks waiting to run.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Move time forward by `by`, running every task that falls due, earliest
    /// first. Tasks scheduled by a running task also run if they fall due
    /// within the window. Returns how many tasks ran.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now.get() + by;
        let mut ran = 0;

        while let Some(next) = self.take_due(target) {
            self.now.set(next.due.max(self.now.get()));
            (next.task)();
            ran += 1;
        }

        self.now.set(target);
        ran
    }

    /// Run everything pending regardless of delay. Returns how many tasks ran.
    pub fn run_all(&self) -> usize {
        let mut ran = 0;
        while let Some(next) = self.take_due(Duration::MAX) {
            self.now.set(next.due.max(self.now.get()));
            (next.task)();
            ran += 1;
        }
        ran
    }

    // The borrow is released before the task runs so tasks may schedule more.
    fn take_due(&self, target: Duration) -> Option<Pending> {
        let mut pending = self.pending.borrow_mut();
        let index = pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= target)
            .min_by_key(|(_, p)| (p.due, p.handle.0))
            .map(|(index, _)| index)?;
        Some(pending.remove(index))
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TaskHandle {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        let handle = TaskHandle(id);
        self.pending.borrow_mut().push(Pending {
            handle,
            due: self.now.get().saturating_add(delay),
            task,
        });
        handle
    }

    fn cancel(&self, handle: TaskHandle) {
        self.pending.borrow_mut().retain(|p| p.handle != handle);
    }
}
