//! Clock sources and per-frame callback registration.

use std::cell::{Cell, RefCell};
use std::collections::BTreeSet;
use std::rc::{Rc, Weak};

/// Source of monotonic timestamps in milliseconds.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Wall clock, measured from construction.
#[derive(Debug, Clone)]
pub struct SystemClock {
    start: web_time::Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: web_time::Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

/// Clock driven by hand, for deterministic tests and replays.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<f64>,
}

impl ManualClock {
    pub fn new(start_ms: f64) -> Self {
        Self {
            now: Cell::new(start_ms),
        }
    }

    pub fn set(&self, now_ms: f64) {
        self.now.set(now_ms);
    }

    pub fn advance(&self, delta_ms: f64) {
        self.now.set(self.now.get() + delta_ms);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now.get()
    }
}

#[derive(Debug, Default)]
struct Registry {
    next_id: u64,
    active: BTreeSet<u64>,
}

/// Tracks live per-frame callbacks.
///
/// The UI keeps requesting frames while [`FrameScheduler::has_pending`] is
/// true. Single-threaded by construction (`Rc`).
#[derive(Debug, Clone, Default)]
pub struct FrameScheduler {
    registry: Rc<RefCell<Registry>>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a callback. It stays registered until the handle is dropped.
    pub fn schedule(&self) -> FrameHandle {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.active.insert(id);
        FrameHandle {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Number of registered callbacks.
    pub fn pending(&self) -> usize {
        self.registry.borrow().active.len()
    }

    pub fn has_pending(&self) -> bool {
        self.pending() > 0
    }
}

/// Registration of one per-frame callback; unregisters on drop.
#[derive(Debug)]
pub struct FrameHandle {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl FrameHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|registry| registry.borrow().active.contains(&self.id))
    }
}

impl Drop for FrameHandle {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().active.remove(&self.id);
        }
    }
}
