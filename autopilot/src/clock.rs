use std::cell::Cell;
use std::rc::Rc;
use std::time::Instant;

/// Nominal wall-clock duration of one simulation tick.
pub const TICK_MS: u64 = 16;

/// Millisecond time source for the session layer. The simulation itself is
/// tick-driven and never reads a clock; only demo activation, the game-over
/// restart delay, and the pilot's duty windows consume this.
pub trait Clock {
    fn now_ms(&self) -> u64;
}

/// Wall-clock time, measured from construction.
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        self.origin.elapsed().as_millis() as u64
    }
}

/// Hand-advanced clock. Clones share the same underlying time, so a runner
/// or test can keep one handle to drive time while the session owns another.
#[derive(Clone, Default)]
pub struct TickClock {
    now_ms: Rc<Cell<u64>>,
}

impl TickClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, ms: u64) {
        self.now_ms.set(self.now_ms.get() + ms);
    }

    /// Advances by one nominal tick.
    pub fn advance_tick(&self) {
        self.advance(TICK_MS);
    }

    pub fn set(&self, ms: u64) {
        self.now_ms.set(ms);
    }
}

impl Clock for TickClock {
    fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }
}
