//! Timed boolean latch for transient success banners.
//!
//! `trigger` sets the flag and schedules one revert timer; a later trigger
//! aborts the pending timer and starts a fresh window. Each timer carries the
//! generation it was scheduled for and the owner calls [`TimedLatch::expire`]
//! with it, so a stale timer can never clear a newer trigger.
//!
//! The latch does not clear itself: the timer only calls `notify`, which in
//! the TUI sends an event back to the main loop. That keeps every write to
//! session state on the event loop.

use std::time::Duration;

use tokio::task::JoinHandle;

#[derive(Debug)]
pub struct TimedLatch {
    window: Duration,
    set: bool,
    generation: u64,
    timer: Option<JoinHandle<()>>,
}

impl TimedLatch {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            set: false,
            generation: 0,
            timer: None,
        }
    }

    pub fn is_set(&self) -> bool {
        self.set
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Sets the flag and (re)starts the revert timer. Returns the new generation.
    ///
    /// `notify` runs on the tokio runtime once the window elapses, unless a
    /// later trigger superseded it first. Must be called inside a runtime.
    pub fn trigger<F>(&mut self, notify: F) -> u64
    where
        F: FnOnce(u64) + Send + 'static,
    {
        if let Some(pending) = self.timer.take() {
            pending.abort();
        }
        self.generation += 1;
        self.set = true;

        let generation = self.generation;
        let window = self.window;
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(window).await;
            notify(generation);
        }));
        generation
    }

    /// Clears the flag if `generation` is the latest trigger. Returns whether it cleared.
    pub fn expire(&mut self, generation: u64) -> bool {
        if generation != self.generation || !self.set {
            return false;
        }
        self.set = false;
        self.timer = None;
        true
    }
}

impl Drop for TimedLatch {
    fn drop(&mut self) {
        if let Some(pending) = self.timer.take() {
            pending.abort();
        }
    }
}
