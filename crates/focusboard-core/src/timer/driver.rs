//! Once-per-second tick source for [`PomodoroTimer`].
//!
//! The driver owns the engine behind a lock and runs at most one tokio task
//! that calls `tick()` every second while the timer is active. Pausing,
//! resetting or dropping the driver aborts that task. Each task carries the
//! generation it was spawned for and stops without ticking once the
//! generation moves on, so an aborted task that is mid-wakeup can never
//! apply a stale tick after a pause or a quick pause/start pair.
//!
//! Time comes from tokio, so tests drive it with paused time.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tracing::{debug, info};

use super::engine::{PomodoroTimer, TimerSnapshot};
use crate::events::Event;

const TICK: Duration = Duration::from_secs(1);

#[derive(Debug)]
struct Shared {
    timer: PomodoroTimer,
    generation: u64,
}

pub struct TimerDriver {
    shared: Arc<Mutex<Shared>>,
    updates: watch::Sender<TimerSnapshot>,
    ticker: Option<JoinHandle<()>>,
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

impl TimerDriver {
    /// Wrap an engine. Nothing ticks until [`TimerDriver::start`].
    pub fn new(timer: PomodoroTimer) -> Self {
        let (updates, _) = watch::channel(timer.snapshot());
        Self {
            shared: Arc::new(Mutex::new(Shared {
                timer,
                generation: 0,
            })),
            updates,
            ticker: None,
        }
    }

    /// Current engine state.
    pub fn timer(&self) -> PomodoroTimer {
        lock(&self.shared).timer.clone()
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        lock(&self.shared).timer.snapshot()
    }

    /// Receives a snapshot after every applied tick and every command.
    pub fn subscribe(&self) -> watch::Receiver<TimerSnapshot> {
        self.updates.subscribe()
    }

    pub fn is_ticking(&self) -> bool {
        self.ticker.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Start the engine and the tick task. Must be called from within a
    /// tokio runtime.
    ///
    /// Also spawns the tick task for an engine that was already active when
    /// handed to [`TimerDriver::new`].
    pub fn start(&mut self) -> Option<Event> {
        let (event, generation, snapshot) = {
            let mut shared = lock(&self.shared);
            let event = shared.timer.start();
            (event, shared.generation, shared.timer.snapshot())
        };
        if !self.is_ticking() {
            self.spawn_ticker(generation);
        }
        self.updates.send_replace(snapshot);
        event
    }

    pub fn pause(&mut self) -> Option<Event> {
        self.stop_ticker();
        let (event, snapshot) = {
            let mut shared = lock(&self.shared);
            shared.generation += 1;
            (shared.timer.pause(), shared.timer.snapshot())
        };
        self.updates.send_replace(snapshot);
        event
    }

    pub fn reset(&mut self) -> Event {
        self.stop_ticker();
        let (event, snapshot) = {
            let mut shared = lock(&self.shared);
            shared.generation += 1;
            (shared.timer.reset(), shared.timer.snapshot())
        };
        self.updates.send_replace(snapshot);
        event
    }

    fn spawn_ticker(&mut self, generation: u64) {
        let shared = Arc::clone(&self.shared);
        let updates = self.updates.clone();
        debug!(generation, "spawning timer tick task");

        self.ticker = Some(tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + TICK, TICK);
            loop {
                interval.tick().await;
                let snapshot = {
                    let mut guard = lock(&shared);
                    if guard.generation != generation || !guard.timer.is_active() {
                        break;
                    }
                    if let Some(event) = guard.timer.tick() {
                        info!(?event, "timer phase completed");
                    }
                    guard.timer.snapshot()
                };
                updates.send_replace(snapshot);
            }
            debug!(generation, "timer tick task stopped");
        }));
    }

    fn stop_ticker(&mut self) {
        if let Some(handle) = self.ticker.take() {
            handle.abort();
        }
    }
}

impl Drop for TimerDriver {
    fn drop(&mut self) {
        self.stop_ticker();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::TimerDurations;
    use tokio::time::sleep;

    #[tokio::test(start_paused = true)]
    async fn ticks_once_per_second_while_running() {
        let mut driver = TimerDriver::new(PomodoroTimer::new());
        driver.start();
        sleep(Duration::from_millis(3500)).await;
        assert_eq!(driver.snapshot().time_left, 1497);
    }

    #[tokio::test(start_paused = true)]
    async fn pause_stops_ticking_and_resume_continues() {
        let mut driver = TimerDriver::new(PomodoroTimer::new());
        driver.start();
        sleep(Duration::from_millis(2500)).await;
        assert!(driver.pause().is_some());
        assert!(!driver.is_ticking());

        sleep(Duration::from_secs(10)).await;
        assert_eq!(driver.snapshot().time_left, 1498);

        driver.start();
        sleep(Duration::from_millis(1500)).await;
        assert_eq!(driver.snapshot().time_left, 1497);
    }

    #[tokio::test(start_paused = true)]
    async fn double_start_does_not_double_tick() {
        let mut driver = TimerDriver::new(PomodoroTimer::new());
        driver.start();
        assert!(driver.start().is_none());
        sleep(Duration::from_millis(4500)).await;
        assert_eq!(driver.snapshot().time_left, 1496);
    }

    #[tokio::test(start_paused = true)]
    async fn rolls_into_break_without_stopping() {
        let timer = PomodoroTimer::with_durations(TimerDurations::new(2, 5));
        let mut driver = TimerDriver::new(timer);
        let mut updates = driver.subscribe();
        driver.start();
        sleep(Duration::from_millis(3500)).await;

        let snap = driver.snapshot();
        assert!(snap.is_break);
        assert!(snap.is_active);
        assert_eq!(snap.time_left, 4);
        assert!(updates.has_changed().unwrap());
        assert_eq!(updates.borrow_and_update().time_left, 4);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_stops_and_rewinds() {
        let mut driver = TimerDriver::new(PomodoroTimer::new());
        driver.start();
        sleep(Duration::from_millis(5500)).await;
        driver.reset();
        sleep(Duration::from_secs(5)).await;
        assert_eq!(driver.timer(), PomodoroTimer::new());
    }
}
