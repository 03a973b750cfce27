//! # Focusboard Core Library
//!
//! Business logic for a personal productivity dashboard: tasks, habits with
//! streaks, a Pomodoro focus timer and quick notes. The `focusboard` CLI is
//! a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Engines** ([`habit`], [`task`], [`note`]): pure functions
//!   `(collection, event) -> collection`. They never read the clock; the
//!   caller passes "now" and "today".
//! - **Timer Engine** ([`timer`]): a tick-driven state machine plus a
//!   cancelable tokio tick driver and a persisted session for short-lived
//!   processes.
//! - **Dashboard** ([`dashboard`]): derived statistics, no owned state.
//! - **Coordinator** ([`App`]): owns the [`AppState`], applies engine
//!   operations and writes each touched key through to a [`KeyValueStore`].
//! - **Storage**: SQLite key-value table and TOML configuration.

pub mod app;
pub mod clock;
pub mod dashboard;
pub mod error;
pub mod events;
pub mod habit;
pub mod note;
pub mod state;
pub mod storage;
pub mod task;
pub mod timer;

pub use app::App;
pub use clock::{Clock, FixedClock, SystemClock};
pub use dashboard::{summarize, DashboardStats};
pub use error::{ConfigError, CoreError, StoreError};
pub use events::Event;
pub use habit::{Habit, HabitDraft};
pub use note::QuickNote;
pub use state::{AppState, Theme};
pub use storage::{Config, KeyValueStore, MemoryStore, SqliteStore};
pub use task::{Priority, Task, TaskDraft};
pub use timer::{Phase, PomodoroTimer, TimerDriver, TimerDurations, TimerSession};
