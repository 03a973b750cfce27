//! The coordinator that owns the application state.
//!
//! Every user intent goes through [`App`]: it takes the current collection
//! out of the state, hands it to the engine function, puts the result back
//! and writes that one key through to the store.

use serde::Serialize;
use tracing::{debug, info};
use uuid::Uuid;

use crate::clock::Clock;
use crate::dashboard::{summarize, DashboardStats};
use crate::error::Result;
use crate::habit::{self, DayCell, Habit, HabitDraft};
use crate::note::{self, QuickNote};
use crate::state::{keys, AppState, Theme};
use crate::storage::{load_or_default, save, KeyValueStore};
use crate::task::{self, Task, TaskDraft};
use crate::timer::{TimerDurations, TimerSession};

fn new_id() -> String {
    Uuid::now_v7().to_string()
}

pub struct App<S, C> {
    store: S,
    clock: C,
    state: AppState,
}

impl<S: KeyValueStore, C: Clock> App<S, C> {
    /// Load the state from `store`.
    pub fn open(store: S, clock: C) -> Result<Self> {
        let state = AppState::load(&store)?;
        debug!(
            tasks = state.tasks.len(),
            habits = state.habits.len(),
            notes = state.notes.len(),
            "state loaded"
        );
        Ok(Self {
            store,
            clock,
            state,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn persist<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        save(&self.store, key, value)?;
        debug!(key, "persisted");
        Ok(())
    }

    // ── Theme ────────────────────────────────────────────────────────

    pub fn set_theme(&mut self, theme: Theme) -> Result<Theme> {
        self.state.theme = theme;
        self.persist(keys::THEME, &self.state.theme)?;
        Ok(theme)
    }

    pub fn toggle_theme(&mut self) -> Result<Theme> {
        self.set_theme(self.state.theme.toggled())
    }

    // ── Tasks ────────────────────────────────────────────────────────

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.state.tasks.iter().find(|t| t.id == id)
    }

    /// Returns the new task, or `None` when the title was blank.
    pub fn add_task(&mut self, draft: TaskDraft) -> Result<Option<Task>> {
        let id = new_id();
        let tasks = std::mem::take(&mut self.state.tasks);
        self.state.tasks = task::add_task(tasks, draft, id.as_str(), self.clock.now());

        let Some(created) = self.task(&id).cloned() else {
            return Ok(None);
        };
        self.persist(keys::TASKS, &self.state.tasks)?;
        info!(id = %created.id, "task added");
        Ok(Some(created))
    }

    /// Returns the updated task, or `None` when no task has `id`.
    pub fn toggle_task(&mut self, id: &str) -> Result<Option<Task>> {
        if self.task(id).is_none() {
            return Ok(None);
        }
        let tasks = std::mem::take(&mut self.state.tasks);
        self.state.tasks = task::toggle_task(tasks, id, self.clock.now());
        self.persist(keys::TASKS, &self.state.tasks)?;
        Ok(self.task(id).cloned())
    }

    /// Returns whether a task was removed.
    pub fn delete_task(&mut self, id: &str) -> Result<bool> {
        let before = self.state.tasks.len();
        let tasks = std::mem::take(&mut self.state.tasks);
        self.state.tasks = task::delete_task(tasks, id);
        if self.state.tasks.len() == before {
            return Ok(false);
        }
        self.persist(keys::TASKS, &self.state.tasks)?;
        info!(id, "task deleted");
        Ok(true)
    }

    // ── Habits ───────────────────────────────────────────────────────

    pub fn habit(&self, id: &str) -> Option<&Habit> {
        self.state.habits.iter().find(|h| h.id == id)
    }

    /// Returns the new habit, or `None` when the name was blank.
    pub fn add_habit(&mut self, draft: HabitDraft) -> Result<Option<Habit>> {
        let id = new_id();
        let habits = std::mem::take(&mut self.state.habits);
        self.state.habits = habit::add_habit(habits, draft, id.as_str(), self.clock.now());

        let Some(created) = self.habit(&id).cloned() else {
            return Ok(None);
        };
        self.persist(keys::HABITS, &self.state.habits)?;
        info!(id = %created.id, name = %created.name, "habit added");
        Ok(Some(created))
    }

    /// Toggle today's completion. Returns the updated habit, or `None` when
    /// no habit has `id`.
    pub fn toggle_habit(&mut self, id: &str) -> Result<Option<Habit>> {
        if self.habit(id).is_none() {
            return Ok(None);
        }
        let today = self.clock.today();
        let habits = std::mem::take(&mut self.state.habits);
        self.state.habits = habit::toggle_habit(habits, id, today, self.clock.now());
        self.persist(keys::HABITS, &self.state.habits)?;

        let updated = self.habit(id).cloned();
        if let Some(h) = &updated {
            info!(id, %today, streak = h.streak, done = h.is_completed_on(today), "habit toggled");
        }
        Ok(updated)
    }

    pub fn delete_habit(&mut self, id: &str) -> Result<bool> {
        let before = self.state.habits.len();
        let habits = std::mem::take(&mut self.state.habits);
        self.state.habits = habit::delete_habit(habits, id);
        if self.state.habits.len() == before {
            return Ok(false);
        }
        self.persist(keys::HABITS, &self.state.habits)?;
        info!(id, "habit deleted");
        Ok(true)
    }

    /// The seven-day strip for a habit, ending today.
    pub fn habit_week(&self, id: &str) -> Option<Vec<DayCell>> {
        let today = self.clock.today();
        self.habit(id)
            .map(|h| habit::week_window(h, today).collect())
    }

    // ── Notes ────────────────────────────────────────────────────────

    /// Returns the new note, or `None` when the content was blank.
    pub fn add_note(&mut self, content: &str, raw_tags: &str) -> Result<Option<QuickNote>> {
        let id = new_id();
        let notes = std::mem::take(&mut self.state.notes);
        self.state.notes = note::add_note(notes, content, raw_tags, id.as_str(), self.clock.now());

        let Some(created) = self.state.notes.first().filter(|n| n.id == id).cloned() else {
            return Ok(None);
        };
        self.persist(keys::NOTES, &self.state.notes)?;
        info!(id = %created.id, tags = created.tags.len(), "note added");
        Ok(Some(created))
    }

    pub fn delete_note(&mut self, id: &str) -> Result<bool> {
        let before = self.state.notes.len();
        let notes = std::mem::take(&mut self.state.notes);
        self.state.notes = note::delete_note(notes, id);
        if self.state.notes.len() == before {
            return Ok(false);
        }
        self.persist(keys::NOTES, &self.state.notes)?;
        info!(id, "note deleted");
        Ok(true)
    }

    // ── Dashboard ────────────────────────────────────────────────────

    pub fn stats(&self) -> DashboardStats {
        summarize(&self.state, self.clock.today())
    }

    // ── Timer ────────────────────────────────────────────────────────

    /// Load the persisted timer, adopt `durations` and apply the ticks owed
    /// since it was last saved.
    pub fn load_timer(&self, durations: TimerDurations) -> Result<TimerSession> {
        let mut session: TimerSession = load_or_default(&self.store, keys::TIMER)?;
        session.apply_durations(durations);
        for event in session.catch_up(self.clock.now()) {
            info!(?event, "timer caught up");
        }
        Ok(session)
    }

    pub fn save_timer(&self, session: &TimerSession) -> Result<()> {
        self.persist(keys::TIMER, session)
    }
}
