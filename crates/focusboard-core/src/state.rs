//! Application state: every collection the dashboard owns, and the store
//! keys they live under.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::habit::Habit;
use crate::note::QuickNote;
use crate::storage::{load_or_default, KeyValueStore};
use crate::task::Task;

/// Store keys.
pub mod keys {
    pub const THEME: &str = "theme";
    pub const TASKS: &str = "tasks";
    pub const HABITS: &str = "habits";
    pub const GOALS: &str = "goals";
    pub const NOTES: &str = "notes";
    pub const TIMER: &str = "timer";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        })
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{other}' (expected light or dark)")),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub theme: Theme,
    pub tasks: Vec<Task>,
    pub habits: Vec<Habit>,
    /// Reserved collection with no operations yet; carried through verbatim.
    pub goals: Vec<serde_json::Value>,
    pub notes: Vec<QuickNote>,
}

impl AppState {
    /// Load every collection. Missing or malformed keys fall back to their
    /// defaults independently of each other.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Result<Self> {
        Ok(Self {
            theme: load_or_default(store, keys::THEME)?,
            tasks: load_or_default(store, keys::TASKS)?,
            habits: load_or_default(store, keys::HABITS)?,
            goals: load_or_default(store, keys::GOALS)?,
            notes: load_or_default(store, keys::NOTES)?,
        })
    }
}
