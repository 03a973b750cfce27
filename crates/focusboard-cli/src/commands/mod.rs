pub mod config;
pub mod habit;
pub mod note;
pub mod stats;
pub mod task;
pub mod theme;
pub mod timer;

use focusboard_core::{App, SqliteStore, SystemClock};
use serde::Serialize;

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Open the dashboard over the on-disk store.
pub fn open_app() -> Result<App<SqliteStore, SystemClock>, Box<dyn std::error::Error>> {
    let store = SqliteStore::open()?;
    Ok(App::open(store, SystemClock)?)
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
