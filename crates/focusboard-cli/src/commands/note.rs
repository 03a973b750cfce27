use clap::Subcommand;
use focusboard_core::note::recent_notes;
use focusboard_core::Config;

use super::{open_app, print_json, CliResult};

#[derive(Subcommand)]
pub enum NoteAction {
    /// Capture a note
    Add {
        /// Note text
        content: String,
        /// Comma-separated tags
        #[arg(long, default_value = "")]
        tags: String,
    },
    /// List notes, newest first
    List {
        /// How many to show (default from config ui.recent_notes)
        #[arg(long)]
        limit: Option<usize>,
        /// Show every note
        #[arg(long, conflicts_with = "limit")]
        all: bool,
    },
    /// Delete a note
    Delete {
        /// Note ID
        id: String,
    },
}

pub fn run(action: NoteAction) -> CliResult {
    let mut app = open_app()?;

    match action {
        NoteAction::Add { content, tags } => match app.add_note(&content, &tags)? {
            Some(note) => {
                println!("Note created: {}", note.id);
                print_json(&note)?;
            }
            None => println!("Nothing added: note is empty"),
        },
        NoteAction::List { limit, all } => {
            let notes = &app.state().notes;
            if all {
                print_json(notes)?;
            } else {
                let limit = limit.unwrap_or_else(|| Config::load_or_default().ui.recent_notes);
                print_json(recent_notes(notes, limit))?;
            }
        }
        NoteAction::Delete { id } => {
            if app.delete_note(&id)? {
                println!("Note deleted: {id}");
            } else {
                println!("Note not found: {id}");
            }
        }
    }
    Ok(())
}
