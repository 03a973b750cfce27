use clap::Subcommand;
use focusboard_core::Theme;

use super::{open_app, CliResult};

#[derive(Subcommand)]
pub enum ThemeAction {
    /// Print the current theme
    Show,
    /// Switch between light and dark
    Toggle,
    /// Set the theme explicitly
    Set {
        /// light or dark
        theme: Theme,
    },
}

pub fn run(action: ThemeAction) -> CliResult {
    let mut app = open_app()?;

    let theme = match action {
        ThemeAction::Show => app.state().theme,
        ThemeAction::Toggle => app.toggle_theme()?,
        ThemeAction::Set { theme } => app.set_theme(theme)?,
    };
    println!("{theme}");
    Ok(())
}
