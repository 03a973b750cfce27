use super::{open_app, print_json, CliResult};

pub fn run() -> CliResult {
    let app = open_app()?;
    print_json(&app.stats())
}
