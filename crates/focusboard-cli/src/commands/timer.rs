use std::time::Duration;

use clap::Subcommand;
use focusboard_core::timer::{TimerDriver, TimerSession};
use focusboard_core::{Clock, Config, Event};
use tracing::info;

use super::{open_app, print_json, CliResult};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start or resume the countdown
    Start,
    /// Pause the countdown
    Pause,
    /// Stop and rewind to a fresh focus phase
    Reset,
    /// Print current timer state as JSON
    Status,
    /// Start the countdown and tick in the foreground until Ctrl-C
    Run {
        /// Stop after this many seconds instead of waiting for Ctrl-C
        #[arg(long)]
        seconds: Option<u64>,
    },
}

fn print_events(events: &[Event]) -> CliResult {
    for event in events {
        println!("{}", serde_json::to_string(event)?);
    }
    Ok(())
}

pub fn run(action: TimerAction) -> CliResult {
    let app = open_app()?;
    let durations = Config::load_or_default().timer_durations();
    let mut session = app.load_timer(durations)?;
    let now = app.clock().now();

    match action {
        TimerAction::Start => print_events(&session.start(now))?,
        TimerAction::Pause => print_events(&session.pause(now))?,
        TimerAction::Reset => print_events(&[session.reset()])?,
        TimerAction::Status => print_json(&session.timer().snapshot())?,
        TimerAction::Run { seconds } => {
            let timer = run_foreground(session.timer().clone(), seconds)?;
            session = TimerSession::resumed(timer, app.clock().now());
            print_json(&session.timer().snapshot())?;
        }
    }

    app.save_timer(&session)?;
    Ok(())
}

/// Drive the timer with a live tick task, echoing every second, until
/// Ctrl-C or the optional deadline. Returns the engine as it stood when the
/// ticking stopped.
fn run_foreground(
    timer: focusboard_core::PomodoroTimer,
    seconds: Option<u64>,
) -> Result<focusboard_core::PomodoroTimer, Box<dyn std::error::Error>> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    runtime.block_on(async move {
        let mut driver = TimerDriver::new(timer);
        let mut updates = driver.subscribe();
        if let Some(event) = driver.start() {
            info!(?event, "timer started");
        }

        let deadline = seconds.map(|s| tokio::time::Instant::now() + Duration::from_secs(s));
        let stop_at = async {
            match deadline {
                Some(at) => tokio::time::sleep_until(at).await,
                None => std::future::pending::<()>().await,
            }
        };
        tokio::pin!(stop_at);

        loop {
            tokio::select! {
                changed = updates.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let snap = updates.borrow_and_update().clone();
                    println!("{} {}", snap.display, snap.phase);
                }
                _ = tokio::signal::ctrl_c() => break,
                _ = &mut stop_at => break,
            }
        }

        // Dropping the driver aborts its tick task.
        let timer = driver.timer();
        drop(driver);
        Ok::<_, Box<dyn std::error::Error>>(timer)
    })
}
