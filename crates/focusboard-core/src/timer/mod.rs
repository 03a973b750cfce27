mod driver;
mod engine;
mod session;

pub use driver::TimerDriver;
pub use engine::{
    format_time, Phase, PomodoroTimer, TimerDurations, TimerSnapshot, BREAK_DURATION_SECS,
    FOCUS_DURATION_SECS,
};
pub use session::TimerSession;
