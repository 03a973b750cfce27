use serde::{Deserialize, Serialize};

use crate::timer::Phase;

/// Every timer state change produces an Event.
/// The CLI prints them; the driver logs them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    TimerStarted {
        phase: Phase,
        time_left_secs: u32,
    },
    TimerPaused {
        phase: Phase,
        time_left_secs: u32,
    },
    TimerReset {
        time_left_secs: u32,
    },
    /// A phase ran out and the timer rolled straight into the next one.
    PhaseCompleted {
        completed: Phase,
        next: Phase,
        next_duration_secs: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let event = Event::PhaseCompleted {
            completed: Phase::Focus,
            next: Phase::Break,
            next_duration_secs: 300,
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "phase_completed");
        assert_eq!(json["next"], "break");
    }
}
