use super::config::ElevatorSettings;
use super::report::Report;
use super::request::{Request, RequestKind};

/// A control signal to re-admit once its timed action fires.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signal {
    pub kind: RequestKind,
    pub floor: u8,
}

impl Signal {
    /// Stamped when the action fires, not when it is planned.
    pub fn into_request(self) -> Request {
        Request::new(self.floor, self.kind)
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub struct TimedAction {
    pub after_ms: u64,
    pub report: Report,
    pub signal: Option<Signal>,
}

/// Plans the move from `from` to `to` followed by the full door cycle.
/// Offsets are relative to the moment the sequence starts.
pub fn plan(settings: &ElevatorSettings, from: u8, to: u8) -> Vec<TimedAction> {
    let floor_ms = settings.floor_travel_ms();
    let steps = from.abs_diff(to) as u64;
    let upwards = to > from;

    let mut actions = Vec::with_capacity(steps as usize + 3);
    for i in 1..=steps {
        let passed = if upwards { from as u64 + i } else { from as u64 - i };
        actions.push(TimedAction {
            after_ms: i.saturating_mul(floor_ms),
            report: Report::FloorPassed(passed as u8),
            signal: None,
        });
    }

    let mut at = steps.saturating_mul(floor_ms).saturating_add(settings.door_ms);
    actions.push(TimedAction {
        after_ms: at,
        report: Report::DoorsOpened,
        signal: Some(Signal { kind: RequestKind::DoorsOpened, floor: to }),
    });

    at = at.saturating_add(settings.entrance_ms());
    actions.push(TimedAction {
        after_ms: at,
        report: Report::DoorsClosing,
        signal: None,
    });

    at = at.saturating_add(settings.door_ms);
    actions.push(TimedAction {
        after_ms: at,
        report: Report::DoorsClosed,
        signal: Some(Signal { kind: RequestKind::SequenceCompleted, floor: to }),
    });

    actions
}
