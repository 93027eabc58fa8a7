/// ----- DISPATCHER MODULE -----
/// This module owns the car's state. It takes admitted requests one at a
/// time, starts a call right away when the car is idle, holds it otherwise,
/// and picks the next held call whenever a sequence completes. Timed events
/// that change state come back here as control signals on the admission
/// channel, so this thread is the only writer.

use std::sync::Arc;

use crossbeam_channel::{select, Receiver, Sender, TrySendError};
use log::{debug, info};

use crate::utilities::config::ElevatorSettings;
use crate::utilities::elevator_status::{Behaviour, ElevatorStatus};
use crate::utilities::pending_calls::PendingCalls;
use crate::utilities::report::OutputSink;
use crate::utilities::request::{Request, RequestKind};
use crate::utilities::sequence::{self, TimedAction};

/// Somewhere to put the timed actions of a started sequence.
pub trait Schedule {
    fn schedule(&mut self, actions: Vec<TimedAction>);
}

#[derive(Debug, Clone)]
pub struct Dispatcher {
    settings: ElevatorSettings,
    floor: u8,
    behaviour: Behaviour,
    pending: PendingCalls,
}

impl Dispatcher {
    pub fn new(settings: ElevatorSettings) -> Self {
        Dispatcher {
            settings: settings,
            floor: 1,
            behaviour: Behaviour::Idle,
            pending: PendingCalls::new(),
        }
    }

    pub fn floor(&self) -> u8 {
        self.floor
    }

    pub fn behaviour(&self) -> Behaviour {
        self.behaviour
    }

    /// True when a new call may start immediately.
    pub fn awaiting(&self) -> bool {
        self.behaviour == Behaviour::Idle
    }

    pub fn pending(&self) -> &PendingCalls {
        &self.pending
    }

    pub fn status(&self) -> ElevatorStatus {
        ElevatorStatus {
            floor: self.floor,
            behaviour: self.behaviour,
            pending_floors: self.pending.floors(),
        }
    }

    pub fn handle(&mut self, request: Request, schedule: &mut dyn Schedule, output: &dyn OutputSink) {
        debug!("handling {} request for floor {} in state {}",
            request.kind.as_string(), request.floor, self.behaviour.as_string());
        match request.kind {
            RequestKind::DoorsOpened => self.doors_opened(request.floor),
            RequestKind::SequenceCompleted => self.sequence_completed(request.floor, schedule, output),
            RequestKind::Outside | RequestKind::Inside => {
                if self.awaiting() && self.pending.is_empty() {
                    self.execute(request, schedule, output);
                } else {
                    debug!("car busy, holding call for floor {}", request.floor);
                    self.pending.insert(request);
                }
            },
        }
    }

    fn doors_opened(&mut self, floor: u8) {
        self.behaviour = Behaviour::DoorOpen;
        let served = self.pending.remove_served(floor);
        if served > 0 {
            debug!("doors opened at floor {}, dropped {} pending calls", floor, served);
        }
    }

    fn sequence_completed(&mut self, floor: u8, schedule: &mut dyn Schedule, output: &dyn OutputSink) {
        self.settle(floor);
        if let Some(next) = self.pending.pop_next() {
            self.execute(next, schedule, output);
        }
    }

    fn execute(&mut self, call: Request, schedule: &mut dyn Schedule, output: &dyn OutputSink) {
        let mut next = Some(call);
        while let Some(call) = next.take() {
            match call.kind {
                RequestKind::Inside if call.floor == self.floor => {
                    output.report_same_floor_inside(call.floor);
                    self.settle(call.floor);
                    next = self.pending.pop_next();
                },
                RequestKind::Inside | RequestKind::Outside => {
                    self.start_sequence(call.floor, schedule);
                },
                RequestKind::DoorsOpened | RequestKind::SequenceCompleted => {
                    debug!("control signal {:?} cannot start a sequence", call);
                },
            }
        }
    }

    fn start_sequence(&mut self, target: u8, schedule: &mut dyn Schedule) {
        info!("moving from floor {} to floor {}", self.floor, target);
        self.behaviour = Behaviour::Moving;
        schedule.schedule(sequence::plan(&self.settings, self.floor, target));
    }

    fn settle(&mut self, floor: u8) {
        self.floor = floor;
        self.behaviour = Behaviour::Idle;
    }
}

pub fn main(
    settings: ElevatorSettings,
    admission_rx: Receiver<Request>,
    stop_rx: Receiver<()>,
    mut schedule: impl Schedule,
    output: Arc<dyn OutputSink>,
    elevator_status_tx: Sender<ElevatorStatus>,
    elevator_status_rx: Receiver<ElevatorStatus>,
) {
    let mut dispatcher = Dispatcher::new(settings);
    info!("dispatcher started at floor {}", dispatcher.floor());

    loop {
        select! {
            recv(stop_rx) -> _ => {
                info!("dispatcher stopping at floor {}", dispatcher.floor());
                return;
            },
            recv(admission_rx) -> msg => {
                let request = match msg {
                    Ok(request) => request,
                    Err(_) => {
                        info!("admission channel closed, dispatcher stopping");
                        return;
                    },
                };
                dispatcher.handle(request, &mut schedule, output.as_ref());
                publish_status(&elevator_status_tx, &elevator_status_rx, dispatcher.status());
            },
        }
    }
}

/// Keeps the freshest snapshots when nobody drains the status feed.
fn publish_status(tx: &Sender<ElevatorStatus>, rx: &Receiver<ElevatorStatus>, status: ElevatorStatus) {
    let mut status = status;
    loop {
        match tx.try_send(status) {
            Ok(()) => return,
            Err(TrySendError::Full(rejected)) => {
                if rx.try_recv().is_ok() {
                    debug!("status feed full, oldest snapshot dropped");
                }
                status = rejected;
            },
            Err(TrySendError::Disconnected(_)) => {
                debug!("status feed closed");
                return;
            },
        }
    }
}
