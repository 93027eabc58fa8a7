use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{bounded, unbounded, Receiver, Sender, TrySendError};
use log::{debug, info, warn};

use crate::utilities::config::ElevatorSettings;
use crate::utilities::elevator_status::ElevatorStatus;
use crate::utilities::errors::AdmissionError;
use crate::utilities::report::OutputSink;
use crate::utilities::request::{Request, RequestKind};

pub mod dispatcher;
pub mod scheduler;
pub mod io;

/// Status snapshots kept for a reader that falls behind.
pub const STATUS_BACKLOG: usize = 64;

/// Front door of the simulation. Validates calls and puts them on the
/// admission channel; the dispatcher and scheduler threads do the rest.
pub struct ElevatorController {
    settings: ElevatorSettings,
    admission_tx: Sender<Request>,
    stop_tx: Sender<()>,
    output: Arc<dyn OutputSink>,
    elevator_status_rx: Receiver<ElevatorStatus>,
    handles: Vec<JoinHandle<()>>,
}

impl ElevatorController {
    pub fn start(settings: ElevatorSettings, output: Arc<dyn OutputSink>) -> std::io::Result<Self> {
        // INITIALIZE CHANNELS
        let (admission_tx, admission_rx) = match settings.admission_capacity {
            Some(capacity) => bounded(capacity),
            None => unbounded(),
        };
        let (stop_tx, stop_rx) = bounded::<()>(0);
        let (schedule_tx, schedule_rx) = unbounded();
        let (elevator_status_tx, elevator_status_rx) = bounded(STATUS_BACKLOG);

        let mut handles = Vec::new();

        // INITIALIZE THREAD FOR TIMED EVENTS
        {
            let stop_rx = stop_rx.clone();
            let admission_tx = admission_tx.clone();
            let output = output.clone();
            handles.push(thread::Builder::new().name("scheduler".to_string()).spawn(move || scheduler::main(
                schedule_rx,
                stop_rx,
                admission_tx,
                output,
            ))?);
        }

        // INITIALIZE THREAD FOR DISPATCHER
        {
            let elevator_settings = settings.clone();
            let output = output.clone();
            let elevator_status_rx = elevator_status_rx.clone();
            handles.push(thread::Builder::new().name("dispatcher".to_string()).spawn(move || dispatcher::main(
                elevator_settings,
                admission_rx,
                stop_rx,
                scheduler::SchedulerHandle::new(schedule_tx),
                output,
                elevator_status_tx,
                elevator_status_rx,
            ))?);
        }

        info!("elevator started with {} floors", settings.num_floors);
        Ok(ElevatorController {
            settings: settings,
            admission_tx: admission_tx,
            stop_tx: stop_tx,
            output: output,
            elevator_status_rx: elevator_status_rx,
            handles: handles,
        })
    }

    pub fn call_outside(&self, floor: i64) -> Result<(), AdmissionError> {
        self.admit(floor, RequestKind::Outside)
    }

    pub fn call_inside(&self, floor: i64) -> Result<(), AdmissionError> {
        self.admit(floor, RequestKind::Inside)
    }

    /// Status snapshots, one per request the dispatcher handles. Only the
    /// newest `STATUS_BACKLOG` are kept when nobody reads them.
    pub fn elevator_status_rx(&self) -> Receiver<ElevatorStatus> {
        self.elevator_status_rx.clone()
    }

    /// Stops both threads and throws away every scheduled action.
    /// Sequences in flight are not finished.
    pub fn shutdown(self) {
        let ElevatorController { stop_tx, handles, .. } = self;
        drop(stop_tx);
        for handle in handles {
            let name = handle.thread().name().unwrap_or("unnamed").to_string();
            if handle.join().is_err() {
                warn!("{} thread panicked before shutdown", name);
            }
        }
        info!("elevator stopped");
    }

    fn admit(&self, floor: i64, kind: RequestKind) -> Result<(), AdmissionError> {
        let result = self.settings.validate_floor(floor).and_then(|floor| {
            let request = Request::new(floor, kind);
            match self.admission_tx.try_send(request) {
                Ok(()) => Ok(()),
                Err(TrySendError::Full(_)) => Err(AdmissionError::Overloaded),
                Err(TrySendError::Disconnected(_)) => Err(AdmissionError::Stopped),
            }
        });
        match &result {
            Ok(()) => debug!("admitted {} call for floor {}", kind.as_string(), floor),
            Err(e) => self.output.report_error(&e.to_string()),
        }
        result
    }
}
