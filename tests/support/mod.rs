//! Runs the dispatcher against a virtual clock so scenarios can assert
//! exact simulated timestamps without waiting in real time.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use crossbeam_channel::{unbounded, Receiver, Sender};

use elevator::modules::scheduler;
use elevator::utilities::sequence::TimedAction;
use elevator::{Dispatcher, ElevatorSettings, OutputSink, Report, Request, RequestKind, Schedule};

#[derive(Default)]
pub struct VirtualClock {
    now_ms: u64,
    seq: u64,
    queue: BTreeMap<(u64, u64), TimedAction>,
}

impl Schedule for VirtualClock {
    fn schedule(&mut self, actions: Vec<TimedAction>) {
        for action in actions {
            self.queue.insert((self.now_ms + action.after_ms, self.seq), action);
            self.seq += 1;
        }
    }
}

#[derive(Default)]
pub struct Recorder {
    now_ms: AtomicU64,
    events: Mutex<Vec<(u64, Report)>>,
}

impl Recorder {
    fn record(&self, report: Report) {
        let at = self.now_ms.load(Ordering::SeqCst);
        self.events.lock().unwrap().push((at, report));
    }
}

impl OutputSink for Recorder {
    fn report_error(&self, message: &str) {
        self.record(Report::Error(message.to_string()));
    }
    fn report_floor_passed(&self, floor: u8) {
        self.record(Report::FloorPassed(floor));
    }
    fn report_doors_opened(&self) {
        self.record(Report::DoorsOpened);
    }
    fn report_doors_closing(&self) {
        self.record(Report::DoorsClosing);
    }
    fn report_doors_closed(&self) {
        self.record(Report::DoorsClosed);
    }
    fn report_same_floor_inside(&self, floor: u8) {
        self.record(Report::SameFloorInside(floor));
    }
}

pub struct Simulation {
    pub dispatcher: Dispatcher,
    clock: VirtualClock,
    recorder: Recorder,
    admission_tx: Sender<Request>,
    admission_rx: Receiver<Request>,
    stops: Vec<u8>,
}

impl Simulation {
    pub fn new(settings: ElevatorSettings) -> Self {
        let (admission_tx, admission_rx) = unbounded();
        Simulation {
            dispatcher: Dispatcher::new(settings),
            clock: VirtualClock::default(),
            recorder: Recorder::default(),
            admission_tx: admission_tx,
            admission_rx: admission_rx,
            stops: Vec::new(),
        }
    }

    pub fn outside(&mut self, floor: u8) {
        self.admit(Request::outside(floor));
    }

    pub fn inside(&mut self, floor: u8) {
        self.admit(Request::inside(floor));
    }

    pub fn now(&self) -> u64 {
        self.clock.now_ms
    }

    pub fn scheduled(&self) -> usize {
        self.clock.queue.len()
    }

    /// Fires every action due up to and including `t_ms`.
    pub fn advance_to(&mut self, t_ms: u64) {
        loop {
            let next = match self.clock.queue.keys().next() {
                Some(&(due, seq)) if due <= t_ms => (due, seq),
                _ => break,
            };
            let action = self.clock.queue.remove(&next).unwrap();
            self.clock.now_ms = next.0;
            self.recorder.now_ms.store(next.0, Ordering::SeqCst);
            scheduler::fire(action, &self.admission_tx, &self.recorder);
            self.drain();
        }
        self.clock.now_ms = self.clock.now_ms.max(t_ms);
        self.recorder.now_ms.store(self.clock.now_ms, Ordering::SeqCst);
    }

    pub fn run_until_idle(&mut self) {
        while let Some(&(due, _)) = self.clock.queue.keys().next() {
            self.advance_to(due);
        }
    }

    pub fn events(&self) -> Vec<(u64, Report)> {
        self.recorder.events.lock().unwrap().clone()
    }

    pub fn clear_events(&mut self) {
        self.recorder.events.lock().unwrap().clear();
        self.stops.clear();
    }

    /// Floors at which the doors opened, in order.
    pub fn stops(&self) -> Vec<u8> {
        self.stops.clone()
    }

    fn admit(&mut self, request: Request) {
        self.admission_tx.send(request).unwrap();
        self.drain();
    }

    fn drain(&mut self) {
        while let Ok(request) = self.admission_rx.try_recv() {
            if request.kind == RequestKind::DoorsOpened {
                self.stops.push(request.floor);
            }
            self.dispatcher.handle(request, &mut self.clock, &self.recorder);
        }
    }
}
