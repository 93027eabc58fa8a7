/// ----- SCHEDULER MODULE -----
/// This module plays back the timed actions of a sequence in simulated
/// time. Each action is reported to the output sink when it falls due;
/// actions carrying a control signal put a fresh request back on the
/// admission channel for the dispatcher.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam_channel::{select, Receiver, Sender};
use log::{debug, info, warn};

use crate::modules::dispatcher::Schedule;
use crate::utilities::report::OutputSink;
use crate::utilities::request::Request;
use crate::utilities::sequence::TimedAction;

const IDLE_WAIT: Duration = Duration::from_secs(60);

/// Dispatcher-side end of the scheduler thread.
#[derive(Debug, Clone)]
pub struct SchedulerHandle {
    schedule_tx: Sender<Vec<TimedAction>>,
}

impl SchedulerHandle {
    pub fn new(schedule_tx: Sender<Vec<TimedAction>>) -> Self {
        SchedulerHandle { schedule_tx: schedule_tx }
    }
}

impl Schedule for SchedulerHandle {
    fn schedule(&mut self, actions: Vec<TimedAction>) {
        debug!("scheduling {} timed actions", actions.len());
        if self.schedule_tx.send(actions).is_err() {
            warn!("scheduler is gone, timed actions dropped");
        }
    }
}

struct Entry {
    due: Instant,
    seq: u64,
    action: TimedAction,
}

impl PartialEq for Entry {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.seq == other.seq
    }
}

impl Eq for Entry {}

impl Ord for Entry {
    fn cmp(&self, other: &Self) -> Ordering {
        self.due.cmp(&other.due).then_with(|| self.seq.cmp(&other.seq))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

pub fn main(
    schedule_rx: Receiver<Vec<TimedAction>>,
    stop_rx: Receiver<()>,
    admission_tx: Sender<Request>,
    output: Arc<dyn OutputSink>,
) {
    let mut queue: BinaryHeap<Reverse<Entry>> = BinaryHeap::new();
    let mut seq: u64 = 0;

    loop {
        fire_due(&mut queue, &admission_tx, output.as_ref());

        let wait = match queue.peek() {
            Some(Reverse(entry)) => entry.due.saturating_duration_since(Instant::now()),
            None => IDLE_WAIT,
        };

        select! {
            recv(stop_rx) -> _ => {
                info!("scheduler stopping, {} timed actions cancelled", queue.len());
                return;
            },
            recv(schedule_rx) -> msg => {
                let actions = match msg {
                    Ok(actions) => actions,
                    Err(_) => {
                        info!("schedule channel closed, scheduler stopping");
                        return;
                    },
                };
                let now = Instant::now();
                for action in actions {
                    let Some(due) = now.checked_add(Duration::from_millis(action.after_ms)) else {
                        let message = format!("The elevator cannot wait {} ms, {:?} dropped", action.after_ms, action.report);
                        warn!("{}", message);
                        output.report_error(&message);
                        continue;
                    };
                    queue.push(Reverse(Entry {
                        due: due,
                        seq: seq,
                        action: action,
                    }));
                    seq += 1;
                }
            },
            default(wait) => {},
        }
    }
}

fn fire_due(queue: &mut BinaryHeap<Reverse<Entry>>, admission_tx: &Sender<Request>, output: &dyn OutputSink) {
    let now = Instant::now();
    while queue.peek().map_or(false, |Reverse(entry)| entry.due <= now) {
        let Some(Reverse(entry)) = queue.pop() else { break };
        fire(entry.action, admission_tx, output);
    }
}

/// Runs one timed action. A panicking sink is contained and reported,
/// and the control signal is delivered regardless.
pub fn fire(action: TimedAction, admission_tx: &Sender<Request>, output: &dyn OutputSink) {
    let reported = panic::catch_unwind(AssertUnwindSafe(|| output.report(&action.report)));
    if reported.is_err() {
        let message = format!("Failed to report {:?}", action.report);
        warn!("{}", message);
        if panic::catch_unwind(AssertUnwindSafe(|| output.report_error(&message))).is_err() {
            warn!("output sink failed while reporting an error");
        }
    }

    if let Some(signal) = action.signal {
        if admission_tx.send(signal.into_request()).is_err() {
            debug!("dispatcher is gone, {:?} dropped", signal);
        }
    }
}
