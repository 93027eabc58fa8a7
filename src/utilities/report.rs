use crossbeam_channel::Sender;
use log::debug;

/// Everything the simulation tells the outside world.
#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq)]
pub enum Report {
    Error(String),
    FloorPassed(u8),
    DoorsOpened,
    DoorsClosing,
    DoorsClosed,
    SameFloorInside(u8),
}

/// Receives simulation events. Calls are fire-and-forget.
pub trait OutputSink: Send + Sync {
    fn report_error(&self, message: &str);
    fn report_floor_passed(&self, floor: u8);
    fn report_doors_opened(&self);
    fn report_doors_closing(&self);
    fn report_doors_closed(&self);
    fn report_same_floor_inside(&self, floor: u8);

    fn report(&self, report: &Report) {
        match report {
            Report::Error(message) => self.report_error(message),
            Report::FloorPassed(floor) => self.report_floor_passed(*floor),
            Report::DoorsOpened => self.report_doors_opened(),
            Report::DoorsClosing => self.report_doors_closing(),
            Report::DoorsClosed => self.report_doors_closed(),
            Report::SameFloorInside(floor) => self.report_same_floor_inside(*floor),
        }
    }
}

impl OutputSink for Sender<Report> {
    fn report_error(&self, message: &str) {
        forward(self, Report::Error(message.to_string()));
    }

    fn report_floor_passed(&self, floor: u8) {
        forward(self, Report::FloorPassed(floor));
    }

    fn report_doors_opened(&self) {
        forward(self, Report::DoorsOpened);
    }

    fn report_doors_closing(&self) {
        forward(self, Report::DoorsClosing);
    }

    fn report_doors_closed(&self) {
        forward(self, Report::DoorsClosed);
    }

    fn report_same_floor_inside(&self, floor: u8) {
        forward(self, Report::SameFloorInside(floor));
    }
}

fn forward(report_tx: &Sender<Report>, report: Report) {
    if let Err(e) = report_tx.send(report) {
        debug!("report dropped, receiver gone: {:?}", e.into_inner());
    }
}
