use std::cmp::Ordering;
use std::sync::atomic::{self, AtomicU64};

static NEXT_STAMP: AtomicU64 = AtomicU64::new(0);

fn next_stamp() -> u64 {
    NEXT_STAMP.fetch_add(1, atomic::Ordering::Relaxed)
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Outside,
    Inside,
    DoorsOpened,
    SequenceCompleted,
}

impl RequestKind {
    /// Control signals drive the state machine and are never held back.
    pub fn is_signal(self) -> bool {
        match self {
            RequestKind::DoorsOpened | RequestKind::SequenceCompleted => true,
            RequestKind::Outside | RequestKind::Inside => false,
        }
    }

    pub fn as_string(self) -> String {
        match self {
            RequestKind::Outside => String::from("outside"),
            RequestKind::Inside => String::from("inside"),
            RequestKind::DoorsOpened => String::from("doorsOpened"),
            RequestKind::SequenceCompleted => String::from("sequenceCompleted"),
        }
    }

    fn rank(self) -> u8 {
        match self {
            RequestKind::Outside => 0,
            RequestKind::Inside => 1,
            RequestKind::DoorsOpened | RequestKind::SequenceCompleted => 2,
        }
    }
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request {
    pub floor: u8,
    pub kind: RequestKind,
    pub admitted_at: u64,
}

impl Request {
    pub fn new(floor: u8, kind: RequestKind) -> Self {
        Request {
            floor: floor,
            kind: kind,
            admitted_at: next_stamp(),
        }
    }

    pub fn outside(floor: u8) -> Self {
        Self::new(floor, RequestKind::Outside)
    }

    pub fn inside(floor: u8) -> Self {
        Self::new(floor, RequestKind::Inside)
    }

    pub fn doors_opened(floor: u8) -> Self {
        Self::new(floor, RequestKind::DoorsOpened)
    }

    pub fn sequence_completed(floor: u8) -> Self {
        Self::new(floor, RequestKind::SequenceCompleted)
    }

    pub fn is_signal(&self) -> bool {
        self.kind.is_signal()
    }
}

/// Greater means served first: inside calls beat outside calls,
/// then the earlier admission wins.
impl Ord for Request {
    fn cmp(&self, other: &Self) -> Ordering {
        self.kind
            .rank()
            .cmp(&other.kind.rank())
            .then_with(|| other.admitted_at.cmp(&self.admitted_at))
    }
}

impl PartialOrd for Request {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
