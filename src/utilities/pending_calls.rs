use std::collections::BinaryHeap;

use log::warn;

use super::request::Request;

/// Calls admitted while the car is busy, highest priority on top.
#[derive(Debug, Clone, Default)]
pub struct PendingCalls {
    calls: BinaryHeap<Request>,
}

impl PendingCalls {
    pub fn new() -> Self {
        PendingCalls {
            calls: BinaryHeap::new(),
        }
    }

    pub fn insert(&mut self, request: Request) {
        if request.is_signal() {
            warn!("refusing to hold control signal {:?}", request);
            return;
        }
        self.calls.push(request);
    }

    pub fn pop_next(&mut self) -> Option<Request> {
        self.calls.pop()
    }

    #[cfg(test)]
    pub fn peek_next(&self) -> Option<&Request> {
        self.calls.peek()
    }

    /// Drops every call for `floor`, returning how many were removed.
    pub fn remove_served(&mut self, floor: u8) -> usize {
        let before = self.calls.len();
        self.calls.retain(|request| request.floor != floor);
        before - self.calls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.calls.len()
    }

    pub fn floors(&self) -> Vec<u8> {
        let mut calls = self.calls.clone().into_sorted_vec();
        calls.reverse();
        calls.iter().map(|request| request.floor).collect()
    }
}
