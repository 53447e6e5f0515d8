//! In-memory PDF handles.
//!
//! A handle stands for a PDF held in memory for display, like a browser
//! object URL. Every issued handle must be released once it is replaced or
//! its owner goes away; [`HandleTable::live_count`] makes leaks visible.

use std::collections::HashMap;

use bytes::Bytes;
use parking_lot::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PdfHandle(u64);

impl PdfHandle {
    pub fn id(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
struct Slots {
    next_id: u64,
    live: HashMap<u64, Bytes>,
}

/// Owner of every live handle.
#[derive(Debug, Default)]
pub struct HandleTable {
    slots: Mutex<Slots>,
}

impl HandleTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `pdf` and returns a fresh handle for it.
    pub fn issue(&self, pdf: Bytes) -> PdfHandle {
        let mut slots = self.slots.lock();
        slots.next_id += 1;
        let id = slots.next_id;
        slots.live.insert(id, pdf);
        PdfHandle(id)
    }

    /// Frees the PDF behind `handle`. Returns false if it was already
    /// released.
    pub fn release(&self, handle: PdfHandle) -> bool {
        self.slots.lock().live.remove(&handle.0).is_some()
    }

    pub fn resolve(&self, handle: PdfHandle) -> Option<Bytes> {
        self.slots.lock().live.get(&handle.0).cloned()
    }

    pub fn live_count(&self) -> usize {
        self.slots.lock().live.len()
    }
}
