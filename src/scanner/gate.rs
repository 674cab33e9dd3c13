//! Capacity gate bounding the number of concurrently running workers
//!
//! A counting semaphore built on a mutex-guarded slot count and a condition
//! variable. The orchestrator blocks in [`CapacityGate::acquire`] while every
//! slot is taken; a worker hands its slot back when its [`SlotPermit`] drops.

use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};

#[derive(Debug)]
struct GateState {
    available: usize,
    peak_in_use: usize,
}

/// Bounded pool of worker slots
#[derive(Debug)]
pub struct CapacityGate {
    capacity: usize,
    state: Mutex<GateState>,
    slot_freed: Condvar,
}

/// One acquired slot; released exactly once, on drop
#[derive(Debug)]
#[must_use = "dropping the permit releases the slot immediately"]
pub struct SlotPermit<'a> {
    gate: &'a CapacityGate,
}

impl CapacityGate {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            state: Mutex::new(GateState {
                available: capacity,
                peak_in_use: 0,
            }),
            slot_freed: Condvar::new(),
        }
    }

    /// Block until a slot is free, then take it.
    pub fn acquire(&self) -> SlotPermit<'_> {
        let mut state = self.lock();
        while state.available == 0 {
            state = self
                .slot_freed
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
        state.available -= 1;

        let in_use = self.capacity - state.available;
        if in_use > state.peak_in_use {
            state.peak_in_use = in_use;
        }

        SlotPermit { gate: self }
    }

    fn release(&self) {
        let mut state = self.lock();
        debug_assert!(state.available < self.capacity, "slot released twice");
        state.available = (state.available + 1).min(self.capacity);
        drop(state);
        self.slot_freed.notify_one();
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn available(&self) -> usize {
        self.lock().available
    }

    pub fn in_use(&self) -> usize {
        self.capacity - self.available()
    }

    /// Highest number of slots held at the same time so far
    pub fn peak_in_use(&self) -> usize {
        self.lock().peak_in_use
    }

    // The guarded state is two integers that are always left consistent,
    // so a poisoned lock is safe to reuse.
    fn lock(&self) -> MutexGuard<'_, GateState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for SlotPermit<'_> {
    fn drop(&mut self) {
        self.gate.release();
    }
}
