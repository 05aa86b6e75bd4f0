// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Per-frame-slot state and the triple-buffer rotation table.
//!
//! Frame `F` records into slot `F mod N`, and on the same tick acquires,
//! processes, and dispatches slot `(F + 2) mod N` while clearing slot
//! `(F + 1) mod N`. Each slot's state machine guards against a frame
//! observing a slot that is still in flight from `N` frames ago.

use crate::allocator::TransientAllocator;
use lumen_core::renderer::api::core::MAX_FRAMES_IN_FLIGHT;

/// The lifecycle state of one [`FrameData`] slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    /// The slot has never been used.
    Initial,
    /// The slot's transient allocator has been reset and its encoders are empty.
    Cleared,
    /// Physical resources (swapchain image, etc.) have been bound for this frame.
    Acquired,
    /// The render graph's execute phase has recorded commands into this slot.
    Recorded,
    /// The backend has translated encoded commands into native command buffers.
    Processed,
    /// The slot's command buffers have been submitted to a GPU queue.
    Dispatched,
    /// The slot's fence wait failed or timed out during clear.
    FailedClear,
    /// Acquiring physical resources failed (including after the resize retry).
    FailedAcquire,
    /// Submitting the slot's command buffers failed.
    FailedDispatch,
}

impl SlotState {
    /// Whether this state represents a slot that can safely start a fresh
    /// `record` pass this tick.
    pub fn is_ready_for_record(&self) -> bool {
        matches!(self, Self::Cleared)
    }
}

/// One triple-buffered frame slot: its lifecycle state, transient allocator,
/// and the command encoders recorded into it this cycle.
#[derive(Debug)]
pub struct FrameData {
    state: SlotState,
    pub(crate) transient: TransientAllocator,
    pub(crate) encoders: Vec<(lumen_core::graph::PassIndex, Vec<u8>)>,
    pub(crate) submission_index: Option<u64>,
}

impl FrameData {
    fn new() -> Self {
        Self {
            state: SlotState::Initial,
            transient: TransientAllocator::new(),
            encoders: Vec::new(),
            submission_index: None,
        }
    }

    /// The slot's current lifecycle state.
    pub fn state(&self) -> SlotState {
        self.state
    }

    pub(crate) fn transition(&mut self, next: SlotState) {
        log::trace!("frame slot transition: {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    pub(crate) fn clear(&mut self) {
        self.transient.reset();
        self.encoders.clear();
        self.submission_index = None;
        self.transition(SlotState::Cleared);
    }
}

/// Owns the `N` triple-buffered [`FrameData`] slots and the rotation table
/// mapping a monotonically increasing frame counter to slot indices.
#[derive(Debug)]
pub struct FrameSlots {
    slots: Vec<FrameData>,
    frame_counter: u64,
}

impl FrameSlots {
    /// Creates `MAX_FRAMES_IN_FLIGHT` slots, all in the `Initial` state.
    pub fn new() -> Self {
        Self {
            slots: (0..MAX_FRAMES_IN_FLIGHT).map(|_| FrameData::new()).collect(),
            frame_counter: 0,
        }
    }

    /// The number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether there are no slots (never true for a normally constructed set).
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The current frame counter, incremented by [`FrameSlots::advance`].
    pub fn frame_index(&self) -> u64 {
        self.frame_counter
    }

    /// The slot index frame `F` records into: `F mod N`.
    pub fn record_slot(&self, frame: u64) -> usize {
        (frame as usize) % self.slots.len()
    }

    /// The slot index frame `F` acquires/processes/dispatches: `(F + 2) mod N`.
    pub fn dispatch_slot(&self, frame: u64) -> usize {
        ((frame as usize) + 2) % self.slots.len()
    }

    /// The slot index frame `F` clears: `(F + 1) mod N`.
    pub fn clear_slot(&self, frame: u64) -> usize {
        ((frame as usize) + 1) % self.slots.len()
    }

    /// Borrows a slot mutably by index.
    pub fn slot_mut(&mut self, index: usize) -> &mut FrameData {
        &mut self.slots[index]
    }

    /// Borrows a slot by index.
    pub fn slot(&self, index: usize) -> &FrameData {
        &self.slots[index]
    }

    /// Advances the frame counter by one tick.
    pub fn advance(&mut self) {
        self.frame_counter += 1;
    }
}

impl Default for FrameSlots {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotation_table_matches_n_equals_three() {
        let slots = FrameSlots::new();
        assert_eq!(slots.len(), 3);
        assert_eq!(slots.record_slot(5), 2);
        assert_eq!(slots.dispatch_slot(5), (5 + 2) % 3);
        assert_eq!(slots.clear_slot(5), (5 + 1) % 3);
    }

    #[test]
    fn clear_resets_transient_allocator_and_state() {
        let mut slots = FrameSlots::new();
        let slot = slots.slot_mut(0);
        slot.transient.alloc_bytes(&[1, 2, 3]);
        slot.transition(SlotState::FailedDispatch);
        slot.clear();
        assert_eq!(slot.state(), SlotState::Cleared);
        assert_eq!(slot.transient.len(), 0);
    }

    #[test]
    fn slot_state_monotonicity_ready_for_record_only_when_cleared() {
        let mut slot = FrameData::new();
        assert!(!slot.state().is_ready_for_record());
        slot.clear();
        assert!(slot.state().is_ready_for_record());
        slot.transition(SlotState::Acquired);
        assert!(!slot.state().is_ready_for_record());
    }
}
