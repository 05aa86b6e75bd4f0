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

//! A bump/linear allocator reused across frames within one frame slot.
//!
//! Each frame slot owns one [`TransientAllocator`]; the backend resets it the
//! moment the slot transitions to `Cleared`, so a frame's transient copies
//! never outlive the frame that produced them. Byte ranges are handed out by
//! growing a single backing buffer rather than by individual heap allocations,
//! the same chunk-and-bump shape used for the renderer's command-encoder
//! payload buffer.

/// A stable offset and length into a [`TransientAllocator`]'s backing buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransientRegion {
    /// Byte offset into the allocator's buffer.
    pub offset: usize,
    /// Length in bytes.
    pub len: usize,
}

/// A growable byte buffer that hands out monotonically increasing ranges and
/// is reset in bulk, rather than supporting per-allocation frees.
#[derive(Debug, Default)]
pub struct TransientAllocator {
    buffer: Vec<u8>,
}

impl TransientAllocator {
    /// Creates an empty allocator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an allocator pre-sized to avoid reallocating for the first
    /// `capacity` bytes of uploads.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
        }
    }

    /// Copies `data` into the buffer and returns the region it now occupies.
    pub fn alloc_bytes(&mut self, data: &[u8]) -> TransientRegion {
        let offset = self.buffer.len();
        self.buffer.extend_from_slice(data);
        TransientRegion {
            offset,
            len: data.len(),
        }
    }

    /// Reads back a previously allocated region.
    pub fn region(&self, region: TransientRegion) -> &[u8] {
        &self.buffer[region.offset..region.offset + region.len]
    }

    /// The number of bytes currently in use.
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether the allocator currently holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Resets the cursor to zero, retaining the backing allocation. Called
    /// once per frame slot, at the start of that slot's `clear`.
    pub fn reset(&mut self) {
        self.buffer.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_bytes_round_trips() {
        let mut allocator = TransientAllocator::new();
        let region = allocator.alloc_bytes(&[1, 2, 3, 4]);
        assert_eq!(allocator.region(region), &[1, 2, 3, 4]);
    }

    #[test]
    fn sequential_allocations_do_not_overlap() {
        let mut allocator = TransientAllocator::new();
        let a = allocator.alloc_bytes(&[1, 2, 3]);
        let b = allocator.alloc_bytes(&[4, 5]);
        assert_eq!(allocator.region(a), &[1, 2, 3]);
        assert_eq!(allocator.region(b), &[4, 5]);
    }

    #[test]
    fn reset_reclaims_space_without_freeing_capacity() {
        let mut allocator = TransientAllocator::new();
        allocator.alloc_bytes(&[0u8; 64]);
        let cap_before = allocator.buffer.capacity();
        allocator.reset();
        assert_eq!(allocator.len(), 0);
        assert_eq!(allocator.buffer.capacity(), cap_before);
    }
}
