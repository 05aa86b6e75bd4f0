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

//! API-agnostic command-buffer encoding.
//!
//! A [`CommandEncoder`] serializes draw/dispatch/copy/bind commands into a flat
//! byte buffer instead of calling into a graphics API directly. Each record is a
//! fixed header (opcode, payload size) followed by opcode-specific fields and any
//! inline data (vertex bytes, uniform bytes). A backend later walks the buffer
//! with [`decode_commands`] and translates each record into native calls.
//!
//! Argument and vertex data handed to `set_vertex_data`/`bind_argument_data` are
//! copied into the encoder's own buffer immediately, so the caller's slice need
//! not outlive the call — the same bump-allocate-and-copy approach the backend
//! uses for its per-frame transient allocator.

mod decode;
mod opcode;

pub use self::decode::{decode_commands, DecodeError, DecodedCommand};
pub use self::opcode::Opcode;

use crate::graph::handle::ResourceHandle;

/// A closed interval `[x, y, width, height]` in framebuffer pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// X origin, in pixels.
    pub x: f32,
    /// Y origin, in pixels.
    pub y: f32,
    /// Width, in pixels.
    pub width: f32,
    /// Height, in pixels.
    pub height: f32,
    /// Minimum depth value.
    pub min_depth: f32,
    /// Maximum depth value.
    pub max_depth: f32,
}

/// A pixel-space scissor rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScissorRect {
    /// X origin, in pixels.
    pub x: i32,
    /// Y origin, in pixels.
    pub y: i32,
    /// Width, in pixels.
    pub width: u32,
    /// Height, in pixels.
    pub height: u32,
}

/// Appends a growing, opcode-tagged byte stream of recorded commands.
///
/// The encoder never touches a GPU device; it is pure serialization. It is
/// reused across frames by calling [`CommandEncoder::reset`] rather than
/// reallocating, mirroring the per-frame-slot reuse pattern used elsewhere
/// in the renderer.
#[derive(Debug, Default)]
pub struct CommandEncoder {
    buffer: Vec<u8>,
    command_count: u32,
}

impl CommandEncoder {
    /// Creates an empty encoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears all recorded commands, retaining the underlying allocation.
    pub fn reset(&mut self) {
        self.buffer.clear();
        self.command_count = 0;
    }

    /// Records a pipeline bind.
    pub fn bind_pipeline(&mut self, pipeline: ResourceHandle) {
        self.push_header(Opcode::BindPipeline, 0);
        self.push_handle(pipeline);
    }

    /// Records a descriptor/uniform argument update. `data` is copied inline.
    pub fn bind_argument_data(&mut self, slot: u32, data: &[u8]) {
        let payload_size = 4 + 4 + data.len() as u32;
        self.push_header(Opcode::BindArgumentData, payload_size);
        self.push_u32(slot);
        self.push_u32(data.len() as u32);
        self.buffer.extend_from_slice(data);
    }

    /// Records a vertex buffer binding with inline vertex bytes.
    pub fn set_vertex_data(&mut self, slot: u32, data: &[u8]) {
        let payload_size = 4 + 4 + data.len() as u32;
        self.push_header(Opcode::SetVertexData, payload_size);
        self.push_u32(slot);
        self.push_u32(data.len() as u32);
        self.buffer.extend_from_slice(data);
    }

    /// Records an index buffer binding with inline index bytes.
    pub fn set_index_data(&mut self, data: &[u8], index_is_32_bit: bool) {
        let payload_size = 1 + 4 + data.len() as u32;
        self.push_header(Opcode::SetIndexData, payload_size);
        self.buffer.push(index_is_32_bit as u8);
        self.push_u32(data.len() as u32);
        self.buffer.extend_from_slice(data);
    }

    /// Records a non-indexed draw call.
    pub fn draw(&mut self, vertex_count: u32, instance_count: u32, first_vertex: u32) {
        self.push_header(Opcode::Draw, 12);
        self.push_u32(vertex_count);
        self.push_u32(instance_count);
        self.push_u32(first_vertex);
    }

    /// Records an indexed draw call.
    pub fn draw_indexed(&mut self, index_count: u32, instance_count: u32, first_index: u32) {
        self.push_header(Opcode::DrawIndexed, 12);
        self.push_u32(index_count);
        self.push_u32(instance_count);
        self.push_u32(first_index);
    }

    /// Records a compute dispatch.
    pub fn dispatch(&mut self, group_x: u32, group_y: u32, group_z: u32) {
        self.push_header(Opcode::Dispatch, 12);
        self.push_u32(group_x);
        self.push_u32(group_y);
        self.push_u32(group_z);
    }

    /// Records a viewport state change.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.push_header(Opcode::SetViewport, 24);
        self.push_f32(viewport.x);
        self.push_f32(viewport.y);
        self.push_f32(viewport.width);
        self.push_f32(viewport.height);
        self.push_f32(viewport.min_depth);
        self.push_f32(viewport.max_depth);
    }

    /// Records a scissor rectangle change.
    pub fn set_scissor(&mut self, scissor: ScissorRect) {
        self.push_header(Opcode::SetScissor, 16);
        self.push_i32(scissor.x);
        self.push_i32(scissor.y);
        self.push_u32(scissor.width);
        self.push_u32(scissor.height);
    }

    /// Records a line-width state change.
    pub fn set_line_width(&mut self, width: f32) {
        self.push_header(Opcode::SetLineWidth, 4);
        self.push_f32(width);
    }

    /// Records a host-to-device image memory transfer.
    pub fn map_image_memory(&mut self, target: ResourceHandle, data: &[u8]) {
        let payload_size = 12 + 4 + data.len() as u32;
        self.push_header(Opcode::MapImageMemory, payload_size);
        self.push_handle(target);
        self.push_u32(data.len() as u32);
        self.buffer.extend_from_slice(data);
    }

    /// Records a ray-tracing dispatch.
    pub fn trace_rays(&mut self, pipeline: ResourceHandle, width: u32, height: u32, depth: u32) {
        self.push_header(Opcode::TraceRays, 12 + 12);
        self.push_handle(pipeline);
        self.push_u32(width);
        self.push_u32(height);
        self.push_u32(depth);
    }

    /// Returns the encoded byte buffer along with the number of commands and
    /// the total byte count, for the backend to translate into native calls.
    pub fn get_encoded_data(&self) -> (&[u8], u32, usize) {
        (&self.buffer, self.command_count, self.buffer.len())
    }

    fn push_header(&mut self, opcode: Opcode, payload_size: u32) {
        self.buffer.push(opcode as u8);
        self.push_u32(payload_size);
        self.command_count += 1;
    }

    fn push_handle(&mut self, handle: ResourceHandle) {
        self.push_u32(handle.index());
        self.push_u32(handle.kind() as u32);
        self.push_u32(0);
    }

    fn push_u32(&mut self, value: u32) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    fn push_i32(&mut self, value: i32) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }

    fn push_f32(&mut self, value: f32) {
        self.buffer.extend_from_slice(&value.to_le_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_encoder_reports_zero_commands() {
        let encoder = CommandEncoder::new();
        let (bytes, count, len) = encoder.get_encoded_data();
        assert!(bytes.is_empty());
        assert_eq!(count, 0);
        assert_eq!(len, 0);
    }

    #[test]
    fn reset_clears_commands_but_keeps_capacity() {
        let mut encoder = CommandEncoder::new();
        encoder.draw(3, 1, 0);
        let cap_before = encoder.buffer.capacity();
        encoder.reset();
        let (_, count, len) = encoder.get_encoded_data();
        assert_eq!(count, 0);
        assert_eq!(len, 0);
        assert_eq!(encoder.buffer.capacity(), cap_before);
    }

    #[test]
    fn draw_round_trips_through_decode() {
        let mut encoder = CommandEncoder::new();
        encoder.draw(6, 2, 1);
        let (bytes, count, _) = encoder.get_encoded_data();
        assert_eq!(count, 1);
        let decoded = decode_commands(bytes).unwrap();
        assert_eq!(decoded.len(), 1);
        match &decoded[0] {
            DecodedCommand::Draw {
                vertex_count,
                instance_count,
                first_vertex,
            } => {
                assert_eq!(*vertex_count, 6);
                assert_eq!(*instance_count, 2);
                assert_eq!(*first_vertex, 1);
            }
            other => panic!("unexpected decoded command: {other:?}"),
        }
    }

    #[test]
    fn mixed_command_sequence_round_trips() {
        let mut encoder = CommandEncoder::new();
        encoder.bind_argument_data(0, &[1, 2, 3, 4]);
        encoder.set_vertex_data(0, &[0u8; 32]);
        encoder.draw_indexed(36, 1, 0);
        encoder.dispatch(4, 4, 1);

        let (bytes, count, _) = encoder.get_encoded_data();
        assert_eq!(count, 4);
        let decoded = decode_commands(bytes).unwrap();
        assert_eq!(decoded.len(), 4);
    }

    #[test]
    fn truncated_buffer_fails_to_decode() {
        let mut encoder = CommandEncoder::new();
        encoder.draw(1, 1, 0);
        let (bytes, _, _) = encoder.get_encoded_data();
        let truncated = &bytes[..bytes.len() - 2];
        assert!(decode_commands(truncated).is_err());
    }
}
