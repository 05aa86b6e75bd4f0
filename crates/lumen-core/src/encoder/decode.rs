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

//! Decodes a byte stream produced by [`super::CommandEncoder`] back into a
//! sequence of structured commands, for backend translation and for the
//! round-trip tests this format is built to support.

use super::opcode::Opcode;
use super::{ScissorRect, Viewport};
use crate::graph::handle::{ResourceHandle, ResourceKind};
use std::fmt;

/// A single decoded command record.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodedCommand {
    /// See [`super::CommandEncoder::bind_pipeline`].
    BindPipeline {
        /// The bound pipeline handle.
        pipeline: ResourceHandle,
    },
    /// See [`super::CommandEncoder::bind_argument_data`].
    BindArgumentData {
        /// The bound slot index.
        slot: u32,
        /// The raw argument bytes.
        data: Vec<u8>,
    },
    /// See [`super::CommandEncoder::set_vertex_data`].
    SetVertexData {
        /// The bound slot index.
        slot: u32,
        /// The raw vertex bytes.
        data: Vec<u8>,
    },
    /// See [`super::CommandEncoder::set_index_data`].
    SetIndexData {
        /// Whether indices are 32-bit (`false` means 16-bit).
        index_is_32_bit: bool,
        /// The raw index bytes.
        data: Vec<u8>,
    },
    /// See [`super::CommandEncoder::draw`].
    Draw {
        /// Vertex count.
        vertex_count: u32,
        /// Instance count.
        instance_count: u32,
        /// First vertex index.
        first_vertex: u32,
    },
    /// See [`super::CommandEncoder::draw_indexed`].
    DrawIndexed {
        /// Index count.
        index_count: u32,
        /// Instance count.
        instance_count: u32,
        /// First index.
        first_index: u32,
    },
    /// See [`super::CommandEncoder::dispatch`].
    Dispatch {
        /// Workgroup count on X.
        group_x: u32,
        /// Workgroup count on Y.
        group_y: u32,
        /// Workgroup count on Z.
        group_z: u32,
    },
    /// See [`super::CommandEncoder::set_viewport`].
    SetViewport(Viewport),
    /// See [`super::CommandEncoder::set_scissor`].
    SetScissor(ScissorRect),
    /// See [`super::CommandEncoder::set_line_width`].
    SetLineWidth(f32),
    /// See [`super::CommandEncoder::map_image_memory`].
    MapImageMemory {
        /// The target image handle.
        target: ResourceHandle,
        /// The raw bytes copied to device memory.
        data: Vec<u8>,
    },
    /// See [`super::CommandEncoder::trace_rays`].
    TraceRays {
        /// The ray-tracing pipeline handle.
        pipeline: ResourceHandle,
        /// Dispatch width.
        width: u32,
        /// Dispatch height.
        height: u32,
        /// Dispatch depth.
        depth: u32,
    },
}

/// An error encountered while decoding a command buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The buffer ended in the middle of a header or payload.
    UnexpectedEof,
    /// A header named a byte that is not a known [`Opcode`].
    UnknownOpcode(u8),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnexpectedEof => write!(f, "command buffer ended mid-record"),
            Self::UnknownOpcode(byte) => write!(f, "unknown command opcode: {byte}"),
        }
    }
}

impl std::error::Error for DecodeError {}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn u8(&mut self) -> Result<u8, DecodeError> {
        let byte = *self.bytes.get(self.pos).ok_or(DecodeError::UnexpectedEof)?;
        self.pos += 1;
        Ok(byte)
    }

    fn u32(&mut self) -> Result<u32, DecodeError> {
        let slice = self
            .bytes
            .get(self.pos..self.pos + 4)
            .ok_or(DecodeError::UnexpectedEof)?;
        self.pos += 4;
        Ok(u32::from_le_bytes(slice.try_into().unwrap()))
    }

    fn i32(&mut self) -> Result<i32, DecodeError> {
        self.u32().map(|v| v as i32)
    }

    fn f32(&mut self) -> Result<f32, DecodeError> {
        self.u32().map(f32::from_bits)
    }

    fn bytes(&mut self, len: usize) -> Result<Vec<u8>, DecodeError> {
        let slice = self
            .bytes
            .get(self.pos..self.pos + len)
            .ok_or(DecodeError::UnexpectedEof)?;
        self.pos += len;
        Ok(slice.to_vec())
    }

    fn handle(&mut self) -> Result<ResourceHandle, DecodeError> {
        let index = self.u32()?;
        let kind_raw = self.u32()?;
        let _reserved = self.u32()?;
        let kind = resource_kind_from_u32(kind_raw).ok_or(DecodeError::UnexpectedEof)?;
        Ok(ResourceHandle::from_raw_parts(index, 0, kind))
    }
}

fn resource_kind_from_u32(value: u32) -> Option<ResourceKind> {
    const KINDS: [ResourceKind; 7] = [
        ResourceKind::Image,
        ResourceKind::Buffer,
        ResourceKind::Tlas,
        ResourceKind::Blas,
        ResourceKind::Texture,
        ResourceKind::ShaderModule,
        ResourceKind::Pipeline,
    ];
    KINDS.get(value as usize).copied()
}

/// Decodes a full command buffer produced by [`super::CommandEncoder`].
pub fn decode_commands(bytes: &[u8]) -> Result<Vec<DecodedCommand>, DecodeError> {
    let mut cursor = Cursor { bytes, pos: 0 };
    let mut commands = Vec::new();

    while cursor.pos < bytes.len() {
        let opcode_byte = cursor.u8()?;
        let opcode = Opcode::from_u8(opcode_byte).ok_or(DecodeError::UnknownOpcode(opcode_byte))?;
        let _payload_size = cursor.u32()?;

        let command = match opcode {
            Opcode::BindPipeline => DecodedCommand::BindPipeline {
                pipeline: cursor.handle()?,
            },
            Opcode::BindArgumentData => {
                let slot = cursor.u32()?;
                let len = cursor.u32()? as usize;
                let data = cursor.bytes(len)?;
                DecodedCommand::BindArgumentData { slot, data }
            }
            Opcode::SetVertexData => {
                let slot = cursor.u32()?;
                let len = cursor.u32()? as usize;
                let data = cursor.bytes(len)?;
                DecodedCommand::SetVertexData { slot, data }
            }
            Opcode::SetIndexData => {
                let index_is_32_bit = cursor.u8()? != 0;
                let len = cursor.u32()? as usize;
                let data = cursor.bytes(len)?;
                DecodedCommand::SetIndexData {
                    index_is_32_bit,
                    data,
                }
            }
            Opcode::Draw => DecodedCommand::Draw {
                vertex_count: cursor.u32()?,
                instance_count: cursor.u32()?,
                first_vertex: cursor.u32()?,
            },
            Opcode::DrawIndexed => DecodedCommand::DrawIndexed {
                index_count: cursor.u32()?,
                instance_count: cursor.u32()?,
                first_index: cursor.u32()?,
            },
            Opcode::Dispatch => DecodedCommand::Dispatch {
                group_x: cursor.u32()?,
                group_y: cursor.u32()?,
                group_z: cursor.u32()?,
            },
            Opcode::SetViewport => DecodedCommand::SetViewport(Viewport {
                x: cursor.f32()?,
                y: cursor.f32()?,
                width: cursor.f32()?,
                height: cursor.f32()?,
                min_depth: cursor.f32()?,
                max_depth: cursor.f32()?,
            }),
            Opcode::SetScissor => DecodedCommand::SetScissor(ScissorRect {
                x: cursor.i32()?,
                y: cursor.i32()?,
                width: cursor.u32()?,
                height: cursor.u32()?,
            }),
            Opcode::SetLineWidth => DecodedCommand::SetLineWidth(cursor.f32()?),
            Opcode::MapImageMemory => {
                let target = cursor.handle()?;
                let len = cursor.u32()? as usize;
                let data = cursor.bytes(len)?;
                DecodedCommand::MapImageMemory { target, data }
            }
            Opcode::TraceRays => DecodedCommand::TraceRays {
                pipeline: cursor.handle()?,
                width: cursor.u32()?,
                height: cursor.u32()?,
                depth: cursor.u32()?,
            },
        };
        commands.push(command);
    }

    Ok(commands)
}
