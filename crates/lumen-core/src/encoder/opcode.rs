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

//! Single-byte tags identifying each encoded command record.

/// Identifies the kind of command record that follows a header in the encoded
/// byte stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Opcode {
    /// Binds a pipeline for subsequent draw/dispatch commands.
    BindPipeline = 0,
    /// Updates descriptor/uniform argument data at a slot.
    BindArgumentData = 1,
    /// Binds vertex data at a slot.
    SetVertexData = 2,
    /// Binds index data.
    SetIndexData = 3,
    /// Issues a non-indexed draw call.
    Draw = 4,
    /// Issues an indexed draw call.
    DrawIndexed = 5,
    /// Issues a compute dispatch.
    Dispatch = 6,
    /// Sets the active viewport.
    SetViewport = 7,
    /// Sets the active scissor rectangle.
    SetScissor = 8,
    /// Sets the rasterizer line width.
    SetLineWidth = 9,
    /// Transfers host bytes into a GPU image.
    MapImageMemory = 10,
    /// Issues a ray-tracing dispatch.
    TraceRays = 11,
}

impl Opcode {
    /// Recovers an `Opcode` from its wire byte, if it names a known variant.
    pub fn from_u8(byte: u8) -> Option<Self> {
        Some(match byte {
            0 => Self::BindPipeline,
            1 => Self::BindArgumentData,
            2 => Self::SetVertexData,
            3 => Self::SetIndexData,
            4 => Self::Draw,
            5 => Self::DrawIndexed,
            6 => Self::Dispatch,
            7 => Self::SetViewport,
            8 => Self::SetScissor,
            9 => Self::SetLineWidth,
            10 => Self::MapImageMemory,
            11 => Self::TraceRays,
            _ => return None,
        })
    }
}
