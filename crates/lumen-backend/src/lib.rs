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

//! # Lumen Backend
//!
//! The `wgpu`/Vulkan-backed implementation of `lumen_core`'s renderer traits:
//! a [`GraphicsDevice`](lumen_core::renderer::GraphicsDevice) and command
//! encoder built on `wgpu`, a content-addressed shader/pipeline cache with
//! hot-reload, a transient per-frame allocator, and the triple-buffered
//! frame-slot rotation that drives the render graph's execute phase.

pub mod allocator;
pub mod backend;
pub mod conversions;
pub mod device;
pub mod frame;
pub mod pipeline_manager;
pub mod recorder;

pub use backend::Backend;
pub use device::WgpuDevice;
pub use frame::{FrameData, FrameSlots, SlotState};
