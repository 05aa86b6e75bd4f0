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

use std::sync::Arc;

use crate::graph::RenderModule;
use crate::platform::window::LumenWindow;
use crate::renderer::error::RenderError;
use crate::renderer::GraphicsDevice;

/// Trait implemented by the concrete frame pipeline that drives one render graph
/// to completion per tick.
///
/// A `RenderSystem` owns the triple-buffered `FrameData` slots and the backend;
/// `update` is the single entry point an application calls once per tick.
pub trait RenderSystem: std::fmt::Debug + Send + Sync {
    /// Binds the render system to a window-backed swapchain.
    ///
    /// This is the convenience path described as `setup_with_window` in the
    /// renderer API: it fills in the first unbound windowed swapchain slot.
    fn setup_with_window(&mut self, window: &dyn LumenWindow) -> Result<(), RenderError>;

    /// Resizes the bound window surface.
    fn resize(&mut self, new_width: u32, new_height: u32);

    /// Drives one frame: runs shader hot-reload, then record/acquire/process/dispatch
    /// on their respective rotated slots, then clear.
    ///
    /// Takes the graph mutably because building its schedule runs each pass's
    /// `FnMut` setup callback.
    fn update(&mut self, graph: &mut RenderModule) -> Result<(), RenderError>;

    /// Indicates whether an optional backend feature is supported.
    fn supports_feature(&self, feature_name: &str) -> bool;

    /// Returns a shared handle to the underlying `GraphicsDevice`, so other parts
    /// of the application (asset loaders, UI layers) can create GPU resources
    /// without depending on the concrete backend type.
    fn graphics_device(&self) -> Arc<dyn GraphicsDevice>;

    /// Releases all GPU resources owned by the render system.
    fn shutdown(&mut self);
}
