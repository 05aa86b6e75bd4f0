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

//! The `wgpu`/Vulkan-backed [`Backend`]: owns the device, the swapchain set,
//! and the pipeline cache, and drives the four per-slot operations of the
//! triple-buffered frame pipeline (`clear_frame`, `acquire_physical_resources`,
//! `process_frame`, `dispatch_frame`).
//!
//! The render graph's execute phase hands `process_frame` an opaque,
//! API-agnostic opcode stream per pass (see [`lumen_core::encoder`]); this
//! module is where that stream is finally translated into native `wgpu` calls.

use std::collections::HashMap;
use std::sync::Arc;

use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use wgpu::util::DeviceExt;

use lumen_core::encoder::{decode_commands, DecodedCommand};
use lumen_core::graph::handle::{HandleRegistry, ResourceHandle, ResourceKind};
use lumen_core::graph::module::Schedule;
use lumen_core::graph::pass::Access;
use lumen_core::graph::PassIndex;
use lumen_core::math::LinearRgba;
use lumen_core::platform::window::{LumenWindow, LumenWindowHandle};
use lumen_core::renderer::error::{RenderError, ResourceError};
use lumen_core::renderer::traits::GraphicsDevice;
use lumen_core::renderer::{CommandBufferId, LoadOp, RenderPipelineId, RendererAdapterInfo, TextureViewId};

use lumen_swapchain::{SwapchainError, SwapchainHandle, SwapchainKind, SwapchainSet, SwapchainSettings};

use crate::conversions::{backend_type_from_wgpu, color_load_op_to_wgpu, device_type_from_wgpu};
use crate::device::WgpuDevice;
use crate::frame::{FrameSlots, SlotState};
use crate::pipeline_manager::PipelineManager;

/// The color a color attachment is cleared to on its first use in a frame.
///
/// The opcode stream carries no clear-color parameter (see
/// [`lumen_core::encoder`]), so `process_frame` always clears to this fixed
/// value on a resource's first scheduled use and loads its prior contents on
/// every subsequent use within the same frame.
const DEFAULT_CLEAR_COLOR: LinearRgba = LinearRgba::BLACK;

/// A GPU resource that has been resolved to a concrete `wgpu` object for the
/// current frame.
#[derive(Debug, Clone)]
enum PhysicalResource {
    /// A texture view, typically a swapchain-acquired surface view.
    TextureView(TextureViewId),
}

/// A window surface this backend presents to, keyed by the [`SwapchainHandle`]
/// tracking its logical extent.
struct WindowSurface {
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
    window: LumenWindowHandle,
}

impl std::fmt::Debug for WindowSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowSurface")
            .field("width", &self.config.width)
            .field("height", &self.config.height)
            .field("format", &self.config.format)
            .finish_non_exhaustive()
    }
}

/// The `wgpu`-backed render backend.
///
/// Owns the GPU device, the set of logical swapchains and their bound window
/// surfaces, the pipeline cache, and the handle-to-physical-resource
/// resolution table rebuilt each time a frame's resources are acquired.
pub struct Backend {
    #[allow(dead_code)]
    instance: wgpu::Instance,
    #[allow(dead_code)]
    adapter: wgpu::Adapter,
    device: Arc<WgpuDevice>,
    frames: FrameSlots,
    swapchains: SwapchainSet,
    handles: Arc<HandleRegistry>,
    pipeline_manager: PipelineManager,
    pipelines: HashMap<ResourceHandle, RenderPipelineId>,
    resources: HashMap<ResourceHandle, PhysicalResource>,
    windows: HashMap<SwapchainHandle, WindowSurface>,
    pending_surface_textures: HashMap<SwapchainHandle, wgpu::SurfaceTexture>,
    primary_swapchain: Option<SwapchainHandle>,
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backend")
            .field("device", &self.device)
            .field("windows", &self.windows.len())
            .field("pipelines", &self.pipelines.len())
            .finish_non_exhaustive()
    }
}

impl Backend {
    /// Creates a backend: requests an adapter and device from `wgpu`, with no
    /// window surface bound yet. Call [`Backend::setup_with_window`] to attach one.
    pub fn new(handles: Arc<HandleRegistry>) -> Result<Self, RenderError> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: None,
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| RenderError::InitializationFailed("no compatible wgpu adapter found".into()))?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("lumen-backend device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
            },
            None,
        ))
        .map_err(|err| RenderError::InitializationFailed(format!("device request failed: {err}")))?;

        let info = adapter.get_info();
        let adapter_info = RendererAdapterInfo {
            name: info.name.clone(),
            backend_type: backend_type_from_wgpu(info.backend),
            device_type: device_type_from_wgpu(info.device_type),
        };

        Ok(Self {
            instance,
            adapter,
            device: Arc::new(WgpuDevice::new(device, queue, adapter_info)),
            frames: FrameSlots::new(),
            swapchains: SwapchainSet::new(),
            handles,
            pipeline_manager: PipelineManager::new(),
            pipelines: HashMap::new(),
            resources: HashMap::new(),
            windows: HashMap::new(),
            pending_surface_textures: HashMap::new(),
            primary_swapchain: None,
        })
    }

    /// Returns a clonable handle to the underlying `wgpu`-backed device.
    pub fn device(&self) -> Arc<WgpuDevice> {
        Arc::clone(&self.device)
    }

    /// Returns a mutable handle to the shader/pipeline cache, for hot-reload ticks.
    pub fn pipeline_manager_mut(&mut self) -> &mut PipelineManager {
        &mut self.pipeline_manager
    }

    /// Registers `pipeline` under `handle`, the graph-facing resource handle
    /// that `BindPipeline` opcodes reference.
    pub fn register_pipeline(&mut self, handle: ResourceHandle, pipeline: RenderPipelineId) {
        self.pipelines.insert(handle, pipeline);
    }

    /// Binds the backend to a window: creates (or reuses) a windowed swapchain
    /// entry and a `wgpu::Surface` for it, configuring the surface for the
    /// window's current size.
    pub fn setup_with_window(&mut self, window: &dyn LumenWindow) -> Result<(), RenderError> {
        let (width, height) = window.inner_size();
        let handle = match self.swapchains.first_unbound_windowed() {
            Some(handle) => {
                self.swapchains
                    .resize_swapchain(handle, width, height)
                    .map_err(swapchain_render_error)?;
                handle
            }
            None => {
                let settings = SwapchainSettings::windowed(Some("primary"), width, height);
                self.swapchains
                    .add_swapchain(&settings, &self.handles)
                    .map_err(swapchain_render_error)?
            }
        };

        self.bind_window_surface(handle, window.clone_handle_arc())?;
        self.primary_swapchain = Some(handle);
        Ok(())
    }

    /// Creates the `wgpu::Surface` for a swapchain entry and configures it.
    ///
    /// `LumenWindowHandle` has no blanket impl of `HasWindowHandle`/`HasDisplayHandle`
    /// (only the concrete window types behind it do), so the raw handles are
    /// pulled out through the `WindowHandle` trait object directly rather than
    /// via `wgpu::SurfaceTargetUnsafe::from_window`'s generic constructor.
    fn bind_window_surface(&mut self, handle: SwapchainHandle, window: LumenWindowHandle) -> Result<(), RenderError> {
        let (width, height) = self
            .swapchains
            .get_swapchain_extent(handle)
            .map_err(swapchain_render_error)?;

        let raw_display_handle = window
            .display_handle()
            .map_err(|err| RenderError::InitializationFailed(format!("invalid display handle: {err}")))?
            .as_raw();
        let raw_window_handle = window
            .window_handle()
            .map_err(|err| RenderError::InitializationFailed(format!("invalid window handle: {err}")))?
            .as_raw();
        let target = wgpu::SurfaceTargetUnsafe::RawHandle {
            raw_display_handle,
            raw_window_handle,
        };
        let surface = unsafe {
            self.instance
                .create_surface_unsafe(target)
                .map_err(|err| RenderError::InitializationFailed(format!("surface creation failed: {err}")))?
        };

        let capabilities = surface.get_capabilities(&self.adapter);
        let format = capabilities
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or_else(|| capabilities.formats[0]);
        let present_mode = if capabilities.present_modes.contains(&wgpu::PresentMode::Mailbox) {
            wgpu::PresentMode::Mailbox
        } else {
            wgpu::PresentMode::Fifo
        };

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode,
            alpha_mode: capabilities.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(self.device.wgpu_device(), &config);

        if let Some(format) = crate::conversions::texture_format_from_wgpu(format) {
            self.device.set_surface_format(format);
        }

        self.windows.insert(handle, WindowSurface { surface, config, window });
        Ok(())
    }

    /// Resizes the bound primary window surface, reconfiguring its `wgpu::Surface`
    /// and updating its logical swapchain extent.
    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        let Some(handle) = self.primary_swapchain else {
            return;
        };
        if let Err(err) = self.swapchains.resize_swapchain(handle, new_width, new_height) {
            log::warn!("resize: failed to update swapchain extent: {err}");
        }
        if let Some(window_surface) = self.windows.get_mut(&handle) {
            window_surface.config.width = new_width.max(1);
            window_surface.config.height = new_height.max(1);
            window_surface
                .surface
                .configure(self.device.wgpu_device(), &window_surface.config);
        }
    }

    /// The interned [`ResourceHandle`] a render graph should declare a write
    /// against to target the primary window's swapchain image, if a window
    /// has been bound via [`Backend::setup_with_window`].
    pub fn primary_swapchain_image(&self) -> Option<ResourceHandle> {
        let handle = self.primary_swapchain?;
        self.swapchains.get_swapchain_resource(handle).ok()
    }

    /// The slot index the next `record_frame` call should record into.
    pub fn frame_slots(&self) -> &FrameSlots {
        &self.frames
    }

    /// Stores a pass's encoded opcode stream into the record slot for the
    /// current frame counter, as produced by [`Schedule::execute`].
    pub fn record_frame(&mut self, encoded: Vec<(PassIndex, Vec<u8>)>) {
        let slot_index = self.frames.record_slot(self.frames.frame_index());
        let slot = self.frames.slot_mut(slot_index);
        slot.encoders = encoded;
        slot.transition(SlotState::Recorded);
    }

    /// Advances the frame counter. Call once per tick, after `dispatch_frame`
    /// and `clear_frame` have run for this tick's slots.
    pub fn advance_frame(&mut self) {
        self.frames.advance();
    }

    /// Blocks until the slot's previous submission (from `N` frames ago) has
    /// retired, then resets its transient allocator and encoder list.
    ///
    /// `FrameData::submission_index` is kept only for diagnostics (see
    /// [`Backend::dispatch_frame`]), so this waits on the whole device rather
    /// than a specific submission.
    pub fn clear_frame(&mut self, slot_index: usize) -> Result<(), RenderError> {
        self.device.wgpu_device().poll(wgpu::Maintain::Wait);
        self.frames.slot_mut(slot_index).clear();
        Ok(())
    }

    /// Acquires physical resources for every resource a schedule's passes
    /// declared: swapchain images via the bound window surfaces, and checks
    /// that referenced pipelines are registered. Buffers are materialized
    /// transiently inside [`Backend::process_frame`] from their inlined opcode
    /// bytes and need no up-front resolution here.
    pub fn acquire_physical_resources(&mut self, slot_index: usize, schedule: &Schedule) -> Result<(), RenderError> {
        self.acquire_swapchain_images()?;

        for uses in schedule.uses.values() {
            for resource_use in uses {
                let handle = resource_use.handle;
                match handle.kind() {
                    ResourceKind::Image => {
                        if !self.resources.contains_key(&handle) {
                            log::trace!(
                                "acquire_physical_resources: image {handle:?} has no swapchain-acquired view; \
                                 declared non-swapchain image resources are not yet backed by a physical allocation"
                            );
                        }
                    }
                    ResourceKind::Pipeline => {
                        if !self.pipelines.contains_key(&handle) {
                            log::warn!("acquire_physical_resources: pipeline {handle:?} is not registered");
                        }
                    }
                    _ => {}
                }
            }
        }

        self.frames.slot_mut(slot_index).transition(SlotState::Acquired);
        Ok(())
    }

    /// Acquires the next surface texture for every bound window surface,
    /// retrying exactly once (after reconfiguring to the window's current
    /// logical extent) if any acquire reports the surface is out of date.
    fn acquire_swapchain_images(&mut self) -> Result<(), RenderError> {
        if self.try_acquire_swapchain_images().is_ok() {
            return Ok(());
        }

        for (&handle, window_surface) in self.windows.iter_mut() {
            let (width, height) = match self.swapchains.get_swapchain_extent(handle) {
                Ok(extent) => extent,
                Err(_) => continue,
            };
            window_surface.config.width = width.max(1);
            window_surface.config.height = height.max(1);
            window_surface
                .surface
                .configure(self.device.wgpu_device(), &window_surface.config);
        }

        self.try_acquire_swapchain_images()
            .map_err(|err| RenderError::SwapchainAcquire(err.to_string()))
    }

    fn try_acquire_swapchain_images(&mut self) -> Result<(), SwapchainError> {
        let windows = &self.windows;
        let device = &self.device;
        let pending = &mut self.pending_surface_textures;
        let mut newly_resolved: Vec<(ResourceHandle, TextureViewId)> = Vec::new();

        let stable_handles: HashMap<SwapchainHandle, ResourceHandle> = windows
            .keys()
            .filter_map(|&handle| self.swapchains.get_swapchain_resource(handle).ok().map(|r| (handle, r)))
            .collect();

        self.swapchains.acquire_swapchain_resources(self.frames.frame_index(), |handle, kind, _width, _height| {
            if kind != SwapchainKind::Windowed {
                return Err(SwapchainError::Lost(
                    "only windowed swapchains are backed by a physical resource in this backend".into(),
                ));
            }
            let window_surface = windows.get(&handle).ok_or(SwapchainError::NotFound)?;
            let surface_texture = window_surface
                .surface
                .get_current_texture()
                .map_err(|err| SwapchainError::Lost(err.to_string()))?;
            let view = surface_texture
                .texture
                .create_view(&wgpu::TextureViewDescriptor::default());
            let view_id = device.register_surface_texture_view(view);
            pending.insert(handle, surface_texture);

            let resource_handle = *stable_handles
                .get(&handle)
                .ok_or(SwapchainError::NotFound)?;
            newly_resolved.push((resource_handle, view_id));
            Ok(resource_handle)
        })?;

        for (handle, view_id) in newly_resolved {
            self.resources.insert(handle, PhysicalResource::TextureView(view_id));
        }
        Ok(())
    }

    /// Decodes and translates a slot's recorded opcode streams into one native
    /// `wgpu::CommandEncoder`, synthesizing a render-pass boundary per pass
    /// from its declared color-attachment writes, and registers the finished
    /// command buffer for later submission.
    pub fn process_frame(&mut self, slot_index: usize, schedule: &Schedule) -> Result<(), RenderError> {
        let mut encoder = self
            .device
            .wgpu_device()
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("lumen-backend frame encoder"),
            });

        let passes: Vec<(PassIndex, Vec<u8>)> = self.frames.slot(slot_index).encoders.clone();
        for (pass_index, bytes) in &passes {
            let commands = decode_commands(bytes)
                .map_err(|err| RenderError::RenderingFailed(format!("decode error in pass {pass_index:?}: {err}")))?;

            let color_attachment_views = self.color_attachment_views_for_pass(*pass_index, schedule);
            if color_attachment_views.is_empty() {
                self.run_commands_without_render_pass(&mut encoder, &commands);
                continue;
            }

            let attachments: Vec<Option<wgpu::RenderPassColorAttachment>> = color_attachment_views
                .iter()
                .map(|(view, load)| {
                    Some(wgpu::RenderPassColorAttachment {
                        view: view.as_ref(),
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: *load,
                            store: wgpu::StoreOp::Store,
                        },
                    })
                })
                .collect();

            // Buffers and pipelines bound mid-pass must outlive `render_pass`, so
            // they're kept alive in this same block rather than a helper function.
            let mut vertex_buffers: Vec<wgpu::Buffer> = Vec::new();
            let mut index_buffers: Vec<wgpu::Buffer> = Vec::new();
            let mut bound_pipelines: Vec<Arc<wgpu::RenderPipeline>> = Vec::new();

            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: None,
                color_attachments: &attachments,
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            for command in &commands {
                match command {
                    DecodedCommand::BindPipeline { pipeline } => match self.pipelines.get(pipeline) {
                        Some(id) => match self.device.get_render_pipeline(*id) {
                            Some(pipeline) => {
                                bound_pipelines.push(pipeline);
                                render_pass.set_pipeline(bound_pipelines.last().expect("just pushed"));
                            }
                            None => log::warn!("process_frame: RenderPipelineId {id:?} not found"),
                        },
                        None => log::warn!("process_frame: pipeline handle {pipeline:?} is not registered"),
                    },
                    DecodedCommand::SetVertexData { slot, data } => {
                        let buffer = self
                            .device
                            .wgpu_device()
                            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                                label: Some("transient vertex buffer"),
                                contents: data,
                                usage: wgpu::BufferUsages::VERTEX,
                            });
                        vertex_buffers.push(buffer);
                        render_pass.set_vertex_buffer(*slot, vertex_buffers.last().expect("just pushed").slice(..));
                    }
                    DecodedCommand::SetIndexData { index_is_32_bit, data } => {
                        let buffer = self
                            .device
                            .wgpu_device()
                            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                                label: Some("transient index buffer"),
                                contents: data,
                                usage: wgpu::BufferUsages::INDEX,
                            });
                        let format = if *index_is_32_bit {
                            wgpu::IndexFormat::Uint32
                        } else {
                            wgpu::IndexFormat::Uint16
                        };
                        index_buffers.push(buffer);
                        render_pass.set_index_buffer(index_buffers.last().expect("just pushed").slice(..), format);
                    }
                    DecodedCommand::BindArgumentData { slot, data } => {
                        log::trace!(
                            "process_frame: argument data for slot {slot} ({} bytes) has no bind-group path yet",
                            data.len()
                        );
                    }
                    DecodedCommand::Draw {
                        vertex_count,
                        instance_count,
                        first_vertex,
                    } => {
                        render_pass.draw(*first_vertex..*first_vertex + *vertex_count, 0..*instance_count);
                    }
                    DecodedCommand::DrawIndexed {
                        index_count,
                        instance_count,
                        first_index,
                    } => {
                        render_pass.draw_indexed(*first_index..*first_index + *index_count, 0, 0..*instance_count);
                    }
                    DecodedCommand::SetViewport(viewport) => {
                        render_pass.set_viewport(
                            viewport.x,
                            viewport.y,
                            viewport.width,
                            viewport.height,
                            viewport.min_depth,
                            viewport.max_depth,
                        );
                    }
                    DecodedCommand::SetScissor(scissor) => {
                        render_pass.set_scissor_rect(
                            scissor.x.max(0) as u32,
                            scissor.y.max(0) as u32,
                            scissor.width,
                            scissor.height,
                        );
                    }
                    DecodedCommand::SetLineWidth(_) => {
                        log::trace!("process_frame: wgpu has no dynamic line-width state; ignoring");
                    }
                    DecodedCommand::Dispatch { .. } => {
                        log::warn!("process_frame: Dispatch opcode recorded inside a render pass; ignoring");
                    }
                    DecodedCommand::MapImageMemory { target, data } => {
                        log::trace!(
                            "process_frame: MapImageMemory for {target:?} ({} bytes) has no generic image upload path yet",
                            data.len()
                        );
                    }
                    DecodedCommand::TraceRays { .. } => {
                        log::trace!("process_frame: ray tracing is not implemented by this backend");
                    }
                }
            }
        }

        let buffer = encoder.finish();
        let id = self.device.register_finished_command_buffer(buffer);
        self.frames.slot_mut(slot_index).submission_index = Some(id.0);
        self.frames.slot_mut(slot_index).transition(SlotState::Processed);
        Ok(())
    }

    /// Resolves the `wgpu::TextureView`s and load ops for a pass's written
    /// image resources, in declaration order. Only resources already resolved
    /// into `self.resources` (currently: swapchain-acquired views) can back a
    /// color attachment.
    fn color_attachment_views_for_pass<'a>(
        &'a self,
        pass_index: PassIndex,
        schedule: &Schedule,
    ) -> Vec<(Arc<wgpu::TextureView>, wgpu::LoadOp<wgpu::Color>)> {
        let Some(uses) = schedule.uses.get(&pass_index) else {
            return Vec::new();
        };
        let position = schedule.order.iter().position(|&i| i == pass_index);

        let mut views = Vec::new();
        for resource_use in uses {
            let is_write = matches!(resource_use.access, Access::Write | Access::ReadWrite);
            if !is_write || resource_use.handle.kind() != ResourceKind::Image {
                continue;
            }
            let Some(PhysicalResource::TextureView(view_id)) = self.resources.get(&resource_use.handle) else {
                continue;
            };
            let Some(view) = self.device.get_texture_view(*view_id) else {
                continue;
            };
            let is_first_use = position
                .zip(schedule.resource_lifetimes.get(&resource_use.handle))
                .map(|(pos, (first, _))| pos == *first)
                .unwrap_or(false);
            let load = if is_first_use {
                color_load_op_to_wgpu(LoadOp::Clear(DEFAULT_CLEAR_COLOR))
            } else {
                wgpu::LoadOp::Load
            };
            views.push((view, load));
        }
        views
    }

    fn run_commands_without_render_pass(&self, encoder: &mut wgpu::CommandEncoder, commands: &[DecodedCommand]) {
        for command in commands {
            if let DecodedCommand::Dispatch {
                group_x,
                group_y,
                group_z,
            } = command
            {
                let mut compute_pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                    label: None,
                    timestamp_writes: None,
                });
                compute_pass.dispatch_workgroups(*group_x, *group_y, *group_z);
            } else {
                log::trace!("process_frame: command {command:?} outside any render/compute pass is not supported");
            }
        }
    }

    /// Submits a slot's registered command buffer and presents any pending
    /// swapchain surface textures it acquired this frame.
    ///
    /// Queue-affinity grouping (see [`Schedule::affinity`]) currently
    /// collapses to plain submission order: `WgpuDevice` exposes a single
    /// graphics queue, so there is no second queue to route async-compute or
    /// transfer-affine passes onto yet.
    pub fn dispatch_frame(&mut self, slot_index: usize) -> Result<(), RenderError> {
        let id = CommandBufferId(
            self.frames
                .slot(slot_index)
                .submission_index
                .ok_or_else(|| RenderError::DispatchFailed("process_frame did not register a command buffer".into()))?,
        );
        match self.device.take_pending_command_buffer(id) {
            Some(buffer) => {
                self.device.wgpu_queue().submit(std::iter::once(buffer));
            }
            None => {
                return Err(RenderError::DispatchFailed(format!(
                    "command buffer {id:?} was already taken or never registered"
                )))
            }
        }

        for (_, surface_texture) in self.pending_surface_textures.drain() {
            surface_texture.present();
        }

        self.frames.slot_mut(slot_index).transition(SlotState::Dispatched);
        Ok(())
    }

    /// Indicates whether an optional backend feature is supported.
    pub fn supports_feature(&self, feature_name: &str) -> bool {
        matches!(feature_name, "compute" | "hot_reload_shaders")
    }

    /// Returns the backend's adapter info.
    pub fn adapter_info(&self) -> RendererAdapterInfo {
        self.device.get_adapter_info()
    }
}

fn swapchain_render_error(err: SwapchainError) -> RenderError {
    match err {
        SwapchainError::Handle(handle_err) => RenderError::ResourceError(ResourceError::Handle(handle_err)),
        other => RenderError::InitializationFailed(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_clear_color_is_opaque_black() {
        assert_eq!(DEFAULT_CLEAR_COLOR, LinearRgba::BLACK);
    }
}
