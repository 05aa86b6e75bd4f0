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

//! A `wgpu`-backed implementation of [`GraphicsDevice`].
//!
//! Resources are kept in ID-keyed maps behind a lock rather than handed out
//! as raw `wgpu` handles, so callers only ever deal in the API-agnostic IDs
//! defined in `lumen_core::renderer::api`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use wgpu::util::DeviceExt;

use lumen_core::renderer::api::buffer::{BufferDescriptor, BufferId};
use lumen_core::renderer::api::command::CommandBufferId;
use lumen_core::renderer::api::pipeline::{
    PipelineLayoutDescriptor, PipelineLayoutId, RenderPipelineDescriptor, RenderPipelineId,
};
use lumen_core::renderer::api::shader::{ShaderModuleDescriptor, ShaderModuleId, ShaderSourceData};
use lumen_core::renderer::api::texture::{
    SamplerDescriptor, SamplerId, TextureDescriptor, TextureId, TextureViewDescriptor, TextureViewId,
};
use lumen_core::renderer::api::RendererAdapterInfo;
use lumen_core::renderer::error::{PipelineError, ResourceError, ShaderError};
use lumen_core::renderer::traits::CommandEncoder as CommandEncoderTrait;
use lumen_core::renderer::GraphicsDevice;

use crate::conversions::{texture_format_to_wgpu, texture_usage_to_wgpu};

struct BufferEntry {
    buffer: Arc<wgpu::Buffer>,
    size: u64,
}

/// State shared behind the `Arc` that backs every [`WgpuDevice`] clone.
struct Internal {
    device: wgpu::Device,
    queue: wgpu::Queue,

    shader_modules: Mutex<HashMap<ShaderModuleId, wgpu::ShaderModule>>,
    buffers: Mutex<HashMap<BufferId, BufferEntry>>,
    textures: Mutex<HashMap<TextureId, Arc<wgpu::Texture>>>,
    texture_views: Mutex<HashMap<TextureViewId, Arc<wgpu::TextureView>>>,
    samplers: Mutex<HashMap<SamplerId, wgpu::Sampler>>,
    pipeline_layouts: Mutex<HashMap<PipelineLayoutId, wgpu::PipelineLayout>>,
    render_pipelines: Mutex<HashMap<RenderPipelineId, Arc<wgpu::RenderPipeline>>>,

    pending_command_buffers: Mutex<HashMap<CommandBufferId, wgpu::CommandBuffer>>,
    next_command_buffer_id: std::sync::atomic::AtomicU64,

    next_shader_id: AtomicUsize,
    next_buffer_id: AtomicUsize,
    next_texture_id: AtomicUsize,
    next_texture_view_id: AtomicUsize,
    next_sampler_id: AtomicUsize,
    next_pipeline_layout_id: AtomicUsize,
    next_pipeline_id: AtomicUsize,

    adapter_info: RendererAdapterInfo,
    surface_format: Mutex<Option<lumen_core::renderer::api::TextureFormat>>,
}

/// A clonable, thread-safe handle onto a `wgpu` device and its resource tables.
#[derive(Clone)]
pub struct WgpuDevice {
    internal: Arc<Internal>,
}

impl std::fmt::Debug for WgpuDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WgpuDevice")
            .field("adapter", &self.internal.adapter_info.name)
            .finish()
    }
}

impl WgpuDevice {
    pub(crate) fn new(device: wgpu::Device, queue: wgpu::Queue, adapter_info: RendererAdapterInfo) -> Self {
        Self {
            internal: Arc::new(Internal {
                device,
                queue,
                shader_modules: Mutex::new(HashMap::new()),
                buffers: Mutex::new(HashMap::new()),
                textures: Mutex::new(HashMap::new()),
                texture_views: Mutex::new(HashMap::new()),
                samplers: Mutex::new(HashMap::new()),
                pipeline_layouts: Mutex::new(HashMap::new()),
                render_pipelines: Mutex::new(HashMap::new()),
                next_shader_id: AtomicUsize::new(0),
                next_buffer_id: AtomicUsize::new(0),
                next_texture_id: AtomicUsize::new(0),
                next_texture_view_id: AtomicUsize::new(0),
                next_sampler_id: AtomicUsize::new(0),
                next_pipeline_layout_id: AtomicUsize::new(0),
                next_pipeline_id: AtomicUsize::new(0),
                adapter_info,
                surface_format: Mutex::new(None),
                pending_command_buffers: Mutex::new(HashMap::new()),
                next_command_buffer_id: std::sync::atomic::AtomicU64::new(0),
            }),
        }
    }

    pub(crate) fn set_surface_format(&self, format: lumen_core::renderer::api::TextureFormat) {
        *self.internal.surface_format.lock().expect("surface_format poisoned") = Some(format);
    }

    pub(crate) fn wgpu_device(&self) -> &wgpu::Device {
        &self.internal.device
    }

    pub(crate) fn wgpu_queue(&self) -> &wgpu::Queue {
        &self.internal.queue
    }

    pub(crate) fn get_buffer(&self, id: BufferId) -> Option<Arc<wgpu::Buffer>> {
        let buffers = self.internal.buffers.lock().expect("buffers poisoned");
        buffers.get(&id).map(|entry| entry.buffer.clone())
    }

    pub(crate) fn get_render_pipeline(&self, id: RenderPipelineId) -> Option<Arc<wgpu::RenderPipeline>> {
        let pipelines = self
            .internal
            .render_pipelines
            .lock()
            .expect("render_pipelines poisoned");
        pipelines.get(&id).cloned()
    }

    pub(crate) fn get_texture_view(&self, id: TextureViewId) -> Option<Arc<wgpu::TextureView>> {
        let views = self.internal.texture_views.lock().expect("texture_views poisoned");
        views.get(&id).cloned()
    }

    /// Registers a `wgpu::TextureView` created from an acquired swapchain surface
    /// texture, handing back an ID through which the rest of the backend can
    /// reference it like any other texture view.
    pub(crate) fn register_surface_texture_view(&self, view: wgpu::TextureView) -> TextureViewId {
        let id = self.generate_texture_view_id();
        self.internal
            .texture_views
            .lock()
            .expect("texture_views poisoned")
            .insert(id, Arc::new(view));
        id
    }

    /// Releases a previously registered texture view, e.g. after the surface
    /// texture it wraps has been presented and dropped.
    pub(crate) fn release_texture_view(&self, id: TextureViewId) {
        self.internal
            .texture_views
            .lock()
            .expect("texture_views poisoned")
            .remove(&id);
    }

    /// Polls the device without blocking, driving queued callbacks (buffer
    /// maps, etc.) and reclaiming resources from completed submissions.
    pub(crate) fn poll_non_blocking(&self) {
        self.internal.device.poll(wgpu::Maintain::Poll);
    }

    /// Stores a finished `wgpu::CommandBuffer` and hands back an opaque ID for later submission.
    pub(crate) fn register_finished_command_buffer(&self, buffer: wgpu::CommandBuffer) -> CommandBufferId {
        let id = CommandBufferId(
            self.internal
                .next_command_buffer_id
                .fetch_add(1, Ordering::Relaxed),
        );
        self.internal
            .pending_command_buffers
            .lock()
            .expect("pending_command_buffers poisoned")
            .insert(id, buffer);
        id
    }

    /// Takes a previously finished command buffer out of the pending table, if present.
    pub(crate) fn take_pending_command_buffer(&self, id: CommandBufferId) -> Option<wgpu::CommandBuffer> {
        self.internal
            .pending_command_buffers
            .lock()
            .expect("pending_command_buffers poisoned")
            .remove(&id)
    }

    fn generate_shader_id(&self) -> ShaderModuleId {
        ShaderModuleId(self.internal.next_shader_id.fetch_add(1, Ordering::Relaxed))
    }

    fn generate_buffer_id(&self) -> BufferId {
        BufferId(self.internal.next_buffer_id.fetch_add(1, Ordering::Relaxed))
    }

    fn generate_texture_id(&self) -> TextureId {
        TextureId(self.internal.next_texture_id.fetch_add(1, Ordering::Relaxed))
    }

    fn generate_texture_view_id(&self) -> TextureViewId {
        TextureViewId(self.internal.next_texture_view_id.fetch_add(1, Ordering::Relaxed))
    }

    fn generate_sampler_id(&self) -> SamplerId {
        SamplerId(self.internal.next_sampler_id.fetch_add(1, Ordering::Relaxed))
    }

    fn generate_pipeline_layout_id(&self) -> PipelineLayoutId {
        PipelineLayoutId(
            self.internal
                .next_pipeline_layout_id
                .fetch_add(1, Ordering::Relaxed),
        )
    }

    fn generate_render_pipeline_id(&self) -> RenderPipelineId {
        RenderPipelineId(self.internal.next_pipeline_id.fetch_add(1, Ordering::Relaxed))
    }
}

impl GraphicsDevice for WgpuDevice {
    fn create_shader_module(
        &self,
        descriptor: &ShaderModuleDescriptor,
    ) -> Result<ShaderModuleId, ResourceError> {
        let ShaderSourceData::Wgsl(ref source) = descriptor.source;
        let module = self
            .internal
            .device
            .create_shader_module(wgpu::ShaderModuleDescriptor {
                label: descriptor.label,
                source: wgpu::ShaderSource::Wgsl(source.clone()),
            });
        let id = self.generate_shader_id();
        self.internal
            .shader_modules
            .lock()
            .expect("shader_modules poisoned")
            .insert(id, module);
        Ok(id)
    }

    fn destroy_shader_module(&self, id: ShaderModuleId) -> Result<(), ResourceError> {
        self.internal
            .shader_modules
            .lock()
            .expect("shader_modules poisoned")
            .remove(&id)
            .map(|_| ())
            .ok_or(ResourceError::NotFound)
    }

    fn create_render_pipeline(
        &self,
        descriptor: &RenderPipelineDescriptor,
    ) -> Result<RenderPipelineId, ResourceError> {
        let layouts = self
            .internal
            .pipeline_layouts
            .lock()
            .expect("pipeline_layouts poisoned");
        let shaders = self
            .internal
            .shader_modules
            .lock()
            .expect("shader_modules poisoned");

        let vertex_module = shaders.get(&descriptor.vertex_shader_module).ok_or_else(|| {
            ResourceError::Pipeline(PipelineError::InvalidShaderModuleForPipeline {
                id: descriptor.vertex_shader_module,
                pipeline_label: descriptor.label.clone().map(|c| c.into_owned()),
            })
        })?;

        let fragment = match descriptor.fragment_shader_module {
            Some(id) => {
                let entry_point = descriptor.fragment_entry_point.as_deref().ok_or_else(|| {
                    ResourceError::Pipeline(PipelineError::MissingEntryPointForFragmentShader {
                        pipeline_label: descriptor.label.clone().map(|c| c.into_owned()),
                        shader_id: id,
                    })
                })?;
                let module = shaders.get(&id).ok_or_else(|| {
                    ResourceError::Pipeline(PipelineError::InvalidShaderModuleForPipeline {
                        id,
                        pipeline_label: descriptor.label.clone().map(|c| c.into_owned()),
                    })
                })?;
                Some((module, entry_point))
            }
            None => None,
        };

        let pipeline = self
            .internal
            .device
            .create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: descriptor.label.as_deref(),
                layout: None,
                vertex: wgpu::VertexState {
                    module: vertex_module,
                    entry_point: &descriptor.vertex_entry_point,
                    buffers: &[],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                fragment: fragment.map(|(module, entry_point)| wgpu::FragmentState {
                    module,
                    entry_point,
                    targets: &[],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                primitive: wgpu::PrimitiveState::default(),
                depth_stencil: None,
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
            });

        drop(shaders);
        drop(layouts);

        let id = self.generate_render_pipeline_id();
        self.internal
            .render_pipelines
            .lock()
            .expect("render_pipelines poisoned")
            .insert(id, Arc::new(pipeline));
        Ok(id)
    }

    fn create_pipeline_layout(
        &self,
        descriptor: &PipelineLayoutDescriptor,
    ) -> Result<PipelineLayoutId, ResourceError> {
        let layout = self
            .internal
            .device
            .create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: descriptor.label.as_deref(),
                bind_group_layouts: &[],
                push_constant_ranges: &[],
            });
        let id = self.generate_pipeline_layout_id();
        self.internal
            .pipeline_layouts
            .lock()
            .expect("pipeline_layouts poisoned")
            .insert(id, layout);
        Ok(id)
    }

    fn destroy_render_pipeline(&self, id: RenderPipelineId) -> Result<(), ResourceError> {
        self.internal
            .render_pipelines
            .lock()
            .expect("render_pipelines poisoned")
            .remove(&id)
            .map(|_| ())
            .ok_or(ResourceError::NotFound)
    }

    fn create_buffer(&self, descriptor: &BufferDescriptor) -> Result<BufferId, ResourceError> {
        let buffer = self.internal.device.create_buffer(&wgpu::BufferDescriptor {
            label: descriptor.label.as_deref(),
            size: descriptor.size,
            usage: crate::conversions::buffer_usage_to_wgpu(descriptor.usage),
            mapped_at_creation: descriptor.mapped_at_creation,
        });
        let id = self.generate_buffer_id();
        self.internal.buffers.lock().expect("buffers poisoned").insert(
            id,
            BufferEntry {
                buffer: Arc::new(buffer),
                size: descriptor.size,
            },
        );
        Ok(id)
    }

    fn create_buffer_with_data(
        &self,
        descriptor: &BufferDescriptor,
        data: &[u8],
    ) -> Result<BufferId, ResourceError> {
        let buffer = self
            .internal
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: descriptor.label.as_deref(),
                contents: data,
                usage: crate::conversions::buffer_usage_to_wgpu(descriptor.usage),
            });
        let id = self.generate_buffer_id();
        self.internal.buffers.lock().expect("buffers poisoned").insert(
            id,
            BufferEntry {
                buffer: Arc::new(buffer),
                size: data.len() as u64,
            },
        );
        Ok(id)
    }

    fn destroy_buffer(&self, id: BufferId) -> Result<(), ResourceError> {
        self.internal
            .buffers
            .lock()
            .expect("buffers poisoned")
            .remove(&id)
            .map(|_| ())
            .ok_or(ResourceError::NotFound)
    }

    fn write_buffer(&self, id: BufferId, offset: u64, data: &[u8]) -> Result<(), ResourceError> {
        let buffers = self.internal.buffers.lock().expect("buffers poisoned");
        let entry = buffers.get(&id).ok_or(ResourceError::NotFound)?;
        if offset + data.len() as u64 > entry.size {
            return Err(ResourceError::OutOfBounds);
        }
        self.internal.queue.write_buffer(entry.buffer.as_ref(), offset, data);
        Ok(())
    }

    fn write_buffer_async<'a>(
        &'a self,
        id: BufferId,
        offset: u64,
        data: &'a [u8],
    ) -> Box<dyn std::future::Future<Output = Result<(), ResourceError>> + Send + 'static> {
        let result = self.write_buffer(id, offset, data);
        Box::new(std::future::ready(result))
    }

    fn create_texture(&self, descriptor: &TextureDescriptor) -> Result<TextureId, ResourceError> {
        let texture = self.internal.device.create_texture(&wgpu::TextureDescriptor {
            label: descriptor.label.as_deref(),
            size: wgpu::Extent3d {
                width: descriptor.size.width,
                height: descriptor.size.height,
                depth_or_array_layers: descriptor.size.depth_or_array_layers,
            },
            mip_level_count: descriptor.mip_level_count,
            sample_count: sample_count_to_u32(descriptor.sample_count),
            dimension: match descriptor.dimension {
                lumen_core::renderer::api::texture::TextureDimension::D1 => wgpu::TextureDimension::D1,
                lumen_core::renderer::api::texture::TextureDimension::D2 => wgpu::TextureDimension::D2,
                lumen_core::renderer::api::texture::TextureDimension::D3 => wgpu::TextureDimension::D3,
            },
            format: texture_format_to_wgpu(descriptor.format),
            usage: texture_usage_to_wgpu(descriptor.usage),
            view_formats: &[],
        });
        let id = self.generate_texture_id();
        self.internal
            .textures
            .lock()
            .expect("textures poisoned")
            .insert(id, Arc::new(texture));
        Ok(id)
    }

    fn destroy_texture(&self, id: TextureId) -> Result<(), ResourceError> {
        self.internal
            .textures
            .lock()
            .expect("textures poisoned")
            .remove(&id)
            .map(|_| ())
            .ok_or(ResourceError::NotFound)
    }

    fn write_texture(
        &self,
        texture_id: TextureId,
        data: &[u8],
        bytes_per_row: Option<u32>,
        offset: lumen_core::math::dimension::Origin3D,
        size: lumen_core::math::dimension::Extent3D,
    ) -> Result<(), ResourceError> {
        let textures = self.internal.textures.lock().expect("textures poisoned");
        let texture = textures.get(&texture_id).ok_or(ResourceError::NotFound)?;
        self.internal.queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: texture.as_ref(),
                mip_level: 0,
                origin: wgpu::Origin3d {
                    x: offset.x,
                    y: offset.y,
                    z: offset.z,
                },
                aspect: wgpu::TextureAspect::All,
            },
            data,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row,
                rows_per_image: None,
            },
            wgpu::Extent3d {
                width: size.width,
                height: size.height,
                depth_or_array_layers: size.depth_or_array_layers,
            },
        );
        Ok(())
    }

    fn create_texture_view(
        &self,
        texture_id: TextureId,
        descriptor: &TextureViewDescriptor,
    ) -> Result<TextureViewId, ResourceError> {
        let textures = self.internal.textures.lock().expect("textures poisoned");
        let texture = textures.get(&texture_id).ok_or(ResourceError::NotFound)?;
        let view = texture.create_view(&wgpu::TextureViewDescriptor {
            label: descriptor.label.as_deref(),
            format: descriptor.format.map(texture_format_to_wgpu),
            base_mip_level: descriptor.base_mip_level,
            mip_level_count: descriptor.mip_level_count,
            base_array_layer: descriptor.base_array_layer,
            array_layer_count: descriptor.array_layer_count,
            ..Default::default()
        });
        drop(textures);
        let id = self.generate_texture_view_id();
        self.internal
            .texture_views
            .lock()
            .expect("texture_views poisoned")
            .insert(id, Arc::new(view));
        Ok(id)
    }

    fn destroy_texture_view(&self, id: TextureViewId) -> Result<(), ResourceError> {
        self.internal
            .texture_views
            .lock()
            .expect("texture_views poisoned")
            .remove(&id)
            .map(|_| ())
            .ok_or(ResourceError::NotFound)
    }

    fn create_sampler(&self, descriptor: &SamplerDescriptor) -> Result<SamplerId, ResourceError> {
        let sampler = self
            .internal
            .device
            .create_sampler(&wgpu::SamplerDescriptor {
                label: descriptor.label.as_deref(),
                ..Default::default()
            });
        let id = self.generate_sampler_id();
        self.internal
            .samplers
            .lock()
            .expect("samplers poisoned")
            .insert(id, sampler);
        Ok(id)
    }

    fn destroy_sampler(&self, id: SamplerId) -> Result<(), ResourceError> {
        self.internal
            .samplers
            .lock()
            .expect("samplers poisoned")
            .remove(&id)
            .map(|_| ())
            .ok_or(ResourceError::NotFound)
    }

    fn create_command_encoder(&self, label: Option<&str>) -> Box<dyn CommandEncoderTrait> {
        let encoder = self
            .internal
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label });
        Box::new(crate::recorder::WgpuCommandEncoder::new(self.clone(), encoder))
    }

    fn submit_command_buffer(&self, command_buffer: CommandBufferId) {
        match self.take_pending_command_buffer(command_buffer) {
            Some(buffer) => {
                self.internal.queue.submit(std::iter::once(buffer));
            }
            None => log::warn!("submit_command_buffer: CommandBufferId {command_buffer:?} not found"),
        }
    }

    fn get_surface_format(&self) -> Option<lumen_core::renderer::api::TextureFormat> {
        *self.internal.surface_format.lock().expect("surface_format poisoned")
    }

    fn get_adapter_info(&self) -> RendererAdapterInfo {
        self.internal.adapter_info.clone()
    }

    fn supports_feature(&self, feature_name: &str) -> bool {
        matches!(feature_name, "compute" | "hot_reload_shaders")
    }
}

fn sample_count_to_u32(count: lumen_core::renderer::SampleCount) -> u32 {
    use lumen_core::renderer::SampleCount::*;
    match count {
        X1 => 1,
        X2 => 2,
        X4 => 4,
        X8 => 8,
        X16 => 16,
        X32 => 32,
        X64 => 64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_count_converts_to_expected_power_of_two() {
        assert_eq!(sample_count_to_u32(lumen_core::renderer::SampleCount::X4), 4);
    }
}
