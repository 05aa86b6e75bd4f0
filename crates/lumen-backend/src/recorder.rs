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

//! A `wgpu`-backed implementation of the immediate-mode [`CommandEncoderTrait`].
//!
//! This is the direct-use path exposed through [`crate::device::WgpuDevice`]; the
//! triple-buffered frame pipeline instead drives `wgpu::CommandEncoder` straight
//! from a decoded opcode stream in [`crate::backend::Backend::process_frame`].

use std::any::Any;
use std::ops::Range;

use lumen_core::renderer::api::command::{CommandBufferId, ComputePassDescriptor, RenderPassDescriptor};
use lumen_core::renderer::api::{BufferId, IndexFormat, RenderPipelineId};
use lumen_core::renderer::traits::{
    CommandEncoder as CommandEncoderTrait, ComputePass, GpuProfiler, RenderPass,
};

use crate::conversions::{color_load_op_to_wgpu, scalar_load_op_to_wgpu, stencil_load_op_to_wgpu, store_op_to_wgpu};
use crate::device::WgpuDevice;

fn index_format_to_wgpu(format: IndexFormat) -> wgpu::IndexFormat {
    match format {
        IndexFormat::Uint16 => wgpu::IndexFormat::Uint16,
        IndexFormat::Uint32 => wgpu::IndexFormat::Uint32,
    }
}

pub(crate) struct WgpuRenderPass<'a> {
    pass: wgpu::RenderPass<'a>,
    device: &'a WgpuDevice,
}

impl<'pass> RenderPass<'pass> for WgpuRenderPass<'pass> {
    fn set_pipeline(&mut self, pipeline: &'pass RenderPipelineId) {
        match self.device.get_render_pipeline(*pipeline) {
            Some(pipeline) => self.pass.set_pipeline(&pipeline),
            None => log::warn!("WgpuRenderPass: RenderPipelineId {pipeline:?} not found"),
        }
    }

    fn set_vertex_buffer(&mut self, slot: u32, buffer: &'pass BufferId, offset: u64) {
        match self.device.get_buffer(*buffer) {
            Some(buffer) => self.pass.set_vertex_buffer(slot, buffer.slice(offset..)),
            None => log::warn!("WgpuRenderPass: vertex BufferId {buffer:?} not found"),
        }
    }

    fn set_index_buffer(&mut self, buffer: &'pass BufferId, offset: u64, index_format: IndexFormat) {
        match self.device.get_buffer(*buffer) {
            Some(buffer) => self
                .pass
                .set_index_buffer(buffer.slice(offset..), index_format_to_wgpu(index_format)),
            None => log::warn!("WgpuRenderPass: index BufferId {buffer:?} not found"),
        }
    }

    fn draw(&mut self, vertices: Range<u32>, instances: Range<u32>) {
        self.pass.draw(vertices, instances);
    }

    fn draw_indexed(&mut self, indices: Range<u32>, base_vertex: i32, instances: Range<u32>) {
        self.pass.draw_indexed(indices, base_vertex, instances);
    }
}

pub(crate) struct WgpuComputePass<'a> {
    #[allow(dead_code)]
    pass: wgpu::ComputePass<'a>,
}

impl<'pass> ComputePass<'pass> for WgpuComputePass<'pass> {}

/// Records commands against a single `wgpu::CommandEncoder` until [`finish`] is called.
///
/// [`finish`]: CommandEncoderTrait::finish
pub struct WgpuCommandEncoder {
    device: WgpuDevice,
    encoder: Option<wgpu::CommandEncoder>,
}

impl WgpuCommandEncoder {
    pub(crate) fn new(device: WgpuDevice, encoder: wgpu::CommandEncoder) -> Self {
        Self {
            device,
            encoder: Some(encoder),
        }
    }
}

impl CommandEncoderTrait for WgpuCommandEncoder {
    fn begin_render_pass<'encoder>(
        &'encoder mut self,
        descriptor: &RenderPassDescriptor<'encoder>,
    ) -> Box<dyn RenderPass<'encoder> + 'encoder> {
        // Resolve views up front so they outlive the descriptor built below.
        let mut views: Vec<wgpu::TextureView> = Vec::new();
        let mut resolve_targets: Vec<Option<wgpu::TextureView>> = Vec::new();
        for attachment in descriptor.color_attachments.iter() {
            let Some(view) = self.device.get_texture_view(*attachment.view) else {
                log::warn!("WgpuCommandEncoder: color attachment TextureViewId {:?} not found", attachment.view);
                continue;
            };
            views.push((*view).clone());
            let resolve_target = attachment
                .resolve_target
                .and_then(|id| self.device.get_texture_view(*id))
                .map(|view| (*view).clone());
            resolve_targets.push(resolve_target);
        }

        let color_attachments: Vec<Option<wgpu::RenderPassColorAttachment>> = descriptor
            .color_attachments
            .iter()
            .enumerate()
            .map(|(i, attachment)| {
                Some(wgpu::RenderPassColorAttachment {
                    view: &views[i],
                    resolve_target: resolve_targets[i].as_ref(),
                    ops: wgpu::Operations {
                        load: color_load_op_to_wgpu(attachment.ops.load.clone()),
                        store: store_op_to_wgpu(attachment.ops.store.clone()),
                    },
                })
            })
            .collect();

        let depth_view: Option<wgpu::TextureView> = descriptor
            .depth_stencil_attachment
            .as_ref()
            .and_then(|ds| self.device.get_texture_view(*ds.view))
            .map(|view| (*view).clone());

        let depth_stencil_attachment = match (&descriptor.depth_stencil_attachment, &depth_view) {
            (Some(ds), Some(view)) => Some(wgpu::RenderPassDepthStencilAttachment {
                view,
                depth_ops: ds.depth_ops.as_ref().map(|ops| wgpu::Operations {
                    load: scalar_load_op_to_wgpu(ops.load.clone()),
                    store: store_op_to_wgpu(ops.store.clone()),
                }),
                stencil_ops: ds.stencil_ops.as_ref().map(|ops| wgpu::Operations {
                    load: stencil_load_op_to_wgpu(ops.load.clone()),
                    store: store_op_to_wgpu(ops.store.clone()),
                }),
            }),
            _ => None,
        };

        let pass = self
            .encoder
            .as_mut()
            .expect("encoder already finished")
            .begin_render_pass(&wgpu::RenderPassDescriptor {
                label: descriptor.label,
                color_attachments: &color_attachments,
                depth_stencil_attachment,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
        Box::new(WgpuRenderPass {
            pass,
            device: &self.device,
        })
    }

    fn begin_compute_pass<'encoder>(
        &'encoder mut self,
        descriptor: &ComputePassDescriptor<'encoder>,
    ) -> Box<dyn ComputePass<'encoder> + 'encoder> {
        let pass = self
            .encoder
            .as_mut()
            .expect("encoder already finished")
            .begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: descriptor.label,
                timestamp_writes: None,
            });
        Box::new(WgpuComputePass { pass })
    }

    fn begin_profiler_compute_pass<'encoder>(
        &'encoder mut self,
        label: Option<&str>,
        _profiler: &'encoder dyn GpuProfiler,
        pass_index: u32,
    ) -> Box<dyn ComputePass<'encoder> + 'encoder> {
        log::trace!("profiler compute pass #{pass_index} ({label:?}) has no timestamp query support in this backend");
        self.begin_compute_pass(&ComputePassDescriptor { label, timestamp_writes: None })
    }

    fn copy_buffer_to_buffer(
        &mut self,
        source: &BufferId,
        source_offset: u64,
        destination: &BufferId,
        destination_offset: u64,
        size: u64,
    ) {
        let (Some(source), Some(destination)) =
            (self.device.get_buffer(*source), self.device.get_buffer(*destination))
        else {
            log::warn!("copy_buffer_to_buffer: unresolved source or destination buffer");
            return;
        };
        self.encoder.as_mut().expect("encoder already finished").copy_buffer_to_buffer(
            &source,
            source_offset,
            &destination,
            destination_offset,
            size,
        );
    }

    fn finish(mut self: Box<Self>) -> CommandBufferId {
        let encoder = self.encoder.take().expect("encoder already finished");
        let buffer = encoder.finish();
        self.device.register_finished_command_buffer(buffer)
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
