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

//! Conversions between the API-agnostic renderer types and `wgpu`'s own types.

use lumen_core::math::LinearRgba;
use lumen_core::renderer::api::buffer::BufferUsage;
use lumen_core::renderer::api::command::{LoadOp, StoreOp};
use lumen_core::renderer::api::texture::TextureUsage;
use lumen_core::renderer::api::util::enums::{GraphicsBackendType, RendererDeviceType};
use lumen_core::renderer::api::TextureFormat;

pub(crate) fn backend_type_from_wgpu(backend: wgpu::Backend) -> GraphicsBackendType {
    match backend {
        wgpu::Backend::Vulkan => GraphicsBackendType::Vulkan,
        wgpu::Backend::Metal => GraphicsBackendType::Metal,
        wgpu::Backend::Dx12 => GraphicsBackendType::Dx12,
        wgpu::Backend::Gl => GraphicsBackendType::OpenGL,
        wgpu::Backend::BrowserWebGpu => GraphicsBackendType::WebGpu,
        wgpu::Backend::Empty => GraphicsBackendType::Unknown,
    }
}

pub(crate) fn device_type_from_wgpu(device_type: wgpu::DeviceType) -> RendererDeviceType {
    match device_type {
        wgpu::DeviceType::IntegratedGpu => RendererDeviceType::IntegratedGpu,
        wgpu::DeviceType::DiscreteGpu => RendererDeviceType::DiscreteGpu,
        wgpu::DeviceType::VirtualGpu => RendererDeviceType::VirtualGpu,
        wgpu::DeviceType::Cpu => RendererDeviceType::Cpu,
        wgpu::DeviceType::Other => RendererDeviceType::Unknown,
    }
}

pub(crate) fn linear_rgba_to_wgpu_color(color: LinearRgba) -> wgpu::Color {
    wgpu::Color {
        r: color.r as f64,
        g: color.g as f64,
        b: color.b as f64,
        a: color.a as f64,
    }
}

pub(crate) fn color_load_op_to_wgpu(op: LoadOp<LinearRgba>) -> wgpu::LoadOp<wgpu::Color> {
    match op {
        LoadOp::Load => wgpu::LoadOp::Load,
        LoadOp::Clear(color) => wgpu::LoadOp::Clear(linear_rgba_to_wgpu_color(color)),
    }
}

pub(crate) fn scalar_load_op_to_wgpu(op: LoadOp<f32>) -> wgpu::LoadOp<f32> {
    match op {
        LoadOp::Load => wgpu::LoadOp::Load,
        LoadOp::Clear(value) => wgpu::LoadOp::Clear(value),
    }
}

pub(crate) fn stencil_load_op_to_wgpu(op: LoadOp<u32>) -> wgpu::LoadOp<u32> {
    match op {
        LoadOp::Load => wgpu::LoadOp::Load,
        LoadOp::Clear(value) => wgpu::LoadOp::Clear(value),
    }
}

pub(crate) fn store_op_to_wgpu(op: StoreOp) -> wgpu::StoreOp {
    match op {
        StoreOp::Store => wgpu::StoreOp::Store,
        StoreOp::Discard => wgpu::StoreOp::Discard,
    }
}

pub(crate) fn buffer_usage_to_wgpu(usage: BufferUsage) -> wgpu::BufferUsages {
    let mut flags = wgpu::BufferUsages::empty();
    if usage.contains(BufferUsage::MAP_READ) {
        flags |= wgpu::BufferUsages::MAP_READ;
    }
    if usage.contains(BufferUsage::MAP_WRITE) {
        flags |= wgpu::BufferUsages::MAP_WRITE;
    }
    if usage.contains(BufferUsage::COPY_SRC) {
        flags |= wgpu::BufferUsages::COPY_SRC;
    }
    if usage.contains(BufferUsage::COPY_DST) {
        flags |= wgpu::BufferUsages::COPY_DST;
    }
    if usage.contains(BufferUsage::VERTEX) {
        flags |= wgpu::BufferUsages::VERTEX;
    }
    if usage.contains(BufferUsage::INDEX) {
        flags |= wgpu::BufferUsages::INDEX;
    }
    if usage.contains(BufferUsage::UNIFORM) {
        flags |= wgpu::BufferUsages::UNIFORM;
    }
    if usage.contains(BufferUsage::STORAGE) {
        flags |= wgpu::BufferUsages::STORAGE;
    }
    if usage.contains(BufferUsage::INDIRECT) {
        flags |= wgpu::BufferUsages::INDIRECT;
    }
    flags
}

/// A local extension trait converting engine-facing types into their `wgpu` counterparts.
pub trait IntoWgpu<T> {
    /// Consumes `self` and converts it into a `wgpu`-compatible type.
    fn into_wgpu(self) -> T;
}

pub(crate) fn texture_format_to_wgpu(format: TextureFormat) -> wgpu::TextureFormat {
    match format {
        TextureFormat::R8Unorm => wgpu::TextureFormat::R8Unorm,
        TextureFormat::Rg8Unorm => wgpu::TextureFormat::Rg8Unorm,
        TextureFormat::Rgba8Unorm => wgpu::TextureFormat::Rgba8Unorm,
        TextureFormat::Rgba8UnormSrgb => wgpu::TextureFormat::Rgba8UnormSrgb,
        TextureFormat::Bgra8UnormSrgb => wgpu::TextureFormat::Bgra8UnormSrgb,
        TextureFormat::R16Float => wgpu::TextureFormat::R16Float,
        TextureFormat::Rg16Float => wgpu::TextureFormat::Rg16Float,
        TextureFormat::Rgba16Float => wgpu::TextureFormat::Rgba16Float,
        TextureFormat::R32Float => wgpu::TextureFormat::R32Float,
        TextureFormat::Rg32Float => wgpu::TextureFormat::Rg32Float,
        TextureFormat::Rgba32Float => wgpu::TextureFormat::Rgba32Float,
        TextureFormat::Depth16Unorm => wgpu::TextureFormat::Depth16Unorm,
        TextureFormat::Depth24Plus => wgpu::TextureFormat::Depth24Plus,
        TextureFormat::Depth24PlusStencil8 => wgpu::TextureFormat::Depth24PlusStencil8,
        TextureFormat::Depth32Float => wgpu::TextureFormat::Depth32Float,
        TextureFormat::Depth32FloatStencil8 => wgpu::TextureFormat::Depth32FloatStencil8,
    }
}

pub(crate) fn texture_format_from_wgpu(format: wgpu::TextureFormat) -> Option<TextureFormat> {
    Some(match format {
        wgpu::TextureFormat::R8Unorm => TextureFormat::R8Unorm,
        wgpu::TextureFormat::Rg8Unorm => TextureFormat::Rg8Unorm,
        wgpu::TextureFormat::Rgba8Unorm => TextureFormat::Rgba8Unorm,
        wgpu::TextureFormat::Rgba8UnormSrgb => TextureFormat::Rgba8UnormSrgb,
        wgpu::TextureFormat::Bgra8UnormSrgb => TextureFormat::Bgra8UnormSrgb,
        wgpu::TextureFormat::R16Float => TextureFormat::R16Float,
        wgpu::TextureFormat::Rg16Float => TextureFormat::Rg16Float,
        wgpu::TextureFormat::Rgba16Float => TextureFormat::Rgba16Float,
        wgpu::TextureFormat::R32Float => TextureFormat::R32Float,
        wgpu::TextureFormat::Rg32Float => TextureFormat::Rg32Float,
        wgpu::TextureFormat::Rgba32Float => TextureFormat::Rgba32Float,
        wgpu::TextureFormat::Depth16Unorm => TextureFormat::Depth16Unorm,
        wgpu::TextureFormat::Depth24Plus => TextureFormat::Depth24Plus,
        wgpu::TextureFormat::Depth24PlusStencil8 => TextureFormat::Depth24PlusStencil8,
        wgpu::TextureFormat::Depth32Float => TextureFormat::Depth32Float,
        wgpu::TextureFormat::Depth32FloatStencil8 => TextureFormat::Depth32FloatStencil8,
        _ => return None,
    })
}

pub(crate) fn texture_usage_to_wgpu(usage: TextureUsage) -> wgpu::TextureUsages {
    let mut flags = wgpu::TextureUsages::empty();
    if usage.contains(TextureUsage::COPY_SRC) {
        flags |= wgpu::TextureUsages::COPY_SRC;
    }
    if usage.contains(TextureUsage::COPY_DST) {
        flags |= wgpu::TextureUsages::COPY_DST;
    }
    if usage.contains(TextureUsage::TEXTURE_BINDING) {
        flags |= wgpu::TextureUsages::TEXTURE_BINDING;
    }
    if usage.contains(TextureUsage::STORAGE_BINDING) {
        flags |= wgpu::TextureUsages::STORAGE_BINDING;
    }
    if usage.contains(TextureUsage::RENDER_ATTACHMENT) || usage.contains(TextureUsage::DEPTH_STENCIL_ATTACHMENT) {
        flags |= wgpu::TextureUsages::RENDER_ATTACHMENT;
    }
    flags
}
