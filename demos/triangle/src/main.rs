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

//! Draws one hardcoded, vertex-colored triangle through the full stack: a
//! `winit` window, the triple-buffered frame pipeline, the wgpu backend, and
//! the opcode-stream command encoder.

mod window;

use anyhow::Result;
use lumen_core::graph::handle::{HandleRegistry, ResourceFlags, ResourceKind};
use lumen_core::graph::module::RenderModule;
use lumen_core::graph::pass::{QueueClass, RenderPass, ResourceUse};
use lumen_core::renderer::{
    ColorTargetStateDescriptor, ColorWrites, MultisampleStateDescriptor, PrimitiveStateDescriptor,
    RenderPipelineDescriptor, SampleCount, ShaderModuleDescriptor, ShaderSourceData,
    VertexAttributeDescriptor, VertexBufferLayoutDescriptor, VertexFormat, VertexStepMode,
};
use lumen_core::renderer::traits::{GraphicsDevice, RenderSystem};
use lumen_renderer::LumenRenderSystem;
use std::borrow::Cow;
use std::sync::Arc;
use window::DemoWindow;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::window::WindowId;

const TRIANGLE_SHADER: &str = r#"
struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) color: vec3<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec3<f32>,
};

@vertex
fn vs_main(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = vec4<f32>(in.position, 1.0);
    out.color = in.color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return vec4<f32>(in.color, 1.0);
}
"#;

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct Vertex {
    position: [f32; 3],
    color: [f32; 3],
}

const TRIANGLE_VERTICES: [Vertex; 3] = [
    Vertex { position: [0.0, 0.5, 0.0], color: [1.0, 0.0, 0.0] },
    Vertex { position: [-0.5, -0.5, 0.0], color: [0.0, 1.0, 0.0] },
    Vertex { position: [0.5, -0.5, 0.0], color: [0.0, 0.0, 1.0] },
];

/// The resources needed to record the demo's single render pass each frame.
struct TriangleScene {
    module: RenderModule,
}

impl TriangleScene {
    fn build(handles: &Arc<HandleRegistry>, renderer: &mut LumenRenderSystem) -> Result<Self> {
        let swapchain_image = renderer
            .backend_mut()
            .primary_swapchain_image()
            .ok_or_else(|| anyhow::anyhow!("no window bound to the renderer yet"))?;

        let device = renderer.backend_mut().device();
        let shader = device.create_shader_module(&ShaderModuleDescriptor {
            label: Some("triangle_shader"),
            source: ShaderSourceData::Wgsl(Cow::Borrowed(TRIANGLE_SHADER)),
        })?;

        let surface_format = device
            .get_surface_format()
            .ok_or_else(|| anyhow::anyhow!("backend has no surface format yet"))?;

        let vertex_layout = VertexBufferLayoutDescriptor {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: VertexStepMode::Vertex,
            attributes: Cow::Borrowed(&[
                VertexAttributeDescriptor { shader_location: 0, format: VertexFormat::Float32x3, offset: 0 },
                VertexAttributeDescriptor { shader_location: 1, format: VertexFormat::Float32x3, offset: 12 },
            ]),
        };

        let pipeline_id = device.create_render_pipeline(&RenderPipelineDescriptor {
            label: Some(Cow::Borrowed("triangle_pipeline")),
            vertex_shader_module: shader,
            vertex_entry_point: Cow::Borrowed("vs_main"),
            fragment_shader_module: Some(shader),
            fragment_entry_point: Some(Cow::Borrowed("fs_main")),
            vertex_buffers_layout: Cow::Borrowed(std::slice::from_ref(&vertex_layout)),
            primitive_state: PrimitiveStateDescriptor::default(),
            depth_stencil_state: None,
            color_target_states: Cow::Owned(vec![ColorTargetStateDescriptor {
                format: surface_format,
                blend: None,
                write_mask: ColorWrites::ALL,
            }]),
            multisample_state: MultisampleStateDescriptor {
                count: SampleCount::X1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
        })?;

        let pipeline_handle = handles.intern_resource(
            Some("triangle_pipeline"),
            ResourceKind::Pipeline,
            ResourceFlags::NONE,
            1,
            0,
            None,
        )?;
        renderer.backend_mut().register_pipeline(pipeline_handle, pipeline_id);

        let mut module = RenderModule::new();
        let vertex_bytes: Vec<u8> = bytemuck::cast_slice(&TRIANGLE_VERTICES).to_vec();
        module.add_pass(
            RenderPass::new(
                "triangle",
                QueueClass::Graphics,
                move || Some(vec![ResourceUse::write(swapchain_image)]),
                move |encoder, _uses| {
                    encoder.bind_pipeline(pipeline_handle);
                    encoder.set_vertex_data(0, &vertex_bytes);
                    encoder.draw(3, 1, 0);
                },
            )
            .as_root(),
        );

        Ok(Self { module })
    }
}

struct App {
    handles: Arc<HandleRegistry>,
    window: Option<DemoWindow>,
    renderer: Option<LumenRenderSystem>,
    scene: Option<TriangleScene>,
}

impl App {
    fn new() -> Self {
        Self {
            handles: Arc::new(HandleRegistry::new()),
            window: None,
            renderer: None,
            scene: None,
        }
    }

    fn redraw(&mut self) {
        let (Some(renderer), Some(scene)) = (self.renderer.as_mut(), self.scene.as_mut()) else {
            return;
        };
        if let Err(err) = renderer.update(&mut scene.module) {
            log::error!("frame update failed: {err}");
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        log::info!("triangle demo: creating window");
        let window = match DemoWindow::build(event_loop, "lumen triangle demo", 800, 600) {
            Ok(window) => window,
            Err(err) => {
                log::error!("failed to create window: {err}");
                event_loop.exit();
                return;
            }
        };

        let mut renderer = match LumenRenderSystem::new(Arc::clone(&self.handles)) {
            Ok(renderer) => renderer,
            Err(err) => {
                log::error!("failed to initialize renderer: {err}");
                event_loop.exit();
                return;
            }
        };

        if let Err(err) = renderer.setup_with_window(&window) {
            log::error!("failed to bind window surface: {err}");
            event_loop.exit();
            return;
        }

        let scene = match TriangleScene::build(&self.handles, &mut renderer) {
            Ok(scene) => scene,
            Err(err) => {
                log::error!("failed to build triangle scene: {err}");
                event_loop.exit();
                return;
            }
        };

        self.window = Some(window);
        self.renderer = Some(renderer);
        self.scene = Some(scene);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("close requested, shutting down");
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.shutdown();
                }
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(renderer) = self.renderer.as_mut() {
                    renderer.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let event_loop = EventLoop::new()?;
    let mut app = App::new();
    event_loop.run_app(&mut app)?;
    Ok(())
}
