// src/app.rs

use std::sync::Arc;

use anyhow::Context;
use winit::{event::WindowEvent, window::Window};

use golden_poly::config::ViewerConfig;
use golden_poly::rendering_lib::WgpuBackend;
use golden_poly::{Color, GraphicsBackend, Polygon};

use crate::demo_scene::create_demo_shapes;
use crate::ui::{build_ui, UiState};

pub struct ShapeApp {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    size: winit::dpi::PhysicalSize<u32>,
    scale_factor: f64,
    backend: WgpuBackend,
    polygons: Vec<Polygon<WgpuBackend>>,
    clear_color: Color,
    ui_state: UiState,
    egui_ctx: egui::Context,
    egui_state: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl ShapeApp {
    pub async fn new(window: Arc<Window>, viewer: &ViewerConfig) -> anyhow::Result<Self> {
        let size = window.inner_size();
        let scale_factor = window.scale_factor();
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::default());
        let surface = instance
            .create_surface(window.clone())
            .context("creating window surface")?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no GPU adapter compatible with the window surface")?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    label: None,
                },
                None,
            )
            .await
            .context("requesting GPU device")?;
        let device = Arc::new(device);
        let queue = Arc::new(queue);

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .context("surface reports no texture formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes.first().copied().unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let mut backend = WgpuBackend::new(
            device.clone(),
            queue.clone(),
            config.format,
            logical_viewport(size, scale_factor),
        );

        let shapes = create_demo_shapes();
        let mut polygons = Vec::with_capacity(shapes.len());
        for shape in &shapes {
            let points = shape
                .spec
                .points()
                .with_context(|| format!("generating {}", shape.spec.name()))?;
            polygons.push(Polygon::new(&mut backend, points, Some(shape.color))?);
        }
        log::info!("uploaded {} demo shapes", polygons.len());

        let ui_state = UiState {
            outline: viewer.outline,
            shapes: shapes.iter().map(|s| (s.label, true)).collect(),
        };

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(), egui::ViewportId::ROOT, &window,
            Some(scale_factor as f32),
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, config.format, None, 1);

        Ok(Self {
            surface, device, queue, config, size, scale_factor,
            backend, polygons,
            clear_color: viewer.clear_color,
            ui_state,
            egui_ctx, egui_state, egui_renderer,
        })
    }

    pub fn size(&self) -> winit::dpi::PhysicalSize<u32> {
        self.size
    }

    pub fn resize(&mut self, new_size: winit::dpi::PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        self.scale_factor = scale_factor;
    }

    pub fn render(&mut self, window: &Window) -> Result<(), wgpu::SurfaceError> {
        let output_texture = self.surface.get_current_texture()?;

        let raw_input = self.egui_state.take_egui_input(window);
        let ui_state = &mut self.ui_state;
        let full_output = self.egui_ctx.run(raw_input, |ctx| build_ui(ctx, ui_state));
        self.egui_state.handle_platform_output(window, full_output.platform_output);

        for (polygon, (_, visible)) in self.polygons.iter_mut().zip(&self.ui_state.shapes) {
            if *visible {
                polygon.show();
            } else {
                polygon.hide();
            }
        }

        self.backend.begin_frame(&output_texture.texture, logical_viewport(self.size, self.scale_factor));
        self.backend.clear(self.clear_color);
        let program = self.backend.program().clone();
        self.backend.use_program(&program);
        for polygon in &self.polygons {
            polygon.render(&mut self.backend, &program, self.ui_state.outline, None);
        }
        self.backend.end_frame();

        let view = output_texture.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("GUI Command Encoder"),
        });
        let tris = self.egui_ctx.tessellate(full_output.shapes, self.egui_ctx.pixels_per_point());
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer.update_texture(&self.device, &self.queue, *id, image_delta);
        }
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: window.scale_factor() as f32,
        };
        self.egui_renderer.update_buffers(&self.device, &self.queue, &mut encoder, &tris, &screen_descriptor);
        {
            let mut gui_render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("GUI Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view, resolve_target: None,
                    ops: wgpu::Operations { load: wgpu::LoadOp::Load, store: wgpu::StoreOp::Store },
                })],
                depth_stencil_attachment: None, occlusion_query_set: None, timestamp_writes: None,
            });
            self.egui_renderer.render(&mut gui_render_pass, &tris, &screen_descriptor);
        }
        for tex_id in &full_output.textures_delta.free { self.egui_renderer.free_texture(tex_id); }

        self.queue.submit(std::iter::once(encoder.finish()));
        output_texture.present();
        Ok(())
    }

    pub fn handle_window_event(&mut self, event: &WindowEvent, window: &Window) -> egui_winit::EventResponse {
        self.egui_state.on_window_event(window, event)
    }

    /// Releases every polygon buffer. Safe to call more than once.
    pub fn shutdown(&mut self) {
        for polygon in &mut self.polygons {
            if !polygon.is_destroyed() {
                polygon.destroy(&mut self.backend);
            }
        }
    }
}

impl Drop for ShapeApp {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn logical_viewport(size: winit::dpi::PhysicalSize<u32>, scale_factor: f64) -> [f32; 2] {
    let logical = size.to_logical::<f32>(scale_factor);
    [logical.width, logical.height]
}
