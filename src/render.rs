use crate::constants::{CLEAR_COLOR, KEY_LIGHT_WORLD};
use glam::Vec3;
use lookback_core::{pack_instances, BodyModels, Camera, FrameVisuals};
use web_sys as web;

mod bodies;
mod starfield;

use bodies::{create_bodies_resources, BodiesResources, BodyUniforms};
use starfield::{create_starfield_resources, StarfieldResources, StarfieldUniforms};

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    starfield: StarfieldResources,
    bodies: BodiesResources,
    width: u32,
    height: u32,
    clear_color: wgpu::Color,
    time_accum: f32,
    story_depth: f32,
}

impl GpuState {
    pub async fn new(canvas: &web::HtmlCanvasElement, models: &BodyModels) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        // The surface holds its own handle to the canvas
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    // Use default limits on web to avoid passing unknown fields to older WebGPU impls
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let starfield = create_starfield_resources(&device, format);
        let bodies = create_bodies_resources(&device, format, models.max_instances());
        log::info!("[gpu] ready {}x{} format={:?}", width, height, format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            starfield,
            bodies,
            width,
            height,
            clear_color: wgpu::Color {
                r: CLEAR_COLOR[0],
                g: CLEAR_COLOR[1],
                b: CLEAR_COLOR[2],
                a: 1.0,
            },
            time_accum: 0.0,
            story_depth: 0.0,
        })
    }

    /// How far into the story we are, 0..1. Tints the sky.
    pub fn set_story_depth(&mut self, depth01: f32) {
        self.story_depth = depth01.clamp(0.0, 1.0);
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    pub fn render(
        &mut self,
        dt_sec: f32,
        visuals: &FrameVisuals,
        models: &BodyModels,
    ) -> Result<(), wgpu::SurfaceError> {
        self.time_accum += dt_sec.max(0.0);

        let aspect = self.width as f32 / self.height.max(1) as f32;
        let camera = Camera::from_pose(visuals.camera, aspect);
        let view_m = camera.view_matrix();
        let proj_m = camera.projection_matrix();

        let (yaw, pitch) = visuals.camera.heading();
        let star_u = StarfieldUniforms {
            resolution: [self.width as f32, self.height as f32],
            time: self.time_accum,
            depth: self.story_depth,
            heading: [yaw, pitch, 0.0, 0.0],
        };
        self.queue
            .write_buffer(&self.starfield.uniform_buffer, 0, bytemuck::bytes_of(&star_u));

        let instances = pack_instances(visuals, models, view_m);
        let body_u = BodyUniforms::new(view_m, proj_m, Vec3::from(KEY_LIGHT_WORLD));
        self.bodies.write(&self.queue, &body_u, &instances);

        let frame = match self.surface.get_current_texture() {
            Ok(f) => f,
            Err(e) => {
                // skip this frame; the next one acquires from the fresh config
                if matches!(e, wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) {
                    self.reconfigure();
                }
                return Err(e);
            }
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.starfield.draw(&mut rpass);
            self.bodies.draw(&mut rpass);
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
