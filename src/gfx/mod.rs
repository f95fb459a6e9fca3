//! gfx: the scene's rendering context and frame loop.
//!
//! One `Renderer` owns the GPU state and everything in the scene: the
//! background, the model (once it arrives), the lighting rig, and the
//! ember field. All mutation happens here, on the thread that drives the
//! event loop; background loads only ever hand owned results across a
//! channel.
//!
//! Files
//! - camera.rs: orbit camera and view/projection helpers
//! - types.rs: POD buffer structs and vertex layouts
//! - lights.rs: the two-stage lighting rig
//! - pipeline.rs: bind-group layouts + the three pipelines (WGSL lives in
//!   shader.wgsl / particles.wgsl next to it)
//! - util.rs: surface clamping and the depth attachment

mod camera;
pub mod lights;
mod pipeline;
pub mod types;
mod util;

pub use types::Vertex;

use anyhow::Context;
use camera::Camera;
use glam::Vec3;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Instant;

use wgpu::{
    SurfaceError, SurfaceTargetUnsafe,
    rwh::{HasDisplayHandle, HasWindowHandle},
    util::DeviceExt,
};
use winit::dpi::PhysicalSize;
use winit::window::Window;

use crate::assets::{CpuMesh, EnvironmentCpu, SpriteCpu, texture};
use crate::config::SceneConfig;
use crate::field::{self, Aabb, ParticleField};
use crate::loader::{AssetEvent, AssetLoader};
use lights::LightRig;
use types::{
    EnvParams, Globals, ModelUniform, ParticleInstance, ParticleMaterial, ParticleVertex,
};

/// Neutral stone albedo for the model; its own materials are not imported.
const MODEL_COLOR: [f32; 3] = [0.62, 0.60, 0.56];

struct ModelGpu {
    vb: wgpu::Buffer,
    ib: wgpu::Buffer,
    index_count: u32,
    bg: wgpu::BindGroup,
    _buf: wgpu::Buffer,
}

/// Renderer owns the GPU state and per-scene resources.
///
/// The platform shell owns a `Renderer` and calls `resize` and `render`
/// based on window events.
pub struct Renderer {
    // --- GPU & surface ---
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    max_dim: u32,
    depth: wgpu::TextureView,

    // --- Pipelines & layouts ---
    bg_pipeline: wgpu::RenderPipeline,
    model_pipeline: wgpu::RenderPipeline,
    particle_pipeline: wgpu::RenderPipeline,
    scene_bgl: wgpu::BindGroupLayout,
    model_bgl: wgpu::BindGroupLayout,
    particle_bgl: wgpu::BindGroupLayout,

    // --- Globals ---
    globals_buf: wgpu::Buffer,
    globals_bg: wgpu::BindGroup,

    // --- Scene group (lights + environment) ---
    rig: LightRig,
    lights_buf: wgpu::Buffer,
    env_params_buf: wgpu::Buffer,
    env_view: wgpu::TextureView,
    env_sampler: wgpu::Sampler,
    scene_bg: wgpu::BindGroup,

    // --- Particles ---
    field: ParticleField,
    quad_vb: wgpu::Buffer,
    instance_buf: wgpu::Buffer,
    particle_count: u32,
    particle_mat_buf: wgpu::Buffer,
    sprite_view: wgpu::TextureView,
    sprite_sampler: wgpu::Sampler,
    sprite_aspect: f32,
    particle_bg: wgpu::BindGroup,

    // --- Model (absent until its load completes) ---
    model: Option<ModelGpu>,

    // --- Scene state ---
    scene: SceneConfig,
    loader: AssetLoader,
    rng: ChaCha8Rng,
    start: Instant,
}

impl Renderer {
    /// Create a renderer bound to a window surface and start the asset
    /// loads. The particle field is generated here, before any asset can
    /// arrive, so the first frames show the unconstrained scatter.
    pub async fn new(window: &Window, scene: SceneConfig) -> anyhow::Result<Self> {
        // --- Surface ---
        let instance = wgpu::Instance::default();
        // Create a surface without borrowing `window` for its lifetime.
        let raw_display = window.display_handle()?.as_raw();
        let raw_window = window.window_handle()?.as_raw();
        let surface = unsafe {
            instance.create_surface_unsafe(SurfaceTargetUnsafe::RawHandle {
                raw_display_handle: raw_display,
                raw_window_handle: raw_window,
            })
        }
        .context("create wgpu surface (unsafe)")?;

        // --- Adapter / device ---
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                compatible_surface: Some(&surface),
                power_preference: wgpu::PowerPreference::HighPerformance,
                force_fallback_adapter: false,
            })
            .await
            .context("request adapter")?;
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("wgpu-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_defaults(),
                memory_hints: wgpu::MemoryHints::Performance,
                trace: wgpu::Trace::default(),
            })
            .await
            .context("request device")?;

        // --- Surface configuration (clamped to device limits) ---
        let size = window.inner_size();
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(caps.formats[0]);
        let present_mode = caps
            .present_modes
            .iter()
            .copied()
            .find(|m| *m == wgpu::PresentMode::Mailbox)
            .unwrap_or(wgpu::PresentMode::Fifo);
        let max_dim = device.limits().max_texture_dimension_2d.min(4096).max(1);
        let (w, h) = util::scale_to_max((size.width, size.height), max_dim);
        if (w, h) != (size.width, size.height) {
            log::warn!(
                "clamping surface from {}x{} to {}x{} (max_dim={})",
                size.width,
                size.height,
                w,
                h,
                max_dim
            );
        }
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: w,
            height: h,
            present_mode,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let depth = util::create_depth_view(&device, config.width, config.height);

        // --- Pipelines ---
        let scene_shader = pipeline::create_scene_shader(&device);
        let particle_shader = pipeline::create_particle_shader(&device);
        let globals_bgl = pipeline::create_globals_bgl(&device);
        let scene_bgl = pipeline::create_scene_bgl(&device);
        let model_bgl = pipeline::create_model_bgl(&device);
        let particle_bgl = pipeline::create_particle_bgl(&device);
        let bg_pipeline = pipeline::create_background_pipeline(
            &device,
            &scene_shader,
            &globals_bgl,
            &scene_bgl,
            config.format,
        );
        let model_pipeline = pipeline::create_model_pipeline(
            &device,
            &scene_shader,
            &globals_bgl,
            &scene_bgl,
            &model_bgl,
            config.format,
        );
        let particle_pipeline = pipeline::create_particle_pipeline(
            &device,
            &particle_shader,
            &globals_bgl,
            &particle_bgl,
            config.format,
        );

        // --- Globals ---
        let globals_init = Globals {
            view_proj: glam::Mat4::IDENTITY.to_cols_array_2d(),
            inv_view_proj: glam::Mat4::IDENTITY.to_cols_array_2d(),
            cam_right: [1.0, 0.0, 0.0, 0.0],
            cam_up: [0.0, 1.0, 0.0, 0.0],
            cam_pos: [0.0, 0.0, 0.0, 1.0],
            time_pad: [0.0; 4],
        };
        let globals_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("globals"),
            contents: bytemuck::bytes_of(&globals_init),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let globals_bg = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals-bg"),
            layout: &globals_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buf.as_entire_binding(),
            }],
        });

        // --- Scene group: startup rig + placeholder environment ---
        let rig = LightRig::startup();
        let lights_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("lights"),
            contents: bytemuck::bytes_of(&rig.to_uniform()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let env_params_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("env-params"),
            contents: bytemuck::bytes_of(&EnvParams { ambient: [0.0; 4] }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let env_view = upload_rgba8(&device, &queue, "env-placeholder", 1, 1, &[0, 0, 0, 255]);
        let env_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("env-sampler"),
            // Wrap around the seam in u, clamp at the poles in v.
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let scene_bg = create_scene_bind_group(
            &device,
            &scene_bgl,
            &lights_buf,
            &env_params_buf,
            &env_view,
            &env_sampler,
        );

        // --- Particle field (generated before any load completes) ---
        let mut rng = ChaCha8Rng::seed_from_u64(scene.seed);
        let fld = field::generate(scene.particle_count, scene.initial_spread, &mut rng);
        log::info!(
            "generated {} particles in ±{}",
            fld.len(),
            scene.initial_spread
        );

        let quad: [ParticleVertex; 4] = [
            ParticleVertex {
                corner: [-0.5, -0.5],
            },
            ParticleVertex { corner: [0.5, -0.5] },
            ParticleVertex { corner: [-0.5, 0.5] },
            ParticleVertex { corner: [0.5, 0.5] },
        ];
        let quad_vb = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("particle-quad-vb"),
            contents: bytemuck::cast_slice(&quad),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let instances = instances_from_field(&fld);
        let instance_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("particle-instances"),
            contents: bytemuck::cast_slice(&instances),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });
        let particle_mat_buf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("particle-material"),
            contents: bytemuck::bytes_of(&ParticleMaterial {
                size_opacity: [2.0, 0.85, 0.0, 0.0],
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        // Procedural sprite until (unless) the real one arrives.
        let fallback = texture::radial_fallback(64);
        let sprite_view = upload_rgba8(
            &device,
            &queue,
            "sprite-fallback",
            fallback.width,
            fallback.height,
            &fallback.pixels,
        );
        let sprite_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("sprite-sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let particle_bg = create_particle_bind_group(
            &device,
            &particle_bgl,
            &particle_mat_buf,
            &sprite_view,
            &sprite_sampler,
        );

        let loader = AssetLoader::spawn(&scene);
        let particle_count = fld.len() as u32;

        Ok(Self {
            surface,
            device,
            queue,
            config,
            max_dim,
            depth,
            bg_pipeline,
            model_pipeline,
            particle_pipeline,
            scene_bgl,
            model_bgl,
            particle_bgl,
            globals_buf,
            globals_bg,
            rig,
            lights_buf,
            env_params_buf,
            env_view,
            env_sampler,
            scene_bg,
            field: fld,
            quad_vb,
            instance_buf,
            particle_count,
            particle_mat_buf,
            sprite_view,
            sprite_sampler,
            sprite_aspect: 1.0,
            particle_bg,
            model: None,
            scene,
            loader,
            rng,
            start: Instant::now(),
        })
    }

    /// Resize the swapchain while preserving aspect and device limits.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        let (w, h) = util::scale_to_max((new_size.width, new_size.height), self.max_dim);
        if (w, h) != (new_size.width, new_size.height) {
            log::debug!(
                "resized {}x{} exceeds max {}, clamped to {}x{} (aspect kept)",
                new_size.width,
                new_size.height,
                self.max_dim,
                w,
                h
            );
        }
        self.config.width = w;
        self.config.height = h;
        self.surface.configure(&self.device, &self.config);
        self.depth = util::create_depth_view(&self.device, self.config.width, self.config.height);
    }

    /// Render one frame: absorb any finished loads, advance the orbit and
    /// flicker, then draw background, model, particles.
    pub fn render(&mut self) -> Result<(), SurfaceError> {
        for ev in self.loader.drain() {
            self.apply_asset_event(ev);
        }

        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        // Globals: orbiting camera + time.
        let t = self.start.elapsed().as_secs_f32();
        let aspect = self.config.width as f32 / self.config.height as f32;
        let cam = Camera::orbit(
            Vec3::ZERO,
            self.scene.camera_radius,
            self.scene.camera_height,
            t * self.scene.orbit_speed,
            aspect,
        );
        let view_proj = cam.view_proj();
        let (right, up) = cam.right_up();
        let globals = Globals {
            view_proj: view_proj.to_cols_array_2d(),
            inv_view_proj: view_proj.inverse().to_cols_array_2d(),
            cam_right: [right.x, right.y, right.z, 0.0],
            cam_up: [up.x, up.y, up.z, 0.0],
            cam_pos: [cam.eye.x, cam.eye.y, cam.eye.z, 1.0],
            time_pad: [t, 0.0, 0.0, 0.0],
        };
        self.queue
            .write_buffer(&self.globals_buf, 0, bytemuck::bytes_of(&globals));

        // Flicker: literal formulas, size scaled by the sprite aspect.
        let t_ms = t * 1000.0;
        let size = field::flicker_size(t_ms) * self.sprite_aspect;
        let opacity = field::flicker_opacity(&mut rand::rng());
        self.queue.write_buffer(
            &self.particle_mat_buf,
            0,
            bytemuck::bytes_of(&ParticleMaterial {
                size_opacity: [size, opacity, 0.0, 0.0],
            }),
        );

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("encoder") });
        {
            use wgpu::*;
            let mut rpass = encoder.begin_render_pass(&RenderPassDescriptor {
                label: Some("main-pass"),
                color_attachments: &[Some(RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: Operations {
                        load: LoadOp::Clear(Color::BLACK),
                        store: StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(RenderPassDepthStencilAttachment {
                    view: &self.depth,
                    depth_ops: Some(Operations {
                        load: LoadOp::Clear(1.0),
                        store: StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            // Background (gradient or panorama).
            rpass.set_pipeline(&self.bg_pipeline);
            rpass.set_bind_group(0, &self.globals_bg, &[]);
            rpass.set_bind_group(1, &self.scene_bg, &[]);
            rpass.draw(0..3, 0..1);

            // Model, once loaded.
            if let Some(model) = &self.model {
                rpass.set_pipeline(&self.model_pipeline);
                rpass.set_bind_group(0, &self.globals_bg, &[]);
                rpass.set_bind_group(1, &self.scene_bg, &[]);
                rpass.set_bind_group(2, &model.bg, &[]);
                rpass.set_vertex_buffer(0, model.vb.slice(..));
                rpass.set_index_buffer(model.ib.slice(..), IndexFormat::Uint16);
                rpass.draw_indexed(0..model.index_count, 0, 0..1);
            }

            // Ember field.
            rpass.set_pipeline(&self.particle_pipeline);
            rpass.set_bind_group(0, &self.globals_bg, &[]);
            rpass.set_bind_group(1, &self.particle_bg, &[]);
            rpass.set_vertex_buffer(0, self.quad_vb.slice(..));
            rpass.set_vertex_buffer(1, self.instance_buf.slice(..));
            rpass.draw(0..4, 0..self.particle_count);
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }

    /// Fold one completed load into the scene. Failures follow the scene's
    /// one error policy: log and leave the element absent.
    fn apply_asset_event(&mut self, ev: AssetEvent) {
        match ev {
            AssetEvent::Environment(Ok(env)) => self.install_environment(env),
            AssetEvent::Sprite(Ok(sprite)) => self.install_sprite(sprite),
            AssetEvent::Model(Ok(mesh)) => self.install_model(mesh),
            AssetEvent::Environment(Err(e)) => {
                log::warn!("environment load failed, continuing without it: {e:#}");
            }
            AssetEvent::Sprite(Err(e)) => {
                log::warn!("sprite load failed, continuing without it: {e:#}");
            }
            AssetEvent::Model(Err(e)) => {
                log::warn!("model load failed, continuing without it: {e:#}");
            }
        }
    }

    fn install_environment(&mut self, env: EnvironmentCpu) {
        log::info!(
            "environment map loaded: {}x{}, avg radiance ({:.3}, {:.3}, {:.3})",
            env.width,
            env.height,
            env.average[0],
            env.average[1],
            env.average[2]
        );
        self.env_view = upload_rgba8(
            &self.device,
            &self.queue,
            "environment",
            env.width,
            env.height,
            &env.pixels,
        );
        let [r, g, b] = env.average;
        self.queue.write_buffer(
            &self.env_params_buf,
            0,
            bytemuck::bytes_of(&EnvParams {
                ambient: [r, g, b, 1.0],
            }),
        );
        self.scene_bg = create_scene_bind_group(
            &self.device,
            &self.scene_bgl,
            &self.lights_buf,
            &self.env_params_buf,
            &self.env_view,
            &self.env_sampler,
        );
    }

    fn install_sprite(&mut self, sprite: SpriteCpu) {
        log::info!(
            "particle sprite loaded: {}x{} (aspect {:.2})",
            sprite.width,
            sprite.height,
            sprite.aspect()
        );
        self.sprite_aspect = sprite.aspect();
        self.sprite_view = upload_rgba8(
            &self.device,
            &self.queue,
            "sprite",
            sprite.width,
            sprite.height,
            &sprite.pixels,
        );
        self.particle_bg = create_particle_bind_group(
            &self.device,
            &self.particle_bgl,
            &self.particle_mat_buf,
            &self.sprite_view,
            &self.sprite_sampler,
        );
    }

    /// The one moment the field and the model meet: compute the placed
    /// model's world bounds, clear the embers out of them, and add the
    /// supplemental lights.
    fn install_model(&mut self, mesh: CpuMesh) {
        let Some(local) = Aabb::from_points(mesh.vertices.iter().map(|v| Vec3::from(v.pos)))
        else {
            log::warn!("model mesh has no vertices, skipping placement");
            return;
        };
        let matrix = self.scene.model_matrix();
        let volume = local.transformed(matrix).expanded(self.scene.volume_expand);
        log::info!(
            "model loaded: {} vertices, {} indices, exclusion volume {:?}..{:?}",
            mesh.vertices.len(),
            mesh.indices.len(),
            volume.min,
            volume.max
        );

        field::reposition(
            &mut self.field,
            &volume,
            self.scene.reposition_spread,
            self.scene.exclusion_margin,
            &mut self.rng,
        );
        let instances = instances_from_field(&self.field);
        self.queue
            .write_buffer(&self.instance_buf, 0, bytemuck::cast_slice(&instances));

        self.rig
            .add_model_rig(Vec3::from_array(self.scene.model_offset));
        self.queue
            .write_buffer(&self.lights_buf, 0, bytemuck::bytes_of(&self.rig.to_uniform()));

        let vb = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("model-vb"),
                contents: bytemuck::cast_slice(&mesh.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let ib = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("model-ib"),
                contents: bytemuck::cast_slice(&mesh.indices),
                usage: wgpu::BufferUsages::INDEX,
            });
        let uniform = ModelUniform {
            model: matrix.to_cols_array_2d(),
            color_emissive: [MODEL_COLOR[0], MODEL_COLOR[1], MODEL_COLOR[2], 0.0],
        };
        let buf = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("model-uniform"),
                contents: bytemuck::bytes_of(&uniform),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        let bg = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("model-bg"),
            layout: &self.model_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: buf.as_entire_binding(),
            }],
        });
        self.model = Some(ModelGpu {
            vb,
            ib,
            index_count: mesh.indices.len() as u32,
            bg,
            _buf: buf,
        });
    }
}

fn instances_from_field(field: &ParticleField) -> Vec<ParticleInstance> {
    (0..field.len())
        .map(|i| ParticleInstance {
            pos: [
                field.positions[i * 3],
                field.positions[i * 3 + 1],
                field.positions[i * 3 + 2],
            ],
            color: [
                field.colors[i * 3],
                field.colors[i * 3 + 1],
                field.colors[i * 3 + 2],
            ],
        })
        .collect()
}

fn upload_rgba8(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    label: &str,
    width: u32,
    height: u32,
    pixels: &[u8],
) -> wgpu::TextureView {
    let size = wgpu::Extent3d {
        width,
        height,
        depth_or_array_layers: 1,
    };
    let tex = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: wgpu::TextureFormat::Rgba8UnormSrgb,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &tex,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        pixels,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * width),
            rows_per_image: Some(height),
        },
        size,
    );
    tex.create_view(&wgpu::TextureViewDescriptor::default())
}

fn create_scene_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    lights_buf: &wgpu::Buffer,
    env_params_buf: &wgpu::Buffer,
    env_view: &wgpu::TextureView,
    env_sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("scene-bg"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: lights_buf.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: env_params_buf.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::TextureView(env_view),
            },
            wgpu::BindGroupEntry {
                binding: 3,
                resource: wgpu::BindingResource::Sampler(env_sampler),
            },
        ],
    })
}

fn create_particle_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    mat_buf: &wgpu::Buffer,
    sprite_view: &wgpu::TextureView,
    sprite_sampler: &wgpu::Sampler,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("particle-bg"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: mat_buf.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::TextureView(sprite_view),
            },
            wgpu::BindGroupEntry {
                binding: 2,
                resource: wgpu::BindingResource::Sampler(sprite_sampler),
            },
        ],
    })
}
