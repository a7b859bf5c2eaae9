use anyhow::{Context, Result};
use clap::Parser;
use egui::Context as EguiContext;
use orbitfield_input::{Action, InputMapper, Key, WheelDelta};
use orbitfield_kernel::{DecayMode, FrameClock, FrameReport, SceneConfig, Stage};
use orbitfield_render_wgpu::WgpuRenderer;
use orbitfield_tools::{FpsCounter, MaterialPanel, SceneInspector};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "orbitfield-desktop", about = "Orbitfield interactive demo")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Scene configuration file (YAML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Scale rotation and decay by frame time instead of stepping once per frame
    #[arg(long)]
    time_scaled: bool,

    /// Particle field seed
    #[arg(long)]
    seed: Option<u64>,
}

impl Cli {
    fn scene_config(&self) -> Result<SceneConfig> {
        let mut config = match &self.config {
            Some(path) => SceneConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => SceneConfig::default(),
        };
        if self.time_scaled {
            config.driver.decay_mode = DecayMode::TimeScaled {
                reference_fps: 60.0,
            };
        }
        if let Some(seed) = self.seed {
            config.particles.seed = seed;
        }
        Ok(config)
    }
}

/// Application state.
struct AppState {
    stage: Stage,
    mapper: InputMapper,
    clock: FrameClock,
    fps: FpsCounter,
    panel: MaterialPanel,
    show_panel: bool,
    last_report: Option<FrameReport>,
}

impl AppState {
    fn new(config: &SceneConfig) -> Self {
        Self {
            stage: Stage::from_config(config),
            mapper: InputMapper::new(1280, 720),
            clock: FrameClock::new(),
            fps: FpsCounter::new(),
            panel: MaterialPanel::new(),
            show_panel: true,
            last_report: None,
        }
    }

    /// Route one action. Returns `false` when the app should quit.
    fn dispatch(&mut self, action: Action) -> bool {
        if action.apply(&mut self.stage) {
            return true;
        }
        match action {
            Action::TogglePanel => {
                self.show_panel = !self.show_panel;
                tracing::debug!(visible = self.show_panel, "debug panel toggled");
                true
            }
            Action::Quit => false,
            _ => true,
        }
    }

    fn update(&mut self) {
        let dt = self.clock.delta();
        self.fps.record(dt);
        self.last_report = Some(self.stage.tick(dt));
    }

    fn draw_ui(&mut self, ctx: &EguiContext) {
        if !self.show_panel {
            return;
        }

        let summary = SceneInspector::summary(&self.stage);
        let material = *self.stage.scene().material();
        let mut color = material.color.to_array();
        let mut metalness = material.metalness;
        let mut roughness = material.roughness;
        let (metal_range, rough_range) = (self.panel.metalness, self.panel.roughness);
        let fps = self.fps.fps();

        egui::Window::new("Material")
            .anchor(egui::Align2::RIGHT_TOP, [-12.0, 12.0])
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("color");
                    ui.color_edit_button_srgb(&mut color);
                });
                ui.add(
                    egui::Slider::new(&mut metalness, metal_range.min..=metal_range.max)
                        .step_by(metal_range.step as f64)
                        .text("metalness"),
                );
                ui.add(
                    egui::Slider::new(&mut roughness, rough_range.min..=rough_range.max)
                        .step_by(rough_range.step as f64)
                        .text("roughness"),
                );

                ui.separator();
                ui.label(format!("Speed: {:.5}", summary.speed));
                ui.label(format!("Rotation: {:.3}", summary.rotation));
                ui.label(format!(
                    "Camera: ({:.2}, {:.2}, {:.2})",
                    summary.camera.x, summary.camera.y, summary.camera.z
                ));
                ui.label(format!("Frame: {}  FPS: {:.0}", summary.frame, fps));
                ui.separator();
                ui.small("Wheel: spin | Mouse: drift | F1: panel | Esc: quit");
            });

        self.panel.sync(
            self.stage.scene_mut().material_mut(),
            color,
            metalness,
            roughness,
        );
    }
}

/// Everything that exists only once a window is up.
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: WgpuRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

impl Gpu {
    fn new(event_loop: &ActiveEventLoop, egui_ctx: &EguiContext, state: &AppState) -> Result<Self> {
        let attrs = Window::default_attributes()
            .with_title("Orbitfield")
            .with_inner_size(PhysicalSize::new(1280u32, 720));
        let window = Arc::new(event_loop.create_window(attrs).context("create window")?);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("create surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("find adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("orbitfield_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("create device")?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or(surface_caps.formats.first())
            .copied()
            .context("surface reports no formats")?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .context("surface reports no alpha modes")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = WgpuRenderer::new(
            &device,
            surface_format,
            config.width,
            config.height,
            state.stage.scene(),
        );

        let egui_winit = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        tracing::info!(
            backend = adapter.get_info().backend.to_str(),
            adapter = %adapter.get_info().name,
            width = config.width,
            height = config.height,
            "GPU initialized"
        );

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
            egui_winit,
            egui_renderer,
        })
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.config.width = width.max(1);
        self.config.height = height.max(1);
        self.surface.configure(&self.device, &self.config);
        self.renderer
            .resize(&self.device, self.config.width, self.config.height);
    }

    /// Draw the scene, then the egui overlay on top.
    fn frame(&mut self, egui_ctx: &EguiContext, state: &mut AppState) {
        let output = match self.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                tracing::debug!("surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.renderer
            .render(&self.device, &self.queue, &view, state.stage.scene());

        let raw_input = self.egui_winit.take_egui_input(&self.window);
        let full_output = egui_ctx.run(raw_input, |ctx| {
            state.draw_ui(ctx);
        });
        self.egui_winit
            .handle_platform_output(&self.window, full_output.platform_output);

        let paint_jobs = egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.config.width, self.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            self.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        self.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        output.present();
        self.window.request_redraw();
    }
}

struct GpuApp {
    state: AppState,
    gpu: Option<Gpu>,
    egui_ctx: EguiContext,
}

impl GpuApp {
    fn new(config: &SceneConfig) -> Self {
        Self {
            state: AppState::new(config),
            gpu: None,
            egui_ctx: EguiContext::default(),
        }
    }
}

fn key_of(code: KeyCode) -> Key {
    match code {
        KeyCode::F1 => Key::F1,
        KeyCode::Escape => Key::Escape,
        _ => Key::Other,
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }

        match Gpu::new(event_loop, &self.egui_ctx, &self.state) {
            Ok(gpu) => {
                let action = self.state.mapper.resized(gpu.config.width, gpu.config.height);
                self.state.dispatch(action);
                self.gpu = Some(gpu);
            }
            Err(e) => {
                tracing::error!("failed to initialize graphics: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(gpu) = &mut self.gpu else {
            return;
        };

        let response = gpu.egui_winit.on_window_event(&gpu.window, &event);
        if response.consumed {
            return;
        }

        let action = match event {
            WindowEvent::CloseRequested => Action::Quit,
            WindowEvent::Resized(new_size) => {
                gpu.resize(new_size.width, new_size.height);
                self.state.mapper.resized(new_size.width, new_size.height)
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let delta = match delta {
                    MouseScrollDelta::LineDelta(_, y) => WheelDelta::Lines { y },
                    MouseScrollDelta::PixelDelta(pos) => WheelDelta::Pixels { y: pos.y },
                };
                self.state.mapper.wheel(delta)
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.state.mapper.cursor_moved(position.x, position.y)
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => self.state.mapper.key_pressed(key_of(code)),
            WindowEvent::RedrawRequested => {
                self.state.update();
                gpu.frame(&self.egui_ctx, &mut self.state);
                Action::Noop
            }
            _ => Action::Noop,
        };

        if !self.state.dispatch(action) {
            tracing::info!(
                frame = self.state.stage.scene().frame(),
                last = ?self.state.last_report,
                "shutting down"
            );
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu) = &self.gpu {
            gpu.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("orbitfield-desktop starting");
    let config = cli.scene_config()?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(&config);
    event_loop.run_app(&mut app)?;

    Ok(())
}
