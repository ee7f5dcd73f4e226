//! Platform layer: windowing, input mapping & the per-frame loop.
//!
//! Owns the whole simulation state and drives it: poll input, integrate
//! flight state with measured elapsed time, assemble the frame scene,
//! render. Single-threaded; the loop ends on close request or Escape.

use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use asset::model::Model;
use corelib::camera::CameraState;
use corelib::flight::{Controls, FlightState};
use corelib::scenery::{self, DecorationCube};
use renderer::{FrameScene, GpuState, GridConfig};

/// Outcome of a key event the shell must act on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyRequest {
    None,
    Quit,
}

/// All mutable simulation state, owned by the shell and passed by
/// reference into the integrator and renderer. No globals.
pub struct SimState {
    pub flight: FlightState,
    pub camera: CameraState,
    pub controls: Controls,
    pub cubes: Vec<DecorationCube>,
    pub model: Model,
    pub grid: GridConfig,
}

impl SimState {
    pub fn new(model: Model) -> Self {
        Self {
            flight: FlightState::new(),
            camera: CameraState::new(),
            controls: Controls::default(),
            cubes: scenery::generate_reference_cubes(),
            model,
            grid: GridConfig::default(),
        }
    }

    /// Map a physical key to its logical control.
    pub fn handle_key(&mut self, code: KeyCode, pressed: bool) -> KeyRequest {
        match code {
            KeyCode::KeyW => self.controls.accelerate = pressed,
            KeyCode::KeyS => self.controls.decelerate = pressed,
            KeyCode::ArrowUp => self.controls.pitch_up = pressed,
            KeyCode::ArrowDown => self.controls.pitch_down = pressed,
            KeyCode::ArrowLeft => self.controls.roll_left = pressed,
            KeyCode::ArrowRight => self.controls.roll_right = pressed,
            KeyCode::KeyA => self.controls.yaw_left = pressed,
            KeyCode::KeyD => self.controls.yaw_right = pressed,
            KeyCode::KeyR if pressed => self.reset(),
            KeyCode::Escape if pressed => return KeyRequest::Quit,
            _ => {}
        }
        KeyRequest::None
    }

    /// Left mouse button press starts a camera drag at the last known
    /// cursor position; release ends it.
    pub fn handle_mouse_button(&mut self, pressed: bool) {
        if pressed {
            let (x, y) = self.camera.last_cursor;
            self.camera.begin_drag(x, y);
        } else {
            self.camera.end_drag();
        }
    }

    /// Reset plane and view to their initial state.
    pub fn reset(&mut self) {
        self.flight.reset();
        self.camera.reset();
        log::info!("State reset");
    }

    /// One simulation step.
    pub fn step(&mut self, dt: f32) {
        self.flight.integrate(&self.controls, dt);
    }
}

struct App {
    backends: wgpu::Backends,
    width: u32,
    height: u32,
    sim: SimState,
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    last_frame: Instant,
}

impl App {
    fn new(backends: wgpu::Backends, sim: SimState, width: u32, height: u32) -> Self {
        Self {
            backends,
            width,
            height,
            sim,
            window: None,
            gpu: None,
            last_frame: Instant::now(),
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };

        let dt = self.last_frame.elapsed().as_secs_f32();
        self.last_frame = Instant::now();
        self.sim.step(dt);

        let scene = FrameScene::build(
            &self.sim.model,
            &self.sim.cubes,
            &self.sim.flight,
            &self.sim.grid,
        );
        let mvp = CameraState::projection() * self.sim.camera.view();

        match gpu.render(&scene, mvp) {
            Ok(()) => {}
            Err(err) if GpuState::is_surface_lost(&err) => {
                log::warn!("Surface lost/outdated, recreating");
                gpu.recreate_surface();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("Out of GPU memory, exiting");
                event_loop.exit();
            }
            Err(err) => log::warn!("Frame skipped: {err:?}"),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let window = event_loop
            .create_window(
                Window::default_attributes()
                    .with_title("Flight Simulator")
                    .with_inner_size(PhysicalSize::new(self.width, self.height)),
            )
            .expect("Failed to create window");
        let window = Arc::new(window);
        log::info!(
            "Window created: {}x{}",
            window.inner_size().width,
            window.inner_size().height
        );

        let gpu = pollster::block_on(GpuState::new(window.clone(), self.backends));
        self.window = Some(window);
        self.gpu = Some(gpu);
        self.last_frame = Instant::now();
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested. Exiting event loop.");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if new_size.width > 0 && new_size.height > 0 {
                    if let Some(gpu) = self.gpu.as_mut() {
                        gpu.resize(new_size.width, new_size.height);
                    }
                    log::info!("Resized: {}x{}", new_size.width, new_size.height);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    let pressed = event.state == ElementState::Pressed;
                    if self.sim.handle_key(code, pressed) == KeyRequest::Quit {
                        log::info!("Escape pressed. Exiting event loop.");
                        event_loop.exit();
                    }
                }
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => {
                self.sim.handle_mouse_button(state == ElementState::Pressed);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.sim.camera.cursor_moved(position.x, position.y);
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            _ => {}
        }
    }
}

/// Run the demo until the window closes. Blocks the calling thread.
pub fn run(backends: wgpu::Backends, model: Model, width: u32, height: u32) -> Result<()> {
    let event_loop: EventLoop<()> =
        EventLoop::new().map_err(|e| anyhow::anyhow!("Failed to create event loop: {e:?}"))?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(backends, SimState::new(model), width, height);
    event_loop
        .run_app(&mut app)
        .map_err(|e| anyhow::anyhow!("Event loop error: {e:?}"))?;

    Ok(())
}
