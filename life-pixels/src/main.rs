#![deny(clippy::all)]
#![forbid(unsafe_code)]

//! Fullscreen frontend for the interactive Game of Life: winit event loop,
//! pixels framebuffer, keyboard/mouse dispatch into the session controller.

use error_iter::ErrorIter as _;
use life_grid::{LifeGrid, Loc};
use life_session::{EditKind, SimulationController, ViewportGeometry};
use log::error;
use pixels::wgpu::Color;
use pixels::{Pixels, PixelsBuilder, SurfaceTexture};
use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, KeyEvent, MouseButton, StartCause, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Cursor, CursorIcon, Fullscreen, Window, WindowId};

const TIME_STEP_MILLIS: u64 = 100;
const TITLE: &str = "Game of Life";
const BACKGROUND_COLOR: Color = Color::BLACK;

const DEAD_COLOR: [u8; 4] = [0xff, 0xff, 0xff, 0xff];
const ALIVE_COLOR: [u8; 4] = [0x00, 0xff, 0x00, 0xff];
const GRID_LINE_COLOR: [u8; 4] = [0x00, 0x00, 0x00, 0xff];
const MARGIN_COLOR: [u8; 4] = [0x00, 0x00, 0x00, 0xff];

fn main() {
    env_logger::init();
    let event_loop = EventLoop::new().unwrap();
    event_loop.set_control_flow(ControlFlow::Wait);
    event_loop.run_app(&mut AppEventHandler::new()).unwrap();
}

struct App {
    controller: SimulationController,
    window: Arc<Window>,
    pixels: Pixels<'static>,
    cursor: PhysicalPosition<f64>,
    next_update: Instant,
}

impl App {
    fn new(event_loop: &ActiveEventLoop) -> Self {
        let window = Arc::new(Self::build_window(event_loop));
        let window_size = window.inner_size();
        let geometry = ViewportGeometry::from_surface(window_size.width, window_size.height)
            .expect("fullscreen window fits at least one cell");
        let pixels = Self::build_pixels(&window);
        Self {
            controller: SimulationController::new(geometry),
            window,
            pixels,
            cursor: PhysicalPosition::new(0.0, 0.0),
            next_update: Instant::now(),
        }
    }

    fn build_window(event_loop: &ActiveEventLoop) -> Window {
        let window_attributes = Window::default_attributes()
            .with_title(TITLE)
            .with_cursor(Cursor::Icon(CursorIcon::Crosshair))
            .with_fullscreen(Some(Fullscreen::Borderless(None)))
            .with_visible(false);
        event_loop.create_window(window_attributes).unwrap()
    }

    fn build_pixels(window: &Arc<Window>) -> Pixels<'static> {
        let window_size = window.inner_size();
        let surface_texture =
            SurfaceTexture::new(window_size.width, window_size.height, window.clone());
        PixelsBuilder::new(window_size.width, window_size.height, surface_texture)
            .clear_color(BACKGROUND_COLOR)
            .build()
            .unwrap()
    }

    fn on_create(&mut self) {
        self.update_title();
        self.window.request_redraw();
        self.window.set_visible(true);
    }

    fn on_time_step(&mut self) {
        self.controller.tick();
        self.window.request_redraw();

        while self.next_update < Instant::now() {
            self.next_update += Duration::from_millis(TIME_STEP_MILLIS);
        }
    }

    fn on_toggle_run(&mut self) {
        self.controller.toggle();
        self.update_title();
        self.window.request_redraw();
    }

    fn on_cursor_moved(&mut self, position: PhysicalPosition<f64>) {
        self.cursor = position;
    }

    fn on_pointer_released(&mut self, button: MouseButton) {
        let kind = match button {
            MouseButton::Left => EditKind::Activate,
            MouseButton::Right => EditKind::Deactivate,
            _ => return,
        };
        self.controller.edit(self.cursor.x, self.cursor.y, kind);
        self.window.request_redraw();
    }

    fn on_redraw(&mut self) -> Result<(), pixels::Error> {
        let width = self.window.inner_size().width as usize;
        let geometry = self.controller.geometry();
        let grid = self.controller.grid();
        let frame = self.pixels.frame_mut();

        for (index, pixel) in frame.chunks_exact_mut(4).enumerate() {
            let x = (index % width) as u32;
            let y = (index / width) as u32;
            pixel.copy_from_slice(&color_at(grid, geometry, x, y));
        }
        self.pixels.render()
    }

    // The prompt is presented through the title bar; the core only yields
    // the string, text rasterization stays out of the frontend.
    fn update_title(&self) {
        match self.controller.prompt() {
            Some(prompt) => self.window.set_title(&format!("{TITLE} - {prompt}")),
            None => self.window.set_title(TITLE),
        }
    }
}

struct AppEventHandler {
    app: Option<App>,
}

impl AppEventHandler {
    fn new() -> Self {
        Self { app: None }
    }

    fn app(&mut self) -> &mut App {
        self.app.as_mut().unwrap()
    }
}

impl ApplicationHandler for AppEventHandler {
    fn new_events(&mut self, _event_loop: &ActiveEventLoop, cause: StartCause) {
        if let StartCause::ResumeTimeReached { .. } = cause {
            self.app().on_time_step();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.is_none() {
            self.app = Some(App::new(event_loop));
            self.app().on_create();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: ElementState::Released,
                        repeat: false,
                        ..
                    },
                ..
            } => match code {
                KeyCode::Escape | KeyCode::KeyQ | KeyCode::KeyX => {
                    event_loop.exit();
                }
                KeyCode::Enter => {
                    self.app().on_toggle_run();
                }
                _ => (),
            },
            WindowEvent::CursorMoved { position, .. } => {
                self.app().on_cursor_moved(position);
            }
            WindowEvent::MouseInput {
                state: ElementState::Released,
                button,
                ..
            } => {
                self.app().on_pointer_released(button);
            }
            WindowEvent::RedrawRequested => {
                if let Err(err) = self.app().on_redraw() {
                    log_error("render", err);
                    event_loop.exit();
                }
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let wakeup_time = self.app().next_update;
        event_loop.set_control_flow(ControlFlow::WaitUntil(wakeup_time));
    }
}

fn color_at(grid: &LifeGrid, geometry: &ViewportGeometry, x: u32, y: u32) -> [u8; 4] {
    if x < geometry.left_border()
        || x >= geometry.right_border()
        || y < geometry.top_border()
        || y >= geometry.bottom_border()
    {
        return MARGIN_COLOR;
    }

    let x_in_grid = x - geometry.left_border();
    let y_in_grid = y - geometry.top_border();
    if x_in_grid % geometry.cell_size() == 0 || y_in_grid % geometry.cell_size() == 0 {
        return GRID_LINE_COLOR;
    }

    let loc = Loc::new(
        y_in_grid / geometry.cell_size(),
        x_in_grid / geometry.cell_size(),
    );
    match grid.get(loc) {
        Ok(cell) if cell.is_alive() => ALIVE_COLOR,
        _ => DEAD_COLOR,
    }
}

fn log_error<E: std::error::Error + 'static>(method_name: &str, err: E) {
    error!("{method_name}() failed: {err}");
    for source in err.sources().skip(1) {
        error!("  Caused by: {source}");
    }
}
