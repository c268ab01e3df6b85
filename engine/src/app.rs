use std::error::Error;
use std::time::{Duration, Instant};

use pixels::{PixelsBuilder, SurfaceTexture};
use winit::dpi::LogicalSize;
use winit::event::{ElementState, Event, KeyboardInput, MouseButton, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Window, WindowBuilder};

use crate::graphics::Renderer2d;
use crate::pixels_renderer::PixelsRenderer2d;
use crate::surface::SurfaceSize;

pub struct AppConfig {
    pub title: String,
    /// Logical window size; also the size of the frame buffer the game draws into.
    pub size: SurfaceSize,
    pub resizable: bool,
    pub vsync: Option<bool>,
}

pub struct AppContext {
    pub window: Window,
    pub renderer: PixelsRenderer2d,
    exit_requested: bool,
}

impl AppContext {
    /// Ends the event loop after the current frame has been presented.
    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }
}

/// Input gathered between two redraws.
///
/// Edge-triggered fields (`clicks`, `typed`, `keys_pressed`) are cleared after every frame.
#[derive(Debug, Clone, Default)]
pub struct InputFrame {
    /// Cursor position in frame-buffer pixels, `None` while outside the buffer.
    pub mouse_pos: Option<(u32, u32)>,
    /// Buffer position of every left-button press this frame, in order.
    pub clicks: Vec<(u32, u32)>,
    pub typed: Vec<char>,
    pub keys_pressed: Vec<VirtualKeyCode>,
}

impl InputFrame {
    pub fn key_pressed(&self, key: VirtualKeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    pub fn clear_edges(&mut self) {
        self.clicks.clear();
        self.typed.clear();
        self.keys_pressed.clear();
    }
}

pub trait GameApp {
    type State;
    type Effect;

    fn init_state(&mut self, ctx: &mut AppContext) -> Self::State;

    fn update_state(
        &mut self,
        state: &mut Self::State,
        input: &InputFrame,
        dt: Duration,
        ctx: &mut AppContext,
    ) -> Vec<Self::Effect>;

    fn render(&mut self, state: &Self::State, renderer: &mut dyn Renderer2d);

    fn handle_effects(&mut self, _effects: Vec<Self::Effect>, _ctx: &mut AppContext) {}

    /// Called once right before the loop exits, whatever the reason.
    fn on_exit(&mut self, _state: &Self::State) {}
}

pub fn run_game<G: GameApp + 'static>(
    config: AppConfig,
    mut game: G,
) -> Result<(), Box<dyn Error>> {
    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title(config.title)
        .with_inner_size(LogicalSize::new(config.size.width, config.size.height))
        .with_resizable(config.resizable)
        .build(&event_loop)?;

    let window_size = window.inner_size();
    let surface_texture = SurfaceTexture::new(window_size.width, window_size.height, &window);
    let mut pixels_builder =
        PixelsBuilder::new(config.size.width, config.size.height, surface_texture);
    if let Some(vsync) = config.vsync {
        pixels_builder = pixels_builder.enable_vsync(vsync);
    }
    let pixels = pixels_builder.build()?;
    tracing::debug!(
        width = config.size.width,
        height = config.size.height,
        "window surface ready"
    );

    let mut ctx = AppContext {
        window,
        renderer: PixelsRenderer2d::new(pixels, config.size),
        exit_requested: false,
    };
    let mut state = game.init_state(&mut ctx);
    let mut input = InputFrame::default();
    let mut last_frame = Instant::now();
    let mut exiting = false;

    event_loop.run(move |event, _, control_flow| {
        if exiting {
            *control_flow = ControlFlow::Exit;
            return;
        }
        *control_flow = ControlFlow::Poll;

        match &event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    tracing::info!("window closed");
                    game.on_exit(&state);
                    exiting = true;
                    *control_flow = ControlFlow::Exit;
                }
                WindowEvent::Resized(size) => {
                    if let Err(err) = ctx.renderer.resize_surface(size.width, size.height) {
                        tracing::warn!("resize failed: {err}");
                    }
                    ctx.window.request_redraw();
                }
                WindowEvent::CursorMoved { position, .. } => {
                    input.mouse_pos = ctx.renderer.window_pos_to_buffer(position.x, position.y);
                }
                WindowEvent::CursorLeft { .. } => {
                    input.mouse_pos = None;
                }
                WindowEvent::MouseInput {
                    state: ElementState::Pressed,
                    button: MouseButton::Left,
                    ..
                } => {
                    if let Some(pos) = input.mouse_pos {
                        input.clicks.push(pos);
                    }
                }
                WindowEvent::ReceivedCharacter(ch) => {
                    input.typed.push(*ch);
                }
                WindowEvent::KeyboardInput {
                    input:
                        KeyboardInput {
                            state: ElementState::Pressed,
                            virtual_keycode: Some(key),
                            ..
                        },
                    ..
                } => {
                    input.keys_pressed.push(*key);
                }
                _ => {}
            },
            Event::RedrawRequested(_) => {
                let now = Instant::now();
                let dt = now.saturating_duration_since(last_frame);
                last_frame = now;

                let effects = game.update_state(&mut state, &input, dt, &mut ctx);

                ctx.renderer.draw_frame(|gfx| {
                    game.render(&state, gfx);
                });
                if let Err(err) = ctx.renderer.present() {
                    tracing::warn!("present failed: {err}");
                }

                game.handle_effects(effects, &mut ctx);
                input.clear_edges();

                if ctx.exit_requested {
                    game.on_exit(&state);
                    exiting = true;
                    *control_flow = ControlFlow::Exit;
                }
            }
            Event::MainEventsCleared => {
                ctx.window.request_redraw();
            }
            _ => {}
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_edges_keeps_cursor_position() {
        let mut input = InputFrame {
            mouse_pos: Some((10, 20)),
            clicks: vec![(10, 20)],
            typed: vec!['4', '5'],
            keys_pressed: vec![VirtualKeyCode::Return],
        };
        assert!(input.key_pressed(VirtualKeyCode::Return));

        input.clear_edges();
        assert_eq!(input.mouse_pos, Some((10, 20)));
        assert!(input.clicks.is_empty());
        assert!(input.typed.is_empty());
        assert!(!input.key_pressed(VirtualKeyCode::Return));
    }
}
