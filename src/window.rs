//! SDL2 window display surface.
//!
//! Draw calls land in an in-memory [`PixelBuffer`]; [`DisplaySurface::present`]
//! streams that buffer into an ARGB8888 texture and flips the canvas.

use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::pixels::PixelFormatEnum;
use sdl2::rect::Rect;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::WindowContext;

use crate::display::DisplaySurface;
use crate::engine::RenderMode;
use crate::error::{Error, Result};
use crate::render::framebuffer::PixelBuffer;

pub const FPS: u64 = 60;
pub const FRAME_TARGET_TIME: f64 = 1000.0 / FPS as f64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEvent {
    None,
    Quit,
    Resize(u32, u32),
    SetRenderMode(RenderMode),
    ToggleBackfaceCulling,
}

pub struct FrameLimiter {
    previous_frame_time: u64,
}

impl FrameLimiter {
    pub fn new(window: &Window) -> Self {
        Self {
            previous_frame_time: window.timer().ticks64(),
        }
    }

    /// Waits if necessary to maintain frame rate and returns the delta time in milliseconds.
    pub fn wait_and_get_delta(&mut self, window: &Window) -> u64 {
        let mut current_time = window.timer().ticks64();
        let mut delta_time = current_time - self.previous_frame_time;

        if delta_time < FRAME_TARGET_TIME as u64 {
            let time_to_wait = (FRAME_TARGET_TIME as u64) - delta_time;
            std::thread::sleep(std::time::Duration::from_millis(time_to_wait));
            current_time = window.timer().ticks64();
            delta_time = current_time - self.previous_frame_time;
        }

        self.previous_frame_time = current_time;
        delta_time
    }
}

fn display_error(e: impl ToString) -> Error {
    Error::Display(e.to_string())
}

pub struct Window {
    canvas: Canvas<sdl2::video::Window>,
    // Field order matters: `texture` borrows from `texture_creator` and must
    // be dropped first.
    texture: Texture<'static>,
    texture_creator: Box<TextureCreator<WindowContext>>,
    event_pump: sdl2::EventPump,
    timer_subsystem: sdl2::TimerSubsystem,
    buffer: PixelBuffer,
}

impl Window {
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self> {
        let sdl_context = sdl2::init().map_err(Error::Display)?;
        let video_subsystem = sdl_context.video().map_err(Error::Display)?;
        let timer_subsystem = sdl_context.timer().map_err(Error::Display)?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .resizable()
            .build()
            .map_err(display_error)?;

        let canvas = window.into_canvas().build().map_err(display_error)?;
        let texture_creator = Box::new(canvas.texture_creator());
        let event_pump = sdl_context.event_pump().map_err(Error::Display)?;
        let texture = Self::create_texture(&texture_creator, width, height)?;

        log::info!("Opened {}x{} window '{}'", width, height, title);

        Ok(Self {
            canvas,
            texture,
            texture_creator,
            event_pump,
            timer_subsystem,
            buffer: PixelBuffer::new(width, height),
        })
    }

    fn create_texture(
        texture_creator: &TextureCreator<WindowContext>,
        width: u32,
        height: u32,
    ) -> Result<Texture<'static>> {
        // SAFETY: texture_creator is heap-allocated and lives as long as the
        // Window; the texture field is declared (and dropped) before it.
        let texture_creator: &'static TextureCreator<WindowContext> =
            unsafe { &*(texture_creator as *const _) };
        texture_creator
            .create_texture_streaming(PixelFormatEnum::ARGB8888, width, height)
            .map_err(display_error)
    }

    pub fn poll_events(&mut self) -> WindowEvent {
        for event in self.event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => return WindowEvent::Quit,
                Event::KeyDown {
                    keycode: Some(key), ..
                } => match key {
                    Keycode::Num1 => return WindowEvent::SetRenderMode(RenderMode::Filled),
                    Keycode::Num2 => return WindowEvent::SetRenderMode(RenderMode::Wireframe),
                    Keycode::Num3 => {
                        return WindowEvent::SetRenderMode(RenderMode::FilledWireframe)
                    }
                    Keycode::C => return WindowEvent::ToggleBackfaceCulling,
                    _ => {}
                },
                Event::Window {
                    win_event: sdl2::event::WindowEvent::Resized(w, h),
                    ..
                } => return WindowEvent::Resize(w as u32, h as u32),
                _ => {}
            }
        }
        WindowEvent::None
    }

    /// Reallocates the streaming texture and the draw buffer.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        self.texture = Self::create_texture(&self.texture_creator, width, height)?;
        self.buffer.resize(width, height);
        Ok(())
    }

    pub fn timer(&self) -> &sdl2::TimerSubsystem {
        &self.timer_subsystem
    }
}

impl DisplaySurface for Window {
    fn width(&self) -> u32 {
        self.buffer.width()
    }

    fn height(&self) -> u32 {
        self.buffer.height()
    }

    fn set_draw_color(&mut self, r: u8, g: u8, b: u8, a: u8) {
        self.buffer.set_draw_color(r, g, b, a);
    }

    fn clear(&mut self) {
        self.buffer.clear();
    }

    fn draw_point(&mut self, x: i32, y: i32) {
        self.buffer.draw_point(x, y);
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        self.buffer.draw_line(x0, y0, x1, y1);
    }

    fn present(&mut self) -> Result<()> {
        let (width, height) = (self.buffer.width(), self.buffer.height());
        self.texture
            .update(None, &self.buffer.as_bytes(), (width * 4) as usize)
            .map_err(display_error)?;

        self.canvas.clear();
        self.canvas
            .copy(&self.texture, None, Some(Rect::new(0, 0, width, height)))
            .map_err(Error::Display)?;
        self.canvas.present();
        self.buffer.present()
    }
}
