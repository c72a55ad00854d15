use crate::core::{DrawCommand, Rect};
use log::*;
use sdl3::{
    pixels::Color,
    render::{FPoint, FRect, WindowCanvas},
    VideoSubsystem,
};

/// A resizable window that replays [DrawCommand]s.
///
/// Applications draw on a canvas of a fixed logical size, which is scaled to fit the window while
/// keeping its aspect ratio.
pub struct Window {
    canvas: WindowCanvas,
    logical_size: (f32, f32),
}

impl Window {
    /// Open a window, initially `scale` times the logical size.
    pub fn new(
        video: &VideoSubsystem,
        title: &str,
        logical_size: (u32, u32),
        scale: u32,
    ) -> Result<Window, String> {
        let scale = scale.max(1);
        let window = video
            .window(title, logical_size.0 * scale, logical_size.1 * scale)
            .position_centered()
            .resizable()
            .build()
            .map_err(|e| e.to_string())?;
        Ok(Window {
            canvas: window.into_canvas(),
            logical_size: (logical_size.0 as f32, logical_size.1 as f32),
        })
    }
    pub fn set_title(&mut self, title: &str) {
        if let Err(e) = self.canvas.window_mut().set_title(title) {
            warn!("Unable to set window title: {}", e);
        }
    }
    // Scale and offset mapping the logical canvas into the window's pixels
    fn viewport(&self) -> (f32, f32, f32) {
        let (w, h) = self.canvas.output_size().unwrap_or_else(|e| {
            warn!("Unable to get output size: {}", e);
            self.canvas.window().size_in_pixels()
        });
        letterbox((w as f32, h as f32), self.logical_size)
    }
    /// Draw a frame and show it.
    pub fn render(&mut self, commands: &[DrawCommand]) {
        let (scale, ox, oy) = self.viewport();
        let point = |(x, y): &(f32, f32)| FPoint::new(ox + x * scale, oy + y * scale);
        let rect = |r: &Rect| FRect::new(ox + r.x * scale, oy + r.y * scale, r.w * scale, r.h * scale);
        for command in commands {
            let result = match command {
                DrawCommand::Clear(c) => {
                    self.canvas.set_draw_color(Color::RGB(c[0], c[1], c[2]));
                    self.canvas.clear();
                    Ok(())
                }
                DrawCommand::Points(c, points) => {
                    let points: Vec<FPoint> = points.iter().map(point).collect();
                    self.canvas.set_draw_color(Color::RGB(c[0], c[1], c[2]));
                    self.canvas.draw_points(points.as_slice())
                }
                DrawCommand::Lines(c, points) => {
                    let points: Vec<FPoint> = points.iter().map(point).collect();
                    self.canvas.set_draw_color(Color::RGB(c[0], c[1], c[2]));
                    self.canvas.draw_lines(points.as_slice())
                }
                DrawCommand::Rects(c, rects) => {
                    let rects: Vec<FRect> = rects.iter().map(rect).collect();
                    self.canvas.set_draw_color(Color::RGB(c[0], c[1], c[2]));
                    self.canvas.draw_rects(rects.as_slice())
                }
                DrawCommand::FillRects(c, rects) => {
                    let rects: Vec<FRect> = rects.iter().map(rect).collect();
                    self.canvas.set_draw_color(Color::RGB(c[0], c[1], c[2]));
                    self.canvas.fill_rects(rects.as_slice())
                }
            };
            if let Err(e) = result {
                error!("Unable to draw {:?}: {}", command, e);
            }
        }
        self.canvas.present();
    }
}

// Largest uniform scale fitting `logical` into `output`, centred
fn letterbox(output: (f32, f32), logical: (f32, f32)) -> (f32, f32, f32) {
    let scale = (output.0 / logical.0).min(output.1 / logical.1);
    let offset_x = (output.0 - logical.0 * scale) / 2.0;
    let offset_y = (output.1 - logical.1 * scale) / 2.0;
    (scale, offset_x, offset_y)
}
