use crate::core::PALETTE;

/// A colour, as red, green and blue.
pub type Rgb = [u8; 3];

/// A rectangle, in window coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}
impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect { x, y, w, h }
    }
}

/// A single drawing operation.
///
/// Applications build lists of these every frame and the window replays them in order.
/// Keeping drawing as data means none of the drawing logic needs a renderer to be tested.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Fill the entire window
    Clear(Rgb),
    /// Single pixels
    Points(Rgb, Vec<(f32, f32)>),
    /// A connected line going through every point in order
    Lines(Rgb, Vec<(f32, f32)>),
    /// Rectangle outlines
    Rects(Rgb, Vec<Rect>),
    /// Filled rectangles
    FillRects(Rgb, Vec<Rect>),
}

/// Turn an indexed framebuffer into filled rectangles.
///
/// Horizontal runs of the same colour are merged into a single rectangle, and all the rectangles
/// of a colour are grouped into one [DrawCommand::FillRects].
/// * `framebuffer` Palette indices, row by row
/// * `width` Width of a row, in pixels
/// * `scale` Size of a single pixel on screen
/// * `offset` Where the top left corner of the framebuffer is drawn
pub fn framebuffer_commands(
    framebuffer: &[u8],
    width: usize,
    scale: (f32, f32),
    offset: (f32, f32),
) -> Vec<DrawCommand> {
    let mut runs: Vec<Vec<Rect>> = vec![Vec::new(); 256];
    framebuffer
        .chunks(width.max(1))
        .enumerate()
        .for_each(|(y, row)| {
            let mut start = 0;
            while start < row.len() {
                let colour = row[start];
                let end = row[start..]
                    .iter()
                    .position(|c| *c != colour)
                    .map_or(row.len(), |len| start + len);
                runs[colour as usize].push(Rect::new(
                    offset.0 + start as f32 * scale.0,
                    offset.1 + y as f32 * scale.1,
                    (end - start) as f32 * scale.0,
                    scale.1,
                ));
                start = end;
            }
        });
    runs.into_iter()
        .enumerate()
        .filter(|(_, rects)| !rects.is_empty())
        .map(|(colour, rects)| DrawCommand::FillRects(PALETTE[colour], rects))
        .collect()
}
