//! A tiny 5x7 bitmap font.
//!
//! Used for the status line of the BytePusher and the labels of the demos.
//! Lowercase letters are drawn as uppercase, anything without a glyph is drawn as `?`.
use crate::core::{DrawCommand, Rect, Rgb};

/// Width of a glyph, in font pixels.
pub const GLYPH_WIDTH: usize = 5;
/// Height of a glyph, in font pixels.
pub const GLYPH_HEIGHT: usize = 7;
/// Horizontal distance between the start of two glyphs, in font pixels.
pub const ADVANCE: usize = GLYPH_WIDTH + 1;
/// Vertical distance between two lines, in font pixels.
pub const LINE_HEIGHT: usize = GLYPH_HEIGHT + 2;

// Each row is 5 bits, the most significant one is the leftmost pixel
fn glyph(c: char) -> [u8; GLYPH_HEIGHT] {
    match c.to_ascii_uppercase() {
        ' ' => [0x00; 7],
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        'A' => [0x0E, 0x11, 0x11, 0x11, 0x1F, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        ',' => [0x00, 0x00, 0x00, 0x00, 0x0C, 0x04, 0x08],
        ':' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        '_' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1F],
        '+' => [0x00, 0x04, 0x04, 0x1F, 0x04, 0x04, 0x00],
        '=' => [0x00, 0x00, 0x1F, 0x00, 0x1F, 0x00, 0x00],
        '/' => [0x00, 0x01, 0x02, 0x04, 0x08, 0x10, 0x00],
        '%' => [0x18, 0x19, 0x02, 0x04, 0x08, 0x13, 0x03],
        '(' => [0x02, 0x04, 0x08, 0x08, 0x08, 0x04, 0x02],
        ')' => [0x08, 0x04, 0x02, 0x02, 0x02, 0x04, 0x08],
        '[' => [0x0E, 0x08, 0x08, 0x08, 0x08, 0x08, 0x0E],
        ']' => [0x0E, 0x02, 0x02, 0x02, 0x02, 0x02, 0x0E],
        '\'' => [0x0C, 0x04, 0x08, 0x00, 0x00, 0x00, 0x00],
        '"' => [0x0A, 0x0A, 0x00, 0x00, 0x00, 0x00, 0x00],
        '!' => [0x04, 0x04, 0x04, 0x04, 0x04, 0x00, 0x04],
        '<' => [0x02, 0x04, 0x08, 0x10, 0x08, 0x04, 0x02],
        '>' => [0x08, 0x04, 0x02, 0x01, 0x02, 0x04, 0x08],
        _ => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04],
    }
}

/// Width of a line of text, in window pixels.
pub fn text_width(text: &str, scale: f32) -> f32 {
    let chars = text.chars().count();
    if chars == 0 {
        0.0
    } else {
        (chars * ADVANCE - 1) as f32 * scale
    }
}

/// The filled rectangles making up a line of text.
///
/// Every lit font pixel becomes a `scale` by `scale` square, with the top left corner of the
/// first glyph at `(x, y)`.
pub fn text_rects(text: &str, x: f32, y: f32, scale: f32) -> Vec<Rect> {
    text.chars()
        .enumerate()
        .flat_map(|(i, c)| {
            let left = x + (i * ADVANCE) as f32 * scale;
            glyph(c)
                .into_iter()
                .enumerate()
                .flat_map(move |(row, bits)| {
                    (0..GLYPH_WIDTH)
                        .filter(move |col| bits & (0x10 >> col) != 0)
                        .map(move |col| {
                            Rect::new(
                                left + col as f32 * scale,
                                y + row as f32 * scale,
                                scale,
                                scale,
                            )
                        })
                })
        })
        .collect()
}

/// Split text into lines no wider than `max_width`, breaking between words where possible.
///
/// Words too long to fit on a line of their own are split across lines.
pub fn wrap(text: &str, max_width: f32, scale: f32) -> Vec<String> {
    let max_chars = (((max_width / scale).max(0.0) as usize + 1) / ADVANCE).max(1);
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            lines.push(word.drain(..max_chars).collect());
        }
        let word: String = word.into_iter().collect();
        let len = line.chars().count();
        if len == 0 {
            line = word;
        } else if len + 1 + word.chars().count() <= max_chars {
            line.push(' ');
            line.push_str(&word);
        } else {
            lines.push(std::mem::replace(&mut line, word));
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Draw a line of text on top of a solid background box.
pub fn text_commands(
    text: &str,
    x: f32,
    y: f32,
    scale: f32,
    colour: Rgb,
    background: Option<Rgb>,
) -> Vec<DrawCommand> {
    let mut commands = Vec::with_capacity(2);
    if let Some(bg) = background {
        commands.push(DrawCommand::FillRects(
            bg,
            vec![Rect::new(
                x - scale,
                y - scale,
                text_width(text, scale) + 2.0 * scale,
                (GLYPH_HEIGHT + 2) as f32 * scale,
            )],
        ));
    }
    commands.push(DrawCommand::FillRects(colour, text_rects(text, x, y, scale)));
    commands
}

#[cfg(test)]
mod tests {
    use super::{
        text_commands, text_rects, text_width, wrap, ADVANCE, GLYPH_HEIGHT, GLYPH_WIDTH,
    };
    use crate::core::DrawCommand;

    // Draw the text as '#' and '.' characters
    fn render(text: &str) -> String {
        let width = text.chars().count() * ADVANCE - 1;
        let mut grid = vec![vec!['.'; width]; GLYPH_HEIGHT];
        text_rects(text, 0.0, 0.0, 1.0)
            .iter()
            .for_each(|r| grid[r.y as usize][r.x as usize] = '#');
        grid.into_iter()
            .map(|row| row.into_iter().collect::<String>())
            .collect::<Vec<String>>()
            .join("\n")
    }

    #[test]
    fn test_glyph_a() {
        insta::assert_snapshot!(render("A"), @r"
        .###.
        #...#
        #...#
        #...#
        #####
        #...#
        #...#
        ");
    }
    #[test]
    fn test_two_glyphs() {
        insta::assert_snapshot!(render("HI"), @r"
        #...#..###.
        #...#...#..
        #...#...#..
        #####...#..
        #...#...#..
        #...#...#..
        #...#..###.
        ");
    }
    #[test]
    fn test_lowercase() {
        assert_eq!(text_rects("bytepusher", 0.0, 0.0, 1.0), text_rects("BYTEPUSHER", 0.0, 0.0, 1.0));
    }
    #[test]
    fn test_unknown_is_question_mark() {
        assert_eq!(text_rects("\u{263A}", 0.0, 0.0, 1.0), text_rects("?", 0.0, 0.0, 1.0));
    }
    #[test]
    fn test_space_is_empty() {
        assert!(text_rects("   ", 0.0, 0.0, 2.0).is_empty());
    }
    #[test]
    fn test_width() {
        assert_eq!(text_width("", 2.0), 0.0);
        assert_eq!(text_width("A", 1.0), GLYPH_WIDTH as f32);
        assert_eq!(text_width("AB", 2.0), 22.0);
    }
    #[test]
    fn test_scale() {
        let rects = text_rects("I", 10.0, 20.0, 3.0);
        assert_eq!(rects.len(), 11);
        assert_eq!(rects[0].x, 13.0);
        assert_eq!(rects[0].y, 20.0);
        assert_eq!(rects[0].w, 3.0);
    }
    #[test]
    fn test_background() {
        let commands = text_commands("OK", 4.0, 4.0, 2.0, [255; 3], Some([0; 3]));
        assert_eq!(commands.len(), 2);
        assert!(matches!(commands[0], DrawCommand::FillRects([0, 0, 0], _)));
        assert_eq!(text_commands("OK", 4.0, 4.0, 2.0, [255; 3], None).len(), 1);
    }
    #[test]
    fn test_wrap_status_line() {
        let text = "Unable to read file: No such file or directory (os error 2)";
        let lines = wrap(text, 248.0, 1.0);
        assert_eq!(
            lines,
            vec!["Unable to read file: No such file or", "directory (os error 2)"]
        );
        assert!(lines.iter().all(|l| text_width(l, 1.0) <= 248.0));
    }
    #[test]
    fn test_wrap_long_word() {
        assert_eq!(wrap("ABCDEFGHIJ", 23.0, 1.0), vec!["ABCD", "EFGH", "IJ"]);
        assert_eq!(wrap("AB CD", 22.0, 2.0), vec!["AB", "CD"]);
    }
    #[test]
    fn test_wrap_short() {
        assert_eq!(wrap("Paused", 248.0, 1.0), vec!["Paused"]);
        assert!(wrap("", 248.0, 1.0).is_empty());
    }
}
