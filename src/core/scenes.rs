//! The scenes of the renderer demo.
//!
//! Each scene is animated purely from the time elapsed since the demo started, and describes
//! its frame as a list of [DrawCommand]s.
use std::{f32::consts::PI, time::Duration};

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::core::{DrawCommand, Rect};

/// Width of the canvas every scene draws on.
pub const CANVAS_WIDTH: f32 = 640.0;
/// Height of the canvas every scene draws on.
pub const CANVAS_HEIGHT: f32 = 480.0;

/// A single animated demo.
pub trait Scene {
    /// Shown in the window title.
    fn name(&self) -> &'static str;
    /// Advance the animation to `elapsed`, the time since the demo started.
    fn update(&mut self, elapsed: Duration);
    /// Describe the current frame.
    fn draw(&self) -> Vec<DrawCommand>;
}

/// Every scene, in the order the demo cycles through them.
pub fn all_scenes(seed: u64) -> Vec<Box<dyn Scene>> {
    vec![
        Box::new(Clear::default()),
        Box::new(Primitives::new(seed)),
        Box::new(Lines::default()),
        Box::new(Points::new(seed)),
        Box::new(Rectangles::default()),
    ]
}

/// Fills the window with a colour that slowly cycles through the rainbow.
#[derive(Default)]
pub struct Clear {
    colour: [u8; 3],
}
impl Clear {
    pub fn colour_at(elapsed: Duration) -> [u8; 3] {
        let now = elapsed.as_secs_f32();
        let channel = |offset: f32| ((0.5 + 0.5 * (now + offset).sin()) * 255.0) as u8;
        [channel(0.0), channel(PI * 2.0 / 3.0), channel(PI * 4.0 / 3.0)]
    }
}
impl Scene for Clear {
    fn name(&self) -> &'static str {
        "Clear"
    }
    fn update(&mut self, elapsed: Duration) {
        self.colour = Clear::colour_at(elapsed);
    }
    fn draw(&self) -> Vec<DrawCommand> {
        vec![DrawCommand::Clear(self.colour)]
    }
}

const NUM_STATIC_POINTS: usize = 500;

/// A still image using every kind of primitive.
pub struct Primitives {
    points: Vec<(f32, f32)>,
}
impl Primitives {
    pub fn new(seed: u64) -> Primitives {
        let mut rng = StdRng::seed_from_u64(seed);
        Primitives {
            points: (0..NUM_STATIC_POINTS)
                .map(|_| {
                    (
                        rng.gen_range(100.0..540.0),
                        rng.gen_range(100.0..380.0),
                    )
                })
                .collect(),
        }
    }
}
impl Scene for Primitives {
    fn name(&self) -> &'static str {
        "Primitives"
    }
    fn update(&mut self, _elapsed: Duration) {}
    fn draw(&self) -> Vec<DrawCommand> {
        vec![
            DrawCommand::Clear([33, 33, 33]),
            DrawCommand::FillRects([0, 0, 255], vec![Rect::new(100.0, 100.0, 440.0, 280.0)]),
            DrawCommand::Rects([0, 255, 0], vec![Rect::new(30.0, 30.0, 580.0, 420.0)]),
            DrawCommand::Lines([255, 255, 0], vec![(0.0, 0.0), (CANVAS_WIDTH, CANVAS_HEIGHT)]),
            DrawCommand::Lines([255, 255, 0], vec![(0.0, CANVAS_HEIGHT), (CANVAS_WIDTH, 0.0)]),
            DrawCommand::Points([255, 0, 0], self.points.clone()),
        ]
    }
}

const NUM_SPOKES: usize = 36;
const SPOKE_LENGTH: f32 = 200.0;

/// A wheel of spokes, slowly turning.
#[derive(Default)]
pub struct Lines {
    angle: f32,
}
impl Lines {
    // The end points of every spoke
    fn spokes(&self) -> Vec<(f32, f32)> {
        let centre = (CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0);
        (0..NUM_SPOKES)
            .map(|i| {
                let a = self.angle + i as f32 * 2.0 * PI / NUM_SPOKES as f32;
                (centre.0 + a.cos() * SPOKE_LENGTH, centre.1 + a.sin() * SPOKE_LENGTH)
            })
            .collect()
    }
}
impl Scene for Lines {
    fn name(&self) -> &'static str {
        "Lines"
    }
    fn update(&mut self, elapsed: Duration) {
        // A full turn every 12 seconds
        self.angle = (elapsed.as_secs_f32() / 12.0).fract() * 2.0 * PI;
    }
    fn draw(&self) -> Vec<DrawCommand> {
        let centre = (CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0);
        let mut commands = vec![DrawCommand::Clear([0, 0, 0])];
        commands.extend(self.spokes().into_iter().enumerate().map(|(i, end)| {
            let shade = (i * 255 / NUM_SPOKES) as u8;
            DrawCommand::Lines([shade, 255 - shade, 255], vec![centre, end])
        }));
        commands
    }
}

const NUM_MOVING_POINTS: usize = 500;
const MIN_PIXELS_PER_SECOND: f32 = 30.0;
const MAX_PIXELS_PER_SECOND: f32 = 60.0;

/// Points drifting from left to right at different speeds.
pub struct Points {
    positions: Vec<(f32, f32)>,
    speeds: Vec<f32>,
    last_update: Duration,
    rng: StdRng,
}
impl Points {
    pub fn new(seed: u64) -> Points {
        let mut rng = StdRng::seed_from_u64(seed);
        let positions = (0..NUM_MOVING_POINTS)
            .map(|_| {
                (
                    rng.gen_range(0.0..CANVAS_WIDTH),
                    rng.gen_range(0.0..CANVAS_HEIGHT),
                )
            })
            .collect();
        let speeds = (0..NUM_MOVING_POINTS)
            .map(|_| rng.gen_range(MIN_PIXELS_PER_SECOND..MAX_PIXELS_PER_SECOND))
            .collect();
        Points {
            positions,
            speeds,
            last_update: Duration::ZERO,
            rng,
        }
    }
    pub fn positions(&self) -> &[(f32, f32)] {
        &self.positions
    }
}
impl Scene for Points {
    fn name(&self) -> &'static str {
        "Points"
    }
    fn update(&mut self, elapsed: Duration) {
        let dt = elapsed.saturating_sub(self.last_update).as_secs_f32();
        self.last_update = elapsed;
        for (pos, speed) in self.positions.iter_mut().zip(self.speeds.iter_mut()) {
            pos.0 += *speed * dt;
            // Off the right edge, start again from the left somewhere else
            if pos.0 >= CANVAS_WIDTH {
                pos.0 = 0.0;
                pos.1 = self.rng.gen_range(0.0..CANVAS_HEIGHT);
                *speed = self
                    .rng
                    .gen_range(MIN_PIXELS_PER_SECOND..MAX_PIXELS_PER_SECOND);
            }
        }
    }
    fn draw(&self) -> Vec<DrawCommand> {
        vec![
            DrawCommand::Clear([0, 0, 0]),
            DrawCommand::Points([255, 255, 255], self.positions.clone()),
        ]
    }
}

const NUM_BARS: usize = 16;

/// Rectangles growing and shrinking.
#[derive(Default)]
pub struct Rectangles {
    // Between -1 and 1
    scale: f32,
    elapsed: f32,
}
impl Rectangles {
    /// The pulse of the outlines, going from -1 to 1 and back every 2 seconds.
    pub fn scale_at(elapsed: Duration) -> f32 {
        let millis = elapsed.as_millis() as u64;
        let direction = if millis % 2000 >= 1000 { 1.0 } else { -1.0 };
        ((millis % 1000) as f32 - 500.0) / 500.0 * direction
    }
}
impl Scene for Rectangles {
    fn name(&self) -> &'static str {
        "Rectangles"
    }
    fn update(&mut self, elapsed: Duration) {
        self.scale = Rectangles::scale_at(elapsed);
        self.elapsed = elapsed.as_secs_f32();
    }
    fn draw(&self) -> Vec<DrawCommand> {
        let outlines = (1..=3)
            .map(|i| {
                let size = (i as f32 * 50.0) * (1.0 + 0.5 * self.scale);
                Rect::new(
                    (CANVAS_WIDTH - size) / 2.0,
                    (CANVAS_HEIGHT - size) / 2.0 - 60.0,
                    size,
                    size,
                )
            })
            .collect();
        let bar_width = CANVAS_WIDTH / NUM_BARS as f32;
        let bars = (0..NUM_BARS)
            .map(|i| {
                let height = 20.0 + 40.0 * (1.0 + (self.elapsed * 3.0 + i as f32 * 0.5).sin());
                Rect::new(
                    i as f32 * bar_width,
                    CANVAS_HEIGHT - height,
                    bar_width - 2.0,
                    height,
                )
            })
            .collect();
        vec![
            DrawCommand::Clear([0, 0, 0]),
            DrawCommand::Rects([255, 255, 255], outlines),
            DrawCommand::FillRects([255, 0, 0], bars),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::{all_scenes, Clear, Points, Rectangles, Scene, CANVAS_HEIGHT, CANVAS_WIDTH};
    use crate::core::DrawCommand;
    use std::time::Duration;

    #[test]
    fn test_clear_colour() {
        // sin(0) = 0, so red starts half way
        assert_eq!(Clear::colour_at(Duration::ZERO)[0], 127);
        let mut scene = Clear::default();
        scene.update(Duration::from_millis(1570));
        match scene.draw().as_slice() {
            [DrawCommand::Clear([r, _, _])] => assert!(*r > 250),
            c => panic!("Expected a single clear, got {:?}", c),
        }
    }
    #[test]
    fn test_rectangle_scale() {
        assert_eq!(Rectangles::scale_at(Duration::ZERO), 1.0);
        assert_eq!(Rectangles::scale_at(Duration::from_millis(500)), 0.0);
        assert_eq!(Rectangles::scale_at(Duration::from_millis(1000)), -1.0);
        assert_eq!(Rectangles::scale_at(Duration::from_millis(1750)), 0.5);
    }
    #[test]
    fn test_points_move_right() {
        let mut scene = Points::new(7);
        let before = scene.positions().to_vec();
        scene.update(Duration::from_millis(100));
        scene
            .positions()
            .iter()
            .zip(before.iter())
            .for_each(|(after, before)| {
                // Either moved right by 3 to 6 pixels, or wrapped around to the left edge
                let moved = after.0 - before.0;
                assert!((2.99..=6.01).contains(&moved) || after.0 == 0.0);
            });
    }
    #[test]
    fn test_points_stay_on_canvas() {
        let mut scene = Points::new(7);
        (1..=100).for_each(|s| scene.update(Duration::from_secs(s)));
        assert!(scene
            .positions()
            .iter()
            .all(|(x, y)| (0.0..CANVAS_WIDTH).contains(x) && (0.0..CANVAS_HEIGHT).contains(y)));
    }
    #[test]
    fn test_every_scene_clears() {
        let mut scenes = all_scenes(0);
        assert_eq!(scenes.len(), 5);
        scenes.iter_mut().for_each(|s| {
            s.update(Duration::from_millis(1234));
            assert!(
                matches!(s.draw().first(), Some(DrawCommand::Clear(_))),
                "{} doesn't clear the screen first",
                s.name()
            );
        });
    }
}
