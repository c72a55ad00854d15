//! The state of every connected joystick, for the joystick demo.
use std::collections::{BTreeMap, VecDeque};

use log::*;

use crate::core::{font, DrawCommand, Rect, Rgb};

/// How many lines of the event log are kept.
pub const LOG_LENGTH: usize = 100;
/// How many lines of the event log are drawn.
pub const LOG_LINES_SHOWN: usize = 12;

const PANEL_HEIGHT: f32 = 110.0;
const AXIS_BAR_WIDTH: f32 = 120.0;
const AXIS_BAR_HEIGHT: f32 = 8.0;
const BUTTON_SIZE: f32 = 12.0;
const HAT_SIZE: f32 = 30.0;
const TEXT_SCALE: f32 = 2.0;

/// Colours given to joysticks, in the order they are connected.
const COLOURS: [Rgb; 6] = [
    [255, 96, 96],
    [96, 255, 96],
    [96, 160, 255],
    [255, 255, 96],
    [255, 96, 255],
    [96, 255, 255],
];

/// The position of a joystick's hat switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Hat {
    #[default]
    Centered,
    Up,
    RightUp,
    Right,
    RightDown,
    Down,
    LeftDown,
    Left,
    LeftUp,
}
impl Hat {
    /// Horizontal and vertical direction of the hat, each from -1 to 1 (down is positive).
    pub fn offset(&self) -> (i8, i8) {
        match self {
            Hat::Centered => (0, 0),
            Hat::Up => (0, -1),
            Hat::RightUp => (1, -1),
            Hat::Right => (1, 0),
            Hat::RightDown => (1, 1),
            Hat::Down => (0, 1),
            Hat::LeftDown => (-1, 1),
            Hat::Left => (-1, 0),
            Hat::LeftUp => (-1, -1),
        }
    }
}

/// A single joystick.
#[derive(Debug, Clone)]
pub struct JoystickState {
    pub name: String,
    pub axes: Vec<i16>,
    pub buttons: Vec<bool>,
    pub hats: Vec<Hat>,
    colour: Rgb,
}
impl JoystickState {
    pub fn new(name: impl Into<String>, axes: usize, buttons: usize, hats: usize) -> JoystickState {
        JoystickState {
            name: name.into(),
            axes: vec![0; axes],
            buttons: vec![false; buttons],
            hats: vec![Hat::Centered; hats],
            colour: COLOURS[0],
        }
    }
    pub fn colour(&self) -> Rgb {
        self.colour
    }
    /// Normalize an axis value to be between -1 and 1.
    pub fn axis_value(value: i16) -> f32 {
        if value < 0 {
            value as f32 / 32768.0
        } else {
            value as f32 / 32767.0
        }
    }
    // Draw the joystick in a panel starting at `top`
    fn draw(&self, top: f32, commands: &mut Vec<DrawCommand>) {
        commands.extend(font::text_commands(
            &self.name,
            10.0,
            top,
            TEXT_SCALE,
            self.colour,
            None,
        ));
        let row_top = top + 24.0;
        // Axes, as bars growing from the middle
        let (outlines, fills): (Vec<Rect>, Vec<Rect>) = self
            .axes
            .iter()
            .enumerate()
            .map(|(i, value)| {
                let x = 10.0 + (i % 4) as f32 * (AXIS_BAR_WIDTH + 10.0);
                let y = row_top + (i / 4) as f32 * (AXIS_BAR_HEIGHT + 6.0);
                let middle = x + AXIS_BAR_WIDTH / 2.0;
                let len = JoystickState::axis_value(*value) * AXIS_BAR_WIDTH / 2.0;
                (
                    Rect::new(x, y, AXIS_BAR_WIDTH, AXIS_BAR_HEIGHT),
                    Rect::new(middle.min(middle + len), y, len.abs(), AXIS_BAR_HEIGHT),
                )
            })
            .unzip();
        commands.push(DrawCommand::Rects([128, 128, 128], outlines));
        commands.push(DrawCommand::FillRects(self.colour, fills));
        // Buttons, filled when pressed
        let buttons_top = row_top + 36.0;
        let button_rect = |i: usize| {
            Rect::new(
                10.0 + (i % 32) as f32 * (BUTTON_SIZE + 4.0),
                buttons_top + (i / 32) as f32 * (BUTTON_SIZE + 4.0),
                BUTTON_SIZE,
                BUTTON_SIZE,
            )
        };
        commands.push(DrawCommand::Rects(
            [128, 128, 128],
            (0..self.buttons.len()).map(button_rect).collect(),
        ));
        commands.push(DrawCommand::FillRects(
            self.colour,
            self.buttons
                .iter()
                .enumerate()
                .filter(|(_, pressed)| **pressed)
                .map(|(i, _)| button_rect(i))
                .collect(),
        ));
        // Hats, as a cross with a dot showing the direction
        let hats_left = 540.0;
        self.hats.iter().enumerate().for_each(|(i, hat)| {
            let centre = (
                hats_left + i as f32 * (HAT_SIZE + 10.0) + HAT_SIZE / 2.0,
                row_top + HAT_SIZE / 2.0,
            );
            commands.push(DrawCommand::Lines(
                [128, 128, 128],
                vec![
                    (centre.0 - HAT_SIZE / 2.0, centre.1),
                    (centre.0 + HAT_SIZE / 2.0, centre.1),
                ],
            ));
            commands.push(DrawCommand::Lines(
                [128, 128, 128],
                vec![
                    (centre.0, centre.1 - HAT_SIZE / 2.0),
                    (centre.0, centre.1 + HAT_SIZE / 2.0),
                ],
            ));
            let (dx, dy) = hat.offset();
            let dot = 6.0;
            commands.push(DrawCommand::FillRects(
                self.colour,
                vec![Rect::new(
                    centre.0 + dx as f32 * (HAT_SIZE / 2.0 - dot / 2.0) - dot / 2.0,
                    centre.1 + dy as f32 * (HAT_SIZE / 2.0 - dot / 2.0) - dot / 2.0,
                    dot,
                    dot,
                )],
            ));
        });
    }
}

/// Every connected joystick, keyed by the instance id SDL gives it.
#[derive(Debug, Default)]
pub struct Roster {
    joysticks: BTreeMap<u32, JoystickState>,
    log: VecDeque<(Rgb, String)>,
    connected: usize,
}

impl Roster {
    pub fn new() -> Roster {
        Roster::default()
    }
    pub fn len(&self) -> usize {
        self.joysticks.len()
    }
    pub fn is_empty(&self) -> bool {
        self.joysticks.is_empty()
    }
    pub fn get(&self, id: u32) -> Option<&JoystickState> {
        self.joysticks.get(&id)
    }
    /// The event log, oldest first.
    pub fn log(&self) -> impl Iterator<Item = &str> {
        self.log.iter().map(|(_, l)| l.as_str())
    }
    fn push_log(&mut self, colour: Rgb, line: String) {
        debug!("{}", line);
        self.log.push_back((colour, line));
        if self.log.len() > LOG_LENGTH {
            self.log.pop_front();
        }
    }
    fn colour_of(&self, id: u32) -> Rgb {
        self.joysticks
            .get(&id)
            .map_or([255, 255, 255], |j| j.colour)
    }
    /// A joystick was connected.
    pub fn add(&mut self, id: u32, mut state: JoystickState) {
        state.colour = COLOURS[self.connected % COLOURS.len()];
        self.connected += 1;
        info!(
            "Joystick #{} connected: {} ({} axes, {} buttons, {} hats)",
            id,
            state.name,
            state.axes.len(),
            state.buttons.len(),
            state.hats.len()
        );
        let line = format!("Joystick #{} added: {}", id, state.name);
        let colour = state.colour;
        self.joysticks.insert(id, state);
        self.push_log(colour, line);
    }
    /// A joystick was disconnected.
    pub fn remove(&mut self, id: u32) {
        if let Some(state) = self.joysticks.remove(&id) {
            info!("Joystick #{} disconnected", id);
            self.push_log(state.colour, format!("Joystick #{} removed", id));
        }
    }
    pub fn set_axis(&mut self, id: u32, axis: usize, value: i16) {
        if let Some(v) = self
            .joysticks
            .get_mut(&id)
            .and_then(|j| j.axes.get_mut(axis))
        {
            *v = value;
            let colour = self.colour_of(id);
            self.push_log(colour, format!("Joystick #{} axis {} -> {}", id, axis, value));
        }
    }
    pub fn set_button(&mut self, id: u32, button: usize, pressed: bool) {
        if let Some(b) = self
            .joysticks
            .get_mut(&id)
            .and_then(|j| j.buttons.get_mut(button))
        {
            *b = pressed;
            let colour = self.colour_of(id);
            let action = if pressed { "down" } else { "up" };
            self.push_log(colour, format!("Joystick #{} button {} {}", id, button, action));
        }
    }
    pub fn set_hat(&mut self, id: u32, hat: usize, value: Hat) {
        if let Some(h) = self
            .joysticks
            .get_mut(&id)
            .and_then(|j| j.hats.get_mut(hat))
        {
            *h = value;
            let colour = self.colour_of(id);
            self.push_log(colour, format!("Joystick #{} hat {} -> {:?}", id, hat, value));
        }
    }
    /// Draw a panel for every joystick, followed by the most recent lines of the log.
    pub fn draw_commands(&self) -> Vec<DrawCommand> {
        let mut commands = vec![DrawCommand::Clear([0, 0, 0])];
        if self.is_empty() {
            commands.extend(font::text_commands(
                "Plug in a joystick",
                10.0,
                10.0,
                TEXT_SCALE,
                [255, 255, 255],
                None,
            ));
        }
        self.joysticks
            .values()
            .enumerate()
            .for_each(|(i, j)| j.draw(10.0 + i as f32 * PANEL_HEIGHT, &mut commands));
        let line_height = font::LINE_HEIGHT as f32 * TEXT_SCALE;
        let log_top = 480.0 - LOG_LINES_SHOWN as f32 * line_height;
        self.log
            .iter()
            .rev()
            .take(LOG_LINES_SHOWN)
            .rev()
            .enumerate()
            .for_each(|(i, (colour, line))| {
                commands.extend(font::text_commands(
                    line,
                    10.0,
                    log_top + i as f32 * line_height,
                    TEXT_SCALE,
                    *colour,
                    None,
                ))
            });
        commands
    }
}
