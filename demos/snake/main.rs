use log::*;
use pushbox::{
    app::{init_logging, Window},
    core::snake::{Direction, Snake, STEP_RATE, WINDOW_HEIGHT, WINDOW_WIDTH},
};
use sdl3::{event::Event, joystick::HatState, keyboard::Keycode};
use std::{
    collections::HashMap,
    thread::sleep,
    time::{Duration, Instant},
};

/// Snake, steered with the arrow keys or a joystick's hat
///
/// * `R` restarts the game
/// * `Escape` or `Q` quits
fn main() -> Result<(), String> {
    init_logging(LevelFilter::Info);
    let sdl = sdl3::init().map_err(|e| e.to_string())?;
    let video = sdl.video().map_err(|e| e.to_string())?;
    let joysticks = sdl.joystick().map_err(|e| e.to_string())?;
    let mut event_pump = sdl.event_pump().map_err(|e| e.to_string())?;
    let mut window = Window::new(&video, "Snake", (WINDOW_WIDTH, WINDOW_HEIGHT), 1)?;

    let mut snake = Snake::new();
    // Joysticks have to stay open to send events
    let mut open_joysticks = HashMap::new();
    let mut last_step = Instant::now();
    'running: loop {
        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => break 'running,
                Event::KeyDown {
                    keycode: Some(k), ..
                } => match k {
                    Keycode::Escape | Keycode::Q => break 'running,
                    Keycode::R => snake.restart(),
                    Keycode::Right => snake.redirect(Direction::Right),
                    Keycode::Up => snake.redirect(Direction::Up),
                    Keycode::Left => snake.redirect(Direction::Left),
                    Keycode::Down => snake.redirect(Direction::Down),
                    _ => {}
                },
                Event::JoyDeviceAdded { which, .. } => match joysticks.open(which) {
                    Ok(j) => {
                        info!("Opened joystick {}", j.name());
                        open_joysticks.insert(which, j);
                    }
                    Err(e) => warn!("Unable to open joystick {}: {}", which, e),
                },
                Event::JoyDeviceRemoved { which, .. } => {
                    open_joysticks.remove(&which);
                }
                Event::JoyHatMotion { state, .. } => match state {
                    HatState::Right => snake.redirect(Direction::Right),
                    HatState::Up => snake.redirect(Direction::Up),
                    HatState::Left => snake.redirect(Direction::Left),
                    HatState::Down => snake.redirect(Direction::Down),
                    _ => {}
                },
                _ => {}
            }
        }
        // Catch up on every step that should have happened by now
        while last_step.elapsed() >= STEP_RATE {
            snake.step();
            last_step += STEP_RATE;
        }
        window.render(&snake.draw_commands());
        sleep(Duration::from_millis(5));
    }
    Ok(())
}
