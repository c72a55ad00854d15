use log::*;
use pushbox::{
    app::{init_logging, Window},
    core::joystick::{Hat, JoystickState, Roster},
};
use sdl3::{event::Event, joystick::HatState};
use std::{collections::HashMap, thread::sleep, time::Duration};

fn to_hat(state: HatState) -> Hat {
    match state {
        HatState::Centered => Hat::Centered,
        HatState::Up => Hat::Up,
        HatState::RightUp => Hat::RightUp,
        HatState::Right => Hat::Right,
        HatState::RightDown => Hat::RightDown,
        HatState::Down => Hat::Down,
        HatState::LeftDown => Hat::LeftDown,
        HatState::Left => Hat::Left,
        HatState::LeftUp => Hat::LeftUp,
    }
}

/// Shows the axes, buttons and hats of every connected joystick, plus a log of their events
fn main() -> Result<(), String> {
    init_logging(LevelFilter::Info);
    let sdl = sdl3::init().map_err(|e| e.to_string())?;
    let video = sdl.video().map_err(|e| e.to_string())?;
    let joysticks = sdl.joystick().map_err(|e| e.to_string())?;
    let mut event_pump = sdl.event_pump().map_err(|e| e.to_string())?;
    let mut window = Window::new(&video, "Joysticks", (640, 480), 1)?;

    let mut roster = Roster::new();
    // Joysticks have to stay open to send events
    let mut open_joysticks = HashMap::new();
    'running: loop {
        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => break 'running,
                Event::JoyDeviceAdded { which, .. } => match joysticks.open(which) {
                    Ok(j) => {
                        roster.add(
                            which,
                            JoystickState::new(
                                j.name(),
                                j.num_axes() as usize,
                                j.num_buttons() as usize,
                                j.num_hats() as usize,
                            ),
                        );
                        open_joysticks.insert(which, j);
                        window.set_title(&format!("Joysticks ({} connected)", roster.len()));
                    }
                    Err(e) => warn!("Unable to open joystick {}: {}", which, e),
                },
                Event::JoyDeviceRemoved { which, .. } => {
                    open_joysticks.remove(&which);
                    roster.remove(which);
                    window.set_title(&format!("Joysticks ({} connected)", roster.len()));
                }
                Event::JoyAxisMotion {
                    which,
                    axis_idx,
                    value,
                    ..
                } => roster.set_axis(which, axis_idx as usize, value),
                Event::JoyButtonDown {
                    which, button_idx, ..
                } => roster.set_button(which, button_idx as usize, true),
                Event::JoyButtonUp {
                    which, button_idx, ..
                } => roster.set_button(which, button_idx as usize, false),
                Event::JoyHatMotion {
                    which,
                    hat_idx,
                    state,
                    ..
                } => roster.set_hat(which, hat_idx as usize, to_hat(state)),
                _ => {}
            }
        }
        window.render(&roster.draw_commands());
        sleep(Duration::from_millis(1000 / 60));
    }
    Ok(())
}
