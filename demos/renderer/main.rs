use log::*;
use pushbox::{
    app::{init_logging, Window},
    core::scenes::{all_scenes, CANVAS_HEIGHT, CANVAS_WIDTH},
};
use sdl3::{event::Event, keyboard::Keycode};
use std::{
    thread::sleep,
    time::{Duration, Instant, SystemTime, UNIX_EPOCH},
};

/// A tour of the renderer's drawing primitives
///
/// `Space` or `Right` goes to the next scene, `Left` to the previous one.
fn main() -> Result<(), String> {
    init_logging(LevelFilter::Info);
    let sdl = sdl3::init().map_err(|e| e.to_string())?;
    let video = sdl.video().map_err(|e| e.to_string())?;
    let mut event_pump = sdl.event_pump().map_err(|e| e.to_string())?;
    let mut window = Window::new(
        &video,
        "Renderer",
        (CANVAS_WIDTH as u32, CANVAS_HEIGHT as u32),
        1,
    )?;

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default();
    let mut scenes = all_scenes(seed);
    let mut current = 0;
    window.set_title(&format!("Renderer - {}", scenes[current].name()));
    let start_time = Instant::now();
    'running: loop {
        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'running,
                Event::KeyDown {
                    keycode: Some(k), ..
                } => {
                    let next = match k {
                        Keycode::Space | Keycode::Right => (current + 1) % scenes.len(),
                        Keycode::Left => (current + scenes.len() - 1) % scenes.len(),
                        _ => current,
                    };
                    if next != current {
                        current = next;
                        info!("Showing {}", scenes[current].name());
                        window.set_title(&format!("Renderer - {}", scenes[current].name()));
                    }
                }
                _ => {}
            }
        }
        let scene = &mut scenes[current];
        scene.update(start_time.elapsed());
        window.render(&scene.draw());
        sleep(Duration::from_millis(1000 / 60));
    }
    Ok(())
}
