use std::{
    path::{Path, PathBuf},
    thread::sleep,
    time::{Duration, Instant},
};

use anstyle::{AnsiColor, Effects};
use clap::{builder::Styles, Parser};
use log::*;
use pushbox::{
    app::{init_logging, Audio, Config, Input, Window},
    core::{
        font, framebuffer_commands, DrawCommand, FrameClock, Status, Vm, FRAMES_PER_SECOND,
        SAMPLE_RATE, SCREEN_HEIGHT, SCREEN_WIDTH,
    },
};
use sdl3::event::Event;

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

const DROP_MESSAGE: &str = "Drop a BytePusher file in this window";

#[derive(Parser, Debug)]
#[command(author, version, about = "A BytePusher virtual machine", styles = STYLES)]
struct Cli {
    /// BytePusher program to run, more can be dropped onto the window
    file: Option<PathBuf>,
    /// Size of a BytePusher pixel on screen
    #[arg(short, long)]
    scale: Option<u32>,
    /// Volume, from 0.0 to 3.0
    #[arg(short, long)]
    volume: Option<f32>,
    /// Config file to use instead of the default one
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Start paused
    #[arg(long)]
    paused: bool,
    /// How much to log
    #[arg(long, default_value_t = LevelFilter::Info)]
    log_level: LevelFilter,
}

// Load a program, showing the result in the status line
fn load_program(
    vm: &mut Vm,
    path: &Path,
    config: &mut Config,
    status: &mut Status,
    now: Duration,
) {
    match vm.load_file(path) {
        Ok(_) => {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            config.program_path = Some(path.to_path_buf());
            status.show(format!("Loaded {}", name), now);
        }
        Err(e) => {
            error!("Unable to load {:?}: {}", path, e);
            status.show_persistent(e.to_string());
        }
    }
}

fn main() -> Result<(), String> {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    let mut config = match cli.config.clone().or_else(Config::default_path) {
        Some(path) => Config::load(&path),
        None => {
            warn!("No config directory available, using defaults");
            Config::default()
        }
    };
    if let Some(scale) = cli.scale {
        config.scale = scale;
    }
    if let Some(volume) = cli.volume {
        config.volume = volume.clamp(0.0, 3.0);
    }
    config.paused = cli.paused;

    let sdl = sdl3::init().map_err(|e| e.to_string())?;
    let video = sdl.video().map_err(|e| e.to_string())?;
    let sdl_audio = sdl.audio().map_err(|e| e.to_string())?;
    let mut event_pump = sdl.event_pump().map_err(|e| e.to_string())?;
    let mut window = Window::new(
        &video,
        "BytePusher",
        (SCREEN_WIDTH as u32, SCREEN_HEIGHT as u32),
        config.scale,
    )?;
    let mut audio = Audio::new(&sdl_audio, SAMPLE_RATE, 1)?;
    let mut input = Input::new();

    let start_time = Instant::now();
    let mut vm = Vm::new();
    let mut status = Status::persistent(DROP_MESSAGE);
    if let Some(path) = &cli.file {
        load_program(&mut vm, path, &mut config, &mut status, Duration::ZERO);
    }

    let mut clock = FrameClock::new(FRAMES_PER_SECOND);
    let mut last_tick = Instant::now();
    'running: loop {
        let now = start_time.elapsed();
        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => break 'running,
                Event::DropFile { ref filename, .. } => {
                    load_program(&mut vm, Path::new(filename), &mut config, &mut status, now);
                    audio.clear();
                    clock.reset();
                }
                _ => input.handle_event(&event),
            }
        }
        input.update(&mut vm, &mut config, &mut status, now);
        // Nothing runs until there is a program, either from a file or a savestate
        let loaded = config.program_path.is_some() || config.quickload_file.is_some();

        let tick = Instant::now();
        let batch = clock.advance(tick.duration_since(last_tick));
        last_tick = tick;
        if batch.skip_audio {
            audio.clear();
        }
        if loaded && !config.paused {
            (0..batch.frames).for_each(|i| {
                vm.advance_frame();
                if batch.queue_audio(i) {
                    audio.queue(&vm.audio_output(config.volume));
                }
            });
        }

        if batch.updated() {
            let mut commands = vec![DrawCommand::Clear([0, 0, 0])];
            if loaded {
                commands.extend(framebuffer_commands(
                    vm.framebuffer(),
                    SCREEN_WIDTH,
                    (1.0, 1.0),
                    (0.0, 0.0),
                ));
            }
            if status.visible(now) {
                font::wrap(status.text(), SCREEN_WIDTH as f32 - 8.0, 1.0)
                    .iter()
                    .enumerate()
                    .for_each(|(i, line)| {
                        commands.extend(font::text_commands(
                            line,
                            4.0,
                            4.0 + (i * font::LINE_HEIGHT) as f32,
                            1.0,
                            [255, 255, 255],
                            Some([0, 0, 0]),
                        ))
                    });
            }
            window.render(&commands);
        }
        sleep(clock.until_next_frame().min(Duration::from_millis(4)));
    }
    if let Some(path) = cli.config.or_else(Config::default_path) {
        if let Err(e) = config.save(&path) {
            warn!("Unable to save config: {}", e);
        }
    }
    info!("Exiting");
    Ok(())
}
