use log::*;
use pushbox::{
    app::{init_logging, Audio},
    core::audio::{needs_refill, Clip, SineWave},
};
use sdl3::event::Event;
use std::{env, thread::sleep, time::Duration};

/// Plays a 440Hz tone, or loops a WAV file if one is given, optionally at a different volume
///
/// ```text
/// cargo run --features sdl --example audio [file.wav] [volume]
/// ```
fn main() -> Result<(), String> {
    init_logging(LevelFilter::Info);
    let args: Vec<String> = env::args().collect();
    let volume = match args.get(2) {
        Some(v) => v
            .parse::<f32>()
            .map_err(|e| format!("Invalid volume {}: {}", v, e))?
            .clamp(0.0, 3.0),
        None => 1.0,
    };
    let clip = match args.get(1) {
        Some(path) => {
            let mut wav = wavers::Wav::<f32>::from_path(path)
                .map_err(|e| format!("Unable to open {}: {}", path, e))?;
            let channels = wav.n_channels();
            let sample_rate = wav.sample_rate();
            let samples = wav
                .read()
                .map_err(|e| format!("Unable to read {}: {}", path, e))?;
            let clip = Clip::new(samples.to_vec(), sample_rate as u32, channels);
            info!(
                "Loaded {}, {} channels at {}Hz, {:?} long",
                path,
                clip.channels(),
                clip.sample_rate(),
                clip.duration()
            );
            // Scaled once up front, since the same samples are queued over and over
            Some(Clip::new(clip.scaled(volume), clip.sample_rate(), clip.channels()))
        }
        None => None,
    };

    let sdl = sdl3::init().map_err(|e| e.to_string())?;
    let video = sdl.video().map_err(|e| e.to_string())?;
    let sdl_audio = sdl.audio().map_err(|e| e.to_string())?;
    let mut event_pump = sdl.event_pump().map_err(|e| e.to_string())?;
    // The window is only here to receive the quit event
    let _window = video
        .window("Audio", 640, 480)
        .position_centered()
        .build()
        .map_err(|e| e.to_string())?;

    let mut wave = SineWave::default();
    let mut audio = match &clip {
        Some(c) => Audio::new(&sdl_audio, c.sample_rate(), c.channels())?,
        None => Audio::new(&sdl_audio, wave.sample_rate(), 1)?,
    };
    'running: loop {
        for event in event_pump.poll_iter() {
            if let Event::Quit { .. } = event {
                break 'running;
            }
        }
        let queued = audio.queued_samples();
        match &clip {
            Some(c) => {
                if c.needs_requeue(queued) {
                    audio.queue(c.samples());
                }
            }
            None => {
                if needs_refill(queued, audio.sample_rate(), audio.channels()) {
                    // A small batch at a time, so the tone never gets too far ahead
                    let samples: Vec<f32> = wave.take(512).iter().map(|s| s * volume).collect();
                    audio.queue(&samples);
                }
            }
        }
        sleep(Duration::from_millis(10));
    }
    Ok(())
}
