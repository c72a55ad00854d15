use std::time::Duration;

use log::*;

/// How many frames the clock may fall behind before queued audio is thrown away.
pub const MAX_AUDIO_LATENCY_FRAMES: u64 = 5;

const NANOS_PER_SECOND: u64 = 1_000_000_000;

/// The frames due after a call to [FrameClock::advance].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameBatch {
    /// How many frames should be run
    pub frames: u32,
    /// Whether the host has fallen so far behind that queued audio should be cleared.
    /// Only the last frame of the batch then gets its audio queued.
    pub skip_audio: bool,
}

impl FrameBatch {
    /// Whether anything new will be on screen after running this batch.
    pub fn updated(&self) -> bool {
        self.frames > 0
    }
    /// Whether the audio of the frame at `index` in this batch should be queued.
    pub fn queue_audio(&self, index: u32) -> bool {
        !self.skip_audio || index + 1 == self.frames
    }
}

/// A fixed rate tick.
///
/// Turns real elapsed time into a number of frames to run.
/// Time is accumulated scaled by the frame rate, so one whole second in the accumulator is one
/// frame and no rounding error builds up over time.
#[derive(Debug, Clone)]
pub struct FrameClock {
    frames_per_second: u64,
    // Elapsed nanoseconds multiplied by the frame rate, not yet turned into frames
    accumulator: u64,
}

impl FrameClock {
    pub fn new(frames_per_second: u32) -> FrameClock {
        FrameClock {
            frames_per_second: frames_per_second.max(1) as u64,
            accumulator: 0,
        }
    }
    /// Add `delta` of real time to the clock, and take out every frame that is now due.
    pub fn advance(&mut self, delta: Duration) -> FrameBatch {
        let delta = delta.as_nanos().min(u64::MAX as u128 / 2) as u64;
        self.accumulator = self
            .accumulator
            .saturating_add(delta.saturating_mul(self.frames_per_second));
        let skip_audio = self.accumulator >= MAX_AUDIO_LATENCY_FRAMES * NANOS_PER_SECOND;
        let frames = self.accumulator / NANOS_PER_SECOND;
        self.accumulator %= NANOS_PER_SECOND;
        if skip_audio {
            debug!("Clock is {} frames behind, skipping audio", frames);
        }
        FrameBatch {
            frames: frames.min(u32::MAX as u64) as u32,
            skip_audio,
        }
    }
    /// How much real time has to pass before the next frame is due.
    pub fn until_next_frame(&self) -> Duration {
        let remaining = NANOS_PER_SECOND - self.accumulator;
        Duration::from_nanos(remaining.div_ceil(self.frames_per_second))
    }
    /// Forget any partially elapsed frame.
    pub fn reset(&mut self) {
        self.accumulator = 0;
    }
}
