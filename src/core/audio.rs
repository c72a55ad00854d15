//! Sample generation for the audio demos and the BytePusher.

/// Sample rate used by the sine wave demo.
pub const SINE_SAMPLE_RATE: u32 = 8000;
/// Frequency of the sine wave demo's tone.
pub const SINE_FREQUENCY: f32 = 440.0;
/// Keep at least this much audio queued, so playback never starves between frames.
pub const MIN_QUEUED_SECONDS: f32 = 0.5;

/// Convert signed 8 bit samples to floating point samples, scaled by `volume`.
pub fn signed_to_f32(samples: &[u8], volume: f32) -> Vec<f32> {
    samples
        .iter()
        .map(|s| (*s as i8) as f32 / 128.0 * volume)
        .collect()
}

/// Whether an output queue holding `queued` samples is running low.
pub fn needs_refill(queued: usize, sample_rate: u32, channels: u16) -> bool {
    (queued as f32) < sample_rate as f32 * channels as f32 * MIN_QUEUED_SECONDS
}

/// A pure tone.
#[derive(Debug, Clone)]
pub struct SineWave {
    frequency: f32,
    sample_rate: u32,
    // Wraps around at the sample rate, so the phase never loses precision
    current_sample: u32,
}

impl Default for SineWave {
    fn default() -> Self {
        SineWave::new(SINE_FREQUENCY, SINE_SAMPLE_RATE)
    }
}

impl SineWave {
    pub fn new(frequency: f32, sample_rate: u32) -> SineWave {
        SineWave {
            frequency,
            sample_rate: sample_rate.max(1),
            current_sample: 0,
        }
    }
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
    /// Write the next `out.len()` samples of the wave.
    pub fn fill(&mut self, out: &mut [f32]) {
        out.iter_mut().for_each(|s| {
            let phase = self.current_sample as f32 * self.frequency / self.sample_rate as f32;
            *s = (phase * 2.0 * std::f32::consts::PI).sin();
            self.current_sample = (self.current_sample + 1) % self.sample_rate;
        });
    }
    /// The next `len` samples of the wave.
    pub fn take(&mut self, len: usize) -> Vec<f32> {
        let mut out = vec![0.0; len];
        self.fill(&mut out);
        out
    }
}

/// A recorded sound, played on a loop.
#[derive(Debug, Clone)]
pub struct Clip {
    samples: Vec<f32>,
    sample_rate: u32,
    channels: u16,
}

impl Clip {
    /// * `samples` Interleaved samples
    /// * `sample_rate` Frames per second
    /// * `channels` Samples per frame
    pub fn new(samples: Vec<f32>, sample_rate: u32, channels: u16) -> Clip {
        Clip {
            samples,
            sample_rate,
            channels: channels.max(1),
        }
    }
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
    pub fn channels(&self) -> u16 {
        self.channels
    }
    /// Length of the clip when played.
    pub fn duration(&self) -> std::time::Duration {
        if self.sample_rate == 0 {
            return std::time::Duration::ZERO;
        }
        std::time::Duration::from_secs_f64(
            self.samples.len() as f64 / (self.sample_rate as f64 * self.channels as f64),
        )
    }
    /// Whether another copy of the clip should be queued.
    ///
    /// True once less than a single copy of the clip remains in a queue of `queued` samples.
    pub fn needs_requeue(&self, queued: usize) -> bool {
        !self.samples.is_empty() && queued < self.samples.len()
    }
    /// Scale every sample by `volume`.
    pub fn scaled(&self, volume: f32) -> Vec<f32> {
        self.samples.iter().map(|s| s * volume).collect()
    }
}
