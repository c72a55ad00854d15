use log::*;
use sdl3::{
    audio::{AudioFormat, AudioSpec, AudioStreamOwner},
    AudioSubsystem,
};

/// A mono or stereo stream of floating point samples going to the default playback device.
///
/// SDL converts whatever rate the samples are queued at to the device's own rate.
pub struct Audio {
    stream: AudioStreamOwner,
    sample_rate: u32,
    channels: u16,
}

impl Audio {
    pub fn new(audio: &AudioSubsystem, sample_rate: u32, channels: u16) -> Result<Audio, String> {
        let spec = AudioSpec {
            freq: Some(sample_rate as i32),
            channels: Some(channels as i32),
            format: Some(AudioFormat::f32_sys()),
        };
        let device = audio
            .open_playback_device(&spec)
            .map_err(|e| e.to_string())?;
        let stream = device
            .open_device_stream(Some(&spec))
            .map_err(|e| e.to_string())?;
        stream.resume().map_err(|e| e.to_string())?;
        info!(
            "Opened audio stream, freq={}, channels={}",
            sample_rate, channels
        );
        Ok(Audio {
            stream,
            sample_rate,
            channels,
        })
    }
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }
    pub fn channels(&self) -> u16 {
        self.channels
    }
    /// Add samples to the end of the stream.
    pub fn queue(&mut self, samples: &[f32]) {
        if let Err(e) = self.stream.put_data_f32(samples) {
            error!("Unable to queue audio: {}", e);
        }
    }
    /// Samples queued but not yet played.
    pub fn queued_samples(&self) -> usize {
        match self.stream.queued_bytes() {
            Ok(bytes) => bytes.max(0) as usize / std::mem::size_of::<f32>(),
            Err(e) => {
                warn!("Unable to read queued audio size: {}", e);
                0
            }
        }
    }
    /// Throw away everything queued.
    pub fn clear(&mut self) {
        debug!("Clearing {} queued samples", self.queued_samples());
        if let Err(e) = self.stream.clear() {
            error!("Unable to clear audio: {}", e);
        }
    }
}
