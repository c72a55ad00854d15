//! The logic behind every application, provided as a library.
//!
//! Nothing in here touches SDL. The BytePusher machine, the frame clock, the Snake rules,
//! the renderer scenes and the joystick model all produce plain data (framebuffers,
//! samples and [DrawCommand] lists) which the [app][crate::app] layer hands to SDL3.
//! ```
//! use pushbox::core::{Vm, FrameClock, PALETTE};
//! use std::time::Duration;
//! // A BytePusher machine with a program loaded at address 0
//! let mut vm = Vm::from_program(&[0, 0, 0, 0, 8, 1, 0, 2]).unwrap();
//! // Hold down hex key 5
//! vm.set_key(5, true);
//! // Run the machine whenever the clock says a frame is due
//! let mut clock = FrameClock::new(60);
//! let batch = clock.advance(Duration::from_millis(20));
//! (0..batch.frames).for_each(|_| vm.advance_frame());
//! // Read the screen output
//! let top_left = PALETTE[vm.framebuffer()[0] as usize];
//! println!("Top left pixel is R={} G={} B={}", top_left[0], top_left[1], top_left[2]);
//! // Get the audio output of the last frame
//! let samples = vm.audio_output(1.0);
//! assert_eq!(samples.len(), 256);
//! ```
mod bytepusher;
pub use bytepusher::{LoadError, Vm};
mod clock;
pub use clock::{FrameBatch, FrameClock, MAX_AUDIO_LATENCY_FRAMES};
mod status;
pub use status::{Status, STATUS_DURATION};
mod draw;
pub use draw::{framebuffer_commands, DrawCommand, Rect, Rgb};
pub mod font;
pub mod snake;
pub mod scenes;
pub mod audio;
pub mod joystick;

/// Width of the BytePusher screen, in pixels.
pub const SCREEN_WIDTH: usize = 256;
/// Height of the BytePusher screen, in pixels.
pub const SCREEN_HEIGHT: usize = 256;
/// Frames the BytePusher runs every second.
pub const FRAMES_PER_SECOND: u32 = 60;
/// Instructions executed every frame.
pub const INSTRUCTIONS_PER_FRAME: usize = 65_536;
/// Audio samples produced every frame.
pub const SAMPLES_PER_FRAME: usize = 256;
/// Audio output rate of the BytePusher, in hertz.
pub const SAMPLE_RATE: u32 = SAMPLES_PER_FRAME as u32 * FRAMES_PER_SECOND;
/// Size of the BytePusher's memory.
///
/// 16 MiB of addressable memory followed by 8 bytes of padding, so that the last
/// instruction in memory can always be read in full.
pub const MEMORY_SIZE: usize = 0x100_0008;
/// The largest program that fits into memory.
pub const MAX_PROGRAM_SIZE: usize = 0x100_0000;

/// Location of the 2 byte keyboard state.
pub const KEYBOARD_ADDR: usize = 0x00;
/// Location of the 3 byte program counter.
pub const PC_ADDR: usize = 0x02;
/// Location of the byte selecting the bank the screen is read from.
pub const PIXEL_BANK_ADDR: usize = 0x05;
/// Location of the 2 bytes selecting the bank the audio is read from.
pub const AUDIO_BANK_ADDR: usize = 0x06;

const fn build_palette() -> [[u8; 3]; 256] {
    let mut palette = [[0; 3]; 256];
    let mut i = 0;
    while i < 216 {
        palette[i] = [
            (i / 36) as u8 * 0x33,
            (i / 6 % 6) as u8 * 0x33,
            (i % 6) as u8 * 0x33,
        ];
        i += 1;
    }
    palette
}
/// Map of the BytePusher's colour indices to RGB values.
///
/// The first 216 entries are a 6x6x6 colour cube, the rest are black.
pub const PALETTE: [[u8; 3]; 256] = build_palette();
