use std::{
    fmt::{Debug, Display},
    path::Path,
};

use log::*;
use serde::{Deserialize, Serialize};

use crate::core::{
    audio::signed_to_f32, AUDIO_BANK_ADDR, INSTRUCTIONS_PER_FRAME, KEYBOARD_ADDR,
    MAX_PROGRAM_SIZE, MEMORY_SIZE, PC_ADDR, PIXEL_BANK_ADDR, SAMPLES_PER_FRAME, SCREEN_HEIGHT,
    SCREEN_WIDTH,
};

/// The reasons a program can be refused by [Vm::load_program].
#[derive(Debug, Clone, PartialEq)]
pub enum LoadError {
    /// The file contained no data
    Empty,
    /// The file does not fit into the machine's memory
    TooLarge { size: usize },
    /// The file couldn't be read
    Io(String),
}
impl Display for LoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadError::Empty => write!(f, "File is empty"),
            LoadError::TooLarge { size } => write!(
                f,
                "File is too large ({} bytes, at most {} fit in memory)",
                size, MAX_PROGRAM_SIZE
            ),
            LoadError::Io(e) => write!(f, "Unable to read file: {}", e),
        }
    }
}
impl std::error::Error for LoadError {}

/// The BytePusher.
///
/// The whole machine is its memory: the key state, the program counter, and the banks used for
/// the screen and the audio all live at fixed addresses at the start of it.
/// Every frame the machine runs 65536 instructions, each of which copies a single byte and then
/// jumps.
#[derive(Clone, Serialize, Deserialize)]
pub struct Vm {
    /// Memory of the machine, always [MEMORY_SIZE] bytes long
    pub mem: Vec<u8>,
    // Keys currently held, written to memory at the start of each frame
    keys: u16,
}

impl Default for Vm {
    fn default() -> Self {
        Self::new()
    }
}

impl Debug for Vm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Vm {{ PC={:#08X} KEYS={:#06X} PIXEL_BANK={:#04X} AUDIO_BANK={:#06X} }}",
            self.read_u24(PC_ADDR),
            self.keys,
            self.mem[PIXEL_BANK_ADDR],
            self.read_u16(AUDIO_BANK_ADDR)
        )
    }
}

impl Vm {
    /// Create a machine with all memory cleared.
    ///
    /// Running it will do nothing interesting, use [Vm::from_program] or [Vm::load_program] to
    /// give it something to do.
    pub fn new() -> Vm {
        Vm {
            mem: vec![0; MEMORY_SIZE],
            keys: 0,
        }
    }
    /// Create a machine with a program already loaded.
    /// ```
    /// use pushbox::core::{Vm, LoadError};
    /// assert!(Vm::from_program(&[0; 16]).is_ok());
    /// assert_eq!(Vm::from_program(&[]).unwrap_err(), LoadError::Empty);
    /// ```
    pub fn from_program(program: &[u8]) -> Result<Vm, LoadError> {
        let mut vm = Vm::new();
        vm.load_program(program)?;
        Ok(vm)
    }
    /// Replace the contents of memory with a program.
    ///
    /// Memory is cleared, and then the program is copied to address 0.
    /// Memory is left untouched if the program is refused.
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), LoadError> {
        if program.is_empty() {
            return Err(LoadError::Empty);
        }
        if program.len() > MAX_PROGRAM_SIZE {
            return Err(LoadError::TooLarge {
                size: program.len(),
            });
        }
        self.mem.fill(0);
        self.mem[..program.len()].copy_from_slice(program);
        info!(
            "Loaded {} byte program, PC={:#08X}",
            program.len(),
            self.read_u24(PC_ADDR)
        );
        Ok(())
    }
    /// Read a program from a file and load it, see [Vm::load_program].
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<(), LoadError> {
        let data = std::fs::read(path.as_ref()).map_err(|e| LoadError::Io(e.to_string()))?;
        self.load_program(&data)
    }
    /// Create a new machine from a savestate.
    ///
    /// This is the opposite of [`Vm::to_savestate`].
    pub fn from_savestate(savestate: &[u8]) -> Result<Vm, postcard::Error> {
        let vm: Vm = postcard::from_bytes(savestate)?;
        if vm.mem.len() != MEMORY_SIZE {
            error!(
                "Savestate has {} bytes of memory, expected {}",
                vm.mem.len(),
                MEMORY_SIZE
            );
            return Err(postcard::Error::DeserializeBadEncoding);
        }
        Ok(vm)
    }
    /// Get a serialized copy of this machine as binary data.
    ///
    /// This is the opposite of [`Vm::from_savestate`].
    pub fn to_savestate(&self) -> Result<Vec<u8>, postcard::Error> {
        postcard::to_allocvec(self)
    }

    /// Set the state of all 16 keys at once, bit `n` is hex key `n`.
    pub fn set_keys(&mut self, keys: u16) {
        self.keys = keys;
    }
    /// Press or release a single hex key.
    /// * `key` The key, from `0x0` to `0xF`
    /// * `pressed` Whether the key is being held down
    pub fn set_key(&mut self, key: u8, pressed: bool) {
        let bit = 1 << (key & 0x0F);
        if pressed {
            self.keys |= bit;
        } else {
            self.keys &= !bit;
        }
    }
    /// The key state that will be written to memory at the start of the next frame.
    pub fn keys(&self) -> u16 {
        self.keys
    }

    /// Read a big endian 2 byte value.
    pub fn read_u16(&self, addr: usize) -> usize {
        ((self.mem[addr] as usize) << 8) | self.mem[addr + 1] as usize
    }
    /// Read a big endian 3 byte value.
    pub fn read_u24(&self, addr: usize) -> usize {
        ((self.mem[addr] as usize) << 16)
            | ((self.mem[addr + 1] as usize) << 8)
            | self.mem[addr + 2] as usize
    }

    /// Run the machine for a single frame.
    ///
    /// Writes the key state to memory, then runs 65536 instructions starting from the address
    /// stored at [PC_ADDR].
    /// The program counter is never written back, so every frame starts at the same place
    /// unless the program changes it.
    pub fn advance_frame(&mut self) {
        self.mem[KEYBOARD_ADDR..KEYBOARD_ADDR + 2].copy_from_slice(&self.keys.to_be_bytes());
        let mut pc = self.read_u24(PC_ADDR);
        for _ in 0..INSTRUCTIONS_PER_FRAME {
            let src = self.read_u24(pc);
            let dst = self.read_u24(pc + 3);
            self.mem[dst] = self.mem[src];
            pc = self.read_u24(pc + 6);
        }
    }

    /// The 256x256 screen, one palette index per pixel, row by row.
    ///
    /// Use [PALETTE][crate::core::PALETTE] to get the colour of each pixel.
    pub fn framebuffer(&self) -> &[u8] {
        let start = (self.mem[PIXEL_BANK_ADDR] as usize) << 16;
        &self.mem[start..(start + SCREEN_WIDTH * SCREEN_HEIGHT)]
    }
    /// The raw audio output of the last frame, as 256 signed 8 bit samples.
    pub fn audio_samples(&self) -> &[u8] {
        let start = self.read_u16(AUDIO_BANK_ADDR) << 8;
        &self.mem[start..(start + SAMPLES_PER_FRAME)]
    }
    /// The audio output of the last frame, converted to floating point and scaled by `volume`.
    pub fn audio_output(&self, volume: f32) -> Vec<f32> {
        signed_to_f32(self.audio_samples(), volume)
    }
}

#[cfg(test)]
mod tests {
    use super::{LoadError, Vm};
    use crate::core::{MAX_PROGRAM_SIZE, MEMORY_SIZE, PC_ADDR};
    use assert_hex::assert_eq_hex;

    #[test]
    fn test_init() {
        let vm = Vm::new();
        assert_eq!(vm.mem.len(), MEMORY_SIZE);
        assert_eq!(vm.keys(), 0);
    }
    #[test]
    fn test_load_empty() {
        let mut vm = Vm::new();
        assert_eq!(vm.load_program(&[]), Err(LoadError::Empty));
    }
    #[test]
    fn test_load_too_large() {
        let mut vm = Vm::new();
        vm.mem[0x10] = 0x42;
        let program = vec![0x11; MAX_PROGRAM_SIZE + 1];
        assert_eq!(
            vm.load_program(&program),
            Err(LoadError::TooLarge {
                size: MAX_PROGRAM_SIZE + 1
            })
        );
        // Refused programs don't touch memory
        assert_eq_hex!(vm.mem[0x10], 0x42);
    }
    #[test]
    fn test_load_largest() {
        let vm = Vm::from_program(&vec![0x11; MAX_PROGRAM_SIZE]).unwrap();
        assert_eq_hex!(vm.mem[MAX_PROGRAM_SIZE - 1], 0x11);
        assert_eq_hex!(vm.mem[MAX_PROGRAM_SIZE], 0x00);
    }
    #[test]
    fn test_load_clears_memory() {
        let mut vm = Vm::new();
        vm.mem[0x1234] = 0xFF;
        vm.load_program(&[0x01, 0x02, 0x03]).unwrap();
        assert_eq!(&vm.mem[0..4], &[0x01, 0x02, 0x03, 0x00]);
        assert_eq_hex!(vm.mem[0x1234], 0x00);
    }
    #[test]
    fn test_load_missing_file() {
        let mut vm = Vm::new();
        match vm.load_file("./this/file/does/not/exist.bp") {
            Err(LoadError::Io(_)) => {}
            r => panic!("Expected an IO error, got {:?}", r),
        }
    }
    #[test]
    fn test_read_u24() {
        let mut vm = Vm::new();
        vm.mem[PC_ADDR..PC_ADDR + 3].copy_from_slice(&[0x12, 0x34, 0x56]);
        assert_eq_hex!(vm.read_u24(PC_ADDR), 0x123456);
        assert_eq_hex!(vm.read_u16(PC_ADDR), 0x1234);
    }
    #[test]
    fn test_set_key() {
        let mut vm = Vm::new();
        vm.set_key(0x0, true);
        vm.set_key(0xF, true);
        assert_eq_hex!(vm.keys(), 0x8001);
        vm.set_key(0x0, false);
        assert_eq_hex!(vm.keys(), 0x8000);
    }
    #[test]
    fn test_keys_written_big_endian() {
        // Spin on an instruction that copies 0x100 onto itself, leaving the keys alone
        let mut vm = Vm::new();
        vm.mem[PC_ADDR..PC_ADDR + 3].copy_from_slice(&[0x00, 0x01, 0x00]);
        vm.mem[0x100..0x109].copy_from_slice(&[0x00, 0x01, 0x00, 0x00, 0x01, 0x00, 0x00, 0x01, 0x00]);
        vm.set_keys(0x1234);
        vm.advance_frame();
        assert_eq_hex!(vm.mem[0], 0x12);
        assert_eq_hex!(vm.mem[1], 0x34);
    }
    #[test]
    fn test_last_address_readable() {
        // An instruction starting at the very last address must not read out of bounds
        let mut vm = Vm::new();
        vm.mem[PC_ADDR..PC_ADDR + 3].copy_from_slice(&[0xFF, 0xFF, 0xFF]);
        vm.advance_frame();
    }
    #[test]
    fn test_banks() {
        let mut vm = Vm::new();
        vm.mem[5] = 0x02;
        vm.mem[6] = 0x12;
        vm.mem[7] = 0x34;
        vm.mem[0x020000] = 0xAB;
        vm.mem[0x123400] = 0x80;
        assert_eq_hex!(vm.framebuffer()[0], 0xAB);
        assert_eq!(vm.framebuffer().len(), 256 * 256);
        assert_eq_hex!(vm.audio_samples()[0], 0x80);
        assert_eq!(vm.audio_output(1.0)[0], -1.0);
    }
    #[test]
    fn test_highest_banks() {
        let mut vm = Vm::new();
        vm.mem[5] = 0xFF;
        vm.mem[6] = 0xFF;
        vm.mem[7] = 0xFF;
        assert_eq!(vm.framebuffer().len(), 256 * 256);
        assert_eq!(vm.audio_samples().len(), 256);
    }
    #[test]
    fn test_savestate() {
        let mut vm = Vm::from_program(&[0x00, 0x00, 0x00, 0x01, 0x00]).unwrap();
        vm.set_keys(0x0F0F);
        vm.mem[0xABCDEF] = 0x99;
        let data = vm.to_savestate().unwrap();
        let loaded = Vm::from_savestate(&data).unwrap();
        assert_eq!(loaded.keys(), 0x0F0F);
        assert_eq_hex!(loaded.read_u24(PC_ADDR), 0x000100);
        assert_eq_hex!(loaded.mem[0xABCDEF], 0x99);
    }
    #[test]
    fn test_bad_savestate() {
        assert!(Vm::from_savestate(&[0x01, 0x02]).is_err());
    }
}
