// Assemble a single BytePusher instruction: copy `src` to `dst`, then jump to `jump`
#[macro_export]
macro_rules! instruction {
    ($src: expr, $dst: expr, $jump: expr) => {{
        let mut bytes = [0u8; 9];
        bytes[0..3].copy_from_slice(&($src as u32).to_be_bytes()[1..]);
        bytes[3..6].copy_from_slice(&($dst as u32).to_be_bytes()[1..]);
        bytes[6..9].copy_from_slice(&($jump as u32).to_be_bytes()[1..]);
        bytes
    }};
}

// Create a VM from a program made of chunks of bytes placed at the given addresses
#[macro_export]
macro_rules! vm_with_memory {
    ($($addr: expr => $bytes: expr),* $(,)?) => {{
        let mut program: Vec<u8> = Vec::new();
        $(
            let addr: usize = $addr;
            let bytes: &[u8] = &$bytes;
            if program.len() < addr + bytes.len() {
                program.resize(addr + bytes.len(), 0);
            }
            program[addr..(addr + bytes.len())].copy_from_slice(bytes);
        )*
        pushbox::core::Vm::from_program(&program).unwrap()
    }};
}

// The 8 byte header: program counter, then pixel and audio banks
#[macro_export]
macro_rules! header {
    ($pc: expr) => {
        header!($pc, 0, 0)
    };
    ($pc: expr, $pixel_bank: expr, $audio_bank: expr) => {{
        let pc = ($pc as u32).to_be_bytes();
        let audio = ($audio_bank as u16).to_be_bytes();
        [0, 0, pc[1], pc[2], pc[3], $pixel_bank as u8, audio[0], audio[1]]
    }};
}

// Snapshot the first rows of the screen as hex
#[macro_export]
macro_rules! assert_screen_snapshot {
    ($name: literal, $vm: ident, $rows: literal) => {
        let rows: Vec<String> = $vm
            .framebuffer()
            .chunks(pushbox::core::SCREEN_WIDTH)
            .take($rows)
            .map(|row| {
                row.iter()
                    .take(16)
                    .map(|p| format!("{:02X}", p))
                    .collect::<Vec<String>>()
                    .join(" ")
            })
            .collect();
        insta::assert_debug_snapshot!($name, rows.as_slice());
    };
}
