use crate::{app::Config, core::Vm};
use log::*;

/// Perform a quick save
///
/// Serialize the machine, and then save it to a file containing the program's name and the local
/// time of the save.
/// Override [Config::quickload_file] to this new file's path if successful.
pub fn quicksave(vm: &Vm, config: &mut Config) -> Result<(), String> {
    let data = vm
        .to_savestate()
        .map_err(|e| format!("Unable to create quicksave: {}", e))?;
    std::fs::create_dir_all(&config.savestate_dir)
        .map_err(|e| format!("Unable to create {:?}: {}", config.savestate_dir, e))?;
    let program = match config
        .program_path
        .as_ref()
        .and_then(|p| p.file_stem())
        .and_then(|s| s.to_str())
    {
        Some(n) => format!("{}_", n),
        None => String::new(),
    };
    let time = chrono::Local::now().format("%Y_%m_%d__%H_%M_%S");
    let path = config
        .savestate_dir
        .join(format!("savestate_{}{}.bp.bin", program, time));
    std::fs::write(&path, data).map_err(|e| format!("Unable to save savestate: {}", e))?;
    debug!("Wrote savestate to {:?}", &path);
    config.quickload_file = Some(path);
    Ok(())
}
/// Perform a quick load
///
/// Load the savestate at [Config::quickload_file] and parse the [Vm] from the bytes.
pub fn quickload(config: &Config) -> Result<Vm, String> {
    let f = config
        .quickload_file
        .as_ref()
        .ok_or_else(|| String::from("No save state to quickload from"))?;
    let data =
        std::fs::read(f).map_err(|e| format!("Unable to read save state {:?}: {}", f, e))?;
    let vm = Vm::from_savestate(&data)
        .map_err(|e| format!("Unable to deserialize save state {:?}: {}", f, e))?;
    info!("Loaded quicksave at {:?}", f);
    Ok(vm)
}

#[cfg(test)]
mod tests {
    use super::{quickload, quicksave};
    use crate::{app::Config, core::Vm};

    #[test]
    fn test_quicksave_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config {
            savestate_dir: dir.path().join("savestates"),
            program_path: Some("games/Palette Test.BytePusher".into()),
            ..Default::default()
        };
        let mut vm = Vm::from_program(&[0x00, 0x00, 0x00, 0x01, 0x00]).unwrap();
        vm.set_keys(0xBEEF);
        vm.mem[0x456789] = 0x42;
        quicksave(&vm, &mut config).unwrap();

        let path = config.quickload_file.clone().unwrap();
        assert!(path.exists());
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("savestate_Palette Test_"));
        assert!(name.ends_with(".bp.bin"));

        let loaded = quickload(&config).unwrap();
        assert_eq!(loaded.keys(), 0xBEEF);
        assert_eq!(loaded.mem, vm.mem);
    }

    #[test]
    fn test_quickload_without_save() {
        let config = Config::default();
        assert!(quickload(&config).is_err());
    }

    #[test]
    fn test_quickload_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.bp.bin");
        std::fs::write(&path, [0x01, 0x02, 0x03]).unwrap();
        let config = Config {
            quickload_file: Some(path),
            ..Default::default()
        };
        assert!(quickload(&config).is_err());
    }
}
