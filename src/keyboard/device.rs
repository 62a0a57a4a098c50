//! # evdev Keyboard Source
//!
//! [`KeySource`] backed by a Linux evdev keyboard. Key state is read with the
//! `EVIOCGKEY` ioctl on [`KeySource::refresh`], so no events are consumed.

use std::path::Path;

use evdev::{AttributeSet, Device, Key};
use tracing::{debug, info};

use crate::controller::gamepad::event_device_paths;
use crate::error::{PadkitError, Result};

use super::source::{KeyCode, KeySource};

const INPUT_DIR: &str = "/dev/input";

/// Keyboard opened through evdev.
pub struct EvdevKeyboard {
    device: Device,
    device_path: String,
    keys_down: AttributeSet<Key>,
}

impl std::fmt::Debug for EvdevKeyboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvdevKeyboard")
            .field("device_path", &self.device_path)
            .finish_non_exhaustive()
    }
}

impl EvdevKeyboard {
    /// Detect and open the first keyboard under `/dev/input`.
    ///
    /// # Errors
    ///
    /// - `DeviceNotFound`: no device reports `KEY_ENTER` and `KEY_A`
    /// - `Io`: the directory cannot be listed
    pub fn open() -> Result<Self> {
        let input_dir = Path::new(INPUT_DIR);
        if !input_dir.exists() {
            return Err(PadkitError::DeviceNotFound(format!(
                "{} directory not found",
                INPUT_DIR
            )));
        }

        for path in event_device_paths(input_dir)? {
            match Device::open(&path) {
                Ok(device) if is_keyboard(&device) => return Ok(Self::from_device(device, &path)),
                Ok(_) => debug!("Skipping non-keyboard device {}", path.display()),
                Err(e) => debug!("Could not open {}: {}", path.display(), e),
            }
        }

        Err(PadkitError::DeviceNotFound("no keyboard found".to_string()))
    }

    /// Open the keyboard at `path`.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the device cannot be opened.
    pub fn open_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let device = Device::open(path)?;
        Ok(Self::from_device(device, path))
    }

    fn from_device(device: Device, path: &Path) -> Self {
        let device_path = path.to_string_lossy().to_string();
        info!(
            "Found keyboard {} at {}",
            device.name().unwrap_or("unnamed"),
            device_path
        );
        Self {
            device,
            device_path,
            keys_down: AttributeSet::new(),
        }
    }

    pub fn device_path(&self) -> &str {
        &self.device_path
    }
}

impl KeySource for EvdevKeyboard {
    fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(Key::from(key))
    }

    fn refresh(&mut self) -> Result<()> {
        self.keys_down = self.device.get_key_state()?;
        Ok(())
    }
}

fn is_keyboard(device: &Device) -> bool {
    device.supported_keys().map_or(false, |keys| {
        keys.contains(Key::KEY_ENTER) && keys.contains(Key::KEY_A)
    })
}
