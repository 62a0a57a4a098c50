//! # evdev Gamepad Source
//!
//! [`AxisSource`] backed by Linux evdev gamepads.
//!
//! ## Controller Detection
//!
//! A device counts as a gamepad when it reports absolute axes and the
//! `BTN_SOUTH` (`BTN_GAMEPAD`) button. Up to four gamepads are opened and
//! assigned to controller slots `ONE`..`FOUR` in `/dev/input/event*` path
//! order.
//!
//! ## Axis Numbering
//!
//! Axis indices follow the device's supported absolute axes in evdev code
//! order. For an xpad-driven XBOX 360 pad that is:
//!
//! | Index | evdev Code | Input |
//! |-------|------------|-------|
//! | 0 | ABS_X | Left stick x |
//! | 1 | ABS_Y | Left stick y |
//! | 2 | ABS_Z | Left trigger |
//! | 3 | ABS_RX | Right stick x |
//! | 4 | ABS_RY | Right stick y |
//! | 5 | ABS_RZ | Right trigger |
//!
//! Every reading is normalized to `-1.0..=1.0` using the axis' reported
//! minimum and maximum.

use std::path::{Path, PathBuf};

use evdev::{AbsoluteAxisType, Device, Key};
use tracing::{debug, info, warn};

use crate::error::{PadkitError, Result};

use super::source::AxisSource;
use super::types::ControllerId;

const INPUT_DIR: &str = "/dev/input";

/// Maximum number of gamepads tracked.
pub const MAX_GAMEPADS: usize = 4;

struct Gamepad {
    device: Device,
    device_path: String,
    axes: Vec<AbsoluteAxisType>,
    /// Normalized readings from the last poll; `None` once the device stops answering.
    readings: Option<Vec<f32>>,
}

/// Up to four evdev gamepads, polled together.
pub struct EvdevGamepads {
    pads: Vec<Gamepad>,
}

impl std::fmt::Debug for EvdevGamepads {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvdevGamepads")
            .field("devices", &self.device_paths())
            .finish_non_exhaustive()
    }
}

impl EvdevGamepads {
    /// Detect and open up to four gamepads under `/dev/input`.
    ///
    /// # Errors
    ///
    /// - `DeviceNotFound`: `/dev/input` is missing or holds no gamepad
    /// - `Io`: the directory cannot be listed
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use padkit::controller::gamepad::EvdevGamepads;
    ///
    /// let pads = EvdevGamepads::open()?;
    /// println!("Gamepads: {:?}", pads.device_paths());
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn open() -> Result<Self> {
        let input_dir = Path::new(INPUT_DIR);
        if !input_dir.exists() {
            return Err(PadkitError::DeviceNotFound(format!(
                "{} directory not found",
                INPUT_DIR
            )));
        }

        let candidates = event_device_paths(input_dir)?;
        let mut pads = Vec::new();

        for path in candidates {
            if pads.len() == MAX_GAMEPADS {
                break;
            }
            match Device::open(&path) {
                Ok(device) => {
                    if !is_gamepad(&device) {
                        debug!("Skipping non-gamepad device {}", path.display());
                        continue;
                    }
                    pads.push(Gamepad::new(device, &path));
                }
                Err(e) => {
                    // Permission denied or other errors - skip device
                    debug!("Could not open {}: {}", path.display(), e);
                }
            }
        }

        if pads.is_empty() {
            return Err(PadkitError::DeviceNotFound("no gamepad found".to_string()));
        }
        Ok(Self { pads })
    }

    /// Open the gamepads at the given paths, in slot order.
    ///
    /// Paths beyond the fourth are ignored.
    ///
    /// # Errors
    ///
    /// Returns `Io` if any listed device cannot be opened.
    pub fn open_paths<P: AsRef<Path>>(paths: &[P]) -> Result<Self> {
        let mut pads = Vec::new();
        for path in paths.iter().take(MAX_GAMEPADS) {
            let path = path.as_ref();
            let device = Device::open(path)?;
            if !is_gamepad(&device) {
                warn!("{} does not look like a gamepad, using it anyway", path.display());
            }
            pads.push(Gamepad::new(device, path));
        }
        Ok(Self { pads })
    }

    /// Device paths by slot.
    pub fn device_paths(&self) -> Vec<&str> {
        self.pads.iter().map(|p| p.device_path.as_str()).collect()
    }

    /// Number of opened gamepads.
    pub fn len(&self) -> usize {
        self.pads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pads.is_empty()
    }

    /// Refresh every gamepad's axis readings.
    ///
    /// A gamepad whose state can no longer be read reports as disconnected
    /// until a later poll succeeds.
    ///
    /// # Errors
    ///
    /// Never fails for individual devices; the `Result` is kept for sources
    /// that may need to.
    pub fn poll(&mut self) -> Result<()> {
        for pad in &mut self.pads {
            pad.poll();
        }
        Ok(())
    }
}

impl AxisSource for EvdevGamepads {
    fn axes(&self, controller: ControllerId) -> Option<&[f32]> {
        self.pads
            .get(controller.index())
            .and_then(|pad| pad.readings.as_deref())
    }
}

impl Gamepad {
    fn new(device: Device, path: &Path) -> Self {
        let axes: Vec<AbsoluteAxisType> = device
            .supported_absolute_axes()
            .map(|set| set.iter().collect())
            .unwrap_or_default();
        let device_path = path.to_string_lossy().to_string();
        info!(
            "Found gamepad {} at {} ({} axes)",
            device.name().unwrap_or("unnamed"),
            device_path,
            axes.len()
        );
        Self {
            device,
            device_path,
            axes,
            readings: None,
        }
    }

    fn poll(&mut self) {
        match self.device.get_abs_state() {
            Ok(state) => {
                let readings = self
                    .axes
                    .iter()
                    .map(|axis| {
                        let info = &state[axis.0 as usize];
                        normalize_abs(info.value, info.minimum, info.maximum)
                    })
                    .collect();
                self.readings = Some(readings);
            }
            Err(e) => {
                if self.readings.is_some() {
                    warn!("Lost gamepad at {}: {}", self.device_path, e);
                }
                self.readings = None;
            }
        }
    }
}

/// Map an evdev absolute value onto `-1.0..=1.0`.
///
/// # Examples
///
/// ```
/// use padkit::controller::gamepad::normalize_abs;
///
/// assert_eq!(normalize_abs(0, 0, 255), -1.0);
/// assert_eq!(normalize_abs(255, 0, 255), 1.0);
/// assert_eq!(normalize_abs(-32768, -32768, 32767), -1.0);
/// ```
#[must_use]
pub fn normalize_abs(value: i32, minimum: i32, maximum: i32) -> f32 {
    if maximum <= minimum {
        return 0.0;
    }
    let span = (maximum as f64) - (minimum as f64);
    let scaled = ((value as f64) - (minimum as f64)) / span * 2.0 - 1.0;
    scaled.clamp(-1.0, 1.0) as f32
}

fn is_gamepad(device: &Device) -> bool {
    let has_axes = device
        .supported_absolute_axes()
        .map_or(false, |axes| axes.contains(AbsoluteAxisType::ABS_X));
    let has_buttons = device
        .supported_keys()
        .map_or(false, |keys| keys.contains(Key::BTN_SOUTH));
    has_axes && has_buttons
}

/// `event*` entries of `dir`, sorted for deterministic slot assignment.
pub(crate) fn event_device_paths(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = std::fs::read_dir(dir)?
        .collect::<std::result::Result<Vec<_>, _>>()?
        .into_iter()
        .map(|entry| entry.path())
        .filter(|path| {
            path.file_name()
                .map_or(false, |name| name.to_string_lossy().starts_with("event"))
        })
        .collect();
    paths.sort();
    Ok(paths)
}
