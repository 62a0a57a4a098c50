//! # padkit
//!
//! Reads calibrated stick and trigger states from evdev gamepads.
//!
//! # Control Flow
//!
//! 1. **Initialization**
//!    - Load configuration (first argument, default `config/default.toml`;
//!      built-in defaults if the file does not exist)
//!    - Set up logging with tracing subscriber
//!    - Open gamepads and keyboard
//!    - Load the calibration file, or bind a default XBOX-style layout
//!
//! 2. **Main Loop**
//!    - Wait (bounded) for Enter
//!    - Poll gamepads and keyboard at the configured interval
//!    - Log stick and trigger states about once a second
//!    - Re-read the calibration file when the reload key is freshly pressed
//!
//! 3. **Graceful Shutdown**
//!    - On Ctrl+C, save the calibration and exit
//!
//! ```bash
//! cargo run --release -- config/default.toml
//! ```

use std::path::Path;

use anyhow::Result;
use tokio::time::{interval, Duration};
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

use padkit::config::{CalibrationConfig, Config, InputConfig, LoggingConfig};
use padkit::controller::gamepad::EvdevGamepads;
use padkit::controller::{Axis, AxisId, ControllerId, ControllerReader, Joystick, Trigger};
use padkit::error::PadkitError;
use padkit::keyboard::device::EvdevKeyboard;
use padkit::keyboard::{wait_for_press, KeyCode, KeySource, KeyTracker};

/// Configuration file used when no path is given
const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Number of frames between status log messages
const LOG_INTERVAL_FRAMES: u64 = 60;

#[tokio::main]
async fn main() -> Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = if Path::new(&config_path).exists() {
        Config::load(&config_path)?
    } else {
        Config::default()
    };

    let _log_guard = init_logging(&config.logging);

    info!("padkit v{} starting...", env!("CARGO_PKG_VERSION"));
    if !Path::new(&config_path).exists() {
        info!("No configuration at {}, using defaults", config_path);
    }

    let mut pads = open_gamepads(&config.input)?;
    info!("Gamepads: {:?}", pads.device_paths());
    let mut keyboard = open_keyboard(&config.input)?;
    info!("Keyboard: {}", keyboard.device_path());

    let mut reader = load_calibration(&config.calibration)?;

    info!("Press Enter to start, Ctrl+C to exit");
    let cancel = async {
        let _ = tokio::signal::ctrl_c().await;
    };
    match wait_for_press(&mut keyboard, KeyCode::ENTER, config.wait.options(), cancel).await {
        Ok(()) => {}
        Err(PadkitError::Cancelled) => {
            info!("Received Ctrl+C, shutting down...");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    }

    let mut reload = KeyTracker::new(&keyboard, KeyCode(config.calibration.reload_key));
    let mut poll_interval = interval(Duration::from_millis(config.input.poll_interval_ms));
    let mut frame: u64 = 0;

    info!("Polling every {}ms", config.input.poll_interval_ms);

    loop {
        tokio::select! {
            _ = poll_interval.tick() => {
                pads.poll()?;
                if let Err(e) = keyboard.refresh() {
                    debug!("Failed to refresh keyboard: {}", e);
                    continue;
                }

                if reload.is_freshly_pressed(&keyboard) {
                    // Failures are logged by read_calibration
                    let _ = reader.read_calibration(&config.calibration.path);
                }

                frame += 1;
                if frame % LOG_INTERVAL_FRAMES == 0 {
                    log_states(&reader, &pads);
                }
            }

            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down...");
                // Failures are logged by write_calibration
                let _ = reader.write_calibration(&config.calibration.path);
                info!("Total frames polled: {}", frame);
                break;
            }
        }
    }

    Ok(())
}

/// Initialize logging to stdout, plus a daily-rotated file when configured
///
/// The returned guard must be kept alive to flush the file writer.
fn init_logging(config: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    if config.dir.is_empty() {
        tracing_subscriber::fmt().with_env_filter(filter).init();
        return None;
    }

    let appender = tracing_appender::rolling::daily(&config.dir, "padkit.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false),
        )
        .init();
    Some(guard)
}

fn open_gamepads(config: &InputConfig) -> padkit::error::Result<EvdevGamepads> {
    if config.gamepad_paths.is_empty() {
        EvdevGamepads::open()
    } else {
        EvdevGamepads::open_paths(&config.gamepad_paths)
    }
}

fn open_keyboard(config: &InputConfig) -> padkit::error::Result<EvdevKeyboard> {
    if config.keyboard_path.is_empty() {
        EvdevKeyboard::open()
    } else {
        EvdevKeyboard::open_path(&config.keyboard_path)
    }
}

/// Read the calibration file, falling back to the default layout if it is absent
fn load_calibration(config: &CalibrationConfig) -> padkit::error::Result<ControllerReader> {
    if Path::new(&config.path).exists() {
        let mut reader = ControllerReader::new();
        reader.read_calibration(&config.path)?;
        Ok(reader)
    } else {
        info!("No calibration at {}, using default layout", config.path);
        default_calibration(config.default_deadzone)
    }
}

/// XBOX 360 layout on controller ONE, every axis spanning -1..1
fn default_calibration(deadzone: f32) -> padkit::error::Result<ControllerReader> {
    let axis = |id| Axis::new(ControllerId::One, id, -1.0, 1.0);

    let mut reader = ControllerReader::new();
    reader.set_joystick_axes(Joystick::Left, axis(AxisId::Zero)?, axis(AxisId::One)?);
    reader.set_joystick_axes(Joystick::Right, axis(AxisId::Three)?, axis(AxisId::Four)?);
    reader.set_joystick_deadzone(Joystick::Left, deadzone)?;
    reader.set_joystick_deadzone(Joystick::Right, deadzone)?;
    reader.set_trigger_axis(Trigger::Left, axis(AxisId::Two)?);
    reader.set_trigger_axis(Trigger::Right, axis(AxisId::Five)?);
    Ok(reader)
}

fn log_states(reader: &ControllerReader, pads: &EvdevGamepads) {
    for joystick in Joystick::ALL {
        match reader.joystick_state(pads, joystick) {
            Ok(state) => info!(
                "Joystick {}: magnitude {:.2}, angle {:.2} rad",
                joystick, state.magnitude, state.angle
            ),
            Err(e) => warn!("Joystick {}: {}", joystick, e),
        }
    }
    for trigger in Trigger::ALL {
        match reader.trigger_state(pads, trigger) {
            Ok(state) => info!("Trigger {}: {:.2}", trigger, state.value),
            Err(e) => warn!("Trigger {}: {}", trigger, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_interval_constant() {
        // At the default 16ms poll interval, 60 frames is about one second
        let millis = LOG_INTERVAL_FRAMES * 16;
        assert!((900..=1100).contains(&millis));
    }

    #[test]
    fn test_default_calibration_layout() {
        let reader = default_calibration(0.1).unwrap();

        let (x, y) = reader.joystick(Joystick::Left).axes.unwrap();
        assert_eq!((x.id(), y.id()), (AxisId::Zero, AxisId::One));
        let (x, y) = reader.joystick(Joystick::Right).axes.unwrap();
        assert_eq!((x.id(), y.id()), (AxisId::Three, AxisId::Four));
        assert_eq!(reader.joystick(Joystick::Right).deadzone, Some(0.1));
        assert_eq!(reader.trigger_axis(Trigger::Left).unwrap().id(), AxisId::Two);
        assert_eq!(reader.trigger_axis(Trigger::Right).unwrap().id(), AxisId::Five);
    }

    #[test]
    fn test_default_calibration_rejects_bad_deadzone() {
        assert!(default_calibration(1.0).is_err());
    }

    #[test]
    fn test_load_calibration_prefers_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("calibration.xml");

        let mut saved = ControllerReader::new();
        saved.set_trigger_axis(
            Trigger::Left,
            Axis::new(ControllerId::Two, AxisId::Two, 1.0, -1.0).unwrap(),
        );
        saved.write_calibration(&path).unwrap();

        let config = CalibrationConfig {
            path: path.to_string_lossy().to_string(),
            default_deadzone: 0.1,
            reload_key: KeyCode::R.0,
        };
        let loaded = load_calibration(&config).unwrap();
        assert_eq!(loaded, saved);
    }
}
