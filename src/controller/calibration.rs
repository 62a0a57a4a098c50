//! # Calibration Module
//!
//! Saves and restores [`ControllerReader`] bindings as an XML document.
//!
//! ## Document Layout
//!
//! ```xml
//! <Configuration>
//!   <joystick which="LEFT">
//!     <axis which="x">
//!       <min>-1</min>
//!       <max>1</max>
//!       <controllerID>ONE</controllerID>
//!       <axisID>ZERO</axisID>
//!     </axis>
//!     <axis which="y">...</axis>
//!     <deadzone>0.2</deadzone>
//!   </joystick>
//!   <joystick which="RIGHT"/>
//!   <trigger which="LEFT">
//!     <axis>...</axis>
//!   </trigger>
//!   <trigger which="RIGHT"/>
//! </Configuration>
//! ```
//!
//! `min` is the raw reading at the down/left/released end of the axis and
//! `max` the reading at the other end; they are not ordered.
//!
//! ## Merging
//!
//! Reading only overwrites what the document actually contains. A joystick
//! element without axis records keeps the current axes, one without a
//! `deadzone` keeps the current deadzone, and slots that do not appear are
//! left alone. A document that fails to parse changes nothing.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::error::{PadkitError, Result};

use super::axis::Axis;
use super::reader::{validate_deadzone, ControllerReader};
use super::types::{AxisId, ControllerId, Joystick, Trigger};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename = "Configuration")]
struct CalibrationDocument {
    #[serde(rename = "joystick", default)]
    joysticks: Vec<JoystickRecord>,
    #[serde(rename = "trigger", default)]
    triggers: Vec<TriggerRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
struct JoystickRecord {
    #[serde(rename = "@which")]
    which: Joystick,
    #[serde(rename = "axis", default, skip_serializing_if = "Vec::is_empty")]
    axes: Vec<AxisRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    deadzone: Option<f32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct TriggerRecord {
    #[serde(rename = "@which")]
    which: Trigger,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    axis: Option<AxisRecord>,
}

/// Which stick axis a record describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum StickAxis {
    X,
    Y,
}

#[derive(Debug, Serialize, Deserialize)]
struct AxisRecord {
    #[serde(rename = "@which", default, skip_serializing_if = "Option::is_none")]
    which: Option<StickAxis>,
    min: f32,
    max: f32,
    #[serde(rename = "controllerID")]
    controller_id: ControllerId,
    #[serde(rename = "axisID")]
    axis_id: AxisId,
}

impl AxisRecord {
    fn from_axis(axis: &Axis, which: Option<StickAxis>) -> Self {
        Self {
            which,
            min: axis.low(),
            max: axis.high(),
            controller_id: axis.controller(),
            axis_id: axis.id(),
        }
    }

    fn to_axis(&self) -> Result<Axis> {
        Axis::new(self.controller_id, self.axis_id, self.min, self.max)
            .map_err(|e| PadkitError::CalibrationParse(e.to_string()))
    }
}

/// A binding change decoded from a document, applied only once the whole
/// document has been validated.
enum Update {
    JoystickAxes(Joystick, Axis, Axis),
    JoystickDeadzone(Joystick, f32),
    TriggerAxis(Trigger, Axis),
}

impl ControllerReader {
    /// Encodes every configured binding as a calibration document.
    ///
    /// # Errors
    ///
    /// Returns `CalibrationEncode` if XML serialization fails.
    pub fn to_xml(&self) -> Result<String> {
        let document = CalibrationDocument {
            joysticks: Joystick::ALL
                .iter()
                .map(|&which| {
                    let binding = self.joystick(which);
                    let axes = binding
                        .axes
                        .map(|(x, y)| {
                            vec![
                                AxisRecord::from_axis(&x, Some(StickAxis::X)),
                                AxisRecord::from_axis(&y, Some(StickAxis::Y)),
                            ]
                        })
                        .unwrap_or_default();
                    JoystickRecord {
                        which,
                        axes,
                        deadzone: binding.deadzone,
                    }
                })
                .collect(),
            triggers: Trigger::ALL
                .iter()
                .map(|&which| TriggerRecord {
                    which,
                    axis: self
                        .trigger_axis(which)
                        .map(|axis| AxisRecord::from_axis(axis, None)),
                })
                .collect(),
        };

        let mut body = String::new();
        let mut serializer = quick_xml::se::Serializer::new(&mut body);
        serializer.indent(' ', 2);
        document
            .serialize(serializer)
            .map_err(|e| PadkitError::CalibrationEncode(e.to_string()))?;

        Ok(format!("{}\n{}\n", XML_DECLARATION, body))
    }

    /// Merges the bindings present in `xml` into this reader.
    ///
    /// # Errors
    ///
    /// Returns `CalibrationParse` if the document is malformed, names an
    /// unknown identifier, has a joystick with only one of its x/y axes, or
    /// carries an invalid deadzone or axis range. Nothing is merged on error.
    pub fn merge_xml(&mut self, xml: &str) -> Result<()> {
        let document: CalibrationDocument = quick_xml::de::from_str(xml)?;
        let updates = decode_updates(&document)?;

        for update in updates {
            match update {
                Update::JoystickAxes(which, x, y) => self.set_joystick_axes(which, x, y),
                Update::JoystickDeadzone(which, radius) => {
                    self.set_joystick_deadzone(which, radius)?
                }
                Update::TriggerAxis(which, axis) => self.set_trigger_axis(which, axis),
            }
        }
        Ok(())
    }

    /// Writes the calibration document to `path`.
    ///
    /// A failed write may leave a truncated file behind.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be written, `CalibrationEncode` if the
    /// document cannot be built.
    pub fn write_calibration<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let result = self.to_xml().and_then(|xml| fs::write(path, xml).map_err(PadkitError::from));
        match &result {
            Ok(()) => info!("Calibration saved to {}", path.display()),
            Err(e) => error!("Failed to save calibration to {}: {}", path.display(), e),
        }
        result
    }

    /// Reads a calibration document from `path` and merges it.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read, `CalibrationParse` if it is
    /// not a valid calibration document.
    pub fn read_calibration<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        let result = fs::read_to_string(path)
            .map_err(PadkitError::from)
            .and_then(|xml| self.merge_xml(&xml));
        match &result {
            Ok(()) => info!("Calibration loaded from {}", path.display()),
            Err(e) => error!("Failed to load calibration from {}: {}", path.display(), e),
        }
        result
    }
}

fn decode_updates(document: &CalibrationDocument) -> Result<Vec<Update>> {
    let mut updates = Vec::new();

    for record in &document.joysticks {
        if !record.axes.is_empty() {
            let mut x = None;
            let mut y = None;
            for axis in &record.axes {
                match axis.which {
                    Some(StickAxis::X) => x = Some(axis.to_axis()?),
                    Some(StickAxis::Y) => y = Some(axis.to_axis()?),
                    None => warn!("Ignoring joystick {} axis without which=\"x|y\"", record.which),
                }
            }
            match (x, y) {
                (Some(x), Some(y)) => updates.push(Update::JoystickAxes(record.which, x, y)),
                _ => {
                    return Err(PadkitError::CalibrationParse(format!(
                        "joystick {} needs both an x and a y axis",
                        record.which
                    )))
                }
            }
        }

        if let Some(radius) = record.deadzone {
            validate_deadzone(radius).map_err(|e| PadkitError::CalibrationParse(e.to_string()))?;
            updates.push(Update::JoystickDeadzone(record.which, radius));
        }
    }

    for record in &document.triggers {
        if let Some(axis) = &record.axis {
            updates.push(Update::TriggerAxis(record.which, axis.to_axis()?));
        }
    }

    Ok(updates)
}
