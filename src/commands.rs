//! Command handlers: translate a parsed subcommand into [`CameraHelper`]
//! calls and print the result as JSON.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use clap::Subcommand;
use serde::Serialize;

use crate::camera::{Camera, ControlDirectory, ControlValue};
use crate::error::UvcError;
use crate::helper::{CameraHelper, Configuration};

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the names of all controls.
    Controls,
    /// List connected UVC devices.
    Devices,
    /// Print all settable control values as JSON, suitable for `import`.
    Export,
    /// Print the value of a control.
    Get {
        /// Control name, e.g. brightness.
        control: String,
    },
    /// Set controls from a JSON object of name/value pairs.
    Import {
        /// JSON file to read; standard input when omitted.
        file: Option<PathBuf>,
    },
    /// Print the min/max range of a control.
    Range {
        /// Control name, e.g. absolute_zoom.
        control: String,
    },
    /// Print the ranges of all ranged controls.
    Ranges,
    /// Set the value of a control.
    Set {
        /// Control name, e.g. brightness.
        control: String,
        /// One value, or one per component in the control's order
        /// (e.g. pan tilt).
        #[arg(required = true, num_args = 1.., allow_negative_numbers = true)]
        values: Vec<i64>,
    },
}

impl Command {
    /// Whether this command talks to a camera at all.
    pub fn needs_camera(&self) -> bool {
        !matches!(self, Self::Devices)
    }
}

/// Parse a bulk configuration from JSON text.
pub fn parse_configuration(json: &str) -> Result<Configuration, UvcError> {
    Ok(serde_json::from_str(json)?)
}

/// Read a bulk configuration from `path`, or stdin when `None`.
pub fn read_configuration(path: Option<&Path>) -> Result<Configuration, UvcError> {
    let mut json = String::new();
    match path {
        Some(p) => {
            File::open(p)?.read_to_string(&mut json)?;
        }
        None => {
            io::stdin().read_to_string(&mut json)?;
        }
    }
    parse_configuration(&json)
}

fn print_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<(), UvcError> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// `devices`: list UVC devices on the bus.
pub fn devices<W: Write>(out: &mut W) -> Result<(), UvcError> {
    print_json(out, &crate::device::list_devices()?)
}

/// `set <control> <values...>`: forwards to [`CameraHelper::set_value`].
pub fn set<D: ControlDirectory, C: Camera>(
    helper: &CameraHelper<D, C>,
    control: &str,
    values: &[i64],
) -> Result<(), UvcError> {
    let value = ControlValue::from_components(values.to_vec());
    log::info!("Setting {} to {:?}", control, value);
    helper.set_value(control, &value)
}

/// `import`: forwards to [`CameraHelper::set_values`], reporting failed
/// controls as warnings.
pub fn import<D: ControlDirectory, C: Camera>(
    helper: &CameraHelper<D, C>,
    configuration: &Configuration,
) -> Result<(), UvcError> {
    let report = helper.set_values(configuration)?;
    for (name, e) in &report.failed {
        log::warn!("Could not set {}: {}", name, e);
    }
    Ok(())
}

/// Run a camera command.
///
/// For `import`, a pre-read `configuration` is used when given (the binary
/// reads it before opening the device); otherwise the command's own file or
/// stdin is read here.
pub fn execute<D: ControlDirectory, C: Camera, W: Write>(
    command: &Command,
    helper: &CameraHelper<D, C>,
    configuration: Option<&Configuration>,
    out: &mut W,
) -> Result<(), UvcError> {
    match command {
        Command::Controls => print_json(out, &helper.get_control_names()),
        Command::Devices => devices(out),
        Command::Export => print_json(out, &helper.get_settable_values()),
        Command::Get { control } => print_json(out, &helper.get_value(control)?),
        Command::Import { file } => match configuration {
            Some(configuration) => import(helper, configuration),
            None => import(helper, &read_configuration(file.as_deref())?),
        },
        Command::Range { control } => print_json(out, &helper.get_range(control)?),
        Command::Ranges => print_json(out, &helper.get_ranges()),
        Command::Set { control, values } => set(helper, control, values),
    }
}
