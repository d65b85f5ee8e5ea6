//! USB Video Class (UVC) webcam configurator library.
//!
//! Reads and writes camera controls (brightness, zoom, pan/tilt, exposure,
//! ...) by name over USB.
//!
//! # Quick Start
//!
//! ```no_run
//! use uvcc::{CameraFactory, CameraHelper, ControlTable, ControlValue, UsbOpener};
//!
//! let camera = CameraFactory::new(UsbOpener).get(Some(0x046d), None, None)?;
//! let helper = CameraHelper::new(ControlTable::default(), camera);
//!
//! helper.set_value("brightness", &ControlValue::Single(128))?;
//! println!("Zoom: {:?}", helper.get_value("absolute_zoom")?);
//! # Ok::<(), uvcc::UvcError>(())
//! ```

mod camera;
pub mod commands;
mod controls;
mod device;
mod error;
mod factory;
mod flatten;
mod helper;
mod protocol;
mod uvc;

#[cfg(test)]
mod testing;

pub use camera::{Camera, ControlDirectory, ControlRange, ControlValue, ControlValues};
pub use commands::Command;
pub use controls::{find_control, Access, Component, Control, ControlTable, Unit, CONTROLS};
pub use device::{list_devices, DeviceInfo, UsbOpener, UvcDevice};
pub use error::{ControlKind, OpenError, UvcError};
pub use factory::{classify_open_error, CameraFactory, ConnectionFilter, DeviceOpener};
pub use flatten::{flatten_control_values, unflatten_control_value};
pub use helper::{CameraHelper, Configuration, SetReport};
