//! Custom error types for the uvcc tool.
//!
//! Provides structured errors instead of `Box<dyn Error>`, so callers can
//! programmatically distinguish between device-not-found, construction
//! failures, unknown control names, and per-control transfer failures.
//! Every wrapping variant keeps the underlying error reachable through
//! [`std::error::Error::source`].

use std::fmt;

use thiserror::Error;

use crate::factory::ConnectionFilter;

/// The classification set a control name was checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Gettable,
    Settable,
    Ranged,
}

impl fmt::Display for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gettable => write!(f, "gettable"),
            Self::Settable => write!(f, "settable"),
            Self::Ranged => write!(f, "ranged"),
        }
    }
}

/// Failure reported by a [`DeviceOpener`](crate::factory::DeviceOpener).
#[derive(Debug, Error)]
pub enum OpenError {
    /// No device on the bus matched the connection filter.
    #[error("no matching USB device")]
    NotFound,

    /// The matching device has no Video Control interface.
    #[error("device has no Video Control interface")]
    NoVideoControlInterface,

    /// A USB/libusb error occurred while enumerating or opening.
    #[error("USB error: {0}")]
    Usb(#[from] rusb::Error),
}

/// Top-level error type for all uvcc operations.
#[derive(Debug, Error)]
pub enum UvcError {
    /// No UVC device matched the requested filter.
    #[error("Could not find UVC device. Is a compatible camera connected? {filter}")]
    DeviceNotFound {
        filter: ConnectionFilter,
        #[source]
        source: OpenError,
    },

    /// Opening the device failed for any other reason.
    #[error("Could not open UVC device {filter}: {source}")]
    DeviceConstruction {
        filter: ConnectionFilter,
        #[source]
        source: OpenError,
    },

    /// The control name is not in the required classification set.
    #[error("Could not find a {kind} control named {name:?}.")]
    UnknownControl { name: String, kind: ControlKind },

    /// A control transfer for a single control failed.
    #[error("{request} failed for {control}: {source}")]
    Transfer {
        control: String,
        request: &'static str,
        #[source]
        source: rusb::Error,
    },

    /// The device does not expose the entity owning this control.
    #[error("{control} requires a {unit}, which this device does not expose")]
    UnitUnavailable { control: String, unit: &'static str },

    /// A value does not fit the control's components.
    #[error("Invalid value for {control}: {reason}")]
    InvalidValue { control: String, reason: String },

    /// A USB/libusb transport error outside a specific control transfer.
    #[error("USB error: {0}")]
    Usb(#[from] rusb::Error),

    /// Configuration input or output could not be (de)serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading configuration input or writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
