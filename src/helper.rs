//! Name-validated control access on top of a [`Camera`].
//!
//! Single-control operations check the name against the matching
//! classification set before any device I/O and propagate every error.
//! Bulk operations tolerate per-control failures: the failing control is
//! logged at info level and left out of the result.

use std::collections::BTreeMap;

use crate::camera::{Camera, ControlDirectory, ControlRange, ControlValue};
use crate::error::{ControlKind, UvcError};
use crate::flatten::flatten_control_values;

/// A bulk control configuration: control name to value.
pub type Configuration = BTreeMap<String, ControlValue>;

/// Per-control outcome of [`CameraHelper::set_values`].
#[derive(Debug, Default)]
pub struct SetReport {
    /// Controls written successfully, in write order.
    pub applied: Vec<String>,
    /// Controls whose write failed, with the cause.
    pub failed: Vec<(String, UvcError)>,
}

impl SetReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

pub struct CameraHelper<D, C> {
    directory: D,
    camera: C,
}

impl<D: ControlDirectory, C: Camera> CameraHelper<D, C> {
    pub fn new(directory: D, camera: C) -> Self {
        Self { directory, camera }
    }

    pub fn camera(&self) -> &C {
        &self.camera
    }

    fn require(names: &[String], name: &str, kind: ControlKind) -> Result<(), UvcError> {
        if names.iter().any(|n| n == name) {
            Ok(())
        } else {
            Err(UvcError::UnknownControl { name: name.to_string(), kind })
        }
    }

    /// Read one gettable control, flattened.
    pub fn get_value(&self, name: &str) -> Result<ControlValue, UvcError> {
        Self::require(&self.directory.gettable_control_names(), name, ControlKind::Gettable)?;

        let values = self.camera.get(name)?;
        Ok(flatten_control_values(&values))
    }

    /// Read the range of one ranged control.
    pub fn get_range(&self, name: &str) -> Result<ControlRange, UvcError> {
        Self::require(&self.directory.ranged_control_names(), name, ControlKind::Ranged)?;

        self.camera.range(name)
    }

    /// Write one settable control.
    pub fn set_value(&self, name: &str, value: &ControlValue) -> Result<(), UvcError> {
        Self::require(&self.directory.settable_control_names(), name, ControlKind::Settable)?;

        self.camera.set(name, value)
    }

    pub fn get_control_names(&self) -> Vec<String> {
        self.directory.control_names()
    }

    /// Ranges of every ranged control that could be read.
    pub fn get_ranges(&self) -> BTreeMap<String, ControlRange> {
        self.collect(self.directory.ranged_control_names(), "range", |name| {
            self.get_range(name)
        })
    }

    /// Values of every control that could be read.
    pub fn get_values(&self) -> BTreeMap<String, ControlValue> {
        self.collect(self.directory.control_names(), "value", |name| {
            self.get_value(name)
        })
    }

    /// Values of every settable control that could be read.
    pub fn get_settable_values(&self) -> BTreeMap<String, ControlValue> {
        self.collect(self.directory.settable_control_names(), "settable value", |name| {
            self.get_value(name)
        })
    }

    fn collect<T>(
        &self,
        names: Vec<String>,
        what: &str,
        read: impl Fn(&str) -> Result<T, UvcError>,
    ) -> BTreeMap<String, T> {
        let mut out = BTreeMap::new();

        for name in names {
            match read(&name) {
                Ok(v) => {
                    out.insert(name, v);
                }
                Err(e) => log::info!("Error getting {}, ignoring. {}: {}", what, name, e),
            }
        }

        out
    }

    /// Write a whole configuration.
    ///
    /// Every key is checked against the settable set first; one unknown
    /// name fails the call before anything is written. After that each
    /// control is written independently, in directory order, and failures
    /// are collected in the returned report instead of being returned as an
    /// error.
    pub fn set_values(&self, configuration: &Configuration) -> Result<SetReport, UvcError> {
        let settable = self.directory.settable_control_names();

        for name in configuration.keys() {
            if !settable.contains(name) {
                log::debug!("Aborting setting values: {:?} is not settable", name);
                return Err(UvcError::UnknownControl {
                    name: name.clone(),
                    kind: ControlKind::Settable,
                });
            }
        }

        let mut report = SetReport::default();

        // Directory order puts auto modes ahead of the values they gate
        let writes = settable
            .iter()
            .filter_map(|name| configuration.get_key_value(name.as_str()));

        for (name, value) in writes {
            match self.camera.set(name, value) {
                Ok(()) => report.applied.push(name.clone()),
                Err(e) => {
                    log::info!("Error setting value, ignoring. {} = {:?}: {}", name, value, e);
                    report.failed.push((name.clone(), e));
                }
            }
        }

        Ok(report)
    }
}
