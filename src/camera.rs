//! Control value types and the collaborator traits the orchestration layer
//! is written against.
//!
//! [`ControlDirectory`] answers which names exist in which classification
//! set; [`Camera`] performs the actual reads and writes. The rusb backend
//! implements both (see [`ControlTable`](crate::ControlTable) and
//! [`UvcDevice`](crate::UvcDevice)); tests substitute fakes.

use serde::{Deserialize, Serialize};

use crate::error::UvcError;

/// Raw value of one control as read from the device: each sub-component
/// paired with its name, in the control's declared component order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlValues {
    components: Vec<(String, i64)>,
}

impl ControlValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a component. Order of calls is the component order.
    pub fn push(&mut self, name: impl Into<String>, value: i64) {
        self.components.push((name.into(), value));
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Component values in order, without their names.
    pub fn values(&self) -> impl Iterator<Item = i64> + '_ {
        self.components.iter().map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> + '_ {
        self.components.iter().map(|(n, v)| (n.as_str(), *v))
    }
}

impl<S: Into<String>> FromIterator<(S, i64)> for ControlValues {
    fn from_iter<I: IntoIterator<Item = (S, i64)>>(iter: I) -> Self {
        Self {
            components: iter.into_iter().map(|(n, v)| (n.into(), v)).collect(),
        }
    }
}

/// A flattened control value: a bare number for single-component controls,
/// an ordered sequence for multi-component ones (e.g. pan + tilt).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ControlValue {
    Single(i64),
    Multiple(Vec<i64>),
}

impl ControlValue {
    /// Build a value from positional arguments: one number stays single.
    pub fn from_components(mut values: Vec<i64>) -> Self {
        if values.len() == 1 {
            Self::Single(values.remove(0))
        } else {
            Self::Multiple(values)
        }
    }

    pub fn as_slice(&self) -> &[i64] {
        match self {
            Self::Single(v) => std::slice::from_ref(v),
            Self::Multiple(vs) => vs,
        }
    }
}

impl From<i64> for ControlValue {
    fn from(v: i64) -> Self {
        Self::Single(v)
    }
}

/// Device-reported bounds of a ranged control, flattened like values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlRange {
    pub min: ControlValue,
    pub max: ControlValue,
}

/// Name lists for the four control classification sets.
///
/// Every list is ordered; repeated calls without an intervening state
/// change return equal lists.
pub trait ControlDirectory {
    fn control_names(&self) -> Vec<String>;
    fn gettable_control_names(&self) -> Vec<String>;
    fn settable_control_names(&self) -> Vec<String>;
    fn ranged_control_names(&self) -> Vec<String>;
}

/// Per-control I/O against an opened camera.
pub trait Camera {
    fn get(&self, name: &str) -> Result<ControlValues, UvcError>;
    fn set(&self, name: &str, value: &ControlValue) -> Result<(), UvcError>;
    fn range(&self, name: &str) -> Result<ControlRange, UvcError>;
}

impl<C: Camera + ?Sized> Camera for Box<C> {
    fn get(&self, name: &str) -> Result<ControlValues, UvcError> {
        (**self).get(name)
    }

    fn set(&self, name: &str, value: &ControlValue) -> Result<(), UvcError> {
        (**self).set(name, value)
    }

    fn range(&self, name: &str) -> Result<ControlRange, UvcError> {
        (**self).range(name)
    }
}
