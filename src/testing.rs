//! In-memory fakes of the collaborator traits, shared by unit tests.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};

use crate::camera::{Camera, ControlDirectory, ControlRange, ControlValue, ControlValues};
use crate::error::UvcError;

fn stall(control: &str, request: &'static str) -> UvcError {
    UvcError::Transfer {
        control: control.to_string(),
        request,
        source: rusb::Error::Pipe,
    }
}

/// Camera that serves values from memory, counts calls, and stalls on
/// selected controls.
#[derive(Default)]
pub struct FakeCamera {
    values: RefCell<BTreeMap<String, ControlValues>>,
    ranges: BTreeMap<String, ControlRange>,
    failing: BTreeSet<String>,
    pub get_calls: Cell<usize>,
    pub range_calls: Cell<usize>,
    pub writes: RefCell<Vec<(String, ControlValue)>>,
}

impl FakeCamera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, name: &str, components: &[(&str, i64)]) -> Self {
        self.values
            .get_mut()
            .insert(name.to_string(), components.iter().copied().collect());
        self
    }

    pub fn with_range(mut self, name: &str, min: i64, max: i64) -> Self {
        self.ranges.insert(
            name.to_string(),
            ControlRange { min: min.into(), max: max.into() },
        );
        self
    }

    /// Every transfer for `name` fails with a pipe stall.
    pub fn failing(mut self, name: &str) -> Self {
        self.failing.insert(name.to_string());
        self
    }

    pub fn set_count(&self) -> usize {
        self.writes.borrow().len()
    }

    pub fn written(&self) -> Vec<String> {
        self.writes.borrow().iter().map(|(n, _)| n.clone()).collect()
    }
}

impl Camera for FakeCamera {
    fn get(&self, name: &str) -> Result<ControlValues, UvcError> {
        self.get_calls.set(self.get_calls.get() + 1);
        if self.failing.contains(name) {
            return Err(stall(name, "GET_CUR"));
        }
        self.values
            .borrow()
            .get(name)
            .cloned()
            .ok_or_else(|| stall(name, "GET_CUR"))
    }

    fn set(&self, name: &str, value: &ControlValue) -> Result<(), UvcError> {
        if self.failing.contains(name) {
            return Err(stall(name, "SET_CUR"));
        }
        self.writes.borrow_mut().push((name.to_string(), value.clone()));
        Ok(())
    }

    fn range(&self, name: &str) -> Result<ControlRange, UvcError> {
        self.range_calls.set(self.range_calls.get() + 1);
        if self.failing.contains(name) {
            return Err(stall(name, "GET_MIN"));
        }
        self.ranges
            .get(name)
            .cloned()
            .ok_or_else(|| stall(name, "GET_MIN"))
    }
}

/// Directory with explicit name lists.
#[derive(Default)]
pub struct FakeDirectory {
    pub all: Vec<String>,
    pub gettable: Vec<String>,
    pub settable: Vec<String>,
    pub ranged: Vec<String>,
}

fn owned(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

impl FakeDirectory {
    /// Every name is gettable and settable; `ranged` is a subset.
    pub fn uniform(names: &[&str], ranged: &[&str]) -> Self {
        Self {
            all: owned(names),
            gettable: owned(names),
            settable: owned(names),
            ranged: owned(ranged),
        }
    }

    pub fn read_only(mut self, name: &str) -> Self {
        self.settable.retain(|n| n != name);
        self
    }
}

impl ControlDirectory for FakeDirectory {
    fn control_names(&self) -> Vec<String> {
        self.all.clone()
    }

    fn gettable_control_names(&self) -> Vec<String> {
        self.gettable.clone()
    }

    fn settable_control_names(&self) -> Vec<String> {
        self.settable.clone()
    }

    fn ranged_control_names(&self) -> Vec<String> {
        self.ranged.clone()
    }
}
