//! The table of standard UVC controls uvcc knows how to address.
//!
//! Each [`Control`] names its owning entity, its selector, and an explicit
//! ordered list of sub-components. The component order is the order used
//! when flattening a value to a sequence and when writing a sequence back.

use std::fmt;

use crate::camera::ControlDirectory;
use crate::protocol::*;

/// The UVC entity a control is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Unit {
    CameraTerminal,
    ProcessingUnit,
}

impl Unit {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CameraTerminal => "camera terminal",
            Self::ProcessingUnit => "processing unit",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which requests a control accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    ReadOnly,
    ReadWrite,
}

/// One little-endian integer field of a control's payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Component {
    pub name: &'static str,
    /// Width in bytes: 1, 2 or 4.
    pub width: usize,
    pub signed: bool,
}

impl Component {
    const fn new(name: &'static str, width: usize, signed: bool) -> Self {
        Self { name, width, signed }
    }

    const fn u8(name: &'static str) -> Self {
        Self::new(name, 1, false)
    }

    const fn i8(name: &'static str) -> Self {
        Self::new(name, 1, true)
    }

    const fn u16(name: &'static str) -> Self {
        Self::new(name, 2, false)
    }

    const fn i16(name: &'static str) -> Self {
        Self::new(name, 2, true)
    }

    const fn u32(name: &'static str) -> Self {
        Self::new(name, 4, false)
    }

    const fn i32(name: &'static str) -> Self {
        Self::new(name, 4, true)
    }

    /// Inclusive bounds of values this field can carry.
    pub fn bounds(&self) -> (i64, i64) {
        let bits = (self.width * 8) as u32;
        if self.signed {
            (-(1i64 << (bits - 1)), (1i64 << (bits - 1)) - 1)
        } else {
            (0, (1i64 << bits) - 1)
        }
    }

    /// Decode this field from exactly `width` little-endian bytes.
    pub fn decode(&self, bytes: &[u8]) -> i64 {
        let mut raw = [0u8; 8];
        raw[..bytes.len()].copy_from_slice(bytes);
        let unsigned = u64::from_le_bytes(raw);

        if self.signed {
            let shift = 64 - (bytes.len() as u32 * 8);
            ((unsigned << shift) as i64) >> shift
        } else {
            unsigned as i64
        }
    }

    /// Append this field's little-endian encoding. Returns `None` when the
    /// value is out of bounds.
    pub fn encode(&self, value: i64, out: &mut Vec<u8>) -> Option<()> {
        let (min, max) = self.bounds();
        if value < min || value > max {
            return None;
        }
        out.extend_from_slice(&value.to_le_bytes()[..self.width]);
        Some(())
    }
}

/// A named control and how to address it.
#[derive(Debug, Clone, Copy)]
pub struct Control {
    pub name: &'static str,
    pub unit: Unit,
    pub selector: u8,
    pub components: &'static [Component],
    pub access: Access,
    /// Whether GET_MIN / GET_MAX are defined for this control.
    pub ranged: bool,
}

impl Control {
    pub fn is_gettable(&self) -> bool {
        true
    }

    pub fn is_settable(&self) -> bool {
        self.access == Access::ReadWrite
    }

    pub fn is_ranged(&self) -> bool {
        self.ranged
    }

    /// Total payload size in bytes.
    pub fn payload_len(&self) -> usize {
        self.components.iter().map(|c| c.width).sum()
    }

    pub fn component_names(&self) -> Vec<&'static str> {
        self.components.iter().map(|c| c.name).collect()
    }
}

const fn control(
    name: &'static str,
    unit: Unit,
    selector: u8,
    components: &'static [Component],
    access: Access,
    ranged: bool,
) -> Control {
    Control { name, unit, selector, components, access, ranged }
}

use Access::{ReadOnly, ReadWrite};
use Unit::{CameraTerminal as CT, ProcessingUnit as PU};

const VALUE_U8: &[Component] = &[Component::u8("value")];
const VALUE_I8: &[Component] = &[Component::i8("value")];
const VALUE_U16: &[Component] = &[Component::u16("value")];
const VALUE_I16: &[Component] = &[Component::i16("value")];
const VALUE_U32: &[Component] = &[Component::u32("value")];

/// Every control uvcc can address, in listing order.
///
/// Bulk writes follow this order, so each auto mode precedes the manual
/// value it gates.
pub static CONTROLS: &[Control] = &[
    // --- Camera terminal ---
    control("scanning_mode", CT, CT_SCANNING_MODE_CONTROL, VALUE_U8, ReadWrite, false),
    control("auto_exposure_mode", CT, CT_AE_MODE_CONTROL, VALUE_U8, ReadWrite, false),
    control("auto_exposure_priority", CT, CT_AE_PRIORITY_CONTROL, VALUE_U8, ReadWrite, false),
    control("absolute_exposure_time", CT, CT_EXPOSURE_TIME_ABSOLUTE_CONTROL, VALUE_U32, ReadWrite, true),
    control("relative_exposure_time", CT, CT_EXPOSURE_TIME_RELATIVE_CONTROL, VALUE_I8, ReadWrite, false),
    control("auto_focus", CT, CT_FOCUS_AUTO_CONTROL, VALUE_U8, ReadWrite, false),
    control("absolute_focus", CT, CT_FOCUS_ABSOLUTE_CONTROL, VALUE_U16, ReadWrite, true),
    control(
        "relative_focus",
        CT,
        CT_FOCUS_RELATIVE_CONTROL,
        &[Component::i8("focus_relative"), Component::u8("speed")],
        ReadWrite,
        true,
    ),
    control("absolute_iris", CT, CT_IRIS_ABSOLUTE_CONTROL, VALUE_U16, ReadWrite, true),
    control("relative_iris", CT, CT_IRIS_RELATIVE_CONTROL, VALUE_U8, ReadWrite, false),
    control("absolute_zoom", CT, CT_ZOOM_ABSOLUTE_CONTROL, VALUE_U16, ReadWrite, true),
    control(
        "relative_zoom",
        CT,
        CT_ZOOM_RELATIVE_CONTROL,
        &[Component::i8("zoom"), Component::u8("digital_zoom"), Component::u8("speed")],
        ReadWrite,
        true,
    ),
    control(
        "absolute_pan_tilt",
        CT,
        CT_PANTILT_ABSOLUTE_CONTROL,
        &[Component::i32("pan"), Component::i32("tilt")],
        ReadWrite,
        true,
    ),
    control(
        "relative_pan_tilt",
        CT,
        CT_PANTILT_RELATIVE_CONTROL,
        &[
            Component::i8("pan_relative"),
            Component::u8("pan_speed"),
            Component::i8("tilt_relative"),
            Component::u8("tilt_speed"),
        ],
        ReadWrite,
        true,
    ),
    control("absolute_roll", CT, CT_ROLL_ABSOLUTE_CONTROL, VALUE_I16, ReadWrite, true),
    control(
        "relative_roll",
        CT,
        CT_ROLL_RELATIVE_CONTROL,
        &[Component::i8("roll_relative"), Component::u8("speed")],
        ReadWrite,
        true,
    ),
    control("privacy", CT, CT_PRIVACY_CONTROL, VALUE_U8, ReadWrite, false),
    // --- Processing unit ---
    control("backlight_compensation", PU, PU_BACKLIGHT_COMPENSATION_CONTROL, VALUE_U16, ReadWrite, true),
    control("brightness", PU, PU_BRIGHTNESS_CONTROL, VALUE_I16, ReadWrite, true),
    control("auto_contrast", PU, PU_CONTRAST_AUTO_CONTROL, VALUE_U8, ReadWrite, false),
    control("contrast", PU, PU_CONTRAST_CONTROL, VALUE_U16, ReadWrite, true),
    control("gain", PU, PU_GAIN_CONTROL, VALUE_U16, ReadWrite, true),
    control("power_line_frequency", PU, PU_POWER_LINE_FREQUENCY_CONTROL, VALUE_U8, ReadWrite, false),
    control("auto_hue", PU, PU_HUE_AUTO_CONTROL, VALUE_U8, ReadWrite, false),
    control("hue", PU, PU_HUE_CONTROL, VALUE_I16, ReadWrite, true),
    control("saturation", PU, PU_SATURATION_CONTROL, VALUE_U16, ReadWrite, true),
    control("sharpness", PU, PU_SHARPNESS_CONTROL, VALUE_U16, ReadWrite, true),
    control("gamma", PU, PU_GAMMA_CONTROL, VALUE_U16, ReadWrite, true),
    control(
        "auto_white_balance_temperature",
        PU,
        PU_WHITE_BALANCE_TEMPERATURE_AUTO_CONTROL,
        VALUE_U8,
        ReadWrite,
        false,
    ),
    control(
        "white_balance_temperature",
        PU,
        PU_WHITE_BALANCE_TEMPERATURE_CONTROL,
        VALUE_U16,
        ReadWrite,
        true,
    ),
    control(
        "auto_white_balance_component",
        PU,
        PU_WHITE_BALANCE_COMPONENT_AUTO_CONTROL,
        VALUE_U8,
        ReadWrite,
        false,
    ),
    control(
        "white_balance_component",
        PU,
        PU_WHITE_BALANCE_COMPONENT_CONTROL,
        &[Component::u16("blue"), Component::u16("red")],
        ReadWrite,
        true,
    ),
    control("digital_multiplier", PU, PU_DIGITAL_MULTIPLIER_CONTROL, VALUE_U16, ReadWrite, true),
    control(
        "digital_multiplier_limit",
        PU,
        PU_DIGITAL_MULTIPLIER_LIMIT_CONTROL,
        VALUE_U16,
        ReadWrite,
        true,
    ),
    control("analog_video_standard", PU, PU_ANALOG_VIDEO_STANDARD_CONTROL, VALUE_U8, ReadOnly, false),
    control("analog_lock_status", PU, PU_ANALOG_LOCK_STATUS_CONTROL, VALUE_U8, ReadOnly, false),
];

/// Look up a control by name.
pub fn find_control(name: &str) -> Option<&'static Control> {
    CONTROLS.iter().find(|c| c.name == name)
}

/// [`ControlDirectory`] backed by a static control table.
#[derive(Debug, Clone, Copy)]
pub struct ControlTable {
    controls: &'static [Control],
}

impl ControlTable {
    pub fn new(controls: &'static [Control]) -> Self {
        Self { controls }
    }

    fn names_where(&self, pred: impl Fn(&Control) -> bool) -> Vec<String> {
        self.controls
            .iter()
            .filter(|c| pred(c))
            .map(|c| c.name.to_string())
            .collect()
    }
}

impl Default for ControlTable {
    fn default() -> Self {
        Self::new(CONTROLS)
    }
}

impl ControlDirectory for ControlTable {
    fn control_names(&self) -> Vec<String> {
        self.names_where(|_| true)
    }

    fn gettable_control_names(&self) -> Vec<String> {
        self.names_where(Control::is_gettable)
    }

    fn settable_control_names(&self) -> Vec<String> {
        self.names_where(Control::is_settable)
    }

    fn ranged_control_names(&self) -> Vec<String> {
        self.names_where(Control::is_ranged)
    }
}
