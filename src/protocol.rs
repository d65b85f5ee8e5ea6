//! Protocol constants for UVC control transfers.
//!
//! All magic numbers, request codes, and control selectors are defined here
//! so the rest of the codebase references named constants instead of raw hex.
//! Values follow the USB Video Class 1.5 specification, appendix A.

// ---------------------------------------------------------------------------
// Interface identification
// ---------------------------------------------------------------------------

/// bInterfaceClass for Video (CC_VIDEO).
pub const CC_VIDEO: u8 = 0x0e;
/// bInterfaceSubClass for the Video Control interface (SC_VIDEOCONTROL).
pub const SC_VIDEOCONTROL: u8 = 0x01;

// ---------------------------------------------------------------------------
// Class-specific Video Control descriptors
// ---------------------------------------------------------------------------

/// bDescriptorType for class-specific interface descriptors.
pub const CS_INTERFACE: u8 = 0x24;
/// bDescriptorSubtype of an input terminal descriptor.
pub const VC_INPUT_TERMINAL: u8 = 0x02;
/// bDescriptorSubtype of a processing unit descriptor.
pub const VC_PROCESSING_UNIT: u8 = 0x05;
/// wTerminalType of a camera sensor input terminal.
pub const ITT_CAMERA: u16 = 0x0201;

// ---------------------------------------------------------------------------
// Class-specific requests
// ---------------------------------------------------------------------------

/// bmRequestType for UVC class request (host-to-device, interface recipient).
pub const UVC_REQUEST_TYPE_OUT: u8 = 0x21;
/// bmRequestType for UVC class request (device-to-host, interface recipient).
pub const UVC_REQUEST_TYPE_IN: u8 = 0xA1;
/// SET_CUR bRequest.
pub const UVC_SET_CUR: u8 = 0x01;
/// GET_CUR bRequest.
pub const UVC_GET_CUR: u8 = 0x81;
/// GET_MIN bRequest.
pub const UVC_GET_MIN: u8 = 0x82;
/// GET_MAX bRequest.
pub const UVC_GET_MAX: u8 = 0x83;

// ---------------------------------------------------------------------------
// Camera terminal control selectors (table A-12)
// ---------------------------------------------------------------------------

pub const CT_SCANNING_MODE_CONTROL: u8 = 0x01;
pub const CT_AE_MODE_CONTROL: u8 = 0x02;
pub const CT_AE_PRIORITY_CONTROL: u8 = 0x03;
pub const CT_EXPOSURE_TIME_ABSOLUTE_CONTROL: u8 = 0x04;
pub const CT_EXPOSURE_TIME_RELATIVE_CONTROL: u8 = 0x05;
pub const CT_FOCUS_ABSOLUTE_CONTROL: u8 = 0x06;
pub const CT_FOCUS_RELATIVE_CONTROL: u8 = 0x07;
pub const CT_FOCUS_AUTO_CONTROL: u8 = 0x08;
pub const CT_IRIS_ABSOLUTE_CONTROL: u8 = 0x09;
pub const CT_IRIS_RELATIVE_CONTROL: u8 = 0x0a;
pub const CT_ZOOM_ABSOLUTE_CONTROL: u8 = 0x0b;
pub const CT_ZOOM_RELATIVE_CONTROL: u8 = 0x0c;
pub const CT_PANTILT_ABSOLUTE_CONTROL: u8 = 0x0d;
pub const CT_PANTILT_RELATIVE_CONTROL: u8 = 0x0e;
pub const CT_ROLL_ABSOLUTE_CONTROL: u8 = 0x0f;
pub const CT_ROLL_RELATIVE_CONTROL: u8 = 0x10;
pub const CT_PRIVACY_CONTROL: u8 = 0x11;

// ---------------------------------------------------------------------------
// Processing unit control selectors (table A-13)
// ---------------------------------------------------------------------------

pub const PU_BACKLIGHT_COMPENSATION_CONTROL: u8 = 0x01;
pub const PU_BRIGHTNESS_CONTROL: u8 = 0x02;
pub const PU_CONTRAST_CONTROL: u8 = 0x03;
pub const PU_GAIN_CONTROL: u8 = 0x04;
pub const PU_POWER_LINE_FREQUENCY_CONTROL: u8 = 0x05;
pub const PU_HUE_CONTROL: u8 = 0x06;
pub const PU_SATURATION_CONTROL: u8 = 0x07;
pub const PU_SHARPNESS_CONTROL: u8 = 0x08;
pub const PU_GAMMA_CONTROL: u8 = 0x09;
pub const PU_WHITE_BALANCE_TEMPERATURE_CONTROL: u8 = 0x0a;
pub const PU_WHITE_BALANCE_TEMPERATURE_AUTO_CONTROL: u8 = 0x0b;
pub const PU_WHITE_BALANCE_COMPONENT_CONTROL: u8 = 0x0c;
pub const PU_WHITE_BALANCE_COMPONENT_AUTO_CONTROL: u8 = 0x0d;
pub const PU_DIGITAL_MULTIPLIER_CONTROL: u8 = 0x0e;
pub const PU_DIGITAL_MULTIPLIER_LIMIT_CONTROL: u8 = 0x0f;
pub const PU_HUE_AUTO_CONTROL: u8 = 0x10;
pub const PU_ANALOG_VIDEO_STANDARD_CONTROL: u8 = 0x11;
pub const PU_ANALOG_LOCK_STATUS_CONTROL: u8 = 0x12;
pub const PU_CONTRAST_AUTO_CONTROL: u8 = 0x13;

// ---------------------------------------------------------------------------
// Shared
// ---------------------------------------------------------------------------

/// Default USB control transfer timeout.
pub const USB_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(1);
