//! UVC control transfers for standard camera terminal and processing unit
//! controls.
//!
//! Every request is a class-specific interface request:
//!   `wValue = selector << 8`, `wIndex = entity_id << 8 | interface`.
//! Payloads are the control's components, little-endian, in declared order.

use crate::camera::{Camera, ControlRange, ControlValue, ControlValues};
use crate::controls::{find_control, Control, Unit};
use crate::device::UvcDevice;
use crate::error::{ControlKind, UvcError};
use crate::flatten::{flatten_control_values, unflatten_control_value};
use crate::protocol::*;

fn request_name(request: u8) -> &'static str {
    match request {
        UVC_SET_CUR => "SET_CUR",
        UVC_GET_CUR => "GET_CUR",
        UVC_GET_MIN => "GET_MIN",
        UVC_GET_MAX => "GET_MAX",
        _ => "control request",
    }
}

/// Split a payload into the control's named components.
pub(crate) fn decode_payload(control: &Control, payload: &[u8]) -> Result<ControlValues, UvcError> {
    if payload.len() != control.payload_len() {
        return Err(UvcError::InvalidValue {
            control: control.name.to_string(),
            reason: format!(
                "device returned {} bytes, expected {}",
                payload.len(),
                control.payload_len()
            ),
        });
    }

    let mut values = ControlValues::new();
    let mut offset = 0;
    for component in control.components {
        let bytes = &payload[offset..offset + component.width];
        values.push(component.name, component.decode(bytes));
        offset += component.width;
    }

    Ok(values)
}

/// Encode a flattened value into the control's payload.
pub(crate) fn encode_payload(control: &Control, value: &ControlValue) -> Result<Vec<u8>, UvcError> {
    let values = unflatten_control_value(control.name, &control.component_names(), value)?;

    let mut payload = Vec::with_capacity(control.payload_len());
    for (component, (_, v)) in control.components.iter().zip(values.iter()) {
        if component.encode(v, &mut payload).is_none() {
            let (min, max) = component.bounds();
            return Err(UvcError::InvalidValue {
                control: control.name.to_string(),
                reason: format!("{} must be between {} and {}, got {}", component.name, min, max, v),
            });
        }
    }

    Ok(payload)
}

impl UvcDevice {
    fn entity_id(&self, control: &Control) -> Result<u8, UvcError> {
        let id = match control.unit {
            Unit::CameraTerminal => self.entities.camera_terminal,
            Unit::ProcessingUnit => self.entities.processing_unit,
        };

        id.ok_or_else(|| UvcError::UnitUnavailable {
            control: control.name.to_string(),
            unit: control.unit.as_str(),
        })
    }

    fn w_value_index(&self, control: &Control) -> Result<(u16, u16), UvcError> {
        let entity = self.entity_id(control)?;
        let w_value = u16::from(control.selector) << 8;
        let w_index = (u16::from(entity) << 8) | u16::from(self.interface);
        Ok((w_value, w_index))
    }

    /// GET_* request for a control, decoded into components.
    pub(crate) fn read_uvc_control(&self, control: &Control, request: u8) -> Result<ControlValues, UvcError> {
        let (w_value, w_index) = self.w_value_index(control)?;
        let mut buf = vec![0u8; control.payload_len()];

        let len = self
            .handle
            .read_control(UVC_REQUEST_TYPE_IN, request, w_value, w_index, &mut buf, USB_TIMEOUT)
            .map_err(|source| UvcError::Transfer {
                control: control.name.to_string(),
                request: request_name(request),
                source,
            })?;

        log::trace!("{} {}: {:02x?}", request_name(request), control.name, &buf[..len]);
        buf.truncate(len);
        decode_payload(control, &buf)
    }

    /// SET_CUR request for a control.
    pub(crate) fn write_uvc_control(&self, control: &Control, payload: &[u8]) -> Result<(), UvcError> {
        let (w_value, w_index) = self.w_value_index(control)?;
        log::trace!("SET_CUR {}: {:02x?}", control.name, payload);

        self.handle
            .write_control(UVC_REQUEST_TYPE_OUT, UVC_SET_CUR, w_value, w_index, payload, USB_TIMEOUT)
            .map_err(|source| UvcError::Transfer {
                control: control.name.to_string(),
                request: "SET_CUR",
                source,
            })?;

        Ok(())
    }
}

fn lookup(name: &str, kind: ControlKind) -> Result<&'static Control, UvcError> {
    find_control(name).ok_or_else(|| UvcError::UnknownControl { name: name.to_string(), kind })
}

impl Camera for UvcDevice {
    fn get(&self, name: &str) -> Result<ControlValues, UvcError> {
        let control = lookup(name, ControlKind::Gettable)?;
        self.read_uvc_control(control, UVC_GET_CUR)
    }

    fn set(&self, name: &str, value: &ControlValue) -> Result<(), UvcError> {
        let control = lookup(name, ControlKind::Settable)?;
        let payload = encode_payload(control, value)?;
        self.write_uvc_control(control, &payload)
    }

    fn range(&self, name: &str) -> Result<ControlRange, UvcError> {
        let control = lookup(name, ControlKind::Ranged)?;
        let min = self.read_uvc_control(control, UVC_GET_MIN)?;
        let max = self.read_uvc_control(control, UVC_GET_MAX)?;

        Ok(ControlRange {
            min: flatten_control_values(&min),
            max: flatten_control_values(&max),
        })
    }
}
