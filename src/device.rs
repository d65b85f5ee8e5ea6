//! USB device discovery, opening, and lifecycle management.
//!
//! [`UvcDevice::open`] scans the USB bus for a device matching a
//! [`ConnectionFilter`] that exposes a Video Control interface, locates its
//! camera terminal and processing unit, claims the interface, and returns a
//! handle ready for control transfers. The [`Drop`] impl releases the
//! interface and reattaches the kernel driver on cleanup.

use rusb::{Context, Device, DeviceHandle, UsbContext};
use serde::Serialize;

use crate::error::{OpenError, UvcError};
use crate::factory::{ConnectionFilter, DeviceOpener};
use crate::protocol::*;

/// Entity IDs found in the Video Control interface descriptors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Entities {
    pub(crate) camera_terminal: Option<u8>,
    pub(crate) processing_unit: Option<u8>,
}

/// Result of device discovery (internal).
struct FoundDevice {
    device: Device<Context>,
    interface: u8,
    entities: Entities,
}

/// A UVC device visible on the bus.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceInfo {
    pub bus: u8,
    pub address: u8,
    pub vendor: u16,
    pub product: u16,
}

/// Handle to an opened UVC camera.
pub struct UvcDevice {
    pub(crate) handle: DeviceHandle<Context>,
    pub(crate) interface: u8,
    pub(crate) entities: Entities,
    kernel_driver_was_active: bool,
}

impl UvcDevice {
    /// Open the first UVC device matching `filter` and claim its Video
    /// Control interface.
    pub fn open(filter: &ConnectionFilter) -> Result<Self, OpenError> {
        let context = Context::new()?;

        let found = Self::find_device(&context, filter)?;
        let handle = found.device.open()?;
        let interface = found.interface;

        let kernel_driver_was_active = match handle.kernel_driver_active(interface) {
            Ok(active) => active,
            // Platforms without kernel driver support
            Err(rusb::Error::NotSupported) => false,
            Err(e) => return Err(e.into()),
        };

        if kernel_driver_was_active {
            handle.detach_kernel_driver(interface)?;
            log::info!("Temporarily detached kernel driver from interface {}", interface);
        }

        handle.claim_interface(interface)?;
        log::debug!("Claimed interface {}", interface);

        let desc = found.device.device_descriptor()?;
        log::info!(
            "Device: {:04x}:{:04x} (bus {:03} address {:03}), camera terminal {:?}, processing unit {:?}",
            desc.vendor_id(),
            desc.product_id(),
            found.device.bus_number(),
            found.device.address(),
            found.entities.camera_terminal,
            found.entities.processing_unit,
        );

        Ok(Self {
            handle,
            interface,
            entities: found.entities,
            kernel_driver_was_active,
        })
    }

    fn find_device(context: &Context, filter: &ConnectionFilter) -> Result<FoundDevice, OpenError> {
        let mut matched_without_uvc = false;

        for device in context.devices()?.iter() {
            let desc = match device.device_descriptor() {
                Ok(d) => d,
                Err(_) => continue,
            };

            if !filter.matches(desc.vendor_id(), desc.product_id(), device.address()) {
                continue;
            }

            match video_control_interface(&device) {
                Ok(Some((interface, entities))) => {
                    return Ok(FoundDevice { device, interface, entities });
                }
                Ok(None) => matched_without_uvc = true,
                Err(e) => log::debug!("{:?}: skipping, cannot read configuration: {}", device, e),
            }
        }

        let constrained = *filter != ConnectionFilter::default();
        if constrained && matched_without_uvc {
            Err(OpenError::NoVideoControlInterface)
        } else {
            Err(OpenError::NotFound)
        }
    }
}

impl Drop for UvcDevice {
    fn drop(&mut self) {
        if let Err(e) = self.handle.release_interface(self.interface) {
            log::warn!("Failed to release interface: {}", e);
        }

        if self.kernel_driver_was_active {
            // Best-effort reattach
            let _ = self.handle.attach_kernel_driver(self.interface);
        }
    }
}

/// [`DeviceOpener`] for real hardware through libusb.
#[derive(Debug, Clone, Copy, Default)]
pub struct UsbOpener;

impl DeviceOpener for UsbOpener {
    type Camera = UvcDevice;

    fn open(&self, filter: &ConnectionFilter) -> Result<UvcDevice, OpenError> {
        UvcDevice::open(filter)
    }
}

/// List every device on the bus that exposes a Video Control interface.
pub fn list_devices() -> Result<Vec<DeviceInfo>, UvcError> {
    let context = Context::new()?;
    let mut out = Vec::new();

    for device in context.devices()?.iter() {
        let desc = match device.device_descriptor() {
            Ok(d) => d,
            Err(_) => continue,
        };

        match video_control_interface(&device) {
            Ok(Some(_)) => out.push(DeviceInfo {
                bus: device.bus_number(),
                address: device.address(),
                vendor: desc.vendor_id(),
                product: desc.product_id(),
            }),
            Ok(None) => {}
            Err(e) => log::debug!("{:?}: skipping, cannot read configuration: {}", device, e),
        }
    }

    Ok(out)
}

/// Find the Video Control interface of `device` and the entities it
/// declares.
fn video_control_interface(device: &Device<Context>) -> Result<Option<(u8, Entities)>, rusb::Error> {
    let config = match device.active_config_descriptor() {
        Ok(c) => c,
        Err(_) => device.config_descriptor(0)?,
    };

    for interface in config.interfaces() {
        for desc in interface.descriptors() {
            if desc.class_code() == CC_VIDEO && desc.sub_class_code() == SC_VIDEOCONTROL {
                return Ok(Some((desc.interface_number(), parse_entities(desc.extra()))));
            }
        }
    }

    Ok(None)
}

/// Walk the class-specific descriptors that follow a Video Control
/// interface descriptor, picking the first camera input terminal and the
/// first processing unit.
pub(crate) fn parse_entities(extra: &[u8]) -> Entities {
    let mut entities = Entities::default();
    let mut rest = extra;

    while rest.len() >= 3 {
        let len = rest[0] as usize;
        if len < 3 || len > rest.len() {
            log::debug!("malformed class-specific descriptor (bLength {})", len);
            break;
        }

        let (desc, tail) = rest.split_at(len);
        rest = tail;

        if desc[1] != CS_INTERFACE {
            continue;
        }

        match desc[2] {
            VC_INPUT_TERMINAL if len >= 8 => {
                let terminal_type = u16::from_le_bytes([desc[4], desc[5]]);
                if terminal_type == ITT_CAMERA && entities.camera_terminal.is_none() {
                    entities.camera_terminal = Some(desc[3]);
                }
            }
            VC_PROCESSING_UNIT if len >= 4 && entities.processing_unit.is_none() => {
                entities.processing_unit = Some(desc[3]);
            }
            _ => {}
        }
    }

    entities
}

#[cfg(test)]
mod tests {
    use super::*;

    // VC header (subtype 0x01), camera input terminal id 1, processing unit
    // id 2, output terminal id 3. Trimmed-down layout of a typical webcam.
    fn typical_webcam() -> Vec<u8> {
        let mut d = vec![0x0d, 0x24, 0x01, 0x00, 0x01, 0x4d, 0x00, 0x80, 0xc3, 0xc9, 0x01, 0x01, 0x01];
        d.extend_from_slice(&[0x12, 0x24, 0x02, 0x01, 0x01, 0x02, 0x00, 0x00]);
        d.extend_from_slice(&[0x00; 10]);
        d.extend_from_slice(&[0x0b, 0x24, 0x05, 0x02, 0x01, 0x00, 0x00, 0x02, 0x7f, 0x17, 0x00]);
        d.extend_from_slice(&[0x09, 0x24, 0x03, 0x03, 0x01, 0x01, 0x00, 0x02, 0x00]);
        d
    }

    #[test]
    fn finds_camera_terminal_and_processing_unit() {
        let entities = parse_entities(&typical_webcam());
        assert_eq!(
            entities,
            Entities { camera_terminal: Some(1), processing_unit: Some(2) }
        );
    }

    #[test]
    fn ignores_non_camera_input_terminals() {
        // Input terminal id 4 of type 0x0401 (composite connector)
        let d = [0x08, 0x24, 0x02, 0x04, 0x01, 0x04, 0x00, 0x00];
        assert_eq!(parse_entities(&d).camera_terminal, None);
    }

    #[test]
    fn stops_on_malformed_length() {
        let mut d = vec![0x0b, 0x24, 0x05, 0x02, 0x01, 0x00, 0x00, 0x02, 0x7f, 0x17, 0x00];
        d.extend_from_slice(&[0x40, 0x24, 0x02, 0x01]);
        let entities = parse_entities(&d);
        assert_eq!(entities.processing_unit, Some(2));
        assert_eq!(entities.camera_terminal, None);
    }

    #[test]
    fn keeps_first_processing_unit() {
        let mut d = vec![0x0b, 0x24, 0x05, 0x02, 0x01, 0x00, 0x00, 0x02, 0x7f, 0x17, 0x00];
        d.extend_from_slice(&[0x0b, 0x24, 0x05, 0x05, 0x01, 0x00, 0x00, 0x02, 0x7f, 0x17, 0x00]);
        assert_eq!(parse_entities(&d).processing_unit, Some(2));
    }

    #[test]
    fn empty_extra_has_no_entities() {
        assert_eq!(parse_entities(&[]), Entities::default());
    }
}
