//! Construct a camera handle from optional connection filters.
//!
//! [`CameraFactory::get`] builds a [`ConnectionFilter`], asks its
//! [`DeviceOpener`] for a camera, and wraps any failure into either
//! [`UvcError::DeviceNotFound`] or [`UvcError::DeviceConstruction`] through
//! [`classify_open_error`].

use std::fmt;

use serde::Serialize;

use crate::camera::Camera;
use crate::error::{OpenError, UvcError};

/// Vendor id, product id and bus address a device must match.
///
/// `None` means unconstrained. Zero is a literal value: `Some(0)` only
/// matches a device that actually reports 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConnectionFilter {
    pub vendor: Option<u16>,
    pub product: Option<u16>,
    pub address: Option<u8>,
}

impl ConnectionFilter {
    pub fn new(vendor: Option<u16>, product: Option<u16>, address: Option<u8>) -> Self {
        Self { vendor, product, address }
    }

    /// Whether a device with these ids satisfies every set field.
    pub fn matches(&self, vendor: u16, product: u16, address: u8) -> bool {
        self.vendor.is_none_or(|v| v == vendor)
            && self.product.is_none_or(|p| p == product)
            && self.address.is_none_or(|a| a == address)
    }
}

/// Serialized as JSON, e.g. `{"vendor":1133,"product":null,"address":null}`.
impl fmt::Display for ConnectionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

/// Something that can open a camera matching a filter.
pub trait DeviceOpener {
    type Camera: Camera;

    fn open(&self, filter: &ConnectionFilter) -> Result<Self::Camera, OpenError>;
}

/// Decide whether an open failure means "no such device".
///
/// [`OpenError::NotFound`] is the typed signal. A device that disappears
/// between enumeration and open surfaces as `NoDevice`/`NotFound` from
/// libusb and is treated the same way. Everything else is a construction
/// failure.
pub fn classify_open_error(filter: ConnectionFilter, error: OpenError) -> UvcError {
    let not_found = matches!(
        error,
        OpenError::NotFound | OpenError::Usb(rusb::Error::NoDevice | rusb::Error::NotFound)
    );

    if not_found {
        UvcError::DeviceNotFound { filter, source: error }
    } else {
        UvcError::DeviceConstruction { filter, source: error }
    }
}

/// Builds camera handles through a [`DeviceOpener`].
pub struct CameraFactory<O> {
    opener: O,
}

impl<O: DeviceOpener> CameraFactory<O> {
    pub fn new(opener: O) -> Self {
        Self { opener }
    }

    /// Open the camera matching `vendor`, `product` and `address`.
    pub fn get(
        &self,
        vendor: Option<u16>,
        product: Option<u16>,
        address: Option<u8>,
    ) -> Result<O::Camera, UvcError> {
        let filter = ConnectionFilter::new(vendor, product, address);
        log::debug!("Opening UVC device matching {}", filter);

        self.opener
            .open(&filter)
            .map_err(|e| classify_open_error(filter, e))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::error::Error as _;

    use super::*;
    use crate::testing::FakeCamera;

    /// Records the filters it is asked for and fails with a canned error.
    struct FakeOpener {
        seen: RefCell<Vec<ConnectionFilter>>,
        fail_with: fn() -> Option<OpenError>,
    }

    impl FakeOpener {
        fn new(fail_with: fn() -> Option<OpenError>) -> Self {
            Self { seen: RefCell::new(Vec::new()), fail_with }
        }
    }

    impl DeviceOpener for FakeOpener {
        type Camera = FakeCamera;

        fn open(&self, filter: &ConnectionFilter) -> Result<FakeCamera, OpenError> {
            self.seen.borrow_mut().push(*filter);
            match (self.fail_with)() {
                Some(e) => Err(e),
                None => Ok(FakeCamera::new()),
            }
        }
    }

    #[test]
    fn passes_filter_to_opener() {
        let factory = CameraFactory::new(FakeOpener::new(|| None));
        factory.get(Some(0x046d), None, Some(7)).unwrap();
        assert_eq!(
            factory.opener.seen.borrow().as_slice(),
            [ConnectionFilter::new(Some(0x046d), None, Some(7))]
        );
    }

    #[test]
    fn zero_is_kept_as_a_filter_value() {
        let factory = CameraFactory::new(FakeOpener::new(|| None));
        factory.get(Some(0), Some(0), Some(0)).unwrap();
        let seen = factory.opener.seen.borrow();
        assert_eq!(seen[0].vendor, Some(0));
        assert!(!seen[0].matches(0x046d, 0, 0));
        assert!(seen[0].matches(0, 0, 0));
    }

    #[test]
    fn not_found_names_the_filter() {
        let factory = CameraFactory::new(FakeOpener::new(|| Some(OpenError::NotFound)));
        let err = factory.get(Some(1133), None, None).err().unwrap();
        assert!(matches!(err, UvcError::DeviceNotFound { .. }));
        let msg = err.to_string();
        assert!(msg.contains("Could not find UVC device"), "{msg}");
        assert!(msg.contains(r#"{"vendor":1133,"product":null,"address":null}"#), "{msg}");
        assert!(err.source().is_some());
    }

    #[test]
    fn vanished_device_is_not_found() {
        let factory =
            CameraFactory::new(FakeOpener::new(|| Some(OpenError::Usb(rusb::Error::NoDevice))));
        let err = factory.get(None, None, None).err().unwrap();
        assert!(matches!(err, UvcError::DeviceNotFound { .. }));
    }

    #[test]
    fn other_failures_are_construction_errors() {
        let factory =
            CameraFactory::new(FakeOpener::new(|| Some(OpenError::Usb(rusb::Error::Access))));
        let err = factory.get(None, Some(0x0825), None).err().unwrap();
        match &err {
            UvcError::DeviceConstruction { filter, source } => {
                assert_eq!(filter.product, Some(0x0825));
                assert!(matches!(source, OpenError::Usb(rusb::Error::Access)));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(err.to_string().contains(r#""product":2085"#));
    }

    #[test]
    fn non_uvc_match_is_a_construction_error() {
        let filter = ConnectionFilter::new(Some(0x046d), None, None);
        let err = classify_open_error(filter, OpenError::NoVideoControlInterface);
        assert!(matches!(
            err,
            UvcError::DeviceConstruction { source: OpenError::NoVideoControlInterface, .. }
        ));
    }

    #[test]
    fn unconstrained_filter_matches_anything() {
        let filter = ConnectionFilter::default();
        assert!(filter.matches(0x046d, 0x0825, 3));
        assert_eq!(filter.to_string(), r#"{"vendor":null,"product":null,"address":null}"#);
    }
}
