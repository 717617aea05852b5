use log::{error, trace};

use crate::device::error::{CreateDeviceError, DriverStatus};
use crate::device::record::{PendingDevice, ShadowDevice};
use crate::device::registry::DeviceRegistry;
use crate::device::request::CreateDeviceRequest;
use crate::device::types::{Adapter, AdapterId, CreateDeviceFlags, DeviceHandle};

/// The downstream creation entry point of the wrapped driver.
///
/// Implementations may mutate the request in place: a successful call writes
/// the driver's own handle into the request's in/out handle field and may
/// substitute the info block. The call may block for a bounded time and is
/// always invoked outside the registry lock.
pub trait InboxDriver {
    fn create_device(
        &self,
        adapter: AdapterId,
        request: &mut CreateDeviceRequest,
    ) -> Result<(), DriverStatus>;
}

/// Identifying fields of a freshly tracked device, for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatedDevice {
    pub runtime_handle: DeviceHandle,
    pub driver_handle: DeviceHandle,
    pub flags: CreateDeviceFlags,
}

impl core::fmt::Display for CreatedDevice {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "device {} (runtime {}, flags {:#x})",
            self.driver_handle,
            self.runtime_handle,
            self.flags.bits()
        )
    }
}

/// The creation-interception layer: delegates to the inbox driver and keeps
/// the registry in sync with what the driver actually created.
pub struct DeviceInterceptor<'r, D, const N: usize> {
    driver: D,
    registry: &'r DeviceRegistry<N>,
}

impl<'r, D: InboxDriver, const N: usize> DeviceInterceptor<'r, D, N> {
    pub fn new(driver: D, registry: &'r DeviceRegistry<N>) -> Self {
        Self { driver, registry }
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn registry(&self) -> &'r DeviceRegistry<N> {
        self.registry
    }

    /// Creates a device in the inbox driver and tracks it.
    ///
    /// The protocol is strictly ordered: reserve a slot (exhaustion is
    /// reported as out-of-memory before the driver is called), snapshot the
    /// request, delegate with no lock held, then either publish the finalized
    /// record or release the slot and forward the driver's status unchanged.
    /// On success the request has been mutated in place by the driver and is
    /// returned to the caller as-is.
    pub fn create_device(
        &self,
        adapter: &Adapter,
        request: &mut CreateDeviceRequest,
    ) -> Result<CreatedDevice, CreateDeviceError> {
        let Ok(slot) = self.registry.reserve() else {
            error!(
                "create_device: no shadow slot for runtime handle {}",
                request.handle
            );
            return Err(CreateDeviceError::NoMemory);
        };

        let pending = PendingDevice::new(adapter, request);

        if let Err(status) = self.driver.create_device(adapter.id(), request) {
            // Slot guard drops here; nothing was published.
            error!("create_device: inbox driver failed with {status}");
            return Err(CreateDeviceError::Driver(status));
        }

        let device = pending.finalize(request);
        let created = CreatedDevice {
            runtime_handle: device.runtime_handle(),
            driver_handle: device.driver_handle(),
            flags: device.creation().flags,
        };
        slot.publish(device);

        trace!("create_device: {created} tracked");
        Ok(created)
    }

    /// Maps a driver handle back to its shadow record.
    pub fn find_device(&self, handle: DeviceHandle) -> Option<ShadowDevice> {
        self.registry.find(handle)
    }
}
