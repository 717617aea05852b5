use crate::device::request::{CreateDeviceRequest, InfoBlock};
use crate::device::types::{
    Adapter, AdapterId, CreateDeviceFlags, DeviceHandle, DeviceInfo, ProcessAssociation,
};

/// Snapshot of a creation request, taken before delegation.
///
/// `process` is populated once here, from the adapter's interface version;
/// below the WDDM 2.0 threshold it is absent regardless of what the request
/// carried, so version-gated logic never has to re-check the version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreationParams {
    pub handle: DeviceHandle,
    pub flags: CreateDeviceFlags,
    pub process: Option<ProcessAssociation>,
}

/// A shadow record between allocation and successful delegation.
///
/// Holds everything known before the inbox driver has run. Consuming it with
/// [`finalize`](Self::finalize) is the only way to produce a [`ShadowDevice`],
/// so the driver handle is set exactly once and only after delegation
/// succeeded.
pub(crate) struct PendingDevice {
    runtime_handle: DeviceHandle,
    adapter: AdapterId,
    creation: CreationParams,
}

impl PendingDevice {
    pub(crate) fn new(adapter: &Adapter, request: &CreateDeviceRequest) -> Self {
        let process = if adapter.interface_version().has_process_association() {
            request.process
        } else {
            None
        };
        Self {
            runtime_handle: request.handle,
            adapter: adapter.id(),
            creation: CreationParams {
                handle: request.handle,
                flags: request.flags,
                process,
            },
        }
    }

    /// Completes the record from a successfully delegated request.
    ///
    /// The driver handle is whatever the driver left in the request's in/out
    /// handle field. The info block is snapshotted only if the driver swapped
    /// in a block of its own; a block filled in place is the caller's to read.
    pub(crate) fn finalize(self, request: &CreateDeviceRequest) -> ShadowDevice {
        let device_info = match request.info {
            InfoBlock::Driver(info) => Some(info),
            InfoBlock::Caller(_) => None,
        };
        ShadowDevice {
            runtime_handle: self.runtime_handle,
            driver_handle: request.handle,
            adapter: self.adapter,
            creation: self.creation,
            device_info,
        }
    }
}

/// The shim's record of one device alive in the inbox driver.
///
/// Published to the [`DeviceRegistry`](crate::device::DeviceRegistry) keyed
/// by `driver_handle`. Lookups hand out clones, so a record never escapes the
/// registry lock by reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShadowDevice {
    runtime_handle: DeviceHandle,
    driver_handle: DeviceHandle,
    adapter: AdapterId,
    creation: CreationParams,
    device_info: Option<DeviceInfo>,
}

impl ShadowDevice {
    /// The handle the runtime uses to name this device.
    pub fn runtime_handle(&self) -> DeviceHandle {
        self.runtime_handle
    }

    /// The handle the inbox driver assigned; the registry key.
    pub fn driver_handle(&self) -> DeviceHandle {
        self.driver_handle
    }

    /// The adapter this device was created on.
    pub fn adapter(&self) -> AdapterId {
        self.adapter
    }

    /// The creation request as it looked before delegation.
    pub fn creation(&self) -> &CreationParams {
        &self.creation
    }

    /// Driver-reported device info, if the driver supplied its own block.
    pub fn device_info(&self) -> Option<&DeviceInfo> {
        self.device_info.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::test_support::{adapter_v1_3, adapter_v2_0, request_with_process};
    use crate::device::types::InterfaceVersion;

    #[test]
    fn process_association_kept_at_or_above_threshold() {
        let request = request_with_process(0x100, 7, 0x55);

        let pending = PendingDevice::new(&adapter_v2_0(), &request);
        let device = pending.finalize(&request);
        assert_eq!(
            device.creation().process,
            Some(ProcessAssociation {
                pasid: 7,
                kmd_process: 0x55
            })
        );
    }

    #[test]
    fn process_association_dropped_below_threshold() {
        let request = request_with_process(0x100, 7, 0x55);

        let pending = PendingDevice::new(&adapter_v1_3(), &request);
        let device = pending.finalize(&request);
        assert_eq!(device.creation().process, None);
    }

    #[test]
    fn finalize_takes_the_driver_written_handle() {
        let mut request = CreateDeviceRequest::new(DeviceHandle(0x100), CreateDeviceFlags::empty());
        let pending = PendingDevice::new(&adapter_v2_0(), &request);

        // The driver writes its own handle into the in/out field.
        request.handle = DeviceHandle(0x200);

        let device = pending.finalize(&request);
        assert_eq!(device.runtime_handle(), DeviceHandle(0x100));
        assert_eq!(device.driver_handle(), DeviceHandle(0x200));
        assert_eq!(device.creation().handle, DeviceHandle(0x100));
    }

    #[test]
    fn info_captured_only_from_a_driver_owned_block() {
        let reported = DeviceInfo {
            dma_buffer_size: 4096,
            ..DeviceInfo::default()
        };

        // Driver fills the caller's block in place: no snapshot.
        let mut request = CreateDeviceRequest::new(DeviceHandle(0x100), CreateDeviceFlags::empty());
        let pending = PendingDevice::new(&adapter_v2_0(), &request);
        *request.info.info_mut() = reported;
        let device = pending.finalize(&request);
        assert_eq!(device.device_info(), None);

        // Driver substitutes its own block: snapshot taken.
        let mut request = CreateDeviceRequest::new(DeviceHandle(0x100), CreateDeviceFlags::empty());
        let pending = PendingDevice::new(&adapter_v2_0(), &request);
        request.info = InfoBlock::Driver(reported);
        let device = pending.finalize(&request);
        assert_eq!(device.device_info(), Some(&reported));
    }

    #[test]
    fn adapter_identity_is_recorded() {
        let adapter = Adapter::new(AdapterId(3), InterfaceVersion::WDDM2_0);
        let request = CreateDeviceRequest::new(DeviceHandle(0x100), CreateDeviceFlags::GDI_DEVICE);

        let device = PendingDevice::new(&adapter, &request).finalize(&request);
        assert_eq!(device.adapter(), AdapterId(3));
        assert_eq!(device.creation().flags, CreateDeviceFlags::GDI_DEVICE);
    }
}
