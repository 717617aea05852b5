use crate::device::types::{CreateDeviceFlags, DeviceHandle, DeviceInfo, ProcessAssociation};

/// The device-info slot of a creation request.
///
/// The runtime supplies a block for the driver to fill in. Some drivers fill
/// it in place; others swap in a block of their own. The tag records who owns
/// the current block, so the shim can tell the two apart after delegation:
/// only a driver-owned block is snapshotted into the shadow record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfoBlock {
    /// The block supplied with the request. The driver may write into it.
    Caller(DeviceInfo),
    /// A distinct block the driver substituted for the caller's.
    Driver(DeviceInfo),
}

impl InfoBlock {
    /// Returns true if the driver substituted its own block.
    #[inline]
    pub fn is_driver_owned(&self) -> bool {
        matches!(self, InfoBlock::Driver(_))
    }

    /// The current block contents regardless of owner.
    #[inline]
    pub fn info(&self) -> &DeviceInfo {
        match self {
            InfoBlock::Caller(info) | InfoBlock::Driver(info) => info,
        }
    }

    /// Mutable access to the current block, preserving the owner tag.
    #[inline]
    pub fn info_mut(&mut self) -> &mut DeviceInfo {
        match self {
            InfoBlock::Caller(info) | InfoBlock::Driver(info) => info,
        }
    }
}

/// A device creation request, passed through the shim to the inbox driver.
///
/// `handle` is an in/out field: the runtime's handle going in, the driver's
/// handle coming back out of a successful delegation. The driver may also
/// replace `info` and is free to ignore `process` on interface versions that
/// predate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateDeviceRequest {
    pub handle: DeviceHandle,
    pub flags: CreateDeviceFlags,
    pub process: Option<ProcessAssociation>,
    pub info: InfoBlock,
}

impl CreateDeviceRequest {
    pub fn new(handle: DeviceHandle, flags: CreateDeviceFlags) -> Self {
        Self {
            handle,
            flags,
            process: None,
            info: InfoBlock::Caller(DeviceInfo::default()),
        }
    }

    /// Attaches a process association, as WDDM 2.0+ runtimes do.
    pub fn with_process(mut self, process: ProcessAssociation) -> Self {
        self.process = Some(process);
        self
    }
}
