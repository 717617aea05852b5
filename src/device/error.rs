/// Opaque status code returned by the inbox driver on failure.
///
/// The shim never interprets the value; a failed delegation forwards it to
/// the original caller unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverStatus(pub u32);

impl core::fmt::Display for DriverStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:#010x}", self.0)
    }
}

/// Errors that can occur on the device creation path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateDeviceError {
    /// No shadow slot could be reserved; the inbox driver was never called.
    NoMemory,
    /// The inbox driver rejected the request; the status is forwarded verbatim.
    Driver(DriverStatus),
}

impl core::fmt::Display for CreateDeviceError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            CreateDeviceError::NoMemory => write!(f, "unable to allocate a shadow device slot"),
            CreateDeviceError::Driver(status) => {
                write!(f, "inbox driver failed with {status}")
            }
        }
    }
}

impl From<DriverStatus> for CreateDeviceError {
    fn from(status: DriverStatus) -> Self {
        CreateDeviceError::Driver(status)
    }
}

/// Returned by [`DeviceRegistry::reserve`](crate::device::DeviceRegistry::reserve)
/// when every slot is live or already reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryFull;

impl core::fmt::Display for RegistryFull {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "device registry has no free slots")
    }
}
