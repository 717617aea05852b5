/// Opaque device handle.
///
/// The same handle type names a device on both sides of the shim: the
/// runtime's handle on the way in, the inbox driver's handle on the way out.
/// A creation request carries it as an in/out field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceHandle(pub u64);

impl core::fmt::Display for DeviceHandle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

/// Opaque identifier of the adapter that owns a device.
///
/// Shadow records keep this instead of a reference: the adapter outlives its
/// devices and is resolved by the surrounding layer, not by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AdapterId(pub u32);

impl core::fmt::Display for AdapterId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "adapter{}", self.0)
    }
}

/// DDI interface version negotiated with the inbox driver.
///
/// Creation requests gain a process-association pair starting with
/// [`InterfaceVersion::WDDM2_0`]; below that threshold the pair is absent
/// from the shadow record no matter what the request carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct InterfaceVersion(pub u32);

impl InterfaceVersion {
    pub const WDDM1_3: Self = Self(0x2005);
    pub const WDDM2_0: Self = Self(0x3000);

    /// Whether creation requests at this version carry a process association.
    pub fn has_process_association(self) -> bool {
        self >= Self::WDDM2_0
    }
}

/// Resolved adapter context consumed by the creation path.
///
/// Resolution from the upstream opaque adapter handle happens outside this
/// crate; the creation path only needs the identity and the negotiated
/// interface version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adapter {
    id: AdapterId,
    interface_version: InterfaceVersion,
}

impl Adapter {
    pub fn new(id: AdapterId, interface_version: InterfaceVersion) -> Self {
        Self {
            id,
            interface_version,
        }
    }

    pub fn id(&self) -> AdapterId {
        self.id
    }

    pub fn interface_version(&self) -> InterfaceVersion {
        self.interface_version
    }
}

bitflags::bitflags! {
    /// Creation flags passed through to the inbox driver.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct CreateDeviceFlags: u32 {
        /// Device created on behalf of the system rather than an application.
        const SYSTEM_DEVICE = 1 << 0;
        /// Device backs a GDI rendering context.
        const GDI_DEVICE = 1 << 1;
        /// Device belongs to a protected system process.
        const SYSTEM_PROTECTED_DEVICE = 1 << 2;
    }
}

/// Process association carried by WDDM 2.0+ creation requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessAssociation {
    /// Process address space identifier.
    pub pasid: u32,
    /// Kernel-mode process object handle, kept opaque.
    pub kmd_process: u64,
}

/// Descriptive info the inbox driver reports for a created device.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceInfo {
    pub allocation_list_size: u32,
    pub patch_location_list_size: u32,
    pub dma_buffer_size: u32,
    pub dma_buffer_segment_set: u32,
    pub dma_buffer_private_data_size: u32,
}
