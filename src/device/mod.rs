pub mod error;
pub mod intercept;
pub mod record;
pub mod registry;
pub mod request;
pub mod types;

#[cfg(test)]
mod test_support;

pub use error::{CreateDeviceError, DriverStatus, RegistryFull};
pub use intercept::{CreatedDevice, DeviceInterceptor, InboxDriver};
pub use record::{CreationParams, ShadowDevice};
pub use registry::{DeviceRegistry, DeviceSlot};
pub use request::{CreateDeviceRequest, InfoBlock};
pub use types::{
    Adapter, AdapterId, CreateDeviceFlags, DeviceHandle, DeviceInfo, InterfaceVersion,
    ProcessAssociation,
};

pub mod prelude {
    pub use super::{
        Adapter, AdapterId, CreateDeviceError, CreateDeviceFlags, CreateDeviceRequest,
        CreatedDevice, CreationParams, DeviceHandle, DeviceInfo, DeviceInterceptor,
        DeviceRegistry, DeviceSlot, DriverStatus, InboxDriver, InfoBlock, InterfaceVersion,
        ProcessAssociation, RegistryFull, ShadowDevice,
    };
}
