//! A `no_std`, no-alloc shadow device registry for layered display driver shims.
//!
//! This crate implements the bookkeeping half of a pass-through interception
//! layer: every device created through the shim is mirrored by a shadow
//! record, published in a fixed-capacity registry keyed by the handle the
//! underlying ("inbox") driver assigned. Later interception points use the
//! registry to map a driver handle back to the shadow record.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐  create_device   ┌───────────────────┐   delegate   ┌──────────────┐
//! │  runtime   │─────────────────▶│ DeviceInterceptor │─────────────▶│ inbox driver │
//! │  (caller)  │◀─────────────────│                   │◀─────────────│              │
//! └────────────┘  status + request└─────────┬─────────┘    status    └──────────────┘
//!                 mutated in place          │ reserve / publish / find
//!                                 ┌─────────▼─────────┐
//!                                 │  DeviceRegistry   │  critical-section lock,
//!                                 │  handle → record  │  bounded critical sections
//!                                 └───────────────────┘
//! ```
//!
//! The creation protocol is strictly ordered: a registry slot is reserved
//! first (exhaustion is reported before the inbox driver is ever called), the
//! call is delegated outside any lock, and only a successfully created device
//! is published. A failed delegation releases the slot and forwards the
//! driver's status unchanged, so the registry never contains a record whose
//! downstream counterpart does not exist.
//!
//! Registry operations run inside `critical_section::with`, which makes them
//! safe to call from elevated-priority contexts that must not block. The
//! delegation call itself never runs under the lock.
//!
//! # Example
//!
//! ```rust
//! use device_shadow::prelude::*;
//!
//! struct Inbox;
//!
//! impl InboxDriver for Inbox {
//!     fn create_device(
//!         &self,
//!         _adapter: AdapterId,
//!         request: &mut CreateDeviceRequest,
//!     ) -> Result<(), DriverStatus> {
//!         // The real driver writes its own handle back into the request.
//!         request.handle = DeviceHandle(0x200);
//!         Ok(())
//!     }
//! }
//!
//! let registry: DeviceRegistry<8> = DeviceRegistry::new();
//! let shim = DeviceInterceptor::new(Inbox, &registry);
//!
//! let adapter = Adapter::new(AdapterId(1), InterfaceVersion::WDDM2_0);
//! let mut request = CreateDeviceRequest::new(DeviceHandle(0x100), CreateDeviceFlags::empty());
//!
//! let created = shim.create_device(&adapter, &mut request).unwrap();
//! assert_eq!(created.driver_handle, DeviceHandle(0x200));
//!
//! let device = registry.find(created.driver_handle).unwrap();
//! assert_eq!(device.runtime_handle(), DeviceHandle(0x100));
//! ```

#![deny(unsafe_code)]
#![no_std]

#[cfg(test)]
extern crate std;

pub mod device;

pub mod prelude {
    pub use crate::device::prelude::*;
}
