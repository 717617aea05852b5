//! Test support utilities - only compiled in test builds.

use core::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use crate::device::error::DriverStatus;
use crate::device::intercept::InboxDriver;
use crate::device::record::{PendingDevice, ShadowDevice};
use crate::device::request::{CreateDeviceRequest, InfoBlock};
use crate::device::types::{
    Adapter, AdapterId, CreateDeviceFlags, DeviceHandle, DeviceInfo, InterfaceVersion,
    ProcessAssociation,
};

pub const STATUS_INVALID_PARAMETER: DriverStatus = DriverStatus(0xC000_000D);

/// Adapter at the process-association threshold.
pub fn adapter_v2_0() -> Adapter {
    Adapter::new(AdapterId(1), InterfaceVersion::WDDM2_0)
}

/// Adapter below the process-association threshold.
pub fn adapter_v1_3() -> Adapter {
    Adapter::new(AdapterId(1), InterfaceVersion::WDDM1_3)
}

/// A creation request carrying a process association pair.
pub fn request_with_process(handle: u64, pasid: u32, kmd_process: u64) -> CreateDeviceRequest {
    CreateDeviceRequest::new(DeviceHandle(handle), CreateDeviceFlags::empty()).with_process(
        ProcessAssociation {
            pasid,
            kmd_process,
        },
    )
}

/// Builds a finalized record directly, for registry-level tests.
pub fn shadow_device(runtime: u64, driver: u64) -> ShadowDevice {
    let mut request =
        CreateDeviceRequest::new(DeviceHandle(runtime), CreateDeviceFlags::empty());
    let pending = PendingDevice::new(&adapter_v2_0(), &request);
    request.handle = DeviceHandle(driver);
    pending.finalize(&request)
}

enum InfoBehavior {
    Untouched,
    FillInPlace(DeviceInfo),
    Substitute(DeviceInfo),
}

/// Scripted inbox driver: assigns handles sequentially, optionally fails with
/// a fixed status, optionally writes device info, and counts delegations.
pub struct FakeDriver {
    next_handle: AtomicU64,
    fail_with: Option<DriverStatus>,
    info: InfoBehavior,
    calls: AtomicUsize,
}

impl FakeDriver {
    /// Succeeds every call, assigning driver handles starting at `first_handle`.
    pub fn assigning(first_handle: u64) -> Self {
        Self {
            next_handle: AtomicU64::new(first_handle),
            fail_with: None,
            info: InfoBehavior::Untouched,
            calls: AtomicUsize::new(0),
        }
    }

    /// Fails every call with `status`, leaving the request untouched.
    pub fn failing(status: DriverStatus) -> Self {
        Self {
            fail_with: Some(status),
            ..Self::assigning(0)
        }
    }

    /// On success, writes `info` into the caller's block without replacing it.
    pub fn filling_info_in_place(mut self, info: DeviceInfo) -> Self {
        self.info = InfoBehavior::FillInPlace(info);
        self
    }

    /// On success, substitutes a driver-owned block containing `info`.
    pub fn substituting_info(mut self, info: DeviceInfo) -> Self {
        self.info = InfoBehavior::Substitute(info);
        self
    }

    /// Number of times the shim delegated to this driver.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl InboxDriver for FakeDriver {
    fn create_device(
        &self,
        _adapter: AdapterId,
        request: &mut CreateDeviceRequest,
    ) -> Result<(), DriverStatus> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if let Some(status) = self.fail_with {
            return Err(status);
        }

        request.handle = DeviceHandle(self.next_handle.fetch_add(1, Ordering::SeqCst));
        match self.info {
            InfoBehavior::Untouched => {}
            InfoBehavior::FillInPlace(info) => *request.info.info_mut() = info,
            InfoBehavior::Substitute(info) => request.info = InfoBlock::Driver(info),
        }
        Ok(())
    }
}
