use core::cell::RefCell;

use critical_section::Mutex;
use heapless::FnvIndexMap;

use crate::device::error::RegistryFull;
use crate::device::record::ShadowDevice;
use crate::device::types::DeviceHandle;

struct RegistryInner<const N: usize> {
    devices: FnvIndexMap<DeviceHandle, ShadowDevice, N>,
    /// Slots claimed by in-flight creations, not yet published or released.
    reserved: usize,
}

/// Fixed-capacity registry of live shadow devices, keyed by driver handle.
///
/// The registry is an explicit, injectable owner of the collection: share it
/// by reference with every component that creates or looks up devices, and
/// give tests their own instances.
///
/// Every access runs inside `critical_section::with`, so insertion and lookup
/// are callable from contexts that must not block; the critical sections are
/// bounded and never span a delegation call. Publication of a record
/// happens-before any lookup that observes it.
///
/// # Const Generics
/// - `N`: slot capacity; must be a power of two and at least 2 (index map
///   requirement). Live devices plus in-flight reservations never exceed it.
pub struct DeviceRegistry<const N: usize> {
    inner: Mutex<RefCell<RegistryInner<N>>>,
}

impl<const N: usize> DeviceRegistry<N> {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(RegistryInner {
                devices: FnvIndexMap::new(),
                reserved: 0,
            })),
        }
    }

    /// Claims one slot for a device about to be created.
    ///
    /// This is the allocation step of the creation protocol: it fails before
    /// the inbox driver is ever called, and the claim is tracked so that
    /// concurrent creations cannot oversubscribe the capacity. The returned
    /// guard releases the slot if dropped unpublished.
    pub fn reserve(&self) -> Result<DeviceSlot<'_, N>, RegistryFull> {
        critical_section::with(|cs| {
            let mut inner = self.inner.borrow_ref_mut(cs);
            if inner.devices.len() + inner.reserved >= N {
                return Err(RegistryFull);
            }
            inner.reserved += 1;
            Ok(())
        })?;
        Ok(DeviceSlot { registry: self })
    }

    /// Looks up a live device by its driver handle, returning a clone.
    ///
    /// An unknown handle is a normal negative result, not an error.
    pub fn find(&self, handle: DeviceHandle) -> Option<ShadowDevice> {
        self.with_device(handle, ShadowDevice::clone)
    }

    /// Runs `f` against the record for `handle` inside the registry lock.
    ///
    /// `f` must be short and must not touch this registry again.
    pub fn with_device<R>(
        &self,
        handle: DeviceHandle,
        f: impl FnOnce(&ShadowDevice) -> R,
    ) -> Option<R> {
        critical_section::with(|cs| {
            let inner = self.inner.borrow_ref(cs);
            inner.devices.get(&handle).map(f)
        })
    }

    /// Unpublishes and returns the record for `handle`, freeing its slot.
    ///
    /// Lookups clone records out of the lock, so removal cannot invalidate
    /// anything an observer still holds.
    pub fn remove(&self, handle: DeviceHandle) -> Option<ShadowDevice> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).devices.remove(&handle))
    }

    /// Number of live (published) devices.
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow_ref(cs).devices.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<const N: usize> Default for DeviceRegistry<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> core::fmt::Debug for DeviceRegistry<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DeviceRegistry")
            .field("capacity", &N)
            .finish_non_exhaustive()
    }
}

/// A reserved registry slot held across a delegation call.
///
/// Either consumed by [`publish`](Self::publish) on success or dropped on
/// failure, which releases the slot. No partially created record is ever
/// visible to lookups.
#[must_use = "an unpublished slot only holds capacity; drop it to release"]
pub struct DeviceSlot<'a, const N: usize> {
    registry: &'a DeviceRegistry<N>,
}

impl<const N: usize> core::fmt::Debug for DeviceSlot<'_, N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DeviceSlot").finish_non_exhaustive()
    }
}

impl<const N: usize> DeviceSlot<'_, N> {
    /// Publishes a finalized record under its driver handle.
    pub fn publish(self, device: ShadowDevice) {
        critical_section::with(|cs| {
            let mut inner = self.registry.inner.borrow_ref_mut(cs);
            inner.reserved -= 1;
            let previous = inner.devices.insert(device.driver_handle(), device);
            // Capacity is guaranteed by the reservation; a replaced entry
            // means the inbox driver reused a live handle.
            debug_assert!(matches!(previous, Ok(None)));
        });
        core::mem::forget(self);
    }
}

impl<const N: usize> Drop for DeviceSlot<'_, N> {
    fn drop(&mut self) {
        critical_section::with(|cs| {
            self.registry.inner.borrow_ref_mut(cs).reserved -= 1;
        });
    }
}
