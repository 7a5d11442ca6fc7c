//! Synchronization primitives for ISR-safe access.
//!
//! Low-level primitives used by the shared PHY wrapper.

use core::cell::RefCell;
use critical_section::Mutex;

/// Cell providing interior mutability with critical section protection.
///
/// Combines `critical_section::Mutex` with `RefCell` for safe mutable access
/// from both normal code and interrupt handlers.
///
/// The cell is `Sync` only when `T: Send`, the same bound
/// `critical_section::Mutex` carries:
///
/// ```compile_fail
/// extern crate std;
/// use maxio_phy::sync::CriticalSectionCell;
///
/// fn assert_sync<T: Sync>() {}
/// assert_sync::<CriticalSectionCell<std::rc::Rc<u8>>>();
/// ```
pub struct CriticalSectionCell<T> {
    inner: Mutex<RefCell<T>>,
}

impl<T> CriticalSectionCell<T> {
    /// Create a new cell (const, suitable for static initialization).
    pub const fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(value)),
        }
    }

    /// Execute a closure with exclusive mutable access.
    ///
    /// Interrupts are disabled for the duration of the closure.
    #[inline]
    pub fn with<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut T) -> R,
    {
        critical_section::with(|cs| {
            let mut value = self.inner.borrow_ref_mut(cs);
            f(&mut value)
        })
    }

    /// Try to execute a closure, returning `None` if already borrowed.
    #[inline]
    pub fn try_with<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut T) -> R,
    {
        critical_section::with(|cs| {
            self.inner
                .borrow(cs)
                .try_borrow_mut()
                .ok()
                .map(|mut value| f(&mut value))
        })
    }

    /// Consume the cell and return the wrapped value.
    pub fn into_inner(self) -> T {
        self.inner.into_inner().into_inner()
    }
}

// SAFETY: every access runs inside a critical section, and `T: Send` allows
// the value to be reached from whichever context enters it.
unsafe impl<T: Send> Sync for CriticalSectionCell<T> {}
