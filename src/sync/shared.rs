//! ISR-safe PHY wrapper using critical sections.
//!
//! The page-select register makes every paged access a multi-transaction
//! sequence. [`SharedPhy`] keeps the driver and its bus in one cell so that a
//! whole lifecycle call, not just a single transaction, runs under the
//! critical section.

use embedded_hal::delay::DelayNs;

use super::primitives::CriticalSectionCell;
use crate::error::Result;
use crate::hal::mdio::MdioBus;
use crate::phy::{LinkStatus, Mae0621a, PhyDriver};

struct PhyBundle<M> {
    phy: Mae0621a,
    mdio: M,
}

/// ISR-safe PHY wrapper using critical sections.
///
/// All access goes through `critical_section::with()`, disabling interrupts
/// for the duration of the closure.
///
/// # Example
///
/// ```ignore
/// static PHY: SharedPhy<BoardMdio> =
///     SharedPhy::new(Mae0621a::new(0, Variant::Mae0621aQ3c), BoardMdio::new());
///
/// PHY.with(|phy, mdio| phy.probe(mdio, &mut delay))?;
/// let status = PHY.read_status()?;
/// ```
pub struct SharedPhy<M: MdioBus> {
    inner: CriticalSectionCell<PhyBundle<M>>,
}

impl<M: MdioBus> SharedPhy<M> {
    /// Create a new shared PHY (const, suitable for static initialization).
    pub const fn new(phy: Mae0621a, mdio: M) -> Self {
        Self {
            inner: CriticalSectionCell::new(PhyBundle { phy, mdio }),
        }
    }

    /// Execute a closure with exclusive access to the driver and its bus.
    ///
    /// Interrupts are disabled for the duration of the closure.
    #[inline]
    pub fn with<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&mut Mae0621a, &mut M) -> R,
    {
        self.inner.with(|bundle| f(&mut bundle.phy, &mut bundle.mdio))
    }

    /// Try to execute a closure, returning `None` if already borrowed.
    #[inline]
    pub fn try_with<R, F>(&self, f: F) -> Option<R>
    where
        F: FnOnce(&mut Mae0621a, &mut M) -> R,
    {
        self.inner
            .try_with(|bundle| f(&mut bundle.phy, &mut bundle.mdio))
    }

    /// Poll the link status
    pub fn read_status(&self) -> Result<LinkStatus> {
        self.with(|phy, mdio| phy.read_status(mdio))
    }

    /// Last resolved link status, without touching the bus
    pub fn status(&self) -> LinkStatus {
        self.with(|phy, _| phy.status())
    }

    /// Enter low-power mode
    pub fn suspend<D: DelayNs>(&self, delay: &mut D) -> Result<()> {
        self.with(|phy, mdio| phy.suspend(mdio, delay))
    }

    /// Leave low-power mode
    pub fn resume<D: DelayNs>(&self, delay: &mut D) -> Result<()> {
        self.with(|phy, mdio| phy.resume(mdio, delay))
    }

    /// Take the driver and bus back out
    pub fn into_parts(self) -> (Mae0621a, M) {
        let bundle = self.inner.into_inner();
        (bundle.phy, bundle.mdio)
    }
}
