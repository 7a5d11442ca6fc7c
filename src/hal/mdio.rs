//! MDIO (Management Data Input/Output) HAL
//!
//! This module defines the register transport the PHY driver is built on.
//! The driver never touches the wire protocol itself: a host implements
//! [`MdioBus`] on top of whatever SMI/MDIO controller it has, and the driver
//! issues flat Clause 22 register reads and writes through it.

use crate::error::{ConfigError, Result};

pub use crate::internal::phy_regs::standard::{anlpar, bmcr, bmsr, phy_reg};

// =============================================================================
// MDIO Constants
// =============================================================================

/// Maximum valid PHY address (5-bit field)
pub const MAX_PHY_ADDR: u8 = 31;

/// Maximum valid register address (5-bit field)
pub const MAX_REG_ADDR: u8 = 31;

/// Check that a PHY and register address fit a Clause 22 frame
///
/// Bus implementations call this before starting a transaction so that an
/// out-of-range address is reported instead of silently truncated.
pub fn validate_address(phy_addr: u8, reg_addr: u8) -> Result<()> {
    if phy_addr > MAX_PHY_ADDR {
        return Err(ConfigError::InvalidPhyAddress.into());
    }
    if reg_addr > MAX_REG_ADDR {
        return Err(ConfigError::InvalidRegister.into());
    }
    Ok(())
}

// =============================================================================
// MDIO Bus Trait
// =============================================================================

/// Trait for MDIO bus operations
///
/// This trait can be implemented by different backends, allowing the PHY
/// driver to work with any MAC's management interface. A failed transaction
/// should be reported as [`IoError::Bus`](crate::IoError::Bus).
pub trait MdioBus {
    /// Read a PHY register
    fn read(&mut self, phy_addr: u8, reg_addr: u8) -> Result<u16>;

    /// Write a PHY register
    fn write(&mut self, phy_addr: u8, reg_addr: u8, value: u16) -> Result<()>;
}

impl<T: MdioBus + ?Sized> MdioBus for &mut T {
    #[inline]
    fn read(&mut self, phy_addr: u8, reg_addr: u8) -> Result<u16> {
        (**self).read(phy_addr, reg_addr)
    }

    #[inline]
    fn write(&mut self, phy_addr: u8, reg_addr: u8, value: u16) -> Result<()> {
        (**self).write(phy_addr, reg_addr, value)
    }
}
