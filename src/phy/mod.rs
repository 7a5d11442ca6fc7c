//! Ethernet PHY Drivers
//!
//! This module provides the PHY lifecycle trait and the Maxio MAE0621A
//! driver built on it.
//!
//! # Architecture
//!
//! The PHY layer talks to the chip only through the [`MdioBus`] trait. On
//! top of the flat register space it builds:
//!
//! - [`PagedPort`](crate::hal::PagedPort): page select / restore around each
//!   vendor register access
//! - [`calibration`]: bounded ADC calibration self-check
//! - [`link`]: link status decoding and auto-negotiation debounce
//! - [`profile`]: per-variant register tables and power sequences
//! - [`mae0621a`]: the driver shell implementing [`PhyDriver`]
//!
//! # Supported PHY Chips
//!
//! - [`Mae0621a`]: Maxio MAE0621A-Q2C and MAE0621A/B-Q3C(I)
//!
//! # Example
//!
//! ```ignore
//! use maxio_phy::phy::{Mae0621a, PhyDriver, Variant};
//!
//! let mut phy = Mae0621a::new(0, Variant::Mae0621a);
//! phy.probe(&mut mdio, &mut delay)?;
//! phy.config_init(&mut mdio, &mut delay)?;
//!
//! let status = phy.read_status(&mut mdio)?;
//! ```
//!
//! [`MdioBus`]: crate::hal::MdioBus

pub mod calibration;
pub mod generic;
pub mod link;
pub mod mae0621a;
pub mod profile;

pub use calibration::{CalibrationOutcome, CalibrationProfile, CalibrationReport};
pub use generic::{LinkStatus, PhyDriver};
pub use link::{LinkDebounce, LinkResolver};
pub use mae0621a::{Mae0621a, Variant};
pub use profile::{DeviceProfile, InitReport, PowerStep};

// Re-export IEEE 802.3 standard register definitions from mdio
pub use crate::hal::mdio::{anlpar, bmcr, bmsr, phy_reg};
