//! Generic PHY Driver Trait
//!
//! This module defines the lifecycle interface a host framework drives a PHY
//! through, plus helpers for the IEEE 802.3 Clause 22 registers every PHY
//! shares.

use embedded_hal::delay::DelayNs;

use crate::config::{Duplex, Speed};
use crate::error::Result;
use crate::hal::mdio::MdioBus;

// =============================================================================
// Link Status
// =============================================================================

/// Resolved Ethernet link status
///
/// `speed` and `duplex` are [`Speed::Unknown`] / [`Duplex::Unknown`] until a
/// status poll resolves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkStatus {
    /// Link is up
    pub link: bool,
    /// Link speed
    pub speed: Speed,
    /// Duplex mode
    pub duplex: Duplex,
    /// Link partner advertises symmetric PAUSE
    pub pause: bool,
    /// Link partner advertises asymmetric PAUSE
    pub asym_pause: bool,
}

impl LinkStatus {
    /// Link down, nothing resolved
    pub const fn down() -> Self {
        Self {
            link: false,
            speed: Speed::Unknown,
            duplex: Duplex::Unknown,
            pause: false,
            asym_pause: false,
        }
    }

    /// Link up with the given speed and duplex, no PAUSE
    pub const fn up(speed: Speed, duplex: Duplex) -> Self {
        Self {
            link: true,
            speed,
            duplex,
            pause: false,
            asym_pause: false,
        }
    }

    /// Clear everything a status poll re-derives, keeping the link flag
    pub fn clear_resolved(&mut self) {
        self.speed = Speed::Unknown;
        self.duplex = Duplex::Unknown;
        self.pause = false;
        self.asym_pause = false;
    }
}

// =============================================================================
// PHY Driver Trait
// =============================================================================

/// Lifecycle hooks a host framework invokes on a PHY driver
///
/// The host serializes calls for one device: no two hooks of the same
/// instance run concurrently. Per-device private state is owned by the
/// implementing value; `probe` attaches it and `remove` releases it.
///
/// # Example Implementation
///
/// ```ignore
/// struct MyPhy {
///     addr: u8,
///     state: Option<MyState>,
/// }
///
/// impl PhyDriver for MyPhy {
///     type InitReport = ();
///
///     fn address(&self) -> u8 { self.addr }
///
///     fn probe<M: MdioBus, D: DelayNs>(&mut self, _: &mut M, _: &mut D) -> Result<()> {
///         self.state = Some(MyState::default());
///         Ok(())
///     }
///
///     // ... other hooks
/// }
/// ```
pub trait PhyDriver {
    /// Outcome of `config_init`, returned even when bring-up was degraded
    type InitReport;

    /// Get the PHY address (0-31)
    fn address(&self) -> u8;

    /// Attach per-device state and put the PHY in a known page state
    fn probe<M: MdioBus, D: DelayNs>(&mut self, mdio: &mut M, delay: &mut D) -> Result<()>;

    /// Apply the chip bring-up sequence
    fn config_init<M: MdioBus, D: DelayNs>(
        &mut self,
        mdio: &mut M,
        delay: &mut D,
    ) -> Result<Self::InitReport>;

    /// Poll and resolve the current link status
    fn read_status<M: MdioBus>(&mut self, mdio: &mut M) -> Result<LinkStatus>;

    /// Enter low-power mode
    fn suspend<M: MdioBus, D: DelayNs>(&mut self, mdio: &mut M, delay: &mut D) -> Result<()>;

    /// Leave low-power mode
    fn resume<M: MdioBus, D: DelayNs>(&mut self, mdio: &mut M, delay: &mut D) -> Result<()>;

    /// Release per-device state
    ///
    /// Returns `true` if state was attached.
    fn remove(&mut self) -> bool;
}

// =============================================================================
// Default Implementations
// =============================================================================

/// Helper functions using standard IEEE 802.3 registers
pub mod ieee802_3 {
    use super::*;
    use crate::internal::phy_regs::standard::{anlpar, bmcr, bmsr, phy_reg};

    /// Refresh the link flag from BMSR
    ///
    /// The BMSR link bit latches low. When the link was already down the
    /// register is read twice so the second read reports the current state;
    /// when it was up a single read keeps a short drop visible.
    /// With auto-negotiation enabled the link only counts as up once
    /// negotiation has completed.
    pub fn update_link<M: MdioBus>(
        mdio: &mut M,
        phy_addr: u8,
        autoneg: bool,
        was_up: bool,
    ) -> Result<bool> {
        if !was_up {
            mdio.read(phy_addr, phy_reg::BMSR)?;
        }
        let bmsr_val = mdio.read(phy_addr, phy_reg::BMSR)?;

        let link = (bmsr_val & bmsr::LINK_STATUS) != 0;
        let an_complete = (bmsr_val & bmsr::AN_COMPLETE) != 0;
        Ok(link && (!autoneg || an_complete))
    }

    /// Restart auto-negotiation
    ///
    /// Also re-enables auto-negotiation and takes the PHY out of isolation.
    pub fn restart_auto_negotiation<M: MdioBus>(mdio: &mut M, phy_addr: u8) -> Result<()> {
        let bmcr_val = mdio.read(phy_addr, phy_reg::BMCR)?;
        mdio.write(
            phy_addr,
            phy_reg::BMCR,
            (bmcr_val | bmcr::AN_ENABLE | bmcr::AN_RESTART) & !bmcr::ISOLATE,
        )
    }

    /// Set BMCR.RESET without waiting for it to self-clear
    pub fn trigger_soft_reset<M: MdioBus>(mdio: &mut M, phy_addr: u8) -> Result<()> {
        let bmcr_val = mdio.read(phy_addr, phy_reg::BMCR)?;
        mdio.write(phy_addr, phy_reg::BMCR, bmcr_val | bmcr::RESET)
    }

    /// Power down via BMCR
    pub fn power_down<M: MdioBus>(mdio: &mut M, phy_addr: u8) -> Result<()> {
        let bmcr_val = mdio.read(phy_addr, phy_reg::BMCR)?;
        mdio.write(phy_addr, phy_reg::BMCR, bmcr_val | bmcr::POWER_DOWN)
    }

    /// Power up via BMCR
    pub fn power_up<M: MdioBus>(mdio: &mut M, phy_addr: u8) -> Result<()> {
        let bmcr_val = mdio.read(phy_addr, phy_reg::BMCR)?;
        mdio.write(phy_addr, phy_reg::BMCR, bmcr_val & !bmcr::POWER_DOWN)
    }

    /// Read PHY ID from PHYIDR1 and PHYIDR2
    pub fn read_phy_id<M: MdioBus>(mdio: &mut M, phy_addr: u8) -> Result<u32> {
        let id1 = mdio.read(phy_addr, phy_reg::PHYIDR1)? as u32;
        let id2 = mdio.read(phy_addr, phy_reg::PHYIDR2)? as u32;
        Ok((id1 << 16) | id2)
    }

    /// Read the link partner's PAUSE advertisement from ANLPAR
    ///
    /// Returns `(pause, asym_pause)`.
    pub fn read_link_partner_pause<M: MdioBus>(mdio: &mut M, phy_addr: u8) -> Result<(bool, bool)> {
        let lpa = mdio.read(phy_addr, phy_reg::ANLPAR)?;
        Ok((
            (lpa & anlpar::PAUSE) != 0,
            (lpa & anlpar::PAUSE_ASYM) != 0,
        ))
    }
}
