//! Link Resolution
//!
//! Turns the MAE0621A status registers into a [`LinkStatus`] and keeps the
//! auto-negotiation debounce state between polls.
//!
//! Some link partners bring the link up without the PHY ever flagging
//! auto-negotiation as complete. The resolver restarts negotiation a bounded
//! number of times in that situation and then accepts the link as it is.

use crate::config::{Duplex, Speed};
use crate::error::Result;
use crate::hal::mdio::MdioBus;
use crate::hal::paged::PagedPort;
use crate::internal::phy_regs::maxio::{PAGE_INTR, PAGE_STATUS, iner, insr, physr, reg};

use super::generic::{LinkStatus, ieee802_3};

// =============================================================================
// Debounce State
// =============================================================================

/// Auto-negotiation debounce state of one device
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkDebounce {
    consecutive_incomplete: u8,
    stable: bool,
}

impl LinkDebounce {
    /// Fresh state: no restarts issued, link not stable
    pub const fn new() -> Self {
        Self {
            consecutive_incomplete: 0,
            stable: false,
        }
    }

    /// Restarts issued since negotiation last completed
    pub const fn consecutive_incomplete(&self) -> u8 {
        self.consecutive_incomplete
    }

    /// Link accepted as stable
    pub const fn is_stable(&self) -> bool {
        self.stable
    }
}

// =============================================================================
// Status Decoding
// =============================================================================

/// Decode the PHYSR speed field
///
/// The reserved pattern `0b11` decodes to [`Speed::Unknown`].
pub const fn decode_speed(physr_val: u16) -> Speed {
    match physr_val & physr::SPEED_MASK {
        physr::SPEED_1000 => Speed::Mbps1000,
        physr::SPEED_100 => Speed::Mbps100,
        physr::SPEED_10 => Speed::Mbps10,
        _ => Speed::Unknown,
    }
}

/// Decode the PHYSR duplex bit
pub const fn decode_duplex(physr_val: u16) -> Duplex {
    if physr_val & physr::DUPLEX_FULL != 0 {
        Duplex::Full
    } else {
        Duplex::Half
    }
}

// =============================================================================
// Resolver
// =============================================================================

/// Link resolver policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkResolver {
    /// Auto-negotiation is enabled
    pub autoneg: bool,
    /// Restarts issued before an incomplete negotiation is accepted
    pub restart_limit: u8,
}

impl LinkResolver {
    /// Create a resolver
    pub const fn new(autoneg: bool, restart_limit: u8) -> Self {
        Self {
            autoneg,
            restart_limit,
        }
    }

    /// Poll the PHY and update `status`
    ///
    /// `status` must hold the result of the previous poll. When the link was
    /// and still is up with auto-negotiation enabled it is left untouched.
    /// On error `status` is reset to link down, so the next poll resolves the
    /// link again in full. A failed register read returns before `debounce`
    /// changes.
    pub fn poll<M: MdioBus>(
        &self,
        mdio: &mut M,
        phy_addr: u8,
        status: &mut LinkStatus,
        debounce: &mut LinkDebounce,
    ) -> Result<()> {
        let mut next = *status;
        match self.resolve(mdio, phy_addr, &mut next, debounce) {
            Ok(()) => {
                *status = next;
                Ok(())
            }
            Err(e) => {
                *status = LinkStatus::down();
                Err(e)
            }
        }
    }

    fn resolve<M: MdioBus>(
        &self,
        mdio: &mut M,
        phy_addr: u8,
        status: &mut LinkStatus,
        debounce: &mut LinkDebounce,
    ) -> Result<()> {
        let was_up = status.link;
        status.link = ieee802_3::update_link(mdio, phy_addr, self.autoneg, was_up)?;

        if self.autoneg && was_up && status.link {
            return Ok(());
        }

        status.clear_resolved();
        self.resolve_mode(mdio, phy_addr, status)?;

        if self.autoneg {
            self.debounce(mdio, phy_addr, status, debounce)?;
        }
        Ok(())
    }

    /// Fill in speed, duplex and PAUSE from PHYSR and the link partner
    fn resolve_mode<M: MdioBus>(
        &self,
        mdio: &mut M,
        phy_addr: u8,
        status: &mut LinkStatus,
    ) -> Result<()> {
        let physr_val = PagedPort::new(mdio, phy_addr).read(PAGE_STATUS, reg::PHYSR)?;

        status.speed = decode_speed(physr_val);
        status.duplex = decode_duplex(physr_val);

        if status.duplex == Duplex::Full {
            let (pause, asym_pause) = ieee802_3::read_link_partner_pause(mdio, phy_addr)?;
            status.pause = pause;
            status.asym_pause = asym_pause;
        }
        Ok(())
    }

    /// Restart negotiation while the link is up but negotiation incomplete
    ///
    /// Only runs when the negotiation-complete interrupt is enabled in INER.
    fn debounce<M: MdioBus>(
        &self,
        mdio: &mut M,
        phy_addr: u8,
        status: &mut LinkStatus,
        debounce: &mut LinkDebounce,
    ) -> Result<()> {
        let mut port = PagedPort::new(mdio, phy_addr);

        let iner_val = port.read(PAGE_INTR, reg::INER)?;
        if iner_val & iner::AN_COMPLETE == 0 {
            return Ok(());
        }

        let physr_val = port.read(PAGE_STATUS, reg::PHYSR)?;
        if physr_val & physr::LINK_OK == 0 {
            debounce.stable = false;
            return Ok(());
        }

        let insr_val = port.read(PAGE_STATUS, reg::INSR)?;
        let complete = insr_val & insr::AN_COMPLETE != 0;

        let mut restart = Ok(());
        if complete {
            debounce.consecutive_incomplete = 0;
            debounce.stable = true;
        } else if !debounce.stable {
            if debounce.consecutive_incomplete < self.restart_limit {
                #[cfg(feature = "defmt")]
                defmt::debug!(
                    "PHY {}: auto-negotiation incomplete, restart {}",
                    phy_addr,
                    debounce.consecutive_incomplete + 1
                );
                restart = ieee802_3::restart_auto_negotiation(mdio, phy_addr);
                status.link = false;
                debounce.consecutive_incomplete += 1;
            } else {
                debounce.stable = true;
            }
        }

        if debounce.stable {
            debounce.consecutive_incomplete = 0;
        }
        restart
    }
}
