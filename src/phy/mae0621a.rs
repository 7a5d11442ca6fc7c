//! MAE0621A PHY Driver
//!
//! Driver for the Maxio MAE0621A family of 10/100/1000 Ethernet PHYs.
//!
//! Two parts are supported, told apart by their PHY identifier:
//!
//! | Part               | PHY ID       | Calibration | Settle delays   |
//! |--------------------|--------------|-------------|-----------------|
//! | MAE0621A-Q2C       | `0x7B744411` | ADC         | probe, init     |
//! | MAE0621A/B-Q3C(I)  | `0x7B744412` | none        | none            |
//!
//! # Lifecycle
//!
//! The host framework drives the PHY through [`PhyDriver`]: `probe` attaches
//! the debounce state, `config_init` applies the variant's bring-up sequence,
//! `read_status` is polled for link changes, `suspend`/`resume` handle power
//! management and `remove` releases the state again.
//!
//! # Example
//!
//! ```ignore
//! use maxio_phy::{Mae0621a, PhyDriver};
//!
//! let mut phy = Mae0621a::detect(&mut mdio, 0)?;
//! phy.probe(&mut mdio, &mut delay)?;
//!
//! let report = phy.config_init(&mut mdio, &mut delay)?;
//! if !report.calibration_ok() {
//!     // PHY is usable but the analog front end may be degraded
//! }
//!
//! loop {
//!     let status = phy.read_status(&mut mdio)?;
//!     if status.link {
//!         mac.set_speed(status.speed);
//!         mac.set_duplex(status.duplex);
//!     }
//!     // delay...
//! }
//! ```

use embedded_hal::delay::DelayNs;

use crate::config::PhyConfig;
use crate::constants::{MAE0621A_PHY_ID, MAE0621A_Q3C_PHY_ID, MAXIO_PHY_ID_MASK};
use crate::error::{ConfigError, IoError, Result};
use crate::hal::mdio::MdioBus;

use super::generic::{LinkStatus, PhyDriver, ieee802_3};
use super::link::{LinkDebounce, LinkResolver};
use super::profile::{DeviceProfile, InitReport, MAE0621A_Q2C, MAE0621A_Q3C, run_power_sequence};

// =============================================================================
// Variants
// =============================================================================

/// Supported MAE0621A parts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Variant {
    /// MAE0621A-Q2C
    Mae0621a,
    /// MAE0621A/B-Q3C(I)
    Mae0621aQ3c,
}

impl Variant {
    /// All supported variants
    pub const ALL: [Variant; 2] = [Variant::Mae0621a, Variant::Mae0621aQ3c];

    /// Identify a part from its PHY identifier
    pub const fn from_phy_id(phy_id: u32) -> Option<Self> {
        match phy_id & MAXIO_PHY_ID_MASK {
            id if id == MAE0621A_PHY_ID & MAXIO_PHY_ID_MASK => Some(Variant::Mae0621a),
            id if id == MAE0621A_Q3C_PHY_ID & MAXIO_PHY_ID_MASK => Some(Variant::Mae0621aQ3c),
            _ => None,
        }
    }

    /// PHY identifier of this part
    pub const fn phy_id(self) -> u32 {
        match self {
            Variant::Mae0621a => MAE0621A_PHY_ID,
            Variant::Mae0621aQ3c => MAE0621A_Q3C_PHY_ID,
        }
    }

    /// Register tables and sequences of this part
    pub fn profile(self) -> &'static DeviceProfile {
        match self {
            Variant::Mae0621a => &MAE0621A_Q2C,
            Variant::Mae0621aQ3c => &MAE0621A_Q3C,
        }
    }

    /// Marketing name
    pub fn name(self) -> &'static str {
        self.profile().name
    }
}

// =============================================================================
// MAE0621A Driver
// =============================================================================

/// MAE0621A PHY Driver
///
/// Owns the per-device state the lifecycle hooks share: the auto-negotiation
/// debounce state, attached by `probe`, and the last resolved link status.
#[derive(Debug)]
pub struct Mae0621a {
    /// PHY address (0-31)
    addr: u8,
    variant: Variant,
    config: PhyConfig,
    /// Present between `probe` and `remove`
    debounce: Option<LinkDebounce>,
    /// Result of the last status poll
    status: LinkStatus,
}

impl Mae0621a {
    /// Create a driver for a known variant
    ///
    /// # Arguments
    /// * `addr` - PHY address
    /// * `variant` - Part populated at that address
    pub const fn new(addr: u8, variant: Variant) -> Self {
        Self {
            addr,
            variant,
            config: PhyConfig::new(),
            debounce: None,
            status: LinkStatus::down(),
        }
    }

    /// Replace the driver policy
    #[must_use]
    pub const fn with_config(mut self, config: PhyConfig) -> Self {
        self.config = config;
        self
    }

    /// Read the PHY identifier at `addr` and create a matching driver
    ///
    /// Fails with [`ConfigError::UnsupportedPhy`] if the part is not a
    /// MAE0621A.
    pub fn detect<M: MdioBus>(mdio: &mut M, addr: u8) -> Result<Self> {
        let phy_id = ieee802_3::read_phy_id(mdio, addr)?;
        match Variant::from_phy_id(phy_id) {
            Some(variant) => Ok(Self::new(addr, variant)),
            None => {
                #[cfg(feature = "defmt")]
                defmt::warn!("PHY {}: unsupported identifier {=u32:#x}", addr, phy_id);
                Err(ConfigError::UnsupportedPhy.into())
            }
        }
    }

    /// Check that the part at this address is the configured variant
    pub fn verify_id<M: MdioBus>(&self, mdio: &mut M) -> Result<bool> {
        let phy_id = ieee802_3::read_phy_id(mdio, self.addr)?;
        Ok(Variant::from_phy_id(phy_id) == Some(self.variant))
    }

    /// Configured variant
    pub const fn variant(&self) -> Variant {
        self.variant
    }

    /// Driver policy
    pub const fn config(&self) -> &PhyConfig {
        &self.config
    }

    /// Last resolved link status
    pub const fn status(&self) -> LinkStatus {
        self.status
    }

    /// Debounce state, if probed
    pub const fn debounce(&self) -> Option<&LinkDebounce> {
        self.debounce.as_ref()
    }

    /// Per-device state is attached
    pub const fn is_probed(&self) -> bool {
        self.debounce.is_some()
    }

    fn ensure_probed(&self) -> Result<()> {
        if self.is_probed() {
            Ok(())
        } else {
            Err(IoError::NotProbed.into())
        }
    }
}

impl PhyDriver for Mae0621a {
    type InitReport = InitReport;

    fn address(&self) -> u8 {
        self.addr
    }

    fn probe<M: MdioBus, D: DelayNs>(&mut self, mdio: &mut M, delay: &mut D) -> Result<()> {
        if self.is_probed() {
            return Err(ConfigError::AlreadyProbed.into());
        }
        self.debounce = Some(LinkDebounce::new());
        self.status = LinkStatus::down();

        #[cfg(feature = "defmt")]
        defmt::info!(
            "PHY {}: probe {} (id {=u32:#x})",
            self.addr,
            self.variant.name(),
            self.variant.phy_id()
        );

        let profile = self.variant.profile();
        let status = run_power_sequence(mdio, self.addr, delay, &self.config, profile.probe);
        if !status.is_ok() {
            #[cfg(feature = "defmt")]
            defmt::warn!("PHY {}: page reset at probe failed", self.addr);
        }
        Ok(())
    }

    fn config_init<M: MdioBus, D: DelayNs>(
        &mut self,
        mdio: &mut M,
        delay: &mut D,
    ) -> Result<InitReport> {
        self.ensure_probed()?;

        #[cfg(feature = "defmt")]
        defmt::info!(
            "PHY {}: applying {} profile {}",
            self.addr,
            self.variant.name(),
            crate::constants::PROFILE_REVISION
        );

        let report = self
            .variant
            .profile()
            .apply(mdio, self.addr, delay, &self.config);

        if !report.writes.is_ok() {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "PHY {}: {} of {} init writes failed",
                self.addr,
                report.writes.failures(),
                report.writes.steps()
            );
        }

        if let Some(calibration) = report.calibration {
            if calibration.converged() {
                #[cfg(feature = "defmt")]
                defmt::info!(
                    "PHY {}: ready after {} calibration attempt(s)",
                    self.addr,
                    calibration.attempts
                );
            } else {
                #[cfg(feature = "defmt")]
                defmt::warn!(
                    "PHY {}: ADC calibration did not converge after {} attempts",
                    self.addr,
                    calibration.attempts
                );
            }
        }

        Ok(report)
    }

    fn read_status<M: MdioBus>(&mut self, mdio: &mut M) -> Result<LinkStatus> {
        let debounce = self.debounce.as_mut().ok_or(IoError::NotProbed)?;
        let was_up = self.status.link;

        let resolver = LinkResolver::new(self.config.autoneg, self.config.restart_limit);
        resolver.poll(mdio, self.addr, &mut self.status, debounce)?;

        if self.status.link != was_up {
            #[cfg(feature = "defmt")]
            if self.status.link {
                defmt::info!(
                    "PHY {}: link up {} {}",
                    self.addr,
                    self.status.speed,
                    self.status.duplex
                );
            } else {
                defmt::info!("PHY {}: link down", self.addr);
            }
        }

        Ok(self.status)
    }

    fn suspend<M: MdioBus, D: DelayNs>(&mut self, mdio: &mut M, delay: &mut D) -> Result<()> {
        let steps = self.variant.profile().suspend;
        run_power_sequence(mdio, self.addr, delay, &self.config, steps).into_result()
    }

    fn resume<M: MdioBus, D: DelayNs>(&mut self, mdio: &mut M, delay: &mut D) -> Result<()> {
        let steps = self.variant.profile().resume;
        run_power_sequence(mdio, self.addr, delay, &self.config, steps).into_result()
    }

    fn remove(&mut self) -> bool {
        #[cfg(feature = "defmt")]
        defmt::debug!("PHY {}: remove", self.addr);

        self.status = LinkStatus::down();
        self.debounce.take().is_some()
    }
}
