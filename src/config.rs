//! Configuration types for the Maxio PHY driver

use crate::constants::{AN_RESTART_LIMIT, CALIBRATION_ATTEMPTS};

/// Ethernet link speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Speed {
    /// 10 Mbps
    Mbps10,
    /// 100 Mbps
    Mbps100,
    /// 1000 Mbps
    Mbps1000,
    /// Not resolved (link down or undefined status pattern)
    #[default]
    Unknown,
}

impl Speed {
    /// Speed in Mbps, if known
    pub const fn mbps(self) -> Option<u16> {
        match self {
            Speed::Mbps10 => Some(10),
            Speed::Mbps100 => Some(100),
            Speed::Mbps1000 => Some(1000),
            Speed::Unknown => None,
        }
    }
}

/// Ethernet duplex mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Duplex {
    /// Half duplex
    Half,
    /// Full duplex
    Full,
    /// Not resolved
    #[default]
    Unknown,
}

/// PHY driver configuration
///
/// Holds the host-side policy the driver applies on top of the fixed device
/// profiles: whether auto-negotiation is in use and the retry bounds of the
/// calibration and link debounce logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PhyConfig {
    /// Auto-negotiation enabled (link resolution and debounce depend on it)
    pub autoneg: bool,
    /// Maximum calibration check attempts during init
    pub calibration_attempts: u32,
    /// Forced auto-negotiation restarts before an incomplete link is
    /// accepted as stable
    pub restart_limit: u8,
    /// Honor the per-variant settle delays
    pub settle_delays: bool,
}

impl Default for PhyConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl PhyConfig {
    /// Create a new configuration with defaults
    #[must_use]
    pub const fn new() -> Self {
        Self {
            autoneg: true,
            calibration_attempts: CALIBRATION_ATTEMPTS,
            restart_limit: AN_RESTART_LIMIT,
            settle_delays: true,
        }
    }

    // =========================================================================
    // Builder Methods
    // =========================================================================

    /// Enable or disable auto-negotiation
    #[must_use]
    pub const fn with_autoneg(mut self, enabled: bool) -> Self {
        self.autoneg = enabled;
        self
    }

    /// Set the maximum number of calibration check attempts
    ///
    /// A value of 0 is treated as 1: the check always runs at least once.
    #[must_use]
    pub const fn with_calibration_attempts(mut self, attempts: u32) -> Self {
        self.calibration_attempts = if attempts == 0 { 1 } else { attempts };
        self
    }

    /// Set the number of forced auto-negotiation restarts
    #[must_use]
    pub const fn with_restart_limit(mut self, limit: u8) -> Self {
        self.restart_limit = limit;
        self
    }

    /// Enable or disable the fixed settle delays after probe, init and resume
    ///
    /// The calibration recovery delay is part of the recovery sequence and is
    /// always kept.
    #[must_use]
    pub const fn with_settle_delays(mut self, enabled: bool) -> Self {
        self.settle_delays = enabled;
        self
    }
}
