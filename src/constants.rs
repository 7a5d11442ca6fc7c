//! Centralized Constants
//!
//! This module provides a single source of truth for the policy values and
//! timing constants used throughout the PHY driver.
//!
//! # Organization
//!
//! Constants are grouped by category:
//! - **Identification**: Supported PHY identifiers and match mask
//! - **Timing**: Settle delays required by the hardware
//! - **Policy**: Retry and debounce bounds
//!
//! # Note
//!
//! Register addresses and bit definitions live in `internal::phy_regs`,
//! and the per-variant register tables live in `phy::profile`.

// =============================================================================
// Identification
// =============================================================================

/// MAE0621A-Q2C PHY identifier (PHYIDR1 << 16 | PHYIDR2)
pub const MAE0621A_PHY_ID: u32 = 0x7B74_4411;

/// MAE0621A/B-Q3C(I) PHY identifier
pub const MAE0621A_Q3C_PHY_ID: u32 = 0x7B74_4412;

/// Mask applied to both sides of an identifier comparison
pub const MAXIO_PHY_ID_MASK: u32 = 0x7FFF_FFFF;

/// Revision of the vendor register sequences carried by the device profiles
pub const PROFILE_REVISION: &str = "v1.8.1.13";

// =============================================================================
// Timing Constants
// =============================================================================

/// Settle time after selecting page 0 during probe (MAE0621A-Q2C)
pub const PROBE_SETTLE_MS: u32 = 100;

/// Settle time after the full init sequence and calibration (MAE0621A-Q2C)
pub const INIT_SETTLE_MS: u32 = 100;

/// Delay inside the calibration recovery sequence, after the reset write
pub const CALIBRATION_RECOVERY_DELAY_MS: u32 = 10;

/// Settle time after the soft reset issued on resume (MAE0621A-Q2C)
pub const RESUME_RESET_SETTLE_MS: u32 = 20;

// =============================================================================
// Policy
// =============================================================================

/// Default number of calibration check attempts
pub const CALIBRATION_ATTEMPTS: u32 = 50;

/// Number of ADC calibration channels checked per attempt
pub const CALIBRATION_CHANNELS: u16 = 4;

/// Default number of forced auto-negotiation restarts before the link is
/// accepted as stable
pub const AN_RESTART_LIMIT: u8 = 4;
