//! Maxio MAE0621A PHY Driver
//!
//! A `no_std`, `no_alloc` Rust driver for the Maxio MAE0621A family of
//! 10/100/1000 Ethernet PHYs.
//!
//! The driver sits between a MAC's management interface and the host's
//! network stack. It brings the PHY up with the vendor register sequence,
//! validates the ADC calibration, and resolves a stable link status from the
//! chip's auto-negotiation status bits.
//!
//! # Architecture
//!
//! The driver is organized into two layers:
//!
//! 1. **HAL Layer** ([`hal`]): [`MdioBus`] register transport and paged
//!    access to vendor registers
//! 2. **PHY Layer** ([`phy`]): calibration, link resolution, per-variant
//!    profiles and the [`Mae0621a`] driver
//!
//! ## Standard Compliance
//!
//! - **IEEE 802.3 Clause 22**: BMCR/BMSR/PHYID/ANLPAR access and bit layout
//! - **Maxio vendor pages**: register 31 selects the page of the others
//!
//! # Supported PHY Chips
//!
//! - [`Variant::Mae0621a`]: MAE0621A-Q2C (PHY ID `0x7B744411`)
//! - [`Variant::Mae0621aQ3c`]: MAE0621A/B-Q3C(I) (PHY ID `0x7B744412`)
//!
//! # Features
//!
//! - `defmt`: Enable defmt logging and formatting for public types
//! - `critical-section`: Enable ISR-safe `SharedPhy` wrapper
//!
//! # Example
//!
//! ```ignore
//! use maxio_phy::{Mae0621a, PhyConfig, PhyDriver};
//! use embedded_hal::delay::DelayNs;
//!
//! // Your MdioBus implementation on top of the MAC's SMI controller
//! let mut mdio = /* your MdioBus implementation */;
//! let mut delay = /* your DelayNs implementation */;
//!
//! let mut phy = Mae0621a::detect(&mut mdio, 0)?
//!     .with_config(PhyConfig::new().with_restart_limit(4));
//!
//! phy.probe(&mut mdio, &mut delay)?;
//! let report = phy.config_init(&mut mdio, &mut delay)?;
//!
//! let status = phy.read_status(&mut mdio)?;
//! if status.link {
//!     mac.set_speed(status.speed);
//!     mac.set_duplex(status.duplex);
//! }
//! ```

#![no_std]
#![deny(missing_docs)]
#![allow(unsafe_code)]
#![deny(unsafe_op_in_unsafe_fn)]
// Clippy lint levels live here; Cargo.toml carries the same table.
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::too_many_arguments,
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    clippy::type_complexity,
    clippy::must_use_candidate,
    clippy::assertions_on_constants,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_lossless,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::wildcard_imports,
    clippy::items_after_statements
)]

// =============================================================================
// Modules
// =============================================================================

pub mod config;
pub mod constants;
pub mod error;
pub mod hal;
pub mod phy;

// Internal implementation details (pub(crate) only)
mod internal;

#[cfg(feature = "critical-section")]
#[cfg_attr(docsrs, doc(cfg(feature = "critical-section")))]
pub mod sync;

// Test utilities (only available during testing)
#[cfg(test)]
pub mod test_utils;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{Duplex, PhyConfig, Speed};
pub use error::{
    ConfigError, ConfigResult, Error, IoError, IoResult, Result, SequenceStatus, StepFailure,
};
pub use hal::{MdioBus, PagedPort, RegAddr, RegWrite};

// Re-export PHY types
pub use phy::{
    CalibrationOutcome, CalibrationReport, InitReport, LinkDebounce, LinkStatus, Mae0621a,
    PhyDriver, Variant,
};

// Re-export sync types when critical-section is enabled
#[cfg(feature = "critical-section")]
pub use sync::SharedPhy;
