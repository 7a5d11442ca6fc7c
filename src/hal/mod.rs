//! Hardware Abstraction Layer
//!
//! This module provides the register access layers the PHY driver is built on.
//!
//! # Modules
//!
//! - [`mdio`]: MDIO/SMI bus trait and IEEE 802.3 standard registers
//! - [`paged`]: Page-selected access to vendor registers
//!
//! # Delay Integration
//!
//! All operations that require delays use `embedded_hal::delay::DelayNs` directly.
//! Pass any delay implementation from your HAL (e.g., `esp_hal::delay::Delay`).

pub mod mdio;
pub mod paged;

// Re-export commonly used types
pub use mdio::MdioBus;
pub use paged::{PagedPort, RegAddr, RegWrite};
