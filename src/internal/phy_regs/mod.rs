//! PHY Register Definitions
//!
//! Register definitions for the PHY as seen over the management bus.
//!
//! # Module Organization
//!
//! - [`standard`] - IEEE 802.3 Clause 22 standard PHY registers (0-15)
//! - [`maxio`] - Maxio vendor registers, addressed as (page, register)
//!
//! # Access Method
//!
//! Standard registers are read directly. Vendor registers sit behind the
//! page-select register (31) and go through [`crate::hal::paged::PagedPort`].

pub mod maxio;
pub mod standard;
