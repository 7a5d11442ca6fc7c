//! Synchronization Support
//!
//! - **Primitives** (`primitives`): [`CriticalSectionCell`], ISR-safe
//!   interior mutability
//! - **Shared Wrapper** (`shared`): [`SharedPhy`], a PHY driver and its bus
//!   behind one critical section
//!
//! # Feature Flags
//!
//! - `critical-section`: Enables this module
//!
//! # Example
//!
//! ```ignore
//! use maxio_phy::sync::SharedPhy;
//! use maxio_phy::{Mae0621a, PhyDriver, Variant};
//!
//! static PHY: SharedPhy<BoardMdio> =
//!     SharedPhy::new(Mae0621a::new(0, Variant::Mae0621a), BoardMdio::new());
//!
//! #[interrupt]
//! fn PHY_IRQ() {
//!     let _ = PHY.read_status();
//! }
//! ```

mod primitives;

pub use primitives::CriticalSectionCell;

mod shared;

pub use shared::SharedPhy;
