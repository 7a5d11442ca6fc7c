//! Maxio MAE0621A Vendor Register Definitions
//!
//! Vendor registers are addressed as (page, register). The page is chosen by
//! writing [`PAGE_SELECT`] on any page; the standard registers 0-15 stay
//! reachable on page 0.
//!
//! Only the registers the driver interprets are named here. The bulk of the
//! bring-up sequence is treated as opaque data in `phy::profile`.

/// Page-select register, present on every page
pub const PAGE_SELECT: u8 = 0x1F;

/// Page of the standard control/status block
pub const PAGE_STANDARD: u16 = 0x0000;

/// Vendor page holding the interrupt enable register
pub const PAGE_INTR: u16 = 0x0A42;

/// Vendor page holding the PHY status and interrupt status registers
pub const PAGE_STATUS: u16 = 0x0A43;

/// Register offsets inside the vendor pages
pub mod reg {
    /// Interrupt enable register (page 0xA42)
    pub const INER: u8 = 0x12;
    /// PHY specific status register (page 0xA43)
    pub const PHYSR: u8 = 0x1A;
    /// Interrupt status register (page 0xA43)
    pub const INSR: u8 = 0x1D;
}

/// Interrupt enable register bits
pub mod iner {
    /// Auto-negotiation completed interrupt enable
    pub const AN_COMPLETE: u16 = 1 << 3;
}

/// PHY specific status register bits
pub mod physr {
    /// Link OK
    pub const LINK_OK: u16 = 1 << 2;
    /// Full duplex
    pub const DUPLEX_FULL: u16 = 1 << 3;
    /// Speed field (bits 5:4)
    pub const SPEED_MASK: u16 = 0x3 << 4;
    /// Speed field value: 1000 Mbps
    pub const SPEED_1000: u16 = 0x20;
    /// Speed field value: 100 Mbps
    pub const SPEED_100: u16 = 0x10;
    /// Speed field value: 10 Mbps
    pub const SPEED_10: u16 = 0x00;
}

/// Interrupt status register bits
pub mod insr {
    /// Auto-negotiation completed
    pub const AN_COMPLETE: u16 = 1 << 3;
}

/// ADC calibration block
pub mod adc {
    /// Page of the calibration lock register
    pub const PAGE_LOCK: u16 = 0x0D96;
    /// Calibration lock register
    pub const REG_LOCK: u8 = 0x02;
    /// Lock value that opens the calibration block
    pub const UNLOCK: u16 = 0x1FFF;
    /// Lock value written right after unlocking, before the channel checks
    pub const RELOCK: u16 = 0x1000;
    /// Lock value left in place once the self-check is over
    pub const FINAL: u16 = 0x0FFF;

    /// Page of the channel selector register
    pub const PAGE_SELECTOR: u16 = 0x0D8F;
    /// Channel selector register
    pub const REG_SELECTOR: u8 = 0x0B;
    /// Selector value for channel 0
    pub const SELECTOR_BASE: u16 = 0xF908;
    /// Selector increment per channel
    pub const SELECTOR_STRIDE: u16 = 0x0100;

    /// Page of the channel result register
    pub const PAGE_RESULT: u16 = 0x0D92;
    /// Channel result register
    pub const REG_RESULT: u8 = 0x0B;
    /// Status bits that must be non-zero for a converged channel
    pub const READY_MASK: u16 = 0x01FF;
}

/// BMCR values used by the calibration recovery and finalize sequences
pub mod bmcr_value {
    /// Power down with auto-negotiation and 1000 Mbps full duplex selected
    pub const POWER_DOWN_AN_1000_FD: u16 = 0x1940;
    /// Auto-negotiation enabled, 1000 Mbps full duplex selected
    pub const AN_1000_FD: u16 = 0x1140;
    /// Soft reset with auto-negotiation and 1000 Mbps full duplex selected
    pub const RESET_AN_1000_FD: u16 = 0x9140;
}

/// Power-management registers of the MAE0621A/B-Q3C(I)
pub mod q3c_power {
    /// Page of the first power control register
    pub const PAGE_CTRL: u16 = 0x0DAA;
    /// First power control register
    pub const REG_CTRL: u8 = 0x17;
    /// Value for low-power mode
    pub const CTRL_SUSPEND: u16 = 0x1011;
    /// Value for normal operation
    pub const CTRL_RESUME: u16 = 0x1001;

    /// Page of the second power control register
    pub const PAGE_BIAS: u16 = 0x0DAB;
    /// Second power control register
    pub const REG_BIAS: u8 = 0x15;
    /// Value for low-power mode
    pub const BIAS_SUSPEND: u16 = 0x5550;
    /// Value for normal operation
    pub const BIAS_RESUME: u16 = 0x0000;
}
