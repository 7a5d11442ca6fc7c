//! Device Profiles
//!
//! Everything that differs between MAE0621A variants is data: the bring-up
//! write table, whether an ADC calibration follows it, the settle delays and
//! the power-management sequences. The tables come from the vendor register
//! sequences at revision [`PROFILE_REVISION`](crate::constants::PROFILE_REVISION)
//! and are applied verbatim.

use embedded_hal::delay::DelayNs;

use crate::config::PhyConfig;
use crate::constants::{
    INIT_SETTLE_MS, MAE0621A_PHY_ID, MAE0621A_Q3C_PHY_ID, PROBE_SETTLE_MS, RESUME_RESET_SETTLE_MS,
};
use crate::error::SequenceStatus;
use crate::hal::mdio::MdioBus;
use crate::hal::paged::{PagedPort, RegWrite};
use crate::internal::phy_regs::maxio::{PAGE_STANDARD, q3c_power};

use super::calibration::{CalibrationProfile, CalibrationReport, MAE0621A_ADC};
use super::generic::ieee802_3;

// =============================================================================
// Power Sequences
// =============================================================================

/// One step of a probe, suspend or resume sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerStep {
    /// Paged register write
    Write(RegWrite),
    /// Write 0 to the page-select register
    SelectStandardPage,
    /// Set BMCR.POWER_DOWN
    PowerDown,
    /// Clear BMCR.POWER_DOWN
    PowerUp,
    /// Set BMCR.RESET
    SoftReset,
    /// Wait this many milliseconds
    Settle(u32),
}

impl PowerStep {
    fn run<M: MdioBus, D: DelayNs>(
        &self,
        port: &mut PagedPort<'_, M>,
        delay: &mut D,
        config: &PhyConfig,
        status: &mut SequenceStatus,
    ) {
        let phy_addr = port.phy_addr();
        match *self {
            PowerStep::Write(w) => {
                status.record(port.write(w.addr.page, w.addr.reg, w.value));
            }
            PowerStep::SelectStandardPage => {
                status.record(port.select_page(PAGE_STANDARD));
            }
            PowerStep::PowerDown => {
                status.record(ieee802_3::power_down(port.bus(), phy_addr));
            }
            PowerStep::PowerUp => {
                status.record(ieee802_3::power_up(port.bus(), phy_addr));
            }
            PowerStep::SoftReset => {
                status.record(ieee802_3::trigger_soft_reset(port.bus(), phy_addr));
            }
            PowerStep::Settle(ms) => {
                if config.settle_delays {
                    delay.delay_ms(ms);
                }
            }
        }
    }
}

/// Run a power sequence to the end, recording every register step
pub fn run_power_sequence<M: MdioBus, D: DelayNs>(
    mdio: &mut M,
    phy_addr: u8,
    delay: &mut D,
    config: &PhyConfig,
    steps: &[PowerStep],
) -> SequenceStatus {
    let mut port = PagedPort::new(mdio, phy_addr);
    let mut status = SequenceStatus::new();
    for step in steps {
        step.run(&mut port, delay, config, &mut status);
    }
    status
}

// =============================================================================
// Device Profile
// =============================================================================

/// Immutable description of one MAE0621A variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceProfile {
    /// Marketing name
    pub name: &'static str,
    /// PHY identifier this profile is bound to
    pub phy_id: u32,
    /// Bring-up writes, in order
    pub init: &'static [RegWrite],
    /// Calibration run after the bring-up writes, if the variant needs one
    pub calibration: Option<&'static CalibrationProfile>,
    /// Settle time at the end of `config_init`
    pub init_settle_ms: u32,
    /// Steps run once per-device state is attached
    pub probe: &'static [PowerStep],
    /// Steps that put the PHY into low-power mode
    pub suspend: &'static [PowerStep],
    /// Steps that bring the PHY back
    pub resume: &'static [PowerStep],
}

/// Outcome of applying a profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InitReport {
    /// Bring-up writes followed by the page 0 selection
    pub writes: SequenceStatus,
    /// Calibration outcome, for variants that calibrate
    pub calibration: Option<CalibrationReport>,
}

impl InitReport {
    /// True if calibration converged or the variant has none
    pub fn calibration_ok(&self) -> bool {
        self.calibration.is_none_or(|report| report.converged())
    }

    /// True if every register access succeeded and calibration converged
    pub fn is_ok(&self) -> bool {
        self.writes.is_ok()
            && self.calibration_ok()
            && self.calibration.is_none_or(|report| report.status.is_ok())
    }
}

impl DeviceProfile {
    /// Apply the bring-up sequence
    ///
    /// Writes are best effort: a failed write is recorded and the sequence
    /// carries on. Page 0 is selected afterwards, then the calibration runs
    /// and the init settle delay elapses.
    pub fn apply<M: MdioBus, D: DelayNs>(
        &self,
        mdio: &mut M,
        phy_addr: u8,
        delay: &mut D,
        config: &PhyConfig,
    ) -> InitReport {
        let mut port = PagedPort::new(mdio, phy_addr);

        let mut writes = port.write_all(self.init);
        writes.record(port.select_page(PAGE_STANDARD));

        let calibration = self
            .calibration
            .map(|cal| cal.self_check(&mut port, delay, config.calibration_attempts));

        if config.settle_delays && self.init_settle_ms > 0 {
            delay.delay_ms(self.init_settle_ms);
        }

        InitReport {
            writes,
            calibration,
        }
    }
}

// =============================================================================
// MAE0621A-Q2C
// =============================================================================

const Q2C_INIT: [RegWrite; 21] = [
    RegWrite::new(0x0DA0, 0x10, 0x0C13),
    RegWrite::new(0x0000, 0x0D, 0x0007),
    RegWrite::new(0x0000, 0x0E, 0x003C),
    RegWrite::new(0x0000, 0x0D, 0x4007),
    RegWrite::new(0x0000, 0x0E, 0x0000),
    RegWrite::new(0x0D96, 0x13, 0x07BC),
    RegWrite::new(0x0D8F, 0x08, 0x2500),
    RegWrite::new(0x0D90, 0x02, 0x1555),
    RegWrite::new(0x0D90, 0x05, 0x2B15),
    RegWrite::new(0x0D92, 0x14, 0x000A),
    RegWrite::new(0x0D91, 0x07, 0x5B00),
    RegWrite::new(0x0D8F, 0x00, 0x0300),
    RegWrite::new(0x0D92, 0x0A, 0x8506),
    RegWrite::new(0x0D91, 0x06, 0x6870),
    RegWrite::new(0x0D91, 0x01, 0x0940),
    RegWrite::new(0x0DA0, 0x13, 0x1303),
    RegWrite::new(0x0D97, 0x0C, 0x0177),
    RegWrite::new(0x0D97, 0x0B, 0x09A9),
    RegWrite::new(0x0A42, 0x12, 0x0028),
    RegWrite::new(0x0000, 0x04, 0x0DE1),
    RegWrite::new(0x0000, 0x00, 0x9140),
];

const Q2C_PROBE: [PowerStep; 2] = [
    PowerStep::SelectStandardPage,
    PowerStep::Settle(PROBE_SETTLE_MS),
];

const Q2C_SUSPEND: [PowerStep; 2] = [PowerStep::PowerDown, PowerStep::SelectStandardPage];

const Q2C_RESUME: [PowerStep; 3] = [
    PowerStep::PowerUp,
    PowerStep::SoftReset,
    PowerStep::Settle(RESUME_RESET_SETTLE_MS),
];

/// MAE0621A-Q2C
pub static MAE0621A_Q2C: DeviceProfile = DeviceProfile {
    name: "MAE0621A-Q2C Gigabit Ethernet",
    phy_id: MAE0621A_PHY_ID,
    init: &Q2C_INIT,
    calibration: Some(&MAE0621A_ADC),
    init_settle_ms: INIT_SETTLE_MS,
    probe: &Q2C_PROBE,
    suspend: &Q2C_SUSPEND,
    resume: &Q2C_RESUME,
};

// =============================================================================
// MAE0621A/B-Q3C(I)
// =============================================================================

const Q3C_INIT: [RegWrite; 27] = [
    RegWrite::new(0x0A43, 0x19, 0x0823),
    RegWrite::new(0x0DAB, 0x17, 0x0C13),
    RegWrite::new(0x0D96, 0x15, 0xC08A),
    RegWrite::new(0x0DA4, 0x12, 0x07BC),
    RegWrite::new(0x0D8F, 0x16, 0x2500),
    RegWrite::new(0x0D90, 0x16, 0x1555),
    RegWrite::new(0x0D92, 0x11, 0x2B15),
    RegWrite::new(0x0D96, 0x16, 0x4010),
    RegWrite::new(0x0DA5, 0x11, 0x4A12),
    RegWrite::new(0x0DA5, 0x12, 0x4A12),
    RegWrite::new(0x0D99, 0x16, 0x000A),
    RegWrite::new(0x0D95, 0x13, 0x5B00),
    RegWrite::new(0x0D8F, 0x10, 0x0300),
    RegWrite::new(0x0D98, 0x17, 0x8506),
    RegWrite::new(0x0D95, 0x12, 0x6870),
    RegWrite::new(0x0D93, 0x15, 0x0940),
    // TX center tap off
    RegWrite::new(0x0DAD, 0x12, 0x0303),
    // IO drive strength 1
    RegWrite::new(0x0DAD, 0x13, 0x050D),
    RegWrite::new(0x0DAD, 0x14, 0x0D05),
    RegWrite::new(0x0DAD, 0x15, 0x0505),
    RegWrite::new(0x0DAD, 0x17, 0x0001),
    RegWrite::new(0x0DA8, 0x11, 0x0177),
    RegWrite::new(0x0DA8, 0x10, 0x09A9),
    RegWrite::new(0x0DA8, 0x12, 0x0868),
    RegWrite::new(0x0A42, 0x12, 0x0028),
    RegWrite::new(0x0000, 0x04, 0x0DE1),
    RegWrite::new(0x0000, 0x00, 0x9140),
];

const Q3C_SUSPEND: [PowerStep; 5] = [
    PowerStep::Write(RegWrite::new(
        q3c_power::PAGE_CTRL,
        q3c_power::REG_CTRL,
        q3c_power::CTRL_SUSPEND,
    )),
    PowerStep::Write(RegWrite::new(
        q3c_power::PAGE_BIAS,
        q3c_power::REG_BIAS,
        q3c_power::BIAS_SUSPEND,
    )),
    PowerStep::SelectStandardPage,
    PowerStep::PowerDown,
    PowerStep::SelectStandardPage,
];

const Q3C_RESUME: [PowerStep; 4] = [
    PowerStep::PowerUp,
    PowerStep::Write(RegWrite::new(
        q3c_power::PAGE_CTRL,
        q3c_power::REG_CTRL,
        q3c_power::CTRL_RESUME,
    )),
    PowerStep::Write(RegWrite::new(
        q3c_power::PAGE_BIAS,
        q3c_power::REG_BIAS,
        q3c_power::BIAS_RESUME,
    )),
    PowerStep::SelectStandardPage,
];

/// MAE0621A/B-Q3C(I)
pub static MAE0621A_Q3C: DeviceProfile = DeviceProfile {
    name: "MAE0621A/B-Q3C(I) Gigabit Ethernet",
    phy_id: MAE0621A_Q3C_PHY_ID,
    init: &Q3C_INIT,
    calibration: None,
    init_settle_ms: 0,
    probe: &[],
    suspend: &Q3C_SUSPEND,
    resume: &Q3C_RESUME,
};
