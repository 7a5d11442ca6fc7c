//! ADC Calibration Self-Check
//!
//! After the bring-up writes the MAE0621A needs its ADC channels to report
//! ready before the analog front end is usable. A single check unlocks the
//! calibration block, walks every channel through the selector register and
//! reads back the result register. The self-check loop repeats that check a
//! bounded number of times, cycling the PHY through power-down and reset
//! between attempts, and always finishes by locking the block again.
//!
//! Non-convergence is not an error: the caller gets a [`CalibrationReport`]
//! and decides how loudly to complain.

use embedded_hal::delay::DelayNs;

use crate::constants::{CALIBRATION_CHANNELS, CALIBRATION_RECOVERY_DELAY_MS};
use crate::error::SequenceStatus;
use crate::hal::mdio::MdioBus;
use crate::hal::paged::{PagedPort, RegAddr};
use crate::internal::phy_regs::maxio::{PAGE_STANDARD, adc, bmcr_value};
use crate::internal::phy_regs::standard::phy_reg;

// =============================================================================
// Calibration Profile
// =============================================================================

/// Register layout of a calibration block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationProfile {
    /// Lock register of the calibration block
    pub lock: RegAddr,
    /// Written to `lock` to start a check
    pub unlock_value: u16,
    /// Written to `lock` right after unlocking
    pub relock_value: u16,
    /// Written to `lock` once the loop is over
    pub final_value: u16,
    /// Channel selector register
    pub selector: RegAddr,
    /// Selector value of channel 0
    pub selector_base: u16,
    /// Selector increment per channel
    pub selector_stride: u16,
    /// Channel result register
    pub result: RegAddr,
    /// A channel is ready when any of these result bits is set
    pub ready_mask: u16,
    /// Number of channels checked per attempt
    pub channels: u16,
}

/// ADC calibration block of the MAE0621A-Q2C
pub const MAE0621A_ADC: CalibrationProfile = CalibrationProfile {
    lock: RegAddr::new(adc::PAGE_LOCK, adc::REG_LOCK),
    unlock_value: adc::UNLOCK,
    relock_value: adc::RELOCK,
    final_value: adc::FINAL,
    selector: RegAddr::new(adc::PAGE_SELECTOR, adc::REG_SELECTOR),
    selector_base: adc::SELECTOR_BASE,
    selector_stride: adc::SELECTOR_STRIDE,
    result: RegAddr::new(adc::PAGE_RESULT, adc::REG_RESULT),
    ready_mask: adc::READY_MASK,
    channels: CALIBRATION_CHANNELS,
};

// =============================================================================
// Report
// =============================================================================

/// Final state of a self-check loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CalibrationOutcome {
    /// Every channel reported ready within the attempt budget
    Converged,
    /// The attempt budget ran out
    NotConverged,
}

/// What a self-check loop did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CalibrationReport {
    /// Final state
    pub outcome: CalibrationOutcome,
    /// Checks performed
    pub attempts: u32,
    /// Recovery sequences run between checks
    pub recoveries: u32,
    /// Every register access of the loop, in order
    pub status: SequenceStatus,
}

impl CalibrationReport {
    /// True if the calibration converged
    pub const fn converged(&self) -> bool {
        matches!(self.outcome, CalibrationOutcome::Converged)
    }
}

// =============================================================================
// Self-Check
// =============================================================================

impl CalibrationProfile {
    /// Selector value for `channel`
    pub const fn selector_value(&self, channel: u16) -> u16 {
        self.selector_base
            .wrapping_add(channel.wrapping_mul(self.selector_stride))
    }

    /// Run one check
    ///
    /// Returns `true` if every channel reported ready. The first channel that
    /// is not ready, or whose result cannot be read, ends the check. Failed
    /// writes are recorded in `status` but do not end it.
    pub fn check<M: MdioBus>(&self, port: &mut PagedPort<'_, M>, status: &mut SequenceStatus) -> bool {
        status.record(port.write(self.lock.page, self.lock.reg, self.unlock_value));
        status.record(port.write(self.lock.page, self.lock.reg, self.relock_value));

        for channel in 0..self.channels {
            status.record(port.write(
                self.selector.page,
                self.selector.reg,
                self.selector_value(channel),
            ));

            match status.record(port.read(self.result.page, self.result.reg)) {
                Some(value) if value & self.ready_mask != 0 => {}
                _ => {
                    #[cfg(feature = "defmt")]
                    defmt::debug!("calibration channel {} not ready", channel);
                    return false;
                }
            }
        }
        true
    }

    /// Repeat [`check`](Self::check) up to `attempts` times
    ///
    /// Between a failed check and the next one the PHY is powered down,
    /// put back on page 0, given [`CALIBRATION_RECOVERY_DELAY_MS`] to settle
    /// and reset. No recovery follows the last check. The block is locked
    /// and the PHY reset whatever the outcome.
    pub fn self_check<M: MdioBus, D: DelayNs>(
        &self,
        port: &mut PagedPort<'_, M>,
        delay: &mut D,
        attempts: u32,
    ) -> CalibrationReport {
        let attempts = attempts.max(1);
        let mut status = SequenceStatus::new();
        let mut outcome = CalibrationOutcome::NotConverged;
        let mut performed = 0;
        let mut recoveries = 0;

        while performed < attempts {
            performed += 1;
            if self.check(port, &mut status) {
                outcome = CalibrationOutcome::Converged;
                break;
            }
            if performed < attempts {
                recover(port, delay, &mut status);
                recoveries += 1;
            }
        }

        status.record(port.write(self.lock.page, self.lock.reg, self.final_value));
        status.record(port.write(
            PAGE_STANDARD,
            phy_reg::BMCR,
            bmcr_value::RESET_AN_1000_FD,
        ));
        status.record(port.select_page(PAGE_STANDARD));

        #[cfg(feature = "defmt")]
        if outcome == CalibrationOutcome::Converged {
            defmt::debug!("calibration ready after {} attempt(s)", performed);
        }

        CalibrationReport {
            outcome,
            attempts: performed,
            recoveries,
            status,
        }
    }
}

/// Power-cycle and reset the PHY between two checks
fn recover<M: MdioBus, D: DelayNs>(
    port: &mut PagedPort<'_, M>,
    delay: &mut D,
    status: &mut SequenceStatus,
) {
    status.record(port.write(
        PAGE_STANDARD,
        phy_reg::BMCR,
        bmcr_value::POWER_DOWN_AN_1000_FD,
    ));
    status.record(port.select_page(PAGE_STANDARD));
    delay.delay_ms(CALIBRATION_RECOVERY_DELAY_MS);
    status.record(port.write(PAGE_STANDARD, phy_reg::BMCR, bmcr_value::AN_1000_FD));
    status.record(port.write(
        PAGE_STANDARD,
        phy_reg::BMCR,
        bmcr_value::RESET_AN_1000_FD,
    ));
}
