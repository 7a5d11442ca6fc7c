//! Paged Register Access
//!
//! The MAE0621A exposes far more registers than the 32 a Clause 22 frame can
//! address. Vendor registers are grouped into pages; register 31 on every
//! page selects which page the other offsets refer to.
//!
//! [`PagedPort`] performs one paged access as a save / select / operate /
//! restore sequence. Whatever happens to the inner access, the page-select
//! register is written back to the value it held before the call, so no
//! caller ever observes another caller's page selection.
//!
//! The sequence is not re-entrant. The port borrows the bus mutably for the
//! whole access, which is what keeps two paged accesses on the same device
//! from interleaving.

use crate::error::{Result, SequenceStatus};
use crate::hal::mdio::{MdioBus, validate_address};
use crate::internal::phy_regs::maxio::PAGE_SELECT;

// =============================================================================
// Register Addressing
// =============================================================================

/// A vendor register address: page plus in-page offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegAddr {
    /// Page number written to the page-select register
    pub page: u16,
    /// Register offset within the page (0-31)
    pub reg: u8,
}

impl RegAddr {
    /// Create a register address
    pub const fn new(page: u16, reg: u8) -> Self {
        Self { page, reg }
    }
}

/// One entry of a register write sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RegWrite {
    /// Target register
    pub addr: RegAddr,
    /// Value to write
    pub value: u16,
}

impl RegWrite {
    /// Create a write of `value` to (`page`, `reg`)
    pub const fn new(page: u16, reg: u8, value: u16) -> Self {
        Self {
            addr: RegAddr::new(page, reg),
            value,
        }
    }
}

// =============================================================================
// Paged Port
// =============================================================================

/// Paged view of one PHY on an MDIO bus
#[derive(Debug)]
pub struct PagedPort<'a, M: MdioBus> {
    mdio: &'a mut M,
    phy_addr: u8,
}

impl<'a, M: MdioBus> PagedPort<'a, M> {
    /// Create a paged port for the PHY at `phy_addr`
    pub fn new(mdio: &'a mut M, phy_addr: u8) -> Self {
        Self { mdio, phy_addr }
    }

    /// PHY address this port talks to
    pub const fn phy_addr(&self) -> u8 {
        self.phy_addr
    }

    /// Underlying bus, for unpaged helpers
    pub fn bus(&mut self) -> &mut M {
        self.mdio
    }

    /// Read a register on the currently selected page
    #[inline]
    pub fn read_reg(&mut self, reg: u8) -> Result<u16> {
        self.mdio.read(self.phy_addr, reg)
    }

    /// Write a register on the currently selected page
    #[inline]
    pub fn write_reg(&mut self, reg: u8, value: u16) -> Result<()> {
        self.mdio.write(self.phy_addr, reg, value)
    }

    /// Write the page-select register directly, without restoring it
    pub fn select_page(&mut self, page: u16) -> Result<()> {
        self.write_reg(PAGE_SELECT, page)
    }

    /// Read `reg` on `page`, leaving the page selection as it was
    pub fn read(&mut self, page: u16, reg: u8) -> Result<u16> {
        self.with_page(page, reg, |port| port.read_reg(reg))
    }

    /// Write `value` to `reg` on `page`, leaving the page selection as it was
    pub fn write(&mut self, page: u16, reg: u8, value: u16) -> Result<()> {
        self.with_page(page, reg, |port| port.write_reg(reg, value))
    }

    /// Read-modify-write `reg` on `page` under a single page selection
    pub fn modify<F>(&mut self, page: u16, reg: u8, f: F) -> Result<()>
    where
        F: FnOnce(u16) -> u16,
    {
        self.with_page(page, reg, |port| {
            let value = port.read_reg(reg)?;
            port.write_reg(reg, f(value))
        })
    }

    /// Apply a write sequence in order, continuing past failed writes
    ///
    /// Each entry is one step of the returned status.
    pub fn write_all(&mut self, writes: &[RegWrite]) -> SequenceStatus {
        let mut status = SequenceStatus::new();
        for w in writes {
            status.record(self.write(w.addr.page, w.addr.reg, w.value));
        }
        status
    }

    /// Run `op` on `reg` with `page` selected, then restore the previous page
    ///
    /// An offset outside 0-31 is rejected before any bus transaction.
    /// If the previous page cannot be read, nothing else is attempted. If
    /// selecting `page` fails, `op` is skipped but the restore still runs.
    /// The error of the select or of `op` takes precedence; a failed restore
    /// is only reported when everything before it succeeded.
    fn with_page<T, F>(&mut self, page: u16, reg: u8, op: F) -> Result<T>
    where
        F: FnOnce(&mut Self) -> Result<T>,
    {
        validate_address(self.phy_addr, reg)?;
        let saved = self.read_reg(PAGE_SELECT)?;

        let result = match self.select_page(page) {
            Ok(()) => op(self),
            Err(e) => Err(e),
        };
        let restored = self.select_page(saved);

        match (result, restored) {
            (Err(e), _) => Err(e),
            (Ok(_), Err(e)) => Err(e),
            (Ok(value), Ok(())) => Ok(value),
        }
    }
}

#[cfg(test)]
#[allow(clippy::std_instead_of_alloc)]
mod tests {
    extern crate std;

    use super::*;
    use crate::error::{ConfigError, Error, IoError};
    use crate::test_utils::MockMdioBus;
    use std::vec;

    const PHY: u8 = 0;

    #[test]
    fn paged_read_selects_page_and_restores() {
        let mut mdio = MockMdioBus::new();
        mdio.set_paged(PHY, 0x0A43, 0x1A, 0x0024);
        mdio.set_page(PHY, 0x0005);

        let value = PagedPort::new(&mut mdio, PHY).read(0x0A43, 0x1A).unwrap();

        assert_eq!(value, 0x0024);
        assert_eq!(mdio.current_page(PHY), 0x0005);
        // select, then restore
        assert_eq!(
            mdio.get_writes(),
            vec![(PHY, PAGE_SELECT, 0x0A43), (PHY, PAGE_SELECT, 0x0005)]
        );
    }

    #[test]
    fn paged_write_lands_on_requested_page() {
        let mut mdio = MockMdioBus::new();

        PagedPort::new(&mut mdio, PHY)
            .write(0x0D96, 0x02, 0x1FFF)
            .unwrap();

        assert_eq!(mdio.get_paged(PHY, 0x0D96, 0x02), Some(0x1FFF));
        assert_eq!(mdio.get_register(PHY, 0x02), None);
        assert_eq!(mdio.current_page(PHY), 0);
    }

    #[test]
    fn failed_inner_read_still_restores_page() {
        let mut mdio = MockMdioBus::new();
        mdio.set_page(PHY, 0x0002);
        mdio.fail_read(PHY, 0x0A43, 0x1D);

        let result = PagedPort::new(&mut mdio, PHY).read(0x0A43, 0x1D);

        assert_eq!(result, Err(Error::Io(IoError::Bus)));
        assert_eq!(mdio.current_page(PHY), 0x0002);
    }

    #[test]
    fn failed_inner_write_still_restores_page() {
        let mut mdio = MockMdioBus::new();
        mdio.fail_write(PHY, 0x0DA0, 0x10);

        let result = PagedPort::new(&mut mdio, PHY).write(0x0DA0, 0x10, 0x0C13);

        assert_eq!(result, Err(Error::Io(IoError::Bus)));
        assert_eq!(mdio.current_page(PHY), 0);
        assert_eq!(mdio.get_paged(PHY, 0x0DA0, 0x10), None);
    }

    #[test]
    fn failed_page_save_aborts_without_writes() {
        let mut mdio = MockMdioBus::new();
        mdio.fail_read(PHY, 0, PAGE_SELECT);

        let result = PagedPort::new(&mut mdio, PHY).write(0x0DA0, 0x10, 0x0C13);

        assert_eq!(result, Err(Error::Io(IoError::Bus)));
        assert!(mdio.get_writes().is_empty());
    }

    #[test]
    fn failed_select_skips_operation_and_restores() {
        let mut mdio = MockMdioBus::new();
        mdio.set_page(PHY, 0x0007);
        mdio.fail_page_select(PHY, 0x0A43);

        let result = PagedPort::new(&mut mdio, PHY).read(0x0A43, 0x1A);

        assert_eq!(result, Err(Error::Io(IoError::Bus)));
        assert_eq!(mdio.current_page(PHY), 0x0007);
        assert_eq!(mdio.read_count(PHY, 0x0A43, 0x1A), 0);
        assert_eq!(mdio.read_count(PHY, 0x0007, 0x1A), 0);
    }

    #[test]
    fn failed_restore_is_reported_after_successful_read() {
        let mut mdio = MockMdioBus::new();
        mdio.set_page(PHY, 0x0003);
        mdio.set_paged(PHY, 0x0A43, 0x1A, 0x0010);
        mdio.fail_page_select(PHY, 0x0003);

        let result = PagedPort::new(&mut mdio, PHY).read(0x0A43, 0x1A);

        assert_eq!(result, Err(Error::Io(IoError::Bus)));
        assert_eq!(mdio.read_count(PHY, 0x0A43, 0x1A), 1);
    }

    #[test]
    fn page_selection_round_trips_over_mixed_sequence() {
        let mut mdio = MockMdioBus::new();
        mdio.set_page(PHY, 0x0A42);
        mdio.fail_read(PHY, 0x0D92, 0x0B);
        mdio.fail_write(PHY, 0x0D8F, 0x0B);

        let mut port = PagedPort::new(&mut mdio, PHY);
        let _ = port.read(0x0A43, 0x1A);
        let _ = port.write(0x0D8F, 0x0B, 0xF908);
        let _ = port.read(0x0D92, 0x0B);
        let _ = port.modify(0x0000, 0x00, |v| v | 0x0200);
        let _ = port.write(0x0D96, 0x02, 0x1000);

        assert_eq!(mdio.current_page(PHY), 0x0A42);
    }

    #[test]
    fn modify_uses_one_page_selection() {
        let mut mdio = MockMdioBus::new();
        mdio.set_paged(PHY, 0x0A42, 0x12, 0x0020);

        PagedPort::new(&mut mdio, PHY)
            .modify(0x0A42, 0x12, |v| v | 0x0008)
            .unwrap();

        assert_eq!(mdio.get_paged(PHY, 0x0A42, 0x12), Some(0x0028));
        assert_eq!(mdio.get_writes().len(), 3);
    }

    #[test]
    fn write_all_continues_after_failure() {
        let mut mdio = MockMdioBus::new();
        mdio.fail_write(PHY, 0x0D90, 0x02);

        let writes = [
            RegWrite::new(0x0D8F, 0x08, 0x2500),
            RegWrite::new(0x0D90, 0x02, 0x1555),
            RegWrite::new(0x0D90, 0x05, 0x2B15),
        ];
        let status = PagedPort::new(&mut mdio, PHY).write_all(&writes);

        assert_eq!(status.steps(), 3);
        assert_eq!(status.failures(), 1);
        assert!(status.step_failed(1));
        assert_eq!(mdio.get_paged(PHY, 0x0D8F, 0x08), Some(0x2500));
        assert_eq!(mdio.get_paged(PHY, 0x0D90, 0x05), Some(0x2B15));
        assert_eq!(mdio.current_page(PHY), 0);
    }

    #[test]
    fn out_of_range_offset_rejected_before_any_transaction() {
        let mut mdio = MockMdioBus::new();
        let mut port = PagedPort::new(&mut mdio, PHY);

        let invalid = Error::Config(ConfigError::InvalidRegister);
        assert_eq!(port.read(0x0A43, 32), Err(invalid));
        assert_eq!(port.write(0x0A43, 0x40, 0x1234), Err(invalid));
        assert_eq!(port.modify(0x0A43, 0xFF, |v| v), Err(invalid));

        assert_eq!(mdio.transactions(), 0);
        assert_eq!(mdio.current_page(PHY), 0);
    }

    #[test]
    fn out_of_range_offset_counts_as_failed_table_step() {
        let mut mdio = MockMdioBus::new();
        let table = [
            RegWrite::new(0x0A43, 0x10, 0x0001),
            RegWrite::new(0x0A43, 0x20, 0x0002),
            RegWrite::new(0x0A43, 0x11, 0x0003),
        ];

        let status = PagedPort::new(&mut mdio, PHY).write_all(&table);

        assert_eq!(status.failures(), 1);
        assert!(status.step_failed(1));
        assert_eq!(mdio.get_paged(PHY, 0x0A43, 0x11), Some(0x0003));
    }
}
