//! Testing utilities and mock implementations
//!
//! This module provides mock implementations for testing the PHY driver
//! on the host without hardware access.
//!
//! Only available when running `cargo test`.

// Note: The #[cfg(test)] attribute is applied in lib.rs where this module is declared
#![allow(missing_docs)]
#![allow(clippy::std_instead_of_core, clippy::std_instead_of_alloc)]

extern crate std;

use core::cell::{Cell, RefCell};
use std::boxed::Box;
use std::collections::{HashMap, HashSet};
use std::vec::Vec;

use crate::error::{IoError, Result};
use crate::hal::mdio::{MdioBus, validate_address};
use crate::hal::paged::RegWrite;
use crate::internal::phy_regs::maxio::{self, PAGE_SELECT, physr, reg};
use crate::internal::phy_regs::standard::{anlpar, bmsr, phy_reg};

// =============================================================================
// Mock MDIO Bus
// =============================================================================

/// What a read hook sees about the register being read
pub struct ReadContext<'a> {
    pub phy: u8,
    pub page: u16,
    pub reg: u8,
    registers: &'a HashMap<(u8, u16, u8), u16>,
}

impl ReadContext<'_> {
    /// Current stored value of any register of the same PHY
    pub fn register(&self, page: u16, reg: u8) -> u16 {
        self.registers
            .get(&(self.phy, page, reg))
            .copied()
            .unwrap_or(0)
    }
}

type ReadHook = Box<dyn FnMut(&ReadContext<'_>) -> Option<u16>>;

/// Page-aware mock MDIO bus for testing PHY drivers without hardware
///
/// Register 31 behaves as the page-select register: writing it changes the
/// page every other offset refers to, reading it returns the current page.
/// Registers are stored per (phy, page, register); unset registers read 0.
///
/// # Example
///
/// ```ignore
/// let mut mdio = MockMdioBus::new();
/// mdio.set_paged(0, 0xA43, 0x1A, 0x0024); // PHYSR: link ok, 100 Mbps
///
/// let mut port = PagedPort::new(&mut mdio, 0);
/// assert_eq!(port.read(0xA43, 0x1A).unwrap(), 0x0024);
/// ```
#[derive(Default)]
pub struct MockMdioBus {
    /// Register values: (phy_addr, page, reg_addr) -> value
    registers: RefCell<HashMap<(u8, u16, u8), u16>>,
    /// Currently selected page per PHY
    pages: RefCell<HashMap<u8, u16>>,
    /// Record of writes: (phy_addr, reg_addr, value)
    write_log: RefCell<Vec<(u8, u8, u16)>>,
    /// Record of non page-select writes with the page they landed on
    paged_log: RefCell<Vec<(u8, RegWrite)>>,
    /// Record of reads: (phy_addr, page, reg_addr)
    read_log: RefCell<Vec<(u8, u16, u8)>>,
    /// Reads that fail: (phy_addr, page, reg_addr)
    failing_reads: RefCell<HashSet<(u8, u16, u8)>>,
    /// Writes that fail: (phy_addr, page, reg_addr)
    failing_writes: RefCell<HashSet<(u8, u16, u8)>>,
    /// Page-select values whose write fails: (phy_addr, page)
    failing_selects: RefCell<HashSet<(u8, u16)>>,
    /// Optional override consulted on every read
    read_hook: RefCell<Option<ReadHook>>,
    /// Number of transactions performed
    transactions: Cell<usize>,
}

impl MockMdioBus {
    /// Create a new mock MDIO bus
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a register on page 0
    pub fn set_register(&self, phy_addr: u8, reg_addr: u8, value: u16) {
        self.set_paged(phy_addr, maxio::PAGE_STANDARD, reg_addr, value);
    }

    /// Set a register on a specific page
    pub fn set_paged(&self, phy_addr: u8, page: u16, reg_addr: u8, value: u16) {
        self.registers
            .borrow_mut()
            .insert((phy_addr, page, reg_addr), value);
    }

    /// Get the value of a page 0 register (for test verification)
    pub fn get_register(&self, phy_addr: u8, reg_addr: u8) -> Option<u16> {
        self.get_paged(phy_addr, maxio::PAGE_STANDARD, reg_addr)
    }

    /// Get the value of a register on a specific page
    pub fn get_paged(&self, phy_addr: u8, page: u16, reg_addr: u8) -> Option<u16> {
        self.registers
            .borrow()
            .get(&(phy_addr, page, reg_addr))
            .copied()
    }

    /// Force the page selection without going through the bus
    pub fn set_page(&self, phy_addr: u8, page: u16) {
        self.pages.borrow_mut().insert(phy_addr, page);
    }

    /// Currently selected page
    pub fn current_page(&self, phy_addr: u8) -> u16 {
        self.pages.borrow().get(&phy_addr).copied().unwrap_or(0)
    }

    /// Make reads of (page, reg) fail with a bus error
    pub fn fail_read(&self, phy_addr: u8, page: u16, reg_addr: u8) {
        self.failing_reads
            .borrow_mut()
            .insert((phy_addr, page, reg_addr));
    }

    /// Make writes to (page, reg) fail with a bus error
    pub fn fail_write(&self, phy_addr: u8, page: u16, reg_addr: u8) {
        self.failing_writes
            .borrow_mut()
            .insert((phy_addr, page, reg_addr));
    }

    /// Make writes of `page` to the page-select register fail
    pub fn fail_page_select(&self, phy_addr: u8, page: u16) {
        self.failing_selects.borrow_mut().insert((phy_addr, page));
    }

    /// Remove all injected failures
    pub fn clear_failures(&self) {
        self.failing_reads.borrow_mut().clear();
        self.failing_writes.borrow_mut().clear();
        self.failing_selects.borrow_mut().clear();
    }

    /// Install a hook that may override the value returned by any read
    pub fn on_read<F>(&self, hook: F)
    where
        F: FnMut(&ReadContext<'_>) -> Option<u16> + 'static,
    {
        *self.read_hook.borrow_mut() = Some(Box::new(hook));
    }

    /// Get all raw writes that have been made, page-select writes included
    pub fn get_writes(&self) -> Vec<(u8, u8, u16)> {
        self.write_log.borrow().clone()
    }

    /// Get the writes to ordinary registers, with the page each landed on
    pub fn paged_writes(&self, phy_addr: u8) -> Vec<RegWrite> {
        self.paged_log
            .borrow()
            .iter()
            .filter(|(phy, _)| *phy == phy_addr)
            .map(|(_, w)| *w)
            .collect()
    }

    /// Count writes of `value` to (page, reg)
    pub fn write_count(&self, phy_addr: u8, page: u16, reg_addr: u8, value: u16) -> usize {
        let target = RegWrite::new(page, reg_addr, value);
        self.paged_writes(phy_addr)
            .iter()
            .filter(|w| **w == target)
            .count()
    }

    /// Count reads of (page, reg)
    pub fn read_count(&self, phy_addr: u8, page: u16, reg_addr: u8) -> usize {
        self.read_log
            .borrow()
            .iter()
            .filter(|r| **r == (phy_addr, page, reg_addr))
            .count()
    }

    /// Total number of bus transactions
    pub fn transactions(&self) -> usize {
        self.transactions.get()
    }

    /// Clear the write and read logs
    pub fn clear_log(&self) {
        self.write_log.borrow_mut().clear();
        self.paged_log.borrow_mut().clear();
        self.read_log.borrow_mut().clear();
        self.transactions.set(0);
    }

    /// Setup for a MAE0621A PHY with default register values
    pub fn setup_mae0621a(&self, phy_addr: u8, phy_id: u32) {
        self.set_register(phy_addr, phy_reg::PHYIDR1, (phy_id >> 16) as u16);
        self.set_register(phy_addr, phy_reg::PHYIDR2, phy_id as u16);

        let bmsr_value = bmsr::TX_FD_CAPABLE
            | bmsr::TX_HD_CAPABLE
            | bmsr::T10_FD_CAPABLE
            | bmsr::T10_HD_CAPABLE
            | bmsr::ESTATUS
            | bmsr::AN_ABILITY
            | bmsr::EXT_CAPABLE;
        self.set_register(phy_addr, phy_reg::BMSR, bmsr_value);
        self.set_register(phy_addr, phy_reg::BMCR, 0x1140);
        self.set_register(phy_addr, phy_reg::ANLPAR, 0x0000);
    }

    /// Simulate an auto-negotiated link coming up
    ///
    /// `physr_speed` is one of the PHYSR speed field values.
    pub fn simulate_link_up(&self, phy_addr: u8, physr_speed: u16, full_duplex: bool) {
        let mut bmsr_val = self.get_register(phy_addr, phy_reg::BMSR).unwrap_or(0);
        bmsr_val |= bmsr::LINK_STATUS | bmsr::AN_COMPLETE;
        self.set_register(phy_addr, phy_reg::BMSR, bmsr_val);

        let mut physr_val = physr::LINK_OK | physr_speed;
        if full_duplex {
            physr_val |= physr::DUPLEX_FULL;
        }
        self.set_paged(phy_addr, maxio::PAGE_STATUS, reg::PHYSR, physr_val);

        let anlpar_val = anlpar::SELECTOR_802_3
            | anlpar::CAN_100_FD
            | anlpar::CAN_100_HD
            | anlpar::CAN_10_FD
            | anlpar::CAN_10_HD;
        self.set_register(phy_addr, phy_reg::ANLPAR, anlpar_val);
    }

    /// Simulate link going down
    pub fn simulate_link_down(&self, phy_addr: u8) {
        let mut bmsr_val = self.get_register(phy_addr, phy_reg::BMSR).unwrap_or(0);
        bmsr_val &= !(bmsr::LINK_STATUS | bmsr::AN_COMPLETE);
        self.set_register(phy_addr, phy_reg::BMSR, bmsr_val);
        self.set_paged(phy_addr, maxio::PAGE_STATUS, reg::PHYSR, 0);
        self.set_register(phy_addr, phy_reg::ANLPAR, 0x0000);
    }
}

impl MdioBus for MockMdioBus {
    fn read(&mut self, phy_addr: u8, reg_addr: u8) -> Result<u16> {
        validate_address(phy_addr, reg_addr)?;
        self.transactions.set(self.transactions.get() + 1);
        let page = self.current_page(phy_addr);
        self.read_log.borrow_mut().push((phy_addr, page, reg_addr));

        if self
            .failing_reads
            .borrow()
            .contains(&(phy_addr, page, reg_addr))
        {
            return Err(IoError::Bus.into());
        }

        if reg_addr == PAGE_SELECT {
            return Ok(page);
        }

        let registers = self.registers.borrow();
        if let Some(hook) = self.read_hook.borrow_mut().as_mut() {
            let ctx = ReadContext {
                phy: phy_addr,
                page,
                reg: reg_addr,
                registers: &registers,
            };
            if let Some(value) = hook(&ctx) {
                return Ok(value);
            }
        }

        // Return from register map (default 0 if not set)
        Ok(registers
            .get(&(phy_addr, page, reg_addr))
            .copied()
            .unwrap_or(0))
    }

    fn write(&mut self, phy_addr: u8, reg_addr: u8, value: u16) -> Result<()> {
        validate_address(phy_addr, reg_addr)?;
        self.transactions.set(self.transactions.get() + 1);
        self.write_log
            .borrow_mut()
            .push((phy_addr, reg_addr, value));

        if reg_addr == PAGE_SELECT {
            if self.failing_selects.borrow().contains(&(phy_addr, value)) {
                return Err(IoError::Bus.into());
            }
            self.set_page(phy_addr, value);
            return Ok(());
        }

        let page = self.current_page(phy_addr);
        if self
            .failing_writes
            .borrow()
            .contains(&(phy_addr, page, reg_addr))
        {
            return Err(IoError::Bus.into());
        }

        self.paged_log
            .borrow_mut()
            .push((phy_addr, RegWrite::new(page, reg_addr, value)));
        self.set_paged(phy_addr, page, reg_addr, value);
        Ok(())
    }
}

// =============================================================================
// Mock Delay
// =============================================================================

/// Mock delay for testing without actual timing
///
/// Records delays for verification without actually waiting.
#[derive(Debug, Default)]
pub struct MockDelay {
    /// Total nanoseconds delayed
    total_ns: Cell<u64>,
    /// Number of delay calls
    calls: Cell<usize>,
}

impl MockDelay {
    /// Create a new mock delay
    pub fn new() -> Self {
        Self::default()
    }

    /// Get total nanoseconds that were "delayed"
    pub fn total_ns(&self) -> u64 {
        self.total_ns.get()
    }

    /// Get total milliseconds that were "delayed"
    pub fn total_ms(&self) -> u64 {
        self.total_ns() / 1_000_000
    }

    /// Number of delay calls made
    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl embedded_hal::delay::DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns.set(self.total_ns.get() + ns as u64);
        self.calls.set(self.calls.get() + 1);
    }

    fn delay_ms(&mut self, ms: u32) {
        self.total_ns
            .set(self.total_ns.get() + ms as u64 * 1_000_000);
        self.calls.set(self.calls.get() + 1);
    }
}

// =============================================================================
// Test Assertions
// =============================================================================

/// Assert that a paged register was written with a specific value
#[macro_export]
macro_rules! assert_paged_written {
    ($mdio:expr, $phy:expr, $page:expr, $reg:expr, $value:expr) => {
        let writes = $mdio.paged_writes($phy);
        assert!(
            writes
                .iter()
                .any(|w| w.addr.page == $page && w.addr.reg == $reg && w.value == $value),
            "Expected write to PHY {} page 0x{:03X} reg 0x{:02X} with value 0x{:04X}, but got: {:?}",
            $phy,
            $page,
            $reg,
            $value,
            writes
        );
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::vec;

    #[test]
    fn mock_mdio_read_write() {
        let mut mdio = MockMdioBus::new();

        // Initially reads 0
        assert_eq!(mdio.read(0, 1).unwrap(), 0);

        mdio.set_register(0, 1, 0x1234);
        assert_eq!(mdio.read(0, 1).unwrap(), 0x1234);

        mdio.write(0, 1, 0x5678).unwrap();
        assert_eq!(mdio.read(0, 1).unwrap(), 0x5678);

        assert_eq!(mdio.get_writes(), vec![(0, 1, 0x5678)]);
    }

    #[test]
    fn mock_mdio_page_select_switches_register_bank() {
        let mut mdio = MockMdioBus::new();
        mdio.set_register(0, 0x1A, 0x1111);
        mdio.set_paged(0, 0x0A43, 0x1A, 0x2222);

        assert_eq!(mdio.read(0, 0x1A).unwrap(), 0x1111);
        mdio.write(0, PAGE_SELECT, 0x0A43).unwrap();
        assert_eq!(mdio.read(0, PAGE_SELECT).unwrap(), 0x0A43);
        assert_eq!(mdio.read(0, 0x1A).unwrap(), 0x2222);
    }

    #[test]
    fn mock_mdio_multiple_phys() {
        let mut mdio = MockMdioBus::new();

        mdio.set_register(0, 1, 0x1111);
        mdio.set_register(1, 1, 0x2222);
        mdio.write(1, PAGE_SELECT, 0x0005).unwrap();

        assert_eq!(mdio.read(0, 1).unwrap(), 0x1111);
        assert_eq!(mdio.current_page(0), 0);
        assert_eq!(mdio.current_page(1), 0x0005);
    }

    #[test]
    fn mock_mdio_failure_injection() {
        let mut mdio = MockMdioBus::new();
        mdio.fail_read(0, 0, 2);
        mdio.fail_write(0, 0, 4);

        assert!(mdio.read(0, 2).is_err());
        assert!(mdio.write(0, 4, 1).is_err());
        assert_eq!(mdio.get_register(0, 4), None);

        mdio.clear_failures();
        assert!(mdio.read(0, 2).is_ok());
    }

    #[test]
    fn mock_mdio_read_hook_overrides_value() {
        let mut mdio = MockMdioBus::new();
        mdio.set_register(0, 3, 0x00AA);
        mdio.on_read(|ctx| (ctx.reg == 2).then(|| ctx.register(0, 3) + 1));

        assert_eq!(mdio.read(0, 2).unwrap(), 0x00AB);
        assert_eq!(mdio.read(0, 3).unwrap(), 0x00AA);
    }

    #[test]
    fn mock_delay_tracking() {
        let mut delay = MockDelay::new();

        embedded_hal::delay::DelayNs::delay_ns(&mut delay, 1000);
        embedded_hal::delay::DelayNs::delay_ns(&mut delay, 2000);

        assert_eq!(delay.total_ns(), 3000);
        assert_eq!(delay.total_ms(), 0);

        embedded_hal::delay::DelayNs::delay_ms(&mut delay, 10);
        assert_eq!(delay.total_ms(), 10);
        assert_eq!(delay.calls(), 3);
    }
}
