//! Error types for the Maxio PHY driver
//!
//! Errors are organized by domain for better diagnostics:
//! - [`ConfigError`]: Driver lifecycle and addressing failures
//! - [`IoError`]: Register transport failures at runtime
//!
//! The unified [`Error`] enum wraps both domains and is returned by most
//! driver methods.
//!
//! Multi-step register sequences do not stop at the first failed write.
//! They collect their outcome in a [`SequenceStatus`] instead, which keeps the
//! count of failed steps and remembers which step failed first.

// =============================================================================
// Configuration Errors
// =============================================================================

/// Lifecycle and addressing errors
///
/// These errors indicate a host contract violation or an address that the
/// Clause 22 management interface cannot express.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Driver already has per-device state attached
    AlreadyProbed,
    /// Invalid PHY address (must be 0-31)
    InvalidPhyAddress,
    /// Invalid register offset (must be 0-31)
    InvalidRegister,
    /// PHY identifier does not match a supported chip
    UnsupportedPhy,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ConfigError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ConfigError::AlreadyProbed => "device already probed",
            ConfigError::InvalidPhyAddress => "invalid PHY address",
            ConfigError::InvalidRegister => "invalid register offset",
            ConfigError::UnsupportedPhy => "unsupported PHY identifier",
        }
    }
}

// =============================================================================
// I/O Errors
// =============================================================================

/// Runtime register access errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum IoError {
    /// Register transaction did not complete on the management bus
    Bus,
    /// Operation requires per-device state that probe has not attached
    NotProbed,
}

impl core::fmt::Display for IoError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl IoError {
    /// Returns a human-readable description of the error
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            IoError::Bus => "management bus transaction failed",
            IoError::NotProbed => "device not probed",
        }
    }
}

// =============================================================================
// Unified Error Type
// =============================================================================

/// This enum wraps all domain-specific errors for unified error handling.
///
/// Match on the inner domain error for specific handling:
/// ```ignore
/// match result {
///     Err(Error::Config(ConfigError::AlreadyProbed)) => { /* ... */ }
///     Err(Error::Io(IoError::Bus)) => { /* ... */ }
///     _ => {}
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Configuration error
    Config(ConfigError),
    /// I/O error
    Io(IoError),
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::Config(e) => write!(f, "config: {}", e.as_str()),
            Error::Io(e) => write!(f, "io: {}", e.as_str()),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<IoError> for Error {
    fn from(e: IoError) -> Self {
        Error::Io(e)
    }
}

/// Result type alias for PHY operations
pub type Result<T> = core::result::Result<T, Error>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = core::result::Result<T, ConfigError>;

/// Result type alias for I/O operations
pub type IoResult<T> = core::result::Result<T, IoError>;

// =============================================================================
// Sequence Status
// =============================================================================

/// The first failed step of a register sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepFailure {
    /// Zero-based index of the step within the sequence
    pub step: u16,
    /// Error reported by that step
    pub error: Error,
}

/// Aggregate outcome of a best-effort register sequence
///
/// Every step is recorded in order. A failed step does not stop the
/// sequence; it bumps the failure count, sets the step's bit in the failure
/// map (steps 0-63) and, if it is the first failure, is kept verbatim.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SequenceStatus {
    steps: u16,
    failures: u16,
    failed_map: u64,
    first: Option<StepFailure>,
}

impl SequenceStatus {
    /// Create an empty status (no steps recorded)
    pub const fn new() -> Self {
        Self {
            steps: 0,
            failures: 0,
            failed_map: 0,
            first: None,
        }
    }

    /// Record the outcome of the next step, returning its value on success
    pub fn record<T>(&mut self, result: Result<T>) -> Option<T> {
        let step = self.steps;
        self.steps = self.steps.saturating_add(1);
        match result {
            Ok(value) => Some(value),
            Err(error) => {
                self.mark_failed(step, error);
                None
            }
        }
    }

    /// Append another sequence's steps after the ones recorded so far
    pub fn merge(&mut self, other: &SequenceStatus) {
        let offset = self.steps;
        self.steps = self.steps.saturating_add(other.steps);
        self.failures = self.failures.saturating_add(other.failures);
        if offset < 64 {
            self.failed_map |= other.failed_map << offset;
        }
        if self.first.is_none() {
            self.first = other.first.map(|f| StepFailure {
                step: f.step.saturating_add(offset),
                error: f.error,
            });
        }
    }

    fn mark_failed(&mut self, step: u16, error: Error) {
        self.failures = self.failures.saturating_add(1);
        if step < 64 {
            self.failed_map |= 1u64 << step;
        }
        if self.first.is_none() {
            self.first = Some(StepFailure { step, error });
        }
    }

    /// Number of steps recorded
    pub const fn steps(&self) -> u16 {
        self.steps
    }

    /// Number of steps that failed
    pub const fn failures(&self) -> u16 {
        self.failures
    }

    /// True if no recorded step failed
    pub const fn is_ok(&self) -> bool {
        self.failures == 0
    }

    /// Check whether a specific step failed (only steps 0-63 are tracked)
    pub const fn step_failed(&self, step: u16) -> bool {
        step < 64 && (self.failed_map >> step) & 1 != 0
    }

    /// The first failure, if any
    pub const fn first_failure(&self) -> Option<StepFailure> {
        self.first
    }

    /// Collapse into a result carrying the first error
    pub fn into_result(self) -> Result<()> {
        match self.first {
            Some(failure) => Err(failure.error),
            None => Ok(()),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
