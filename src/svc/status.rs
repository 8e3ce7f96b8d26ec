//! SoftDevice Status Codes
//!
//! Every supervisor call returns a `u32` status in r0. This core does not
//! interpret results beyond the codes that concern the call mechanism itself.

use core::fmt;

/// Call completed
pub const NRF_SUCCESS: u32 = 0;
/// No handler exists for the SVC number
pub const NRF_ERROR_SVC_HANDLER_MISSING: u32 = 1;
/// The number is reserved by a module but not implemented
pub const NRF_ERROR_NOT_SUPPORTED: u32 = 6;

/// Failure reported by the privileged side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SvcError {
    /// SVC number outside every allocation
    HandlerMissing,
    /// Reserved-but-unimplemented call
    NotSupported,
    /// Any other module-specific error code
    Code(u32),
}

impl SvcError {
    /// Classify a non-zero status code.
    pub const fn from_code(code: u32) -> Self {
        match code {
            NRF_ERROR_SVC_HANDLER_MISSING => SvcError::HandlerMissing,
            NRF_ERROR_NOT_SUPPORTED => SvcError::NotSupported,
            other => SvcError::Code(other),
        }
    }

    /// The raw status code.
    pub const fn code(self) -> u32 {
        match self {
            SvcError::HandlerMissing => NRF_ERROR_SVC_HANDLER_MISSING,
            SvcError::NotSupported => NRF_ERROR_NOT_SUPPORTED,
            SvcError::Code(code) => code,
        }
    }
}

impl fmt::Display for SvcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SvcError::HandlerMissing => f.write_str("no SVC handler for this number"),
            SvcError::NotSupported => f.write_str("call reserved but not supported"),
            SvcError::Code(code) => write!(f, "SoftDevice error {:#06x}", code),
        }
    }
}

/// Turn a status word into a `Result`.
#[inline]
pub const fn check(code: u32) -> Result<(), SvcError> {
    if code == NRF_SUCCESS {
        Ok(())
    } else {
        Err(SvcError::from_code(code))
    }
}
