//! Supervisor Call Interface
//!
//! Application code reaches the SoftDevice only through numbered `svc`
//! traps. This module generates the trampolines for those traps and the
//! plumbing they share.
//!
//! # Calling Convention
//! - SVC number: immediate operand of the `svc` instruction
//! - Arguments: r0-r3 (at most four)
//! - Result: r0
//! - The call blocks until the SoftDevice returns; there is no timeout or
//!   cancellation at this layer
//!
//! # Reentrancy
//! At most one call may be in flight per core. An interrupt handler must not
//! issue a call while another context is mid-call; the trap provides no
//! mutual exclusion.

mod abi;
mod macros;
pub mod status;
pub mod strategy;

#[cfg(any(feature = "svcall-as-normal-function", test))]
pub mod host;

pub use abi::{SvcArg, SvcReturn, MAX_REGISTER_ARGS};
pub use strategy::{Strategy, STRATEGY};
pub use status::{check, SvcError};
