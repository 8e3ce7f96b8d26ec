//! softdevice-svc - SVC trampolines for the S110 SoftDevice
//!
//! Application firmware runs unprivileged; the BLE stack lives in a
//! closed-source SoftDevice reached only through `svc` traps.
//!
//! # Layers
//! - [`ranges`]: how the call, event and option number spaces are split
//!   between API modules, validated at build time
//! - [`svc`]: the `svcall!` trampoline generator, register marshalling and
//!   status codes
//!
//! # Build Strategies
//! - Bare-metal ARM (`target_os = "none"`): real `svc` traps
//! - Feature `svcall-as-normal-function`: plain calls into a mock
//!   dispatcher so calling code can be tested off-target
//! - Anything else: `svcall!` fails to build (see [`svc::strategy`])

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_op_in_unsafe_fn)]

pub mod ranges;
pub mod svc;
