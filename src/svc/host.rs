//! Host Mock Dispatcher
//!
//! Stands in for the SoftDevice when trampolines are built as plain calls.
//! Tests register a handler per SVC number; a trampoline call forwards its
//! number and register-packed arguments to [`dispatch`].
//!
//! # Unhandled numbers
//! Without a registered handler the dispatcher answers the way the
//! SoftDevice does:
//! - number inside a module range: `NRF_ERROR_NOT_SUPPORTED`
//! - number outside every range: `NRF_ERROR_SVC_HANDLER_MISSING`

use spin::RwLock;

use super::status::{NRF_ERROR_NOT_SUPPORTED, NRF_ERROR_SVC_HANDLER_MISSING};
use crate::ranges::{Assignment, SpaceKind, BLE};

/// Mock implementation of one SVC number.
///
/// Receives the argument registers in order and returns the r0 word.
pub type Handler = fn(args: &[usize]) -> usize;

static HANDLERS: RwLock<[Option<Handler>; 256]> = RwLock::new([None; 256]);

/// Install a mock for one SVC number.
///
/// # Arguments
/// * `number` - SVC number the handler answers
/// * `handler` - Mock receiving the argument registers
///
/// # Returns
/// The handler previously installed for `number`, if any.
pub fn register(number: u8, handler: Handler) -> Option<Handler> {
    log::debug!(
        "[SVC] mock for {:#04x} registered ({})",
        number,
        BLE.lookup(SpaceKind::Call, number)
    );
    HANDLERS.write()[number as usize].replace(handler)
}

/// Remove the handler for `number`.
pub fn unregister(number: u8) -> Option<Handler> {
    HANDLERS.write()[number as usize].take()
}

/// Whether a handler is installed for `number`.
pub fn is_registered(number: u8) -> bool {
    HANDLERS.read()[number as usize].is_some()
}

/// Deliver one supervisor call.
///
/// # Arguments
/// * `number` - SVC number carried by the trampoline
/// * `args` - Argument registers r0-r3, in order
///
/// # Returns
/// The r0 word: the handler's result, or when no handler is installed
/// * `NRF_ERROR_NOT_SUPPORTED` - `number` lies in a module's call range
/// * `NRF_ERROR_SVC_HANDLER_MISSING` - `number` lies outside every range
pub fn dispatch(number: u8, args: &[usize]) -> usize {
    // Copy the handler out so the lock is free while it runs.
    let handler = HANDLERS.read()[number as usize];

    match handler {
        Some(handler) => {
            log::trace!("[SVC] {:#04x}{:x?}", number, args);
            handler(args)
        }
        None => match BLE.lookup(SpaceKind::Call, number) {
            Assignment::Unassigned => {
                log::error!("[SVC] no handler for unassigned number {:#04x}", number);
                NRF_ERROR_SVC_HANDLER_MISSING as usize
            }
            outcome => {
                log::warn!("[SVC] {:#04x} {} has no mock", number, outcome);
                NRF_ERROR_NOT_SUPPORTED as usize
            }
        },
    }
}
