//! BLE Identifier Ranges
//!
//! SVC call numbers, event numbers and option numbers share one 8-bit space
//! each. Every API module is granted a block in each space, sized for growth
//! rather than for the calls it defines today, so a module can add calls
//! without renumbering a neighbour.
//!
//! # Contents
//! - [`registry`]: range types, `lookup` and the definition-time validator
//! - [`table`]: the published S110 allocation and its named constants

pub mod registry;
pub mod table;

pub use registry::{Assignment, ModuleId, ModuleRange, Registry, RegistryError, SpaceKind, Spaces};
pub use table::{assert_call_reachable, BLE, BLE_RANGES};
pub use table::{common, evt, gap, gattc, gatts, l2cap, opt};
