//! Trampoline Emission Strategy
//!
//! Which form `svcall!` emits is fixed once per build. The rule lives here
//! as a `const fn` so it can be tested; each `__svc_trampoline!` variant in
//! `macros.rs` is compiled under the matching `cfg` and asserts at build time
//! that it agrees with [`STRATEGY`].
//!
//! # Selection
//! 1. `svcall-as-normal-function` (or this crate's own unit tests): plain calls
//! 2. bare-metal ARM: inline trap, or naked trap with `naked-trampolines`
//! 3. anything else: no strategy; using `svcall!` is a build error
//!
//! A hosted target never falls back to plain calls on its own. Without the
//! switch there is no SoftDevice to call and the build must say so.

/// One way of emitting a trampoline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// `#[inline(always)]` fn around one `asm!("svc n")`
    InlineTrap,
    /// Naked `extern "C"` fn: `svc n` then `bx lr`
    NakedTrap,
    /// Ordinary fn routed to the host mock dispatcher
    PlainCall,
}

/// Pick the strategy for a build.
///
/// # Arguments
/// * `plain_calls` - the fallback switch is set
/// * `bare_metal` - `target_os = "none"`
/// * `arm` - `target_arch = "arm"`
/// * `naked` - the `naked-trampolines` feature is set
///
/// # Returns
/// `None` when no strategy applies to the target.
pub const fn select(plain_calls: bool, bare_metal: bool, arm: bool, naked: bool) -> Option<Strategy> {
    if plain_calls {
        Some(Strategy::PlainCall)
    } else if bare_metal && arm {
        if naked {
            Some(Strategy::NakedTrap)
        } else {
            Some(Strategy::InlineTrap)
        }
    } else {
        None
    }
}

/// The strategy of the current build.
pub const STRATEGY: Option<Strategy> = select(
    cfg!(any(feature = "svcall-as-normal-function", test)),
    cfg!(target_os = "none"),
    cfg!(target_arch = "arm"),
    cfg!(feature = "naked-trampolines"),
);
