//! Trampoline Generation
//!
//! `svcall!` turns a list of signatures into supervisor-call trampolines.
//! Exactly one emission strategy is compiled in, chosen from the target and
//! the crate features:
//!
//! | Build | Emission |
//! |-------|----------|
//! | bare-metal ARM | `#[inline(always)]` fn, one `svc` in inline asm; the compiler binds r0-r3 |
//! | bare-metal ARM + `naked-trampolines` | naked `extern "C"` fn: `svc #n` then `bx lr` |
//! | `svcall-as-normal-function` | plain fn calling the mock dispatcher |
//! | hosted target without the switch | `svcall!` is a build error |
//! | bare-metal non-ARM | build error |
//!
//! The SVC number is handed to the assembler as a `const` operand, so the
//! instruction always carries the literal value even when the caller names it
//! through a constant.

/// Declare supervisor-call trampolines.
///
/// Each entry is a function signature followed by `= <svc number>;`. The
/// generated functions are `unsafe`: the SoftDevice trusts every pointer it
/// is handed.
///
/// ```ignore
/// use softdevice_svc::ranges::gap::*;
///
/// softdevice_svc::svcall! {
///     /// Stop advertising.
///     pub fn sd_ble_gap_adv_stop() -> u32 = SD_BLE_GAP_ADV_STOP;
///     pub fn sd_ble_gap_tx_power_set(tx_power: i8) -> u32 = SD_BLE_GAP_TX_POWER_SET;
/// }
/// ```
///
/// Build errors:
/// - the number lies outside every module's call range
/// - more than four arguments
#[macro_export]
macro_rules! svcall {
    ($(
        $(#[$meta:meta])*
        $vis:vis fn $name:ident($($arg:ident: $ty:ty),* $(,)?) -> $ret:ty = $num:expr;
    )*) => {
        $(
            const _: () = $crate::ranges::assert_call_reachable($num);
            const _: () = ::core::assert!(
                <[&str]>::len(&[$(::core::stringify!($arg)),*]) <= $crate::svc::MAX_REGISTER_ARGS,
                "supervisor calls carry at most four register arguments"
            );
            $crate::__svc_trampoline! {
                $(#[$meta])*
                $vis fn $name($($arg: $ty),*) -> $ret = $num;
            }
        )*
    };
}

#[cfg(any(feature = "svcall-as-normal-function", test))]
const _: () = assert!(matches!(super::STRATEGY, Some(super::Strategy::PlainCall)));

#[cfg(any(feature = "svcall-as-normal-function", test))]
#[doc(hidden)]
#[macro_export]
macro_rules! __svc_trampoline {
    ($(#[$meta:meta])* $vis:vis fn $name:ident($($arg:ident: $ty:ty),*) -> $ret:ty = $num:expr;) => {
        $(#[$meta])*
        #[doc = ""]
        #[doc = "# Safety"]
        #[doc = "Traps into the SoftDevice, which trusts every pointer argument: each"]
        #[doc = "must be valid for the access the call performs. Not reentrant from"]
        #[doc = "an interrupt while another call is in flight."]
        #[inline(always)]
        $vis unsafe fn $name($($arg: $ty),*) -> $ret {
            <$ret as $crate::svc::SvcReturn>::from_reg($crate::svc::host::dispatch(
                $num,
                &[$(<$ty as $crate::svc::SvcArg>::into_reg($arg)),*],
            ))
        }
    };
}

#[cfg(all(
    target_os = "none",
    target_arch = "arm",
    not(feature = "svcall-as-normal-function"),
    not(feature = "naked-trampolines"),
    not(test)
))]
const _: () = assert!(matches!(super::STRATEGY, Some(super::Strategy::InlineTrap)));

#[cfg(all(
    target_os = "none",
    target_arch = "arm",
    not(feature = "svcall-as-normal-function"),
    not(feature = "naked-trampolines"),
    not(test)
))]
#[doc(hidden)]
#[macro_export]
macro_rules! __svc_trampoline {
    (@emit ($(#[$meta:meta])*) $vis:vis fn $name:ident($($arg:ident: $ty:ty),*) -> $ret:ty = $num:expr; [$($regs:tt)*]) => {
        $(#[$meta])*
        #[doc = ""]
        #[doc = "# Safety"]
        #[doc = "Traps into the SoftDevice, which trusts every pointer argument: each"]
        #[doc = "must be valid for the access the call performs. Not reentrant from"]
        #[doc = "an interrupt while another call is in flight."]
        #[inline(always)]
        $vis unsafe fn $name($($arg: $ty),*) -> $ret {
            let r0: usize;
            // SAFETY: the SoftDevice preserves r4-r11 and the stack; r0-r3
            // and r12 are declared clobbered.
            unsafe {
                ::core::arch::asm!(
                    "svc {number}",
                    number = const $num,
                    $($regs)*
                    lateout("r0") r0,
                    lateout("r12") _,
                    options(nostack),
                );
            }
            <$ret as $crate::svc::SvcReturn>::from_reg(r0)
        }
    };
    ($(#[$meta:meta])* $vis:vis fn $name:ident() -> $ret:ty = $num:expr;) => {
        $crate::__svc_trampoline! {
            @emit ($(#[$meta])*) $vis fn $name() -> $ret = $num;
            [
                lateout("r1") _,
                lateout("r2") _,
                lateout("r3") _,
            ]
        }
    };
    ($(#[$meta:meta])* $vis:vis fn $name:ident($a0:ident: $t0:ty) -> $ret:ty = $num:expr;) => {
        $crate::__svc_trampoline! {
            @emit ($(#[$meta])*) $vis fn $name($a0: $t0) -> $ret = $num;
            [
                in("r0") <$t0 as $crate::svc::SvcArg>::into_reg($a0),
                lateout("r1") _,
                lateout("r2") _,
                lateout("r3") _,
            ]
        }
    };
    ($(#[$meta:meta])* $vis:vis fn $name:ident($a0:ident: $t0:ty, $a1:ident: $t1:ty) -> $ret:ty = $num:expr;) => {
        $crate::__svc_trampoline! {
            @emit ($(#[$meta])*) $vis fn $name($a0: $t0, $a1: $t1) -> $ret = $num;
            [
                in("r0") <$t0 as $crate::svc::SvcArg>::into_reg($a0),
                inout("r1") <$t1 as $crate::svc::SvcArg>::into_reg($a1) => _,
                lateout("r2") _,
                lateout("r3") _,
            ]
        }
    };
    ($(#[$meta:meta])* $vis:vis fn $name:ident($a0:ident: $t0:ty, $a1:ident: $t1:ty, $a2:ident: $t2:ty) -> $ret:ty = $num:expr;) => {
        $crate::__svc_trampoline! {
            @emit ($(#[$meta])*) $vis fn $name($a0: $t0, $a1: $t1, $a2: $t2) -> $ret = $num;
            [
                in("r0") <$t0 as $crate::svc::SvcArg>::into_reg($a0),
                inout("r1") <$t1 as $crate::svc::SvcArg>::into_reg($a1) => _,
                inout("r2") <$t2 as $crate::svc::SvcArg>::into_reg($a2) => _,
                lateout("r3") _,
            ]
        }
    };
    ($(#[$meta:meta])* $vis:vis fn $name:ident($a0:ident: $t0:ty, $a1:ident: $t1:ty, $a2:ident: $t2:ty, $a3:ident: $t3:ty) -> $ret:ty = $num:expr;) => {
        $crate::__svc_trampoline! {
            @emit ($(#[$meta])*) $vis fn $name($a0: $t0, $a1: $t1, $a2: $t2, $a3: $t3) -> $ret = $num;
            [
                in("r0") <$t0 as $crate::svc::SvcArg>::into_reg($a0),
                inout("r1") <$t1 as $crate::svc::SvcArg>::into_reg($a1) => _,
                inout("r2") <$t2 as $crate::svc::SvcArg>::into_reg($a2) => _,
                inout("r3") <$t3 as $crate::svc::SvcArg>::into_reg($a3) => _,
            ]
        }
    };
    ($($rest:tt)*) => {
        ::core::compile_error!("supervisor calls carry at most four register arguments");
    };
}

#[cfg(all(
    target_os = "none",
    target_arch = "arm",
    not(feature = "svcall-as-normal-function"),
    feature = "naked-trampolines",
    not(test)
))]
const _: () = assert!(matches!(super::STRATEGY, Some(super::Strategy::NakedTrap)));

#[cfg(all(
    target_os = "none",
    target_arch = "arm",
    not(feature = "svcall-as-normal-function"),
    feature = "naked-trampolines",
    not(test)
))]
#[doc(hidden)]
#[macro_export]
macro_rules! __svc_trampoline {
    ($(#[$meta:meta])* $vis:vis fn $name:ident($($arg:ident: $ty:ty),*) -> $ret:ty = $num:expr;) => {
        $(#[$meta])*
        #[doc = ""]
        #[doc = "# Safety"]
        #[doc = "Traps into the SoftDevice, which trusts every pointer argument: each"]
        #[doc = "must be valid for the access the call performs. Not reentrant from"]
        #[doc = "an interrupt while another call is in flight."]
        // Reachable through linkage even when never named in a call.
        #[allow(dead_code)]
        #[unsafe(naked)]
        $vis unsafe extern "C" fn $name($($arg: $ty),*) -> $ret {
            // The result is whatever the SoftDevice leaves in r0.
            ::core::arch::naked_asm!(
                "svc {number}",
                "bx lr",
                number = const $num,
            )
        }
    };
}

#[cfg(not(any(
    feature = "svcall-as-normal-function",
    test,
    all(target_os = "none", target_arch = "arm")
)))]
const _: () = assert!(super::STRATEGY.is_none());

#[cfg(not(any(
    feature = "svcall-as-normal-function",
    test,
    all(target_os = "none", target_arch = "arm")
)))]
#[doc(hidden)]
#[macro_export]
macro_rules! __svc_trampoline {
    ($($rest:tt)*) => {
        ::core::compile_error!(
            "no supervisor-call strategy for this build; target bare-metal ARM or enable `svcall-as-normal-function`"
        );
    };
}

#[cfg(all(
    target_os = "none",
    not(target_arch = "arm"),
    not(feature = "svcall-as-normal-function"),
    not(test)
))]
::core::compile_error!(
    "no supervisor-call strategy for this target; enable `svcall-as-normal-function` to build plain calls"
);
