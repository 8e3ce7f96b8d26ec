//! Register Marshalling
//!
//! Supervisor calls pass up to four arguments in r0-r3 and return one word
//! in r0 (AAPCS). These traits move values in and out of that word so the
//! trampolines can stay generic over their signature.
//!
//! On the target a register word is 32 bits wide and the conversions compile
//! to nothing. On a host build the word is `usize`, wide enough for pointers.

/// Number of arguments a supervisor call can carry in registers.
pub const MAX_REGISTER_ARGS: usize = 4;

/// A value that can be passed in an argument register.
pub trait SvcArg: Copy {
    /// The register word holding `self`.
    fn into_reg(self) -> usize;
}

/// A value that can be read back from r0.
pub trait SvcReturn {
    /// Rebuild the value from the register word.
    fn from_reg(reg: usize) -> Self;
}

macro_rules! impl_register_word {
    ($($ty:ty),* $(,)?) => {
        $(
            impl SvcArg for $ty {
                #[inline(always)]
                fn into_reg(self) -> usize {
                    self as usize
                }
            }

            impl SvcReturn for $ty {
                #[inline(always)]
                fn from_reg(reg: usize) -> Self {
                    reg as $ty
                }
            }
        )*
    };
}

impl_register_word!(u8, u16, u32, usize, i8, i16, i32, isize);

impl SvcArg for bool {
    #[inline(always)]
    fn into_reg(self) -> usize {
        self as usize
    }
}

impl<T> SvcArg for *const T {
    #[inline(always)]
    fn into_reg(self) -> usize {
        self as usize
    }
}

impl<T> SvcArg for *mut T {
    #[inline(always)]
    fn into_reg(self) -> usize {
        self as usize
    }
}

impl SvcReturn for () {
    #[inline(always)]
    fn from_reg(_reg: usize) -> Self {}
}
