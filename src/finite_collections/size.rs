use num::{PrimInt, Unsigned};

/// Unsigned integer usable as a dense index.
pub trait Size: PrimInt + Unsigned {
    const MAX: Self;
    fn as_usize(&self) -> usize;
    fn from_usize(value: usize) -> Self;
}

macro_rules! impl_size {
    ($($t:ty),*) => {
        $(
            impl Size for $t {
                const MAX: Self = <$t>::MAX;

                #[inline(always)]
                fn as_usize(&self) -> usize {
                    *self as usize
                }

                #[inline(always)]
                fn from_usize(value: usize) -> Self {
                    debug_assert!(value <= <$t>::MAX as usize);
                    value as $t
                }
            }
        )*
    };
}

impl_size!(usize, u64, u32, u16, u8);
