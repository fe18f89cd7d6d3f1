//! Fixed-width primitive values the streams know how to carry.

use crate::byte_order::ByteSwap;

mod sealed {
    pub trait Sealed {}
}

/// Widest primitive supported by the streams, in bytes.
pub const MAX_PRIMITIVE_SIZE: usize = 8;

/// A fixed-width scalar: unsigned and signed integers up to 64 bits, `f32`,
/// `f64` and `bool`.
///
/// The trait is sealed; variable-length values have no fixed width and must
/// be encoded by the entity itself.
pub trait Primitive: ByteSwap + Default + sealed::Sealed {
    /// Size in bytes.
    const SIZE: usize;
    /// Size in bits.
    const BITS: u32;

    /// Copies the native-order bytes of `self` into `out[..Self::SIZE]`.
    fn write_ne(self, out: &mut [u8]);

    /// Rebuilds a value from `bytes[..Self::SIZE]` in native order.
    fn read_ne(bytes: &[u8]) -> Self;

    /// The bit pattern of `self`, zero-extended to 64 bits.
    fn to_raw(self) -> u64;

    /// Rebuilds a value from the low [Self::BITS] of `raw`.
    fn from_raw(raw: u64) -> Self;
}

macro_rules! impl_primitive_int {
    ($($ty:ty => $unsigned:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Primitive for $ty {
                const SIZE: usize = core::mem::size_of::<$ty>();
                const BITS: u32 = <$ty>::BITS;

                #[inline]
                fn write_ne(self, out: &mut [u8]) {
                    out[..Self::SIZE].copy_from_slice(&self.to_ne_bytes());
                }

                #[inline]
                fn read_ne(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; core::mem::size_of::<$ty>()];
                    raw.copy_from_slice(&bytes[..Self::SIZE]);
                    <$ty>::from_ne_bytes(raw)
                }

                #[inline]
                fn to_raw(self) -> u64 {
                    self as $unsigned as u64
                }

                #[inline]
                fn from_raw(raw: u64) -> Self {
                    raw as $unsigned as $ty
                }
            }
        )*
    };
}

impl_primitive_int! {
    u8 => u8,
    u16 => u16,
    u32 => u32,
    u64 => u64,
    i8 => u8,
    i16 => u16,
    i32 => u32,
    i64 => u64,
}

macro_rules! impl_primitive_float {
    ($($ty:ty => $bits:ty),* $(,)?) => {
        $(
            impl sealed::Sealed for $ty {}

            impl Primitive for $ty {
                const SIZE: usize = core::mem::size_of::<$ty>();
                const BITS: u32 = <$bits>::BITS;

                #[inline]
                fn write_ne(self, out: &mut [u8]) {
                    out[..Self::SIZE].copy_from_slice(&self.to_ne_bytes());
                }

                #[inline]
                fn read_ne(bytes: &[u8]) -> Self {
                    let mut raw = [0u8; core::mem::size_of::<$ty>()];
                    raw.copy_from_slice(&bytes[..Self::SIZE]);
                    <$ty>::from_ne_bytes(raw)
                }

                #[inline]
                fn to_raw(self) -> u64 {
                    self.to_bits() as u64
                }

                #[inline]
                fn from_raw(raw: u64) -> Self {
                    <$ty>::from_bits(raw as $bits)
                }
            }
        )*
    };
}

impl_primitive_float! {
    f32 => u32,
    f64 => u64,
}

impl sealed::Sealed for bool {}

impl Primitive for bool {
    const SIZE: usize = 1;
    const BITS: u32 = 8;

    #[inline]
    fn write_ne(self, out: &mut [u8]) {
        out[0] = self as u8;
    }

    #[inline]
    fn read_ne(bytes: &[u8]) -> Self {
        bytes[0] != 0
    }

    #[inline]
    fn to_raw(self) -> u64 {
        self as u64
    }

    #[inline]
    fn from_raw(raw: u64) -> Self {
        raw & 0xff != 0
    }
}
