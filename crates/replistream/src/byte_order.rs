//! Byte order normalization for fixed-width values.
//!
//! Streams store every multi-byte value in little-endian wire order. On hosts
//! whose native order already matches, [to_wire] and [from_wire] compile down
//! to the identity; elsewhere they apply the closed-form swaps below.

/// Byte order of a host or of the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    Little,
    Big,
}

impl ByteOrder {
    /// The order used by every serialized stream.
    pub const WIRE: ByteOrder = ByteOrder::Little;

    /// The order of the host this crate was compiled for.
    pub const fn native() -> ByteOrder {
        if cfg!(target_endian = "little") {
            ByteOrder::Little
        } else {
            ByteOrder::Big
        }
    }

    /// True when values must be swapped on their way to or from the wire.
    pub const fn needs_swap() -> bool {
        !matches!(Self::native(), Self::WIRE)
    }
}

/// Reverses the two bytes of `value`.
#[inline]
pub const fn swap2(value: u16) -> u16 {
    (value >> 8) | (value << 8)
}

/// Reverses the four bytes of `value`.
#[inline]
pub const fn swap4(value: u32) -> u32 {
    ((value >> 24) & 0x0000_00ff)
        | ((value >> 8) & 0x0000_ff00)
        | ((value << 8) & 0x00ff_0000)
        | ((value << 24) & 0xff00_0000)
}

/// Reverses the eight bytes of `value`.
#[inline]
pub const fn swap8(value: u64) -> u64 {
    ((value >> 56) & 0x0000_0000_0000_00ff)
        | ((value >> 40) & 0x0000_0000_0000_ff00)
        | ((value >> 24) & 0x0000_0000_00ff_0000)
        | ((value >> 8) & 0x0000_0000_ff00_0000)
        | ((value << 8) & 0x0000_00ff_0000_0000)
        | ((value << 24) & 0x0000_ff00_0000_0000)
        | ((value << 40) & 0x00ff_0000_0000_0000)
        | ((value << 56) & 0xff00_0000_0000_0000)
}

/// A fixed-width value whose byte order can be reversed.
///
/// Implementations pick the swap matching their width, so the choice is made
/// at compile time and every call is branch-free. Swapping twice is the identity.
pub trait ByteSwap: Copy {
    /// Width of the value in bytes (1, 2, 4 or 8).
    const WIDTH: usize;

    fn byte_swap(self) -> Self;
}

macro_rules! impl_byte_swap {
    ($($ty:ty => $width:literal, $swap:expr;)*) => {
        $(
            impl ByteSwap for $ty {
                const WIDTH: usize = $width;

                #[inline]
                fn byte_swap(self) -> Self {
                    $swap(self)
                }
            }
        )*
    };
}

impl_byte_swap! {
    u8 => 1, |v: u8| v;
    i8 => 1, |v: i8| v;
    bool => 1, |v: bool| v;
    u16 => 2, swap2;
    i16 => 2, |v: i16| swap2(v as u16) as i16;
    u32 => 4, swap4;
    i32 => 4, |v: i32| swap4(v as u32) as i32;
    f32 => 4, |v: f32| f32::from_bits(swap4(v.to_bits()));
    u64 => 8, swap8;
    i64 => 8, |v: i64| swap8(v as u64) as i64;
    f64 => 8, |v: f64| f64::from_bits(swap8(v.to_bits()));
}

/// Converts a native-order value into wire order.
#[inline]
pub fn to_wire<T: ByteSwap>(value: T) -> T {
    if ByteOrder::needs_swap() {
        value.byte_swap()
    } else {
        value
    }
}

/// Converts a wire-order value back into native order.
#[inline]
pub fn from_wire<T: ByteSwap>(value: T) -> T {
    // The swap is an involution, so the inverse is the same operation.
    to_wire(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap2() {
        assert_eq!(swap2(0x1234), 0x3412);
    }

    #[test]
    fn test_swap4() {
        assert_eq!(swap4(0x1234_5678), 0x7856_3412);
    }

    #[test]
    fn test_swap8() {
        assert_eq!(swap8(0x0102_0304_0506_0708), 0x0807_0605_0403_0201);
    }

    #[test]
    fn test_swap_matches_std() {
        assert_eq!(swap2(0xbeef), 0xbeefu16.swap_bytes());
        assert_eq!(swap4(0xdead_beef), 0xdead_beefu32.swap_bytes());
        assert_eq!(
            swap8(0x0123_4567_89ab_cdef),
            0x0123_4567_89ab_cdefu64.swap_bytes()
        );
    }

    #[test]
    fn test_single_byte_is_identity() {
        assert_eq!(0xabu8.byte_swap(), 0xab);
        assert_eq!((-5i8).byte_swap(), -5);
        assert!(true.byte_swap());
    }

    #[test]
    fn test_signed_and_float_swaps() {
        assert_eq!((-2i16).byte_swap(), -257);
        assert_eq!((-2i32).byte_swap(), 0xfeff_ffffu32 as i32);
        assert_eq!(1.5f32.byte_swap().byte_swap(), 1.5);
        assert_eq!((-0.25f64).byte_swap().byte_swap(), -0.25);
    }

    #[test]
    fn test_widths() {
        assert_eq!(<u8 as ByteSwap>::WIDTH, 1);
        assert_eq!(<i16 as ByteSwap>::WIDTH, 2);
        assert_eq!(<f32 as ByteSwap>::WIDTH, 4);
        assert_eq!(<u64 as ByteSwap>::WIDTH, 8);
    }

    #[test]
    fn test_to_wire_produces_little_endian_layout() {
        let value = 0x1122_3344u32;
        assert_eq!(to_wire(value).to_ne_bytes(), value.to_le_bytes());
        assert_eq!(from_wire(to_wire(value)), value);
    }

    #[test]
    fn test_wire_order_is_little() {
        assert_eq!(ByteOrder::WIRE, ByteOrder::Little);
        assert_eq!(
            ByteOrder::needs_swap(),
            ByteOrder::native() != ByteOrder::WIRE
        );
    }
}
