/// A logical integer range packed into a fixed number of bits.
///
/// The raw encoding is zero-based: `raw = logical - MIN`, so the all-zero
/// bit pattern always decodes to [`MIN`](Self::MIN). The codec itself does
/// no range checking; setters call [`clamped()`](Self::clamped) before
/// [`encode()`](Self::encode).
pub trait BoundedValue {
    /// Number of bits the raw encoding occupies.
    const BITS: u32;
    /// Smallest logical value (inclusive).
    const MIN: i32;
    /// Largest logical value (inclusive).
    const MAX: i32 = Self::MIN + (1 << Self::BITS) - 1;

    /// Clamp a logical value into `[MIN, MAX]`.
    fn clamped(value: i32) -> i32 {
        value.clamp(Self::MIN, Self::MAX)
    }

    /// Logical value to raw bit pattern.
    fn encode(value: i32) -> u32 {
        (value - Self::MIN) as u32
    }

    /// Raw bit pattern to logical value.
    fn decode(raw: u32) -> i32 {
        raw as i32 + Self::MIN
    }
}

/// Unsigned range `0..=2^N - 1`.
#[derive(Debug, Clone, Copy)]
pub struct UnsignedValue<const N: u32>;

impl<const N: u32> BoundedValue for UnsignedValue<N> {
    const BITS: u32 = N;
    const MIN: i32 = 0;
}

/// Two's-complement style range `-2^(N-1)..=2^(N-1) - 1`.
#[derive(Debug, Clone, Copy)]
pub struct SignedValue<const N: u32>;

impl<const N: u32> BoundedValue for SignedValue<N> {
    const BITS: u32 = N;
    const MIN: i32 = -(1 << (N - 1));
}
