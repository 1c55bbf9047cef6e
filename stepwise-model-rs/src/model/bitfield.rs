//! Fixed-offset bit fields inside raw storage words.
//!
//! A [`BitField`] names a `WIDTH`-bit slice starting at bit `OFFSET` of a
//! [`Word`]. Reads mask and shift; writes clear the slice and OR in the new
//! value, masked so neighbouring fields are never disturbed.
//!
//! Field layouts are validated at compile time:
//!
//! ```
//! use stepwise::model::bitfield::layout_is_valid;
//!
//! const LAYOUT: [(u32, u32); 2] = [(0, 3), (3, 3)];
//! const _: () = assert!(layout_is_valid(&LAYOUT, u16::BITS));
//! ```

/// Raw unsigned storage word holding one or more bit fields.
pub trait Word: Copy {
    /// Width of the word in bits.
    const BITS: u32;

    fn to_u32(self) -> u32;

    /// Truncates `value` to the word width.
    fn from_u32(value: u32) -> Self;
}

impl Word for u16 {
    const BITS: u32 = u16::BITS;

    fn to_u32(self) -> u32 {
        u32::from(self)
    }

    fn from_u32(value: u32) -> Self {
        value as u16
    }
}

impl Word for u32 {
    const BITS: u32 = u32::BITS;

    fn to_u32(self) -> u32 {
        self
    }

    fn from_u32(value: u32) -> Self {
        value
    }
}

/// A `WIDTH`-bit field at bit `OFFSET`.
#[derive(Debug, Clone, Copy)]
pub struct BitField<const OFFSET: u32, const WIDTH: u32>;

impl<const OFFSET: u32, const WIDTH: u32> BitField<OFFSET, WIDTH> {
    /// Mask of the field's bits within the word.
    pub const MASK: u32 = (u32::MAX >> (32 - WIDTH)) << OFFSET;

    /// Largest value the field can hold.
    pub const MAX: u32 = u32::MAX >> (32 - WIDTH);

    /// Extract the field's unsigned value.
    pub fn get<W: Word>(word: W) -> u32 {
        (word.to_u32() & Self::MASK) >> OFFSET
    }

    /// Replace the field's bits. Bits of `value` above `WIDTH` are dropped.
    pub fn set<W: Word>(word: &mut W, value: u32) {
        let raw = (word.to_u32() & !Self::MASK) | ((value << OFFSET) & Self::MASK);
        *word = W::from_u32(raw);
    }
}

/// Check that `(offset, width)` fields fit in `word_bits` and do not overlap.
///
/// Intended for `const` assertions next to a layout declaration.
pub const fn layout_is_valid(fields: &[(u32, u32)], word_bits: u32) -> bool {
    let mut used: u64 = 0;
    let mut i = 0;
    while i < fields.len() {
        let (offset, width) = fields[i];
        if width == 0 || offset + width > word_bits {
            return false;
        }
        let mask = ((1u64 << width) - 1) << offset;
        if used & mask != 0 {
            return false;
        }
        used |= mask;
        i += 1;
    }
    true
}
